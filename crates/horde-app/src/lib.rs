//! Headless driver for the horde wave engine.
//!
//! Runs a `Session` on its own thread at a fixed tick rate and feeds it
//! commands over a channel, the way an interactive frontend would.

pub mod game_loop;
pub mod logging;
pub mod state;

pub use horde_core as core;
