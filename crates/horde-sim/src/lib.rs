//! Wave engine for horde.
//!
//! Owns the wave orchestrator state machine, spawn placement, and a
//! reference arena (a hecs world of live enemies and the player). A
//! `Session` ties them together behind a single `tick(dt)` driver, so the
//! whole engine runs headless and deterministically under test.

pub mod arena;
pub mod error;
pub mod orchestrator;
pub mod placement;
pub mod session;
pub mod spawn_plan;

pub use horde_core as core;
pub use orchestrator::WaveOrchestrator;
pub use session::{Session, SessionConfig};
