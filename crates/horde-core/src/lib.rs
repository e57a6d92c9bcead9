//! Core types and definitions for the horde wave engine.
//!
//! This crate defines the vocabulary shared across all other crates:
//! positions and spawn points, commands, events, wave statistics, and
//! constants. It has no dependency on any runtime framework.

pub mod commands;
pub mod components;
pub mod constants;
pub mod enums;
pub mod events;
pub mod state;
pub mod types;
