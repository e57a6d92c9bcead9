//! Orchestration errors. All of them are recoverable: the rejected request
//! leaves the orchestrator's state untouched.

use thiserror::Error;

use horde_core::enums::WavePhase;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum WaveError {
    #[error("level `{name}` not found")]
    UnknownLevel { name: String },

    #[error("level `{name}` has no waves and is not endless")]
    EmptyLevel { name: String },

    #[error("level `{current}` is still in progress")]
    LevelInProgress { current: String },

    #[error("no level is running")]
    NoActiveLevel,

    #[error("next wave requested while {phase:?}")]
    NotAwaitingNextWave { phase: WavePhase },
}
