//! Events emitted by the wave engine for spawning and UI collaborators.

use serde::{Deserialize, Serialize};

use crate::enums::{WaveLimit, WavePhase};
use crate::state::WaveStatistics;
use crate::types::SpawnRequest;

/// Everything the engine reports to the outside world.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum WaveEvent {
    /// The orchestrator moved between phases.
    PhaseChanged { from: WavePhase, to: WavePhase },
    /// Countdown value changed (3, 2, 1, 0).
    WaveCountdownTick { value: u32 },
    /// A wave's spawning sequence began.
    WaveStarted { wave_number: u32 },
    /// The spawning collaborator should create this enemy.
    SpawnRequested(SpawnRequest),
    /// A wave was cleared and more waves follow.
    WaveCompleted {
        wave_number: u32,
        total_waves: WaveLimit,
        stats: WaveStatistics,
    },
    /// The last wave was cleared.
    AllWavesCompleted { stats: WaveStatistics },
    /// The player died; the level is over.
    GameOverAcknowledged {
        wave_number: u32,
        total_waves: WaveLimit,
        stats: WaveStatistics,
    },
}
