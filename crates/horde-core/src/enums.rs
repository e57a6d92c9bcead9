//! Enumeration types used throughout the engine.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Lifecycle phase of the wave orchestrator.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum WavePhase {
    /// No level selected.
    #[default]
    Idle,
    /// Counting down to the next wave.
    Countdown,
    /// Dispatching the wave's spawn rules.
    Spawning,
    /// Everything dispatched, waiting for the live enemy count to reach zero.
    AwaitingClear,
    /// Wave finished, waiting for an explicit next-wave request.
    WaveComplete,
    /// Victory. Terminal until a new level is started.
    AllWavesComplete,
    /// Player died. Terminal until a new level is started.
    GameOver,
}

impl WavePhase {
    /// True while a level is running (neither idle nor terminal).
    pub fn is_active(self) -> bool {
        !matches!(
            self,
            WavePhase::Idle | WavePhase::AllWavesComplete | WavePhase::GameOver
        )
    }

    pub fn is_terminal(self) -> bool {
        matches!(self, WavePhase::AllWavesComplete | WavePhase::GameOver)
    }
}

/// How many waves a level runs for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "waves")]
pub enum WaveLimit {
    Finite(u32),
    /// No upper bound; the level only ends when the player dies.
    Endless,
}

impl WaveLimit {
    /// True when another wave follows `completed_wave`.
    pub fn has_wave_after(self, completed_wave: u32) -> bool {
        match self {
            WaveLimit::Finite(total) => completed_wave < total,
            WaveLimit::Endless => true,
        }
    }
}

impl fmt::Display for WaveLimit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WaveLimit::Finite(total) => write!(f, "{total}"),
            WaveLimit::Endless => f.write_str("endless"),
        }
    }
}
