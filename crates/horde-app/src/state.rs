//! Types shared between the driver and the game loop thread.

use serde::Serialize;

use horde_core::commands::WaveCommand;
use horde_core::state::{WaveSnapshot, WaveStatistics};

/// Commands sent to the game loop thread.
#[derive(Debug)]
pub enum GameLoopCommand {
    /// Forwarded to the session at the next tick boundary.
    Wave(WaveCommand),
    SetAutoDefend(bool),
    /// Stop the loop and report.
    Shutdown,
}

/// How the game loop paces and ends a run.
#[derive(Debug, Clone)]
pub struct LoopOptions {
    /// Sleep to each tick boundary instead of running as fast as possible.
    pub realtime: bool,
    /// Stop after this much simulated time.
    pub max_seconds: Option<f64>,
    /// Answer every completed wave with `NextWave`.
    pub auto_advance: bool,
}

impl Default for LoopOptions {
    fn default() -> Self {
        Self {
            realtime: false,
            max_seconds: None,
            auto_advance: true,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum LoopOutcome {
    Victory,
    GameOver,
    TimedOut,
    Stopped,
}

/// Final summary of a run.
#[derive(Debug, Clone, Serialize)]
pub struct LoopReport {
    pub outcome: LoopOutcome,
    pub simulated_secs: f64,
    pub ticks: u64,
    pub snapshot: WaveSnapshot,
    pub waves: Vec<WaveStatistics>,
    /// Statistics of the wave the player died on, if any.
    pub final_wave: Option<WaveStatistics>,
}
