//! Commands sent from collaborators to the wave engine.
//!
//! Commands are queued and processed at the next tick boundary.

use serde::{Deserialize, Serialize};

/// Everything the engine consumes from the outside world.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum WaveCommand {
    // --- Level flow ---
    /// Select a level by name and start its first countdown.
    StartLevel { level_name: String },
    /// Continue from a completed wave to the next countdown.
    NextWave,
    /// Abandon the current level and return to `Idle`.
    ReturnToMenu,

    // --- Combat feedback ---
    /// One enemy was defeated.
    EnemyDefeated,
    /// The player took damage.
    PlayerDamaged { amount: u32 },
    /// The player dealt damage to an enemy.
    EnemyDamaged { amount: u32 },
    /// The player died. Ends the level immediately.
    PlayerDied,
}
