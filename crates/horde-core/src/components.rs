//! ECS components for arena entities.
//!
//! Plain data. Behavior lives in the arena systems.

use serde::{Deserialize, Serialize};

/// A live enemy. `id` is unique for the lifetime of an arena.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Enemy {
    pub id: u32,
    pub name: String,
    pub sprite_index: i32,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Health {
    pub hp: i32,
    pub max_hp: i32,
}

/// Walks straight toward the player at `speed` units per second.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Mover {
    pub speed: f32,
}

/// Melee attack against the player once in range.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Attacker {
    pub damage: u32,
    /// Seconds until the next attack is allowed.
    pub cooldown_secs: f64,
}

/// Periodically raises minions (necromancer).
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Summoner {
    /// Seconds until the next summon attempt.
    pub cooldown_secs: f64,
}

/// Raised by a summoner; dies with its master.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Minion {
    pub master: u32,
}

/// The defended player. Held by value in the arena, not as an entity.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Player {
    pub position: crate::types::Position,
    pub hp: i32,
    pub max_hp: i32,
}

impl Player {
    pub fn is_alive(&self) -> bool {
        self.hp > 0
    }
}
