//! Fundamental geometric and simulation types.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// 2D position in world units. x = right, y = up.
pub type Position = Vec2;

/// A tagged region enemies can be spawned around.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpawnPoint {
    /// Tag matched against the second token of a location selector
    /// (e.g. `"red"`, `"green"`, `"bone"`).
    pub tag: String,
    pub position: Position,
}

impl SpawnPoint {
    pub fn new(tag: impl Into<String>, x: f32, y: f32) -> Self {
        Self {
            tag: tag.into(),
            position: Vec2::new(x, y),
        }
    }

    /// The three regions every arena ships with.
    pub fn default_regions() -> Vec<SpawnPoint> {
        vec![
            SpawnPoint::new("red", -20.0, 12.0),
            SpawnPoint::new("green", 20.0, 12.0),
            SpawnPoint::new("bone", 0.0, -18.0),
        ]
    }
}

/// A fully resolved request to bring one enemy into the world.
///
/// The engine never instantiates entities itself; it hands these to the
/// spawning collaborator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpawnRequest {
    pub enemy_name: String,
    pub sprite_index: i32,
    pub hp: i32,
    pub speed: i32,
    pub damage: i32,
    pub position: Position,
}

/// Simulation time tracking.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct SimTime {
    /// Number of ticks processed.
    pub tick: u64,
    /// Elapsed simulation time in seconds.
    pub elapsed_secs: f64,
}

impl SimTime {
    /// Advance by one tick of `dt` seconds. Negative steps are ignored.
    pub fn advance(&mut self, dt: f64) {
        self.tick += 1;
        self.elapsed_secs += dt.max(0.0);
    }

    pub fn now(&self) -> f64 {
        self.elapsed_secs
    }
}
