//! Spawn placement: turn a location selector into a concrete position.

use std::f32::consts::TAU;

use glam::Vec2;
use rand::Rng;
use tracing::warn;

use horde_core::constants::{RANDOM_LOCATION, SPAWN_JITTER_RADIUS};
use horde_core::types::{Position, SpawnPoint};

/// Resolve `selector` against `points` and jitter the result.
///
/// `"random"` (or an empty selector) picks uniformly from every point.
/// Otherwise the second whitespace-separated token names a required tag,
/// e.g. `"random bone"`; a selector without a second token also picks from
/// every point. When no point carries the tag, or there are no points at
/// all, this logs a warning and falls back instead of failing.
pub fn resolve_spawn_point<R: Rng>(selector: &str, points: &[SpawnPoint], rng: &mut R) -> Position {
    let base = pick_point(selector, points, rng).unwrap_or_else(|| {
        warn!("no spawn points available, spawning at origin");
        Vec2::ZERO
    });
    base + jitter(rng, SPAWN_JITTER_RADIUS)
}

fn pick_point<R: Rng>(selector: &str, points: &[SpawnPoint], rng: &mut R) -> Option<Position> {
    let selector = selector.trim();
    let tag = if selector.is_empty() || selector == RANDOM_LOCATION {
        None
    } else {
        selector.split_whitespace().nth(1)
    };

    if let Some(tag) = tag {
        let matching: Vec<&SpawnPoint> = points.iter().filter(|p| p.tag == tag).collect();
        if !matching.is_empty() {
            return Some(matching[rng.gen_range(0..matching.len())].position);
        }
        warn!("no spawn point tagged `{tag}`, picking from all points");
    }

    if points.is_empty() {
        return None;
    }
    Some(points[rng.gen_range(0..points.len())].position)
}

/// Uniform random offset inside a disk of `radius`.
pub fn jitter<R: Rng>(rng: &mut R, radius: f32) -> Vec2 {
    // sqrt keeps the density uniform over the disk's area.
    let r = radius * rng.gen::<f32>().sqrt();
    let theta = rng.gen_range(0.0..TAU);
    Vec2::new(r * theta.cos(), r * theta.sin())
}
