//! Spawn plan — one spawn rule resolved against the current wave.
//!
//! Formulas are evaluated once when the rule starts. The plan then yields an
//! alternating `Spawn`/`Wait` sequence: every spawn is followed by the spawn
//! interval, and a finished batch also waits out the rule's delay when the
//! rule still has enemies left.

use tracing::{debug, warn};

use horde_catalog::{Catalog, EnemyArchetype, SpawnRule};
use horde_core::constants::SPAWN_INTERVAL_SECS;
use horde_core::types::{Position, SpawnRequest};
use horde_formula::{evaluate, evaluate_or, Variables};

/// One step of a running spawn rule.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SpawnStep {
    /// Emit one spawn request.
    Spawn,
    /// Suspend for this many seconds.
    Wait(f64),
}

/// A spawn rule with every formula resolved.
#[derive(Debug, Clone)]
pub struct SpawnPlan {
    pub enemy_name: String,
    pub sprite_index: i32,
    pub count: u32,
    pub hp: i32,
    pub speed: i32,
    pub damage: i32,
    pub delay_secs: f64,
    pub location: String,
    sequence: Vec<u32>,
    remaining: u32,
    batch_index: usize,
    left_in_batch: u32,
    pending_wait: Option<f64>,
}

impl SpawnPlan {
    /// Resolve `rule` for `wave`. Returns `None` (with a warning) when the
    /// rule names an enemy the catalog does not know.
    pub fn resolve(rule: &SpawnRule, catalog: &Catalog, wave: u32) -> Option<Self> {
        let Some(archetype) = catalog.get_enemy(&rule.enemy) else {
            warn!("skipping spawn rule for unknown enemy `{}`", rule.enemy);
            return None;
        };
        Some(Self::from_archetype(rule, archetype, wave))
    }

    /// Resolve `rule` against a known archetype.
    ///
    /// `base` is re-bound before each stat: to the archetype's hp for count
    /// and hp, then its speed, then its damage. The delay is evaluated last
    /// and sees `base` still bound to damage.
    pub fn from_archetype(rule: &SpawnRule, archetype: &EnemyArchetype, wave: u32) -> Self {
        let mut vars = Variables::new();
        vars.insert("wave".to_string(), wave as i32);

        vars.insert("base".to_string(), archetype.base_hp);
        let count = evaluate(&rule.count, &vars);
        let hp = evaluate_or(rule.hp.as_deref(), &vars, archetype.base_hp);

        vars.insert("base".to_string(), archetype.base_speed);
        let speed = evaluate_or(rule.speed.as_deref(), &vars, archetype.base_speed);

        vars.insert("base".to_string(), archetype.base_damage);
        let damage = evaluate_or(rule.damage.as_deref(), &vars, archetype.base_damage);

        let delay = evaluate(&rule.delay, &vars);

        let count = count.max(0) as u32;
        let sequence = rule
            .batch_sequence()
            .iter()
            .map(|&n| n.max(1) as u32)
            .collect();

        debug!(
            enemy = %archetype.name,
            count, hp, speed, damage, delay, "resolved spawn rule"
        );

        Self {
            enemy_name: archetype.name.clone(),
            sprite_index: archetype.sprite_index,
            count,
            hp,
            speed,
            damage,
            delay_secs: f64::from(delay.max(0)),
            location: rule.location.clone(),
            sequence,
            remaining: count,
            batch_index: 0,
            left_in_batch: 0,
            pending_wait: None,
        }
    }

    /// Enemies this plan has not spawned yet.
    pub fn remaining(&self) -> u32 {
        self.remaining
    }

    /// Build the request for the next spawn at `position`.
    pub fn request(&self, position: Position) -> SpawnRequest {
        SpawnRequest {
            enemy_name: self.enemy_name.clone(),
            sprite_index: self.sprite_index,
            hp: self.hp,
            speed: self.speed,
            damage: self.damage,
            position,
        }
    }

    fn next_batch_size(&mut self) -> u32 {
        let size = if self.sequence.is_empty() {
            1
        } else {
            self.sequence[self.batch_index % self.sequence.len()]
        };
        self.batch_index += 1;
        size.min(self.remaining)
    }
}

impl Iterator for SpawnPlan {
    type Item = SpawnStep;

    fn next(&mut self) -> Option<SpawnStep> {
        if let Some(wait) = self.pending_wait.take() {
            return Some(SpawnStep::Wait(wait));
        }
        if self.remaining == 0 {
            return None;
        }
        if self.left_in_batch == 0 {
            self.left_in_batch = self.next_batch_size();
        }
        self.left_in_batch -= 1;
        self.remaining -= 1;

        let mut wait = SPAWN_INTERVAL_SECS;
        if self.left_in_batch == 0 && self.remaining > 0 {
            wait += self.delay_secs;
        }
        self.pending_wait = Some(wait);
        Some(SpawnStep::Spawn)
    }
}
