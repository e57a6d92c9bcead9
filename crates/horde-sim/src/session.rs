//! Session — one orchestrator wired to one arena behind a single `tick`.
//!
//! Commands are queued and applied at the next tick boundary. Each tick the
//! arena steps first, its events feed the orchestrator's statistics, the
//! orchestrator advances with the arena's live count, and any spawn requests
//! it emits are fulfilled before the tick returns.

use std::collections::VecDeque;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::debug;

use horde_catalog::Catalog;
use horde_core::commands::WaveCommand;
use horde_core::constants::{AUTO_DEFEND_DAMAGE, AUTO_DEFEND_INTERVAL_SECS};
use horde_core::enums::WavePhase;
use horde_core::events::WaveEvent;
use horde_core::state::{WaveSnapshot, WaveStatistics};
use horde_core::types::SpawnPoint;

use crate::arena::{Arena, ArenaConfig, ArenaEvent};
use crate::orchestrator::WaveOrchestrator;

/// Configuration for a new session. Missing fields take their defaults.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    /// RNG seed. Same seed and same inputs give the same run.
    pub seed: u64,
    pub spawn_points: Vec<SpawnPoint>,
    pub arena: ArenaConfig,
    /// Strike the closest enemy on a fixed interval.
    pub auto_defend: bool,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            seed: 42,
            spawn_points: SpawnPoint::default_regions(),
            arena: ArenaConfig::default(),
            auto_defend: false,
        }
    }
}

pub struct Session {
    orchestrator: WaveOrchestrator,
    arena: Arena,
    command_queue: VecDeque<WaveCommand>,
    /// Seconds until the next auto-defend strike; `None` when disabled.
    auto_defend: Option<f64>,
}

impl Session {
    pub fn new(catalog: Arc<Catalog>, config: SessionConfig) -> Self {
        Self {
            orchestrator: WaveOrchestrator::new(catalog, config.spawn_points, config.seed),
            arena: Arena::new(config.arena, config.seed.wrapping_add(1)),
            command_queue: VecDeque::new(),
            auto_defend: config.auto_defend.then_some(AUTO_DEFEND_INTERVAL_SECS),
        }
    }

    /// Queue a command for processing at the next tick boundary.
    pub fn queue_command(&mut self, command: WaveCommand) {
        self.command_queue.push_back(command);
    }

    pub fn queue_commands(&mut self, commands: impl IntoIterator<Item = WaveCommand>) {
        self.command_queue.extend(commands);
    }

    pub fn set_auto_defend(&mut self, enabled: bool) {
        self.auto_defend = enabled.then_some(AUTO_DEFEND_INTERVAL_SECS);
    }

    /// Advance the session by `dt` seconds and return the wave events it
    /// produced, in order.
    pub fn tick(&mut self, dt: f64) -> Vec<WaveEvent> {
        self.process_commands();

        if self.orchestrator.phase().is_active() {
            self.arena.step(dt);
            self.run_auto_defend(dt);
            self.route_arena_events();
        }

        self.orchestrator.tick(dt, self.arena.live_enemy_count());

        let events = self.orchestrator.drain_events();
        for event in &events {
            if let WaveEvent::SpawnRequested(request) = event {
                self.arena.spawn(request);
            }
        }
        events
    }

    pub fn phase(&self) -> WavePhase {
        self.orchestrator.phase()
    }

    pub fn snapshot(&self) -> WaveSnapshot {
        self.orchestrator.snapshot()
    }

    pub fn wave_history(&self) -> &[WaveStatistics] {
        self.orchestrator.wave_history()
    }

    pub fn orchestrator(&self) -> &WaveOrchestrator {
        &self.orchestrator
    }

    pub fn arena(&self) -> &Arena {
        &self.arena
    }

    /// Mutable arena access, for driving combat from tests.
    #[cfg(test)]
    pub fn arena_mut(&mut self) -> &mut Arena {
        &mut self.arena
    }

    fn process_commands(&mut self) {
        while let Some(command) = self.command_queue.pop_front() {
            // A new or abandoned level starts from an empty arena.
            let resets_arena = matches!(
                command,
                WaveCommand::StartLevel { .. } | WaveCommand::ReturnToMenu
            );
            if self.orchestrator.handle(command).is_ok() && resets_arena {
                self.arena.reset();
            }
        }
    }

    fn run_auto_defend(&mut self, dt: f64) {
        let mut strikes = 0;
        if let Some(timer) = self.auto_defend.as_mut() {
            *timer -= dt;
            while *timer <= 0.0 {
                *timer += AUTO_DEFEND_INTERVAL_SECS;
                strikes += 1;
            }
        }

        for _ in 0..strikes {
            let Some(target) = self.arena.closest_enemy(self.arena.player().position) else {
                break;
            };
            let hit = self.arena.damage_enemy(target, AUTO_DEFEND_DAMAGE);
            self.orchestrator.enemy_damaged(hit.dealt);
        }
    }

    fn route_arena_events(&mut self) {
        for event in self.arena.drain_events() {
            match event {
                ArenaEvent::EnemyDefeated { .. } => self.orchestrator.enemy_defeated(),
                ArenaEvent::EnemySummoned { .. } => self.orchestrator.enemy_summoned(),
                ArenaEvent::PlayerDamaged { amount } => self.orchestrator.player_damaged(amount),
                ArenaEvent::PlayerDied => {
                    if let Err(e) = self.orchestrator.player_died() {
                        debug!("player death ignored: {e}");
                    }
                }
            }
        }
    }
}
