//! Wave orchestrator — drives a level through countdowns, spawning, clears,
//! and completion.
//!
//! The orchestrator is a tick-driven state machine. Every timed suspension
//! (countdown steps, spawn intervals, batch delays) is a timer that consumes
//! the `dt` handed to `tick`; leftover time carries into the next action, so
//! a long tick can run several of them. Nothing here touches the world
//! directly: spawns go out as `SpawnRequested` events and the live enemy
//! count comes back in through `tick`.

use std::sync::Arc;

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use tracing::{debug, info, warn};

use horde_catalog::{Catalog, LevelDefinition};
use horde_core::commands::WaveCommand;
use horde_core::constants::{COUNTDOWN_STEP_SECS, WAVE_COUNTDOWN};
use horde_core::enums::{WaveLimit, WavePhase};
use horde_core::events::WaveEvent;
use horde_core::state::{WaveSnapshot, WaveStatistics};
use horde_core::types::{SimTime, SpawnPoint};

use crate::error::WaveError;
use crate::placement;
use crate::spawn_plan::{SpawnPlan, SpawnStep};

/// Sequences the waves of one level at a time.
pub struct WaveOrchestrator {
    catalog: Arc<Catalog>,
    spawn_points: Vec<SpawnPoint>,
    rng: ChaCha8Rng,
    time: SimTime,
    phase: WavePhase,

    level: Option<LevelDefinition>,
    total_waves: Option<WaveLimit>,
    wave: u32,
    countdown: u32,
    /// Seconds left on the current countdown step or spawn pause.
    timer: f64,

    next_rule: usize,
    plan: Option<SpawnPlan>,
    /// Set when spawns went out since the last live-count poll.
    spawned_since_poll: bool,
    live_enemies: usize,

    stats: Option<WaveStatistics>,
    history: Vec<WaveStatistics>,
    events: Vec<WaveEvent>,
}

impl WaveOrchestrator {
    pub fn new(catalog: Arc<Catalog>, spawn_points: Vec<SpawnPoint>, seed: u64) -> Self {
        Self {
            catalog,
            spawn_points,
            rng: ChaCha8Rng::seed_from_u64(seed),
            time: SimTime::default(),
            phase: WavePhase::default(),
            level: None,
            total_waves: None,
            wave: 0,
            countdown: 0,
            timer: 0.0,
            next_rule: 0,
            plan: None,
            spawned_since_poll: false,
            live_enemies: 0,
            stats: None,
            history: Vec::new(),
            events: Vec::new(),
        }
    }

    // ---- Requests ----

    /// Begin `level_name` from wave 1.
    ///
    /// Rejected while another level is still running; a level that reached
    /// victory or game over can be restarted.
    pub fn start_level(&mut self, level_name: &str) -> Result<(), WaveError> {
        if self.phase.is_active() {
            return Err(WaveError::LevelInProgress {
                current: self.level_name().unwrap_or_default().to_string(),
            });
        }

        let level = self
            .catalog
            .get_level(level_name)
            .ok_or_else(|| WaveError::UnknownLevel {
                name: level_name.to_string(),
            })?;

        let limit = if level.wave_count > 0 {
            WaveLimit::Finite(level.wave_count)
        } else if level.is_endless() {
            WaveLimit::Endless
        } else {
            return Err(WaveError::EmptyLevel {
                name: level_name.to_string(),
            });
        };

        info!("starting level `{}` ({limit} waves)", level.name);
        self.level = Some(level.clone());
        self.total_waves = Some(limit);
        self.wave = 0;
        self.stats = None;
        self.history.clear();
        self.reset_spawning();
        self.enter_countdown();
        Ok(())
    }

    /// Leave `WaveComplete` and count down into the next wave.
    pub fn next_wave(&mut self) -> Result<(), WaveError> {
        match self.phase {
            WavePhase::WaveComplete => {
                self.enter_countdown();
                Ok(())
            }
            _ if self.level.is_none() => Err(WaveError::NoActiveLevel),
            phase => Err(WaveError::NotAwaitingNextWave { phase }),
        }
    }

    /// End the run. Any pending countdown or spawning stops at once.
    pub fn player_died(&mut self) -> Result<(), WaveError> {
        if !self.phase.is_active() {
            return Err(WaveError::NoActiveLevel);
        }

        let now = self.time.now();
        let wave = self.wave;
        let stats = self
            .stats
            .get_or_insert_with(|| WaveStatistics::for_wave(wave, now));
        stats.finalize(now);
        let stats = stats.clone();

        self.reset_spawning();
        self.set_phase(WavePhase::GameOver);
        warn!("game over on wave {}", self.wave);
        self.events.push(WaveEvent::GameOverAcknowledged {
            wave_number: self.wave,
            total_waves: self.total_waves.unwrap_or(WaveLimit::Finite(0)),
            stats,
        });
        Ok(())
    }

    /// Abandon the current level and go back to `Idle`.
    pub fn return_to_menu(&mut self) {
        if let Some(name) = self.level_name() {
            info!("leaving level `{name}`");
        }
        self.level = None;
        self.total_waves = None;
        self.wave = 0;
        self.countdown = 0;
        self.stats = None;
        self.reset_spawning();
        self.set_phase(WavePhase::Idle);
    }

    // ---- Statistics feeds ----

    pub fn enemy_defeated(&mut self) {
        if let Some(stats) = self.stats.as_mut() {
            stats.add_enemy_defeated(1);
        }
    }

    /// An enemy entered play without a spawn request (necromancer minion).
    pub fn enemy_summoned(&mut self) {
        if let Some(stats) = self.stats.as_mut() {
            stats.add_enemy_spawned(1);
        }
    }

    pub fn player_damaged(&mut self, amount: u32) {
        if let Some(stats) = self.stats.as_mut() {
            stats.add_damage_received(amount);
        }
    }

    pub fn enemy_damaged(&mut self, amount: u32) {
        if let Some(stats) = self.stats.as_mut() {
            stats.add_damage_dealt(amount);
        }
    }

    /// Apply one command. Rejected requests are logged and returned.
    pub fn handle(&mut self, command: WaveCommand) -> Result<(), WaveError> {
        let result = match command {
            WaveCommand::StartLevel { level_name } => self.start_level(&level_name),
            WaveCommand::NextWave => self.next_wave(),
            WaveCommand::ReturnToMenu => {
                self.return_to_menu();
                Ok(())
            }
            WaveCommand::EnemyDefeated => {
                self.enemy_defeated();
                Ok(())
            }
            WaveCommand::PlayerDamaged { amount } => {
                self.player_damaged(amount);
                Ok(())
            }
            WaveCommand::EnemyDamaged { amount } => {
                self.enemy_damaged(amount);
                Ok(())
            }
            WaveCommand::PlayerDied => self.player_died(),
        };
        if let Err(e) = &result {
            warn!("wave command rejected: {e}");
        }
        result
    }

    // ---- Time ----

    /// Advance by `dt` seconds. `live_enemies` is the collaborator's current
    /// count of enemies in play.
    pub fn tick(&mut self, dt: f64, live_enemies: usize) {
        let dt = dt.max(0.0);
        self.time.advance(dt);
        self.live_enemies = live_enemies;
        self.spawned_since_poll = false;

        let mut budget = dt;
        loop {
            match self.phase {
                WavePhase::Countdown => {
                    if self.timer > budget {
                        self.timer -= budget;
                        break;
                    }
                    budget -= self.timer;
                    self.countdown = self.countdown.saturating_sub(1);
                    self.events.push(WaveEvent::WaveCountdownTick {
                        value: self.countdown,
                    });
                    if self.countdown == 0 {
                        self.begin_wave();
                    } else {
                        self.timer = COUNTDOWN_STEP_SECS;
                    }
                }
                WavePhase::Spawning => {
                    if self.timer > budget {
                        self.timer -= budget;
                        break;
                    }
                    budget -= self.timer;
                    self.timer = 0.0;
                    match self.next_step() {
                        Some(SpawnStep::Spawn) => self.dispatch_spawn(),
                        Some(SpawnStep::Wait(secs)) => self.timer = secs,
                        None => {
                            debug!("wave {} fully spawned", self.wave);
                            self.set_phase(WavePhase::AwaitingClear);
                        }
                    }
                }
                WavePhase::AwaitingClear => {
                    // Spawns sent this tick are not in the live count yet.
                    if self.spawned_since_poll || self.live_enemies > 0 {
                        break;
                    }
                    self.complete_wave();
                }
                _ => break,
            }
        }
    }

    /// Take every event produced since the last drain.
    pub fn drain_events(&mut self) -> Vec<WaveEvent> {
        std::mem::take(&mut self.events)
    }

    // ---- Queries ----

    pub fn phase(&self) -> WavePhase {
        self.phase
    }

    pub fn wave(&self) -> u32 {
        self.wave
    }

    pub fn total_waves(&self) -> Option<WaveLimit> {
        self.total_waves
    }

    pub fn countdown(&self) -> u32 {
        self.countdown
    }

    pub fn time(&self) -> SimTime {
        self.time
    }

    pub fn level_name(&self) -> Option<&str> {
        self.level.as_ref().map(|l| l.name.as_str())
    }

    /// Statistics of the wave in progress, or of the last finished one.
    pub fn current_stats(&self) -> Option<&WaveStatistics> {
        self.stats.as_ref()
    }

    /// Finalized statistics of every completed wave of the current level.
    pub fn wave_history(&self) -> &[WaveStatistics] {
        &self.history
    }

    pub fn snapshot(&self) -> WaveSnapshot {
        WaveSnapshot {
            phase: self.phase,
            level: self.level_name().map(str::to_string),
            wave: self.wave,
            total_waves: self.total_waves,
            countdown: self.countdown,
            live_enemies: self.live_enemies,
            stats: self.stats.clone(),
        }
    }

    // ---- Internals ----

    fn set_phase(&mut self, to: WavePhase) {
        if self.phase == to {
            return;
        }
        let from = self.phase;
        debug!("wave phase {from:?} -> {to:?}");
        self.phase = to;
        self.events.push(WaveEvent::PhaseChanged { from, to });
    }

    fn reset_spawning(&mut self) {
        self.next_rule = 0;
        self.plan = None;
        self.timer = 0.0;
    }

    fn enter_countdown(&mut self) {
        self.countdown = WAVE_COUNTDOWN;
        self.timer = COUNTDOWN_STEP_SECS;
        self.set_phase(WavePhase::Countdown);
        self.events.push(WaveEvent::WaveCountdownTick {
            value: self.countdown,
        });
    }

    fn begin_wave(&mut self) {
        self.wave = self.wave.saturating_add(1);
        self.stats = Some(WaveStatistics::for_wave(self.wave, self.time.now()));
        self.reset_spawning();
        info!("wave {} started", self.wave);
        self.set_phase(WavePhase::Spawning);
        self.events.push(WaveEvent::WaveStarted {
            wave_number: self.wave,
        });
    }

    /// Next step of the running rule, starting later rules as earlier ones
    /// run dry. `None` once every rule of the level is exhausted.
    fn next_step(&mut self) -> Option<SpawnStep> {
        loop {
            if let Some(step) = self.plan.as_mut().and_then(|plan| plan.next()) {
                return Some(step);
            }
            self.plan = None;

            let rule = self.level.as_ref()?.spawn_rules.get(self.next_rule)?;
            self.next_rule += 1;
            if let Some(plan) = SpawnPlan::resolve(rule, &self.catalog, self.wave) {
                if let Some(stats) = self.stats.as_mut() {
                    stats.add_enemy_spawned(plan.count);
                }
                self.plan = Some(plan);
            }
        }
    }

    fn dispatch_spawn(&mut self) {
        let Some(plan) = self.plan.as_ref() else {
            return;
        };
        let position = placement::resolve_spawn_point(
            &plan.location,
            &self.spawn_points,
            &mut self.rng,
        );
        self.events.push(WaveEvent::SpawnRequested(plan.request(position)));
        self.spawned_since_poll = true;
    }

    fn complete_wave(&mut self) {
        let now = self.time.now();
        let wave = self.wave;
        let stats = self
            .stats
            .get_or_insert_with(|| WaveStatistics::for_wave(wave, now));
        stats.finalize(now);
        let stats = stats.clone();
        self.history.push(stats.clone());
        info!(
            "wave {} cleared in {:.1}s ({} defeated)",
            self.wave, stats.elapsed_secs, stats.enemies_defeated
        );

        // Every wave passes through WaveComplete, the last one included.
        self.set_phase(WavePhase::WaveComplete);
        let limit = self.total_waves.unwrap_or(WaveLimit::Finite(0));
        if limit.has_wave_after(self.wave) {
            self.events.push(WaveEvent::WaveCompleted {
                wave_number: self.wave,
                total_waves: limit,
                stats,
            });
        } else {
            self.set_phase(WavePhase::AllWavesComplete);
            info!(
                "all waves of `{}` complete",
                self.level_name().unwrap_or_default()
            );
            self.events.push(WaveEvent::AllWavesCompleted { stats });
        }
    }
}
