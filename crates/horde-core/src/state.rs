//! Per-wave statistics and the polled engine snapshot.

use serde::{Deserialize, Serialize};

use crate::enums::{WaveLimit, WavePhase};

/// Counters accumulated over one wave's lifetime.
///
/// Created when the wave starts, mutated by event callbacks while it runs,
/// and frozen by [`WaveStatistics::finalize`]. Once finalized every mutator
/// is a no-op.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WaveStatistics {
    pub wave_number: u32,
    /// Simulation time (seconds) at wave start.
    pub start_time: f64,
    /// Simulation time at finalization, `None` while the wave runs.
    pub end_time: Option<f64>,
    pub elapsed_secs: f64,
    pub enemies_spawned: u32,
    pub enemies_defeated: u32,
    pub damage_dealt: u32,
    pub damage_received: u32,
}

impl WaveStatistics {
    pub fn for_wave(wave_number: u32, now: f64) -> Self {
        Self {
            wave_number,
            start_time: now,
            ..Default::default()
        }
    }

    pub fn is_finalized(&self) -> bool {
        self.end_time.is_some()
    }

    pub fn add_enemy_spawned(&mut self, n: u32) {
        if !self.is_finalized() {
            self.enemies_spawned = self.enemies_spawned.saturating_add(n);
        }
    }

    pub fn add_enemy_defeated(&mut self, n: u32) {
        if !self.is_finalized() {
            self.enemies_defeated = self.enemies_defeated.saturating_add(n);
        }
    }

    pub fn add_damage_dealt(&mut self, amount: u32) {
        if !self.is_finalized() {
            self.damage_dealt = self.damage_dealt.saturating_add(amount);
        }
    }

    pub fn add_damage_received(&mut self, amount: u32) {
        if !self.is_finalized() {
            self.damage_received = self.damage_received.saturating_add(amount);
        }
    }

    /// Stamp the end time and compute the elapsed duration.
    ///
    /// Only the first call has an effect, so `elapsed_secs` never changes
    /// after the wave is closed. A clock reading earlier than `start_time`
    /// is clamped so that `end_time >= start_time` always holds.
    pub fn finalize(&mut self, now: f64) {
        if self.is_finalized() {
            return;
        }
        let end = now.max(self.start_time);
        self.end_time = Some(end);
        self.elapsed_secs = end - self.start_time;
    }
}

/// Visible engine state, polled by the UI collaborator.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct WaveSnapshot {
    pub phase: WavePhase,
    pub level: Option<String>,
    /// Current (or most recently started) wave number, 0 before the first.
    pub wave: u32,
    pub total_waves: Option<WaveLimit>,
    /// Countdown value; only meaningful in `Countdown`.
    pub countdown: u32,
    /// Live enemy count last reported by the game-state collaborator.
    pub live_enemies: usize,
    pub stats: Option<WaveStatistics>,
}
