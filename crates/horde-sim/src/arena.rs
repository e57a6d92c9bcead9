//! Arena — the reference world that fulfills spawn requests.
//!
//! Enemies are hecs entities that walk at the player and hit it once in
//! range. Necromancers additionally raise skeleton minions on a random
//! cooldown, and take those minions down with them. The arena reports what
//! happened through `ArenaEvent`s; it never talks to the orchestrator.

use glam::Vec2;
use hecs::{Entity, World};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use horde_core::components::{Attacker, Enemy, Health, Minion, Mover, Player, Summoner};
use horde_core::constants::{
    ENEMY_ATTACK_COOLDOWN_SECS, ENEMY_ATTACK_RANGE, MAX_MINIONS, MINION_BASE_STATS,
    MINION_HP_SCALE, MINION_NAME, MINION_SPEED_SCALE, MINION_SPRITE, NECROMANCER_NAME,
    PLAYER_MAX_HP, SPAWN_JITTER_RADIUS, SUMMON_COOLDOWN_MAX_SECS, SUMMON_COOLDOWN_MIN_SECS,
};
use horde_core::types::{Position, SpawnRequest};

use crate::placement;

/// Player setup for a fresh arena.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ArenaConfig {
    pub player_position: Position,
    pub player_hp: u32,
}

impl Default for ArenaConfig {
    fn default() -> Self {
        Self {
            player_position: Vec2::ZERO,
            player_hp: PLAYER_MAX_HP,
        }
    }
}

/// Something the arena wants the wave engine to know about.
#[derive(Debug, Clone, PartialEq)]
pub enum ArenaEvent {
    EnemyDefeated { id: u32, name: String },
    EnemySummoned { id: u32, master: u32 },
    PlayerDamaged { amount: u32 },
    /// Sent once, on the hit that takes the player to zero.
    PlayerDied,
}

/// Result of one strike on an enemy.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Hit {
    /// Damage actually applied, capped at the hit points left.
    pub dealt: u32,
    pub killed: bool,
}

pub struct Arena {
    world: World,
    config: ArenaConfig,
    player: Player,
    rng: ChaCha8Rng,
    next_enemy_id: u32,
    despawn_buffer: Vec<Entity>,
    events: Vec<ArenaEvent>,
}

impl Arena {
    pub fn new(config: ArenaConfig, seed: u64) -> Self {
        let player = fresh_player(&config);
        Self {
            world: World::new(),
            config,
            player,
            rng: ChaCha8Rng::seed_from_u64(seed),
            next_enemy_id: 0,
            despawn_buffer: Vec::new(),
            events: Vec::new(),
        }
    }

    /// Remove every enemy and restore the player.
    pub fn reset(&mut self) {
        self.world.clear();
        self.player = fresh_player(&self.config);
        self.despawn_buffer.clear();
        self.events.clear();
    }

    /// Create an enemy from a spawn request.
    pub fn spawn(&mut self, request: &SpawnRequest) -> Entity {
        let id = self.next_enemy_id;
        self.next_enemy_id = self.next_enemy_id.wrapping_add(1);

        let hp = request.hp.max(1);
        let entity = self.world.spawn((
            Enemy {
                id,
                name: request.enemy_name.clone(),
                sprite_index: request.sprite_index,
            },
            Health { hp, max_hp: hp },
            Mover {
                speed: request.speed.max(0) as f32,
            },
            Attacker {
                damage: request.damage.max(0) as u32,
                cooldown_secs: 0.0,
            },
            request.position,
        ));

        if request.enemy_name == NECROMANCER_NAME {
            let cooldown_secs = self.roll_summon_cooldown();
            let _ = self.world.insert_one(entity, Summoner { cooldown_secs });
        }

        debug!(
            "spawned {} #{id} at ({:.1}, {:.1})",
            request.enemy_name, request.position.x, request.position.y
        );
        entity
    }

    pub fn live_enemy_count(&self) -> usize {
        let mut q = self.world.query::<&Enemy>();
        q.iter().count()
    }

    pub fn player(&self) -> &Player {
        &self.player
    }

    /// Read-only access to the ECS world.
    pub fn world(&self) -> &World {
        &self.world
    }

    /// The live enemy nearest to `point`.
    pub fn closest_enemy(&self, point: Position) -> Option<Entity> {
        let mut q = self.world.query::<(&Enemy, &Position)>();
        let closest = q
            .iter()
            .map(|(entity, (_, pos))| (entity, pos.distance_squared(point)))
            .min_by(|a, b| a.1.total_cmp(&b.1))
            .map(|(entity, _)| entity);
        closest
    }

    /// Apply up to `amount` damage to `entity`. Dead or unknown entities
    /// take nothing.
    pub fn damage_enemy(&mut self, entity: Entity, amount: u32) -> Hit {
        let amount = i32::try_from(amount).unwrap_or(i32::MAX);
        let hit = match self.world.get::<&mut Health>(entity) {
            Ok(mut health) => {
                let dealt = amount.min(health.hp.max(0));
                health.hp -= dealt;
                Hit {
                    dealt: dealt as u32,
                    killed: health.hp <= 0,
                }
            }
            Err(_) => return Hit::default(),
        };
        if hit.killed {
            self.kill(entity);
        }
        hit
    }

    /// Advance movement, attacks, and summoning by `dt` seconds. Frozen once
    /// the player is dead.
    pub fn step(&mut self, dt: f64) {
        if !self.player.is_alive() {
            return;
        }
        let dt = dt.max(0.0);
        self.run_enemies(dt);
        self.run_summoners(dt);
    }

    pub fn drain_events(&mut self) -> Vec<ArenaEvent> {
        std::mem::take(&mut self.events)
    }

    fn run_enemies(&mut self, dt: f64) {
        let target = self.player.position;
        let mut hits = Vec::new();

        for (_entity, (pos, mover, attacker)) in
            self.world.query_mut::<(&mut Position, &Mover, &mut Attacker)>()
        {
            attacker.cooldown_secs = (attacker.cooldown_secs - dt).max(0.0);
            let offset = target - *pos;
            if offset.length() <= ENEMY_ATTACK_RANGE {
                if attacker.cooldown_secs <= 0.0 {
                    hits.push(attacker.damage);
                    attacker.cooldown_secs = ENEMY_ATTACK_COOLDOWN_SECS;
                }
            } else {
                *pos += offset.clamp_length_max(mover.speed * dt as f32);
            }
        }

        for damage in hits {
            self.hurt_player(damage);
        }
    }

    fn run_summoners(&mut self, dt: f64) {
        let mut due = Vec::new();
        for (entity, (enemy, summoner, pos)) in
            self.world.query_mut::<(&Enemy, &mut Summoner, &Position)>()
        {
            summoner.cooldown_secs -= dt;
            if summoner.cooldown_secs <= 0.0 {
                due.push((entity, enemy.id, *pos));
            }
        }

        for (entity, master, pos) in due {
            // At the cap the summoner stays due and retries next step.
            if self.minion_count(master) >= MAX_MINIONS {
                continue;
            }
            self.summon_minion(master, pos);
            let cooldown_secs = self.roll_summon_cooldown();
            if let Ok(mut summoner) = self.world.get::<&mut Summoner>(entity) {
                summoner.cooldown_secs = cooldown_secs;
            }
        }
    }

    fn summon_minion(&mut self, master: u32, at: Position) {
        let (hp, speed, damage) = MINION_BASE_STATS;
        let request = SpawnRequest {
            enemy_name: MINION_NAME.to_string(),
            sprite_index: MINION_SPRITE,
            hp: (hp as f32 * MINION_HP_SCALE).round() as i32,
            speed: (speed as f32 * MINION_SPEED_SCALE).round() as i32,
            damage,
            position: at + placement::jitter(&mut self.rng, SPAWN_JITTER_RADIUS),
        };
        let entity = self.spawn(&request);
        let _ = self.world.insert_one(entity, Minion { master });
        if let Ok(enemy) = self.world.get::<&Enemy>(entity) {
            self.events.push(ArenaEvent::EnemySummoned {
                id: enemy.id,
                master,
            });
        }
    }

    fn minion_count(&self, master: u32) -> usize {
        let mut q = self.world.query::<&Minion>();
        let count = q.iter().filter(|(_, m)| m.master == master).count();
        count
    }

    fn roll_summon_cooldown(&mut self) -> f64 {
        self.rng
            .gen_range(SUMMON_COOLDOWN_MIN_SECS..=SUMMON_COOLDOWN_MAX_SECS)
    }

    fn hurt_player(&mut self, amount: u32) {
        if amount == 0 || !self.player.is_alive() {
            return;
        }
        let hit = i32::try_from(amount).unwrap_or(i32::MAX);
        self.player.hp = self.player.hp.saturating_sub(hit);
        self.events.push(ArenaEvent::PlayerDamaged { amount });
        if !self.player.is_alive() {
            info!("player died");
            self.events.push(ArenaEvent::PlayerDied);
        }
    }

    /// Despawn `entity`, and its minions when it is a summoner.
    fn kill(&mut self, entity: Entity) {
        self.despawn_buffer.clear();
        let master = match self.world.get::<&Enemy>(entity) {
            Ok(enemy) => enemy.id,
            Err(_) => return,
        };

        if self.world.get::<&Summoner>(entity).is_ok() {
            for (minion, tag) in self.world.query_mut::<&Minion>() {
                if tag.master == master {
                    self.despawn_buffer.push(minion);
                }
            }
        }
        self.despawn_buffer.push(entity);

        for dead in self.despawn_buffer.drain(..) {
            if let Ok(enemy) = self.world.remove_one::<Enemy>(dead) {
                self.events.push(ArenaEvent::EnemyDefeated {
                    id: enemy.id,
                    name: enemy.name,
                });
            }
            let _ = self.world.despawn(dead);
        }
    }
}

fn fresh_player(config: &ArenaConfig) -> Player {
    let hp = i32::try_from(config.player_hp).unwrap_or(i32::MAX);
    Player {
        position: config.player_position,
        hp,
        max_hp: hp,
    }
}
