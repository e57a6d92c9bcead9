//! Engine constants and tuning parameters.

/// Default driver tick rate (Hz).
pub const TICK_RATE: u32 = 60;

/// Seconds per tick at the default tick rate.
pub const DT: f64 = 1.0 / TICK_RATE as f64;

// --- Wave pacing ---

/// Countdown value shown before every wave. One decrement per second.
pub const WAVE_COUNTDOWN: u32 = 3;

/// Seconds between two countdown decrements.
pub const COUNTDOWN_STEP_SECS: f64 = 1.0;

/// Pause after each individual spawn inside a batch (seconds).
pub const SPAWN_INTERVAL_SECS: f64 = 0.1;

/// Inter-batch delay expression used when a spawn rule omits `delay`.
pub const DEFAULT_DELAY_EXPR: &str = "2";

/// Location selector that picks from every spawn point.
pub const RANDOM_LOCATION: &str = "random";

/// Level name that marks a zero-wave level as endless.
pub const ENDLESS_LEVEL_NAME: &str = "Endless";

// --- Placement ---

/// Radius of the disk used to jitter spawn positions (world units).
pub const SPAWN_JITTER_RADIUS: f32 = 1.8;

// --- Arena ---

/// Player starting hit points.
pub const PLAYER_MAX_HP: u32 = 100;

/// Distance at which an enemy stops moving and attacks.
pub const ENEMY_ATTACK_RANGE: f32 = 2.0;

/// Minimum seconds between two attacks of the same enemy.
pub const ENEMY_ATTACK_COOLDOWN_SECS: f64 = 2.0;

// --- Necromancer ---

/// Archetype name that receives the summoning behavior.
pub const NECROMANCER_NAME: &str = "necromancer";

/// Archetype name of summoned minions.
pub const MINION_NAME: &str = "skeleton";

/// Lower bound of the random summon cooldown (seconds).
pub const SUMMON_COOLDOWN_MIN_SECS: f64 = 8.0;

/// Upper bound of the random summon cooldown (seconds).
pub const SUMMON_COOLDOWN_MAX_SECS: f64 = 12.0;

/// Maximum live minions per necromancer.
pub const MAX_MINIONS: usize = 3;

/// Minion base stats before scaling: (hp, speed, damage).
pub const MINION_BASE_STATS: (i32, i32, i32) = (50, 5, 3);

/// Visual index used for summoned minions.
pub const MINION_SPRITE: i32 = 0;

/// Minion hit point multiplier.
pub const MINION_HP_SCALE: f32 = 0.8;

/// Minion speed multiplier.
pub const MINION_SPEED_SCALE: f32 = 0.9;

// --- Auto-defender ---

/// Seconds between two auto-defender strikes.
pub const AUTO_DEFEND_INTERVAL_SECS: f64 = 0.5;

/// Damage dealt by one auto-defender strike.
pub const AUTO_DEFEND_DAMAGE: u32 = 25;
