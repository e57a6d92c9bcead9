//! Data model for the declarative enemy and level documents.
//!
//! JSON field names follow the shipped data files (`sprite`, `hp`, `waves`,
//! `spawns`, `enemy`, ...); the long-form names are accepted as aliases.
//! Unknown fields are ignored.

use serde::{Deserialize, Deserializer, Serialize};

use horde_core::constants::{DEFAULT_DELAY_EXPR, ENDLESS_LEVEL_NAME, RANDOM_LOCATION};

/// Immutable template describing one enemy kind's base stats.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnemyArchetype {
    pub name: String,
    #[serde(rename = "sprite", alias = "spriteIndex", default)]
    pub sprite_index: i32,
    #[serde(rename = "hp", alias = "baseHp", default)]
    pub base_hp: i32,
    #[serde(rename = "speed", alias = "baseSpeed", default)]
    pub base_speed: i32,
    #[serde(rename = "damage", alias = "baseDamage", default)]
    pub base_damage: i32,
}

/// A named level: how many waves it runs and what each wave spawns.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LevelDefinition {
    pub name: String,
    /// Number of waves. `0` together with [`LevelDefinition::is_endless`]
    /// means unbounded.
    #[serde(rename = "waves", alias = "waveCount", default)]
    pub wave_count: u32,
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub endless: bool,
    /// Rules dispatched in declaration order every wave.
    #[serde(rename = "spawns", alias = "spawnRules", default)]
    pub spawn_rules: Vec<SpawnRule>,
}

impl LevelDefinition {
    /// A zero-wave level is endless when flagged or named `"Endless"`.
    pub fn is_endless(&self) -> bool {
        self.wave_count == 0 && (self.endless || self.name == ENDLESS_LEVEL_NAME)
    }
}

/// One spawn instruction inside a wave.
///
/// Every numeric field is a postfix expression evaluated per wave with
/// `wave` and `base` bound. Absent stat expressions keep the archetype's
/// base stat.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpawnRule {
    #[serde(rename = "enemy", alias = "enemyArchetypeName")]
    pub enemy: String,
    #[serde(alias = "countExpr", default, deserialize_with = "de_expr")]
    pub count: String,
    #[serde(
        alias = "hpExpr",
        default,
        deserialize_with = "de_opt_expr",
        skip_serializing_if = "Option::is_none"
    )]
    pub hp: Option<String>,
    #[serde(
        alias = "speedExpr",
        default,
        deserialize_with = "de_opt_expr",
        skip_serializing_if = "Option::is_none"
    )]
    pub speed: Option<String>,
    #[serde(
        alias = "damageExpr",
        default,
        deserialize_with = "de_opt_expr",
        skip_serializing_if = "Option::is_none"
    )]
    pub damage: Option<String>,
    #[serde(
        alias = "delayExpr",
        default = "default_delay",
        deserialize_with = "de_expr"
    )]
    pub delay: String,
    #[serde(alias = "batchSequence", default)]
    pub sequence: Vec<i32>,
    #[serde(alias = "locationSelector", default = "default_location")]
    pub location: String,
}

impl SpawnRule {
    /// Build a rule with every optional field at its default.
    pub fn new(enemy: impl Into<String>, count: impl Into<String>) -> Self {
        Self {
            enemy: enemy.into(),
            count: count.into(),
            hp: None,
            speed: None,
            damage: None,
            delay: default_delay(),
            sequence: Vec::new(),
            location: default_location(),
        }
    }

    /// Batch sizes to cycle through. Never empty: `[1]` when unset.
    pub fn batch_sequence(&self) -> &[i32] {
        if self.sequence.is_empty() {
            &[1]
        } else {
            &self.sequence
        }
    }
}

fn default_delay() -> String {
    DEFAULT_DELAY_EXPR.to_string()
}

fn default_location() -> String {
    RANDOM_LOCATION.to_string()
}

/// Expressions may be written as strings (`"wave 2 *"`) or bare integers.
#[derive(Deserialize)]
#[serde(untagged)]
enum RawExpr {
    Text(String),
    Int(i64),
}

impl From<RawExpr> for String {
    fn from(raw: RawExpr) -> Self {
        match raw {
            RawExpr::Text(text) => text,
            RawExpr::Int(n) => n.to_string(),
        }
    }
}

fn de_expr<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    RawExpr::deserialize(deserializer).map(String::from)
}

fn de_opt_expr<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<String>, D::Error> {
    let raw = Option::<RawExpr>::deserialize(deserializer)?;
    Ok(raw.map(String::from))
}
