//! Load-once, read-many catalog tables.

use std::collections::HashMap;
use std::fs;
use std::path::Path;

use serde::de::DeserializeOwned;
use tracing::{debug, info, warn};

use crate::error::{CatalogError, Result};
use crate::model::{EnemyArchetype, LevelDefinition};

/// Entries that are indexed by a unique name.
pub trait Named {
    /// Label used in log messages ("enemy", "level").
    const KIND: &'static str;

    fn name(&self) -> &str;
}

impl Named for EnemyArchetype {
    const KIND: &'static str = "enemy";

    fn name(&self) -> &str {
        &self.name
    }
}

impl Named for LevelDefinition {
    const KIND: &'static str = "level";

    fn name(&self) -> &str {
        &self.name
    }
}

/// An immutable list of entries plus a name index.
///
/// Entries keep document order. On a name collision the index points at the
/// last entry with that name.
#[derive(Debug, Clone)]
pub struct Table<T> {
    entries: Vec<T>,
    index: HashMap<String, usize>,
}

impl<T> Default for Table<T> {
    fn default() -> Self {
        Self {
            entries: Vec::new(),
            index: HashMap::new(),
        }
    }
}

impl<T: Named + Clone + DeserializeOwned> Table<T> {
    /// Index an already parsed list.
    pub fn from_entries(entries: Vec<T>) -> Self {
        let mut index = HashMap::with_capacity(entries.len());
        for (i, entry) in entries.iter().enumerate() {
            if index.insert(entry.name().to_string(), i).is_some() {
                debug!("{} `{}` redefined, last entry wins", T::KIND, entry.name());
            }
        }
        Self { entries, index }
    }

    /// Parse a JSON array of entries. An empty array is an error.
    pub fn parse(json: &str) -> Result<Self> {
        let entries: Vec<T> = serde_json::from_str(json)?;
        if entries.is_empty() {
            return Err(CatalogError::Empty { what: T::KIND });
        }
        Ok(Self::from_entries(entries))
    }

    /// Read and parse a JSON document from disk.
    pub fn read(path: &Path) -> Result<Self> {
        let json = fs::read_to_string(path).map_err(|source| CatalogError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::parse(&json)
    }

    /// Parse, logging any failure and falling back to an empty table.
    pub fn parse_or_empty(json: &str) -> Self {
        Self::recover(Self::parse(json))
    }

    /// Read from disk, logging any failure and falling back to an empty table.
    pub fn read_or_empty(path: &Path) -> Self {
        Self::recover(Self::read(path))
    }

    fn recover(result: Result<Self>) -> Self {
        match result {
            Ok(table) => {
                info!("loaded {} {} entries", table.len(), T::KIND);
                table
            }
            Err(err) => {
                warn!("{} catalog unavailable: {err}", T::KIND);
                Self::default()
            }
        }
    }
}

impl<T: Clone> Table<T> {
    pub fn get(&self, name: &str) -> Option<&T> {
        self.index.get(name).map(|&i| &self.entries[i])
    }

    /// A copy of every entry, in document order.
    pub fn all(&self) -> Vec<T> {
        self.entries.clone()
    }

    pub fn iter(&self) -> impl Iterator<Item = &T> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Enemy archetypes and level definitions for one session.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    enemies: Table<EnemyArchetype>,
    levels: Table<LevelDefinition>,
}

impl Catalog {
    pub fn new(enemies: Table<EnemyArchetype>, levels: Table<LevelDefinition>) -> Self {
        Self { enemies, levels }
    }

    /// Build from two JSON documents. Never fails; see [`Table::parse_or_empty`].
    pub fn from_json(enemies_json: &str, levels_json: &str) -> Self {
        Self::new(
            Table::parse_or_empty(enemies_json),
            Table::parse_or_empty(levels_json),
        )
    }

    /// Load both documents from disk. Never fails; see [`Table::read_or_empty`].
    pub fn load(enemies_path: &Path, levels_path: &Path) -> Self {
        Self::new(
            Table::read_or_empty(enemies_path),
            Table::read_or_empty(levels_path),
        )
    }

    pub fn get_enemy(&self, name: &str) -> Option<&EnemyArchetype> {
        let enemy = self.enemies.get(name);
        if enemy.is_none() {
            warn!("enemy `{name}` not found");
        }
        enemy
    }

    pub fn get_level(&self, name: &str) -> Option<&LevelDefinition> {
        let level = self.levels.get(name);
        if level.is_none() {
            warn!("level `{name}` not found");
        }
        level
    }

    pub fn all_enemies(&self) -> Vec<EnemyArchetype> {
        self.enemies.all()
    }

    pub fn all_levels(&self) -> Vec<LevelDefinition> {
        self.levels.all()
    }

    pub fn enemies(&self) -> &Table<EnemyArchetype> {
        &self.enemies
    }

    pub fn levels(&self) -> &Table<LevelDefinition> {
        &self.levels
    }
}
