//! Read-only catalogs of enemy archetypes and level definitions.
//!
//! Both catalogs are parsed once from JSON documents, indexed by name, and
//! never mutated afterwards. Loading is non-fatal: a missing or malformed
//! document is logged and leaves an empty catalog behind.

pub mod error;
pub mod model;
pub mod store;

pub use error::CatalogError;
pub use model::{EnemyArchetype, LevelDefinition, SpawnRule};
pub use store::{Catalog, Named, Table};
