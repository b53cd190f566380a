//! Satchel — fixed-capacity slot inventory for a single player session.
//!
//! Two components, loaded in dependency order: the [`Catalog`] maps item
//! type ids to their static definitions (built once from a TOML item table),
//! and the [`InventoryManager`] owns the live slot/item state on top of it,
//! exposing add/remove/exchange operations and notifying subscribed
//! observers synchronously after every successful mutation.
//!
//! ```no_run
//! use satchel::{CatalogLoader, InventoryManager, ItemTypeId, Placement};
//! use std::sync::Arc;
//!
//! # fn main() -> anyhow::Result<()> {
//! let catalog = Arc::new(CatalogLoader::new("items.toml").load()?);
//! let mut inventory = InventoryManager::new(catalog, 6);
//!
//! inventory.subscribe(|state| println!("{} slots occupied", state.len()));
//! inventory.add(ItemTypeId(100), Placement::Auto)?;
//! # Ok(())
//! # }
//! ```

pub mod catalog;
pub mod config;
pub mod error;
pub mod grid;
pub mod inventory;
pub mod logging;
pub mod types;

pub use catalog::{Catalog, CatalogLoader};
pub use config::{ConfigLoader, InventoryConfig};
pub use error::{CatalogError, InventoryError};
pub use grid::GridLayout;
pub use inventory::{InventoryManager, InventoryState, ObserverId, DEFAULT_CAPACITY};
pub use types::{IconRef, InventoryEntry, ItemDefinition, ItemTypeId, Placement, SlotIndex};
