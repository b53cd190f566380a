//! Item catalog
//!
//! Read-only mapping from item type id to its static definition. Built once
//! at startup from the item table and shared with the inventory manager for
//! the rest of the session.

/// Item table file loader
pub mod loader;

pub use loader::CatalogLoader;

use crate::error::CatalogError;
use crate::types::{ItemDefinition, ItemTypeId};
use std::collections::HashMap;

/// Immutable lookup from item type to its static display definition.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    items: HashMap<ItemTypeId, ItemDefinition>,
}

impl Catalog {
    /// Build a catalog from item table rows.
    ///
    /// Duplicate ids are a hard error rather than last-row-wins: a corrupt
    /// table must surface at startup, not as a wrong icon in-game.
    pub fn from_rows(rows: Vec<ItemDefinition>) -> Result<Self, CatalogError> {
        let mut items = HashMap::with_capacity(rows.len());
        for row in rows {
            let id = row.id;
            if items.insert(id, row).is_some() {
                return Err(CatalogError::DuplicateId(id));
            }
        }
        Ok(Self { items })
    }

    /// Look up the definition for an item type
    pub fn get(&self, id: ItemTypeId) -> Option<&ItemDefinition> {
        self.items.get(&id)
    }

    /// Whether the catalog has a definition for this item type
    pub fn contains(&self, id: ItemTypeId) -> bool {
        self.items.contains_key(&id)
    }

    /// Number of item definitions
    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Iterate over all definitions in no particular order
    pub fn iter(&self) -> impl Iterator<Item = &ItemDefinition> {
        self.items.values()
    }
}
