use crate::types::{ItemTypeId, SlotIndex};
use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while loading the item catalog.
///
/// All of these are fatal to initialization: a manager must not be built on
/// top of a partially loaded catalog.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// The item table could not be read from disk
    #[error("failed to read item table {path:?}")]
    SourceUnavailable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The item table exists but is not valid TOML (or misses required fields)
    #[error("failed to parse item table {path:?}")]
    Malformed {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    /// Two rows share the same item id
    #[error("duplicate item id {0} in item table")]
    DuplicateId(ItemTypeId),
}

/// Rejection reasons for inventory operations.
///
/// Every rejection is a local no-op: the inventory is left untouched and no
/// change notification fires.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum InventoryError {
    /// The item type is not currently held
    #[error("item type {0} is not in the inventory")]
    ItemNotHeld(ItemTypeId),

    /// The slot holds no item
    #[error("slot {0} is empty")]
    SlotEmpty(SlotIndex),

    /// Adding a new item type would exceed the slot capacity
    #[error("inventory is full ({capacity} slots)")]
    CapacityExceeded { capacity: usize },

    /// The item type has no catalog entry
    #[error("item type {0} has no catalog entry")]
    UnknownItemType(ItemTypeId),

    /// The requested slot already holds a different item type
    #[error("slot {0} is already occupied")]
    SlotOccupied(SlotIndex),

    /// The requested slot is outside `[0, capacity)`
    #[error("slot {slot} is out of range for capacity {capacity}")]
    SlotOutOfRange { slot: SlotIndex, capacity: usize },
}
