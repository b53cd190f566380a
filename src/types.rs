use serde::{Deserialize, Serialize};
use std::fmt;

/// Index of a slot in the inventory grid, valid in `[0, capacity)`.
pub type SlotIndex = usize;

/// Opaque identifier for an item type (the stable key into the [`Catalog`]).
///
/// Distinct from any single held unit: two swords of the same kind share one
/// `ItemTypeId`.
///
/// [`Catalog`]: crate::catalog::Catalog
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ItemTypeId(pub u32);

impl fmt::Display for ItemTypeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Reference to an item's icon asset.
///
/// The crate never loads the asset itself; the presentation layer resolves
/// the path against its own asset pipeline.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct IconRef(pub String);

impl IconRef {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Static definition of an item type, one row of the item table.
///
/// Immutable after catalog load.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemDefinition {
    /// Item type id, unique within the table
    pub id: ItemTypeId,
    /// Display name
    pub name: String,
    /// Icon asset reference
    pub icon: IconRef,
}

/// On-disk layout of the item table: a flat list of `[[items]]` rows.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ItemTable {
    pub items: Vec<ItemDefinition>,
}

/// One held item type: its quantity and the slot it occupies.
///
/// At most one entry exists per item type; repeat adds of a held type
/// increment `quantity` in place instead of taking another slot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InventoryEntry {
    pub item_type: ItemTypeId,
    /// Number of units held, always >= 1
    pub quantity: u32,
    pub slot: SlotIndex,
}

/// Slot selection strategy for [`InventoryManager::add`].
///
/// [`InventoryManager::add`]: crate::inventory::InventoryManager::add
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Placement {
    /// Scan from slot 0 upward and take the lowest free index
    Auto,
    /// Place at exactly this slot; rejected if occupied or out of range
    At(SlotIndex),
}
