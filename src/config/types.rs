use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Inventory session configuration.
///
/// Every field has a default matching the reference setup (6 slots laid out
/// as a 3-column grid), so a missing or partial config file still yields a
/// working session.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InventoryConfig {
    /// Number of slots in the inventory
    #[serde(default = "default_capacity")]
    pub capacity: usize,

    /// Grid columns used by the presentation layer to map slot -> (row, col)
    #[serde(default = "default_columns")]
    pub columns: usize,

    /// Path to the item table the catalog is loaded from
    #[serde(default = "default_item_table")]
    pub item_table: PathBuf,
}

fn default_capacity() -> usize {
    6
}

fn default_columns() -> usize {
    3
}

fn default_item_table() -> PathBuf {
    PathBuf::from("items.toml")
}

impl Default for InventoryConfig {
    fn default() -> Self {
        Self {
            capacity: default_capacity(),
            columns: default_columns(),
            item_table: default_item_table(),
        }
    }
}

impl InventoryConfig {
    /// Grid rows implied by capacity and columns, rounded up for a ragged
    /// last row
    pub fn rows(&self) -> usize {
        if self.columns == 0 {
            return 0;
        }
        self.capacity.div_ceil(self.columns)
    }
}
