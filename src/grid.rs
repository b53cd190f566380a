//! Grid geometry helper for the presentation layer.
//!
//! The manager only hands out linear slot indices; the consumer decides how
//! they land on screen. This maps between slot indices and (row, col)
//! positions for a fixed column count.

use crate::types::SlotIndex;

/// Row-major grid geometry. The reference layout is 3 columns by 2 rows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GridLayout {
    columns: usize,
    rows: usize,
}

impl GridLayout {
    /// Create a layout. Returns None for a degenerate zero-sized grid.
    pub fn new(columns: usize, rows: usize) -> Option<Self> {
        if columns == 0 || rows == 0 {
            return None;
        }
        Some(Self { columns, rows })
    }

    pub fn columns(&self) -> usize {
        self.columns
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Total number of slots the grid can display
    pub fn slot_count(&self) -> usize {
        self.columns * self.rows
    }

    /// Map a slot index to its (row, col) position, None if off-grid
    pub fn position(&self, slot: SlotIndex) -> Option<(usize, usize)> {
        if slot >= self.slot_count() {
            return None;
        }
        Some((slot / self.columns, slot % self.columns))
    }

    /// Map a (row, col) position back to its slot index, None if off-grid
    pub fn slot_at(&self, row: usize, col: usize) -> Option<SlotIndex> {
        if row >= self.rows || col >= self.columns {
            return None;
        }
        Some(row * self.columns + col)
    }
}

impl Default for GridLayout {
    fn default() -> Self {
        Self {
            columns: 3,
            rows: 2,
        }
    }
}
