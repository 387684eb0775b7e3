//! The finished mosaic grid.

use crate::types::EmojiRecord;

/// Rows of chosen emojis, `columns` wide.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputGrid {
    columns: usize,
    cells: Vec<EmojiRecord>,
}

impl OutputGrid {
    /// Shape a flat row-major list of candidate indices into a grid.
    ///
    /// # Panics
    ///
    /// Panics if an index is out of range for `emojis`, or if the number of
    /// assignments is not a multiple of `columns`.
    pub fn from_assignments(emojis: &[EmojiRecord], assignments: &[usize], columns: usize) -> Self {
        assert!(columns > 0, "grid must have at least one column");
        assert_eq!(assignments.len() % columns, 0, "assignments do not fill whole rows");

        let cells = assignments.iter().map(|&i| emojis[i].clone()).collect();
        Self { columns, cells }
    }

    pub fn rows(&self) -> usize {
        self.cells.len() / self.columns
    }

    pub fn columns(&self) -> usize {
        self.columns
    }

    /// The emoji at a cell, if it is inside the grid.
    pub fn get(&self, row: usize, column: usize) -> Option<&EmojiRecord> {
        if column >= self.columns {
            return None;
        }
        self.cells.get(row * self.columns + column)
    }

    /// Iterate rows from top to bottom.
    pub fn iter_rows(&self) -> impl Iterator<Item = &[EmojiRecord]> {
        self.cells.chunks(self.columns)
    }

    /// Every cell in row-major order.
    pub fn cells(&self) -> &[EmojiRecord] {
        &self.cells
    }
}
