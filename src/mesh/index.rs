//! Grid-position to point-index mapping.
//!
//! Only valid cells produce points, so point indices are dense over the
//! valid cells in row-major scan order. [`GridIndex`] records which point
//! each cell produced, and is handed from projection to triangulation so the
//! two stages always agree on the numbering.

use std::fmt::{self, Debug};

use crate::grid::{is_valid_depth, DepthGrid};

/// Sentinel stored for cells without a point.
const INVALID: usize = usize::MAX;

/// Maps `(col, row)` grid positions to indices in the point sequence.
#[derive(Clone, PartialEq, Eq)]
pub struct GridIndex {
    width: usize,
    height: usize,
    slots: Vec<usize>,
    count: usize,
}

impl GridIndex {
    /// Create an empty index for a grid of the given shape.
    pub(crate) fn with_shape(height: usize, width: usize) -> Self {
        Self {
            width,
            height,
            slots: vec![INVALID; height * width],
            count: 0,
        }
    }

    /// Assign the next point index to `(col, row)`.
    ///
    /// Cells must be pushed in row-major order.
    #[inline]
    pub(crate) fn push(&mut self, col: usize, row: usize) -> usize {
        let slot = row * self.width + col;
        debug_assert_eq!(self.slots[slot], INVALID, "cell ({col}, {row}) pushed twice");
        let index = self.count;
        self.slots[slot] = index;
        self.count += 1;
        index
    }

    /// Build the index by scanning `grid` in row-major order.
    ///
    /// This yields exactly the numbering produced by
    /// [`project`](crate::algo::project::project).
    pub fn from_grid(grid: &DepthGrid) -> Self {
        let mut index = Self::with_shape(grid.height(), grid.width());
        for (row, depths) in grid.rows().enumerate() {
            for (col, &depth) in depths.iter().enumerate() {
                if is_valid_depth(depth) {
                    index.push(col, row);
                }
            }
        }
        index
    }

    /// Grid width this index was built for.
    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    /// Grid height this index was built for.
    #[inline]
    pub fn height(&self) -> usize {
        self.height
    }

    /// Number of indexed (valid) cells, equal to the point count.
    #[inline]
    pub fn len(&self) -> usize {
        self.count
    }

    /// Whether no cell is indexed.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    /// Point index of `(col, row)`, or `None` for an invalid or out-of-range cell.
    #[inline]
    pub fn get(&self, col: usize, row: usize) -> Option<usize> {
        if col >= self.width || row >= self.height {
            return None;
        }
        match self.slots[row * self.width + col] {
            INVALID => None,
            index => Some(index),
        }
    }

    /// Corner indices `[v00, v10, v01, v11]` of the 2×2 block whose top-left
    /// corner is `(col, row)`, or `None` if any corner has no point.
    #[inline]
    pub fn quad(&self, col: usize, row: usize) -> Option<[usize; 4]> {
        Some([
            self.get(col, row)?,
            self.get(col + 1, row)?,
            self.get(col, row + 1)?,
            self.get(col + 1, row + 1)?,
        ])
    }
}

impl Debug for GridIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GridIndex")
            .field("width", &self.width)
            .field("height", &self.height)
            .field("count", &self.count)
            .finish_non_exhaustive()
    }
}
