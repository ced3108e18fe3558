//! Depth grid data model.
//!
//! A [`DepthGrid`] is a dense `height × width` array of depth samples stored
//! in row-major order. The literal value `0.0` marks a cell with no data;
//! every other value is treated as a valid reading.

use crate::error::{MeshError, Result};

/// Depth value marking a cell without data.
pub const NO_DATA: f64 = 0.0;

/// Returns `true` if `depth` is a valid reading (not the [`NO_DATA`] sentinel).
#[inline]
pub fn is_valid_depth(depth: f64) -> bool {
    depth != NO_DATA
}

/// A rectangular grid of depth samples.
///
/// The grid is immutable after construction and always has positive
/// dimensions.
#[derive(Debug, Clone, PartialEq)]
pub struct DepthGrid {
    height: usize,
    width: usize,
    depths: Vec<f64>,
}

impl DepthGrid {
    /// Create a grid from row-major samples.
    ///
    /// Fails with [`MeshError::InvalidDimensions`] if either dimension is zero,
    /// and with [`MeshError::InvalidParameter`] if `depths` does not hold
    /// exactly `height * width` samples.
    pub fn new(height: usize, width: usize, depths: Vec<f64>) -> Result<Self> {
        if height == 0 || width == 0 {
            return Err(MeshError::InvalidDimensions {
                height: height as i64,
                width: width as i64,
            });
        }
        let expected = height
            .checked_mul(width)
            .ok_or_else(|| MeshError::invalid_param("height * width", height, "grid too large"))?;
        if depths.len() != expected {
            return Err(MeshError::invalid_param(
                "depths",
                depths.len(),
                "sample count must equal height * width",
            ));
        }
        Ok(Self {
            height,
            width,
            depths,
        })
    }

    /// Create a grid from a slice of rows.
    ///
    /// # Example
    ///
    /// ```
    /// use depthmesh::grid::DepthGrid;
    ///
    /// let grid = DepthGrid::from_rows(&[[1.0, 2.0], [3.0, 4.0]]).unwrap();
    /// assert_eq!(grid.height(), 2);
    /// assert_eq!(grid.get(1, 0), 2.0);
    /// ```
    pub fn from_rows<R: AsRef<[f64]>>(rows: &[R]) -> Result<Self> {
        let height = rows.len();
        let width = rows.first().map_or(0, |r| r.as_ref().len());
        let mut depths = Vec::with_capacity(height * width);
        for row in rows {
            let row = row.as_ref();
            if row.len() != width {
                return Err(MeshError::invalid_param(
                    "rows",
                    row.len(),
                    "all rows must have the same width",
                ));
            }
            depths.extend_from_slice(row);
        }
        Self::new(height, width, depths)
    }

    /// Number of rows.
    #[inline]
    pub fn height(&self) -> usize {
        self.height
    }

    /// Number of columns.
    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    /// Total number of cells.
    #[inline]
    pub fn len(&self) -> usize {
        self.depths.len()
    }

    /// Always `false`; grids have positive dimensions.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.depths.is_empty()
    }

    /// Depth at `(col, row)`.
    ///
    /// # Panics
    /// Panics if the position is outside the grid.
    #[inline]
    pub fn get(&self, col: usize, row: usize) -> f64 {
        assert!(col < self.width && row < self.height, "cell ({col}, {row}) out of bounds");
        self.depths[row * self.width + col]
    }

    /// Whether the cell at `(col, row)` holds a valid reading.
    #[inline]
    pub fn is_valid(&self, col: usize, row: usize) -> bool {
        is_valid_depth(self.get(col, row))
    }

    /// All samples in row-major order.
    #[inline]
    pub fn depths(&self) -> &[f64] {
        &self.depths
    }

    /// Iterate over rows.
    pub fn rows(&self) -> impl ExactSizeIterator<Item = &[f64]> + '_ {
        self.depths.chunks_exact(self.width)
    }

    /// Count valid cells and find their depth range.
    pub fn stats(&self) -> DepthStats {
        let mut stats = DepthStats::default();
        for &depth in self.depths.iter().filter(|&&d| is_valid_depth(d)) {
            stats.valid_count += 1;
            if depth < stats.min_depth {
                stats.min_depth = depth;
            }
            if depth > stats.max_depth {
                stats.max_depth = depth;
            }
        }
        stats
    }
}

/// Summary of the valid samples in a [`DepthGrid`].
///
/// When the grid has no valid samples, `min_depth` stays at `f64::MAX` and
/// `max_depth` at `f64::MIN`; check [`DepthStats::has_valid_samples`] before
/// using the range.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DepthStats {
    /// Number of cells holding a valid reading.
    pub valid_count: usize,
    /// Smallest valid depth.
    pub min_depth: f64,
    /// Largest valid depth.
    pub max_depth: f64,
}

impl Default for DepthStats {
    fn default() -> Self {
        Self {
            valid_count: 0,
            min_depth: f64::MAX,
            max_depth: f64::MIN,
        }
    }
}

impl DepthStats {
    /// Whether at least one valid sample was found.
    pub fn has_valid_samples(&self) -> bool {
        self.valid_count > 0
    }

    /// `max_depth - min_depth`, or `None` without valid samples.
    pub fn range(&self) -> Option<f64> {
        self.has_valid_samples()
            .then(|| self.max_depth - self.min_depth)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_rows_row_major() {
        let grid = DepthGrid::from_rows(&[[1.0, 2.0, 3.0], [4.0, 5.0, 6.0]]).unwrap();
        assert_eq!(grid.height(), 2);
        assert_eq!(grid.width(), 3);
        assert_eq!(grid.depths(), &[1.0, 2.0, 3.0, 4.0, 5.0, 6.0]);
        assert_eq!(grid.get(2, 1), 6.0);
        assert_eq!(grid.rows().count(), 2);
    }

    #[test]
    fn test_zero_dimensions_rejected() {
        let result = DepthGrid::new(0, 3, Vec::new());
        assert!(matches!(result, Err(MeshError::InvalidDimensions { .. })));

        let empty: [[f64; 0]; 0] = [];
        assert!(DepthGrid::from_rows(&empty).is_err());
    }

    #[test]
    fn test_sample_count_mismatch() {
        let result = DepthGrid::new(2, 2, vec![1.0, 2.0, 3.0]);
        assert!(matches!(result, Err(MeshError::InvalidParameter { .. })));
    }

    #[test]
    fn test_ragged_rows_rejected() {
        let rows = vec![vec![1.0, 2.0], vec![3.0]];
        assert!(DepthGrid::from_rows(&rows).is_err());
    }

    #[test]
    fn test_stats_skip_zero() {
        let grid = DepthGrid::from_rows(&[[0.0, 2.5], [7.0, 0.0]]).unwrap();
        let stats = grid.stats();
        assert_eq!(stats.valid_count, 2);
        assert_eq!(stats.min_depth, 2.5);
        assert_eq!(stats.max_depth, 7.0);
        assert_eq!(stats.range(), Some(4.5));
        assert!(!grid.is_valid(0, 0));
        assert!(grid.is_valid(1, 0));
    }

    #[test]
    fn test_stats_all_zero_keeps_sentinels() {
        let grid = DepthGrid::from_rows(&[[0.0, 0.0]]).unwrap();
        let stats = grid.stats();
        assert_eq!(stats.valid_count, 0);
        assert_eq!(stats.min_depth, f64::MAX);
        assert_eq!(stats.max_depth, f64::MIN);
        assert!(!stats.has_valid_samples());
        assert_eq!(stats.range(), None);
    }
}
