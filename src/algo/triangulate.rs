//! Triangulation of projected depth samples.
//!
//! The grid is walked in 2×2 blocks. A block whose four corners all produced
//! points is split into two triangles along the diagonal joining its
//! top-right and bottom-left corners:
//!
//! ```text
//! v00 ---- v10
//!  |     /  |
//!  |   /    |
//! v01 ---- v11
//! ```
//!
//! emitting `(v00, v10, v01)` and `(v10, v11, v01)`. A block with any missing
//! corner is skipped entirely; holes are never bridged.
//!
//! # Example
//!
//! ```
//! use depthmesh::algo::project::{project, ProjectOptions};
//! use depthmesh::algo::triangulate::{triangulate, TriangulateOptions};
//! use depthmesh::grid::DepthGrid;
//!
//! let grid = DepthGrid::from_rows(&[[1.0, 2.0], [3.0, 4.0]]).unwrap();
//! let projection = project(&grid, &ProjectOptions::default()).unwrap();
//! let triangles = triangulate(&projection.index, &TriangulateOptions::default());
//!
//! assert_eq!(triangles.len(), 2);
//! ```

use std::sync::atomic::{AtomicUsize, Ordering};

use log::{debug, info};
use nalgebra::Point3;
use rayon::prelude::*;

use crate::error::{MeshError, Result};
use crate::grid::DepthGrid;
use crate::mesh::{GridIndex, Triangle};

use super::Progress;

/// Options for triangulation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TriangulateOptions {
    /// Whether to use parallel execution (default: true).
    ///
    /// Rows are processed independently and concatenated in row order, so the
    /// output is identical either way.
    pub parallel: bool,
}

impl Default for TriangulateOptions {
    fn default() -> Self {
        Self { parallel: true }
    }
}

impl TriangulateOptions {
    /// Set whether to use parallel execution.
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Create options for single-threaded execution.
    pub fn sequential(mut self) -> Self {
        self.parallel = false;
        self
    }
}

/// Build triangles over every fully valid 2×2 block.
pub fn triangulate(index: &GridIndex, options: &TriangulateOptions) -> Vec<Triangle> {
    triangulate_with_progress(index, options, &Progress::none())
}

/// Triangulation with progress reporting, one update per block row.
pub fn triangulate_with_progress(
    index: &GridIndex,
    options: &TriangulateOptions,
    progress: &Progress,
) -> Vec<Triangle> {
    let block_rows = index.height().saturating_sub(1);
    let block_cols = index.width().saturating_sub(1);
    let done = AtomicUsize::new(0);

    let triangulate_row = |row: usize| {
        let tris = row_triangles(index, row);
        let finished = done.fetch_add(1, Ordering::Relaxed) + 1;
        progress.report(finished, block_rows, "Triangulating");
        tris
    };

    let rows: Vec<Vec<Triangle>> = if options.parallel {
        (0..block_rows).into_par_iter().map(triangulate_row).collect()
    } else {
        (0..block_rows).map(triangulate_row).collect()
    };

    let triangles: Vec<Triangle> = rows.into_iter().flatten().collect();

    let blocks = block_rows * block_cols;
    debug!(
        "Skipped {} of {} blocks with missing corners",
        blocks - triangles.len() / 2,
        blocks
    );
    info!("Generated {} triangles", triangles.len());
    triangles
}

/// Triangulate starting from the grid and its projected points.
///
/// The cell-to-point mapping is rebuilt from `grid`; it must account for
/// exactly `points.len()` points, otherwise the points were not projected
/// from this grid and [`MeshError::InvalidParameter`] is returned.
pub fn triangulate_grid(
    grid: &DepthGrid,
    points: &[Point3<f64>],
    options: &TriangulateOptions,
) -> Result<Vec<Triangle>> {
    let index = GridIndex::from_grid(grid);
    if index.len() != points.len() {
        return Err(MeshError::invalid_param(
            "points",
            points.len(),
            "point count must equal the number of valid grid cells",
        ));
    }
    Ok(triangulate(&index, options))
}

/// Triangles of the blocks whose top-left corner lies on `row`.
fn row_triangles(index: &GridIndex, row: usize) -> Vec<Triangle> {
    let mut tris = Vec::new();
    for col in 0..index.width().saturating_sub(1) {
        if let Some([v00, v10, v01, v11]) = index.quad(col, row) {
            tris.push(Triangle::new(v00, v10, v01));
            tris.push(Triangle::new(v10, v11, v01));
        }
    }
    tris
}
