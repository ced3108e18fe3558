//! Projection of depth samples into 3D points.
//!
//! Every valid cell becomes one point. X and Y are the cell's column and row
//! measured from the grid center and multiplied by the scale factor; Z is the
//! depth normalized into `[0, z_range]` (default `[0, 100]`), with the
//! shallowest valid sample at `0` and the deepest at `z_range`.
//!
//! Cells holding the no-data sentinel are skipped and reserve no index, so the
//! point sequence is dense. The returned [`GridIndex`] records which point
//! each cell produced.
//!
//! # Example
//!
//! ```
//! use depthmesh::algo::project::{project, ProjectOptions};
//! use depthmesh::grid::DepthGrid;
//!
//! let grid = DepthGrid::from_rows(&[[1.0, 2.0], [3.0, 4.0]]).unwrap();
//! let projection = project(&grid, &ProjectOptions::default()).unwrap();
//!
//! assert_eq!(projection.points.len(), 4);
//! assert_eq!(projection.points[0].x, -1.0);
//! assert_eq!(projection.points[3].z, 100.0);
//! ```

use log::{debug, info, warn};
use nalgebra::Point3;

use crate::error::{MeshError, Result};
use crate::grid::{is_valid_depth, DepthGrid};
use crate::mesh::GridIndex;

use super::Progress;

/// Default upper bound of the normalized depth range.
pub const DEFAULT_Z_RANGE: f64 = 100.0;

/// Options for projecting a depth grid.
#[derive(Debug, Clone, PartialEq)]
pub struct ProjectOptions {
    /// Linear scale applied to the centered X/Y coordinates.
    pub scale: f64,

    /// Normalized depth is mapped into `[0, z_range]`.
    pub z_range: f64,
}

impl Default for ProjectOptions {
    fn default() -> Self {
        Self {
            scale: 1.0,
            z_range: DEFAULT_Z_RANGE,
        }
    }
}

impl ProjectOptions {
    /// Create options with the default scale of `1.0`.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the X/Y scale factor.
    pub fn with_scale(mut self, scale: f64) -> Self {
        self.scale = scale;
        self
    }

    /// Set the upper bound of the normalized depth range.
    pub fn with_z_range(mut self, z_range: f64) -> Self {
        self.z_range = z_range;
        self
    }

    /// Check that the scale is finite and the z range finite and positive.
    ///
    /// A zero scale collapses X/Y onto the origin; a negative one mirrors them.
    pub fn validate(&self) -> Result<()> {
        if !self.scale.is_finite() {
            return Err(MeshError::invalid_param(
                "scale",
                self.scale,
                "must be finite",
            ));
        }
        if !self.z_range.is_finite() || self.z_range <= 0.0 {
            return Err(MeshError::invalid_param(
                "z_range",
                self.z_range,
                "must be finite and positive",
            ));
        }
        Ok(())
    }
}

/// Points projected from a depth grid, with the cell-to-point mapping.
#[derive(Debug, Clone)]
pub struct Projection {
    /// One point per valid cell, in row-major scan order.
    pub points: Vec<Point3<f64>>,

    /// Which point each valid cell produced.
    pub index: GridIndex,
}

/// Project every valid cell of `grid` into a 3D point.
pub fn project(grid: &DepthGrid, options: &ProjectOptions) -> Result<Projection> {
    project_with_progress(grid, options, &Progress::none())
}

/// Projection with progress reporting, one update per row.
pub fn project_with_progress(
    grid: &DepthGrid,
    options: &ProjectOptions,
    progress: &Progress,
) -> Result<Projection> {
    options.validate()?;

    let height = grid.height();
    let width = grid.width();
    let stats = grid.stats();

    let mut index = GridIndex::with_shape(height, width);
    if !stats.has_valid_samples() {
        warn!("Depth map has no valid samples; no points projected");
        progress.report(height, height, "Projecting");
        return Ok(Projection {
            points: Vec::new(),
            index,
        });
    }

    let min_depth = stats.min_depth;
    let mut range = stats.max_depth - stats.min_depth;
    if range == 0.0 {
        debug!("All valid samples share depth {}; using unit range", min_depth);
        range = 1.0;
    }

    let center_x = width as f64 / 2.0;
    let center_y = height as f64 / 2.0;

    let mut points = Vec::with_capacity(stats.valid_count);
    for (row, depths) in grid.rows().enumerate() {
        progress.report(row, height, "Projecting");
        for (col, &depth) in depths.iter().enumerate() {
            if !is_valid_depth(depth) {
                continue;
            }
            index.push(col, row);
            points.push(Point3::new(
                (col as f64 - center_x) * options.scale,
                (row as f64 - center_y) * options.scale,
                (depth - min_depth) / range * options.z_range,
            ));
        }
    }
    progress.report(height, height, "Projecting");

    info!("Projected {} points from {}x{} grid", points.len(), width, height);
    Ok(Projection { points, index })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx_eq(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-10
    }

    #[test]
    fn test_two_by_two_scenario() {
        let grid = DepthGrid::from_rows(&[[1.0, 2.0], [3.0, 4.0]]).unwrap();
        let projection = project(&grid, &ProjectOptions::default()).unwrap();
        let points = &projection.points;

        assert_eq!(points.len(), 4);
        // Center is (1, 1), so columns/rows 0 and 1 land on -1 and 0.
        assert!(approx_eq(points[0].x, -1.0) && approx_eq(points[0].y, -1.0));
        assert!(approx_eq(points[3].x, 0.0) && approx_eq(points[3].y, 0.0));

        let z: Vec<f64> = points.iter().map(|p| p.z).collect();
        assert!(approx_eq(z[0], 0.0));
        assert!(approx_eq(z[1], 100.0 / 3.0));
        assert!(approx_eq(z[2], 200.0 / 3.0));
        assert!(approx_eq(z[3], 100.0));
    }

    #[test]
    fn test_center_uses_real_division() {
        let grid = DepthGrid::from_rows(&[[5.0, 5.0, 5.0]]).unwrap();
        let projection = project(&grid, &ProjectOptions::default()).unwrap();
        let xs: Vec<f64> = projection.points.iter().map(|p| p.x).collect();
        assert_eq!(xs, vec![-1.5, -0.5, 0.5]);
        assert!(projection.points.iter().all(|p| approx_eq(p.y, -0.5)));
    }

    #[test]
    fn test_zero_cells_dropped() {
        let grid = DepthGrid::from_rows(&[[1.0, 0.0], [3.0, 4.0]]).unwrap();
        let projection = project(&grid, &ProjectOptions::default()).unwrap();

        assert_eq!(projection.points.len(), 3);
        assert_eq!(projection.index.len(), 3);
        assert_eq!(projection.index.get(1, 0), None);
        assert_eq!(projection.index.get(0, 1), Some(1));
        // Second point comes from cell (0, 1).
        assert!(approx_eq(projection.points[1].x, -1.0));
        assert!(approx_eq(projection.points[1].y, 0.0));
    }

    #[test]
    fn test_constant_depth_maps_to_zero() {
        let grid = DepthGrid::from_rows(&[[7.5, 7.5], [0.0, 7.5]]).unwrap();
        let projection = project(&grid, &ProjectOptions::default()).unwrap();
        assert_eq!(projection.points.len(), 3);
        assert!(projection.points.iter().all(|p| p.z == 0.0));
    }

    #[test]
    fn test_all_zero_grid_yields_no_points() {
        let grid = DepthGrid::from_rows(&[[0.0, 0.0], [0.0, 0.0]]).unwrap();
        let projection = project(&grid, &ProjectOptions::default()).unwrap();
        assert!(projection.points.is_empty());
        assert!(projection.index.is_empty());
    }

    #[test]
    fn test_scale_applies_to_xy_only() {
        let grid = DepthGrid::from_rows(&[[1.0, 2.0], [3.0, 4.0]]).unwrap();
        let options = ProjectOptions::new().with_scale(2.5);
        let projection = project(&grid, &options).unwrap();
        assert!(approx_eq(projection.points[0].x, -2.5));
        assert!(approx_eq(projection.points[0].y, -2.5));
        assert!(approx_eq(projection.points[3].z, 100.0));
    }

    #[test]
    fn test_custom_z_range() {
        let grid = DepthGrid::from_rows(&[[2.0, 4.0]]).unwrap();
        let options = ProjectOptions::new().with_z_range(1.0);
        let projection = project(&grid, &options).unwrap();
        assert!(approx_eq(projection.points[1].z, 1.0));
    }

    #[test]
    fn test_z_within_bounds() {
        let rows: Vec<Vec<f64>> = (0..6)
            .map(|r| (0..5).map(|c| ((r * 5 + c) % 7) as f64 * 1.3).collect())
            .collect();
        let grid = DepthGrid::from_rows(&rows).unwrap();
        let projection = project(&grid, &ProjectOptions::default()).unwrap();

        assert_eq!(projection.points.len(), grid.stats().valid_count);
        assert!(projection.points.iter().all(|p| (0.0..=100.0).contains(&p.z)));
        assert!(projection.points.iter().any(|p| p.z == 0.0));
        assert!(projection.points.iter().any(|p| approx_eq(p.z, 100.0)));
    }

    #[test]
    fn test_index_matches_rescan() {
        let grid = DepthGrid::from_rows(&[[0.0, 1.0, 2.0], [3.0, 0.0, 4.0], [5.0, 6.0, 0.0]])
            .unwrap();
        let projection = project(&grid, &ProjectOptions::default()).unwrap();
        assert_eq!(projection.index, GridIndex::from_grid(&grid));
    }

    #[test]
    fn test_negative_scale_mirrors() {
        let grid = DepthGrid::from_rows(&[[1.0, 2.0], [3.0, 4.0]]).unwrap();
        let forward = project(&grid, &ProjectOptions::default()).unwrap();
        let mirrored = project(&grid, &ProjectOptions::new().with_scale(-1.0)).unwrap();

        assert_eq!(mirrored.points.len(), 4);
        for (m, f) in mirrored.points.iter().zip(&forward.points) {
            assert!(approx_eq(m.x, -f.x));
            assert!(approx_eq(m.y, -f.y));
            assert!(approx_eq(m.z, f.z));
        }
        assert!(approx_eq(mirrored.points[0].x, 1.0));
        assert!(approx_eq(mirrored.points[0].y, 1.0));
    }

    #[test]
    fn test_zero_scale_collapses_xy() {
        let grid = DepthGrid::from_rows(&[[1.0, 2.0], [3.0, 4.0]]).unwrap();
        let projection = project(&grid, &ProjectOptions::new().with_scale(0.0)).unwrap();

        assert_eq!(projection.points.len(), 4);
        assert!(projection.points.iter().all(|p| p.x == 0.0 && p.y == 0.0));
        assert!(approx_eq(projection.points[3].z, 100.0));
    }

    #[test]
    fn test_non_finite_scale_rejected() {
        let grid = DepthGrid::from_rows(&[[1.0]]).unwrap();
        for scale in [f64::NAN, f64::INFINITY, f64::NEG_INFINITY] {
            let result = project(&grid, &ProjectOptions::new().with_scale(scale));
            assert!(matches!(result, Err(MeshError::InvalidParameter { name: "scale", .. })));
        }
    }
}
