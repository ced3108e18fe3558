//! The complete depth map to mesh conversion.
//!
//! Stages run strictly in sequence, each consuming the previous stage's
//! complete output: decode, project, triangulate, export. The first failure
//! aborts the run and is returned unchanged.

use std::path::Path;

use log::info;

use crate::algo::{
    project_with_progress, triangulate_with_progress, Progress, ProjectOptions,
    TriangulateOptions,
};
use crate::error::Result;
use crate::grid::DepthGrid;
use crate::io::{depth, ply};
use crate::mesh::Mesh;

/// Options for a full conversion.
#[derive(Debug, Default)]
pub struct ConvertOptions {
    /// Projection parameters.
    pub project: ProjectOptions,

    /// Triangulation parameters.
    pub triangulate: TriangulateOptions,

    /// Receives per-row progress from projection and triangulation.
    pub progress: Progress,
}

impl ConvertOptions {
    /// Create options with default scale and parallel triangulation.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the X/Y scale factor.
    pub fn with_scale(mut self, scale: f64) -> Self {
        self.project.scale = scale;
        self
    }

    /// Set whether triangulation runs in parallel.
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.triangulate.parallel = parallel;
        self
    }

    /// Set the progress reporter.
    pub fn with_progress(mut self, progress: Progress) -> Self {
        self.progress = progress;
        self
    }
}

/// Summary of a completed conversion.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConvertReport {
    /// Grid height.
    pub height: usize,
    /// Grid width.
    pub width: usize,
    /// Exported vertex count.
    pub vertices: usize,
    /// Exported face count.
    pub faces: usize,
}

/// Convert an in-memory depth grid into a mesh.
///
/// An all-zero grid yields an empty mesh; it is rejected only at export.
///
/// # Example
///
/// ```
/// use depthmesh::grid::DepthGrid;
/// use depthmesh::pipeline::{depth_to_mesh, ConvertOptions};
///
/// let grid = DepthGrid::from_rows(&[[1.0, 2.0], [3.0, 4.0]]).unwrap();
/// let mesh = depth_to_mesh(&grid, &ConvertOptions::default()).unwrap();
/// assert_eq!(mesh.num_vertices(), 4);
/// assert_eq!(mesh.num_faces(), 2);
/// ```
pub fn depth_to_mesh(grid: &DepthGrid, options: &ConvertOptions) -> Result<Mesh> {
    let projection = project_with_progress(grid, &options.project, &options.progress)?;
    let triangles =
        triangulate_with_progress(&projection.index, &options.triangulate, &options.progress);
    Ok(Mesh::new(projection.points, triangles))
}

/// Read a depth map file, convert it, and write the mesh as PLY.
pub fn convert<P: AsRef<Path>, Q: AsRef<Path>>(
    input: P,
    output: Q,
    options: &ConvertOptions,
) -> Result<ConvertReport> {
    let input = input.as_ref();
    let output = output.as_ref();

    info!("Reading depth map {}", input.display());
    let grid = depth::load(input)?;
    let mesh = depth_to_mesh(&grid, options)?;
    ply::save(&mesh, output)?;

    Ok(ConvertReport {
        height: grid.height(),
        width: grid.width(),
        vertices: mesh.num_vertices(),
        faces: mesh.num_faces(),
    })
}
