//! # depthmesh
//!
//! Converts depth maps into triangle meshes and exports them as PLY.
//!
//! A depth map is a rectangular grid of depth samples where `0.0` means "no
//! data". The conversion runs four stages in order:
//!
//! 1. **Decode** the binary depth map into a [`DepthGrid`](grid::DepthGrid)
//!    ([`io::depth`])
//! 2. **Project** every valid sample to a 3D point, centering X/Y and
//!    normalizing depth into `[0, 100]` ([`algo::project`])
//! 3. **Triangulate** each fully valid 2×2 block into two triangles
//!    ([`algo::triangulate`])
//! 4. **Export** the points and triangles as ASCII PLY ([`io::ply`])
//!
//! ## Quick Start
//!
//! ```no_run
//! use depthmesh::pipeline::{convert, ConvertOptions};
//!
//! let report = convert("DepthMap_8.dat", "output.ply", &ConvertOptions::default()).unwrap();
//! println!("{} vertices, {} faces", report.vertices, report.faces);
//! ```
//!
//! ## Working in Memory
//!
//! ```
//! use depthmesh::prelude::*;
//!
//! let grid = DepthGrid::from_rows(&[[1.0, 2.0], [3.0, 4.0]]).unwrap();
//! let mesh = depth_to_mesh(&grid, &ConvertOptions::default()).unwrap();
//!
//! assert_eq!(mesh.num_vertices(), 4);
//! assert_eq!(mesh.triangles, vec![Triangle::new(0, 1, 2), Triangle::new(1, 3, 2)]);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod algo;
pub mod error;
pub mod grid;
pub mod io;
pub mod mesh;
pub mod pipeline;

/// Prelude module for convenient imports.
///
/// ```
/// use depthmesh::prelude::*;
/// ```
pub mod prelude {
    pub use crate::algo::{Progress, ProjectOptions, Projection, TriangulateOptions};
    pub use crate::error::{MeshError, Result};
    pub use crate::grid::{DepthGrid, DepthStats};
    pub use crate::mesh::{GridIndex, Mesh, Triangle};
    pub use crate::pipeline::{convert, depth_to_mesh, ConvertOptions, ConvertReport};
}

// Re-export nalgebra types for convenience
pub use nalgebra;
