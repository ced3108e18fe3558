//! Depth-map to mesh conversion stages.
//!
//! - **Projection**: valid depth samples become centered, normalized 3D points
//! - **Triangulation**: fully valid 2×2 blocks become two triangles each
//!
//! Both stages are pure functions of their inputs. Projection hands its
//! cell-to-point mapping forward so triangulation never re-derives it.

pub mod progress;
pub mod project;
pub mod triangulate;

pub use progress::Progress;
pub use project::{project, project_with_progress, ProjectOptions, Projection};
pub use triangulate::{triangulate, triangulate_grid, triangulate_with_progress, TriangulateOptions};
