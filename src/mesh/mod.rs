//! Triangle mesh produced from a depth map.
//!
//! A [`Mesh`] pairs an ordered point sequence with an ordered triangle
//! sequence. Triangles refer to points by their position in the sequence.
//!
//! ```
//! use depthmesh::mesh::{Mesh, Triangle};
//! use nalgebra::Point3;
//!
//! let points = vec![
//!     Point3::new(0.0, 0.0, 0.0),
//!     Point3::new(1.0, 0.0, 0.0),
//!     Point3::new(0.0, 1.0, 0.0),
//! ];
//! let mesh = Mesh::new(points, vec![Triangle::new(0, 1, 2)]);
//! assert!(mesh.validate().is_ok());
//! ```

mod index;

pub use index::GridIndex;

use nalgebra::{Point3, Vector3};

use crate::error::{MeshError, Result};

/// A triangle given by three point indices.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Triangle {
    /// First corner.
    pub v1: usize,
    /// Second corner.
    pub v2: usize,
    /// Third corner.
    pub v3: usize,
}

impl Triangle {
    /// Create a triangle from three point indices.
    #[inline]
    pub fn new(v1: usize, v2: usize, v3: usize) -> Self {
        Self { v1, v2, v3 }
    }

    /// Corner indices as an array.
    #[inline]
    pub fn indices(&self) -> [usize; 3] {
        [self.v1, self.v2, self.v3]
    }
}

impl From<[usize; 3]> for Triangle {
    fn from([v1, v2, v3]: [usize; 3]) -> Self {
        Self::new(v1, v2, v3)
    }
}

/// Points and triangles of a depth-map surface.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Mesh {
    /// Point positions, one per valid grid cell.
    pub points: Vec<Point3<f64>>,
    /// Triangles indexing into `points`.
    pub triangles: Vec<Triangle>,
}

impl Mesh {
    /// Create a mesh from points and triangles.
    pub fn new(points: Vec<Point3<f64>>, triangles: Vec<Triangle>) -> Self {
        Self { points, triangles }
    }

    /// Number of points.
    #[inline]
    pub fn num_vertices(&self) -> usize {
        self.points.len()
    }

    /// Number of triangles.
    #[inline]
    pub fn num_faces(&self) -> usize {
        self.triangles.len()
    }

    /// Check that the mesh can be exported.
    ///
    /// Fails with [`MeshError::EmptyVertices`], [`MeshError::EmptyFaces`], or
    /// [`MeshError::InvalidTriangle`] for an index past the point sequence.
    pub fn validate(&self) -> Result<()> {
        if self.points.is_empty() {
            return Err(MeshError::EmptyVertices);
        }
        if self.triangles.is_empty() {
            return Err(MeshError::EmptyFaces);
        }
        for (ti, triangle) in self.triangles.iter().enumerate() {
            for vi in triangle.indices() {
                if vi >= self.points.len() {
                    return Err(MeshError::InvalidTriangle {
                        triangle: ti,
                        vertex: vi,
                    });
                }
            }
        }
        Ok(())
    }

    /// Compute the axis-aligned bounding box.
    ///
    /// Returns `None` for a mesh without points.
    pub fn bounding_box(&self) -> Option<(Point3<f64>, Point3<f64>)> {
        let first = self.points.first()?;
        let mut min = *first;
        let mut max = *first;

        for p in &self.points {
            for i in 0..3 {
                min[i] = min[i].min(p[i]);
                max[i] = max[i].max(p[i]);
            }
        }

        Some((min, max))
    }

    /// Compute area-weighted per-point normals.
    ///
    /// Points not used by any triangle get a zero normal. Triangles with an
    /// out-of-range index are skipped.
    pub fn vertex_normals(&self) -> Vec<Vector3<f64>> {
        let mut normals = vec![Vector3::zeros(); self.points.len()];

        for triangle in &self.triangles {
            let [v0, v1, v2] = triangle.indices();
            let (Some(&p0), Some(&p1), Some(&p2)) =
                (self.points.get(v0), self.points.get(v1), self.points.get(v2))
            else {
                continue;
            };
            let e1 = p1 - p0;
            let e2 = p2 - p0;
            let face_normal = e1.cross(&e2); // Area-weighted

            normals[v0] += face_normal;
            normals[v1] += face_normal;
            normals[v2] += face_normal;
        }

        for n in &mut normals {
            let len = n.norm();
            if len > 1e-10 {
                *n /= len;
            }
        }

        normals
    }
}
