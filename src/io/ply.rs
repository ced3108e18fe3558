//! PLY (Stanford polygon) format support.
//!
//! Meshes are written as ASCII PLY with `float` vertex coordinates and a
//! `vertex_index` list per face, readable by generic mesh tools. Loading is
//! provided for round trips and inspection.

use std::fs::File;
use std::io::{BufReader, BufWriter, Write};
use std::path::Path;

use log::info;
use nalgebra::Point3;
use ply_rs::parser::Parser;
use ply_rs::ply::{DefaultElement, Property};

use crate::error::{MeshError, Result};
use crate::mesh::{Mesh, Triangle};

/// Comment line written into every exported header.
pub const HEADER_COMMENT: &str = "Depth map to 3D mesh";

/// Save a mesh to a PLY file (ASCII format).
///
/// The mesh is validated first; an empty point or triangle sequence fails
/// with [`MeshError::EmptyVertices`] or [`MeshError::EmptyFaces`] and no file
/// is created.
///
/// # Example
///
/// ```no_run
/// use depthmesh::io::ply;
/// use depthmesh::mesh::{Mesh, Triangle};
/// use nalgebra::Point3;
///
/// let mesh = Mesh::new(
///     vec![Point3::origin(), Point3::new(1.0, 0.0, 0.0), Point3::new(0.0, 1.0, 0.0)],
///     vec![Triangle::new(0, 1, 2)],
/// );
/// ply::save(&mesh, "output.ply").unwrap();
/// ```
pub fn save<P: AsRef<Path>>(mesh: &Mesh, path: P) -> Result<()> {
    let path = path.as_ref();
    mesh.validate()?;

    let file = File::create(path)?;
    let mut writer = BufWriter::new(file);
    write_to(mesh, &mut writer)?;
    writer.flush()?;

    info!(
        "Saved PLY file {} ({} vertices, {} faces)",
        path.display(),
        mesh.num_vertices(),
        mesh.num_faces()
    );
    Ok(())
}

/// Write a mesh as ASCII PLY into any writer.
pub fn write_to<W: Write>(mesh: &Mesh, writer: &mut W) -> Result<()> {
    mesh.validate()?;

    // Write header
    writeln!(writer, "ply")?;
    writeln!(writer, "format ascii 1.0")?;
    writeln!(writer, "comment {}", HEADER_COMMENT)?;
    writeln!(writer, "element vertex {}", mesh.points.len())?;
    writeln!(writer, "property float x")?;
    writeln!(writer, "property float y")?;
    writeln!(writer, "property float z")?;
    writeln!(writer, "element face {}", mesh.triangles.len())?;
    writeln!(writer, "property list uchar int vertex_index")?;
    writeln!(writer, "end_header")?;

    // Write vertices
    for p in &mesh.points {
        writeln!(writer, "{} {} {}", p.x, p.y, p.z)?;
    }

    // Write faces
    for t in &mesh.triangles {
        writeln!(writer, "3 {} {} {}", t.v1, t.v2, t.v3)?;
    }

    Ok(())
}

/// Load a triangle mesh from a PLY file.
///
/// Any PLY encoding supported by the parser is accepted. Faces must be
/// triangles listed under `vertex_index` or `vertex_indices`.
pub fn load<P: AsRef<Path>>(path: P) -> Result<Mesh> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            MeshError::NotFound {
                path: path.to_path_buf(),
            }
        } else {
            MeshError::Io(e)
        }
    })?;
    let mut reader = BufReader::new(file);

    let parser = Parser::<DefaultElement>::new();
    let ply = parser
        .read_ply(&mut reader)
        .map_err(|e| MeshError::load_error(path, e.to_string()))?;

    // Extract vertices
    let vertex_element = ply
        .payload
        .get("vertex")
        .ok_or_else(|| MeshError::load_error(path, "PLY file has no vertex element"))?;

    let mut points: Vec<Point3<f64>> = Vec::with_capacity(vertex_element.len());
    for vertex in vertex_element {
        let mut coords = [0.0; 3];
        for (coord, name) in coords.iter_mut().zip(["x", "y", "z"]) {
            *coord = get_float_property(vertex, name).ok_or_else(|| {
                MeshError::load_error(path, format!("vertex missing {name} coordinate"))
            })?;
        }
        points.push(Point3::from(coords));
    }

    // Extract faces
    let mut triangles = Vec::new();
    if let Some(face_element) = ply.payload.get("face") {
        triangles.reserve(face_element.len());
        for (fi, face) in face_element.iter().enumerate() {
            let indices = get_list_property(face, "vertex_index")
                .or_else(|| get_list_property(face, "vertex_indices"))
                .ok_or_else(|| {
                    MeshError::load_error(path, "face missing vertex_index property")
                })?;

            let raw = match indices.as_slice() {
                &[v1, v2, v3] => [v1, v2, v3],
                other => {
                    return Err(MeshError::load_error(
                        path,
                        format!("face {fi} has {} vertices, expected 3", other.len()),
                    ))
                }
            };

            let mut corners = [0usize; 3];
            for (corner, &v) in corners.iter_mut().zip(&raw) {
                *corner = usize::try_from(v)
                    .ok()
                    .filter(|&i| i < points.len())
                    .ok_or_else(|| {
                        MeshError::load_error(
                            path,
                            format!(
                                "face {fi} references vertex {v}, but only {} vertices exist",
                                points.len()
                            ),
                        )
                    })?;
            }
            triangles.push(Triangle::from(corners));
        }
    }

    Ok(Mesh::new(points, triangles))
}

fn get_float_property(element: &DefaultElement, name: &str) -> Option<f64> {
    match element.get(name)? {
        Property::Float(v) => Some(*v as f64),
        Property::Double(v) => Some(*v),
        Property::Int(v) => Some(*v as f64),
        Property::UInt(v) => Some(*v as f64),
        Property::Short(v) => Some(*v as f64),
        Property::UShort(v) => Some(*v as f64),
        Property::Char(v) => Some(*v as f64),
        Property::UChar(v) => Some(*v as f64),
        _ => None,
    }
}

fn get_list_property(element: &DefaultElement, name: &str) -> Option<Vec<i64>> {
    match element.get(name)? {
        Property::ListInt(v) => Some(v.iter().map(|&x| i64::from(x)).collect()),
        Property::ListUInt(v) => Some(v.iter().map(|&x| i64::from(x)).collect()),
        Property::ListShort(v) => Some(v.iter().map(|&x| i64::from(x)).collect()),
        Property::ListUShort(v) => Some(v.iter().map(|&x| i64::from(x)).collect()),
        Property::ListChar(v) => Some(v.iter().map(|&x| i64::from(x)).collect()),
        Property::ListUChar(v) => Some(v.iter().map(|&x| i64::from(x)).collect()),
        _ => None,
    }
}
