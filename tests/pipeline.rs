//! End-to-end tests driving the conversion through real files.

use std::fs;

use depthmesh::io::{depth, ply};
use depthmesh::prelude::*;
use tempfile::tempdir;

fn write_raw(path: &std::path::Path, values: &[f64]) {
    let bytes: Vec<u8> = values.iter().flat_map(|v| v.to_le_bytes()).collect();
    fs::write(path, bytes).unwrap();
}

fn wavy_grid(width: usize, height: usize) -> DepthGrid {
    let mut depths = Vec::with_capacity(width * height);
    for row in 0..height {
        for col in 0..width {
            let hole = (col + row) % 9 == 4 || (col == 3 && row > 2);
            depths.push(if hole {
                0.0
            } else {
                10.0 + (col as f64 * 0.7).sin() + row as f64 * 0.25
            });
        }
    }
    DepthGrid::new(height, width, depths).unwrap()
}

#[test]
fn test_convert_two_by_two() {
    let dir = tempdir().unwrap();
    let input = dir.path().join("depth.dat");
    let output = dir.path().join("mesh.ply");
    write_raw(&input, &[2.0, 2.0, 1.0, 2.0, 3.0, 4.0]);

    let report = convert(&input, &output, &ConvertOptions::default()).unwrap();
    assert_eq!(
        report,
        ConvertReport {
            height: 2,
            width: 2,
            vertices: 4,
            faces: 2,
        }
    );

    let text = fs::read_to_string(&output).unwrap();
    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(lines[0], "ply");
    assert_eq!(lines[3], "element vertex 4");
    assert_eq!(lines[7], "element face 2");
    assert_eq!(lines[9], "end_header");
    assert_eq!(lines[10], "-1 -1 0");
    assert_eq!(lines[13], "0 0 100");
    assert_eq!(lines[14], "3 0 1 2");
    assert_eq!(lines[15], "3 1 3 2");
    assert_eq!(lines.len(), 16);
}

#[test]
fn test_round_trip_through_ply_reader() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("wavy.ply");

    let grid = wavy_grid(17, 13);
    let mesh = depth_to_mesh(&grid, &ConvertOptions::default()).unwrap();
    ply::save(&mesh, &path).unwrap();

    let loaded = ply::load(&path).unwrap();
    assert_eq!(loaded.num_vertices(), mesh.num_vertices());
    assert_eq!(loaded.num_faces(), mesh.num_faces());
    assert_eq!(loaded.triangles, mesh.triangles);

    // Header declares float properties, so compare at single precision.
    for (a, b) in loaded.points.iter().zip(&mesh.points) {
        assert!((*a - *b).norm() < 1e-4 * (1.0 + b.coords.norm()));
    }
}

#[test]
fn test_properties_on_holey_grid() {
    let grid = wavy_grid(23, 19);
    let mesh = depth_to_mesh(&grid, &ConvertOptions::default()).unwrap();

    // One point per valid cell.
    assert_eq!(mesh.num_vertices(), grid.stats().valid_count);

    // Indices in range and z normalized.
    for t in &mesh.triangles {
        assert!(t.indices().iter().all(|&v| v < mesh.num_vertices()));
    }
    assert!(mesh.points.iter().all(|p| (0.0..=100.0).contains(&p.z)));

    // Two triangles per fully valid block, none otherwise.
    let mut complete = 0;
    for row in 0..grid.height() - 1 {
        for col in 0..grid.width() - 1 {
            if grid.is_valid(col, row)
                && grid.is_valid(col + 1, row)
                && grid.is_valid(col, row + 1)
                && grid.is_valid(col + 1, row + 1)
            {
                complete += 1;
            }
        }
    }
    assert_eq!(mesh.num_faces(), 2 * complete);
}

#[test]
fn test_missing_input() {
    let dir = tempdir().unwrap();
    let result = convert(
        dir.path().join("absent.dat"),
        dir.path().join("out.ply"),
        &ConvertOptions::default(),
    );
    assert!(matches!(result, Err(MeshError::NotFound { .. })));
    assert!(!dir.path().join("out.ply").exists());
}

#[test]
fn test_negative_height_file() {
    let dir = tempdir().unwrap();
    let input = dir.path().join("bad.dat");
    write_raw(&input, &[-1.0, 3.0]);

    let result = depth::load(&input);
    assert!(matches!(result, Err(MeshError::InvalidDimensions { .. })));
}

#[test]
fn test_truncated_file() {
    let dir = tempdir().unwrap();
    let input = dir.path().join("short.dat");
    write_raw(&input, &[3.0, 3.0, 1.0, 1.0, 1.0, 1.0]);

    let result = depth::load(&input);
    assert!(matches!(
        result,
        Err(MeshError::Truncated { expected: 9, read: 4 })
    ));
}

#[test]
fn test_empty_faces_writes_nothing() {
    let dir = tempdir().unwrap();
    let input = dir.path().join("hole.dat");
    let output = dir.path().join("hole.ply");
    write_raw(&input, &[2.0, 2.0, 1.0, 0.0, 3.0, 4.0]);

    let result = convert(&input, &output, &ConvertOptions::default());
    assert!(matches!(result, Err(MeshError::EmptyFaces)));
    assert!(!output.exists());
}

#[test]
fn test_all_zero_map_fails_at_export() {
    let dir = tempdir().unwrap();
    let input = dir.path().join("zero.dat");
    let output = dir.path().join("zero.ply");
    write_raw(&input, &[2.0, 2.0, 0.0, 0.0, 0.0, 0.0]);

    let result = convert(&input, &output, &ConvertOptions::default());
    assert!(matches!(result, Err(MeshError::EmptyVertices)));
    assert!(!output.exists());
}

#[test]
fn test_depth_save_load() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("grid.dat");

    let grid = wavy_grid(8, 5);
    depth::save(&grid, &path).unwrap();
    assert_eq!(fs::metadata(&path).unwrap().len(), 16 + 8 * 5 * 8);
    assert_eq!(depth::load(&path).unwrap(), grid);
}
