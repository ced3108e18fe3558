//! File I/O.
//!
//! | Format | Extension | Load | Save | Notes |
//! |--------|-----------|------|------|-------|
//! | Depth map | `.dat`, `.bin` | ✓ | ✓ | Little-endian doubles, see [`depth`] |
//! | PLY | `.ply` | ✓ | ✓ | ASCII on save, see [`ply`] |
//!
//! ```no_run
//! use depthmesh::io::{depth, ply};
//! use depthmesh::pipeline::{depth_to_mesh, ConvertOptions};
//!
//! let grid = depth::load("DepthMap_8.dat").unwrap();
//! let mesh = depth_to_mesh(&grid, &ConvertOptions::default()).unwrap();
//! ply::save(&mesh, "output.ply").unwrap();
//! ```

pub mod depth;
pub mod ply;

use std::path::Path;

/// Supported file formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    /// Binary depth map.
    DepthMap,
    /// PLY (Stanford polygon) mesh.
    Ply,
}

impl Format {
    /// Detect format from file extension.
    pub fn from_extension(ext: &str) -> Option<Format> {
        match ext.to_lowercase().as_str() {
            "dat" | "bin" => Some(Format::DepthMap),
            "ply" => Some(Format::Ply),
            _ => None,
        }
    }

    /// Detect format from file path.
    pub fn from_path<P: AsRef<Path>>(path: P) -> Option<Format> {
        path.as_ref()
            .extension()
            .and_then(|ext| ext.to_str())
            .and_then(Format::from_extension)
    }
}
