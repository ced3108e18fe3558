//! Binary depth map format.
//!
//! The file is a flat sequence of little-endian IEEE-754 doubles with no
//! magic number, version, or checksum:
//!
//! | Offset | Content |
//! |--------|---------|
//! | 0 | height (truncated to an integer) |
//! | 8 | width (truncated to an integer) |
//! | 16 | `height × width` depth samples, row-major |
//!
//! A sample of exactly `0.0` means "no data".
//!
//! # Example
//!
//! ```no_run
//! use depthmesh::io::depth;
//!
//! let grid = depth::load("DepthMap_8.dat").unwrap();
//! let stats = grid.stats();
//! println!("{} valid samples", stats.valid_count);
//! ```

use std::fs::File;
use std::io::{BufReader, BufWriter, ErrorKind, Read, Write};
use std::path::Path;

use log::{info, warn};

use crate::error::{MeshError, Result};
use crate::grid::DepthGrid;

/// Size in bytes of one encoded value.
const VALUE_SIZE: usize = 8;

/// Upper bound on the samples reserved before any are read.
const MAX_PREALLOCATED_SAMPLES: usize = 1 << 22;

/// Load a depth map from a file.
///
/// Fails with [`MeshError::NotFound`] if the file does not exist,
/// [`MeshError::InvalidDimensions`] if the header declares a non-positive
/// size, and [`MeshError::Truncated`] if the header or samples are missing.
pub fn load<P: AsRef<Path>>(path: P) -> Result<DepthGrid> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|e| {
        if e.kind() == ErrorKind::NotFound {
            MeshError::NotFound {
                path: path.to_path_buf(),
            }
        } else {
            MeshError::Io(e)
        }
    })?;

    let grid = read_from(BufReader::new(file))?;
    log_summary(&grid);
    Ok(grid)
}

/// Decode a depth map from any reader.
pub fn read_from<R: Read>(mut reader: R) -> Result<DepthGrid> {
    let raw_height = read_header_value(&mut reader)?;
    let raw_width = read_header_value(&mut reader)?;

    // Saturating float-to-int casts; NaN becomes 0.
    let height = raw_height.trunc() as i64;
    let width = raw_width.trunc() as i64;
    let invalid = || MeshError::InvalidDimensions { height, width };

    if height <= 0 || width <= 0 {
        return Err(invalid());
    }
    let height = usize::try_from(height).map_err(|_| invalid())?;
    let width = usize::try_from(width).map_err(|_| invalid())?;
    let expected = height.checked_mul(width).ok_or_else(invalid)?;

    let mut depths = Vec::with_capacity(expected.min(MAX_PREALLOCATED_SAMPLES));
    let mut buf = [0u8; VALUE_SIZE];
    for read in 0..expected {
        match reader.read_exact(&mut buf) {
            Ok(()) => depths.push(f64::from_le_bytes(buf)),
            Err(e) if e.kind() == ErrorKind::UnexpectedEof => {
                return Err(MeshError::Truncated { expected, read });
            }
            Err(e) => return Err(MeshError::Io(e)),
        }
    }

    DepthGrid::new(height, width, depths)
}

/// A header cut short reports `Truncated` with no samples expected yet.
fn read_header_value<R: Read>(reader: &mut R) -> Result<f64> {
    let mut buf = [0u8; VALUE_SIZE];
    reader.read_exact(&mut buf).map_err(|e| {
        if e.kind() == ErrorKind::UnexpectedEof {
            MeshError::Truncated {
                expected: 0,
                read: 0,
            }
        } else {
            MeshError::Io(e)
        }
    })?;
    Ok(f64::from_le_bytes(buf))
}

fn log_summary(grid: &DepthGrid) {
    let stats = grid.stats();
    info!("Depth map size: {}x{}", grid.width(), grid.height());
    if stats.has_valid_samples() {
        info!(
            "Depth range: {:.2} - {:.2}, {} valid samples",
            stats.min_depth, stats.max_depth, stats.valid_count
        );
    } else {
        warn!("Depth map has no valid samples");
    }
}

/// Save a depth map in the binary format read by [`load`].
pub fn save<P: AsRef<Path>>(grid: &DepthGrid, path: P) -> Result<()> {
    let file = File::create(path)?;
    let mut writer = BufWriter::new(file);
    write_to(grid, &mut writer)?;
    writer.flush()?;
    Ok(())
}

/// Encode a depth map into any writer.
pub fn write_to<W: Write>(grid: &DepthGrid, writer: &mut W) -> Result<()> {
    writer.write_all(&(grid.height() as f64).to_le_bytes())?;
    writer.write_all(&(grid.width() as f64).to_le_bytes())?;
    for &depth in grid.depths() {
        writer.write_all(&depth.to_le_bytes())?;
    }
    Ok(())
}
