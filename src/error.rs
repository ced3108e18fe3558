//! Error types for depthmesh.
//!
//! Every pipeline stage returns [`Result`], so callers can branch on the
//! variant instead of parsing messages.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias using [`MeshError`].
pub type Result<T> = std::result::Result<T, MeshError>;

/// Errors that can occur while converting a depth map into a mesh.
#[derive(Error, Debug)]
pub enum MeshError {
    /// The depth map file does not exist.
    #[error("file not found: {path}")]
    NotFound {
        /// The missing path.
        path: PathBuf,
    },

    /// The decoded grid dimensions are not positive.
    #[error("invalid depth map dimensions: {width}x{height}")]
    InvalidDimensions {
        /// Decoded height, truncated to an integer.
        height: i64,
        /// Decoded width, truncated to an integer.
        width: i64,
    },

    /// The depth map ended before all declared samples were read.
    #[error("depth map truncated: expected {expected} samples, read {read}")]
    Truncated {
        /// Number of samples declared by the header.
        expected: usize,
        /// Number of samples actually present.
        read: usize,
    },

    /// File I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The mesh to export has no vertices.
    #[error("mesh has no vertices")]
    EmptyVertices,

    /// The mesh to export has no faces.
    #[error("mesh has no faces")]
    EmptyFaces,

    /// A triangle references a vertex that does not exist.
    #[error("triangle {triangle} references invalid vertex index {vertex}")]
    InvalidTriangle {
        /// The triangle index.
        triangle: usize,
        /// The invalid vertex index.
        vertex: usize,
    },

    /// Error loading mesh from file.
    #[error("failed to load mesh from {path}: {message}")]
    LoadError {
        /// The file path.
        path: PathBuf,
        /// Error message.
        message: String,
    },

    /// Invalid parameter value.
    #[error("invalid parameter: {name} = {value} ({reason})")]
    InvalidParameter {
        /// Parameter name.
        name: &'static str,
        /// The invalid value (as string).
        value: String,
        /// Reason the value is invalid.
        reason: &'static str,
    },
}

impl MeshError {
    /// Create an invalid parameter error.
    pub fn invalid_param<T: std::fmt::Display>(
        name: &'static str,
        value: T,
        reason: &'static str,
    ) -> Self {
        MeshError::InvalidParameter {
            name,
            value: value.to_string(),
            reason,
        }
    }

    /// Create a load error for the given path.
    pub(crate) fn load_error(path: &std::path::Path, message: impl Into<String>) -> Self {
        MeshError::LoadError {
            path: path.to_path_buf(),
            message: message.into(),
        }
    }
}
