//! Error types for bitraster-core
//!
//! Provides a unified error type for the fallible operations of the core
//! crate. Contract violations on the hot paths (raster ops with a destination
//! rectangle outside the image) panic instead; their `try_` counterparts
//! report the same condition through this type.

use crate::geom::Rect;
use thiserror::Error;

/// bitraster-core error type
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// Pixel coordinates out of bounds
    #[error("pixel ({x}, {y}) out of bounds for {width}x{height} image")]
    IndexOutOfBounds {
        x: u32,
        y: u32,
        width: u32,
        height: u32,
    },

    /// Rectangle not contained in the image
    #[error(
        "rectangle ({}, {}, {}x{}) out of bounds for {width}x{height} image",
        .rect.x, .rect.y, .rect.w, .rect.h
    )]
    RectOutOfBounds { rect: Rect, width: u32, height: u32 },

    /// Incompatible image sizes
    #[error("incompatible image sizes: {0}x{1} vs {2}x{3}")]
    IncompatibleSizes(u32, u32, u32, u32),

    /// Pixel buffer has the wrong length for the requested dimensions
    #[error("data length mismatch: expected {expected}, got {actual}")]
    DataLengthMismatch { expected: usize, actual: usize },

    /// Text rows of an ASCII picture differ in length
    #[error("ragged rows: row {row} has width {actual}, expected {expected}")]
    RaggedRows {
        row: usize,
        expected: usize,
        actual: usize,
    },

    /// Unrecognized character in an ASCII picture
    #[error("invalid pixel character {ch:?} at row {row}, column {col}")]
    InvalidPixelChar { ch: char, row: usize, col: usize },

    /// Invalid parameter value
    #[error("invalid parameter: {0}")]
    InvalidParameter(String),
}

/// Result type alias for bitraster-core operations
pub type Result<T> = std::result::Result<T, Error>;
