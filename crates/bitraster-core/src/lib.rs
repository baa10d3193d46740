//! bitraster core - Bit-packed binary images and raster operations
//!
//! This crate provides the fundamental data structures used by the
//! component extraction crates:
//!
//! - [`BinaryImage`] - Two-color raster packed 32 pixels per word
//! - [`Color`] - White (background) or black (foreground)
//! - [`Rect`] / [`Point`] / [`Size`] - Raster geometry
//! - [`Rop`] and its combinators - Boolean functions for [`raster_op`]
//!
//! # Examples
//!
//! ```
//! use bitraster_core::{BinaryImage, Color, Point, Rect, RopSrc, raster_op};
//!
//! let src = BinaryImage::with_color(8, 8, Color::Black);
//! let mut dst = BinaryImage::new(16, 16);
//! raster_op(&mut dst, Rect::new_unchecked(4, 4, 8, 8), &src, Point::origin(), RopSrc);
//! assert_eq!(dst.content_bounding_box(Color::Black), Rect::new_unchecked(4, 4, 8, 8));
//! ```

pub mod error;
pub mod geom;
pub mod image;

pub use error::{Error, Result};
pub use geom::{Point, Rect, Size};
pub use image::{
    BinaryImage, Color, Rop, RopAnd, RopClear, RopDst, RopNot, RopOp, RopOr, RopSet, RopSrc,
    RopSubtract, RopXor, WORD_BITS, raster_op, raster_op_in_place, try_raster_op,
};
