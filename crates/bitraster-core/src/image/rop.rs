//! Raster operations (ROP)
//!
//! A raster operation updates a rectangle of a destination image by
//! combining each destination pixel with a source pixel through a boolean
//! function. The function is a [`Rop`], either one of the composable
//! combinator types:
//!
//! ```
//! use bitraster_core::{BinaryImage, Color, Point, RopDst, RopSrc, RopXor, raster_op};
//!
//! let mut a = BinaryImage::with_color(40, 2, Color::Black);
//! let b = a.clone();
//! let r = a.rect();
//! raster_op(&mut a, r, &b, Point::origin(), RopXor(RopSrc, RopDst));
//! assert_eq!(a.count_black_pixels(), 0);
//! ```
//!
//! or a runtime-selected [`RopOp`].
//!
//! Rows are processed a word at a time; only the first and last word of a
//! row are masked, so results are bit-identical to the per-pixel definition
//! while unaligned offsets cost one shift per word.

use super::access::{WORD_BITS, fetch_word, span_mask};
use super::BinaryImage;
use crate::error::{Error, Result};
use crate::geom::{Point, Rect};

/// A bitwise boolean function of source and destination pixels.
///
/// Implementations must be bitwise: bit `i` of the result may depend only on
/// bit `i` of `src` and `dst`.
pub trait Rop {
    /// Combine 32 source pixels with 32 destination pixels.
    fn apply(&self, src: u32, dst: u32) -> u32;
}

impl<R: Rop + ?Sized> Rop for &R {
    #[inline]
    fn apply(&self, src: u32, dst: u32) -> u32 {
        (**self).apply(src, dst)
    }
}

/// The source pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RopSrc;

/// The destination pixels, i.e. leave the destination unchanged.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RopDst;

/// All white.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RopClear;

/// All black.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RopSet;

/// Negation of the inner operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RopNot<R>(pub R);

/// `A AND B`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RopAnd<A, B>(pub A, pub B);

/// `A OR B`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RopOr<A, B>(pub A, pub B);

/// `A XOR B`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RopXor<A, B>(pub A, pub B);

/// `A AND NOT B`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RopSubtract<A, B>(pub A, pub B);

impl Rop for RopSrc {
    #[inline]
    fn apply(&self, src: u32, _dst: u32) -> u32 {
        src
    }
}

impl Rop for RopDst {
    #[inline]
    fn apply(&self, _src: u32, dst: u32) -> u32 {
        dst
    }
}

impl Rop for RopClear {
    #[inline]
    fn apply(&self, _src: u32, _dst: u32) -> u32 {
        0
    }
}

impl Rop for RopSet {
    #[inline]
    fn apply(&self, _src: u32, _dst: u32) -> u32 {
        u32::MAX
    }
}

impl<R: Rop> Rop for RopNot<R> {
    #[inline]
    fn apply(&self, src: u32, dst: u32) -> u32 {
        !self.0.apply(src, dst)
    }
}

impl<A: Rop, B: Rop> Rop for RopAnd<A, B> {
    #[inline]
    fn apply(&self, src: u32, dst: u32) -> u32 {
        self.0.apply(src, dst) & self.1.apply(src, dst)
    }
}

impl<A: Rop, B: Rop> Rop for RopOr<A, B> {
    #[inline]
    fn apply(&self, src: u32, dst: u32) -> u32 {
        self.0.apply(src, dst) | self.1.apply(src, dst)
    }
}

impl<A: Rop, B: Rop> Rop for RopXor<A, B> {
    #[inline]
    fn apply(&self, src: u32, dst: u32) -> u32 {
        self.0.apply(src, dst) ^ self.1.apply(src, dst)
    }
}

impl<A: Rop, B: Rop> Rop for RopSubtract<A, B> {
    #[inline]
    fn apply(&self, src: u32, dst: u32) -> u32 {
        self.0.apply(src, dst) & !self.1.apply(src, dst)
    }
}

/// Raster operation type
///
/// Named raster operations for combining source and destination pixels,
/// selectable at runtime.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RopOp {
    /// Clear destination to white
    Clear,
    /// Set destination to black
    Set,
    /// Copy source to destination
    Src,
    /// Keep destination unchanged
    Dst,
    /// NOT source
    NotSrc,
    /// NOT destination
    NotDst,
    /// Source AND destination
    SrcAndDst,
    /// Source OR destination
    SrcOrDst,
    /// Source XOR destination
    SrcXorDst,
    /// (NOT source) AND destination
    NotSrcAndDst,
    /// (NOT source) OR destination
    NotSrcOrDst,
    /// NOT (source XOR destination)
    NotSrcXorDst,
    /// Source AND (NOT destination)
    SrcAndNotDst,
    /// Source OR (NOT destination)
    SrcOrNotDst,
    /// (NOT source) AND (NOT destination)
    NotSrcAndNotDst,
    /// Paint: source OR destination (alias for SrcOrDst)
    Paint,
    /// Subtract: destination AND (NOT source)
    Subtract,
}

impl RopOp {
    /// Check if this operation reads the source image.
    ///
    /// Operations like `Clear`, `Set`, `Dst`, and `NotDst` operate
    /// only on the destination.
    pub fn requires_source(self) -> bool {
        !matches!(self, Self::Clear | Self::Set | Self::Dst | Self::NotDst)
    }
}

impl Rop for RopOp {
    #[inline]
    fn apply(&self, s: u32, d: u32) -> u32 {
        match self {
            Self::Clear => 0,
            Self::Set => u32::MAX,
            Self::Src => s,
            Self::Dst => d,
            Self::NotSrc => !s,
            Self::NotDst => !d,
            Self::SrcAndDst => s & d,
            Self::SrcOrDst | Self::Paint => s | d,
            Self::SrcXorDst => s ^ d,
            Self::NotSrcAndDst | Self::Subtract => !s & d,
            Self::NotSrcOrDst => !s | d,
            Self::NotSrcXorDst => !(s ^ d),
            Self::SrcAndNotDst => s & !d,
            Self::SrcOrNotDst => s | !d,
            Self::NotSrcAndNotDst => !s & !d,
        }
    }
}

/// Apply a raster operation, reporting an out-of-bounds destination.
///
/// Destination pixel `(dst_rect.x + i, dst_rect.y + j)` is replaced by
/// `op(src(src_origin.x + i, src_origin.y + j), dst)`. Source pixels outside
/// `src` read as white. An empty `dst_rect` or a null `dst` is a no-op.
///
/// # Errors
///
/// Returns [`Error::RectOutOfBounds`] if `dst_rect` is not contained in
/// `dst`.
pub fn try_raster_op<R: Rop>(
    dst: &mut BinaryImage,
    dst_rect: Rect,
    src: &BinaryImage,
    src_origin: Point,
    op: R,
) -> Result<()> {
    if dst_rect.is_empty() || dst.is_null() {
        return Ok(());
    }
    check_dst_rect(dst, dst_rect)?;

    let dx = i64::from(src_origin.x) - i64::from(dst_rect.x);
    let x0 = dst_rect.x as u32;
    let x1 = dst_rect.right() as u32;
    let first_word = x0 / WORD_BITS;
    let last_word = (x1 - 1) / WORD_BITS;

    for j in 0..dst_rect.h {
        let sy = i64::from(src_origin.y) + i64::from(j);
        let src_line = (sy >= 0 && sy < i64::from(src.height())).then(|| src.row(sy as u32));
        let dst_line = dst.row_mut((dst_rect.y + j) as u32);

        for wi in first_word..=last_word {
            let s = match src_line {
                Some(line) => fetch_word(line, src.width(), i64::from(wi * WORD_BITS) + dx),
                None => 0,
            };
            let d = dst_line[wi as usize];
            let mask = span_mask(x0, x1, wi);
            dst_line[wi as usize] = if mask == u32::MAX {
                op.apply(s, d)
            } else {
                (d & !mask) | (op.apply(s, d) & mask)
            };
        }
    }

    Ok(())
}

/// Apply a raster operation.
///
/// See [`try_raster_op`] for the pixel mapping.
///
/// # Panics
///
/// Panics if `dst_rect` is non-empty and not contained in a non-null `dst`.
pub fn raster_op<R: Rop>(
    dst: &mut BinaryImage,
    dst_rect: Rect,
    src: &BinaryImage,
    src_origin: Point,
    op: R,
) {
    try_raster_op(dst, dst_rect, src, src_origin, op)
        .unwrap_or_else(|e| panic!("raster_op: {}", e));
}

/// Apply a raster operation with `img` as both source and destination.
///
/// The result is the same as reading every source pixel before writing any
/// destination pixel, even when the regions overlap.
///
/// # Panics
///
/// Panics if `dst_rect` is non-empty and not contained in a non-null `img`.
pub fn raster_op_in_place<R: Rop>(
    img: &mut BinaryImage,
    dst_rect: Rect,
    src_origin: Point,
    op: R,
) {
    if dst_rect.is_empty() || img.is_null() {
        return;
    }
    check_dst_rect(img, dst_rect).unwrap_or_else(|e| panic!("raster_op_in_place: {}", e));

    if src_origin != dst_rect.top_left() {
        let snapshot = img.clone();
        raster_op(img, dst_rect, &snapshot, src_origin, op);
        return;
    }

    let x0 = dst_rect.x as u32;
    let x1 = dst_rect.right() as u32;
    for y in dst_rect.y as u32..dst_rect.bottom() as u32 {
        let line = img.row_mut(y);
        for wi in x0 / WORD_BITS..=(x1 - 1) / WORD_BITS {
            let d = line[wi as usize];
            let mask = span_mask(x0, x1, wi);
            line[wi as usize] = (d & !mask) | (op.apply(d, d) & mask);
        }
    }
}

fn check_dst_rect(dst: &BinaryImage, dst_rect: Rect) -> Result<()> {
    if dst_rect.w < 0 || dst_rect.h < 0 || !dst.rect().contains_rect(&dst_rect) {
        return Err(Error::RectOutOfBounds {
            rect: dst_rect,
            width: dst.width(),
            height: dst.height(),
        });
    }
    Ok(())
}

impl BinaryImage {
    /// Combine with a same-sized image into a new image.
    ///
    /// # Errors
    ///
    /// Returns [`Error::IncompatibleSizes`] if the dimensions differ.
    pub fn rop<R: Rop>(&self, other: &BinaryImage, op: R) -> Result<BinaryImage> {
        let mut out = self.clone();
        out.rop_inplace(other, op)?;
        Ok(out)
    }

    /// Combine with a same-sized image in place.
    ///
    /// # Errors
    ///
    /// Returns [`Error::IncompatibleSizes`] if the dimensions differ.
    pub fn rop_inplace<R: Rop>(&mut self, other: &BinaryImage, op: R) -> Result<()> {
        if self.size() != other.size() {
            return Err(Error::IncompatibleSizes(
                self.width(),
                self.height(),
                other.width(),
                other.height(),
            ));
        }
        let r = self.rect();
        try_raster_op(self, r, other, Point::origin(), op)
    }

    /// Bitwise AND of two images.
    ///
    /// # Errors
    ///
    /// Returns error if images have different dimensions.
    pub fn and(&self, other: &BinaryImage) -> Result<BinaryImage> {
        self.rop(other, RopAnd(RopSrc, RopDst))
    }

    /// Bitwise OR of two images.
    ///
    /// # Errors
    ///
    /// Returns error if images have different dimensions.
    pub fn or(&self, other: &BinaryImage) -> Result<BinaryImage> {
        self.rop(other, RopOr(RopSrc, RopDst))
    }

    /// Bitwise XOR of two images.
    ///
    /// # Errors
    ///
    /// Returns error if images have different dimensions.
    pub fn xor(&self, other: &BinaryImage) -> Result<BinaryImage> {
        self.rop(other, RopXor(RopSrc, RopDst))
    }

    /// Pixels black in `self` but not in `other`.
    ///
    /// # Errors
    ///
    /// Returns error if images have different dimensions.
    pub fn subtract(&self, other: &BinaryImage) -> Result<BinaryImage> {
        self.rop(other, RopSubtract(RopDst, RopSrc))
    }
}
