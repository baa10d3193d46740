//! BinaryImage - The bit-packed two-color raster
//!
//! # Pixel layout
//!
//! - Image data is stored in 32-bit words
//! - Every row starts on a 32-bit boundary
//! - Pixels are packed MSB to LSB within each word
//! - A set bit is [`Color::Black`] (foreground), a clear bit [`Color::White`]
//!
//! # Ownership model
//!
//! `BinaryImage` owns its word buffer outright. `Clone` is a deep copy and
//! the copies are independently mutable.
//!
//! # Null images
//!
//! An image with zero width or zero height is "null". It has no storage and
//! every operation on it is a no-op.

pub mod access;
pub mod rop;

pub use access::*;
pub use rop::{
    Rop, RopAnd, RopClear, RopDst, RopNot, RopOp, RopOr, RopSet, RopSrc, RopSubtract, RopXor,
    raster_op, raster_op_in_place, try_raster_op,
};

use crate::error::{Error, Result};
use crate::geom::{Rect, Size};
use std::fmt;

/// Pixel color of a binary image
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Color {
    /// Background (bit 0)
    #[default]
    White,
    /// Foreground (bit 1)
    Black,
}

impl Color {
    /// The other color.
    #[inline]
    pub fn inverse(self) -> Self {
        match self {
            Color::White => Color::Black,
            Color::Black => Color::White,
        }
    }

    /// Storage bit for this color.
    #[inline]
    pub fn bit(self) -> u32 {
        match self {
            Color::White => 0,
            Color::Black => 1,
        }
    }

    /// Color of a storage bit; only the lowest bit is considered.
    #[inline]
    pub fn from_bit(bit: u32) -> Self {
        if bit & 1 != 0 { Color::Black } else { Color::White }
    }

    /// A full storage word of this color.
    #[inline]
    fn word(self) -> u32 {
        match self {
            Color::White => 0,
            Color::Black => u32::MAX,
        }
    }
}

/// Bit-packed black and white image
///
/// # Examples
///
/// ```
/// use bitraster_core::{BinaryImage, Color};
///
/// let mut img = BinaryImage::new(40, 3);
/// img.set_pixel(35, 1, Color::Black).unwrap();
/// assert_eq!(img.get_pixel(35, 1), Some(Color::Black));
/// assert_eq!(img.count_black_pixels(), 1);
/// assert_eq!(img.wpl(), 2);
/// ```
#[derive(Clone, Default)]
pub struct BinaryImage {
    /// Width in pixels
    width: u32,
    /// Height in pixels
    height: u32,
    /// 32-bit words per line
    wpl: u32,
    /// The image data (packed 32-bit words)
    data: Vec<u32>,
}

impl BinaryImage {
    /// Create a null (0x0) image.
    pub fn null() -> Self {
        Self::default()
    }

    /// Create a white image of the given dimensions.
    ///
    /// A zero dimension yields a null image.
    ///
    /// # Panics
    ///
    /// Panics if the buffer size overflows `usize`.
    pub fn new(width: u32, height: u32) -> Self {
        if width == 0 || height == 0 {
            return Self::null();
        }
        let wpl = Self::compute_wpl(width);
        let data_size = (wpl as usize)
            .checked_mul(height as usize)
            .unwrap_or_else(|| panic!("image too large: {}x{}", width, height));
        Self {
            width,
            height,
            wpl,
            data: vec![0u32; data_size],
        }
    }

    /// Create an image filled with `color`.
    pub fn with_color(width: u32, height: u32, color: Color) -> Self {
        let mut img = Self::new(width, height);
        img.fill(color);
        img
    }

    /// Create a white image of the given size.
    pub fn from_size(size: Size) -> Self {
        Self::new(size.width, size.height)
    }

    /// Create an image from one byte per pixel, row-major.
    ///
    /// Non-zero bytes are black.
    ///
    /// # Errors
    ///
    /// Returns [`Error::DataLengthMismatch`] if `pixels.len() != width * height`.
    pub fn from_pixels(width: u32, height: u32, pixels: &[u8]) -> Result<Self> {
        let expected = width as usize * height as usize;
        if pixels.len() != expected {
            return Err(Error::DataLengthMismatch {
                expected,
                actual: pixels.len(),
            });
        }

        let mut img = Self::new(width, height);
        if img.is_null() {
            return Ok(img);
        }
        for (y, row_pixels) in pixels.chunks_exact(width as usize).enumerate() {
            let line = img.row_mut(y as u32);
            for (x, &p) in row_pixels.iter().enumerate() {
                if p != 0 {
                    set_data_bit_val(line, x as u32);
                }
            }
        }
        Ok(img)
    }

    /// Parse an ASCII picture.
    ///
    /// Each non-blank line is a row. `X`, `#` and `1` are black; `.` and `0`
    /// are white. Blank lines, space and tab indentation common to every row
    /// and trailing whitespace are ignored; a space inside a row is an error.
    ///
    /// # Errors
    ///
    /// Returns [`Error::RaggedRows`] if rows differ in width and
    /// [`Error::InvalidPixelChar`] for any other character.
    pub fn from_ascii(text: &str) -> Result<Self> {
        let rows: Vec<&str> = text
            .lines()
            .map(|l| l.trim_end_matches('\r'))
            .filter(|l| !l.trim().is_empty())
            .collect();
        let indent = rows
            .iter()
            .map(|l| l.len() - l.trim_start_matches([' ', '\t']).len())
            .min()
            .unwrap_or(0);

        let mut pixels = Vec::new();
        let mut width = None;
        for (row, line) in rows.iter().enumerate() {
            let line = line[indent..].trim_end();
            let start = pixels.len();
            for (col, ch) in line.chars().enumerate() {
                let p = match ch {
                    'X' | '#' | '1' => 1u8,
                    '.' | '0' => 0u8,
                    _ => return Err(Error::InvalidPixelChar { ch, row, col }),
                };
                pixels.push(p);
            }
            let w = pixels.len() - start;
            match width {
                None => width = Some(w),
                Some(expected) if expected != w => {
                    return Err(Error::RaggedRows {
                        row,
                        expected,
                        actual: w,
                    });
                }
                Some(_) => {}
            }
        }

        let width = width.unwrap_or(0);
        let height = if width == 0 { 0 } else { rows.len() };
        if width == 0 {
            pixels.clear();
        }
        Self::from_pixels(width as u32, height as u32, &pixels)
    }

    /// Adopt raw row-aligned words.
    ///
    /// Padding bits past `width` in each row are cleared.
    ///
    /// # Errors
    ///
    /// Returns [`Error::DataLengthMismatch`] if `data.len()` is not
    /// `wpl * height` for the given width.
    pub fn from_words(width: u32, height: u32, data: Vec<u32>) -> Result<Self> {
        let wpl = if width == 0 || height == 0 {
            0
        } else {
            Self::compute_wpl(width)
        };
        let expected = wpl as usize * height as usize;
        if data.len() != expected {
            return Err(Error::DataLengthMismatch {
                expected,
                actual: data.len(),
            });
        }
        if expected == 0 {
            return Ok(Self::null());
        }

        let mut img = Self {
            width,
            height,
            wpl,
            data,
        };
        img.clear_padding();
        Ok(img)
    }

    /// Compute words per line for a given width.
    #[inline]
    fn compute_wpl(width: u32) -> u32 {
        width.div_ceil(WORD_BITS)
    }

    /// Get the image width in pixels.
    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Get the image height in pixels.
    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Get the image dimensions.
    #[inline]
    pub fn size(&self) -> Size {
        Size::new(self.width, self.height)
    }

    /// The full image rectangle at the origin.
    #[inline]
    pub fn rect(&self) -> Rect {
        Rect::new_unchecked(0, 0, self.width as i32, self.height as i32)
    }

    /// Get the words per line.
    #[inline]
    pub fn wpl(&self) -> u32 {
        self.wpl
    }

    /// Check whether the image is null (zero width or height).
    #[inline]
    pub fn is_null(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// Raw packed words, row-major.
    #[inline]
    pub fn data(&self) -> &[u32] {
        &self.data
    }

    /// Raw packed words of row `y`.
    ///
    /// # Panics
    ///
    /// Panics if `y >= height`.
    #[inline]
    pub fn row(&self, y: u32) -> &[u32] {
        let start = y as usize * self.wpl as usize;
        &self.data[start..start + self.wpl as usize]
    }

    /// Mutable raw words of row `y`.
    ///
    /// Callers must keep the padding bits of the last word clear.
    #[inline]
    pub fn row_mut(&mut self, y: u32) -> &mut [u32] {
        let start = y as usize * self.wpl as usize;
        let wpl = self.wpl as usize;
        &mut self.data[start..start + wpl]
    }

    /// Get a pixel, or `None` if out of bounds.
    pub fn get_pixel(&self, x: u32, y: u32) -> Option<Color> {
        if x >= self.width || y >= self.height {
            return None;
        }
        Some(self.get_pixel_unchecked(x, y))
    }

    /// Get a pixel without bounds checking against the width.
    ///
    /// # Panics
    ///
    /// Panics if `y >= height`; an `x` past the width reads padding.
    #[inline]
    pub fn get_pixel_unchecked(&self, x: u32, y: u32) -> Color {
        Color::from_bit(get_data_bit(self.row(y), x))
    }

    /// Set a pixel.
    ///
    /// # Errors
    ///
    /// Returns [`Error::IndexOutOfBounds`] if coordinates are out of bounds.
    pub fn set_pixel(&mut self, x: u32, y: u32, color: Color) -> Result<()> {
        if x >= self.width || y >= self.height {
            return Err(Error::IndexOutOfBounds {
                x,
                y,
                width: self.width,
                height: self.height,
            });
        }
        self.set_pixel_unchecked(x, y, color);
        Ok(())
    }

    /// Set a pixel without bounds checking.
    ///
    /// # Panics
    ///
    /// Panics if `x >= width` or `y >= height`.
    #[inline]
    pub fn set_pixel_unchecked(&mut self, x: u32, y: u32, color: Color) {
        assert!(x < self.width, "x={} out of bounds (width {})", x, self.width);
        set_data_bit(self.row_mut(y), x, color.bit());
    }

    /// Set every pixel to `color`.
    pub fn fill(&mut self, color: Color) {
        if self.is_null() {
            return;
        }
        self.data.fill(color.word());
        if color == Color::Black {
            self.clear_padding();
        }
    }

    /// Set every pixel inside `rect` to `color`.
    ///
    /// The rectangle is clipped to the image; an empty intersection is a
    /// no-op.
    pub fn fill_rect(&mut self, rect: Rect, color: Color) {
        let Some(r) = rect.intersect(&self.rect()) else {
            return;
        };
        let (x0, x1) = (r.x as u32, r.right() as u32);
        for y in r.y as u32..r.bottom() as u32 {
            let line = self.row_mut(y);
            match color {
                Color::White => clear_span(line, x0, x1),
                Color::Black => set_span(line, x0, x1),
            }
        }
    }

    /// Set every pixel outside `rect` to `color`.
    pub fn fill_except(&mut self, rect: Rect, color: Color) {
        let Some(r) = rect.intersect(&self.rect()) else {
            self.fill(color);
            return;
        };
        let w = self.width as i32;
        let h = self.height as i32;
        self.fill_rect(Rect::new_unchecked(0, 0, w, r.y), color);
        self.fill_rect(Rect::new_unchecked(0, r.bottom(), w, h - r.bottom()), color);
        self.fill_rect(Rect::new_unchecked(0, r.y, r.x, r.h), color);
        self.fill_rect(
            Rect::new_unchecked(r.right(), r.y, w - r.right(), r.h),
            color,
        );
    }

    /// Invert all pixels in place.
    pub fn invert(&mut self) {
        if self.is_null() {
            return;
        }
        for word in &mut self.data {
            *word = !*word;
        }
        self.clear_padding();
    }

    /// Return an inverted copy.
    pub fn inverted(&self) -> BinaryImage {
        let mut img = self.clone();
        img.invert();
        img
    }

    /// Count black pixels.
    pub fn count_black_pixels(&self) -> u64 {
        // Padding bits are always clear.
        self.data.iter().map(|w| u64::from(w.count_ones())).sum()
    }

    /// Count white pixels.
    pub fn count_white_pixels(&self) -> u64 {
        self.width as u64 * self.height as u64 - self.count_black_pixels()
    }

    /// Count black pixels inside `rect`, clipped to the image.
    pub fn count_black_pixels_in_rect(&self, rect: Rect) -> u64 {
        let Some(r) = rect.intersect(&self.rect()) else {
            return 0;
        };
        let (x0, x1) = (r.x as u32, r.right() as u32);
        let mut count = 0u64;
        for y in r.y as u32..r.bottom() as u32 {
            let line = self.row(y);
            for wi in (x0 >> 5)..=((x1 - 1) >> 5) {
                let bits = line[wi as usize] & span_mask(x0, x1, wi);
                count += u64::from(bits.count_ones());
            }
        }
        count
    }

    /// Count white pixels inside `rect`, clipped to the image.
    pub fn count_white_pixels_in_rect(&self, rect: Rect) -> u64 {
        let Some(r) = rect.intersect(&self.rect()) else {
            return 0;
        };
        r.area() as u64 - self.count_black_pixels_in_rect(r)
    }

    /// Tight bounding rectangle of all pixels of `content_color`.
    ///
    /// Returns an empty rectangle if there are none.
    pub fn content_bounding_box(&self, content_color: Color) -> Rect {
        if self.is_null() {
            return Rect::default();
        }

        let flip = content_color.word();
        let end_mask = row_end_mask(self.width);
        let last = self.wpl as usize - 1;
        let content_word = |line: &[u32], wi: usize| -> u32 {
            let w = !(line[wi] ^ flip);
            if wi == last { w & end_mask } else { w }
        };

        let mut top = None;
        let mut bottom = 0;
        let mut left = u32::MAX;
        let mut right = 0;
        for y in 0..self.height {
            let line = self.row(y);
            let mut row_has_content = false;
            for wi in 0..self.wpl as usize {
                let w = content_word(line, wi);
                if w == 0 {
                    continue;
                }
                row_has_content = true;
                let base = wi as u32 * WORD_BITS;
                left = left.min(base + w.leading_zeros());
                right = right.max(base + WORD_BITS - w.trailing_zeros());
            }
            if row_has_content {
                top.get_or_insert(y);
                bottom = y + 1;
            }
        }

        match top {
            Some(top) => Rect::new_unchecked(
                left as i32,
                top as i32,
                (right - left) as i32,
                (bottom - top) as i32,
            ),
            None => Rect::default(),
        }
    }

    /// Render as an ASCII picture with `X` for black and `.` for white.
    ///
    /// The result parses back with [`BinaryImage::from_ascii`].
    pub fn to_ascii(&self) -> String {
        let mut out = String::with_capacity((self.width as usize + 1) * self.height as usize);
        for y in 0..self.height {
            let line = self.row(y);
            for x in 0..self.width {
                out.push(if get_data_bit(line, x) != 0 { 'X' } else { '.' });
            }
            out.push('\n');
        }
        out
    }

    /// Zero the bits past `width` in the last word of every row.
    fn clear_padding(&mut self) {
        let mask = row_end_mask(self.width);
        if mask == u32::MAX || self.wpl == 0 {
            return;
        }
        let wpl = self.wpl as usize;
        for line in self.data.chunks_exact_mut(wpl) {
            line[wpl - 1] &= mask;
        }
    }
}

impl PartialEq for BinaryImage {
    fn eq(&self, other: &Self) -> bool {
        if self.width != other.width || self.height != other.height {
            return false;
        }
        if self.is_null() {
            return true;
        }

        let wpl = self.wpl as usize;
        let end_mask = row_end_mask(self.width);
        self.data
            .chunks_exact(wpl)
            .zip(other.data.chunks_exact(wpl))
            .all(|(a, b)| {
                a[..wpl - 1] == b[..wpl - 1] && (a[wpl - 1] ^ b[wpl - 1]) & end_mask == 0
            })
    }
}

impl Eq for BinaryImage {}

impl fmt::Debug for BinaryImage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "BinaryImage {}x{}", self.width, self.height)?;
        f.write_str(&self.to_ascii())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_null_image() {
        let mut img = BinaryImage::null();
        assert!(img.is_null());
        assert_eq!(img.size(), Size::new(0, 0));
        img.fill(Color::Black);
        img.invert();
        assert!(img.is_null());
        assert_eq!(img.count_black_pixels(), 0);
        assert!(img.content_bounding_box(Color::Black).is_empty());

        assert!(BinaryImage::new(0, 10).is_null());
        assert!(BinaryImage::new(10, 0).is_null());
        assert_eq!(BinaryImage::new(0, 10), BinaryImage::new(0, 10));
    }

    #[test]
    fn test_new_is_white() {
        let img = BinaryImage::new(33, 2);
        assert_eq!(img.wpl(), 2);
        assert_eq!(img.count_white_pixels(), 66);
        assert_eq!(img.rect(), Rect::new_unchecked(0, 0, 33, 2));
    }

    #[test]
    fn test_fill_black_keeps_padding_clear() {
        let img = BinaryImage::with_color(33, 2, Color::Black);
        assert_eq!(img.count_black_pixels(), 66);
        assert_eq!(img.row(0)[1], 0x8000_0000);
    }

    #[test]
    fn test_equality_ignores_padding() {
        let a = BinaryImage::from_words(4, 1, vec![0xF000_0000]).unwrap();
        let mut b = a.clone();
        // Dirty the padding directly.
        b.row_mut(0)[0] |= 0x0000_00FF;
        assert_eq!(a, b);
        b.set_pixel(0, 0, Color::White).unwrap();
        assert_ne!(a, b);
    }

    #[test]
    fn test_clone_is_deep() {
        let a = BinaryImage::new(10, 10);
        let mut b = a.clone();
        b.set_pixel(3, 3, Color::Black).unwrap();
        assert_eq!(a.get_pixel(3, 3), Some(Color::White));
        assert_eq!(b.get_pixel(3, 3), Some(Color::Black));
    }

    #[test]
    fn test_set_pixel_bounds() {
        let mut img = BinaryImage::new(5, 5);
        assert!(img.set_pixel(5, 0, Color::Black).is_err());
        assert!(img.set_pixel(0, 5, Color::Black).is_err());
        assert_eq!(img.get_pixel(5, 0), None);
    }

    #[test]
    fn test_from_pixels_length_mismatch() {
        let err = BinaryImage::from_pixels(3, 3, &[0; 8]).unwrap_err();
        assert_eq!(
            err,
            Error::DataLengthMismatch {
                expected: 9,
                actual: 8
            }
        );
    }

    #[test]
    fn test_from_words_clears_padding() {
        let img = BinaryImage::from_words(1, 1, vec![u32::MAX]).unwrap();
        assert_eq!(img.data(), &[0x8000_0000]);
        assert!(BinaryImage::from_words(40, 1, vec![0]).is_err());
    }

    #[test]
    fn test_ascii_roundtrip() {
        let img = BinaryImage::from_ascii(
            "
            X..X
            .XX.
            ",
        )
        .unwrap();
        assert_eq!(img.size(), Size::new(4, 2));
        assert_eq!(img.to_ascii(), "X..X\n.XX.\n");
        assert_eq!(BinaryImage::from_ascii(&img.to_ascii()).unwrap(), img);
    }

    #[test]
    fn test_ascii_errors() {
        assert!(matches!(
            BinaryImage::from_ascii("XX\nX"),
            Err(Error::RaggedRows { row: 1, .. })
        ));
        assert!(matches!(
            BinaryImage::from_ascii("X?"),
            Err(Error::InvalidPixelChar { ch: '?', .. })
        ));
        assert!(BinaryImage::from_ascii("").unwrap().is_null());
    }

    #[test]
    fn test_ascii_space_inside_row() {
        assert_eq!(
            BinaryImage::from_ascii("X X\nXXX"),
            Err(Error::InvalidPixelChar {
                ch: ' ',
                row: 0,
                col: 1
            })
        );
    }

    #[test]
    fn test_ascii_indent() {
        let img = BinaryImage::from_ascii("\tXX\n\t.X").unwrap();
        assert_eq!(img, BinaryImage::from_ascii("XX\n.X").unwrap());

        // Only ASCII spaces and tabs count as indentation.
        assert!(matches!(
            BinaryImage::from_ascii(" X\n\u{3000}X"),
            Err(Error::InvalidPixelChar { .. })
        ));
        assert!(matches!(
            BinaryImage::from_ascii("\u{3000}X\n\u{3000}X"),
            Err(Error::InvalidPixelChar { ch: '\u{3000}', .. })
        ));
    }

    #[test]
    fn test_fill_rect_and_except() {
        let mut img = BinaryImage::new(40, 4);
        img.fill_rect(Rect::new_unchecked(30, 1, 5, 2), Color::Black);
        assert_eq!(img.count_black_pixels(), 10);
        assert_eq!(
            img.content_bounding_box(Color::Black),
            Rect::new_unchecked(30, 1, 5, 2)
        );

        let mut other = BinaryImage::new(40, 4);
        other.fill_except(Rect::new_unchecked(30, 1, 5, 2), Color::Black);
        assert_eq!(other, img.inverted());

        // Clipped to the image.
        img.fill_rect(Rect::new_unchecked(-5, -5, 100, 100), Color::White);
        assert_eq!(img.count_black_pixels(), 0);
    }

    #[test]
    fn test_count_in_rect() {
        let img = BinaryImage::with_color(70, 3, Color::Black);
        assert_eq!(
            img.count_black_pixels_in_rect(Rect::new_unchecked(30, 0, 40, 2)),
            80
        );
        assert_eq!(
            img.count_white_pixels_in_rect(Rect::new_unchecked(60, 0, 20, 3)),
            0
        );
    }

    #[test]
    fn test_content_bounding_box_white() {
        let mut img = BinaryImage::with_color(36, 5, Color::Black);
        img.set_pixel(34, 4, Color::White).unwrap();
        img.set_pixel(2, 1, Color::White).unwrap();
        assert_eq!(
            img.content_bounding_box(Color::White),
            Rect::new_unchecked(2, 1, 33, 4)
        );
    }
}
