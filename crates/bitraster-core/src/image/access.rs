//! Bit access primitives
//!
//! Low-level functions operating on one packed row of a binary image.
//! All partial-word masking lives here; the raster-op and component layers
//! go through these helpers rather than touching the bit layout themselves.
//!
//! # Pixel packing
//!
//! Pixels are packed MSB-to-LSB within each 32-bit word: column 0 occupies
//! bit 31 of the first word of the row. A set bit is a black pixel.
//! Bits past the image width in the last word of a row are padding and are
//! kept at zero.

/// Number of pixels per storage word.
pub const WORD_BITS: u32 = 32;

/// Get a 1-bit pixel value.
#[inline]
pub fn get_data_bit(line: &[u32], x: u32) -> u32 {
    (line[(x >> 5) as usize] >> (31 - (x & 31))) & 1
}

/// Set a 1-bit pixel to `val & 1`.
#[inline]
pub fn set_data_bit(line: &mut [u32], x: u32, val: u32) {
    if val & 1 != 0 {
        set_data_bit_val(line, x);
    } else {
        clear_data_bit(line, x);
    }
}

/// Set a 1-bit pixel to 1.
#[inline]
pub fn set_data_bit_val(line: &mut [u32], x: u32) {
    line[(x >> 5) as usize] |= 0x8000_0000 >> (x & 31);
}

/// Clear a 1-bit pixel to 0.
#[inline]
pub fn clear_data_bit(line: &mut [u32], x: u32) {
    line[(x >> 5) as usize] &= !(0x8000_0000 >> (x & 31));
}

/// Mask with the `n` most significant bits set (`n <= 32`).
#[inline]
pub fn lmask32(n: u32) -> u32 {
    if n == 0 { 0 } else { u32::MAX << (32 - n) }
}

/// Mask with the `n` least significant bits set (`n <= 32`).
#[inline]
pub fn rmask32(n: u32) -> u32 {
    if n == 0 { 0 } else { u32::MAX >> (32 - n) }
}

/// Mask of the pixel bits in the last word of a row of the given width.
#[inline]
pub fn row_end_mask(width: u32) -> u32 {
    match width & 31 {
        0 => u32::MAX,
        r => lmask32(r),
    }
}

/// Bits of word `word_index` that fall inside the column span `[x0, x1)`.
#[inline]
pub fn span_mask(x0: u32, x1: u32, word_index: u32) -> u32 {
    let base = word_index * WORD_BITS;
    let lo = x0.max(base) - base;
    let hi = x1.min(base + WORD_BITS).saturating_sub(base);
    if hi <= lo {
        return 0;
    }
    lmask32(hi) & !lmask32(lo)
}

/// Word `idx` of a row, with everything outside the row reading as zero.
#[inline]
fn word_at(line: &[u32], width: u32, idx: i64) -> u32 {
    if idx < 0 || idx >= line.len() as i64 {
        return 0;
    }
    let word = line[idx as usize];
    if idx == line.len() as i64 - 1 {
        word & row_end_mask(width)
    } else {
        word
    }
}

/// Fetch 32 pixels starting at column `bit_x`, packed MSB first.
///
/// `bit_x` may be negative or past the end of the row; columns outside
/// `[0, width)` read as white.
#[inline]
pub fn fetch_word(line: &[u32], width: u32, bit_x: i64) -> u32 {
    let idx = bit_x.div_euclid(WORD_BITS as i64);
    let shift = bit_x.rem_euclid(WORD_BITS as i64) as u32;
    let w0 = word_at(line, width, idx);
    if shift == 0 {
        return w0;
    }
    let w1 = word_at(line, width, idx + 1);
    (w0 << shift) | (w1 >> (WORD_BITS - shift))
}

/// First black column in `[from, to)`, scanning a word at a time.
pub fn next_black(line: &[u32], from: u32, to: u32) -> Option<u32> {
    let mut x = from;
    while x < to {
        let wi = x >> 5;
        let word = line[wi as usize] & (u32::MAX >> (x & 31));
        if word != 0 {
            let pos = wi * WORD_BITS + word.leading_zeros();
            return (pos < to).then_some(pos);
        }
        x = (wi + 1) * WORD_BITS;
    }
    None
}

/// First white column at or after `x`, or `width` if the run reaches the
/// end of the row.
pub fn run_end(line: &[u32], x: u32, width: u32) -> u32 {
    let mut x = x;
    while x < width {
        let wi = x >> 5;
        let word = !line[wi as usize] & (u32::MAX >> (x & 31));
        if word != 0 {
            return (wi * WORD_BITS + word.leading_zeros()).min(width);
        }
        x = (wi + 1) * WORD_BITS;
    }
    width
}

/// Leftmost column of the black run that contains column `x`.
///
/// `x` itself is assumed to be black.
pub fn run_start(line: &[u32], x: u32) -> u32 {
    let mut wi = x >> 5;
    let mut mask = lmask32((x & 31) + 1);
    loop {
        let white = !line[wi as usize] & mask;
        if white != 0 {
            // Rightmost white column left of x; the run starts just after it.
            return wi * WORD_BITS + (WORD_BITS - white.trailing_zeros());
        }
        if wi == 0 {
            return 0;
        }
        wi -= 1;
        mask = u32::MAX;
    }
}

/// Clear all pixels in the column span `[x0, x1)`.
pub fn clear_span(line: &mut [u32], x0: u32, x1: u32) {
    if x0 >= x1 {
        return;
    }
    for wi in (x0 >> 5)..=((x1 - 1) >> 5) {
        line[wi as usize] &= !span_mask(x0, x1, wi);
    }
}

/// Set all pixels in the column span `[x0, x1)`.
pub fn set_span(line: &mut [u32], x0: u32, x1: u32) {
    if x0 >= x1 {
        return;
    }
    for wi in (x0 >> 5)..=((x1 - 1) >> 5) {
        line[wi as usize] |= span_mask(x0, x1, wi);
    }
}
