//! bitraster-test - Regression test framework for bitraster
//!
//! This crate provides a small regression test harness in the spirit of
//! Leptonica's `regutils.c`, plus builders for test images:
//!
//! - [`RegParams`] counts checks, records failures and reports at the end
//! - [`image_from_bits`] / [`image_from_ascii`] build images from literals
//! - [`random_image`] builds reproducible noise images
//! - [`init_logging`] routes the library's `log` output to the test harness
//!
//! # Usage
//!
//! ```
//! use bitraster_test::{RegParams, image_from_ascii};
//!
//! let img = image_from_ascii("X.X\n.X.");
//! let mut rp = RegParams::new("example");
//! rp.compare_values(3.0, img.count_black_pixels() as f64, 0.0);
//! assert!(rp.cleanup());
//! ```
//!
//! # Environment Variables
//!
//! - `REGTEST_MODE`: Set to "compare" (default) or "display"
//! - `RUST_LOG`: Log filter picked up by [`init_logging`]

mod error;
mod params;

pub use error::{TestError, TestResult};
pub use params::{RegParams, RegTestMode};

use bitraster_core::BinaryImage;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Build an image from one value per pixel, row-major; non-zero is black.
///
/// # Panics
///
/// Panics if `bits.len() != width * height`.
pub fn image_from_bits(bits: &[u8], width: u32, height: u32) -> BinaryImage {
    BinaryImage::from_pixels(width, height, bits)
        .unwrap_or_else(|e| panic!("bad test image literal: {}", e))
}

/// Build an image from an ASCII picture (see [`BinaryImage::from_ascii`]).
///
/// # Panics
///
/// Panics if the picture is malformed.
pub fn image_from_ascii(text: &str) -> BinaryImage {
    BinaryImage::from_ascii(text).unwrap_or_else(|e| panic!("bad test image picture: {}", e))
}

/// Build a reproducible random image.
///
/// Each pixel is black with probability `density`.
///
/// # Errors
///
/// Returns [`TestError::InvalidParameter`] if `density` is not in `[0, 1]`.
pub fn random_image(width: u32, height: u32, density: f64, seed: u64) -> TestResult<BinaryImage> {
    if !(0.0..=1.0).contains(&density) {
        return Err(TestError::InvalidParameter(format!(
            "density must be in [0, 1], got {}",
            density
        )));
    }

    let mut rng = StdRng::seed_from_u64(seed);
    let pixels: Vec<u8> = (0..width as usize * height as usize)
        .map(|_| u8::from(rng.random_bool(density)))
        .collect();
    Ok(BinaryImage::from_pixels(width, height, &pixels)?)
}

/// Initialize `env_logger` for tests.
///
/// Safe to call from every test; only the first call installs the logger.
pub fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_random_image_is_reproducible() {
        let a = random_image(70, 20, 0.4, 7).unwrap();
        let b = random_image(70, 20, 0.4, 7).unwrap();
        assert_eq!(a, b);
        assert!(random_image(4, 4, 1.5, 0).is_err());
    }

    #[test]
    fn test_random_image_extremes() {
        assert_eq!(random_image(33, 3, 0.0, 1).unwrap().count_black_pixels(), 0);
        assert_eq!(random_image(33, 3, 1.0, 1).unwrap().count_black_pixels(), 99);
    }

    #[test]
    fn test_image_from_bits() {
        let img = image_from_bits(&[1, 0, 0, 1], 2, 2);
        assert_eq!(img, image_from_ascii("X.\n.X"));
    }
}
