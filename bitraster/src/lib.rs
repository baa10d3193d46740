//! bitraster - Binary image raster algebra and connected components
//!
//! # Overview
//!
//! - Bit-packed two-color images with word-level raster operations
//! - Destructive connected component enumeration (4- and 8-connectivity)
//! - Per-component images, cropped or aligned to a word boundary
//!
//! # Example
//!
//! ```
//! use bitraster::BinaryImage;
//! use bitraster::region::{Connectivity, extract_conn_comps};
//!
//! let img = BinaryImage::from_ascii("X..X\n.X.X").unwrap();
//! let parts = extract_conn_comps(&img, Connectivity::Conn8);
//! assert_eq!(parts.len(), 2);
//! assert_eq!(parts[1].1.width(), 1);
//! ```

// Re-export core types (primary data structures used everywhere)
pub use bitraster_core::*;

// Re-export domain crates as modules to avoid name conflicts
pub use bitraster_region as region;
