//! bitraster-region - Connected component extraction
//!
//! This crate enumerates the connected components of a [`BinaryImage`]:
//!
//! - [`ConnCompEraser`] - returns one component per call, erasing it from a
//!   private working copy
//! - [`ConnCompEraserExt`] - additionally produces an image of each
//!   component, cropped or word-aligned
//! - [`find_conn_comps`] and friends - whole-image passes built on the
//!   erasers, including small-component removal
//!
//! # Examples
//!
//! ```
//! use bitraster_core::BinaryImage;
//! use bitraster_region::{ConnCompEraserExt, Connectivity};
//!
//! let img = BinaryImage::from_ascii("XX...\n....X\n...XX").unwrap();
//!
//! let mut eraser = ConnCompEraserExt::new(&img, Connectivity::Conn4);
//! let mut sizes = Vec::new();
//! loop {
//!     let cc = eraser.next_conn_comp();
//!     if cc.is_null() {
//!         break;
//!     }
//!     sizes.push(eraser.compute_conn_comp_image().size());
//! }
//! assert_eq!(sizes.len(), 2);
//! ```
//!
//! [`BinaryImage`]: bitraster_core::BinaryImage

pub mod collect;
pub mod conncomp;
pub mod eraser;
pub mod eraser_ext;
pub mod error;

// Re-export core types
pub use bitraster_core;

// Re-export error types
pub use error::{RegionError, RegionResult};

pub use collect::{count_conn_comps, extract_conn_comps, find_conn_comps, remove_small_conn_comps};
pub use conncomp::{ConnComp, Connectivity};
pub use eraser::ConnCompEraser;
pub use eraser_ext::ConnCompEraserExt;
