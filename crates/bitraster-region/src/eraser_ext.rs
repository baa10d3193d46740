//! Connected component eraser with component images
//!
//! [`ConnCompEraserExt`] returns the same components as [`ConnCompEraser`]
//! and can additionally produce an image of the component it just erased.
//! It keeps a second copy of the image as it was before the last erasure;
//! the component is the difference between that copy and the working copy
//! inside the component's bounding rectangle.

use crate::conncomp::{ConnComp, Connectivity};
use crate::eraser::ConnCompEraser;
use crate::error::{RegionError, RegionResult};
use bitraster_core::{
    BinaryImage, Point, Rect, RopDst, RopSrc, RopXor, WORD_BITS, raster_op, try_raster_op,
};

/// Connected component eraser that can materialize each component
///
/// # Examples
///
/// ```
/// use bitraster_core::BinaryImage;
/// use bitraster_region::{ConnCompEraserExt, Connectivity};
///
/// let img = BinaryImage::from_ascii("..XX\n...X").unwrap();
/// let mut eraser = ConnCompEraserExt::new(&img, Connectivity::Conn4);
///
/// let cc = eraser.next_conn_comp();
/// assert!(!cc.is_null());
/// let comp = eraser.compute_conn_comp_image();
/// assert_eq!(comp, BinaryImage::from_ascii("XX\n.X").unwrap());
///
/// // Left edge moved back to column 0, a word boundary.
/// let aligned = eraser.compute_conn_comp_image_aligned();
/// assert_eq!(aligned.width(), 4);
/// ```
#[derive(Debug, Clone)]
pub struct ConnCompEraserExt {
    eraser: ConnCompEraser,
    /// The working copy as it was before `last_cc` was erased.
    last_image: BinaryImage,
    last_cc: ConnComp,
}

impl ConnCompEraserExt {
    /// Create an eraser over a private copy of `image`.
    pub fn new(image: &BinaryImage, connectivity: Connectivity) -> Self {
        Self {
            eraser: ConnCompEraser::new(image, connectivity),
            last_image: image.clone(),
            last_cc: ConnComp::null(),
        }
    }

    /// Find and erase the next component.
    ///
    /// See [`ConnCompEraser::next_conn_comp`].
    pub fn next_conn_comp(&mut self) -> ConnComp {
        if !self.last_cc.is_null() {
            // Bring the before-image up to date with the previous erasure.
            let r = self.last_cc.rect();
            raster_op(
                &mut self.last_image,
                r,
                self.eraser.image(),
                r.top_left(),
                RopSrc,
            );
        }
        self.last_cc = self.eraser.next_conn_comp();
        self.last_cc
    }

    /// The component most recently returned by `next_conn_comp`.
    pub fn last_conn_comp(&self) -> ConnComp {
        self.last_cc
    }

    /// The working copy: the source minus every component returned so far.
    pub fn image(&self) -> &BinaryImage {
        self.eraser.image()
    }

    /// The connectivity this eraser was created with.
    pub fn connectivity(&self) -> Connectivity {
        self.eraser.connectivity()
    }

    /// Image of the last component, cropped to its bounding rectangle.
    ///
    /// # Errors
    ///
    /// Returns [`RegionError::NoCurrentComponent`] if the last call to
    /// `next_conn_comp` returned the null component or there was none.
    pub fn try_compute_conn_comp_image(&self) -> RegionResult<BinaryImage> {
        self.component_image(0)
    }

    /// Image of the last component, cropped to its bounding rectangle.
    ///
    /// # Panics
    ///
    /// Panics if there is no current component.
    pub fn compute_conn_comp_image(&self) -> BinaryImage {
        self.try_compute_conn_comp_image()
            .unwrap_or_else(|e| panic!("compute_conn_comp_image: {}", e))
    }

    /// Image of the last component, padded on the left to a word boundary.
    ///
    /// The image has `rect.x % 32` white columns before the component, so its
    /// column 0 corresponds to source column `rect.x - rect.x % 32`. Placing
    /// it at that column reproduces the component at its original position.
    ///
    /// # Errors
    ///
    /// Returns [`RegionError::NoCurrentComponent`] if there is no current
    /// component.
    pub fn try_compute_conn_comp_image_aligned(&self) -> RegionResult<BinaryImage> {
        if self.last_cc.is_null() {
            return Err(RegionError::NoCurrentComponent);
        }
        let pad = self.last_cc.left().rem_euclid(WORD_BITS as i32);
        self.component_image(pad)
    }

    /// Image of the last component, padded on the left to a word boundary.
    ///
    /// # Panics
    ///
    /// Panics if there is no current component.
    pub fn compute_conn_comp_image_aligned(&self) -> BinaryImage {
        self.try_compute_conn_comp_image_aligned()
            .unwrap_or_else(|e| panic!("compute_conn_comp_image_aligned: {}", e))
    }

    /// The last component with `pad` white columns on the left.
    fn component_image(&self, pad: i32) -> RegionResult<BinaryImage> {
        if self.last_cc.is_null() {
            return Err(RegionError::NoCurrentComponent);
        }

        let r = self.last_cc.rect();
        let mut img = BinaryImage::new((r.w + pad) as u32, r.h as u32);
        let full: Rect = img.rect();
        let origin = Point::new(r.x - pad, r.y);
        try_raster_op(&mut img, full, &self.last_image, origin, RopSrc)?;
        try_raster_op(
            &mut img,
            full,
            self.eraser.image(),
            origin,
            RopXor(RopSrc, RopDst),
        )?;
        Ok(img)
    }
}
