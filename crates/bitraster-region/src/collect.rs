//! Whole-image component passes built on the erasers

use crate::conncomp::{ConnComp, Connectivity};
use crate::eraser::ConnCompEraser;
use crate::eraser_ext::ConnCompEraserExt;
use bitraster_core::{BinaryImage, Point, RopDst, RopSrc, RopSubtract, WORD_BITS, raster_op};
use log::debug;

/// Find all connected components, in seed order.
pub fn find_conn_comps(pix: &BinaryImage, connectivity: Connectivity) -> Vec<ConnComp> {
    ConnCompEraser::new(pix, connectivity).collect()
}

/// Count connected components.
pub fn count_conn_comps(pix: &BinaryImage, connectivity: Connectivity) -> usize {
    ConnCompEraser::new(pix, connectivity).count()
}

/// Find all connected components together with their cropped images.
pub fn extract_conn_comps(
    pix: &BinaryImage,
    connectivity: Connectivity,
) -> Vec<(ConnComp, BinaryImage)> {
    let mut eraser = ConnCompEraserExt::new(pix, connectivity);
    let mut out = Vec::new();
    loop {
        let cc = eraser.next_conn_comp();
        if cc.is_null() {
            break;
        }
        out.push((cc, eraser.compute_conn_comp_image()));
    }
    out
}

/// Remove every component with fewer than `min_pixels` pixels.
///
/// Larger components are left untouched, even where their bounding boxes
/// overlap removed ones.
pub fn remove_small_conn_comps(
    pix: &BinaryImage,
    connectivity: Connectivity,
    min_pixels: u64,
) -> BinaryImage {
    let mut out = pix.clone();
    let mut eraser = ConnCompEraserExt::new(pix, connectivity);
    let mut removed = 0usize;

    loop {
        let cc = eraser.next_conn_comp();
        if cc.is_null() {
            break;
        }
        if cc.pixel_count() >= min_pixels {
            continue;
        }

        // Word-aligned source rows keep the subtraction shift-free.
        let comp = eraser.compute_conn_comp_image_aligned();
        let pad = cc.left().rem_euclid(WORD_BITS as i32);
        raster_op(
            &mut out,
            cc.rect(),
            &comp,
            Point::new(pad, 0),
            RopSubtract(RopDst, RopSrc),
        );
        removed += 1;
    }

    debug!(
        "removed {} components smaller than {} pixels",
        removed, min_pixels
    );
    out
}
