//! Connected component partition regression test
//!
//! Runs the erasers over reproducible random images of several sizes and
//! densities and checks that the extracted components partition the
//! foreground exactly, that the sequence is deterministic, and that
//! 8-connectivity never splits a 4-connected component.
//!
//! Run with:
//! ```
//! cargo test -p bitraster-region --test conncomp_partition_reg
//! ```

use bitraster_core::{BinaryImage, Color, Point, RopDst, RopOr, RopSrc, raster_op};
use bitraster_region::{
    ConnComp, ConnCompEraser, ConnCompEraserExt, Connectivity, count_conn_comps, extract_conn_comps,
    find_conn_comps, remove_small_conn_comps,
};
use bitraster_test::{RegParams, init_logging, random_image};

/// (width, height, density, seed)
const CASES: [(u32, u32, f64, u64); 6] = [
    (1, 1, 1.0, 0),
    (31, 17, 0.3, 1),
    (32, 32, 0.5, 2),
    (67, 23, 0.45, 3),
    (130, 41, 0.6, 4),
    (200, 9, 0.55, 5),
];

/// Reassemble the foreground from per-component images, counting overlaps.
fn reassemble(size: (u32, u32), parts: &[(ConnComp, BinaryImage)]) -> (BinaryImage, u64) {
    let mut union = BinaryImage::new(size.0, size.1);
    let mut overlap = 0u64;
    for (cc, img) in parts {
        overlap += count_and(&union, cc.rect().top_left(), img);
        raster_op(&mut union, cc.rect(), img, Point::origin(), RopOr(RopSrc, RopDst));
    }
    (union, overlap)
}

/// Black pixels shared by `img` and the region of `base` it would cover.
fn count_and(base: &BinaryImage, at: Point, img: &BinaryImage) -> u64 {
    let mut n = 0u64;
    for y in 0..img.height() {
        for x in 0..img.width() {
            let bx = (at.x + x as i32) as u32;
            let by = (at.y + y as i32) as u32;
            if img.get_pixel(x, y) == Some(Color::Black)
                && base.get_pixel(bx, by) == Some(Color::Black)
            {
                n += 1;
            }
        }
    }
    n
}

#[test]
fn conncomp_partition_reg() {
    init_logging();
    let mut rp = RegParams::new("conncomp_partition");

    for &(w, h, density, seed) in &CASES {
        let img = random_image(w, h, density, seed).unwrap();
        for connectivity in [Connectivity::Conn4, Connectivity::Conn8] {
            let parts = extract_conn_comps(&img, connectivity);

            // Every component is non-empty, tight and counted correctly.
            for (cc, cimg) in &parts {
                rp.compare_values(
                    cc.pixel_count() as f64,
                    cimg.count_black_pixels() as f64,
                    0.0,
                );
                rp.compare_values(
                    0.0,
                    (cimg.content_bounding_box(Color::Black) != cimg.rect()) as u8 as f64,
                    0.0,
                );
            }

            // Union reconstructs the foreground; nothing is shared.
            let (union, overlap) = reassemble((w, h), &parts);
            rp.compare_images(&img, &union);
            rp.compare_values(0.0, overlap as f64, 0.0);
            let total: u64 = parts.iter().map(|(cc, _)| cc.pixel_count()).sum();
            rp.compare_values(img.count_black_pixels() as f64, total as f64, 0.0);
        }
    }

    assert!(rp.cleanup(), "conncomp_partition regression test failed");
}

#[test]
fn conncomp_working_copy_reg() {
    let mut rp = RegParams::new("conncomp_working_copy");
    let img = random_image(90, 30, 0.4, 11).unwrap();

    // After each step the working copy equals the source minus the
    // components returned so far.
    let mut eraser = ConnCompEraserExt::new(&img, Connectivity::Conn4);
    let mut removed = BinaryImage::new(90, 30);
    loop {
        let cc = eraser.next_conn_comp();
        if cc.is_null() {
            break;
        }
        let cimg = eraser.compute_conn_comp_image();
        raster_op(&mut removed, cc.rect(), &cimg, Point::origin(), RopOr(RopSrc, RopDst));
        rp.compare_images(&img.subtract(&removed).unwrap(), eraser.image());
    }
    rp.compare_images(&img, &removed);

    assert!(rp.cleanup(), "conncomp_working_copy regression test failed");
}

#[test]
fn conncomp_determinism_reg() {
    let mut rp = RegParams::new("conncomp_determinism");

    for &(w, h, density, seed) in &CASES {
        let img = random_image(w, h, density, seed).unwrap();
        for connectivity in [Connectivity::Conn4, Connectivity::Conn8] {
            let a: Vec<ConnComp> = ConnCompEraser::new(&img, connectivity).collect();
            let b = find_conn_comps(&img, connectivity);
            rp.compare_strings(format!("{:?}", a).as_bytes(), format!("{:?}", b).as_bytes());

            // Seeds strictly increase in row-major order.
            let ordered = a
                .windows(2)
                .all(|p| (p[0].seed().y, p[0].seed().x) < (p[1].seed().y, p[1].seed().x));
            rp.compare_values(1.0, ordered as u8 as f64, 0.0);
        }
    }

    assert!(rp.cleanup(), "conncomp_determinism regression test failed");
}

#[test]
fn conncomp_conn8_coarsens_conn4_reg() {
    let mut rp = RegParams::new("conncomp_conn8_coarsens");

    for &(w, h, density, seed) in &CASES {
        let img = random_image(w, h, density, seed).unwrap();
        let n4 = count_conn_comps(&img, Connectivity::Conn4);
        let n8 = count_conn_comps(&img, Connectivity::Conn8);
        rp.compare_values(1.0, (n8 <= n4) as u8 as f64, 0.0);

        // Each 4-component lies entirely inside one 8-component.
        let parts8 = extract_conn_comps(&img, Connectivity::Conn8);
        for (cc4, img4) in extract_conn_comps(&img, Connectivity::Conn4) {
            let containing = parts8
                .iter()
                .filter(|(cc8, img8)| {
                    let at = Point::new(cc4.left() - cc8.left(), cc4.top() - cc8.top());
                    cc8.rect().contains_rect(&cc4.rect())
                        && count_and(img8, at, &img4) == cc4.pixel_count()
                })
                .count();
            rp.compare_values(1.0, containing as f64, 0.0);
        }
    }

    assert!(rp.cleanup(), "conncomp_conn8_coarsens regression test failed");
}

#[test]
fn conncomp_alignment_law_reg() {
    let mut rp = RegParams::new("conncomp_alignment_law");
    let img = random_image(150, 20, 0.35, 21).unwrap();

    let mut eraser = ConnCompEraserExt::new(&img, Connectivity::Conn8);
    loop {
        let cc = eraser.next_conn_comp();
        if cc.is_null() {
            break;
        }
        let cropped = eraser.compute_conn_comp_image();
        let aligned = eraser.compute_conn_comp_image_aligned();
        let pad = (cc.left() % 32) as u32;

        rp.compare_values((cropped.width() + pad) as f64, aligned.width() as f64, 0.0);

        // Rightmost columns reproduce the cropped image.
        let mut tail = BinaryImage::new(cropped.width(), cropped.height());
        let r = tail.rect();
        raster_op(&mut tail, r, &aligned, Point::new(pad as i32, 0), RopSrc);
        rp.compare_images(&cropped, &tail);

        // Pad columns are white.
        let pad_rect = bitraster_core::Rect::new_unchecked(0, 0, pad as i32, cc.height());
        rp.compare_values(0.0, aligned.count_black_pixels_in_rect(pad_rect) as f64, 0.0);

        // Placed at the word-aligned column, the aligned image lands on the
        // component's original pixels.
        let mut placed = BinaryImage::new(img.width(), img.height());
        let dst = bitraster_core::Rect::new_unchecked(
            cc.left() - pad as i32,
            cc.top(),
            aligned.width() as i32,
            aligned.height() as i32,
        );
        raster_op(&mut placed, dst, &aligned, Point::origin(), RopSrc);
        rp.compare_values(
            cc.pixel_count() as f64,
            count_and(&img, dst.top_left(), &aligned) as f64,
            0.0,
        );
        rp.compare_values(
            cc.pixel_count() as f64,
            placed.count_black_pixels() as f64,
            0.0,
        );
    }

    assert!(rp.cleanup(), "conncomp_alignment_law regression test failed");
}

#[test]
fn conncomp_despeckle_reg() {
    let mut rp = RegParams::new("conncomp_despeckle");
    let img = random_image(120, 40, 0.3, 31).unwrap();

    for min_pixels in [1u64, 2, 3, 8] {
        let cleaned = remove_small_conn_comps(&img, Connectivity::Conn8, min_pixels);

        // Exactly the large components survive, untouched.
        let mut expected = BinaryImage::new(img.width(), img.height());
        for (cc, cimg) in extract_conn_comps(&img, Connectivity::Conn8) {
            if cc.pixel_count() >= min_pixels {
                raster_op(&mut expected, cc.rect(), &cimg, Point::origin(), RopOr(RopSrc, RopDst));
            }
        }
        rp.compare_images(&expected, &cleaned);
    }
    rp.compare_images(&img, &remove_small_conn_comps(&img, Connectivity::Conn4, 1));

    assert!(rp.cleanup(), "conncomp_despeckle regression test failed");
}
