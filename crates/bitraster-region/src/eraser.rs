//! Connected component eraser
//!
//! [`ConnCompEraser`] enumerates the black connected components of an image
//! one at a time. Each call to [`ConnCompEraser::next_conn_comp`] finds the
//! first remaining black pixel in row-major order, flood fills its component
//! to white in a private working copy, and returns the component's bounding
//! rectangle. The returned components therefore partition the foreground of
//! the source image.
//!
//! The fill is a scanline fill driven by an explicit stack of row spans, and
//! works on whole black runs found by word scanning, so its cost is
//! proportional to the number of runs rather than pixels.

use crate::conncomp::{ConnComp, Connectivity};
use bitraster_core::image::{clear_span, next_black, run_end, run_start};
use bitraster_core::{BinaryImage, Point, Rect};
use log::{debug, trace};
use std::iter::FusedIterator;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    HasComponents,
    Exhausted,
}

/// Columns `[x0, x1)` of row `y` that may hold pixels of the current
/// component.
#[derive(Debug, Clone, Copy)]
struct Span {
    y: u32,
    x0: u32,
    x1: u32,
}

/// Bounding box and size accumulated while filling one component.
struct Extent {
    left: u32,
    right: u32,
    top: u32,
    bottom: u32,
    pixels: u64,
}

impl Extent {
    fn new(y: u32) -> Self {
        Self {
            left: u32::MAX,
            right: 0,
            top: y,
            bottom: y + 1,
            pixels: 0,
        }
    }

    fn add_run(&mut self, y: u32, x0: u32, x1: u32) {
        self.left = self.left.min(x0);
        self.right = self.right.max(x1);
        self.top = self.top.min(y);
        self.bottom = self.bottom.max(y + 1);
        self.pixels += u64::from(x1 - x0);
    }

    fn rect(&self) -> Rect {
        Rect::new_unchecked(
            self.left as i32,
            self.top as i32,
            (self.right - self.left) as i32,
            (self.bottom - self.top) as i32,
        )
    }
}

/// Destructive enumerator of connected components
///
/// # Examples
///
/// ```
/// use bitraster_core::BinaryImage;
/// use bitraster_region::{ConnCompEraser, Connectivity};
///
/// let img = BinaryImage::from_ascii("X.X\n.X.").unwrap();
///
/// let comps: Vec<_> = ConnCompEraser::new(&img, Connectivity::Conn4).collect();
/// assert_eq!(comps.len(), 3);
///
/// let comps: Vec<_> = ConnCompEraser::new(&img, Connectivity::Conn8).collect();
/// assert_eq!(comps.len(), 1);
/// ```
#[derive(Debug, Clone)]
pub struct ConnCompEraser {
    image: BinaryImage,
    connectivity: Connectivity,
    state: State,
    /// Where the next seed search resumes; everything before it is white.
    next_x: u32,
    next_y: u32,
    found: usize,
    stack: Vec<Span>,
}

impl ConnCompEraser {
    /// Create an eraser over a private copy of `image`.
    ///
    /// A null image yields an eraser that is exhausted from the start.
    pub fn new(image: &BinaryImage, connectivity: Connectivity) -> Self {
        let state = if image.is_null() {
            State::Exhausted
        } else {
            State::HasComponents
        };
        debug!(
            "conncomp eraser: {}x{} image, {:?}",
            image.width(),
            image.height(),
            connectivity
        );

        Self {
            image: image.clone(),
            connectivity,
            state,
            next_x: 0,
            next_y: 0,
            found: 0,
            stack: Vec::new(),
        }
    }

    /// Find and erase the next component.
    ///
    /// Returns the null component once no black pixels remain, and on every
    /// call after that.
    pub fn next_conn_comp(&mut self) -> ConnComp {
        if self.state == State::Exhausted {
            return ConnComp::null();
        }

        let Some((x, y)) = self.find_seed() else {
            self.state = State::Exhausted;
            debug!("conncomp eraser exhausted after {} components", self.found);
            return ConnComp::null();
        };

        let extent = erase_component(&mut self.image, &mut self.stack, x, y, self.connectivity);
        let cc = ConnComp::new(Point::new(x as i32, y as i32), extent.rect(), extent.pixels);
        self.found += 1;
        trace!(
            "conncomp {}: seed ({}, {}), rect {:?}, {} pixels",
            self.found, x, y, cc.rect(), cc.pixel_count()
        );
        cc
    }

    /// The working copy: the source minus every component returned so far.
    pub fn image(&self) -> &BinaryImage {
        &self.image
    }

    /// The connectivity this eraser was created with.
    pub fn connectivity(&self) -> Connectivity {
        self.connectivity
    }

    /// Whether the eraser has run out of components.
    pub fn is_exhausted(&self) -> bool {
        self.state == State::Exhausted
    }

    /// Number of components returned so far.
    pub fn components_found(&self) -> usize {
        self.found
    }

    fn find_seed(&mut self) -> Option<(u32, u32)> {
        let width = self.image.width();
        for y in self.next_y..self.image.height() {
            let from = if y == self.next_y { self.next_x } else { 0 };
            if let Some(x) = next_black(self.image.row(y), from, width) {
                self.next_x = x;
                self.next_y = y;
                return Some((x, y));
            }
        }
        self.next_y = self.image.height();
        None
    }
}

impl Iterator for ConnCompEraser {
    type Item = ConnComp;

    fn next(&mut self) -> Option<ConnComp> {
        let cc = self.next_conn_comp();
        (!cc.is_null()).then_some(cc)
    }
}

impl FusedIterator for ConnCompEraser {}

/// Clear the component containing the black pixel `(x, y)`.
///
/// `stack` is scratch space; it is empty on return.
fn erase_component(
    image: &mut BinaryImage,
    stack: &mut Vec<Span>,
    x: u32,
    y: u32,
    connectivity: Connectivity,
) -> Extent {
    let width = image.width();
    let height = image.height();
    let reach = connectivity.diagonal_reach();
    let mut extent = Extent::new(y);

    let push_neighbors = |stack: &mut Vec<Span>, y: u32, x0: u32, x1: u32| {
        let x0 = x0.saturating_sub(reach);
        let x1 = (x1 + reach).min(width);
        if y > 0 {
            stack.push(Span { y: y - 1, x0, x1 });
        }
        if y + 1 < height {
            stack.push(Span { y: y + 1, x0, x1 });
        }
    };

    stack.clear();
    stack.push(Span { y, x0: x, x1: x + 1 });

    while let Some(span) = stack.pop() {
        let line = image.row_mut(span.y);
        let mut cx = span.x0;
        while let Some(bx) = next_black(line, cx, span.x1) {
            let rs = run_start(line, bx);
            let re = run_end(line, bx, width);
            clear_span(line, rs, re);
            extent.add_run(span.y, rs, re);
            push_neighbors(stack, span.y, rs, re);
            cx = re;
        }
    }

    extent
}

#[cfg(test)]
mod tests {
    use super::*;
    use bitraster_core::Color;

    #[test]
    fn test_null_image_exhausted() {
        let mut eraser = ConnCompEraser::new(&BinaryImage::null(), Connectivity::Conn4);
        assert!(eraser.is_exhausted());
        assert!(eraser.next_conn_comp().is_null());
        assert!(eraser.next_conn_comp().is_null());
    }

    #[test]
    fn test_white_image() {
        let mut eraser = ConnCompEraser::new(&BinaryImage::new(50, 50), Connectivity::Conn8);
        assert!(!eraser.is_exhausted());
        assert!(eraser.next_conn_comp().is_null());
        assert!(eraser.is_exhausted());
        assert_eq!(eraser.components_found(), 0);
    }

    #[test]
    fn test_full_image_is_one_component() {
        let img = BinaryImage::with_color(70, 40, Color::Black);
        let mut eraser = ConnCompEraser::new(&img, Connectivity::Conn4);
        let cc = eraser.next_conn_comp();
        assert_eq!(cc.rect(), img.rect());
        assert_eq!(cc.pixel_count(), 2800);
        assert_eq!(cc.seed(), Point::new(0, 0));
        assert_eq!(eraser.image().count_black_pixels(), 0);
        assert!(eraser.next_conn_comp().is_null());
    }

    #[test]
    fn test_diagonal_connectivity() {
        let img = BinaryImage::from_ascii(
            "
            X...
            .X..
            ..X.
            ...X
            ",
        )
        .unwrap();
        assert_eq!(ConnCompEraser::new(&img, Connectivity::Conn4).count(), 4);

        let comps: Vec<_> = ConnCompEraser::new(&img, Connectivity::Conn8).collect();
        assert_eq!(comps.len(), 1);
        assert_eq!(comps[0].rect(), Rect::new_unchecked(0, 0, 4, 4));
        assert_eq!(comps[0].pixel_count(), 4);
    }

    #[test]
    fn test_u_shape_found_once() {
        // The seed row splits into two runs that only meet further down.
        let img = BinaryImage::from_ascii(
            "
            X...X
            X...X
            XXXXX
            ",
        )
        .unwrap();
        let comps: Vec<_> = ConnCompEraser::new(&img, Connectivity::Conn4).collect();
        assert_eq!(comps.len(), 1);
        assert_eq!(comps[0].pixel_count(), 9);
        assert_eq!(comps[0].rect(), Rect::new_unchecked(0, 0, 5, 3));
    }

    #[test]
    fn test_runs_across_word_boundaries() {
        let mut img = BinaryImage::new(100, 3);
        img.fill_rect(Rect::new_unchecked(20, 0, 60, 1), Color::Black);
        img.fill_rect(Rect::new_unchecked(90, 2, 5, 1), Color::Black);
        img.set_pixel(79, 1, Color::Black).unwrap();
        img.set_pixel(80, 2, Color::Black).unwrap();

        let comps: Vec<_> = ConnCompEraser::new(&img, Connectivity::Conn8).collect();
        assert_eq!(comps.len(), 2);
        assert_eq!(comps[0].rect(), Rect::new_unchecked(20, 0, 61, 3));
        assert_eq!(comps[0].pixel_count(), 62);
        assert_eq!(comps[1].rect(), Rect::new_unchecked(90, 2, 5, 1));

        // Under 4-connectivity the diagonal step at (80, 2) is a separate blob.
        assert_eq!(ConnCompEraser::new(&img, Connectivity::Conn4).count(), 3);
    }

    #[test]
    fn test_seed_order() {
        let img = BinaryImage::from_ascii(
            "
            ..X..X
            X.....
            ",
        )
        .unwrap();
        let seeds: Vec<_> = ConnCompEraser::new(&img, Connectivity::Conn4)
            .map(|cc| cc.seed())
            .collect();
        assert_eq!(
            seeds,
            vec![Point::new(2, 0), Point::new(5, 0), Point::new(0, 1)]
        );
    }

    #[test]
    fn test_extent_counts_past_u32() {
        let mut extent = Extent::new(0);
        extent.add_run(0, 0, u32::MAX);
        extent.add_run(1, 0, u32::MAX);
        assert_eq!(extent.pixels, 2 * u64::from(u32::MAX));
    }

    #[test]
    fn test_iterator_is_fused() {
        let img = BinaryImage::from_ascii("X").unwrap();
        let mut eraser = ConnCompEraser::new(&img, Connectivity::Conn4);
        assert!(eraser.next().is_some());
        assert!(eraser.next().is_none());
        assert!(eraser.next().is_none());
    }
}
