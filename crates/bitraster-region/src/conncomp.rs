//! Connected component descriptors

use bitraster_core::{Point, Rect};

/// Connectivity type for component analysis
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Connectivity {
    /// 4-way connectivity (up, down, left, right)
    #[default]
    Conn4,
    /// 8-way connectivity (includes diagonals)
    Conn8,
}

impl Connectivity {
    /// Columns by which a run's neighbor span extends on each side in the
    /// rows above and below.
    #[inline]
    pub(crate) fn diagonal_reach(self) -> u32 {
        match self {
            Connectivity::Conn4 => 0,
            Connectivity::Conn8 => 1,
        }
    }
}

/// A connected component found by an eraser
///
/// The null component (zero-sized rectangle) signals that no components are
/// left.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct ConnComp {
    seed: Point,
    rect: Rect,
    pixel_count: u64,
}

impl ConnComp {
    /// Create a component descriptor
    pub fn new(seed: Point, rect: Rect, pixel_count: u64) -> Self {
        Self {
            seed,
            rect,
            pixel_count,
        }
    }

    /// The "no more components" sentinel
    pub fn null() -> Self {
        Self::default()
    }

    /// Check for the null sentinel
    #[inline]
    pub fn is_null(&self) -> bool {
        self.rect.is_empty()
    }

    /// Bounding rectangle in source image coordinates
    #[inline]
    pub fn rect(&self) -> Rect {
        self.rect
    }

    /// First pixel of the component in row-major scan order
    #[inline]
    pub fn seed(&self) -> Point {
        self.seed
    }

    /// Number of pixels in the component
    #[inline]
    pub fn pixel_count(&self) -> u64 {
        self.pixel_count
    }

    /// Leftmost column
    #[inline]
    pub fn left(&self) -> i32 {
        self.rect.x
    }

    /// Topmost row
    #[inline]
    pub fn top(&self) -> i32 {
        self.rect.y
    }

    /// Width of the bounding rectangle
    #[inline]
    pub fn width(&self) -> i32 {
        self.rect.w
    }

    /// Height of the bounding rectangle
    #[inline]
    pub fn height(&self) -> i32 {
        self.rect.h
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_null_comp() {
        assert!(ConnComp::null().is_null());
        assert!(ConnComp::default().is_null());
        let cc = ConnComp::new(Point::new(3, 1), Rect::new_unchecked(2, 1, 4, 2), 5);
        assert!(!cc.is_null());
        assert_eq!((cc.left(), cc.top(), cc.width(), cc.height()), (2, 1, 4, 2));
    }

    #[test]
    fn test_default_connectivity() {
        assert_eq!(Connectivity::default(), Connectivity::Conn4);
        assert_eq!(Connectivity::Conn8.diagonal_reach(), 1);
    }
}
