use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};

/// Axis-aligned rectangle with integral coordinates.
/// The origin `(x, y)` is the top-left corner, `y` grows downwards.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Rect {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

impl Rect {
    pub const fn new(x: u32, y: u32, width: u32, height: u32) -> Self {
        Rect {
            x,
            y,
            width,
            height,
        }
    }

    pub fn x_max(&self) -> u32 {
        self.x + self.width
    }

    pub fn y_max(&self) -> u32 {
        self.y + self.height
    }

    pub fn area(&self) -> u64 {
        self.width as u64 * self.height as u64
    }

    /// True if a `width` x `height` rectangle fits inside `self` without rotation.
    #[inline(always)]
    pub fn fits(&self, width: u32, height: u32) -> bool {
        self.width >= width && self.height >= height
    }

    /// True if `other` lies entirely within `self` (edges may coincide).
    #[inline(always)]
    pub fn contains(&self, other: &Rect) -> bool {
        self.x <= other.x
            && self.y <= other.y
            && self.x_max() >= other.x_max()
            && self.y_max() >= other.y_max()
    }

    /// True if the interiors of `self` and `other` intersect.
    /// Rectangles that only share an edge or a corner do not overlap.
    #[inline(always)]
    pub fn overlaps(&self, other: &Rect) -> bool {
        u32::max(self.x, other.x) < u32::min(self.x_max(), other.x_max())
            && u32::max(self.y, other.y) < u32::min(self.y_max(), other.y_max())
    }

    /// Returns the largest rectangle that is contained in both `a` and `b`.
    pub fn intersection(a: Rect, b: Rect) -> Option<Rect> {
        let x = u32::max(a.x, b.x);
        let y = u32::max(a.y, b.y);
        let x_max = u32::min(a.x_max(), b.x_max());
        let y_max = u32::min(a.y_max(), b.y_max());
        if x < x_max && y < y_max {
            Some(Rect::new(x, y, x_max - x, y_max - y))
        } else {
            None
        }
    }

    /// Returns a copy of `self` extended by `dw` to the right and `dh` downwards.
    pub fn grown(&self, dw: u32, dh: u32) -> Rect {
        Rect {
            width: self.width.saturating_add(dw),
            height: self.height.saturating_add(dh),
            ..*self
        }
    }
}

impl Display for Rect {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "[{}x{} @ ({}, {})]",
            self.width, self.height, self.x, self.y
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test_case(Rect::new(0, 0, 10, 10), 10, 10, true; "exact")]
    #[test_case(Rect::new(0, 0, 10, 10), 11, 5, false; "too wide")]
    #[test_case(Rect::new(5, 5, 10, 20), 10, 19, true; "smaller")]
    #[test_case(Rect::new(0, 0, 0, 10), 1, 1, false; "degenerate")]
    fn fits(rect: Rect, w: u32, h: u32, expected: bool) {
        assert_eq!(rect.fits(w, h), expected);
    }

    #[test]
    fn containment_is_reflexive_and_directional() {
        let outer = Rect::new(0, 0, 100, 50);
        let inner = Rect::new(10, 10, 20, 20);
        assert!(outer.contains(&outer));
        assert!(outer.contains(&inner));
        assert!(!inner.contains(&outer));
        assert!(!outer.contains(&Rect::new(90, 0, 20, 10)));
    }

    #[test]
    fn touching_rects_do_not_overlap() {
        let a = Rect::new(0, 0, 10, 10);
        assert!(!a.overlaps(&Rect::new(10, 0, 10, 10)));
        assert!(!a.overlaps(&Rect::new(0, 10, 10, 10)));
        assert!(!a.overlaps(&Rect::new(10, 10, 10, 10)));
        assert!(a.overlaps(&Rect::new(9, 9, 10, 10)));
        assert_eq!(
            Rect::intersection(a, Rect::new(5, 5, 10, 10)),
            Some(Rect::new(5, 5, 5, 5))
        );
        assert_eq!(Rect::intersection(a, Rect::new(10, 0, 5, 5)), None);
    }

    #[test]
    fn grown_keeps_origin() {
        let r = Rect::new(3, 4, 10, 20).grown(5, 5);
        assert_eq!(r, Rect::new(3, 4, 15, 25));
        assert_eq!(r.area(), 375);
    }
}
