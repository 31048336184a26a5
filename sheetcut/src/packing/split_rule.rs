use crate::geometry::Rect;
use serde::{Deserialize, Serialize};

/// Policy selecting which guillotine decomposition of the leftover space is produced after a placement.
///
/// *Vertical-first* keeps the right child as tall as the placed piece and gives the bottom child the full width.
/// *Horizontal-first* keeps the bottom child as wide as the placed piece and gives the right child the full height.
/// When only one axis has leftover both decompositions coincide.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum SplitRule {
    /// Vertical-first if the horizontal leftover is the shorter one
    #[default]
    ShorterLeftoverAxis,
    /// Vertical-first if the horizontal leftover is the longer one
    LongerLeftoverAxis,
    /// Vertical-first if the free rectangle is narrower than it is tall
    ShorterAxis,
    /// Vertical-first if the free rectangle is wider than it is tall
    LongerAxis,
    /// The decomposition whose largest child is smallest
    MinimizeArea,
    /// The decomposition whose largest child is largest
    MaximizeArea,
}

impl SplitRule {
    pub const ALL: [SplitRule; 6] = [
        SplitRule::ShorterLeftoverAxis,
        SplitRule::LongerLeftoverAxis,
        SplitRule::ShorterAxis,
        SplitRule::LongerAxis,
        SplitRule::MinimizeArea,
        SplitRule::MaximizeArea,
    ];

    /// Splits the leftover of `rect` after a `placed_w` x `placed_h` piece was anchored at its top-left corner.
    /// Children are not filtered on size, empty children are omitted.
    pub fn split(self, rect: Rect, placed_w: u32, placed_h: u32, kerf: u32) -> Vec<Rect> {
        let cut = Cut::new(rect, placed_w, placed_h, kerf);
        match self {
            SplitRule::ShorterLeftoverAxis => match cut.lw <= cut.lh {
                true => cut.vertical_first(),
                false => cut.horizontal_first(),
            },
            SplitRule::LongerLeftoverAxis => match cut.lw >= cut.lh {
                true => cut.vertical_first(),
                false => cut.horizontal_first(),
            },
            SplitRule::ShorterAxis => match rect.width <= rect.height {
                true => cut.vertical_first(),
                false => cut.horizontal_first(),
            },
            SplitRule::LongerAxis => match rect.width >= rect.height {
                true => cut.vertical_first(),
                false => cut.horizontal_first(),
            },
            SplitRule::MinimizeArea => {
                let (vertical, horizontal) = (cut.vertical_first(), cut.horizontal_first());
                match max_area(&vertical) <= max_area(&horizontal) {
                    true => vertical,
                    false => horizontal,
                }
            }
            SplitRule::MaximizeArea => {
                let (vertical, horizontal) = (cut.vertical_first(), cut.horizontal_first());
                match max_area(&vertical) >= max_area(&horizontal) {
                    true => vertical,
                    false => horizontal,
                }
            }
        }
    }
}

fn max_area(rects: &[Rect]) -> u64 {
    rects.iter().map(Rect::area).max().unwrap_or(0)
}

/// Leftover geometry of a free rectangle after a placement in its top-left corner.
/// Kerf is only charged on an axis that actually has leftover.
struct Cut {
    rect: Rect,
    placed_w: u32,
    placed_h: u32,
    lw: u32,
    lh: u32,
    ew: u32,
    eh: u32,
}

impl Cut {
    fn new(rect: Rect, placed_w: u32, placed_h: u32, kerf: u32) -> Self {
        let lw = rect.width.saturating_sub(placed_w);
        let lh = rect.height.saturating_sub(placed_h);
        let ew = placed_w.saturating_add(if lw > 0 { kerf } else { 0 });
        let eh = placed_h.saturating_add(if lh > 0 { kerf } else { 0 });
        Cut {
            rect,
            placed_w,
            placed_h,
            lw,
            lh,
            ew,
            eh,
        }
    }

    fn right(&self, height: u32) -> Option<Rect> {
        let width = self.rect.width.saturating_sub(self.ew);
        (self.lw > 0 && width > 0 && height > 0).then(|| {
            Rect::new(self.rect.x.saturating_add(self.ew), self.rect.y, width, height)
        })
    }

    fn bottom(&self, width: u32) -> Option<Rect> {
        let height = self.rect.height.saturating_sub(self.eh);
        (self.lh > 0 && height > 0 && width > 0).then(|| {
            Rect::new(self.rect.x, self.rect.y.saturating_add(self.eh), width, height)
        })
    }

    fn vertical_first(&self) -> Vec<Rect> {
        [self.right(self.placed_h), self.bottom(self.rect.width)]
            .into_iter()
            .flatten()
            .collect()
    }

    fn horizontal_first(&self) -> Vec<Rect> {
        [self.bottom(self.placed_w), self.right(self.rect.height)]
            .into_iter()
            .flatten()
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    const FREE: Rect = Rect::new(0, 0, 100, 60);

    #[test]
    fn vertical_first_children() {
        // horizontal leftover (30) is shorter than vertical leftover (40)
        let children = SplitRule::ShorterLeftoverAxis.split(FREE, 70, 20, 0);
        assert_eq!(
            children,
            vec![Rect::new(70, 0, 30, 20), Rect::new(0, 20, 100, 40)]
        );
    }

    #[test]
    fn horizontal_first_children() {
        let children = SplitRule::LongerLeftoverAxis.split(FREE, 70, 20, 0);
        assert_eq!(
            children,
            vec![Rect::new(0, 20, 70, 40), Rect::new(70, 0, 30, 60)]
        );
    }

    #[test]
    fn kerf_is_charged_only_on_axes_with_leftover() {
        // exact fit in width: no kerf charged horizontally, no right child
        let children = SplitRule::ShorterLeftoverAxis.split(FREE, 100, 20, 5);
        assert_eq!(children, vec![Rect::new(0, 25, 100, 35)]);

        // exact fit in both axes: nothing left
        assert!(SplitRule::ShorterLeftoverAxis.split(FREE, 100, 60, 5).is_empty());

        // both axes have leftover
        let children = SplitRule::ShorterLeftoverAxis.split(FREE, 50, 20, 5);
        assert_eq!(
            children,
            vec![Rect::new(0, 25, 50, 35), Rect::new(55, 0, 45, 60)]
        );
    }

    #[test]
    fn leftover_thinner_than_kerf_vanishes() {
        let children = SplitRule::ShorterLeftoverAxis.split(FREE, 97, 60, 5);
        assert!(children.is_empty());
    }

    #[test_case(SplitRule::ShorterAxis, Rect::new(0, 20, 70, 40); "shorter axis")]
    #[test_case(SplitRule::LongerAxis, Rect::new(70, 0, 30, 20); "longer axis")]
    #[test_case(SplitRule::MinimizeArea, Rect::new(0, 20, 70, 40); "minimize area")]
    #[test_case(SplitRule::MaximizeArea, Rect::new(70, 0, 30, 20); "maximize area")]
    fn rule_selects_decomposition(rule: SplitRule, first_child: Rect) {
        // FREE is wider than tall; vertical-first's largest child is 100x40 = 4000,
        // horizontal-first's largest child is 70x40 = 2800
        let children = rule.split(FREE, 70, 20, 0);
        assert_eq!(children[0], first_child);
        assert_eq!(children.len(), 2);
    }

    #[test]
    fn all_rules_preserve_area_without_kerf() {
        for rule in SplitRule::ALL {
            let children = rule.split(FREE, 30, 45, 0);
            let child_area: u64 = children.iter().map(Rect::area).sum();
            assert_eq!(child_area + 30 * 45, FREE.area(), "{rule:?}");
            for (i, a) in children.iter().enumerate() {
                assert!(FREE.contains(a));
                for b in children.iter().skip(i + 1) {
                    assert!(!a.overlaps(b), "{rule:?}: {a} overlaps {b}");
                }
            }
        }
    }
}
