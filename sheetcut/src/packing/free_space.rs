use crate::geometry::Rect;
use crate::packing::SplitRule;
use itertools::Itertools;
use slotmap::{SlotMap, new_key_type};

new_key_type! {
    /// Handle to a free rectangle in a [`FreeSpaceTracker`]
    pub struct FreeRectKey;
}

/// Bookkeeping of the unoccupied regions of a single sheet.
///
/// Free rectangles live in an arena, so handles remain valid while other entries are removed.
/// Iteration always follows insertion order, which makes best-fit tie-breaking deterministic.
#[derive(Clone, Debug)]
pub struct FreeSpaceTracker {
    rects: SlotMap<FreeRectKey, Rect>,
    order: Vec<FreeRectKey>,
}

impl FreeSpaceTracker {
    /// Creates a tracker with a single free rectangle covering the usable region of the sheet.
    pub fn new(usable: Rect) -> Self {
        let mut tracker = FreeSpaceTracker {
            rects: SlotMap::with_key(),
            order: vec![],
        };
        tracker.insert(usable);
        tracker
    }

    /// Returns the free rectangle in which a `width` x `height` piece leaves the least leftover area,
    /// together with that leftover area. The first rectangle encountered wins ties.
    pub fn best_fit(&self, width: u32, height: u32) -> Option<(FreeRectKey, u64)> {
        let piece_area = width as u64 * height as u64;
        let mut best: Option<(FreeRectKey, u64)> = None;
        for (key, rect) in self.iter_keyed() {
            if !rect.fits(width, height) {
                continue;
            }
            let score = rect.area() - piece_area;
            if best.is_none_or(|(_, best_score)| score < best_score) {
                best = Some((key, score));
            }
        }
        best
    }

    /// Consumes the free rectangle `key` for a `placed_w` x `placed_h` piece anchored at its top-left corner.
    /// The leftover is split according to `rule`, sub-minimum children are dropped and the free list is pruned.
    /// Returns the consumed rectangle.
    pub fn commit(
        &mut self,
        key: FreeRectKey,
        placed_w: u32,
        placed_h: u32,
        kerf: u32,
        rule: SplitRule,
        min_rect_size: u32,
    ) -> Rect {
        let rect = self.remove(key).expect("free rectangle key is not valid anymore");
        debug_assert!(rect.fits(placed_w, placed_h));

        let children = Self::split(rect, placed_w, placed_h, kerf, rule, min_rect_size);
        self.extend(children);
        self.prune();
        rect
    }

    /// Guillotine split of `rect` after a placement, keeping only children with both sides of at least `min_rect_size`.
    pub fn split(
        rect: Rect,
        placed_w: u32,
        placed_h: u32,
        kerf: u32,
        rule: SplitRule,
        min_rect_size: u32,
    ) -> Vec<Rect> {
        rule.split(rect, placed_w, placed_h, kerf)
            .into_iter()
            .filter(|r| r.width >= min_rect_size && r.height >= min_rect_size)
            .collect()
    }

    /// Removes every free rectangle that is fully contained in another one.
    /// Of two identical rectangles, the one inserted first survives.
    pub fn prune(&mut self) {
        let redundant = self
            .order
            .iter()
            .enumerate()
            .filter(|&(i, k)| {
                let r = &self.rects[*k];
                self.order.iter().enumerate().any(|(j, o)| {
                    let other = &self.rects[*o];
                    i != j && other.contains(r) && (other != r || j < i)
                })
            })
            .map(|(_, k)| *k)
            .collect_vec();

        for key in redundant {
            self.remove(key);
        }
    }

    pub fn insert(&mut self, rect: Rect) -> FreeRectKey {
        let key = self.rects.insert(rect);
        self.order.push(key);
        key
    }

    pub fn extend(&mut self, rects: impl IntoIterator<Item = Rect>) {
        for rect in rects {
            self.insert(rect);
        }
    }

    pub fn remove(&mut self, key: FreeRectKey) -> Option<Rect> {
        let rect = self.rects.remove(key)?;
        self.order.retain(|k| *k != key);
        Some(rect)
    }

    pub fn get(&self, key: FreeRectKey) -> Option<&Rect> {
        self.rects.get(key)
    }

    /// Free rectangles in insertion order
    pub fn iter(&self) -> impl Iterator<Item = &Rect> {
        self.order.iter().map(|k| &self.rects[*k])
    }

    fn iter_keyed(&self) -> impl Iterator<Item = (FreeRectKey, &Rect)> {
        self.order.iter().map(|k| (*k, &self.rects[*k]))
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Sum of the areas of all free rectangles
    pub fn free_area(&self) -> u64 {
        self.iter().map(Rect::area).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn best_fit_prefers_least_leftover() {
        let mut tracker = FreeSpaceTracker::new(Rect::new(0, 0, 100, 100));
        let small = tracker.insert(Rect::new(200, 0, 30, 30));
        tracker.insert(Rect::new(300, 0, 50, 50));

        let (key, score) = tracker.best_fit(25, 25).unwrap();
        assert_eq!(key, small);
        assert_eq!(score, 900 - 625);

        assert!(tracker.best_fit(101, 1).is_none());
    }

    #[test]
    fn best_fit_ties_go_to_first_inserted() {
        let mut tracker = FreeSpaceTracker::new(Rect::new(0, 0, 10, 10));
        let first = tracker.insert(Rect::new(100, 0, 20, 20));
        tracker.insert(Rect::new(200, 0, 20, 20));
        tracker.insert(Rect::new(300, 0, 40, 10));

        assert_eq!(tracker.best_fit(15, 10).unwrap().0, first);
    }

    #[test]
    fn order_survives_removal() {
        let mut tracker = FreeSpaceTracker::new(Rect::new(0, 0, 10, 10));
        let middle = tracker.insert(Rect::new(10, 0, 10, 10));
        tracker.insert(Rect::new(20, 0, 10, 10));
        tracker.remove(middle);
        tracker.insert(Rect::new(30, 0, 10, 10));

        let xs = tracker.iter().map(|r| r.x).collect_vec();
        assert_eq!(xs, vec![0, 20, 30]);
        assert!(tracker.get(middle).is_none());
    }

    #[test]
    fn prune_removes_contained_and_duplicate_rects() {
        let mut tracker = FreeSpaceTracker::new(Rect::new(0, 0, 100, 100));
        tracker.insert(Rect::new(10, 10, 20, 20));
        tracker.insert(Rect::new(200, 0, 10, 10));
        tracker.insert(Rect::new(200, 0, 10, 10));
        tracker.prune();

        assert_eq!(
            tracker.iter().copied().collect_vec(),
            vec![Rect::new(0, 0, 100, 100), Rect::new(200, 0, 10, 10)]
        );
    }

    #[test]
    fn commit_splits_and_discards_slivers() {
        let mut tracker = FreeSpaceTracker::new(Rect::new(0, 0, 100, 60));
        let (key, _) = tracker.best_fit(70, 20).unwrap();
        let consumed = tracker.commit(key, 70, 20, 0, SplitRule::ShorterLeftoverAxis, 1);
        assert_eq!(consumed, Rect::new(0, 0, 100, 60));
        assert_eq!(tracker.len(), 2);
        assert_eq!(tracker.free_area(), 6000 - 1400);

        // a min_rect_size of 35 drops the 30 wide right child
        let mut tracker = FreeSpaceTracker::new(Rect::new(0, 0, 100, 60));
        let (key, _) = tracker.best_fit(70, 20).unwrap();
        tracker.commit(key, 70, 20, 0, SplitRule::ShorterLeftoverAxis, 35);
        assert_eq!(
            tracker.iter().copied().collect_vec(),
            vec![Rect::new(0, 20, 100, 40)]
        );
    }
}
