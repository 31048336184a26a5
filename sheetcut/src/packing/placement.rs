use crate::entities::{PlacedPiece, Sheet, UnitPiece};
use crate::packing::{FreeRectKey, FreeSpaceTracker};
use log::trace;

/// Extents of a piece as it would be placed on a sheet.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Orientation {
    pub width: u32,
    pub height: u32,
    pub rotated: bool,
}

impl Orientation {
    /// The orientations in which `unit` may be placed, natural orientation first.
    ///
    /// A piece without a grain requirement may be swapped if it can rotate and is not square.
    /// A piece with a forced grain is always placed as drawn, whatever the grain of the sheet.
    pub fn candidates(unit: &UnitPiece) -> Vec<Orientation> {
        let natural = Orientation {
            width: unit.width,
            height: unit.height,
            rotated: false,
        };
        let swapped = Orientation {
            width: unit.height,
            height: unit.width,
            rotated: true,
        };

        match unit.grain.is_none() && unit.can_rotate && unit.width != unit.height {
            true => vec![natural, swapped],
            false => vec![natural],
        }
    }
}

/// Where and how a piece would be placed on a sheet.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PlacementOption {
    /// Free rectangle to place the piece in (anchored at its top-left corner)
    pub key: FreeRectKey,
    pub orientation: Orientation,
    /// Area of the free rectangle left over by the piece
    pub score: u64,
}

/// Searches all allowed orientations of `unit` for the free rectangle with the least leftover area.
/// A swapped orientation only wins if it is strictly better than the natural one.
pub fn find_placement(unit: &UnitPiece, free_space: &FreeSpaceTracker) -> Option<PlacementOption> {
    let mut best: Option<PlacementOption> = None;
    for orientation in Orientation::candidates(unit) {
        let Some((key, score)) = free_space.best_fit(orientation.width, orientation.height) else {
            continue;
        };
        if best.is_none_or(|b| score < b.score) {
            best = Some(PlacementOption {
                key,
                orientation,
                score,
            });
        }
    }
    best
}

/// Places `unit` on `sheet` if it fits anywhere.
/// `None` means the piece does not fit on this sheet, which is not an error.
pub fn place<'a>(unit: &UnitPiece, sheet: &'a mut Sheet) -> Option<&'a PlacedPiece> {
    let option = find_placement(unit, sheet.free_space())?;
    trace!(
        "[PLACE] {} on sheet {}#{} (rotated: {}, leftover: {})",
        unit.id, sheet.material.code, sheet.index, option.orientation.rotated, option.score
    );
    Some(sheet.place(unit, option))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::{CuttingParameters, GrainDirection, Material, Piece};
    use crate::geometry::Rect;
    use crate::util::config::OptimizerConfig;
    use itertools::Itertools;
    use test_case::test_case;

    fn unit(width: u32, height: u32, can_rotate: bool, grain: Option<GrainDirection>) -> UnitPiece {
        Piece::new("p", "M", width, height)
            .with_rotation(can_rotate)
            .with_grain(grain)
            .expand()
            .next()
            .unwrap()
    }

    fn sheet(material: Material) -> Sheet {
        Sheet::new(
            &material,
            1,
            &CuttingParameters::default(),
            &OptimizerConfig::default(),
        )
        .unwrap()
    }

    #[test_case(true, None, vec![false, true]; "rotatable")]
    #[test_case(false, None, vec![false]; "fixed")]
    #[test_case(true, Some(GrainDirection::Vertical), vec![false]; "forced vertical grain")]
    #[test_case(true, Some(GrainDirection::Horizontal), vec![false]; "forced horizontal grain")]
    #[test_case(false, Some(GrainDirection::Horizontal), vec![false]; "forced grain without rotation")]
    fn orientation_candidates(can_rotate: bool, piece_grain: Option<GrainDirection>, rotated: Vec<bool>) {
        let candidates = Orientation::candidates(&unit(30, 20, can_rotate, piece_grain));
        assert_eq!(candidates.iter().map(|o| o.rotated).collect_vec(), rotated);
    }

    #[test]
    fn square_pieces_are_not_swapped() {
        let candidates = Orientation::candidates(&unit(20, 20, true, None));
        assert_eq!(candidates.len(), 1);
    }

    #[test]
    fn rotation_only_when_strictly_better() {
        // a 60x40 piece fits both ways in a 60x60 sheet with equal leftover: keep natural orientation
        let mut s = sheet(Material::new("M", 60, 60));
        let placed = place(&unit(60, 40, true, None), &mut s).unwrap();
        assert!(!placed.rotated);
        assert_eq!((placed.width, placed.height), (60, 40));
    }

    #[test]
    fn rotation_when_only_swapped_fits() {
        let mut s = sheet(Material::new("M", 50, 100));
        let placed = place(&unit(100, 50, true, None), &mut s).unwrap().clone();
        assert!(placed.rotated);
        assert_eq!(placed.rect(), Rect::new(0, 0, 50, 100));

        let mut s = sheet(Material::new("M", 50, 100));
        assert!(place(&unit(100, 50, false, None), &mut s).is_none());
        assert!(s.is_empty());
    }

    #[test]
    fn forced_grain_is_placed_as_drawn_on_a_crossed_sheet() {
        let board = Material::new("M", 600, 600).with_grain(Some(GrainDirection::Vertical));
        for can_rotate in [true, false] {
            let mut s = sheet(board.clone());
            let placed = place(&unit(500, 100, can_rotate, Some(GrainDirection::Horizontal)), &mut s).unwrap();
            assert!(!placed.rotated);
            assert_eq!((placed.width, placed.height), (500, 100));
        }

        // a forced grain piece that only fits swapped stays unplaced
        let mut s = sheet(Material::new("M", 100, 500));
        assert!(place(&unit(500, 100, true, Some(GrainDirection::Horizontal)), &mut s).is_none());
    }

    #[test]
    fn placement_consumes_free_space() {
        let mut s = sheet(Material::new("M", 100, 100));
        place(&unit(50, 50, false, None), &mut s).unwrap();
        place(&unit(50, 50, false, None), &mut s).unwrap();
        place(&unit(50, 50, false, None), &mut s).unwrap();
        place(&unit(50, 50, false, None), &mut s).unwrap();
        assert!(s.free_space().is_empty());
        assert!(place(&unit(1, 1, false, None), &mut s).is_none());

        let rects = s.placed().iter().map(PlacedPiece::rect).collect_vec();
        for (i, a) in rects.iter().enumerate() {
            for b in rects.iter().skip(i + 1) {
                assert!(!a.overlaps(b));
            }
        }
    }
}
