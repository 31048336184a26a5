use crate::entities::{PlacedPiece, SheetLayout};
use crate::geometry::Rect;
use crate::packing::Solution;
use itertools::Itertools;
use log::error;
//Various checks to verify correctness of the state of the system
//Used in debug_assertion!() blocks

/// No two placed pieces are closer to each other than `kerf`, in either direction.
pub fn pieces_do_not_overlap(placed: &[PlacedPiece], kerf: u32) -> bool {
    for (a, b) in placed.iter().tuple_combinations() {
        let (ra, rb) = (a.rect(), b.rect());
        if ra.grown(kerf, kerf).overlaps(&rb) || rb.grown(kerf, kerf).overlaps(&ra) {
            error!(
                "pieces {} {} and {} {} are less than the kerf ({kerf}) apart",
                a.piece_id,
                ra,
                b.piece_id,
                rb
            );
            return false;
        }
    }
    true
}

/// Every placed piece lies within the usable region of the sheet.
pub fn pieces_within_usable(placed: &[PlacedPiece], usable: Rect) -> bool {
    match placed.iter().find(|p| !usable.contains(&p.rect())) {
        Some(p) => {
            error!("piece {} {} exceeds usable region {}", p.piece_id, p.rect(), usable);
            false
        }
        None => true,
    }
}

/// Placed pieces and remaining free rectangles never claim more than the usable area.
pub fn area_is_conserved(layout: &SheetLayout) -> bool {
    let claimed = layout.used_area() + layout.remainders.iter().map(Rect::area).sum::<u64>();
    claimed <= layout.usable.area()
}

pub fn sheet_layout_is_valid(layout: &SheetLayout, kerf: u32) -> bool {
    pieces_within_usable(&layout.placed, layout.usable)
        && pieces_do_not_overlap(&layout.placed, kerf)
        && area_is_conserved(layout)
        && layout.remainders.iter().all(|r| layout.usable.contains(r))
}

/// Every unit piece of the demand ends up either placed or unplaced, exactly once.
pub fn solution_accounts_for_all_units(solution: &Solution, n_units: usize) -> bool {
    let n_placed: usize = solution.layouts.iter().map(|l| l.placed.len()).sum();
    n_placed + solution.unplaced.len() == n_units
}
