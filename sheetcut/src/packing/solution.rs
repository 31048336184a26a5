use crate::entities::{Material, SheetLayout, UnitPiece};
use itertools::Itertools;
use std::time::Duration;

/// Outcome of a multi-sheet optimization run.
#[derive(Clone, Debug)]
pub struct Solution {
    /// Finished sheets, grouped per material in the order the materials were first demanded
    pub layouts: Vec<SheetLayout>,
    /// Unit pieces that could not be placed on any sheet
    pub unplaced: Vec<UnitPiece>,
    pub elapsed: Duration,
}

impl Solution {
    pub fn n_sheets(&self) -> usize {
        self.layouts.len()
    }

    pub fn n_placed(&self) -> usize {
        self.layouts.iter().map(|l| l.placed.len()).sum()
    }

    pub fn used_area(&self) -> u64 {
        self.layouts.iter().map(SheetLayout::used_area).sum()
    }

    /// Total area of all sheets used, trims included
    pub fn material_area(&self) -> u64 {
        self.layouts.iter().map(|l| l.material.area()).sum()
    }

    /// Fraction of the total sheet area covered by pieces, 0 if no sheets were used.
    pub fn efficiency(&self) -> f64 {
        match self.material_area() {
            0 => 0.0,
            area => self.used_area() as f64 / area as f64,
        }
    }

    /// Number of sheets used per material, in order of appearance
    pub fn sheets_per_material(&self) -> Vec<(&Material, usize)> {
        self.layouts
            .iter()
            .chunk_by(|l| l.material.code.clone())
            .into_iter()
            .map(|(_, group)| {
                let group = group.collect_vec();
                (&group[0].material, group.len())
            })
            .collect()
    }
}
