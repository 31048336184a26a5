use crate::entities::{CuttingParameters, Material, PlacedPiece, UnitPiece};
use crate::error::OptimizeResult;
use crate::geometry::Rect;
use crate::packing::{FreeSpaceTracker, PlacementOption, SplitRule};
use crate::util::OptimizerConfig;
use crate::util::assertions;
use serde::{Deserialize, Serialize};

/// A single physical instance of a [`Material`] which is being filled with pieces.
/// Only the placement engine modifies it. Once its pass is over it is frozen into a [`SheetLayout`].
#[derive(Clone, Debug)]
pub struct Sheet {
    pub material: Material,
    /// 1-based index of the sheet among the sheets of its material
    pub index: usize,
    usable: Rect,
    free_space: FreeSpaceTracker,
    placed: Vec<PlacedPiece>,
    kerf: u32,
    split_rule: SplitRule,
    min_rect_size: u32,
}

impl Sheet {
    pub fn new(
        material: &Material,
        index: usize,
        params: &CuttingParameters,
        config: &OptimizerConfig,
    ) -> OptimizeResult<Self> {
        let usable = params.usable_rect(material)?;
        Ok(Sheet {
            material: material.clone(),
            index,
            usable,
            free_space: FreeSpaceTracker::new(usable),
            placed: vec![],
            kerf: params.kerf,
            split_rule: config.split_rule,
            min_rect_size: config.min_rect_size,
        })
    }

    pub fn free_space(&self) -> &FreeSpaceTracker {
        &self.free_space
    }

    pub fn placed(&self) -> &[PlacedPiece] {
        &self.placed
    }

    pub fn usable(&self) -> Rect {
        self.usable
    }

    /// Places `unit` according to `option`, which must stem from this sheet's free space.
    pub fn place(&mut self, unit: &UnitPiece, option: PlacementOption) -> &PlacedPiece {
        let orientation = option.orientation;
        let consumed = self.free_space.commit(
            option.key,
            orientation.width,
            orientation.height,
            self.kerf,
            self.split_rule,
            self.min_rect_size,
        );
        self.placed.push(PlacedPiece {
            piece_id: unit.id.clone(),
            label: unit.label.clone(),
            x: consumed.x,
            y: consumed.y,
            width: orientation.width,
            height: orientation.height,
            rotated: orientation.rotated,
        });
        self.placed.last().expect("a piece was just placed")
    }

    pub fn is_empty(&self) -> bool {
        self.placed.is_empty()
    }

    pub fn used_area(&self) -> u64 {
        self.placed.iter().map(PlacedPiece::area).sum()
    }

    /// Freezes the sheet. The remaining free rectangles become the remainders of the layout.
    pub fn into_layout(self) -> SheetLayout {
        let layout = SheetLayout {
            material: self.material,
            index: self.index,
            usable: self.usable,
            placed: self.placed,
            remainders: self.free_space.iter().copied().collect(),
        };
        debug_assert!(assertions::sheet_layout_is_valid(&layout, self.kerf));
        layout
    }
}

/// Immutable record of a finished sheet.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SheetLayout {
    pub material: Material,
    pub index: usize,
    /// Region of the sheet left after trimming
    pub usable: Rect,
    pub placed: Vec<PlacedPiece>,
    /// Free rectangles left over after all placements
    pub remainders: Vec<Rect>,
}

impl SheetLayout {
    pub fn used_area(&self) -> u64 {
        self.placed.iter().map(PlacedPiece::area).sum()
    }

    pub fn usable_area(&self) -> u64 {
        self.usable.area()
    }

    /// Material area not covered by pieces, including trims and kerf
    pub fn waste_area(&self) -> u64 {
        self.material.area() - self.used_area()
    }

    /// Fraction of the material area covered by pieces
    pub fn efficiency(&self) -> f64 {
        self.used_area() as f64 / self.material.area() as f64
    }
}
