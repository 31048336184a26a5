use crate::geometry::Rect;
use serde::{Deserialize, Serialize};

/// A [`UnitPiece`](crate::entities::UnitPiece) that has been placed on a sheet.
/// `width` and `height` are the placed extents, swapped with respect to the piece if `rotated`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlacedPiece {
    pub piece_id: String,
    pub label: Option<String>,
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
    pub rotated: bool,
}

impl PlacedPiece {
    pub fn rect(&self) -> Rect {
        Rect::new(self.x, self.y, self.width, self.height)
    }

    pub fn area(&self) -> u64 {
        self.rect().area()
    }
}
