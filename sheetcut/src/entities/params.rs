use crate::entities::Material;
use crate::error::{Axis, OptimizeError, OptimizeResult};
use crate::geometry::Rect;
use serde::{Deserialize, Serialize};

/// Saw blade kerf and the margins trimmed off every edge of a sheet before placement.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CuttingParameters {
    pub kerf: u32,
    pub top_trim: u32,
    pub bottom_trim: u32,
    pub left_trim: u32,
    pub right_trim: u32,
}

impl CuttingParameters {
    /// The region of `material` that remains after the trims are removed.
    /// Fails if the trims along either axis consume the whole material.
    pub fn usable_rect(&self, material: &Material) -> OptimizeResult<Rect> {
        let h_trim = self.left_trim as u64 + self.right_trim as u64;
        let v_trim = self.top_trim as u64 + self.bottom_trim as u64;

        if h_trim >= material.width as u64 {
            return Err(OptimizeError::InfeasibleParameters {
                material: material.code.clone(),
                axis: Axis::Horizontal,
                trim: h_trim.min(u32::MAX as u64) as u32,
                dimension: material.width,
            });
        }
        if v_trim >= material.height as u64 {
            return Err(OptimizeError::InfeasibleParameters {
                material: material.code.clone(),
                axis: Axis::Vertical,
                trim: v_trim.min(u32::MAX as u64) as u32,
                dimension: material.height,
            });
        }

        Ok(Rect::new(
            self.left_trim,
            self.top_trim,
            material.width - h_trim as u32,
            material.height - v_trim as u32,
        ))
    }
}
