use crate::error::{OptimizeError, OptimizeResult};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Direction of the grain of a sheet material, or the grain a piece is required to follow.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum GrainDirection {
    #[serde(rename = "h")]
    Horizontal,
    #[serde(rename = "v")]
    Vertical,
}

impl GrainDirection {
    /// Canonical token, `"none"` is reserved for the absence of a grain.
    pub fn token(grain: Option<GrainDirection>) -> &'static str {
        match grain {
            Some(GrainDirection::Horizontal) => "h",
            Some(GrainDirection::Vertical) => "v",
            None => "none",
        }
    }
}

/// Template of a sheet material. Every sheet opened during optimization is an independent instance of it.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Material {
    /// Unique code by which pieces reference the material
    pub code: String,
    pub width: u32,
    pub height: u32,
    pub thickness: u32,
    /// Price of a single sheet
    pub cost_per_unit: f64,
    /// Grain of the sheet, `None` if the material has no grain
    pub grain: Option<GrainDirection>,
}

impl Material {
    pub fn new(code: impl Into<String>, width: u32, height: u32) -> Self {
        Material {
            code: code.into(),
            width,
            height,
            thickness: 0,
            cost_per_unit: 0.0,
            grain: None,
        }
    }

    pub fn with_cost(mut self, cost_per_unit: f64) -> Self {
        self.cost_per_unit = cost_per_unit;
        self
    }

    pub fn with_thickness(mut self, thickness: u32) -> Self {
        self.thickness = thickness;
        self
    }

    pub fn with_grain(mut self, grain: Option<GrainDirection>) -> Self {
        self.grain = grain;
        self
    }

    pub fn area(&self) -> u64 {
        self.width as u64 * self.height as u64
    }

    pub fn validate(&self) -> OptimizeResult<()> {
        let invalid = |reason: &str| OptimizeError::InvalidMaterial {
            material: self.code.clone(),
            reason: reason.to_string(),
        };
        if self.code.is_empty() {
            return Err(invalid("code must not be empty"));
        }
        if self.width == 0 || self.height == 0 {
            return Err(invalid("dimensions must be positive"));
        }
        if !self.cost_per_unit.is_finite() || self.cost_per_unit < 0.0 {
            return Err(invalid("cost per unit must be a finite, non-negative number"));
        }
        Ok(())
    }
}

/// Lookup of materials by their code. This is the only collaborator the optimizer consumes.
pub trait MaterialCatalog {
    fn material_by_code(&self, code: &str) -> Option<&Material>;
}

impl MaterialCatalog for HashMap<String, Material> {
    fn material_by_code(&self, code: &str) -> Option<&Material> {
        self.get(code)
    }
}

impl MaterialCatalog for [Material] {
    fn material_by_code(&self, code: &str) -> Option<&Material> {
        self.iter().find(|m| m.code == code)
    }
}

impl MaterialCatalog for Vec<Material> {
    fn material_by_code(&self, code: &str) -> Option<&Material> {
        self.as_slice().material_by_code(code)
    }
}
