use crate::entities::GrainDirection;
use crate::error::{OptimizeError, OptimizeResult};
use serde::{Deserialize, Serialize};

/// Upper bound on the demanded quantity of a single piece
pub const MAX_QUANTITY: u32 = 10_000;

/// A rectangular piece to be cut, demanded `quantity` times from a specific material.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Piece {
    pub id: String,
    /// Code of the [`Material`](crate::entities::Material) the piece has to be cut from
    pub material: String,
    pub width: u32,
    pub height: u32,
    pub quantity: u32,
    pub can_rotate: bool,
    /// Pieces with a higher priority are placed first
    pub priority: i32,
    /// Grain the piece has to follow, if any
    pub grain: Option<GrainDirection>,
    pub label: Option<String>,
}

impl Piece {
    pub fn new(id: impl Into<String>, material: impl Into<String>, width: u32, height: u32) -> Self {
        Piece {
            id: id.into(),
            material: material.into(),
            width,
            height,
            quantity: 1,
            can_rotate: true,
            priority: 0,
            grain: None,
            label: None,
        }
    }

    pub fn with_quantity(mut self, quantity: u32) -> Self {
        self.quantity = quantity;
        self
    }

    pub fn with_rotation(mut self, can_rotate: bool) -> Self {
        self.can_rotate = can_rotate;
        self
    }

    pub fn with_priority(mut self, priority: i32) -> Self {
        self.priority = priority;
        self
    }

    pub fn with_grain(mut self, grain: Option<GrainDirection>) -> Self {
        self.grain = grain;
        self
    }

    pub fn with_label(mut self, label: Option<String>) -> Self {
        self.label = label;
        self
    }

    pub fn area(&self) -> u64 {
        self.width as u64 * self.height as u64
    }

    pub fn validate(&self) -> OptimizeResult<()> {
        let invalid = |reason: &str| OptimizeError::InvalidPiece {
            piece: self.id.clone(),
            reason: reason.to_string(),
        };
        if self.width == 0 || self.height == 0 {
            return Err(invalid("dimensions must be positive"));
        }
        if self.quantity == 0 {
            return Err(invalid("quantity must be at least 1"));
        }
        if self.quantity > MAX_QUANTITY {
            return Err(invalid(&format!("quantity must be at most {MAX_QUANTITY}")));
        }
        Ok(())
    }

    /// Expands the piece into `quantity` unit instances.
    /// Units get the id suffix `_k` (1-based) when more than one is demanded.
    pub fn expand(&self) -> impl Iterator<Item = UnitPiece> + '_ {
        (1..=self.quantity).map(move |k| UnitPiece {
            id: match self.quantity {
                1 => self.id.clone(),
                _ => format!("{}_{}", self.id, k),
            },
            material: self.material.clone(),
            width: self.width,
            height: self.height,
            can_rotate: self.can_rotate,
            priority: self.priority,
            grain: self.grain,
            label: self.label.clone(),
        })
    }
}

/// A single instance of a [`Piece`], as handled by the placement engine.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct UnitPiece {
    pub id: String,
    pub material: String,
    pub width: u32,
    pub height: u32,
    pub can_rotate: bool,
    pub priority: i32,
    pub grain: Option<GrainDirection>,
    pub label: Option<String>,
}

impl UnitPiece {
    pub fn area(&self) -> u64 {
        self.width as u64 * self.height as u64
    }
}
