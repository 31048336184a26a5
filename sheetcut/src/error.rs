use thiserror::Error;

/// Axis of a sheet, used to report which trims make a material infeasible.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    Horizontal,
    Vertical,
}

impl std::fmt::Display for Axis {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Axis::Horizontal => write!(f, "horizontal"),
            Axis::Vertical => write!(f, "vertical"),
        }
    }
}

/// Reasons an optimization request is rejected before any placement takes place.
///
/// Pieces that simply do not fit are not errors: they are reported as unplaced in the result.
/// Cache failures never surface here either.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum OptimizeError {
    /// The demand list contains no pieces
    #[error("no pieces were provided")]
    EmptyInput,

    /// A piece references a material code absent from the catalog
    #[error("piece '{piece}' references unknown material '{material}'")]
    UnknownMaterial { piece: String, material: String },

    /// The trims along one axis consume the whole material
    #[error("{axis} trims ({trim}) leave no usable space on material '{material}' ({dimension})")]
    InfeasibleParameters {
        material: String,
        axis: Axis,
        trim: u32,
        dimension: u32,
    },

    /// A piece violates its value invariants
    #[error("invalid piece '{piece}': {reason}")]
    InvalidPiece { piece: String, reason: String },

    /// A material violates its value invariants
    #[error("invalid material '{material}': {reason}")]
    InvalidMaterial { material: String, reason: String },

    /// The canonical form of the request could not be serialized
    #[error("failed to canonicalize request: {0}")]
    Canonicalization(String),
}

pub type OptimizeResult<T> = Result<T, OptimizeError>;
