use crate::entities::GrainDirection;
use serde::{Deserialize, Serialize};

/// External representation of an optimization request.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct OptimizeRequest {
    #[serde(default)]
    pub project_name: String,
    /// Demanded pieces
    pub cuts: Vec<CutItem>,
    /// Catalog of sheet materials the cuts may reference
    pub materials: Vec<ExtMaterial>,
    #[serde(default)]
    pub cutting_parameters: ExtCuttingParameters,
}

/// External representation of a [`Piece`](crate::entities::Piece).
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct CutItem {
    pub width: u32,
    pub height: u32,
    #[serde(default = "default_quantity")]
    pub quantity: u32,
    /// Code of the material to cut from
    pub material: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    #[serde(default = "default_true")]
    pub allow_rotation: bool,
    /// Grain the piece has to follow
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub force_grain: Option<GrainDirection>,
    /// Higher priorities are placed first
    #[serde(default)]
    pub priority: i32,
}

/// External representation of a [`Material`](crate::entities::Material).
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct ExtMaterial {
    pub code: String,
    pub width: u32,
    pub height: u32,
    /// Price of a single sheet
    #[serde(default)]
    pub price: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub grain_direction: Option<GrainDirection>,
    #[serde(default)]
    pub thickness: u32,
}

/// External representation of [`CuttingParameters`](crate::entities::CuttingParameters).
#[derive(Serialize, Deserialize, Clone, Copy, Debug, Default, PartialEq, Eq)]
#[serde(default)]
pub struct ExtCuttingParameters {
    pub kerf: u32,
    pub top_trim: u32,
    pub bottom_trim: u32,
    pub left_trim: u32,
    pub right_trim: u32,
}

/// External representation of the result of an optimization.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct OptimizeResponse {
    pub optimization_summary: OptimizationSummary,
    pub cost_summary: CostSummary,
    pub boards_layout: Vec<BoardLayout>,
    #[serde(default)]
    pub unplaced_cuts: Vec<UnplacedCut>,
    /// Whether the result was served from the cache
    #[serde(default)]
    pub cached: bool,
    /// Hex digest of the canonical request
    #[serde(default)]
    pub request_hash: String,
}

/// External representation of a [`SheetLayout`](crate::entities::SheetLayout).
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct BoardLayout {
    pub material: String,
    /// 1-based index of the board among the boards of its material
    pub index: usize,
    pub cuts_placed: Vec<PlacedCut>,
    pub utilization_percentage: f64,
    pub waste_pieces: Vec<WastePiece>,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct PlacedCut {
    pub id: String,
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    pub rotated: bool,
}

/// Free rectangle left on a board after all placements
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct WastePiece {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
    pub reusable: bool,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct MaterialCostSummary {
    pub material: String,
    pub boards_used: usize,
    pub unit_cost: f64,
    pub total_cost: f64,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct CostSummary {
    pub materials: Vec<MaterialCostSummary>,
    pub total_material_cost: f64,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct OptimizationSummary {
    pub project_name: String,
    pub total_boards_used: usize,
    pub total_cost: f64,
    pub total_waste_percentage: f64,
    /// Wall time of the optimization, e.g. `"0.012s"`
    pub optimization_time: String,
}

/// A unit piece that could not be placed on any board
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct UnplacedCut {
    pub id: String,
    pub material: String,
    pub width: u32,
    pub height: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
}

fn default_quantity() -> u32 {
    1
}

fn default_true() -> bool {
    true
}
