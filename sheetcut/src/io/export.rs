use crate::entities::SheetLayout;
use crate::io::ext_repr::{
    BoardLayout, CostSummary, MaterialCostSummary, OptimizationSummary, OptimizeResponse,
    PlacedCut, UnplacedCut, WastePiece,
};
use crate::packing::Solution;
use crate::util::OptimizerConfig;
use itertools::Itertools;

/// Exports a [`Solution`] by composing an [`OptimizeResponse`] from it.
/// The response is neither cached nor tagged with a request hash yet.
pub fn export_solution(
    solution: &Solution,
    project_name: &str,
    config: &OptimizerConfig,
) -> OptimizeResponse {
    let boards_layout = solution
        .layouts
        .iter()
        .map(|l| export_layout(l, config.reusable_min_side))
        .collect_vec();

    let cost_summary = export_cost_summary(solution);

    let total_waste_percentage = match solution.n_sheets() {
        0 => 0.0,
        _ => (1.0 - solution.efficiency()) * 100.0,
    };

    let optimization_summary = OptimizationSummary {
        project_name: project_name.to_string(),
        total_boards_used: solution.n_sheets(),
        total_cost: cost_summary.total_material_cost,
        total_waste_percentage,
        optimization_time: format!("{:.3}s", solution.elapsed.as_secs_f64()),
    };

    let unplaced_cuts = solution
        .unplaced
        .iter()
        .map(|u| UnplacedCut {
            id: u.id.clone(),
            material: u.material.clone(),
            width: u.width,
            height: u.height,
            label: u.label.clone(),
        })
        .collect_vec();

    OptimizeResponse {
        optimization_summary,
        cost_summary,
        boards_layout,
        unplaced_cuts,
        cached: false,
        request_hash: String::new(),
    }
}

/// Remainders with both sides of at least `reusable_min_side` are marked reusable.
pub fn export_layout(layout: &SheetLayout, reusable_min_side: u32) -> BoardLayout {
    BoardLayout {
        material: layout.material.code.clone(),
        index: layout.index,
        cuts_placed: layout
            .placed
            .iter()
            .map(|p| PlacedCut {
                id: p.piece_id.clone(),
                x: p.x,
                y: p.y,
                width: p.width,
                height: p.height,
                label: p.label.clone(),
                rotated: p.rotated,
            })
            .collect(),
        utilization_percentage: layout.efficiency() * 100.0,
        waste_pieces: layout
            .remainders
            .iter()
            .map(|r| WastePiece {
                x: r.x,
                y: r.y,
                width: r.width,
                height: r.height,
                reusable: r.width >= reusable_min_side && r.height >= reusable_min_side,
            })
            .collect(),
    }
}

pub fn export_cost_summary(solution: &Solution) -> CostSummary {
    let materials = solution
        .sheets_per_material()
        .into_iter()
        .map(|(material, boards_used)| MaterialCostSummary {
            material: material.code.clone(),
            boards_used,
            unit_cost: material.cost_per_unit,
            total_cost: material.cost_per_unit * boards_used as f64,
        })
        .collect_vec();
    let total_material_cost = materials.iter().map(|m| m.total_cost).sum();
    CostSummary {
        materials,
        total_material_cost,
    }
}
