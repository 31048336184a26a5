use std::path::{Path, PathBuf};
use std::sync::LazyLock;
use std::time::Instant;

use anyhow::{Context, Result};
use log::info;
use thousands::Separable;

use sheetcut::cache::CacheBackend;
use sheetcut::service::OptimizeService;

use crate::io::output::SolutionOutput;

pub mod config;
pub mod file_cache;
pub mod io;

pub static EPOCH: LazyLock<Instant> = LazyLock::new(Instant::now);

/// Optimizes the request in `input` and writes `sol_<stem>.json` to `output_folder`.
pub fn process_request_file<B: CacheBackend>(
    service: &OptimizeService<B>,
    input: &Path,
    output_folder: &Path,
) -> Result<PathBuf> {
    let stem = input
        .file_stem()
        .and_then(|s| s.to_str())
        .with_context(|| format!("invalid input file name: {}", input.display()))?;

    let request = io::read_request(input)?;
    let response = service
        .optimize(&request)
        .with_context(|| format!("could not optimize {}", input.display()))?;

    let summary = &response.optimization_summary;
    info!(
        "[MAIN] {stem}: {} board(s), {} unplaced, {:.1}% waste, cost {} ({}, {})",
        summary.total_boards_used,
        response.unplaced_cuts.len(),
        summary.total_waste_percentage,
        (summary.total_cost.round() as i64).separate_with_commas(),
        if response.cached { "cached" } else { summary.optimization_time.as_str() },
        response.request_hash
    );

    let output = SolutionOutput {
        request,
        response,
        config: *service.config(),
    };
    let solution_path = output_folder.join(format!("sol_{stem}.json"));
    io::write_json(&output, &solution_path)?;
    Ok(solution_path)
}
