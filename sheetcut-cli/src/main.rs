use std::fs;
use std::fs::File;
use std::io::BufReader;
use std::sync::Arc;

use anyhow::{Context, Result, bail};
use clap::Parser as ClapParser;
use log::{error, info, warn};
use rayon::prelude::*;

use sheetcut::cache::{CacheBackend, MemoryBackend, ResultCache};
use sheetcut::service::OptimizeService;
use sheetcut_cli::config::AppConfig;
use sheetcut_cli::file_cache::FileBackend;
use sheetcut_cli::io;
use sheetcut_cli::io::cli::Cli;
use sheetcut_cli::process_request_file;

fn main() -> Result<()> {
    let args = Cli::parse();
    io::init_logger(args.log_level)?;

    let config = match &args.config_file {
        None => {
            warn!("[MAIN] No config file provided, use --config-file to provide a custom config");
            AppConfig::default()
        }
        Some(config_file) => {
            let file = File::open(config_file)
                .with_context(|| format!("could not open config file: {}", config_file.display()))?;
            let reader = BufReader::new(file);
            serde_json::from_reader(reader).context("incorrect config file format")?
        }
    };
    info!("[MAIN] Successfully parsed AppConfig: {config:?}");

    let backend: Arc<dyn CacheBackend> = match &args.cache_dir {
        Some(dir) => {
            info!("[MAIN] caching results in {}", dir.display());
            Arc::new(FileBackend::new(dir).context("could not open cache folder")?)
        }
        None => Arc::new(MemoryBackend::new()),
    };
    let service = OptimizeService::new(config.optimizer, ResultCache::new(backend, config.cache));

    if !args.solution_folder.exists() {
        fs::create_dir_all(&args.solution_folder).with_context(|| {
            format!("could not create solution folder: {}", args.solution_folder.display())
        })?;
    }

    let failures = args
        .input_files
        .par_iter()
        .filter_map(|input| {
            process_request_file(&service, input, &args.solution_folder)
                .inspect_err(|e| error!("[MAIN] {}: {e:#}", input.display()))
                .err()
        })
        .count();

    if let Some(n) = args.recent {
        for entry in service.recent(0, n) {
            let summary = &entry.result.optimization_summary;
            info!(
                "[MAIN] {} {} '{}': {} board(s), cost {:.2}",
                entry.timestamp_utc,
                entry.request_hash,
                summary.project_name,
                summary.total_boards_used,
                summary.total_cost
            );
        }
    }

    if failures > 0 {
        bail!("{failures} of {} request(s) failed", args.input_files.len());
    }
    Ok(())
}
