use std::path::PathBuf;

use clap::Parser;
use log::LevelFilter;

#[derive(Parser, Debug)]
#[command(author, version, about)]
pub struct Cli {
    /// Optimization requests, processed in parallel
    #[arg(short, long, value_name = "FILE", num_args = 1.., required = true)]
    pub input_files: Vec<PathBuf>,
    #[arg(short, long, value_name = "FOLDER")]
    pub solution_folder: PathBuf,
    #[arg(short, long, value_name = "FILE")]
    pub config_file: Option<PathBuf>,
    /// Folder to persist results in, results only live for the duration of the run if omitted
    #[arg(short = 'd', long, value_name = "FOLDER")]
    pub cache_dir: Option<PathBuf>,
    /// List this many of the most recently cached optimizations after processing
    #[arg(short, long, value_name = "N")]
    pub recent: Option<usize>,
    #[arg(
        short,
        long,
        value_name = "[off, error, warn, info, debug, trace]",
        default_value = "info"
    )]
    pub log_level: LevelFilter,
}
