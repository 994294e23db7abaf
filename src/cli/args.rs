use clap::Parser;
use std::path::PathBuf;

use crate::utils::constants::DEFAULT_INPUT_FILE;

#[derive(Parser)]
#[command(name = "measurements-processor")]
#[command(about = "Per-station min/mean/max temperature statistics")]
#[command(version)]
pub struct Cli {
    /// Input measurements file
    #[arg(default_value = DEFAULT_INPUT_FILE)]
    pub input: PathBuf,

    #[arg(short, long, help = "Output file path [default: stdout]")]
    pub output: Option<PathBuf>,

    #[arg(long, default_value_t = num_cpus::get())]
    pub max_workers: usize,

    #[arg(
        long,
        default_value = "1",
        help = "Chunks per worker; raise on inputs with skewed record lengths"
    )]
    pub chunks_per_worker: usize,

    #[arg(short, long, help = "Suppress the progress spinner")]
    pub quiet: bool,

    #[arg(short, long, help = "Enable verbose logging")]
    pub verbose: bool,
}
