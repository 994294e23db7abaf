use std::fs::File;
use std::io::{self, Write};
use std::time::Instant;

use tracing::info;

use crate::cli::args::Cli;
use crate::error::Result;
use crate::processors::ParallelProcessor;
use crate::readers::MappedFile;
use crate::utils::progress::ProgressReporter;
use crate::writers::ReportWriter;

pub fn run(cli: Cli) -> Result<()> {
    if cli.verbose {
        tracing_subscriber::fmt()
            .with_max_level(tracing::Level::DEBUG)
            .with_writer(io::stderr)
            .init();
    }

    let started = Instant::now();

    // The mapping stays alive until the report is written; station tables
    // borrow names out of it.
    let mapped = MappedFile::open(&cli.input)?;
    info!(path = %cli.input.display(), bytes = mapped.len(), "mapped input file");

    let progress = ProgressReporter::new_spinner("Aggregating measurements...", cli.quiet);

    let processor =
        ParallelProcessor::new(cli.max_workers).with_chunks_per_worker(cli.chunks_per_worker);
    let table = processor.aggregate(mapped.bytes(), Some(&progress))?;

    progress.finish_with_message(&format!("Aggregated {} stations", table.len()));

    let writer = ReportWriter::new();
    match &cli.output {
        Some(path) => {
            let mut file = File::create(path)?;
            writer.write_report(&table, &mut file)?;
        }
        None => {
            let stdout = io::stdout();
            let mut handle = stdout.lock();
            writer.write_report(&table, &mut handle)?;
            handle.flush()?;
        }
    }

    info!(
        stations = table.len(),
        records = table.total_records(),
        elapsed_ms = started.elapsed().as_millis() as u64,
        "processing complete"
    );

    Ok(())
}
