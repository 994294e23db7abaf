use std::sync::atomic::{AtomicUsize, Ordering};

use rayon::prelude::*;
use tracing::debug;

use crate::error::{ProcessingError, Result};
use crate::processors::StationTable;
use crate::readers::{Chunker, MeasurementIterator};
use crate::utils::progress::ProgressReporter;

/// Fork-join aggregation over record-aligned chunks of the mapped input.
///
/// Each worker owns one chunk and one station table; the tables are
/// pairwise merged once all workers finish. There is no shared mutable
/// state during the parallel phase.
pub struct ParallelProcessor {
    max_workers: usize,
    chunks_per_worker: usize,
}

impl ParallelProcessor {
    pub fn new(max_workers: usize) -> Self {
        Self {
            max_workers: max_workers.max(1),
            chunks_per_worker: 1,
        }
    }

    /// Split into more, smaller chunks per worker. Smooths out stragglers
    /// on inputs with skewed record lengths.
    pub fn with_chunks_per_worker(mut self, chunks_per_worker: usize) -> Self {
        self.chunks_per_worker = chunks_per_worker.max(1);
        self
    }

    /// Aggregate every record of `data` into a single station table.
    ///
    /// The returned table borrows station names from `data`, so it is
    /// tied to the mapping's lifetime.
    pub fn aggregate<'a>(
        &self,
        data: &'a [u8],
        progress: Option<&ProgressReporter>,
    ) -> Result<StationTable<'a>> {
        let chunker = Chunker::new(self.max_workers * self.chunks_per_worker);
        let chunks = chunker.split(data);
        debug!(bytes = data.len(), chunks = chunks.len(), "chunked input");

        if let Some(p) = progress {
            p.set_message(&format!("Aggregating {} chunks...", chunks.len()));
        }

        // Configure Rayon thread pool
        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(self.max_workers)
            .build()
            .map_err(|e| ProcessingError::Config(e.to_string()))?;

        let completed = AtomicUsize::new(0);

        let table = pool.install(|| {
            chunks
                .par_iter()
                .map(|range| {
                    let table = Self::aggregate_chunk(&data[range.clone()]);

                    // Update progress
                    let count = completed.fetch_add(1, Ordering::Relaxed) + 1;
                    if let Some(p) = progress {
                        p.update(count as u64);
                    }

                    table
                })
                .reduce_with(StationTable::merged)
                .unwrap_or_default()
        });

        debug!(
            stations = table.len(),
            records = table.total_records(),
            "merged chunk aggregates"
        );

        Ok(table)
    }

    /// Sequentially fold one chunk into a fresh table.
    fn aggregate_chunk(chunk: &[u8]) -> StationTable<'_> {
        let mut table = StationTable::new();
        for measurement in MeasurementIterator::new(chunk) {
            table.record(measurement.station, measurement.tenths);
        }
        table
    }
}

impl Default for ParallelProcessor {
    fn default() -> Self {
        Self::new(num_cpus::get())
    }
}
