use std::ops::Range;

use memchr::memchr;

/// Splits the mapped input into record-aligned byte ranges.
///
/// Every interior boundary lands on the byte after a newline, so no record
/// straddles two chunks and workers can parse their ranges independently.
#[derive(Debug, Clone)]
pub struct Chunker {
    target_chunks: usize,
}

impl Chunker {
    pub fn new(target_chunks: usize) -> Self {
        Self {
            target_chunks: target_chunks.max(1),
        }
    }

    /// Compute non-overlapping ranges covering all of `data`.
    ///
    /// Chunks may be slightly unequal: each nominal boundary advances to
    /// just past the next newline, and the final chunk absorbs whatever
    /// remains. Empty input yields no chunks.
    pub fn split(&self, data: &[u8]) -> Vec<Range<usize>> {
        if data.is_empty() {
            return Vec::new();
        }

        let stride = data.len().div_ceil(self.target_chunks);
        let mut chunks = Vec::with_capacity(self.target_chunks);
        let mut start = 0;
        while start < data.len() {
            let nominal = (start + stride).min(data.len());
            let end = if nominal == data.len() {
                nominal
            } else {
                match memchr(b'\n', &data[nominal - 1..]) {
                    Some(offset) => nominal + offset,
                    None => data.len(),
                }
            };
            chunks.push(start..end);
            start = end;
        }
        chunks
    }
}

impl Default for Chunker {
    fn default() -> Self {
        Self::new(num_cpus::get())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const INPUT: &[u8] = b"Berlin;10.0\nBerlin;20.0\nAmsterdam;-1.0\nHamburg;12.0\n";

    fn assert_chunks_valid(data: &[u8], chunks: &[Range<usize>]) {
        let mut expected_start = 0;
        for chunk in chunks {
            assert_eq!(chunk.start, expected_start);
            assert!(chunk.end > chunk.start);
            if chunk.end < data.len() {
                assert_eq!(data[chunk.end - 1], b'\n');
            }
            expected_start = chunk.end;
        }
        assert_eq!(expected_start, data.len());
    }

    #[test]
    fn test_single_chunk_covers_input() {
        let chunks = Chunker::new(1).split(INPUT);
        assert_eq!(chunks, vec![0..INPUT.len()]);
    }

    #[test]
    fn test_chunks_are_record_aligned() {
        for target in 1..=8 {
            let chunks = Chunker::new(target).split(INPUT);
            assert_chunks_valid(INPUT, &chunks);
        }
    }

    #[test]
    fn test_more_chunks_than_records() {
        let data = b"A;1.0\nB;2.0\n";
        let chunks = Chunker::new(64).split(data);
        assert_chunks_valid(data, &chunks);
        assert!(chunks.len() <= 2);
    }

    #[test]
    fn test_missing_final_newline() {
        let data = b"Berlin;10.0\nHamburg;12.0";
        let chunks = Chunker::new(4).split(data);
        assert_chunks_valid(data, &chunks);
    }

    #[test]
    fn test_empty_input_yields_no_chunks() {
        assert!(Chunker::new(4).split(b"").is_empty());
    }

    #[test]
    fn test_zero_target_is_clamped() {
        let chunks = Chunker::new(0).split(INPUT);
        assert_eq!(chunks, vec![0..INPUT.len()]);
    }
}
