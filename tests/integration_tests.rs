use std::io::Write;

use pretty_assertions::assert_eq;
use tempfile::NamedTempFile;

use measurements_processor::processors::ParallelProcessor;
use measurements_processor::readers::MappedFile;
use measurements_processor::writers::ReportWriter;

/// Run the full map → chunk → aggregate → render pipeline over `input`.
fn process(input: &str, workers: usize, chunks_per_worker: usize) -> String {
    let mut file = NamedTempFile::new().expect("Failed to create temp file");
    file.write_all(input.as_bytes()).unwrap();

    let mapped = MappedFile::open(file.path()).unwrap();
    let table = ParallelProcessor::new(workers)
        .with_chunks_per_worker(chunks_per_worker)
        .aggregate(mapped.bytes(), None)
        .unwrap();
    String::from_utf8(ReportWriter::new().render(&table)).unwrap()
}

#[test]
fn test_single_record() {
    assert_eq!(process("Hamburg;12.0\n", 1, 1), "{Hamburg=12.0/12.0/12.0}\n");
}

#[test]
fn test_multiple_stations_and_records() {
    let input = "Berlin;10.0\nBerlin;20.0\nBogotá;15.5\nAmsterdam;-1.0\nAmsterdam;1.0\n";
    assert_eq!(
        process(input, 4, 1),
        "{Amsterdam=-1.0/0.0/1.0, Berlin=10.0/15.0/20.0, Bogotá=15.5/15.5/15.5}\n"
    );
}

#[test]
fn test_negative_mean_rounds_away_from_zero() {
    assert_eq!(
        process("X;-1.0\nX;-2.0\nX;-2.0\n", 1, 1),
        "{X=-2.0/-1.7/-1.0}\n"
    );
}

#[test]
fn test_multibyte_station_name_preserved() {
    assert_eq!(process("東京;23.4\n", 1, 1), "{東京=23.4/23.4/23.4}\n");
}

#[test]
fn test_empty_file() {
    assert_eq!(process("", 4, 1), "{}\n");
}

#[test]
fn test_missing_final_newline() {
    assert_eq!(
        process("Berlin;10.0\nHamburg;-3.4", 2, 1),
        "{Berlin=10.0/10.0/10.0, Hamburg=-3.4/-3.4/-3.4}\n"
    );
}

#[test]
fn test_chunk_count_invariance() {
    let mut input = String::new();
    for i in 0..100 {
        input.push_str(&format!("Station-{};{}.{}\n", i % 7, (i * 13) % 100, i % 10));
    }

    // One chunk and one chunk per record must render identically.
    let single = process(&input, 1, 1);
    let per_record = process(&input, 4, 25);
    assert_eq!(single, per_record);
}

#[test]
fn test_record_count_accounting() {
    let mut input = String::new();
    let records = 500;
    for i in 0..records {
        input.push_str(&format!("S{};{}.0\n", i % 11, i % 90));
    }

    let mut file = NamedTempFile::new().unwrap();
    file.write_all(input.as_bytes()).unwrap();

    let mapped = MappedFile::open(file.path()).unwrap();
    let table = ParallelProcessor::new(8)
        .aggregate(mapped.bytes(), None)
        .unwrap();

    assert_eq!(table.total_records(), records);
    assert_eq!(table.len(), 11);
}

#[test]
fn test_output_is_sorted_and_bounded() {
    let mut input = String::new();
    for i in 0..60 {
        input.push_str(&format!("Zone-{:02};{}.5\n", (i * 31) % 40, (i * 7) % 60));
        input.push_str(&format!("Zone-{:02};-{}.5\n", (i * 31) % 40, (i * 3) % 60));
    }

    let output = process(&input, 4, 2);
    let body = output
        .strip_prefix('{')
        .and_then(|s| s.strip_suffix("}\n"))
        .expect("report should be brace-wrapped");

    let mut previous: Option<&str> = None;
    for entry in body.split(", ") {
        let (station, values) = entry.split_once('=').expect("entry should contain '='");
        if let Some(prev) = previous {
            assert!(prev < station, "{prev} should sort before {station}");
        }
        previous = Some(station);

        let parts: Vec<f64> = values.split('/').map(|v| v.parse().unwrap()).collect();
        assert_eq!(parts.len(), 3);
        let (min, mean, max) = (parts[0], parts[1], parts[2]);
        assert!(min <= max);
        // mean is rounded to one decimal, so allow that much slack
        assert!(min - 0.05 <= mean && mean <= max + 0.05);
    }
}
