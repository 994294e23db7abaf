/// Default input file
pub const DEFAULT_INPUT_FILE: &str = "./measurements.txt";

/// Station name grammar bound, in bytes
pub const MAX_STATION_LEN: usize = 100;

/// Largest measurement magnitude the grammar admits, in tenths
pub const MAX_ABS_TENTHS: i32 = 9_999;

/// Distinct stations in the canonical workload; tables pre-size for this
/// so the hot loop never resizes
pub const EXPECTED_STATIONS: usize = 10_000;
