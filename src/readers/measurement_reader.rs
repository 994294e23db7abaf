use memchr::memchr;

use crate::models::temperature::parse_tenths;
use crate::utils::constants::MAX_STATION_LEN;

/// One decoded record: a station name borrowed from the mapping and the
/// measurement in tenths of a degree.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Measurement<'a> {
    pub station: &'a [u8],
    pub tenths: i32,
}

/// Iterates the records of one chunk without allocating.
///
/// The chunk is a concatenation of complete `station;value` lines; end of
/// input acts as an implicit terminator for a final record with no
/// trailing newline.
#[derive(Debug)]
pub struct MeasurementIterator<'a> {
    data: &'a [u8],
    pos: usize,
}

impl<'a> MeasurementIterator<'a> {
    pub fn new(data: &'a [u8]) -> Self {
        Self { data, pos: 0 }
    }
}

impl<'a> Iterator for MeasurementIterator<'a> {
    type Item = Measurement<'a>;

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        while self.pos < self.data.len() {
            let rest = &self.data[self.pos..];
            let line = match memchr(b'\n', rest) {
                Some(newline) => &rest[..newline],
                None => rest,
            };
            self.pos += line.len() + 1;

            if line.is_empty() {
                continue;
            }

            let separator = match memchr(b';', line) {
                Some(separator) => separator,
                None => {
                    // Trusted grammar; a record without a separator is
                    // dropped rather than checked for on the hot path.
                    debug_assert!(false, "record without ';' separator");
                    continue;
                }
            };

            let station = &line[..separator];
            debug_assert!(!station.is_empty() && station.len() <= MAX_STATION_LEN);

            return Some(Measurement {
                station,
                tenths: parse_tenths(&line[separator + 1..]),
            });
        }
        None
    }
}
