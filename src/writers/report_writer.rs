use std::io::Write;

use crate::error::Result;
use crate::models::format_tenths;
use crate::processors::StationTable;

/// Renders the global aggregate as the canonical one-line report.
///
/// Stations are ordered by ascending byte-lexicographic name, each
/// contributing `name=min/mean/max` with one-decimal values, the whole
/// line wrapped in braces and terminated by a newline. Station names pass
/// through as raw bytes, so the rendering is deterministic for any input
/// the grammar admits.
pub struct ReportWriter;

impl ReportWriter {
    pub fn new() -> Self {
        Self
    }

    /// Build the full report line, including the trailing newline.
    pub fn render(&self, table: &StationTable<'_>) -> Vec<u8> {
        let mut entries: Vec<_> = table.entries().collect();
        entries.sort_unstable_by_key(|(station, _)| *station);

        let mut out = Vec::with_capacity(entries.len() * 32 + 3);
        out.push(b'{');
        for (i, (station, aggregate)) in entries.into_iter().enumerate() {
            if i > 0 {
                out.extend_from_slice(b", ");
            }
            out.extend_from_slice(station);
            out.push(b'=');
            format_tenths(aggregate.min, &mut out);
            out.push(b'/');
            format_tenths(aggregate.mean_tenths(), &mut out);
            out.push(b'/');
            format_tenths(aggregate.max, &mut out);
        }
        out.extend_from_slice(b"}\n");
        out
    }

    /// Render the report and write it in a single call.
    ///
    /// The line is assembled in memory first, so a write failure can
    /// never leave a partial report on the output.
    pub fn write_report<W: Write>(&self, table: &StationTable<'_>, writer: &mut W) -> Result<()> {
        writer.write_all(&self.render(table))?;
        Ok(())
    }
}

impl Default for ReportWriter {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rendered(table: &StationTable<'_>) -> String {
        String::from_utf8(ReportWriter::new().render(table)).unwrap()
    }

    #[test]
    fn test_render_single_station() {
        let mut table = StationTable::new();
        table.record(b"Hamburg", 120);
        assert_eq!(rendered(&table), "{Hamburg=12.0/12.0/12.0}\n");
    }

    #[test]
    fn test_render_sorts_stations_lexicographically() {
        let mut table = StationTable::new();
        table.record(b"Berlin", 100);
        table.record(b"Berlin", 200);
        table.record(b"Amsterdam", -10);
        table.record(b"Amsterdam", 10);

        assert_eq!(
            rendered(&table),
            "{Amsterdam=-1.0/0.0/1.0, Berlin=10.0/15.0/20.0}\n"
        );
    }

    #[test]
    fn test_render_preserves_multibyte_station_names() {
        let mut table = StationTable::new();
        table.record("東京".as_bytes(), 234);
        assert_eq!(rendered(&table), "{東京=23.4/23.4/23.4}\n");
    }

    #[test]
    fn test_render_empty_table() {
        let table = StationTable::new();
        assert_eq!(rendered(&table), "{}\n");
    }

    #[test]
    fn test_render_negative_mean_rounding() {
        let mut table = StationTable::new();
        table.record(b"X", -10);
        table.record(b"X", -20);
        table.record(b"X", -20);
        assert_eq!(rendered(&table), "{X=-2.0/-1.7/-1.0}\n");
    }
}
