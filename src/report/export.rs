//! CSV export of the metric series.
//!
//! One header row with the record field names, one row per record, no
//! index column.

use crate::error::Result;
use crate::models::{MetricRecord, MetricSeries};
use std::fs::File;
use std::io::Write;
use std::path::Path;
use tracing::debug;

/// Write `series` as CSV. The header is written even for an empty series.
pub fn write_csv<W: Write>(series: &MetricSeries, writer: W) -> Result<()> {
    let mut csv_writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(writer);

    csv_writer.write_record(MetricRecord::FIELD_NAMES)?;
    for record in series {
        csv_writer.serialize(record)?;
    }
    csv_writer.flush()?;

    Ok(())
}

/// Write `series` as CSV to a file, replacing it if present.
pub fn write_csv_file(series: &MetricSeries, path: &Path) -> Result<()> {
    let file = File::create(path)?;
    write_csv(series, file)?;
    debug!("Wrote {} records to {}", series.len(), path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generator::{generate, MockFormula};
    use crate::models::{DateRange, Platform, PlatformFilter};
    use chrono::NaiveDate;
    use std::io::Read;

    fn read_csv<R: Read>(reader: R) -> Result<MetricSeries> {
        let mut csv_reader = csv::Reader::from_reader(reader);
        let records = csv_reader
            .deserialize::<MetricRecord>()
            .collect::<std::result::Result<Vec<_>, csv::Error>>()?;
        Ok(MetricSeries::new(records))
    }

    fn sample_series() -> MetricSeries {
        let range = DateRange::new(
            NaiveDate::from_ymd_opt(2025, 1, 1).unwrap(),
            NaiveDate::from_ymd_opt(2025, 1, 10).unwrap(),
        )
        .unwrap();
        generate(&MockFormula::default(), &range, &Platform::ALL, 1300)
    }

    fn to_string(series: &MetricSeries) -> String {
        let mut buf = Vec::new();
        write_csv(series, &mut buf).unwrap();
        String::from_utf8(buf).unwrap()
    }

    #[test]
    fn test_header_and_first_row() {
        let csv = to_string(&sample_series());
        let mut lines = csv.lines();

        assert_eq!(
            lines.next(),
            Some("date,platform,followers,engagement_rate,reach,likes,comments,shares")
        );
        assert_eq!(
            lines.next(),
            Some("2025-01-01,Instagram,6300,3.5,1000,200,20,10")
        );
        assert_eq!(csv.lines().count(), 31);
    }

    #[test]
    fn test_round_trip() {
        let series = sample_series();
        let parsed = read_csv(to_string(&series).as_bytes()).unwrap();
        assert_eq!(parsed, series);

        let tiktok = series.filter(PlatformFilter::Only(Platform::TikTok));
        assert_eq!(read_csv(to_string(&tiktok).as_bytes()).unwrap(), tiktok);
    }

    #[test]
    fn test_empty_series_writes_header_only() {
        let csv = to_string(&MetricSeries::default());
        assert_eq!(
            csv,
            "date,platform,followers,engagement_rate,reach,likes,comments,shares\n"
        );
        assert!(read_csv(csv.as_bytes()).unwrap().is_empty());
    }

    #[test]
    fn test_malformed_row_is_an_error() {
        let input = "date,platform,followers,engagement_rate,reach,likes,comments,shares\n\
                     2025-01-01,MySpace,1,1.0,1,1,1,1\n";
        assert!(read_csv(input.as_bytes()).is_err());
    }

    #[test]
    fn test_write_csv_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("social_data.csv");
        let series = sample_series();

        write_csv_file(&series, &path).unwrap();
        let parsed = read_csv(File::open(&path).unwrap()).unwrap();
        assert_eq!(parsed.len(), 30);
        assert_eq!(parsed, series);
    }
}
