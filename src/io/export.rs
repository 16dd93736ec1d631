//! CSV export for computed schedules.

use std::fs::File;
use std::io::{self, Write};
use std::path::Path;

use crate::sched::HourRecord;

/// Schema v1 column header for CSV telemetry export.
const HEADER: &str = "hour,spot_price,load_kwh,pv_kwh,net_load_kw,\
                       grid_kw,battery_kw,soc_percent";

/// Exports hour records to a CSV file at the given path.
///
/// Writes a header row followed by one data row per hour using the schema v1
/// column layout. Produces deterministic output for identical inputs.
///
/// # Errors
///
/// Returns an `io::Error` if file creation or writing fails.
pub fn export_csv(records: &[HourRecord], path: &Path) -> io::Result<()> {
    let file = File::create(path)?;
    let buf = io::BufWriter::new(file);
    write_csv(records, buf)
}

/// Writes hour records as CSV to any writer.
///
/// # Errors
///
/// Returns an `io::Error` if writing fails.
pub fn write_csv(records: &[HourRecord], writer: impl Write) -> io::Result<()> {
    let mut wtr = csv::WriterBuilder::new().from_writer(writer);

    // Header
    wtr.write_record(HEADER.split(',').map(str::trim))?;

    // Data rows
    for r in records {
        wtr.write_record(&[
            r.hour.to_string(),
            format!("{:.4}", r.spot_price),
            format!("{:.4}", r.load_kwh),
            format!("{:.4}", r.pv_kwh),
            format!("{:.4}", r.net_load_kw),
            format!("{:.4}", r.grid_kw),
            format!("{:.4}", r.battery_kw()),
            format!("{:.4}", r.soc_percent),
        ])?;
    }

    wtr.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_record(hour: usize) -> HourRecord {
        HourRecord {
            hour,
            spot_price: 0.12,
            load_kwh: 1.5,
            pv_kwh: 0.5,
            net_load_kw: 1.0,
            grid_kw: 3.0,
            soc_percent: 64.8,
        }
    }

    #[test]
    fn header_matches_schema_v1() {
        let records = vec![make_record(0)];
        let mut buf = Vec::new();
        write_csv(&records, &mut buf).ok();
        let output = String::from_utf8(buf).ok();
        let first_line = output.as_deref().unwrap_or("").lines().next().unwrap_or("");
        assert_eq!(
            first_line,
            "hour,spot_price,load_kwh,pv_kwh,net_load_kw,grid_kw,battery_kw,soc_percent"
        );
    }

    #[test]
    fn row_count_matches_horizon() {
        let records: Vec<HourRecord> = (0..24).map(make_record).collect();
        let mut buf = Vec::new();
        write_csv(&records, &mut buf).ok();
        let output = String::from_utf8(buf).ok();
        let lines: Vec<&str> = output.as_deref().unwrap_or("").lines().collect();
        // 1 header + 24 data rows
        assert_eq!(lines.len(), 25);
    }

    #[test]
    fn deterministic_output() {
        let records: Vec<HourRecord> = (0..5).map(make_record).collect();
        let mut buf1 = Vec::new();
        let mut buf2 = Vec::new();
        write_csv(&records, &mut buf1).ok();
        write_csv(&records, &mut buf2).ok();
        assert_eq!(buf1, buf2);
    }

    #[test]
    fn round_trip_parseable() {
        let records: Vec<HourRecord> = (0..3).map(make_record).collect();
        let mut buf = Vec::new();
        write_csv(&records, &mut buf).ok();

        let mut rdr = csv::ReaderBuilder::new().from_reader(buf.as_slice());
        let headers = rdr.headers().cloned().ok();
        assert_eq!(headers.as_ref().map(csv::StringRecord::len), Some(8));

        let mut row_count = 0;
        for record in rdr.records() {
            let rec = record.ok();
            assert!(rec.is_some(), "every row should parse");
            let rec = rec.as_ref();
            // Numeric columns parse as f32
            for i in 1..8 {
                let val: Result<f32, _> = rec.unwrap()[i].parse();
                assert!(val.is_ok(), "column {i} should parse as f32");
            }
            row_count += 1;
        }
        assert_eq!(row_count, 3);
    }
}
