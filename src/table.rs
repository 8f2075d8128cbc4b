// src/table.rs

use std::io::{Error as IoError, ErrorKind};
use std::path::Path;

use crate::poly_counts::PolyCounts;
use crate::types::{CountRecord, READS_KEY};

/// Column names of every count table, partial or final.
pub const TABLE_HEADER: [&str; 3] = ["path", "count_variable", "count_value"];

/// Rows for one file: `reads` first, then one row per histogram entry.
pub fn file_records(source_path: &str, counts: &PolyCounts) -> Vec<CountRecord> {
    let mut records = Vec::with_capacity(counts.histogram.len() + 1);
    records.push(CountRecord::new(source_path, READS_KEY, counts.reads));
    for (key, &value) in &counts.histogram {
        records.push(CountRecord::new(source_path, key.as_str(), value));
    }
    records
}

/// Write a tab-separated count table. The header is always written, so an
/// empty `records` yields a header-only table.
pub fn write_table<'a, P, I>(path: P, records: I) -> csv::Result<()>
where
    P: AsRef<Path>,
    I: IntoIterator<Item = &'a CountRecord>,
{
    let mut writer = csv::WriterBuilder::new()
        .delimiter(b'\t')
        .has_headers(false)
        .from_path(path)?;

    writer.write_record(TABLE_HEADER)?;
    for record in records {
        writer.write_record([
            record.source_path.as_str(),
            record.metric_key.as_str(),
            record.value.to_string().as_str(),
        ])?;
    }
    writer.flush()?;
    Ok(())
}

/// Read a table written by [`write_table`]. A wrong header, a row with the
/// wrong number of fields or a non-integer count is an error.
pub fn read_table<P: AsRef<Path>>(path: P) -> csv::Result<Vec<CountRecord>> {
    let mut reader = csv::ReaderBuilder::new()
        .delimiter(b'\t')
        .has_headers(true)
        .from_path(path)?;

    let headers = reader.headers()?;
    if headers.iter().ne(TABLE_HEADER) {
        return Err(invalid_data(format!(
            "unexpected header {:?}",
            headers.iter().collect::<Vec<_>>()
        )));
    }

    let mut records = Vec::new();
    for row in reader.records() {
        let row = row?;
        let value = row[2].parse::<u64>().map_err(|e| {
            invalid_data(format!("bad count_value {:?} for {}: {e}", &row[2], &row[1]))
        })?;
        records.push(CountRecord::new(&row[0], &row[1], value));
    }
    Ok(records)
}

fn invalid_data(msg: String) -> csv::Error {
    IoError::new(ErrorKind::InvalidData, msg).into()
}
