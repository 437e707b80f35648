//! Loading of a previously written records file.
//!
//! Lets the estimate stage run on its own, starting from the
//! `date,ticket,title,activity_type,description` file produced by the parse
//! stage instead of the feed.

use std::path::Path;

use hours_core::error::{HoursError, Result};
use hours_core::models::NormalizedRecord;
use tracing::debug;

/// Read every record from the CSV file at `path`.
///
/// Columns are matched by header name. A missing file or a malformed row is
/// fatal for the run.
pub fn load_records(path: &Path) -> Result<Vec<NormalizedRecord>> {
    let file = std::fs::File::open(path).map_err(|source| HoursError::FileRead {
        path: path.to_path_buf(),
        source,
    })?;

    let records = read_records(file)?;
    debug!("Loaded {} records from {}", records.len(), path.display());
    Ok(records)
}

/// Read records from any CSV source with a header row.
pub fn read_records<R: std::io::Read>(reader: R) -> Result<Vec<NormalizedRecord>> {
    let mut csv_reader = csv::ReaderBuilder::new().has_headers(true).from_reader(reader);

    let mut records = Vec::new();
    for row in csv_reader.deserialize() {
        let record: NormalizedRecord = row?;
        records.push(record);
    }
    Ok(records)
}

#[cfg(test)]
mod tests {
    use super::*;
    use hours_core::models::ActivityType;
    use tempfile::TempDir;

    const RECORDS: &str = "\
date,ticket,title,activity_type,description
2024-03-05 14:07,ABC-7,Fix login,Commented,Jane commented on ABC-7
2024-03-05 15:00,ABC-7,\"Fix login, again\",Status -> In Progress,\"She said \"\"go\"\"\"
not a date,,,Activity,
";

    #[test]
    fn test_read_records_maps_columns() {
        let records = read_records(RECORDS.as_bytes()).unwrap();
        assert_eq!(records.len(), 3);

        assert_eq!(records[0].timestamp, "2024-03-05 14:07");
        assert_eq!(records[0].ticket, "ABC-7");
        assert_eq!(records[0].title, "Fix login");
        assert_eq!(records[0].activity_type, ActivityType::Commented);
        assert_eq!(records[0].description, "Jane commented on ABC-7");
    }

    #[test]
    fn test_read_records_handles_quoting() {
        let records = read_records(RECORDS.as_bytes()).unwrap();
        assert_eq!(records[1].title, "Fix login, again");
        assert_eq!(records[1].description, "She said \"go\"");
        assert_eq!(
            records[1].activity_type,
            ActivityType::Status("In Progress".to_string())
        );
    }

    #[test]
    fn test_read_records_keeps_empty_fields() {
        let records = read_records(RECORDS.as_bytes()).unwrap();
        assert_eq!(records[2].timestamp, "not a date");
        assert_eq!(records[2].ticket, "");
        assert_eq!(records[2].activity_type, ActivityType::Activity);
        assert_eq!(records[2].description, "");
    }

    #[test]
    fn test_columns_matched_by_name() {
        let csv = "ticket,date,activity_type,title,description\nABC-1,2024-01-01 10:00,Created,T,D\n";
        let records = read_records(csv.as_bytes()).unwrap();
        assert_eq!(records[0].ticket, "ABC-1");
        assert_eq!(records[0].timestamp, "2024-01-01 10:00");
        assert_eq!(records[0].activity_type, ActivityType::Created);
    }

    #[test]
    fn test_missing_column_is_an_error() {
        let csv = "date,ticket\n2024-01-01,ABC-1\n";
        let err = read_records(csv.as_bytes()).unwrap_err();
        assert!(matches!(err, HoursError::Csv(_)));
    }

    #[test]
    fn test_load_records_missing_file() {
        let tmp = TempDir::new().unwrap();
        let err = load_records(&tmp.path().join("absent.csv")).unwrap_err();
        assert!(matches!(err, HoursError::FileRead { .. }));
    }
}
