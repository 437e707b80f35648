//! CSV output for normalized records and hour estimates.
//!
//! Fields containing the delimiter, a quote or a line break are quoted, with
//! embedded quotes doubled. Rows end in `\n`.

use std::io::Write;
use std::path::{Path, PathBuf};

use hours_core::error::{HoursError, Result};
use hours_core::models::{EstimateRow, NormalizedRecord};
use serde::Serialize;
use tracing::debug;

/// Header of the records file.
pub const RECORDS_HEADER: [&str; 5] = ["date", "ticket", "title", "activity_type", "description"];

/// Header of the estimates file.
pub const ESTIMATES_HEADER: [&str; 6] = [
    "date",
    "ticket",
    "title",
    "estimated_hours",
    "activity_count",
    "activity_breakdown",
];

// ── Writers ───────────────────────────────────────────────────────────────────

/// Write records as CSV to any sink.
pub fn write_records<W: Write>(sink: W, records: &[NormalizedRecord]) -> Result<()> {
    write_rows(sink, &RECORDS_HEADER, records)
}

/// Write estimates as CSV to any sink.
pub fn write_estimates<W: Write>(sink: W, rows: &[EstimateRow]) -> Result<()> {
    write_rows(sink, &ESTIMATES_HEADER, rows)
}

/// Render records as a CSV string.
pub fn records_to_csv(records: &[NormalizedRecord]) -> Result<String> {
    let mut buf = Vec::new();
    write_records(&mut buf, records)?;
    Ok(String::from_utf8_lossy(&buf).into_owned())
}

/// Render estimates as a CSV string.
pub fn estimates_to_csv(rows: &[EstimateRow]) -> Result<String> {
    let mut buf = Vec::new();
    write_estimates(&mut buf, rows)?;
    Ok(String::from_utf8_lossy(&buf).into_owned())
}

// ── Files ─────────────────────────────────────────────────────────────────────

/// Atomically write the records file at `path`.
pub fn save_records(path: &Path, records: &[NormalizedRecord]) -> Result<()> {
    let csv = records_to_csv(records)?;
    write_atomic(path, csv.as_bytes())?;
    debug!("Wrote {} records to {}", records.len(), path.display());
    Ok(())
}

/// Atomically write the estimates file at `path`.
pub fn save_estimates(path: &Path, rows: &[EstimateRow]) -> Result<()> {
    let csv = estimates_to_csv(rows)?;
    write_atomic(path, csv.as_bytes())?;
    debug!("Wrote {} estimates to {}", rows.len(), path.display());
    Ok(())
}

// ── Internal helpers ──────────────────────────────────────────────────────────

/// Header is written explicitly so that an empty table still gets one.
fn write_rows<W: Write, T: Serialize>(sink: W, header: &[&str], rows: &[T]) -> Result<()> {
    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .terminator(csv::Terminator::Any(b'\n'))
        .from_writer(sink);

    writer.write_record(header)?;
    for row in rows {
        writer.serialize(row)?;
    }
    writer.flush()?;
    Ok(())
}

/// Write to a sibling temp file then rename, so `path` never holds a
/// partially written table.
fn write_atomic(path: &Path, contents: &[u8]) -> Result<()> {
    let write_err = |source| HoursError::FileWrite {
        path: path.to_path_buf(),
        source,
    };

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(write_err)?;
    }

    let tmp = temp_path(path);
    std::fs::write(&tmp, contents).map_err(write_err)?;
    std::fs::rename(&tmp, path).map_err(|source| {
        let _ = std::fs::remove_file(&tmp);
        write_err(source)
    })?;
    Ok(())
}

fn temp_path(path: &Path) -> PathBuf {
    let mut name = path.as_os_str().to_owned();
    name.push(".tmp");
    PathBuf::from(name)
}

// ── Tests ─────────────────────────────────────────────────────────────────────
