//! Fixed-width console preview of normalized records.
//!
//! Informational only: the column layout is not a contract other tools
//! depend on.

use hours_core::formatting::{truncate_chars, truncate_with_ellipsis};
use hours_core::models::NormalizedRecord;
use unicode_width::UnicodeWidthStr;

/// Width of the date column.
pub const DATE_WIDTH: usize = 18;
/// Width of the ticket column.
pub const TICKET_WIDTH: usize = 12;
/// Width of the activity column.
pub const ACTIVITY_WIDTH: usize = 28;
/// Width of the summary column; longer summaries are cut silently.
pub const SUMMARY_WIDTH: usize = 48;
/// Descriptions longer than this are shortened and marked with `...`.
pub const DESCRIPTION_MAX: usize = 100;

/// Extra dashes drawn past the header under the open-ended description column.
const RULE_OVERHANG: usize = 30;

/// Render the preview table: header, dash rule, then one line per record.
///
/// Every line ends with a newline.
pub fn render_records_table(records: &[NormalizedRecord]) -> String {
    let header = format!(
        "{} {} {} {} Description",
        pad("Date", DATE_WIDTH),
        pad("Ticket", TICKET_WIDTH),
        pad("Activity", ACTIVITY_WIDTH),
        pad("Summary", SUMMARY_WIDTH),
    );

    let mut out = String::new();
    out.push_str(&header);
    out.push('\n');
    out.push_str(&"-".repeat(header.width() + RULE_OVERHANG));
    out.push('\n');

    for record in records {
        out.push_str(&render_row(record));
        out.push('\n');
    }

    out
}

/// Render a single record line (without trailing newline).
pub fn render_row(record: &NormalizedRecord) -> String {
    let activity = record.activity_type.to_string();
    format!(
        "{} {} {} {} {}",
        pad(&record.timestamp, DATE_WIDTH),
        pad(&record.ticket, TICKET_WIDTH),
        pad(&activity, ACTIVITY_WIDTH),
        pad(truncate_chars(&record.title, SUMMARY_WIDTH), SUMMARY_WIDTH),
        truncate_with_ellipsis(&record.description, DESCRIPTION_MAX),
    )
}

/// Left-align `text` in a column `width` terminal cells wide. Text already
/// wider than the column is left as is.
fn pad(text: &str, width: usize) -> String {
    let fill = width.saturating_sub(text.width());
    format!("{}{}", text, " ".repeat(fill))
}

#[cfg(test)]
mod tests {
    use super::*;
    use hours_core::models::ActivityType;

    fn record(title: &str, description: &str) -> NormalizedRecord {
        NormalizedRecord {
            timestamp: "2024-03-05 14:07".to_string(),
            ticket: "ABC-7".to_string(),
            title: title.to_string(),
            activity_type: ActivityType::Status("In Progress".to_string()),
            description: description.to_string(),
        }
    }

    #[test]
    fn test_header_and_rule() {
        let table = render_records_table(&[]);
        let lines: Vec<&str> = table.lines().collect();

        assert_eq!(lines.len(), 2);
        assert!(lines[0].starts_with("Date               Ticket       Activity"));
        assert!(lines[0].ends_with("Summary                                          Description"));
        assert_eq!(lines[1].len(), lines[0].len() + 30);
        assert!(lines[1].chars().all(|c| c == '-'));
    }

    #[test]
    fn test_row_columns_are_aligned() {
        let row = render_row(&record("Fix login", "Jane moved it"));

        assert_eq!(&row[..19], "2024-03-05 14:07   ");
        assert_eq!(&row[19..32], "ABC-7        ");
        assert!(row[32..].starts_with("Status -> In Progress"));
        assert_eq!(&row[32 + 29..32 + 29 + 9], "Fix login");
        assert!(row.ends_with(" Jane moved it"));
    }

    #[test]
    fn test_summary_is_cut_silently() {
        let long_title = "s".repeat(60);
        let row = render_row(&record(&long_title, "d"));

        assert!(row.contains(&"s".repeat(48)));
        assert!(!row.contains(&"s".repeat(49)));
        assert!(!row.contains("s..."));
    }

    #[test]
    fn test_long_description_gets_ellipsis() {
        let long_desc = "d".repeat(150);
        let row = render_row(&record("t", &long_desc));

        assert!(row.ends_with(&format!("{}...", "d".repeat(97))));
        assert!(!row.contains(&"d".repeat(98)));
    }

    #[test]
    fn test_description_of_exactly_100_chars_is_kept() {
        let desc = "d".repeat(100);
        let row = render_row(&record("t", &desc));
        assert!(row.ends_with(&desc));
    }

    #[test]
    fn test_one_line_per_record() {
        let table = render_records_table(&[record("a", "b"), record("c", "d")]);
        assert_eq!(table.lines().count(), 4);
        assert!(table.ends_with('\n'));
    }

    #[test]
    fn test_pad_is_width_aware() {
        assert_eq!(pad("ab", 4), "ab  ");
        assert_eq!(pad("日本", 6), "日本  ");
        assert_eq!(pad("toolong", 3), "toolong");
    }
}
