use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime};
use tracing::debug;

/// Display format used for timestamps in the records file and preview.
pub const DISPLAY_FORMAT: &str = "%Y-%m-%d %H:%M";

// ── Published timestamps ──────────────────────────────────────────────────────

/// Parsed form of an entry's `published` value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PublishedAt {
    /// Instant with the offset it was published in.
    Zoned(DateTime<FixedOffset>),
    /// Wall-clock time with no offset information.
    Naive(NaiveDateTime),
}

impl PublishedAt {
    /// Parse an ISO 8601 timestamp.
    ///
    /// Accepts a trailing `Z` as UTC, fixed offsets written as `+HH:MM`,
    /// `+HHMM` or `+HH`, naive date-times with `T` or space separators, and
    /// bare dates.
    /// Returns `None` for empty strings or unrecognised formats.
    pub fn parse(s: &str) -> Option<Self> {
        let s = s.trim();
        if s.is_empty() {
            return None;
        }

        // Replace trailing 'Z' with '+00:00'.
        let normalised = if let Some(stripped) = s.strip_suffix('Z') {
            format!("{}+00:00", stripped)
        } else {
            expand_offset(s)
        };

        if let Ok(dt) = DateTime::parse_from_rfc3339(&normalised) {
            return Some(PublishedAt::Zoned(dt));
        }

        const ZONED_FMTS: &[&str] = &["%Y-%m-%dT%H:%M%:z", "%Y-%m-%d %H:%M%:z"];
        for fmt in ZONED_FMTS {
            if let Ok(dt) = DateTime::parse_from_str(&normalised, fmt) {
                return Some(PublishedAt::Zoned(dt));
            }
        }

        const NAIVE_FMTS: &[&str] = &[
            "%Y-%m-%dT%H:%M:%S%.f",
            "%Y-%m-%dT%H:%M",
            "%Y-%m-%d %H:%M:%S%.f",
            "%Y-%m-%d %H:%M",
        ];
        for fmt in NAIVE_FMTS {
            if let Ok(naive) = NaiveDateTime::parse_from_str(s, fmt) {
                return Some(PublishedAt::Naive(naive));
            }
        }

        if let Ok(date) = NaiveDate::parse_from_str(s, "%Y-%m-%d") {
            return date.and_hms_opt(0, 0, 0).map(PublishedAt::Naive);
        }

        debug!("could not parse published timestamp \"{}\"", s);
        None
    }

    /// Format as `YYYY-MM-DD HH:MM` in the timestamp's own offset.
    pub fn display(&self) -> String {
        match self {
            PublishedAt::Zoned(dt) => dt.format(DISPLAY_FORMAT).to_string(),
            PublishedAt::Naive(naive) => naive.format(DISPLAY_FORMAT).to_string(),
        }
    }
}

/// Rewrite a compact (`+HHMM`) or hour-only (`+HH`) trailing offset as
/// `+HH:MM`. Anything else is returned unchanged.
fn expand_offset(s: &str) -> String {
    // Offset signs can only appear after the `YYYY-MM-DD` date part.
    const DATE_LEN: usize = 10;

    let Some(sign) = s.rfind(['+', '-']).filter(|&i| i >= DATE_LEN) else {
        return s.to_string();
    };
    let digits = &s[sign + 1..];
    if !digits.bytes().all(|b| b.is_ascii_digit()) {
        return s.to_string();
    }

    match digits.len() {
        4 => format!("{}{}:{}", &s[..=sign], &digits[..2], &digits[2..]),
        2 => format!("{}:00", s),
        _ => s.to_string(),
    }
}

/// Display timestamp for a raw `published` value.
///
/// Unparseable input is passed through verbatim so that malformed dates
/// surface in the output instead of silently dropping the entry.
pub fn display_timestamp(raw: &str) -> String {
    match PublishedAt::parse(raw) {
        Some(parsed) => parsed.display(),
        None => raw.to_string(),
    }
}
