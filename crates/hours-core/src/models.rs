use serde::{Deserialize, Serialize};
use std::fmt;

use crate::formatting::format_hours;

/// Prefix shared by every status-transition label.
pub const STATUS_PREFIX: &str = "Status -> ";

/// Separator used when joining an estimate's contributing activity labels.
pub const BREAKDOWN_SEPARATOR: &str = "; ";

// ── Raw feed data ─────────────────────────────────────────────────────────────

/// A nested `activity:target` or `activity:object` element of a feed entry.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ActivityObject {
    /// Text of `activity:object-type`, e.g. the issue type URI.
    pub object_type: Option<String>,
    /// Text of the nested `title`; for issues this is the ticket key.
    pub title: Option<String>,
    /// Text of the nested `summary`; for issues this is the ticket title.
    pub summary: Option<String>,
}

/// One `<entry>` of the activity feed, with every field the normalizer reads.
///
/// Any part of the entry may be absent; absence is never an error.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawEntry {
    /// Text of `published`, unparsed.
    pub published: Option<String>,
    /// Texts of every `activity:verb`, in document order.
    pub verbs: Vec<String>,
    /// `term` attributes of every `category`, in document order.
    pub categories: Vec<String>,
    /// Every `activity:target` element, in document order.
    pub targets: Vec<ActivityObject>,
    /// Every `activity:object` element, in document order.
    pub objects: Vec<ActivityObject>,
    /// Text of the entry's `title`, which usually carries HTML markup.
    pub title_html: Option<String>,
}

// ── ActivityType ──────────────────────────────────────────────────────────────

/// What kind of event an entry represents.
///
/// Serialized through its human-readable label, so records files carry
/// strings such as `"Commented"` or `"Status -> In Progress"`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "String", from = "String")]
pub enum ActivityType {
    /// The ticket was created.
    Created,
    /// A comment was added.
    Commented,
    /// Something was posted to the ticket, typically an attachment.
    CreatedPosted,
    /// Ticket fields were edited.
    Updated,
    /// Something was deleted.
    Deleted,
    /// The ticket moved to the named status.
    Status(String),
    /// No category or verb signal was available.
    Activity,
    /// A label read back from a records file that matches no known kind.
    Other(String),
}

impl ActivityType {
    /// Map a label back to its activity type. Never fails: unknown labels are
    /// carried through as [`ActivityType::Other`].
    pub fn from_label(label: &str) -> Self {
        if let Some(status) = label.strip_prefix(STATUS_PREFIX) {
            return ActivityType::Status(status.to_string());
        }
        match label {
            "Created" => ActivityType::Created,
            "Commented" => ActivityType::Commented,
            "Created / Posted" => ActivityType::CreatedPosted,
            "Updated" => ActivityType::Updated,
            "Deleted" => ActivityType::Deleted,
            "Activity" => ActivityType::Activity,
            other => ActivityType::Other(other.to_string()),
        }
    }

    /// `true` for status-transition events.
    pub fn is_status_change(&self) -> bool {
        matches!(self, ActivityType::Status(_))
    }
}

impl fmt::Display for ActivityType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ActivityType::Created => f.write_str("Created"),
            ActivityType::Commented => f.write_str("Commented"),
            ActivityType::CreatedPosted => f.write_str("Created / Posted"),
            ActivityType::Updated => f.write_str("Updated"),
            ActivityType::Deleted => f.write_str("Deleted"),
            ActivityType::Status(status) => write!(f, "{}{}", STATUS_PREFIX, status),
            ActivityType::Activity => f.write_str("Activity"),
            ActivityType::Other(label) => f.write_str(label),
        }
    }
}

impl From<ActivityType> for String {
    fn from(value: ActivityType) -> Self {
        value.to_string()
    }
}

impl From<String> for ActivityType {
    fn from(value: String) -> Self {
        ActivityType::from_label(&value)
    }
}

// ── NormalizedRecord ──────────────────────────────────────────────────────────

/// One feed entry reduced to the fields the estimator works with.
///
/// Field order matches the records file columns
/// `date,ticket,title,activity_type,description`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NormalizedRecord {
    /// Display timestamp `YYYY-MM-DD HH:MM`, or the raw published string when
    /// it could not be parsed.
    #[serde(rename = "date")]
    pub timestamp: String,
    /// Ticket key such as `ABC-123`; empty when none could be found.
    pub ticket: String,
    /// Ticket summary; may be empty.
    pub title: String,
    /// Never empty: falls back to [`ActivityType::Activity`].
    pub activity_type: ActivityType,
    /// Plain-text rendering of the entry title.
    pub description: String,
}

impl NormalizedRecord {
    /// Calendar-day portion of the timestamp: everything before the first
    /// whitespace. An unparsed timestamp without whitespace is returned whole.
    pub fn day(&self) -> &str {
        self.timestamp.split_whitespace().next().unwrap_or("")
    }
}

// ── EstimateRow ───────────────────────────────────────────────────────────────

/// Estimated effort for one ticket on one day.
///
/// Field order matches the estimates file columns
/// `date,ticket,title,estimated_hours,activity_count,activity_breakdown`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EstimateRow {
    pub date: String,
    pub ticket: String,
    pub title: String,
    #[serde(serialize_with = "serialize_hours")]
    pub estimated_hours: f64,
    pub activity_count: usize,
    /// Contributing activity labels joined by [`BREAKDOWN_SEPARATOR`].
    pub activity_breakdown: String,
}

fn serialize_hours<S>(hours: &f64, serializer: S) -> Result<S::Ok, S::Error>
where
    S: serde::Serializer,
{
    serializer.serialize_str(&format_hours(*hours))
}
