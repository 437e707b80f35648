//! Reduces heterogeneous feed entries to [`NormalizedRecord`]s.
//!
//! Normalization never fails. Missing data degrades to an empty ticket, the
//! generic `Activity` label, or the raw published string as the date.

use hours_core::classifier::classify;
use hours_core::models::{ActivityObject, NormalizedRecord, RawEntry};
use hours_core::time_utils::display_timestamp;
use once_cell::sync::Lazy;
use regex::Regex;

/// Object type identifying an issue in the Atlassian activity streams.
pub const ISSUE_OBJECT_TYPE: &str = "http://streams.atlassian.com/syndication/types/issue";

static BROWSE_LINK: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"browse/([A-Z]+-\d+)").expect("regex is valid"));
static HTML_TAG: Lazy<Regex> = Lazy::new(|| Regex::new(r"<[^>]+>").expect("regex is valid"));

// ── TicketRef ─────────────────────────────────────────────────────────────────

/// Ticket key and summary recovered from an entry.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TicketRef {
    pub key: String,
    pub summary: String,
}

/// One way of finding the ticket an entry refers to.
type TicketStrategy = fn(&RawEntry) -> Option<TicketRef>;

/// Strategies in priority order; the first hit wins.
const TICKET_STRATEGIES: &[TicketStrategy] = &[from_targets, from_objects, from_browse_link];

// ── Public API ────────────────────────────────────────────────────────────────

/// Normalize one raw feed entry.
pub fn normalize(entry: &RawEntry) -> NormalizedRecord {
    let raw_title = entry.title_html.as_deref().unwrap_or_default();
    let ticket = find_ticket(entry).unwrap_or_default();

    NormalizedRecord {
        timestamp: display_timestamp(entry.published.as_deref().unwrap_or_default()),
        ticket: ticket.key,
        title: ticket.summary,
        activity_type: classify(&entry.categories, &entry.verbs),
        description: strip_html(raw_title),
    }
}

/// Run the ticket strategies in priority order and return the first match.
pub fn find_ticket(entry: &RawEntry) -> Option<TicketRef> {
    TICKET_STRATEGIES.iter().find_map(|strategy| strategy(entry))
}

/// Unescape HTML entities, replace every tag with a space, collapse runs of
/// whitespace and trim.
///
/// ```
/// use hours_data::normalizer::strip_html;
///
/// assert_eq!(strip_html("<b>Fix &amp; test</b>"), "Fix & test");
/// ```
pub fn strip_html(text: &str) -> String {
    let unescaped = html_escape::decode_html_entities(text);
    let untagged = HTML_TAG.replace_all(&unescaped, " ");
    untagged.split_whitespace().collect::<Vec<_>>().join(" ")
}

// ── Strategies ────────────────────────────────────────────────────────────────

fn from_targets(entry: &RawEntry) -> Option<TicketRef> {
    entry.targets.iter().find_map(issue_ref)
}

fn from_objects(entry: &RawEntry) -> Option<TicketRef> {
    entry.objects.iter().find_map(issue_ref)
}

/// Scrape a `browse/KEY-123` link out of the raw title markup. The summary is
/// unknown in this case.
fn from_browse_link(entry: &RawEntry) -> Option<TicketRef> {
    let title = entry.title_html.as_deref()?;
    let captures = BROWSE_LINK.captures(title)?;
    Some(TicketRef {
        key: captures[1].to_string(),
        summary: String::new(),
    })
}

/// An issue-typed object with a non-blank title.
fn issue_ref(object: &ActivityObject) -> Option<TicketRef> {
    if object.object_type.as_deref() != Some(ISSUE_OBJECT_TYPE) {
        return None;
    }

    let key = object.title.as_deref().unwrap_or_default().trim();
    if key.is_empty() {
        return None;
    }

    Some(TicketRef {
        key: key.to_string(),
        summary: object
            .summary
            .as_deref()
            .unwrap_or_default()
            .trim()
            .to_string(),
    })
}

// ── Tests ─────────────────────────────────────────────────────────────────────
