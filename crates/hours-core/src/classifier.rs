//! Derives an [`ActivityType`] from an entry's category and verb signals.
//!
//! Categories outrank verbs: when an entry carries any category term, only
//! the first one is consulted and the verbs are ignored entirely.

use crate::models::ActivityType;

/// Verb suffixes in the order they are tested against each verb.
const VERB_SUFFIXES: &[(&str, ActivityType)] = &[
    ("/post", ActivityType::CreatedPosted),
    ("/update", ActivityType::Updated),
    ("/delete", ActivityType::Deleted),
];

/// Classify an entry from its category terms and activity verbs.
///
/// 1. First category term (trimmed): `comment` → `Commented`, `created` →
///    `Created` (both case-insensitive), anything else names the destination
///    status of a transition.
/// 2. Otherwise the first verb ending in `/post`, `/update` or `/delete`.
/// 3. Otherwise [`ActivityType::Activity`].
pub fn classify<C, V>(categories: &[C], verbs: &[V]) -> ActivityType
where
    C: AsRef<str>,
    V: AsRef<str>,
{
    if let Some(first) = categories.first() {
        return from_category(first.as_ref());
    }

    verbs
        .iter()
        .find_map(|verb| from_verb(verb.as_ref()))
        .unwrap_or(ActivityType::Activity)
}

fn from_category(term: &str) -> ActivityType {
    let term = term.trim();
    if term.eq_ignore_ascii_case("comment") {
        ActivityType::Commented
    } else if term.eq_ignore_ascii_case("created") {
        ActivityType::Created
    } else {
        ActivityType::Status(term.to_string())
    }
}

fn from_verb(verb: &str) -> Option<ActivityType> {
    VERB_SUFFIXES
        .iter()
        .find(|(suffix, _)| verb.ends_with(suffix))
        .map(|(_, kind)| kind.clone())
}
