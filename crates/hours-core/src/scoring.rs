//! Fixed weighting policy that turns a day's activity on a ticket into hours.
//!
//! | activity             | weight |
//! |----------------------|--------|
//! | `Created`            | 2.0    |
//! | `Status -> <status>` | 1.5    |
//! | `Commented`          | 1.0    |
//! | `Updated`            | 0.5    |
//! | `Created / Posted`   | 0.5    |
//! | anything else        | 0.5    |
//!
//! Hours are `score * 0.5`, clamped to `[0.5, 4.0]`, then rounded to the
//! nearest half hour.

use crate::models::ActivityType;

/// Weight of a status transition.
pub const STATUS_WEIGHT: f64 = 1.5;

/// Weight of any activity absent from the weight table.
pub const FALLBACK_WEIGHT: f64 = 0.5;

/// Hours credited per point of score.
pub const HOURS_PER_POINT: f64 = 0.5;

/// Smallest estimate ever reported for a (day, ticket) pair.
pub const MIN_HOURS: f64 = 0.5;

/// Largest estimate ever reported for a (day, ticket) pair.
pub const MAX_HOURS: f64 = 4.0;

/// Explicit weights. Status transitions are handled before this table.
const WEIGHTS: &[(ActivityType, f64)] = &[
    (ActivityType::Created, 2.0),
    (ActivityType::Commented, 1.0),
    (ActivityType::CreatedPosted, 0.5),
    (ActivityType::Updated, 0.5),
];

/// Score contributed by one activity.
pub fn activity_weight(activity: &ActivityType) -> f64 {
    if activity.is_status_change() {
        return STATUS_WEIGHT;
    }
    WEIGHTS
        .iter()
        .find(|(kind, _)| kind == activity)
        .map(|(_, weight)| *weight)
        .unwrap_or(FALLBACK_WEIGHT)
}

/// Convert a raw score into an hour estimate in `[0.5, 4.0]`.
///
/// Clamping happens before rounding. Ties round away from zero, so a raw
/// 0.75 h becomes 1.0 h and 1.25 h becomes 1.5 h.
///
/// ```
/// use hours_core::scoring::score_to_hours;
///
/// assert_eq!(score_to_hours(0.5), 0.5);
/// assert_eq!(score_to_hours(1.5), 1.0);
/// assert_eq!(score_to_hours(20.0), 4.0);
/// ```
pub fn score_to_hours(score: f64) -> f64 {
    let raw = score * HOURS_PER_POINT;
    let clamped = raw.clamp(MIN_HOURS, MAX_HOURS);
    round_to_half(clamped)
}

/// Round to the nearest multiple of 0.5, ties away from zero.
pub fn round_to_half(value: f64) -> f64 {
    (value * 2.0).round() / 2.0
}
