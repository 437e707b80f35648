//! Groups normalized records by (day, ticket) and turns each group's
//! weighted activity into an hour estimate.

use std::collections::BTreeMap;

use hours_core::models::{ActivityType, EstimateRow, NormalizedRecord, BREAKDOWN_SEPARATOR};
use hours_core::scoring::{activity_weight, score_to_hours};
use tracing::debug;

// ── AggregationGroup ──────────────────────────────────────────────────────────

/// Running totals for one (day, ticket) pair.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AggregationGroup {
    /// Title of the most recent record in input order.
    pub title: String,
    /// Unclamped, unrounded sum of activity weights.
    pub score: f64,
    /// Contributing activity types in input order.
    pub activities: Vec<ActivityType>,
}

impl AggregationGroup {
    /// Accumulate `record` into the group.
    pub fn add_record(&mut self, record: &NormalizedRecord) {
        self.title.clone_from(&record.title);
        self.score += activity_weight(&record.activity_type);
        self.activities.push(record.activity_type.clone());
    }

    /// Hour estimate derived from the score.
    pub fn estimated_hours(&self) -> f64 {
        score_to_hours(self.score)
    }

    /// Contributing labels joined in input order.
    pub fn breakdown(&self) -> String {
        self.activities
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join(BREAKDOWN_SEPARATOR)
    }

    fn into_row(self, date: String, ticket: String) -> EstimateRow {
        EstimateRow {
            estimated_hours: self.estimated_hours(),
            activity_count: self.activities.len(),
            activity_breakdown: self.breakdown(),
            date,
            ticket,
            title: self.title,
        }
    }
}

// ── EstimateAggregator ────────────────────────────────────────────────────────

/// Stateless helper that groups records into per-day, per-ticket estimates.
pub struct EstimateAggregator;

impl EstimateAggregator {
    /// Aggregate `records` into estimate rows sorted by `(day, ticket)`.
    ///
    /// Records without a ticket are grouped together under the empty ticket
    /// for their day rather than dropped.
    pub fn aggregate(records: &[NormalizedRecord]) -> Vec<EstimateRow> {
        Self::group(records)
            .into_iter()
            .map(|((date, ticket), group)| group.into_row(date, ticket))
            .collect()
    }

    /// Build the grouping map. Keys iterate in ascending `(day, ticket)` order.
    pub fn group(records: &[NormalizedRecord]) -> BTreeMap<(String, String), AggregationGroup> {
        let mut groups: BTreeMap<(String, String), AggregationGroup> = BTreeMap::new();

        for record in records {
            let key = (record.day().to_string(), record.ticket.clone());
            groups.entry(key).or_default().add_record(record);
        }

        debug!(
            "Grouped {} records into {} (day, ticket) groups",
            records.len(),
            groups.len()
        );

        groups
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
