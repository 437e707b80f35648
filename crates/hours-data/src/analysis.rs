//! End-to-end estimation pipeline.
//!
//! Reads the whole input, normalizes and aggregates it in memory, and hands
//! the complete result back to the caller, which writes output only once
//! everything has succeeded.

use std::path::Path;

use hours_core::error::Result;
use hours_core::models::{EstimateRow, NormalizedRecord, RawEntry};
use tracing::{info, warn};

use crate::aggregator::EstimateAggregator;
use crate::feed::read_feed;
use crate::normalizer::normalize;
use crate::records::load_records;

// ── Public types ──────────────────────────────────────────────────────────────

/// The complete output of [`analyze_feed`].
#[derive(Debug, Clone, PartialEq)]
pub struct FeedAnalysis {
    /// One record per feed entry, in feed order.
    pub records: Vec<NormalizedRecord>,
    /// Estimates sorted by `(date, ticket)`.
    pub estimates: Vec<EstimateRow>,
}

impl FeedAnalysis {
    /// Number of records for which no ticket could be identified.
    pub fn records_without_ticket(&self) -> usize {
        self.records.iter().filter(|r| r.ticket.is_empty()).count()
    }
}

// ── Public functions ──────────────────────────────────────────────────────────

/// Run the full pipeline on the feed stored at `path`.
pub fn analyze_feed(path: &Path) -> Result<FeedAnalysis> {
    let entries = read_feed(path)?;
    info!("Parsed {} activity entries from {}", entries.len(), path.display());
    Ok(analyze_entries(&entries))
}

/// Normalize and aggregate already-parsed feed entries.
pub fn analyze_entries(entries: &[RawEntry]) -> FeedAnalysis {
    let records: Vec<NormalizedRecord> = entries.iter().map(normalize).collect();
    let estimates = EstimateAggregator::aggregate(&records);

    let analysis = FeedAnalysis { records, estimates };

    let missing = analysis.records_without_ticket();
    if missing > 0 {
        warn!(
            "{} of {} entries have no ticket; they are grouped under an empty ticket per day",
            missing,
            analysis.records.len()
        );
    }
    info!(
        "Built {} estimates from {} records",
        analysis.estimates.len(),
        analysis.records.len()
    );

    analysis
}

/// Run only the estimate stage, starting from a records file.
pub fn estimate_from_records(path: &Path) -> Result<Vec<EstimateRow>> {
    let records = load_records(path)?;
    let estimates = EstimateAggregator::aggregate(&records);
    info!(
        "Built {} estimates from {} records in {}",
        estimates.len(),
        records.len(),
        path.display()
    );
    Ok(estimates)
}

// ── Tests ─────────────────────────────────────────────────────────────────────
