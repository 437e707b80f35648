//! Data ingestion and estimation layer for ticket-hours.
//!
//! Reads the activity feed, normalizes its entries into records, groups the
//! records by day and ticket, and runs the end-to-end analysis pipeline.

pub mod aggregator;
pub mod analysis;
pub mod feed;
pub mod normalizer;
pub mod records;

pub use hours_core as core;
