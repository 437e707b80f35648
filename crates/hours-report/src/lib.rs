//! Output layer for ticket-hours.
//!
//! Renders the fixed-width console preview of parsed entries and writes the
//! records and estimates CSV files.

pub mod csv_export;
pub mod table_view;

pub use hours_core as core;
