//! Core types and policy for ticket-hours.
//!
//! Holds the shared data model, the error type, the activity classifier, the
//! scoring policy that turns activity into hours, and the CLI settings.

pub mod classifier;
pub mod error;
pub mod formatting;
pub mod models;
pub mod scoring;
pub mod settings;
pub mod time_utils;
