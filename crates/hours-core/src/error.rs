use std::path::PathBuf;
use thiserror::Error;

/// All errors produced by ticket-hours.
#[derive(Error, Debug)]
pub enum HoursError {
    /// A file could not be opened or read from disk.
    #[error("Failed to read file {path}: {source}")]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// An output file could not be created, written or moved into place.
    #[error("Failed to write file {path}: {source}")]
    FileWrite {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The feed document is not well-formed XML.
    #[error("Failed to parse feed XML: {0}")]
    XmlParse(#[from] roxmltree::Error),

    /// The document parsed, but its root element is not an Atom feed.
    #[error("Not an Atom feed (root element: {0})")]
    NotAFeed(String),

    /// A delimited file could not be read or written.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// A configuration value is missing or invalid.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Pass-through for any raw I/O error that does not carry a path.
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// Convenience alias used throughout the ticket-hours crates.
pub type Result<T> = std::result::Result<T, HoursError>;
