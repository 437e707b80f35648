use clap::Parser;
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

use crate::error::{HoursError, Result};

/// Default feed file for the parse stage.
pub const DEFAULT_FEED_FILE: &str = "activity.txt";

/// Default records file: written by the parse stage, read by the estimate stage.
pub const DEFAULT_RECORDS_FILE: &str = "activity_parsed.csv";

/// Default estimates file written by the estimate stage.
pub const DEFAULT_ESTIMATES_FILE: &str = "time_estimates.csv";

/// Sentinel for values resolved after parsing.
const AUTO: &str = "auto";

// ── Mode ───────────────────────────────────────────────────────────────────────

/// Which pipeline stages a run executes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    /// Feed → preview + records file.
    Parse,
    /// Records file → estimates file.
    Estimate,
    /// Feed → preview + records file + estimates file.
    All,
}

impl Mode {
    /// `true` when the run starts from the activity feed.
    pub fn reads_feed(self) -> bool {
        matches!(self, Mode::Parse | Mode::All)
    }

    /// `true` when the run writes an estimates file.
    pub fn writes_estimates(self) -> bool {
        matches!(self, Mode::Estimate | Mode::All)
    }
}

impl FromStr for Mode {
    type Err = HoursError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "parse" => Ok(Mode::Parse),
            "estimate" => Ok(Mode::Estimate),
            "all" => Ok(Mode::All),
            other => Err(HoursError::Config(format!("unknown mode: {}", other))),
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Mode::Parse => "parse",
            Mode::Estimate => "estimate",
            Mode::All => "all",
        };
        f.write_str(name)
    }
}

// ── Settings (CLI) ─────────────────────────────────────────────────────────────

/// Estimate hours spent per ticket per day from an issue-tracker activity feed
#[derive(Parser, Debug, Clone)]
#[command(
    name = "ticket-hours",
    about = "Estimate hours spent per ticket per day from an issue-tracker activity feed",
    version
)]
pub struct Settings {
    /// Pipeline stages to run
    #[arg(long, default_value = "all", value_parser = ["parse", "estimate", "all"])]
    pub mode: String,

    /// Input file: the activity feed, or the records file in estimate mode
    #[arg(long, default_value = AUTO)]
    pub input: PathBuf,

    /// Records file written by the parse stage
    #[arg(long, default_value = DEFAULT_RECORDS_FILE)]
    pub records_out: PathBuf,

    /// Estimates file written by the estimate stage
    #[arg(long, default_value = DEFAULT_ESTIMATES_FILE)]
    pub estimates_out: PathBuf,

    /// Do not print the parsed-entries table
    #[arg(long)]
    pub no_preview: bool,

    /// Logging level
    #[arg(long, default_value = "WARNING", value_parser = ["DEBUG", "INFO", "WARNING", "ERROR"])]
    pub log_level: String,

    /// Enable debug logging
    #[arg(long)]
    pub debug: bool,
}

impl Settings {
    /// Parse the process arguments and resolve `"auto"` values.
    ///
    /// Exits the process on `--help`, `--version` or invalid arguments.
    pub fn load() -> Result<Self> {
        Settings::parse().resolve_auto_values()
    }

    /// Same as [`Settings::load`] but accepts an explicit argument list,
    /// enabling unit-testing without spawning subprocesses.
    pub fn load_from_args<I, T>(args: I) -> Result<Self>
    where
        I: IntoIterator<Item = T>,
        T: Into<std::ffi::OsString> + Clone,
    {
        let settings = Settings::try_parse_from(args)
            .map_err(|e| HoursError::Config(e.to_string()))?;
        settings.resolve_auto_values()
    }

    /// Typed view of `--mode`.
    pub fn mode(&self) -> Result<Mode> {
        self.mode.parse()
    }

    /// Resolve the `"auto"` input path and apply the `--debug` flag.
    fn resolve_auto_values(mut self) -> Result<Self> {
        if self.input.as_os_str() == AUTO {
            self.input = if self.mode()?.reads_feed() {
                PathBuf::from(DEFAULT_FEED_FILE)
            } else {
                PathBuf::from(DEFAULT_RECORDS_FILE)
            };
        }

        if self.debug {
            self.log_level = "DEBUG".to_string();
        }

        Ok(self)
    }
}
