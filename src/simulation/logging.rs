//! Logging and tracing configuration
//!
//! A run executes inside a `run` span and every round inside a nested `round`
//! span carrying the round index, so events from policies, visualizers and the
//! round phases can be filtered per round, e.g. with
//! `RUST_LOG='elevator_dispatch_sim[round{round=12}]=debug'`. With round
//! timing enabled each closing round span reports how long the round took.

use std::io;
use std::path::PathBuf;

use tracing::{info, Level};
use tracing_appender::{non_blocking, rolling};
use tracing_subscriber::{
    fmt::{self, format::FmtSpan},
    layer::SubscriberExt,
    util::SubscriberInitExt,
    EnvFilter, Registry,
};

/// Target the default filter applies to
const CRATE_TARGET: &str = "elevator_dispatch_sim";

/// Logging configuration
#[derive(Debug, Clone)]
pub struct LoggingConfig {
    /// Level applied to this crate unless `RUST_LOG` or `env_filter` is set
    pub level: Level,
    /// Write console output as JSON lines
    pub json_format: bool,
    /// Also write JSON lines to a daily rolling file in this directory
    pub log_directory: Option<PathBuf>,
    /// Name prefix of the rolling log files
    pub log_file_prefix: String,
    /// Report the duration of every round and run when its span closes
    pub round_timing: bool,
    /// Use ANSI colors in console output
    pub enable_ansi: bool,
    /// Filter directives replacing the level-based default
    pub env_filter: Option<String>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: Level::INFO,
            json_format: false,
            log_directory: None,
            log_file_prefix: "elevator-dispatch-sim".to_string(),
            round_timing: false,
            enable_ansi: true,
            env_filter: None,
        }
    }
}

impl LoggingConfig {
    /// Create a new logging configuration
    pub fn new() -> Self {
        Self::default()
    }

    /// Configuration for the CLI's `--verbose` and `--debug` flags
    ///
    /// Without either flag only warnings are shown. Both flags turn on round
    /// timing; `debug` wins when both are set.
    pub fn from_cli_flags(verbose: bool, debug: bool) -> Self {
        let config = Self::new();
        if debug {
            config.with_level(Level::DEBUG).with_round_timing()
        } else if verbose {
            config.with_level(Level::INFO).with_round_timing()
        } else {
            config.with_level(Level::WARN)
        }
    }

    /// Set the log level
    pub fn with_level(mut self, level: Level) -> Self {
        self.level = level;
        self
    }

    /// Enable JSON formatting
    pub fn with_json_format(mut self) -> Self {
        self.json_format = true;
        self
    }

    /// Also log to daily rolling files in `directory`
    pub fn with_file_logging(mut self, directory: impl Into<PathBuf>) -> Self {
        self.log_directory = Some(directory.into());
        self
    }

    /// Set log file prefix
    pub fn with_file_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.log_file_prefix = prefix.into();
        self
    }

    /// Report round and run durations
    pub fn with_round_timing(mut self) -> Self {
        self.round_timing = true;
        self
    }

    /// Disable ANSI colors
    pub fn without_ansi(mut self) -> Self {
        self.enable_ansi = false;
        self
    }

    /// Set custom environment filter
    pub fn with_env_filter(mut self, filter: impl Into<String>) -> Self {
        self.env_filter = Some(filter.into());
        self
    }

    /// Filter used when neither `RUST_LOG` nor `env_filter` is set
    pub fn default_filter(&self) -> String {
        format!("{}={}", CRATE_TARGET, self.level)
    }

    fn span_events(&self) -> FmtSpan {
        if self.round_timing {
            FmtSpan::CLOSE
        } else {
            FmtSpan::NONE
        }
    }

    /// Initialize the global tracing subscriber
    pub fn init(self) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        let env_filter = match &self.env_filter {
            Some(filter) => EnvFilter::try_new(filter)?,
            None => EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(self.default_filter())),
        };

        // Files always get JSON lines
        let (file_layer, file_guard) = match &self.log_directory {
            Some(directory) => {
                let (writer, guard) = non_blocking(rolling::daily(directory, &self.log_file_prefix));
                let layer = fmt::layer().json().with_writer(writer).with_span_events(self.span_events());
                (Some(layer), Some(guard))
            }
            None => (None, None),
        };
        let json_console = self.json_format.then(|| {
            fmt::layer().json().with_writer(io::stderr).with_span_events(self.span_events())
        });
        let text_console = (!self.json_format).then(|| {
            fmt::layer()
                .compact()
                .with_writer(io::stderr)
                .with_ansi(self.enable_ansi)
                .with_span_events(self.span_events())
        });

        Registry::default()
            .with(env_filter)
            .with(file_layer)
            .with(json_console)
            .with(text_console)
            .try_init()?;

        if let Some(guard) = file_guard {
            // The writer must outlive the process's logging
            std::mem::forget(guard);
        }

        info!(level = %self.level, round_timing = self.round_timing, "Logging initialized");
        Ok(())
    }
}

/// Span a whole run executes in
#[macro_export]
macro_rules! run_span {
    ($num_rounds:expr, $($key:ident = $value:expr),* $(,)?) => {
        tracing::info_span!("run", num_rounds = $num_rounds, $($key = $value,)*)
    };
    ($num_rounds:expr) => {
        tracing::info_span!("run", num_rounds = $num_rounds)
    };
}

/// Span a single round executes in
#[macro_export]
macro_rules! round_span {
    ($round:expr) => {
        tracing::info_span!("round", round = $round)
    };
}

/// Event about the building state, tagged with the round it belongs to
#[macro_export]
macro_rules! round_event {
    ($level:ident, $round:expr, $message:expr, $($key:ident = $value:expr),* $(,)?) => {
        tracing::$level!(message = $message, round = $round, $($key = $value,)*)
    };
    ($level:ident, $round:expr, $message:expr) => {
        tracing::$level!(message = $message, round = $round)
    };
}
