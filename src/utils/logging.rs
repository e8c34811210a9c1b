//! Diagnostics for a run.
//!
//! The distribution report is the program's output and is written to stdout,
//! so `tracing` events (which manifest was opened, how many lines were
//! skipped, where a chart went) are sent to stderr. Piping the report into a
//! file never mixes the two.

use tracing::Level;
use tracing_subscriber::FmtSubscriber;

/// How much of the run's diagnostics to show, and how
#[derive(Debug, Clone)]
pub struct LogConfig {
    pub level: LogLevel,
    /// Prefix events with the emitting module (`dataset_distribution::pipeline`)
    pub include_target: bool,
    pub ansi_colors: bool,
}

impl Default for LogConfig {
    /// Warnings only: a skipped split or a failed chart, nothing per line
    fn default() -> Self {
        Self {
            level: LogLevel::Warn,
            include_target: false,
            ansi_colors: true,
        }
    }
}

impl LogConfig {
    /// `--verbose`: per-manifest parse details, with module paths
    pub fn verbose() -> Self {
        Self {
            level: LogLevel::Debug,
            include_target: true,
            ansi_colors: true,
        }
    }

    /// `--quiet`: nothing unless the run itself fails
    pub fn quiet() -> Self {
        Self {
            level: LogLevel::Error,
            include_target: false,
            ansi_colors: true,
        }
    }

    /// `--log-level` wins over `--verbose`/`--quiet`
    pub fn with_level(mut self, level: LogLevel) -> Self {
        self.level = level;
        self
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogLevel {
    Trace,
    Debug,
    Info,
    Warn,
    Error,
}

impl LogLevel {
    pub fn to_tracing_level(&self) -> Level {
        match self {
            LogLevel::Trace => Level::TRACE,
            LogLevel::Debug => Level::DEBUG,
            LogLevel::Info => Level::INFO,
            LogLevel::Warn => Level::WARN,
            LogLevel::Error => Level::ERROR,
        }
    }

    /// Level named on the command line. Unrecognised names keep the
    /// default (`Warn`) rather than rejecting the run.
    pub fn parse(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "trace" => LogLevel::Trace,
            "debug" => LogLevel::Debug,
            "info" => LogLevel::Info,
            "warn" | "warning" => LogLevel::Warn,
            "error" => LogLevel::Error,
            _ => LogLevel::Warn,
        }
    }

    fn as_str(&self) -> &'static str {
        match self {
            LogLevel::Trace => "TRACE",
            LogLevel::Debug => "DEBUG",
            LogLevel::Info => "INFO",
            LogLevel::Warn => "WARN",
            LogLevel::Error => "ERROR",
        }
    }
}

impl std::fmt::Display for LogLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Install the stderr subscriber for this process.
///
/// Can only succeed once; a second call (or a subscriber installed by an
/// embedding program) is reported as an error string and otherwise ignored.
pub fn init_logging(config: &LogConfig) -> Result<(), String> {
    let subscriber = FmtSubscriber::builder()
        .with_max_level(config.level.to_tracing_level())
        .with_ansi(config.ansi_colors)
        .with_target(config.include_target)
        .with_writer(std::io::stderr)
        .compact()
        .finish();

    tracing::subscriber::set_global_default(subscriber)
        .map_err(|e| format!("logging already initialized: {}", e))
}
