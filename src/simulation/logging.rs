//! Tracing subscriber setup shared by both binaries
//!
//! Diagnostics go to stderr, plus an optional daily rolling JSON file, so they
//! never interleave with the prompts and status lines written to stdout.
//! `RUST_LOG` overrides the configured level when set.

use std::io;
use tracing::{debug, Level};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::{non_blocking, rolling};
use tracing_subscriber::{
    fmt::{self, format::FmtSpan},
    layer::SubscriberExt,
    util::SubscriberInitExt,
    EnvFilter, Registry,
};

/// Error returned when the global subscriber cannot be installed
pub type LoggingInitError = Box<dyn std::error::Error + Send + Sync>;

/// How diagnostics are written
#[derive(Debug, Clone)]
pub struct LoggingConfig {
    /// Most verbose level written
    pub level: Level,
    /// Emit JSON on stderr instead of compact text
    pub json_format: bool,
    /// Directory for rolling log files; none means stderr only
    pub log_directory: Option<String>,
    /// File name prefix of the rolling log files
    pub log_file_prefix: String,
    /// Log span close events (dispatcher entry points carry spans)
    pub enable_span_events: bool,
    /// Colour the stderr output
    pub enable_ansi: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: Level::WARN,
            json_format: false,
            log_directory: None,
            log_file_prefix: "elevator-simulator".to_string(),
            enable_span_events: false,
            enable_ansi: true,
        }
    }
}

/// Keeps the background file writer alive; drop it at process exit
#[derive(Debug, Default)]
pub struct LoggingGuard {
    _file_guard: Option<WorkerGuard>,
}

impl LoggingConfig {
    /// Warnings only, stderr, simulator file prefix
    pub fn new() -> Self {
        Self::default()
    }

    /// Settings for the external call service binary
    pub fn for_call_server() -> Self {
        Self { log_file_prefix: "elevator-call-server".to_string(), ..Self::default() }
    }

    /// Pick the level from the `--debug`/`--verbose` flags
    pub fn with_verbosity(self, verbose: bool, debug: bool) -> Self {
        if debug {
            self.with_level(Level::DEBUG).with_span_events()
        } else if verbose {
            self.with_level(Level::INFO)
        } else {
            self.with_level(Level::WARN)
        }
    }

    /// Set the level
    pub fn with_level(mut self, level: Level) -> Self {
        self.level = level;
        self
    }

    /// Write JSON to stderr
    pub fn with_json_format(mut self) -> Self {
        self.json_format = true;
        self
    }

    /// Also write daily rolling files under `directory`
    pub fn with_file_logging(mut self, directory: impl Into<String>) -> Self {
        self.log_directory = Some(directory.into());
        self
    }

    /// Log span close events
    pub fn with_span_events(mut self) -> Self {
        self.enable_span_events = true;
        self
    }

    /// Plain stderr output
    pub fn without_ansi(mut self) -> Self {
        self.enable_ansi = false;
        self
    }

    fn span_events(&self) -> FmtSpan {
        if self.enable_span_events {
            FmtSpan::CLOSE
        } else {
            FmtSpan::NONE
        }
    }

    fn filter(&self) -> EnvFilter {
        EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(self.level.as_str().to_lowercase()))
    }

    /// Install the global subscriber
    ///
    /// Fails if a global subscriber is already installed.
    pub fn init(self) -> Result<LoggingGuard, LoggingInitError> {
        let registry = Registry::default().with(self.filter());
        let span_events = self.span_events();

        let guard = match &self.log_directory {
            Some(directory) => {
                let (writer, file_guard) =
                    non_blocking(rolling::daily(directory, &self.log_file_prefix));
                let file_layer =
                    fmt::layer().json().with_writer(writer).with_span_events(span_events.clone());
                let stderr_layer = fmt::layer()
                    .with_writer(io::stderr)
                    .with_ansi(self.enable_ansi)
                    .with_span_events(span_events);

                let registry = registry.with(file_layer);
                if self.json_format {
                    registry.with(stderr_layer.json()).try_init()?;
                } else {
                    registry.with(stderr_layer.compact()).try_init()?;
                }
                LoggingGuard { _file_guard: Some(file_guard) }
            }
            None => {
                let stderr_layer = fmt::layer()
                    .with_writer(io::stderr)
                    .with_ansi(self.enable_ansi)
                    .with_span_events(span_events);

                if self.json_format {
                    registry.with(stderr_layer.json()).try_init()?;
                } else {
                    registry.with(stderr_layer.compact()).try_init()?;
                }
                LoggingGuard::default()
            }
        };

        debug!(config = ?self, "Logging initialized");
        Ok(guard)
    }

    /// Warnings only
    pub fn init_quiet() -> Result<LoggingGuard, LoggingInitError> {
        Self::new().init()
    }

    /// Info level
    pub fn init_verbose() -> Result<LoggingGuard, LoggingInitError> {
        Self::new().with_level(Level::INFO).init()
    }

    /// Debug level with span events
    pub fn init_debug() -> Result<LoggingGuard, LoggingInitError> {
        Self::new().with_verbosity(false, true).init()
    }

    /// Warnings only, no colours
    pub fn init_test() -> Result<LoggingGuard, LoggingInitError> {
        Self::new().without_ansi().init()
    }
}
