//! Logging infrastructure for Minigames.

use std::io;
use std::path::PathBuf;
use std::sync::Mutex;
use tracing::Subscriber;
use tracing_subscriber::{
    fmt::{self, format::FmtSpan, writer::MakeWriter},
    layer::SubscriberExt,
    registry::LookupSpan,
    util::SubscriberInitExt,
    EnvFilter, Layer,
};

/// Logging configuration.
#[derive(Debug, Clone)]
pub struct LogConfig {
    /// Minimum log level.
    pub level: LogLevel,
    /// Output format.
    pub format: LogFormat,
    /// Log file path (if file logging enabled).
    pub file_path: Option<PathBuf>,
    /// Include timestamps.
    pub timestamps: bool,
    /// Include source location.
    pub source_location: bool,
    /// Include span events.
    pub span_events: bool,
}

/// Log level.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LogLevel {
    Trace,
    Debug,
    #[default]
    Info,
    Warn,
    Error,
}

impl From<LogLevel> for tracing_subscriber::filter::LevelFilter {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Trace => tracing_subscriber::filter::LevelFilter::TRACE,
            LogLevel::Debug => tracing_subscriber::filter::LevelFilter::DEBUG,
            LogLevel::Info => tracing_subscriber::filter::LevelFilter::INFO,
            LogLevel::Warn => tracing_subscriber::filter::LevelFilter::WARN,
            LogLevel::Error => tracing_subscriber::filter::LevelFilter::ERROR,
        }
    }
}

impl LogLevel {
    /// Parse from string.
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "trace" => Some(Self::Trace),
            "debug" => Some(Self::Debug),
            "info" => Some(Self::Info),
            "warn" | "warning" => Some(Self::Warn),
            "error" => Some(Self::Error),
            _ => None,
        }
    }

    /// Filter directive name.
    pub fn as_str(self) -> &'static str {
        match self {
            LogLevel::Trace => "trace",
            LogLevel::Debug => "debug",
            LogLevel::Info => "info",
            LogLevel::Warn => "warn",
            LogLevel::Error => "error",
        }
    }

    /// Level selected by `-v`/`-q` command line flags, if any.
    ///
    /// `quiet` wins over any number of `-v`.
    pub fn from_verbosity(verbose: u8, quiet: bool) -> Option<Self> {
        if quiet {
            return Some(Self::Error);
        }
        match verbose {
            0 => None,
            1 => Some(Self::Info),
            2 => Some(Self::Debug),
            _ => Some(Self::Trace),
        }
    }
}

/// Log output format.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LogFormat {
    /// Human-readable pretty format.
    #[default]
    Pretty,
    /// Compact single-line format.
    Compact,
    /// JSON structured format.
    Json,
}

impl LogFormat {
    /// Parse from string; anything unrecognized is pretty.
    pub fn parse(s: &str) -> Self {
        match s.trim().to_lowercase().as_str() {
            "json" => LogFormat::Json,
            "compact" => LogFormat::Compact,
            _ => LogFormat::Pretty,
        }
    }
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: LogLevel::default(),
            format: LogFormat::default(),
            file_path: None,
            timestamps: true,
            source_location: false,
            span_events: false,
        }
    }
}

impl LogConfig {
    /// Create config from environment variables.
    pub fn from_env() -> Self {
        Self::default().with_env_overrides()
    }

    /// Apply `MINIGAMES_LOG_*` (and `RUST_LOG` for the level) on top of `self`.
    pub fn with_env_overrides(mut self) -> Self {
        let level = std::env::var("MINIGAMES_LOG_LEVEL")
            .or_else(|_| std::env::var("RUST_LOG"))
            .ok()
            .and_then(|level| LogLevel::parse(&level));
        if let Some(level) = level {
            self.level = level;
        }

        if let Ok(format) = std::env::var("MINIGAMES_LOG_FORMAT") {
            self.format = LogFormat::parse(&format);
        }

        if let Ok(file_path) = std::env::var("MINIGAMES_LOG_FILE") {
            self.file_path = Some(PathBuf::from(file_path));
        }

        if let Ok(source_location) = std::env::var("MINIGAMES_LOG_SOURCE") {
            self.source_location = is_truthy(&source_location);
        }

        if let Ok(span_events) = std::env::var("MINIGAMES_LOG_SPANS") {
            self.span_events = is_truthy(&span_events);
        }

        self
    }
}

fn is_truthy(value: &str) -> bool {
    value.eq_ignore_ascii_case("true") || value == "1"
}

/// Initialize logging with the given configuration.
///
/// Console output goes to stderr so command output on stdout stays clean.
/// A `RUST_LOG` filter directive takes precedence over `config.level`.
pub fn init(config: LogConfig) -> Result<(), LogError> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(config.level.as_str()));

    let file_layer = match &config.file_path {
        Some(file_path) => {
            let file = std::fs::OpenOptions::new()
                .create(true)
                .append(true)
                .open(file_path)?;
            Some(fmt_layer(&config, Mutex::new(file), false))
        }
        None => None,
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt_layer(&config, io::stderr, true))
        .with(file_layer)
        .try_init()
        .map_err(|e| LogError::InitError(e.to_string()))
}

fn fmt_layer<S, W>(config: &LogConfig, writer: W, ansi: bool) -> Box<dyn Layer<S> + Send + Sync>
where
    S: Subscriber + for<'a> LookupSpan<'a>,
    W: for<'w> MakeWriter<'w> + Send + Sync + 'static,
{
    let span_events = if config.span_events {
        FmtSpan::NEW | FmtSpan::CLOSE
    } else {
        FmtSpan::NONE
    };

    let layer = fmt::layer()
        .with_writer(writer)
        .with_ansi(ansi)
        .with_target(true)
        .with_file(config.source_location)
        .with_line_number(config.source_location)
        .with_span_events(span_events);

    match (config.format, config.timestamps) {
        (LogFormat::Pretty, true) => layer.boxed(),
        (LogFormat::Pretty, false) => layer.without_time().boxed(),
        (LogFormat::Compact, true) => layer.compact().boxed(),
        (LogFormat::Compact, false) => layer.compact().without_time().boxed(),
        (LogFormat::Json, _) => layer.json().boxed(),
    }
}

/// Logging errors.
#[derive(Debug, thiserror::Error)]
pub enum LogError {
    #[error("failed to initialize logging: {0}")]
    InitError(String),

    #[error("failed to open log file: {0}")]
    FileError(#[from] io::Error),
}

/// Convenience macros re-exported from tracing.
pub use tracing::{debug, error, info, trace, warn};
