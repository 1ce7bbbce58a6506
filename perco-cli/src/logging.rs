//! Diagnostics for the `perco` binary.
//!
//! Simulation summaries go to stdout; everything `tracing` emits goes to
//! stderr, either as plain text or as one JSON object per line. Records sent
//! through the `log` facade are forwarded into the same subscriber.

use std::{env, str::FromStr, sync::OnceLock};

use thiserror::Error;
use tracing_log::LogTracer;
use tracing_subscriber::{
    EnvFilter, Layer, fmt::format::FmtSpan, layer::SubscriberExt, util::SubscriberInitExt,
};

/// Environment variable selecting the stderr format.
pub const LOG_FORMAT_ENV: &str = "PERCO_LOG_FORMAT";

const DEFAULT_FILTER: &str = "info";

static INSTALLED: OnceLock<()> = OnceLock::new();

/// Reasons the `perco` subscriber could not be set up.
#[derive(Debug, Error)]
pub enum LoggingError {
    /// `PERCO_LOG_FORMAT` held bytes that are not UTF-8.
    #[error("`{variable}` is not valid UTF-8: {source}")]
    FormatNotUnicode {
        /// The variable that was read.
        variable: &'static str,
        /// Lookup failure reported by the standard library.
        #[source]
        source: env::VarError,
    },
    /// `PERCO_LOG_FORMAT` named neither `human` nor `json`.
    #[error("`{value}` is not a perco log format (use `human` or `json`)")]
    UnknownFormat {
        /// The rejected value after trimming and lowercasing.
        value: String,
    },
    /// `tracing_subscriber` refused to become the global default.
    #[error("could not register the perco subscriber: {source}")]
    SubscriberRejected {
        /// Registration failure.
        #[source]
        source: tracing_subscriber::util::TryInitError,
    },
}

/// How events are written to stderr.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
enum LogFormat {
    #[default]
    Human,
    Json,
}

impl LogFormat {
    fn from_env() -> Result<Self, LoggingError> {
        match env::var(LOG_FORMAT_ENV) {
            Ok(raw) => raw.parse(),
            Err(env::VarError::NotPresent) => Ok(Self::default()),
            Err(source) => Err(LoggingError::FormatNotUnicode {
                variable: LOG_FORMAT_ENV,
                source,
            }),
        }
    }
}

impl FromStr for LogFormat {
    type Err = LoggingError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        let value = raw.trim().to_ascii_lowercase();
        match value.as_str() {
            "human" => Ok(Self::Human),
            "json" => Ok(Self::Json),
            _ => Err(LoggingError::UnknownFormat { value }),
        }
    }
}

/// Sets up stderr diagnostics once per process.
///
/// `RUST_LOG` filters events (`info` when unset or invalid). With
/// `PERCO_LOG_FORMAT=json` each line carries the active span and its
/// ancestors. Span enter and exit are logged, which is enough to time
/// generation, infection and cluster discovery from the log.
///
/// Calling this again is a no-op. When some other subscriber already owns
/// the global slot, a note goes to stderr and the call still succeeds.
///
/// # Errors
/// Returns [`LoggingError::FormatNotUnicode`] or
/// [`LoggingError::UnknownFormat`] for a bad `PERCO_LOG_FORMAT`.
pub fn init_logging() -> Result<(), LoggingError> {
    if INSTALLED.get().is_some() {
        return Ok(());
    }

    let format = LogFormat::from_env()?;
    if let Err(LoggingError::SubscriberRejected { source }) = install(format) {
        note_foreign_subscriber(&source);
    }
    let _ = INSTALLED.set(());
    Ok(())
}

fn install(format: LogFormat) -> Result<(), LoggingError> {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));
    let stderr = tracing_subscriber::fmt::layer()
        .with_writer(std::io::stderr)
        .with_span_events(FmtSpan::FULL);
    let stderr = match format {
        LogFormat::Human => stderr.boxed(),
        LogFormat::Json => stderr
            .json()
            .with_current_span(true)
            .with_span_list(true)
            .boxed(),
    };

    // The `log` slot may already be taken; tracing output is unaffected.
    let _ = LogTracer::init();

    tracing_subscriber::registry()
        .with(filter)
        .with(stderr)
        .try_init()
        .map_err(|source| LoggingError::SubscriberRejected { source })
}

#[expect(
    clippy::print_stderr,
    reason = "the global tracing slot belongs to someone else"
)]
fn note_foreign_subscriber(source: &tracing_subscriber::util::TryInitError) {
    eprintln!("perco: keeping the existing tracing subscriber ({source})");
}

#[cfg(test)]
mod tests {
    use super::*;

    use rstest::rstest;

    #[rstest]
    #[case("human", LogFormat::Human)]
    #[case("Human", LogFormat::Human)]
    #[case(" JSON\n", LogFormat::Json)]
    fn supported_formats_parse(#[case] raw: &str, #[case] expected: LogFormat) {
        assert_eq!(raw.parse::<LogFormat>().expect("format must parse"), expected);
    }

    #[rstest]
    #[case("xml", "xml")]
    #[case(" Pretty ", "pretty")]
    #[case("", "")]
    fn unknown_formats_are_rejected(#[case] raw: &str, #[case] value: &str) {
        match raw.parse::<LogFormat>().expect_err("format is unsupported") {
            LoggingError::UnknownFormat { value: got } => assert_eq!(got, value),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn default_format_is_human() {
        assert_eq!(LogFormat::default(), LogFormat::Human);
    }

    #[test]
    fn init_logging_is_idempotent() {
        init_logging().expect("logging must initialise");
        init_logging().expect("subsequent calls must be no-ops");
    }
}
