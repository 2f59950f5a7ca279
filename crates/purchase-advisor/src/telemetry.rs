use crate::config::{AppEnvironment, TelemetryConfig};
use std::fmt;
use std::io;
use tracing_subscriber::filter::ParseError;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::{SubscriberInitExt, TryInitError};
use tracing_subscriber::{fmt as output, EnvFilter};

#[derive(Debug)]
pub enum TelemetryError {
    InvalidFilter { directives: String, source: ParseError },
    Install(TryInitError),
}

impl fmt::Display for TelemetryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TelemetryError::InvalidFilter { directives, .. } => {
                write!(f, "ADVISOR_LOG_LEVEL '{}' is not a valid filter", directives)
            }
            TelemetryError::Install(err) => write!(f, "could not install subscriber: {err}"),
        }
    }
}

impl std::error::Error for TelemetryError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            TelemetryError::InvalidFilter { source, .. } => Some(source),
            TelemetryError::Install(err) => Some(err),
        }
    }
}

/// Filter from `ADVISOR_LOG_LEVEL` directives, e.g. `warn` or `purchase_advisor=debug,warn`.
pub fn build_filter(directives: &str) -> Result<EnvFilter, TelemetryError> {
    EnvFilter::try_new(directives).map_err(|source| TelemetryError::InvalidFilter {
        directives: directives.to_string(),
        source,
    })
}

/// Installs the global subscriber. `RUST_LOG` wins over the configured level
/// when it parses. Logs go to stderr so command output stays pipeable.
pub fn init(config: &TelemetryConfig, environment: AppEnvironment) -> Result<(), TelemetryError> {
    let filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => build_filter(&config.log_level)?,
    };

    let layer = output::layer()
        .with_writer(io::stderr)
        .with_target(false)
        .with_ansi(environment == AppEnvironment::Development)
        .compact();

    tracing_subscriber::registry()
        .with(filter)
        .with(layer)
        .try_init()
        .map_err(TelemetryError::Install)
}
