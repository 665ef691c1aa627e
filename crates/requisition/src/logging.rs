//! Tracing subscriber setup shared by the server binary and tools.
//!
//! `try_init` also installs the `log` bridge, so records emitted by the
//! persistence layer reach the same subscriber.

use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, EnvFilter, Registry};

use crate::error::RequisitionError;

/// Output format for log lines.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    #[default]
    Text,
    Json,
}

/// Builds the filter from `RUST_LOG`, falling back to `default_directive`.
pub fn env_filter(default_directive: &str) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_directive))
}

/// Installs the global subscriber. Fails if one is already installed.
pub fn init_logging(format: LogFormat, default_directive: &str) -> Result<(), RequisitionError> {
    let filter = env_filter(default_directive);
    let registry = Registry::default().with(filter);

    let result = match format {
        LogFormat::Text => registry.with(fmt::layer().with_target(true)).try_init(),
        LogFormat::Json => registry
            .with(fmt::layer().json().with_current_span(true))
            .try_init(),
    };

    result.map_err(|e| RequisitionError::Logging(e.to_string()))
}
