//! Tracing subscriber setup for the binary.

use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::error::{PlannerError, Result};

/// Filter used when `RUST_LOG` is unset.
pub const DEFAULT_FILTER: &str = "info";

/// Installs a global fmt subscriber filtered by `RUST_LOG`, falling back
/// to `default_filter`.
///
/// # Errors
/// [`PlannerError::Logging`] if the filter is invalid or a global
/// subscriber is already installed.
pub fn init(default_filter: &str) -> Result<()> {
    let filter = match std::env::var(EnvFilter::DEFAULT_ENV) {
        Ok(directives) if !directives.trim().is_empty() => mk_filter(&directives)?,
        _ => mk_filter(default_filter)?,
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_target(false))
        .try_init()
        .map_err(|e| PlannerError::Logging(e.to_string()))
}

fn mk_filter(directives: &str) -> Result<EnvFilter> {
    EnvFilter::try_new(directives)
        .map_err(|e| PlannerError::Logging(format!("invalid filter {directives:?}: {e}")))
}
