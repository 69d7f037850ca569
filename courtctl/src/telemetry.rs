//! Telemetry initialization: tracing with a fmt subscriber and `RUST_LOG`
//! style filtering via [`EnvFilter`].

use tracing::info;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

/// Initialize tracing for the process.
///
/// Respects `RUST_LOG` when set, defaulting to `info` otherwise. Safe to
/// call once per process; a second call returns an error from
/// `try_init` which is surfaced to the caller.
pub fn init_telemetry() -> anyhow::Result<()> {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer())
        .try_init()?;

    info!("Telemetry initialized");

    Ok(())
}
