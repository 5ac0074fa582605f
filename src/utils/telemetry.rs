//! Logging setup
//!
//! Installs a global `tracing` subscriber for binaries. The library itself
//! only emits events and never installs one.

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Registry};

/// Default filter when `RUST_LOG` is not set.
pub const DEFAULT_FILTER: &str = "coherence_lens=info";

/// Install the fmt subscriber with an `EnvFilter`.
///
/// Returns an error if a global subscriber is already set.
pub fn init_logging(default_filter: &str) -> anyhow::Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_filter));

    Registry::default()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_target(false))
        .try_init()?;

    Ok(())
}
