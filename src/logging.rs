//! Log subscriber setup for binaries and local runs.
//!
//! Library code only emits `tracing` events. Installing a subscriber is the
//! host's choice; this is the default one.

use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

/// Installs a formatted subscriber filtered by `RUST_LOG`, or by
/// `fallback_filter` when `RUST_LOG` is unset or invalid.
///
/// Returns `false` if a global subscriber was already installed; calling it
/// twice is harmless.
pub fn init_logging(fallback_filter: &str) -> bool {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| fallback_filter.into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .try_init()
        .is_ok()
}
