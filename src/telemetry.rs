//! Tracing setup for services embedding this crate.
//!
//! The filter comes from `RUST_LOG` when set, defaulting to `info`.
//! Production deployments typically want JSON output for log aggregation.

use tracing_subscriber::EnvFilter;

/// Initializes the global tracing subscriber.
///
/// Safe to call more than once; later calls are no-ops.
pub fn init(json_output: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    if json_output {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .json()
            .try_init();
    } else {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .try_init();
    }
}
