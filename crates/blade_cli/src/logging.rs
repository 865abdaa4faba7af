//! Tracing setup for the command line.

use tracing_subscriber::{filter::EnvFilter, layer::SubscriberExt, util::SubscriberInitExt, Layer};

use crate::GlobalArgs;

/// Picks the filter used when `RUST_LOG` is not set.
pub fn default_directive(global: &GlobalArgs) -> &'static str {
    if global.quiet {
        "error"
    } else if global.verbose {
        "debug"
    } else {
        "warn"
    }
}

/// Installs a stderr subscriber. `RUST_LOG` overrides the flag-derived level.
pub fn init_tracing(global: &GlobalArgs) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directive(global)));

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false)
                .with_filter(filter),
        )
        .init();
}
