//! Log subscriber setup shared by the command-line tools.

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Installs a formatting subscriber that honours `RUST_LOG`, falling back
/// to `info` (or `debug` when `verbose` is set) for this crate and for the
/// calling binary, whose events are logged under its own crate name.
pub fn init(bin_name: &str, verbose: bool) {
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| default_directives(bin_name, verbose).into()))
        .with(tracing_subscriber::fmt::layer()
            .with_target(false)
            .with_writer(std::io::stderr))
        .init();
}

/// Filter directives used when `RUST_LOG` is not set.
fn default_directives(bin_name: &str, verbose: bool) -> String {
    let log_level = if verbose { "debug" } else { "info" };
    format!("icoprep={log_level},{bin_name}={log_level}")
}
