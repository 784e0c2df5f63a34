//! Subscriber construction.

use tracing_subscriber::EnvFilter;

fn filter(default: &str) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default))
}

/// JSON events with timestamps; `default` applies when `RUST_LOG` is unset.
pub fn init(default: &str) {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter(default))
        .json()
        .with_timer(tracing_subscriber::fmt::time::SystemTime)
        .with_target(false)
        .try_init();
}

/// Compact events routed through the test writer so `cargo test` captures them.
pub fn init_test(default: &str) {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter(default))
        .compact()
        .with_test_writer()
        .try_init();
}
