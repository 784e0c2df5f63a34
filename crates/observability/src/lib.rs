//! Shared tracing setup.
//!
//! Library crates only emit events; binaries and tests pick a subscriber here.

pub mod tracing;

/// Initialize process-wide JSON logging, filtered by `RUST_LOG`.
///
/// Safe to call multiple times; subsequent calls are no-ops.
pub fn init() {
    tracing::init("info");
}

/// Human-readable logging captured by the test harness.
pub fn init_for_tests() {
    tracing::init_test("debug");
}
