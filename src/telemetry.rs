//! Structured logging setup (spec.md ambient stack), matching the teacher's
//! `tracing` + `tracing-subscriber` fmt/env-filter pairing.

use tracing_subscriber::EnvFilter;

/// Installs a global `tracing` subscriber. Verbosity is controlled by
/// `RUST_LOG`, defaulting to `info` when unset.
pub fn init() {
	let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
	tracing_subscriber::fmt().with_env_filter(filter).with_target(false).init();
}
