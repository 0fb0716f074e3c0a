//! Miscellaneous test code for the Zdir workspace.

#![warn(missing_docs)]
#![forbid(unsafe_code)]

use std::sync::Once;

use once_cell::sync::Lazy;
use tracing_error::ErrorLayer;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

pub mod prelude;

/// A multi-threaded Tokio runtime that can be shared between tests.
///
/// Use this for synchronous tests that need to block on a small async
/// surface (like a session watch channel) without building a runtime per
/// test. Tests that pause and resume the Tokio timer must build their own
/// runtime instead, so a paused timer can't leak into another test.
pub static RUNTIME: Lazy<tokio::runtime::Runtime> = Lazy::new(|| {
    tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .expect("Failed to create Tokio runtime")
});

static INIT: Once = Once::new();

/// Initialize globals for tests, such as the tracing subscriber and the
/// panic / error reporting hooks.
///
/// Safe to call from every test; only the first call does anything.
pub fn init() {
    INIT.call_once(|| {
        let fmt_layer = fmt::layer().with_target(false);
        // Use the RUST_LOG env var, or by default hide everything below
        // warn: test output should be assertions, not log spam.
        let filter_layer =
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

        tracing_subscriber::registry()
            .with(filter_layer)
            .with(fmt_layer)
            .with(ErrorLayer::default())
            .init();

        color_eyre::config::HookBuilder::default()
            .display_env_section(false)
            .install()
            .expect("Failed to install color-eyre hooks");
    });
}
