//! Common imports for Zdir tests.

pub use color_eyre::eyre::{eyre, Result};
pub use tracing::{debug, error, info, trace, warn};
