//! msgwire-logging - Tracing subscriber setup
//!
//! This crate provides:
//! - [`init_logging`] installing a fmt subscriber behind a reloadable level filter
//! - [`ReloadHandle`] for changing the level at runtime

mod layer;
mod reload;

pub use layer::{init_logging, init_logging_from_options};
pub use msgwire_core::LogLevel;
pub use reload::ReloadHandle;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::{LogLevel, ReloadHandle, init_logging};
}
