//! Subscriber installation

use crate::reload::{ReloadHandle, level_filter};
use msgwire_core::{LogLevel, SerializerOptions};
use tracing_subscriber::{fmt, reload};

/// Install the global subscriber: a reloadable level filter in front of a fmt layer.
///
/// Returns `false` if a global subscriber was already set, in which case the
/// existing one is left in place and the reload handle is not touched.
pub fn init_logging(level: LogLevel) -> bool {
    use tracing_subscriber::prelude::*;

    let (filter, handle) = reload::Layer::new(level_filter(level));
    let subscriber = tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_target(true));

    if tracing::subscriber::set_global_default(subscriber).is_err() {
        return false;
    }
    ReloadHandle::global().set_handle(handle, level);
    true
}

/// Initialize logging at the level named by `options.log_level`
pub fn init_logging_from_options(options: &SerializerOptions) -> Result<bool, String> {
    let level: LogLevel = options.log_level.parse()?;
    Ok(init_logging(level))
}
