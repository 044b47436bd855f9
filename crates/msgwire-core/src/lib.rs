//! msgwire-core - Shared types for the msgwire envelope codec
//!
//! This crate provides:
//! - [`RuntimeType`] and [`Describe`] for describing message shapes
//! - [`ContentType`] and [`MessageTypes`] for envelope tagging
//! - [`SerializerOptions`] for codec configuration
//! - [`SerializationError`] and [`ConvertError`] for error handling

mod config;
mod error;
mod message;
mod types;

pub use config::SerializerOptions;
pub use error::{
    BoxError, ConfigError, ConvertError, DESERIALIZE_FAILED, SERIALIZE_FAILED,
    SerializationError, SerializationResult, token_kind,
};
pub use message::{ContentType, JSON_CONTENT_TYPE, MessageTypes, message_urn};
pub use types::{ByteArray, Contract, Decimal, Describe, Field, RuntimeType, TypeKey, TypeKind};

use std::str::FromStr;

/// Log levels used by the logging setup
#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum LogLevel {
    Trace = 0,
    Debug = 1,
    Info = 2,
    Warn = 3,
    Error = 4,
    Off = 5,
}

impl LogLevel {
    pub fn from_u8(value: u8) -> Self {
        match value {
            0 => LogLevel::Trace,
            1 => LogLevel::Debug,
            2 => LogLevel::Info,
            3 => LogLevel::Warn,
            4 => LogLevel::Error,
            _ => LogLevel::Off,
        }
    }
}

impl FromStr for LogLevel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "trace" => Ok(LogLevel::Trace),
            "debug" => Ok(LogLevel::Debug),
            "info" => Ok(LogLevel::Info),
            "warn" | "warning" => Ok(LogLevel::Warn),
            "error" => Ok(LogLevel::Error),
            "off" => Ok(LogLevel::Off),
            other => Err(format!("unknown log level: {}", other)),
        }
    }
}

impl std::fmt::Display for LogLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LogLevel::Trace => write!(f, "TRACE"),
            LogLevel::Debug => write!(f, "DEBUG"),
            LogLevel::Info => write!(f, "INFO"),
            LogLevel::Warn => write!(f, "WARN"),
            LogLevel::Error => write!(f, "ERROR"),
            LogLevel::Off => write!(f, "OFF"),
        }
    }
}

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::{
        ByteArray, ContentType, ConvertError, Decimal, Describe, Field, LogLevel, MessageTypes,
        RuntimeType, SerializationError, SerializationResult, SerializerOptions, TypeKind,
    };
}
