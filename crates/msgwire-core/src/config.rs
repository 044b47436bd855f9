//! Serializer configuration

use crate::error::ConfigError;
use serde::{Deserialize, Serialize};

/// Options shared by the encode and decode configurations
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SerializerOptions {
    /// Pretty-print envelopes (default: true)
    #[serde(default = "default_indented")]
    pub indented: bool,

    /// Capacity of the buffered writer layered over the caller's channel
    #[serde(default = "default_write_buffer_size")]
    pub write_buffer_size: usize,

    /// Largest message-data payload, in bytes, still carried inline
    #[serde(default = "default_message_data_threshold")]
    pub message_data_threshold: usize,

    /// Initial log level
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

fn default_indented() -> bool {
    true
}

fn default_write_buffer_size() -> usize {
    1024
}

fn default_message_data_threshold() -> usize {
    4096
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for SerializerOptions {
    fn default() -> Self {
        Self {
            indented: default_indented(),
            write_buffer_size: default_write_buffer_size(),
            message_data_threshold: default_message_data_threshold(),
            log_level: default_log_level(),
        }
    }
}

impl SerializerOptions {
    /// Create options with every default
    pub fn new() -> Self {
        Self::default()
    }

    /// Load options from JSON bytes; empty input yields the defaults
    pub fn from_json(bytes: &[u8]) -> Result<Self, ConfigError> {
        if bytes.is_empty() {
            return Ok(Self::default());
        }
        let options: Self = serde_json::from_slice(bytes)?;
        options.validate()?;
        Ok(options)
    }

    /// Load options from a TOML document
    pub fn from_toml(text: &str) -> Result<Self, ConfigError> {
        let options: Self = toml::from_str(text)?;
        options.validate()?;
        Ok(options)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.write_buffer_size == 0 {
            return Err(ConfigError::Invalid(
                "write_buffer_size must be greater than zero".to_string(),
            ));
        }
        self.log_level
            .parse::<crate::LogLevel>()
            .map_err(ConfigError::Invalid)?;
        Ok(())
    }

    /// Set the pretty-print flag
    pub fn with_indented(mut self, indented: bool) -> Self {
        self.indented = indented;
        self
    }

    /// Set the inline message-data threshold
    pub fn with_message_data_threshold(mut self, threshold: usize) -> Self {
        self.message_data_threshold = threshold;
        self
    }
}
