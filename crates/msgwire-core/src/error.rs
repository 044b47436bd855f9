//! Error types for msgwire

use thiserror::Error;

/// Boxed error used wherever an arbitrary failure travels as a cause
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Result type alias for envelope serialization
pub type SerializationResult<T> = Result<T, SerializationError>;

/// Fixed message carried by wrapped encode failures
pub const SERIALIZE_FAILED: &str = "Failed to serialize message";

/// Fixed message carried by wrapped decode failures
pub const DESERIALIZE_FAILED: &str = "Failed to deserialize message";

/// The single error type surfaced by the envelope codec
#[derive(Error, Debug)]
pub enum SerializationError {
    /// Rejected by the codec's own pre-validation
    #[error("{0}")]
    Invalid(&'static str),

    /// Any other failure, kept as the source
    #[error("{message}")]
    Failed {
        message: &'static str,
        #[source]
        source: BoxError,
    },
}

impl SerializationError {
    /// Wrap `err` under `message` unless it already is a serialization error.
    ///
    /// A `SerializationError` (directly, or carried by
    /// [`ConvertError::Serialization`]) is returned unchanged so that failures are
    /// never wrapped twice.
    pub fn wrap(message: &'static str, err: impl Into<BoxError>) -> Self {
        let err = err.into();
        let err = match err.downcast::<SerializationError>() {
            Ok(inner) => return *inner,
            Err(other) => other,
        };
        match err.downcast::<ConvertError>() {
            Ok(convert) => match *convert {
                ConvertError::Serialization(inner) => inner,
                other => SerializationError::Failed {
                    message,
                    source: Box::new(other),
                },
            },
            Err(other) => SerializationError::Failed {
                message,
                source: other,
            },
        }
    }

    /// Returns the wrapped cause, if any
    pub fn cause(&self) -> Option<&(dyn std::error::Error + Send + Sync + 'static)> {
        match self {
            SerializationError::Invalid(_) => None,
            SerializationError::Failed { source, .. } => Some(source.as_ref()),
        }
    }
}

/// Errors raised by converters and the structural engine
#[derive(Error, Debug)]
pub enum ConvertError {
    /// A converter was asked to read a type it reported as unsupported.
    ///
    /// Callers must check support before reading, so this marks a defect rather
    /// than bad input.
    #[error("converter does not support type {type_name}")]
    Unsupported { type_name: &'static str },

    /// The JSON token found does not fit the target shape
    #[error("unexpected {found} for {type_name}, expected {expected}")]
    UnexpectedToken {
        type_name: &'static str,
        expected: &'static str,
        found: &'static str,
    },

    /// A JSON member the target record does not declare
    #[error("unknown member '{member}' on {type_name}")]
    UnknownMember {
        type_name: &'static str,
        member: String,
    },

    /// A value of the right token kind but an invalid form
    #[error("invalid value for {type_name}: {reason}")]
    InvalidValue {
        type_name: &'static str,
        reason: String,
    },

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    /// Failure raised by a plug-in converter
    #[error("converter failure: {0}")]
    Custom(#[source] BoxError),

    #[error(transparent)]
    Serialization(#[from] SerializationError),
}

impl ConvertError {
    /// Wrap an arbitrary converter failure
    pub fn custom(err: impl Into<BoxError>) -> Self {
        ConvertError::Custom(err.into())
    }
}

/// Configuration loading errors
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("invalid configuration: {0}")]
    Invalid(String),

    #[error("configuration json error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("configuration toml error: {0}")]
    Toml(#[from] toml::de::Error),
}

/// Name of a JSON token kind, used in error messages
pub fn token_kind(value: &serde_json::Value) -> &'static str {
    match value {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "boolean",
        serde_json::Value::Number(_) => "number",
        serde_json::Value::String(_) => "string",
        serde_json::Value::Array(_) => "array",
        serde_json::Value::Object(_) => "object",
    }
}
