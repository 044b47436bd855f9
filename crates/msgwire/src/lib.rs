//! # msgwire
//!
//! JSON envelope codec for message-bus transports.
//!
//! msgwire writes each message inside a JSON envelope carrying its declared type
//! names, content type and routing metadata, providing:
//! - Type-directed converters (base64 byte arrays, decimals as text, message data
//!   references, lenient lists, interface materialization)
//! - Separate encode and decode configurations, decode being a superset
//! - A per-type dispatch cache safe for concurrent first use
//! - A single error type carrying the original cause
//!
//! ## Quick Start
//!
//! ```ignore
//! use msgwire::prelude::*;
//!
//! #[derive(Debug, Serialize, Deserialize)]
//! #[serde(rename_all = "camelCase")]
//! pub struct OrderPlaced {
//!     pub order_id: String,
//!     pub total: Decimal,
//! }
//!
//! impl Describe for OrderPlaced {
//!     fn describe() -> RuntimeType {
//!         RuntimeType::record::<Self>(vec![
//!             Field::of::<String>("orderId"),
//!             Field::of::<Decimal>("total"),
//!         ])
//!     }
//! }
//!
//! impl MessageTypes for OrderPlaced {
//!     fn message_type_names() -> Vec<String> {
//!         vec![msgwire::message_urn("Shop", "OrderPlaced")]
//!     }
//! }
//!
//! let serializer = JsonMessageSerializer::new();
//! let mut context = SendContext::new(OrderPlaced {
//!     order_id: "A-1".into(),
//!     total: "12.50".parse()?,
//! });
//! let bytes = serializer.to_bytes(&mut context)?;
//!
//! let envelope = serializer.deserialize(&bytes)?;
//! let order: OrderPlaced = serializer.deserialize_message(&envelope)?;
//! ```
//!
//! ## Crate Structure
//!
//! This is a facade crate that re-exports from:
//! - [`msgwire_core`] - Type descriptors, options and errors
//! - [`msgwire_convert`] - Converters, dispatch cache and codec configurations
//! - [`msgwire_transport`] - Envelope, send context and the JSON message serializer
//! - [`msgwire_logging`] - Subscriber setup and level reload

// Re-export core types
pub use msgwire_core::{
    BoxError, ByteArray, ConfigError, ContentType, Contract, ConvertError, DESERIALIZE_FAILED,
    Decimal, Describe, Field, JSON_CONTENT_TYPE, LogLevel, MessageTypes, RuntimeType,
    SERIALIZE_FAILED, SerializationError, SerializationResult, SerializerOptions, TypeKey,
    TypeKind, message_urn,
};

// Re-export converters and configurations
pub use msgwire_convert::{
    CachedConverter, CodecConfiguration, ConstructorHandling, ConverterFactory,
    DefaultValueHandling, DispatchCache, Formatting, JsonConverter, JsonSerializer, MessageData,
    MissingMemberHandling, NullValueHandling, SerializerSettings, TypeConverter, Unsupported,
};

// Re-export the envelope codec
pub use msgwire_transport::{
    HostInfo, JsonMessageSerializer, MessageDeserializer, MessageEnvelope, MessageSerializer,
    SendContext,
};

// Re-export logging setup
pub use msgwire_logging::{ReloadHandle, init_logging, init_logging_from_options};

// Re-export common dependencies that message authors need
pub use serde;
pub use serde_json;
pub use tracing;
pub use uuid;

/// Prelude module for convenient imports.
///
/// Use `use msgwire::prelude::*;` to import commonly used types.
pub mod prelude {
    pub use crate::{
        ByteArray, Decimal, Describe, Field, JsonMessageSerializer, MessageData,
        MessageDeserializer, MessageEnvelope, MessageSerializer, MessageTypes, RuntimeType,
        SendContext, SerializationError, SerializationResult,
    };

    // Serde derives (commonly needed for message types)
    pub use serde::{Deserialize, Serialize};
}
