//! msgwire-convert - Type-directed JSON converters
//!
//! This crate provides:
//! - [`JsonConverter`] and [`TypeConverter`], the converter capability
//! - [`DispatchCache`] and [`CachedConverter`] for per-type converter resolution
//! - The built-in converters (byte arrays, decimals, message data, lists,
//!   interface proxies)
//! - [`SerializerSettings`] and [`CodecConfiguration`], the encode/decode rule sets
//! - [`JsonSerializer`], the engine applying a configuration to values

mod byte_array;
mod converter;
mod interface_proxy;
mod list;
mod message_data;
mod serializer;
mod settings;
mod string_decimal;

pub use byte_array::{ByteArrayConverter, ByteArrayFactory};
pub use converter::{
    CachedConverter, ConverterFactory, DispatchCache, JsonConverter, TypeConverter, Unsupported,
};
pub use interface_proxy::{InterfaceProxyConverter, InterfaceProxyFactory};
pub use list::{ListFactory, ListJsonConverter};
pub use message_data::{
    DEFAULT_INLINE_THRESHOLD, MessageData, MessageDataJsonConverter, MessageDataReferences,
};
pub use serializer::JsonSerializer;
pub use settings::{
    CodecConfiguration, ConstructorHandling, DefaultValueHandling, Formatting,
    MissingMemberHandling, NullValueHandling, SerializerSettings,
};
pub use string_decimal::{StringDecimalConverter, StringDecimalFactory};

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::{
        CachedConverter, CodecConfiguration, ConverterFactory, DispatchCache, JsonConverter,
        JsonSerializer, MessageData, SerializerSettings, TypeConverter, Unsupported,
    };
}
