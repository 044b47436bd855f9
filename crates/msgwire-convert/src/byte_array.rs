//! Byte payloads as base64 text

use crate::converter::{CachedConverter, ConverterFactory, TypeConverter, Unsupported};
use crate::serializer::JsonSerializer;
use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use msgwire_core::{ConvertError, RuntimeType, TypeKind, token_kind};
use serde_json::Value;
use std::sync::Arc;

/// Converter for [`ByteArray`](msgwire_core::ByteArray) members
pub type ByteArrayConverter = CachedConverter<ByteArrayFactory>;

#[derive(Debug, Clone, Copy, Default)]
pub struct ByteArrayFactory;

impl ConverterFactory for ByteArrayFactory {
    fn name(&self) -> &'static str {
        "byte-array"
    }

    fn create(&self, ty: &RuntimeType) -> Arc<dyn TypeConverter> {
        match ty.kind() {
            TypeKind::Bytes => Arc::new(Base64Bytes),
            _ => Arc::new(Unsupported),
        }
    }
}

struct Base64Bytes;

impl TypeConverter for Base64Bytes {
    fn read(
        &self,
        value: Value,
        ty: &RuntimeType,
        _serializer: &JsonSerializer,
    ) -> Result<Value, ConvertError> {
        match value {
            Value::Null => Ok(Value::Null),
            Value::String(text) => {
                let bytes = STANDARD
                    .decode(text.as_bytes())
                    .map_err(|e| ConvertError::InvalidValue {
                        type_name: ty.name(),
                        reason: e.to_string(),
                    })?;
                Ok(bytes_to_value(&bytes))
            }
            // Already structural: validate each element is a byte
            Value::Array(items) => value_to_bytes(ty, &items).map(|b| bytes_to_value(&b)),
            other => Err(ConvertError::UnexpectedToken {
                type_name: ty.name(),
                expected: "base64 string",
                found: token_kind(&other),
            }),
        }
    }

    fn write(
        &self,
        value: Value,
        ty: &RuntimeType,
        _serializer: &JsonSerializer,
    ) -> Result<Value, ConvertError> {
        match value {
            Value::Array(items) => {
                let bytes = value_to_bytes(ty, &items)?;
                Ok(Value::String(STANDARD.encode(bytes)))
            }
            other => Ok(other),
        }
    }
}

pub(crate) fn bytes_to_value(bytes: &[u8]) -> Value {
    Value::Array(bytes.iter().map(|b| Value::from(*b)).collect())
}

pub(crate) fn value_to_bytes(ty: &RuntimeType, items: &[Value]) -> Result<Vec<u8>, ConvertError> {
    items
        .iter()
        .map(|item| {
            item.as_u64()
                .and_then(|n| u8::try_from(n).ok())
                .ok_or_else(|| ConvertError::InvalidValue {
                    type_name: ty.name(),
                    reason: format!("{} is not a byte", item),
                })
        })
        .collect()
}
