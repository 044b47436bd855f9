//! Decimals as JSON strings

use crate::converter::{CachedConverter, ConverterFactory, TypeConverter, Unsupported};
use crate::serializer::JsonSerializer;
use msgwire_core::{ConvertError, RuntimeType, TypeKind, token_kind};
use serde_json::{Number, Value};
use std::sync::Arc;

/// Converter for [`Decimal`](msgwire_core::Decimal) members
pub type StringDecimalConverter = CachedConverter<StringDecimalFactory>;

#[derive(Debug, Clone, Copy, Default)]
pub struct StringDecimalFactory;

impl ConverterFactory for StringDecimalFactory {
    fn name(&self) -> &'static str {
        "string-decimal"
    }

    fn create(&self, ty: &RuntimeType) -> Arc<dyn TypeConverter> {
        match ty.kind() {
            TypeKind::Decimal => Arc::new(DecimalText),
            _ => Arc::new(Unsupported),
        }
    }
}

struct DecimalText;

impl TypeConverter for DecimalText {
    fn read(
        &self,
        value: Value,
        ty: &RuntimeType,
        _serializer: &JsonSerializer,
    ) -> Result<Value, ConvertError> {
        match value {
            Value::Null | Value::Number(_) => Ok(value),
            Value::String(text) if text.trim().is_empty() => Ok(Value::Null),
            Value::String(text) => serde_json::from_str::<Number>(text.trim())
                .map(Value::Number)
                .map_err(|_| ConvertError::InvalidValue {
                    type_name: ty.name(),
                    reason: format!("'{}' is not a decimal number", text),
                }),
            other => Err(ConvertError::UnexpectedToken {
                type_name: ty.name(),
                expected: "decimal string or number",
                found: token_kind(&other),
            }),
        }
    }

    fn write(
        &self,
        value: Value,
        _ty: &RuntimeType,
        _serializer: &JsonSerializer,
    ) -> Result<Value, ConvertError> {
        match value {
            Value::Number(n) => Ok(Value::String(n.to_string())),
            other => Ok(other),
        }
    }
}
