//! Ordered collections on the decode path

use crate::converter::{CachedConverter, ConverterFactory, TypeConverter, Unsupported};
use crate::serializer::JsonSerializer;
use msgwire_core::{ConvertError, RuntimeType, TypeKind};
use serde_json::Value;
use std::sync::Arc;

/// Decode-only converter for sequence members
pub type ListJsonConverter = CachedConverter<ListFactory>;

#[derive(Debug, Clone, Copy, Default)]
pub struct ListFactory;

impl ConverterFactory for ListFactory {
    fn name(&self) -> &'static str {
        "list"
    }

    fn create(&self, ty: &RuntimeType) -> Arc<dyn TypeConverter> {
        match ty.kind() {
            TypeKind::Sequence(element) => Arc::new(ListReader {
                element: element.clone(),
            }),
            _ => Arc::new(Unsupported),
        }
    }

    // Sequences are written by the structural rules
    fn can_write(&self) -> bool {
        false
    }
}

struct ListReader {
    element: RuntimeType,
}

impl TypeConverter for ListReader {
    fn read(
        &self,
        value: Value,
        _ty: &RuntimeType,
        serializer: &JsonSerializer,
    ) -> Result<Value, ConvertError> {
        let items = match value {
            Value::Null => Vec::new(),
            Value::Array(items) => items,
            single => vec![single],
        };
        items
            .into_iter()
            .map(|item| serializer.read_value(item, &self.element))
            .collect::<Result<Vec<_>, _>>()
            .map(Value::Array)
    }
}
