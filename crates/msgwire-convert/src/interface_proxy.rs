//! Contract-typed members on the decode path

use crate::converter::{CachedConverter, ConverterFactory, TypeConverter, Unsupported};
use crate::serializer::JsonSerializer;
use msgwire_core::{ConvertError, RuntimeType, TypeKind};
use serde_json::Value;
use std::sync::Arc;

/// Decode-only converter materializing interface members from structural data
pub type InterfaceProxyConverter = CachedConverter<InterfaceProxyFactory>;

#[derive(Debug, Clone, Copy, Default)]
pub struct InterfaceProxyFactory;

impl ConverterFactory for InterfaceProxyFactory {
    fn name(&self) -> &'static str {
        "interface-proxy"
    }

    fn create(&self, ty: &RuntimeType) -> Arc<dyn TypeConverter> {
        match ty.kind() {
            TypeKind::Interface {
                contract,
                implementation,
            } => match implementation.kind() {
                TypeKind::Record(_) => Arc::new(ProxyReader {
                    contract: *contract,
                    implementation: implementation.clone(),
                }),
                _ => Arc::new(Unsupported),
            },
            _ => Arc::new(Unsupported),
        }
    }

    fn can_write(&self) -> bool {
        false
    }
}

struct ProxyReader {
    contract: &'static str,
    implementation: RuntimeType,
}

impl TypeConverter for ProxyReader {
    fn read(
        &self,
        value: Value,
        _ty: &RuntimeType,
        serializer: &JsonSerializer,
    ) -> Result<Value, ConvertError> {
        // An absent contract member still materializes, with every member defaulted
        let value = match value {
            Value::Null => Value::Object(serde_json::Map::new()),
            other => other,
        };
        tracing::trace!(
            contract = self.contract,
            implementation = self.implementation.name(),
            "materializing proxy"
        );
        serializer.read_value(value, &self.implementation)
    }
}
