//! Converter capability and the per-type dispatch cache

use crate::serializer::JsonSerializer;
use dashmap::DashMap;
use msgwire_core::{ConvertError, RuntimeType, TypeKey};
use serde_json::Value;
use std::sync::Arc;

/// A pluggable unit of type-specific JSON handling.
///
/// The serializer consults converters in their configured order and hands each
/// value to the first one whose [`can_convert`](Self::can_convert) accepts the
/// target type.
pub trait JsonConverter: Send + Sync {
    /// Short name used in logs
    fn name(&self) -> &'static str;

    /// Whether this converter applies to `ty`
    fn can_convert(&self, ty: &RuntimeType) -> bool;

    /// Whether this converter takes part in decoding
    fn can_read(&self) -> bool {
        true
    }

    /// Whether this converter takes part in encoding
    fn can_write(&self) -> bool {
        true
    }

    /// Turn a wire value into the structural form serde expects for `ty`
    fn read_json(
        &self,
        value: Value,
        ty: &RuntimeType,
        serializer: &JsonSerializer,
    ) -> Result<Value, ConvertError>;

    /// Turn a structural value of `ty` into its wire form
    fn write_json(
        &self,
        value: Value,
        _ty: &RuntimeType,
        _serializer: &JsonSerializer,
    ) -> Result<Value, ConvertError> {
        Ok(value)
    }
}

/// Converter resolved for one concrete type
pub trait TypeConverter: Send + Sync {
    fn is_supported(&self) -> bool {
        true
    }

    fn read(
        &self,
        value: Value,
        ty: &RuntimeType,
        serializer: &JsonSerializer,
    ) -> Result<Value, ConvertError>;

    fn write(
        &self,
        value: Value,
        _ty: &RuntimeType,
        _serializer: &JsonSerializer,
    ) -> Result<Value, ConvertError> {
        Ok(value)
    }
}

/// Sentinel cached for types a factory does not handle
#[derive(Debug, Clone, Copy, Default)]
pub struct Unsupported;

impl TypeConverter for Unsupported {
    fn is_supported(&self) -> bool {
        false
    }

    fn read(
        &self,
        _value: Value,
        ty: &RuntimeType,
        _serializer: &JsonSerializer,
    ) -> Result<Value, ConvertError> {
        tracing::error!(
            type_name = ty.name(),
            "read requested on a type the converter reported as unsupported"
        );
        Err(ConvertError::Unsupported {
            type_name: ty.name(),
        })
    }
}

/// Inspects a type definition and builds the converter for it
pub trait ConverterFactory: Send + Sync + 'static {
    fn name(&self) -> &'static str;

    /// Build the converter for `ty`, or [`Unsupported`].
    ///
    /// Must be free of side effects: concurrent first lookups of one type may
    /// call it more than once.
    fn create(&self, ty: &RuntimeType) -> Arc<dyn TypeConverter>;

    fn can_read(&self) -> bool {
        true
    }

    fn can_write(&self) -> bool {
        true
    }
}

/// Memoized type → converter mapping.
///
/// Reads are lock-free once a type is cached. A miss computes the entry outside
/// the map and inserts it only if the slot is still empty, so racing callers
/// may each run the factory but all observe the first inserted entry.
#[derive(Default)]
pub struct DispatchCache {
    entries: DashMap<TypeKey, Arc<dyn TypeConverter>>,
}

impl DispatchCache {
    pub fn new() -> Self {
        Self {
            entries: DashMap::new(),
        }
    }

    /// Resolve the converter for `ty`, building it with `factory` on a miss
    pub fn resolve<F>(&self, ty: &RuntimeType, factory: F) -> Arc<dyn TypeConverter>
    where
        F: FnOnce(&RuntimeType) -> Arc<dyn TypeConverter>,
    {
        if let Some(entry) = self.entries.get(&ty.key()) {
            return entry.value().clone();
        }

        let created = factory(ty);
        let entry = self.entries.entry(ty.key()).or_insert(created).value().clone();
        tracing::trace!(
            type_name = ty.name(),
            supported = entry.is_supported(),
            "resolved converter"
        );
        entry
    }

    /// Whether `ty` is already cached
    pub fn contains(&self, ty: &RuntimeType) -> bool {
        self.entries.contains_key(&ty.key())
    }

    /// Number of cached types, supported or not
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// A [`JsonConverter`] whose per-type behavior comes from a factory and is
/// resolved once per type.
pub struct CachedConverter<F> {
    factory: F,
    cache: DispatchCache,
}

impl<F: ConverterFactory> CachedConverter<F> {
    pub fn new(factory: F) -> Self {
        Self {
            factory,
            cache: DispatchCache::new(),
        }
    }

    /// Resolve (and cache) the converter for `ty`
    pub fn resolve(&self, ty: &RuntimeType) -> Arc<dyn TypeConverter> {
        self.cache.resolve(ty, |t| self.factory.create(t))
    }

    pub fn factory(&self) -> &F {
        &self.factory
    }

    pub fn cache(&self) -> &DispatchCache {
        &self.cache
    }
}

impl<F: ConverterFactory + Default> Default for CachedConverter<F> {
    fn default() -> Self {
        Self::new(F::default())
    }
}

impl<F: ConverterFactory> JsonConverter for CachedConverter<F> {
    fn name(&self) -> &'static str {
        self.factory.name()
    }

    fn can_convert(&self, ty: &RuntimeType) -> bool {
        self.resolve(ty).is_supported()
    }

    fn can_read(&self) -> bool {
        self.factory.can_read()
    }

    fn can_write(&self) -> bool {
        self.factory.can_write()
    }

    fn read_json(
        &self,
        value: Value,
        ty: &RuntimeType,
        serializer: &JsonSerializer,
    ) -> Result<Value, ConvertError> {
        self.resolve(ty).read(value, ty, serializer)
    }

    fn write_json(
        &self,
        value: Value,
        ty: &RuntimeType,
        serializer: &JsonSerializer,
    ) -> Result<Value, ConvertError> {
        self.resolve(ty).write(value, ty, serializer)
    }
}
