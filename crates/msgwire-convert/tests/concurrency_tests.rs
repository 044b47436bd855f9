//! Concurrency tests for converter resolution
//!
//! Many threads resolving the same unseen type at once must all end up with
//! the single cached entry.

use msgwire_convert::{
    CachedConverter, ConverterFactory, DispatchCache, JsonConverter, JsonSerializer,
    TypeConverter, Unsupported,
};
use msgwire_core::{ConvertError, Describe, RuntimeType, TypeKind};
use serde_json::Value;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Barrier};
use std::thread;

struct Tagged(usize);

impl TypeConverter for Tagged {
    fn read(
        &self,
        _value: Value,
        _ty: &RuntimeType,
        _serializer: &JsonSerializer,
    ) -> Result<Value, ConvertError> {
        Ok(Value::from(self.0))
    }
}

/// Factory handing out a distinct converter per call
#[derive(Default)]
struct NumberingFactory {
    calls: AtomicUsize,
}

impl ConverterFactory for NumberingFactory {
    fn name(&self) -> &'static str {
        "numbering"
    }

    fn create(&self, ty: &RuntimeType) -> Arc<dyn TypeConverter> {
        let call = self.calls.fetch_add(1, Ordering::SeqCst);
        match ty.kind() {
            TypeKind::Text => Arc::new(Tagged(call)),
            _ => Arc::new(Unsupported),
        }
    }
}

#[test]
fn test_concurrent_resolve_same_type_agrees() {
    let cache = Arc::new(DispatchCache::new());
    let num_threads = 32;
    let barrier = Arc::new(Barrier::new(num_threads));
    let counter = Arc::new(AtomicUsize::new(0));

    let handles: Vec<_> = (0..num_threads)
        .map(|_| {
            let cache = cache.clone();
            let barrier = barrier.clone();
            let counter = counter.clone();
            thread::spawn(move || {
                barrier.wait();
                let entry = cache.resolve(&String::describe(), |_| {
                    Arc::new(Tagged(counter.fetch_add(1, Ordering::SeqCst)))
                });
                let serializer = JsonSerializer::decoder();
                entry
                    .read(Value::Null, &String::describe(), &serializer)
                    .expect("tagged converter reads")
            })
        })
        .collect();

    let observed: Vec<Value> = handles
        .into_iter()
        .map(|h| h.join().expect("Thread should complete"))
        .collect();

    assert!(observed.windows(2).all(|w| w[0] == w[1]));
    assert_eq!(cache.len(), 1);
    assert!(counter.load(Ordering::SeqCst) >= 1);
}

#[test]
fn test_concurrent_can_convert_mixed_types() {
    let converter = Arc::new(CachedConverter::new(NumberingFactory::default()));
    let num_threads = 16;
    let barrier = Arc::new(Barrier::new(num_threads));

    let handles: Vec<_> = (0..num_threads)
        .map(|i| {
            let converter = converter.clone();
            let barrier = barrier.clone();
            thread::spawn(move || {
                barrier.wait();
                if i % 2 == 0 {
                    converter.can_convert(&String::describe())
                } else {
                    converter.can_convert(&u64::describe())
                }
            })
        })
        .collect();

    for (i, handle) in handles.into_iter().enumerate() {
        let supported = handle.join().expect("Thread should complete");
        assert_eq!(supported, i % 2 == 0);
    }

    assert_eq!(converter.cache().len(), 2);
    assert!(!converter.can_convert(&u64::describe()));
    assert!(converter.can_convert(&String::describe()));
}

#[test]
fn test_concurrent_resolution_then_stable() {
    let converter = Arc::new(CachedConverter::new(NumberingFactory::default()));
    let num_threads = 24;
    let barrier = Arc::new(Barrier::new(num_threads));

    let handles: Vec<_> = (0..num_threads)
        .map(|_| {
            let converter = converter.clone();
            let barrier = barrier.clone();
            thread::spawn(move || {
                barrier.wait();
                let entry = converter.resolve(&String::describe());
                let serializer = JsonSerializer::decoder();
                entry
                    .read(Value::Null, &String::describe(), &serializer)
                    .expect("tagged converter reads")
            })
        })
        .collect();

    let observed: Vec<Value> = handles
        .into_iter()
        .map(|h| h.join().expect("Thread should complete"))
        .collect();
    let settled = observed[0].clone();

    assert!(observed.iter().all(|v| *v == settled));

    // Later lookups never re-run the factory
    let calls_before = converter.factory().calls.load(Ordering::SeqCst);
    let serializer = JsonSerializer::decoder();
    let later = converter
        .read_json(Value::Null, &String::describe(), &serializer)
        .expect("tagged converter reads");
    assert_eq!(later, settled);
    assert_eq!(converter.factory().calls.load(Ordering::SeqCst), calls_before);
}
