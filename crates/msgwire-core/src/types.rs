//! Runtime type descriptors
//!
//! Rust has no runtime reflection, so every type that travels inside an envelope
//! describes its own JSON shape through [`Describe`]. The resulting
//! [`RuntimeType`] is what converters inspect and what the dispatch cache keys on.

use serde::{Deserialize, Serialize};
use std::any::TypeId;
use std::collections::{BTreeMap, HashMap};
use std::fmt;
use std::hash::{Hash, Hasher};
use std::str::FromStr;
use std::sync::Arc;

/// Shape of a described type
#[derive(Debug, Clone)]
pub enum TypeKind {
    Bool,
    Integer,
    Float,
    Text,
    /// Exact decimal, see [`Decimal`]
    Decimal,
    /// Raw bytes, see [`ByteArray`]
    Bytes,
    /// Reference to an externally stored payload
    MessageData,
    /// Untyped JSON, passed through untouched
    Value,
    Optional(RuntimeType),
    Sequence(RuntimeType),
    /// String-keyed map
    Map(RuntimeType),
    Record(Vec<Field>),
    /// Contract-typed field materialized through a concrete implementation
    Interface {
        contract: &'static str,
        implementation: RuntimeType,
    },
}

/// A named member of a record
#[derive(Debug, Clone)]
pub struct Field {
    /// Member name as it appears on the wire
    pub name: &'static str,
    pub ty: RuntimeType,
}

impl Field {
    /// Describe a member from its Rust type
    pub fn of<T: Describe>(name: &'static str) -> Self {
        Self {
            name,
            ty: T::describe(),
        }
    }

    /// Describe a member with an explicit descriptor
    pub fn new(name: &'static str, ty: RuntimeType) -> Self {
        Self { name, ty }
    }
}

#[derive(Debug)]
struct TypeInfo {
    id: TypeId,
    name: &'static str,
    kind: TypeKind,
}

/// Identity of a descriptor: its Rust type plus, for interface fields, the contract.
///
/// Every other kind has exactly one descriptor per Rust type, so the contract is
/// `None` for them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TypeKey {
    id: TypeId,
    contract: Option<&'static str>,
}

/// Descriptor of a concrete Rust type.
///
/// Equality and hashing use only the [`TypeKey`], which is stable for the life of
/// the process.
#[derive(Clone)]
pub struct RuntimeType {
    info: Arc<TypeInfo>,
}

impl RuntimeType {
    /// Describe `T` with the given shape
    pub fn of<T: ?Sized + 'static>(kind: TypeKind) -> Self {
        Self {
            info: Arc::new(TypeInfo {
                id: TypeId::of::<T>(),
                name: std::any::type_name::<T>(),
                kind,
            }),
        }
    }

    /// Describe a record type by its members
    pub fn record<T: 'static>(fields: Vec<Field>) -> Self {
        Self::of::<T>(TypeKind::Record(fields))
    }

    /// Describe `T` as an implementation of `contract`.
    ///
    /// The wire form is the implementation's record; decoding materializes it.
    pub fn interface<T: Describe>(contract: &'static str) -> Self {
        Self::of::<dyn Contract<T>>(TypeKind::Interface {
            contract,
            implementation: T::describe(),
        })
    }

    pub fn id(&self) -> TypeId {
        self.info.id
    }

    /// Key the dispatch cache and equality work on
    pub fn key(&self) -> TypeKey {
        let contract = match &self.info.kind {
            TypeKind::Interface { contract, .. } => Some(*contract),
            _ => None,
        };
        TypeKey {
            id: self.info.id,
            contract,
        }
    }

    pub fn name(&self) -> &'static str {
        self.info.name
    }

    pub fn kind(&self) -> &TypeKind {
        &self.info.kind
    }

    /// Find a record member by wire name
    pub fn field(&self, name: &str) -> Option<&Field> {
        match &self.info.kind {
            TypeKind::Record(fields) => fields.iter().find(|f| f.name == name),
            _ => None,
        }
    }

    /// The JSON value a missing member of this type decodes to
    pub fn default_value(&self) -> serde_json::Value {
        use serde_json::Value;

        match &self.info.kind {
            TypeKind::Bool => Value::Bool(false),
            TypeKind::Integer | TypeKind::Decimal => Value::from(0),
            TypeKind::Float => Value::from(0.0),
            TypeKind::Text => Value::String(String::new()),
            TypeKind::Bytes | TypeKind::Sequence(_) => Value::Array(Vec::new()),
            TypeKind::Map(_) => Value::Object(serde_json::Map::new()),
            TypeKind::Record(fields) => Value::Object(
                fields
                    .iter()
                    .map(|f| (f.name.to_string(), f.ty.default_value()))
                    .collect(),
            ),
            TypeKind::Interface { implementation, .. } => implementation.default_value(),
            TypeKind::Optional(_) | TypeKind::MessageData | TypeKind::Value => Value::Null,
        }
    }

    /// Whether `value` is this type's language default and may be omitted.
    ///
    /// Only scalar and text kinds qualify; collections and records are always
    /// written.
    pub fn is_default_value(&self, value: &serde_json::Value) -> bool {
        use serde_json::Value;

        match (&self.info.kind, value) {
            (_, Value::Null) => true,
            (TypeKind::Bool, Value::Bool(b)) => !*b,
            (TypeKind::Integer | TypeKind::Float | TypeKind::Decimal, Value::Number(n)) => {
                n.as_f64() == Some(0.0)
            }
            (TypeKind::Text, Value::String(s)) => s.is_empty(),
            _ => false,
        }
    }
}

impl PartialEq for RuntimeType {
    fn eq(&self, other: &Self) -> bool {
        self.key() == other.key()
    }
}

impl Eq for RuntimeType {}

impl Hash for RuntimeType {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.key().hash(state);
    }
}

impl fmt::Debug for RuntimeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RuntimeType")
            .field("name", &self.info.name)
            .field("kind", &self.info.kind)
            .finish()
    }
}

impl fmt::Display for RuntimeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.info.name)
    }
}

/// Marker giving each interface descriptor its own [`TypeId`]
pub trait Contract<T> {}

/// Types that can describe their JSON shape
pub trait Describe: 'static {
    fn describe() -> RuntimeType;
}

macro_rules! describe_scalar {
    ($kind:ident => $($ty:ty),+) => {
        $(
            impl Describe for $ty {
                fn describe() -> RuntimeType {
                    RuntimeType::of::<$ty>(TypeKind::$kind)
                }
            }
        )+
    };
}

describe_scalar!(Bool => bool);
describe_scalar!(Integer => i8, i16, i32, i64, u16, u32, u64, usize, isize);
describe_scalar!(Float => f32, f64);
describe_scalar!(Text => String);
describe_scalar!(Value => serde_json::Value);

impl<T: Describe> Describe for Option<T> {
    fn describe() -> RuntimeType {
        RuntimeType::of::<Self>(TypeKind::Optional(T::describe()))
    }
}

impl<T: Describe> Describe for Vec<T> {
    fn describe() -> RuntimeType {
        RuntimeType::of::<Self>(TypeKind::Sequence(T::describe()))
    }
}

impl<T: Describe> Describe for HashMap<String, T> {
    fn describe() -> RuntimeType {
        RuntimeType::of::<Self>(TypeKind::Map(T::describe()))
    }
}

impl<T: Describe> Describe for BTreeMap<String, T> {
    fn describe() -> RuntimeType {
        RuntimeType::of::<Self>(TypeKind::Map(T::describe()))
    }
}

/// Byte payload.
///
/// Serde writes it as an array of numbers; the byte-array converter turns that
/// into base64 text on the wire.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ByteArray(pub Vec<u8>);

impl From<Vec<u8>> for ByteArray {
    fn from(bytes: Vec<u8>) -> Self {
        Self(bytes)
    }
}

impl AsRef<[u8]> for ByteArray {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

describe_scalar!(Bytes => ByteArray);

/// Decimal amount carried as a JSON number.
///
/// The number keeps its source text (serde_json `arbitrary_precision`), so
/// `"12.50"` displays as `12.50` and digits beyond `f64` survive. On the wire the
/// string-decimal converter writes it as text so that receivers without exact
/// decimals do not lose digits.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Decimal(serde_json::Number);

impl Decimal {
    pub fn as_number(&self) -> &serde_json::Number {
        &self.0
    }

    pub fn as_f64(&self) -> Option<f64> {
        self.0.as_f64()
    }
}

impl Default for Decimal {
    fn default() -> Self {
        Self(serde_json::Number::from(0))
    }
}

impl From<i64> for Decimal {
    fn from(value: i64) -> Self {
        Self(value.into())
    }
}

impl From<serde_json::Number> for Decimal {
    fn from(value: serde_json::Number) -> Self {
        Self(value)
    }
}

impl FromStr for Decimal {
    type Err = serde_json::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        serde_json::from_str::<serde_json::Number>(s.trim()).map(Self)
    }
}

impl fmt::Display for Decimal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

describe_scalar!(Decimal => Decimal);

#[cfg(test)]
#[path = "types/types_tests.rs"]
mod types_tests;
