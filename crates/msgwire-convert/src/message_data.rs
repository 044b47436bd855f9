//! References to externally stored payloads

use crate::byte_array::{bytes_to_value, value_to_bytes};
use crate::converter::{CachedConverter, ConverterFactory, TypeConverter, Unsupported};
use crate::serializer::JsonSerializer;
use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use msgwire_core::{ByteArray, ConvertError, Describe, RuntimeType, TypeKind, token_kind};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::sync::Arc;

const REFERENCE_MEMBER: &str = "data-ref";
const DATA_MEMBER: &str = "data";

/// Default inline threshold, in bytes
pub const DEFAULT_INLINE_THRESHOLD: usize = 4096;

/// A large payload stored outside the envelope.
///
/// Only the address travels on the wire, plus the bytes themselves when they are
/// small enough to inline. Loading the payload from the address is up to the
/// repository that stored it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessageData {
    pub address: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub inline: Option<ByteArray>,
}

impl MessageData {
    pub fn new(address: impl Into<String>) -> Self {
        Self {
            address: address.into(),
            inline: None,
        }
    }

    /// Attach the payload bytes
    pub fn with_inline(mut self, bytes: impl Into<Vec<u8>>) -> Self {
        self.inline = Some(ByteArray(bytes.into()));
        self
    }

    pub fn inline_bytes(&self) -> Option<&[u8]> {
        self.inline.as_ref().map(|b| b.0.as_slice())
    }
}

impl Describe for MessageData {
    fn describe() -> RuntimeType {
        RuntimeType::of::<Self>(TypeKind::MessageData)
    }
}

/// Converter for [`MessageData`] members
pub type MessageDataJsonConverter = CachedConverter<MessageDataReferences>;

#[derive(Debug, Clone, Copy)]
pub struct MessageDataReferences {
    inline_threshold: usize,
}

impl MessageDataReferences {
    pub fn with_threshold(inline_threshold: usize) -> Self {
        Self { inline_threshold }
    }

    pub fn inline_threshold(&self) -> usize {
        self.inline_threshold
    }
}

impl Default for MessageDataReferences {
    fn default() -> Self {
        Self::with_threshold(DEFAULT_INLINE_THRESHOLD)
    }
}

impl ConverterFactory for MessageDataReferences {
    fn name(&self) -> &'static str {
        "message-data"
    }

    fn create(&self, ty: &RuntimeType) -> Arc<dyn TypeConverter> {
        match ty.kind() {
            TypeKind::MessageData => Arc::new(ReferenceCodec {
                inline_threshold: self.inline_threshold,
            }),
            _ => Arc::new(Unsupported),
        }
    }
}

struct ReferenceCodec {
    inline_threshold: usize,
}

impl TypeConverter for ReferenceCodec {
    fn read(
        &self,
        value: Value,
        ty: &RuntimeType,
        _serializer: &JsonSerializer,
    ) -> Result<Value, ConvertError> {
        let mut members = match value {
            Value::Null => return Ok(Value::Null),
            Value::String(address) => return Ok(structural(address, None)),
            Value::Object(members) => members,
            other => {
                return Err(ConvertError::UnexpectedToken {
                    type_name: ty.name(),
                    expected: "message data reference",
                    found: token_kind(&other),
                });
            }
        };

        let address = match members
            .remove(REFERENCE_MEMBER)
            .or_else(|| members.remove("address"))
        {
            Some(Value::String(address)) => address,
            _ => {
                return Err(ConvertError::InvalidValue {
                    type_name: ty.name(),
                    reason: "missing data reference".to_string(),
                });
            }
        };

        let inline = match members.remove(DATA_MEMBER).or_else(|| members.remove("inline")) {
            None | Some(Value::Null) => None,
            Some(Value::String(text)) => {
                Some(STANDARD.decode(text.as_bytes()).map_err(|e| {
                    ConvertError::InvalidValue {
                        type_name: ty.name(),
                        reason: e.to_string(),
                    }
                })?)
            }
            Some(Value::Array(items)) => Some(value_to_bytes(ty, &items)?),
            Some(other) => {
                return Err(ConvertError::UnexpectedToken {
                    type_name: ty.name(),
                    expected: "base64 string",
                    found: token_kind(&other),
                });
            }
        };

        Ok(structural(address, inline))
    }

    fn write(
        &self,
        value: Value,
        ty: &RuntimeType,
        _serializer: &JsonSerializer,
    ) -> Result<Value, ConvertError> {
        let data: MessageData = serde_json::from_value(value)?;
        let mut out = Map::new();
        out.insert(REFERENCE_MEMBER.to_string(), Value::String(data.address));

        if let Some(ByteArray(bytes)) = data.inline {
            if bytes.len() <= self.inline_threshold {
                out.insert(DATA_MEMBER.to_string(), Value::String(STANDARD.encode(&bytes)));
            } else {
                tracing::debug!(
                    type_name = ty.name(),
                    size = bytes.len(),
                    threshold = self.inline_threshold,
                    "message data exceeds inline threshold, sending reference only"
                );
            }
        }

        Ok(Value::Object(out))
    }
}

fn structural(address: String, inline: Option<Vec<u8>>) -> Value {
    let mut out = Map::new();
    out.insert("address".to_string(), Value::String(address));
    if let Some(bytes) = inline {
        out.insert("inline".to_string(), bytes_to_value(&bytes));
    }
    Value::Object(out)
}
