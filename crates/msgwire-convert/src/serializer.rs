//! Structural JSON engine driven by type descriptors

use crate::converter::JsonConverter;
use crate::settings::{
    CodecConfiguration, ConstructorHandling, DefaultValueHandling, Formatting,
    MissingMemberHandling, NullValueHandling, SerializerSettings,
};
use msgwire_core::{ConvertError, Describe, Field, RuntimeType, TypeKind, token_kind};
use serde::{Serialize, de::DeserializeOwned};
use serde_json::{Map, Value};
use std::io::Write;
use std::sync::Arc;

/// Applies one [`SerializerSettings`] to values.
///
/// Values are first produced by serde in their structural form, then walked
/// under their [`RuntimeType`]. Wherever a configured converter accepts the type
/// at hand, it takes over that subtree; everything else is handled by the
/// structural rules (null/default omission, unknown members, absent members).
#[derive(Debug, Clone)]
pub struct JsonSerializer {
    settings: Arc<SerializerSettings>,
}

impl JsonSerializer {
    pub fn new(settings: Arc<SerializerSettings>) -> Self {
        Self { settings }
    }

    /// Serializer over the process-wide encode configuration
    pub fn encoder() -> Self {
        Self::new(CodecConfiguration::global().encode.clone())
    }

    /// Serializer over the process-wide decode configuration
    pub fn decoder() -> Self {
        Self::new(CodecConfiguration::global().decode.clone())
    }

    pub fn settings(&self) -> &SerializerSettings {
        &self.settings
    }

    /// Produce the wire value of `value`
    pub fn to_value<T: Serialize + Describe>(&self, value: &T) -> Result<Value, ConvertError> {
        let structural = serde_json::to_value(value)?;
        self.write_value(structural, &T::describe())
    }

    /// Materialize a `T` from its wire value
    pub fn from_value<T: DeserializeOwned + Describe>(
        &self,
        value: Value,
    ) -> Result<T, ConvertError> {
        let structural = self.read_value(value, &T::describe())?;
        Ok(serde_json::from_value(structural)?)
    }

    /// Write an already converted value using the configured formatting
    pub fn write_to<W: Write, V: Serialize + ?Sized>(
        &self,
        writer: W,
        value: &V,
    ) -> Result<(), ConvertError> {
        match self.settings.formatting {
            Formatting::Indented => serde_json::to_writer_pretty(writer, value)?,
            Formatting::Compact => serde_json::to_writer(writer, value)?,
        }
        Ok(())
    }

    /// Convert a structural value of `ty` into its wire form
    pub fn write_value(&self, value: Value, ty: &RuntimeType) -> Result<Value, ConvertError> {
        if value.is_null() {
            return Ok(Value::Null);
        }
        if let Some(converter) = self.writer_for(ty) {
            return converter.write_json(value, ty, self);
        }

        match (ty.kind(), value) {
            (TypeKind::Optional(inner), value) => self.write_value(value, inner),
            (TypeKind::Sequence(element), Value::Array(items)) => items
                .into_iter()
                .map(|item| self.write_value(item, element))
                .collect::<Result<Vec<_>, _>>()
                .map(Value::Array),
            (TypeKind::Map(inner), Value::Object(entries)) => entries
                .into_iter()
                .map(|(key, entry)| Ok((key, self.write_value(entry, inner)?)))
                .collect::<Result<Map<_, _>, ConvertError>>()
                .map(Value::Object),
            (TypeKind::Record(fields), Value::Object(members)) => {
                self.write_record(fields, members)
            }
            (TypeKind::Interface { implementation, .. }, value) => {
                self.write_value(value, implementation)
            }
            (_, value) => Ok(value),
        }
    }

    /// Convert a wire value into the structural form of `ty`
    pub fn read_value(&self, value: Value, ty: &RuntimeType) -> Result<Value, ConvertError> {
        if let Some(converter) = self.reader_for(ty) {
            return converter.read_json(value, ty, self);
        }

        match (ty.kind(), value) {
            (_, Value::Null) => Ok(Value::Null),
            (TypeKind::Optional(inner), value) => self.read_value(value, inner),
            (TypeKind::Sequence(element), Value::Array(items)) => items
                .into_iter()
                .map(|item| self.read_value(item, element))
                .collect::<Result<Vec<_>, _>>()
                .map(Value::Array),
            (TypeKind::Map(inner), Value::Object(entries)) => entries
                .into_iter()
                .map(|(key, entry)| Ok((key, self.read_value(entry, inner)?)))
                .collect::<Result<Map<_, _>, ConvertError>>()
                .map(Value::Object),
            (TypeKind::Record(fields), Value::Object(members)) => {
                self.read_record(ty, fields, members)
            }
            (TypeKind::Record(_), other) => Err(ConvertError::UnexpectedToken {
                type_name: ty.name(),
                expected: "object",
                found: token_kind(&other),
            }),
            (TypeKind::Interface { implementation, .. }, value) => {
                self.read_value(value, implementation)
            }
            (_, value) => Ok(value),
        }
    }

    fn writer_for(&self, ty: &RuntimeType) -> Option<&Arc<dyn JsonConverter>> {
        self.settings
            .converters
            .iter()
            .find(|c| c.can_write() && c.can_convert(ty))
    }

    fn reader_for(&self, ty: &RuntimeType) -> Option<&Arc<dyn JsonConverter>> {
        self.settings
            .converters
            .iter()
            .find(|c| c.can_read() && c.can_convert(ty))
    }

    fn write_record(
        &self,
        fields: &[Field],
        members: Map<String, Value>,
    ) -> Result<Value, ConvertError> {
        let mut out = Map::new();
        for (name, member) in members {
            match fields.iter().find(|f| f.name == name) {
                Some(field) => {
                    if self.omits(&field.ty, &member) {
                        continue;
                    }
                    out.insert(name, self.write_value(member, &field.ty)?);
                }
                None => {
                    out.insert(name, member);
                }
            }
        }
        Ok(Value::Object(out))
    }

    fn omits(&self, ty: &RuntimeType, member: &Value) -> bool {
        if member.is_null() && self.settings.null_value_handling == NullValueHandling::Ignore {
            return true;
        }
        self.settings.default_value_handling == DefaultValueHandling::Ignore
            && ty.is_default_value(member)
    }

    fn read_record(
        &self,
        ty: &RuntimeType,
        fields: &[Field],
        members: Map<String, Value>,
    ) -> Result<Value, ConvertError> {
        let fill_defaults =
            self.settings.constructor_handling == ConstructorHandling::FillDefaults;
        let mut out = Map::new();

        for (name, member) in members {
            let Some(field) = fields.iter().find(|f| f.name == name) else {
                match self.settings.missing_member_handling {
                    MissingMemberHandling::Ignore => {
                        tracing::trace!(type_name = ty.name(), member = %name, "ignored member");
                        continue;
                    }
                    MissingMemberHandling::Error => {
                        return Err(ConvertError::UnknownMember {
                            type_name: ty.name(),
                            member: name,
                        });
                    }
                }
            };

            let member = self.read_value(member, &field.ty)?;
            let member = if member.is_null() && fill_defaults {
                field.ty.default_value()
            } else {
                member
            };
            out.insert(name, member);
        }

        if fill_defaults {
            for field in fields {
                if !out.contains_key(field.name) {
                    out.insert(field.name.to_string(), field.ty.default_value());
                }
            }
        }

        Ok(Value::Object(out))
    }
}

impl Default for JsonSerializer {
    fn default() -> Self {
        Self::encoder()
    }
}
