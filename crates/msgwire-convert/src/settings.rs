//! Codec configurations for the encode and decode directions

use crate::converter::JsonConverter;
use crate::{
    byte_array::ByteArrayConverter, interface_proxy::InterfaceProxyConverter,
    list::ListJsonConverter,
    message_data::{MessageDataJsonConverter, MessageDataReferences},
    string_decimal::StringDecimalConverter,
};
use msgwire_core::SerializerOptions;
use once_cell::sync::Lazy;
use std::fmt;
use std::sync::Arc;

/// What to do with members holding `null`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum NullValueHandling {
    Include,
    #[default]
    Ignore,
}

/// What to do with members holding their type's default value
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DefaultValueHandling {
    Include,
    #[default]
    Ignore,
}

/// What to do with JSON members the target record does not declare
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MissingMemberHandling {
    #[default]
    Ignore,
    Error,
}

/// How records are materialized when the wire form lacks some members
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ConstructorHandling {
    /// Leave absent members to serde
    Strict,
    /// Fill absent members with their kind's default value
    #[default]
    FillDefaults,
}

/// Output layout
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Formatting {
    #[default]
    Indented,
    Compact,
}

/// Immutable bundle of structural rules plus an ordered converter list.
///
/// Type identity never travels through converters: the only type metadata on
/// the wire is the envelope's declared type names.
#[derive(Clone)]
pub struct SerializerSettings {
    pub null_value_handling: NullValueHandling,
    pub default_value_handling: DefaultValueHandling,
    pub missing_member_handling: MissingMemberHandling,
    pub constructor_handling: ConstructorHandling,
    pub formatting: Formatting,
    pub converters: Vec<Arc<dyn JsonConverter>>,
}

impl SerializerSettings {
    /// Structural rules with no converters
    pub fn empty() -> Self {
        Self {
            null_value_handling: NullValueHandling::default(),
            default_value_handling: DefaultValueHandling::default(),
            missing_member_handling: MissingMemberHandling::default(),
            constructor_handling: ConstructorHandling::default(),
            formatting: Formatting::default(),
            converters: Vec::new(),
        }
    }

    /// The encode configuration: byte arrays, message data and decimals
    pub fn base(options: &SerializerOptions) -> Self {
        let formatting = if options.indented {
            Formatting::Indented
        } else {
            Formatting::Compact
        };
        Self {
            formatting,
            converters: vec![
                Arc::new(ByteArrayConverter::default()) as Arc<dyn JsonConverter>,
                Arc::new(MessageDataJsonConverter::new(
                    MessageDataReferences::with_threshold(options.message_data_threshold),
                )),
                Arc::new(StringDecimalConverter::default()),
            ],
            ..Self::empty()
        }
    }

    /// Copy of these settings with `converters` appended after the existing ones
    pub fn with_additional_converters(
        &self,
        converters: impl IntoIterator<Item = Arc<dyn JsonConverter>>,
    ) -> Self {
        let mut settings = self.clone();
        settings.converters.extend(converters);
        settings
    }

    /// Append a converter
    pub fn with_converter(mut self, converter: Arc<dyn JsonConverter>) -> Self {
        self.converters.push(converter);
        self
    }

    pub fn with_formatting(mut self, formatting: Formatting) -> Self {
        self.formatting = formatting;
        self
    }

    pub fn with_missing_member_handling(mut self, handling: MissingMemberHandling) -> Self {
        self.missing_member_handling = handling;
        self
    }

    pub fn with_null_value_handling(mut self, handling: NullValueHandling) -> Self {
        self.null_value_handling = handling;
        self
    }

    pub fn with_default_value_handling(mut self, handling: DefaultValueHandling) -> Self {
        self.default_value_handling = handling;
        self
    }

    pub fn with_constructor_handling(mut self, handling: ConstructorHandling) -> Self {
        self.constructor_handling = handling;
        self
    }

    /// Names of the configured converters, in order
    pub fn converter_names(&self) -> Vec<&'static str> {
        self.converters.iter().map(|c| c.name()).collect()
    }
}

impl fmt::Debug for SerializerSettings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SerializerSettings")
            .field("null_value_handling", &self.null_value_handling)
            .field("default_value_handling", &self.default_value_handling)
            .field("missing_member_handling", &self.missing_member_handling)
            .field("constructor_handling", &self.constructor_handling)
            .field("formatting", &self.formatting)
            .field("converters", &self.converter_names())
            .finish()
    }
}

/// The encode/decode pair.
///
/// `decode` is always `encode` plus the decode-only converters, so anything the
/// encode side writes can be read back.
#[derive(Debug, Clone)]
pub struct CodecConfiguration {
    pub encode: Arc<SerializerSettings>,
    pub decode: Arc<SerializerSettings>,
}

impl CodecConfiguration {
    pub fn new(options: &SerializerOptions) -> Self {
        let encode = SerializerSettings::base(options);
        let decode = encode.with_additional_converters(decode_only_converters());
        Self {
            encode: Arc::new(encode),
            decode: Arc::new(decode),
        }
    }

    /// The process-wide configuration built from default options
    pub fn global() -> &'static CodecConfiguration {
        static INSTANCE: Lazy<CodecConfiguration> =
            Lazy::new(|| CodecConfiguration::new(&SerializerOptions::default()));
        &INSTANCE
    }
}

fn decode_only_converters() -> Vec<Arc<dyn JsonConverter>> {
    vec![
        Arc::new(ListJsonConverter::default()) as Arc<dyn JsonConverter>,
        Arc::new(InterfaceProxyConverter::default()),
    ]
}

#[cfg(test)]
#[path = "settings/settings_tests.rs"]
mod settings_tests;
