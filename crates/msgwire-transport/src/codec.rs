//! Envelope serializer traits and the JSON implementation

use crate::context::SendContext;
use crate::envelope::MessageEnvelope;
use msgwire_convert::{CodecConfiguration, JsonSerializer};
use msgwire_core::{
    BoxError, ContentType, DESERIALIZE_FAILED, Describe, MessageTypes, SERIALIZE_FAILED,
    SerializationError, SerializationResult, SerializerOptions,
};
use serde::{Serialize, de::DeserializeOwned};
use std::io::{self, BufWriter, Write};

const UTF8_BOM: &[u8] = &[0xEF, 0xBB, 0xBF];

/// Writes messages in their envelope to a caller-owned channel
pub trait MessageSerializer: Send + Sync {
    /// Content type stamped on every context this serializer writes
    fn content_type(&self) -> &ContentType;

    /// Write `context`'s message, tagged with the names from [`MessageTypes`]
    fn serialize<T, W>(
        &self,
        writer: &mut W,
        context: &mut SendContext<T>,
    ) -> SerializationResult<()>
    where
        T: Serialize + Describe + MessageTypes,
        W: Write;
}

/// Reads envelopes and the messages they carry
pub trait MessageDeserializer: Send + Sync {
    /// Whether bodies of `content_type` are understood
    fn accepts(&self, content_type: &ContentType) -> bool;

    /// Parse an envelope, leaving the body in its wire form
    fn deserialize(&self, body: &[u8]) -> SerializationResult<MessageEnvelope>;

    /// Materialize the message carried by `envelope`
    fn deserialize_message<T>(&self, envelope: &MessageEnvelope) -> SerializationResult<T>
    where
        T: DeserializeOwned + Describe;
}

/// JSON envelope codec.
///
/// Encodes with the encode configuration and decodes with the decode
/// configuration. Every failure reaches the caller as one
/// [`SerializationError`] carrying the original cause.
#[derive(Debug, Clone)]
pub struct JsonMessageSerializer {
    encoder: JsonSerializer,
    decoder: JsonSerializer,
    write_buffer_size: usize,
    content_type: ContentType,
}

impl JsonMessageSerializer {
    /// Serializer over the process-wide configuration
    pub fn new() -> Self {
        Self {
            encoder: JsonSerializer::encoder(),
            decoder: JsonSerializer::decoder(),
            write_buffer_size: SerializerOptions::default().write_buffer_size,
            content_type: ContentType::json(),
        }
    }

    /// Serializer over a configuration built from `options`
    pub fn with_options(options: &SerializerOptions) -> Self {
        Self::with_configuration(&CodecConfiguration::new(options))
            .with_write_buffer_size(options.write_buffer_size)
    }

    pub fn with_configuration(configuration: &CodecConfiguration) -> Self {
        Self {
            encoder: JsonSerializer::new(configuration.encode.clone()),
            decoder: JsonSerializer::new(configuration.decode.clone()),
            ..Self::new()
        }
    }

    pub fn with_write_buffer_size(mut self, size: usize) -> Self {
        self.write_buffer_size = size;
        self
    }

    pub fn encoder(&self) -> &JsonSerializer {
        &self.encoder
    }

    pub fn decoder(&self) -> &JsonSerializer {
        &self.decoder
    }

    /// Write `context`'s message tagged with explicit type names
    pub fn serialize_with_names<T, W>(
        &self,
        writer: &mut W,
        context: &mut SendContext<T>,
        message_types: &[String],
    ) -> SerializationResult<()>
    where
        T: Serialize + Describe,
        W: Write,
    {
        // Observable by the transport even if the write below fails.
        context.set_content_type(self.content_type.clone());

        match self.write_envelope(writer, context, message_types) {
            Ok(written) => {
                tracing::debug!(
                    message_types = ?message_types,
                    bytes = written,
                    "serialized message envelope"
                );
                Ok(())
            }
            Err(err) => {
                let err = SerializationError::wrap(SERIALIZE_FAILED, err);
                tracing::warn!(error = %err, cause = ?err.cause(), "message serialization failed");
                Err(err)
            }
        }
    }

    /// Encode `context`'s message into a fresh buffer
    pub fn to_bytes<T>(&self, context: &mut SendContext<T>) -> SerializationResult<Vec<u8>>
    where
        T: Serialize + Describe + MessageTypes,
    {
        let mut bytes = Vec::new();
        self.serialize(&mut bytes, context)?;
        Ok(bytes)
    }

    fn write_envelope<T, W>(
        &self,
        writer: &mut W,
        context: &SendContext<T>,
        message_types: &[String],
    ) -> Result<usize, BoxError>
    where
        T: Serialize + Describe,
        W: Write,
    {
        if message_types.is_empty() || message_types.iter().any(String::is_empty) {
            return Err(SerializationError::Invalid("message type names must not be empty").into());
        }

        let body = self.encoder.to_value(context.message())?;
        // The envelope omits a null body, which no reader would accept.
        if body.is_null() {
            return Err(SerializationError::Invalid("message body must not be null").into());
        }
        let envelope = MessageEnvelope::from_context(context, body, message_types.to_vec());

        let mut counted = CountingWriter::new(BufWriter::with_capacity(
            self.write_buffer_size,
            &mut *writer,
        ));
        let result = self
            .encoder
            .write_to(&mut counted, &envelope)
            .map_err(BoxError::from)
            .and_then(|()| counted.flush().map_err(BoxError::from));
        match result {
            Ok(()) => Ok(counted.written),
            Err(err) => {
                // Dropping the BufWriter would write the pending bytes again.
                let (_, _pending) = counted.into_inner().into_parts();
                Err(err)
            }
        }
    }

    fn read_envelope(&self, body: &[u8]) -> Result<MessageEnvelope, BoxError> {
        let body = body.strip_prefix(UTF8_BOM).unwrap_or(body);
        let envelope: MessageEnvelope = serde_json::from_slice(body)?;
        if envelope.message.is_null() {
            return Err(SerializationError::Invalid("envelope carries no message body").into());
        }
        Ok(envelope)
    }
}

impl Default for JsonMessageSerializer {
    fn default() -> Self {
        Self::new()
    }
}

impl MessageSerializer for JsonMessageSerializer {
    fn content_type(&self) -> &ContentType {
        &self.content_type
    }

    fn serialize<T, W>(
        &self,
        writer: &mut W,
        context: &mut SendContext<T>,
    ) -> SerializationResult<()>
    where
        T: Serialize + Describe + MessageTypes,
        W: Write,
    {
        self.serialize_with_names(writer, context, &T::message_type_names())
    }
}

impl MessageDeserializer for JsonMessageSerializer {
    fn accepts(&self, content_type: &ContentType) -> bool {
        content_type == &self.content_type
    }

    fn deserialize(&self, body: &[u8]) -> SerializationResult<MessageEnvelope> {
        match self.read_envelope(body) {
            Ok(envelope) => {
                tracing::debug!(
                    message_types = ?envelope.message_type,
                    bytes = body.len(),
                    "deserialized message envelope"
                );
                Ok(envelope)
            }
            Err(err) => {
                let err = SerializationError::wrap(DESERIALIZE_FAILED, err);
                tracing::warn!(error = %err, cause = ?err.cause(), "envelope deserialization failed");
                Err(err)
            }
        }
    }

    fn deserialize_message<T>(&self, envelope: &MessageEnvelope) -> SerializationResult<T>
    where
        T: DeserializeOwned + Describe,
    {
        self.decoder
            .from_value(envelope.message.clone())
            .map_err(|err| {
                let err = SerializationError::wrap(DESERIALIZE_FAILED, err);
                tracing::warn!(error = %err, cause = ?err.cause(), "message deserialization failed");
                err
            })
    }
}

/// Counts bytes handed to the inner writer
struct CountingWriter<W> {
    inner: W,
    written: usize,
}

impl<W: Write> CountingWriter<W> {
    fn new(inner: W) -> Self {
        Self { inner, written: 0 }
    }

    fn into_inner(self) -> W {
        self.inner
    }
}

impl<W: Write> Write for CountingWriter<W> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        let n = self.inner.write(buf)?;
        self.written += n;
        Ok(n)
    }

    fn flush(&mut self) -> io::Result<()> {
        self.inner.flush()
    }
}
