//! Send context carried alongside an outgoing message

use msgwire_core::ContentType;
use serde_json::Value;
use std::collections::BTreeMap;
use uuid::Uuid;

/// An outgoing message plus the metadata copied into its envelope.
///
/// The serializer stamps its content type on the context before writing, so
/// the transport can read it back even when the write itself fails.
#[derive(Debug, Clone)]
pub struct SendContext<T> {
    message: T,

    pub message_id: Option<Uuid>,
    pub request_id: Option<Uuid>,
    pub correlation_id: Option<Uuid>,
    pub conversation_id: Option<Uuid>,
    pub initiator_id: Option<Uuid>,

    pub source_address: Option<String>,
    pub destination_address: Option<String>,
    pub response_address: Option<String>,
    pub fault_address: Option<String>,

    /// RFC 3339 text
    pub expiration_time: Option<String>,
    /// RFC 3339 text
    pub sent_time: Option<String>,

    pub headers: BTreeMap<String, Value>,

    content_type: Option<ContentType>,
}

impl<T> SendContext<T> {
    /// Create a context with a fresh message id
    pub fn new(message: T) -> Self {
        Self {
            message,
            message_id: Some(Uuid::new_v4()),
            request_id: None,
            correlation_id: None,
            conversation_id: None,
            initiator_id: None,
            source_address: None,
            destination_address: None,
            response_address: None,
            fault_address: None,
            expiration_time: None,
            sent_time: None,
            headers: BTreeMap::new(),
            content_type: None,
        }
    }

    pub fn message(&self) -> &T {
        &self.message
    }

    pub fn into_message(self) -> T {
        self.message
    }

    pub fn content_type(&self) -> Option<&ContentType> {
        self.content_type.as_ref()
    }

    pub fn set_content_type(&mut self, content_type: ContentType) {
        self.content_type = Some(content_type);
    }

    pub fn with_message_id(mut self, id: Uuid) -> Self {
        self.message_id = Some(id);
        self
    }

    pub fn with_request_id(mut self, id: Uuid) -> Self {
        self.request_id = Some(id);
        self
    }

    pub fn with_correlation_id(mut self, id: Uuid) -> Self {
        self.correlation_id = Some(id);
        self
    }

    pub fn with_conversation_id(mut self, id: Uuid) -> Self {
        self.conversation_id = Some(id);
        self
    }

    pub fn with_initiator_id(mut self, id: Uuid) -> Self {
        self.initiator_id = Some(id);
        self
    }

    pub fn with_source_address(mut self, address: impl Into<String>) -> Self {
        self.source_address = Some(address.into());
        self
    }

    pub fn with_destination_address(mut self, address: impl Into<String>) -> Self {
        self.destination_address = Some(address.into());
        self
    }

    pub fn with_response_address(mut self, address: impl Into<String>) -> Self {
        self.response_address = Some(address.into());
        self
    }

    pub fn with_fault_address(mut self, address: impl Into<String>) -> Self {
        self.fault_address = Some(address.into());
        self
    }

    pub fn with_expiration_time(mut self, time: impl Into<String>) -> Self {
        self.expiration_time = Some(time.into());
        self
    }

    pub fn with_sent_time(mut self, time: impl Into<String>) -> Self {
        self.sent_time = Some(time.into());
        self
    }

    /// Set a header, replacing any previous value
    pub fn with_header(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.headers.insert(key.into(), value.into());
        self
    }
}
