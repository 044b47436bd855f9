//! Content types and declared message type names

use serde::{Deserialize, Serialize};
use std::fmt;

/// Media type identifying the msgwire JSON envelope format
pub const JSON_CONTENT_TYPE: &str = "application/vnd.msgwire+json";

/// A content-type marker attached to a send context
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ContentType(String);

impl ContentType {
    pub fn new(media_type: impl Into<String>) -> Self {
        Self(media_type.into())
    }

    /// The envelope JSON content type
    pub fn json() -> Self {
        Self::new(JSON_CONTENT_TYPE)
    }

    pub fn media_type(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ContentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Declared type names of a message, most specific first.
///
/// Receivers route on these names; the codec only copies them into the envelope.
pub trait MessageTypes {
    fn message_type_names() -> Vec<String>;
}

/// Build a `urn:message:` type name from a namespace and a type name
pub fn message_urn(namespace: &str, name: &str) -> String {
    if namespace.is_empty() {
        format!("urn:message:{}", name)
    } else {
        format!("urn:message:{}:{}", namespace, name)
    }
}
