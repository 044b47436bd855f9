//! msgwire-transport - JSON envelope codec
//!
//! This crate provides:
//! - [`MessageSerializer`] and [`MessageDeserializer`] for envelope encoding/decoding
//! - [`JsonMessageSerializer`], the JSON implementation
//! - [`MessageEnvelope`] and [`HostInfo`] for message framing
//! - [`SendContext`] carrying an outgoing message and its metadata

mod codec;
mod context;
mod envelope;

pub use codec::{JsonMessageSerializer, MessageDeserializer, MessageSerializer};
pub use context::SendContext;
pub use envelope::{HostInfo, MessageEnvelope};

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::{
        HostInfo, JsonMessageSerializer, MessageDeserializer, MessageEnvelope, MessageSerializer,
        SendContext,
    };
}
