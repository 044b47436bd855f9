//! Message envelope and host information

use crate::context::SendContext;
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;
use uuid::Uuid;

/// The JSON document written for every message.
///
/// Absent members are omitted on encode and take their default on decode.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct MessageEnvelope {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message_id: Option<Uuid>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub request_id: Option<Uuid>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub correlation_id: Option<Uuid>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub conversation_id: Option<Uuid>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub initiator_id: Option<Uuid>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub source_address: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub destination_address: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub response_address: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub fault_address: Option<String>,

    /// Declared type names, most specific first
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub message_type: Vec<String>,

    /// Message body, already converted to its wire form
    #[serde(skip_serializing_if = "Value::is_null")]
    pub message: Value,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub content_type: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub expiration_time: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub sent_time: Option<String>,

    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub headers: BTreeMap<String, Value>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub host: Option<HostInfo>,
}

impl MessageEnvelope {
    /// Build the envelope for `context` around an already converted body
    pub fn from_context<T>(
        context: &SendContext<T>,
        message: Value,
        message_type: Vec<String>,
    ) -> Self {
        Self {
            message_id: context.message_id,
            request_id: context.request_id,
            correlation_id: context.correlation_id,
            conversation_id: context.conversation_id,
            initiator_id: context.initiator_id,
            source_address: context.source_address.clone(),
            destination_address: context.destination_address.clone(),
            response_address: context.response_address.clone(),
            fault_address: context.fault_address.clone(),
            message_type,
            message,
            content_type: context.content_type().map(|c| c.media_type().to_string()),
            expiration_time: context.expiration_time.clone(),
            sent_time: context.sent_time.clone(),
            headers: context.headers.clone(),
            host: Some(HostInfo::current().clone()),
        }
    }

    /// Whether `name` is among the declared type names
    pub fn declares(&self, name: &str) -> bool {
        self.message_type.iter().any(|t| t == name)
    }
}

/// Describes the process that produced an envelope
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct HostInfo {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub machine_name: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub process_name: Option<String>,

    pub process_id: u32,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub framework_version: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub operating_system_version: Option<String>,
}

static CURRENT_HOST: Lazy<HostInfo> = Lazy::new(HostInfo::detect);

impl HostInfo {
    /// Host information for this process, gathered once
    pub fn current() -> &'static HostInfo {
        &CURRENT_HOST
    }

    fn detect() -> Self {
        let machine_name = std::env::var("HOSTNAME")
            .or_else(|_| std::env::var("COMPUTERNAME"))
            .ok()
            .filter(|name| !name.is_empty());
        let process_name = std::env::current_exe().ok().and_then(|path| {
            path.file_stem()
                .map(|stem| stem.to_string_lossy().into_owned())
        });

        Self {
            machine_name,
            process_name,
            process_id: std::process::id(),
            framework_version: Some(format!("msgwire {}", env!("CARGO_PKG_VERSION"))),
            operating_system_version: Some(format!(
                "{}-{}",
                std::env::consts::OS,
                std::env::consts::ARCH
            )),
        }
    }
}
