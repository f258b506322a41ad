//! Provider-ready messages.

use std::collections::BTreeMap;

use crate::{Payload, UserId};

/// Per-platform delivery options, passed through to message preparation
/// without interpretation.
pub type PlatformOptions = BTreeMap<String, serde_json::Value>;

/// Options applied to every message prepared from a delivery.
#[derive(Debug, Clone, Default, serde::Serialize, serde::Deserialize)]
pub struct DeliveryOptions {
    /// Message lifetime in seconds while the device is unreachable.
    #[serde(default)]
    pub time_to_live: Option<u32>,
    #[serde(default)]
    pub android: Option<PlatformOptions>,
    #[serde(default)]
    pub apns: Option<PlatformOptions>,
    #[serde(default)]
    pub webpush: Option<PlatformOptions>,
}

/// One notification addressed to a single device token.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct OutboundMessage {
    pub token: String,
    pub payload: Payload,
    pub options: DeliveryOptions,
}

/// Messages derived from one delivery.
///
/// `uids[i]` owns `messages[i]`; the two lists are always the same length,
/// so send failures can be attributed to the correct account.
#[derive(Debug, Clone, Default)]
pub struct PreparedBatch {
    pub messages: Vec<OutboundMessage>,
    pub uids: Vec<UserId>,
}
