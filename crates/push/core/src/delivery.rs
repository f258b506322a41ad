//! Delivery requests.

use std::collections::BTreeMap;

use crate::UserId;

/// One notification payload plus the devices it targets.
///
/// Immutable once submitted. The preparation collaborator expands it into
/// per-device [`OutboundMessage`](crate::OutboundMessage)s.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct Delivery {
    /// Notification content shared by every target.
    pub payload: Payload,
    /// Devices to notify, in send order.
    pub targets: Vec<Target>,
}

/// Human-visible notification content.
#[derive(Debug, Clone, Default, serde::Serialize, serde::Deserialize)]
pub struct Payload {
    pub title: String,
    pub body: String,
    /// Opaque key-value data forwarded to the client application.
    #[serde(default)]
    pub data: BTreeMap<String, String>,
}

/// A (user, device token) pair.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Target {
    /// Account that owns the device.
    pub uid: UserId,
    /// Provider device token.
    pub token: String,
}
