//! Channel subscription requests.

use crate::UserId;

/// Request to subscribe or unsubscribe a user's devices to a topic-style
/// channel.
///
/// A well-formed request fixes exactly one of `channel` and `device_id`;
/// the other dimension is resolved to a list at processing time. Requests
/// that fix both dimensions, or neither, are rejected without any provider
/// call.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct ChannelRequest {
    /// Account the request applies to.
    pub uid: UserId,
    /// Remove the subscription instead of adding it.
    #[serde(default)]
    pub unsub: bool,
    /// Fixed channel, applied to every device of the user.
    #[serde(default)]
    pub channel: Option<String>,
    /// Fixed device, applied to every channel of the user.
    #[serde(default)]
    pub device_id: Option<String>,
}

impl ChannelRequest {
    /// Subscribe or unsubscribe all of the user's devices to one channel.
    pub fn for_channel(uid: impl Into<UserId>, channel: impl Into<String>, unsub: bool) -> Self {
        Self {
            uid: uid.into(),
            unsub,
            channel: Some(channel.into()),
            device_id: None,
        }
    }

    /// Subscribe or unsubscribe one device to all of the user's channels.
    pub fn for_device(uid: impl Into<UserId>, device_id: impl Into<String>, unsub: bool) -> Self {
        Self {
            uid: uid.into(),
            unsub,
            channel: None,
            device_id: Some(device_id.into()),
        }
    }
}
