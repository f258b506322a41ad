//! Collaborator traits.

use push_core::{BatchResponse, Delivery, DeliveryOptions, OutboundMessage, PreparedBatch, ProviderError, UserId};

/// Client for the cloud-messaging provider.
#[trait_variant::make(Send)]
pub trait ProviderClient: Send + Sync {
    /// Error type returned by provider calls.
    type Error: ProviderError;

    /// Deliver a single message.
    async fn send(&self, message: &OutboundMessage) -> Result<(), Self::Error>;

    /// Validate a single message without delivering it.
    async fn send_dry_run(&self, message: &OutboundMessage) -> Result<(), Self::Error>;

    /// Subscribe device tokens to a channel.
    async fn subscribe_to_topic(
        &self,
        tokens: &[String],
        channel: &str,
    ) -> Result<BatchResponse, Self::Error>;

    /// Unsubscribe device tokens from a channel.
    async fn unsubscribe_from_topic(
        &self,
        tokens: &[String],
        channel: &str,
    ) -> Result<BatchResponse, Self::Error>;
}

/// Device token store owned by the host.
///
/// Safe for concurrent mutation from multiple dispatch tasks.
#[trait_variant::make(Send)]
pub trait DeviceStore: Send + Sync {
    /// Remove a device token for a user. Deleting an absent token is not an
    /// error.
    async fn delete(&self, uid: &UserId, token: &str) -> color_eyre::eyre::Result<()>;

    /// All device tokens registered for a user.
    async fn devices_for_user(&self, uid: &UserId) -> Vec<String>;

    /// All channels a user is subscribed to.
    async fn channels_for_user(&self, uid: &UserId) -> Vec<String>;
}

/// Builds provider-ready messages from a delivery.
pub trait PrepareNotifications: Send + Sync {
    /// Expand a delivery into per-device messages and their owning users,
    /// index-aligned.
    fn prepare(&self, delivery: &Delivery, options: &DeliveryOptions) -> PreparedBatch;
}
