//! Per-delivery send task.

use std::sync::Arc;

use push_core::{Delivery, ErrorClass, ProviderError as _};

use crate::dispatcher::Shared;
use crate::traits::{DeviceStore, PrepareNotifications, ProviderClient};

/// Send every message of one delivery, sequentially and in order.
///
/// Transient, configuration, and unrecognized errors abort the rest of the
/// batch. An invalid token only evicts that device and moves on.
pub(crate) async fn send_delivery<C, S, P>(shared: Arc<Shared<C, S, P>>, delivery: Delivery)
where
    C: ProviderClient,
    S: DeviceStore,
    P: PrepareNotifications,
{
    let batch = shared.preparer.prepare(&delivery, &shared.options);
    tracing::debug!(messages = batch.messages.len(), "sending delivery batch");

    for (message, uid) in batch.messages.iter().zip(batch.uids.iter()) {
        let result = if shared.dry_run {
            shared.client.send_dry_run(message).await
        } else {
            shared.client.send(message).await
        };

        let Err(err) = result else { continue };

        match err.classify() {
            ErrorClass::Transient => {
                tracing::warn!(error = %err, "transient provider failure, dropping rest of batch");
                return;
            }
            ErrorClass::Config => {
                tracing::warn!(error = %err, "provider configuration error, dropping rest of batch");
                return;
            }
            ErrorClass::InvalidToken => {
                // Token is no longer valid: evict it and keep sending.
                tracing::warn!(error = %err, uid = %uid, "invalid device token");
                if let Err(err) = shared.store.delete(uid, &message.token).await {
                    tracing::warn!(error = %err, uid = %uid, "failed to delete invalid token");
                }
            }
            ErrorClass::Unknown => {
                tracing::warn!(error = %err, "unrecognized provider error, dropping rest of batch");
                return;
            }
        }
    }
}
