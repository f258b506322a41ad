//! Channel subscription task.

use std::sync::Arc;

use push_core::{BatchResponse, ChannelRequest, UserId};

use crate::dispatcher::Shared;
use crate::traits::{DeviceStore, ProviderClient};

/// Apply one subscription request against the provider.
///
/// A fixed channel fans out to every device of the user in a single bulk
/// call; a fixed device walks the user's channels one call at a time.
pub(crate) async fn process_subscription<C, S, P>(shared: Arc<Shared<C, S, P>>, req: ChannelRequest)
where
    C: ProviderClient,
    S: DeviceStore,
{
    match (req.channel.as_deref(), req.device_id.as_deref()) {
        (Some(channel), None) => {
            let mut devices = shared.store.devices_for_user(&req.uid).await;
            if devices.is_empty() {
                // Nothing registered for this user.
                return;
            }
            if devices.len() > shared.sub_batch_limit {
                // An account with this many devices is anomalous, not fatal.
                devices.truncate(shared.sub_batch_limit);
                tracing::warn!(
                    uid = %req.uid,
                    limit = shared.sub_batch_limit,
                    "user exceeds device limit for channel operations, truncating"
                );
            }

            match topic_call(&shared.client, req.unsub, &devices, channel).await {
                Err(err) => {
                    tracing::warn!(error = %err, unsub = req.unsub, channel = %channel, "channel operation failed");
                }
                Ok(resp) => log_partial_failures(&resp, &req.uid, &devices),
            }
        }
        (None, Some(device)) => {
            let channels = shared.store.channels_for_user(&req.uid).await;
            if channels.is_empty() {
                return;
            }

            let devices = vec![device.to_string()];
            for channel in &channels {
                match topic_call(&shared.client, req.unsub, &devices, channel).await {
                    Err(err) => {
                        // Outright failure: skip the remaining channels.
                        tracing::warn!(error = %err, unsub = req.unsub, channel = %channel, "channel operation failed");
                        break;
                    }
                    Ok(resp) => log_partial_failures(&resp, &req.uid, &devices),
                }
            }
        }
        _ => {
            tracing::error!(
                uid = %req.uid,
                "subscription request must fix exactly one of channel or device"
            );
        }
    }
}

async fn topic_call<C: ProviderClient>(
    client: &C,
    unsub: bool,
    devices: &[String],
    channel: &str,
) -> Result<BatchResponse, C::Error> {
    if unsub {
        client.unsubscribe_from_topic(devices, channel).await
    } else {
        client.subscribe_to_topic(devices, channel).await
    }
}

/// Log every failed index of a bulk call.
///
/// The provider reports only a reason string per index, so there is no
/// action to take beyond logging.
fn log_partial_failures(resp: &BatchResponse, uid: &UserId, devices: &[String]) {
    if resp.failure_count == 0 {
        return;
    }

    for failure in &resp.errors {
        match devices.get(failure.index) {
            Some(device) => {
                tracing::warn!(reason = %failure.reason, uid = %uid, device = %device, "channel operation partially failed");
            }
            None => {
                tracing::warn!(reason = %failure.reason, uid = %uid, index = failure.index, "channel operation partially failed");
            }
        }
    }
}
