//! Dispatch control loop.

use std::sync::Arc;

use push_core::{ChannelRequest, Delivery, DeliveryOptions};
use tokio::sync::mpsc;

use crate::config::PushConfig;
use crate::traits::{DeviceStore, PrepareNotifications, ProviderClient};
use crate::{sender, subscription};

/// Collaborators and settings shared by every spawned task.
pub(crate) struct Shared<C, S, P> {
    pub(crate) client: C,
    pub(crate) store: S,
    pub(crate) preparer: P,
    pub(crate) dry_run: bool,
    pub(crate) options: DeliveryOptions,
    pub(crate) sub_batch_limit: usize,
}

/// Owned handle to a running dispatch loop.
///
/// Created on init, destroyed on shutdown; there is no global instance.
/// Cloning the handle shares the same loop.
#[derive(Clone)]
pub struct PushDispatcher {
    deliveries: mpsc::Sender<Delivery>,
    channel_reqs: mpsc::Sender<ChannelRequest>,
    stop: mpsc::Sender<()>,
}

impl PushDispatcher {
    /// Start the dispatch loop.
    ///
    /// Returns `None` when the config is disabled. The provider client is
    /// constructed by the host beforehand (from
    /// [`PushConfig::credentials`]), so every fallible initialization step
    /// has already happened by the time this runs.
    ///
    /// Must be called from within a tokio runtime.
    pub fn start<C, S, P>(config: &PushConfig, client: C, store: S, preparer: P) -> Option<Self>
    where
        C: ProviderClient + 'static,
        S: DeviceStore + 'static,
        P: PrepareNotifications + 'static,
    {
        if !config.enabled {
            return None;
        }

        let capacity = config.queue_capacity.max(1);
        let (delivery_tx, mut delivery_rx) = mpsc::channel(capacity);
        let (channel_tx, mut channel_rx) = mpsc::channel(capacity);
        let (stop_tx, mut stop_rx) = mpsc::channel(1);

        let shared = Arc::new(Shared {
            client,
            store,
            preparer,
            dry_run: config.dry_run,
            options: config.delivery_options(),
            sub_batch_limit: config.sub_batch_size,
        });

        tokio::spawn(async move {
            // Every item gets its own task: a slow or stuck provider call
            // never blocks ingestion of subsequent items.
            loop {
                tokio::select! {
                    Some(delivery) = delivery_rx.recv() => {
                        tokio::spawn(sender::send_delivery(Arc::clone(&shared), delivery));
                    }
                    Some(req) = channel_rx.recv() => {
                        tokio::spawn(subscription::process_subscription(Arc::clone(&shared), req));
                    }
                    _ = stop_rx.recv() => break,
                    else => break,
                }
            }
            tracing::debug!("push dispatch loop stopped");
        });

        Some(Self {
            deliveries: delivery_tx,
            channel_reqs: channel_tx,
            stop: stop_tx,
        })
    }

    /// Enqueue a delivery without blocking.
    ///
    /// Dropped silently when the queue is full; submission never blocks
    /// the caller.
    pub fn submit_delivery(&self, delivery: Delivery) {
        let _ = self.deliveries.try_send(delivery);
    }

    /// Enqueue a subscription request without blocking. Drops on full, like
    /// [`submit_delivery`](Self::submit_delivery).
    pub fn submit_channel(&self, req: ChannelRequest) {
        let _ = self.channel_reqs.try_send(req);
    }

    /// Whether the dispatch loop is accepting work.
    pub fn is_ready(&self) -> bool {
        !self.deliveries.is_closed()
    }

    /// Signal the loop to exit. Spawned tasks are not tracked, awaited, or
    /// cancelled: shutdown stops intake of new work, it does not drain.
    pub fn stop(&self) {
        let _ = self.stop.try_send(());
    }
}
