//! Scripted collaborators for dispatch tests.

use std::collections::VecDeque;
use std::ops::Deref;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

use push_core::{
    BatchResponse, Delivery, DeliveryOptions, ErrorClass, OutboundMessage, Payload, PreparedBatch,
    ProviderError, Target, UserId,
};

use crate::dispatcher::Shared;
use crate::traits::{DeviceStore, PrepareNotifications, ProviderClient};

/// Provider error with a fixed classification.
#[derive(Debug)]
pub(crate) struct FakeError(pub ErrorClass);

impl std::fmt::Display for FakeError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "scripted {} error", self.0)
    }
}

impl std::error::Error for FakeError {}

impl ProviderError for FakeError {
    fn classify(&self) -> ErrorClass {
        self.0
    }
}

/// One recorded bulk subscribe/unsubscribe call.
pub(crate) struct TopicCall {
    pub tokens: Vec<String>,
    pub channel: String,
    pub unsub: bool,
}

#[derive(Default)]
pub(crate) struct ClientState {
    /// Outcomes consumed by successive send calls; exhausted means success.
    pub send_script: Mutex<VecDeque<Result<(), FakeError>>>,
    /// Outcomes consumed by successive topic calls; exhausted means success.
    pub topic_script: Mutex<VecDeque<Result<BatchResponse, FakeError>>>,
    /// (token, dry_run) per send, in call order.
    pub sent: Mutex<Vec<(String, bool)>>,
    pub topic_calls: Mutex<Vec<TopicCall>>,
}

/// Provider client double: records calls, replays scripted outcomes.
#[derive(Clone, Default)]
pub(crate) struct ScriptedClient(Arc<ClientState>);

impl Deref for ScriptedClient {
    type Target = ClientState;

    fn deref(&self) -> &ClientState {
        &self.0
    }
}

impl ProviderClient for ScriptedClient {
    type Error = FakeError;

    async fn send(&self, message: &OutboundMessage) -> Result<(), FakeError> {
        self.sent.lock().unwrap().push((message.token.clone(), false));
        self.send_script.lock().unwrap().pop_front().unwrap_or(Ok(()))
    }

    async fn send_dry_run(&self, message: &OutboundMessage) -> Result<(), FakeError> {
        self.sent.lock().unwrap().push((message.token.clone(), true));
        self.send_script.lock().unwrap().pop_front().unwrap_or(Ok(()))
    }

    async fn subscribe_to_topic(
        &self,
        tokens: &[String],
        channel: &str,
    ) -> Result<BatchResponse, FakeError> {
        self.record_topic_call(tokens, channel, false)
    }

    async fn unsubscribe_from_topic(
        &self,
        tokens: &[String],
        channel: &str,
    ) -> Result<BatchResponse, FakeError> {
        self.record_topic_call(tokens, channel, true)
    }
}

impl ScriptedClient {
    fn record_topic_call(
        &self,
        tokens: &[String],
        channel: &str,
        unsub: bool,
    ) -> Result<BatchResponse, FakeError> {
        self.topic_calls.lock().unwrap().push(TopicCall {
            tokens: tokens.to_vec(),
            channel: channel.to_string(),
            unsub,
        });
        self.topic_script
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Ok(BatchResponse::success(tokens.len())))
    }
}

#[derive(Default)]
pub(crate) struct StoreState {
    /// Returned by `devices_for_user`.
    pub devices: Mutex<Vec<String>>,
    /// Returned by `channels_for_user`.
    pub channels: Mutex<Vec<String>>,
    /// Every (uid, token) delete issued, in call order.
    pub deleted: Mutex<Vec<(UserId, String)>>,
    pub fail_deletes: AtomicBool,
}

/// Device store double.
#[derive(Clone, Default)]
pub(crate) struct ScriptedStore(Arc<StoreState>);

impl Deref for ScriptedStore {
    type Target = StoreState;

    fn deref(&self) -> &StoreState {
        &self.0
    }
}

impl DeviceStore for ScriptedStore {
    async fn delete(&self, uid: &UserId, token: &str) -> color_eyre::eyre::Result<()> {
        self.deleted
            .lock()
            .unwrap()
            .push((uid.clone(), token.to_string()));
        if self.fail_deletes.load(Ordering::Relaxed) {
            color_eyre::eyre::bail!("device store unavailable");
        }
        Ok(())
    }

    async fn devices_for_user(&self, _uid: &UserId) -> Vec<String> {
        self.devices.lock().unwrap().clone()
    }

    async fn channels_for_user(&self, _uid: &UserId) -> Vec<String> {
        self.channels.lock().unwrap().clone()
    }
}

/// Preparer that emits one message per target, in target order.
pub(crate) struct FanOut;

impl PrepareNotifications for FanOut {
    fn prepare(&self, delivery: &Delivery, options: &DeliveryOptions) -> PreparedBatch {
        PreparedBatch {
            messages: delivery
                .targets
                .iter()
                .map(|t| OutboundMessage {
                    token: t.token.clone(),
                    payload: delivery.payload.clone(),
                    options: options.clone(),
                })
                .collect(),
            uids: delivery.targets.iter().map(|t| t.uid.clone()).collect(),
        }
    }
}

/// Delivery with `n` targets: usr0/tok0, usr1/tok1, ...
pub(crate) fn delivery(n: usize) -> Delivery {
    Delivery {
        payload: Payload {
            title: "title".into(),
            body: "body".into(),
            ..Default::default()
        },
        targets: (0..n)
            .map(|i| Target {
                uid: UserId::from(format!("usr{i}")),
                token: format!("tok{i}"),
            })
            .collect(),
    }
}

/// Shared task context over scripted collaborators, default settings.
pub(crate) fn shared_with(
    client: ScriptedClient,
    store: ScriptedStore,
) -> Arc<Shared<ScriptedClient, ScriptedStore, FanOut>> {
    Arc::new(Shared {
        client,
        store,
        preparer: FanOut,
        dry_run: false,
        options: DeliveryOptions::default(),
        sub_batch_limit: 1000,
    })
}
