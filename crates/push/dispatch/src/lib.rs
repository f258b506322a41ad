//! Push Dispatch
//!
//! Asynchronous dispatch engine for the push subsystem: accepts deliveries
//! and channel subscription requests on bounded queues and drives them
//! against a cloud-messaging provider, classifying the provider's failure
//! modes. Best-effort and fire-and-forget: runtime failures are observable
//! only through logs and device-store side effects.

mod config;
mod dispatcher;
mod sender;
mod subscription;
mod traits;

#[cfg(test)]
mod testutil;

pub use config::*;
pub use dispatcher::*;
pub use traits::*;
