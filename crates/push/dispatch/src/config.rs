//! Push subsystem configuration.

use std::path::{Path, PathBuf};

use push_core::{DeliveryOptions, PlatformOptions};
use serde::Deserialize;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    ReadError(#[from] std::io::Error),
    #[error("failed to parse config: {0}")]
    ParseError(#[from] toml::de::Error),
    #[error("config file not found at {0}")]
    NotFound(PathBuf),
    #[error("missing credentials")]
    MissingCredentials,
}

/// Configuration surface of the push subsystem.
#[derive(Debug, Clone, Deserialize)]
pub struct PushConfig {
    /// Master gate. A disabled config never starts a dispatcher.
    #[serde(default)]
    pub enabled: bool,
    /// Route sends through the provider's non-delivering validation call.
    #[serde(default)]
    pub dry_run: bool,
    /// Inline credential material, opaque to the dispatch core.
    #[serde(default)]
    pub credentials: Option<String>,
    /// File to read credentials from when no inline value is set.
    #[serde(default)]
    pub credentials_file: Option<PathBuf>,
    /// Message lifetime in seconds, passed through to preparation.
    #[serde(default)]
    pub time_to_live: Option<u32>,
    #[serde(default)]
    pub android: Option<PlatformOptions>,
    #[serde(default)]
    pub apns: Option<PlatformOptions>,
    #[serde(default)]
    pub webpush: Option<PlatformOptions>,
    /// Capacity of each ingress queue.
    #[serde(default = "default_queue_capacity")]
    pub queue_capacity: usize,
    /// Messages per bulk send. Provider constant; sends here go one at a
    /// time, so this is informational for the preparation collaborator.
    #[serde(default = "default_send_batch_size")]
    pub send_batch_size: usize,
    /// Devices per bulk subscribe/unsubscribe call. Provider constant.
    #[serde(default = "default_sub_batch_size")]
    pub sub_batch_size: usize,
}

fn default_queue_capacity() -> usize {
    1024
}

fn default_send_batch_size() -> usize {
    100
}

fn default_sub_batch_size() -> usize {
    1000
}

impl PushConfig {
    /// Load configuration from a TOML file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            return Err(ConfigError::NotFound(path.to_path_buf()));
        }
        let content = std::fs::read_to_string(path)?;
        let config: PushConfig = toml::from_str(&content)?;
        Ok(config)
    }

    /// Resolve credential material: inline value first, then the
    /// credentials file.
    ///
    /// Consumed only by provider-client initialization, never by the
    /// dispatch core itself.
    pub fn credentials(&self) -> Result<Vec<u8>, ConfigError> {
        if let Some(inline) = &self.credentials {
            return Ok(inline.clone().into_bytes());
        }
        if let Some(path) = &self.credentials_file {
            return Ok(std::fs::read(path)?);
        }
        Err(ConfigError::MissingCredentials)
    }

    /// Options forwarded to the preparation collaborator.
    pub fn delivery_options(&self) -> DeliveryOptions {
        DeliveryOptions {
            time_to_live: self.time_to_live,
            android: self.android.clone(),
            apns: self.apns.clone(),
            webpush: self.webpush.clone(),
        }
    }
}

impl Default for PushConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            dry_run: false,
            credentials: None,
            credentials_file: None,
            time_to_live: None,
            android: None,
            apns: None,
            webpush: None,
            queue_capacity: default_queue_capacity(),
            send_batch_size: default_send_batch_size(),
            sub_batch_size: default_sub_batch_size(),
        }
    }
}
