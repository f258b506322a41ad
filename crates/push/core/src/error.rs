//! Provider error classification.

/// Outcome classes for provider errors.
///
/// Every provider error maps to exactly one class. Dispatch components act
/// on the class and never inspect error details themselves.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorClass {
    /// Provider overloaded, unavailable, or reporting an internal fault.
    Transient,
    /// Credential, argument, or sender mismatch. Recurs across requests
    /// until an operator fixes the configuration.
    Config,
    /// The provider has permanently rejected the device token.
    InvalidToken,
    /// Anything the provider client could not attribute.
    Unknown,
}

impl std::fmt::Display for ErrorClass {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::Transient => "transient",
            Self::Config => "config",
            Self::InvalidToken => "invalid-token",
            Self::Unknown => "unknown",
        };
        f.write_str(name)
    }
}

/// Errors returned by a provider client.
pub trait ProviderError: std::error::Error + Send + Sync + 'static {
    /// Classify this error into exactly one [`ErrorClass`].
    fn classify(&self) -> ErrorClass;
}
