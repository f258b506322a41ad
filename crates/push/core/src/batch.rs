//! Bulk subscribe/unsubscribe results.

/// Result of one bulk subscribe or unsubscribe call.
#[derive(Debug, Clone, Default, serde::Serialize, serde::Deserialize)]
pub struct BatchResponse {
    pub success_count: usize,
    pub failure_count: usize,
    /// One entry per failed index of the device list passed into the call.
    pub errors: Vec<BatchError>,
}

/// Failure of a single index within a bulk call.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct BatchError {
    pub index: usize,
    /// Reason string as reported by the provider.
    pub reason: String,
}

impl BatchResponse {
    /// Response for a call where every index succeeded.
    pub fn success(count: usize) -> Self {
        Self {
            success_count: count,
            failure_count: 0,
            errors: Vec::new(),
        }
    }
}
