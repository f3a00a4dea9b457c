use thiserror::Error;

/// Top-level error type for the ReelScope pipeline.
///
/// Variants map to the four error classes the pipeline distinguishes:
/// preconditions (checked before any network call), transport, contract
/// (unparseable model output), and local resources.
#[derive(Debug, Error)]
pub enum ReelError {
    #[error("missing API key: set a user key or a fallback key before calling a provider")]
    MissingApiKey,

    #[error("video file too large: {size_bytes} bytes exceeds the 1 GiB upload limit")]
    FileTooLarge { size_bytes: u64 },

    #[error("empty input: {0}")]
    EmptyInput(String),

    #[error("provider error ({provider}): {message}")]
    Provider {
        provider: String,
        /// HTTP status, when the failure came from a non-success response.
        status: Option<u16>,
        message: String,
    },

    #[error("malformed model response: {0}")]
    MalformedResponse(String),

    #[error("storage error: {0}")]
    Storage(String),

    #[error("video decode error: {0}")]
    Decode(String),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl ReelError {
    /// Transport error from a non-success provider response.
    pub fn provider_status(provider: impl Into<String>, status: u16, body: impl Into<String>) -> Self {
        Self::Provider {
            provider: provider.into(),
            status: Some(status),
            message: format!("HTTP {}: {}", status, body.into()),
        }
    }

    /// Provider-side failure with no HTTP status (connect errors, etc.).
    pub fn provider(provider: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Provider {
            provider: provider.into(),
            status: None,
            message: message.into(),
        }
    }
}
