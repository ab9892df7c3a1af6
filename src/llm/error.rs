use thiserror::Error;

/// Failures of a backend call, by class.
#[derive(Debug, Error)]
pub enum LlmError {
    /// The selected backend needs a credential and none is configured.
    #[error("{backend} is not configured: missing {env_var}")]
    NotConfigured {
        backend: &'static str,
        env_var: &'static str,
    },
    /// The backend answered with an explicit error payload.
    #[error("{backend} returned an error: {message}")]
    Upstream {
        backend: &'static str,
        message: String,
    },
    /// The backend answered without the fields a reply is read from.
    #[error("invalid response from {backend}: {detail}")]
    InvalidResponse {
        backend: &'static str,
        detail: String,
    },
    #[error("request to {backend} failed: {source}")]
    Transport {
        backend: &'static str,
        #[source]
        source: reqwest::Error,
    },
    #[error("failed to build HTTP client: {0}")]
    Client(#[source] reqwest::Error),
}

impl LlmError {
    /// Guidance shown to callers when the backend lacks its credential.
    pub fn not_configured_message(env_var: &str) -> String {
        format!("AI service not configured. Please add {env_var} secret.")
    }
}
