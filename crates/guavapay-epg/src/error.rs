use thiserror::Error;

use crate::config::ConfigError;

/// Errors returned by EPG client operations.
#[derive(Debug, Error)]
pub enum EpgError {
    /// The request never produced a response body (connect, TLS, timeout, ...).
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// The gateway answered with a non-zero `errorCode`.
    #[error("gateway error {code}: {message}")]
    Gateway { code: i64, message: String },

    /// The body was not valid JSON, or a documented field was missing or malformed.
    #[error("invalid gateway response ({reason}); raw response: {body}")]
    InvalidResponse { reason: String, body: String },

    #[error("config error: {0}")]
    Config(#[from] ConfigError),

    #[error("serialization error: {0}")]
    SerdeError(#[from] serde_json::Error),
}

impl EpgError {
    pub(crate) fn invalid_response(reason: impl Into<String>, body: &str) -> Self {
        EpgError::InvalidResponse {
            reason: reason.into(),
            body: body.to_string(),
        }
    }

    /// The gateway's `errorCode`, if this is a business error.
    pub fn gateway_code(&self) -> Option<i64> {
        match self {
            EpgError::Gateway { code, .. } => Some(*code),
            _ => None,
        }
    }

    /// The raw response body, if the response could not be understood.
    pub fn raw_body(&self) -> Option<&str> {
        match self {
            EpgError::InvalidResponse { body, .. } => Some(body),
            _ => None,
        }
    }
}
