//! Error types for REST API operations

use kraken_types::KrakenApiError;

use crate::transport::TransportError;

/// Errors that can occur while building, dispatching, or decoding a
/// REST request.
#[derive(Debug, thiserror::Error)]
pub enum KrakenError {
    /// A private endpoint was called on a client without credentials.
    #[error("authentication required for this endpoint")]
    AuthRequired,

    /// The HTTP exchange itself failed.
    #[error(transparent)]
    Transport(#[from] TransportError),

    /// The server replied with an error status and no decodable
    /// response envelope.
    #[error("unexpected HTTP status {status}")]
    Status { status: u16 },

    /// The API answered with a populated `error` array.
    #[error("API error: {}", errors.join(", "))]
    Api {
        /// Every error token from the envelope, verbatim.
        errors: Vec<String>,
        /// The first token, split into severity, category and message.
        error: KrakenApiError,
    },

    /// The response body could not be decoded into the expected type.
    #[error("parse error: {0}")]
    Parse(String),

    /// A request parameter could not be encoded.
    #[error("invalid parameter: {0}")]
    InvalidParameter(String),

    /// A bounded wait on a request handle ran out of time.
    #[error("request timed out")]
    Timeout,

    /// The request was cancelled before a result was observed.
    #[error("request cancelled")]
    Cancelled,
}

impl KrakenError {
    /// Wrap the envelope's error array, classifying the first token.
    pub(crate) fn from_api_errors(errors: Vec<String>) -> Self {
        let first = errors.first().map(String::as_str).unwrap_or("EGeneral:Unknown");
        let error = KrakenApiError::parse(first);
        Self::Api { errors, error }
    }

    /// True when the API rejected the call for exceeding a rate limit.
    pub fn is_rate_limited(&self) -> bool {
        matches!(self, Self::Api { error, .. } if error.is_rate_limit())
    }

    /// True for failures worth retrying after a pause: transport
    /// faults, server-side errors, and rate limiting.
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::Transport(_) | Self::Timeout => true,
            Self::Status { status } => *status >= 500,
            Self::Api { error, .. } => error.is_retryable(),
            _ => false,
        }
    }
}

/// Convenience alias used throughout the crate.
pub type RestResult<T> = Result<T, KrakenError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn api_error_keeps_every_token_verbatim() {
        let err = KrakenError::from_api_errors(vec![
            "EOrder:Insufficient funds".to_string(),
            "WGeneral:Danger".to_string(),
        ]);
        match &err {
            KrakenError::Api { errors, error } => {
                assert_eq!(errors.len(), 2);
                assert_eq!(errors[0], "EOrder:Insufficient funds");
                assert_eq!(error.message, "Insufficient funds");
            }
            other => panic!("expected Api, got {other:?}"),
        }
        assert!(!err.is_rate_limited());
        assert!(!err.is_retryable());
    }

    #[test]
    fn rate_limit_tokens_are_flagged_retryable() {
        let err = KrakenError::from_api_errors(vec!["EAPI:Rate limit exceeded".to_string()]);
        assert!(err.is_rate_limited());
        assert!(err.is_retryable());
    }

    #[test]
    fn server_errors_are_retryable_client_errors_are_not() {
        assert!(KrakenError::Status { status: 502 }.is_retryable());
        assert!(!KrakenError::Status { status: 404 }.is_retryable());
        assert!(!KrakenError::AuthRequired.is_retryable());
    }
}
