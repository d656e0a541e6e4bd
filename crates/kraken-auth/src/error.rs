//! Error types for authentication operations

/// Errors that can occur while handling credentials
#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    /// Invalid API credentials (e.g., private key is not valid base64)
    #[error("invalid credentials: {0}")]
    InvalidCredentials(String),

    /// Environment variable not set
    #[error("environment variable not set: {0}")]
    EnvVarNotSet(String),
}

/// Result type for authentication operations
pub type AuthResult<T> = Result<T, AuthError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display_names_the_variable() {
        let err = AuthError::EnvVarNotSet("KRAKEN_API_KEY".to_string());
        assert!(err.to_string().contains("KRAKEN_API_KEY"));
    }
}
