//! Authentication credentials for the Kraken API
//!
//! Implements HMAC-SHA512 signing as required by Kraken's private
//! endpoints.
//!
//! # Security
//!
//! Private keys are stored using the `secrecy` crate which:
//! - Zeroizes memory on drop (prevents memory scanning)
//! - Prevents accidental logging via Debug impl
//! - Provides explicit access via `expose_secret()`

use base64::{engine::general_purpose::STANDARD as BASE64, Engine};
use hmac::{Hmac, Mac};
use secrecy::{ExposeSecret, SecretBox};
use sha2::{Digest, Sha256, Sha512};
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{SystemTime, UNIX_EPOCH};

use crate::error::{AuthError, AuthResult};

type HmacSha512 = Hmac<Sha512>;

/// Highest nonce handed out so far, process-wide
static LAST_NONCE: AtomicU64 = AtomicU64::new(0);

/// Draw the next nonce: epoch microseconds, strictly increasing
///
/// Kraken rejects any private call whose nonce is not greater than the
/// last one seen for the key, so concurrent requests must never draw
/// the same value. If the clock stalls or steps backwards the counter
/// continues from the previous nonce plus one.
pub fn next_nonce() -> u64 {
    let now = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("system clock before Unix epoch")
        .as_micros() as u64;

    let mut prev = LAST_NONCE.load(Ordering::Relaxed);
    loop {
        let next = now.max(prev + 1);
        match LAST_NONCE.compare_exchange_weak(prev, next, Ordering::Relaxed, Ordering::Relaxed) {
            Ok(_) => return next,
            Err(observed) => prev = observed,
        }
    }
}

/// API credentials for authenticated requests
///
/// The private key is base64-decoded once at construction and zeroized
/// when the credentials are dropped.
pub struct Credentials {
    /// API key (public)
    api_key: String,
    /// Private key (decoded from base64, zeroized on drop)
    private_key: SecretBox<Vec<u8>>,
}

impl Credentials {
    /// Create new credentials from an API key and a base64 private key
    ///
    /// Fails with [`AuthError::InvalidCredentials`] if the key is not
    /// valid base64, before any request can be attempted with it.
    pub fn new(api_key: impl Into<String>, private_key: impl AsRef<str>) -> AuthResult<Self> {
        let decoded = BASE64.decode(private_key.as_ref()).map_err(|e| {
            AuthError::InvalidCredentials(format!("invalid base64 private key: {e}"))
        })?;

        Ok(Self {
            api_key: api_key.into(),
            private_key: SecretBox::new(Box::new(decoded)),
        })
    }

    /// Create credentials from environment variables
    ///
    /// Reads `KRAKEN_API_KEY` and `KRAKEN_PRIVATE_KEY`.
    pub fn from_env() -> AuthResult<Self> {
        let api_key = std::env::var("KRAKEN_API_KEY")
            .map_err(|_| AuthError::EnvVarNotSet("KRAKEN_API_KEY".to_string()))?;
        let private_key = std::env::var("KRAKEN_PRIVATE_KEY")
            .map_err(|_| AuthError::EnvVarNotSet("KRAKEN_PRIVATE_KEY".to_string()))?;

        Self::new(api_key, private_key)
    }

    /// Get the API key
    pub fn api_key(&self) -> &str {
        &self.api_key
    }

    /// Sign a request for Kraken's API
    ///
    /// Kraken signature algorithm:
    /// 1. SHA256(nonce + POST_data)
    /// 2. HMAC-SHA512(private_key, uri_path + SHA256_result)
    /// 3. Base64 encode result
    ///
    /// Deterministic: identical inputs always produce the identical
    /// signature.
    ///
    /// # Arguments
    /// * `path` - API endpoint path (e.g., "/0/private/AddOrder")
    /// * `nonce` - Unique nonce for this request
    /// * `post_data` - URL-encoded POST body
    ///
    /// # Returns
    /// Base64-encoded signature for the `API-Sign` header
    pub fn sign(&self, path: &str, nonce: &str, post_data: &str) -> String {
        let mut sha256 = Sha256::new();
        sha256.update(nonce.as_bytes());
        sha256.update(post_data.as_bytes());
        let sha256_result = sha256.finalize();

        let mut message = path.as_bytes().to_vec();
        message.extend_from_slice(&sha256_result);

        let mut mac = HmacSha512::new_from_slice(self.private_key.expose_secret())
            .expect("HMAC can take key of any size");
        mac.update(&message);

        BASE64.encode(mac.finalize().into_bytes())
    }
}

impl Clone for Credentials {
    fn clone(&self) -> Self {
        Self {
            api_key: self.api_key.clone(),
            private_key: SecretBox::new(Box::new(self.private_key.expose_secret().clone())),
        }
    }
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field(
                "api_key",
                &format!("{}...", &self.api_key[..8.min(self.api_key.len())]),
            )
            .field("private_key", &"[REDACTED]")
            .finish()
    }
}

/// Couples credentials with the path and nonce of one request
#[derive(Debug)]
pub struct RequestSigner<'a> {
    credentials: &'a Credentials,
    path: &'a str,
    nonce: String,
}

impl<'a> RequestSigner<'a> {
    /// Create a signer for one request, drawing a fresh nonce
    pub fn new(credentials: &'a Credentials, path: &'a str) -> Self {
        Self {
            credentials,
            path,
            nonce: next_nonce().to_string(),
        }
    }

    /// The nonce bound to this request
    pub fn nonce(&self) -> &str {
        &self.nonce
    }

    /// The API key for the `API-Key` header
    pub fn api_key(&self) -> &str {
        self.credentials.api_key()
    }

    /// Sign the request with the given POST data
    pub fn sign(&self, post_data: &str) -> String {
        self.credentials.sign(self.path, &self.nonce, post_data)
    }
}
