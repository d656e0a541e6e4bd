//! Authentication for the Kraken REST API
//!
//! This crate holds the API credentials and implements the signing
//! scheme Kraken requires on private endpoints: HMAC-SHA512 over the
//! URI path concatenated with SHA256(nonce + POST body), keyed with
//! the base64-decoded private key.
//!
//! # Example
//!
//! ```no_run
//! use kraken_auth::Credentials;
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let creds = Credentials::from_env()?;
//!     let nonce = kraken_auth::next_nonce();
//!     let signature = creds.sign("/0/private/Balance", &nonce.to_string(), "nonce=123");
//!     println!("API-Sign: {}", signature);
//!     Ok(())
//! }
//! ```

mod credentials;
mod error;

pub use credentials::{next_nonce, Credentials, RequestSigner};
pub use error::{AuthError, AuthResult};
