//! Shared types for the Kraken REST API
//!
//! This crate provides the core type definitions used across the SDK.
//! It is runtime-free and can be used independently.
//!
//! # Key Types
//!
//! - [`Envelope`] - The `{error, result}` wrapper every endpoint returns
//! - [`Dictionary`] - Ordered keyed results with `last`/`count` metadata
//! - [`KrakenApiError`], [`ErrorCategory`] - In-band API error classification
//! - [`CallCounter`] - Shared, decaying request-cost budget

pub mod dictionary;
pub mod envelope;
pub mod error_codes;
pub mod rate_limit;

// Re-export commonly used types
pub use dictionary::Dictionary;
pub use envelope::Envelope;
pub use error_codes::{ErrorCategory, ErrorSeverity, KrakenApiError};
pub use rate_limit::CallCounter;

// Re-export rust_decimal for users
pub use rust_decimal::Decimal;
