//! Classification of Kraken's in-band API error tokens
//!
//! Kraken reports failures as colon-delimited strings inside the
//! response envelope, e.g. `"EAPI:Rate limit exceeded"` or
//! `"WOrder:Partial fill"`. The leading character marks severity, the
//! prefix before the colon the category. The raw token is always kept
//! verbatim; classification only adds metadata on top, it never
//! reinterprets or rewrites the string.

/// Severity marker (first character of the token)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorSeverity {
    /// `E` prefix - the call failed
    Error,
    /// `W` prefix - the call succeeded with a caveat
    Warning,
    /// No recognizable prefix
    Unknown,
}

/// Kraken API error categories
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCategory {
    /// `EAPI:*` - key, signature, nonce and rate-limit issues
    Api,
    /// `EGeneral:*` - argument and permission issues
    General,
    /// `EService:*` - service availability
    Service,
    /// `EOrder:*` - order placement and cancellation
    Order,
    /// `EFunding:*` - deposits and withdrawals
    Funding,
    /// `EQuery:*` - lookups of unknown entities
    Query,
    /// `ETrade:*` - trade execution
    Trade,
    /// Unrecognized category
    Unknown,
}

/// A single parsed Kraken error token
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KrakenApiError {
    /// The original token, verbatim
    pub raw: String,
    /// Severity marker
    pub severity: ErrorSeverity,
    /// Error category
    pub category: ErrorCategory,
    /// The part after the category prefix
    pub message: String,
}

impl KrakenApiError {
    /// Parse one error token into its classified form
    pub fn parse(token: &str) -> Self {
        let (severity, category, message) = match token.split_once(':') {
            Some((prefix, rest)) => {
                let severity = match prefix.chars().next() {
                    Some('E') => ErrorSeverity::Error,
                    Some('W') => ErrorSeverity::Warning,
                    _ => ErrorSeverity::Unknown,
                };
                let category = match &prefix[1.min(prefix.len())..] {
                    "API" => ErrorCategory::Api,
                    "General" => ErrorCategory::General,
                    "Service" => ErrorCategory::Service,
                    "Order" => ErrorCategory::Order,
                    "Funding" => ErrorCategory::Funding,
                    "Query" => ErrorCategory::Query,
                    "Trade" => ErrorCategory::Trade,
                    _ => ErrorCategory::Unknown,
                };
                (severity, category, rest.trim().to_string())
            }
            None => (
                ErrorSeverity::Unknown,
                ErrorCategory::Unknown,
                token.to_string(),
            ),
        };

        Self {
            raw: token.to_string(),
            severity,
            category,
            message,
        }
    }

    /// Check if the token reports client- or server-side throttling
    pub fn is_rate_limit(&self) -> bool {
        self.message.eq_ignore_ascii_case("rate limit exceeded")
            || self.message.eq_ignore_ascii_case("too many requests")
            || self.message.eq_ignore_ascii_case("temporary lockout")
    }

    /// Check if retrying the same call later can reasonably succeed
    ///
    /// Rate limits and service availability are transient; everything
    /// else (bad keys, bad arguments, insufficient funds) is not.
    pub fn is_retryable(&self) -> bool {
        self.is_rate_limit() || self.category == ErrorCategory::Service
    }
}

impl std::fmt::Display for KrakenApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.raw)
    }
}
