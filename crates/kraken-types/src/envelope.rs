//! The uniform JSON wrapper returned by every Kraken REST endpoint
//!
//! All responses look like `{"error": [...], "result": {...}}`. The
//! `error` array carries colon-delimited tokens such as
//! `"EAPI:Rate limit exceeded"`; `result` is endpoint-specific and is
//! omitted (or null) when errors are present.

use serde::Deserialize;
use serde_json::Value;

/// Standard Kraken API response wrapper
///
/// The result payload is kept as raw JSON so that an error response is
/// never structurally decoded: when `error` is non-empty, `result` must
/// not be interpreted at all, even if it happens to be present.
#[derive(Debug, Deserialize)]
pub struct Envelope {
    /// Error messages (empty if successful)
    #[serde(default)]
    pub error: Vec<String>,
    /// Result data (present if successful)
    #[serde(default)]
    pub result: Option<Value>,
}

impl Envelope {
    /// Check if the response indicates success
    pub fn is_success(&self) -> bool {
        self.error.is_empty()
    }

    /// Split the envelope into its result payload or its error list
    ///
    /// A successful envelope without a `result` field yields `Ok(None)`;
    /// some endpoints legitimately return nothing.
    pub fn into_result(self) -> Result<Option<Value>, Vec<String>> {
        if self.error.is_empty() {
            Ok(self.result)
        } else {
            Err(self.error)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn success_envelope_yields_result() {
        let envelope: Envelope =
            serde_json::from_str(r#"{"error": [], "result": {"unixtime": 0}}"#).unwrap();
        assert!(envelope.is_success());
        let result = envelope.into_result().unwrap().unwrap();
        assert_eq!(result["unixtime"], 0);
    }

    #[test]
    fn error_envelope_yields_error_tokens_verbatim() {
        let envelope: Envelope =
            serde_json::from_str(r#"{"error": ["Some:Error:Structure"]}"#).unwrap();
        assert!(!envelope.is_success());
        let errors = envelope.into_result().unwrap_err();
        assert_eq!(errors, vec!["Some:Error:Structure".to_string()]);
    }

    #[test]
    fn error_envelope_never_exposes_result() {
        // A present-but-bogus result must be discarded when errors exist.
        let envelope: Envelope =
            serde_json::from_str(r#"{"error": ["EAPI:Invalid nonce"], "result": 42}"#).unwrap();
        assert!(envelope.into_result().is_err());
    }

    #[test]
    fn missing_result_on_success_is_none() {
        let envelope: Envelope = serde_json::from_str(r#"{"error": []}"#).unwrap();
        assert!(matches!(envelope.into_result(), Ok(None)));
    }
}
