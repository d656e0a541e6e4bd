//! Request assembly and dispatch.
//!
//! [`RequestBuilder`] accumulates wire parameters for one endpoint and
//! turns them into a spawned request on `enqueue`. The typed builders
//! in [`crate::endpoints`] are thin wrappers generated by
//! [`request_builders!`]; everything endpoint-independent lives here.

use std::marker::PhantomData;
use std::sync::Arc;

use serde::de::DeserializeOwned;
use tracing::debug;

use kraken_auth::RequestSigner;
use kraken_types::Envelope;

use crate::client::Shared;
use crate::endpoint::{Endpoint, Method};
use crate::error::KrakenError;
use crate::handle::RequestHandle;
use crate::transport::{HttpCall, HttpReply};

pub struct RequestBuilder<T> {
    shared: Arc<Shared>,
    endpoint: &'static Endpoint,
    params: Vec<(&'static str, String)>,
    _response: PhantomData<fn() -> T>,
}

impl<T: DeserializeOwned + Send + 'static> RequestBuilder<T> {
    pub(crate) fn new(shared: Arc<Shared>, endpoint: &'static Endpoint) -> Self {
        Self { shared, endpoint, params: Vec::new(), _response: PhantomData }
    }

    /// Set a wire parameter. Setting the same key twice keeps the last
    /// value; parameter order otherwise follows call order.
    pub(crate) fn insert(&mut self, key: &'static str, value: String) {
        match self.params.iter_mut().find(|(existing, _)| *existing == key) {
            Some(slot) => slot.1 = value,
            None => self.params.push((key, value)),
        }
    }

    /// Freeze the parameters and start the request.
    ///
    /// Private endpoints on a client without credentials are rejected
    /// here, before anything reaches the transport.
    pub(crate) fn enqueue(self) -> RequestHandle<T> {
        if self.endpoint.is_private && self.shared.credentials.is_none() {
            return RequestHandle::ready(Err(KrakenError::AuthRequired));
        }
        let Self { shared, endpoint, params, .. } = self;
        RequestHandle::spawn(dispatch(shared, endpoint, params))
    }
}

async fn dispatch<T: DeserializeOwned>(
    shared: Arc<Shared>,
    endpoint: &'static Endpoint,
    params: Vec<(&'static str, String)>,
) -> Result<T, KrakenError> {
    if let Some(counter) = &shared.call_counter {
        while let Err(wait) = counter.try_reserve(endpoint.cost) {
            debug!(path = endpoint.path, wait_ms = wait.as_millis() as u64, "rate budget exhausted, waiting");
            tokio::time::sleep(wait).await;
        }
    }

    let call = build_call(&shared, endpoint, &params)?;
    debug!(path = endpoint.path, cost = endpoint.cost, "dispatching request");
    let reply = shared.transport.execute(call).await?;
    decode_reply(reply)
}

/// Assemble the outgoing HTTP call. Private calls get a fresh nonce,
/// a form-encoded body with the nonce first, and a signature over it.
fn build_call(
    shared: &Shared,
    endpoint: &'static Endpoint,
    params: &[(&'static str, String)],
) -> Result<HttpCall, KrakenError> {
    let url = format!("{}{}", shared.base_url, endpoint.path);
    match endpoint.method {
        Method::Get => {
            if params.is_empty() {
                return Ok(HttpCall::get(url));
            }
            let query = serde_urlencoded::to_string(params)
                .map_err(|err| KrakenError::InvalidParameter(err.to_string()))?;
            Ok(HttpCall::get(format!("{url}?{query}")))
        }
        Method::Post => {
            let credentials = shared
                .credentials
                .as_ref()
                .ok_or(KrakenError::AuthRequired)?;
            let signer = RequestSigner::new(credentials, endpoint.path);

            let mut form: Vec<(&str, &str)> = Vec::with_capacity(params.len() + 1);
            form.push(("nonce", signer.nonce()));
            form.extend(params.iter().map(|(key, value)| (*key, value.as_str())));
            let body = serde_urlencoded::to_string(&form)
                .map_err(|err| KrakenError::InvalidParameter(err.to_string()))?;

            let signature = signer.sign(&body);
            Ok(HttpCall::post(url, signer.api_key().to_string(), signature, body))
        }
    }
}

/// Decode the two-layer response: outer envelope first, then the
/// `result` payload. A populated `error` array always wins; the
/// payload is never touched in that case.
fn decode_reply<T: DeserializeOwned>(reply: HttpReply) -> Result<T, KrakenError> {
    let envelope: Envelope = match serde_json::from_str(&reply.body) {
        Ok(envelope) => envelope,
        Err(err) if reply.is_success() => {
            return Err(KrakenError::Parse(format!("invalid response envelope: {err}")));
        }
        Err(_) => return Err(KrakenError::Status { status: reply.status }),
    };

    let result = envelope
        .into_result()
        .map_err(KrakenError::from_api_errors)?;
    let value = match result {
        Some(value) => value,
        None if reply.is_success() => {
            return Err(KrakenError::Parse("response carried no result".to_string()));
        }
        None => return Err(KrakenError::Status { status: reply.status }),
    };
    serde_json::from_value(value).map_err(|err| KrakenError::Parse(err.to_string()))
}

/// Generates one typed builder struct per endpoint.
///
/// Each row names the builder, the [`Endpoint`] it targets, its
/// response type, and its setters as `method => "wire_key": kind`.
/// Setter kinds:
///
/// * `str`  - any `Into<String>`
/// * `int`  - an `i64`, sent in decimal
/// * `bool` - sent as `"true"` / `"false"`
/// * `flag` - sent as `"true"` only when set; absent otherwise
/// * `list` - string slice, comma-joined
macro_rules! request_builders {
    (
        $(
            $(#[$doc:meta])*
            $name:ident ( $endpoint:path ) -> $resp:ty {
                $(
                    $(#[$setter_doc:meta])*
                    $setter:ident => $key:literal : $kind:tt
                ),* $(,)?
            }
        )*
    ) => { $(
        $(#[$doc])*
        pub struct $name {
            inner: $crate::builder::RequestBuilder<$resp>,
        }

        impl $name {
            pub(crate) fn new(shared: ::std::sync::Arc<$crate::client::Shared>) -> Self {
                Self { inner: $crate::builder::RequestBuilder::new(shared, &$endpoint) }
            }

            $( $crate::builder::request_builders!(@setter $(#[$setter_doc])* $setter, $key, $kind); )*

            /// Freeze the parameters and dispatch the request.
            pub fn enqueue(self) -> $crate::handle::RequestHandle<$resp> {
                self.inner.enqueue()
            }
        }
    )* };

    (@setter $(#[$setter_doc:meta])* $setter:ident, $key:literal, str) => {
        $(#[$setter_doc])*
        pub fn $setter(mut self, value: impl Into<String>) -> Self {
            self.inner.insert($key, value.into());
            self
        }
    };
    (@setter $(#[$setter_doc:meta])* $setter:ident, $key:literal, int) => {
        $(#[$setter_doc])*
        pub fn $setter(mut self, value: i64) -> Self {
            self.inner.insert($key, value.to_string());
            self
        }
    };
    (@setter $(#[$setter_doc:meta])* $setter:ident, $key:literal, bool) => {
        $(#[$setter_doc])*
        pub fn $setter(mut self, value: bool) -> Self {
            self.inner.insert($key, if value { "true" } else { "false" }.to_string());
            self
        }
    };
    (@setter $(#[$setter_doc:meta])* $setter:ident, $key:literal, flag) => {
        $(#[$setter_doc])*
        pub fn $setter(mut self, value: bool) -> Self {
            if value {
                self.inner.insert($key, "true".to_string());
            }
            self
        }
    };
    (@setter $(#[$setter_doc:meta])* $setter:ident, $key:literal, list) => {
        $(#[$setter_doc])*
        pub fn $setter(mut self, values: &[&str]) -> Self {
            self.inner.insert($key, values.join(","));
            self
        }
    };
}
pub(crate) use request_builders;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decode_surfaces_api_errors_before_the_payload() {
        // A result field shaped nothing like u64 must never be parsed
        // when the error array is populated.
        let reply = HttpReply::ok(r#"{"error":["EQuery:Unknown asset"],"result":{"junk":true}}"#);
        let err = decode_reply::<u64>(reply).unwrap_err();
        match err {
            KrakenError::Api { errors, .. } => assert_eq!(errors, vec!["EQuery:Unknown asset"]),
            other => panic!("expected Api, got {other:?}"),
        }
    }

    #[test]
    fn decode_rejects_non_json_error_pages_by_status() {
        let reply = HttpReply { status: 502, body: "<html>bad gateway</html>".to_string() };
        assert!(matches!(
            decode_reply::<u64>(reply),
            Err(KrakenError::Status { status: 502 })
        ));
    }

    #[test]
    fn decode_flags_garbage_on_successful_status_as_parse() {
        let reply = HttpReply::ok("not json at all");
        assert!(matches!(decode_reply::<u64>(reply), Err(KrakenError::Parse(_))));
    }

    #[test]
    fn decode_requires_a_result_on_success() {
        let reply = HttpReply::ok(r#"{"error":[]}"#);
        assert!(matches!(decode_reply::<u64>(reply), Err(KrakenError::Parse(_))));
    }

    #[test]
    fn decode_reports_payload_type_mismatches() {
        let reply = HttpReply::ok(r#"{"error":[],"result":"a string"}"#);
        assert!(matches!(decode_reply::<u64>(reply), Err(KrakenError::Parse(_))));
    }
}
