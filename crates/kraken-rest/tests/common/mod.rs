//! Shared setup for integration tests: clients wired to a scripted
//! transport, plus captured response bodies.

use std::sync::Arc;

use kraken_rest::{ClientConfig, Credentials, Kraken, MockTransport};

pub const BASE_URL: &str = "http://localhost:8080";

/// Valid-looking credentials: the private key is the base64 test key
/// from Kraken's API documentation.
pub const API_KEY: &str = "test-api-key";
pub const PRIVATE_KEY: &str =
    "kQH5HW/8p1uGOVjbgWA7FunAmGO8lsSUXNsu3eow76sz84Q18fWxnyRzBHCd3pd5nE9qa99HAZtuZuj6F1huXg==";

pub const SERVER_TIME_BODY: &str =
    r#"{"error":[],"result":{"unixtime":1616336594,"rfc1123":"Sun, 21 Mar 21 14:23:14 +0000"}}"#;

pub const RECENT_TRADES_BODY: &str = r#"{
    "error": [],
    "result": {
        "XETHZEUR": [
            ["271.00000", "1.00000000", 1503524402.2436, "b", "l", ""],
            ["271.81000", "0.14412593", 1503524402.2439, "s", "l", ""]
        ],
        "last": "1503524404183915423"
    }
}"#;

pub const QUERY_LEDGERS_BODY: &str = r#"{
    "error": [],
    "result": {
        "LEDGER-ID": {
            "refid": "REFERENCE-ID",
            "time": 1503524404.1839,
            "type": "trade",
            "aclass": "currency",
            "asset": "XETH",
            "amount": "1.00000000",
            "fee": "0.00260000",
            "balance": "2.00000000"
        }
    }
}"#;

pub fn mock_client() -> (Kraken, Arc<MockTransport>) {
    let transport = MockTransport::new();
    let client = Kraken::with_config(
        ClientConfig::new()
            .with_base_url(BASE_URL)
            .with_transport(transport.clone()),
    );
    (client, transport)
}

pub fn mock_client_with_credentials() -> (Kraken, Arc<MockTransport>) {
    let transport = MockTransport::new();
    let credentials = Credentials::new(API_KEY, PRIVATE_KEY).unwrap();
    let client = Kraken::with_config(
        ClientConfig::new()
            .with_base_url(BASE_URL)
            .with_credentials(credentials)
            .with_transport(transport.clone()),
    );
    (client, transport)
}
