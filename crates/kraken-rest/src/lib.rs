//! REST API client for the Kraken cryptocurrency exchange.
//!
//! Every endpoint is exposed as a typed request builder on [`Kraken`]:
//! configure parameters with setters, then `enqueue()` to dispatch and
//! await the resulting handle.
//!
//! # Example
//!
//! ```no_run
//! use kraken_rest::{Kraken, Credentials};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     // Public endpoints (no auth required)
//!     let client = Kraken::new();
//!     let tickers = client.ticker().pairs(&["XBTUSD"]).enqueue().await?;
//!     for (pair, ticker) in &tickers {
//!         println!("{pair}: last {:?}", ticker.last_price());
//!     }
//!
//!     // Private endpoints (auth required)
//!     let creds = Credentials::from_env()?;
//!     let client = Kraken::with_credentials(creds);
//!     let balance = client.account_balance().enqueue().await?;
//!     println!("balances: {balance:?}");
//!
//!     Ok(())
//! }
//! ```
//!
//! # Error handling
//!
//! API-level failures surface as [`KrakenError::Api`] with every error
//! token from the response preserved verbatim; transport, decoding and
//! authentication failures get their own variants. A populated error
//! array always wins over whatever payload came with it.
//!
//! # Rate limiting
//!
//! Pass a [`CallCounter`] via [`ClientConfig`] to throttle requests
//! client-side against Kraken's tier-based counter. Builders sleep
//! until budget is available rather than failing. Clients cloned from
//! the same configuration share one budget.

pub mod client;
pub mod endpoint;
pub mod endpoints;
pub mod error;
pub mod handle;
pub mod transport;
pub mod types;

mod builder;

// Re-export main types
pub use client::{ClientConfig, Kraken};
pub use error::{KrakenError, RestResult};
pub use handle::RequestHandle;
pub use transport::{HttpCall, HttpReply, MockTransport, Transport, TransportError};

// The auth and shared-type crates are part of the public API surface.
pub use kraken_auth::Credentials;
pub use kraken_types::{CallCounter, Dictionary};

// Re-export endpoint-specific types
pub use endpoints::account::{Ledger, Position, TradeBalance, TradeHistoryEntry};
pub use endpoints::market::{Asset, Ohlc, Spread, Time, Trade};
pub use types::{
    AssetPair, CancelReceipt, Depth, DepthLevel, DepositAddress, Order, OrderDescription,
    OrderFlag, OrderReceipt, OrderReceiptDescription, OrderSide, OrderType, Ticker,
};
