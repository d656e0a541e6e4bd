//! Main REST client implementation

use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use tracing::info;

use kraken_auth::Credentials;
use kraken_types::CallCounter;

use crate::endpoints::account::{
    BalanceBuilder, ClosedOrdersBuilder, LedgersBuilder, OpenOrdersBuilder,
    OpenPositionsBuilder, QueryLedgersBuilder, QueryOrdersBuilder, TradeBalanceBuilder,
    TradesHistoryBuilder,
};
use crate::endpoints::funding::DepositAddressesBuilder;
use crate::endpoints::market::{
    AssetPairsBuilder, AssetsBuilder, OhlcBuilder, OrderBookBuilder, RecentTradesBuilder,
    ServerTimeBuilder, SpreadBuilder, TickerBuilder,
};
use crate::endpoints::trading::{AddOrderBuilder, CancelOrderBuilder};
use crate::transport::{HttpTransport, Transport};

/// Default request timeout
const DEFAULT_TIMEOUT_SECS: u64 = 30;

const DEFAULT_BASE_URL: &str = "https://api.kraken.com";

/// State shared by every builder spawned from one client. Cloning the
/// client clones the `Arc`, so all clones draw on the same transport
/// and the same rate-limit counter.
pub(crate) struct Shared {
    pub(crate) base_url: String,
    pub(crate) credentials: Option<Credentials>,
    pub(crate) call_counter: Option<CallCounter>,
    pub(crate) transport: Arc<dyn Transport>,
}

/// Kraken REST API client.
///
/// Each endpoint method returns a typed builder; `enqueue()` starts
/// the request and hands back an awaitable handle.
///
/// # Example
///
/// ```no_run
/// use kraken_rest::{Kraken, Credentials};
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     // Public endpoints only
///     let client = Kraken::new();
///     let time = client.server_time().enqueue().await?;
///     println!("server time: {}", time.rfc1123);
///
///     // With authentication for private endpoints
///     let creds = Credentials::from_env()?;
///     let client = Kraken::with_credentials(creds);
///     let balance = client.account_balance().enqueue().await?;
///     println!("{} assets held", balance.len());
///
///     Ok(())
/// }
/// ```
#[derive(Clone)]
pub struct Kraken {
    shared: Arc<Shared>,
}

impl Kraken {
    /// Create a new client without authentication.
    ///
    /// Only public endpoints will be available; private builders
    /// resolve to an authentication error without touching the
    /// network.
    pub fn new() -> Self {
        Self::with_config(ClientConfig::default())
    }

    /// Create a new client with credentials.
    pub fn with_credentials(credentials: Credentials) -> Self {
        Self::with_config(ClientConfig::default().with_credentials(credentials))
    }

    /// Create a new client with custom configuration.
    pub fn with_config(config: ClientConfig) -> Self {
        let transport = match config.transport {
            Some(transport) => transport,
            None => Arc::new(HttpTransport::new(config.timeout, &config.user_agent)),
        };
        info!(
            base_url = %config.base_url,
            authenticated = config.credentials.is_some(),
            rate_limited = config.call_counter.is_some(),
            "creating Kraken REST client"
        );
        Self {
            shared: Arc::new(Shared {
                base_url: config.base_url,
                credentials: config.credentials,
                call_counter: config.call_counter,
                transport,
            }),
        }
    }

    /// Whether this client can call private endpoints.
    pub fn has_credentials(&self) -> bool {
        self.shared.credentials.is_some()
    }

    // Public market data

    /// Get the server time. Useful as a connectivity check.
    pub fn server_time(&self) -> ServerTimeBuilder {
        ServerTimeBuilder::new(self.shared.clone())
    }

    /// Get information about the assets available for trading.
    pub fn assets(&self) -> AssetsBuilder {
        AssetsBuilder::new(self.shared.clone())
    }

    /// Get information about tradable asset pairs.
    pub fn asset_pairs(&self) -> AssetPairsBuilder {
        AssetPairsBuilder::new(self.shared.clone())
    }

    /// Get ticker information for one or more pairs.
    pub fn ticker(&self) -> TickerBuilder {
        TickerBuilder::new(self.shared.clone())
    }

    /// Get OHLC candle data for a pair.
    pub fn ohlc(&self) -> OhlcBuilder {
        OhlcBuilder::new(self.shared.clone())
    }

    /// Get the order book for a pair.
    pub fn order_book(&self) -> OrderBookBuilder {
        OrderBookBuilder::new(self.shared.clone())
    }

    /// Get recent public trades for a pair.
    pub fn recent_trades(&self) -> RecentTradesBuilder {
        RecentTradesBuilder::new(self.shared.clone())
    }

    /// Get recent bid/ask spread data for a pair.
    pub fn spread(&self) -> SpreadBuilder {
        SpreadBuilder::new(self.shared.clone())
    }

    // Private account data

    /// Get the account's asset balances.
    pub fn account_balance(&self) -> BalanceBuilder {
        BalanceBuilder::new(self.shared.clone())
    }

    /// Get a margin-oriented summary of the account balance.
    pub fn trade_balance(&self) -> TradeBalanceBuilder {
        TradeBalanceBuilder::new(self.shared.clone())
    }

    /// Get the account's open orders.
    pub fn open_orders(&self) -> OpenOrdersBuilder {
        OpenOrdersBuilder::new(self.shared.clone())
    }

    /// Get the account's closed orders.
    pub fn closed_orders(&self) -> ClosedOrdersBuilder {
        ClosedOrdersBuilder::new(self.shared.clone())
    }

    /// Look up specific orders by transaction id.
    pub fn query_orders(&self) -> QueryOrdersBuilder {
        QueryOrdersBuilder::new(self.shared.clone())
    }

    /// Get the account's ledger entries.
    pub fn ledgers(&self) -> LedgersBuilder {
        LedgersBuilder::new(self.shared.clone())
    }

    /// Look up specific ledger entries by id.
    pub fn query_ledgers(&self) -> QueryLedgersBuilder {
        QueryLedgersBuilder::new(self.shared.clone())
    }

    /// Get the account's trade history.
    pub fn trades_history(&self) -> TradesHistoryBuilder {
        TradesHistoryBuilder::new(self.shared.clone())
    }

    /// Get the account's open margin positions.
    pub fn open_positions(&self) -> OpenPositionsBuilder {
        OpenPositionsBuilder::new(self.shared.clone())
    }

    // Trading

    /// Place a new order.
    pub fn add_order(&self) -> AddOrderBuilder {
        AddOrderBuilder::new(self.shared.clone())
    }

    /// Cancel an open order.
    pub fn cancel_order(&self) -> CancelOrderBuilder {
        CancelOrderBuilder::new(self.shared.clone())
    }

    // Funding

    /// Get deposit addresses for an asset and funding method.
    pub fn deposit_addresses(&self) -> DepositAddressesBuilder {
        DepositAddressesBuilder::new(self.shared.clone())
    }
}

impl Default for Kraken {
    fn default() -> Self {
        Self::new()
    }
}

/// Client configuration
#[derive(Clone)]
pub struct ClientConfig {
    base_url: String,
    credentials: Option<Credentials>,
    call_counter: Option<CallCounter>,
    timeout: Duration,
    user_agent: String,
    transport: Option<Arc<dyn Transport>>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            credentials: None,
            call_counter: None,
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            user_agent: concat!("kraken-rest/", env!("CARGO_PKG_VERSION")).to_string(),
            transport: None,
        }
    }
}

impl ClientConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Override the API base URL. Useful for test servers.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn with_credentials(mut self, credentials: Credentials) -> Self {
        self.credentials = Some(credentials);
        self
    }

    /// Throttle requests against a call counter. Pass a clone of the
    /// same counter to several clients to share one budget.
    pub fn with_call_counter(mut self, counter: CallCounter) -> Self {
        self.call_counter = Some(counter);
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    /// Replace the HTTP layer entirely. Tests use this to inject a
    /// scripted transport.
    pub fn with_transport(mut self, transport: Arc<dyn Transport>) -> Self {
        self.transport = Some(transport);
        self
    }
}

impl fmt::Debug for ClientConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClientConfig")
            .field("base_url", &self.base_url)
            .field("authenticated", &self.credentials.is_some())
            .field("rate_limited", &self.call_counter.is_some())
            .field("timeout", &self.timeout)
            .field("user_agent", &self.user_agent)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_targets_production() {
        let config = ClientConfig::default();
        assert_eq!(config.base_url, DEFAULT_BASE_URL);
        assert_eq!(config.timeout, Duration::from_secs(30));
    }

    #[test]
    fn unauthenticated_client_reports_no_credentials() {
        let client = Kraken::new();
        assert!(!client.has_credentials());
    }

    #[test]
    fn clones_share_state() {
        let client = Kraken::new();
        let clone = client.clone();
        assert!(Arc::ptr_eq(&client.shared, &clone.shared));
    }

    #[test]
    fn config_debug_does_not_leak_credentials() {
        let creds = Credentials::new("api-key", "c2VjcmV0LWJ5dGVz").unwrap();
        let config = ClientConfig::new().with_credentials(creds);
        let rendered = format!("{config:?}");
        assert!(!rendered.contains("api-key"));
        assert!(rendered.contains("authenticated: true"));
    }
}
