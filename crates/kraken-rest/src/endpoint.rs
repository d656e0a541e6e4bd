//! Static descriptions of the REST endpoints this crate can call.
//!
//! Every request builder points at one of the constants below. The
//! descriptor carries everything the dispatcher needs to know that is
//! not request-specific: HTTP verb, URL path, whether the call must be
//! signed, and how many rate-limit counter slots it consumes.

/// HTTP verb used by an endpoint.
///
/// Kraken only ever uses two: public endpoints are plain GETs, private
/// endpoints are form-encoded POSTs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
}

/// Immutable description of a single REST endpoint.
#[derive(Debug)]
pub struct Endpoint {
    pub method: Method,
    /// Path relative to the API base URL, e.g. `/0/public/Time`.
    pub path: &'static str,
    /// Private endpoints require credentials and a signed request.
    pub is_private: bool,
    /// Rate-limit counter cost. Order management endpoints are free;
    /// ledger and trade history lookups count double.
    pub cost: u32,
}

const fn public(path: &'static str) -> Endpoint {
    Endpoint { method: Method::Get, path, is_private: false, cost: 1 }
}

const fn private(path: &'static str, cost: u32) -> Endpoint {
    Endpoint { method: Method::Post, path, is_private: true, cost }
}

pub static SERVER_TIME: Endpoint = public("/0/public/Time");
pub static ASSETS: Endpoint = public("/0/public/Assets");
pub static ASSET_PAIRS: Endpoint = public("/0/public/AssetPairs");
pub static TICKER: Endpoint = public("/0/public/Ticker");
pub static OHLC: Endpoint = public("/0/public/OHLC");
pub static ORDER_BOOK: Endpoint = public("/0/public/Depth");
pub static RECENT_TRADES: Endpoint = public("/0/public/Trades");
pub static SPREAD: Endpoint = public("/0/public/Spread");

pub static BALANCE: Endpoint = private("/0/private/Balance", 1);
pub static TRADE_BALANCE: Endpoint = private("/0/private/TradeBalance", 1);
pub static OPEN_ORDERS: Endpoint = private("/0/private/OpenOrders", 1);
pub static CLOSED_ORDERS: Endpoint = private("/0/private/ClosedOrders", 1);
pub static QUERY_ORDERS: Endpoint = private("/0/private/QueryOrders", 1);
pub static LEDGERS: Endpoint = private("/0/private/Ledgers", 2);
pub static QUERY_LEDGERS: Endpoint = private("/0/private/QueryLedgers", 2);
pub static TRADES_HISTORY: Endpoint = private("/0/private/TradesHistory", 2);
pub static OPEN_POSITIONS: Endpoint = private("/0/private/OpenPositions", 1);
pub static ADD_ORDER: Endpoint = private("/0/private/AddOrder", 0);
pub static CANCEL_ORDER: Endpoint = private("/0/private/CancelOrder", 0);
pub static DEPOSIT_ADDRESSES: Endpoint = private("/0/private/DepositAddresses", 1);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn public_endpoints_are_unsigned_gets() {
        for endpoint in [&SERVER_TIME, &ASSETS, &TICKER, &ORDER_BOOK, &SPREAD] {
            assert_eq!(endpoint.method, Method::Get);
            assert!(!endpoint.is_private);
            assert!(endpoint.path.starts_with("/0/public/"));
        }
    }

    #[test]
    fn private_endpoints_are_signed_posts() {
        for endpoint in [&BALANCE, &LEDGERS, &ADD_ORDER, &DEPOSIT_ADDRESSES] {
            assert_eq!(endpoint.method, Method::Post);
            assert!(endpoint.is_private);
            assert!(endpoint.path.starts_with("/0/private/"));
        }
    }

    #[test]
    fn order_management_does_not_consume_rate_budget() {
        assert_eq!(ADD_ORDER.cost, 0);
        assert_eq!(CANCEL_ORDER.cost, 0);
        assert_eq!(LEDGERS.cost, 2);
        assert_eq!(TRADES_HISTORY.cost, 2);
    }
}
