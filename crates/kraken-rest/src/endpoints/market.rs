//! Public market data endpoints.
//!
//! None of these require authentication.

use serde::Deserialize;

use kraken_types::Dictionary;

use crate::builder::request_builders;
use crate::endpoint;
use crate::types::{AssetPair, Depth, Ticker};

request_builders! {
    /// Builder for `/0/public/Time`.
    ServerTimeBuilder(endpoint::SERVER_TIME) -> Time {}

    /// Builder for `/0/public/Assets`.
    AssetsBuilder(endpoint::ASSETS) -> Dictionary<Asset> {
        /// Restrict the result to the given assets.
        assets => "asset": list,
        /// Asset class to list. Defaults to "currency" server-side.
        asset_class => "aclass": str,
    }

    /// Builder for `/0/public/AssetPairs`.
    AssetPairsBuilder(endpoint::ASSET_PAIRS) -> Dictionary<AssetPair> {
        /// Restrict the result to the given pairs.
        pairs => "pair": list,
        /// Level of detail: "info", "leverage", "fees" or "margin".
        info => "info": str,
    }

    /// Builder for `/0/public/Ticker`.
    TickerBuilder(endpoint::TICKER) -> Dictionary<Ticker> {
        pairs => "pair": list,
    }

    /// Builder for `/0/public/OHLC`.
    ///
    /// The response carries a `last` id to pass back as `since` when
    /// polling for new candles.
    OhlcBuilder(endpoint::OHLC) -> Dictionary<Vec<Ohlc>> {
        pair => "pair": str,
        /// Candle interval in minutes: 1, 5, 15, 30, 60, 240, 1440,
        /// 10080 or 21600.
        interval => "interval": int,
        /// Return committed candles since this id (exclusive).
        since => "since": str,
    }

    /// Builder for `/0/public/Depth`.
    OrderBookBuilder(endpoint::ORDER_BOOK) -> Dictionary<Depth> {
        pair => "pair": str,
        /// Maximum number of levels per side.
        count => "count": int,
    }

    /// Builder for `/0/public/Trades`.
    ///
    /// The response carries a `last` id to pass back as `since` when
    /// polling for new trades.
    RecentTradesBuilder(endpoint::RECENT_TRADES) -> Dictionary<Vec<Trade>> {
        pair => "pair": str,
        since => "since": str,
    }

    /// Builder for `/0/public/Spread`.
    SpreadBuilder(endpoint::SPREAD) -> Dictionary<Vec<Spread>> {
        pair => "pair": str,
        since => "since": str,
    }
}

/// Server time in two formats
#[derive(Debug, Clone, Deserialize)]
pub struct Time {
    /// Unix timestamp in seconds
    pub unixtime: u64,
    /// RFC 1123 formatted time
    pub rfc1123: String,
}

/// Information about a single asset
#[derive(Debug, Clone, Deserialize)]
pub struct Asset {
    /// Asset class, e.g. "currency"
    pub aclass: String,
    /// Alternate name, e.g. "XBT" for "XXBT"
    pub altname: String,
    /// Scaling decimal places for record keeping
    pub decimals: u32,
    /// Scaling decimal places for display
    pub display_decimals: u32,
}

/// One OHLC candle: time, open, high, low, close, vwap, volume, count.
#[derive(Debug, Clone, Deserialize)]
#[serde(from = "(u64, String, String, String, String, String, String, u64)")]
pub struct Ohlc {
    pub time: u64,
    pub open: String,
    pub high: String,
    pub low: String,
    pub close: String,
    pub vwap: String,
    pub volume: String,
    /// Number of trades in the candle
    pub count: u64,
}

impl From<(u64, String, String, String, String, String, String, u64)> for Ohlc {
    fn from(
        (time, open, high, low, close, vwap, volume, count): (
            u64,
            String,
            String,
            String,
            String,
            String,
            String,
            u64,
        ),
    ) -> Self {
        Self { time, open, high, low, close, vwap, volume, count }
    }
}

/// One public trade: price, volume, time, side, order type, misc.
#[derive(Debug, Clone, Deserialize)]
#[serde(from = "(String, String, f64, String, String, String)")]
pub struct Trade {
    pub price: String,
    pub volume: String,
    /// Unix timestamp with fractional seconds
    pub time: f64,
    /// "b" for buy, "s" for sell
    pub side: String,
    /// "m" for market, "l" for limit
    pub order_type: String,
    pub misc: String,
}

impl From<(String, String, f64, String, String, String)> for Trade {
    fn from(
        (price, volume, time, side, order_type, misc): (String, String, f64, String, String, String),
    ) -> Self {
        Self { price, volume, time, side, order_type, misc }
    }
}

impl Trade {
    pub fn is_buy(&self) -> bool {
        self.side == "b"
    }
}

/// One spread sample: time, bid, ask.
#[derive(Debug, Clone, Deserialize)]
#[serde(from = "(u64, String, String)")]
pub struct Spread {
    pub time: u64,
    pub bid: String,
    pub ask: String,
}

impl From<(u64, String, String)> for Spread {
    fn from((time, bid, ask): (u64, String, String)) -> Self {
        Self { time, bid, ask }
    }
}
