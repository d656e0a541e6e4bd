//! Types for Kraken REST API responses.
//!
//! Monetary amounts arrive as strings on the wire and stay strings in
//! the structs, so no precision is lost in transit; `Decimal`
//! accessors are provided where calculation is the common use.
//! Endpoint-specific payloads live next to their builders in
//! [`crate::endpoints`].

use rust_decimal::Decimal;
use serde::Deserialize;

// ============================================================================
// Market Data Types
// ============================================================================

/// Ticker information for a trading pair
#[derive(Debug, Clone, Deserialize)]
pub struct Ticker {
    /// Ask [price, whole lot volume, lot volume]
    pub a: Vec<String>,
    /// Bid [price, whole lot volume, lot volume]
    pub b: Vec<String>,
    /// Last trade closed [price, lot volume]
    pub c: Vec<String>,
    /// Volume [today, last 24 hours]
    pub v: Vec<String>,
    /// Volume weighted average price [today, last 24 hours]
    pub p: Vec<String>,
    /// Number of trades [today, last 24 hours]
    pub t: Vec<u64>,
    /// Low [today, last 24 hours]
    pub l: Vec<String>,
    /// High [today, last 24 hours]
    pub h: Vec<String>,
    /// Today's opening price
    pub o: String,
}

impl Ticker {
    /// Get the current ask price
    pub fn ask_price(&self) -> Option<Decimal> {
        self.a.first().and_then(|s| s.parse().ok())
    }

    /// Get the current bid price
    pub fn bid_price(&self) -> Option<Decimal> {
        self.b.first().and_then(|s| s.parse().ok())
    }

    /// Get the last trade price
    pub fn last_price(&self) -> Option<Decimal> {
        self.c.first().and_then(|s| s.parse().ok())
    }

    /// Get the mid price (average of bid and ask)
    pub fn mid_price(&self) -> Option<Decimal> {
        match (self.ask_price(), self.bid_price()) {
            (Some(ask), Some(bid)) => Some((ask + bid) / Decimal::TWO),
            _ => None,
        }
    }
}

/// Tradable asset pair information
#[derive(Debug, Clone, Deserialize)]
pub struct AssetPair {
    /// Alternate pair name
    pub altname: String,
    /// WebSocket pair name, when the pair is available there
    pub wsname: Option<String>,
    /// Asset class of the base component
    pub aclass_base: String,
    /// Base asset id
    pub base: String,
    /// Asset class of the quote component
    pub aclass_quote: String,
    /// Quote asset id
    pub quote: String,
    /// Scaling decimal places for the pair
    pub pair_decimals: u32,
    /// Scaling decimal places for volume
    pub lot_decimals: u32,
    /// Amount to multiply lot volume by to get currency volume
    pub lot_multiplier: u32,
    /// Leverage amounts available when buying
    #[serde(default)]
    pub leverage_buy: Vec<u32>,
    /// Leverage amounts available when selling
    #[serde(default)]
    pub leverage_sell: Vec<u32>,
    /// Fee schedule as [volume, percent fee] tiers
    #[serde(default)]
    pub fees: Vec<Vec<serde_json::Value>>,
    /// Maker fee schedule, for pairs on a maker/taker model
    #[serde(default)]
    pub fees_maker: Vec<Vec<serde_json::Value>>,
    /// Currency the volume discount is denominated in
    pub fee_volume_currency: Option<String>,
    /// Margin call level
    pub margin_call: Option<u32>,
    /// Stop-out/liquidation margin level
    pub margin_stop: Option<u32>,
    /// Minimum order size in base currency
    pub ordermin: Option<String>,
}

impl AssetPair {
    /// Minimum order volume, when the exchange reports one.
    pub fn min_order_volume(&self) -> Option<Decimal> {
        self.ordermin.as_deref().and_then(|s| s.parse().ok())
    }
}

/// One price level of an order book side: price, volume, and the unix
/// timestamp of the last update.
#[derive(Debug, Clone, Deserialize)]
#[serde(from = "(String, String, u64)")]
pub struct DepthLevel {
    pub price: String,
    pub volume: String,
    pub timestamp: u64,
}

impl From<(String, String, u64)> for DepthLevel {
    fn from((price, volume, timestamp): (String, String, u64)) -> Self {
        Self { price, volume, timestamp }
    }
}

impl DepthLevel {
    pub fn price(&self) -> Option<Decimal> {
        self.price.parse().ok()
    }

    pub fn volume(&self) -> Option<Decimal> {
        self.volume.parse().ok()
    }
}

/// Order book snapshot for a single pair
#[derive(Debug, Clone, Deserialize)]
pub struct Depth {
    pub asks: Vec<DepthLevel>,
    pub bids: Vec<DepthLevel>,
}

impl Depth {
    /// Best (lowest) ask price
    pub fn best_ask(&self) -> Option<Decimal> {
        self.asks.first().and_then(DepthLevel::price)
    }

    /// Best (highest) bid price
    pub fn best_bid(&self) -> Option<Decimal> {
        self.bids.first().and_then(DepthLevel::price)
    }

    /// Current bid/ask spread
    pub fn spread(&self) -> Option<Decimal> {
        match (self.best_ask(), self.best_bid()) {
            (Some(ask), Some(bid)) => Some(ask - bid),
            _ => None,
        }
    }
}

// ============================================================================
// Order Types
// ============================================================================

/// Order side
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OrderSide {
    Buy,
    Sell,
}

impl std::fmt::Display for OrderSide {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Buy => write!(f, "buy"),
            Self::Sell => write!(f, "sell"),
        }
    }
}

/// Order type, as the wire spells it
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OrderType {
    Market,
    Limit,
    StopLoss,
    TakeProfit,
    StopLossLimit,
    TakeProfitLimit,
    SettlePosition,
}

impl std::fmt::Display for OrderType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::Market => "market",
            Self::Limit => "limit",
            Self::StopLoss => "stop-loss",
            Self::TakeProfit => "take-profit",
            Self::StopLossLimit => "stop-loss-limit",
            Self::TakeProfitLimit => "take-profit-limit",
            Self::SettlePosition => "settle-position",
        };
        write!(f, "{s}")
    }
}

/// Order flags accepted by the `oflags` parameter
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OrderFlag {
    /// Prefer fee in base currency
    FeeInBase,
    /// Prefer fee in quote currency
    FeeInQuote,
    /// Disable market price protection
    NoMarketPriceProtection,
    /// Post-only (limit orders)
    PostOnly,
    /// Volume expressed in quote currency (market orders)
    VolumeInQuote,
}

impl OrderFlag {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::FeeInBase => "fcib",
            Self::FeeInQuote => "fciq",
            Self::NoMarketPriceProtection => "nompp",
            Self::PostOnly => "post",
            Self::VolumeInQuote => "viqc",
        }
    }
}

/// Human-readable description attached to an order
#[derive(Debug, Clone, Deserialize)]
pub struct OrderDescription {
    /// Asset pair
    pub pair: String,
    /// "buy" or "sell"
    #[serde(rename = "type")]
    pub side: String,
    /// Order type
    pub ordertype: String,
    /// Primary price
    pub price: String,
    /// Secondary price
    pub price2: String,
    /// Leverage, or "none"
    pub leverage: String,
    /// Order description sentence
    pub order: String,
    /// Conditional close description, if any
    #[serde(default)]
    pub close: String,
}

/// An open or closed order
#[derive(Debug, Clone, Deserialize)]
pub struct Order {
    /// Referral order transaction id
    pub refid: Option<String>,
    /// User reference id
    pub userref: Option<i64>,
    /// Order status: pending, open, closed, canceled, expired
    pub status: String,
    /// Unix timestamp the order was placed
    pub opentm: f64,
    /// Scheduled start time, 0 when immediate
    pub starttm: Option<f64>,
    /// Expiration time, 0 when none
    pub expiretm: Option<f64>,
    /// Unix timestamp the order was closed, for closed orders
    pub closetm: Option<f64>,
    /// Why a closed order closed
    pub reason: Option<String>,
    pub descr: OrderDescription,
    /// Volume ordered (base currency)
    pub vol: String,
    /// Volume executed so far
    pub vol_exec: String,
    /// Total cost so far (quote currency)
    pub cost: String,
    /// Total fee so far
    pub fee: String,
    /// Average execution price
    pub price: String,
    /// Stop price, for triggered order types
    pub stopprice: Option<String>,
    /// Triggered limit price
    pub limitprice: Option<String>,
    /// Comma-delimited miscellaneous info
    pub misc: String,
    /// Comma-delimited order flags
    pub oflags: String,
    /// Trade ids related to this order, when requested
    pub trades: Option<Vec<String>>,
}

impl Order {
    pub fn volume(&self) -> Option<Decimal> {
        self.vol.parse().ok()
    }

    pub fn executed_volume(&self) -> Option<Decimal> {
        self.vol_exec.parse().ok()
    }

    pub fn is_open(&self) -> bool {
        self.status == "open" || self.status == "pending"
    }
}

/// Receipt returned when an order is placed
#[derive(Debug, Clone, Deserialize)]
pub struct OrderReceipt {
    pub descr: OrderReceiptDescription,
    /// Transaction ids of the placed order. Absent for validate-only
    /// requests, which never reach the order book.
    pub txid: Option<Vec<String>>,
}

/// Description echoed back with an order receipt
#[derive(Debug, Clone, Deserialize)]
pub struct OrderReceiptDescription {
    /// Order description sentence
    pub order: String,
    /// Conditional close description, if one was attached
    pub close: Option<String>,
}

/// Receipt returned when an order is cancelled
#[derive(Debug, Clone, Deserialize)]
pub struct CancelReceipt {
    /// Number of orders cancelled
    pub count: u32,
    /// Set when the cancellation is queued behind a pending order
    pub pending: Option<bool>,
}

// ============================================================================
// Funding Types
// ============================================================================

/// A deposit address for an asset
#[derive(Debug, Clone, Deserialize)]
pub struct DepositAddress {
    pub address: String,
    /// Expiration time, "0" for addresses that do not expire
    pub expiretm: Option<String>,
    /// Whether the address has never received funds
    pub new: Option<bool>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn ticker_decimal_accessors() {
        let ticker: Ticker = serde_json::from_str(
            r#"{
                "a": ["52609.60000", "1", "1.000"],
                "b": ["52609.50000", "1", "1.000"],
                "c": ["52641.10000", "0.00080000"],
                "v": ["1920.83610601", "7954.00219674"],
                "p": ["52389.94668", "54022.90683"],
                "t": [23329, 80463],
                "l": ["51513.90000", "51513.90000"],
                "h": ["53219.90000", "57200.00000"],
                "o": "52280.40000"
            }"#,
        )
        .unwrap();
        assert_eq!(ticker.ask_price(), Some(dec!(52609.60000)));
        assert_eq!(ticker.bid_price(), Some(dec!(52609.50000)));
        assert_eq!(ticker.last_price(), Some(dec!(52641.10000)));
        assert_eq!(ticker.mid_price(), Some(dec!(52609.55000)));
    }

    #[test]
    fn depth_levels_decode_from_arrays() {
        let depth: Depth = serde_json::from_str(
            r#"{
                "asks": [["52523.00000", "1.199", 1616663113]],
                "bids": [["52522.90000", "0.753", 1616663112]]
            }"#,
        )
        .unwrap();
        assert_eq!(depth.best_ask(), Some(dec!(52523.00000)));
        assert_eq!(depth.best_bid(), Some(dec!(52522.90000)));
        assert_eq!(depth.spread(), Some(dec!(0.10000)));
        assert_eq!(depth.asks[0].timestamp, 1616663113);
    }

    #[test]
    fn order_side_and_type_render_wire_values() {
        assert_eq!(OrderSide::Buy.to_string(), "buy");
        assert_eq!(OrderSide::Sell.to_string(), "sell");
        assert_eq!(OrderType::StopLossLimit.to_string(), "stop-loss-limit");
        assert_eq!(OrderFlag::PostOnly.as_str(), "post");
    }

    #[test]
    fn order_decodes_with_optional_fields_missing() {
        let order: Order = serde_json::from_str(
            r#"{
                "refid": null,
                "userref": 0,
                "status": "open",
                "opentm": 1616665496.7808,
                "starttm": 0,
                "expiretm": 0,
                "descr": {
                    "pair": "XBTUSD",
                    "type": "buy",
                    "ordertype": "limit",
                    "price": "37500.0",
                    "price2": "0",
                    "leverage": "none",
                    "order": "buy 1.25000000 XBTUSD @ limit 37500.0"
                },
                "vol": "1.25000000",
                "vol_exec": "0.00000000",
                "cost": "0.00000",
                "fee": "0.00000",
                "price": "0.00000",
                "misc": "",
                "oflags": "fciq"
            }"#,
        )
        .unwrap();
        assert!(order.is_open());
        assert_eq!(order.volume(), Some(dec!(1.25000000)));
        assert_eq!(order.descr.side, "buy");
        assert!(order.trades.is_none());
    }

    #[test]
    fn validate_only_receipt_has_no_txid() {
        let receipt: OrderReceipt = serde_json::from_str(
            r#"{"descr": {"order": "buy 1.25000000 XBTUSD @ limit 37500.0"}}"#,
        )
        .unwrap();
        assert!(receipt.txid.is_none());
        assert!(receipt.descr.close.is_none());
    }
}
