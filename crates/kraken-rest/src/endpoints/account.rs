//! Private account endpoints.
//!
//! All of these require credentials; without them the builders reject
//! the request before it reaches the transport. Each accepts an `otp`
//! for accounts with two-factor authentication enabled on the API key.

use serde::Deserialize;

use kraken_types::Dictionary;

use crate::builder::request_builders;
use crate::endpoint;
use crate::types::Order;

request_builders! {
    /// Builder for `/0/private/Balance`.
    ///
    /// The result maps asset ids to balance amounts as strings.
    BalanceBuilder(endpoint::BALANCE) -> Dictionary<String> {
        otp => "otp": str,
    }

    /// Builder for `/0/private/TradeBalance`.
    TradeBalanceBuilder(endpoint::TRADE_BALANCE) -> TradeBalance {
        otp => "otp": str,
        asset_class => "aclass": str,
        /// Base asset for the summary. Defaults to ZUSD server-side.
        asset => "asset": str,
    }

    /// Builder for `/0/private/OpenOrders`.
    OpenOrdersBuilder(endpoint::OPEN_ORDERS) -> Dictionary<Order> {
        otp => "otp": str,
        /// Include related trade ids in each order.
        include_trades => "trades": bool,
        /// Restrict to orders with this user reference id.
        userref => "userref": str,
    }

    /// Builder for `/0/private/ClosedOrders`.
    ///
    /// The result carries a `count` of matching orders for paging.
    ClosedOrdersBuilder(endpoint::CLOSED_ORDERS) -> Dictionary<Order> {
        otp => "otp": str,
        include_trades => "trades": bool,
        userref => "userref": str,
        /// Starting timestamp or order id (exclusive).
        start => "start": str,
        /// Ending timestamp or order id (inclusive).
        end => "end": str,
        /// Result offset for paging.
        offset => "ofs": int,
        /// Which timestamp `start`/`end` refer to: "open", "close" or
        /// "both".
        close_time => "closetime": str,
    }

    /// Builder for `/0/private/QueryOrders`.
    QueryOrdersBuilder(endpoint::QUERY_ORDERS) -> Dictionary<Order> {
        otp => "otp": str,
        include_trades => "trades": bool,
        userref => "userref": str,
        /// Transaction ids to look up, at most 50.
        transactions => "txid": list,
    }

    /// Builder for `/0/private/Ledgers`.
    ///
    /// The result carries a `count` of matching entries for paging.
    LedgersBuilder(endpoint::LEDGERS) -> Dictionary<Ledger> {
        otp => "otp": str,
        asset_class => "aclass": str,
        /// Restrict to the given assets.
        assets => "asset": list,
        /// Entry type: "deposit", "withdrawal", "trade" or "margin".
        ledger_type => "type": str,
        start => "start": str,
        end => "end": str,
        offset => "ofs": int,
    }

    /// Builder for `/0/private/QueryLedgers`.
    QueryLedgersBuilder(endpoint::QUERY_LEDGERS) -> Dictionary<Ledger> {
        otp => "otp": str,
        /// Ledger entry ids to look up, at most 20.
        ledgers => "id": list,
    }

    /// Builder for `/0/private/TradesHistory`.
    ///
    /// The result carries a `count` of matching trades for paging.
    TradesHistoryBuilder(endpoint::TRADES_HISTORY) -> Dictionary<TradeHistoryEntry> {
        otp => "otp": str,
        /// Trade type filter: "all", "any position", "closed position",
        /// "closing position" or "no position".
        trade_type => "type": str,
        /// Include related trade info.
        include_trades => "trades": bool,
        start => "start": str,
        end => "end": str,
        offset => "ofs": int,
    }

    /// Builder for `/0/private/OpenPositions`.
    OpenPositionsBuilder(endpoint::OPEN_POSITIONS) -> Dictionary<Position> {
        otp => "otp": str,
        /// Restrict to positions opened by these transaction ids.
        transactions => "txid": list,
        /// Include profit/loss calculations.
        include_calculations => "docalcs": bool,
    }
}

/// Margin-oriented account balance summary
#[derive(Debug, Clone, Deserialize)]
pub struct TradeBalance {
    /// Equivalent balance: combined balance of all currencies
    #[serde(rename = "eb")]
    pub equivalent_balance: String,
    /// Trade balance: combined balance of all equity currencies
    #[serde(rename = "tb")]
    pub trade_balance: String,
    /// Margin amount of open positions
    #[serde(rename = "m")]
    pub margin: String,
    /// Unrealized net profit/loss of open positions
    #[serde(rename = "n")]
    pub unrealized_net: String,
    /// Cost basis of open positions
    #[serde(rename = "c")]
    pub cost_basis: String,
    /// Current floating valuation of open positions
    #[serde(rename = "v")]
    pub floating_valuation: String,
    /// Equity: trade balance plus unrealized net profit/loss
    #[serde(rename = "e")]
    pub equity: String,
    /// Free margin: equity minus the margin of open positions
    #[serde(rename = "mf")]
    pub free_margin: String,
    /// Margin level percentage, absent with no open positions
    #[serde(rename = "ml")]
    pub margin_level: Option<String>,
}

/// One ledger entry
#[derive(Debug, Clone, Deserialize)]
pub struct Ledger {
    /// Reference id of the event that produced the entry
    pub refid: String,
    /// Unix timestamp with fractional seconds
    pub time: f64,
    /// Entry type, e.g. "trade", "deposit", "withdrawal"
    #[serde(rename = "type")]
    pub kind: String,
    /// Asset class
    pub aclass: String,
    /// Asset id
    pub asset: String,
    /// Transaction amount, signed
    pub amount: String,
    /// Fee charged with the transaction
    pub fee: String,
    /// Resulting balance
    pub balance: String,
}

/// One trade from the account's trade history
#[derive(Debug, Clone, Deserialize)]
pub struct TradeHistoryEntry {
    /// Order responsible for the trade
    pub ordertxid: String,
    /// Asset pair
    pub pair: String,
    /// Unix timestamp with fractional seconds
    pub time: f64,
    /// "buy" or "sell"
    #[serde(rename = "type")]
    pub side: String,
    /// Order type
    pub ordertype: String,
    /// Average execution price
    pub price: String,
    /// Total cost (quote currency)
    pub cost: String,
    /// Fee charged
    pub fee: String,
    /// Volume (base currency)
    pub vol: String,
    /// Initial margin, for margin trades
    pub margin: Option<String>,
    /// Comma-delimited miscellaneous info
    #[serde(default)]
    pub misc: String,
    /// Position id, when the trade opened or closed a position
    pub postxid: Option<String>,
}

/// One open margin position
#[derive(Debug, Clone, Deserialize)]
pub struct Position {
    /// Order responsible for the position
    pub ordertxid: String,
    /// Asset pair
    pub pair: String,
    /// Unix timestamp the position was opened
    pub time: f64,
    /// "buy" or "sell"
    #[serde(rename = "type")]
    pub side: String,
    /// Order type that opened the position
    pub ordertype: String,
    /// Opening cost (quote currency)
    pub cost: String,
    /// Opening fee
    pub fee: String,
    /// Position volume (base currency)
    pub vol: String,
    /// Volume closed so far
    pub vol_closed: String,
    /// Initial margin
    pub margin: String,
    /// Current value, present when calculations were requested
    pub value: Option<String>,
    /// Unrealized profit/loss, present when calculations were requested
    pub net: Option<String>,
    /// Comma-delimited miscellaneous info
    #[serde(default)]
    pub misc: String,
    /// Comma-delimited order flags
    #[serde(default)]
    pub oflags: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ledger_entry_decodes() {
        let ledger: Ledger = serde_json::from_str(
            r#"{
                "refid": "TJKLOC-VJFGN-UIU4CE",
                "time": 1570622342.1208,
                "type": "trade",
                "aclass": "currency",
                "asset": "ZEUR",
                "amount": "-24.5000",
                "fee": "0.0490",
                "balance": "459.7416"
            }"#,
        )
        .unwrap();
        assert_eq!(ledger.kind, "trade");
        assert_eq!(ledger.asset, "ZEUR");
        assert_eq!(ledger.amount, "-24.5000");
    }

    #[test]
    fn trade_balance_decodes_short_keys() {
        let balance: TradeBalance = serde_json::from_str(
            r#"{
                "eb": "1101.3425",
                "tb": "392.2264",
                "m": "7.0354",
                "n": "-10.0232",
                "c": "21.1063",
                "v": "31.1297",
                "e": "382.2032",
                "mf": "375.1678",
                "ml": "5432.57"
            }"#,
        )
        .unwrap();
        assert_eq!(balance.equivalent_balance, "1101.3425");
        assert_eq!(balance.free_margin, "375.1678");
        assert_eq!(balance.margin_level.as_deref(), Some("5432.57"));
    }

    #[test]
    fn position_without_calculations_has_no_value() {
        let position: Position = serde_json::from_str(
            r#"{
                "ordertxid": "OQCLML-BW3P3-BUCMWZ",
                "pair": "XXBTZUSD",
                "time": 1616666559.1310,
                "type": "buy",
                "ordertype": "limit",
                "cost": "30010.0",
                "fee": "78.0",
                "vol": "1.0",
                "vol_closed": "0.0",
                "margin": "15005.0"
            }"#,
        )
        .unwrap();
        assert_eq!(position.side, "buy");
        assert!(position.value.is_none());
        assert!(position.net.is_none());
    }
}
