//! Order management endpoints.
//!
//! Placing and cancelling orders does not count against the rate-limit
//! counter; the exchange throttles these separately by open order
//! volume.

use crate::builder::request_builders;
use crate::endpoint;
use crate::types::{CancelReceipt, OrderReceipt};

request_builders! {
    /// Builder for `/0/private/AddOrder`.
    ///
    /// ```no_run
    /// # use kraken_rest::{Kraken, Credentials, OrderSide, OrderType};
    /// # async fn place(client: Kraken) -> Result<(), kraken_rest::KrakenError> {
    /// let receipt = client
    ///     .add_order()
    ///     .asset_pair("XBTUSD")
    ///     .side(OrderSide::Buy.to_string())
    ///     .order_type(OrderType::Limit.to_string())
    ///     .price("37500")
    ///     .volume("1.25")
    ///     .enqueue()
    ///     .await?;
    /// println!("{}", receipt.descr.order);
    /// # Ok(())
    /// # }
    /// ```
    AddOrderBuilder(endpoint::ADD_ORDER) -> OrderReceipt {
        otp => "otp": str,
        asset_pair => "pair": str,
        /// "buy" or "sell".
        side => "type": str,
        /// Order type, e.g. "market", "limit", "stop-loss".
        order_type => "ordertype": str,
        /// Primary price. Meaning depends on the order type.
        price => "price": str,
        /// Secondary price, for two-price order types.
        secondary_price => "price2": str,
        /// Order volume in base currency (lots).
        volume => "volume": str,
        /// Desired leverage, e.g. "2:1".
        leverage => "leverage": str,
        /// Order flags, e.g. "post", "fciq".
        order_flags => "oflags": list,
        /// Scheduled start time: 0, a unix timestamp, or "+<seconds>".
        start_time => "starttm": str,
        /// Expiration time, same formats as `start_time`.
        expire_time => "expiretm": str,
        /// User reference id, for grouping and later lookup.
        userref => "userref": str,
        /// Order type of the conditional close order.
        close_order_type => "close[ordertype]": str,
        /// Primary price of the conditional close order.
        close_price => "close[price]": str,
        /// Secondary price of the conditional close order.
        close_secondary_price => "close[price2]": str,
        /// Validate the order server-side without placing it. When set
        /// the receipt has a description but no transaction id.
        validate_only => "validate": flag,
    }

    /// Builder for `/0/private/CancelOrder`.
    CancelOrderBuilder(endpoint::CANCEL_ORDER) -> CancelReceipt {
        otp => "otp": str,
        /// Transaction id, or a userref to cancel a whole group.
        transaction => "txid": str,
    }
}
