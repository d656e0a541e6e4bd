//! Funding endpoints.

use crate::builder::request_builders;
use crate::endpoint;
use crate::types::DepositAddress;

request_builders! {
    /// Builder for `/0/private/DepositAddresses`.
    ///
    /// Unlike most endpoints the result is a plain array, not a keyed
    /// dictionary.
    DepositAddressesBuilder(endpoint::DEPOSIT_ADDRESSES) -> Vec<DepositAddress> {
        otp => "otp": str,
        asset_class => "aclass": str,
        asset => "asset": str,
        /// Funding method name, as reported by the exchange.
        method => "method": str,
    }
}
