//! Typed request builders, one per API endpoint.

pub mod account;
pub mod funding;
pub mod market;
pub mod trading;
