//! Domain model: exchanges, tracked holdings, and quote snapshots.

mod exchange;
mod quote;
mod stock;

pub use exchange::{Exchange, ExchangeRegistry};
pub use quote::Quote;
pub use stock::Stock;
