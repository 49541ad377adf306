//! # Tickwatch Core
//!
//! Domain types and the quote service client for the Tickwatch stock
//! monitor.
//!
//! ## Overview
//!
//! This crate provides the foundational components for Tickwatch:
//!
//! - **Domain models** for exchanges, tracked holdings, and quote snapshots
//! - **Monetary grammar** for the service's price and price change tokens
//! - **Quote source trait** with a production CSV client and an offline stub
//! - **HTTP client abstraction** so tests run without a network
//!
//! ## Modules
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`domain`] | Domain models (Exchange, Stock, Quote) |
//! | [`error`] | Core error types |
//! | [`http_client`] | HTTP client abstraction |
//! | [`money`] | Monetary token grammar and rounding |
//! | [`quote_source`] | Quote service client |
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use tickwatch_core::{CsvQuoteSource, ExchangeRegistry, QuoteSource, ReqwestHttpClient, Stock};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let registry = ExchangeRegistry::from_path("exchanges.txt")?;
//!     let nyse = registry.lookup("NYSE Stock Exchanges")?.clone();
//!     let stocks = vec![Stock::new("Pepsi", "PEP", nyse, 100, "5.25".parse()?)?];
//!
//!     let source = CsvQuoteSource::new(Arc::new(ReqwestHttpClient::new()));
//!     for quote in source.quotes(&stocks, true).await? {
//!         println!("{}: {}", quote.stock(), quote.price());
//!     }
//!     Ok(())
//! }
//! ```

pub mod domain;
pub mod error;
pub mod http_client;
pub mod money;
pub mod quote_source;

pub use domain::{Exchange, ExchangeRegistry, Quote, Stock};
pub use error::{FetchError, RegistryError, ValidationError};
pub use http_client::{HttpClient, HttpError, HttpRequest, HttpResponse, ReqwestHttpClient};
pub use money::{parse_change, parse_price, round_money, MoneyParseError};
pub use quote_source::{
    CsvQuoteSource, FixedQuoteSource, QuoteSource, QUOTE_URL_END, QUOTE_URL_START,
};
