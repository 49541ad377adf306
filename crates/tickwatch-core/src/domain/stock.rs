//! Tracked holdings.

use std::cmp::Ordering;
use std::fmt::{Display, Formatter};

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::domain::Exchange;
use crate::error::ValidationError;

const MAX_TICKER_LEN: usize = 20;

/// Immutable description of one tracked holding: a name, the ticker symbol
/// as defined by its exchange (without the request-qualifying suffix), the
/// exchange itself, a share count, and the average acquisition price.
///
/// The share count carries no sign constraint; short positions are negative.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Stock {
    name: String,
    ticker: String,
    exchange: Exchange,
    shares: i32,
    average_price: Decimal,
}

impl Stock {
    /// Build a validated holding.
    ///
    /// `name` must have content after trimming; `ticker` must be 1..=20
    /// characters drawn from letters, `.`, `_`, and `^`; `average_price`
    /// must be zero or positive.
    pub fn new(
        name: impl Into<String>,
        ticker: impl Into<String>,
        exchange: Exchange,
        shares: i32,
        average_price: Decimal,
    ) -> Result<Self, ValidationError> {
        let name = name.into();
        let ticker = ticker.into();

        if name.trim().is_empty() {
            return Err(ValidationError::EmptyName);
        }
        validate_ticker(&ticker)?;
        if average_price.is_sign_negative() && !average_price.is_zero() {
            return Err(ValidationError::NegativeAveragePrice);
        }

        Ok(Self {
            name,
            ticker,
            exchange,
            shares,
            average_price,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn ticker(&self) -> &str {
        &self.ticker
    }

    pub fn exchange(&self) -> &Exchange {
        &self.exchange
    }

    pub fn shares(&self) -> i32 {
        self.shares
    }

    pub fn average_price(&self) -> Decimal {
        self.average_price
    }

    /// True when the ticker names an index such as `^DJI` rather than a
    /// tradable security; the quote service marks indexes with a leading `^`.
    pub fn is_index(&self) -> bool {
        self.ticker.starts_with('^')
    }

    /// Cost of acquisition: shares times average price.
    pub fn book_value(&self) -> Decimal {
        Decimal::from(self.shares) * self.average_price
    }
}

impl Display for Stock {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({})", self.ticker, self.exchange)
    }
}

impl Ord for Stock {
    /// Non-index holdings sort before indexes; ties break on name, ticker,
    /// exchange registration order, shares, then average price.
    fn cmp(&self, other: &Self) -> Ordering {
        match (self.is_index(), other.is_index()) {
            (false, true) => Ordering::Less,
            (true, false) => Ordering::Greater,
            _ => self
                .name
                .cmp(&other.name)
                .then_with(|| self.ticker.cmp(&other.ticker))
                .then_with(|| self.exchange.cmp(&other.exchange))
                .then_with(|| self.shares.cmp(&other.shares))
                .then_with(|| self.average_price.cmp(&other.average_price)),
        }
    }
}

impl PartialOrd for Stock {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

fn validate_ticker(ticker: &str) -> Result<(), ValidationError> {
    let len = ticker.chars().count();
    if len == 0 || len > MAX_TICKER_LEN {
        return Err(ValidationError::TickerLength { len });
    }
    for (index, ch) in ticker.chars().enumerate() {
        if !(ch.is_alphabetic() || ch == '.' || ch == '_' || ch == '^') {
            return Err(ValidationError::TickerInvalidChar { ch, index });
        }
    }
    Ok(())
}
