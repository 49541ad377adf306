//! Per-fetch-cycle price snapshots.

use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

use crate::domain::Stock;
use crate::error::ValidationError;
use crate::money::MONEY_DECIMALS;

/// Decimal places carried by intermediate percentage divisions.
const PERCENT_INTERMEDIATE_DECIMALS: u32 = 4;

/// Percentages round half-even, unlike stored monetary values.
const PERCENT_ROUNDING: RoundingStrategy = RoundingStrategy::MidpointNearestEven;

/// Immutable snapshot pairing one [`Stock`] with the price and signed price
/// change observed in a single fetch cycle.
///
/// Quotes are created fresh each cycle, replaced wholesale on the next
/// successful fetch, and never persisted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Quote {
    stock: Stock,
    price: Decimal,
    change: Decimal,
}

impl Quote {
    /// Build a snapshot. `price` must be zero or positive; `change` may
    /// carry any sign.
    pub fn new(stock: Stock, price: Decimal, change: Decimal) -> Result<Self, ValidationError> {
        if price.is_sign_negative() && !price.is_zero() {
            return Err(ValidationError::NegativePrice);
        }
        Ok(Self {
            stock,
            price,
            change,
        })
    }

    /// Zero-price placeholder used when the service has no data for a
    /// position in a batch.
    pub fn empty(stock: Stock) -> Self {
        Self {
            stock,
            price: Decimal::ZERO,
            change: Decimal::ZERO,
        }
    }

    pub fn stock(&self) -> &Stock {
        &self.stock
    }

    pub fn price(&self) -> Decimal {
        self.price
    }

    pub fn change(&self) -> Decimal {
        self.change
    }

    /// Price at the open of the trading day: current price less the change.
    pub fn opening_price(&self) -> Decimal {
        self.price - self.change
    }

    /// Percentage change between the opening and current price, or zero
    /// when the price itself is zero.
    ///
    /// Example: price 1.00 with change 0.20 yields 25.00.
    pub fn percent_change(&self) -> Decimal {
        if self.price.is_zero() {
            return zero_percent();
        }
        percent_of(self.change, self.opening_price())
    }

    /// Value of the holding at the current price: shares times price.
    pub fn current_value(&self) -> Decimal {
        Decimal::from(self.stock.shares()) * self.price
    }

    /// Current value less the holding's book value.
    pub fn profit(&self) -> Decimal {
        self.current_value() - self.stock.book_value()
    }

    /// Profit as a percentage of book value.
    ///
    /// Returns zero when the book value is zero or when the price is zero.
    /// The price guard is intentional: a missing quote must not report a
    /// 100% loss on a real holding.
    pub fn percent_profit(&self) -> Decimal {
        let book_value = self.stock.book_value();
        if book_value.is_zero() || self.price.is_zero() {
            return zero_percent();
        }
        percent_of(self.profit(), book_value)
    }
}

fn percent_of(part: Decimal, whole: Decimal) -> Decimal {
    let ratio = part
        .checked_div(whole)
        .unwrap_or(Decimal::ZERO)
        .round_dp_with_strategy(PERCENT_INTERMEDIATE_DECIMALS, PERCENT_ROUNDING);
    (ratio * Decimal::ONE_HUNDRED).round_dp_with_strategy(MONEY_DECIMALS, PERCENT_ROUNDING)
}

fn zero_percent() -> Decimal {
    Decimal::new(0, MONEY_DECIMALS)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Exchange;
    use rust_decimal_macros::dec;

    fn nyse() -> Exchange {
        let registry = crate::ExchangeRegistry::from_reader(std::io::Cursor::new(
            "NYSE Stock Exchanges\t(NYS)\tN/A\n",
        ))
        .expect("resource should parse");
        registry.exchanges()[0].clone()
    }

    fn stock(shares: i32, average_price: Decimal) -> Stock {
        Stock::new("Pepsi", "PEP", nyse(), shares, average_price).expect("valid stock")
    }

    #[test]
    fn rejects_negative_price_but_allows_negative_change() {
        let err = Quote::new(stock(100, dec!(5.25)), dec!(-0.01), dec!(0)).expect_err("must fail");
        assert!(matches!(err, ValidationError::NegativePrice));
        assert!(Quote::new(stock(100, dec!(5.25)), dec!(0), dec!(-0.20)).is_ok());
    }

    #[test]
    fn percent_change_against_the_opening_price() {
        let quote = Quote::new(stock(100, dec!(5.25)), dec!(1.00), dec!(0.20)).expect("valid");
        assert_eq!(quote.percent_change(), dec!(25.00));

        let quote = Quote::new(stock(100, dec!(5.25)), dec!(0.80), dec!(-0.20)).expect("valid");
        assert_eq!(quote.percent_change(), dec!(-20.00));

        let quote = Quote::new(stock(100, dec!(5.25)), dec!(118.53), dec!(-0.17)).expect("valid");
        assert_eq!(quote.percent_change(), dec!(-0.14));
    }

    #[test]
    fn percent_change_is_zero_when_the_price_is_zero() {
        // The guard is on the price, not the opening price: a zero price
        // with a non-zero change leaves a non-zero opening price behind.
        let quote = Quote::new(stock(100, dec!(5.25)), dec!(0.00), dec!(-0.20)).expect("valid");
        assert_eq!(quote.opening_price(), dec!(0.20));
        assert_eq!(quote.percent_change(), dec!(0.00));
    }

    #[test]
    fn current_value_and_profit() {
        let quote = Quote::new(stock(122, dec!(88.00)), dec!(118.53), dec!(-0.17)).expect("valid");
        assert_eq!(quote.current_value(), dec!(14460.66));
        assert_eq!(quote.profit(), dec!(3724.66));
    }

    #[test]
    fn percent_profit_against_book_value() {
        let quote = Quote::new(stock(100, dec!(5.25)), dec!(6.30), dec!(-0.10)).expect("valid");
        assert_eq!(quote.percent_profit(), dec!(20.00));
    }

    #[test]
    fn percent_profit_zero_guards() {
        // Zero book value.
        let quote = Quote::new(stock(0, dec!(0.00)), dec!(6.30), dec!(-0.10)).expect("valid");
        assert_eq!(quote.percent_profit(), dec!(0.00));

        // Zero price on a real holding must not read as a total loss.
        let quote = Quote::new(stock(100, dec!(5.25)), dec!(0.00), dec!(0)).expect("valid");
        assert_eq!(quote.percent_profit(), dec!(0.00));
    }

    #[test]
    fn empty_quote_is_all_zeroes() {
        let quote = Quote::empty(stock(100, dec!(5.25)));
        assert_eq!(quote.price(), Decimal::ZERO);
        assert_eq!(quote.change(), Decimal::ZERO);
        assert_eq!(quote.percent_change(), dec!(0.00));
    }
}
