//! Grammar for the monetary fields of the text quote service.
//!
//! Prices arrive in four forms: `78.625`, `78 5/8`, `5/8`, and `.01`. Price
//! changes are an algebraic sign followed by a price, with the unsigned
//! forms `0` and `0.00` appearing on non-trading days.

use rust_decimal::{Decimal, RoundingStrategy};
use thiserror::Error;

/// Decimal places carried by every stored monetary value.
pub const MONEY_DECIMALS: u32 = 2;

/// Rounding applied to monetary values.
pub const MONEY_ROUNDING: RoundingStrategy = RoundingStrategy::MidpointAwayFromZero;

/// Intermediate precision for the fractional price forms.
const FRACTION_DECIMALS: u32 = 4;

/// A token that fits none of the documented monetary forms.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("cannot parse monetary token: '{token}'")]
pub struct MoneyParseError {
    pub token: String,
}

/// Round a monetary value to its stored precision.
pub fn round_money(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(MONEY_DECIMALS, MONEY_ROUNDING)
}

/// Parse a price token into an unrounded decimal value.
///
/// Fractional forms combine as `dollars + numerator/denominator`, with the
/// fraction evaluated at four decimal places before the caller rounds the
/// whole result to monetary precision.
pub fn parse_price(text: &str) -> Result<Decimal, MoneyParseError> {
    let text = text.trim();
    if !text.contains('/') {
        return parse_decimal_token(text);
    }

    let mut dollars = Decimal::ZERO;
    let mut numerator = Decimal::ZERO;
    let mut denominator = Decimal::ZERO;
    for token in text.split_whitespace() {
        match token.split_once('/') {
            None => dollars = parse_decimal_token(token)?,
            Some((num, den)) => {
                numerator = parse_decimal_token(num)?;
                denominator = parse_decimal_token(den)?;
            }
        }
    }

    if denominator.is_zero() {
        return Ok(dollars);
    }
    let cents = (numerator / denominator).round_dp_with_strategy(FRACTION_DECIMALS, MONEY_ROUNDING);
    Ok(dollars + cents)
}

/// Parse a signed price change.
///
/// A leading `+` or `-` fixes the sign; the absence of either means the
/// change is exactly zero. The magnitude follows the price grammar.
pub fn parse_change(text: &str) -> Result<Decimal, MoneyParseError> {
    let text = text.trim();
    let (negate, magnitude) = match text.strip_prefix('+') {
        Some(rest) => (false, rest),
        None => match text.strip_prefix('-') {
            Some(rest) => (true, rest),
            None => return Ok(Decimal::ZERO),
        },
    };

    let value = parse_price(magnitude)?;
    Ok(if negate { -value } else { value })
}

fn parse_decimal_token(token: &str) -> Result<Decimal, MoneyParseError> {
    // The service emits leading-dot decimals such as ".01".
    let normalized = if token.starts_with('.') {
        format!("0{token}")
    } else {
        token.to_owned()
    };
    normalized.parse().map_err(|_| MoneyParseError {
        token: token.to_owned(),
    })
}
