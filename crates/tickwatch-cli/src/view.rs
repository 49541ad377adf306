//! Table and status-line rendering.

use std::fmt::Write as _;

use rust_decimal::Decimal;
use time::format_description::well_known::Rfc2822;
use time::OffsetDateTime;

use tickwatch_core::Quote;

use crate::scheduler::ZeroPriceWarning;

/// Render one table of quotes with a totals row.
///
/// Indexes carry no shares, so they contribute nothing to the totals.
pub fn render_table(quotes: &[Quote]) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "{:<10} {:>12} {:>9} {:>8} {:>14} {:>14}",
        "Ticker", "Price", "Change", "%Change", "Value", "Profit"
    );

    let mut total_value = Decimal::ZERO;
    let mut total_profit = Decimal::ZERO;
    for quote in quotes {
        total_value += quote.current_value();
        total_profit += quote.profit();
        let _ = writeln!(
            out,
            "{:<10} {:>12} {:>9} {:>8} {:>14} {:>14}",
            quote.stock().ticker(),
            quote.price(),
            quote.change(),
            quote.percent_change(),
            quote.current_value(),
            quote.profit(),
        );
    }
    let _ = writeln!(
        out,
        "{:<10} {:>12} {:>9} {:>8} {:>14} {:>14}",
        "Total", "", "", "", total_value, total_profit
    );
    out
}

/// Status line for a finished refresh.
///
/// A zero-price warning replaces the plain success message; the two are
/// never shown together.
pub fn refresh_status(warning: Option<&ZeroPriceWarning>) -> String {
    match warning {
        Some(warning) => zero_price_warning(warning),
        None => status_done(),
    }
}

/// Status line after a successful refresh.
fn status_done() -> String {
    let now = OffsetDateTime::now_utc();
    match now.format(&Rfc2822) {
        Ok(timestamp) => format!("Done. Last updated {timestamp}."),
        Err(_) => String::from("Done."),
    }
}

/// Status line for a holding the service has no price for.
fn zero_price_warning(warning: &ZeroPriceWarning) -> String {
    format!(
        "Warning - no price for ticker {} ({})",
        warning.ticker, warning.exchange
    )
}

/// Status line after a failed refresh.
pub fn status_failed(message: &str) -> String {
    format!("Refresh failed: {message}")
}
