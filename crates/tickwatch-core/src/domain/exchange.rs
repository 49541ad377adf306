//! Trading-venue registry loaded once at startup.
//!
//! The registry is built from a plain-text tabular resource and then passed
//! by reference to whoever needs it; there is no process-wide singleton.
//! The resource format, one venue per line:
//!
//! ```text
//! # comment
//! NYSE Stock Exchanges<TAB>(NYS)<TAB>N/A
//! Toronto Stock Exchange<TAB>(TSE)<TAB>.TO
//! ```
//!
//! The abbreviation column is read and discarded; `N/A` in the suffix column
//! means the venue's tickers carry no qualifying suffix.

use std::cmp::Ordering;
use std::fmt::{Display, Formatter};
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::RegistryError;

const COMMENT_CHAR: char = '#';
const NOT_AVAILABLE: &str = "N/A";

/// A named trading venue with the suffix used to qualify its tickers in
/// outbound quote requests.
///
/// The full name is the identifier; the suffix is an internal detail never
/// shown to the end user. Exchanges order by registration position.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Exchange {
    name: String,
    ticker_suffix: String,
    order: usize,
}

impl Exchange {
    /// Full display name of the venue.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Suffix appended to tickers in requests, excluding the dot; empty for
    /// venues that need no qualification.
    pub fn ticker_suffix(&self) -> &str {
        &self.ticker_suffix
    }

    /// Position of this venue in the registry's resource file.
    pub fn order(&self) -> usize {
        self.order
    }
}

impl Display for Exchange {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.name)
    }
}

impl Ord for Exchange {
    fn cmp(&self, other: &Self) -> Ordering {
        self.order.cmp(&other.order)
    }
}

impl PartialOrd for Exchange {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Read-only table of every known exchange, in resource order.
#[derive(Debug, Clone)]
pub struct ExchangeRegistry {
    exchanges: Vec<Exchange>,
}

impl ExchangeRegistry {
    /// Load the registry from a resource file at `path`.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, RegistryError> {
        let file = File::open(path)?;
        Self::from_reader(BufReader::new(file))
    }

    /// Load the registry from any line-oriented reader.
    pub fn from_reader(reader: impl BufRead) -> Result<Self, RegistryError> {
        let mut exchanges = Vec::new();
        for line in reader.lines() {
            let line = line?;
            if line.trim().is_empty() || line.starts_with(COMMENT_CHAR) {
                continue;
            }
            exchanges.push(parse_exchange(&line, exchanges.len())?);
        }
        Ok(Self { exchanges })
    }

    /// Find the exchange whose full name equals `name` exactly.
    ///
    /// The list is small, so a linear scan is fine.
    pub fn lookup(&self, name: &str) -> Result<&Exchange, RegistryError> {
        self.exchanges
            .iter()
            .find(|exchange| exchange.name == name)
            .ok_or_else(|| RegistryError::UnknownExchange {
                name: name.to_owned(),
            })
    }

    /// All registered exchanges, in resource order.
    pub fn exchanges(&self) -> &[Exchange] {
        &self.exchanges
    }

    pub fn len(&self) -> usize {
        self.exchanges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.exchanges.is_empty()
    }
}

fn parse_exchange(line: &str, order: usize) -> Result<Exchange, RegistryError> {
    let mut fields = line.split('\t').filter(|field| !field.is_empty());
    let malformed = || RegistryError::MalformedLine {
        line: line.to_owned(),
    };

    let name = fields.next().ok_or_else(malformed)?.trim().to_owned();
    // Abbreviation column, unused.
    fields.next().ok_or_else(malformed)?;
    let raw_suffix = fields.next().ok_or_else(malformed)?.trim();

    let ticker_suffix = if raw_suffix == NOT_AVAILABLE {
        String::new()
    } else {
        raw_suffix.strip_prefix('.').unwrap_or(raw_suffix).to_owned()
    };

    Ok(Exchange {
        name,
        ticker_suffix,
        order,
    })
}
