//! Portfolio file parsing.
//!
//! One holding per line, colon-separated:
//!
//! ```text
//! # ticker : name : exchange name : shares : average price
//! PEP:Pepsi:NYSE Stock Exchanges:100:5.25
//! ^DJI:Dow Jones Industrial Average:NYSE Stock Exchanges:0:0
//! ```
//!
//! Exchange names are resolved against the registry; a name the registry
//! does not know fails the whole load.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use rust_decimal::Decimal;
use thiserror::Error;

use tickwatch_core::{ExchangeRegistry, RegistryError, Stock, ValidationError};

const COMMENT_CHAR: char = '#';
const FIELD_COUNT: usize = 5;

/// Errors raised while loading the portfolio file.
#[derive(Debug, Error)]
pub enum PortfolioError {
    #[error("cannot read portfolio file")]
    Io(#[from] std::io::Error),

    #[error("portfolio line needs {FIELD_COUNT} colon-separated fields: '{line}'")]
    MalformedLine { line: String },

    #[error("cannot parse number in portfolio line: '{line}'")]
    InvalidNumber { line: String },

    #[error(transparent)]
    Registry(#[from] RegistryError),

    #[error("invalid holding in portfolio line '{line}': {source}")]
    InvalidStock {
        line: String,
        source: ValidationError,
    },
}

/// The set of tracked holdings, sorted for display.
#[derive(Debug, Clone)]
pub struct Portfolio {
    stocks: Vec<Stock>,
}

impl Portfolio {
    /// Load the portfolio from the file at `path`.
    pub fn from_path(
        path: impl AsRef<Path>,
        registry: &ExchangeRegistry,
    ) -> Result<Self, PortfolioError> {
        let file = File::open(path)?;
        Self::from_reader(BufReader::new(file), registry)
    }

    /// Load the portfolio from any line-oriented reader.
    pub fn from_reader(
        reader: impl BufRead,
        registry: &ExchangeRegistry,
    ) -> Result<Self, PortfolioError> {
        let mut stocks = Vec::new();
        for line in reader.lines() {
            let line = line?;
            if line.trim().is_empty() || line.starts_with(COMMENT_CHAR) {
                continue;
            }
            stocks.push(parse_stock(&line, registry)?);
        }
        stocks.sort();
        Ok(Self { stocks })
    }

    /// All holdings, non-indexes first.
    pub fn stocks(&self) -> &[Stock] {
        &self.stocks
    }

    pub fn len(&self) -> usize {
        self.stocks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stocks.is_empty()
    }
}

fn parse_stock(line: &str, registry: &ExchangeRegistry) -> Result<Stock, PortfolioError> {
    let fields: Vec<&str> = line.split(':').map(str::trim).collect();
    let [ticker, name, exchange_name, shares, average_price] = fields[..] else {
        return Err(PortfolioError::MalformedLine {
            line: line.to_owned(),
        });
    };

    let exchange = registry.lookup(exchange_name)?.clone();
    let invalid_number = || PortfolioError::InvalidNumber {
        line: line.to_owned(),
    };
    let shares: i32 = shares.parse().map_err(|_| invalid_number())?;
    let average_price: Decimal = average_price.parse().map_err(|_| invalid_number())?;

    Stock::new(name, ticker, exchange, shares, average_price).map_err(|source| {
        PortfolioError::InvalidStock {
            line: line.to_owned(),
            source,
        }
    })
}
