use thiserror::Error;

use crate::http_client::HttpError;

/// Construction errors for registry value types.
///
/// These indicate a caller passing arguments that violate the documented
/// contracts; callers propagate them fatally rather than recovering.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("stock name must have content")]
    EmptyName,
    #[error("ticker must have 1..=20 characters, got {len}")]
    TickerLength { len: usize },
    #[error("ticker contains invalid character '{ch}' at index {index}")]
    TickerInvalidChar { ch: char, index: usize },
    #[error("average price must be zero or positive")]
    NegativeAveragePrice,
    #[error("quote price must be zero or positive")]
    NegativePrice,
}

/// Errors raised while loading or querying the exchange registry.
#[derive(Debug, Error)]
pub enum RegistryError {
    #[error("cannot read exchange resource")]
    Io(#[from] std::io::Error),

    #[error("malformed exchange line: '{line}'")]
    MalformedLine { line: String },

    #[error("unknown exchange name: '{name}'")]
    UnknownExchange { name: String },
}

/// Errors raised by a quote fetch.
///
/// Parse anomalies are deliberately absent here: a response line that fails
/// to parse is logged severe and replaced by a best-effort quote, so a batch
/// either fails as a whole (before or during transport) or succeeds.
#[derive(Debug, Error)]
pub enum FetchError {
    /// The request target could not be formed; nothing was sent.
    #[error("cannot build quote request url: {url}")]
    RequestBuild { url: String },

    /// The network call failed; the message is suitable for the end user.
    #[error("cannot reach the quote service - please check your connection")]
    Transport {
        #[source]
        source: HttpError,
    },
}
