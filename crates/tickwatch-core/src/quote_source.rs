//! Client for the text quote service.
//!
//! One batch request per refresh cycle: every tracked ticker goes into a
//! single comma-separated URL, and the service answers with one CSV line per
//! ticker, in request order. Correlation is positional. A line that fails to
//! parse degrades that one quote to zeroes instead of failing the batch;
//! only transport-level problems surface as errors.

use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

use log::{error, info};
use rust_decimal::Decimal;

use crate::domain::{Quote, Stock};
use crate::error::FetchError;
use crate::http_client::{HttpClient, HttpError, HttpRequest};
use crate::money::{parse_change, parse_price, round_money};

/// Leading portion of the quote service URL, up to the ticker list.
pub const QUOTE_URL_START: &str = "http://quote.yahoo.com/d/quotes.csv?s=";

/// Trailing portion of the quote service URL: the field list `s` (ticker),
/// `l1` (price), `d1`, `t1`, `c1` (change), `o`, `h`, `g`, `v`.
pub const QUOTE_URL_END: &str = "&f=sl1d1t1c1ohgv&e=.csv";

const TICKER_FIELD: usize = 0;
const PRICE_FIELD: usize = 1;
const CHANGE_FIELD: usize = 4;

/// Provider of one quote per tracked stock.
///
/// Implementations must return quotes in the same order as the input slice.
pub trait QuoteSource: Send + Sync {
    fn quotes<'a>(
        &'a self,
        stocks: &'a [Stock],
        show_progress: bool,
    ) -> Pin<Box<dyn Future<Output = Result<Vec<Quote>, FetchError>> + Send + 'a>>;
}

/// Production source that fetches and parses the service's CSV payload.
#[derive(Clone)]
pub struct CsvQuoteSource {
    http_client: Arc<dyn HttpClient>,
}

impl CsvQuoteSource {
    pub fn new(http_client: Arc<dyn HttpClient>) -> Self {
        Self { http_client }
    }

    /// Build the batch request URL for `stocks`.
    ///
    /// Each ticker is qualified with its exchange suffix where one exists,
    /// then percent-encoded; the separating commas stay literal so the
    /// service sees a list.
    fn request_url(stocks: &[Stock]) -> String {
        let tickers = stocks
            .iter()
            .map(|stock| urlencoding::encode(&qualified_ticker(stock)).into_owned())
            .collect::<Vec<_>>()
            .join(",");
        format!("{QUOTE_URL_START}{tickers}{QUOTE_URL_END}")
    }
}

impl QuoteSource for CsvQuoteSource {
    fn quotes<'a>(
        &'a self,
        stocks: &'a [Stock],
        show_progress: bool,
    ) -> Pin<Box<dyn Future<Output = Result<Vec<Quote>, FetchError>> + Send + 'a>> {
        Box::pin(async move {
            if stocks.is_empty() {
                return Ok(Vec::new());
            }

            let url = Self::request_url(stocks);
            if reqwest::Url::parse(&url).is_err() {
                error!("malformed quote request url: {url}");
                return Err(FetchError::RequestBuild { url });
            }
            if show_progress {
                info!("fetching quotes for {} stocks", stocks.len());
            }

            let response = self
                .http_client
                .execute(HttpRequest::get(&url))
                .await
                .map_err(|source| FetchError::Transport { source })?;
            if !response.is_success() {
                return Err(FetchError::Transport {
                    source: HttpError::new(format!(
                        "quote service returned status {}",
                        response.status
                    )),
                });
            }

            let lines: Vec<&str> = response.body.lines().collect();
            let quotes = stocks
                .iter()
                .enumerate()
                .map(|(index, stock)| match lines.get(index) {
                    Some(line) => parse_quote_line(stock, line),
                    None => {
                        error!("no response line for {stock}");
                        Quote::empty(stock.clone())
                    }
                })
                .collect();
            Ok(quotes)
        })
    }
}

/// Offline source that answers every stock with a fixed quote, for running
/// the application without network access.
#[derive(Debug, Clone, Default)]
pub struct FixedQuoteSource;

impl QuoteSource for FixedQuoteSource {
    fn quotes<'a>(
        &'a self,
        stocks: &'a [Stock],
        show_progress: bool,
    ) -> Pin<Box<dyn Future<Output = Result<Vec<Quote>, FetchError>> + Send + 'a>> {
        Box::pin(async move {
            if show_progress {
                info!("offline mode, returning fixed quotes for {} stocks", stocks.len());
            }
            let price = Decimal::new(1000, 2);
            let change = Decimal::new(-75, 2);
            Ok(stocks
                .iter()
                .map(|stock| {
                    Quote::new(stock.clone(), price, change)
                        .unwrap_or_else(|_| Quote::empty(stock.clone()))
                })
                .collect())
        })
    }
}

fn qualified_ticker(stock: &Stock) -> String {
    let suffix = stock.exchange().ticker_suffix();
    if suffix.is_empty() {
        stock.ticker().to_owned()
    } else {
        format!("{}.{}", stock.ticker(), suffix)
    }
}

/// Parse one CSV line into a quote for `stock`.
///
/// Every anomaly is logged severe and mapped to a zero value so the rest of
/// the batch stays usable.
fn parse_quote_line(stock: &Stock, line: &str) -> Quote {
    let fields: Vec<&str> = line.split(',').collect();

    // The service may echo the bare ticker or the suffix-qualified form, so
    // correlation only asks for a prefix match.
    let service_ticker = fields
        .get(TICKER_FIELD)
        .map(|field| field.trim().trim_matches('"'))
        .unwrap_or_default();
    if !service_ticker.starts_with(stock.ticker()) {
        error!(
            "response ticker '{service_ticker}' does not match requested '{}'",
            stock.ticker()
        );
    }

    let price = match fields.get(PRICE_FIELD).map(|field| parse_price(field)) {
        Some(Ok(value)) if !value.is_sign_negative() || value.is_zero() => round_money(value),
        Some(Ok(value)) => {
            error!("negative price {value} for {stock}");
            Decimal::ZERO
        }
        Some(Err(err)) => {
            error!("unparseable price for {stock}: {err}");
            Decimal::ZERO
        }
        None => {
            error!("missing price field for {stock}");
            Decimal::ZERO
        }
    };

    let change = match fields.get(CHANGE_FIELD).map(|field| parse_change(field)) {
        Some(Ok(value)) => round_money(value),
        Some(Err(err)) => {
            error!("unparseable price change for {stock}: {err}");
            Decimal::ZERO
        }
        None => {
            error!("missing price change field for {stock}");
            Decimal::ZERO
        }
    };

    Quote::new(stock.clone(), price, change).unwrap_or_else(|_| Quote::empty(stock.clone()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Exchange, ExchangeRegistry};
    use crate::http_client::HttpResponse;
    use rust_decimal_macros::dec;
    use std::io::Cursor;
    use std::sync::Mutex;

    const RESOURCE: &str = "\
NYSE Stock Exchanges\t(NYS)\tN/A
Toronto Stock Exchange\t(TSE)\t.TO
";

    #[derive(Debug)]
    struct RecordingHttpClient {
        response: Result<HttpResponse, HttpError>,
        requests: Mutex<Vec<HttpRequest>>,
    }

    impl RecordingHttpClient {
        fn with_body(body: &str) -> Self {
            Self {
                response: Ok(HttpResponse::ok_text(body)),
                requests: Mutex::new(Vec::new()),
            }
        }

        fn failure() -> Self {
            Self {
                response: Err(HttpError::new("upstream timeout")),
                requests: Mutex::new(Vec::new()),
            }
        }

        fn recorded_requests(&self) -> Vec<HttpRequest> {
            self.requests
                .lock()
                .expect("request store should not be poisoned")
                .clone()
        }
    }

    impl HttpClient for RecordingHttpClient {
        fn execute<'a>(
            &'a self,
            request: HttpRequest,
        ) -> Pin<Box<dyn Future<Output = Result<HttpResponse, HttpError>> + Send + 'a>> {
            self.requests
                .lock()
                .expect("request store should not be poisoned")
                .push(request);
            let response = self.response.clone();
            Box::pin(async move { response })
        }
    }

    fn registry() -> ExchangeRegistry {
        ExchangeRegistry::from_reader(Cursor::new(RESOURCE)).expect("resource should parse")
    }

    fn stock(ticker: &str, exchange: &Exchange) -> Stock {
        Stock::new(format!("{ticker} Corp"), ticker, exchange.clone(), 100, dec!(10.00))
            .expect("valid stock")
    }

    #[tokio::test]
    async fn builds_one_batch_url_with_qualified_encoded_tickers() {
        let registry = registry();
        let nyse = registry.lookup("NYSE Stock Exchanges").expect("known venue");
        let tse = registry
            .lookup("Toronto Stock Exchange")
            .expect("known venue");
        let stocks = vec![stock("PEP", nyse), stock("NT", tse), stock("^DJI", nyse)];

        let client = Arc::new(RecordingHttpClient::with_body(
            "\"PEP\",78.625,\"8/20\",\"4:00PM\",-0.25,79.00,79.10,78.00,1000\n\
             \"NT.TO\",12 1/2,\"8/20\",\"4:00PM\",+1/4,12.00,12.60,11.90,500\n\
             \"^DJI\",9000.50,\"8/20\",\"4:00PM\",+10.00,8990.00,9010.00,8980.00,0\n",
        ));
        let source = CsvQuoteSource::new(client.clone());

        let quotes = source.quotes(&stocks, false).await.expect("fetch succeeds");
        assert_eq!(quotes.len(), 3);

        let requests = client.recorded_requests();
        assert_eq!(requests.len(), 1);
        assert_eq!(
            requests[0].url,
            format!("{QUOTE_URL_START}PEP,NT.TO,%5EDJI{QUOTE_URL_END}")
        );
    }

    #[tokio::test]
    async fn parses_prices_and_changes_in_request_order() {
        let registry = registry();
        let nyse = registry.lookup("NYSE Stock Exchanges").expect("known venue");
        let stocks = vec![stock("PEP", nyse), stock("IBM", nyse)];

        let client = Arc::new(RecordingHttpClient::with_body(
            "\"PEP\",78 5/8,\"8/20\",\"4:00PM\",-5 1/4,79.00,79.10,78.00,1000\n\
             \"IBM\",.01,\"8/20\",\"4:00PM\",0.00,0.01,0.02,0.01,10\n",
        ));
        let source = CsvQuoteSource::new(client);

        let quotes = source.quotes(&stocks, false).await.expect("fetch succeeds");
        assert_eq!(quotes[0].price(), dec!(78.63));
        assert_eq!(quotes[0].change(), dec!(-5.25));
        assert_eq!(quotes[1].price(), dec!(0.01));
        assert_eq!(quotes[1].change(), Decimal::ZERO);
    }

    #[tokio::test]
    async fn unavailable_fields_degrade_to_zero_values() {
        let registry = registry();
        let nyse = registry.lookup("NYSE Stock Exchanges").expect("known venue");
        let stocks = vec![stock("GONE", nyse)];

        let client = Arc::new(RecordingHttpClient::with_body(
            "\"GONE\",N/A,N/A,N/A,N/A,N/A,N/A,N/A,N/A\n",
        ));
        let source = CsvQuoteSource::new(client);

        let quotes = source.quotes(&stocks, false).await.expect("fetch succeeds");
        assert_eq!(quotes[0].price(), Decimal::ZERO);
        assert_eq!(quotes[0].change(), Decimal::ZERO);
    }

    #[tokio::test]
    async fn bare_ticker_echo_for_a_suffixed_request_still_correlates() {
        let registry = registry();
        let tse = registry
            .lookup("Toronto Stock Exchange")
            .expect("known venue");
        let stocks = vec![stock("NT", tse)];

        // Requested NT.TO, echoed back without the suffix.
        let client = Arc::new(RecordingHttpClient::with_body(
            "\"NT\",12 1/2,\"8/20\",\"4:00PM\",+1/4,12.00,12.60,11.90,500\n",
        ));
        let source = CsvQuoteSource::new(client);

        let quotes = source.quotes(&stocks, false).await.expect("fetch succeeds");
        assert_eq!(quotes[0].price(), dec!(12.50));
        assert_eq!(quotes[0].change(), dec!(0.25));
    }

    #[tokio::test]
    async fn short_response_still_yields_one_quote_per_stock() {
        let registry = registry();
        let nyse = registry.lookup("NYSE Stock Exchanges").expect("known venue");
        let stocks = vec![stock("PEP", nyse), stock("IBM", nyse)];

        let client = Arc::new(RecordingHttpClient::with_body(
            "\"PEP\",78.625,\"8/20\",\"4:00PM\",-0.25,79.00,79.10,78.00,1000\n",
        ));
        let source = CsvQuoteSource::new(client);

        let quotes = source.quotes(&stocks, false).await.expect("fetch succeeds");
        assert_eq!(quotes.len(), 2);
        assert_eq!(quotes[1].price(), Decimal::ZERO);
    }

    #[tokio::test]
    async fn empty_stock_list_skips_the_network() {
        let client = Arc::new(RecordingHttpClient::with_body(""));
        let source = CsvQuoteSource::new(client.clone());

        let quotes = source.quotes(&[], true).await.expect("fetch succeeds");
        assert!(quotes.is_empty());
        assert!(client.recorded_requests().is_empty());
    }

    #[tokio::test]
    async fn transport_failures_surface_as_fetch_errors() {
        let registry = registry();
        let nyse = registry.lookup("NYSE Stock Exchanges").expect("known venue");
        let stocks = vec![stock("PEP", nyse)];

        let source = CsvQuoteSource::new(Arc::new(RecordingHttpClient::failure()));
        let err = source.quotes(&stocks, false).await.expect_err("must fail");
        assert!(matches!(err, FetchError::Transport { .. }));
    }

    #[tokio::test]
    async fn non_success_status_is_a_transport_error() {
        let registry = registry();
        let nyse = registry.lookup("NYSE Stock Exchanges").expect("known venue");
        let stocks = vec![stock("PEP", nyse)];

        let client = Arc::new(RecordingHttpClient {
            response: Ok(HttpResponse {
                status: 503,
                body: String::new(),
            }),
            requests: Mutex::new(Vec::new()),
        });
        let source = CsvQuoteSource::new(client);

        let err = source.quotes(&stocks, false).await.expect_err("must fail");
        assert!(matches!(err, FetchError::Transport { .. }));
    }

    #[tokio::test]
    async fn fixed_source_answers_without_the_network() {
        let registry = registry();
        let nyse = registry.lookup("NYSE Stock Exchanges").expect("known venue");
        let stocks = vec![stock("PEP", nyse), stock("IBM", nyse)];

        let quotes = FixedQuoteSource
            .quotes(&stocks, false)
            .await
            .expect("fetch succeeds");
        assert_eq!(quotes.len(), 2);
        assert_eq!(quotes[0].price(), dec!(10.00));
        assert_eq!(quotes[0].change(), dec!(-0.75));
    }
}
