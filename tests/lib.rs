//! Shared fixtures for behavior tests.

use std::future::Future;
use std::io::Cursor;
use std::pin::Pin;
use std::sync::Mutex;

use rust_decimal::Decimal;
use tickwatch_core::{
    ExchangeRegistry, HttpClient, HttpError, HttpRequest, HttpResponse, Stock,
};

pub const EXCHANGES: &str = "\
# venues known to the quote service
NYSE Stock Exchanges\t(NYS)\tN/A
Nasdaq Stock Exchange\t(NAS)\tN/A
Toronto Stock Exchange\t(TSE)\t.TO
";

pub fn registry() -> ExchangeRegistry {
    ExchangeRegistry::from_reader(Cursor::new(EXCHANGES)).expect("exchange resource should parse")
}

pub fn stock(
    registry: &ExchangeRegistry,
    ticker: &str,
    exchange_name: &str,
    shares: i32,
    average_price: Decimal,
) -> Stock {
    let exchange = registry
        .lookup(exchange_name)
        .expect("known exchange")
        .clone();
    Stock::new(format!("{ticker} Holdings"), ticker, exchange, shares, average_price)
        .expect("valid stock")
}

/// Canned HTTP transport that records every request it receives.
pub struct ScriptedHttpClient {
    response: Result<HttpResponse, HttpError>,
    requests: Mutex<Vec<HttpRequest>>,
}

impl ScriptedHttpClient {
    pub fn with_body(body: &str) -> Self {
        Self {
            response: Ok(HttpResponse::ok_text(body)),
            requests: Mutex::new(Vec::new()),
        }
    }

    pub fn with_status(status: u16) -> Self {
        Self {
            response: Ok(HttpResponse {
                status,
                body: String::new(),
            }),
            requests: Mutex::new(Vec::new()),
        }
    }

    pub fn failing(message: &str) -> Self {
        Self {
            response: Err(HttpError::new(message)),
            requests: Mutex::new(Vec::new()),
        }
    }

    pub fn recorded_requests(&self) -> Vec<HttpRequest> {
        self.requests
            .lock()
            .expect("request store should not be poisoned")
            .clone()
    }
}

impl HttpClient for ScriptedHttpClient {
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
