//! Periodic refresh loop.
//!
//! A single task owns the schedule: it reacts to control events from the
//! rest of the application, fires fetches on a timer, and applies each
//! fetch outcome through a caller-supplied closure. Fetches run as
//! independent tasks and are never cancelled; a result that arrives after
//! a period change, or after the control channel has closed, is still
//! applied. The loop ends once the control channel is closed and no fetch
//! remains in flight.

use std::sync::Arc;
use std::time::Duration;

use log::error;
use tokio::sync::mpsc;
use tokio::time::{interval_at, Instant, Interval, MissedTickBehavior};

use tickwatch_core::{FetchError, Quote, QuoteSource, Stock};

/// Control events accepted by the scheduler.
#[derive(Debug)]
pub enum RefreshEvent {
    /// The set of tracked stocks changed; fetch the new set right away.
    InstrumentSetChanged(Vec<Stock>),
    /// The refresh period changed; the next automatic fetch happens one
    /// full new period from now.
    PeriodChanged(Duration),
    /// The user asked for a refresh now.
    ManualRefresh,
}

/// First tracked holding whose fetched price came back as zero.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ZeroPriceWarning {
    pub ticker: String,
    pub exchange: String,
}

/// Outcome of one fetch cycle, handed to the apply closure.
#[derive(Debug)]
pub enum RefreshUpdate {
    Quotes {
        quotes: Vec<Quote>,
        warning: Option<ZeroPriceWarning>,
    },
    Failed {
        message: String,
    },
}

/// Drives the refresh cycle for one portfolio.
pub struct RefreshScheduler {
    source: Arc<dyn QuoteSource>,
    stocks: Vec<Stock>,
    period: Duration,
    show_progress: bool,
}

impl RefreshScheduler {
    pub fn new(
        source: Arc<dyn QuoteSource>,
        stocks: Vec<Stock>,
        period: Duration,
        show_progress: bool,
    ) -> Self {
        Self {
            source,
            stocks,
            period,
            show_progress,
        }
    }

    /// Run the loop until `events` closes and all in-flight fetches have
    /// reported back.
    pub async fn run(
        mut self,
        mut events: mpsc::Receiver<RefreshEvent>,
        mut apply: impl FnMut(RefreshUpdate),
    ) {
        let (outcome_tx, mut outcomes) =
            mpsc::channel::<Result<Vec<Quote>, FetchError>>(8);
        let mut timer = new_timer(self.period);
        let mut in_flight: usize = 0;
        let mut events_closed = false;

        loop {
            tokio::select! {
                _ = timer.tick(), if !events_closed => {
                    self.spawn_fetch(&outcome_tx, &mut in_flight);
                }
                event = events.recv(), if !events_closed => {
                    match event {
                        Some(RefreshEvent::ManualRefresh) => {
                            self.spawn_fetch(&outcome_tx, &mut in_flight);
                        }
                        Some(RefreshEvent::InstrumentSetChanged(stocks)) => {
                            self.stocks = stocks;
                            self.spawn_fetch(&outcome_tx, &mut in_flight);
                        }
                        Some(RefreshEvent::PeriodChanged(period)) => {
                            self.period = period;
                            timer = new_timer(period);
                        }
                        None => {
                            events_closed = true;
                            if in_flight == 0 {
                                break;
                            }
                        }
                    }
                }
                Some(outcome) = outcomes.recv() => {
                    in_flight -= 1;
                    match outcome {
                        Ok(quotes) => {
                            let warning = first_zero_price(&quotes);
                            apply(RefreshUpdate::Quotes { quotes, warning });
                        }
                        Err(err) => {
                            error!("quote fetch failed: {err}");
                            apply(RefreshUpdate::Failed {
                                message: err.to_string(),
                            });
                        }
                    }
                    if events_closed && in_flight == 0 {
                        break;
                    }
                }
            }
        }
    }

    fn spawn_fetch(
        &self,
        outcome_tx: &mpsc::Sender<Result<Vec<Quote>, FetchError>>,
        in_flight: &mut usize,
    ) {
        *in_flight += 1;
        let source = Arc::clone(&self.source);
        let stocks = self.stocks.clone();
        let show_progress = self.show_progress;
        let outcome_tx = outcome_tx.clone();
        tokio::spawn(async move {
            let outcome = source.quotes(&stocks, show_progress).await;
            let _ = outcome_tx.send(outcome).await;
        });
    }
}

fn new_timer(period: Duration) -> Interval {
    // First automatic fetch one full period from now, not immediately.
    let mut timer = interval_at(Instant::now() + period, period);
    timer.set_missed_tick_behavior(MissedTickBehavior::Delay);
    timer
}

/// Scan a fetched batch for the first holding with no price.
pub fn first_zero_price(quotes: &[Quote]) -> Option<ZeroPriceWarning> {
    quotes
        .iter()
        .find(|quote| quote.price().is_zero())
        .map(|quote| ZeroPriceWarning {
            ticker: quote.stock().ticker().to_owned(),
            exchange: quote.stock().exchange().name().to_owned(),
        })
}
