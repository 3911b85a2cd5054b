use crate::domain::errors::FetchError;
use crate::domain::market::PriceSeries;
use crate::domain::ports::MarketDataProvider;
use chrono::NaiveDate;
use std::sync::Arc;
use tracing::{debug, error, info};

/// A pair the provider could not deliver, with the reason.
#[derive(Debug)]
pub struct FetchFailure {
    pub pair: String,
    pub error: FetchError,
}

/// Result of one fetch pass: the series that arrived, in configured order,
/// and the pairs that did not.
#[derive(Debug, Default)]
pub struct FetchOutcome {
    pub series: Vec<PriceSeries>,
    pub failures: Vec<FetchFailure>,
}

impl From<FetchError> for FetchFailure {
    fn from(error: FetchError) -> Self {
        Self {
            pair: error.pair().to_string(),
            error,
        }
    }
}

impl FetchOutcome {
    /// The set of successfully retrieved pairs. Every later stage iterates
    /// this instead of the configured list.
    pub fn retrieved_pairs(&self) -> Vec<String> {
        self.series.iter().map(|s| s.pair.clone()).collect()
    }

    pub fn failed_pairs(&self) -> Vec<&str> {
        self.failures.iter().map(|f| f.pair.as_str()).collect()
    }
}

/// Downloads closing prices for each configured pair, one request at a time.
pub struct PriceFetcher {
    provider: Arc<dyn MarketDataProvider>,
}

impl PriceFetcher {
    pub fn new(provider: Arc<dyn MarketDataProvider>) -> Self {
        Self { provider }
    }

    /// Fetches every pair sequentially. A failing pair is logged and skipped;
    /// an empty series counts as a failure.
    pub async fn fetch_all(&self, pairs: &[String], start: NaiveDate, end: NaiveDate) -> FetchOutcome {
        let mut outcome = FetchOutcome::default();

        for pair in pairs {
            let result = match self.provider.fetch_daily_closes(pair, start, end).await {
                Ok(series) if series.is_empty() => Err(FetchError::EmptySeries {
                    pair: pair.clone(),
                    start,
                    end,
                }),
                other => other,
            };

            match result {
                Ok(series) => {
                    info!("Downloaded {}: {} data points", pair, series.len());
                    debug!(
                        "{}: {:?} to {:?}",
                        pair,
                        series.first_date(),
                        series.last_date()
                    );
                    outcome.series.push(series);
                }
                Err(err) => {
                    error!("Error downloading {}: {}", pair, err);
                    outcome.failures.push(FetchFailure::from(err));
                }
            }
        }

        info!(
            "Fetched {}/{} pairs from {}",
            outcome.series.len(),
            pairs.len(),
            self.provider.name()
        );
        outcome
    }
}
