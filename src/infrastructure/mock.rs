use crate::domain::errors::FetchError;
use crate::domain::market::{PricePoint, PriceSeries};
use crate::domain::ports::MarketDataProvider;
use async_trait::async_trait;
use chrono::{Datelike, Days, NaiveDate, Weekday};
use std::collections::HashMap;
use std::sync::Mutex;
use tracing::debug;

#[derive(Debug, Clone)]
enum Scripted {
    Series(Vec<PricePoint>),
    Failure(String),
}

/// In-memory provider with scripted answers per pair.
///
/// Unknown pairs are rejected the way the live provider rejects a delisted
/// symbol. Every request is recorded for later inspection.
#[derive(Debug, Default)]
pub struct MockMarketDataProvider {
    scripts: HashMap<String, Scripted>,
    requests: Mutex<Vec<String>>,
}

impl MockMarketDataProvider {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_series(mut self, pair: &str, points: Vec<PricePoint>) -> Self {
        self.scripts.insert(pair.to_string(), Scripted::Series(points));
        self
    }

    pub fn with_failure(mut self, pair: &str, reason: &str) -> Self {
        self.scripts
            .insert(pair.to_string(), Scripted::Failure(reason.to_string()));
        self
    }

    /// Pairs requested so far, in request order.
    pub fn requested_pairs(&self) -> Vec<String> {
        match self.requests.lock() {
            Ok(guard) => guard.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }

    fn record(&self, pair: &str) {
        let mut requests = match self.requests.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        requests.push(pair.to_string());
    }
}

#[async_trait]
impl MarketDataProvider for MockMarketDataProvider {
    async fn fetch_daily_closes(
        &self,
        pair: &str,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<PriceSeries, FetchError> {
        self.record(pair);
        debug!("MockMarketDataProvider: request for {}", pair);

        match self.scripts.get(pair) {
            Some(Scripted::Series(points)) => {
                let in_range = points
                    .iter()
                    .copied()
                    .filter(|p| start <= p.date && p.date <= end)
                    .collect();
                Ok(PriceSeries::new(pair, in_range))
            }
            Some(Scripted::Failure(reason)) => Err(FetchError::Provider {
                pair: pair.to_string(),
                code: "Mock Failure".to_string(),
                description: reason.clone(),
            }),
            None => Err(FetchError::Provider {
                pair: pair.to_string(),
                code: "Not Found".to_string(),
                description: "No data found, symbol may be delisted".to_string(),
            }),
        }
    }

    fn name(&self) -> &str {
        "Mock"
    }
}

/// Deterministic weekday closes starting at `start`: a linear drift with a
/// slow oscillation on top, so returns are never constant.
pub fn synthetic_closes(start: NaiveDate, trading_days: usize, base: f64, drift: f64) -> Vec<PricePoint> {
    let mut points = Vec::with_capacity(trading_days);
    let mut date = start;

    while points.len() < trading_days {
        if !matches!(date.weekday(), Weekday::Sat | Weekday::Sun) {
            let i = points.len() as f64;
            let close = base * (1.0 + drift * i + 0.01 * (i * 0.3).sin());
            points.push(PricePoint::new(date, close));
        }
        match date.checked_add_days(Days::new(1)) {
            Some(next) => date = next,
            None => break,
        }
    }
    points
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 1, d).unwrap()
    }

    #[tokio::test]
    async fn test_series_is_clipped_to_range() {
        let provider = MockMarketDataProvider::new().with_series(
            "EURUSD=X",
            vec![
                PricePoint::new(day(1), 1.0),
                PricePoint::new(day(2), 1.1),
                PricePoint::new(day(3), 1.2),
            ],
        );

        let series = provider
            .fetch_daily_closes("EURUSD=X", day(2), day(2))
            .await
            .unwrap();
        assert_eq!(series.points(), &[PricePoint::new(day(2), 1.1)]);
    }

    #[tokio::test]
    async fn test_unknown_pair_is_rejected() {
        let provider = MockMarketDataProvider::new();
        let err = provider
            .fetch_daily_closes("XXXYYY=X", day(1), day(31))
            .await
            .unwrap_err();

        assert!(matches!(err, FetchError::Provider { .. }));
        assert_eq!(provider.requested_pairs(), vec!["XXXYYY=X"]);
    }

    #[test]
    fn test_synthetic_closes_skip_weekends() {
        // 2024-01-06 is a Saturday
        let points = synthetic_closes(day(1), 10, 1.0, 0.001);

        assert_eq!(points.len(), 10);
        assert!(points.iter().all(|p| p.date.weekday().number_from_monday() <= 5));
        assert_eq!(points[5].date, day(8));
        assert!(points.windows(2).all(|w| w[0].date < w[1].date));
    }
}
