use crate::domain::errors::FetchError;
use crate::domain::market::PriceSeries;
use async_trait::async_trait;
use chrono::NaiveDate;

/// Source of historical daily closing prices.
#[async_trait]
pub trait MarketDataProvider: Send + Sync {
    /// Daily closes of `pair` for every trading day in `start..=end`.
    async fn fetch_daily_closes(
        &self,
        pair: &str,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<PriceSeries, FetchError>;

    fn name(&self) -> &str;
}
