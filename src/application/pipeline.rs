//! Linear analysis pipeline: fetch, align, derive.
//!
//! Reporting, chart display and export consume the finished
//! [`AnalysisReport`]; they are sequenced by the binary.

use crate::application::analysis::{
    SignalGenerator, compute_statistics, correlation_matrix, daily_returns, default_rolling_volatility,
    latest_signals,
};
use crate::application::market_data::{FetchFailure, PriceFetcher, align};
use crate::config::AnalysisConfig;
use crate::domain::errors::FrameError;
use crate::domain::market::{PriceTable, ReturnTable, Signal, SignalTable, VolatilityTable};
use crate::domain::performance::{CorrelationMatrix, StatisticsRecord};
use crate::domain::ports::MarketDataProvider;
use anyhow::{Context, Result};
use chrono::NaiveDate;
use std::sync::Arc;
use tracing::{info, warn};

/// Everything derived from one run.
#[derive(Debug)]
pub struct AnalysisReport {
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    /// Successfully retrieved pairs, in configured order
    pub pairs: Vec<String>,
    pub failures: Vec<FetchFailure>,
    /// Closing prices only, one column per retrieved pair
    pub prices: PriceTable,
    /// Short and long moving averages per pair
    pub moving_averages: PriceTable,
    pub short_window: usize,
    pub long_window: usize,
    pub returns: ReturnTable,
    pub statistics: Vec<StatisticsRecord>,
    pub signals: SignalTable,
    pub volatility: VolatilityTable,
    pub correlation: CorrelationMatrix,
}

impl AnalysisReport {
    /// The price table extended with the moving-average columns.
    pub fn prices_with_moving_averages(&self) -> Result<PriceTable, FrameError> {
        let mut table = self.prices.clone();
        table.extend_with(&self.moving_averages)?;
        Ok(table)
    }

    pub fn latest_signals(&self) -> Vec<(String, Signal)> {
        latest_signals(&self.signals, &self.pairs)
    }
}

pub struct AnalysisPipeline {
    config: AnalysisConfig,
    fetcher: PriceFetcher,
    signal_generator: SignalGenerator,
}

impl AnalysisPipeline {
    pub fn new(config: AnalysisConfig, provider: Arc<dyn MarketDataProvider>) -> Self {
        Self {
            config,
            fetcher: PriceFetcher::new(provider),
            signal_generator: SignalGenerator::default(),
        }
    }

    /// Runs every computational stage. Fails only when no pair at all could
    /// be retrieved.
    pub async fn analyze(&self) -> Result<AnalysisReport> {
        let config = &self.config;
        info!("Analyzing currency pairs: {:?}", config.pairs);
        info!("Period: {} to {}", config.start_date, config.end_date);

        info!("Step 1: Downloading currency data...");
        let outcome = self
            .fetcher
            .fetch_all(&config.pairs, config.start_date, config.end_date)
            .await;
        if !outcome.failures.is_empty() {
            warn!(
                "Continuing without {} pair(s): {:?}",
                outcome.failures.len(),
                outcome.failed_pairs()
            );
        }
        let pairs = outcome.retrieved_pairs();
        if pairs.is_empty() {
            anyhow::bail!(
                "No currency data could be downloaded for {:?}",
                config.pairs
            );
        }

        info!("Step 2: Creating combined dataset...");
        let prices = align(&outcome.series).context("Failed to align price series")?;
        info!("Combined dataset shape: ({}, {})", prices.len(), prices.columns().len());
        if let (Some(first), Some(last)) = (prices.index().first(), prices.index().last()) {
            info!("Date range: {} to {}", first, last);
        }

        info!("Step 3: Calculating daily returns...");
        let returns = daily_returns(&prices, &pairs).context("Failed to compute returns")?;

        info!("Step 4: Calculating key statistics...");
        let statistics = compute_statistics(&prices, &returns, &pairs);

        info!(
            "Step 5: Calculating moving averages ({}-day and {}-day)...",
            self.signal_generator.short_window, self.signal_generator.long_window
        );
        let crossover = self
            .signal_generator
            .generate(&prices, &pairs)
            .context("Failed to compute moving averages")?;

        info!("Step 6: Trading signals generated based on moving average crossover");

        let volatility =
            default_rolling_volatility(&returns, &pairs).context("Failed to compute rolling volatility")?;
        let correlation = correlation_matrix(&returns, &pairs);

        Ok(AnalysisReport {
            start_date: config.start_date,
            end_date: config.end_date,
            pairs,
            failures: outcome.failures,
            prices,
            moving_averages: crossover.moving_averages,
            short_window: self.signal_generator.short_window,
            long_window: self.signal_generator.long_window,
            returns,
            statistics,
            signals: crossover.signals,
            volatility,
            correlation,
        })
    }
}
