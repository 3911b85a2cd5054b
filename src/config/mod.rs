//! Configuration module for fxlens.
//!
//! The defaults reproduce the reference analysis (four major pairs over
//! 2023-2024). Pair list, date range, output directory and provider settings
//! may be overridden from the environment; analysis windows are fixed in
//! [`analysis`].

pub mod analysis;
mod provider_config;

pub use provider_config::ProviderEnvConfig;

use crate::domain::errors::ConfigError;
use anyhow::{Context, Result};
use chrono::NaiveDate;
use std::env;
use std::path::PathBuf;

pub const DEFAULT_PAIRS: [&str; 4] = ["USDINR=X", "EURUSD=X", "GBPUSD=X", "JPYUSD=X"];
pub const DEFAULT_START_DATE: &str = "2023-01-01";
pub const DEFAULT_END_DATE: &str = "2024-12-31";

const DATE_FORMAT: &str = "%Y-%m-%d";

/// Main analysis configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct AnalysisConfig {
    pub pairs: Vec<String>,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub output_dir: PathBuf,
    pub show_charts: bool,
    pub provider: ProviderEnvConfig,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            pairs: DEFAULT_PAIRS.iter().map(|p| p.to_string()).collect(),
            start_date: NaiveDate::from_ymd_opt(2023, 1, 1).unwrap_or_default(),
            end_date: NaiveDate::from_ymd_opt(2024, 12, 31).unwrap_or_default(),
            output_dir: PathBuf::from("."),
            show_charts: true,
            provider: ProviderEnvConfig::default(),
        }
    }
}

impl AnalysisConfig {
    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load configuration from any key/value source, falling back to the defaults.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let pairs = match lookup("FX_PAIRS") {
            Some(raw) => parse_pairs(&raw),
            None => DEFAULT_PAIRS.iter().map(|p| p.to_string()).collect(),
        };

        let start_raw = lookup("FX_START_DATE").unwrap_or_else(|| DEFAULT_START_DATE.to_string());
        let end_raw = lookup("FX_END_DATE").unwrap_or_else(|| DEFAULT_END_DATE.to_string());
        let start_date = parse_date("FX_START_DATE", &start_raw)?;
        let end_date = parse_date("FX_END_DATE", &end_raw)?;

        let output_dir = lookup("FX_OUTPUT_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from("."));

        let show_charts = lookup("FX_SHOW_CHARTS")
            .and_then(|v| v.parse::<bool>().ok())
            .unwrap_or(true);

        let config = Self {
            pairs,
            start_date,
            end_date,
            output_dir,
            show_charts,
            provider: ProviderEnvConfig::from_lookup(&lookup),
        };
        config.validate().context("Invalid analysis configuration")?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.pairs.is_empty() {
            return Err(ConfigError::EmptyPairList);
        }
        if self.start_date > self.end_date {
            return Err(ConfigError::InvalidRange {
                start: self.start_date,
                end: self.end_date,
            });
        }
        Ok(())
    }
}

/// Splits a comma separated pair list, dropping blanks and repeats.
fn parse_pairs(raw: &str) -> Vec<String> {
    let mut pairs: Vec<String> = Vec::new();
    for pair in raw.split(',').map(str::trim).filter(|p| !p.is_empty()) {
        if !pairs.iter().any(|p| p == pair) {
            pairs.push(pair.to_string());
        }
    }
    pairs
}

fn parse_date(key: &str, value: &str) -> Result<NaiveDate, ConfigError> {
    NaiveDate::parse_from_str(value.trim(), DATE_FORMAT).map_err(|_| ConfigError::InvalidDate {
        key: key.to_string(),
        value: value.to_string(),
    })
}
