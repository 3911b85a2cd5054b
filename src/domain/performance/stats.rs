use crate::config::analysis::TRADING_DAYS_PER_YEAR;
use rust_decimal::Decimal;
use statrs::statistics::{Data, Distribution, Max, Min};

/// Shared statistics utilities for exchange-rate calculations.
///
/// Every helper returns `None` instead of NaN when the input does not define
/// the statistic (empty input, single sample for a deviation, zero variance
/// for a correlation).
pub struct Stats;

impl Stats {
    /// Percentage change from `prev` to `curr`.
    pub fn pct_change(prev: f64, curr: f64) -> Option<f64> {
        if prev == 0.0 || !prev.is_finite() || !curr.is_finite() {
            return None;
        }
        Some((curr / prev - 1.0) * 100.0)
    }

    pub fn mean(values: &[f64]) -> Option<f64> {
        if values.is_empty() {
            return None;
        }
        Data::new(values.to_vec()).mean().filter(|m| m.is_finite())
    }

    /// Sample standard deviation (n - 1 denominator).
    pub fn std_dev(values: &[f64]) -> Option<f64> {
        if values.len() < 2 {
            return None;
        }
        Data::new(values.to_vec()).std_dev().filter(|s| s.is_finite())
    }

    pub fn min(values: &[f64]) -> Option<f64> {
        if values.is_empty() {
            return None;
        }
        Some(Data::new(values.to_vec()).min())
    }

    pub fn max(values: &[f64]) -> Option<f64> {
        if values.is_empty() {
            return None;
        }
        Some(Data::new(values.to_vec()).max())
    }

    /// Scales a daily standard deviation to a yearly one.
    pub fn annualize(daily_std: f64) -> f64 {
        daily_std * TRADING_DAYS_PER_YEAR.sqrt()
    }

    /// Pearson correlation of two equally long samples.
    pub fn pearson(x: &[f64], y: &[f64]) -> Option<f64> {
        let n = x.len().min(y.len());
        if n < 2 {
            return None;
        }

        let x = &x[..n];
        let y = &y[..n];
        let mean_x = x.iter().sum::<f64>() / n as f64;
        let mean_y = y.iter().sum::<f64>() / n as f64;

        let mut cov = 0.0;
        let mut var_x = 0.0;
        let mut var_y = 0.0;
        for (xi, yi) in x.iter().zip(y) {
            let dx = xi - mean_x;
            let dy = yi - mean_y;
            cov += dx * dy;
            var_x += dx * dx;
            var_y += dy * dy;
        }

        if var_x <= f64::EPSILON * f64::EPSILON || var_y <= f64::EPSILON * f64::EPSILON {
            return None;
        }

        let r = cov / (var_x.sqrt() * var_y.sqrt());
        Some(r.clamp(-1.0, 1.0))
    }

    /// Rounds half-to-even to `dp` decimal places.
    pub fn round_dp(value: f64, dp: u32) -> Option<Decimal> {
        Decimal::from_f64_retain(value).map(|d| d.round_dp(dp))
    }
}
