use crate::config::analysis::STAT_DECIMALS;
use crate::domain::performance::stats::Stats;
use rust_decimal::Decimal;

/// Column names of the exported statistics table, in export order.
pub const STATISTICS_COLUMNS: [&str; 6] = [
    "Mean_Daily_Return",
    "Std_Daily_Return",
    "Min_Daily_Return",
    "Max_Daily_Return",
    "Total_Return",
    "Volatility_Annualized",
];

/// Descriptive statistics of one pair over the analysis period.
///
/// All return figures are in percent. `None` marks a statistic the data does
/// not define (e.g. a deviation from a single return).
#[derive(Debug, Clone, PartialEq)]
pub struct StatisticsRecord {
    pub pair: String,
    pub mean_daily_return: Option<f64>,
    pub std_daily_return: Option<f64>,
    pub min_daily_return: Option<f64>,
    pub max_daily_return: Option<f64>,
    pub total_return: Option<f64>,
    pub volatility_annualized: Option<f64>,
}

impl StatisticsRecord {
    /// Raw values in [`STATISTICS_COLUMNS`] order.
    pub fn values(&self) -> [Option<f64>; 6] {
        [
            self.mean_daily_return,
            self.std_daily_return,
            self.min_daily_return,
            self.max_daily_return,
            self.total_return,
            self.volatility_annualized,
        ]
    }

    /// Values rounded for reporting and export.
    pub fn rounded(&self) -> [Option<Decimal>; 6] {
        self.values()
            .map(|value| value.and_then(|v| Stats::round_dp(v, STAT_DECIMALS)))
    }
}
