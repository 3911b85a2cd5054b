use crate::application::analysis::returns::defined_values;
use crate::domain::market::{PriceTable, ReturnTable};
use crate::domain::performance::{StatisticsRecord, Stats};

/// Descriptive statistics for each retrieved pair, in pair order.
pub fn compute_statistics(prices: &PriceTable, returns: &ReturnTable, pairs: &[String]) -> Vec<StatisticsRecord> {
    pairs
        .iter()
        .filter(|pair| prices.contains_column(pair))
        .map(|pair| {
            let daily = returns.column(pair).map(defined_values).unwrap_or_default();
            let std = Stats::std_dev(&daily);

            StatisticsRecord {
                pair: pair.clone(),
                mean_daily_return: Stats::mean(&daily),
                std_daily_return: std,
                min_daily_return: Stats::min(&daily),
                max_daily_return: Stats::max(&daily),
                total_return: prices.column(pair).and_then(total_return),
                volatility_annualized: std.map(Stats::annualize),
            }
        })
        .collect()
}

/// Percent change from the first to the last observed price.
pub fn total_return(column: &[Option<f64>]) -> Option<f64> {
    let first = column.iter().find_map(|v| *v)?;
    let last = column.iter().rev().find_map(|v| *v)?;
    Stats::pct_change(first, last)
}
