use crate::config::analysis::VOLATILITY_WINDOW;
use crate::domain::errors::FrameError;
use crate::domain::market::{ReturnTable, VolatilityTable};
use crate::domain::performance::Stats;

/// Sample standard deviation over a trailing window. Undefined until the
/// window is full or when it contains a missing value.
pub fn rolling_std(values: &[Option<f64>], window: usize) -> Vec<Option<f64>> {
    if window < 2 {
        return vec![None; values.len()];
    }

    (0..values.len())
        .map(|i| {
            if i + 1 < window {
                return None;
            }
            let slice: Option<Vec<f64>> = values[i + 1 - window..=i].iter().copied().collect();
            Stats::std_dev(&slice?)
        })
        .collect()
}

/// Rolling annualized volatility of daily returns, one column per pair.
pub fn rolling_volatility(returns: &ReturnTable, pairs: &[String], window: usize) -> Result<VolatilityTable, FrameError> {
    let mut table = VolatilityTable::new(returns.index().to_vec());
    for pair in pairs {
        let Some(column) = returns.column(pair) else {
            continue;
        };
        let values = rolling_std(column, window)
            .into_iter()
            .map(|std| std.map(Stats::annualize))
            .collect();
        table.insert_column(pair.clone(), values)?;
    }
    Ok(table)
}

/// [`rolling_volatility`] with the standard 30-observation window.
pub fn default_rolling_volatility(returns: &ReturnTable, pairs: &[String]) -> Result<VolatilityTable, FrameError> {
    rolling_volatility(returns, pairs, VOLATILITY_WINDOW)
}
