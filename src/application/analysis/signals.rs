use crate::config::analysis::{LONG_MA_WINDOW, SHORT_MA_WINDOW};
use crate::domain::errors::FrameError;
use crate::domain::market::{PriceTable, Signal, SignalTable};
use ta::indicators::SimpleMovingAverage;
use ta::{Next, Reset};

/// Trailing arithmetic mean over `window` observations.
///
/// The first `window - 1` entries are `None`, as is any entry whose window
/// contains a missing price. The indicator restarts after every gap.
pub fn moving_average(values: &[Option<f64>], window: usize) -> Vec<Option<f64>> {
    let Ok(mut sma) = SimpleMovingAverage::new(window) else {
        return vec![None; values.len()];
    };

    let mut filled = 0usize;
    values
        .iter()
        .map(|value| match value {
            Some(price) => {
                let average = sma.next(*price);
                filled += 1;
                (filled >= window).then_some(average)
            }
            None => {
                sma.reset();
                filled = 0;
                None
            }
        })
        .collect()
}

/// Name of the moving-average column for `pair`, e.g. `EURUSD=X_MA_20`.
pub fn ma_column(pair: &str, window: usize) -> String {
    format!("{}_MA_{}", pair, window)
}

/// Moving averages and the crossover signals derived from them.
#[derive(Debug, Clone)]
pub struct CrossoverAnalysis {
    /// Two columns per pair (short then long), on the price index
    pub moving_averages: PriceTable,
    pub signals: SignalTable,
}

/// Dual moving-average crossover classifier.
///
/// Each date is classified on its own from the two averages at that date;
/// no state carries over between dates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SignalGenerator {
    pub short_window: usize,
    pub long_window: usize,
}

impl Default for SignalGenerator {
    fn default() -> Self {
        Self::new(SHORT_MA_WINDOW, LONG_MA_WINDOW)
    }
}

impl SignalGenerator {
    pub fn new(short_window: usize, long_window: usize) -> Self {
        Self {
            short_window,
            long_window,
        }
    }

    pub fn generate(&self, prices: &PriceTable, pairs: &[String]) -> Result<CrossoverAnalysis, FrameError> {
        let mut moving_averages = PriceTable::new(prices.index().to_vec());
        let mut signals = SignalTable::new(prices.index().to_vec());

        for pair in pairs {
            let Some(column) = prices.column(pair) else {
                continue;
            };

            let short = moving_average(column, self.short_window);
            let long = moving_average(column, self.long_window);
            let pair_signals: Vec<Signal> = short
                .iter()
                .zip(&long)
                .map(|(s, l)| Signal::from_moving_averages(*s, *l))
                .collect();

            tracing::debug!(
                "{}: last short MA {:?}, last long MA {:?}",
                pair,
                short.last().copied().flatten(),
                long.last().copied().flatten()
            );

            moving_averages.insert_column(ma_column(pair, self.short_window), short)?;
            moving_averages.insert_column(ma_column(pair, self.long_window), long)?;
            signals.insert_column(pair.clone(), pair_signals)?;
        }

        Ok(CrossoverAnalysis {
            moving_averages,
            signals,
        })
    }
}

/// Most recent signal per pair. Pairs without rows report HOLD.
pub fn latest_signals(signals: &SignalTable, pairs: &[String]) -> Vec<(String, Signal)> {
    pairs
        .iter()
        .filter_map(|pair| {
            let column = signals.column(pair)?;
            Some((pair.clone(), column.last().copied().unwrap_or_default()))
        })
        .collect()
}
