// Transformations applied to the aligned price table
pub mod correlation;
pub mod returns;
pub mod signals;
pub mod statistics;
pub mod volatility;

pub use correlation::correlation_matrix;
pub use returns::daily_returns;
pub use signals::{CrossoverAnalysis, SignalGenerator, latest_signals, ma_column, moving_average};
pub use statistics::compute_statistics;
pub use volatility::{default_rolling_volatility, rolling_volatility};
