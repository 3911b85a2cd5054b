//! Fixed analysis parameters.
//!
//! These are not read from the environment: changing them changes the meaning
//! of the exported tables.

/// Short moving-average window (observations)
pub const SHORT_MA_WINDOW: usize = 20;

/// Long moving-average window (observations)
pub const LONG_MA_WINDOW: usize = 50;

/// Rolling volatility window (observations)
pub const VOLATILITY_WINDOW: usize = 30;

/// Trading days per year used to annualize daily volatility
pub const TRADING_DAYS_PER_YEAR: f64 = 252.0;

/// Decimal places of reported and exported statistics
pub const STAT_DECIMALS: u32 = 4;

/// Decimal places of the printed correlation matrix
pub const CORRELATION_DECIMALS: u32 = 3;

/// Rows shown in the recent-prices section of the report
pub const RECENT_ROWS: usize = 5;
