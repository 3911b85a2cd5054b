// Return statistics and correlation domain
pub mod correlation;
pub mod metrics;
pub mod stats;

pub use correlation::CorrelationMatrix;
pub use metrics::{STATISTICS_COLUMNS, StatisticsRecord};
pub use stats::Stats;
