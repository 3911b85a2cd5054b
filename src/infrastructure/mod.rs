pub mod core;
pub mod mock;
pub mod yahoo;

pub use mock::MockMarketDataProvider;
pub use yahoo::YahooFinanceProvider;
