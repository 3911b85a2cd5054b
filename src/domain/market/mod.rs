pub mod frame;
pub mod price_series;
pub mod signal;

pub use frame::{DateFrame, PriceTable, ReturnTable, SignalTable, VolatilityTable};
pub use price_series::{PricePoint, PriceSeries};
pub use signal::Signal;
