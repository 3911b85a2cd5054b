pub mod aligner;
pub mod fetcher;

pub use aligner::align;
pub use fetcher::{FetchFailure, FetchOutcome, PriceFetcher};
