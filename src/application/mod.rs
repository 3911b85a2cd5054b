// Pipeline stages
pub mod analysis;
pub mod market_data;
pub mod reporting;

// Orchestrator
pub mod pipeline;
