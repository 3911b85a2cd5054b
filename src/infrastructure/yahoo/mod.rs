//! Yahoo Finance infrastructure - historical daily closes.
//!
//! Provides [YahooFinanceProvider] backed by the public v8 chart endpoint.

pub mod client;

pub use client::YahooFinanceProvider;
