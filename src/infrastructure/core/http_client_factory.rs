use crate::config::ProviderEnvConfig;
use reqwest::Client;
use std::time::Duration;

/// Some market-data endpoints reject requests without a browser-like agent.
const USER_AGENT: &str = concat!("Mozilla/5.0 (compatible; fxlens/", env!("CARGO_PKG_VERSION"), ")");

pub struct HttpClientFactory;

impl HttpClientFactory {
    /// Creates a plain HTTP client with the configured timeouts.
    ///
    /// No retry middleware: a failed request fails its pair.
    pub fn create_client(config: &ProviderEnvConfig) -> Client {
        Client::builder()
            .user_agent(USER_AGENT)
            .pool_max_idle_per_host(5)
            .timeout(Duration::from_secs(config.timeout_secs))
            .connect_timeout(Duration::from_secs(config.connect_timeout_secs))
            .build()
            .unwrap_or_else(|_| Client::new())
    }
}
