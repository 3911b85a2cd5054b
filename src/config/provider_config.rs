//! Market-data provider configuration parsing from environment variables.

/// Yahoo Finance chart API configuration
#[derive(Debug, Clone, PartialEq)]
pub struct ProviderEnvConfig {
    pub base_url: String,
    pub timeout_secs: u64,
    pub connect_timeout_secs: u64,
}

impl Default for ProviderEnvConfig {
    fn default() -> Self {
        Self {
            base_url: "https://query1.finance.yahoo.com".to_string(),
            timeout_secs: 30,
            connect_timeout_secs: 10,
        }
    }
}

impl ProviderEnvConfig {
    pub fn from_lookup<F>(lookup: &F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        Self {
            base_url: lookup("FX_PROVIDER_URL")
                .map(|url| url.trim_end_matches('/').to_string())
                .unwrap_or(defaults.base_url),
            timeout_secs: lookup("FX_PROVIDER_TIMEOUT_SECS")
                .and_then(|v| v.parse::<u64>().ok())
                .unwrap_or(defaults.timeout_secs),
            connect_timeout_secs: lookup("FX_PROVIDER_CONNECT_TIMEOUT_SECS")
                .and_then(|v| v.parse::<u64>().ok())
                .unwrap_or(defaults.connect_timeout_secs),
        }
    }
}
