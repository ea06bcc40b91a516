//! Explicit configuration passed to adapter and client constructors.
//!
//! Nothing in this crate reads the process environment; the server binary
//! maps its flags and environment variables onto these structs.

use crate::http_client::DEFAULT_TIMEOUT_MS;

pub const ALPHAVANTAGE_BASE_URL: &str = "https://www.alphavantage.co/query";
pub const YAHOO_CHART_BASE_URL: &str = "https://query1.finance.yahoo.com/v8/finance/chart";
pub const OPENAI_BASE_URL: &str = "https://api.openai.com/v1";

/// Upstream market-data provider settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProviderConfig {
    pub alphavantage_api_key: Option<String>,
    pub alphavantage_base_url: String,
    pub yahoo_chart_base_url: String,
    pub rapidapi_key: Option<String>,
    /// RapidAPI host serving the Yahoo summary endpoint, e.g. `yh-finance.p.rapidapi.com`.
    pub rapidapi_host: Option<String>,
    pub timeout_ms: u64,
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            alphavantage_api_key: None,
            alphavantage_base_url: String::from(ALPHAVANTAGE_BASE_URL),
            yahoo_chart_base_url: String::from(YAHOO_CHART_BASE_URL),
            rapidapi_key: None,
            rapidapi_host: None,
            timeout_ms: DEFAULT_TIMEOUT_MS,
        }
    }
}

impl ProviderConfig {
    pub fn with_alphavantage_key(mut self, key: impl Into<String>) -> Self {
        self.alphavantage_api_key = Some(key.into());
        self
    }

    pub fn with_rapidapi(mut self, key: impl Into<String>, host: impl Into<String>) -> Self {
        self.rapidapi_key = Some(key.into());
        self.rapidapi_host = Some(host.into());
        self
    }

    pub fn with_timeout_ms(mut self, timeout_ms: u64) -> Self {
        self.timeout_ms = timeout_ms;
        self
    }
}

/// Chat-completion upstream settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatConfig {
    pub api_key: Option<String>,
    pub base_url: String,
    pub model: String,
    pub max_tokens: u32,
    pub system_prompt: String,
    pub timeout_ms: u64,
}

impl Default for ChatConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: String::from(OPENAI_BASE_URL),
            model: String::from("gpt-3.5-turbo"),
            max_tokens: 600,
            system_prompt: String::from(
                "You are Monexa, a friendly and clear financial assistant. \
                 Include relevant stock data in your answers concisely.",
            ),
            timeout_ms: 30_000,
        }
    }
}

impl ChatConfig {
    pub fn with_api_key(mut self, key: impl Into<String>) -> Self {
        self.api_key = Some(key.into());
        self
    }
}
