//! Server flags, each backed by an environment variable.
//!
//! | Flag | Env | Default |
//! |------|-----|---------|
//! | `--port` | `PORT` | `8080` |
//! | `--bind` | `MONEXA_BIND` | `0.0.0.0` |
//! | `--alpha-vantage-key` | `ALPHA_VANTAGE_KEY` | unset |
//! | `--yahoo-finance-key` | `YAHOO_FINANCE_KEY` | unset |
//! | `--yahoo-finance-host` | `YAHOO_FINANCE_HOST` | unset |
//! | `--openai-api-key` | `OPENAI_API_KEY` | unset |
//! | `--app-env` | `APP_ENV` | `development` |
//! | `--timeout-ms` | `MONEXA_TIMEOUT_MS` | `15000` |
//! | `--log-format` | `MONEXA_LOG_FORMAT` | `text` |

use std::net::{IpAddr, Ipv4Addr, SocketAddr};

use clap::{Parser, ValueEnum};
use monexa_core::{ChatConfig, ProviderConfig};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LogFormat {
    Text,
    Json,
}

/// Monexa market-data gateway
#[derive(Debug, Clone, Parser)]
#[command(name = "monexa-web", version, about = "Monexa market-data gateway")]
pub struct ServerConfig {
    #[arg(long, env = "PORT", default_value_t = 8080)]
    pub port: u16,

    #[arg(long, env = "MONEXA_BIND", default_value_t = IpAddr::V4(Ipv4Addr::UNSPECIFIED))]
    pub bind: IpAddr,

    /// Alpha Vantage API key for intraday series and international summaries.
    #[arg(long, env = "ALPHA_VANTAGE_KEY", hide_env_values = true)]
    pub alpha_vantage_key: Option<String>,

    /// RapidAPI key for the Yahoo Finance summary endpoint.
    #[arg(long, env = "YAHOO_FINANCE_KEY", hide_env_values = true)]
    pub yahoo_finance_key: Option<String>,

    #[arg(long, env = "YAHOO_FINANCE_HOST")]
    pub yahoo_finance_host: Option<String>,

    #[arg(long, env = "OPENAI_API_KEY", hide_env_values = true)]
    pub openai_api_key: Option<String>,

    /// Reported by `/health`.
    #[arg(long, env = "APP_ENV", default_value = "development")]
    pub app_env: String,

    /// Per-request upstream timeout for market-data providers.
    #[arg(long, env = "MONEXA_TIMEOUT_MS", default_value_t = 15_000)]
    pub timeout_ms: u64,

    #[arg(long, env = "MONEXA_LOG_FORMAT", value_enum, default_value_t = LogFormat::Text)]
    pub log_format: LogFormat,
}

impl ServerConfig {
    pub fn listen_addr(&self) -> SocketAddr {
        SocketAddr::new(self.bind, self.port)
    }

    pub fn provider_config(&self) -> ProviderConfig {
        let mut config = ProviderConfig::default().with_timeout_ms(self.timeout_ms);
        config.alphavantage_api_key = self.alpha_vantage_key.clone();
        config.rapidapi_key = self.yahoo_finance_key.clone();
        config.rapidapi_host = self.yahoo_finance_host.clone();
        config
    }

    pub fn chat_config(&self) -> ChatConfig {
        ChatConfig {
            api_key: self.openai_api_key.clone(),
            ..ChatConfig::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flags_map_onto_core_configs() {
        let config = ServerConfig::try_parse_from([
            "monexa-web",
            "--port",
            "9000",
            "--alpha-vantage-key",
            "av",
            "--yahoo-finance-key",
            "rk",
            "--yahoo-finance-host",
            "yh-finance.p.rapidapi.com",
            "--openai-api-key",
            "sk",
            "--timeout-ms",
            "500",
        ])
        .expect("valid flags");

        assert_eq!(config.listen_addr().port(), 9000);

        let providers = config.provider_config();
        assert_eq!(providers.alphavantage_api_key.as_deref(), Some("av"));
        assert_eq!(providers.rapidapi_key.as_deref(), Some("rk"));
        assert_eq!(providers.rapidapi_host.as_deref(), Some("yh-finance.p.rapidapi.com"));
        assert_eq!(providers.timeout_ms, 500);

        let chat = config.chat_config();
        assert_eq!(chat.api_key.as_deref(), Some("sk"));
        assert_eq!(chat.model, "gpt-3.5-turbo");
    }

    #[test]
    fn log_format_accepts_json() {
        let config = ServerConfig::try_parse_from(["monexa-web", "--log-format", "json"])
            .expect("valid flags");

        assert_eq!(config.log_format, LogFormat::Json);
    }
}
