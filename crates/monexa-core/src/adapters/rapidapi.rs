use std::sync::Arc;

use serde_json::Value;

use super::parse_number;
use crate::data_source::{success_body, SourceError, SourceFuture, SummarySource};
use crate::http_client::{execute_bounded, HttpAuth, HttpClient, HttpRequest};
use crate::{PriceSummary, ProviderConfig, ProviderId, Symbol};

/// Yahoo Finance summary served through RapidAPI, used for domestic symbols.
#[derive(Clone)]
pub struct RapidYahooAdapter {
    http_client: Arc<dyn HttpClient>,
    credentials: Option<(String, String)>,
    timeout_ms: u64,
}

impl RapidYahooAdapter {
    pub fn new(http_client: Arc<dyn HttpClient>, config: &ProviderConfig) -> Self {
        let credentials = match (&config.rapidapi_key, &config.rapidapi_host) {
            (Some(key), Some(host)) if !key.is_empty() && !host.is_empty() => {
                Some((key.clone(), host.clone()))
            }
            _ => None,
        };

        Self {
            http_client,
            credentials,
            timeout_ms: config.timeout_ms,
        }
    }

    async fn fetch_get_summary(&self, symbol: &Symbol) -> Result<PriceSummary, SourceError> {
        let (key, host) = self
            .credentials
            .as_ref()
            .ok_or_else(|| SourceError::unconfigured("rapidapi key or host not provided"))?;

        let request = HttpRequest::get(format!("https://{host}/stock/v2/get-summary"))
            .with_query("symbol", symbol.as_str())
            .with_auth(&HttpAuth::Header {
                name: String::from("X-RapidAPI-Key"),
                value: key.clone(),
            })
            .with_header("X-RapidAPI-Host", host.clone())
            .with_timeout_ms(self.timeout_ms);

        tracing::debug!(provider = "rapidyahoo", %symbol, "requesting summary");
        let response = execute_bounded(self.http_client.as_ref(), request)
            .await
            .map_err(|e| SourceError::transport(ProviderId::RapidYahoo, &e))?;

        let body = success_body(ProviderId::RapidYahoo, response)?;
        parse_summary(&body)
    }
}

impl SummarySource for RapidYahooAdapter {
    fn id(&self) -> ProviderId {
        ProviderId::RapidYahoo
    }

    fn label(&self) -> &'static str {
        "Yahoo Finance (India)"
    }

    fn fetch_summary<'a>(&'a self, symbol: &'a Symbol) -> SourceFuture<'a, PriceSummary> {
        Box::pin(self.fetch_get_summary(symbol))
    }
}

fn parse_summary(body: &str) -> Result<PriceSummary, SourceError> {
    let payload: Value = serde_json::from_str(body)
        .map_err(|e| SourceError::malformed(format!("failed to parse yahoo summary: {e}")))?;

    let raw = |pointer: &str| {
        payload
            .pointer(pointer)
            .and_then(parse_number)
            .filter(|value| value.is_finite())
            .unwrap_or(0.0)
    };

    Ok(PriceSummary {
        price: raw("/price/regularMarketPrice/raw"),
        previous_close: raw("/summaryDetail/previousClose/raw"),
        day_high: raw("/summaryDetail/dayHigh/raw"),
        day_low: raw("/summaryDetail/dayLow/raw"),
    })
}
