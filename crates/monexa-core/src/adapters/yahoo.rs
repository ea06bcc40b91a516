use std::sync::Arc;

use serde::Deserialize;
use serde_json::Value;

use crate::data_source::{success_body, SeriesSource, SourceError, SourceFuture};
use crate::http_client::{execute_bounded, HttpClient, HttpRequest};
use crate::{ProviderConfig, ProviderId, RawSeries, Symbol};

/// Yahoo Finance v8 chart adapter, the keyless secondary quote provider.
#[derive(Clone)]
pub struct YahooAdapter {
    http_client: Arc<dyn HttpClient>,
    base_url: String,
    timeout_ms: u64,
}

impl YahooAdapter {
    pub fn new(http_client: Arc<dyn HttpClient>, config: &ProviderConfig) -> Self {
        Self {
            http_client,
            base_url: config.yahoo_chart_base_url.trim_end_matches('/').to_owned(),
            timeout_ms: config.timeout_ms,
        }
    }

    async fn fetch_chart(&self, symbol: &Symbol) -> Result<RawSeries, SourceError> {
        let endpoint = format!(
            "{}/{}",
            self.base_url,
            urlencoding::encode(symbol.as_str())
        );
        let request = HttpRequest::get(endpoint)
            .with_query("interval", "5m")
            .with_query("range", "1d")
            .with_header("referer", "https://finance.yahoo.com/")
            .with_timeout_ms(self.timeout_ms);

        tracing::debug!(provider = "yahoo", %symbol, "requesting chart");
        let response = execute_bounded(self.http_client.as_ref(), request)
            .await
            .map_err(|e| SourceError::transport(ProviderId::Yahoo, &e))?;

        let body = success_body(ProviderId::Yahoo, response)?;
        parse_chart(&body)
    }
}

impl SeriesSource for YahooAdapter {
    fn id(&self) -> ProviderId {
        ProviderId::Yahoo
    }

    fn fetch_series<'a>(&'a self, symbol: &'a Symbol) -> SourceFuture<'a, RawSeries> {
        Box::pin(self.fetch_chart(symbol))
    }
}

fn parse_chart(body: &str) -> Result<RawSeries, SourceError> {
    let chart_response: YahooChartResponse = serde_json::from_str(body)
        .map_err(|e| SourceError::malformed(format!("failed to parse yahoo chart: {e}")))?;

    let Some(result) = chart_response
        .chart
        .result
        .and_then(|results| results.into_iter().next())
    else {
        let detail = chart_response
            .chart
            .error
            .and_then(|error| error.get("description").and_then(Value::as_str).map(str::to_owned))
            .unwrap_or_else(|| String::from("no detail"));
        return Err(SourceError::malformed(format!(
            "yahoo chart response missing result: {detail}"
        )));
    };

    let raw = result
        .indicators
        .and_then(|indicators| indicators.quote.into_iter().next())
        .and_then(|quote| quote.close)
        .unwrap_or_default()
        .iter()
        .map(Value::as_f64)
        .collect::<RawSeries>();

    if raw.finite_closes().is_empty() {
        return Err(SourceError::empty_series("yahoo returned no prices"));
    }

    Ok(raw)
}

#[derive(Debug, Deserialize)]
struct YahooChartResponse {
    chart: YahooChartData,
}

#[derive(Debug, Deserialize)]
struct YahooChartData {
    #[serde(default)]
    result: Option<Vec<YahooChartResult>>,
    #[serde(default)]
    error: Option<Value>,
}

#[derive(Debug, Deserialize)]
struct YahooChartResult {
    #[serde(default)]
    indicators: Option<YahooChartIndicators>,
}

#[derive(Debug, Deserialize)]
struct YahooChartIndicators {
    #[serde(default)]
    quote: Vec<YahooChartQuote>,
}

#[derive(Debug, Deserialize)]
struct YahooChartQuote {
    #[serde(default)]
    close: Option<Vec<Value>>,
}
