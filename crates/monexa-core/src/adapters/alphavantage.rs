use std::collections::BTreeMap;
use std::sync::Arc;

use serde::Deserialize;
use serde_json::Value;

use super::parse_number;
use crate::data_source::{success_body, SeriesSource, SourceError, SourceFuture, SummarySource};
use crate::http_client::{execute_bounded, HttpClient, HttpRequest};
use crate::{PriceSummary, ProviderConfig, ProviderId, RawSeries, Symbol};

const INTRADAY_INTERVAL: &str = "5min";
const SERIES_FIELD: &str = "Time Series (5min)";

/// Alpha Vantage adapter: intraday series (primary quote provider) and
/// `GLOBAL_QUOTE` summaries for international symbols.
#[derive(Clone)]
pub struct AlphaVantageAdapter {
    http_client: Arc<dyn HttpClient>,
    api_key: Option<String>,
    base_url: String,
    timeout_ms: u64,
}

impl AlphaVantageAdapter {
    pub fn new(http_client: Arc<dyn HttpClient>, config: &ProviderConfig) -> Self {
        Self {
            http_client,
            api_key: config
                .alphavantage_api_key
                .clone()
                .filter(|key| !key.trim().is_empty()),
            base_url: config.alphavantage_base_url.clone(),
            timeout_ms: config.timeout_ms,
        }
    }

    fn api_key(&self) -> Result<&str, SourceError> {
        self.api_key
            .as_deref()
            .ok_or_else(|| SourceError::unconfigured("alphavantage api key not provided"))
    }

    async fn query(&self, function: &str, symbol: &Symbol) -> Result<String, SourceError> {
        let api_key = self.api_key()?;
        let mut request = HttpRequest::get(&self.base_url)
            .with_query("function", function)
            .with_query("symbol", symbol.as_str());
        if function == "TIME_SERIES_INTRADAY" {
            request = request.with_query("interval", INTRADAY_INTERVAL);
        }
        let request = request
            .with_query("apikey", api_key)
            .with_timeout_ms(self.timeout_ms);

        tracing::debug!(provider = "alphavantage", function, %symbol, "requesting upstream");
        let response = execute_bounded(self.http_client.as_ref(), request)
            .await
            .map_err(|e| SourceError::transport(ProviderId::Alphavantage, &e))?;

        success_body(ProviderId::Alphavantage, response)
    }

    async fn fetch_intraday(&self, symbol: &Symbol) -> Result<RawSeries, SourceError> {
        let body = self.query("TIME_SERIES_INTRADAY", symbol).await?;
        parse_intraday(&body)
    }

    async fn fetch_global_quote(&self, symbol: &Symbol) -> Result<PriceSummary, SourceError> {
        let body = self.query("GLOBAL_QUOTE", symbol).await?;
        parse_global_quote(&body)
    }
}

impl SeriesSource for AlphaVantageAdapter {
    fn id(&self) -> ProviderId {
        ProviderId::Alphavantage
    }

    fn fetch_series<'a>(&'a self, symbol: &'a Symbol) -> SourceFuture<'a, RawSeries> {
        Box::pin(self.fetch_intraday(symbol))
    }
}

impl SummarySource for AlphaVantageAdapter {
    fn id(&self) -> ProviderId {
        ProviderId::Alphavantage
    }

    fn label(&self) -> &'static str {
        "Alpha Vantage (International)"
    }

    fn fetch_summary<'a>(&'a self, symbol: &'a Symbol) -> SourceFuture<'a, PriceSummary> {
        Box::pin(self.fetch_global_quote(symbol))
    }
}

fn parse_intraday(body: &str) -> Result<RawSeries, SourceError> {
    let mut payload: BTreeMap<String, Value> = serde_json::from_str(body).map_err(|e| {
        SourceError::malformed(format!("failed to parse alphavantage response: {e}"))
    })?;

    let Some(Value::Object(series)) = payload.remove(SERIES_FIELD) else {
        // Throttled or rejected calls come back as 200 with an explanatory field.
        let detail = ["Note", "Information", "Error Message"]
            .iter()
            .find_map(|key| payload.get(*key).and_then(Value::as_str))
            .unwrap_or("no detail");
        return Err(SourceError::malformed(format!(
            "alphavantage response missing series: {detail}"
        )));
    };

    // Timestamps are "YYYY-MM-DD HH:MM:SS", so lexical order is chronological.
    let ordered: BTreeMap<String, Value> = series.into_iter().collect();
    let raw = ordered
        .values()
        .map(|bar| bar.get("4. close").and_then(parse_number))
        .collect::<RawSeries>();

    if raw.finite_closes().is_empty() {
        return Err(SourceError::empty_series("alphavantage returned no prices"));
    }

    Ok(raw)
}

fn parse_global_quote(body: &str) -> Result<PriceSummary, SourceError> {
    let response: AlphaVantageQuoteResponse = serde_json::from_str(body).map_err(|e| {
        SourceError::malformed(format!("failed to parse alphavantage quote: {e}"))
    })?;

    let quote = response.quote.unwrap_or_default();
    Ok(PriceSummary {
        price: number_or_zero(quote.get("05. price")),
        previous_close: number_or_zero(quote.get("08. previous close")),
        day_high: number_or_zero(quote.get("03. high")),
        day_low: number_or_zero(quote.get("04. low")),
    })
}

fn number_or_zero(value: Option<&Value>) -> f64 {
    value
        .and_then(parse_number)
        .filter(|number| number.is_finite())
        .unwrap_or(0.0)
}

#[derive(Debug, Deserialize)]
struct AlphaVantageQuoteResponse {
    #[serde(rename = "Global Quote", default)]
    quote: Option<BTreeMap<String, Value>>,
}
