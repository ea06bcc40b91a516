//! Per-symbol fallback resolution over an ordered provider chain.

use std::sync::Arc;
use std::time::Instant;

use crate::adapters::{AlphaVantageAdapter, YahooAdapter};
use crate::data_source::{SeriesSource, SourceError};
use crate::http_client::HttpClient;
use crate::{ProviderConfig, ProviderId, Quote, Symbol};

/// One failed provider attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceFailure {
    pub provider: ProviderId,
    pub error: SourceError,
}

/// Outcome of resolving one symbol, with the diagnostics the plain
/// [`QuoteResolver::resolve_quote`] discards.
#[derive(Debug, Clone, PartialEq)]
pub struct Resolution {
    pub quote: Quote,
    /// Provider that produced `quote`; `None` when the zero quote was served.
    pub selected_source: Option<ProviderId>,
    pub source_chain: Vec<ProviderId>,
    pub failures: Vec<SourceFailure>,
    pub latency_ms: u64,
}

impl Resolution {
    pub fn is_fallback(&self) -> bool {
        self.selected_source.is_some() && !self.failures.is_empty()
    }
}

/// Tries each provider in order and never fails.
///
/// A provider that returns a series wins even if that series holds no finite
/// close; only a reported [`SourceError`] moves on to the next provider. When
/// every provider fails the [`Quote::zero`] sentinel is returned. There is no
/// health memory between calls.
#[derive(Clone)]
pub struct QuoteResolver {
    chain: Vec<Arc<dyn SeriesSource>>,
}

impl QuoteResolver {
    pub fn new(chain: Vec<Arc<dyn SeriesSource>>) -> Self {
        Self { chain }
    }

    /// Production chain: Alpha Vantage intraday, then Yahoo chart.
    pub fn from_config(http_client: Arc<dyn HttpClient>, config: &ProviderConfig) -> Self {
        Self::new(vec![
            Arc::new(AlphaVantageAdapter::new(http_client.clone(), config)),
            Arc::new(YahooAdapter::new(http_client, config)),
        ])
    }

    pub fn source_chain(&self) -> Vec<ProviderId> {
        self.chain.iter().map(|source| source.id()).collect()
    }

    pub async fn resolve_quote(&self, symbol: &Symbol) -> Quote {
        self.resolve_detailed(symbol).await.quote
    }

    pub async fn resolve_detailed(&self, symbol: &Symbol) -> Resolution {
        let started = Instant::now();
        let mut source_chain = Vec::with_capacity(self.chain.len());
        let mut failures = Vec::new();

        for source in &self.chain {
            let provider = source.id();
            source_chain.push(provider);

            match source.fetch_series(symbol).await {
                Ok(raw) => {
                    if !failures.is_empty() {
                        tracing::info!(
                            %symbol,
                            provider = provider.as_str(),
                            failed_attempts = failures.len(),
                            "quote served by fallback provider"
                        );
                    }

                    return Resolution {
                        quote: Quote::from_series(symbol, &raw),
                        selected_source: Some(provider),
                        source_chain,
                        failures,
                        latency_ms: elapsed_ms(started),
                    };
                }
                Err(error) => {
                    tracing::warn!(
                        %symbol,
                        provider = provider.as_str(),
                        code = error.code(),
                        error = error.message(),
                        "quote provider failed"
                    );
                    failures.push(SourceFailure { provider, error });
                }
            }
        }

        tracing::warn!(
            %symbol,
            attempts = failures.len(),
            "all quote providers failed; serving zero quote"
        );
        Resolution {
            quote: Quote::zero(symbol),
            selected_source: None,
            source_chain,
            failures,
            latency_ms: elapsed_ms(started),
        }
    }
}

fn elapsed_ms(started: Instant) -> u64 {
    started.elapsed().as_millis().min(u128::from(u64::MAX)) as u64
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data_source::{SourceErrorKind, SourceFuture};
    use crate::RawSeries;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct ScriptedSource {
        id: ProviderId,
        outcome: Result<RawSeries, SourceError>,
        calls: AtomicUsize,
    }

    impl ScriptedSource {
        fn ok(id: ProviderId, closes: &[f64]) -> Arc<Self> {
            Self::with(id, Ok(closes.iter().copied().map(Some).collect()))
        }

        fn failing(id: ProviderId, error: SourceError) -> Arc<Self> {
            Self::with(id, Err(error))
        }

        fn with(id: ProviderId, outcome: Result<RawSeries, SourceError>) -> Arc<Self> {
            Arc::new(Self {
                id,
                outcome,
                calls: AtomicUsize::new(0),
            })
        }

        fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    impl SeriesSource for ScriptedSource {
        fn id(&self) -> ProviderId {
            self.id
        }

        fn fetch_series<'a>(&'a self, _symbol: &'a Symbol) -> SourceFuture<'a, RawSeries> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            let outcome = self.outcome.clone();
            Box::pin(async move { outcome })
        }
    }

    fn symbol(raw: &str) -> Symbol {
        Symbol::parse(raw).expect("valid symbol")
    }

    #[tokio::test]
    async fn primary_success_skips_secondary() {
        let primary = ScriptedSource::ok(ProviderId::Alphavantage, &[1.0, 2.0]);
        let secondary = ScriptedSource::ok(ProviderId::Yahoo, &[5.0]);
        let resolver = QuoteResolver::new(vec![primary.clone(), secondary.clone()]);

        let resolution = resolver.resolve_detailed(&symbol("aapl")).await;

        assert_eq!(resolution.selected_source, Some(ProviderId::Alphavantage));
        assert_eq!(resolution.quote.series, vec![1.0, 2.0]);
        assert_eq!(resolution.quote.symbol, "AAPL");
        assert_eq!(secondary.calls(), 0);
        assert!(!resolution.is_fallback());
    }

    #[tokio::test]
    async fn primary_timeout_falls_back_to_secondary() {
        let primary = ScriptedSource::failing(
            ProviderId::Alphavantage,
            SourceError::timeout("request timeout after 15000ms"),
        );
        let secondary = ScriptedSource::ok(ProviderId::Yahoo, &[10.0, 12.0, 11.0]);
        let resolver = QuoteResolver::new(vec![primary, secondary]);

        let resolution = resolver.resolve_detailed(&symbol("msft")).await;

        assert_eq!(resolution.selected_source, Some(ProviderId::Yahoo));
        assert_eq!(
            resolution.source_chain,
            vec![ProviderId::Alphavantage, ProviderId::Yahoo]
        );
        assert_eq!(resolution.failures.len(), 1);
        assert_eq!(resolution.failures[0].error.kind(), SourceErrorKind::Timeout);
        assert!(resolution.is_fallback());
        assert_eq!(resolution.quote.last, 11.0);
        assert_eq!(resolution.quote.delta, 1.0);
        assert_eq!(resolution.quote.series, vec![10.0, 12.0, 11.0]);
    }

    // Degrading to zero values instead of an error is the intended product behavior.
    #[tokio::test]
    async fn total_failure_serves_zero_quote() {
        let resolver = QuoteResolver::new(vec![
            ScriptedSource::failing(
                ProviderId::Alphavantage,
                SourceError::unconfigured("alphavantage api key not provided"),
            ),
            ScriptedSource::failing(ProviderId::Yahoo, SourceError::status(ProviderId::Yahoo, 404)),
        ]);

        let resolution = resolver.resolve_detailed(&symbol("zzzz")).await;

        assert_eq!(resolution.quote, Quote::zero(&symbol("ZZZZ")));
        assert_eq!(resolution.selected_source, None);
        assert_eq!(resolution.failures.len(), 2);
    }

    #[tokio::test]
    async fn successful_but_unusable_series_is_not_retried() {
        let primary = ScriptedSource::with(
            ProviderId::Alphavantage,
            Ok(RawSeries::new(vec![Some(f64::NAN), None])),
        );
        let secondary = ScriptedSource::ok(ProviderId::Yahoo, &[10.0]);
        let resolver = QuoteResolver::new(vec![primary, secondary.clone()]);

        let resolution = resolver.resolve_detailed(&symbol("ibm")).await;

        assert_eq!(resolution.selected_source, Some(ProviderId::Alphavantage));
        assert!(resolution.quote.is_zero());
        assert_eq!(secondary.calls(), 0);
    }

    #[tokio::test]
    async fn empty_chain_serves_zero_quote() {
        let resolver = QuoteResolver::new(Vec::new());

        let quote = resolver.resolve_quote(&symbol("aapl")).await;

        assert!(quote.is_zero());
        assert_eq!(quote.symbol, "AAPL");
    }

    #[test]
    fn production_chain_is_alphavantage_then_yahoo() {
        let resolver = QuoteResolver::from_config(
            Arc::new(crate::ReqwestHttpClient::new()),
            &ProviderConfig::default(),
        );

        assert_eq!(
            resolver.source_chain(),
            vec![ProviderId::Alphavantage, ProviderId::Yahoo]
        );
    }
}
