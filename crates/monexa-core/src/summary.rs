//! Market summaries routed by [`classify`].

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::adapters::{AlphaVantageAdapter, RapidYahooAdapter};
use crate::classifier::{classify, MarketRegion};
use crate::data_source::{SourceError, SummarySource};
use crate::http_client::HttpClient;
use crate::{PriceSummary, ProviderConfig, ProviderId, Symbol};

/// Summary response body.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarketSummary {
    pub source: String,
    /// Symbol as requested, trimmed but not case-normalized.
    pub symbol: String,
    #[serde(flatten)]
    pub prices: PriceSummary,
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SummaryError {
    #[error("{provider} summary failed: {source}")]
    Upstream {
        provider: ProviderId,
        source: SourceError,
    },
}

/// Picks the summary provider for a symbol's market.
#[derive(Clone)]
pub struct SummaryService {
    domestic: Arc<dyn SummarySource>,
    international: Arc<dyn SummarySource>,
}

impl SummaryService {
    pub fn new(domestic: Arc<dyn SummarySource>, international: Arc<dyn SummarySource>) -> Self {
        Self {
            domestic,
            international,
        }
    }

    /// RapidAPI Yahoo for `.NS` listings, Alpha Vantage for everything else.
    pub fn from_config(http_client: Arc<dyn HttpClient>, config: &ProviderConfig) -> Self {
        Self::new(
            Arc::new(RapidYahooAdapter::new(http_client.clone(), config)),
            Arc::new(AlphaVantageAdapter::new(http_client, config)),
        )
    }

    fn source_for(&self, symbol: &Symbol) -> &dyn SummarySource {
        match classify(symbol) {
            MarketRegion::Domestic => self.domestic.as_ref(),
            MarketRegion::International => self.international.as_ref(),
        }
    }

    pub async fn summarize(&self, symbol: &Symbol) -> Result<MarketSummary, SummaryError> {
        let source = self.source_for(symbol);
        let prices = source
            .fetch_summary(symbol)
            .await
            .map_err(|error| SummaryError::Upstream {
                provider: source.id(),
                source: error,
            })?;

        Ok(MarketSummary {
            source: source.label().to_owned(),
            symbol: symbol.as_str().to_owned(),
            prices,
        })
    }

    /// Like [`summarize`](Self::summarize) but failures read as an all-zero snapshot.
    pub async fn snapshot_or_zero(&self, symbol: &Symbol) -> PriceSummary {
        match self.summarize(symbol).await {
            Ok(summary) => summary.prices,
            Err(error) => {
                tracing::warn!(%symbol, %error, "summary lookup failed; using zero snapshot");
                PriceSummary::default()
            }
        }
    }
}
