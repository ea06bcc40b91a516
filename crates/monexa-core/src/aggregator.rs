//! Batch quote resolution with order-preserving fan-out.

use futures::future::join_all;
use serde::{Deserialize, Serialize};

use crate::routing::QuoteResolver;
use crate::{BatchError, Quote, Symbol};

/// Batch response body.
///
/// A single requested symbol serializes as a bare quote object, any other
/// count as an array, which keeps single-symbol clients working unchanged.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum QuoteResponse {
    Single(Quote),
    Many(Vec<Quote>),
}

impl QuoteResponse {
    pub fn into_quotes(self) -> Vec<Quote> {
        match self {
            Self::Single(quote) => vec![quote],
            Self::Many(quotes) => quotes,
        }
    }

    pub fn len(&self) -> usize {
        match self {
            Self::Single(_) => 1,
            Self::Many(quotes) => quotes.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Resolves a comma-delimited symbol parameter such as `"aapl, msft"`.
pub async fn resolve_symbol_param(
    resolver: &QuoteResolver,
    param: &str,
) -> Result<QuoteResponse, BatchError> {
    resolve_symbols(resolver, Symbol::parse_list(param)).await
}

/// Resolves every non-blank symbol concurrently.
///
/// All resolutions are started before any is awaited and results keep input
/// order. Duplicates are resolved once per position.
///
/// # Errors
///
/// Returns [`BatchError::NoSymbol`] when no entry survives trimming. Provider
/// failures never surface here.
pub async fn resolve_batch<I, S>(
    resolver: &QuoteResolver,
    symbols: I,
) -> Result<QuoteResponse, BatchError>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let symbols = symbols
        .into_iter()
        .filter_map(|raw| Symbol::parse(raw.as_ref()).ok())
        .collect::<Vec<_>>();
    resolve_symbols(resolver, symbols).await
}

async fn resolve_symbols(
    resolver: &QuoteResolver,
    symbols: Vec<Symbol>,
) -> Result<QuoteResponse, BatchError> {
    if symbols.is_empty() {
        return Err(BatchError::NoSymbol);
    }

    tracing::debug!(count = symbols.len(), "resolving quote batch");
    let mut quotes = join_all(symbols.iter().map(|symbol| resolver.resolve_quote(symbol))).await;

    if quotes.len() == 1 {
        return Ok(QuoteResponse::Single(quotes.remove(0)));
    }
    Ok(QuoteResponse::Many(quotes))
}
