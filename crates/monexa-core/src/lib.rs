//! # Monexa Core
//!
//! Quote providers, fallback resolution and batch aggregation behind the
//! Monexa market-data gateway.
//!
//! ## Overview
//!
//! - **Provider adapters** turn Alpha Vantage, Yahoo chart and RapidAPI Yahoo
//!   payloads into raw close series or price summaries
//! - **Quote resolution** walks an ordered provider chain per symbol and never
//!   fails; total failure yields an all-zero quote
//! - **Batch aggregation** resolves a symbol list concurrently and keeps input order
//! - **Market summaries** pick a provider from the symbol's exchange suffix
//! - **Chat proxy** forwards questions to a chat-completion API with price context
//!
//! ## Modules
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`adapters`] | Provider adapters (Alpha Vantage, Yahoo, RapidAPI Yahoo) |
//! | [`aggregator`] | Concurrent batch resolution and response shaping |
//! | [`chat`] | Chat-completion proxy |
//! | [`classifier`] | Domestic / international market classification |
//! | [`config`] | Provider and chat settings |
//! | [`data_source`] | Adapter traits and failure taxonomy |
//! | [`domain`] | Domain models (Symbol, RawSeries, Quote, PriceSummary) |
//! | [`error`] | Caller-input errors |
//! | [`http_client`] | HTTP client abstraction |
//! | [`routing`] | Per-symbol fallback resolution |
//! | [`source`] | Provider identifiers |
//! | [`summary`] | Region-routed market summaries |
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use monexa_core::{resolve_symbol_param, ProviderConfig, QuoteResolver, ReqwestHttpClient};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = ProviderConfig::default().with_alphavantage_key("demo");
//!     let resolver = QuoteResolver::from_config(Arc::new(ReqwestHttpClient::new()), &config);
//!
//!     let response = resolve_symbol_param(&resolver, "aapl,msft").await?;
//!     for quote in response.into_quotes() {
//!         println!("{} {:.2} ({:+.2})", quote.symbol, quote.last, quote.delta);
//!     }
//!
//!     Ok(())
//! }
//! ```
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────┐
//! │  HTTP handlers  │
//! └────────┬────────┘
//!          │
//!          ▼
//! ┌─────────────────┐     ┌──────────────────┐
//! │ Batch Aggregator│────▶│  Quote Resolver  │
//! └─────────────────┘     └────────┬─────────┘
//!                                  │ ordered chain
//!                                  ▼
//! ┌─────────────────┐     ┌──────────────────┐
//! │ Series Source   │────▶│ HTTP Client      │
//! │ (Adapter Trait) │     │ (reqwest)        │
//! └─────────────────┘     └──────────────────┘
//! ```
//!
//! ## Error Handling
//!
//! Quote resolution has no error path. Only caller input can fail a batch:
//!
//! ```rust
//! use monexa_core::{BatchError, Symbol};
//!
//! assert!(Symbol::parse("  ").is_err());
//! assert_eq!(BatchError::NoSymbol.to_string(), "Symbol required");
//! ```
//!
//! ## Security
//!
//! - API keys arrive through [`ProviderConfig`] and [`ChatConfig`] and are never logged
//! - This crate does not read the process environment

pub mod adapters;
pub mod aggregator;
pub mod chat;
pub mod classifier;
pub mod config;
pub mod data_source;
pub mod domain;
pub mod error;
pub mod http_client;
pub mod routing;
pub mod source;
pub mod summary;

// Adapter implementations
pub use adapters::{AlphaVantageAdapter, RapidYahooAdapter, YahooAdapter};

// Aggregation
pub use aggregator::{resolve_batch, resolve_symbol_param, QuoteResponse};

// Chat proxy
pub use chat::{ChatError, ChatMessage, ChatReply, ChatService};

// Market classification
pub use classifier::{classify, MarketRegion, DOMESTIC_SUFFIX};

// Configuration
pub use config::{ChatConfig, ProviderConfig};

// Data source traits and types
pub use data_source::{SeriesSource, SourceError, SourceErrorKind, SourceFuture, SummarySource};

// Domain models
pub use domain::{PriceSummary, Quote, RawSeries, Symbol};

// Error types
pub use error::{BatchError, ValidationError};

// HTTP client types
pub use http_client::{
    HttpAuth, HttpClient, HttpError, HttpErrorKind, HttpMethod, HttpRequest, HttpResponse,
    ReqwestHttpClient,
};

// Resolution
pub use routing::{QuoteResolver, Resolution, SourceFailure};

// Source identifiers
pub use source::ProviderId;

// Summaries
pub use summary::{MarketSummary, SummaryError, SummaryService};
