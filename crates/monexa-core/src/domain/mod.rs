//! # Domain Models
//!
//! Canonical domain types for the Monexa gateway.
//!
//! | Type | Description |
//! |------|-------------|
//! | [`Symbol`] | Trimmed, non-empty ticker as supplied by the caller |
//! | [`RawSeries`] | Provider close prices before normalization |
//! | [`Quote`] | Normalized `{symbol, last, delta, series}` result |
//! | [`PriceSummary`] | Price, previous close and day range from one provider |
//!
//! ## Invariants
//!
//! A [`Quote`] only ever holds finite closes in chronological order, and its
//! `delta` is computed from that filtered series:
//!
//! ```rust
//! use monexa_core::{Quote, RawSeries, Symbol};
//!
//! let symbol = Symbol::parse("aapl").unwrap();
//! let raw = RawSeries::new(vec![Some(10.0), Some(f64::NAN), Some(12.0), Some(11.0)]);
//! let quote = Quote::from_series(&symbol, &raw);
//!
//! assert_eq!(quote.symbol, "AAPL");
//! assert_eq!(quote.series, vec![10.0, 12.0, 11.0]);
//! assert_eq!(quote.delta, 1.0);
//! ```

mod models;
mod symbol;

pub use models::{PriceSummary, Quote, RawSeries};
pub use symbol::Symbol;
