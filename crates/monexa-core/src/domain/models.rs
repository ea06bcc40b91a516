use serde::{Deserialize, Serialize};

use crate::Symbol;

/// Provider close prices before normalization, in ascending chronological order.
///
/// Entries that could not be read as a number upstream are kept as `None` so
/// adapters can report how malformed a payload was; non-finite values may also
/// appear. Normalization drops both.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawSeries {
    closes: Vec<Option<f64>>,
}

impl RawSeries {
    pub fn new(closes: Vec<Option<f64>>) -> Self {
        Self { closes }
    }

    pub fn len(&self) -> usize {
        self.closes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.closes.is_empty()
    }

    /// Finite close prices, order preserved.
    pub fn finite_closes(&self) -> Vec<f64> {
        self.closes
            .iter()
            .filter_map(|close| close.filter(|value| value.is_finite()))
            .collect()
    }
}

impl FromIterator<Option<f64>> for RawSeries {
    fn from_iter<I: IntoIterator<Item = Option<f64>>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

/// Normalized intraday quote served to the frontend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Quote {
    /// Uppercased input symbol, whichever provider answered.
    pub symbol: String,
    /// Most recent finite close, or 0 when `series` is empty.
    pub last: f64,
    /// `last - series[0]`, or 0 when `series` is empty.
    pub delta: f64,
    /// Finite closes in ascending chronological order.
    pub series: Vec<f64>,
}

impl Quote {
    pub fn from_series(symbol: &Symbol, raw: &RawSeries) -> Self {
        Self::from_closes(symbol, raw.finite_closes())
    }

    fn from_closes(symbol: &Symbol, series: Vec<f64>) -> Self {
        let (last, delta) = match (series.first(), series.last()) {
            (Some(first), Some(last)) => (*last, last - first),
            _ => (0.0, 0.0),
        };

        Self {
            symbol: symbol.normalized(),
            last,
            delta,
            series,
        }
    }

    /// Sentinel returned when no provider produced data for `symbol`.
    pub fn zero(symbol: &Symbol) -> Self {
        Self::from_closes(symbol, Vec::new())
    }

    pub fn is_zero(&self) -> bool {
        self.series.is_empty() && self.last == 0.0 && self.delta == 0.0
    }
}

/// Single-provider price snapshot; absent upstream fields read as 0.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PriceSummary {
    pub price: f64,
    pub previous_close: f64,
    pub day_high: f64,
    pub day_low: f64,
}
