mod alphavantage;
mod rapidapi;
mod yahoo;

pub use alphavantage::AlphaVantageAdapter;
pub use rapidapi::RapidYahooAdapter;
pub use yahoo::YahooAdapter;

use serde_json::Value;

/// Reads a JSON number or a numeric string; anything else is `None`.
pub(crate) fn parse_number(value: &Value) -> Option<f64> {
    match value {
        Value::Number(number) => number.as_f64(),
        Value::String(text) => text.trim().parse::<f64>().ok(),
        _ => None,
    }
}
