use std::sync::Arc;

use axum::{
    extract::{Query, State},
    routing::get,
    Json, Router,
};
use monexa_core::{resolve_symbol_param, QuoteResponse};

use crate::error::ApiResult;
use crate::state::AppState;

/// Joins every `symbol` value with commas, so `?symbol=aapl&symbol=msft`
/// reads like `?symbol=aapl,msft`. No `symbol` at all reads as a blank list.
fn symbol_param(pairs: &[(String, String)]) -> String {
    pairs
        .iter()
        .filter(|(name, _)| name == "symbol")
        .map(|(_, value)| value.as_str())
        .collect::<Vec<_>>()
        .join(",")
}

async fn get_quote(
    State(state): State<Arc<AppState>>,
    Query(pairs): Query<Vec<(String, String)>>,
) -> ApiResult<Json<QuoteResponse>> {
    let param = symbol_param(&pairs);
    let response = resolve_symbol_param(&state.resolver, &param).await?;
    Ok(Json(response))
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new().route("/api/quote", get(get_quote))
}
