use std::sync::Arc;

use axum::{
    extract::{Query, State},
    routing::get,
    Json, Router,
};
use monexa_core::{MarketSummary, Symbol};
use serde::Deserialize;

use crate::error::{ApiError, ApiResult};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
struct SummaryParams {
    symbol: Option<String>,
}

async fn get_summary(
    State(state): State<Arc<AppState>>,
    Query(params): Query<SummaryParams>,
) -> ApiResult<Json<MarketSummary>> {
    let symbol = params
        .symbol
        .as_deref()
        .and_then(|raw| Symbol::parse(raw).ok())
        .ok_or_else(|| ApiError::BadRequest(String::from("symbol query param required")))?;

    let summary = state.summaries.summarize(&symbol).await?;
    Ok(Json(summary))
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new().route("/finance/summary", get(get_summary))
}
