use std::sync::Arc;

use axum::{body::Bytes, extract::State, routing::post, Json, Router};
use monexa_core::{ChatReply, Symbol};
use serde_json::Value;

use crate::error::{ApiError, ApiResult};
use crate::state::AppState;

/// Fields read from a chat request body.
///
/// The body is parsed leniently: a missing, non-JSON or non-object body reads
/// as `{}`, and `symbols` only counts when it is an array. Non-string or blank
/// entries inside it are skipped.
#[derive(Debug, Default, PartialEq)]
struct ChatBody {
    query: Option<String>,
    symbols: Vec<Symbol>,
}

impl ChatBody {
    fn from_bytes(bytes: &[u8]) -> Self {
        let value = serde_json::from_slice::<Value>(bytes).unwrap_or(Value::Null);

        let query = value
            .get("query")
            .and_then(Value::as_str)
            .filter(|query| !query.trim().is_empty())
            .map(str::to_owned);

        let symbols = value
            .get("symbols")
            .and_then(Value::as_array)
            .map(|entries| {
                entries
                    .iter()
                    .filter_map(Value::as_str)
                    .filter_map(|raw| Symbol::parse(raw).ok())
                    .collect()
            })
            .unwrap_or_default();

        Self { query, symbols }
    }
}

async fn chat(State(state): State<Arc<AppState>>, body: Bytes) -> ApiResult<Json<ChatReply>> {
    let ChatBody { query, symbols } = ChatBody::from_bytes(&body);
    let query = query.ok_or_else(|| ApiError::BadRequest(String::from("query required")))?;

    let reply = state.chat.chat(&query, &symbols).await?;
    Ok(Json(reply))
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new().route("/chatbot/chat", post(chat))
}
