//! HTTP routes.
//!
//! | Route | Handler |
//! |-------|---------|
//! | `GET /health` | [`health`] |
//! | `GET /api/quote?symbol=` | [`quote`] |
//! | `GET /finance/summary?symbol=` | [`finance`] |
//! | `POST /chatbot/chat` | [`chatbot`] |

use std::any::Any;
use std::sync::Arc;

use axum::response::{IntoResponse, Response};
use axum::Router;
use tower_http::{catch_panic::CatchPanicLayer, cors::CorsLayer, trace::TraceLayer};

use crate::error::ApiError;
use crate::state::AppState;

pub mod chatbot;
pub mod finance;
pub mod health;
pub mod quote;

pub fn app_router(state: Arc<AppState>) -> Router {
    Router::new()
        .merge(health::router())
        .merge(quote::router())
        .merge(finance::router())
        .merge(chatbot::router())
        .with_state(state)
        .layer(CatchPanicLayer::custom(panic_response))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
}

fn panic_response(panic: Box<dyn Any + Send + 'static>) -> Response {
    let reason = panic
        .downcast_ref::<String>()
        .cloned()
        .or_else(|| panic.downcast_ref::<&str>().map(|s| (*s).to_owned()))
        .unwrap_or_else(|| String::from("handler panicked"));
    ApiError::Internal(reason).into_response()
}
