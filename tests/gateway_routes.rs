//! Router tests: each request runs through the full axum stack in-process,
//! with every upstream answered by a [`ScriptedHttpClient`].

use std::sync::Arc;

use axum::{
    body::{to_bytes, Body},
    http::{header, Method, Request, StatusCode},
    Router,
};
use monexa_tests::{
    app_router, chart_body, chart_route, intraday_body, intraday_route, server_config, AppState,
    Reply, ScriptedHttpClient,
};
use serde_json::{json, Value};
use tower::ServiceExt;

fn app(client: Arc<ScriptedHttpClient>) -> Router {
    app_router(AppState::build(&server_config(), client))
}

async fn send(app: Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.oneshot(request).await.expect("router is infallible");
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("readable body");
    let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, body)
}

fn get(uri: &str) -> Request<Body> {
    Request::builder()
        .uri(uri)
        .body(Body::empty())
        .expect("valid request")
}

fn post_json(uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .expect("valid request")
}

const GLOBAL_QUOTE_AAPL: &str = r#"{"Global Quote": {
    "01. symbol": "AAPL", "03. high": "191.0500", "04. low": "188.2000",
    "05. price": "190.1000", "08. previous close": "189.0000"}}"#;

// =============================================================================
// Health
// =============================================================================

#[tokio::test]
async fn health_reports_environment() {
    let (status, body) = send(app(Arc::new(ScriptedHttpClient::new())), get("/health")).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"ok": true, "env": "test"}));
}

#[tokio::test]
async fn cors_allows_any_origin() {
    let request = Request::builder()
        .uri("/health")
        .header(header::ORIGIN, "http://localhost:5173")
        .body(Body::empty())
        .expect("valid request");

    let response = app(Arc::new(ScriptedHttpClient::new()))
        .oneshot(request)
        .await
        .expect("router is infallible");

    assert_eq!(
        response
            .headers()
            .get(header::ACCESS_CONTROL_ALLOW_ORIGIN)
            .and_then(|value| value.to_str().ok()),
        Some("*")
    );
}

// =============================================================================
// /api/quote
// =============================================================================

#[tokio::test]
async fn quote_without_symbol_is_a_bad_request() {
    let client = Arc::new(ScriptedHttpClient::new());

    let (status, body) = send(app(client.clone()), get("/api/quote")).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, json!({"error": "Symbol required"}));
    assert!(client.requests().is_empty());
}

#[tokio::test]
async fn quote_with_only_separators_is_a_bad_request() {
    let (status, body) = send(
        app(Arc::new(ScriptedHttpClient::new())),
        get("/api/quote?symbol=%20,,"),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, json!({"error": "Symbol required"}));
}

#[tokio::test]
async fn single_symbol_returns_a_bare_quote_object() {
    let client = Arc::new(
        ScriptedHttpClient::new()
            .route(intraday_route("AAPL"), Reply::json(intraday_body(&[189.0, 190.0]))),
    );

    let (status, body) = send(app(client), get("/api/quote?symbol=aapl")).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        json!({"symbol": "AAPL", "last": 190.0, "delta": 1.0, "series": [189.0, 190.0]})
    );
}

#[tokio::test]
async fn several_symbols_return_an_ordered_array_with_zero_fallbacks() {
    let client = Arc::new(
        ScriptedHttpClient::new()
            .route(intraday_route("MSFT"), Reply::status(500))
            .route(chart_route("MSFT"), Reply::json(chart_body(&[Some(10.0), Some(12.0), Some(11.0)]))),
    );

    let (status, body) = send(app(client), get("/api/quote?symbol=msft,zzzz")).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        json!([
            {"symbol": "MSFT", "last": 11.0, "delta": 1.0, "series": [10.0, 12.0, 11.0]},
            {"symbol": "ZZZZ", "last": 0.0, "delta": 0.0, "series": []}
        ])
    );
}

#[tokio::test]
async fn repeated_symbol_parameters_read_as_one_list() {
    let client = Arc::new(
        ScriptedHttpClient::new()
            .route(intraday_route("AAPL"), Reply::json(intraday_body(&[189.0, 190.0])))
            .route(intraday_route("MSFT"), Reply::json(intraday_body(&[410.0, 408.0]))),
    );

    let (status, body) = send(app(client), get("/api/quote?symbol=aapl&symbol=msft")).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        json!([
            {"symbol": "AAPL", "last": 190.0, "delta": 1.0, "series": [189.0, 190.0]},
            {"symbol": "MSFT", "last": 408.0, "delta": -2.0, "series": [410.0, 408.0]}
        ])
    );
}

// =============================================================================
// /finance/summary
// =============================================================================

#[tokio::test]
async fn summary_without_symbol_is_a_bad_request() {
    let (status, body) = send(
        app(Arc::new(ScriptedHttpClient::new())),
        get("/finance/summary"),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, json!({"error": "symbol query param required"}));
}

#[tokio::test]
async fn international_summary_comes_from_alpha_vantage() {
    let client = Arc::new(
        ScriptedHttpClient::new().route("function=GLOBAL_QUOTE", Reply::json(GLOBAL_QUOTE_AAPL)),
    );

    let (status, body) = send(app(client), get("/finance/summary?symbol=AAPL")).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        json!({
            "source": "Alpha Vantage (International)",
            "symbol": "AAPL",
            "price": 190.1,
            "previousClose": 189.0,
            "dayHigh": 191.05,
            "dayLow": 188.2
        })
    );
}

#[tokio::test]
async fn domestic_summary_comes_from_rapidapi() {
    let client = Arc::new(ScriptedHttpClient::new().route(
        "get-summary?symbol=TCS.NS",
        Reply::json(
            r#"{"price": {"regularMarketPrice": {"raw": 3850.5}},
                "summaryDetail": {"previousClose": {"raw": 3801.0},
                                  "dayHigh": {"raw": 3870.0}, "dayLow": {"raw": 3790.0}}}"#,
        ),
    ));

    let (status, body) = send(app(client.clone()), get("/finance/summary?symbol=TCS.NS")).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["source"], "Yahoo Finance (India)");
    assert_eq!(body["price"], 3850.5);
    assert_eq!(client.calls_to("alphavantage"), 0);
}

#[tokio::test]
async fn summary_upstream_failure_is_a_server_error() {
    let client = Arc::new(ScriptedHttpClient::new().route("function=GLOBAL_QUOTE", Reply::status(503)));

    let (status, body) = send(app(client), get("/finance/summary?symbol=AAPL")).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body, json!({"error": "Failed to fetch finance data"}));
}

#[tokio::test]
async fn summary_without_alpha_vantage_key_fails_without_calling_upstream() {
    let mut config = server_config();
    config.alpha_vantage_key = None;
    let client = Arc::new(
        ScriptedHttpClient::new().route("function=GLOBAL_QUOTE", Reply::json(GLOBAL_QUOTE_AAPL)),
    );

    let (status, body) = send(
        app_router(AppState::build(&config, client.clone())),
        get("/finance/summary?symbol=AAPL"),
    )
    .await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body, json!({"error": "Failed to fetch finance data"}));
    assert_eq!(client.calls_to("alphavantage"), 0);
}

// =============================================================================
// /chatbot/chat
// =============================================================================

#[tokio::test]
async fn chat_without_query_is_a_bad_request() {
    let client = Arc::new(ScriptedHttpClient::new());

    let (status, body) = send(
        app(client.clone()),
        post_json("/chatbot/chat", json!({"symbols": ["AAPL"]})),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, json!({"error": "query required"}));
    assert!(client.requests().is_empty());
}

#[tokio::test]
async fn chat_answers_with_price_context() {
    let client = Arc::new(
        ScriptedHttpClient::new()
            .route("function=GLOBAL_QUOTE", Reply::json(GLOBAL_QUOTE_AAPL))
            .route(
                "/chat/completions",
                Reply::json(r#"{"choices": [{"message": {"role": "assistant", "content": "AAPL is up 1.1 today."}}]}"#),
            ),
    );

    let (status, body) = send(
        app(client.clone()),
        post_json("/chatbot/chat", json!({"query": "How is Apple doing?", "symbols": ["aapl"]})),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        json!({
            "answer": "AAPL is up 1.1 today.",
            "context": "AAPL: price=190.1, previousClose=189"
        })
    );

    let completion = client
        .requests()
        .into_iter()
        .find(|request| request.url.ends_with("/chat/completions"))
        .expect("completion request sent");
    assert_eq!(
        completion.headers.get("authorization").map(String::as_str),
        Some("Bearer sk-test")
    );
}

#[tokio::test]
async fn chat_upstream_failure_is_a_server_error_with_detail() {
    let client = Arc::new(ScriptedHttpClient::new().route("/chat/completions", Reply::status(429)));

    let (status, body) = send(
        app(client),
        post_json("/chatbot/chat", json!({"query": "hello"})),
    )
    .await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["error"], "Chat failed");
    assert!(body["detail"]
        .as_str()
        .is_some_and(|detail| detail.contains("429")));
}

#[tokio::test]
async fn chat_with_empty_body_is_a_bad_request() {
    let client = Arc::new(ScriptedHttpClient::new());
    let request = Request::builder()
        .method(Method::POST)
        .uri("/chatbot/chat")
        .body(Body::empty())
        .expect("valid request");

    let (status, body) = send(app(client.clone()), request).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, json!({"error": "query required"}));
    assert!(client.requests().is_empty());
}

#[tokio::test]
async fn chat_ignores_symbols_that_are_not_an_array() {
    let client = Arc::new(ScriptedHttpClient::new().route(
        "/chat/completions",
        Reply::json(r#"{"choices": [{"message": {"role": "assistant", "content": "Hi."}}]}"#),
    ));

    let (status, body) = send(
        app(client.clone()),
        post_json("/chatbot/chat", json!({"query": "hello", "symbols": "AAPL"})),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"answer": "Hi.", "context": ""}));
    assert_eq!(client.calls_to("GLOBAL_QUOTE"), 0);
}
