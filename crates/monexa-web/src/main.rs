use std::sync::Arc;

use clap::Parser;
use monexa_core::ReqwestHttpClient;
use monexa_web::{app_router, init_tracing, AppState, ServerConfig};

#[tokio::main]
async fn main() -> std::io::Result<()> {
    // A missing .env file is normal outside local development.
    let dotenv = dotenvy::dotenv();
    let config = ServerConfig::parse();
    init_tracing(config.log_format);
    if let Ok(path) = dotenv {
        tracing::debug!(path = %path.display(), "loaded environment file");
    }

    let state = AppState::build(&config, Arc::new(ReqwestHttpClient::new()));
    let router = app_router(state);

    let addr = config.listen_addr();
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!(%addr, env = %config.app_env, "monexa gateway listening");
    axum::serve(listener, router).await
}
