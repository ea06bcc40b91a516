//! # Monexa Web
//!
//! axum gateway over [`monexa_core`]: batch quotes, market summaries, the
//! chat proxy and a health probe. See [`api`] for the route table.

pub mod api;
pub mod config;
pub mod error;
pub mod state;

use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

pub use api::app_router;
pub use config::{LogFormat, ServerConfig};
pub use error::{ApiError, ApiResult};
pub use state::AppState;

/// Installs the global subscriber; `RUST_LOG` overrides the `info` default.
pub fn init_tracing(format: LogFormat) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let registry = tracing_subscriber::registry().with(filter);

    match format {
        LogFormat::Json => registry
            .with(fmt::layer().json().with_current_span(false))
            .init(),
        LogFormat::Text => registry
            .with(fmt::layer().with_target(true).with_line_number(true))
            .init(),
    }
}
