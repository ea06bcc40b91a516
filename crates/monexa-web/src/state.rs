use std::sync::Arc;

use monexa_core::{ChatService, HttpClient, QuoteResolver, SummaryService};

use crate::config::ServerConfig;

/// Shared services behind every handler.
pub struct AppState {
    pub resolver: QuoteResolver,
    pub summaries: SummaryService,
    pub chat: ChatService,
    pub app_env: String,
}

impl AppState {
    /// Wires every service onto one shared transport.
    pub fn build(config: &ServerConfig, http_client: Arc<dyn HttpClient>) -> Arc<Self> {
        let providers = config.provider_config();
        let summaries = SummaryService::from_config(http_client.clone(), &providers);

        Arc::new(Self {
            resolver: QuoteResolver::from_config(http_client.clone(), &providers),
            chat: ChatService::new(http_client, config.chat_config(), summaries.clone()),
            summaries,
            app_env: config.app_env.clone(),
        })
    }
}
