//! Chat-completion proxy enriched with live price context.

use std::sync::Arc;

use futures::future::join_all;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::http_client::{execute_bounded, HttpAuth, HttpClient, HttpRequest};
use crate::summary::SummaryService;
use crate::{ChatConfig, Symbol};

pub const NO_ANSWER: &str = "No answer from model";

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ChatError {
    #[error("chat api key not provided")]
    Unconfigured,
    #[error("chat transport error: {0}")]
    Transport(String),
    #[error("chat upstream returned status {status}: {body}")]
    Status { status: u16, body: String },
    #[error("failed to parse chat response: {0}")]
    Malformed(String),
}

/// Chat response body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatReply {
    pub answer: String,
    /// Price rows given to the model; empty when no symbols were requested.
    pub context: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: String,
    pub content: String,
}

impl ChatMessage {
    fn new(role: &str, content: impl Into<String>) -> Self {
        Self {
            role: role.to_owned(),
            content: content.into(),
        }
    }
}

#[derive(Debug, Serialize)]
struct CompletionRequest<'a> {
    model: &'a str,
    messages: &'a [ChatMessage],
    max_tokens: u32,
}

#[derive(Debug, Deserialize)]
struct CompletionResponse {
    #[serde(default)]
    choices: Vec<CompletionChoice>,
}

#[derive(Debug, Deserialize)]
struct CompletionChoice {
    #[serde(default)]
    message: Option<CompletionMessage>,
}

#[derive(Debug, Deserialize)]
struct CompletionMessage {
    #[serde(default)]
    content: Option<String>,
}

#[derive(Clone)]
pub struct ChatService {
    http_client: Arc<dyn HttpClient>,
    config: ChatConfig,
    summaries: SummaryService,
}

impl ChatService {
    pub fn new(http_client: Arc<dyn HttpClient>, config: ChatConfig, summaries: SummaryService) -> Self {
        Self {
            http_client,
            config,
            summaries,
        }
    }

    /// One `SYMBOL: price=…, previousClose=…` row per symbol, in request order.
    ///
    /// Lookups that fail contribute zero prices rather than an error.
    pub async fn build_context(&self, symbols: &[Symbol]) -> String {
        let snapshots =
            join_all(symbols.iter().map(|symbol| self.summaries.snapshot_or_zero(symbol))).await;

        symbols
            .iter()
            .zip(snapshots)
            .map(|(symbol, snapshot)| {
                format!(
                    "{}: price={}, previousClose={}",
                    symbol.normalized(),
                    snapshot.price,
                    snapshot.previous_close
                )
            })
            .collect::<Vec<_>>()
            .join("\n")
    }

    pub fn build_messages(&self, query: &str, context: &str) -> Vec<ChatMessage> {
        let mut messages = vec![ChatMessage::new("system", self.config.system_prompt.clone())];
        if !context.is_empty() {
            messages.push(ChatMessage::new("assistant", format!("Stock Data:\n{context}")));
        }
        messages.push(ChatMessage::new("user", query));
        messages
    }

    pub async fn chat(&self, query: &str, symbols: &[Symbol]) -> Result<ChatReply, ChatError> {
        let api_key = self
            .config
            .api_key
            .as_deref()
            .filter(|key| !key.is_empty())
            .ok_or(ChatError::Unconfigured)?;

        let context = self.build_context(symbols).await;
        let messages = self.build_messages(query, &context);
        let body = serde_json::to_string(&CompletionRequest {
            model: &self.config.model,
            messages: &messages,
            max_tokens: self.config.max_tokens,
        })
        .map_err(|e| ChatError::Malformed(e.to_string()))?;

        let request = HttpRequest::post(format!(
            "{}/chat/completions",
            self.config.base_url.trim_end_matches('/')
        ))
        .with_auth(&HttpAuth::BearerToken(api_key.to_owned()))
        .with_json_body(body)
        .with_timeout_ms(self.config.timeout_ms);

        tracing::debug!(model = %self.config.model, symbols = symbols.len(), "requesting chat completion");
        let response = execute_bounded(self.http_client.as_ref(), request)
            .await
            .map_err(|e| ChatError::Transport(e.message().to_owned()))?;

        if !response.is_success() {
            return Err(ChatError::Status {
                status: response.status,
                body: response.body,
            });
        }

        let completion: CompletionResponse = serde_json::from_str(&response.body)
            .map_err(|e| ChatError::Malformed(e.to_string()))?;
        let answer = completion
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message)
            .and_then(|message| message.content)
            .filter(|content| !content.is_empty())
            .unwrap_or_else(|| NO_ANSWER.to_owned());

        Ok(ChatReply { answer, context })
    }
}
