//! Client for the interaction backend.
//!
//! The backend turns a free-text note ("Just had a call with Dr. Sarah
//! Johnson about...") into a structured interaction. Only the log screen's
//! chat mode talks to it, through the [`InteractionBackend`] trait.

use crate::store::{parse_attendees, InteractionDraft, InteractionSource, InteractionType, Sentiment};
use anyhow::{Context, Result};
use chrono::NaiveDate;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tokio::runtime::Runtime;
use tracing::{debug, error, info};

const LOG_CHAT_PATH: &str = "/api/interactions/log-chat";
const UNKNOWN_HCP: &str = "Unknown HCP";

/// What the log screen needs from a backend.
pub trait InteractionBackend {
    /// Extract an interaction from a free-text note dated `today` unless the
    /// backend says otherwise.
    fn log_chat(&self, note: &str, today: NaiveDate) -> Result<ChatOutcome>;
}

/// A draft extracted from a chat note, plus the assistant's reply.
#[derive(Debug, Clone, PartialEq)]
pub struct ChatOutcome {
    pub draft: InteractionDraft,
    pub reply: Option<String>,
}

#[derive(Debug, Serialize)]
struct LogChatRequest<'a> {
    user_message: &'a str,
    interaction_context: serde_json::Value,
}

#[derive(Debug, Default, Deserialize)]
struct LogChatResponse {
    #[serde(default)]
    result: ExtractedInteraction,
    #[serde(default)]
    messages: Vec<ChatMessage>,
}

/// Fields the backend extracted. All of them are optional.
#[derive(Debug, Default, Deserialize)]
struct ExtractedInteraction {
    hcp_name: Option<String>,
    interaction_type: Option<String>,
    date: Option<String>,
    #[serde(default)]
    attendees: Vec<String>,
    summary: Option<String>,
    #[serde(default)]
    key_topics: Vec<String>,
    sentiment: Option<String>,
    #[serde(default)]
    follow_up_actions: Vec<String>,
}

#[derive(Debug, Deserialize)]
struct ChatMessage {
    #[serde(default)]
    content: String,
}

impl LogChatResponse {
    fn into_outcome(self, today: NaiveDate) -> ChatOutcome {
        let r = self.result;

        let hcp_name = r
            .hcp_name
            .map(|n| n.trim().to_string())
            .filter(|n| !n.is_empty())
            .unwrap_or_else(|| UNKNOWN_HCP.to_string());

        let mut draft = InteractionDraft::new(hcp_name, today);
        draft.source = InteractionSource::Chat;
        draft.interaction_type = r
            .interaction_type
            .and_then(|t| t.parse().ok())
            .unwrap_or(InteractionType::Chat);
        draft.date = r
            .date
            .and_then(|d| NaiveDate::parse_from_str(d.trim(), "%Y-%m-%d").ok())
            .unwrap_or(today);
        draft.attendees = parse_attendees(&r.attendees.join(","));
        draft.topics = r.key_topics.join(", ");
        draft.outcomes = r.summary.unwrap_or_default();
        draft.sentiment = r
            .sentiment
            .and_then(|s| s.parse::<Sentiment>().ok())
            .unwrap_or_default();
        if !r.follow_up_actions.is_empty() {
            draft.follow_up = Some(r.follow_up_actions.join("; "));
        }

        let reply = self
            .messages
            .into_iter()
            .map(|m| m.content)
            .find(|c| !c.trim().is_empty());

        ChatOutcome { draft, reply }
    }
}

/// Async HTTP client for the backend
pub struct ApiClient {
    http_client: Client,
    base_url: String,
}

impl ApiClient {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self> {
        let http_client = Client::builder()
            .timeout(timeout)
            .user_agent(concat!("hcp-crm/", env!("CARGO_PKG_VERSION")))
            .build()
            .context("Failed to build HTTP client")?;
        Ok(Self {
            http_client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Send a note to the chat logging endpoint
    pub async fn log_chat(&self, note: &str, today: NaiveDate) -> Result<ChatOutcome> {
        let url = format!("{}{}", self.base_url, LOG_CHAT_PATH);
        info!("POST {}", url);
        debug!("Chat note length: {} characters", note.chars().count());

        let response = self
            .http_client
            .post(&url)
            .json(&LogChatRequest {
                user_message: note,
                interaction_context: serde_json::json!({}),
            })
            .send()
            .await
            .with_context(|| format!("Failed to reach backend at {}", self.base_url))?;

        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            error!("Backend error ({}): {}", status, body);
            anyhow::bail!("Backend error ({}): {}", status, body);
        }

        let parsed: LogChatResponse = response
            .json()
            .await
            .context("Failed to parse backend response")?;
        Ok(parsed.into_outcome(today))
    }
}

/// [`ApiClient`] driven to completion on its own runtime.
///
/// The event loop is synchronous, so a chat submission blocks until the
/// request finishes or times out.
pub struct BlockingApi {
    client: ApiClient,
    runtime: Runtime,
}

impl BlockingApi {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self> {
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .context("Failed to create tokio runtime")?;
        Ok(Self {
            client: ApiClient::new(base_url, timeout)?,
            runtime,
        })
    }

    pub fn base_url(&self) -> &str {
        self.client.base_url()
    }
}

impl InteractionBackend for BlockingApi {
    fn log_chat(&self, note: &str, today: NaiveDate) -> Result<ChatOutcome> {
        self.runtime.block_on(self.client.log_chat(note, today))
    }
}
