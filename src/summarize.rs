// src/summarize.rs
// Prose digest of a keyword's headlines via a chat-completion backend.
// The Summarizer never raises past its boundary: empty input and backend
// failures both map to fixed placeholder strings.

use std::sync::Arc;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{info, warn};

use crate::collect::NewsItem;
use crate::config::SummaryConfig;

/// Returned when a keyword produced no (surviving) headlines. No backend
/// call is made in that case.
pub const NO_NEWS_PLACEHOLDER: &str = "관련 뉴스가 없습니다.";
/// Returned when the backend call fails for any reason.
pub const SUMMARY_FAILED_PLACEHOLDER: &str = "AI 요약을 생성하지 못했습니다.";
/// At most this many titles go into one prompt.
pub const MAX_TITLES_PER_PROMPT: usize = 10;

#[derive(Debug, Error)]
pub enum SummarizeError {
    #[error("summarization credentials missing")]
    MissingCredentials,
    #[error("summarization request failed")]
    Http(#[from] reqwest::Error),
    #[error("summarization backend rejected the request: {0}")]
    Backend(String),
    #[error("summarization backend returned no text")]
    EmptyResponse,
}

/// Text-generation backend. Constructed explicitly at startup and passed in,
/// so tests can substitute a scripted client.
#[async_trait]
pub trait SummaryClient: Send + Sync {
    async fn digest(&self, prompt: &str) -> Result<String, SummarizeError>;
    fn name(&self) -> &'static str;
}

/// OpenAI chat-completions client. Low temperature and a bounded token
/// budget keep the digest short and consistent across runs.
pub struct OpenAiClient {
    http: reqwest::Client,
    api_key: String,
    model: String,
    max_tokens: u32,
    temperature: f32,
}

impl OpenAiClient {
    pub fn new(api_key: String, cfg: &SummaryConfig) -> Self {
        let http = reqwest::Client::builder()
            .user_agent("news-risk-reporter/0.1")
            .connect_timeout(std::time::Duration::from_secs(4))
            .timeout(std::time::Duration::from_secs(30))
            .build()
            .expect("reqwest client");
        Self {
            http,
            api_key,
            model: cfg.model.clone(),
            max_tokens: cfg.max_tokens,
            temperature: cfg.temperature,
        }
    }
}

#[async_trait]
impl SummaryClient for OpenAiClient {
    async fn digest(&self, prompt: &str) -> Result<String, SummarizeError> {
        if self.api_key.is_empty() {
            return Err(SummarizeError::MissingCredentials);
        }

        #[derive(Serialize)]
        struct Msg<'a> {
            role: &'a str,
            content: &'a str,
        }
        #[derive(Serialize)]
        struct Req<'a> {
            model: &'a str,
            messages: Vec<Msg<'a>>,
            temperature: f32,
            max_tokens: u32,
        }
        #[derive(Deserialize)]
        struct Resp {
            choices: Vec<Choice>,
        }
        #[derive(Deserialize)]
        struct Choice {
            message: ChoiceMsg,
        }
        #[derive(Deserialize)]
        struct ChoiceMsg {
            content: String,
        }

        let req = Req {
            model: &self.model,
            messages: vec![Msg {
                role: "user",
                content: prompt,
            }],
            temperature: self.temperature,
            max_tokens: self.max_tokens,
        };

        let resp = self
            .http
            .post("https://api.openai.com/v1/chat/completions")
            .bearer_auth(&self.api_key)
            .json(&req)
            .send()
            .await?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(SummarizeError::Backend(format!("{status}: {body}")));
        }

        let parsed: Resp = resp.json().await?;
        let text = parsed
            .choices
            .into_iter()
            .next()
            .map(|c| c.message.content.trim().to_string())
            .unwrap_or_default();
        if text.is_empty() {
            return Err(SummarizeError::EmptyResponse);
        }
        Ok(text)
    }

    fn name(&self) -> &'static str {
        "openai"
    }
}

/// Stand-in when no credentials are configured; every call reports
/// `MissingCredentials` so the stage is skipped with a log line.
pub struct DisabledClient;

#[async_trait]
impl SummaryClient for DisabledClient {
    async fn digest(&self, _prompt: &str) -> Result<String, SummarizeError> {
        Err(SummarizeError::MissingCredentials)
    }

    fn name(&self) -> &'static str {
        "disabled"
    }
}

/// Build the backend client from the environment: with `OPENAI_API_KEY` set
/// you get the real client, otherwise a disabled one.
pub fn build_summary_client(cfg: &SummaryConfig) -> Arc<dyn SummaryClient> {
    match std::env::var("OPENAI_API_KEY") {
        Ok(key) if !key.trim().is_empty() => Arc::new(OpenAiClient::new(key, cfg)),
        _ => {
            info!("OPENAI_API_KEY not set, AI summaries disabled for this run");
            Arc::new(DisabledClient)
        }
    }
}

pub struct Summarizer {
    client: Arc<dyn SummaryClient>,
}

impl Summarizer {
    pub fn new(client: Arc<dyn SummaryClient>) -> Self {
        Self { client }
    }

    pub fn compose_prompt(keyword: &str, items: &[NewsItem]) -> String {
        let titles = items
            .iter()
            .take(MAX_TITLES_PER_PROMPT)
            .map(|i| i.title.as_str())
            .collect::<Vec<_>>()
            .join(" / ");
        format!(
            "다음은 '{keyword}' 관련 보안·안전 뉴스 기사 제목들입니다. \
             이를 종합하여 '{keyword} 관련' 제목으로 시작하는 3줄 이내의 \
             간결한 핵심 요약본을 작성해 주세요. 제목: {titles}"
        )
    }

    /// One attempt, no retry: a stale digest for one keyword is less harmful
    /// than blocking the rest of the run.
    pub async fn summarize(&self, keyword: &str, items: &[NewsItem]) -> String {
        if items.is_empty() {
            return NO_NEWS_PLACEHOLDER.to_string();
        }
        let prompt = Self::compose_prompt(keyword, items);
        match self.client.digest(&prompt).await {
            Ok(text) => text,
            Err(SummarizeError::MissingCredentials) => {
                info!(keyword, "summary skipped: no credentials");
                SUMMARY_FAILED_PLACEHOLDER.to_string()
            }
            Err(e) => {
                warn!(error = ?e, keyword, client = self.client.name(), "summary failed");
                SUMMARY_FAILED_PLACEHOLDER.to_string()
            }
        }
    }
}
