// tests/summarizer_placeholders.rs
// Summarizer boundary behavior: placeholders instead of propagated errors,
// zero backend calls on empty input, bounded prompt size.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use news_risk_reporter::collect::NewsItem;
use news_risk_reporter::summarize::{
    SummarizeError, Summarizer, SummaryClient, MAX_TITLES_PER_PROMPT, NO_NEWS_PLACEHOLDER,
    SUMMARY_FAILED_PLACEHOLDER,
};

fn item(title: &str) -> NewsItem {
    NewsItem {
        title: title.into(),
        link: format!("https://news.example/{title}"),
        published: DateTime::<Utc>::from_timestamp(1_736_155_800, 0).unwrap(),
    }
}

/// Records every prompt it receives; optionally fails each call.
struct RecordingClient {
    calls: AtomicUsize,
    prompts: Mutex<Vec<String>>,
    fail: bool,
}

impl RecordingClient {
    fn new(fail: bool) -> Arc<Self> {
        Arc::new(Self {
            calls: AtomicUsize::new(0),
            prompts: Mutex::new(Vec::new()),
            fail,
        })
    }
}

#[async_trait]
impl SummaryClient for RecordingClient {
    async fn digest(&self, prompt: &str) -> Result<String, SummarizeError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.prompts.lock().unwrap().push(prompt.to_string());
        if self.fail {
            Err(SummarizeError::Backend("quota exceeded".into()))
        } else {
            Ok("digest".to_string())
        }
    }
    fn name(&self) -> &'static str {
        "recording"
    }
}

#[tokio::test]
async fn empty_input_returns_no_news_without_backend_call() {
    let client = RecordingClient::new(false);
    let summarizer = Summarizer::new(client.clone());
    let out = summarizer.summarize("에스원", &[]).await;
    assert_eq!(out, NO_NEWS_PLACEHOLDER);
    assert_eq!(client.calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn backend_failure_yields_placeholder_not_error() {
    let client = RecordingClient::new(true);
    let summarizer = Summarizer::new(client.clone());
    let out = summarizer.summarize("에스원", &[item("해킹 발생")]).await;
    assert_eq!(out, SUMMARY_FAILED_PLACEHOLDER);
    // Single attempt, no retry.
    assert_eq!(client.calls.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn prompt_is_capped_to_ten_titles() {
    let client = RecordingClient::new(false);
    let summarizer = Summarizer::new(client.clone());
    let items: Vec<NewsItem> = (0..25).map(|i| item(&format!("기사{i:02}"))).collect();
    summarizer.summarize("에스원", &items).await;

    let prompts = client.prompts.lock().unwrap();
    assert_eq!(prompts.len(), 1);
    let included = (0..25)
        .filter(|i| prompts[0].contains(&format!("기사{i:02}")))
        .count();
    assert_eq!(included, MAX_TITLES_PER_PROMPT);
    // The keyword itself is part of the fixed template.
    assert!(prompts[0].contains("'에스원'"));
}
