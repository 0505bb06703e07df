// src/collect/mod.rs
pub mod google_rss;

use std::collections::HashSet;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::warn;

pub use google_rss::GoogleNewsSource;

/// One syndicated news entry, ephemeral within a single run.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct NewsItem {
    pub title: String,
    pub link: String,
    pub published: DateTime<Utc>,
}

#[derive(Debug, Error)]
pub enum FeedError {
    #[error("feed url could not be built")]
    Url(#[from] url::ParseError),
    #[error("feed http request failed")]
    Http(#[from] reqwest::Error),
    #[error("feed payload is not valid rss")]
    Parse(#[from] quick_xml::DeError),
}

/// A keyword-queryable news feed. One implementation talks to the real feed
/// endpoint; tests substitute fixture- or script-backed sources.
#[async_trait]
pub trait FeedSource: Send + Sync {
    /// Fetch at most `limit` entries for `keyword`, in whatever order the
    /// upstream returns them (callers must not assume recency ordering).
    async fn fetch(&self, keyword: &str, limit: usize) -> Result<Vec<NewsItem>, FeedError>;
    fn name(&self) -> &'static str;
}

/// Normalize a feed title: decode HTML entities, strip tags, collapse
/// whitespace.
pub fn normalize_title(s: &str) -> String {
    let mut out = html_escape::decode_html_entities(s).to_string();

    static RE_TAGS: once_cell::sync::OnceCell<regex::Regex> = once_cell::sync::OnceCell::new();
    let re_tags = RE_TAGS.get_or_init(|| regex::Regex::new(r"(?is)</?[^>]+>").unwrap());
    out = re_tags.replace_all(&out, "").to_string();

    static RE_WS: once_cell::sync::OnceCell<regex::Regex> = once_cell::sync::OnceCell::new();
    let re_ws = RE_WS.get_or_init(|| regex::Regex::new(r"\s+").unwrap());
    out = re_ws.replace_all(&out, " ").to_string();

    out.trim().to_string()
}

/// Drop exact (title, link) duplicates, keeping first-seen order.
pub fn dedup_items(items: Vec<NewsItem>) -> Vec<NewsItem> {
    let mut seen: HashSet<(String, String)> = HashSet::new();
    let mut out = Vec::with_capacity(items.len());
    for item in items {
        if seen.insert((item.title.clone(), item.link.clone())) {
            out.push(item);
        }
    }
    out
}

/// Fail-soft collection for one keyword: a fetch/parse error is logged and
/// yields an empty batch so the rest of the run keeps going.
pub async fn collect_keyword(source: &dyn FeedSource, keyword: &str, limit: usize) -> Vec<NewsItem> {
    match source.fetch(keyword, limit).await {
        Ok(items) => dedup_items(items),
        Err(e) => {
            warn!(error = ?e, keyword, source = source.name(), "feed fetch failed, continuing with empty batch");
            Vec::new()
        }
    }
}
