// src/lib.rs
// Public library surface for integration tests (and potential reuse).

pub mod app;
pub mod classify;
pub mod collect;
pub mod config;
pub mod export;
pub mod keywords;
pub mod pipeline;
pub mod summarize;

// ---- Re-exports for stable public API ----
pub use crate::classify::{Risk, RiskLexicon, SuppressionPolicy};
pub use crate::collect::{FeedSource, NewsItem};
pub use crate::config::ReportConfig;
pub use crate::keywords::KeywordStore;
pub use crate::pipeline::{ClassifiedRecord, KeywordSummary, RunResult};
pub use crate::summarize::{Summarizer, SummaryClient};
