// src/pipeline.rs
// The run itself: keyword-sequential collect -> classify -> filter ->
// summarize, accumulating the flat record list and per-keyword digests that
// the exporters consume. Deliberately single-pass and unparallelized; the
// pacing delay is what throttles us against the upstream feed.

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::classify::{Risk, RiskLexicon, SuppressionPolicy};
use crate::collect::{collect_keyword, FeedSource, NewsItem};
use crate::summarize::Summarizer;

/// One classified headline, as it appears in the record table and the
/// dashboard data block.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ClassifiedRecord {
    pub keyword: String,
    pub title: String,
    pub link: String,
    /// Calendar date of publication, `YYYY-MM-DD`.
    pub date: String,
    pub risk: Risk,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct KeywordSummary {
    pub keyword: String,
    pub digest: String,
}

/// The sole artifact crossing from the pipeline into the exporters. Owned by
/// one run invocation; nothing is shared or cached across runs.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct RunResult {
    pub records: Vec<ClassifiedRecord>,
    /// One entry per keyword, in keyword-store order.
    pub summaries: Vec<KeywordSummary>,
}

#[derive(Debug, Clone)]
pub struct PipelineOptions {
    pub max_entries: usize,
    pub pacing_delay: std::time::Duration,
}

impl Default for PipelineOptions {
    fn default() -> Self {
        Self {
            max_entries: 100,
            pacing_delay: std::time::Duration::from_secs(1),
        }
    }
}

fn to_record(keyword: &str, item: &NewsItem, risk: Risk) -> ClassifiedRecord {
    ClassifiedRecord {
        keyword: keyword.to_string(),
        title: item.title.clone(),
        link: item.link.clone(),
        date: item.published.format("%Y-%m-%d").to_string(),
        risk,
    }
}

/// Run the pipeline over `keywords` in order. An empty keyword list yields
/// an empty `RunResult` (a no-op run, not an error); per-keyword feed and
/// summary failures are absorbed by the respective components.
pub async fn run(
    keywords: &[String],
    source: &dyn FeedSource,
    summarizer: &Summarizer,
    lexicon: &RiskLexicon,
    policy: &SuppressionPolicy,
    opts: &PipelineOptions,
) -> RunResult {
    let mut result = RunResult::default();

    for (i, keyword) in keywords.iter().enumerate() {
        if i > 0 && !opts.pacing_delay.is_zero() {
            tokio::time::sleep(opts.pacing_delay).await;
        }

        let items = collect_keyword(source, keyword, opts.max_entries).await;
        let collected = items.len();

        let mut kept: Vec<NewsItem> = Vec::with_capacity(items.len());
        let mut suppressed = 0usize;
        for item in items {
            let risk = lexicon.classify(&item.title);
            if policy.suppresses(keyword, risk) {
                debug!(keyword, title = %item.title, %risk, "record suppressed by policy");
                suppressed += 1;
                continue;
            }
            result.records.push(to_record(keyword, &item, risk));
            kept.push(item);
        }

        let digest = summarizer.summarize(keyword, &kept).await;
        result.summaries.push(KeywordSummary {
            keyword: keyword.clone(),
            digest,
        });

        info!(
            keyword,
            collected,
            kept = kept.len(),
            suppressed,
            "keyword processed"
        );
    }

    info!(
        keywords = keywords.len(),
        records = result.records.len(),
        "pipeline run complete"
    );
    result
}
