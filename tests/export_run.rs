// tests/export_run.rs
// Export bundle on disk: date-stamped filenames, CSV content, and the
// empty-store no-op contract of run_report.

use std::sync::Arc;

use async_trait::async_trait;

use news_risk_reporter::classify::Risk;
use news_risk_reporter::collect::{FeedError, FeedSource, NewsItem};
use news_risk_reporter::config::ReportConfig;
use news_risk_reporter::export::export_run;
use news_risk_reporter::keywords::KeywordStore;
use news_risk_reporter::pipeline::{ClassifiedRecord, KeywordSummary, RunResult};
use news_risk_reporter::summarize::{SummarizeError, SummaryClient};

fn sample_result() -> RunResult {
    RunResult {
        records: vec![ClassifiedRecord {
            keyword: "에스원".into(),
            title: "해킹 정황 포착".into(),
            link: "https://news.example/1".into(),
            date: "2025-01-06".into(),
            risk: Risk::Red,
        }],
        summaries: vec![KeywordSummary {
            keyword: "에스원".into(),
            digest: "에스원 관련 보안 뉴스 요약".into(),
        }],
    }
}

#[tokio::test]
async fn bundle_is_written_with_date_stamped_names() {
    let dir = tempfile::tempdir().unwrap();
    let cfg = ReportConfig {
        output_dir: dir.path().join("out"),
        ..ReportConfig::default()
    };

    let paths = export_run(&cfg, &sample_result(), "2025-01-06", "2025-01-06T18:00:00+09:00", None)
        .await
        .unwrap();

    assert!(paths.deck.ends_with("report_2025-01-06.html"));
    assert!(paths.table.ends_with("records_2025-01-06.csv"));
    assert!(paths.dashboard.ends_with("dashboard_2025-01-06.html"));
    assert!(paths.pdf.is_none());

    for p in [&paths.deck, &paths.table, &paths.dashboard] {
        assert!(p.exists(), "missing artifact {}", p.display());
    }
    let csv = std::fs::read_to_string(&paths.table).unwrap();
    assert!(csv.contains("해킹 정황 포착"));
    assert!(csv.contains(",RED"));
}

#[tokio::test]
async fn unwritable_output_dir_is_fatal() {
    let dir = tempfile::tempdir().unwrap();
    // A regular file where the output directory should be.
    let blocked = dir.path().join("out");
    std::fs::write(&blocked, "x").unwrap();
    let cfg = ReportConfig {
        output_dir: blocked,
        ..ReportConfig::default()
    };
    let err = export_run(&cfg, &sample_result(), "2025-01-06", "t", None).await;
    assert!(err.is_err());
}

/// Feed/summary stubs that panic when touched: an empty keyword store must
/// never reach collection, summarization, or export.
struct UntouchableFeed;

#[async_trait]
impl FeedSource for UntouchableFeed {
    async fn fetch(&self, _k: &str, _l: usize) -> Result<Vec<NewsItem>, FeedError> {
        panic!("feed must not be called for an empty keyword store");
    }
    fn name(&self) -> &'static str {
        "untouchable"
    }
}

struct UntouchableClient;

#[async_trait]
impl SummaryClient for UntouchableClient {
    async fn digest(&self, _p: &str) -> Result<String, SummarizeError> {
        panic!("summarizer must not be called for an empty keyword store");
    }
    fn name(&self) -> &'static str {
        "untouchable"
    }
}

#[tokio::test]
async fn empty_store_produces_no_artifacts() {
    let dir = tempfile::tempdir().unwrap();
    let store_path = dir.path().join("keywords.json");
    std::fs::write(&store_path, "[]").unwrap();
    let store = KeywordStore::load(&store_path).unwrap();

    let out_dir = dir.path().join("out");
    let cfg = ReportConfig {
        output_dir: out_dir.clone(),
        keyword_file: store_path,
        ..ReportConfig::default()
    };

    let paths = news_risk_reporter::app::run_report(
        &cfg,
        &store,
        &UntouchableFeed,
        Arc::new(UntouchableClient),
    )
    .await
    .unwrap();

    assert!(paths.is_none());
    assert!(!out_dir.exists(), "no exporter call may create the output dir");
}
