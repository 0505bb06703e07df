// tests/dashboard_idempotent.rs
// The embedded data block must be byte-stable for the same RunResult,
// independent of the page generation timestamp.

use news_risk_reporter::classify::Risk;
use news_risk_reporter::export::dashboard::{render_dashboard, render_data_block, DATA_BLOCK_ID};
use news_risk_reporter::pipeline::{ClassifiedRecord, KeywordSummary, RunResult};

fn sample_result() -> RunResult {
    RunResult {
        records: vec![
            ClassifiedRecord {
                keyword: "에스원".into(),
                title: "해킹 정황 포착".into(),
                link: "https://news.example/1".into(),
                date: "2025-01-06".into(),
                risk: Risk::Red,
            },
            ClassifiedRecord {
                keyword: "쉴더스".into(),
                title: "신규 관제 센터 개소".into(),
                link: "https://news.example/2".into(),
                date: "2025-01-06".into(),
                risk: Risk::Green,
            },
        ],
        summaries: vec![KeywordSummary {
            keyword: "에스원".into(),
            digest: "에스원 관련 요약".into(),
        }],
    }
}

fn extract_data_block(page: &str) -> &str {
    let open = format!("<script id=\"{DATA_BLOCK_ID}\" type=\"application/json\">");
    let start = page.find(&open).expect("data block present") + open.len();
    let end = start + page[start..].find("</script>").expect("block terminated");
    &page[start..end]
}

#[test]
fn data_block_is_byte_stable_across_regenerations() {
    let result = sample_result();
    assert_eq!(render_data_block(&result), render_data_block(&result));

    // Different generation timestamps must not leak into the data block.
    let page_a = render_dashboard(&result, "2025-01-06", "2025-01-06T18:00:00+09:00");
    let page_b = render_dashboard(&result, "2025-01-06", "2025-01-07T03:12:45+09:00");
    assert_eq!(extract_data_block(&page_a), extract_data_block(&page_b));
}

#[test]
fn data_block_round_trips_through_serde() {
    let result = sample_result();
    let page = render_dashboard(&result, "2025-01-06", "now");
    let parsed: RunResult = serde_json::from_str(extract_data_block(&page)).unwrap();
    assert_eq!(parsed, result);
}
