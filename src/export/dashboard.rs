// src/export/dashboard.rs
// Static dashboard page embedding the RunResult as a JSON data block. The
// block is a pure function of the RunResult (byte-stable across
// regenerations); the page timestamp lives outside it.

use std::fmt::Write as _;
use std::path::Path;

use crate::export::ExportError;
use crate::pipeline::RunResult;

pub const DATA_BLOCK_ID: &str = "run-data";

/// Serialize the RunResult for embedding inside a `<script>` element.
/// serde_json already escapes control characters; the extra `</`  rewrite
/// keeps a `</script>` inside a title from terminating the element.
pub fn render_data_block(result: &RunResult) -> String {
    serde_json::to_string(result)
        .expect("RunResult always serializes")
        .replace("</", "<\\/")
}

pub fn render_dashboard(result: &RunResult, run_date: &str, generated_at: &str) -> String {
    let mut out = String::new();
    out.push_str("<!doctype html>\n<html lang=\"ko\">\n<head>\n<meta charset=\"utf-8\">\n");
    let _ = writeln!(out, "<title>보안·안전 뉴스 대시보드 {}</title>", run_date);
    out.push_str("</head>\n<body>\n");
    let _ = writeln!(out, "<h1>보안·안전 뉴스 대시보드 ({run_date})</h1>");
    let _ = writeln!(
        out,
        "<script id=\"{DATA_BLOCK_ID}\" type=\"application/json\">{}</script>",
        render_data_block(result)
    );
    // Minimal render of the same data for direct viewing; the JSON block is
    // the contract, this table is convenience.
    out.push_str("<table border=\"1\">\n<tr><th>키워드</th><th>제목</th><th>날짜</th><th>리스크</th></tr>\n");
    for r in &result.records {
        let _ = writeln!(
            out,
            "<tr><td>{}</td><td><a href=\"{}\">{}</a></td><td>{}</td><td>{}</td></tr>",
            html_escape::encode_text(&r.keyword),
            html_escape::encode_double_quoted_attribute(&r.link),
            html_escape::encode_text(&r.title),
            html_escape::encode_text(&r.date),
            r.risk
        );
    }
    out.push_str("</table>\n");
    let _ = writeln!(out, "<footer>generated {generated_at}</footer>");
    out.push_str("</body>\n</html>\n");
    out
}

pub fn write_dashboard(
    path: &Path,
    result: &RunResult,
    run_date: &str,
    generated_at: &str,
) -> Result<(), ExportError> {
    std::fs::write(path, render_dashboard(result, run_date, generated_at)).map_err(|source| {
        ExportError::Io {
            path: path.to_path_buf(),
            source,
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classify::Risk;
    use crate::pipeline::ClassifiedRecord;

    #[test]
    fn data_block_neutralizes_embedded_script_terminator() {
        let result = RunResult {
            records: vec![ClassifiedRecord {
                keyword: "k".into(),
                title: "</script><b>x".into(),
                link: "https://news.example/a".into(),
                date: "2025-01-06".into(),
                risk: Risk::Green,
            }],
            summaries: vec![],
        };
        let block = render_data_block(&result);
        assert!(!block.contains("</script>"));
        assert!(block.contains("<\\/script>"));
    }
}
