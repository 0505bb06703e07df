// src/export/deck.rs
// Slide-deck artifact: a paginated HTML document with a fixed cover, one
// section per keyword digest, and a fixed closing section.

use std::fmt::Write as _;
use std::path::Path;

use crate::export::ExportError;
use crate::pipeline::KeywordSummary;

pub const DECK_TITLE: &str = "보안·안전 자동 보고";
pub const DECK_FOOTER: &str =
    "본 보고서는 외부 공개 뉴스 기반 자동 수집 자료이며\nAI 요약은 참고용으로 활용됩니다.";

fn esc(s: &str) -> String {
    // Escape first, then turn newlines into explicit breaks.
    html_escape::encode_text(s).replace('\n', "<br>")
}

pub fn render_deck(run_date: &str, summaries: &[KeywordSummary]) -> String {
    let mut out = String::new();
    out.push_str("<!doctype html>\n<html lang=\"ko\">\n<head>\n<meta charset=\"utf-8\">\n");
    let _ = writeln!(out, "<title>{}</title>", esc(DECK_TITLE));
    out.push_str(
        "<style>section{min-height:90vh;padding:2em;border-bottom:1px solid #ccc;page-break-after:always}</style>\n</head>\n<body>\n",
    );

    // Cover
    let _ = writeln!(
        out,
        "<section class=\"cover\">\n<h1>{}</h1>\n<p>{}</p>\n</section>",
        esc(DECK_TITLE),
        esc(run_date)
    );

    // One section per keyword, in run order.
    for s in summaries {
        let _ = writeln!(
            out,
            "<section>\n<h2>📰 {} 뉴스 요약</h2>\n<p>{}</p>\n</section>",
            esc(&s.keyword),
            esc(&s.digest)
        );
    }

    // Closing
    let _ = writeln!(
        out,
        "<section class=\"closing\">\n<h2>✅ 감사 및 보고 대응 안내</h2>\n<p>{}</p>\n</section>",
        esc(DECK_FOOTER)
    );

    out.push_str("</body>\n</html>\n");
    out
}

/// Write the deck. I/O errors propagate: an unwritable output directory is a
/// fatal condition for the run.
pub fn write_deck(
    path: &Path,
    run_date: &str,
    summaries: &[KeywordSummary],
) -> Result<(), ExportError> {
    std::fs::write(path, render_deck(run_date, summaries)).map_err(|source| ExportError::Io {
        path: path.to_path_buf(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deck_has_cover_sections_and_closing() {
        let summaries = vec![
            KeywordSummary {
                keyword: "에스원".into(),
                digest: "에스원 관련\n첫째 줄\n둘째 줄".into(),
            },
            KeywordSummary {
                keyword: "<주의>".into(),
                digest: "x".into(),
            },
        ];
        let html = render_deck("2025-01-06", &summaries);
        assert_eq!(html.matches("<section").count(), 4);
        assert!(html.contains("📰 에스원 뉴스 요약"));
        assert!(html.contains("첫째 줄<br>둘째 줄"));
        // Keyword text is escaped, not interpreted as markup.
        assert!(html.contains("&lt;주의&gt;"));
        assert!(html.contains("감사 및 보고 대응 안내"));
    }
}
