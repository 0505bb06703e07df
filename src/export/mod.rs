// src/export/mod.rs
pub mod dashboard;
pub mod deck;
pub mod mailer;
pub mod table;

use std::path::PathBuf;

use anyhow::{Context, Result};
use thiserror::Error;
use tracing::{debug, warn};

use crate::config::ReportConfig;
use crate::pipeline::RunResult;

pub use mailer::Mailer;

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("writing report artifact {}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("writing record table")]
    Csv(#[from] csv::Error),
}

/// Artifacts produced by one export pass, with date-stamped filenames.
#[derive(Debug, Clone)]
pub struct ExportPaths {
    pub deck: PathBuf,
    pub table: PathBuf,
    pub dashboard: PathBuf,
    pub pdf: Option<PathBuf>,
}

/// Write the artifact bundle for a completed run and, only after every
/// artifact is on disk, hand the deck to the mailer. Deck/table/dashboard
/// failures are fatal; the PDF render and the mail are best-effort.
pub async fn export_run(
    cfg: &ReportConfig,
    result: &RunResult,
    run_date: &str,
    generated_at: &str,
    mailer: Option<&Mailer>,
) -> Result<ExportPaths> {
    std::fs::create_dir_all(&cfg.output_dir)
        .with_context(|| format!("creating output dir {}", cfg.output_dir.display()))?;

    let mut paths = ExportPaths {
        deck: cfg.output_dir.join(format!("report_{run_date}.html")),
        table: cfg.output_dir.join(format!("records_{run_date}.csv")),
        dashboard: cfg.output_dir.join(format!("dashboard_{run_date}.html")),
        pdf: None,
    };

    deck::write_deck(&paths.deck, run_date, &result.summaries)?;
    table::write_records(&paths.table, &result.records)?;
    dashboard::write_dashboard(&paths.dashboard, result, run_date, generated_at)?;

    paths.pdf = render_pdf(cfg, &paths, run_date).await;

    if let Some(mailer) = mailer {
        let body = format!(
            "보안·안전 자동 보고 ({run_date})\n기사 {}건, 키워드 {}건 요약 첨부.",
            result.records.len(),
            result.summaries.len()
        );
        if let Err(e) = mailer.send_report(run_date, &body, &paths.deck).await {
            warn!(error = ?e, "report mail failed, artifacts are still on disk");
        }
    }

    Ok(paths)
}

/// Optional headless-browser render of the dashboard. Configured as a
/// command template with `{input}` / `{output}` placeholders; any failure is
/// logged and swallowed.
async fn render_pdf(cfg: &ReportConfig, paths: &ExportPaths, run_date: &str) -> Option<PathBuf> {
    let template = cfg.render_pdf_command.as_deref()?;
    let output = cfg.output_dir.join(format!("dashboard_{run_date}.pdf"));

    let mut parts = template.split_whitespace().map(|p| {
        p.replace("{input}", &paths.dashboard.display().to_string())
            .replace("{output}", &output.display().to_string())
    });
    let Some(program) = parts.next() else {
        debug!("render_pdf_command is empty, skipping pdf render");
        return None;
    };

    let status = tokio::process::Command::new(&program)
        .args(parts)
        .status()
        .await;
    match status {
        Ok(s) if s.success() && output.exists() => Some(output),
        Ok(s) => {
            warn!(command = template, status = ?s, "pdf render did not produce output");
            None
        }
        Err(e) => {
            warn!(error = ?e, command = template, "pdf render failed to start");
            None
        }
    }
}
