// src/app.rs
// Top-level wiring: decide the run mode once at the entry point, construct
// the external clients explicitly, then either run one batch report or drop
// into the interactive keyword-management loop.

use std::sync::Arc;

use anyhow::{Context, Result};
use chrono::Local;
use inquire::{Confirm, InquireError, Select, Text};
use tracing::info;

use crate::collect::{FeedSource, GoogleNewsSource};
use crate::config::ReportConfig;
use crate::export::{export_run, ExportPaths, Mailer};
use crate::keywords::KeywordStore;
use crate::pipeline::{self, PipelineOptions};
use crate::summarize::{build_summary_client, Summarizer, SummaryClient};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunMode {
    Interactive,
    Batch,
}

/// Decide the mode once, from argv and the environment. `--batch` wins; the
/// `GITHUB_ACTIONS=true` variable covers the scheduled-workflow deployment.
pub fn decide_run_mode<A, E>(mut args: A, env: E) -> RunMode
where
    A: Iterator<Item = String>,
    E: Fn(&str) -> Option<String>,
{
    if args.any(|a| a == "--batch") {
        return RunMode::Batch;
    }
    if env("GITHUB_ACTIONS").as_deref() == Some("true") {
        return RunMode::Batch;
    }
    RunMode::Interactive
}

/// Entry point shared by both modes. Fatal errors (corrupt store, broken
/// config, unwritable output dir) propagate to `main`.
pub async fn run(mode: RunMode) -> Result<()> {
    let cfg = ReportConfig::load_default()?;
    let mut store = KeywordStore::load(&cfg.keyword_file).context("loading keyword store")?;
    let source = GoogleNewsSource::from_template(&cfg.feed_url);
    let client = build_summary_client(&cfg.summary);

    match mode {
        RunMode::Batch => {
            info!("batch run starting");
            run_report(&cfg, &store, &source, client).await?;
            Ok(())
        }
        RunMode::Interactive => interactive_loop(&cfg, &mut store, &source, client).await,
    }
}

/// One full report run. Returns `Ok(None)` for an empty keyword store: a
/// no-op run with no exporter calls, not an error.
pub async fn run_report(
    cfg: &ReportConfig,
    store: &KeywordStore,
    source: &dyn FeedSource,
    client: Arc<dyn SummaryClient>,
) -> Result<Option<ExportPaths>> {
    if store.is_empty() {
        info!("keyword store is empty, nothing to report");
        return Ok(None);
    }

    let summarizer = Summarizer::new(client);
    let opts = PipelineOptions {
        max_entries: cfg.max_entries,
        pacing_delay: std::time::Duration::from_millis(cfg.pacing_delay_ms),
    };
    let result = pipeline::run(
        store.list(),
        source,
        &summarizer,
        &cfg.lexicon,
        &cfg.suppression,
        &opts,
    )
    .await;

    let now = Local::now();
    let run_date = now.format("%Y-%m-%d").to_string();
    let generated_at = now.to_rfc3339();
    let mailer = Mailer::from_env(&cfg.mail)?;
    let paths = export_run(cfg, &result, &run_date, &generated_at, mailer.as_ref()).await?;
    info!(deck = %paths.deck.display(), "report artifacts written");
    Ok(Some(paths))
}

const MENU_LIST: &str = "키워드 목록 보기";
const MENU_ADD: &str = "키워드 추가";
const MENU_EDIT: &str = "키워드 수정";
const MENU_DELETE: &str = "키워드 삭제";
const MENU_RUN: &str = "보고서 생성 실행";
const MENU_QUIT: &str = "종료";

/// Keyword management plus a manual run-now trigger. Store mutation errors
/// and run failures are shown to the operator, not just logged.
async fn interactive_loop(
    cfg: &ReportConfig,
    store: &mut KeywordStore,
    source: &dyn FeedSource,
    client: Arc<dyn SummaryClient>,
) -> Result<()> {
    loop {
        let choice = Select::new(
            "보안·안전 자동 보고",
            vec![MENU_LIST, MENU_ADD, MENU_EDIT, MENU_DELETE, MENU_RUN, MENU_QUIT],
        )
        .prompt();

        let choice = match choice {
            Ok(c) => c,
            Err(InquireError::OperationCanceled | InquireError::OperationInterrupted) => break,
            Err(e) => return Err(e.into()),
        };

        match choice {
            MENU_LIST => {
                if store.is_empty() {
                    println!("(등록된 키워드가 없습니다)");
                }
                for (i, k) in store.list().iter().enumerate() {
                    println!("{:>3}. {k}", i + 1);
                }
            }
            MENU_ADD => {
                if let Some(value) = prompt_text(Text::new("새 키워드:"))? {
                    report_outcome(store.add(&value));
                }
            }
            MENU_EDIT => {
                let Some(index) = pick_keyword(store, "수정할 키워드:")? else {
                    continue;
                };
                let current = store.list()[index].clone();
                if let Some(value) =
                    prompt_text(Text::new("새 값:").with_initial_value(&current))?
                {
                    report_outcome(store.update(index, &value));
                }
            }
            MENU_DELETE => {
                let Some(index) = pick_keyword(store, "삭제할 키워드:")? else {
                    continue;
                };
                let confirmed = Confirm::new("정말 삭제하시겠습니까?")
                    .with_default(false)
                    .prompt()
                    .unwrap_or(false);
                if confirmed {
                    report_outcome(store.remove(index));
                }
            }
            MENU_RUN => match run_report(cfg, store, source, client.clone()).await {
                Ok(Some(paths)) => {
                    println!("보고서 생성 완료: {}", paths.deck.display());
                }
                Ok(None) => println!("키워드가 없어 실행할 내용이 없습니다."),
                Err(e) => println!("실행 중 오류 발생: {e:#}"),
            },
            _ => break,
        }
    }
    Ok(())
}

fn prompt_text(prompt: Text<'_, '_>) -> Result<Option<String>> {
    match prompt.prompt() {
        Ok(v) if !v.trim().is_empty() => Ok(Some(v)),
        Ok(_) => Ok(None),
        Err(InquireError::OperationCanceled | InquireError::OperationInterrupted) => Ok(None),
        Err(e) => Err(e.into()),
    }
}

fn pick_keyword(store: &KeywordStore, prompt: &str) -> Result<Option<usize>> {
    if store.is_empty() {
        println!("(등록된 키워드가 없습니다)");
        return Ok(None);
    }
    match Select::new(prompt, store.list().to_vec()).raw_prompt() {
        Ok(opt) => Ok(Some(opt.index)),
        Err(InquireError::OperationCanceled | InquireError::OperationInterrupted) => Ok(None),
        Err(e) => Err(e.into()),
    }
}

fn report_outcome(result: Result<(), crate::keywords::KeywordStoreError>) {
    match result {
        Ok(()) => println!("저장되었습니다."),
        Err(e) => println!("⚠ {e}"),
    }
}
