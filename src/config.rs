// src/config.rs
// Behavioral configuration loaded from a TOML file, with compiled-in
// defaults and an env-var path override. Secrets stay in the environment
// (.env via dotenvy): OPENAI_API_KEY, SMTP_HOST/PORT/USER/PASS/FROM.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::classify::{RiskLexicon, SuppressionPolicy};
use crate::collect::google_rss::DEFAULT_FEED_URL;

pub const ENV_CONFIG_PATH: &str = "REPORT_CONFIG_PATH";
pub const DEFAULT_CONFIG_PATH: &str = "config/report.toml";

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ReportConfig {
    /// Directory where run artifacts are written.
    pub output_dir: PathBuf,
    /// Keyword store file.
    pub keyword_file: PathBuf,
    /// Feed URL template; `{q}` is replaced with the encoded keyword.
    pub feed_url: String,
    /// Per-keyword cap on collected entries.
    pub max_entries: usize,
    /// Courtesy pause between keyword iterations (rate-limit towards the
    /// upstream feed/API). Zero disables it.
    pub pacing_delay_ms: u64,
    /// Optional headless-browser command rendering the dashboard to PDF.
    /// `{input}` and `{output}` are substituted with the file paths.
    pub render_pdf_command: Option<String>,
    pub lexicon: RiskLexicon,
    pub suppression: SuppressionPolicy,
    pub summary: SummaryConfig,
    pub mail: MailConfig,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            output_dir: PathBuf::from("output"),
            keyword_file: PathBuf::from("keywords.json"),
            feed_url: DEFAULT_FEED_URL.to_string(),
            max_entries: 100,
            pacing_delay_ms: 1000,
            render_pdf_command: None,
            lexicon: RiskLexicon::default(),
            suppression: SuppressionPolicy {
                keywords: vec!["KT텔레캅".to_string()],
            },
            summary: SummaryConfig::default(),
            mail: MailConfig::default(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct SummaryConfig {
    pub model: String,
    pub max_tokens: u32,
    pub temperature: f32,
}

impl Default for SummaryConfig {
    fn default() -> Self {
        Self {
            model: "gpt-4o-mini".to_string(),
            max_tokens: 300,
            temperature: 0.3,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct MailConfig {
    pub to: Vec<String>,
    pub cc: Vec<String>,
    pub subject_prefix: String,
}

impl Default for MailConfig {
    fn default() -> Self {
        Self {
            to: Vec::new(),
            cc: Vec::new(),
            subject_prefix: "[자동] 보안·안전 보고".to_string(),
        }
    }
}

impl ReportConfig {
    pub fn load_from(path: &Path) -> Result<Self> {
        let raw = fs::read_to_string(path)
            .with_context(|| format!("reading report config from {}", path.display()))?;
        let cfg: ReportConfig = toml::from_str(&raw)
            .with_context(|| format!("parsing report config {}", path.display()))?;
        Ok(cfg)
    }

    /// Load using `$REPORT_CONFIG_PATH`, then `config/report.toml`, then the
    /// built-in defaults. A present-but-broken file is a hard error; a
    /// missing one is not.
    pub fn load_default() -> Result<Self> {
        if let Ok(p) = std::env::var(ENV_CONFIG_PATH) {
            return Self::load_from(&PathBuf::from(p));
        }
        let default = PathBuf::from(DEFAULT_CONFIG_PATH);
        if default.exists() {
            return Self::load_from(&default);
        }
        info!("no report config file found, using built-in defaults");
        Ok(Self::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_toml_keeps_defaults_for_the_rest() {
        let cfg: ReportConfig = toml::from_str(
            r#"
            max_entries = 25
            [suppression]
            keywords = ["자사브랜드"]
            "#,
        )
        .unwrap();
        assert_eq!(cfg.max_entries, 25);
        assert_eq!(cfg.suppression.keywords, vec!["자사브랜드"]);
        assert_eq!(cfg.feed_url, DEFAULT_FEED_URL);
        assert_eq!(cfg.summary.model, "gpt-4o-mini");
        assert!(!cfg.lexicon.red.is_empty());
    }

    #[serial_test::serial]
    #[test]
    fn env_path_takes_precedence_and_broken_file_errors() {
        let tmp = tempfile::tempdir().unwrap();
        let p = tmp.path().join("report.toml");
        std::fs::write(&p, "pacing_delay_ms = 0\n").unwrap();
        std::env::set_var(ENV_CONFIG_PATH, p.display().to_string());
        let cfg = ReportConfig::load_default().unwrap();
        assert_eq!(cfg.pacing_delay_ms, 0);

        std::fs::write(&p, "max_entries = \"many\"\n").unwrap();
        assert!(ReportConfig::load_default().is_err());
        std::env::remove_var(ENV_CONFIG_PATH);
    }
}
