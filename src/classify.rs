// src/classify.rs
// Lexicon-driven risk triage for news titles, plus the per-keyword
// suppression policy applied on top of it.

use serde::{Deserialize, Serialize};

/// Severity of a single news title. Ordering is by severity:
/// `Green < Amber < Red`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Risk {
    Green,
    Amber,
    Red,
}

impl Risk {
    pub fn as_str(&self) -> &'static str {
        match self {
            Risk::Red => "RED",
            Risk::Amber => "AMBER",
            Risk::Green => "GREEN",
        }
    }
}

impl std::fmt::Display for Risk {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Two-tier trigger-word lists. RED is always tested before AMBER; the first
/// matching word decides, so a title carrying words from both tiers is RED.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct RiskLexicon {
    pub red: Vec<String>,
    pub amber: Vec<String>,
}

impl Default for RiskLexicon {
    fn default() -> Self {
        Self {
            red: ["사망", "침입", "해킹", "중대", "폭발", "재난"]
                .map(String::from)
                .to_vec(),
            amber: ["사고", "논란", "장애", "위험", "유출", "화재"]
                .map(String::from)
                .to_vec(),
        }
    }
}

/// Remove all whitespace so multi-word trigger phrases match regardless of
/// spacing variations in the source title ("보안 사고" vs "보안사고").
fn squash(s: &str) -> String {
    s.chars().filter(|c| !c.is_whitespace()).collect()
}

impl RiskLexicon {
    /// Classify a title. Pure and deterministic: same title + same lexicon
    /// always yields the same label.
    pub fn classify(&self, title: &str) -> Risk {
        let title = squash(title);
        if self.red.iter().any(|w| title.contains(squash(w).as_str())) {
            return Risk::Red;
        }
        if self
            .amber
            .iter()
            .any(|w| title.contains(squash(w).as_str()))
        {
            return Risk::Amber;
        }
        Risk::Green
    }
}

/// Per-keyword record suppression, applied after classification and before
/// aggregation. For a designated keyword (typically the operator's own
/// brand), RED/AMBER records are dropped from the run output entirely.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct SuppressionPolicy {
    pub keywords: Vec<String>,
}

impl SuppressionPolicy {
    pub fn suppresses(&self, keyword: &str, risk: Risk) -> bool {
        let flagged = match risk {
            Risk::Red | Risk::Amber => true,
            Risk::Green => false,
        };
        flagged && self.keywords.iter().any(|k| k == keyword)
    }
}
