use serde::Serialize;
use std::fmt;

pub type Score = u32;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum RiskLevel {
    Low,
    Medium,
    High,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Confidence {
    // The classifier never lands this far from a boundary; kept for the
    // serialized vocabulary.
    #[allow(dead_code)]
    Low,
    Medium,
    High,
}

impl RiskLevel {
    pub fn as_str(self) -> &'static str {
        match self {
            RiskLevel::Low => "LOW",
            RiskLevel::Medium => "MEDIUM",
            RiskLevel::High => "HIGH",
        }
    }
}

impl Confidence {
    pub fn as_str(self) -> &'static str {
        match self {
            Confidence::Low => "LOW",
            Confidence::Medium => "MEDIUM",
            Confidence::High => "HIGH",
        }
    }
}

impl fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Display for Confidence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum RuleCategory {
    NamePattern,
    CapabilityKeyword,
    ParameterPattern,
    BehavioralPattern,
    ContextAdjustment,
}

impl RuleCategory {
    pub fn as_str(self) -> &'static str {
        match self {
            RuleCategory::NamePattern => "name-pattern",
            RuleCategory::CapabilityKeyword => "capability-keyword",
            RuleCategory::ParameterPattern => "parameter-pattern",
            RuleCategory::BehavioralPattern => "behavioral-pattern",
            RuleCategory::ContextAdjustment => "context-adjustment",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RuleMatch {
    pub rule_id: &'static str,
    pub category: RuleCategory,
    pub weight: Score,
    pub triggered: bool,
    pub mitigated: bool,
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub reduction: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parameter: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AnalysisResult {
    pub risk_score: Score,
    pub risk_level: RiskLevel,
    pub confidence: Confidence,
    pub indicators: Vec<String>,
    pub context_notes: Vec<String>,
    pub matches: Vec<RuleMatch>,
}

impl AnalysisResult {
    pub fn flagged(&self) -> impl Iterator<Item = (&RuleMatch, &String)> {
        self.matches
            .iter()
            .filter(|m| !m.mitigated && !m.reduction)
            .zip(self.indicators.iter())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BatchEntry {
    pub index: usize,
    pub name: String,
    pub result: AnalysisResult,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct LevelCounts {
    pub high: usize,
    pub medium: usize,
    pub low: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BatchResult {
    pub total: usize,
    pub counts: LevelCounts,
    pub entries: Vec<BatchEntry>,
}

impl BatchResult {
    pub fn at_level(&self, level: RiskLevel) -> impl Iterator<Item = &BatchEntry> {
        self.entries
            .iter()
            .filter(move |entry| entry.result.risk_level == level)
    }

    pub fn highest_level(&self) -> Option<RiskLevel> {
        self.entries
            .iter()
            .map(|entry| entry.result.risk_level)
            .max()
    }
}
