pub mod builtin;

use crate::error::Result;
use crate::types::verdict::{RuleCategory, Score};
use regex::Regex;

pub use builtin::BUILTIN_RULES;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Target {
    Name,
    Description,
    ParameterName,
    ParameterDescription,
    FullText,
    NameOrDescription,
}

#[derive(Debug, Clone, Copy)]
pub enum Matcher {
    Pattern(&'static str),
    Keywords(&'static [&'static str]),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Effect {
    Add,
    // Runs after every additive rule, and only below the medium threshold.
    Reduce,
}

#[derive(Debug, Clone, Copy)]
pub struct Mitigation {
    pub scope: Target,
    pub keywords: &'static [&'static str],
}

#[derive(Debug, Clone, Copy)]
pub struct Rule {
    pub id: &'static str,
    pub category: RuleCategory,
    pub target: Target,
    pub matcher: Matcher,
    pub weight: Score,
    pub effect: Effect,
    pub label: &'static str,
    pub mitigation: Option<Mitigation>,
}

#[derive(Debug)]
enum CompiledMatcher {
    Pattern(Regex),
    Keywords(&'static [&'static str]),
}

#[derive(Debug)]
pub struct CompiledRule {
    pub rule: &'static Rule,
    matcher: CompiledMatcher,
}

impl CompiledRule {
    pub fn is_match(&self, text: &str) -> bool {
        match &self.matcher {
            CompiledMatcher::Pattern(regex) => regex.is_match(text),
            CompiledMatcher::Keywords(keywords) => contains_any(&text.to_lowercase(), keywords),
        }
    }
}

impl Mitigation {
    pub fn applies_to(&self, text: &str) -> bool {
        contains_any(&text.to_lowercase(), self.keywords)
    }
}

fn contains_any(haystack: &str, keywords: &[&str]) -> bool {
    keywords.iter().any(|keyword| haystack.contains(keyword))
}

#[derive(Debug)]
pub struct RuleSet {
    rules: Vec<CompiledRule>,
}

impl RuleSet {
    pub fn builtin() -> Result<Self> {
        Self::compile(BUILTIN_RULES, &[])
    }

    pub fn compile(rules: &'static [Rule], disabled: &[String]) -> Result<Self> {
        for id in disabled {
            if !rules.iter().any(|rule| rule.id == id) {
                tracing::warn!(rule = %id, "ignoring unknown rule id in disabled list");
            }
        }

        let mut compiled = Vec::with_capacity(rules.len());
        for rule in rules {
            if disabled.iter().any(|id| id == rule.id) {
                tracing::debug!(rule = rule.id, "rule disabled by configuration");
                continue;
            }
            let matcher = match rule.matcher {
                Matcher::Pattern(pattern) => CompiledMatcher::Pattern(Regex::new(pattern)?),
                Matcher::Keywords(keywords) => CompiledMatcher::Keywords(keywords),
            };
            compiled.push(CompiledRule { rule, matcher });
        }
        Ok(Self { rules: compiled })
    }

    pub fn iter(&self) -> impl Iterator<Item = &CompiledRule> {
        self.rules.iter()
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }
}
