pub mod batch;
pub mod schema;

use crate::error::Result;
use crate::rules::{CompiledRule, Effect, Mitigation, RuleSet, Target, BUILTIN_RULES};
use crate::types::config::{AnalyzerConfig, Policy};
use crate::types::descriptor::ToolDescriptor;
use crate::types::verdict::{
    AnalysisResult, Confidence, RiskLevel, RuleCategory, RuleMatch, Score,
};
use schema::SchemaOutcome;

#[derive(Debug)]
pub struct Analyzer {
    rules: RuleSet,
    policy: Policy,
}

struct Subject<'a> {
    name: &'a str,
    description: &'a str,
    full_text: String,
    schema: SchemaOutcome,
}

impl<'a> Subject<'a> {
    fn new(name: &'a str, description: &'a str, input_schema: Option<&str>) -> Self {
        Self {
            name,
            description,
            full_text: format!("{} {} {}", name, description, input_schema.unwrap_or_default())
                .to_lowercase(),
            schema: schema::inspect(input_schema),
        }
    }

    fn any_text(&self, target: Target, check: impl Fn(&str) -> bool) -> bool {
        match target {
            Target::Name => check(self.name),
            Target::Description => check(self.description),
            Target::FullText => check(&self.full_text),
            Target::NameOrDescription => check(self.name) || check(self.description),
            // Read per property in `evaluate_parameters`.
            Target::ParameterName | Target::ParameterDescription => false,
        }
    }

    fn matches(&self, compiled: &CompiledRule) -> bool {
        self.any_text(compiled.rule.target, |text| compiled.is_match(text))
    }

    fn mitigated(&self, mitigation: &Mitigation) -> bool {
        self.any_text(mitigation.scope, |text| mitigation.applies_to(text))
    }
}

#[derive(Default)]
struct Tally {
    score: Score,
    indicators: Vec<String>,
    context_notes: Vec<String>,
    matches: Vec<RuleMatch>,
}

impl Tally {
    fn record(&mut self, compiled: &CompiledRule, mitigated: bool, parameter: Option<&str>) {
        let rule = compiled.rule;
        if mitigated {
            self.context_notes.push(mitigated_note(compiled, parameter));
        } else {
            self.score += rule.weight;
            self.indicators.push(indicator(compiled, parameter));
        }
        self.matches.push(RuleMatch {
            rule_id: rule.id,
            category: rule.category,
            weight: rule.weight,
            triggered: true,
            mitigated,
            reduction: false,
            parameter: parameter.map(str::to_string),
        });
    }
}

fn indicator(compiled: &CompiledRule, parameter: Option<&str>) -> String {
    let rule = compiled.rule;
    match rule.category {
        RuleCategory::NamePattern => format!("Suspicious tool name: {}", rule.label),
        RuleCategory::CapabilityKeyword => format!("Dangerous capability: {}", rule.label),
        RuleCategory::ParameterPattern => format!(
            "Dangerous input parameter \"{}\" ({})",
            parameter.unwrap_or_default(),
            rule.label
        ),
        RuleCategory::BehavioralPattern => format!("Behavioral pattern: {}", rule.label),
        RuleCategory::ContextAdjustment => format!("{} detected", rule.label),
    }
}

fn mitigated_note(compiled: &CompiledRule, parameter: Option<&str>) -> String {
    let rule = compiled.rule;
    match rule.category {
        RuleCategory::NamePattern => {
            format!("Tool name suggests \"{}\" but in benign context", rule.label)
        }
        RuleCategory::ParameterPattern => format!(
            "Parameter \"{}\" ({}) has safety context",
            parameter.unwrap_or_default(),
            rule.label
        ),
        _ => format!(
            "Capability \"{}\" detected but with safety context",
            rule.label
        ),
    }
}

impl Analyzer {
    pub fn new(rules: RuleSet, policy: Policy) -> Self {
        Self { rules, policy }
    }

    pub fn builtin() -> Result<Self> {
        Ok(Self::new(RuleSet::builtin()?, Policy::default()))
    }

    pub fn from_config(config: &AnalyzerConfig) -> Result<Self> {
        config.validate()?;
        let rules = RuleSet::compile(BUILTIN_RULES, config.disabled_rules())?;
        Ok(Self::new(rules, config.policy()))
    }

    pub fn policy(&self) -> &Policy {
        &self.policy
    }

    pub fn rules(&self) -> &RuleSet {
        &self.rules
    }

    pub fn analyze_descriptor(&self, descriptor: &ToolDescriptor) -> AnalysisResult {
        self.analyze(
            &descriptor.name,
            &descriptor.description,
            descriptor.schema(),
        )
    }

    pub fn analyze(
        &self,
        name: &str,
        description: &str,
        input_schema: Option<&str>,
    ) -> AnalysisResult {
        let subject = Subject::new(name, description, input_schema);

        let mut tally = Tally::default();
        let mut parameters_done = false;
        let mut reductions = Vec::new();

        for compiled in self.rules.iter() {
            if compiled.rule.effect == Effect::Reduce {
                reductions.push(compiled);
                continue;
            }
            if compiled.rule.target == Target::ParameterName {
                // The whole parameter group runs once, at its first rule.
                if !parameters_done {
                    report_schema_problem(&subject.schema, &mut tally);
                    let parameter_rules: Vec<&CompiledRule> = self
                        .rules
                        .iter()
                        .filter(|c| c.rule.target == Target::ParameterName)
                        .collect();
                    evaluate_parameters(&parameter_rules, &subject.schema, &mut tally);
                    parameters_done = true;
                }
                continue;
            }
            if !subject.matches(compiled) {
                continue;
            }
            let mitigated = compiled
                .rule
                .mitigation
                .is_some_and(|mitigation| subject.mitigated(&mitigation));
            tally.record(compiled, mitigated, None);
        }
        if !parameters_done {
            report_schema_problem(&subject.schema, &mut tally);
        }

        for compiled in reductions {
            if !subject.matches(compiled) || tally.score >= self.policy.medium_threshold {
                continue;
            }
            tally.score = tally
                .score
                .saturating_sub(self.policy.legitimate_reduction);
            tally
                .context_notes
                .push(format!("{} detected, risk reduced", compiled.rule.label));
            tally.matches.push(RuleMatch {
                rule_id: compiled.rule.id,
                category: compiled.rule.category,
                weight: self.policy.legitimate_reduction,
                triggered: true,
                mitigated: false,
                reduction: true,
                parameter: None,
            });
        }

        let (risk_level, confidence) = classify(tally.score, &self.policy);
        tracing::debug!(
            tool = name,
            score = tally.score,
            level = %risk_level,
            indicators = tally.indicators.len(),
            "tool analyzed"
        );

        AnalysisResult {
            risk_score: tally.score,
            risk_level,
            confidence,
            indicators: tally.indicators,
            context_notes: tally.context_notes,
            matches: tally.matches,
        }
    }
}

fn report_schema_problem(schema: &SchemaOutcome, tally: &mut Tally) {
    match schema {
        SchemaOutcome::Malformed(error) => tally
            .context_notes
            .push(format!("Could not parse input schema: {error}")),
        SchemaOutcome::NotObject => tally
            .context_notes
            .push("Input schema is not a JSON object".to_string()),
        SchemaOutcome::Absent | SchemaOutcome::Properties(_) => {}
    }
}

// Property by property in declaration order, each property against every rule.
fn evaluate_parameters(rules: &[&CompiledRule], schema: &SchemaOutcome, tally: &mut Tally) {
    let SchemaOutcome::Properties(properties) = schema else {
        return;
    };
    for (parameter, parameter_description) in properties {
        let lowered = parameter.to_lowercase();
        for compiled in rules {
            if !compiled.is_match(&lowered) {
                continue;
            }
            let mitigated = compiled.rule.mitigation.is_some_and(|mitigation| {
                mitigation.scope == Target::ParameterDescription
                    && mitigation.applies_to(parameter_description)
            });
            tally.record(compiled, mitigated, Some(parameter));
        }
    }
}

pub fn classify(score: Score, policy: &Policy) -> (RiskLevel, Confidence) {
    if score >= policy.high_threshold {
        let confidence = if score >= policy.high_confidence_score {
            Confidence::High
        } else {
            Confidence::Medium
        };
        (RiskLevel::High, confidence)
    } else if score >= policy.medium_threshold {
        (RiskLevel::Medium, Confidence::Medium)
    } else {
        let confidence = if score <= policy.low_confidence_ceiling {
            Confidence::High
        } else {
            Confidence::Medium
        };
        (RiskLevel::Low, confidence)
    }
}
