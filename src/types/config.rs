use crate::error::AnalyzerError;
use serde::Deserialize;

#[derive(Debug, Clone, Default, Deserialize)]
pub struct AnalyzerConfig {
    pub policy: Option<PolicyConfig>,
    pub rules: Option<RulesConfig>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PolicyConfig {
    pub high_threshold: Option<u32>,
    pub medium_threshold: Option<u32>,
    pub high_confidence_score: Option<u32>,
    pub low_confidence_ceiling: Option<u32>,
    pub legitimate_reduction: Option<u32>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RulesConfig {
    #[serde(default)]
    pub disabled: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Policy {
    pub high_threshold: u32,
    pub medium_threshold: u32,
    pub high_confidence_score: u32,
    pub low_confidence_ceiling: u32,
    pub legitimate_reduction: u32,
}

impl Default for Policy {
    fn default() -> Self {
        Self {
            high_threshold: 60,
            medium_threshold: 30,
            high_confidence_score: 80,
            low_confidence_ceiling: 10,
            legitimate_reduction: 10,
        }
    }
}

impl AnalyzerConfig {
    pub fn policy(&self) -> Policy {
        let defaults = Policy::default();
        match &self.policy {
            Some(policy) => Policy {
                high_threshold: policy.high_threshold.unwrap_or(defaults.high_threshold),
                medium_threshold: policy.medium_threshold.unwrap_or(defaults.medium_threshold),
                high_confidence_score: policy
                    .high_confidence_score
                    .unwrap_or(defaults.high_confidence_score),
                low_confidence_ceiling: policy
                    .low_confidence_ceiling
                    .unwrap_or(defaults.low_confidence_ceiling),
                legitimate_reduction: policy
                    .legitimate_reduction
                    .unwrap_or(defaults.legitimate_reduction),
            },
            None => defaults,
        }
    }

    pub fn disabled_rules(&self) -> &[String] {
        self.rules
            .as_ref()
            .map(|rules| rules.disabled.as_slice())
            .unwrap_or(&[])
    }

    pub fn validate(&self) -> Result<(), AnalyzerError> {
        let policy = self.policy();
        if policy.medium_threshold == 0 {
            return Err(AnalyzerError::InvalidPolicy(
                "policy.medium_threshold must be greater than 0".to_string(),
            ));
        }
        if policy.high_threshold <= policy.medium_threshold {
            return Err(AnalyzerError::InvalidPolicy(format!(
                "policy.high_threshold ({}) must be greater than policy.medium_threshold ({})",
                policy.high_threshold, policy.medium_threshold
            )));
        }
        if policy.high_confidence_score < policy.high_threshold {
            return Err(AnalyzerError::InvalidPolicy(format!(
                "policy.high_confidence_score ({}) cannot be below policy.high_threshold ({})",
                policy.high_confidence_score, policy.high_threshold
            )));
        }
        if policy.low_confidence_ceiling >= policy.medium_threshold {
            return Err(AnalyzerError::InvalidPolicy(format!(
                "policy.low_confidence_ceiling ({}) must be below policy.medium_threshold ({})",
                policy.low_confidence_ceiling, policy.medium_threshold
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn policy_falls_back_to_defaults_per_field() {
        let config: AnalyzerConfig = toml::from_str(
            r#"
[policy]
high_threshold = 70
"#,
        )
        .expect("config should parse");

        let policy = config.policy();
        assert_eq!(policy.high_threshold, 70);
        assert_eq!(policy.medium_threshold, 30);
        assert_eq!(policy.legitimate_reduction, 10);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn validate_rejects_inverted_thresholds() {
        let config: AnalyzerConfig = toml::from_str(
            r#"
[policy]
high_threshold = 20
medium_threshold = 30
"#,
        )
        .expect("config should parse");

        assert!(matches!(
            config.validate(),
            Err(AnalyzerError::InvalidPolicy(_))
        ));
    }

    #[test]
    fn disabled_rules_default_to_empty() {
        let config = AnalyzerConfig::default();
        assert!(config.disabled_rules().is_empty());
        assert_eq!(config.policy(), Policy::default());
    }
}
