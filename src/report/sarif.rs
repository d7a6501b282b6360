use crate::types::descriptor::ToolDescriptor;
use crate::types::verdict::{AnalysisResult, RiskLevel};
use serde_json::{json, Value};
use sha2::{Digest, Sha256};

fn level(risk: RiskLevel) -> &'static str {
    match risk {
        RiskLevel::High => "error",
        RiskLevel::Medium => "warning",
        RiskLevel::Low => "note",
    }
}

pub fn fingerprint(tool: &ToolDescriptor) -> String {
    let mut hasher = Sha256::new();
    hasher.update(tool.name.as_bytes());
    hasher.update([0]);
    hasher.update(tool.description.as_bytes());
    hasher.update([0]);
    hasher.update(tool.schema().unwrap_or_default().as_bytes());
    format!("{:x}", hasher.finalize())
}

fn results_for(tool: &ToolDescriptor, result: &AnalysisResult) -> Vec<Value> {
    let fingerprint = fingerprint(tool);
    result
        .flagged()
        .map(|(rule_match, indicator)| {
            json!({
                "ruleId": rule_match.rule_id,
                "level": level(result.risk_level),
                "message": { "text": format!("{}: {}", tool.name, indicator) },
                "partialFingerprints": { "toolDescriptor/v1": fingerprint },
                "properties": {
                    "tool": tool.name,
                    "category": rule_match.category.as_str(),
                    "weight": rule_match.weight,
                    "riskScore": result.risk_score,
                    "riskLevel": result.risk_level.as_str(),
                },
            })
        })
        .collect()
}

pub fn to_sarif<'a>(
    analyses: impl IntoIterator<Item = (&'a ToolDescriptor, &'a AnalysisResult)>,
) -> Result<String, serde_json::Error> {
    let results: Vec<Value> = analyses
        .into_iter()
        .flat_map(|(tool, result)| results_for(tool, result))
        .collect();

    let sarif = json!({
        "version": "2.1.0",
        "runs": [{
            "tool": {
                "driver": {
                    "name": "mcp-analyzer",
                    "version": env!("CARGO_PKG_VERSION")
                }
            },
            "results": results
        }]
    });

    serde_json::to_string_pretty(&sarif)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analyze::Analyzer;

    #[test]
    fn sarif_emits_one_result_per_indicator() {
        let analyzer = Analyzer::builtin().expect("analyzer should build");
        let tool = ToolDescriptor::new("run_bash", "Execute a bash command and return its output", None);
        let result = analyzer.analyze_descriptor(&tool);

        let rendered = to_sarif([(&tool, &result)]).expect("sarif should serialize");
        let parsed: Value = serde_json::from_str(&rendered).expect("sarif should be json");
        let results = parsed["runs"][0]["results"]
            .as_array()
            .expect("results should be an array");

        assert_eq!(results.len(), result.indicators.len());
        assert_eq!(results[0]["ruleId"], "name.exec");
        assert_eq!(results[0]["level"], "error");
    }

    #[test]
    fn fingerprint_depends_on_every_field() {
        let base = ToolDescriptor::new("a", "b", None);
        let other_schema = ToolDescriptor::new("a", "b", Some("{}".to_string()));
        assert_ne!(fingerprint(&base), fingerprint(&other_schema));
        assert_eq!(fingerprint(&base), fingerprint(&base.clone()));
        assert_eq!(fingerprint(&base).len(), 64);
    }
}
