use crate::types::descriptor::ToolDescriptor;
use crate::types::verdict::{AnalysisResult, BatchResult};
use serde::Serialize;

#[derive(Serialize)]
struct SingleReport<'a> {
    name: &'a str,
    description: &'a str,
    #[serde(flatten)]
    result: &'a AnalysisResult,
}

pub fn to_json(tool: &ToolDescriptor, result: &AnalysisResult) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(&SingleReport {
        name: &tool.name,
        description: &tool.description,
        result,
    })
}

pub fn batch_to_json(batch: &BatchResult) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(batch)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analyze::Analyzer;

    #[test]
    fn json_report_contains_score_and_level() {
        let analyzer = Analyzer::builtin().expect("analyzer should build");
        let tool = ToolDescriptor::new("run_bash", "Execute a bash command and return its output", None);

        let rendered = to_json(&tool, &analyzer.analyze_descriptor(&tool)).expect("json should serialize");
        assert!(rendered.contains("\"risk_score\": 60"));
        assert!(rendered.contains("\"risk_level\": \"HIGH\""));
        assert!(rendered.contains("\"category\": \"behavioral-pattern\""));
    }

    #[test]
    fn batch_json_contains_counts() {
        let analyzer = Analyzer::builtin().expect("analyzer should build");
        let batch = analyzer
            .analyze_batch(&[ToolDescriptor::new("hello", "Returns a greeting", None)])
            .expect("batch should succeed");

        let rendered = batch_to_json(&batch).expect("json should serialize");
        assert!(rendered.contains("\"low\": 1"));
        assert!(rendered.contains("\"index\": 0"));
    }
}
