use serde_json::{json, Value};

use crate::analyze::Analyzer;
use crate::error::{AnalyzerError, Result};
use crate::report::text;
use crate::types::descriptor::ToolDescriptor;

pub(super) fn handle_initialize(_params: &Value) -> Value {
    json!({
        "protocolVersion": "2024-11-05",
        "capabilities": {
            "tools": {},
            "resources": {},
            "prompts": {}
        },
        "serverInfo": {
            "name": "mcp-analyzer",
            "version": env!("CARGO_PKG_VERSION")
        }
    })
}

fn string_arg(arguments: &Value, key: &str) -> String {
    match arguments.get(key) {
        Some(Value::String(text)) => text.clone(),
        Some(Value::Null) | None => String::new(),
        // Inline schema objects are accepted and analyzed as text.
        Some(other) => other.to_string(),
    }
}

pub(super) fn handle_analyze_tool(analyzer: &Analyzer, arguments: &Value) -> Result<String> {
    let schema = string_arg(arguments, "tool_input_schema");
    let tool = ToolDescriptor::new(
        string_arg(arguments, "tool_name"),
        string_arg(arguments, "tool_description"),
        Some(schema).filter(|schema| !schema.is_empty()),
    );
    tool.validate()?;

    let result = analyzer.analyze_descriptor(&tool);
    Ok(text::to_text(&tool, &result))
}

pub(super) fn handle_batch_analyze(analyzer: &Analyzer, arguments: &Value) -> Result<String> {
    let tools: Vec<ToolDescriptor> = match arguments.get("tools") {
        None | Some(Value::Null) => Vec::new(),
        Some(tools @ Value::Array(_)) => serde_json::from_value(tools.clone())?,
        Some(_) => {
            return Err(AnalyzerError::InvalidInput(
                "\"tools\" must be an array".to_string(),
            ))
        }
    };

    let batch = analyzer.analyze_batch(&tools)?;
    Ok(text::batch_to_text(&batch))
}

pub(super) fn error_text(error: &AnalyzerError) -> String {
    match error {
        AnalyzerError::MissingField(_) => "Error: Tool name and description are required".to_string(),
        AnalyzerError::EmptyBatch => "Error: No tools provided for batch analysis".to_string(),
        AnalyzerError::InvalidInput(message) => format!("Error: {message}"),
        other => format!("Error: {other}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn analyzer() -> Analyzer {
        Analyzer::builtin().expect("analyzer should build")
    }

    #[test]
    fn analyze_tool_requires_name_and_description() {
        let err = handle_analyze_tool(&analyzer(), &json!({"tool_name": "x"}))
            .expect_err("missing description should fail");
        assert_eq!(error_text(&err), "Error: Tool name and description are required");
    }

    #[test]
    fn analyze_tool_accepts_inline_schema_object() {
        let report = handle_analyze_tool(
            &analyzer(),
            &json!({
                "tool_name": "notes",
                "tool_description": "Stores notes",
                "tool_input_schema": {"properties": {"command": {"type": "string"}}}
            }),
        )
        .expect("analysis should succeed");
        assert!(report.contains("Dangerous input parameter \"command\" (Code execution)"));
    }

    #[test]
    fn batch_requires_tools() {
        let err = handle_batch_analyze(&analyzer(), &json!({"tools": []}))
            .expect_err("empty batch should fail");
        assert_eq!(error_text(&err), "Error: No tools provided for batch analysis");

        let err = handle_batch_analyze(&analyzer(), &json!({}))
            .expect_err("missing tools should fail");
        assert!(matches!(err, AnalyzerError::EmptyBatch));
    }

    #[test]
    fn batch_renders_summary() {
        let report = handle_batch_analyze(
            &analyzer(),
            &json!({"tools": [
                {"name": "hello", "description": "Returns a greeting"},
                {"name": "run_bash", "description": "Execute a bash command and return its output"}
            ]}),
        )
        .expect("batch should succeed");
        assert!(report.contains("- High risk tools: 1"));
        assert!(report.contains("- hello (Score: 0/100)"));
    }
}
