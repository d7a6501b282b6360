pub mod json;
pub mod sarif;
pub mod text;

use crate::error::AnalyzerError;
use crate::types::descriptor::ToolDescriptor;
use crate::types::verdict::{AnalysisResult, BatchResult};

#[derive(Debug, Clone, Copy)]
pub enum OutputFormat {
    Text,
    Json,
    Sarif,
}

pub fn render(
    tool: &ToolDescriptor,
    result: &AnalysisResult,
    format: OutputFormat,
) -> Result<String, AnalyzerError> {
    match format {
        OutputFormat::Text => Ok(text::to_text(tool, result)),
        OutputFormat::Json => json::to_json(tool, result).map_err(AnalyzerError::Json),
        OutputFormat::Sarif => sarif::to_sarif([(tool, result)]).map_err(AnalyzerError::Json),
    }
}

// `tools` must be the slice the batch was built from; entries refer back to
// it by index.
pub fn render_batch(
    tools: &[ToolDescriptor],
    batch: &BatchResult,
    format: OutputFormat,
) -> Result<String, AnalyzerError> {
    match format {
        OutputFormat::Text => Ok(text::batch_to_text(batch)),
        OutputFormat::Json => json::batch_to_json(batch).map_err(AnalyzerError::Json),
        OutputFormat::Sarif => {
            let pairs = batch
                .entries
                .iter()
                .filter_map(|entry| tools.get(entry.index).map(|tool| (tool, &entry.result)));
            sarif::to_sarif(pairs).map_err(AnalyzerError::Json)
        }
    }
}
