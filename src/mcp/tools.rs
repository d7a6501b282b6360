use serde_json::{json, Value};

pub const ANALYZE_TOOL: &str = "analyze_mcp_tool";
pub const BATCH_TOOL: &str = "batch_analyze_tools";

pub(super) fn get_mcp_tools() -> Vec<Value> {
    vec![
        json!({
            "name": ANALYZE_TOOL,
            "description": "Analyze MCP tool descriptions and identify potentially malicious tools using context-aware detection",
            "inputSchema": {
                "type": "object",
                "properties": {
                    "tool_name": {
                        "type": "string",
                        "description": "Name of the MCP tool to analyze"
                    },
                    "tool_description": {
                        "type": "string",
                        "description": "Description of the MCP tool"
                    },
                    "tool_input_schema": {
                        "type": "string",
                        "description": "Input schema of the MCP tool (JSON string)"
                    }
                },
                "required": ["tool_name", "tool_description"]
            }
        }),
        json!({
            "name": BATCH_TOOL,
            "description": "Analyze multiple MCP tools at once for comprehensive security assessment",
            "inputSchema": {
                "type": "object",
                "properties": {
                    "tools": {
                        "type": "array",
                        "description": "Array of tools to analyze",
                        "items": {
                            "type": "object",
                            "properties": {
                                "name": { "type": "string" },
                                "description": { "type": "string" },
                                "input_schema": { "type": "string" }
                            },
                            "required": ["name", "description"]
                        }
                    }
                },
                "required": ["tools"]
            }
        }),
    ]
}
