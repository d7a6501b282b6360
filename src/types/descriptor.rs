use crate::error::AnalyzerError;
use serde::{Deserialize, Deserializer};
use serde_json::Value;

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ToolDescriptor {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(
        default,
        alias = "inputSchema",
        deserialize_with = "deserialize_schema"
    )]
    pub input_schema: Option<String>,
}

impl ToolDescriptor {
    pub fn new(
        name: impl Into<String>,
        description: impl Into<String>,
        input_schema: Option<String>,
    ) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            input_schema,
        }
    }

    pub fn validate(&self) -> Result<(), AnalyzerError> {
        if self.name.trim().is_empty() {
            return Err(AnalyzerError::MissingField("name"));
        }
        if self.description.trim().is_empty() {
            return Err(AnalyzerError::MissingField("description"));
        }
        Ok(())
    }

    pub fn schema(&self) -> Option<&str> {
        self.input_schema
            .as_deref()
            .filter(|schema| !schema.trim().is_empty())
    }
}

// Schemas arrive either as a JSON string (the MCP tool argument form) or as an
// inline object (the `tools/list` form). The analyzer always sees text.
fn deserialize_schema<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        None | Some(Value::Null) => None,
        Some(Value::String(text)) => Some(text),
        Some(other) => Some(other.to_string()),
    })
}

/// Accepts a bare array of descriptors or an MCP `tools/list` result.
pub fn parse_descriptors(json: &str) -> Result<Vec<ToolDescriptor>, AnalyzerError> {
    let value: Value = serde_json::from_str(json)?;
    let tools = match value {
        tools @ Value::Array(_) => tools,
        Value::Object(mut map) => match map.remove("tools") {
            Some(tools @ Value::Array(_)) => tools,
            _ => {
                return Err(AnalyzerError::InvalidInput(
                    "expected an array of tools or an object with a \"tools\" array".to_string(),
                ))
            }
        },
        _ => {
            return Err(AnalyzerError::InvalidInput(
                "expected an array of tools or an object with a \"tools\" array".to_string(),
            ))
        }
    };
    Ok(serde_json::from_value(tools)?)
}
