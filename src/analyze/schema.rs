use serde_json::Value;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SchemaOutcome {
    Absent,
    Properties(Vec<(String, String)>),
    NotObject,
    Malformed(String),
}

pub fn inspect(schema: Option<&str>) -> SchemaOutcome {
    let Some(text) = schema.filter(|text| !text.trim().is_empty()) else {
        return SchemaOutcome::Absent;
    };

    let value: Value = match serde_json::from_str(text) {
        Ok(value) => value,
        Err(e) => return SchemaOutcome::Malformed(e.to_string()),
    };
    let Value::Object(root) = value else {
        return SchemaOutcome::NotObject;
    };

    let properties = root
        .get("properties")
        .and_then(Value::as_object)
        .map(|properties| {
            properties
                .iter()
                .map(|(name, details)| {
                    let description = details
                        .get("description")
                        .and_then(Value::as_str)
                        .unwrap_or_default()
                        .to_string();
                    (name.clone(), description)
                })
                .collect()
        })
        .unwrap_or_default();

    SchemaOutcome::Properties(properties)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_schema_is_absent() {
        assert_eq!(inspect(None), SchemaOutcome::Absent);
        assert_eq!(inspect(Some("   ")), SchemaOutcome::Absent);
    }

    #[test]
    fn malformed_schema_reports_parse_error() {
        assert!(matches!(
            inspect(Some("{not json")),
            SchemaOutcome::Malformed(_)
        ));
        assert_eq!(inspect(Some("[1, 2]")), SchemaOutcome::NotObject);
    }

    #[test]
    fn properties_keep_declaration_order_and_descriptions() {
        let outcome = inspect(Some(
            r#"{"type":"object","properties":{"path":{"type":"string","description":"safe path"},"mode":{}}}"#,
        ));
        let SchemaOutcome::Properties(properties) = outcome else {
            panic!("expected properties");
        };
        assert_eq!(
            properties,
            vec![
                ("path".to_string(), "safe path".to_string()),
                ("mode".to_string(), String::new()),
            ]
        );
    }

    #[test]
    fn object_without_properties_yields_empty_list() {
        assert_eq!(
            inspect(Some(r#"{"type":"object"}"#)),
            SchemaOutcome::Properties(Vec::new())
        );
    }
}
