use crate::error::{AnalyzerError, Result};
use crate::types::config::AnalyzerConfig;
use std::path::{Path, PathBuf};
use toml::map::Map;
use toml::Value;

pub const DEFAULT_CONFIG_FILE: &str = "mcp-analyzer.toml";
pub const DEFAULT_LOCAL_FILE: &str = ".mcp-analyzer/local.toml";
pub const DEFAULT_GLOBAL_CONFIG_FILE: &str = ".config/mcp-analyzer/config.toml";

// Global, then project, then local. `None` when no layer exists.
pub fn load_config(root: &Path) -> Result<Option<AnalyzerConfig>> {
    let global = std::env::var_os("HOME")
        .map(PathBuf::from)
        .map(|home| home.join(DEFAULT_GLOBAL_CONFIG_FILE));
    load_config_with_global(root, global.as_deref())
}

pub fn load_explicit(path: &Path) -> Result<AnalyzerConfig> {
    if !path.exists() {
        return Err(AnalyzerError::ConfigParse(format!(
            "config file not found: {}",
            path.display()
        )));
    }
    into_config(read_toml_value(path)?)
}

pub(crate) fn load_config_with_global(
    root: &Path,
    global_path: Option<&Path>,
) -> Result<Option<AnalyzerConfig>> {
    let mut layers = Vec::new();
    if let Some(path) = global_path {
        layers.push(path.to_path_buf());
    }
    layers.push(root.join(DEFAULT_CONFIG_FILE));
    layers.push(root.join(DEFAULT_LOCAL_FILE));

    let mut merged = Value::Table(Map::new());
    let mut found = false;
    for path in &layers {
        if merge_file_if_exists(&mut merged, path)? {
            tracing::debug!(path = %path.display(), "config layer merged");
            found = true;
        }
    }
    if !found {
        return Ok(None);
    }
    into_config(merged).map(Some)
}

fn into_config(value: Value) -> Result<AnalyzerConfig> {
    let cfg: AnalyzerConfig = value.try_into()?;
    cfg.validate()?;
    Ok(cfg)
}

fn merge_file_if_exists(merged: &mut Value, path: &Path) -> Result<bool> {
    if !path.exists() {
        return Ok(false);
    }
    let value = read_toml_value(path)?;
    merge_toml(merged, value);
    Ok(true)
}

fn read_toml_value(path: &Path) -> Result<Value> {
    let content = std::fs::read_to_string(path)?;
    toml::from_str(&content)
        .map_err(|e| AnalyzerError::ConfigParse(format!("{}: {}", path.display(), e)))
}

fn merge_toml(base: &mut Value, overlay: Value) {
    match (base, overlay) {
        (Value::Table(base_table), Value::Table(overlay_table)) => {
            for (key, value) in overlay_table {
                match base_table.get_mut(&key) {
                    Some(existing) => merge_toml(existing, value),
                    None => {
                        base_table.insert(key, value);
                    }
                }
            }
        }
        (slot, value) => {
            *slot = value;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn load_config_returns_none_when_no_layer_exists() {
        let dir = TempDir::new().expect("temp dir should be created");
        let cfg = load_config_with_global(dir.path(), None).expect("load should not fail");
        assert!(cfg.is_none());
    }

    #[test]
    fn load_config_merges_global_repo_and_local_in_order() {
        let root = TempDir::new().expect("root temp dir should be created");
        let global_root = TempDir::new().expect("global temp dir should be created");
        let global_path = global_root.path().join("config.toml");

        fs::write(
            &global_path,
            r#"
[policy]
high_threshold = 70
legitimate_reduction = 5

[rules]
disabled = ["behavior.covert"]
"#,
        )
        .expect("global config should write");

        fs::write(
            root.path().join(DEFAULT_CONFIG_FILE),
            r#"
[policy]
high_threshold = 65
"#,
        )
        .expect("repo config should write");

        fs::create_dir_all(root.path().join(".mcp-analyzer")).expect("local dir should create");
        fs::write(
            root.path().join(DEFAULT_LOCAL_FILE),
            r#"
[policy]
medium_threshold = 25
"#,
        )
        .expect("local override should write");

        let cfg = load_config_with_global(root.path(), Some(&global_path))
            .expect("load should succeed")
            .expect("merged config should exist");

        let policy = cfg.policy();
        assert_eq!(policy.high_threshold, 65);
        assert_eq!(policy.medium_threshold, 25);
        assert_eq!(policy.legitimate_reduction, 5);
        assert_eq!(cfg.disabled_rules(), ["behavior.covert".to_string()]);
    }

    #[test]
    fn invalid_policy_is_rejected_on_load() {
        let root = TempDir::new().expect("root temp dir should be created");
        fs::write(
            root.path().join(DEFAULT_CONFIG_FILE),
            r#"
[policy]
high_threshold = 10
"#,
        )
        .expect("repo config should write");

        let result = load_config_with_global(root.path(), None);
        assert!(matches!(result, Err(AnalyzerError::InvalidPolicy(_))));
    }

    #[test]
    fn load_explicit_reports_missing_file() {
        let root = TempDir::new().expect("root temp dir should be created");
        let result = load_explicit(&root.path().join("absent.toml"));
        assert!(matches!(result, Err(AnalyzerError::ConfigParse(_))));
    }
}
