use crate::error::{AnalyzerError, Result};
use crate::types::descriptor::{parse_descriptors, ToolDescriptor};
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

pub fn list_json_files(root: &Path) -> Vec<PathBuf> {
    let mut files: Vec<PathBuf> = WalkDir::new(root)
        .into_iter()
        .filter_map(|entry| entry.ok())
        .filter(|entry| entry.file_type().is_file())
        .map(|entry| entry.path().to_path_buf())
        .filter(|path| path.extension().is_some_and(|ext| ext == "json"))
        .collect();
    files.sort();
    files
}

pub fn load_descriptors(path: &Path) -> Result<Vec<ToolDescriptor>> {
    if !path.exists() {
        return Err(AnalyzerError::InvalidInput(format!(
            "path does not exist: {}",
            path.display()
        )));
    }
    if path.is_file() {
        return load_file(path);
    }

    let mut descriptors = Vec::new();
    for file in list_json_files(path) {
        descriptors.extend(load_file(&file)?);
    }
    Ok(descriptors)
}

fn load_file(path: &Path) -> Result<Vec<ToolDescriptor>> {
    let content = std::fs::read_to_string(path)?;
    let descriptors = parse_descriptors(&content).map_err(|e| {
        AnalyzerError::InvalidInput(format!("{}: {}", path.display(), e))
    })?;
    tracing::debug!(path = %path.display(), tools = descriptors.len(), "descriptors loaded");
    Ok(descriptors)
}
