use anyhow::{Context, Result};
use serde_json::Value;
use std::fs;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Resolve a command-line path against the working directory
pub fn resolve_path(cwd: &str, input: &Path) -> PathBuf {
    if input.is_absolute() {
        input.to_path_buf()
    } else {
        PathBuf::from(cwd).join(input)
    }
}

/// All `.json` documents under `dir`, sorted, skipping the config file
pub fn find_documents(dir: &Path) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();

    for entry in WalkDir::new(dir).follow_links(true) {
        let entry = entry?;
        let path = entry.path();

        let is_json = path.extension().map(|e| e == "json").unwrap_or(false);
        let is_config = path
            .file_name()
            .map(|name| name == crate::config::DEFAULT_CONFIG_NAME)
            .unwrap_or(false);

        if path.is_file() && is_json && !is_config {
            files.push(path.to_path_buf());
        }
    }

    files.sort();
    Ok(files)
}

pub fn read_json(path: &Path) -> Result<Value> {
    let source =
        fs::read_to_string(path).with_context(|| format!("Failed to read {}", path.display()))?;
    serde_json::from_str(&source).with_context(|| format!("Invalid JSON in {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_find_documents_skips_config_and_other_files() {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir(dir.path().join("pages")).unwrap();
        fs::write(dir.path().join("pages/home.json"), "{}").unwrap();
        fs::write(dir.path().join("about.json"), "{}").unwrap();
        fs::write(dir.path().join("notes.txt"), "").unwrap();
        fs::write(dir.path().join(crate::config::DEFAULT_CONFIG_NAME), "{}").unwrap();

        let files = find_documents(dir.path()).unwrap();
        let names: Vec<_> = files
            .iter()
            .map(|p| p.strip_prefix(dir.path()).unwrap().to_path_buf())
            .collect();
        assert_eq!(names, vec![PathBuf::from("about.json"), PathBuf::from("pages/home.json")]);
    }

    #[test]
    fn test_resolve_path() {
        assert_eq!(resolve_path("/work", Path::new("a.json")), PathBuf::from("/work/a.json"));
        assert_eq!(resolve_path("/work", Path::new("/abs/a.json")), PathBuf::from("/abs/a.json"));
    }
}
