use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use serde_json::Value;

use crate::merge;
use crate::types::{ExtractedPoems, MergeReport};

/// The poems dataset, kept as untyped JSON so unknown fields survive a rewrite.
pub struct Dataset {
    root: Value,
}

impl Dataset {
    pub fn load(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path)
            .with_context(|| format!("Failed to read dataset: {}", path.display()))?;
        Self::from_json(&text).with_context(|| format!("Invalid dataset: {}", path.display()))
    }

    pub fn from_json(text: &str) -> Result<Self> {
        let root: Value = serde_json::from_str(text).context("Failed to parse JSON")?;
        root.get("poems")
            .and_then(Value::as_array)
            .context("Top-level `poems` array is missing")?;
        Ok(Self { root })
    }

    pub fn poems_mut(&mut self) -> Result<&mut Vec<Value>> {
        self.root
            .get_mut("poems")
            .and_then(Value::as_array_mut)
            .context("Top-level `poems` array is missing")
    }

    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string_pretty(&self.root).context("Failed to serialize dataset")
    }

    /// Write the dataset back, replacing the target only once the new file is complete.
    pub fn save(&self, path: &Path) -> Result<()> {
        let json = self.to_json()?;
        let tmp_path = path.with_extension("json.tmp");
        fs::write(&tmp_path, json)
            .with_context(|| format!("Failed to write {}", tmp_path.display()))?;
        if let Err(e) = fs::rename(&tmp_path, path) {
            let _ = fs::remove_file(&tmp_path);
            return Err(e)
                .with_context(|| format!("Failed to replace dataset: {}", path.display()));
        }
        Ok(())
    }
}

/// Load the dataset, merge the extracted poems into it and write it back.
///
/// The file is only rewritten after the merge succeeded, and never when `dry_run` is set.
pub fn update(path: &Path, extracted: &ExtractedPoems, dry_run: bool) -> Result<MergeReport> {
    let mut dataset = Dataset::load(path)?;
    let report = merge::merge(dataset.poems_mut()?, extracted)?;
    if dry_run {
        log::info!("dry run: not writing {}", path.display());
    } else {
        dataset.save(path)?;
    }
    Ok(report)
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn missing_poems_key_is_rejected() {
        assert!(Dataset::from_json(r#"{"items": []}"#).is_err());
        assert!(Dataset::from_json(r#"{"poems": {}}"#).is_err());
        assert!(Dataset::from_json("not json").is_err());
    }

    #[test]
    fn pretty_output_keeps_non_ascii_and_field_order() {
        let mut dataset = Dataset::from_json(
            r#"{"version":2,"poems":[{"title":"Łąka","content":[],"author":"Ż"}]}"#,
        )
        .unwrap();
        dataset.poems_mut().unwrap()[0]["content"] = json!(["źdźbło"]);
        let out = dataset.to_json().unwrap();
        let expected = "{\n  \"version\": 2,\n  \"poems\": [\n    {\n      \"title\": \"Łąka\",\n      \"content\": [\n        \"źdźbło\"\n      ],\n      \"author\": \"Ż\"\n    }\n  ]\n}";
        assert_eq!(out, expected);
    }

    #[test]
    fn save_then_load() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("poetry-data.json");
        fs::write(&path, r#"{"poems":[{"title":"A","content":[]}]}"#).unwrap();

        let mut dataset = Dataset::load(&path).unwrap();
        dataset.poems_mut().unwrap()[0]["content"] = json!(["x"]);
        dataset.save(&path).unwrap();

        let mut reloaded = Dataset::load(&path).unwrap();
        assert_eq!(reloaded.poems_mut().unwrap()[0]["content"], json!(["x"]));
        assert!(!path.with_extension("json.tmp").exists());
    }

    #[test]
    fn failed_rename_cleans_up_temp_file() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("poetry-data.json");
        // A non-empty directory in the way makes the rename fail.
        fs::create_dir(&path).unwrap();
        fs::write(path.join("keep"), "x").unwrap();

        let dataset = Dataset::from_json(r#"{"poems":[]}"#).unwrap();
        assert!(dataset.save(&path).is_err());
        assert!(!path.with_extension("json.tmp").exists());
    }

    fn extracted_one() -> ExtractedPoems {
        let mut poems = ExtractedPoems::new();
        poems.insert("Title One".to_string(), vec!["Line A".to_string()]);
        poems
    }

    fn write_dataset(dir: &tempfile::TempDir, json: &str) -> std::path::PathBuf {
        let path = dir.path().join("poetry-data.json");
        fs::write(&path, json).unwrap();
        path
    }

    #[test]
    fn update_writes_merged_content() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = write_dataset(&dir, r#"{"poems":[{"title":"Title One","content":[]}]}"#);

        let report = update(&path, &extracted_one(), false).unwrap();
        assert_eq!(report.updated_count(), 1);
        let mut reloaded = Dataset::load(&path).unwrap();
        assert_eq!(reloaded.poems_mut().unwrap()[0]["content"], json!(["Line A"]));
    }

    #[test]
    fn update_leaves_file_alone_when_merge_fails() {
        let dir = tempfile::TempDir::new().unwrap();
        let original = r#"{"poems":[{"title":"Title One","content":[]},{"title":"No content"}]}"#;
        let path = write_dataset(&dir, original);

        assert!(update(&path, &extracted_one(), false).is_err());
        assert_eq!(fs::read_to_string(&path).unwrap(), original);
        assert!(!path.with_extension("json.tmp").exists());
    }

    #[test]
    fn update_leaves_file_alone_when_malformed() {
        let dir = tempfile::TempDir::new().unwrap();
        let original = r#"{"items":[]}"#;
        let path = write_dataset(&dir, original);

        assert!(update(&path, &extracted_one(), false).is_err());
        assert_eq!(fs::read_to_string(&path).unwrap(), original);
    }

    #[test]
    fn dry_run_does_not_write() {
        let dir = tempfile::TempDir::new().unwrap();
        let original = r#"{"poems":[{"title":"Title One","content":[]}]}"#;
        let path = write_dataset(&dir, original);

        let report = update(&path, &extracted_one(), true).unwrap();
        assert_eq!(report.updated_count(), 1);
        assert_eq!(fs::read_to_string(&path).unwrap(), original);
    }

    #[test]
    fn empty_extraction_still_rewrites() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = write_dataset(&dir, r#"{"poems":[{"title":"Title One","content":[]}]}"#);

        let report = update(&path, &ExtractedPoems::new(), false).unwrap();
        assert_eq!(report.updated_count(), 0);
        let expected = "{\n  \"poems\": [\n    {\n      \"title\": \"Title One\",\n      \"content\": []\n    }\n  ]\n}";
        assert_eq!(fs::read_to_string(&path).unwrap(), expected);
    }

    #[test]
    fn load_missing_file_fails() {
        let dir = tempfile::TempDir::new().unwrap();
        assert!(Dataset::load(&dir.path().join("absent.json")).is_err());
    }
}
