use std::path::PathBuf;

use crate::types::SegmentConfig;

pub const DEFAULT_PDF_PATH: &str = "attached_assets/Wiersze_antypowabne_1757701941747.PDF";
pub const DEFAULT_DATASET_PATH: &str = "client/src/data/poetry-data.json";

/// Everything one extraction run needs to know about its inputs.
#[derive(Debug, Clone)]
pub struct Config {
    pub pdf_path: PathBuf,
    pub dataset_path: PathBuf,
    pub segment: SegmentConfig,
}

impl Config {
    /// The first required input that does not exist, as (label, path).
    pub fn missing_input(&self) -> Option<(&'static str, &PathBuf)> {
        if !self.pdf_path.exists() {
            return Some(("PDF", &self.pdf_path));
        }
        if !self.dataset_path.exists() {
            return Some(("JSON", &self.dataset_path));
        }
        None
    }
}
