use std::path::PathBuf;

use crate::media::scanner::JunkFilter;
use crate::Result;

pub const DEFAULT_BASE_URL: &str = "https://www.files.aze.digital";

/// Where a run reads from and writes to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PipelineConfig {
    /// Root holding one directory per sku.
    pub files_dir: PathBuf,
    pub catalog_path: PathBuf,
    /// Parent of the `files-data-{timestamp}` output directory.
    pub output_root: PathBuf,
    /// Prefix of every download link in the exported catalog.
    pub base_url: String,
    /// Extra junk-name regexes on top of the built-in list.
    pub ignore_patterns: Vec<String>,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            files_dir: PathBuf::from("files"),
            catalog_path: PathBuf::from("products.csv"),
            output_root: PathBuf::from("."),
            base_url: DEFAULT_BASE_URL.to_string(),
            ignore_patterns: Vec::new(),
        }
    }
}

impl PipelineConfig {
    /// Paths resolved against `dir`, other settings left at their defaults.
    pub fn in_dir(dir: impl Into<PathBuf>) -> Self {
        let dir = dir.into();
        Self {
            files_dir: dir.join("files"),
            catalog_path: dir.join("products.csv"),
            output_root: dir,
            ..Self::default()
        }
    }

    pub fn junk_filter(&self) -> Result<JunkFilter> {
        JunkFilter::new(&self.ignore_patterns)
    }
}
