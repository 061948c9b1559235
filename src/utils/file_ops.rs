use std::fs;
use std::path::{Path, PathBuf};

use log::debug;

use crate::media::MediaFile;
use crate::{CatalogError, Result};

pub const ARCHIVE_DIR: &str = "EP";
pub const LOOSE_DIR: &str = "wav";

/// Output tree of one run: `{root}/EP` for archives, `{root}/wav/{sku}` for
/// loose renamed copies.
#[derive(Debug, Clone)]
pub struct OutputLayout {
    root: PathBuf,
}

impl OutputLayout {
    /// Creates the root and both sub-folders. Existing directories are reused.
    pub fn create(root: impl Into<PathBuf>) -> Result<Self> {
        let layout = Self { root: root.into() };
        fs::create_dir_all(layout.archive_dir())?;
        fs::create_dir_all(layout.loose_root())?;
        debug!("Output tree ready at {}", layout.root.display());
        Ok(layout)
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn archive_dir(&self) -> PathBuf {
        self.root.join(ARCHIVE_DIR)
    }

    pub fn archive_path(&self, sku: &str) -> PathBuf {
        self.archive_dir().join(format!("{}.zip", sku))
    }

    pub fn loose_root(&self) -> PathBuf {
        self.root.join(LOOSE_DIR)
    }

    pub fn loose_dir(&self, sku: &str) -> PathBuf {
        self.loose_root().join(sku)
    }
}

pub struct FileManager {
    layout: OutputLayout,
}

impl FileManager {
    pub fn new(layout: OutputLayout) -> Self {
        Self { layout }
    }

    /// Copies one media file into `wav/{sku}`: audio under its slug name,
    /// images under their own name. The source is left in place.
    pub fn move_files(&self, file: &MediaFile) -> Result<PathBuf> {
        let target_dir = self.layout.loose_dir(&file.sku);
        let destination = target_dir.join(file.copy_name());

        let copy_error = |io| CatalogError::Copy {
            sku: file.sku.clone(),
            source_path: file.path.clone(),
            destination: destination.clone(),
            io,
        };

        fs::create_dir_all(&target_dir).map_err(copy_error)?;
        fs::copy(&file.path, &destination).map_err(copy_error)?;

        debug!("Copied {} -> {}", file.path.display(), destination.display());
        Ok(destination)
    }
}
