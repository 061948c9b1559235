use std::path::{Path, PathBuf};

pub mod naming;
pub mod scanner;

pub use naming::modify_name;
pub use scanner::DirectoryScanner;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MediaKind {
    Audio,
    Image,
}

impl MediaKind {
    /// Classifies a file name by extension, case-insensitively.
    pub fn from_name(name: &str) -> Option<Self> {
        let ext = Path::new(name).extension()?.to_str()?.to_lowercase();
        match ext.as_str() {
            "wav" | "mp3" => Some(MediaKind::Audio),
            "jpg" | "jpeg" | "png" => Some(MediaKind::Image),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkuDirectory {
    pub name: String,
    pub path: PathBuf,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MediaFile {
    pub name: String,
    pub path: PathBuf,
    /// Extension including the leading dot, as written on disk.
    pub extension: String,
    pub kind: MediaKind,
    pub track_number: Option<u32>,
    pub sku: String,
    pub track_sku: String,
    pub artists: String,
    pub canonical_name: String,
    pub slug_name: String,
}

impl MediaFile {
    pub fn is_audio(&self) -> bool {
        self.kind == MediaKind::Audio
    }

    /// Name used inside the sku's zip archive.
    pub fn archive_name(&self) -> &str {
        match self.kind {
            MediaKind::Audio => &self.canonical_name,
            MediaKind::Image => &self.name,
        }
    }

    /// Name used for the loose copy under `wav/{sku}`.
    pub fn copy_name(&self) -> &str {
        match self.kind {
            MediaKind::Audio => &self.slug_name,
            MediaKind::Image => &self.name,
        }
    }
}

/// Scanned media grouped per sku directory, in listing order.
#[derive(Debug, Clone, Default)]
pub struct Collection {
    entries: Vec<(SkuDirectory, Vec<MediaFile>)>,
}

impl Collection {
    pub fn push(&mut self, dir: SkuDirectory, files: Vec<MediaFile>) {
        self.entries.push((dir, files));
    }

    pub fn get(&self, name: &str) -> Option<&[MediaFile]> {
        self.entries
            .iter()
            .find(|(dir, _)| dir.name == name)
            .map(|(_, files)| files.as_slice())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&SkuDirectory, &[MediaFile])> {
        self.entries.iter().map(|(dir, files)| (dir, files.as_slice()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn file_count(&self) -> usize {
        self.entries.iter().map(|(_, files)| files.len()).sum()
    }
}
