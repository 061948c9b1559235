use std::path::{Path, PathBuf};

use log::{debug, info, warn};
use regex::Regex;
use walkdir::{DirEntry, WalkDir};

use crate::analyzers::{duplicate::find_duplicates, naming::find_invalid_names};
use crate::catalog::ArtistIndex;
use crate::media::{modify_name, Collection, MediaFile, MediaKind, SkuDirectory};
use crate::{CatalogError, Result};

/// OS and editor artifacts that never belong to a release.
pub const DEFAULT_JUNK_PATTERNS: &[&str] = &[
    r"^\.",
    r"~$",
    r"^Thumbs\.db$",
    r"^ehthumbs\.db$",
    r"^[Dd]esktop\.ini$",
    r"^Icon\r$",
    r"^npm-debug\.log$",
    r"^\$RECYCLE\.BIN$",
];

#[derive(Debug, Clone)]
pub struct JunkFilter {
    patterns: Vec<Regex>,
}

impl JunkFilter {
    /// Default patterns plus `extra`.
    pub fn new(extra: &[String]) -> Result<Self> {
        let patterns = DEFAULT_JUNK_PATTERNS
            .iter()
            .copied()
            .chain(extra.iter().map(String::as_str))
            .map(Regex::new)
            .collect::<std::result::Result<Vec<_>, _>>()?;
        Ok(Self { patterns })
    }

    pub fn is_junk(&self, name: &str) -> bool {
        self.patterns.iter().any(|p| p.is_match(name))
    }
}

pub struct DirectoryScanner {
    root: PathBuf,
    junk: JunkFilter,
}

impl DirectoryScanner {
    pub fn new(root: impl Into<PathBuf>, junk: JunkFilter) -> Self {
        Self {
            root: root.into(),
            junk,
        }
    }

    /// Immediate sub-directories of the root, sorted by name, junk removed.
    pub fn list_directories(&self) -> Result<Vec<SkuDirectory>> {
        if !self.root.is_dir() {
            return Err(CatalogError::NoDirectoriesFound(self.root.clone()));
        }

        let dirs: Vec<SkuDirectory> = self
            .children(&self.root)?
            .into_iter()
            .filter(|entry| entry.file_type().is_dir())
            .map(|entry| SkuDirectory {
                name: entry.file_name().to_string_lossy().into_owned(),
                path: entry.into_path(),
            })
            .collect();

        if dirs.is_empty() {
            return Err(CatalogError::NoDirectoriesFound(self.root.clone()));
        }

        info!("Found {} sku directories in {}", dirs.len(), self.root.display());
        Ok(dirs)
    }

    /// Media files of one sku directory with their derived identity and names.
    pub fn list_files(
        &self,
        dir: &SkuDirectory,
        artists: &ArtistIndex,
    ) -> Result<Vec<MediaFile>> {
        let mut files = Vec::new();

        for entry in self.children(&dir.path)? {
            if !entry.file_type().is_file() {
                continue;
            }
            let name = entry.file_name().to_string_lossy().into_owned();
            let Some(kind) = MediaKind::from_name(&name) else {
                debug!("Skipping non-media file: {}", entry.path().display());
                continue;
            };

            let file = build_media_file(&name, entry.into_path(), kind, &dir.name, artists);
            debug!(
                "{} -> {} ({}, ext {}, track {:?})",
                file.name,
                file.canonical_name,
                file.track_sku,
                file.extension,
                file.track_number
            );
            files.push(file);
        }

        Ok(files)
    }

    /// Scans every directory in order. Empty directories are skipped; a scan
    /// where all of them are empty fails, as does a directory where two files
    /// end up with the same packaged name.
    pub fn scan(&self, dirs: &[SkuDirectory], artists: &ArtistIndex) -> Result<Collection> {
        let mut collection = Collection::default();

        for dir in dirs {
            let files = self.list_files(dir, artists)?;
            if files.is_empty() {
                warn!("Directory {} has no media files, skipping", dir.name);
                continue;
            }
            check_name_collisions(&dir.name, &files)?;
            info!("Directory {}: {} files found", dir.name, files.len());
            collection.push(dir.clone(), files);
        }

        if collection.is_empty() {
            return Err(CatalogError::DirectoryScanEmpty(self.root.clone()));
        }
        Ok(collection)
    }

    fn children(&self, path: &Path) -> Result<Vec<DirEntry>> {
        let mut entries = Vec::new();
        for entry in WalkDir::new(path)
            .min_depth(1)
            .max_depth(1)
            .follow_links(true)
            .sort_by_file_name()
        {
            let entry = entry?;
            if self.junk.is_junk(&entry.file_name().to_string_lossy()) {
                debug!("Ignoring junk entry: {}", entry.path().display());
                continue;
            }
            entries.push(entry);
        }
        Ok(entries)
    }
}

/// Rejects directory names that break the sku convention.
pub fn validate_directories(dirs: &[SkuDirectory]) -> Result<()> {
    let names: Vec<&str> = dirs.iter().map(|d| d.name.as_str()).collect();
    let invalid = find_invalid_names(&names);
    if invalid.is_empty() {
        Ok(())
    } else {
        Err(CatalogError::InvalidDirectoryName(invalid))
    }
}

/// Two files of one directory must not share an archive entry or a copy
/// name; the later one would replace the earlier.
fn check_name_collisions(sku: &str, files: &[MediaFile]) -> Result<()> {
    let archive_names: Vec<&str> = files.iter().map(MediaFile::archive_name).collect();
    let copy_names: Vec<&str> = files.iter().map(MediaFile::copy_name).collect();

    let mut clashes = find_duplicates(&archive_names);
    for name in find_duplicates(&copy_names) {
        if !clashes.contains(&name) {
            clashes.push(name);
        }
    }

    if clashes.is_empty() {
        return Ok(());
    }
    Err(CatalogError::DuplicateFileName(
        clashes
            .into_iter()
            .map(|name| format!("{}/{}", sku, name))
            .collect(),
    ))
}

/// Track number from the text before the first space. The token counts when
/// it reads as a finite decimal number (`01`, `01.`, `1.5`); its integer part
/// must be positive.
pub fn parse_track_number(name: &str) -> Option<u32> {
    let token = name.split(' ').next()?;
    if !token.parse::<f64>().map_or(false, f64::is_finite) {
        return None;
    }

    let digits = token.strip_prefix('+').unwrap_or(token);
    let end = digits
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(digits.len());
    digits[..end].parse::<u32>().ok().filter(|n| *n > 0)
}

fn build_media_file(
    name: &str,
    path: PathBuf,
    kind: MediaKind,
    sku: &str,
    artists: &ArtistIndex,
) -> MediaFile {
    let track_number = match kind {
        MediaKind::Audio => parse_track_number(name),
        MediaKind::Image => None,
    };
    let track_sku = match track_number {
        Some(n) => format!("{}_{}", sku, n),
        None => sku.to_string(),
    };

    let credited = match kind {
        MediaKind::Audio => artists.get(&track_sku).or_else(|| artists.get(sku)),
        MediaKind::Image => artists.get(sku),
    }
    .unwrap_or_default()
    .to_string();

    let extension = Path::new(name)
        .extension()
        .map(|ext| format!(".{}", ext.to_string_lossy()))
        .unwrap_or_default();

    MediaFile {
        name: name.to_string(),
        path,
        extension,
        kind,
        track_number,
        sku: sku.to_string(),
        canonical_name: modify_name(name, &credited, sku, false),
        slug_name: modify_name(name, &credited, sku, true),
        track_sku,
        artists: credited,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::ProductRecord;
    use pretty_assertions::assert_eq;
    use std::fs;
    use tempfile::TempDir;

    fn index(pairs: &[(&str, &str)]) -> ArtistIndex {
        let records: Vec<ProductRecord> = pairs
            .iter()
            .map(|(sku, artists)| ProductRecord {
                sku: sku.to_string(),
                artists: artists.to_string(),
                ..Default::default()
            })
            .collect();
        ArtistIndex::from_records(&records)
    }

    fn scanner(root: &Path) -> DirectoryScanner {
        DirectoryScanner::new(root, JunkFilter::new(&[]).unwrap())
    }

    #[test]
    fn parses_leading_track_numbers() {
        assert_eq!(parse_track_number("1 Song.wav"), Some(1));
        assert_eq!(parse_track_number("01. Song.wav"), Some(1));
        assert_eq!(parse_track_number("1.5 Song.wav"), Some(1));
        assert_eq!(parse_track_number("12 Long Mix.mp3"), Some(12));
        assert_eq!(parse_track_number(" 1 Song.wav"), None);
        assert_eq!(parse_track_number("07\tIntro.mp3"), None);
        assert_eq!(parse_track_number("inf Loop.wav"), None);
        assert_eq!(parse_track_number(".5 Half.wav"), None);
        assert_eq!(parse_track_number("Song.wav"), None);
        assert_eq!(parse_track_number("1.wav"), None);
        assert_eq!(parse_track_number("0 Zero.wav"), None);
        assert_eq!(parse_track_number("-1 Minus.wav"), None);
    }

    #[test]
    fn junk_filter_covers_dotfiles_and_caches() {
        let junk = JunkFilter::new(&[r"^skip-me$".to_string()]).unwrap();
        assert!(junk.is_junk(".DS_Store"));
        assert!(junk.is_junk("Thumbs.db"));
        assert!(junk.is_junk("track.wav~"));
        assert!(junk.is_junk("skip-me"));
        assert!(!junk.is_junk("1 Song.wav"));
    }

    #[test]
    fn bad_ignore_pattern_is_an_error() {
        let err = JunkFilter::new(&["(".to_string()]).unwrap_err();
        assert!(matches!(err, CatalogError::Pattern(_)));
    }

    #[test]
    fn lists_sorted_directories_only() {
        let root = TempDir::new().unwrap();
        fs::create_dir(root.path().join("SKU2")).unwrap();
        fs::create_dir(root.path().join("SKU1")).unwrap();
        fs::create_dir(root.path().join(".git")).unwrap();
        fs::write(root.path().join("readme.txt"), b"x").unwrap();

        let dirs = scanner(root.path()).list_directories().unwrap();
        let names: Vec<_> = dirs.iter().map(|d| d.name.as_str()).collect();
        assert_eq!(names, vec!["SKU1", "SKU2"]);
    }

    #[test]
    fn missing_or_empty_root_has_no_directories() {
        let root = TempDir::new().unwrap();
        let err = scanner(&root.path().join("files"))
            .list_directories()
            .unwrap_err();
        assert!(matches!(err, CatalogError::NoDirectoriesFound(_)));

        fs::write(root.path().join("loose.wav"), b"x").unwrap();
        let err = scanner(root.path()).list_directories().unwrap_err();
        assert!(matches!(err, CatalogError::NoDirectoriesFound(_)));
    }

    #[test]
    fn rejects_invalid_directory_names() {
        let dirs = vec![
            SkuDirectory {
                name: "SKU1".into(),
                path: PathBuf::from("SKU1"),
            },
            SkuDirectory {
                name: "SKU 2".into(),
                path: PathBuf::from("SKU 2"),
            },
        ];
        match validate_directories(&dirs) {
            Err(CatalogError::InvalidDirectoryName(names)) => {
                assert_eq!(names, vec!["SKU 2"])
            }
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[test]
    fn enriches_files_with_track_identity() {
        let root = TempDir::new().unwrap();
        let dir_path = root.path().join("SKU1");
        fs::create_dir(&dir_path).unwrap();
        fs::write(dir_path.join("1 Song.wav"), b"a").unwrap();
        fs::write(dir_path.join("Bonus.mp3"), b"b").unwrap();
        fs::write(dir_path.join("cover.jpg"), b"c").unwrap();
        fs::write(dir_path.join("notes.txt"), b"d").unwrap();
        fs::write(dir_path.join(".DS_Store"), b"e").unwrap();

        let dir = SkuDirectory {
            name: "SKU1".into(),
            path: dir_path,
        };
        let artists = index(&[("SKU1", "Label Crew"), ("SKU1_1", "DJ X and MC Ü")]);
        let files = scanner(root.path()).list_files(&dir, &artists).unwrap();

        let names: Vec<_> = files.iter().map(|f| f.name.as_str()).collect();
        assert_eq!(names, vec!["1 Song.wav", "Bonus.mp3", "cover.jpg"]);

        let song = &files[0];
        assert_eq!(song.track_number, Some(1));
        assert_eq!(song.track_sku, "SKU1_1");
        assert_eq!(song.artists, "DJ X and MC U");
        assert_eq!(song.extension, ".wav");
        assert_eq!(song.canonical_name, "DJ X and MC U - 1 Song - SKU1.wav");

        let bonus = &files[1];
        assert_eq!(bonus.track_number, None);
        assert_eq!(bonus.track_sku, "SKU1");
        assert_eq!(bonus.canonical_name, "Label Crew - Bonus - SKU1.mp3");
        assert_eq!(bonus.slug_name, "Label-Crew---Bonus---SKU1.mp3");

        let cover = &files[2];
        assert_eq!(cover.kind, MediaKind::Image);
        assert_eq!(cover.canonical_name, "cover.jpg");
        assert_eq!(cover.slug_name, "cover.jpg");
    }

    #[test]
    fn unknown_skus_get_no_artists() {
        let root = TempDir::new().unwrap();
        let dir_path = root.path().join("SKU9");
        fs::create_dir(&dir_path).unwrap();
        fs::write(dir_path.join("3 Tune.wav"), b"a").unwrap();

        let dir = SkuDirectory {
            name: "SKU9".into(),
            path: dir_path,
        };
        let files = scanner(root.path())
            .list_files(&dir, &ArtistIndex::default())
            .unwrap();
        assert_eq!(files[0].track_sku, "SKU9_3");
        assert_eq!(files[0].artists, "");
        assert_eq!(files[0].canonical_name, "3 Tune - SKU9.wav");
    }

    #[test]
    fn scan_skips_empty_directories_and_fails_when_all_are_empty() {
        let root = TempDir::new().unwrap();
        fs::create_dir(root.path().join("EMPTY")).unwrap();
        fs::create_dir(root.path().join("SKU1")).unwrap();
        fs::write(root.path().join("SKU1").join("cover.png"), b"c").unwrap();

        let scanner = scanner(root.path());
        let dirs = scanner.list_directories().unwrap();
        let collection = scanner.scan(&dirs, &ArtistIndex::default()).unwrap();
        assert_eq!(collection.len(), 1);
        assert!(collection.get("SKU1").is_some());
        assert!(collection.get("EMPTY").is_none());

        let err = scanner
            .scan(&dirs[..1], &ArtistIndex::default())
            .unwrap_err();
        assert!(matches!(err, CatalogError::DirectoryScanEmpty(_)));
    }

    #[test]
    fn dotted_track_prefix_resolves_track_sku() {
        let root = TempDir::new().unwrap();
        let dir_path = root.path().join("SKU1");
        fs::create_dir(&dir_path).unwrap();
        fs::write(dir_path.join("01. Song.wav"), b"a").unwrap();

        let dir = SkuDirectory {
            name: "SKU1".into(),
            path: dir_path,
        };
        let artists = index(&[("SKU1_1", "DJ X")]);
        let files = scanner(root.path()).list_files(&dir, &artists).unwrap();
        assert_eq!(files[0].track_number, Some(1));
        assert_eq!(files[0].track_sku, "SKU1_1");
        assert_eq!(files[0].canonical_name, "DJ X - 01. Song - SKU1.wav");
    }

    #[test]
    fn transliteration_collisions_fail_the_scan() {
        let root = TempDir::new().unwrap();
        let dir_path = root.path().join("SKU1");
        fs::create_dir(&dir_path).unwrap();
        fs::write(dir_path.join("Café.wav"), b"accented").unwrap();
        fs::write(dir_path.join("Cafe.wav"), b"plain").unwrap();
        fs::write(dir_path.join("cover.jpg"), b"c").unwrap();

        let scanner = scanner(root.path());
        let dirs = scanner.list_directories().unwrap();
        match scanner.scan(&dirs, &ArtistIndex::default()) {
            Err(err @ CatalogError::DuplicateFileName(_)) => {
                assert_eq!(
                    err.offenders().unwrap(),
                    ["SKU1/Cafe - SKU1.wav", "SKU1/Cafe---SKU1.wav"]
                );
            }
            other => panic!("unexpected result: {:?}", other),
        }
        assert_eq!(fs::read(dir_path.join("Cafe.wav")).unwrap(), b"plain");
    }

    #[test]
    fn slug_only_collisions_are_reported() {
        let files: Vec<MediaFile> = ["A B.wav", "A-B.wav"]
            .iter()
            .map(|name| {
                build_media_file(
                    name,
                    PathBuf::from(*name),
                    MediaKind::Audio,
                    "SKU1",
                    &ArtistIndex::default(),
                )
            })
            .collect();

        match check_name_collisions("SKU1", &files) {
            Err(CatalogError::DuplicateFileName(names)) => {
                assert_eq!(names, vec!["SKU1/A-B---SKU1.wav"])
            }
            other => panic!("unexpected result: {:?}", other),
        }
    }
}
