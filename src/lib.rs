use std::path::PathBuf;

pub mod analyzers;
pub mod catalog;
pub mod cli;
pub mod config;
pub mod media;
pub mod pipeline;
pub mod utils;

#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error("Input directory missing or empty: {}", .0.display())]
    MissingInputDirectory(PathBuf),
    #[error("Catalog file not found: {}", .0.display())]
    MissingCatalogFile(PathBuf),
    #[error("Catalog {} is not UTF-8 (looks like {detected})", .path.display())]
    Charset { path: PathBuf, detected: String },
    #[error("Catalog {} has no data rows", .0.display())]
    EmptyCatalog(PathBuf),
    #[error("Required column '{0}' is missing or blank on every row")]
    MissingField(&'static str),
    #[error("Invalid skus: {}", .0.join(", "))]
    InvalidSku(Vec<String>),
    #[error("Duplicate skus: {}", .0.join(", "))]
    DuplicateSku(Vec<String>),
    #[error("Invalid directory names: {}", .0.join(", "))]
    InvalidDirectoryName(Vec<String>),
    #[error("No sku directories found in {}", .0.display())]
    NoDirectoriesFound(PathBuf),
    #[error("All sku directories in {} are empty", .0.display())]
    DirectoryScanEmpty(PathBuf),
    #[error("Files would share a packaged name: {}", .0.join(", "))]
    DuplicateFileName(Vec<String>),
    #[error(
        "Failed to copy {} to {} (sku {sku}): {io}",
        .source_path.display(),
        .destination.display()
    )]
    Copy {
        sku: String,
        source_path: PathBuf,
        destination: PathBuf,
        #[source]
        io: std::io::Error,
    },
    #[error("Failed to build archive {} (sku {sku}): {zip}", .path.display())]
    Archive {
        sku: String,
        path: PathBuf,
        #[source]
        zip: zip::result::ZipError,
    },
    #[error("Invalid ignore pattern: {0}")]
    Pattern(#[from] regex::Error),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
    #[error("Directory walk error: {0}")]
    Walk(#[from] walkdir::Error),
}

impl CatalogError {
    /// Identifiers behind a validation failure, for tabular display.
    pub fn offenders(&self) -> Option<&[String]> {
        match self {
            CatalogError::InvalidSku(items)
            | CatalogError::DuplicateSku(items)
            | CatalogError::InvalidDirectoryName(items)
            | CatalogError::DuplicateFileName(items) => Some(items),
            _ => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, CatalogError>;

// Re-exports for convenience
pub use analyzers::duplicate::find_duplicates;
pub use analyzers::naming::find_invalid_names;
pub use catalog::{ArtistIndex, ProductRecord};
pub use config::PipelineConfig;
pub use media::{Collection, MediaFile, MediaKind, SkuDirectory};
pub use pipeline::{Pipeline, RunSummary};
