use std::fs;
use std::path::PathBuf;

use chrono::Local;
use log::info;

use crate::catalog::{read_catalog, validate_records, ArtistIndex, ProductRecord};
use crate::config::PipelineConfig;
use crate::media::scanner::{validate_directories, DirectoryScanner};
use crate::media::{Collection, SkuDirectory};
use crate::utils::archive::create_zip;
use crate::utils::file_ops::{FileManager, OutputLayout};
use crate::utils::reporting::Reporter;
use crate::{CatalogError, Result};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunSummary {
    pub records: usize,
    pub directories: usize,
    pub files_copied: usize,
    pub archives: Vec<PathBuf>,
    pub output_dir: PathBuf,
    pub catalog_file: String,
}

/// Runs ingest, scan, packaging and export in that order. The first failing
/// phase ends the run; output already written is left in place.
pub struct Pipeline {
    config: PipelineConfig,
}

impl Pipeline {
    pub fn new(config: PipelineConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    pub fn run(&self) -> Result<RunSummary> {
        self.check_inputs()?;

        let records = self.ingest()?;
        let artists = ArtistIndex::from_records(&records);

        let scanner =
            DirectoryScanner::new(&self.config.files_dir, self.config.junk_filter()?);
        let dirs = self.list_directories(&scanner)?;
        let collection = scanner.scan(&dirs, &artists)?;
        info!(
            "{} directories listed, {} media files",
            collection.len(),
            collection.file_count()
        );

        let stamp = timestamp();
        let output_dir = self
            .config
            .output_root
            .join(format!("files-data-{}", stamp));
        let layout = OutputLayout::create(output_dir)?;
        let (files_copied, archives) = package(&layout, &collection)?;

        let catalog_file = self.export(&records, &collection, &layout, &stamp)?;

        Ok(RunSummary {
            records: records.len(),
            directories: dirs.len(),
            files_copied,
            archives,
            output_dir: layout.root().to_path_buf(),
            catalog_file,
        })
    }

    /// Fails early when the media root or the catalog is missing.
    pub fn check_inputs(&self) -> Result<()> {
        let files_dir = &self.config.files_dir;
        let has_entries = files_dir.is_dir() && fs::read_dir(files_dir)?.next().is_some();
        if !has_entries {
            return Err(CatalogError::MissingInputDirectory(files_dir.clone()));
        }
        if !self.config.catalog_path.is_file() {
            return Err(CatalogError::MissingCatalogFile(self.config.catalog_path.clone()));
        }
        Ok(())
    }

    pub fn ingest(&self) -> Result<Vec<ProductRecord>> {
        let records = read_catalog(&self.config.catalog_path)?;
        validate_records(&records)?;
        info!("{} catalog records found", records.len());
        Ok(records)
    }

    pub fn list_directories(&self, scanner: &DirectoryScanner) -> Result<Vec<SkuDirectory>> {
        let dirs = scanner.list_directories()?;
        validate_directories(&dirs)?;
        Ok(dirs)
    }

    pub fn export(
        &self,
        records: &[ProductRecord],
        collection: &Collection,
        layout: &OutputLayout,
        stamp: &str,
    ) -> Result<String> {
        let reporter = Reporter::new(self.config.base_url.as_str());
        let rows = reporter.build_rows(records, collection);
        let file_name = format!("products-{}.csv", stamp);
        reporter.write_catalog(&rows, layout.root(), &file_name)?;
        Ok(file_name)
    }
}

/// Copies every sku's files, then zips that sku, in listing order.
pub fn package(layout: &OutputLayout, collection: &Collection) -> Result<(usize, Vec<PathBuf>)> {
    let manager = FileManager::new(layout.clone());
    let mut copied = 0;
    let mut archives = Vec::with_capacity(collection.len());

    for (dir, files) in collection.iter() {
        for file in files {
            let destination = manager.move_files(file)?;
            info!(
                "Created {}/{}",
                file.sku,
                destination.file_name().unwrap_or_default().to_string_lossy()
            );
            copied += 1;
        }
        archives.push(create_zip(layout, &dir.name, files)?);
    }

    Ok((copied, archives))
}

/// `YYYY-MM-DD-HH-MM-SS-mmm` in local time.
pub fn timestamp() -> String {
    Local::now().format("%Y-%m-%d-%H-%M-%S-%3f").to_string()
}
