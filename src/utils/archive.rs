use std::fs::File;
use std::io;
use std::path::{Path, PathBuf};

use log::{debug, info};
use zip::result::ZipError;
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipWriter};

use crate::media::MediaFile;
use crate::utils::file_ops::OutputLayout;
use crate::{CatalogError, Result};

/// Writes `EP/{sku}.zip` holding `files` in order: audio under the canonical
/// name, images under their own. Any failure abandons the whole archive.
pub fn create_zip(layout: &OutputLayout, sku: &str, files: &[MediaFile]) -> Result<PathBuf> {
    let path = layout.archive_path(sku);

    write_archive(&path, files).map_err(|zip| CatalogError::Archive {
        sku: sku.to_string(),
        path: path.clone(),
        zip,
    })?;

    info!("Archive {} written with {} entries", path.display(), files.len());
    Ok(path)
}

fn write_archive(path: &Path, files: &[MediaFile]) -> std::result::Result<(), ZipError> {
    let mut writer = ZipWriter::new(File::create(path)?);
    let options = SimpleFileOptions::default()
        .compression_method(CompressionMethod::Deflated);

    for file in files {
        let mut source = File::open(&file.path)?;
        writer.start_file(file.archive_name(), options)?;
        io::copy(&mut source, &mut writer)?;
        debug!("Added {} as {}", file.path.display(), file.archive_name());
    }

    writer.finish()?;
    Ok(())
}
