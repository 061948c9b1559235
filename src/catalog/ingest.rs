use std::fs;
use std::path::Path;

use chardetng::EncodingDetector;
use csv::ReaderBuilder;
use log::{debug, info};

use crate::analyzers::{duplicate::find_duplicates, naming::find_invalid_names};
use crate::catalog::ProductRecord;
use crate::{CatalogError, Result};

const SKU_COLUMN: &str = "sku";

/// Reads and normalizes the product catalog.
///
/// The file must be UTF-8 and carry a `sku` column. Rows with a blank sku are
/// dropped and pipe-delimited artists are merged with " and ".
pub fn read_catalog(path: impl AsRef<Path>) -> Result<Vec<ProductRecord>> {
    let path = path.as_ref();
    if !path.is_file() {
        return Err(CatalogError::MissingCatalogFile(path.to_path_buf()));
    }

    let bytes = fs::read(path)?;
    let text = match std::str::from_utf8(&bytes) {
        Ok(text) => text,
        Err(_) => {
            return Err(CatalogError::Charset {
                path: path.to_path_buf(),
                detected: guess_encoding(&bytes),
            })
        }
    };
    let text = text.strip_prefix('\u{feff}').unwrap_or(text);

    let mut reader = ReaderBuilder::new()
        .flexible(true)
        .from_reader(text.as_bytes());

    let headers = reader.headers()?.clone();
    let has_sku_column = headers.iter().any(|h| h == SKU_COLUMN);

    let mut total_rows = 0;
    let mut records = Vec::new();
    for row in reader.records() {
        let mut row = row?;
        total_rows += 1;
        while row.len() < headers.len() {
            row.push_field("");
        }
        let mut record: ProductRecord = row.deserialize(Some(&headers))?;
        if record.sku.trim().is_empty() {
            debug!("Skipping row {} without sku", total_rows);
            continue;
        }
        record.artists = merge_artists(&record.artists);
        records.push(record);
    }

    if total_rows == 0 {
        return Err(CatalogError::EmptyCatalog(path.to_path_buf()));
    }
    if !has_sku_column || records.is_empty() {
        return Err(CatalogError::MissingField(SKU_COLUMN));
    }

    info!(
        "Read {} catalog records from {} ({} rows dropped)",
        records.len(),
        path.display(),
        total_rows - records.len()
    );
    Ok(records)
}

/// Rejects catalogs with malformed skus first, then duplicated ones.
pub fn validate_records(records: &[ProductRecord]) -> Result<()> {
    let skus: Vec<&str> = records.iter().map(|r| r.sku.as_str()).collect();

    let invalid = find_invalid_names(&skus);
    if !invalid.is_empty() {
        return Err(CatalogError::InvalidSku(invalid));
    }

    let duplicates = find_duplicates(&skus);
    if !duplicates.is_empty() {
        return Err(CatalogError::DuplicateSku(duplicates));
    }

    Ok(())
}

pub fn merge_artists(raw: &str) -> String {
    if raw.trim().is_empty() {
        return String::new();
    }
    raw.split('|')
        .map(str::trim)
        .collect::<Vec<_>>()
        .join(" and ")
}

fn guess_encoding(bytes: &[u8]) -> String {
    let mut detector = EncodingDetector::new();
    detector.feed(bytes, true);
    detector.guess(None, false).name().to_string()
}
