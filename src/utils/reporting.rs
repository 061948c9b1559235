use std::path::Path;

use csv::Writer;
use deunicode::deunicode;
use log::{info, warn};
use serde::Serialize;

use crate::catalog::ProductRecord;
use crate::media::Collection;
use crate::utils::file_ops::{ARCHIVE_DIR, LOOSE_DIR};
use crate::Result;

/// Export row; field order is the column order of the generated CSV.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct OutputRow {
    pub title: String,
    pub sku: String,
    pub slug: String,
    pub sku_ep: String,
    #[serde(rename = "type")]
    pub product_type: String,
    pub short_description: String,
    pub price: String,
    pub product_categories: String,
    pub product_tags: String,
    pub artists: String,
    pub labels: String,
    pub genres: String,
    pub years: String,
    pub owners: String,
    pub product_visibility: String,
    pub featured_image: String,
    pub download_file_paths: String,
    pub download_file_names: String,
    pub playlist_data: String,
}

/// Track-or-release reading of a sku. A sku whose last `_` segment is a
/// single character is a track of the release named by the other segments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkuClass {
    pub is_track: bool,
    pub ep_sku: String,
}

impl SkuClass {
    pub fn of(sku: &str) -> Self {
        let segments: Vec<&str> = sku.split('_').collect();
        let last = segments.last().copied().unwrap_or_default();
        let ep_sku = if segments.len() > 1 {
            segments[..segments.len() - 1].join("_")
        } else {
            sku.to_string()
        };

        Self {
            is_track: last.chars().count() == 1,
            ep_sku,
        }
    }
}

pub struct Reporter {
    base_url: String,
}

impl Reporter {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    /// One row per record, in input order, with download fields recomputed.
    pub fn build_rows(
        &self,
        records: &[ProductRecord],
        collection: &Collection,
    ) -> Vec<OutputRow> {
        records
            .iter()
            .map(|record| self.build_row(record, collection))
            .collect()
    }

    fn build_row(&self, record: &ProductRecord, collection: &Collection) -> OutputRow {
        let mut row = OutputRow {
            title: deunicode(&record.title),
            sku: record.sku.clone(),
            slug: record.slug.clone(),
            sku_ep: record.sku_ep.clone(),
            product_type: record.product_type.clone(),
            short_description: deunicode(&record.short_description),
            price: record.price.clone(),
            product_categories: record.product_categories.clone(),
            product_tags: record.product_tags.clone(),
            artists: deunicode(&record.artists),
            labels: deunicode(&record.labels),
            genres: deunicode(&record.genres),
            years: record.years.clone(),
            owners: deunicode(&record.owners),
            product_visibility: record.product_visibility.clone(),
            featured_image: record.featured_image.clone(),
            download_file_paths: String::new(),
            download_file_names: String::new(),
            playlist_data: record.playlist_data.clone(),
        };

        let class = SkuClass::of(&record.sku);
        if !class.is_track {
            row.download_file_paths =
                format!("{}/{}/{}.zip", self.base_url, ARCHIVE_DIR, class.ep_sku);
            row.download_file_names = format!("{}.zip", class.ep_sku);
            return row;
        }

        let track = collection.get(&class.ep_sku).and_then(|files| {
            files
                .iter()
                .filter(|file| file.is_audio())
                .find(|file| file.track_sku == record.sku)
        });

        match track {
            Some(file) => {
                row.download_file_paths = format!(
                    "{}/{}/{}/{}",
                    self.base_url, LOOSE_DIR, class.ep_sku, file.slug_name
                );
                row.download_file_names = file.canonical_name.clone();
            }
            None => warn!(
                "No audio file found for track {} in {}, download fields left blank",
                record.sku, class.ep_sku
            ),
        }

        row
    }

    /// Writes `rows` with a header line to `dir/file_name`.
    pub fn write_catalog(
        &self,
        rows: &[OutputRow],
        dir: impl AsRef<Path>,
        file_name: &str,
    ) -> Result<()> {
        let output_path = dir.as_ref().join(file_name);
        let mut writer = Writer::from_path(&output_path)?;

        for row in rows {
            writer.serialize(row)?;
        }

        writer.flush()?;
        info!(
            "Catalog with {} rows written to {}",
            rows.len(),
            output_path.display()
        );
        Ok(())
    }
}
