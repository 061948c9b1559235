use std::collections::HashMap;

use deunicode::deunicode;
use serde::Deserialize;

pub mod ingest;

pub use ingest::{read_catalog, validate_records};

/// One catalog row. Columns absent from the source file stay empty.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ProductRecord {
    pub sku: String,
    pub artists: String,
    pub title: String,
    pub slug: String,
    pub sku_ep: String,
    #[serde(rename = "type")]
    pub product_type: String,
    pub short_description: String,
    pub price: String,
    pub product_categories: String,
    pub product_tags: String,
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

/// Transliterated artist credits keyed by sku.
#[derive(Debug, Clone, Default)]
pub struct ArtistIndex {
    by_sku: HashMap<String, String>,
}

impl ArtistIndex {
    pub fn from_records(records: &[ProductRecord]) -> Self {
        let by_sku = records
            .iter()
            .map(|record| (record.sku.clone(), deunicode(&record.artists)))
            .collect();
        Self { by_sku }
    }

    pub fn get(&self, sku: &str) -> Option<&str> {
        self.by_sku.get(sku).map(String::as_str)
    }
}
