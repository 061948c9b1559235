use clap::Parser;
use std::path::PathBuf;

use crate::config::{PipelineConfig, DEFAULT_BASE_URL};

#[derive(Parser, Debug)]
#[command(name = "catalog-packager")]
#[command(version = "1.0")]
#[command(about = "Renames, zips and re-catalogs per-sku release folders")]
#[command(long_about = None)]
pub struct Cli {
    /// Directory holding one folder per sku
    #[arg(long = "files-dir", default_value = "files")]
    pub files_dir: PathBuf,

    /// Product catalog to read
    #[arg(long, default_value = "products.csv")]
    pub catalog: PathBuf,

    /// Where the files-data-* output directory is created
    #[arg(long = "output-root", default_value = ".")]
    pub output_root: PathBuf,

    /// Prefix for download links in the exported catalog
    #[arg(long = "base-url", env = "CATALOG_BASE_URL", default_value = DEFAULT_BASE_URL)]
    pub base_url: String,

    /// Extra file name pattern (regex) to ignore while scanning
    #[arg(long = "ignore", value_name = "REGEX")]
    pub ignore: Vec<String>,
}

impl From<Cli> for PipelineConfig {
    fn from(cli: Cli) -> Self {
        Self {
            files_dir: cli.files_dir,
            catalog_path: cli.catalog,
            output_root: cli.output_root,
            base_url: cli.base_url,
            ignore_patterns: cli.ignore,
        }
    }
}
