use std::process::ExitCode;

use catalog_packager::cli::commands::Cli;
use catalog_packager::{CatalogError, Pipeline, PipelineConfig};
use clap::Parser;

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();
    let pipeline = Pipeline::new(PipelineConfig::from(cli));

    println!("=== Start build ===");
    println!("Media directory: {}", pipeline.config().files_dir.display());
    println!("Catalog: {}", pipeline.config().catalog_path.display());

    match pipeline.run() {
        Ok(summary) => {
            println!(
                "\n{} catalog records, {} sku directories",
                summary.records, summary.directories
            );
            println!(
                "{} files copied, {} archives created",
                summary.files_copied,
                summary.archives.len()
            );
            println!("Output directory: {}", summary.output_dir.display());
            println!("Catalog written: {}", summary.catalog_file);
            println!("\n=== Build finished ===");
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("\nFail - {}", e);
            if let Some(offenders) = e.offenders() {
                print_table(&e, offenders);
            }
            ExitCode::FAILURE
        }
    }
}

fn print_table(error: &CatalogError, items: &[String]) {
    let heading = match error {
        CatalogError::InvalidSku(_) | CatalogError::DuplicateSku(_) => "sku",
        CatalogError::DuplicateFileName(_) => "file",
        _ => "directory",
    };
    let width = column_width(heading, items);

    eprintln!("┌─────────┬─{}─┐", "─".repeat(width));
    eprintln!("│ (index) │ {:<width$} │", heading, width = width);
    eprintln!("├─────────┼─{}─┤", "─".repeat(width));
    for (index, item) in items.iter().enumerate() {
        eprintln!("│ {:>7} │ {:<width$} │", index, item, width = width);
    }
    eprintln!("└─────────┴─{}─┘", "─".repeat(width));
}

/// Widest cell in characters, so multi-byte names keep the borders aligned.
fn column_width(heading: &str, items: &[String]) -> usize {
    items
        .iter()
        .map(|item| item.chars().count())
        .chain(std::iter::once(heading.chars().count()))
        .max()
        .unwrap_or(0)
}
