//! Catalog seeding command.
//!
//! Writes the sample catalog document the storefront serves at
//! `/static/data/products.json`. The document is validated against the
//! `Product` type before it is written, so a seeded catalog always loads.

use std::path::Path;

use tracing::info;

use gondola_core::Product;

/// Errors from catalog seeding.
#[derive(Debug, thiserror::Error)]
pub enum SeedError {
    #[error("Catalog sample is invalid: {0}")]
    Invalid(#[from] serde_json::Error),

    #[error("Failed to write catalog: {0}")]
    Io(#[from] std::io::Error),
}

/// The sample catalog document.
const SAMPLE_CATALOG: &str = include_str!("../../data/products.json");

/// Write the sample catalog document to `out`.
///
/// # Errors
///
/// Returns `SeedError` if the sample fails validation or the file cannot
/// be written.
pub async fn catalog(out: &str) -> Result<(), SeedError> {
    // Validate before writing anything
    let products: Vec<Product> = serde_json::from_str(SAMPLE_CATALOG)?;
    info!(count = products.len(), "Validated sample catalog");

    let path = Path::new(out);
    if let Some(parent) = path.parent() {
        tokio::fs::create_dir_all(parent).await?;
    }

    tokio::fs::write(path, SAMPLE_CATALOG).await?;
    info!(path = %out, "Catalog written");

    Ok(())
}
