use crate::document::Product;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("failed to read catalog file: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse catalog JSON: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Load a catalog from a JSON file holding an array of products
pub fn load_catalog(path: impl AsRef<Path>) -> Result<Vec<Product>, CatalogError> {
    let file = File::open(path)?;
    let reader = BufReader::new(file);
    let products = serde_json::from_reader(reader)?;
    Ok(products)
}

/// Parse a catalog from a JSON string
pub fn parse_catalog(json: &str) -> Result<Vec<Product>, CatalogError> {
    Ok(serde_json::from_str(json)?)
}
