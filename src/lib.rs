// Re-export main components
pub mod catalog;
pub mod document;
pub mod engine;
pub mod fuzzy;
pub mod index;
pub mod query;
pub mod ranking;
pub mod tokenizer;

// Re-export commonly used types
pub use catalog::{load_catalog, parse_catalog, CatalogError};
pub use document::{Document, Product, ScoredItem};
pub use engine::{Filters, SearchEngine, SearchOptions, SearchResult, SortOrder};
pub use index::TfIdfModel;
pub use query::{ParsedQuery, QueryExtractor};
pub use tokenizer::Tokenizer;

// Re-export error types
pub use anyhow::{Error, Result};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
