//! Bibforge Common Library
//!
//! Shared code for the Bibforge citation service including:
//! - Citation model and SeaORM storage
//! - Store abstraction used by the HTTP layer
//! - Export formats (JSON, BibTeX, CSV)
//! - Error types and handling
//! - Configuration management
//! - Metrics helpers

pub mod config;
pub mod db;
pub mod errors;
pub mod export;
pub mod metrics;

// Re-export commonly used types
pub use crate::config::AppConfig;
pub use crate::db::{CitationStore, DbPool, Repository};
pub use crate::errors::{AppError, Result};
pub use crate::export::ExportFormat;

/// Application version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
