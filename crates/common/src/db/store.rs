//! Citation store abstraction
//!
//! Handlers receive the store as an injected `Arc<dyn CitationStore>`; nothing
//! reaches for a process-wide database handle.

use crate::db::models::{Citation, CitationInput};
use crate::errors::Result;
use async_trait::async_trait;

/// Persistence operations over the citation set
#[async_trait]
pub trait CitationStore: Send + Sync {
    /// All citations, newest first
    async fn list(&self) -> Result<Vec<Citation>>;

    /// A single citation, `NotFound` when absent
    async fn get(&self, id: &str) -> Result<Citation>;

    /// Validate and insert a payload under a fresh id and timestamps
    async fn create(&self, input: CitationInput) -> Result<Citation>;

    /// Replace every mutable field; `id` and `created_at` are kept
    async fn update(&self, id: &str, input: CitationInput) -> Result<Citation>;

    /// Hard delete. Deleting an unknown id succeeds.
    async fn delete(&self, id: &str) -> Result<()>;

    /// Substring match over title, authors, journal, abstract and keywords, newest first
    async fn search(&self, query: &str) -> Result<Vec<Citation>>;

    /// Check storage connectivity
    async fn ping(&self) -> Result<()>;
}
