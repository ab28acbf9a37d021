//! Repository pattern for database operations
//!
//! SeaORM-backed implementation of [`CitationStore`].

use crate::db::models::*;
use crate::db::store::CitationStore;
use crate::db::DbPool;
use crate::errors::{AppError, Result};
use async_trait::async_trait;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, DatabaseConnection, EntityTrait, QueryFilter,
    QueryOrder, Set,
};
use uuid::Uuid;
use validator::Validate;

/// Repository for citation data access
#[derive(Clone)]
pub struct Repository {
    pool: DbPool,
}

impl Repository {
    /// Create a new repository with the given connection pool
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    fn conn(&self) -> &DatabaseConnection {
        self.pool.conn()
    }

    async fn find(&self, id: &str) -> Result<Citation> {
        CitationEntity::find_by_id(id.to_string())
            .one(self.conn())
            .await?
            .ok_or_else(|| AppError::NotFound { id: id.to_string() })
    }
}

#[async_trait]
impl CitationStore for Repository {
    async fn list(&self) -> Result<Vec<Citation>> {
        CitationEntity::find()
            .order_by_desc(CitationColumn::CreatedAt)
            .all(self.conn())
            .await
            .map_err(Into::into)
    }

    async fn get(&self, id: &str) -> Result<Citation> {
        self.find(id).await
    }

    async fn create(&self, input: CitationInput) -> Result<Citation> {
        input.validate()?;

        let now = chrono::Utc::now();
        let mut citation = CitationActiveModel {
            id: Set(Uuid::new_v4().to_string()),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };
        input.apply(&mut citation);

        let citation = citation.insert(self.conn()).await?;

        tracing::info!(citation_id = %citation.id, title = %citation.title, "Citation created");

        Ok(citation)
    }

    async fn update(&self, id: &str, input: CitationInput) -> Result<Citation> {
        input.validate()?;

        let existing = self.find(id).await?;
        // never move updated_at backwards, even if the wall clock does
        let now = chrono::Utc::now().max(existing.updated_at);

        let mut citation: CitationActiveModel = existing.into();
        input.apply(&mut citation);
        citation.updated_at = Set(now);

        let citation = citation.update(self.conn()).await?;

        tracing::info!(citation_id = %citation.id, "Citation updated");

        Ok(citation)
    }

    async fn delete(&self, id: &str) -> Result<()> {
        let result = CitationEntity::delete_by_id(id.to_string())
            .exec(self.conn())
            .await?;

        tracing::debug!(
            citation_id = %id,
            rows_affected = result.rows_affected,
            "Citation delete executed"
        );

        Ok(())
    }

    async fn search(&self, query: &str) -> Result<Vec<Citation>> {
        if query.is_empty() {
            return Err(AppError::invalid_field("q", "Search query is required"));
        }

        CitationEntity::find()
            .filter(
                Condition::any()
                    .add(CitationColumn::Title.contains(query))
                    .add(CitationColumn::Authors.contains(query))
                    .add(CitationColumn::Journal.contains(query))
                    .add(CitationColumn::AbstractText.contains(query))
                    .add(CitationColumn::Keywords.contains(query)),
            )
            .order_by_desc(CitationColumn::CreatedAt)
            .all(self.conn())
            .await
            .map_err(Into::into)
    }

    async fn ping(&self) -> Result<()> {
        self.pool.ping().await
    }
}
