//! Citation entity and its write payload

use sea_orm::entity::prelude::*;
use sea_orm::Set;
use serde::{Deserialize, Serialize};
use validator::Validate;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "citations")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,

    #[sea_orm(column_type = "Text")]
    pub title: String,

    /// Comma-separated author names; the first one seeds the BibTeX key
    #[sea_orm(column_type = "Text")]
    pub authors: String,

    #[sea_orm(column_type = "Text")]
    pub journal: String,

    pub year: i32,

    #[sea_orm(column_type = "Text")]
    pub volume: String,

    #[sea_orm(column_type = "Text")]
    pub issue: String,

    #[sea_orm(column_type = "Text")]
    pub pages: String,

    #[sea_orm(column_type = "Text")]
    pub doi: String,

    #[sea_orm(column_type = "Text")]
    pub url: String,

    #[sea_orm(column_name = "abstract", column_type = "Text")]
    #[serde(rename = "abstract")]
    pub abstract_text: String,

    #[sea_orm(column_type = "Text")]
    pub keywords: String,

    #[sea_orm(indexed)]
    pub created_at: DateTimeUtc,

    pub updated_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

/// Writable citation fields.
///
/// Server-owned fields (`id`, `created_at`, `updated_at`) are not part of the
/// payload and are dropped if a client sends them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate)]
pub struct CitationInput {
    #[validate(length(min = 1, message = "title must not be empty"))]
    pub title: String,

    #[serde(default)]
    pub authors: String,

    #[serde(default)]
    pub journal: String,

    pub year: i32,

    #[serde(default)]
    pub volume: String,

    #[serde(default)]
    pub issue: String,

    #[serde(default)]
    pub pages: String,

    #[serde(default)]
    pub doi: String,

    #[serde(default)]
    pub url: String,

    #[serde(default, rename = "abstract")]
    pub abstract_text: String,

    #[serde(default)]
    pub keywords: String,
}

impl CitationInput {
    /// Overwrite every mutable column of `model` with this payload
    pub fn apply(self, model: &mut ActiveModel) {
        model.title = Set(self.title);
        model.authors = Set(self.authors);
        model.journal = Set(self.journal);
        model.year = Set(self.year);
        model.volume = Set(self.volume);
        model.issue = Set(self.issue);
        model.pages = Set(self.pages);
        model.doi = Set(self.doi);
        model.url = Set(self.url);
        model.abstract_text = Set(self.abstract_text);
        model.keywords = Set(self.keywords);
    }
}

impl From<Model> for CitationInput {
    fn from(model: Model) -> Self {
        Self {
            title: model.title,
            authors: model.authors,
            journal: model.journal,
            year: model.year,
            volume: model.volume,
            issue: model.issue,
            pages: model.pages,
            doi: model.doi,
            url: model.url,
            abstract_text: model.abstract_text,
            keywords: model.keywords,
        }
    }
}
