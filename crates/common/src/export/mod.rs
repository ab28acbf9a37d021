//! Citation export formats
//!
//! Renders a full citation set as JSON, BibTeX or CSV. BibTeX and CSV output
//! is written verbatim: field values are not escaped, so braces, quotes or
//! commas inside a value pass straight through.

mod bibtex;
mod csv;

pub use bibtex::{bibtex_key, render_bibtex};
pub use csv::{render_csv, CSV_HEADER};

use crate::db::models::Citation;
use crate::errors::{AppError, Result};
use std::fmt;
use std::str::FromStr;

/// Supported export formats
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ExportFormat {
    #[default]
    Json,
    Bibtex,
    Csv,
}

impl ExportFormat {
    /// Parse the `format` query parameter; absent or empty selects JSON
    pub fn from_param(param: Option<&str>) -> Result<Self> {
        match param {
            None | Some("") => Ok(ExportFormat::Json),
            Some(value) => value.parse(),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ExportFormat::Json => "json",
            ExportFormat::Bibtex => "bibtex",
            ExportFormat::Csv => "csv",
        }
    }

    /// MIME type of the rendered document
    pub fn content_type(&self) -> &'static str {
        match self {
            ExportFormat::Json => "application/json",
            ExportFormat::Bibtex => "text/plain",
            ExportFormat::Csv => "text/csv",
        }
    }

    /// Download filename; JSON is returned inline
    pub fn attachment_filename(&self) -> Option<&'static str> {
        match self {
            ExportFormat::Json => None,
            ExportFormat::Bibtex => Some("citations.bib"),
            ExportFormat::Csv => Some("citations.csv"),
        }
    }
}

impl FromStr for ExportFormat {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "json" => Ok(ExportFormat::Json),
            "bibtex" => Ok(ExportFormat::Bibtex),
            "csv" => Ok(ExportFormat::Csv),
            other => Err(AppError::UnsupportedFormat {
                format: other.to_string(),
            }),
        }
    }
}

impl fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A rendered export document
#[derive(Debug, Clone)]
pub struct Export {
    pub format: ExportFormat,
    pub body: String,
}

impl Export {
    pub fn content_type(&self) -> &'static str {
        self.format.content_type()
    }

    /// `Content-Disposition` header value, if the format is a download
    pub fn content_disposition(&self) -> Option<String> {
        self.format
            .attachment_filename()
            .map(|name| format!("attachment; filename={}", name))
    }
}

/// Render `citations` (already in list order) in the requested format
pub fn render(format: ExportFormat, citations: &[Citation]) -> Result<Export> {
    let body = match format {
        ExportFormat::Json => serde_json::to_string(citations)?,
        ExportFormat::Bibtex => render_bibtex(citations),
        ExportFormat::Csv => render_csv(citations),
    };

    Ok(Export { format, body })
}

#[cfg(test)]
pub(crate) fn sample(authors: &str, year: i32, title: &str, journal: &str) -> Citation {
    let now = chrono::Utc::now();
    Citation {
        id: uuid::Uuid::new_v4().to_string(),
        title: title.to_string(),
        authors: authors.to_string(),
        journal: journal.to_string(),
        year,
        volume: String::new(),
        issue: String::new(),
        pages: String::new(),
        doi: String::new(),
        url: String::new(),
        abstract_text: String::new(),
        keywords: String::new(),
        created_at: now,
        updated_at: now,
    }
}
