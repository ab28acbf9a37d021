//! CSV rendering

use crate::db::models::Citation;

/// Header row, without the trailing newline
pub const CSV_HEADER: &str = "Title,Authors,Journal,Year,Volume,Issue,Pages,DOI,URL,Abstract,Keywords";

/// Render one row per citation. Text fields are wrapped in double quotes and
/// the year is written bare; embedded quotes and commas are left as-is.
pub fn render_csv(citations: &[Citation]) -> String {
    let mut out = String::with_capacity(CSV_HEADER.len() + 1 + citations.len() * 128);
    out.push_str(CSV_HEADER);
    out.push('\n');

    for c in citations {
        out.push_str(&format!(
            "\"{}\",\"{}\",\"{}\",{},\"{}\",\"{}\",\"{}\",\"{}\",\"{}\",\"{}\",\"{}\"\n",
            c.title, c.authors, c.journal, c.year,
            c.volume, c.issue, c.pages, c.doi,
            c.url, c.abstract_text, c.keywords,
        ));
    }

    out
}
