//! BibTeX rendering

use crate::db::models::Citation;

const HEADER: &str = "% Generated by bibforge\n\n";

/// Entry key: first comma-delimited author token followed by the year, with spaces removed.
///
/// `"Smith, J."` + 2020 gives `Smith2020`; `"van der Berg"` + 1999 gives `vanderBerg1999`.
pub fn bibtex_key(citation: &Citation) -> String {
    let first_author = citation.authors.split(',').next().unwrap_or_default();
    format!("{}{}", first_author, citation.year).replace(' ', "")
}

/// Render every citation as an `@article` entry
pub fn render_bibtex(citations: &[Citation]) -> String {
    let mut out = String::from(HEADER);
    for citation in citations {
        write_entry(&mut out, citation);
    }
    out
}

fn write_entry(out: &mut String, citation: &Citation) {
    out.push_str(&format!("@article{{{},\n", bibtex_key(citation)));
    push_field(out, "title", &citation.title);
    push_field(out, "author", &citation.authors);
    push_field(out, "journal", &citation.journal);
    push_field(out, "year", &citation.year.to_string());

    let optional = [
        ("volume", &citation.volume),
        ("number", &citation.issue),
        ("pages", &citation.pages),
        ("doi", &citation.doi),
        ("url", &citation.url),
    ];
    for (name, value) in optional {
        if !value.is_empty() {
            push_field(out, name, value);
        }
    }

    out.push_str("}\n\n");
}

fn push_field(out: &mut String, name: &str, value: &str) {
    out.push_str(&format!("  {} = {{{}}},\n", name, value));
}
