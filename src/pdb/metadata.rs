//! The descriptive metadata record
//!
//! Metadata takes the form:
//!
//! ```text
//! title\x00
//! author\x00
//! copyright\x00
//! publisher\x00
//! isbn\x00
//! ```

use crate::model::Metadata;
use encoding_rs::WINDOWS_1252;

/// Default for a missing title or author
const UNKNOWN: &str = "Unknown";

/// Join author names into a single display string.
pub fn authors_to_string(authors: &[String]) -> String {
    authors.join(" & ")
}

/// Serialize metadata as five NUL-terminated cp1252 fields in fixed order.
///
/// A missing metadata object yields "Unknown" for title and author and
/// empty strings for the rest; the ISBN field is never sourced.
pub fn metadata_record(metadata: Option<&Metadata>) -> Vec<u8> {
    let mut title = UNKNOWN.to_string();
    let mut author = UNKNOWN.to_string();
    let mut copyright = String::new();
    let mut publisher = String::new();
    let isbn = String::new();

    if let Some(meta) = metadata {
        if let Some(t) = meta.titles.first() {
            title = t.clone();
        }
        if !meta.creators.is_empty() {
            author = authors_to_string(&meta.creators);
        }
        if let Some(r) = meta.rights.first() {
            copyright = r.clone();
        }
        if let Some(p) = meta.publishers.first() {
            publisher = p.clone();
        }
    }

    let mut record = Vec::new();
    for field in [&title, &author, &copyright, &publisher, &isbn] {
        let (encoded, _, _) = WINDOWS_1252.encode(field);
        record.extend_from_slice(&encoded);
        record.push(0);
    }
    record
}
