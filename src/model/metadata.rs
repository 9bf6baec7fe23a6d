use serde::{Deserialize, Serialize};

/// Descriptive metadata value lists extracted from the source book
///
/// Every list may be empty; the encoder substitutes defaults for a missing
/// title or author.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Metadata {
    /// Title values; the first one is used
    pub titles: Vec<String>,

    /// Creator/author values; all are joined into one display string
    pub creators: Vec<String>,

    /// Rights/copyright values; the first one is used
    pub rights: Vec<String>,

    /// Publisher values; the first one is used
    pub publishers: Vec<String>,
}
