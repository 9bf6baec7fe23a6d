//! Export configuration

use std::path::PathBuf;

/// Configuration for one eReader export
#[derive(Debug, Clone)]
pub struct ExportConfig {
    /// Path to the PML markup file (cp1252 encoded)
    pub markup_path: PathBuf,

    /// Directory holding the images referenced from the markup
    pub image_dir: Option<PathBuf>,

    /// Output .pdb path
    pub output_path: PathBuf,

    /// Book title (defaults handled by the metadata record)
    pub title: Option<String>,

    /// Author names
    pub authors: Vec<String>,

    /// Copyright line
    pub rights: Option<String>,

    /// Publisher
    pub publisher: Option<String>,
}

impl ExportConfig {
    /// Create a new export configuration
    pub fn new(markup_path: PathBuf, output_path: PathBuf) -> Self {
        Self {
            markup_path,
            image_dir: None,
            output_path,
            title: None,
            authors: Vec::new(),
            rights: None,
            publisher: None,
        }
    }

    /// Set the directory images are loaded from
    pub fn with_image_dir(mut self, dir: PathBuf) -> Self {
        self.image_dir = Some(dir);
        self
    }

    /// Set the book title
    pub fn with_title(mut self, title: String) -> Self {
        self.title = Some(title);
        self
    }

    /// Set the author list
    pub fn with_authors(mut self, authors: Vec<String>) -> Self {
        self.authors = authors;
        self
    }
}
