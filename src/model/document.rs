use super::Metadata;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Represents a single document resource (image, stylesheet, ...)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ManifestItem {
    /// Resource path inside the source book
    pub href: String,

    /// MIME media type of the resource
    pub media_type: String,

    /// Raw resource bytes
    pub data: Vec<u8>,
}

/// Ordered collection of document resources
///
/// Iteration order is manifest order; the encoder emits image records in
/// this order.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Manifest {
    items: Vec<ManifestItem>,
}

impl Manifest {
    /// Create an empty manifest
    pub fn new() -> Self {
        Self { items: Vec::new() }
    }

    /// Append a resource
    pub fn add_item(&mut self, item: ManifestItem) {
        self.items.push(item);
    }

    /// Iterate resources in manifest order
    pub fn items(&self) -> impl Iterator<Item = &ManifestItem> {
        self.items.iter()
    }

    /// Number of resources
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Check if empty
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

/// The fully prepared input to the eReader encoder
#[derive(Debug, Clone)]
pub struct Document {
    /// cp1252-encoded PML markup stream
    pub markup: Vec<u8>,

    /// Document resources, iterated in manifest order
    pub manifest: Manifest,

    /// Resource href -> output-safe record name, restricted to images
    /// actually referenced from the markup
    pub image_hrefs: HashMap<String, String>,

    /// Descriptive metadata, if any
    pub metadata: Option<Metadata>,
}
