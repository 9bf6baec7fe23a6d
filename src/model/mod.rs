//! Unified document model for the encoder
//!
//! This module defines data structures that are independent of
//! both the upstream markup producer and the output container layout.

mod document;
mod metadata;

pub use document::{Document, Manifest, ManifestItem};
pub use metadata::Metadata;
