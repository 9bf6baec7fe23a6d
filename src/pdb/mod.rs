//! eReader PDB (Palm Database) encoder
//!
//! Packs a prepared document (PML markup stream, image manifest, metadata)
//! into the eReader record layout: fixed header record, zlib-compressed
//! text pages, chapter/link indexes, palettized images, metadata, page-size
//! table and trailer, all behind the generic PalmDB record directory.

mod container;
mod header;
mod images;
mod index;
mod metadata;
mod text;
mod writer;

pub use container::PdbHeaderBuilder;
pub use images::{ImageError, ImageRecord, MAX_IMAGE_RECORD_SIZE, RASTER_IMAGE_TYPES};
pub use index::IndexKind;
pub use text::MAX_RECORD_SIZE;
pub use writer::{write_ereader, write_ereader_ext, IDENTITY};
