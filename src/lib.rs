//! eReader Exporter - PML to eReader PDB encoder
//!
//! This library packs a processed e-book document (a cp1252 PML markup
//! stream, its image manifest and descriptive metadata) into the eReader
//! PDB container format.

pub mod export;
pub mod model;
pub mod pdb;

pub use export::config::ExportConfig;
pub use export::pipeline::ExportPipeline;
