//! eReader PDB writer
//!
//! Assembles the full record sequence and streams it out behind the PalmDB
//! record directory. Record order, as generated by Dropbook:
//!
//! 1. eReader header record
//! 2. Compressed text pages
//! 3. Chapter index
//! 4. Links index
//! 5. Images
//! 6. Metadata
//! 7. Text page size record
//! 8. `MeTaInFo\x00` trailer record

use super::container::PdbHeaderBuilder;
use super::header::header_record;
use super::images::{pack_images, ImageRecord};
use super::index::{build_index, IndexKind};
use super::metadata::metadata_record;
use super::text::paginate;
use crate::model::Document;
use anyhow::{Context, Result};
use std::io::Write;

/// Creator/type identity of eReader PDB files
pub const IDENTITY: &str = "PNRdPPrs";

/// Final record marker
const TRAILER: &[u8] = b"MeTaInFo\x00";

/// One output record: a plain blob, or an image (header, payload) pair
/// whose length is the sum of both parts.
enum Record {
    Blob(Vec<u8>),
    Image(ImageRecord),
}

impl Record {
    fn len(&self) -> usize {
        match self {
            Record::Blob(data) => data.len(),
            Record::Image(image) => image.len(),
        }
    }

    fn write_to<W: Write>(&self, out: &mut W) -> std::io::Result<()> {
        match self {
            Record::Blob(data) => out.write_all(data),
            Record::Image(image) => {
                out.write_all(&image.header)?;
                out.write_all(&image.payload)
            }
        }
    }
}

/// Encode `document` as a complete eReader PDB stream.
pub fn write_ereader<W: Write>(document: &Document, out: &mut W) -> Result<()> {
    write_ereader_ext(document, out, None)
}

/// Like [`write_ereader`], optionally fixing the container timestamp so
/// repeated encodes of the same input are byte-identical.
pub fn write_ereader_ext<W: Write>(
    document: &Document,
    out: &mut W,
    timestamp: Option<u32>,
) -> Result<()> {
    log::info!(
        "Encoding eReader PDB: {} markup bytes, {} manifest item(s)",
        document.markup.len(),
        document.manifest.len()
    );

    let paged = paginate(&document.markup)?;
    let chapter_index = build_index(IndexKind::Chapter, &document.markup)?;
    let link_index = build_index(IndexKind::Link, &document.markup)?;
    let images = pack_images(&document.manifest, &document.image_hrefs);
    let metadata = metadata_record(document.metadata.as_ref());

    log::info!(
        "  Pages: {}, chapters: {}, links: {}, images: {}",
        paged.pages.len(),
        chapter_index.len(),
        link_index.len(),
        images.len()
    );

    let header = header_record(
        paged.pages.len() as u16,
        chapter_index.len() as u16,
        link_index.len() as u16,
        images.len() as u16,
    );

    let name = record_name(&metadata);

    let mut size_table = Vec::with_capacity(paged.sizes.len() * 2);
    for size in &paged.sizes {
        size_table.extend_from_slice(&size.to_be_bytes());
    }

    let mut records = Vec::new();
    records.push(Record::Blob(header));
    records.extend(paged.pages.into_iter().map(Record::Blob));
    records.extend(chapter_index.into_iter().map(Record::Blob));
    records.extend(link_index.into_iter().map(Record::Blob));
    records.extend(images.into_iter().map(Record::Image));
    records.push(Record::Blob(metadata));
    records.push(Record::Blob(size_table));
    records.push(Record::Blob(TRAILER.to_vec()));

    let lengths: Vec<usize> = records.iter().map(Record::len).collect();

    let mut builder = PdbHeaderBuilder::new(IDENTITY, &name);
    if let Some(timestamp) = timestamp {
        builder = builder.with_timestamp(timestamp);
    }
    builder
        .build_header(&lengths, out)
        .context("Failed to write PDB container header")?;

    for record in &records {
        record
            .write_to(out)
            .context("Failed to write PDB record")?;
    }

    Ok(())
}

/// Database display name: the title field of the metadata record.
fn record_name(metadata: &[u8]) -> String {
    let title = metadata.split(|&b| b == 0).next().unwrap_or(&[]);
    String::from_utf8_lossy(title).into_owned()
}
