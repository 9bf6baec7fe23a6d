//! Embedded image records
//!
//! Filters the manifest to raster images referenced from the markup,
//! downsizes each one into the reader's 300x300 box and re-encodes it as an
//! 8-bit indexed PNG behind the fixed 62-byte image header. A failing image
//! is dropped with a logged error; it never aborts the export.

use crate::model::Manifest;
use color_quant::NeuQuant;
use std::collections::HashMap;
use thiserror::Error;

/// Media types accepted as embeddable raster images
pub const RASTER_IMAGE_TYPES: [&str; 4] =
    ["image/png", "image/jpeg", "image/jpg", "image/gif"];

/// Hard ceiling on one image record (header + payload)
pub const MAX_IMAGE_RECORD_SIZE: usize = 65505;

/// Length of the fixed image record header
pub const IMAGE_HEADER_SIZE: usize = 62;

/// Bounding box images are downsized into
const MAX_IMAGE_DIMENSION: u32 = 300;

/// Why a single image was left out of the export
#[derive(Debug, Error)]
pub enum ImageError {
    #[error("it could not be decoded: {0}")]
    Decode(#[from] image::ImageError),

    #[error("it could not be re-encoded: {0}")]
    Encode(#[from] png::EncodingError),

    #[error("its record size {0} exceeds the {MAX_IMAGE_RECORD_SIZE} byte limit")]
    TooLarge(usize),
}

/// One packed image record: fixed header plus indexed PNG payload
#[derive(Debug, Clone)]
pub struct ImageRecord {
    /// 62-byte fixed header
    pub header: Vec<u8>,

    /// Re-encoded image bytes
    pub payload: Vec<u8>,
}

impl ImageRecord {
    /// Total record length (header + payload)
    pub fn len(&self) -> usize {
        self.header.len() + self.payload.len()
    }

    /// Check if empty (never true for a built record)
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Pack every referenced raster image, in manifest order.
pub fn pack_images(
    manifest: &Manifest,
    image_hrefs: &HashMap<String, String>,
) -> Vec<ImageRecord> {
    let mut images = Vec::new();

    for item in manifest.items() {
        if !RASTER_IMAGE_TYPES.contains(&item.media_type.as_str()) {
            continue;
        }
        let Some(name) = image_hrefs.get(&item.href) else {
            continue;
        };

        match pack_image(name, &item.data) {
            Ok(record) => {
                log::debug!(
                    "Packed image {} ({} bytes)",
                    item.href,
                    record.len()
                );
                images.push(record);
            }
            Err(e) => {
                log::error!("Error: Could not include file {} because {}.", item.href, e);
            }
        }
    }

    images
}

fn pack_image(name: &str, data: &[u8]) -> Result<ImageRecord, ImageError> {
    let img = image::load_from_memory(data)?;
    let img = img.thumbnail(MAX_IMAGE_DIMENSION, MAX_IMAGE_DIMENSION);

    let payload = encode_indexed_png(&img)?;
    let header = image_header(name, img.width() as u16, img.height() as u16);

    let total = header.len() + payload.len();
    if total >= MAX_IMAGE_RECORD_SIZE {
        return Err(ImageError::TooLarge(total));
    }

    Ok(ImageRecord { header, payload })
}

/// Quantize to a 256-color palette and encode as 8-bit indexed PNG.
fn encode_indexed_png(img: &image::DynamicImage) -> Result<Vec<u8>, png::EncodingError> {
    let rgba = img.to_rgba8();
    let quant = NeuQuant::new(10, 256, rgba.as_raw());
    let indexed: Vec<u8> = rgba
        .pixels()
        .map(|p| quant.index_of(&p.0) as u8)
        .collect();

    let mut buf = Vec::new();
    let mut encoder = png::Encoder::new(&mut buf, img.width(), img.height());
    encoder.set_color(png::ColorType::Indexed);
    encoder.set_depth(png::BitDepth::Eight);
    encoder.set_palette(quant.color_map_rgb());
    let mut writer = encoder.write_header()?;
    writer.write_image_data(&indexed)?;
    writer.finish()?;

    Ok(buf)
}

/// Image record header layout:
///
/// ```text
/// 0-4   : "PNG ". There must be a space after PNG.
/// 4-36  : Image name, NUL padded to exactly 32 bytes.
/// 36-58 : Unknown.
/// 58-60 : Width (big-endian).
/// 60-62 : Height (big-endian).
/// ```
fn image_header(name: &str, width: u16, height: u16) -> Vec<u8> {
    let mut header = Vec::with_capacity(IMAGE_HEADER_SIZE);
    header.extend_from_slice(b"PNG ");

    let mut name_field = [0u8; 32];
    let name_bytes = name.as_bytes();
    let copy_len = name_bytes.len().min(32);
    name_field[..copy_len].copy_from_slice(&name_bytes[..copy_len]);
    header.extend_from_slice(&name_field);

    header.resize(58, 0);
    header.extend_from_slice(&width.to_be_bytes());
    header.extend_from_slice(&height.to_be_bytes());
    header.resize(IMAGE_HEADER_SIZE, 0);
    header
}
