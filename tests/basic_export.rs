use ereader_exporter::model::{Document, Manifest, ManifestItem, Metadata};
use ereader_exporter::pdb::{write_ereader_ext, IDENTITY};
use ereader_exporter::{ExportConfig, ExportPipeline};
use std::collections::HashMap;
use std::fs;
use tempfile::TempDir;

const PML: &[u8] = b"\\C0=\"Chapter One\" Some body text with a \\Q=\"anchor\" link \
and an image \\m=\"cover.png\" reference.";

fn write_cover_png(path: &std::path::Path) {
    let img = image::RgbImage::from_pixel(320, 200, image::Rgb([200, 100, 50]));
    image::DynamicImage::ImageRgb8(img)
        .save(path)
        .expect("Failed to write test image");
}

fn record_count(pdb: &[u8]) -> usize {
    u16::from_be_bytes([pdb[76], pdb[77]]) as usize
}

fn record_bounds(pdb: &[u8], index: usize) -> (usize, usize) {
    let n = record_count(pdb);
    let entry = |i: usize| {
        let base = 78 + i * 8;
        u32::from_be_bytes([pdb[base], pdb[base + 1], pdb[base + 2], pdb[base + 3]]) as usize
    };
    let start = entry(index);
    let end = if index + 1 < n { entry(index + 1) } else { pdb.len() };
    (start, end)
}

#[test]
fn test_export_writes_valid_pdb() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let markup_path = temp_dir.path().join("book.pml");
    let image_dir = temp_dir.path().join("images");
    let output_path = temp_dir.path().join("book.pdb");

    fs::write(&markup_path, PML).expect("Failed to write markup");
    fs::create_dir_all(&image_dir).expect("Failed to create image dir");
    write_cover_png(&image_dir.join("cover.png"));

    let config = ExportConfig::new(markup_path, output_path.clone())
        .with_image_dir(image_dir)
        .with_title("Test Book".to_string())
        .with_authors(vec!["An Author".to_string()]);

    ExportPipeline::new(config).export().expect("Export failed");

    let pdb = fs::read(&output_path).expect("Failed to read output");

    // PalmDB identity and display name
    assert_eq!(&pdb[60..68], IDENTITY.as_bytes());
    assert_eq!(&pdb[0..9], b"Test Book");

    // header + page + chapter + link + image + metadata + sizes + trailer
    assert_eq!(record_count(&pdb), 8);

    // eReader header record is exactly 132 bytes and reports one of each
    let (start, end) = record_bounds(&pdb, 0);
    let header = &pdb[start..end];
    assert_eq!(header.len(), 132);
    let field = |off: usize| u16::from_be_bytes([header[off], header[off + 1]]);
    assert_eq!(field(14), 1, "chapter count");
    assert_eq!(field(22), 1, "link count");
    assert_eq!(field(20), 1, "image count");

    // image record carries the tag, name and downsized dimensions
    let (start, end) = record_bounds(&pdb, 4);
    let image = &pdb[start..end];
    assert_eq!(&image[0..4], b"PNG ");
    assert_eq!(&image[4..13], b"cover.png");
    let width = u16::from_be_bytes([image[58], image[59]]);
    let height = u16::from_be_bytes([image[60], image[61]]);
    assert_eq!(width, 300);
    assert!((187..=188).contains(&height));

    // trailer record closes the file
    let (start, end) = record_bounds(&pdb, 7);
    assert_eq!(&pdb[start..end], b"MeTaInFo\x00");
}

#[test]
fn test_export_without_images_still_succeeds() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let markup_path = temp_dir.path().join("book.pml");
    let output_path = temp_dir.path().join("book.pdb");

    // references an image that is never provided
    fs::write(&markup_path, PML).expect("Failed to write markup");

    let config = ExportConfig::new(markup_path, output_path.clone());
    ExportPipeline::new(config).export().expect("Export failed");

    let pdb = fs::read(&output_path).expect("Failed to read output");
    // header + page + chapter + link + metadata + sizes + trailer
    assert_eq!(record_count(&pdb), 7);
}

#[test]
fn test_encode_is_idempotent() {
    let document = Document {
        markup: PML.to_vec(),
        manifest: Manifest::new(),
        image_hrefs: HashMap::new(),
        metadata: Some(Metadata {
            titles: vec!["Stable".to_string()],
            creators: vec!["Author".to_string()],
            rights: vec![],
            publishers: vec![],
        }),
    };

    let mut first = Vec::new();
    let mut second = Vec::new();
    write_ereader_ext(&document, &mut first, Some(42)).unwrap();
    write_ereader_ext(&document, &mut second, Some(42)).unwrap();
    assert_eq!(first, second);
}

#[test]
fn test_unreadable_markup_is_fatal() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let config = ExportConfig::new(
        temp_dir.path().join("missing.pml"),
        temp_dir.path().join("out.pdb"),
    );
    assert!(ExportPipeline::new(config).export().is_err());
}
