//! Main export pipeline orchestration

use super::config::ExportConfig;
use crate::model::{Document, Manifest, ManifestItem, Metadata};
use crate::pdb::write_ereader;
use anyhow::{Context, Result};
use regex::bytes::Regex;
use std::collections::HashMap;
use std::fs::File;
use std::io::BufWriter;

/// Main export pipeline
pub struct ExportPipeline {
    config: ExportConfig,
}

impl ExportPipeline {
    /// Create a new export pipeline
    pub fn new(config: ExportConfig) -> Self {
        Self { config }
    }

    /// Run the complete export process
    pub fn export(&self) -> Result<()> {
        log::info!("Starting eReader export");
        log::info!("Markup: {:?}", self.config.markup_path);
        log::info!("Target: {:?}", self.config.output_path);

        let markup = std::fs::read(&self.config.markup_path).with_context(|| {
            format!("Failed to read markup file: {:?}", self.config.markup_path)
        })?;

        let (order, image_hrefs) = referenced_images(&markup)?;
        log::info!("Markup references {} image(s)", order.len());

        let manifest = self.load_manifest(&order)?;

        let document = Document {
            markup,
            manifest,
            image_hrefs,
            metadata: self.metadata(),
        };

        let file = File::create(&self.config.output_path).with_context(|| {
            format!("Failed to create output file: {:?}", self.config.output_path)
        })?;
        let mut out = BufWriter::new(file);
        write_ereader(&document, &mut out)?;

        log::info!("Export complete: {:?}", self.config.output_path);
        Ok(())
    }

    /// Load every referenced image from the image directory, in reference
    /// order. A missing or unreadable image file is logged and skipped.
    fn load_manifest(&self, order: &[String]) -> Result<Manifest> {
        let mut manifest = Manifest::new();

        let Some(dir) = &self.config.image_dir else {
            if !order.is_empty() {
                log::warn!("Markup references images but no image directory was given");
            }
            return Ok(manifest);
        };

        for href in order {
            let path = dir.join(href);
            match std::fs::read(&path) {
                Ok(data) => {
                    manifest.add_item(ManifestItem {
                        href: href.clone(),
                        media_type: media_type_for(href),
                        data,
                    });
                }
                Err(e) => {
                    log::error!("Error: Could not include file {} because {}.", href, e);
                }
            }
        }

        log::info!("Loaded {} image(s) into the manifest", manifest.len());
        Ok(manifest)
    }

    fn metadata(&self) -> Option<Metadata> {
        if self.config.title.is_none()
            && self.config.authors.is_empty()
            && self.config.rights.is_none()
            && self.config.publisher.is_none()
        {
            return None;
        }

        Some(Metadata {
            titles: self.config.title.iter().cloned().collect(),
            creators: self.config.authors.clone(),
            rights: self.config.rights.iter().cloned().collect(),
            publishers: self.config.publisher.iter().cloned().collect(),
        })
    }
}

/// Scan the markup for `\m="name"` image references.
///
/// Returns the referenced names in first-reference order (manifest order
/// must be deterministic) plus the href -> record name mapping the encoder
/// expects.
fn referenced_images(markup: &[u8]) -> Result<(Vec<String>, HashMap<String, String>)> {
    let re = Regex::new(r#"(?s-u)\\m="(?P<src>.+?)""#)
        .context("Invalid image reference pattern")?;

    let mut order = Vec::new();
    let mut hrefs = HashMap::new();

    for caps in re.captures_iter(markup) {
        let Some(src) = caps.name("src") else { continue };
        let href = String::from_utf8_lossy(src.as_bytes()).into_owned();
        if !hrefs.contains_key(&href) {
            order.push(href.clone());
            hrefs.insert(href.clone(), href);
        }
    }

    Ok((order, hrefs))
}

/// Media type from the file extension; unknown extensions fall through to
/// a type the image packer will reject.
fn media_type_for(href: &str) -> String {
    let ext = href.rsplit('.').next().unwrap_or("").to_ascii_lowercase();
    match ext.as_str() {
        "png" => "image/png",
        "jpg" | "jpeg" => "image/jpeg",
        "gif" => "image/gif",
        _ => "application/octet-stream",
    }
    .to_string()
}
