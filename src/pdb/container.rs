//! Generic PalmDB container header and record directory
//!
//! Every PDB file starts with a 78-byte header, one 8-byte directory entry
//! per record, and a 2-byte gap before the first record's data. The
//! directory entries carry absolute byte offsets, so the full list of
//! record lengths must be known up front.

use anyhow::{Context, Result};
use std::io::Write;
use std::time::{SystemTime, UNIX_EPOCH};

/// Fixed header size preceding the record directory
const PDB_HEADER_SIZE: usize = 78;

/// Size of one record directory entry
const RECORD_ENTRY_SIZE: usize = 8;

/// Builds the PalmDB file header and record directory.
pub struct PdbHeaderBuilder {
    identity: [u8; 8],
    name: Vec<u8>,
    timestamp: u32,
}

impl PdbHeaderBuilder {
    /// `identity` is the 8-character type/creator pair; `name` the database
    /// display name, sanitized and truncated to 31 bytes.
    pub fn new(identity: &str, name: &str) -> Self {
        let mut ident = [0u8; 8];
        let bytes = identity.as_bytes();
        let len = bytes.len().min(8);
        ident[..len].copy_from_slice(&bytes[..len]);

        let timestamp = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_secs() as u32)
            .unwrap_or(0);

        Self {
            identity: ident,
            name: sanitize_name(name),
            timestamp,
        }
    }

    /// Fix the creation/modification timestamp, for deterministic output.
    pub fn with_timestamp(mut self, timestamp: u32) -> Self {
        self.timestamp = timestamp;
        self
    }

    /// Write the header plus one directory entry per record length, leaving
    /// the stream positioned at the first record's data.
    pub fn build_header<W: Write>(&self, lengths: &[usize], out: &mut W) -> Result<()> {
        let nrecords = lengths.len();

        let mut name_field = [0u8; 32];
        let len = self.name.len().min(31);
        name_field[..len].copy_from_slice(&self.name[..len]);
        out.write_all(&name_field)
            .context("Failed to write PDB name field")?;

        out.write_all(&0u16.to_be_bytes())?; // attributes
        out.write_all(&0u16.to_be_bytes())?; // version
        out.write_all(&self.timestamp.to_be_bytes())?; // creation date
        out.write_all(&self.timestamp.to_be_bytes())?; // modification date
        out.write_all(&0u32.to_be_bytes())?; // last backup date
        out.write_all(&0u32.to_be_bytes())?; // modification number
        out.write_all(&0u32.to_be_bytes())?; // app info offset
        out.write_all(&0u32.to_be_bytes())?; // sort info offset
        out.write_all(&self.identity)?; // type + creator
        out.write_all(&((2 * nrecords).saturating_sub(1) as u32).to_be_bytes())?; // unique id seed
        out.write_all(&0u32.to_be_bytes())?; // next record list
        out.write_all(&(nrecords as u16).to_be_bytes())?;

        let mut offset = PDB_HEADER_SIZE + RECORD_ENTRY_SIZE * nrecords + 2;
        for (i, &length) in lengths.iter().enumerate() {
            out.write_all(&(offset as u32).to_be_bytes())?;
            // attributes byte + 3-byte unique id
            let id = (2 * i) as u32;
            let id_bytes = id.to_be_bytes();
            out.write_all(&[0, id_bytes[1], id_bytes[2], id_bytes[3]])?;
            offset += length;
        }

        // Gap between the directory and the first record
        out.write_all(&[0, 0])?;
        Ok(())
    }
}

/// Restrict the display name to the PalmDB-safe alphabet.
fn sanitize_name(name: &str) -> Vec<u8> {
    name.chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == ' ' || c == '-' {
                c as u8
            } else {
                b'_'
            }
        })
        .collect()
}
