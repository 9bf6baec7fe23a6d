//! Text pagination and per-page zlib compression

use anyhow::{Context, Result};
use flate2::write::ZlibEncoder;
use flate2::Compression;
use std::io::Write;

/// Maximum uncompressed size of one text page.
///
/// This is an arbitrary number that is small enough to work. The actual
/// maximum record size is unknown.
pub const MAX_RECORD_SIZE: usize = 8192;

/// Compressed text pages plus the uncompressed length of each page's source
pub struct PagedText {
    /// zlib-compressed pages, in document order
    pub pages: Vec<Vec<u8>>,

    /// Uncompressed source length of each page, one entry per page
    pub sizes: Vec<u16>,
}

/// Split the markup stream into pages of at most [`MAX_RECORD_SIZE`] source
/// bytes and compress each page independently.
///
/// Pages split on the space character closest to the size limit when one is
/// in range; otherwise the page is cut at the limit (or takes the remaining
/// tail). A zero-length slice is coerced to one byte so the scan always
/// advances. Empty markup still produces a single page record.
pub fn paginate(pml: &[u8]) -> Result<PagedText> {
    let mut pages = Vec::new();
    let mut sizes = Vec::new();
    let mut index = 0usize;

    loop {
        let window_end = pml.len().min(index + MAX_RECORD_SIZE);
        let mut split = match pml[index..window_end].iter().rposition(|&b| b == b' ') {
            Some(pos) => pos,
            None => window_end - index,
        };
        if split == 0 && index < pml.len() {
            split = 1;
        }

        pages.push(compress(&pml[index..index + split])?);
        sizes.push(split as u16);

        index += split.max(1);
        if index >= pml.len() {
            break;
        }
    }

    Ok(PagedText { pages, sizes })
}

fn compress(data: &[u8]) -> Result<Vec<u8>> {
    let mut encoder = ZlibEncoder::new(Vec::new(), Compression::default());
    encoder
        .write_all(data)
        .context("Failed to compress text page")?;
    encoder
        .finish()
        .context("Failed to finish text page compression")
}

#[cfg(test)]
mod tests {
    use super::*;
    use flate2::read::ZlibDecoder;
    use std::io::Read;

    fn decompress(data: &[u8]) -> Vec<u8> {
        let mut out = Vec::new();
        ZlibDecoder::new(data).read_to_end(&mut out).unwrap();
        out
    }

    fn roundtrip(pml: &[u8]) -> PagedText {
        let paged = paginate(pml).unwrap();
        let mut rebuilt = Vec::new();
        for page in &paged.pages {
            rebuilt.extend_from_slice(&decompress(page));
        }
        assert_eq!(rebuilt, pml, "decompressed pages must rebuild the input");
        assert_eq!(paged.pages.len(), paged.sizes.len());
        paged
    }

    #[test]
    fn test_short_text_single_page() {
        let paged = roundtrip(b"hello world");
        assert_eq!(paged.pages.len(), 1);
        assert_eq!(paged.sizes, vec![11]);
    }

    #[test]
    fn test_empty_input_still_produces_one_page() {
        let paged = roundtrip(b"");
        assert_eq!(paged.pages.len(), 1);
        assert_eq!(paged.sizes, vec![0]);
    }

    #[test]
    fn test_split_at_rightmost_space() {
        // One space inside the first window; the page ends just before it.
        let mut pml = vec![b'a'; 8000];
        pml.push(b' ');
        pml.extend_from_slice(&[b'b'; 3000]);

        let paged = roundtrip(&pml);
        assert_eq!(paged.sizes[0], 8000);
    }

    #[test]
    fn test_hard_cut_without_spaces() {
        let pml = vec![b'a'; 9000];
        let paged = roundtrip(&pml);
        assert_eq!(paged.sizes[0] as usize, MAX_RECORD_SIZE);
        assert_eq!(paged.sizes[1], 808);
    }

    #[test]
    fn test_forced_advance_on_leading_space() {
        // The rightmost (only) space sits at the window start, which would
        // produce a zero-length slice; it must be coerced to one byte.
        let paged = roundtrip(b" abc");
        assert_eq!(paged.sizes[0], 1);
    }

    #[test]
    fn test_tail_shorter_than_limit() {
        let pml = vec![b'x'; 100];
        let paged = roundtrip(&pml);
        assert_eq!(paged.pages.len(), 1);
        assert_eq!(paged.sizes, vec![100]);
    }

    #[test]
    fn test_size_table_counts_match_pages() {
        let mut pml = Vec::new();
        for _ in 0..5 {
            pml.extend_from_slice(&[b'w'; 5000]);
            pml.push(b' ');
        }
        let paged = roundtrip(&pml);
        assert_eq!(paged.pages.len(), paged.sizes.len());
        assert!(paged.pages.len() > 1);
    }
}
