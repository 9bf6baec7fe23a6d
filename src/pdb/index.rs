//! Chapter and link index extraction
//!
//! Scans the original markup stream for structural and anchor markers and
//! emits (offset, label) index records. Offsets always point into the
//! unmodified stream, independent of how it is later paginated.

use anyhow::{Context, Result};
use regex::bytes::{NoExpand, Regex};

/// The two kinds of index records the format defines
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IndexKind {
    /// Structural entries from chapter heading markers
    Chapter,
    /// Entries from link anchor markers
    Link,
}

impl IndexKind {
    /// Marker patterns scanned for this kind, applied in order.
    ///
    /// Chapter entries combine three independent scans (quoted/leveled
    /// `\Cn="..."`, paired/leveled `\Xn...\Xn`, paired/plain `\x...\x`);
    /// their results are concatenated in scan order, never re-sorted by
    /// offset, to match the reference output.
    fn patterns(self) -> &'static [&'static str] {
        match self {
            IndexKind::Chapter => &[
                r#"(?s-u)\\C(?P<val>[0-4])="(?P<text>.+?)""#,
                r#"(?s-u)\\X(?P<val>[0-4])(?P<text>.+?)\\X[0-4]"#,
                r#"(?s-u)\\x(?P<text>.+?)\\x"#,
            ],
            IndexKind::Link => &[r#"(?s-u)\\Q="(?P<text>.+?)""#],
        }
    }
}

/// Build all index records of one kind.
///
/// Each record is a 4-byte big-endian match-start offset into `pml`,
/// followed by the tag-stripped label and a NUL terminator. Entries keep
/// left-to-right match order within each scan.
pub fn build_index(kind: IndexKind, pml: &[u8]) -> Result<Vec<Vec<u8>>> {
    let mut index = Vec::new();
    for pattern in kind.patterns() {
        scan(pattern, pml, &mut index)?;
    }
    Ok(index)
}

fn scan(pattern: &str, pml: &[u8], index: &mut Vec<Vec<u8>>) -> Result<()> {
    let re = Regex::new(pattern).context("Invalid index marker pattern")?;

    for caps in re.captures_iter(pml) {
        let Some(whole) = caps.get(0) else { continue };
        let Some(text) = caps.name("text") else { continue };

        let mut label = strip_escapes(text.as_bytes())?;

        // Heading level is denoted by leading spaces, four per level.
        if let Some(val) = caps.name("val") {
            let level = (val.as_bytes()[0] - b'0') as usize;
            let mut indented = vec![b' '; 4 * level];
            indented.extend_from_slice(&label);
            label = indented;
        }

        let mut entry = Vec::with_capacity(4 + label.len() + 1);
        entry.extend_from_slice(&(whole.start() as u32).to_be_bytes());
        entry.extend_from_slice(&label);
        entry.push(0);
        index.push(entry);
    }

    Ok(())
}

/// Strip all PML escape sequences from a captured label: multi-byte unicode
/// escapes first, then numeric-argument escapes, then any two-byte escape.
fn strip_escapes(text: &[u8]) -> Result<Vec<u8>> {
    let unicode = Regex::new(r"(?-u)\\U[0-9a-z]{4}").context("Invalid escape pattern")?;
    let numeric = Regex::new(r"(?-u)\\a[0-9]{3}").context("Invalid escape pattern")?;
    let generic = Regex::new(r"(?-u)\\.").context("Invalid escape pattern")?;

    let text = unicode.replace_all(text, NoExpand(b""));
    let text = numeric.replace_all(&text, NoExpand(b""));
    let text = generic.replace_all(&text, NoExpand(b""));
    Ok(text.into_owned())
}
