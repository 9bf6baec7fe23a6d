//! The 132-byte eReader header record
//!
//! Every offset field is a record index into the final record sequence, not
//! a byte offset. Record 0 is this header, so the first text page is
//! record 1.

/// Total size of the header record
pub const HEADER_RECORD_SIZE: usize = 132;

/// Compression field value. Specifies compression and drm.
/// 2 = palmdoc, 10 = zlib. 260 and 272 = DRM.
const COMPRESSION_ZLIB: u16 = 10;

/// Somehow represents the cp1252 encoding of the text.
const TEXT_ENCODING_MAGIC: u16 = 25152;

/// Magic value at bytes 34..36.
const HEADER_MAGIC: u16 = 2560;

/// Build the header record from the section counts.
///
/// Sections this encoder never produces (font page indexes, footnotes,
/// sidebars) get the last data offset as their "absent" sentinel, as do the
/// chapter and link offsets when their counts are zero.
pub fn header_record(
    text_count: u16,
    chapter_count: u16,
    link_count: u16,
    image_count: u16,
) -> Vec<u8> {
    let non_text_offset = text_count + 1;

    let mut chapter_offset = non_text_offset;
    let mut link_offset = chapter_offset + chapter_count;

    let (image_data_offset, meta_data_offset, last_data_offset);
    if image_count > 0 {
        image_data_offset = link_offset + link_count;
        meta_data_offset = image_data_offset + image_count;
        last_data_offset = meta_data_offset + 1;
    } else {
        meta_data_offset = link_offset + link_count;
        last_data_offset = meta_data_offset + 1;
        image_data_offset = last_data_offset;
    }

    if chapter_count == 0 {
        chapter_offset = last_data_offset;
    }
    if link_count == 0 {
        link_offset = last_data_offset;
    }

    let mut record = Vec::with_capacity(HEADER_RECORD_SIZE);
    let mut field = |value: u16| record.extend_from_slice(&value.to_be_bytes());

    field(COMPRESSION_ZLIB); //     [0:2]    Compression
    field(0); //                    [2:4]    Unknown
    field(0); //                    [4:6]    Unknown
    field(TEXT_ENCODING_MAGIC); //  [6:8]    Text encoding magic
    field(0); //                    [8:10]   Number of small font pages
    field(0); //                    [10:12]  Number of large font pages
    field(non_text_offset); //      [12:14]  Non-text record start
    field(chapter_count); //        [14:16]  Number of chapter index records
    field(0); //                    [16:18]  Number of small font page index records
    field(0); //                    [18:20]  Number of large font page index records
    field(image_count); //          [20:22]  Number of images
    field(link_count); //           [22:24]  Number of links
    field(1); //                    [24:26]  1 if has metadata, 0 if not
    field(0); //                    [26:28]  Unknown
    field(0); //                    [28:30]  Number of footnotes
    field(0); //                    [30:32]  Number of sidebars
    field(chapter_offset); //       [32:34]  Chapter index offset
    field(HEADER_MAGIC); //         [34:36]  Magic
    field(last_data_offset); //     [36:38]  Small font page offset
    field(last_data_offset); //     [38:40]  Large font page offset
    field(image_data_offset); //    [40:42]  Image offset
    field(link_offset); //          [42:44]  Links offset
    field(meta_data_offset); //     [44:46]  Metadata offset
    field(0); //                    [46:48]  Unknown
    field(last_data_offset); //     [48:50]  Footnote offset
    field(last_data_offset); //     [50:52]  Sidebar offset
    field(last_data_offset); //     [52:54]  Last data offset

    for _ in (54..HEADER_RECORD_SIZE).step_by(2) {
        field(0); //                [54:132] Zero filled
    }

    record
}
