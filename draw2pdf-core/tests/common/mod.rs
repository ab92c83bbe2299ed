//! Structural checks shared by the integration tests.
//!
//! The checker only understands what this crate writes: a single
//! cross-reference section with fixed-width entries, followed by a
//! dictionary trailer.

#![allow(dead_code)]

use draw2pdf::{FixedIdSource, WriterConfig};
use std::sync::Arc;

pub const TEST_ID: [u8; 16] = [
    0x00, 0x11, 0x22, 0x33, 0x44, 0x55, 0x66, 0x77, 0x88, 0x99, 0xAA, 0xBB, 0xCC, 0xDD, 0xEE, 0xFF,
];

pub fn test_config() -> WriterConfig {
    WriterConfig::default().with_id_source(Arc::new(FixedIdSource(TEST_ID)))
}

#[derive(Debug)]
pub struct XrefEntry {
    pub offset: u64,
    pub in_use: bool,
}

#[derive(Debug)]
pub struct ParsedFile {
    pub xref_offset: usize,
    /// Entry 0 included.
    pub entries: Vec<XrefEntry>,
    pub trailer: String,
}

pub fn find(haystack: &[u8], needle: &[u8]) -> Option<usize> {
    haystack
        .windows(needle.len())
        .position(|window| window == needle)
}

pub fn rfind(haystack: &[u8], needle: &[u8]) -> Option<usize> {
    haystack
        .windows(needle.len())
        .rposition(|window| window == needle)
}

pub fn count(haystack: &[u8], needle: &[u8]) -> usize {
    haystack
        .windows(needle.len())
        .filter(|window| *window == needle)
        .count()
}

/// Parses the tail of the file and checks every in-use offset against the
/// object it should point at.
pub fn check_structure(bytes: &[u8]) -> ParsedFile {
    assert!(bytes.starts_with(b"%PDF-"), "missing header");
    assert!(bytes.ends_with(b"%%EOF\r\n"), "missing footer");

    let startxref = rfind(bytes, b"startxref\r\n").expect("no startxref");
    let tail = std::str::from_utf8(&bytes[startxref + 11..]).expect("tail is not ASCII");
    let xref_offset: usize = tail
        .lines()
        .next()
        .expect("no xref offset")
        .trim()
        .parse()
        .expect("xref offset is not a number");

    assert!(
        bytes[xref_offset..].starts_with(b"xref\r\n"),
        "startxref does not point at the xref keyword"
    );

    let section = &bytes[xref_offset + 6..];
    let header_end = find(section, b"\r\n").expect("no subsection header");
    let header = std::str::from_utf8(&section[..header_end]).expect("bad header");
    let mut parts = header.split(' ');
    assert_eq!(parts.next(), Some("0"));
    let size: usize = parts.next().expect("no size").parse().expect("bad size");

    let mut entries = Vec::with_capacity(size);
    let mut cursor = header_end + 2;
    for number in 0..size {
        let line = &section[cursor..cursor + 20];
        assert!(line.ends_with(b"\r\n"), "entry {number} is not 20 bytes");
        let line = std::str::from_utf8(line).expect("bad entry");
        let offset: u64 = line[0..10].parse().expect("bad offset");
        let in_use = &line[17..18] == "n";
        entries.push(XrefEntry { offset, in_use });
        cursor += 20;
    }

    let entry_zero = &entries[0];
    assert!(!entry_zero.in_use && entry_zero.offset == 0);

    for (number, entry) in entries.iter().enumerate().skip(1) {
        assert!(entry.in_use, "object {number} missing from xref");
        let expected = format!("{number} 0 obj\r\n");
        let offset = entry.offset as usize;
        assert!(
            bytes[offset..].starts_with(expected.as_bytes()),
            "xref entry {number} points at {:?}",
            String::from_utf8_lossy(&bytes[offset..(offset + 16).min(bytes.len())])
        );
        assert_eq!(
            count(bytes, format!("\r\n{expected}").as_bytes()),
            1,
            "object {number} written more than once"
        );
    }

    let trailer_start = xref_offset + 6 + cursor;
    assert!(bytes[trailer_start..].starts_with(b"trailer\r\n"));
    let trailer = String::from_utf8_lossy(&bytes[trailer_start..startxref]).into_owned();
    assert!(trailer.contains(&format!("/Size {size}\r\n")));
    assert!(trailer.contains("/Root 1 0 R\r\n"));

    ParsedFile {
        xref_offset,
        entries,
        trailer,
    }
}

/// The body of object `number`, between `N 0 obj\r\n` and `\r\nendobj`.
pub fn object_body(bytes: &[u8], number: usize) -> Vec<u8> {
    let header = format!("\r\n{number} 0 obj\r\n");
    let start = find(bytes, header.as_bytes()).expect("object not found") + header.len();
    let end = start + find(&bytes[start..], b"\r\nendobj\r\n").expect("object not terminated");
    bytes[start..end].to_vec()
}

pub fn object_text(bytes: &[u8], number: usize) -> String {
    String::from_utf8_lossy(&object_body(bytes, number)).into_owned()
}

/// The data between `stream\r\n` and `\r\nendstream` of object `number`.
pub fn stream_data(bytes: &[u8], number: usize) -> Vec<u8> {
    let body = object_body(bytes, number);
    let start = find(&body, b">>\r\nstream\r\n").expect("not a stream") + 12;
    let end = rfind(&body, b"\r\nendstream").expect("stream not terminated");
    body[start..end].to_vec()
}
