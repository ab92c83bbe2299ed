//! Cross-reference ledger
//!
//! Objects are serialized in whatever order the page lifecycle dictates, so
//! the ledger records `{id, offset}` pairs as they happen and only sorts them
//! when the table is rendered.

use crate::error::{PdfError, Result};
use crate::objects::ObjectId;
use std::fmt::Write;

/// Offset of one object's `N 0 obj` line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CrossRefEntry {
    pub id: ObjectId,
    pub offset: u64,
}

#[derive(Debug, Clone, Default)]
pub struct CrossRefTable {
    entries: Vec<CrossRefEntry>,
}

impl CrossRefTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, id: ObjectId, offset: u64) {
        self.entries.push(CrossRefEntry { id, offset });
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries in the order they were recorded.
    pub fn entries(&self) -> &[CrossRefEntry] {
        &self.entries
    }

    /// Entries sorted ascending by object number.
    pub fn sorted(&self) -> Vec<CrossRefEntry> {
        let mut sorted = self.entries.clone();
        sorted.sort_by_key(|entry| entry.id);
        sorted
    }

    pub fn max_object_number(&self) -> u32 {
        self.entries
            .iter()
            .map(|entry| entry.id.number())
            .max()
            .unwrap_or(0)
    }

    /// Value of the trailer's `/Size` entry.
    pub fn size(&self) -> u32 {
        self.max_object_number() + 1
    }

    /// Checks that objects `1..=allocated` were each written exactly once.
    pub fn validate(&self, allocated: u32) -> Result<()> {
        let sorted = self.sorted();
        let mut expected = 1;
        for entry in &sorted {
            let number = entry.id.number();
            if number < expected {
                return Err(PdfError::InvalidStructure(format!(
                    "object {number} written more than once"
                )));
            }
            if number > expected {
                return Err(PdfError::InvalidStructure(format!(
                    "object {expected} was reserved but never written"
                )));
            }
            expected += 1;
        }
        if expected <= allocated {
            return Err(PdfError::InvalidStructure(format!(
                "object {expected} was reserved but never written"
            )));
        }
        if expected > allocated + 1 {
            return Err(PdfError::InvalidStructure(format!(
                "object {} was written without being reserved",
                expected - 1
            )));
        }
        Ok(())
    }

    /// Renders the `xref` section, keyword line included.
    ///
    /// Every entry line is exactly 20 bytes. Entry 0 is the mandatory free
    /// head; numbers missing from the ledger are rendered as free entries.
    pub fn render(&self) -> String {
        let sorted = self.sorted();
        let size = self.size();

        let mut out = String::with_capacity(32 + size as usize * 20);
        out.push_str("xref\r\n");
        let _ = write!(out, "0 {size}\r\n");
        out.push_str("0000000000 65535 f\r\n");

        let mut entries = sorted.iter().peekable();
        for number in 1..size {
            match entries.peek() {
                Some(entry) if entry.id.number() == number => {
                    let _ = write!(
                        out,
                        "{:010} {:05} n\r\n",
                        entry.offset,
                        entry.id.generation()
                    );
                    entries.next();
                }
                _ => out.push_str("0000000000 00000 f\r\n"),
            }
        }
        out
    }
}
