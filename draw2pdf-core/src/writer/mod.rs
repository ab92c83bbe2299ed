//! Offset-tracking PDF serializer
//!
//! [`PdfWriter`] only ever appends. Every object write records the offset of
//! its `N 0 obj` line in a [`CrossRefTable`], which is rendered once at the
//! end of the file.

mod allocator;
mod config;
mod xref;

pub use allocator::ObjectAllocator;
pub use config::{CompressionFailurePolicy, FixedIdSource, IdSource, RandomIdSource, WriterConfig};
pub use xref::{CrossRefEntry, CrossRefTable};

use crate::error::Result;
use crate::objects::{escape_literal, format_real, Dictionary, Object, ObjectId};
use chrono::{DateTime, Utc};
use std::io::Write;

/// Binary marker comment that tells transfer tools the file is not text.
const BINARY_MARKER: &[u8] = b"%\xC0\xE1\xD2\xC3\xB4\r\n";

pub struct PdfWriter<W: Write> {
    writer: W,
    xref: CrossRefTable,
    current_position: u64,
}

impl<W: Write> PdfWriter<W> {
    pub fn new(writer: W) -> Self {
        Self {
            writer,
            xref: CrossRefTable::new(),
            current_position: 0,
        }
    }

    /// Number of bytes written so far.
    pub fn position(&self) -> u64 {
        self.current_position
    }

    pub fn xref(&self) -> &CrossRefTable {
        &self.xref
    }

    pub fn write_header(&mut self, version: &str, generator: &str) -> Result<()> {
        self.write_bytes(format!("%PDF-{version}\r\n").as_bytes())?;
        self.write_bytes(BINARY_MARKER)?;
        self.write_bytes(format!("%PDF file generated by {generator}\r\n").as_bytes())?;
        Ok(())
    }

    /// Writes one indirect object and records its offset.
    pub fn write_object(&mut self, id: ObjectId, object: &Object) -> Result<()> {
        self.write_bytes(b"\r\n")?;
        self.xref.record(id, self.current_position);
        tracing::trace!(object = id.number(), offset = self.current_position, "writing object");

        let header = format!("{} {} obj\r\n", id.number(), id.generation());
        self.write_bytes(header.as_bytes())?;
        self.write_object_value(object)?;
        self.write_bytes(b"\r\nendobj\r\n")?;
        Ok(())
    }

    fn write_object_value(&mut self, object: &Object) -> Result<()> {
        match object {
            Object::Integer(i) => self.write_bytes(i.to_string().as_bytes())?,
            Object::Real(f) => self.write_bytes(format_real(*f).as_bytes())?,
            Object::String(s) => {
                self.write_bytes(b"(")?;
                self.write_bytes(&escape_literal(s))?;
                self.write_bytes(b")")?;
            }
            Object::HexString(s) => {
                self.write_bytes(b"<")?;
                self.write_bytes(hex::encode_upper(s).as_bytes())?;
                self.write_bytes(b">")?;
            }
            Object::Name(n) => {
                self.write_bytes(b"/")?;
                self.write_bytes(n.as_bytes())?;
            }
            Object::Array(arr) => {
                self.write_bytes(b"[")?;
                for (i, obj) in arr.iter().enumerate() {
                    if i > 0 {
                        self.write_bytes(b" ")?;
                    }
                    self.write_object_value(obj)?;
                }
                self.write_bytes(b"]")?;
            }
            Object::Dictionary(dict) => self.write_dictionary(dict)?,
            Object::Stream(stream) => {
                self.write_dictionary(stream.dictionary())?;
                self.write_bytes(b"\r\nstream\r\n")?;
                self.write_bytes(stream.data())?;
                self.write_bytes(b"\r\nendstream")?;
            }
            Object::Reference(id) => self.write_bytes(id.to_string().as_bytes())?,
        }
        Ok(())
    }

    fn write_dictionary(&mut self, dict: &Dictionary) -> Result<()> {
        self.write_bytes(b"<<")?;
        for (key, value) in dict.entries() {
            self.write_bytes(b"\r\n/")?;
            self.write_bytes(key.as_bytes())?;
            self.write_bytes(b" ")?;
            self.write_object_value(value)?;
        }
        self.write_bytes(b"\r\n>>")?;
        Ok(())
    }

    /// Writes the cross-reference table, trailer and footer.
    ///
    /// Returns the offset of the `xref` keyword.
    pub fn write_xref_and_trailer(
        &mut self,
        root: ObjectId,
        info: Option<ObjectId>,
        document_id: [u8; 16],
    ) -> Result<u64> {
        let xref_position = self.current_position;
        let table = self.xref.render();
        self.write_bytes(table.as_bytes())?;

        let mut trailer = Dictionary::new();
        trailer.set("Size", self.xref.size());
        trailer.set("Root", root);
        if let Some(info) = info {
            trailer.set("Info", info);
        }
        let id = Object::HexString(document_id.to_vec());
        trailer.set("ID", Object::Array(vec![id.clone(), id]));

        self.write_bytes(b"trailer\r\n")?;
        self.write_dictionary(&trailer)?;
        self.write_bytes(b"\r\nstartxref\r\n")?;
        self.write_bytes(xref_position.to_string().as_bytes())?;
        self.write_bytes(b"\r\n%%EOF\r\n")?;
        self.writer.flush()?;

        Ok(xref_position)
    }

    pub fn flush(&mut self) -> Result<()> {
        self.writer.flush()?;
        Ok(())
    }

    pub fn into_inner(self) -> W {
        self.writer
    }

    fn write_bytes(&mut self, data: &[u8]) -> Result<()> {
        self.writer.write_all(data)?;
        self.current_position += data.len() as u64;
        Ok(())
    }
}

/// Formats a date as a PDF date string (`D:YYYYMMDDHHmmSS+00'00`).
pub fn format_pdf_date(date: DateTime<Utc>) -> String {
    let formatted = date.format("D:%Y%m%d%H%M%S");
    format!("{formatted}+00'00")
}
