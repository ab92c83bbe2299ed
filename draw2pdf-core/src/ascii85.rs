//! ASCII base-85 encoding for PDF streams
//!
//! The encoder produces the text accepted by the `ASCII85Decode` filter:
//! four input bytes become five printable characters in the range `!`..=`u`,
//! a full group of four zero bytes becomes the single character `z`, output
//! lines are broken with CRLF after [`LINE_WIDTH`] characters, and the data is
//! terminated by `~>` followed by CRLF.

use crate::error::{PdfError, Result};

/// Maximum number of printable characters per output line.
pub const LINE_WIDTH: usize = 72;

const OFFSET: u8 = b'!';
const ZERO_GROUP: u8 = b'z';
const TERMINATOR: &[u8] = b"~>";
const EOL: &[u8] = b"\r\n";

struct Encoder {
    output: Vec<u8>,
    column: usize,
}

impl Encoder {
    fn with_capacity(input_len: usize) -> Self {
        let chars = input_len.div_ceil(4) * 5;
        Self {
            output: Vec::with_capacity(chars + (chars / LINE_WIDTH + 2) * EOL.len()),
            column: 0,
        }
    }

    fn push(&mut self, c: u8) {
        self.output.push(c);
        self.column += 1;
        if self.column >= LINE_WIDTH {
            self.output.extend_from_slice(EOL);
            self.column = 0;
        }
    }

    /// Emits `count + 1` digits for a group carrying `count` input bytes.
    fn push_group(&mut self, tuple: u32, count: usize) {
        let mut digits = [0u8; 5];
        let mut value = tuple;
        for digit in digits.iter_mut().rev() {
            *digit = (value % 85) as u8;
            value /= 85;
        }
        for &digit in &digits[..=count] {
            self.push(digit + OFFSET);
        }
    }

    fn finish(mut self) -> Vec<u8> {
        if self.column + TERMINATOR.len() > LINE_WIDTH {
            self.output.extend_from_slice(EOL);
        }
        self.output.extend_from_slice(TERMINATOR);
        self.output.extend_from_slice(EOL);
        self.output
    }
}

/// Encodes `data` into ASCII85 text, terminator included.
///
/// Empty input yields only `~>\r\n`.
pub fn encode(data: &[u8]) -> Vec<u8> {
    let mut encoder = Encoder::with_capacity(data.len());

    let mut groups = data.chunks_exact(4);
    for group in &mut groups {
        let tuple = u32::from_be_bytes([group[0], group[1], group[2], group[3]]);
        if tuple == 0 {
            encoder.push(ZERO_GROUP);
        } else {
            encoder.push_group(tuple, 4);
        }
    }

    // A trailing partial group is zero padded and never uses the `z` shortcut.
    let rest = groups.remainder();
    if !rest.is_empty() {
        let mut padded = [0u8; 4];
        padded[..rest.len()].copy_from_slice(rest);
        encoder.push_group(u32::from_be_bytes(padded), rest.len());
    }

    encoder.finish()
}

/// Decodes ASCII85 text back into bytes.
///
/// Accepts an optional `<~` prefix, embedded whitespace, the `z` shortcut and
/// a partial final group. Decoding stops at the `~>` terminator.
pub fn decode(data: &[u8]) -> Result<Vec<u8>> {
    let mut result = Vec::with_capacity(data.len() / 5 * 4);
    let mut chars = data.iter().copied().filter(|b| !b.is_ascii_whitespace()).peekable();
    let mut group = Vec::with_capacity(5);

    if chars.peek() == Some(&b'<') {
        chars.next();
        if chars.next() != Some(b'~') {
            return Err(PdfError::EncodingError(
                "Invalid ASCII85 start marker".to_string(),
            ));
        }
    }

    while let Some(c) = chars.next() {
        match c {
            b'~' => {
                if chars.next() == Some(b'>') {
                    break;
                }
                return Err(PdfError::EncodingError(
                    "Invalid ASCII85 end marker".to_string(),
                ));
            }
            ZERO_GROUP if group.is_empty() => result.extend_from_slice(&[0, 0, 0, 0]),
            b'!'..=b'u' => {
                group.push(c);
                if group.len() == 5 {
                    result.extend_from_slice(&decode_group(&group)?);
                    group.clear();
                }
            }
            _ => {
                return Err(PdfError::EncodingError(format!(
                    "Invalid ASCII85 character: {:?}",
                    c as char
                )));
            }
        }
    }

    if !group.is_empty() {
        if group.len() == 1 {
            return Err(PdfError::EncodingError(
                "Truncated ASCII85 group".to_string(),
            ));
        }
        let significant = group.len() - 1;
        group.resize(5, b'u');
        let bytes = decode_group(&group)?;
        result.extend_from_slice(&bytes[..significant]);
    }

    Ok(result)
}

fn decode_group(group: &[u8]) -> Result<[u8; 4]> {
    let value = group
        .iter()
        .fold(0u64, |acc, &c| acc * 85 + u64::from(c - OFFSET));
    let value = u32::try_from(value)
        .map_err(|_| PdfError::EncodingError("ASCII85 group out of range".to_string()))?;
    Ok(value.to_be_bytes())
}
