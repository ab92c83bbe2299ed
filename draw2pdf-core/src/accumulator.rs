//! Append-only byte buffer backing content streams and image payloads

use std::fmt;

/// Growable buffer that collects stream data until it is written out.
///
/// All appends are concatenated verbatim, in call order, with no implicit
/// separators.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StreamAccumulator {
    data: Vec<u8>,
}

impl StreamAccumulator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            data: Vec::with_capacity(capacity),
        }
    }

    pub fn append_bytes(&mut self, bytes: &[u8]) {
        self.data.extend_from_slice(bytes);
    }

    pub fn append_text(&mut self, text: &str) {
        self.data.extend_from_slice(text.as_bytes());
    }

    /// Appends formatted text and returns the number of bytes appended.
    ///
    /// ```rust
    /// use draw2pdf::StreamAccumulator;
    ///
    /// let mut acc = StreamAccumulator::new();
    /// let n = acc.append_fmt(format_args!("{} {} m\r\n", 10, 20));
    /// assert_eq!(n, 9);
    /// assert_eq!(acc.data(), b"10 20 m\r\n");
    /// ```
    pub fn append_fmt(&mut self, args: fmt::Arguments<'_>) -> usize {
        let before = self.data.len();
        // Writing into the Vec cannot fail; an error here can only come from
        // a Display impl, and whatever it produced so far is kept.
        let _ = fmt::Write::write_fmt(self, args);
        self.data.len() - before
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// Discards any accumulated data, keeping the allocation.
    pub fn clear(&mut self) {
        self.data.clear();
    }

    pub fn into_inner(self) -> Vec<u8> {
        self.data
    }
}

impl fmt::Write for StreamAccumulator {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        self.data.extend_from_slice(s.as_bytes());
        Ok(())
    }
}

impl From<Vec<u8>> for StreamAccumulator {
    fn from(data: Vec<u8>) -> Self {
        Self { data }
    }
}
