use crate::objects::{Dictionary, Object};

/// A stream object: a dictionary followed by raw bytes.
///
/// `/Length` is kept in sync with the data by every constructor and by
/// [`Stream::set_data`], and is always the last dictionary entry so the
/// metadata the caller sets comes first.
#[derive(Debug, Clone, PartialEq)]
pub struct Stream {
    dictionary: Dictionary,
    data: Vec<u8>,
}

impl Stream {
    pub fn new(data: Vec<u8>) -> Self {
        Self::with_dictionary(Dictionary::new(), data)
    }

    pub fn with_dictionary(dictionary: Dictionary, data: Vec<u8>) -> Self {
        let mut stream = Self {
            dictionary,
            data: Vec::new(),
        };
        stream.set_data(data);
        stream
    }

    pub fn dictionary(&self) -> &Dictionary {
        &self.dictionary
    }

    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// Replaces the payload and updates `/Length`.
    pub fn set_data(&mut self, data: Vec<u8>) {
        self.data = data;
        self.dictionary.remove("Length");
        self.dictionary.set("Length", self.data.len());
    }

    /// Sets `/Filter`, keeping `/Length` last.
    pub fn set_filter(&mut self, filter: &str) {
        self.dictionary.remove("Length");
        self.dictionary.set("Filter", Object::name(filter));
        self.dictionary.set("Length", self.data.len());
    }

    pub fn filter(&self) -> Option<&str> {
        self.dictionary.get("Filter").and_then(Object::as_name)
    }
}
