mod dictionary;
mod primitive;
mod stream;

pub use dictionary::Dictionary;
pub use primitive::{escape_literal, format_real, Object, ObjectId};
pub use stream::Stream;
