//! Delimited-text manifest decoding.

mod reader;

pub use reader::{PolarsCsvDecoder, check_encoding};
