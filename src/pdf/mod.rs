//! PDF handling
//!
//! Text extraction only; layout analysis is out of scope.

mod extractor;

pub use extractor::{ExtractionError, MupdfExtractor, TextExtractor};
