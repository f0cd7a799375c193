//! Transcript parsing
//!
//! Turns extracted transcript text into [`CourseRecord`]s.

mod parser;
mod types;

pub use parser::{parse_line, parse_lines, parse_text, parse_text_with_summary};
pub use types::{CourseRecord, Grade, ParseSummary, Semester, UnknownToken};
