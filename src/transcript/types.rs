//! Transcript record types

use std::fmt;
use std::str::FromStr;

use serde::Serialize;

/// Letter grade as printed on the transcript.
///
/// The token set is closed; anything else on a transcript line means the
/// line is not a course row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Grade {
    #[serde(rename = "A+")]
    APlus,
    #[serde(rename = "A")]
    A,
    #[serde(rename = "B")]
    B,
    #[serde(rename = "C")]
    C,
    #[serde(rename = "C-")]
    CMinus,
    #[serde(rename = "F")]
    F,
    #[serde(rename = "W")]
    W,
    #[serde(rename = "P")]
    P,
    #[serde(rename = "NP")]
    NP,
}

impl Grade {
    /// Every grade, in the order the line pattern tries them.
    ///
    /// Longer tokens come before their prefixes (`A+` before `A`,
    /// `C-` before `C`) so a match is never truncated.
    pub const MATCH_ORDER: [Grade; 9] = [
        Grade::APlus,
        Grade::A,
        Grade::B,
        Grade::CMinus,
        Grade::C,
        Grade::F,
        Grade::W,
        Grade::P,
        Grade::NP,
    ];

    /// The token as it appears in transcript text
    pub fn as_str(&self) -> &'static str {
        match self {
            Grade::APlus => "A+",
            Grade::A => "A",
            Grade::B => "B",
            Grade::C => "C",
            Grade::CMinus => "C-",
            Grade::F => "F",
            Grade::W => "W",
            Grade::P => "P",
            Grade::NP => "NP",
        }
    }
}

impl fmt::Display for Grade {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Grade {
    type Err = UnknownToken;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Grade::MATCH_ORDER
            .into_iter()
            .find(|grade| grade.as_str() == s)
            .ok_or_else(|| UnknownToken(s.to_string()))
    }
}

/// Academic term. Transcripts label these with `春` (spring) and `秋` (autumn).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Semester {
    #[serde(rename = "春")]
    Spring,
    #[serde(rename = "秋")]
    Autumn,
}

impl Semester {
    pub fn as_str(&self) -> &'static str {
        match self {
            Semester::Spring => "春",
            Semester::Autumn => "秋",
        }
    }
}

impl FromStr for Semester {
    type Err = UnknownToken;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "春" => Ok(Semester::Spring),
            "秋" => Ok(Semester::Autumn),
            other => Err(UnknownToken(other.to_string())),
        }
    }
}

/// A token that is not part of the grade or semester vocabulary
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown token: {0}")]
pub struct UnknownToken(pub String);

/// One course row of a transcript
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CourseRecord {
    /// Course title, trimmed, never empty
    pub lecture_name: String,
    /// Credit value (may be fractional, e.g. 1.5)
    pub credits: f64,
    pub grade: Grade,
    /// Four-digit academic year
    pub year: u16,
    pub semester: Semester,
    /// Instructor name, trimmed; empty when the transcript leaves it blank
    pub professor: String,
}

/// Line accounting for a parsed transcript
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ParseSummary {
    /// Lines seen, including blank ones
    pub total_lines: usize,
    /// Lines that produced a record
    pub matched: usize,
}

impl ParseSummary {
    /// Lines that did not produce a record
    pub fn skipped(&self) -> usize {
        self.total_lines.saturating_sub(self.matched)
    }
}
