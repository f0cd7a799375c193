//! Transcript line parser
//!
//! Maps one line of extracted transcript text to a [`CourseRecord`].
//!
//! Grammar (one line, surrounding whitespace ignored):
//! ```text
//! line      = lecture WS+ credits WS+ grade WS* year WS* semester professor
//! lecture   = any characters, shortest possible
//! credits   = DIGIT+ ["." DIGIT+]
//! grade     = "A+" | "A" | "B" | "C-" | "C" | "F" | "W" | "P" | "NP"
//! year      = 4 DIGIT
//! semester  = "春" | "秋"
//! professor = rest of the line, may be empty
//! ```
//!
//! Lines that do not match end to end are skipped, never reported.

use std::sync::LazyLock;

use regex::{Captures, Regex};

use super::types::{CourseRecord, Grade, ParseSummary, Semester};

/// Whitespace between fields; a stray byte-order mark counts as whitespace
const WS: &str = r"[\s\x{FEFF}]";

/// Any character that does not end a line
const LINE_CHAR: &str = r"[^\n\r\x{2028}\x{2029}]";

static LINE_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&line_pattern()).expect("transcript line pattern must compile")
});

/// Build the anchored line pattern.
///
/// The grade alternation follows [`Grade::MATCH_ORDER`]; alternation is
/// leftmost-first, so `A+` and `C-` must precede `A` and `C`.
fn line_pattern() -> String {
    let grades = Grade::MATCH_ORDER
        .iter()
        .map(|g| regex::escape(g.as_str()))
        .collect::<Vec<_>>()
        .join("|");
    let semesters = [Semester::Spring, Semester::Autumn]
        .iter()
        .map(|s| regex::escape(s.as_str()))
        .collect::<Vec<_>>()
        .join("|");

    format!(
        r"^{ws}*(?P<lecture>{ch}*?){ws}+(?P<credits>[0-9]+(?:\.[0-9]+)?){ws}+(?P<grade>{grades}){ws}*(?P<year>[0-9]{{4}}){ws}*(?P<semester>{semesters})(?P<professor>{ch}*){ws}*$",
        ws = WS,
        ch = LINE_CHAR,
    )
}

/// Parse a single transcript line.
///
/// Returns `None` for anything that is not a complete course row: headers,
/// blank lines, page furniture, rows with a missing field.
pub fn parse_line(line: &str) -> Option<CourseRecord> {
    let caps = LINE_PATTERN.captures(line)?;
    record_from_captures(&caps)
}

fn record_from_captures(caps: &Captures<'_>) -> Option<CourseRecord> {
    let lecture_name = trim_field(caps.name("lecture")?.as_str());
    if lecture_name.is_empty() {
        return None;
    }

    Some(CourseRecord {
        lecture_name: lecture_name.to_string(),
        credits: caps.name("credits")?.as_str().parse().ok()?,
        grade: caps.name("grade")?.as_str().parse().ok()?,
        year: caps.name("year")?.as_str().parse().ok()?,
        semester: caps.name("semester")?.as_str().parse().ok()?,
        professor: caps
            .name("professor")
            .map(|m| trim_field(m.as_str()).to_string())
            .unwrap_or_default(),
    })
}

fn trim_field(field: &str) -> &str {
    field.trim_matches(|c: char| c.is_whitespace() || c == '\u{feff}')
}

/// Parse a sequence of lines, keeping matches in their original order.
///
/// Duplicate rows are kept.
pub fn parse_lines<'a, I>(lines: I) -> Vec<CourseRecord>
where
    I: IntoIterator<Item = &'a str>,
{
    lines.into_iter().filter_map(parse_line).collect()
}

/// Parse an extracted text blob, one record candidate per `\n`-separated line.
pub fn parse_text(text: &str) -> Vec<CourseRecord> {
    parse_lines(text.split('\n'))
}

/// Like [`parse_text`], also counting how many lines were skipped.
pub fn parse_text_with_summary(text: &str) -> (Vec<CourseRecord>, ParseSummary) {
    let mut summary = ParseSummary::default();
    let mut records = Vec::new();

    for line in text.split('\n') {
        summary.total_lines += 1;
        if let Some(record) = parse_line(line) {
            records.push(record);
        }
    }
    summary.matched = records.len();

    (records, summary)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(
        lecture_name: &str,
        credits: f64,
        grade: Grade,
        year: u16,
        semester: Semester,
        professor: &str,
    ) -> CourseRecord {
        CourseRecord {
            lecture_name: lecture_name.to_string(),
            credits,
            grade,
            year,
            semester,
            professor: professor.to_string(),
        }
    }

    #[test]
    fn test_pattern_compiles() {
        assert!(Regex::new(&line_pattern()).is_ok());
    }

    #[test]
    fn test_parse_full_line() {
        assert_eq!(
            parse_line("Intro to Systems  3 A 2023 春 Tanaka"),
            Some(record("Intro to Systems", 3.0, Grade::A, 2023, Semester::Spring, "Tanaka"))
        );
    }

    #[test]
    fn test_parse_fractional_credits_and_empty_professor() {
        assert_eq!(
            parse_line("Databases 1.5 C- 2022 秋 "),
            Some(record("Databases", 1.5, Grade::CMinus, 2022, Semester::Autumn, ""))
        );
    }

    #[test]
    fn test_grade_plus_is_not_truncated() {
        let parsed = parse_line("Operating Systems 2 A+ 2024 春 Smith").unwrap();
        assert_eq!(parsed.grade, Grade::APlus);
        assert_eq!(parsed.professor, "Smith");
    }

    #[test]
    fn test_grade_minus_is_not_truncated() {
        let parsed = parse_line("Compilers 2 C- 2021 秋 Sato").unwrap();
        assert_eq!(parsed.grade, Grade::CMinus);
        assert_eq!(parsed.professor, "Sato");
    }

    #[test]
    fn test_every_grade_token() {
        for grade in Grade::MATCH_ORDER {
            let line = format!("Seminar 1 {} 2020 春 Ito", grade);
            assert_eq!(parse_line(&line).map(|r| r.grade), Some(grade), "{}", line);
        }
    }

    #[test]
    fn test_optional_whitespace_around_year_and_semester() {
        assert_eq!(
            parse_line("Linear Algebra 2 B2019秋Suzuki"),
            Some(record("Linear Algebra", 2.0, Grade::B, 2019, Semester::Autumn, "Suzuki"))
        );
    }

    #[test]
    fn test_surrounding_whitespace_is_ignored() {
        assert_eq!(
            parse_line("   Physics I 4 P 2018 春   Yamada Taro  \r"),
            Some(record("Physics I", 4.0, Grade::P, 2018, Semester::Spring, "Yamada Taro"))
        );
    }

    #[test]
    fn test_lecture_name_is_shortest_prefix() {
        // Splitting after "Calculus" leaves "3" where the grade belongs,
        // so the name grows until the rest of the line fits.
        assert_eq!(
            parse_line("Calculus 2 3 W 2017 秋 Kato"),
            Some(record("Calculus 2", 3.0, Grade::W, 2017, Semester::Autumn, "Kato"))
        );
    }

    #[test]
    fn test_non_matching_lines_are_skipped() {
        let rejects = [
            "",
            "   ",
            "not a valid line of text",
            "Course Credits Grade Year Term Instructor",
            "Networks 2 D 2023 春 Abe",     // unknown grade
            "Networks 2 A 春 Abe",          // missing year
            "Networks 2 A 203 春 Abe",      // three-digit year
            "Networks 2 A 2023 Abe",        // missing semester
            "Networks 2 A 2023 夏 Abe",     // unknown semester token
            "Networks A 2023 春 Abe",       // missing credits
            "Networks 2. A 2023 春 Abe",    // dangling decimal point
            "2 A 2023 春 Abe",              // no lecture name
            "Networks 2A 2023 春 Abe",      // credits glued to grade
        ];

        for line in rejects {
            assert_eq!(parse_line(line), None, "{:?}", line);
        }
    }

    #[test]
    fn test_line_breaks_inside_a_row_are_rejected() {
        assert_eq!(parse_line("Foo\rBar 3 A 2023 春 X"), None);
        assert_eq!(parse_line("Foo\u{2028}Bar 3 A 2023 春 X"), None);
        assert_eq!(parse_line("Foo 3 A 2023 春 X\u{2029}Y"), None);
    }

    #[test]
    fn test_byte_order_marks_are_trimmed() {
        assert_eq!(
            parse_line("\u{feff}Ethics 2 B 2020 秋 X\u{feff}"),
            Some(record("Ethics", 2.0, Grade::B, 2020, Semester::Autumn, "X"))
        );
    }

    #[test]
    fn test_full_width_digits_are_not_a_year() {
        assert_eq!(parse_line("Networks 2 A ２０２３ 春 Abe"), None);
    }

    #[test]
    fn test_parse_text_keeps_order_and_duplicates() {
        let text = "Transcript\n\
                    Intro to Systems  3 A 2023 春 Tanaka\n\
                    not a valid line of text\n\
                    Databases 1.5 C- 2022 秋 \n\
                    Intro to Systems  3 A 2023 春 Tanaka\n";

        let records = parse_text(text);
        let names: Vec<_> = records.iter().map(|r| r.lecture_name.as_str()).collect();
        assert_eq!(names, vec!["Intro to Systems", "Databases", "Intro to Systems"]);
        assert_eq!(records[0], records[2]);
    }

    #[test]
    fn test_invalid_line_reduces_count_by_one() {
        let lines = [
            "Intro to Systems  3 A 2023 春 Tanaka",
            "not a valid line of text",
            "Databases 1.5 C- 2022 秋 ",
        ];
        assert_eq!(parse_lines(lines).len(), lines.len() - 1);
    }

    #[test]
    fn test_parse_is_idempotent() {
        let text = "Algorithms 2 A 2022 春 Mori\nnoise\nStatistics 2 NP 2021 秋 ";
        assert_eq!(parse_text(text), parse_text(text));
    }

    #[test]
    fn test_parse_text_with_summary() {
        let text = "Header\nAlgorithms 2 A 2022 春 Mori\n\nStatistics 2 NP 2021 秋 ";
        let (records, summary) = parse_text_with_summary(text);

        assert_eq!(records, parse_text(text));
        assert_eq!(summary.total_lines, 4);
        assert_eq!(summary.matched, 2);
        assert_eq!(summary.skipped(), 2);
    }
}
