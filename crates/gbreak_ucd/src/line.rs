//! Line grammar of UCD property files
//!
//! Each data line has the form `<codepoint-spec> ; <property> # <comment>`, e.g.
//!
//! ```text
//! 0600..0605    ; Prepend # Cf   [6] ARABIC NUMBER SIGN..ARABIC NUMBER MARK ABOVE
//! ```

use core::fmt;

/// Accepted data line, both fields are trimmed
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct UcdLine<'a> {
    /// Codepoint spec text, not parsed yet
    pub spec     : &'a str,
    /// Property tag text, not validated
    pub property : &'a str,
}

/// Reason a line did not produce an entry
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum SkipReason {
    /// Line starting with `#`
    Comment,
    /// Empty line
    Empty,
    /// Line that doesn't have exactly 2 `;` separated fields
    FieldCount { found: usize },
    /// Line where the property field isn't followed by exactly one `#` comment
    AnnotationCount { found: usize },
}

impl SkipReason {
    /// Check if the line is malformed, comments and empty lines are expected in UCD files
    pub fn is_malformed(self) -> bool {
        matches!(self, SkipReason::FieldCount { .. } | SkipReason::AnnotationCount { .. })
    }
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SkipReason::Comment                    => f.write_str("comment"),
            SkipReason::Empty                      => f.write_str("empty line"),
            SkipReason::FieldCount { found }       => f.write_fmt(format_args!("expected 2 ';' separated fields, found {found}")),
            SkipReason::AnnotationCount { found }  => f.write_fmt(format_args!("expected a property followed by a single '#' comment, found {found} '#' separated fields")),
        }
    }
}

/// Outcome of parsing a single line
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum LineOutcome<'a> {
    Entry(UcdLine<'a>),
    Skip(SkipReason),
}

impl<'a> LineOutcome<'a> {
    pub fn entry(self) -> Option<UcdLine<'a>> {
        match self {
            LineOutcome::Entry(line) => Some(line),
            LineOutcome::Skip(_) => None,
        }
    }
}

/// Parse a single line of a UCD property file
///
/// A line containing only whitespace isn't treated as empty, it is rejected for not having 2 fields.
pub fn parse_line(line: &str) -> LineOutcome<'_> {
    if line.starts_with('#') {
        return LineOutcome::Skip(SkipReason::Comment);
    }
    if line.is_empty() || line == "\n" {
        return LineOutcome::Skip(SkipReason::Empty);
    }

    let (spec, rest) = match split_pair(line, ';') {
        Ok(fields) => fields,
        Err(found) => return LineOutcome::Skip(SkipReason::FieldCount { found }),
    };
    let (property, _comment) = match split_pair(rest, '#') {
        Ok(fields) => fields,
        Err(found) => return LineOutcome::Skip(SkipReason::AnnotationCount { found }),
    };

    LineOutcome::Entry(UcdLine { spec: spec.trim(), property: property.trim() })
}

/// Split `s` into exactly 2 fields, or return the number of fields found
fn split_pair(s: &str, separator: char) -> Result<(&str, &str), usize> {
    let mut fields = s.split(separator);
    match (fields.next(), fields.next(), fields.next()) {
        (Some(first), Some(second), None) => Ok((first, second)),
        (_, None, _) => Err(1),
        (_, Some(_), Some(_)) => Err(3 + fields.count()),
        (None, Some(_), None) => unreachable!("str::split always yields a first field"),
    }
}
