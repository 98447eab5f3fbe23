use core::{
    fmt,
    iter::FusedIterator,
    ops::RangeInclusive,
};
use static_assertions::assert_eq_size;

use crate::UcdError;

/// Unicode codepoint
///
/// Values above [`Codepoint::MAX`] can be represented, the parser does not reject them.
#[repr(transparent)]
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Codepoint(u32);
assert_eq_size!(Codepoint, u32);

impl Codepoint {
    /// Highest valid unicode scalar value
    pub const MAX: Codepoint = Codepoint(0x10FFFF);

    pub const fn new(val: u32) -> Self {
        Self(val)
    }

    pub const fn value(self) -> u32 {
        self.0
    }

    /// Parse a codepoint from hexadecimal digits of any width, surrounding whitespace is ignored
    pub fn parse_hex(text: &str) -> Result<Self, UcdError> {
        let digits = text.trim();
        let invalid = || UcdError::InvalidCodepoint { text: text.to_string() };

        // `from_str_radix` also accepts a leading sign
        if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
            return Err(invalid());
        }
        u32::from_str_radix(digits, 16).map(Codepoint).map_err(|_| invalid())
    }

    /// Check if the codepoint is within the unicode codespace
    pub const fn is_valid(self) -> bool {
        self.0 <= Self::MAX.0
    }

    /// Get the character for this codepoint, `None` for surrogates and out of range values
    pub fn to_char(self) -> Option<char> {
        char::from_u32(self.0)
    }
}

impl From<u32> for Codepoint {
    fn from(val: u32) -> Self {
        Codepoint(val)
    }
}

impl From<Codepoint> for u32 {
    fn from(cp: Codepoint) -> Self {
        cp.0
    }
}

impl fmt::Debug for Codepoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "U+{:04X}", self.0)
    }
}

impl fmt::Display for Codepoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "U+{:04X}", self.0)
    }
}

/// What to do with a range that starts and ends at the same codepoint, e.g. `0041..0041`
#[derive(Clone, Copy, PartialEq, Eq, Default, Debug)]
pub enum DegenerateRangePolicy {
    /// Reject the range, the codepoint gets no property from this line
    #[default]
    Drop,
    /// Treat the range as the single codepoint
    Single,
}

impl DegenerateRangePolicy {
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "drop"   => Some(DegenerateRangePolicy::Drop),
            "single" => Some(DegenerateRangePolicy::Single),
            _        => None,
        }
    }
}

/// Codepoint designation of a UCD line: either a single codepoint or an inclusive range
#[derive(Clone, Copy, PartialEq, Eq)]
pub enum CodepointSpec {
    Single(Codepoint),
    Range { start: Codepoint, end: Codepoint },
}

impl CodepointSpec {
    pub const RANGE_SEPARATOR: &'static str = "..";

    /// Parse a codepoint spec, e.g. `1F600` or `0041..0045`
    ///
    /// Both ends of a range are parsed on their own, so they don't need to have the same number of digits.
    pub fn parse(text: &str) -> Result<Self, UcdError> {
        match text.split_once(Self::RANGE_SEPARATOR) {
            Some((start, end)) => Ok(CodepointSpec::Range {
                start: Codepoint::parse_hex(start)?,
                end: Codepoint::parse_hex(end)?,
            }),
            None => Ok(CodepointSpec::Single(Codepoint::parse_hex(text)?)),
        }
    }

    pub fn start(self) -> Codepoint {
        match self {
            CodepointSpec::Single(cp) => cp,
            CodepointSpec::Range { start, .. } => start,
        }
    }

    pub fn end(self) -> Codepoint {
        match self {
            CodepointSpec::Single(cp) => cp,
            CodepointSpec::Range { end, .. } => end,
        }
    }

    /// Check if the spec is a range that starts and ends at the same codepoint
    pub fn is_degenerate(self) -> bool {
        matches!(self, CodepointSpec::Range { start, end } if start == end)
    }

    /// Expand the spec into the codepoints it covers, in ascending order
    ///
    /// Inverted ranges are always rejected, degenerate ranges depend on the `policy`.
    pub fn expand(self, policy: DegenerateRangePolicy) -> Expansion {
        match self {
            CodepointSpec::Single(cp) => Expansion::Codepoints(CodepointIter::new(cp, cp)),
            CodepointSpec::Range { start, end } => if start < end {
                Expansion::Codepoints(CodepointIter::new(start, end))
            } else if start > end {
                Expansion::Rejected(RangeRejection::Inverted { start, end })
            } else {
                match policy {
                    DegenerateRangePolicy::Drop => Expansion::Rejected(RangeRejection::Degenerate(start)),
                    DegenerateRangePolicy::Single => Expansion::Codepoints(CodepointIter::new(start, start)),
                }
            },
        }
    }
}

impl fmt::Debug for CodepointSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Single(cp) => write!(f, "CodepointSpec::Single({:#07X})", cp.0),
            Self::Range { start, end } => write!(f, "CodepointSpec::Range({:#07X}, {:#07X})", start.0, end.0),
        }
    }
}

/// Writes the spec back in UCD notation
impl fmt::Display for CodepointSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Single(cp) => write!(f, "{:04X}", cp.0),
            Self::Range { start, end } => write!(f, "{:04X}..{:04X}", start.0, end.0),
        }
    }
}

/// Reason a range produced no codepoints
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum RangeRejection {
    /// Range of a single codepoint, written as `X..X`
    Degenerate(Codepoint),
    /// Range where the start comes after the end
    Inverted { start: Codepoint, end: Codepoint },
}

impl fmt::Display for RangeRejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RangeRejection::Degenerate(cp)       => f.write_fmt(format_args!("degenerate range {:04X}..{:04X}", cp.0, cp.0)),
            RangeRejection::Inverted { start, end } => f.write_fmt(format_args!("inverted range {:04X}..{:04X}", start.0, end.0)),
        }
    }
}

/// Result of expanding a [`CodepointSpec`]
#[derive(Clone, Debug)]
pub enum Expansion {
    Codepoints(CodepointIter),
    Rejected(RangeRejection),
}

impl Expansion {
    /// Get the codepoints, a rejected spec has none
    pub fn codepoints(self) -> CodepointIter {
        match self {
            Expansion::Codepoints(iter) => iter,
            Expansion::Rejected(_) => CodepointIter::empty(),
        }
    }

    pub fn rejection(&self) -> Option<RangeRejection> {
        match self {
            Expansion::Codepoints(_) => None,
            Expansion::Rejected(rejection) => Some(*rejection),
        }
    }
}

/// Iterator over an inclusive range of codepoints
#[derive(Clone, Debug)]
pub struct CodepointIter {
    range: RangeInclusive<u32>,
}

impl CodepointIter {
    fn new(start: Codepoint, end: Codepoint) -> Self {
        Self { range: start.0..=end.0 }
    }

    fn empty() -> Self {
        Self { range: 1..=0 }
    }
}

impl Iterator for CodepointIter {
    type Item = Codepoint;

    fn next(&mut self) -> Option<Self::Item> {
        self.range.next().map(Codepoint)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.range.size_hint()
    }
}

impl DoubleEndedIterator for CodepointIter {
    fn next_back(&mut self) -> Option<Self::Item> {
        self.range.next_back().map(Codepoint)
    }
}

impl FusedIterator for CodepointIter {}

#[cfg(test)]
mod tests {
    use super::*;

    fn expand(text: &str) -> Vec<u32> {
        CodepointSpec::parse(text).unwrap()
            .expand(DegenerateRangePolicy::Drop)
            .codepoints()
            .map(u32::from)
            .collect()
    }

    #[test]
    fn test_range() {
        assert_eq!(expand("0041..0045"), [0x41, 0x42, 0x43, 0x44, 0x45]);
    }

    #[test]
    fn test_single() {
        assert_eq!(expand("1F600"), [0x1F600]);
        assert_eq!(expand("000D"), [0x0D]);
    }

    #[test]
    fn test_degenerate_range() {
        assert_eq!(expand("0041..0041"), Vec::<u32>::new());

        let spec = CodepointSpec::parse("0041..0041").unwrap();
        assert!(spec.is_degenerate());
        assert_eq!(spec.expand(DegenerateRangePolicy::Drop).rejection(), Some(RangeRejection::Degenerate(Codepoint::new(0x41))));

        let kept: Vec<Codepoint> = spec.expand(DegenerateRangePolicy::Single).codepoints().collect();
        assert_eq!(kept, [Codepoint::new(0x41)]);
    }

    #[test]
    fn test_inverted_range() {
        let spec = CodepointSpec::parse("0045..0041").unwrap();
        for policy in [DegenerateRangePolicy::Drop, DegenerateRangePolicy::Single] {
            assert_eq!(
                spec.expand(policy).rejection(),
                Some(RangeRejection::Inverted { start: Codepoint::new(0x45), end: Codepoint::new(0x41) })
            );
        }
    }

    #[test]
    fn test_mixed_width_range() {
        let cps = expand("FFFE..10001");
        assert_eq!(cps, [0xFFFE, 0xFFFF, 0x10000, 0x10001]);

        let spec = CodepointSpec::parse("1F1E6..1F1FF").unwrap();
        assert_eq!(spec.start(), Codepoint::new(0x1F1E6));
        assert_eq!(spec.end(), Codepoint::new(0x1F1FF));
        assert_eq!(spec.expand(DegenerateRangePolicy::Drop).codepoints().count(), 26);
    }

    #[test]
    fn test_invalid_hex() {
        for text in ["", "00G1", "+0041", "0041..", "..0041", "0041..0042..0043", "U+0041", "0041 0042"] {
            assert!(matches!(CodepointSpec::parse(text), Err(UcdError::InvalidCodepoint { .. })), "'{text}' should not parse");
        }
        assert!(CodepointSpec::parse("FFFFFFFFF").is_err());
    }

    #[test]
    fn test_out_of_range_is_kept() {
        let cp = Codepoint::parse_hex("110000").unwrap();
        assert!(!cp.is_valid());
        assert_eq!(cp.to_char(), None);
        assert!(Codepoint::MAX.is_valid());
    }

    #[test]
    fn test_formatting() {
        assert_eq!(Codepoint::new(0xD).to_string(), "U+000D");
        assert_eq!(CodepointSpec::parse("1F3FB").unwrap().to_string(), "1F3FB");
        assert_eq!(CodepointSpec::parse(" 0600 .. 0605 ").unwrap().to_string(), "0600..0605");
        assert_eq!(format!("{:?}", CodepointSpec::parse("0041").unwrap()), "CodepointSpec::Single(0x00041)");
        assert_eq!(RangeRejection::Degenerate(Codepoint::new(0x41)).to_string(), "degenerate range 0041..0041");
    }

    #[test]
    fn test_iter_is_double_ended() {
        let spec = CodepointSpec::parse("0030..0032").unwrap();
        let rev: Vec<u32> = spec.expand(DegenerateRangePolicy::Drop).codepoints().rev().map(u32::from).collect();
        assert_eq!(rev, [0x32, 0x31, 0x30]);
    }
}
