use crate::ParserError;

/// Parser that can parse a `&str`, while keeping track of the current line and column
pub struct StrParser<'a> {
    pub line   : usize,
    pub column : usize,
    pub string : &'a str
}

impl<'a> StrParser<'a> {
    /// Create a new parser
    pub fn new(string: &'a str) -> Self {
        Self { line: 1, column: 1, string }
    }

    /// Try to consume a given character
    pub fn consume_char(&mut self, ch: char) -> bool {
        if self.string.starts_with(ch) {
            self.consume_count(ch.len_utf8());
            true
        } else {
            false
        }
    }

    /// Try ot consume a given string
    pub fn consume_str(&mut self, s: &str) -> bool {
        if self.string.starts_with(s) {
            self.consume_count(s.len());
            true
        } else {
            false
        }
    }

    /// Consume `count` bytes, `count` needs to be on a char boundary
    pub fn consume_count(&mut self, count: usize) {
        let consumed = &self.string[..count];
        match consumed.rfind('\n') {
            Some(idx) => {
                self.line += consumed.matches('\n').count();
                self.column = consumed[idx + 1..].chars().count() + 1;
            },
            None => self.column += consumed.chars().count(),
        }
        self.string = &self.string[count..];
    }

    /// Skip past the next end-of-line
    pub fn consume_to_eol(&mut self) {
        let idx = self.string.find('\n').map_or(self.string.len(), |idx| idx + 1);
        self.consume_count(idx);
    }

    /// Skip whitespace, stopping at a newline unless `include_newline` is set
    pub fn consume_whitespace(&mut self, include_newline: bool) {
        let idx = self.string.find(|ch: char| !ch.is_whitespace() || (!include_newline && ch == '\n')).unwrap_or(self.string.len());
        self.consume_count(idx);
    }

    /// Move the parser to the end (finish parsing)
    pub fn end(&mut self) {
        self.consume_count(self.string.len());
    }

    /// Check if there is still data to parse
    pub fn can_parse(&self) -> bool {
        !self.string.is_empty()
    }

    /// Check if the remaining data starts with `s`
    pub fn starts_with(&self, s: &str) -> bool {
        self.string.starts_with(s)
    }

    /// Get the next character without consuming it
    pub fn peek(&self) -> Option<char> {
        self.string.chars().next()
    }

    /// Create an error at the current line and column
    pub fn error(&self, msg: &'static str) -> ParserError {
        ParserError { line: self.line, column: self.column, msg }
    }

    /// Find the first occurance of a delimiter which isn't escaped with a `\`
    ///
    /// A delimiter is only escaped by an odd number of `\` in front of it, `\\` is an escaped backslash.
    /// The result contains a tuple, with the index of the match, and the index after the end of the match
    pub fn find_non_escaped_delimiter(string: &str, delimiter: &str) -> Option<(usize, usize)> {
        let bytes = string.as_bytes();
        string.match_indices(delimiter)
            .find(|(idx, _)| bytes[..*idx].iter().rev().take_while(|b| **b == b'\\').count() % 2 == 0)
            .map(|(idx, s)| (idx, idx + s.len()))
    }

    /// Extract a substring which is between a starting and ending delimiter, and may optionally span multiple lines
    ///
    /// Nothing is consumed when no valid substring was found
    pub fn extract_string(&mut self, start_delimiter: &str, end_delimiter: &str, multi_line: bool) -> Option<&'a str> {
        let string = self.string;
        let start = StrParser::find_non_escaped_delimiter(string, start_delimiter)?;

        // Find the index of the first unescaped end delimiter
        let end = StrParser::find_non_escaped_delimiter(&string[start.1..], end_delimiter)?;
        let end = (end.0 + start.1, end.1 + start.1);

        if !multi_line && string[start.1..end.0].contains('\n') {
            None
        } else {
            self.consume_count(end.1);
            Some(&string[start.1..end.0])
        }
    }

    /// Extract until a certain character is reached
    pub fn extract_until<F: FnMut(char) -> bool>(&mut self, pred: F) -> &'a str {
        let string = self.string;
        let idx = string.find(pred).unwrap_or(string.len());
        self.consume_count(idx);
        &string[..idx]
    }
}

#[cfg(test)]
mod tests {
    use super::StrParser;

    #[test]
    fn test_line_column_tracking() {
        let mut parser = StrParser::new("ab\ncd\n  ef");
        assert!(parser.consume_str("ab"));
        assert_eq!((parser.line, parser.column), (1, 3));
        parser.consume_whitespace(true);
        assert_eq!((parser.line, parser.column), (2, 1));
        parser.consume_to_eol();
        parser.consume_whitespace(false);
        assert_eq!((parser.line, parser.column), (3, 3));
        assert!(parser.consume_char('e'));
        assert_eq!(parser.error("boom").column, 4);
    }

    #[test]
    fn test_whitespace_stops_at_newline() {
        let mut parser = StrParser::new("  \t\nx");
        parser.consume_whitespace(false);
        assert_eq!(parser.peek(), Some('\n'));
    }

    #[test]
    fn test_extract_string() {
        let mut parser = StrParser::new(r#""a \" b" rest"#);
        assert_eq!(parser.extract_string("\"", "\"", false), Some(r#"a \" b"#));
        assert_eq!(parser.string, " rest");

        let mut parser = StrParser::new("\"a\nb\"");
        assert_eq!(parser.extract_string("\"", "\"", false), None);
        assert_eq!(parser.extract_string("\"", "\"", true), Some("a\nb"));
        assert!(!parser.can_parse());
    }

    #[test]
    fn test_escaped_backslash_before_delimiter() {
        assert_eq!(StrParser::find_non_escaped_delimiter(r#"out\\" x"#, "\""), Some((5, 6)));
        assert_eq!(StrParser::find_non_escaped_delimiter(r#"a\" b""#, "\""), Some((5, 6)));
        assert_eq!(StrParser::find_non_escaped_delimiter(r#"a\\\" b""#, "\""), Some((7, 8)));

        let mut parser = StrParser::new("\"out\\\\\"\nname");
        assert_eq!(parser.extract_string("\"", "\"", false), Some(r"out\\"));
        assert_eq!(parser.string, "\nname");
    }

    #[test]
    fn test_extract_until() {
        let mut parser = StrParser::new("0x1F_600, next");
        assert_eq!(parser.extract_until(|ch| ch == ','), "0x1F_600");
        assert!(parser.consume_char(','));
    }
}
