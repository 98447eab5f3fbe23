use core::fmt;

pub mod str_parser;

/// Parser error
///
/// Lines and columns start at 1
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct ParserError {
    pub line   : usize,
    pub column : usize,
    pub msg    : &'static str,
}

impl fmt::Display for ParserError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_fmt(format_args!("{}:{}: {}", self.line, self.column, self.msg))
    }
}

impl std::error::Error for ParserError {}
