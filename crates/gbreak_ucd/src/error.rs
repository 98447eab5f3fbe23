use core::fmt;
use std::{
    io,
    path::{Path, PathBuf},
};

/// UCD generation error
///
/// All of these are fatal for a run, lines that are only skipped or dropped are reported through the log instead.
#[derive(Clone, PartialEq, Eq, Debug)]
pub enum UcdError {
    /// A file could not be read or written
    Io { path: PathBuf, kind: io::ErrorKind, msg: String },
    /// Codepoint text that isn't a hexadecimal number
    InvalidCodepoint { text: String },
    /// Property tag outside of the known grapheme break properties
    UnknownProperty { tag: String },
    /// The emitter failed to write the table
    Emit(String),
    /// Error at a given (1-based) line of the source file
    AtLine { line: usize, error: Box<UcdError> },
}

impl UcdError {
    pub fn io(path: &Path, err: &io::Error) -> Self {
        UcdError::Io { path: path.to_path_buf(), kind: err.kind(), msg: err.to_string() }
    }

    /// Attach a source line to the error
    pub fn at_line(self, line: usize) -> Self {
        UcdError::AtLine { line, error: Box::new(self) }
    }

    /// Get the line the error occurred at, if known
    pub fn line(&self) -> Option<usize> {
        match self {
            UcdError::AtLine { line, .. } => Some(*line),
            _ => None,
        }
    }

    /// Get the error without any location info
    pub fn root(&self) -> &UcdError {
        match self {
            UcdError::AtLine { error, .. } => error.root(),
            err => err,
        }
    }
}

impl fmt::Display for UcdError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UcdError::Io { path, msg, .. }   => f.write_fmt(format_args!("Failed to access '{}': {msg}", path.display())),
            UcdError::InvalidCodepoint { text } => f.write_fmt(format_args!("Invalid hexadecimal codepoint: '{text}'")),
            UcdError::UnknownProperty { tag }   => f.write_fmt(format_args!("Unknown grapheme break property: '{tag}'")),
            UcdError::Emit(msg)                 => f.write_fmt(format_args!("Failed to emit table: {msg}")),
            UcdError::AtLine { line, error }    => f.write_fmt(format_args!("line {line}: {error}")),
        }
    }
}

impl std::error::Error for UcdError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            UcdError::AtLine { error, .. } => Some(error.as_ref()),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::UcdError;

    #[test]
    fn test_line_context() {
        let err = UcdError::InvalidCodepoint { text: "00G1".to_string() }.at_line(12);
        assert_eq!(err.line(), Some(12));
        assert_eq!(err.root(), &UcdError::InvalidCodepoint { text: "00G1".to_string() });
        assert_eq!(err.to_string(), "line 12: Invalid hexadecimal codepoint: '00G1'");
    }
}
