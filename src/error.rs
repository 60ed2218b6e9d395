use std::fmt;

use crate::xmlvalue::ContentKind;

/// Errors produced by tree navigation, mutation and the XML codec.
#[derive(Debug)]
pub enum Error {
    /// A child or sibling the operation requires is absent.
    NotFound(String),
    /// The content value has the wrong shape for the operation.
    InvalidContentType {
        operation: &'static str,
        found: ContentKind,
    },
    /// A true index or span falls outside the content sequence.
    IndexOutOfRange {
        index: usize,
        count: usize,
        len: usize,
    },
    /// An element name or text value is not of the expected kind.
    TypeMismatch { expected: String, found: String },
    UnclosedEntity(String),
    InvalidEntity(String),
    InvalidCloseTag { expected: String, found: String },
    UnclosedTag(String),
    UnsupportedEncoding(String),
    Io(std::io::Error),
    Parser(xmlparser::Error),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::NotFound(what) => write!(f, "not found: {}", what),
            Error::InvalidContentType { operation, found } => {
                write!(f, "cannot {} content of kind {}", operation, found)
            }
            Error::IndexOutOfRange { index, count, len } => write!(
                f,
                "index {} with count {} out of range for length {}",
                index, count, len
            ),
            Error::TypeMismatch { expected, found } => {
                write!(f, "expected {} but found {}", expected, found)
            }
            Error::UnclosedEntity(entity) => write!(f, "unclosed entity: &{}", entity),
            Error::InvalidEntity(entity) => write!(f, "invalid entity: &{};", entity),
            Error::InvalidCloseTag { expected, found } => write!(
                f,
                "close tag </{}> does not match open tag <{}>",
                found, expected
            ),
            Error::UnclosedTag(name) => write!(f, "element <{}> is never closed", name),
            Error::UnsupportedEncoding(label) => write!(f, "unsupported encoding: {}", label),
            Error::Io(e) => write!(f, "io error: {}", e),
            Error::Parser(e) => write!(f, "xml error: {}", e),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Io(e) => Some(e),
            Error::Parser(e) => Some(e),
            _ => None,
        }
    }
}

impl From<xmlparser::Error> for Error {
    #[inline]
    fn from(e: xmlparser::Error) -> Self {
        Error::Parser(e)
    }
}

impl From<std::io::Error> for Error {
    #[inline]
    fn from(e: std::io::Error) -> Self {
        Error::Io(e)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_invalid_content_type() {
        let err = Error::InvalidContentType {
            operation: "truncate",
            found: ContentKind::Text,
        };
        assert_eq!(err.to_string(), "cannot truncate content of kind text");
    }

    #[test]
    fn test_display_index_out_of_range() {
        let err = Error::IndexOutOfRange {
            index: 3,
            count: 2,
            len: 4,
        };
        assert_eq!(
            err.to_string(),
            "index 3 with count 2 out of range for length 4"
        );
    }
}
