//! Error types for sqltodal.

use thiserror::Error;

/// The main error type for SQL to DAL translation.
#[derive(Debug, Error)]
pub enum DalError {
    /// A character the scanner does not recognise.
    #[error("Lexical error at position {position}: illegal character '{character}'")]
    Lex { position: usize, character: char },

    /// The token sequence does not match the grammar.
    #[error("Syntax error at position {position}: found {found}, expected {expected}")]
    Syntax {
        position: usize,
        found: String,
        expected: String,
    },

    /// INSERT column list and value list differ in length.
    #[error("Insert column list has {columns} entries but value list has {values}")]
    LengthMismatch { columns: usize, values: usize },

    /// A statement built by hand that the grammar could never produce.
    #[error("Invalid statement: {0}")]
    Invalid(String),

    /// A name counter has no ids left.
    #[error("Ran out of {0} ids; choose a lower seed")]
    Exhausted(&'static str),

    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(String),

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl DalError {
    /// Create a lexical error at the given position.
    pub fn lex(position: usize, character: char) -> Self {
        Self::Lex {
            position,
            character,
        }
    }

    /// Create a syntax error at the given position.
    pub fn syntax(position: usize, found: impl Into<String>, expected: impl Into<String>) -> Self {
        Self::Syntax {
            position,
            found: found.into(),
            expected: expected.into(),
        }
    }

    /// Byte offset into the input, for errors that have one.
    pub fn position(&self) -> Option<usize> {
        match self {
            Self::Lex { position, .. } | Self::Syntax { position, .. } => Some(*position),
            _ => None,
        }
    }
}

/// Result type alias for sqltodal operations.
pub type DalResult<T> = Result<T, DalError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = DalError::syntax(7, "'from'", "a qualified column");
        assert_eq!(
            err.to_string(),
            "Syntax error at position 7: found 'from', expected a qualified column"
        );
    }

    #[test]
    fn test_length_mismatch_display() {
        let err = DalError::LengthMismatch {
            columns: 2,
            values: 3,
        };
        assert_eq!(
            err.to_string(),
            "Insert column list has 2 entries but value list has 3"
        );
        assert_eq!(err.position(), None);
    }

    #[test]
    fn test_exhausted_display() {
        let err = DalError::Exhausted("literal");
        assert_eq!(err.to_string(), "Ran out of literal ids; choose a lower seed");
        assert_eq!(err.position(), None);
    }

    #[test]
    fn test_lex_position() {
        assert_eq!(DalError::lex(4, '#').position(), Some(4));
    }
}
