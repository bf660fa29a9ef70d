//! Error types for the esgrove scanner and parser.

use thiserror::Error;

use crate::parser::scanner::Location;

/// All errors that can be produced while scanning or parsing.
///
/// [`ParseError::NoMatch`] is the only *local* failure: it means "this
/// alternative does not apply here" and is absorbed by alternation,
/// repetition and optional items.  Every other variant propagates unchanged
/// to the entry point.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    /// The requested production does not start at the current position.
    #[error("no match")]
    NoMatch,

    /// The input ended where more tokens were required.
    #[error("unexpected end of input")]
    EndOfInput,

    /// The source violates the lexical grammar.
    #[error("invalid or unexpected token at {location}")]
    InvalidToken {
        /// Where the offending token starts.
        location: Location,
    },

    /// The token stream violates the syntactic grammar.
    #[error("SyntaxError: {message} at {location}")]
    SyntaxError {
        /// Where the error was detected.
        location: Location,
        /// Short description of what was expected.
        message: String,
    },

    /// Growing a token buffer or a cooked-text buffer failed.
    #[error("out of memory")]
    OutOfMemory,

    /// The construct is valid ECMAScript but outside the implemented subset.
    #[error("unsupported construct '{feature}' at {location}")]
    Unsupported {
        /// Name of the unimplemented construct.
        feature: &'static str,
        /// Where the construct starts.
        location: Location,
    },

    /// Grammar nesting exceeded [`crate::parser::ParseOptions::max_depth`].
    #[error("nesting deeper than {limit} productions")]
    NestingTooDeep {
        /// The configured limit.
        limit: u32,
    },
}

impl ParseError {
    /// Build a [`ParseError::SyntaxError`].
    pub fn syntax(location: Location, message: impl Into<String>) -> Self {
        ParseError::SyntaxError {
            location,
            message: message.into(),
        }
    }

    /// Returns `true` for [`ParseError::NoMatch`].
    pub fn is_no_match(&self) -> bool {
        matches!(self, ParseError::NoMatch)
    }

    /// Source position carried by the error, if it has one.
    pub fn location(&self) -> Option<Location> {
        match self {
            ParseError::InvalidToken { location }
            | ParseError::SyntaxError { location, .. }
            | ParseError::Unsupported { location, .. } => Some(*location),
            _ => None,
        }
    }
}

impl From<std::collections::TryReserveError> for ParseError {
    fn from(_: std::collections::TryReserveError) -> Self {
        ParseError::OutOfMemory
    }
}

impl From<smallvec::CollectionAllocErr> for ParseError {
    fn from(_: smallvec::CollectionAllocErr) -> Self {
        ParseError::OutOfMemory
    }
}

/// Convenient `Result` alias for fallible scanner and parser operations.
pub type ParseResult<T> = Result<T, ParseError>;
