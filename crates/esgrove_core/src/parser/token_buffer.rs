//! Append-only token lookahead buffer.
//!
//! The parser never talks to the scanner directly.  It holds a plain `usize`
//! cursor into a [`TokenBuffer`]; backtracking is nothing more than copying
//! an earlier cursor value back, and replaying a position never re-scans.

use tracing::trace;

use super::scanner::{Location, Scanner, Token};
use crate::error::{ParseError, ParseResult};

/// A producer of tokens, one per call.
pub trait TokenSource {
    /// Produce the next token, or [`ParseError::EndOfInput`] when exhausted.
    fn next_token(&mut self) -> ParseResult<Token>;

    /// Location just past the last token produced.
    fn location(&self) -> Location;
}

impl TokenSource for Scanner {
    fn next_token(&mut self) -> ParseResult<Token> {
        Scanner::next_token(self)
    }

    fn location(&self) -> Location {
        Scanner::location(self)
    }
}

/// Tokens scanned so far, plus whether the source is exhausted.
#[derive(Debug, Default)]
pub struct TokenBuffer {
    tokens: Vec<Token>,
    exhausted: bool,
}

impl TokenBuffer {
    /// Create an empty buffer.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of tokens buffered.
    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    /// Returns `true` if no token has been buffered yet.
    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    /// The buffered token at `index`, without scanning.
    pub fn token_at(&self, index: usize) -> Option<&Token> {
        self.tokens.get(index)
    }

    /// Make sure the token at `cursor` is buffered, pulling at most one token
    /// from `source`.
    fn fill<S: TokenSource>(&mut self, source: &mut S, cursor: usize) -> ParseResult<()> {
        if cursor < self.tokens.len() {
            return Ok(());
        }
        debug_assert_eq!(cursor, self.tokens.len(), "cursor ran past the buffer");
        if self.exhausted {
            return Err(ParseError::EndOfInput);
        }
        match source.next_token() {
            Ok(token) => {
                trace!(
                    pos = cursor,
                    kind = ?token.kind,
                    row = token.location.row,
                    column = token.location.column,
                    "scanned token"
                );
                self.tokens.try_reserve(1)?;
                self.tokens.push(token);
                Ok(())
            }
            Err(ParseError::EndOfInput) => {
                self.exhausted = true;
                Err(ParseError::EndOfInput)
            }
            Err(e) => Err(e),
        }
    }

    /// Return the token at `*cursor` and advance the cursor past it.
    ///
    /// On failure the cursor is left untouched.
    pub fn get<S: TokenSource>(&mut self, source: &mut S, cursor: &mut usize) -> ParseResult<&Token> {
        self.fill(source, *cursor)?;
        let index = *cursor;
        *cursor += 1;
        self.tokens.get(index).ok_or(ParseError::EndOfInput)
    }

    /// Return the token at `cursor` without advancing.
    pub fn peek<S: TokenSource>(&mut self, source: &mut S, cursor: usize) -> ParseResult<&Token> {
        self.fill(source, cursor)?;
        self.tokens.get(cursor).ok_or(ParseError::EndOfInput)
    }

    /// Returns `true` when no token exists at `cursor`.
    ///
    /// Scanner errors other than end of input propagate.
    pub fn is_at_end<S: TokenSource>(&mut self, source: &mut S, cursor: usize) -> ParseResult<bool> {
        match self.fill(source, cursor) {
            Ok(()) => Ok(false),
            Err(ParseError::EndOfInput) => Ok(true),
            Err(e) => Err(e),
        }
    }

    /// Location of the token at `cursor`, or of the end of input.
    pub fn location_at<S: TokenSource>(&self, source: &S, cursor: usize) -> Location {
        self.tokens
            .get(cursor)
            .map_or_else(|| source.location(), |token| token.location)
    }
}
