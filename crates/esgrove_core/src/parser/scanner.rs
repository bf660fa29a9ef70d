//! ECMAScript lexer over UTF-16 code units.
//!
//! See [`Scanner`] for the main entry point.

use std::fmt;

use bitflags::bitflags;
use smallvec::SmallVec;

use super::syntax_kind::SyntaxKind;
use super::unicode::{
    CR, LF, is_decimal_digit, is_high_surrogate, is_id_continue, is_id_start, is_line_terminator,
    is_low_surrogate, is_white_space,
};
use crate::error::{ParseError, ParseResult};

// ─────────────────────────────────────────────────────────────────────────────
// Location
// ─────────────────────────────────────────────────────────────────────────────

/// A source location.
///
/// `row` and `column` are 0-based and count code points: a surrogate pair
/// advances the column once, and CR, LF and CRLF each end one row.
/// `offset` counts UTF-16 code units from the start of the source.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Location {
    /// 0-based line number.
    pub row: u32,
    /// 0-based column, in code points.
    pub column: u32,
    /// Code-unit offset.
    pub offset: usize,
}

impl fmt::Display for Location {
    /// Formats as the 1-based `line:column` pair editors expect.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.row + 1, self.column + 1)
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Token
// ─────────────────────────────────────────────────────────────────────────────

bitflags! {
    /// Independent per-token properties.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct TokenFlags: u8 {
        /// The spelling contains a `\u` escape.
        const UNICODE_ESCAPE = 1 << 0;
        /// The spelling contains a `\x` escape.
        const HEX_ESCAPE = 1 << 1;
        /// At least one *LineTerminator* separates this token from the
        /// previous one.
        const NEWLINE_BEFORE = 1 << 2;
    }
}

/// A single lexical token produced by the [`Scanner`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    /// The lexical category.
    pub kind: SyntaxKind,
    /// Location of the first code unit.
    pub location: Location,
    /// Number of code units consumed, escape syntax included.
    pub raw_length: usize,
    /// Escape and line-break properties.
    pub flags: TokenFlags,
    /// Decoded text of identifiers, string literals and numeric literals.
    pub cooked: Option<Box<[u16]>>,
}

impl Token {
    /// Returns `true` when a line terminator precedes this token.
    ///
    /// The parser uses this for automatic semicolon insertion and for
    /// `[no LineTerminator here]` restrictions.
    pub fn has_newline_before(&self) -> bool {
        self.flags.contains(TokenFlags::NEWLINE_BEFORE)
    }

    /// The cooked text, decoded lossily to a `String`.
    pub fn cooked_text(&self) -> Option<String> {
        self.cooked.as_deref().map(String::from_utf16_lossy)
    }
}

/// Staging buffer for decoded string contents; most literals fit inline.
type CookedBuf = SmallVec<[u16; 32]>;

fn push_cooked(cooked: &mut CookedBuf, cu: u16) -> ParseResult<()> {
    cooked.try_reserve(1)?;
    cooked.push(cu);
    Ok(())
}

pub(crate) fn boxed_copy(units: &[u16]) -> ParseResult<Box<[u16]>> {
    let mut text = Vec::new();
    text.try_reserve_exact(units.len())?;
    text.extend_from_slice(units);
    Ok(text.into_boxed_slice())
}

// ─────────────────────────────────────────────────────────────────────────────
// Scanner
// ─────────────────────────────────────────────────────────────────────────────

/// ECMAScript lexer.
///
/// Produces one [`Token`] per [`Scanner::next_token`] call from a UTF-16
/// source buffer the scanner owns.  The end of the source is reported as
/// [`ParseError::EndOfInput`].
///
/// # Example
///
/// ```
/// use esgrove_core::error::ParseError;
/// use esgrove_core::parser::scanner::Scanner;
///
/// let mut sc = Scanner::from_text("let x = 42;");
/// loop {
///     match sc.next_token() {
///         Ok(tok) => println!("{:?}", tok.kind),
///         Err(ParseError::EndOfInput) => break,
///         Err(e) => panic!("{e}"),
///     }
/// }
/// ```
pub struct Scanner {
    /// The complete source.
    source: Box<[u16]>,
    /// Where the next code unit will be read.
    current: Location,
    /// Snapshot of `current` at the start of the token being scanned.
    mark: Location,
}

impl Scanner {
    /// Create a scanner that takes ownership of `source`.
    pub fn new(source: impl Into<Box<[u16]>>) -> Self {
        Self {
            source: source.into(),
            current: Location::default(),
            mark: Location::default(),
        }
    }

    /// Create a scanner over the UTF-16 encoding of `text`.
    pub fn from_text(text: &str) -> Self {
        Self::new(text.encode_utf16().collect::<Vec<_>>())
    }

    /// Scan `text` to completion.
    pub fn tokenize(text: &str) -> ParseResult<Vec<Token>> {
        let mut scanner = Self::from_text(text);
        let mut tokens = Vec::new();
        loop {
            match scanner.next_token() {
                Ok(token) => tokens.push(token),
                Err(ParseError::EndOfInput) => return Ok(tokens),
                Err(e) => return Err(e),
            }
        }
    }

    /// The location of the next unread code unit.
    pub fn location(&self) -> Location {
        self.current
    }

    /// The source being scanned.
    pub fn source(&self) -> &[u16] {
        &self.source
    }

    // ── Low-level code-unit helpers ─────────────────────────────────────────

    fn peek_at(&self, n: usize) -> Option<u16> {
        self.source.get(self.current.offset + n).copied()
    }

    fn peek(&self) -> Option<u16> {
        self.peek_at(0)
    }

    /// The code unit `n` ahead as a `char`; lone surrogates read as U+FFFD.
    fn char_at(&self, n: usize) -> Option<char> {
        self.peek_at(n)
            .map(|cu| char::from_u32(u32::from(cu)).unwrap_or(char::REPLACEMENT_CHARACTER))
    }

    /// Advance past `n` code units, updating row/column tracking.
    ///
    /// CRLF is one line terminator: consuming the CR consumes the LF too.
    fn consume(&mut self, n: usize) {
        for _ in 0..n {
            let Some(cu) = self.peek() else { return };
            self.current.offset += 1;

            // The column of a surrogate pair advances on its low half.
            if is_high_surrogate(cu) && self.peek().is_some_and(is_low_surrogate) {
                continue;
            }
            self.current.column += 1;

            if cu == CR && self.peek() == Some(LF) {
                self.current.offset += 1;
            }
            if is_line_terminator(cu) {
                self.current.row += 1;
                self.current.column = 0;
            }
        }
    }

    fn invalid_token(&self) -> ParseError {
        ParseError::InvalidToken {
            location: self.mark,
        }
    }

    fn unsupported(feature: &'static str, location: Location) -> ParseError {
        ParseError::Unsupported { feature, location }
    }

    // ── Whitespace and comments ─────────────────────────────────────────────

    /// Skip whitespace and comments; returns `true` if a line terminator was
    /// crossed, including one inside a multi-line comment.
    fn skip_trivia(&mut self) -> ParseResult<bool> {
        let mut newline = false;
        while let Some(cu) = self.peek() {
            if is_line_terminator(cu) {
                newline = true;
                self.consume(1);
            } else if is_white_space(cu) {
                self.consume(1);
            } else if self.char_at(0) == Some('/') && self.char_at(1) == Some('/') {
                self.skip_line_comment();
            } else if self.char_at(0) == Some('/') && self.char_at(1) == Some('*') {
                newline |= self.skip_block_comment()?;
            } else if self.current.offset == 0
                && self.char_at(0) == Some('#')
                && self.char_at(1) == Some('!')
            {
                // Hashbang comment.
                self.skip_line_comment();
            } else {
                break;
            }
        }
        Ok(newline)
    }

    /// Skip to (not past) the next line terminator.
    fn skip_line_comment(&mut self) {
        while self.peek().is_some_and(|cu| !is_line_terminator(cu)) {
            self.consume(1);
        }
    }

    fn skip_block_comment(&mut self) -> ParseResult<bool> {
        let start = self.current;
        let mut newline = false;
        self.consume(2);
        loop {
            match self.peek() {
                None => {
                    self.current = start;
                    return Err(ParseError::InvalidToken { location: start });
                }
                Some(_) if self.char_at(0) == Some('*') && self.char_at(1) == Some('/') => {
                    self.consume(2);
                    return Ok(newline);
                }
                Some(cu) => {
                    newline |= is_line_terminator(cu);
                    self.consume(1);
                }
            }
        }
    }

    // ── String literal ──────────────────────────────────────────────────────

    fn scan_string(&mut self, quote: u16, flags: &mut TokenFlags) -> ParseResult<Box<[u16]>> {
        self.consume(1);
        let mut cooked = CookedBuf::new();
        loop {
            let Some(cu) = self.peek() else {
                return Err(self.invalid_token());
            };
            if cu == quote {
                self.consume(1);
                break;
            }
            match self.char_at(0) {
                Some('\r' | '\n') => return Err(self.invalid_token()),
                Some('\\') => self.scan_escape(&mut cooked, flags)?,
                _ => {
                    push_cooked(&mut cooked, cu)?;
                    self.consume(1);
                }
            }
        }
        boxed_copy(&cooked)
    }

    /// Decode one escape sequence; the cursor sits on the `\`.
    fn scan_escape(&mut self, cooked: &mut CookedBuf, flags: &mut TokenFlags) -> ParseResult<()> {
        let location = self.current;
        self.consume(1);
        let (Some(cu), Some(c)) = (self.peek(), self.char_at(0)) else {
            return Err(self.invalid_token());
        };
        let decoded = match c {
            // Line continuation.
            '\n' | '\r' | '\u{2028}' | '\u{2029}' => {
                self.consume(1);
                return Ok(());
            }
            'n' => LF,
            'r' => CR,
            't' => 0x0009,
            'b' => 0x0008,
            'f' => 0x000C,
            'v' => 0x000B,
            '0' if !self.peek_at(1).is_some_and(is_decimal_digit) => 0x0000,
            'x' => {
                flags.insert(TokenFlags::HEX_ESCAPE);
                return Err(Self::unsupported("hex escape sequence", location));
            }
            'u' => {
                flags.insert(TokenFlags::UNICODE_ESCAPE);
                return Err(Self::unsupported("unicode escape sequence", location));
            }
            '0'..='9' => {
                return Err(Self::unsupported("legacy octal escape sequence", location));
            }
            // `\'`, `\"`, `\\` and every NonEscapeCharacter decode to themselves.
            _ => cu,
        };
        push_cooked(cooked, decoded)?;
        self.consume(1);
        Ok(())
    }

    // ── Numeric literal ─────────────────────────────────────────────────────

    /// Scan a numeric literal; the cooked text is its spelling.
    fn scan_numeric(&mut self) -> ParseResult<Box<[u16]>> {
        match (self.char_at(0), self.char_at(1)) {
            (Some('0'), Some('x' | 'X')) => self.scan_radix_digits(|c| c.is_ascii_hexdigit())?,
            (Some('0'), Some('o' | 'O')) => self.scan_radix_digits(|c| matches!(c, '0'..='7'))?,
            (Some('0'), Some('b' | 'B')) => self.scan_radix_digits(|c| matches!(c, '0' | '1'))?,
            (Some('0'), Some('0'..='9')) => {
                return Err(Self::unsupported("legacy octal literal", self.mark));
            }
            _ => self.scan_decimal()?,
        }

        match self.peek() {
            Some(cu) if cu == u16::from(b'n') => {
                Err(Self::unsupported("BigInt literal", self.mark))
            }
            Some(cu) if cu == u16::from(b'_') => {
                Err(Self::unsupported("numeric separator", self.mark))
            }
            // The literal must not run straight into an identifier or digit.
            Some(cu) if is_id_start(cu) || is_decimal_digit(cu) => Err(self.invalid_token()),
            _ => boxed_copy(&self.source[self.mark.offset..self.current.offset]),
        }
    }

    fn scan_decimal_digits(&mut self) -> usize {
        let start = self.current.offset;
        while self.peek().is_some_and(is_decimal_digit) {
            self.consume(1);
        }
        self.current.offset - start
    }

    fn scan_decimal(&mut self) -> ParseResult<()> {
        self.scan_decimal_digits();
        if self.char_at(0) == Some('.') {
            self.consume(1);
            self.scan_decimal_digits();
        }
        if matches!(self.char_at(0), Some('e' | 'E')) {
            self.consume(1);
            if matches!(self.char_at(0), Some('+' | '-')) {
                self.consume(1);
            }
            if self.scan_decimal_digits() == 0 {
                return Err(self.invalid_token());
            }
        }
        Ok(())
    }

    /// Scan the digits after a `0x` / `0o` / `0b` prefix.
    fn scan_radix_digits(&mut self, is_digit: fn(char) -> bool) -> ParseResult<()> {
        self.consume(2);
        let start = self.current.offset;
        while self.char_at(0).is_some_and(is_digit) {
            self.consume(1);
        }
        if self.current.offset == start {
            return Err(self.invalid_token());
        }
        Ok(())
    }

    // ── Identifier / keyword ────────────────────────────────────────────────

    fn scan_identifier(&mut self) -> ParseResult<(SyntaxKind, Option<Box<[u16]>>)> {
        let start = self.current.offset;
        self.consume(1);
        while let Some(cu) = self.peek() {
            if cu == u16::from(b'\\') {
                return Err(Self::unsupported("escaped identifier", self.current));
            }
            // Supplementary-plane identifier characters are not recognised.
            if is_high_surrogate(cu) || is_low_surrogate(cu) || !is_id_continue(cu) {
                break;
            }
            self.consume(1);
        }

        let text = &self.source[start..self.current.offset];
        match SyntaxKind::from_keyword(text) {
            Some(keyword) => Ok((keyword, None)),
            None => Ok((SyntaxKind::Identifier, Some(boxed_copy(text)?))),
        }
    }

    // ── Punctuators ─────────────────────────────────────────────────────────

    /// Match the longest punctuator at the cursor.
    fn scan_punctuator(&mut self) -> Option<SyntaxKind> {
        use SyntaxKind as K;

        let c0 = self.char_at(0)?;
        let (c1, c2, c3) = (self.char_at(1), self.char_at(2), self.char_at(3));
        let (kind, len) = match (c0, c1, c2, c3) {
            ('{', ..) => (K::LeftBrace, 1),
            ('}', ..) => (K::RightBrace, 1),
            ('(', ..) => (K::LeftParen, 1),
            (')', ..) => (K::RightParen, 1),
            ('[', ..) => (K::LeftBracket, 1),
            (']', ..) => (K::RightBracket, 1),
            (';', ..) => (K::Semicolon, 1),
            (',', ..) => (K::Comma, 1),
            (':', ..) => (K::Colon, 1),
            ('~', ..) => (K::Tilde, 1),

            ('.', Some('.'), Some('.'), _) => (K::DotDotDot, 3),
            ('.', ..) => (K::Dot, 1),

            ('<', Some('<'), Some('='), _) => (K::LessLessEqual, 3),
            ('<', Some('<'), ..) => (K::LessLess, 2),
            ('<', Some('='), ..) => (K::LessEqual, 2),
            ('<', ..) => (K::Less, 1),

            ('>', Some('>'), Some('>'), Some('=')) => (K::GreaterGreaterGreaterEqual, 4),
            ('>', Some('>'), Some('>'), _) => (K::GreaterGreaterGreater, 3),
            ('>', Some('>'), Some('='), _) => (K::GreaterGreaterEqual, 3),
            ('>', Some('>'), ..) => (K::GreaterGreater, 2),
            ('>', Some('='), ..) => (K::GreaterEqual, 2),
            ('>', ..) => (K::Greater, 1),

            ('=', Some('='), Some('='), _) => (K::EqualEqualEqual, 3),
            ('=', Some('='), ..) => (K::EqualEqual, 2),
            ('=', Some('>'), ..) => (K::Arrow, 2),
            ('=', ..) => (K::Equal, 1),

            ('!', Some('='), Some('='), _) => (K::BangEqualEqual, 3),
            ('!', Some('='), ..) => (K::BangEqual, 2),
            ('!', ..) => (K::Bang, 1),

            ('+', Some('+'), ..) => (K::PlusPlus, 2),
            ('+', Some('='), ..) => (K::PlusEqual, 2),
            ('+', ..) => (K::Plus, 1),

            ('-', Some('-'), ..) => (K::MinusMinus, 2),
            ('-', Some('='), ..) => (K::MinusEqual, 2),
            ('-', ..) => (K::Minus, 1),

            ('*', Some('*'), Some('='), _) => (K::StarStarEqual, 3),
            ('*', Some('*'), ..) => (K::StarStar, 2),
            ('*', Some('='), ..) => (K::StarEqual, 2),
            ('*', ..) => (K::Star, 1),

            ('/', Some('='), ..) => (K::SlashEqual, 2),
            ('/', ..) => (K::Slash, 1),

            ('%', Some('='), ..) => (K::PercentEqual, 2),
            ('%', ..) => (K::Percent, 1),

            ('&', Some('&'), Some('='), _) => (K::AmpersandAmpersandEqual, 3),
            ('&', Some('&'), ..) => (K::AmpersandAmpersand, 2),
            ('&', Some('='), ..) => (K::AmpersandEqual, 2),
            ('&', ..) => (K::Ampersand, 1),

            ('|', Some('|'), Some('='), _) => (K::PipePipeEqual, 3),
            ('|', Some('|'), ..) => (K::PipePipe, 2),
            ('|', Some('='), ..) => (K::PipeEqual, 2),
            ('|', ..) => (K::Pipe, 1),

            ('^', Some('='), ..) => (K::CaretEqual, 2),
            ('^', ..) => (K::Caret, 1),

            ('?', Some('?'), Some('='), _) => (K::QuestionQuestionEqual, 3),
            ('?', Some('?'), ..) => (K::QuestionQuestion, 2),
            // `a?.5:b` is a conditional, not an optional chain.
            ('?', Some('.'), Some(d), _) if d.is_ascii_digit() => (K::Question, 1),
            ('?', Some('.'), ..) => (K::QuestionDot, 2),
            ('?', ..) => (K::Question, 1),

            _ => return None,
        };
        self.consume(len);
        Some(kind)
    }

    // ── Main entry point ────────────────────────────────────────────────────

    /// Scan and return the next token.
    ///
    /// Fails with [`ParseError::EndOfInput`] once only trivia remains.  On
    /// every failure the scanner is left at the start of the failed token.
    pub fn next_token(&mut self) -> ParseResult<Token> {
        self.mark = self.current;
        let newline = match self.skip_trivia() {
            Ok(newline) => newline,
            Err(e) => {
                self.current = self.mark;
                return Err(e);
            }
        };

        self.mark = self.current;
        let mut flags = TokenFlags::empty();
        flags.set(TokenFlags::NEWLINE_BEFORE, newline);

        let result = self.scan(&mut flags).map(|(kind, cooked)| Token {
            kind,
            location: self.mark,
            raw_length: self.current.offset - self.mark.offset,
            flags,
            cooked,
        });
        if result.is_err() {
            self.current = self.mark;
        }
        result
    }

    fn scan(&mut self, flags: &mut TokenFlags) -> ParseResult<(SyntaxKind, Option<Box<[u16]>>)> {
        let (Some(lead), Some(c)) = (self.peek(), self.char_at(0)) else {
            return Err(ParseError::EndOfInput);
        };
        match c {
            '"' | '\'' => Ok((SyntaxKind::StringLiteral, Some(self.scan_string(lead, flags)?))),
            '0'..='9' => Ok((SyntaxKind::NumericLiteral, Some(self.scan_numeric()?))),
            '.' if self.peek_at(1).is_some_and(is_decimal_digit) => {
                Ok((SyntaxKind::NumericLiteral, Some(self.scan_numeric()?)))
            }
            '`' => Err(Self::unsupported("template literal", self.mark)),
            '#' => Err(Self::unsupported("private name", self.mark)),
            '\\' => Err(Self::unsupported("escaped identifier", self.mark)),
            _ if is_id_start(lead) => self.scan_identifier(),
            _ => match self.scan_punctuator() {
                Some(kind) => Ok((kind, None)),
                None => Err(self.invalid_token()),
            },
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn kinds(src: &str) -> Vec<SyntaxKind> {
        Scanner::tokenize(src)
            .unwrap()
            .into_iter()
            .map(|t| t.kind)
            .collect()
    }

    fn single(src: &str) -> Token {
        let mut tokens = Scanner::tokenize(src).unwrap();
        assert_eq!(tokens.len(), 1, "{src:?} produced {tokens:?}");
        tokens.remove(0)
    }

    fn first_error(src: &str) -> ParseError {
        Scanner::tokenize(src).unwrap_err()
    }

    fn loc(row: u32, column: u32, offset: usize) -> Location {
        Location {
            row,
            column,
            offset,
        }
    }

    // ── Identifiers and keywords ────────────────────────────────────────────

    #[test]
    fn test_keywords() {
        assert_eq!(
            kinds("var let yield await of"),
            vec![
                SyntaxKind::Var,
                SyntaxKind::Let,
                SyntaxKind::Yield,
                SyntaxKind::Await,
                SyntaxKind::Of,
            ]
        );
        let tok = single("instanceof");
        assert_eq!(tok.kind, SyntaxKind::Instanceof);
        assert_eq!(tok.cooked, None);
    }

    #[test]
    fn test_identifier_simple() {
        let tok = single("$foo_1");
        assert_eq!(tok.kind, SyntaxKind::Identifier);
        assert_eq!(tok.cooked_text().as_deref(), Some("$foo_1"));
        assert_eq!(tok.raw_length, 6);
    }

    #[test]
    fn test_identifier_prefix_of_keyword() {
        assert_eq!(single("vars").kind, SyntaxKind::Identifier);
        assert_eq!(single("i").kind, SyntaxKind::Identifier);
    }

    #[test]
    fn test_identifier_unicode() {
        let tok = single("café");
        assert_eq!(tok.kind, SyntaxKind::Identifier);
        assert_eq!(tok.cooked_text().as_deref(), Some("café"));
    }

    #[test]
    fn test_identifier_stops_at_surrogate() {
        // The astral character cannot start a token either.
        match first_error("ab😀") {
            ParseError::InvalidToken { location } => assert_eq!(location, loc(0, 2, 2)),
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn test_escaped_identifier_unsupported() {
        assert!(matches!(
            first_error("\\u0061"),
            ParseError::Unsupported {
                feature: "escaped identifier",
                ..
            }
        ));
        match first_error("ab\\u0063") {
            ParseError::Unsupported { feature, location } => {
                assert_eq!(feature, "escaped identifier");
                assert_eq!(location.offset, 2);
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    // ── Punctuators ─────────────────────────────────────────────────────────

    #[test]
    fn test_punctuators_maximal_munch() {
        use SyntaxKind as K;
        assert_eq!(
            kinds(">>>= >>> >> >= > ... . === == => = !== != !"),
            vec![
                K::GreaterGreaterGreaterEqual,
                K::GreaterGreaterGreater,
                K::GreaterGreater,
                K::GreaterEqual,
                K::Greater,
                K::DotDotDot,
                K::Dot,
                K::EqualEqualEqual,
                K::EqualEqual,
                K::Arrow,
                K::Equal,
                K::BangEqualEqual,
                K::BangEqual,
                K::Bang,
            ]
        );
        assert_eq!(
            kinds("**= ** &&= ||= ??= ?. ?"),
            vec![
                K::StarStarEqual,
                K::StarStar,
                K::AmpersandAmpersandEqual,
                K::PipePipeEqual,
                K::QuestionQuestionEqual,
                K::QuestionDot,
                K::Question,
            ]
        );
    }

    #[test]
    fn test_equals_run_without_spaces() {
        assert_eq!(
            kinds("====>"),
            vec![SyntaxKind::EqualEqualEqual, SyntaxKind::Arrow]
        );
    }

    #[test]
    fn test_optional_chain_before_digit_is_conditional() {
        assert_eq!(
            kinds("a?.5:b"),
            vec![
                SyntaxKind::Identifier,
                SyntaxKind::Question,
                SyntaxKind::NumericLiteral,
                SyntaxKind::Colon,
                SyntaxKind::Identifier,
            ]
        );
    }

    #[test]
    fn test_invalid_character() {
        match first_error("a @") {
            ParseError::InvalidToken { location } => assert_eq!(location, loc(0, 2, 2)),
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn test_unsupported_leads() {
        for (src, expected) in [
            ("`t`", "template literal"),
            ("#x", "private name"),
            ("\\x", "escaped identifier"),
        ] {
            match first_error(src) {
                ParseError::Unsupported { feature, location } => {
                    assert_eq!(feature, expected);
                    assert_eq!(location, Location::default());
                }
                other => panic!("unexpected {other:?}"),
            }
        }
    }

    // ── Numeric literals ────────────────────────────────────────────────────

    #[test]
    fn test_numeric_decimal() {
        for src in ["0", "42", "3.14", ".5", "1.", "1e10", "2.5E-3", "7e+1"] {
            let tok = single(src);
            assert_eq!(tok.kind, SyntaxKind::NumericLiteral, "{src}");
            assert_eq!(tok.cooked_text().as_deref(), Some(src));
            assert_eq!(tok.raw_length, src.len());
        }
    }

    #[test]
    fn test_numeric_radix() {
        for src in ["0xFF", "0o17", "0b1010", "0X1f"] {
            assert_eq!(single(src).kind, SyntaxKind::NumericLiteral, "{src}");
        }
        assert!(matches!(
            first_error("0x"),
            ParseError::InvalidToken { .. }
        ));
        assert!(matches!(
            first_error("0b2"),
            ParseError::InvalidToken { .. }
        ));
    }

    #[test]
    fn test_numeric_unsupported_forms() {
        for (src, expected) in [
            ("10n", "BigInt literal"),
            ("1_000", "numeric separator"),
            ("017", "legacy octal literal"),
            ("08", "legacy octal literal"),
        ] {
            match first_error(src) {
                ParseError::Unsupported { feature, .. } => assert_eq!(feature, expected),
                other => panic!("{src}: unexpected {other:?}"),
            }
        }
    }

    #[test]
    fn test_numeric_followed_by_identifier_is_invalid() {
        assert!(matches!(
            first_error("3in"),
            ParseError::InvalidToken { .. }
        ));
        assert!(matches!(
            first_error("1e"),
            ParseError::InvalidToken { .. }
        ));
    }

    // ── String literals ─────────────────────────────────────────────────────

    #[test]
    fn test_string_quotes() {
        let tok = single("\"it's\"");
        assert_eq!(tok.kind, SyntaxKind::StringLiteral);
        assert_eq!(tok.cooked_text().as_deref(), Some("it's"));
        assert_eq!(tok.raw_length, 6);
        assert_eq!(single("'a\"b'").cooked_text().as_deref(), Some("a\"b"));
        assert_eq!(single("''").cooked_text().as_deref(), Some(""));
    }

    #[test]
    fn test_string_simple_escapes() {
        let tok = single(r#""\n\r\t\b\f\v\'\"\\""#);
        let expected: Vec<u16> = "\n\r\t\u{8}\u{c}\u{b}'\"\\".encode_utf16().collect();
        assert_eq!(tok.cooked.as_deref(), Some(expected.as_slice()));
        assert_eq!(tok.raw_length, 20);
    }

    #[test]
    fn test_string_null_and_non_escape_characters() {
        assert_eq!(single(r#""\0""#).cooked.as_deref(), Some(&[0u16][..]));
        assert_eq!(single(r#""\q\-""#).cooked_text().as_deref(), Some("q-"));
        assert!(matches!(
            first_error(r#""\01""#),
            ParseError::Unsupported {
                feature: "legacy octal escape sequence",
                ..
            }
        ));
    }

    #[test]
    fn test_string_line_continuation() {
        let tok = single("\"hello\\\n\"");
        assert_eq!(tok.cooked_text().as_deref(), Some("hello"));
        assert_eq!(tok.raw_length, 9);

        let tok = single("\"a\\\r\nb\"");
        assert_eq!(tok.cooked_text().as_deref(), Some("ab"));
        assert_eq!(tok.raw_length, 7);
    }

    #[test]
    fn test_string_raw_newline_is_invalid() {
        match first_error("\"hello\n\"") {
            ParseError::InvalidToken { location } => assert_eq!(location, Location::default()),
            other => panic!("unexpected {other:?}"),
        }
        assert!(matches!(
            first_error("'a\rb'"),
            ParseError::InvalidToken { .. }
        ));
    }

    #[test]
    fn test_string_line_separator_is_allowed() {
        assert_eq!(
            single("'a\u{2028}b'").cooked_text().as_deref(),
            Some("a\u{2028}b")
        );
    }

    #[test]
    fn test_string_unterminated() {
        assert!(matches!(
            first_error("\"abc"),
            ParseError::InvalidToken { .. }
        ));
        assert!(matches!(
            first_error("\"abc\\"),
            ParseError::InvalidToken { .. }
        ));
    }

    #[test]
    fn test_string_hex_and_unicode_escapes_unsupported() {
        match first_error(r#"x = "ab\x41""#) {
            ParseError::Unsupported { feature, location } => {
                assert_eq!(feature, "hex escape sequence");
                assert_eq!(location.offset, 7);
            }
            other => panic!("unexpected {other:?}"),
        }
        assert!(matches!(
            first_error(r#""\u0041""#),
            ParseError::Unsupported {
                feature: "unicode escape sequence",
                ..
            }
        ));
    }

    #[test]
    fn test_string_long_cooked_spills_staging_buffer() {
        let body = "x".repeat(100);
        let tok = single(&format!("'{body}'"));
        assert_eq!(tok.cooked.as_deref().map(<[u16]>::len), Some(100));
    }

    #[test]
    fn test_string_keeps_surrogate_pairs() {
        let tok = single("'😀'");
        assert_eq!(tok.cooked_text().as_deref(), Some("😀"));
        assert_eq!(tok.raw_length, 4);
    }

    // ── Trivia ──────────────────────────────────────────────────────────────

    #[test]
    fn test_comments_are_skipped() {
        assert_eq!(
            kinds("a // line\n/* block */ b"),
            vec![SyntaxKind::Identifier, SyntaxKind::Identifier]
        );
        assert!(kinds("// only a comment").is_empty());
        assert!(kinds("   \t ").is_empty());
    }

    #[test]
    fn test_hashbang_only_at_start() {
        assert_eq!(kinds("#!/usr/bin/env node\nx"), vec![SyntaxKind::Identifier]);
        assert!(matches!(
            first_error(" #!x"),
            ParseError::Unsupported {
                feature: "private name",
                ..
            }
        ));
    }

    #[test]
    fn test_unterminated_block_comment() {
        let mut sc = Scanner::from_text("a /* never closed");
        assert_eq!(sc.next_token().unwrap().kind, SyntaxKind::Identifier);
        match sc.next_token() {
            Err(ParseError::InvalidToken { location }) => assert_eq!(location, loc(0, 2, 2)),
            other => panic!("unexpected {other:?}"),
        }
        assert_eq!(sc.location(), loc(0, 1, 1));
    }

    #[test]
    fn test_newline_before_flag() {
        let tokens = Scanner::tokenize("a\n;").unwrap();
        assert!(!tokens[0].has_newline_before());
        assert!(tokens[1].has_newline_before());

        let tokens = Scanner::tokenize("a;").unwrap();
        assert!(!tokens[1].has_newline_before());

        let tokens = Scanner::tokenize("a /* x\n y */ b c").unwrap();
        assert!(tokens[1].has_newline_before());
        assert!(!tokens[2].has_newline_before());

        let tokens = Scanner::tokenize("a // c\nb").unwrap();
        assert!(tokens[1].has_newline_before());
    }

    // ── Locations ───────────────────────────────────────────────────────────

    #[test]
    fn test_locations_across_line_terminators() {
        let tokens = Scanner::tokenize("a\r\nb\rc\nd\u{2028}e").unwrap();
        let locations: Vec<_> = tokens.iter().map(|t| t.location).collect();
        assert_eq!(
            locations,
            vec![
                loc(0, 0, 0),
                loc(1, 0, 3),
                loc(2, 0, 5),
                loc(3, 0, 7),
                loc(4, 0, 9),
            ]
        );
    }

    #[test]
    fn test_surrogate_pair_counts_one_column() {
        let tokens = Scanner::tokenize("'😀' x").unwrap();
        assert_eq!(tokens[1].location, loc(0, 4, 5));
    }

    #[test]
    fn test_failure_restores_location() {
        let mut sc = Scanner::from_text("x \"open");
        sc.next_token().unwrap();
        let before = sc.location();
        assert!(sc.next_token().is_err());
        // Trivia before the failed token has been skipped, the token has not.
        assert_eq!(sc.location().offset, 2);
        assert!(sc.location().offset >= before.offset);
        assert!(sc.next_token().is_err());
    }

    #[test]
    fn test_end_of_input_is_sticky() {
        let mut sc = Scanner::from_text("a");
        sc.next_token().unwrap();
        assert_eq!(sc.next_token(), Err(ParseError::EndOfInput));
        assert_eq!(sc.next_token(), Err(ParseError::EndOfInput));
    }

    #[test]
    fn test_location_display_is_one_based() {
        assert_eq!(loc(0, 0, 0).to_string(), "1:1");
        assert_eq!(loc(2, 7, 40).to_string(), "3:8");
    }

    // ── Properties ──────────────────────────────────────────────────────────

    proptest! {
        #[test]
        fn test_prop_identifier_is_one_token(name in "[a-zA-Z_$][a-zA-Z0-9_$]{0,40}") {
            let tok = single(&name);
            prop_assert_eq!(tok.raw_length, name.len());
            if tok.kind == SyntaxKind::Identifier {
                prop_assert_eq!(tok.cooked_text(), Some(name));
            } else {
                prop_assert!(tok.kind.is_keyword());
            }
        }

        #[test]
        fn test_prop_plain_string_cooks_to_body(body in "[a-zA-Z0-9 .,;:!?]{0,80}") {
            let tok = single(&format!("\"{body}\""));
            prop_assert_eq!(tok.raw_length, body.len() + 2);
            prop_assert_eq!(tok.cooked_text(), Some(body));
        }

        #[test]
        fn test_prop_tokens_are_ordered_and_non_empty(
            words in prop::collection::vec("[a-z]{1,6}|[0-9]{1,4}|[-+*/%<>=!&|^~?:;,.(){}\\[\\]]", 1..30),
            seps in prop::collection::vec("[ \n\t]{1,3}", 30),
        ) {
            let src: String = words
                .iter()
                .zip(&seps)
                .map(|(w, s)| format!("{w}{s}"))
                .collect();
            if let Ok(tokens) = Scanner::tokenize(&src) {
                let mut end = 0;
                for tok in &tokens {
                    prop_assert!(tok.raw_length > 0);
                    prop_assert!(tok.location.offset >= end);
                    end = tok.location.offset + tok.raw_length;
                }
                prop_assert!(end <= src.len());
            }
        }
    }
}
