//! Backtracking recursive-descent parser.
//!
//! [`Parser`] interprets the rule table in [`super::grammar`].  All parse
//! state lives in the parser value: the token buffer, the memo table, the
//! recursion depth and the bookkeeping used to place error locations.
//! Positions are plain token indices; restoring an index is the whole of
//! backtracking.
//!
//! # Example
//!
//! ```
//! use esgrove_core::parser::{Parser, SyntaxKind};
//!
//! let mut parser = Parser::from_text("var a = 1, b;");
//! let root = parser.parse_script().unwrap();
//! assert_eq!(root.kind(), SyntaxKind::Script);
//! assert_eq!(root.descendants_of(SyntaxKind::VariableDeclaration).count(), 2);
//! ```

use std::collections::HashMap;

use tracing::{debug, trace};

use super::cst::ParseNode;
use super::grammar::{self, Guard, Item, NameRule, Occurs, Operator, Rhs, Rule};
use super::params::Params;
use super::scanner::{Location, Scanner, Token, TokenFlags, boxed_copy};
use super::syntax_kind::SyntaxKind;
use super::token_buffer::{TokenBuffer, TokenSource};
use crate::error::{ParseError, ParseResult};

/// Tunables for one [`Parser`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParseOptions {
    /// Deepest chain of nested productions before
    /// [`ParseError::NestingTooDeep`] is returned.
    pub max_depth: u32,
    /// Cache results of the expression kinds most often re-parsed while
    /// backtracking.  Turning this off changes neither the tree nor the
    /// reported error, except where it moves a [`ParseError::NestingTooDeep`]
    /// boundary.
    pub memoize: bool,
}

impl Default for ParseOptions {
    fn default() -> Self {
        Self {
            max_depth: 1024,
            memoize: true,
        }
    }
}

/// One cached production result.
///
/// `furthest` and `unsupported` are the parser's failure marks as they stood
/// after the production ran; a hit folds them back in, so error positions do
/// not depend on whether the result came from the cache.
struct MemoEntry {
    result: ParseResult<(ParseNode, usize)>,
    furthest: usize,
    unsupported: Option<(&'static str, Location)>,
}

/// `(kind, params, start)` → the cached result.
type MemoTable = HashMap<(SyntaxKind, Params, usize), MemoEntry>;

/// A parser over one source text.
///
/// The parser owns its token source, every token scanned from it and, after
/// a successful [`Parser::parse_script`], the tree.
pub struct Parser<S = Scanner> {
    source: S,
    tokens: TokenBuffer,
    options: ParseOptions,
    memo: MemoTable,
    depth: u32,
    /// Furthest token index at which a token failed to match.
    furthest: usize,
    /// Furthest unsupported construct recognised on any path.
    unsupported: Option<(&'static str, Location)>,
    root: Option<ParseNode>,
}

impl Parser<Scanner> {
    /// Create a parser over a UTF-16 source.
    pub fn new(source: impl Into<Box<[u16]>>) -> Self {
        Self::with_source(Scanner::new(source))
    }

    /// Create a parser over the UTF-16 encoding of `text`.
    pub fn from_text(text: &str) -> Self {
        Self::with_source(Scanner::from_text(text))
    }
}

impl<S: TokenSource> Parser<S> {
    /// Create a parser pulling tokens from `source`.
    pub fn with_source(source: S) -> Self {
        Self {
            source,
            tokens: TokenBuffer::new(),
            options: ParseOptions::default(),
            memo: HashMap::new(),
            depth: 0,
            furthest: 0,
            unsupported: None,
            root: None,
        }
    }

    /// Replace the default [`ParseOptions`].
    pub fn with_options(mut self, options: ParseOptions) -> Self {
        self.options = options;
        self
    }

    pub fn options(&self) -> ParseOptions {
        self.options
    }

    /// The tree built by the last successful [`Parser::parse_script`].
    pub fn root(&self) -> Option<&ParseNode> {
        self.root.as_ref()
    }

    /// Take ownership of the tree, dropping the parser and its tokens.
    pub fn into_root(self) -> Option<ParseNode> {
        self.root
    }

    /// Number of tokens scanned so far.
    pub fn tokens_scanned(&self) -> usize {
        self.tokens.len()
    }

    // ─────────────────────────────────────────────────────────────────────
    // Entry points
    // ─────────────────────────────────────────────────────────────────────

    /// Parse the whole source as a *Script*.
    ///
    /// Succeeds only if every token is consumed.  Any earlier tree is
    /// discarded first, so on failure [`Parser::root`] is `None`.
    pub fn parse_script(&mut self) -> ParseResult<&ParseNode> {
        self.root = None;
        self.memo.clear();
        self.furthest = 0;
        self.unsupported = None;

        debug!(max_depth = self.options.max_depth, "parsing script");
        let mut cursor = 0;
        let root = match self.parse(SyntaxKind::Script, Params::default(), &mut cursor) {
            Ok(root) => root,
            Err(e) => return Err(self.report(e)),
        };
        if !self.tokens.is_at_end(&mut self.source, cursor)? {
            let leftover = self.unexpected(cursor.max(self.furthest));
            return Err(self.report(leftover));
        }
        debug!(
            nodes = root.len_subtree(),
            tokens = self.tokens.len(),
            memo_entries = self.memo.len(),
            "parsed script"
        );
        Ok(self.root.insert(root))
    }

    /// Parse the source as a *Module*.  Not supported.
    pub fn parse_module(&mut self) -> ParseResult<&ParseNode> {
        self.root = None;
        Err(ParseError::Unsupported {
            feature: "module goal",
            location: Location::default(),
        })
    }

    /// Parse one production starting at `*cursor`.
    ///
    /// On success the cursor is past the production; on any error it is
    /// back where it started.
    pub fn parse(
        &mut self,
        kind: SyntaxKind,
        params: Params,
        cursor: &mut usize,
    ) -> ParseResult<ParseNode> {
        if self.depth >= self.options.max_depth {
            return Err(ParseError::NestingTooDeep {
                limit: self.options.max_depth,
            });
        }

        let memoize = self.options.memoize && grammar::is_memoized(kind);
        if memoize && let Some(entry) = self.memo.get(&(kind, params, *cursor)) {
            trace!(?kind, pos = *cursor, "memo hit");
            let (furthest, unsupported) = (entry.furthest, entry.unsupported);
            let result = match &entry.result {
                Ok((node, end)) => {
                    *cursor = *end;
                    Ok(node.clone())
                }
                Err(e) => Err(e.clone()),
            };
            self.fail_at(furthest);
            if let Some((feature, location)) = unsupported {
                self.note_unsupported(feature, location);
            }
            return result;
        }

        let start = *cursor;
        self.depth += 1;
        let result = self.parse_rule(kind, params, cursor);
        self.depth -= 1;
        if result.is_err() {
            *cursor = start;
        }

        if memoize
            && !matches!(result, Err(ParseError::NestingTooDeep { .. }))
            && self.memo.try_reserve(1).is_ok()
        {
            let cached = match &result {
                Ok(node) => Ok((node.clone(), *cursor)),
                Err(e) => Err(e.clone()),
            };
            let entry = MemoEntry {
                result: cached,
                furthest: self.furthest,
                unsupported: self.unsupported,
            };
            self.memo.insert((kind, params, start), entry);
        }
        result
    }

    /// Turn an error escaping the start symbol into the one reported.
    fn report(&self, error: ParseError) -> ParseError {
        let error = match error {
            ParseError::NoMatch => self.unexpected(self.furthest),
            ParseError::EndOfInput => self.unexpected(self.tokens.len()),
            other => other,
        };
        match (error, self.unsupported) {
            (ParseError::SyntaxError { location, .. }, Some((feature, at)))
                if at.offset >= location.offset =>
            {
                ParseError::Unsupported {
                    feature,
                    location: at,
                }
            }
            (error, _) => error,
        }
    }

    /// A syntax error for the token at `at`, which has already been
    /// scanned unless it lies past the end of input.
    fn unexpected(&self, at: usize) -> ParseError {
        let location = self.tokens.location_at(&self.source, at);
        if self.tokens.token_at(at).is_none() {
            ParseError::syntax(location, "unexpected end of input")
        } else {
            ParseError::syntax(location, "unexpected token")
        }
    }

    // ─────────────────────────────────────────────────────────────────────
    // Token access
    // ─────────────────────────────────────────────────────────────────────

    /// The token at `cursor`, or `None` at the end of input.
    fn peek(&mut self, cursor: usize) -> ParseResult<Option<&Token>> {
        if self.tokens.is_at_end(&mut self.source, cursor)? {
            return Ok(None);
        }
        self.tokens.peek(&mut self.source, cursor).map(Some)
    }

    fn peek_kind(&mut self, cursor: usize) -> ParseResult<Option<SyntaxKind>> {
        Ok(self.peek(cursor)?.map(|token| token.kind))
    }

    /// Consume the token at `*cursor` if it has `kind`.
    fn eat(&mut self, kind: SyntaxKind, cursor: &mut usize) -> ParseResult<bool> {
        if self.peek_kind(*cursor)? == Some(kind) {
            *cursor += 1;
            return Ok(true);
        }
        Ok(false)
    }

    fn fail_at(&mut self, cursor: usize) {
        self.furthest = self.furthest.max(cursor);
    }

    fn expected(&self, kind: SyntaxKind, cursor: usize) -> ParseError {
        ParseError::syntax(
            self.tokens.location_at(&self.source, cursor),
            format!("expected {kind}"),
        )
    }

    fn check(&mut self, guard: Guard, params: Params, cursor: usize) -> ParseResult<bool> {
        match guard {
            Guard::Always => Ok(true),
            Guard::If(param, value) => Ok(params.get(param) == value),
            Guard::NoLineTerminator => {
                Ok(self.peek(cursor)?.is_none_or(|token| !token.has_newline_before()))
            }
            Guard::NotAhead(sequences) => {
                for sequence in sequences {
                    if self.starts_with(cursor, sequence)? {
                        return Ok(false);
                    }
                }
                Ok(true)
            }
        }
    }

    fn starts_with(&mut self, cursor: usize, kinds: &[SyntaxKind]) -> ParseResult<bool> {
        for (i, &kind) in kinds.iter().enumerate() {
            if self.peek_kind(cursor + i)? != Some(kind) {
                return Ok(false);
            }
        }
        Ok(true)
    }

    // ─────────────────────────────────────────────────────────────────────
    // Rule interpretation
    // ─────────────────────────────────────────────────────────────────────

    fn parse_rule(
        &mut self,
        kind: SyntaxKind,
        params: Params,
        cursor: &mut usize,
    ) -> ParseResult<ParseNode> {
        match grammar::rule(kind) {
            Rule::Token | Rule::Literal => self.parse_token(kind, cursor),
            Rule::Name(name) => self.parse_name(kind, name, params, cursor),
            Rule::OneOf(kinds) => self.parse_one_of(kinds, cursor),
            Rule::Choice(alternatives) => self.parse_choice(kind, alternatives, params, cursor),
            Rule::List {
                elements,
                separator,
                elisions: false,
            } => self.parse_list(kind, elements, separator, params, cursor),
            Rule::List {
                elements,
                separator,
                elisions: true,
            } => self.parse_elision_list(kind, elements, separator, params, cursor),
            Rule::Binary {
                operand,
                operators,
                min_operators,
            } => self.parse_binary(kind, operand, operators, min_operators, params, cursor),
            Rule::Terminator => self.parse_terminator(cursor),
            Rule::Unsupported { feature, leads } => self.parse_unsupported(feature, leads, cursor),
        }
    }

    // ── Terminals ───────────────────────────────────────────────────────

    fn parse_token(&mut self, kind: SyntaxKind, cursor: &mut usize) -> ParseResult<ParseNode> {
        let at = *cursor;
        let Some(token) = self.peek(at)? else {
            self.fail_at(at);
            return Err(ParseError::EndOfInput);
        };
        // A keyword spelled with escapes is not that keyword.
        let escaped = token
            .flags
            .intersects(TokenFlags::UNICODE_ESCAPE | TokenFlags::HEX_ESCAPE);
        let matched = token.kind == kind && !(kind.is_keyword() && escaped);
        if !matched {
            self.fail_at(at);
            return Err(ParseError::NoMatch);
        }
        let leaf = match token.cooked.as_deref() {
            Some(text) => ParseNode::with_text(kind, boxed_copy(text)?),
            None => ParseNode::new(kind),
        };
        *cursor += 1;
        Ok(leaf)
    }

    fn parse_name(
        &mut self,
        kind: SyntaxKind,
        name: NameRule,
        params: Params,
        cursor: &mut usize,
    ) -> ParseResult<ParseNode> {
        let at = *cursor;
        let Some(token) = self.peek(at)? else {
            self.fail_at(at);
            return Err(ParseError::EndOfInput);
        };
        let accepted = match (name, token.kind) {
            (_, SyntaxKind::Identifier) => true,
            (NameRule::IdentifierName, other) => other.is_keyword(),
            (NameRule::Reference, SyntaxKind::Yield) => !params.yield_allowed,
            (NameRule::Reference, SyntaxKind::Await) => !params.await_allowed,
            (NameRule::Reference, other) => other.is_contextual_keyword(),
        };
        if !accepted {
            self.fail_at(at);
            return Err(ParseError::NoMatch);
        }
        let text = match (token.cooked.as_deref(), token.kind.keyword_text()) {
            (Some(cooked), _) => boxed_copy(cooked)?,
            (None, Some(spelling)) => spelling.encode_utf16().collect(),
            (None, None) => Box::default(),
        };
        *cursor += 1;
        Ok(ParseNode::with_text(kind, text))
    }

    /// The leaf takes the kind of the token actually found.
    fn parse_one_of(&mut self, kinds: &[SyntaxKind], cursor: &mut usize) -> ParseResult<ParseNode> {
        let at = *cursor;
        match self.peek_kind(at)? {
            Some(found) if kinds.contains(&found) => {
                *cursor += 1;
                Ok(ParseNode::new(found))
            }
            Some(_) => {
                self.fail_at(at);
                Err(ParseError::NoMatch)
            }
            None => {
                self.fail_at(at);
                Err(ParseError::EndOfInput)
            }
        }
    }

    /// Checked in order: a line break before the next token (left unread,
    /// so a `;` on the next line is an empty statement), `;`, the end of
    /// input, `}`.
    fn parse_terminator(&mut self, cursor: &mut usize) -> ParseResult<ParseNode> {
        let at = *cursor;
        let terminated = match self.peek(at)? {
            Some(token) if token.has_newline_before() => true,
            Some(token) if token.kind == SyntaxKind::Semicolon => {
                *cursor += 1;
                true
            }
            None => true,
            Some(token) => token.kind == SyntaxKind::RightBrace,
        };
        if !terminated {
            self.fail_at(at);
            return Err(ParseError::NoMatch);
        }
        Ok(ParseNode::new(SyntaxKind::StatementTerminator))
    }

    /// Never matches, but remembers where an unimplemented construct began
    /// so that a failed parse can name it.
    fn parse_unsupported(
        &mut self,
        feature: &'static str,
        leads: &[SyntaxKind],
        cursor: &mut usize,
    ) -> ParseResult<ParseNode> {
        if let Some(token) = self.peek(*cursor)?
            && leads.contains(&token.kind)
        {
            trace!(feature, pos = *cursor, "unsupported construct");
            let location = token.location;
            self.note_unsupported(feature, location);
        }
        Err(ParseError::NoMatch)
    }

    /// Keep the furthest unsupported construct; the first one wins a tie.
    fn note_unsupported(&mut self, feature: &'static str, location: Location) {
        if self
            .unsupported
            .is_none_or(|(_, seen)| location.offset > seen.offset)
        {
            self.unsupported = Some((feature, location));
        }
    }

    // ── Nonterminals ────────────────────────────────────────────────────

    fn parse_choice(
        &mut self,
        kind: SyntaxKind,
        alternatives: &'static [Rhs],
        params: Params,
        cursor: &mut usize,
    ) -> ParseResult<ParseNode> {
        let start = *cursor;
        let mut hit_end = false;
        for (alternative, rhs) in alternatives.iter().enumerate() {
            if !self.check(rhs.guard, params, start)? {
                continue;
            }
            match self.parse_sequence(kind, rhs.items, params, cursor) {
                Ok(node) => return Ok(node),
                Err(ParseError::NoMatch) => {}
                // A shorter alternative may still fit before the end.
                Err(ParseError::EndOfInput) => hit_end = true,
                Err(e) => return Err(e),
            }
            *cursor = start;
            trace!(?kind, alternative, pos = start, "backtrack");
        }
        Err(if hit_end {
            ParseError::EndOfInput
        } else {
            ParseError::NoMatch
        })
    }

    fn parse_sequence(
        &mut self,
        kind: SyntaxKind,
        items: &[Item],
        params: Params,
        cursor: &mut usize,
    ) -> ParseResult<ParseNode> {
        let mut node = ParseNode::new(kind);
        let mut committed = false;
        for item in items {
            match self.parse_item(item, params, cursor, &mut node) {
                Ok(()) => committed |= item.cut,
                Err(ParseError::NoMatch) if committed => {
                    return Err(self.expected(item.kind, *cursor));
                }
                Err(e) => return Err(e),
            }
        }
        Ok(node)
    }

    /// Match `item` according to its occurrence and attach what it built.
    fn parse_item(
        &mut self,
        item: &Item,
        params: Params,
        cursor: &mut usize,
        parent: &mut ParseNode,
    ) -> ParseResult<()> {
        let inner = item.adjust.apply(params);
        match item.occurs {
            Occurs::One => {
                if !self.check(item.guard, params, *cursor)? {
                    self.fail_at(*cursor);
                    return Err(ParseError::NoMatch);
                }
                let child = self.parse(item.kind, inner, cursor)?;
                attach(item, child, parent)
            }
            Occurs::Optional => {
                if self.tokens.is_at_end(&mut self.source, *cursor)?
                    || !self.check(item.guard, params, *cursor)?
                {
                    return Ok(());
                }
                match self.parse(item.kind, inner, cursor) {
                    Ok(child) => attach(item, child, parent),
                    Err(ParseError::NoMatch) => Ok(()),
                    Err(e) => Err(e),
                }
            }
            Occurs::Many | Occurs::Many1 => {
                let mut count = 0usize;
                loop {
                    if self.tokens.is_at_end(&mut self.source, *cursor)?
                        || !self.check(item.guard, params, *cursor)?
                    {
                        break;
                    }
                    let before = *cursor;
                    match self.parse(item.kind, inner, cursor) {
                        Ok(child) => attach(item, child, parent)?,
                        Err(ParseError::NoMatch) => break,
                        Err(e) => return Err(e),
                    }
                    count += 1;
                    if *cursor == before {
                        break;
                    }
                }
                if item.occurs == Occurs::Many1 && count == 0 {
                    return Err(ParseError::NoMatch);
                }
                Ok(())
            }
        }
    }

    /// Try each element form in order.
    fn parse_element(
        &mut self,
        elements: &[Item],
        params: Params,
        cursor: &mut usize,
        parent: &mut ParseNode,
    ) -> ParseResult<()> {
        let mut hit_end = false;
        for element in elements {
            match self.parse_item(element, params, cursor, parent) {
                Ok(()) => return Ok(()),
                Err(ParseError::NoMatch) => {}
                Err(ParseError::EndOfInput) => hit_end = true,
                Err(e) => return Err(e),
            }
        }
        Err(if hit_end {
            ParseError::EndOfInput
        } else {
            ParseError::NoMatch
        })
    }

    fn parse_list(
        &mut self,
        kind: SyntaxKind,
        elements: &[Item],
        separator: SyntaxKind,
        params: Params,
        cursor: &mut usize,
    ) -> ParseResult<ParseNode> {
        let mut node = ParseNode::new(kind);
        self.parse_element(elements, params, cursor, &mut node)?;
        loop {
            let before_separator = *cursor;
            if !self.eat(separator, cursor)? {
                break;
            }
            match self.parse_element(elements, params, cursor, &mut node) {
                Ok(()) => {}
                // Leave the separator for the caller (`f(a,)`, `(a, ...b)`).
                Err(ParseError::NoMatch) => {
                    *cursor = before_separator;
                    break;
                }
                Err(e) => return Err(e),
            }
        }
        Ok(node)
    }

    fn parse_elision_list(
        &mut self,
        kind: SyntaxKind,
        elements: &[Item],
        separator: SyntaxKind,
        params: Params,
        cursor: &mut usize,
    ) -> ParseResult<ParseNode> {
        let mut node = ParseNode::new(kind);
        loop {
            if self.eat(separator, cursor)? {
                node.push(ParseNode::new(SyntaxKind::Elision))?;
                continue;
            }
            match self.parse_element(elements, params, cursor, &mut node) {
                Ok(()) => {}
                Err(ParseError::NoMatch) => break,
                Err(e) => return Err(e),
            }
            if !self.eat(separator, cursor)? {
                break;
            }
        }
        Ok(node)
    }

    fn parse_binary(
        &mut self,
        kind: SyntaxKind,
        operand: Item,
        operators: &[Operator],
        min_operators: usize,
        params: Params,
        cursor: &mut usize,
    ) -> ParseResult<ParseNode> {
        let mut node = ParseNode::new(kind);
        self.parse_item(&operand, params, cursor, &mut node)?;
        let mut count = 0usize;
        while let Some(operator) = self.match_operator(operators, params, *cursor)? {
            *cursor += 1;
            node.push(ParseNode::new(operator))?;
            match self.parse_item(&operand, params, cursor, &mut node) {
                Ok(()) => count += 1,
                Err(ParseError::NoMatch) => return Err(self.expected(operand.kind, *cursor)),
                Err(e) => return Err(e),
            }
        }
        if count < min_operators {
            return Err(ParseError::NoMatch);
        }
        Ok(node)
    }

    fn match_operator(
        &mut self,
        operators: &[Operator],
        params: Params,
        cursor: usize,
    ) -> ParseResult<Option<SyntaxKind>> {
        let Some(found) = self.peek_kind(cursor)? else {
            return Ok(None);
        };
        for operator in operators {
            if operator.kind == found && self.check(operator.guard, params, cursor)? {
                return Ok(Some(found));
            }
        }
        Ok(None)
    }
}

fn attach(item: &Item, child: ParseNode, parent: &mut ParseNode) -> ParseResult<()> {
    if !item.keep {
        return Ok(());
    }
    if grammar::is_inline(child.kind()) {
        parent.splice(child)
    } else {
        parent.push(child)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::syntax_kind::SyntaxKind as K;

    fn parse(src: &str) -> ParseResult<ParseNode> {
        let mut parser = Parser::from_text(src);
        parser.parse_script()?;
        Ok(parser.into_root().expect("root after a successful parse"))
    }

    fn kinds_of(node: &ParseNode) -> Vec<SyntaxKind> {
        node.children().iter().map(ParseNode::kind).collect()
    }

    fn count(node: &ParseNode, kind: SyntaxKind) -> usize {
        node.descendants_of(kind).count()
    }

    // ── Whole-script scenarios ──────────────────────────────────────────

    #[test]
    fn test_var_statement_tree() {
        let root = parse("var a;").unwrap();
        let path: Vec<_> = root.walk().map(ParseNode::kind).collect();
        assert_eq!(
            path,
            [
                K::Script,
                K::ScriptBody,
                K::StatementList,
                K::StatementListItem,
                K::Statement,
                K::VariableStatement,
                K::VariableDeclarationList,
                K::VariableDeclaration,
                K::BindingIdentifier,
            ]
        );
        let name = root.find(K::BindingIdentifier).unwrap();
        assert_eq!(name.cooked_text().as_deref(), Some("a"));
    }

    #[test]
    fn test_declaration_list_with_initializer() {
        let root = parse("var a = 1, b;").unwrap();
        let list = root.find(K::VariableDeclarationList).unwrap();
        assert_eq!(
            kinds_of(list),
            [K::VariableDeclaration, K::VariableDeclaration]
        );
        let first = list.child(0).unwrap();
        assert_eq!(kinds_of(first), [K::BindingIdentifier, K::Initializer]);
        let number = first.find(K::NumericLiteral).unwrap();
        assert_eq!(number.cooked_text().as_deref(), Some("1"));
        let second = list.child(1).unwrap();
        assert_eq!(kinds_of(second), [K::BindingIdentifier]);
        assert_eq!(second.child(0).unwrap().cooked_text().as_deref(), Some("b"));
    }

    #[test]
    fn test_empty_block() {
        let root = parse("{}").unwrap();
        let path: Vec<_> = root.walk().map(ParseNode::kind).collect();
        assert_eq!(
            path,
            [
                K::Script,
                K::ScriptBody,
                K::StatementList,
                K::StatementListItem,
                K::Statement,
                K::BlockStatement,
                K::Block,
            ]
        );
    }

    #[test]
    fn test_raw_newline_in_string_is_invalid_token() {
        let err = parse("\"hello\n\"").unwrap_err();
        assert!(matches!(err, ParseError::InvalidToken { .. }), "{err:?}");
    }

    #[test]
    fn test_line_continuation_in_string() {
        let root = parse("\"hello\\\n\"").unwrap();
        let string = root.find(K::StringLiteral).unwrap();
        assert_eq!(string.cooked_text().as_deref(), Some("hello"));
        assert_eq!(count(&root, K::ExpressionStatement), 1);
    }

    #[test]
    fn test_comment_only_script_has_empty_statement_list() {
        let root = parse("// comment").unwrap();
        let list = root.find(K::StatementList).unwrap();
        assert!(list.is_leaf());
        assert_eq!(root.len_subtree(), 3);
    }

    #[test]
    fn test_var_without_binding_is_syntax_error() {
        let mut parser = Parser::from_text("var ;");
        let err = parser.parse_script().unwrap_err();
        match err {
            ParseError::SyntaxError { location, .. } => {
                assert_eq!((location.row, location.column), (0, 4));
            }
            other => panic!("expected a syntax error, got {other:?}"),
        }
        assert!(parser.root().is_none());
    }

    #[test]
    fn test_empty_script() {
        let root = parse("").unwrap();
        assert_eq!(root.len_subtree(), 3);
    }

    // ── Statements ──────────────────────────────────────────────────────

    #[test]
    fn test_automatic_semicolon_insertion() {
        let root = parse("a\nb\nc").unwrap();
        assert_eq!(count(&root, K::ExpressionStatement), 3);
        assert!(parse("a b").is_err());
        assert!(parse("{ a }").is_ok());
    }

    /// The kind under each `Statement`/`Declaration` of a statement list.
    fn statement_kinds(list: &ParseNode) -> Vec<SyntaxKind> {
        list.children()
            .iter()
            .filter_map(|item| item.child(0)?.child(0))
            .map(ParseNode::kind)
            .collect()
    }

    #[test]
    fn test_line_break_before_semicolon_ends_statement() {
        let root = parse("var a = 1\n;").unwrap();
        let list = root.find(K::StatementList).unwrap();
        assert_eq!(
            statement_kinds(list),
            [K::VariableStatement, K::EmptyStatement]
        );

        let root = parse("var a = 1;").unwrap();
        let list = root.find(K::StatementList).unwrap();
        assert_eq!(statement_kinds(list), [K::VariableStatement]);

        let root = parse("a\n;").unwrap();
        let list = root.find(K::StatementList).unwrap();
        assert_eq!(
            statement_kinds(list),
            [K::ExpressionStatement, K::EmptyStatement]
        );

        let root = parse("function f() { return\n; }").unwrap();
        let body = root.find(K::FunctionBody).unwrap();
        let list = body.find(K::StatementList).unwrap();
        assert_eq!(
            statement_kinds(list),
            [K::ReturnStatement, K::EmptyStatement]
        );

        let root = parse("while (a) { break\n; }").unwrap();
        let block = root.find(K::Block).unwrap();
        let list = block.find(K::StatementList).unwrap();
        assert_eq!(
            statement_kinds(list),
            [K::BreakStatement, K::EmptyStatement]
        );
    }

    #[test]
    fn test_do_while_semicolon_placement() {
        let root = parse("do {} while (x);").unwrap();
        let list = root.find(K::StatementList).unwrap();
        assert_eq!(statement_kinds(list), [K::BreakableStatement]);

        let root = parse("do {} while (x)\n;").unwrap();
        let list = root.find(K::StatementList).unwrap();
        assert_eq!(
            statement_kinds(list),
            [K::BreakableStatement, K::EmptyStatement]
        );

        let root = parse("do {} while (x) y").unwrap();
        let list = root.find(K::StatementList).unwrap();
        assert_eq!(
            statement_kinds(list),
            [K::BreakableStatement, K::ExpressionStatement]
        );

        // The body ends at the line break, leaving `;` where `while` belongs.
        assert!(matches!(
            parse("do x++\n; while (x)"),
            Err(ParseError::SyntaxError { .. })
        ));
    }

    #[test]
    fn test_if_else_splices_else_clause() {
        let root = parse("if (a) b; else c;").unwrap();
        let stmt = root.find(K::IfStatement).unwrap();
        assert_eq!(kinds_of(stmt), [K::Expression, K::Statement, K::Statement]);
        assert_eq!(count(&root, K::ElseClause), 0);
    }

    #[test]
    fn test_if_without_paren_is_committed_error() {
        let err = parse("if a) b;").unwrap_err();
        assert!(
            matches!(&err, ParseError::SyntaxError { message, .. } if message.contains("LeftParen")),
            "{err:?}"
        );
    }

    #[test]
    fn test_for_statement_forms() {
        let root = parse("for (var i = 0; i < n; i++) {}").unwrap();
        let stmt = root.find(K::ForStatement).unwrap();
        assert_eq!(
            kinds_of(stmt),
            [
                K::Var,
                K::VariableDeclarationList,
                K::Semicolon,
                K::Expression,
                K::Semicolon,
                K::Expression,
                K::Statement,
            ]
        );

        let root = parse("for (;;) break;").unwrap();
        let stmt = root.find(K::ForStatement).unwrap();
        assert_eq!(kinds_of(stmt), [K::Semicolon, K::Semicolon, K::Statement]);

        let root = parse("for (let k in o) ; for (const v of xs) ;").unwrap();
        assert_eq!(count(&root, K::ForInOfStatement), 2);
        assert_eq!(count(&root, K::In), 1);
        assert_eq!(count(&root, K::Of), 1);
    }

    #[test]
    fn test_while_do_while_switch() {
        let root = parse("while (x) x--; do x++; while (x < 5)").unwrap();
        assert_eq!(count(&root, K::WhileStatement), 1);
        assert_eq!(count(&root, K::DoWhileStatement), 1);

        let root = parse("switch (x) { case 1: a; break; default: b; case 2: }").unwrap();
        let block = root.find(K::CaseBlock).unwrap();
        assert_eq!(
            kinds_of(block),
            [K::CaseClause, K::DefaultClause, K::CaseClause]
        );
    }

    #[test]
    fn test_try_catch_finally_and_labels() {
        let root = parse("try {} catch (e) {} finally {}").unwrap();
        let stmt = root.find(K::TryStatement).unwrap();
        assert_eq!(kinds_of(stmt), [K::Block, K::CatchClause, K::FinallyClause]);
        assert!(parse("try {} finally {}").is_ok());
        assert!(parse("try {}").is_err());

        let root = parse("outer: for (;;) { continue outer; }").unwrap();
        assert_eq!(count(&root, K::LabelledStatement), 1);
        let label = root.find(K::LabelIdentifier).unwrap();
        assert_eq!(label.cooked_text().as_deref(), Some("outer"));
    }

    #[test]
    fn test_return_only_inside_functions() {
        assert!(parse("return 1;").is_err());
        let root = parse("function f(a, b) { return a + b }").unwrap();
        assert_eq!(count(&root, K::FunctionDeclaration), 1);
        assert_eq!(count(&root, K::FormalParameter), 2);
        assert_eq!(count(&root, K::ReturnStatement), 1);
    }

    #[test]
    fn test_return_line_break_ends_statement() {
        let root = parse("function f() { return\n1 }").unwrap();
        let ret = root.find(K::ReturnStatement).unwrap();
        assert!(ret.is_leaf());
        assert_eq!(count(&root, K::ExpressionStatement), 1);
    }

    #[test]
    fn test_lexical_declarations_and_contextual_keywords() {
        let root = parse("let x = 1; const y = 2;").unwrap();
        let decls: Vec<_> = root
            .descendants_of(K::LexicalDeclaration)
            .map(|d| d.child(0).unwrap().kind())
            .collect();
        assert_eq!(decls, [K::Let, K::Const]);

        let root = parse("let = 1; var of = 2, async = 3, yield = 4;").unwrap();
        assert_eq!(count(&root, K::LexicalDeclaration), 0);
        assert_eq!(count(&root, K::BindingIdentifier), 3);
        assert!(parse("var if = 1;").is_err());
    }

    // ── Expressions ─────────────────────────────────────────────────────

    #[test]
    fn test_binary_precedence_is_flat_per_level() {
        let root = parse("x = b + c * d;").unwrap();
        let additive = root.find(K::AdditiveExpression).unwrap();
        assert_eq!(
            kinds_of(additive),
            [K::MultiplicativeExpression, K::Plus, K::MultiplicativeExpression]
        );
        let product = additive.child(2).unwrap();
        assert_eq!(
            kinds_of(product),
            [
                K::ExponentiationExpression,
                K::Star,
                K::ExponentiationExpression
            ]
        );
        let assignment = root.find(K::AssignmentExpression).unwrap();
        assert_eq!(
            kinds_of(assignment),
            [
                K::LeftHandSideExpression,
                K::Equal,
                K::AssignmentExpression
            ]
        );
    }

    #[test]
    fn test_left_associative_chain() {
        let root = parse("a - b - c;").unwrap();
        let additive = root.find(K::AdditiveExpression).unwrap();
        assert_eq!(additive.children().len(), 5);
    }

    #[test]
    fn test_exponentiation_is_right_associative() {
        let root = parse("a ** b ** c;").unwrap();
        assert_eq!(count(&root, K::StarStar), 2);
        let outer = root.find(K::ExponentiationExpression).unwrap();
        assert_eq!(
            kinds_of(outer),
            [
                K::UpdateExpression,
                K::StarStar,
                K::ExponentiationExpression
            ]
        );
        assert!(parse("-a ** b;").is_err());
    }

    #[test]
    fn test_coalesce_does_not_mix_with_logical_or() {
        assert!(parse("a ?? b ?? c;").is_ok());
        assert!(parse("(a || b) ?? c;").is_ok());
        assert!(parse("a ?? b || c;").is_err());
    }

    #[test]
    fn test_conditional_and_in_operator() {
        let root = parse("x = a ? b : c;").unwrap();
        let cond = root.find(K::ConditionalExpression).unwrap();
        assert_eq!(cond.children().len(), 3);
        assert_eq!(count(&parse("a in b;").unwrap(), K::In), 1);
    }

    #[test]
    fn test_calls_members_and_new() {
        let root = parse("a.b[c](d, ...e).f;").unwrap();
        let call = root.find(K::CallExpression).unwrap();
        assert_eq!(
            kinds_of(call),
            [K::MemberExpression, K::Arguments, K::MemberAccess]
        );
        assert_eq!(count(&root, K::SpreadElement), 1);

        let root = parse("new Foo(1).bar; new Foo;").unwrap();
        assert_eq!(count(&root, K::New), 2);
        assert!(parse("f(a,);").is_ok());
        assert!(parse("f(,);").is_err());
    }

    #[test]
    fn test_optional_chain() {
        let root = parse("a?.b.c()?.[d];").unwrap();
        let optional = root.find(K::OptionalExpression).unwrap();
        assert_eq!(
            kinds_of(optional),
            [K::MemberExpression, K::OptionalChain, K::OptionalChain]
        );
    }

    #[test]
    fn test_update_expressions() {
        let root = parse("a++; --b;").unwrap();
        assert_eq!(count(&root, K::PlusPlus), 1);
        assert_eq!(count(&root, K::MinusMinus), 1);
        let root = parse("a\n++b").unwrap();
        assert_eq!(count(&root, K::ExpressionStatement), 2);
    }

    #[test]
    fn test_array_literal_elisions() {
        let root = parse("x = [1, , 2, ];").unwrap();
        let list = root.find(K::ElementList).unwrap();
        assert_eq!(
            kinds_of(list),
            [K::AssignmentExpression, K::Elision, K::AssignmentExpression]
        );
        let root = parse("x = [,];").unwrap();
        assert_eq!(kinds_of(root.find(K::ElementList).unwrap()), [K::Elision]);
        let root = parse("x = [];").unwrap();
        assert!(root.find(K::ElementList).unwrap().is_leaf());
    }

    #[test]
    fn test_object_literal_properties() {
        let root = parse("x = { a: 1, 'b': 2, [c]: 3, d() {}, get e() { return 1 }, set e(v) {}, f, ...g };")
            .unwrap();
        assert_eq!(count(&root, K::PropertyDefinition), 8);
        assert_eq!(count(&root, K::MethodDefinition), 3);
        assert_eq!(count(&root, K::ComputedPropertyName), 1);
        assert_eq!(count(&root, K::Get), 1);
        assert_eq!(count(&root, K::Set), 1);
        assert!(parse("x = {};").is_ok());
        assert!(parse("x = { a: 1, };").is_ok());
    }

    #[test]
    fn test_keyword_property_names() {
        let root = parse("a.if = { var: 1 }.class;").unwrap();
        let names: Vec<_> = root
            .descendants_of(K::IdentifierName)
            .filter_map(ParseNode::cooked_text)
            .collect();
        assert_eq!(names, ["if", "var", "class"]);
    }

    #[test]
    fn test_arrow_functions() {
        let root = parse("const f = (a, b) => a + b;").unwrap();
        assert_eq!(count(&root, K::ArrowFunction), 1);
        assert_eq!(count(&root, K::FormalParameter), 2);

        let root = parse("g = x => { return x };").unwrap();
        let body = root.find(K::ConciseBody).unwrap();
        assert_eq!(kinds_of(body), [K::FunctionBody]);
        assert_eq!(count(&root, K::ReturnStatement), 1);

        assert!(parse("h = () => ({});").is_ok());
        assert!(parse("h = (...rest) => rest;").is_ok());
        assert!(parse("h = a\n=> a;").is_err());
    }

    #[test]
    fn test_parenthesized_is_not_arrow() {
        let root = parse("x = (a, b);").unwrap();
        assert_eq!(count(&root, K::ArrowFunction), 0);
        assert_eq!(count(&root, K::ParenthesizedExpression), 1);
    }

    #[test]
    fn test_generators_and_yield() {
        let root = parse("function* g() { yield 1; yield* h(); yield }").unwrap();
        assert_eq!(count(&root, K::GeneratorDeclaration), 1);
        assert_eq!(count(&root, K::YieldExpression), 3);
        assert_eq!(count(&root, K::Star), 1);

        let root = parse("function f() { yield = 1 }").unwrap();
        assert_eq!(count(&root, K::YieldExpression), 0);
    }

    #[test]
    fn test_function_expressions() {
        let root = parse("x = function named(a = 1) {}; y = function* () {};").unwrap();
        assert_eq!(count(&root, K::FunctionExpression), 1);
        assert_eq!(count(&root, K::GeneratorExpression), 1);
        assert_eq!(count(&root, K::Initializer), 1);
    }

    #[test]
    fn test_unary_operators() {
        let root = parse("!typeof void delete -+~a;").unwrap();
        assert_eq!(count(&root, K::UnaryExpression), 8);
    }

    // ── Unsupported constructs ──────────────────────────────────────────

    fn unsupported_feature(src: &str) -> &'static str {
        match parse(src).unwrap_err() {
            ParseError::Unsupported { feature, .. } => feature,
            other => panic!("expected unsupported for {src:?}, got {other:?}"),
        }
    }

    #[test]
    fn test_unsupported_constructs_are_named() {
        assert_eq!(unsupported_feature("class A {}"), "class");
        assert_eq!(unsupported_feature("var {a} = b;"), "binding pattern");
        assert_eq!(unsupported_feature("let [a] = b;"), "binding pattern");
        assert_eq!(unsupported_feature("x = /a/;"), "regular expression literal");
        assert_eq!(unsupported_feature("import x from 'y';"), "module item");
        assert_eq!(unsupported_feature("import('y');"), "import call");
    }

    #[test]
    fn test_patterns_do_not_block_parenthesized_literals() {
        assert!(parse("x = ({a: 1});").is_ok());
        assert!(parse("f(([1, 2]));").is_ok());
    }

    #[test]
    fn test_module_goal_is_unsupported() {
        let mut parser = Parser::from_text("export default 1;");
        assert!(matches!(
            parser.parse_module(),
            Err(ParseError::Unsupported {
                feature: "module goal",
                ..
            })
        ));
    }

    // ── Driver mechanics ────────────────────────────────────────────────

    #[test]
    fn test_unexpected_end_of_input() {
        for src in ["var a = ", "if (a", "f(a,", "x = [1, 2"] {
            match parse(src).unwrap_err() {
                ParseError::SyntaxError { message, .. } => {
                    assert_eq!(message, "unexpected end of input", "{src:?}");
                }
                other => panic!("{src:?}: {other:?}"),
            }
        }
    }

    #[test]
    fn test_leftover_token_location() {
        match parse("a = 1;\n)").unwrap_err() {
            ParseError::SyntaxError { location, .. } => {
                assert_eq!((location.row, location.column), (1, 0));
            }
            other => panic!("{other:?}"),
        }
    }

    #[test]
    fn test_failed_production_restores_cursor() {
        let mut parser = Parser::from_text("a + b )");
        let mut cursor = 0;
        assert_eq!(
            parser.parse(K::VariableStatement, Params::default(), &mut cursor),
            Err(ParseError::NoMatch)
        );
        assert_eq!(cursor, 0);

        let params = Params {
            in_allowed: true,
            ..Params::default()
        };
        let expr = parser.parse(K::Expression, params, &mut cursor).unwrap();
        assert_eq!(expr.kind(), K::Expression);
        assert_eq!(cursor, 3);
        assert_eq!(parser.tokens_scanned(), 4);
    }

    #[test]
    fn test_nesting_limit() {
        let src = format!("{}a{}", "(".repeat(40), ")".repeat(40));
        let mut parser = Parser::from_text(&src).with_options(ParseOptions {
            max_depth: 64,
            ..ParseOptions::default()
        });
        assert_eq!(
            parser.parse_script().unwrap_err(),
            ParseError::NestingTooDeep { limit: 64 }
        );
        assert!(parse("((((a))));").is_ok());
    }

    #[test]
    fn test_memoization_does_not_change_tree() {
        let src = "var f = function (a) { return a.b(c)[d] ? new X(1) : (y) => y ** 2 }; f(1)(2)?.z;";
        let with_memo = parse(src).unwrap();
        let mut parser = Parser::from_text(src).with_options(ParseOptions {
            memoize: false,
            ..ParseOptions::default()
        });
        parser.parse_script().unwrap();
        assert_eq!(parser.root(), Some(&with_memo));
    }

    #[test]
    fn test_memoization_does_not_change_errors() {
        for src in [
            "x = a.b(c) +",
            "f(a)(b) c",
            "a ?? b || c",
            "x = (a, b",
            "y = [a.b, c.d",
            "x = a.b.c /d/;",
            "q = (a.b, {c}) => 1 +",
        ] {
            let with_memo = parse(src).unwrap_err();
            let mut parser = Parser::from_text(src).with_options(ParseOptions {
                memoize: false,
                ..ParseOptions::default()
            });
            let without_memo = parser.parse_script().unwrap_err();
            assert_eq!(with_memo, without_memo, "{src:?}");
        }
    }

    #[test]
    fn test_reparse_replaces_tree() {
        let mut parser = Parser::from_text("a;");
        let first = parser.parse_script().unwrap().clone();
        let second = parser.parse_script().unwrap();
        assert_eq!(&first, second);
    }

    /// Replays a fixed token list.
    struct Canned(std::vec::IntoIter<Token>);

    impl TokenSource for Canned {
        fn next_token(&mut self) -> ParseResult<Token> {
            self.0.next().ok_or(ParseError::EndOfInput)
        }

        fn location(&self) -> Location {
            Location::default()
        }
    }

    fn canned(tokens: &[(SyntaxKind, TokenFlags)]) -> Parser<Canned> {
        let tokens: Vec<Token> = tokens
            .iter()
            .enumerate()
            .map(|(i, &(kind, flags))| Token {
                kind,
                location: Location {
                    row: 0,
                    column: i as u32,
                    offset: i,
                },
                raw_length: 1,
                flags,
                cooked: None,
            })
            .collect();
        Parser::with_source(Canned(tokens.into_iter()))
    }

    #[test]
    fn test_escaped_keyword_is_not_a_keyword() {
        let plain = [
            (K::Debugger, TokenFlags::empty()),
            (K::Semicolon, TokenFlags::empty()),
        ];
        assert!(canned(&plain).parse_script().is_ok());

        for escape in [TokenFlags::UNICODE_ESCAPE, TokenFlags::HEX_ESCAPE] {
            let escaped = [(K::Debugger, escape), (K::Semicolon, TokenFlags::empty())];
            assert!(canned(&escaped).parse_script().is_err(), "{escape:?}");
        }
    }

    #[test]
    fn test_parser_from_utf16() {
        let units: Vec<u16> = "var \u{e9} = 1;".encode_utf16().collect();
        let mut parser = Parser::new(units);
        let root = parser.parse_script().unwrap();
        let name = root.find(K::BindingIdentifier).unwrap();
        assert_eq!(name.cooked_text().as_deref(), Some("\u{e9}"));
    }
}
