//! ECMAScript scanning and parsing.
//!
//! - [`scanner`] — UTF-16 lexer producing [`scanner::Token`]s on demand.
//! - [`token_buffer`] — append-only lookahead buffer the parser indexes into.
//! - [`syntax_kind`] — the shared token and node kind enumeration.
//! - [`grammar`] — the grammar as a table of [`grammar::Rule`]s.
//! - [`driver`] — the backtracking [`Parser`] that interprets the table.
//! - [`cst`] — the concrete syntax tree it builds.

/// Concrete syntax tree nodes.
pub mod cst;
/// Backtracking recursive-descent parser.
pub mod driver;
/// Grammar rules as static data.
pub mod grammar;
/// Grammar parameters and their adjustment per item.
pub mod params;
/// ECMAScript lexer over UTF-16 source.
pub mod scanner;
/// Token and node kinds.
pub mod syntax_kind;
/// Token lookahead buffer.
pub mod token_buffer;
/// Character classification.
pub mod unicode;

pub use cst::ParseNode;
pub use driver::{ParseOptions, Parser};
pub use params::Params;
pub use scanner::{Location, Scanner, Token};
pub use syntax_kind::SyntaxKind;
