//! `esgrove_core` — a scanner and concrete-syntax-tree parser for
//! ECMAScript scripts.
//!
//! # Crate layout
//!
//! - [`parser`] — lexer, grammar tables and the backtracking parser.
//! - [`error`] — the single error type shared by scanner and parser.
//!
//! # Example
//!
//! ```
//! use esgrove_core::parser::{Parser, SyntaxKind};
//!
//! let mut parser = Parser::from_text("if (ready) go();");
//! let root = parser.parse_script().unwrap();
//! assert!(root.find(SyntaxKind::IfStatement).is_some());
//! ```

/// Scanner and parser errors.
pub mod error;
/// Scanning, grammar and parsing.
pub mod parser;
