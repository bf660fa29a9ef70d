//! Concrete syntax tree nodes.
//!
//! A [`ParseNode`] is shaped like the grammar production that built it: its
//! children are the kept items of the matched right-hand side, in source
//! order.  Leaves built from identifiers, string literals and numeric
//! literals carry their cooked text.

use std::fmt;

use super::syntax_kind::SyntaxKind;
use crate::error::ParseResult;

/// One node of the concrete syntax tree.
///
/// A node exclusively owns its children; dropping it drops the subtree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseNode {
    kind: SyntaxKind,
    cooked: Option<Box<[u16]>>,
    children: Vec<ParseNode>,
}

impl ParseNode {
    /// Create a node with no children and no text.
    pub fn new(kind: SyntaxKind) -> Self {
        Self {
            kind,
            cooked: None,
            children: Vec::new(),
        }
    }

    /// Create a leaf carrying cooked text.
    pub fn with_text(kind: SyntaxKind, cooked: Box<[u16]>) -> Self {
        Self {
            kind,
            cooked: Some(cooked),
            children: Vec::new(),
        }
    }

    pub fn kind(&self) -> SyntaxKind {
        self.kind
    }

    /// Children in grammar order.
    pub fn children(&self) -> &[ParseNode] {
        &self.children
    }

    pub fn child(&self, index: usize) -> Option<&ParseNode> {
        self.children.get(index)
    }

    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }

    /// The cooked UTF-16 text of an identifier, string or numeric leaf.
    pub fn cooked(&self) -> Option<&[u16]> {
        self.cooked.as_deref()
    }

    /// The cooked text decoded lossily to a `String`.
    pub fn cooked_text(&self) -> Option<String> {
        self.cooked().map(String::from_utf16_lossy)
    }

    /// Append a child, failing with `OutOfMemory` if the list cannot grow.
    pub(crate) fn push(&mut self, child: ParseNode) -> ParseResult<()> {
        self.children.try_reserve(1)?;
        self.children.push(child);
        Ok(())
    }

    /// Move every child of `other` onto the end of this node's children.
    pub(crate) fn splice(&mut self, other: ParseNode) -> ParseResult<()> {
        self.children.try_reserve(other.children.len())?;
        self.children.extend(other.children);
        Ok(())
    }

    /// Pre-order iterator over this node and all its descendants.
    pub fn walk(&self) -> Walk<'_> {
        Walk { stack: vec![self] }
    }

    /// The first node of `kind` in pre-order, this node included.
    pub fn find(&self, kind: SyntaxKind) -> Option<&ParseNode> {
        self.walk().find(|node| node.kind == kind)
    }

    /// Every node of `kind` in pre-order, this node included.
    pub fn descendants_of(&self, kind: SyntaxKind) -> impl Iterator<Item = &ParseNode> {
        self.walk().filter(move |node| node.kind == kind)
    }

    /// Number of nodes in the subtree rooted here.
    pub fn len_subtree(&self) -> usize {
        self.walk().count()
    }

    fn fmt_outline(&self, f: &mut fmt::Formatter<'_>, depth: usize) -> fmt::Result {
        write!(f, "{:indent$}{}", "", self.kind, indent = depth * 2)?;
        if let Some(text) = self.cooked_text() {
            write!(f, " {text:?}")?;
        }
        writeln!(f)?;
        self.children
            .iter()
            .try_for_each(|child| child.fmt_outline(f, depth + 1))
    }
}

impl fmt::Display for ParseNode {
    /// Indented outline, one node per line.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.fmt_outline(f, 0)
    }
}

/// Iterator returned by [`ParseNode::walk`].
pub struct Walk<'a> {
    stack: Vec<&'a ParseNode>,
}

impl<'a> Iterator for Walk<'a> {
    type Item = &'a ParseNode;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.stack.pop()?;
        self.stack.extend(node.children.iter().rev());
        Some(node)
    }
}
