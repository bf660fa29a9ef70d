//! The grammar as data.
//!
//! Every nonterminal [`SyntaxKind`] maps to a [`Rule`] through [`rule`]; the
//! driver in [`super::driver`] interprets rules and never special-cases a
//! production.  Right-hand sides are tried in the order listed here, so
//! longer alternatives that share a prefix with shorter ones come first.

use super::params::{Adjust, Param};
use super::syntax_kind::SyntaxKind;
use super::syntax_kind::SyntaxKind as K;

// ─────────────────────────────────────────────────────────────────────────────
// Rule vocabulary
// ─────────────────────────────────────────────────────────────────────────────

/// How often an item may match.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Occurs {
    One,
    Optional,
    Many,
    Many1,
}

/// A condition checked before an item or right-hand side is attempted.
#[derive(Debug, Clone, Copy)]
pub enum Guard {
    Always,
    /// The named parameter must have the given value.
    If(Param, bool),
    /// `[no LineTerminator here]` before the next token.
    NoLineTerminator,
    /// None of the token sequences may start at the cursor.
    NotAhead(&'static [&'static [SyntaxKind]]),
}

/// One element of a right-hand side.
#[derive(Debug, Clone, Copy)]
pub struct Item {
    pub kind: SyntaxKind,
    pub adjust: Adjust,
    pub occurs: Occurs,
    /// Attach the matched node to the parent; punctuation is dropped.
    pub keep: bool,
    pub guard: Guard,
    /// Once this item matches, a later `NoMatch` in the same right-hand side
    /// is a syntax error.
    pub cut: bool,
}

/// A kept item.
pub const fn node(kind: SyntaxKind) -> Item {
    Item {
        kind,
        adjust: Adjust::KEEP,
        occurs: Occurs::One,
        keep: true,
        guard: Guard::Always,
        cut: false,
    }
}

/// A dropped item, for punctuation and structural keywords.
pub const fn punct(kind: SyntaxKind) -> Item {
    Item {
        keep: false,
        ..node(kind)
    }
}

impl Item {
    pub const fn opt(self) -> Self {
        Item {
            occurs: Occurs::Optional,
            ..self
        }
    }

    pub const fn many(self) -> Self {
        Item {
            occurs: Occurs::Many,
            ..self
        }
    }

    pub const fn many1(self) -> Self {
        Item {
            occurs: Occurs::Many1,
            ..self
        }
    }

    pub const fn cut(self) -> Self {
        Item { cut: true, ..self }
    }

    pub const fn with(self, adjust: Adjust) -> Self {
        Item { adjust, ..self }
    }

    pub const fn when(self, guard: Guard) -> Self {
        Item { guard, ..self }
    }
}

/// One alternative of a [`Rule::Choice`].
#[derive(Debug, Clone, Copy)]
pub struct Rhs {
    pub guard: Guard,
    pub items: &'static [Item],
}

pub const fn seq(items: &'static [Item]) -> Rhs {
    Rhs {
        guard: Guard::Always,
        items,
    }
}

impl Rhs {
    pub const fn when(self, guard: Guard) -> Self {
        Rhs { guard, ..self }
    }
}

/// An operator of a [`Rule::Binary`] level.
#[derive(Debug, Clone, Copy)]
pub struct Operator {
    pub kind: SyntaxKind,
    pub guard: Guard,
}

const fn op(kind: SyntaxKind) -> Operator {
    Operator {
        kind,
        guard: Guard::Always,
    }
}

/// Name productions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NameRule {
    /// Any identifier or keyword.
    IdentifierName,
    /// An identifier or a keyword usable as a binding in script code.
    Reference,
}

/// How a kind is recognised.
#[derive(Debug, Clone, Copy)]
pub enum Rule {
    /// One token of exactly this kind.
    Token,
    Name(NameRule),
    /// A literal token; the leaf keeps its cooked text.
    Literal,
    /// One token of any listed kind; the leaf takes the token's kind.
    OneOf(&'static [SyntaxKind]),
    /// Ordered alternation.
    Choice(&'static [Rhs]),
    /// `element (separator element)*`, separators dropped.  With `elisions`
    /// an empty slot becomes an [`SyntaxKind::Elision`] leaf and a trailing
    /// separator is consumed; otherwise a dangling separator is left unread.
    List {
        elements: &'static [Item],
        separator: SyntaxKind,
        elisions: bool,
    },
    /// Left-associative `operand (operator operand)*`; operators are kept.
    Binary {
        operand: Item,
        operators: &'static [Operator],
        min_operators: usize,
    },
    /// Automatic statement termination.
    Terminator,
    /// Recognised so it can be reported, but not implemented.
    Unsupported {
        feature: &'static str,
        leads: &'static [SyntaxKind],
    },
}

// ─────────────────────────────────────────────────────────────────────────────
// Parameter adjustments and guards
// ─────────────────────────────────────────────────────────────────────────────

const IN: Adjust = Adjust::KEEP.with_in();
const NO_IN: Adjust = Adjust::KEEP.without_in();
const NO_RETURN: Adjust = Adjust::KEEP.without_return();
const SCRIPT_BODY: Adjust = Adjust::KEEP
    .without_yield()
    .without_await()
    .without_return();

const PLAIN_NAME: Adjust = Adjust::KEEP.without_yield().without_await();
const FUNCTION_PARAMS: Adjust = PLAIN_NAME.with_in();
const FUNCTION_BODY: Adjust = FUNCTION_PARAMS.with_return();
const GENERATOR_NAME: Adjust = Adjust::KEEP.with_yield().without_await();
const GENERATOR_PARAMS: Adjust = GENERATOR_NAME.with_in();
const GENERATOR_BODY: Adjust = GENERATOR_PARAMS.with_return();
const ARROW_BODY: Adjust = Adjust::KEEP.without_yield().without_await();
const ARROW_BLOCK: Adjust = Adjust::KEEP.with_in().with_return();

const NO_LT: Guard = Guard::NoLineTerminator;
const NOT_LET_BRACKET: Guard = Guard::NotAhead(&[&[K::Let, K::LeftBracket]]);

// ─────────────────────────────────────────────────────────────────────────────
// Scripts and statements
// ─────────────────────────────────────────────────────────────────────────────

const SCRIPT: Rule = Rule::Choice(&[seq(&[node(K::ScriptBody).with(SCRIPT_BODY)])]);

const SCRIPT_BODY_RULE: Rule = Rule::Choice(&[seq(&[node(K::StatementList)])]);

const STATEMENT_LIST: Rule = Rule::Choice(&[seq(&[node(K::StatementListItem).many()])]);

const STATEMENT_LIST_ITEM: Rule = Rule::Choice(&[
    seq(&[node(K::ModuleItem)]).when(Guard::NotAhead(&[
        &[K::Import, K::LeftParen],
        &[K::Import, K::Dot],
    ])),
    seq(&[node(K::Declaration).with(NO_RETURN)]),
    seq(&[node(K::Statement)]),
]);

const MODULE_ITEM: Rule = Rule::Unsupported {
    feature: "module item",
    leads: &[K::Import, K::Export],
};

const STATEMENT: Rule = Rule::Choice(&[
    seq(&[node(K::BlockStatement)]),
    seq(&[node(K::VariableStatement).with(NO_RETURN)]),
    seq(&[node(K::EmptyStatement).with(Adjust::RESET)]),
    seq(&[node(K::ExpressionStatement).with(NO_RETURN)]),
    seq(&[node(K::IfStatement)]),
    seq(&[node(K::BreakableStatement)]),
    seq(&[node(K::ContinueStatement).with(NO_RETURN)]),
    seq(&[node(K::BreakStatement).with(NO_RETURN)]),
    seq(&[node(K::ReturnStatement).with(NO_RETURN)]).when(Guard::If(Param::Return, true)),
    seq(&[node(K::WithStatement)]),
    seq(&[node(K::LabelledStatement)]),
    seq(&[node(K::ThrowStatement).with(NO_RETURN)]),
    seq(&[node(K::TryStatement)]),
    seq(&[node(K::DebuggerStatement).with(Adjust::RESET)]),
]);

const BLOCK_STATEMENT: Rule = Rule::Choice(&[seq(&[node(K::Block)])]);

const BLOCK: Rule = Rule::Choice(&[
    seq(&[punct(K::LeftBrace), punct(K::RightBrace)]),
    seq(&[
        punct(K::LeftBrace).cut(),
        node(K::StatementList),
        punct(K::RightBrace),
    ]),
]);

const VARIABLE_STATEMENT: Rule = Rule::Choice(&[seq(&[
    punct(K::Var).cut(),
    node(K::VariableDeclarationList).with(IN),
    punct(K::StatementTerminator),
])]);

const VARIABLE_DECLARATION_LIST: Rule = Rule::List {
    elements: &[node(K::VariableDeclaration)],
    separator: K::Comma,
    elisions: false,
};

const VARIABLE_DECLARATION: Rule = Rule::Choice(&[
    seq(&[node(K::BindingIdentifier), node(K::Initializer).opt()]),
    seq(&[node(K::BindingPattern)]),
]);

const BINDING_PATTERN: Rule = Rule::Unsupported {
    feature: "binding pattern",
    leads: &[K::LeftBrace, K::LeftBracket],
};

const INITIALIZER: Rule = Rule::Choice(&[seq(&[
    punct(K::Equal),
    node(K::AssignmentExpression),
])]);

const EMPTY_STATEMENT: Rule = Rule::Choice(&[seq(&[punct(K::Semicolon)])]);

const EXPRESSION_STATEMENT: Rule = Rule::Choice(&[seq(&[
    node(K::Expression).with(IN),
    punct(K::StatementTerminator),
])
.when(Guard::NotAhead(&[
    &[K::LeftBrace],
    &[K::Function],
    &[K::Class],
    &[K::Let, K::LeftBracket],
    &[K::Async, K::Function],
]))]);

const IF_STATEMENT: Rule = Rule::Choice(&[seq(&[
    punct(K::If).cut(),
    punct(K::LeftParen),
    node(K::Expression).with(IN),
    punct(K::RightParen),
    node(K::Statement),
    node(K::ElseClause).opt(),
])]);

const ELSE_CLAUSE: Rule = Rule::Choice(&[seq(&[punct(K::Else), node(K::Statement)])]);

const BREAKABLE_STATEMENT: Rule = Rule::Choice(&[
    seq(&[node(K::IterationStatement)]),
    seq(&[node(K::SwitchStatement)]),
]);

const ITERATION_STATEMENT: Rule = Rule::Choice(&[
    seq(&[node(K::DoWhileStatement)]),
    seq(&[node(K::WhileStatement)]),
    seq(&[node(K::ForInOfStatement)]),
    seq(&[node(K::ForStatement)]),
]);

const DO_WHILE_STATEMENT: Rule = Rule::Choice(&[seq(&[
    punct(K::Do).cut(),
    node(K::Statement),
    punct(K::While),
    punct(K::LeftParen),
    node(K::Expression).with(IN),
    punct(K::RightParen),
    // A semicolon is inserted after `do … while (…)` even on the same line;
    // one on the next line is an empty statement of its own.
    punct(K::Semicolon).opt().when(Guard::NoLineTerminator),
])]);

const WHILE_STATEMENT: Rule = Rule::Choice(&[seq(&[
    punct(K::While).cut(),
    punct(K::LeftParen),
    node(K::Expression).with(IN),
    punct(K::RightParen),
    node(K::Statement),
])]);

// The semicolons are kept so that empty header slots stay distinguishable.
const FOR_STATEMENT: Rule = Rule::Choice(&[
    seq(&[
        punct(K::For),
        punct(K::LeftParen),
        node(K::Var),
        node(K::VariableDeclarationList).with(NO_IN),
        node(K::Semicolon),
        node(K::Expression).with(IN).opt(),
        node(K::Semicolon),
        node(K::Expression).with(IN).opt(),
        punct(K::RightParen),
        node(K::Statement),
    ]),
    seq(&[
        punct(K::For),
        punct(K::LeftParen),
        node(K::LetOrConst),
        node(K::BindingList).with(NO_IN),
        node(K::Semicolon),
        node(K::Expression).with(IN).opt(),
        node(K::Semicolon),
        node(K::Expression).with(IN).opt(),
        punct(K::RightParen),
        node(K::Statement),
    ]),
    seq(&[
        punct(K::For),
        punct(K::LeftParen),
        node(K::Expression).with(NO_IN).opt().when(NOT_LET_BRACKET),
        node(K::Semicolon),
        node(K::Expression).with(IN).opt(),
        node(K::Semicolon),
        node(K::Expression).with(IN).opt(),
        punct(K::RightParen),
        node(K::Statement),
    ]),
]);

const FOR_IN_OF_STATEMENT: Rule = Rule::Choice(&[
    seq(&[
        punct(K::For),
        punct(K::LeftParen),
        node(K::LeftHandSideExpression).when(NOT_LET_BRACKET),
        node(K::In),
        node(K::Expression).with(IN),
        punct(K::RightParen),
        node(K::Statement),
    ]),
    seq(&[
        punct(K::For),
        punct(K::LeftParen),
        node(K::Var),
        node(K::ForBinding),
        node(K::In),
        node(K::Expression).with(IN),
        punct(K::RightParen),
        node(K::Statement),
    ]),
    seq(&[
        punct(K::For),
        punct(K::LeftParen),
        node(K::ForDeclaration),
        node(K::In),
        node(K::Expression).with(IN),
        punct(K::RightParen),
        node(K::Statement),
    ]),
    seq(&[
        punct(K::For),
        punct(K::LeftParen),
        node(K::LeftHandSideExpression).when(Guard::NotAhead(&[&[K::Let], &[K::Async, K::Of]])),
        node(K::Of),
        node(K::AssignmentExpression).with(IN),
        punct(K::RightParen),
        node(K::Statement),
    ]),
    seq(&[
        punct(K::For),
        punct(K::LeftParen),
        node(K::Var),
        node(K::ForBinding),
        node(K::Of),
        node(K::AssignmentExpression).with(IN),
        punct(K::RightParen),
        node(K::Statement),
    ]),
    seq(&[
        punct(K::For),
        punct(K::LeftParen),
        node(K::ForDeclaration),
        node(K::Of),
        node(K::AssignmentExpression).with(IN),
        punct(K::RightParen),
        node(K::Statement),
    ]),
]);

const FOR_DECLARATION: Rule = Rule::Choice(&[seq(&[node(K::LetOrConst), node(K::ForBinding)])]);

const FOR_BINDING: Rule = Rule::Choice(&[
    seq(&[node(K::BindingIdentifier)]),
    seq(&[node(K::BindingPattern)]),
]);

const SWITCH_STATEMENT: Rule = Rule::Choice(&[seq(&[
    punct(K::Switch).cut(),
    punct(K::LeftParen),
    node(K::Expression).with(IN),
    punct(K::RightParen),
    node(K::CaseBlock),
])]);

const CASE_BLOCK: Rule = Rule::Choice(&[seq(&[
    punct(K::LeftBrace).cut(),
    node(K::CaseClause).many(),
    node(K::DefaultClause).opt(),
    node(K::CaseClause).many(),
    punct(K::RightBrace),
])]);

const CASE_CLAUSE: Rule = Rule::Choice(&[seq(&[
    punct(K::Case).cut(),
    node(K::Expression).with(IN),
    punct(K::Colon),
    node(K::StatementList),
])]);

const DEFAULT_CLAUSE: Rule = Rule::Choice(&[seq(&[
    punct(K::Default).cut(),
    punct(K::Colon),
    node(K::StatementList),
])]);

const CONTINUE_STATEMENT: Rule = Rule::Choice(&[seq(&[
    punct(K::Continue).cut(),
    node(K::LabelIdentifier).opt().when(NO_LT),
    punct(K::StatementTerminator),
])]);

const BREAK_STATEMENT: Rule = Rule::Choice(&[seq(&[
    punct(K::Break).cut(),
    node(K::LabelIdentifier).opt().when(NO_LT),
    punct(K::StatementTerminator),
])]);

const RETURN_STATEMENT: Rule = Rule::Choice(&[seq(&[
    punct(K::Return).cut(),
    node(K::Expression).with(IN).opt().when(NO_LT),
    punct(K::StatementTerminator),
])]);

const WITH_STATEMENT: Rule = Rule::Choice(&[seq(&[
    punct(K::With).cut(),
    punct(K::LeftParen),
    node(K::Expression).with(IN),
    punct(K::RightParen),
    node(K::Statement),
])]);

const LABELLED_STATEMENT: Rule = Rule::Choice(&[seq(&[
    node(K::LabelIdentifier),
    punct(K::Colon),
    node(K::LabelledItem),
])]);

const LABELLED_ITEM: Rule = Rule::Choice(&[
    seq(&[node(K::Statement)]),
    seq(&[node(K::FunctionDeclaration)]),
]);

const THROW_STATEMENT: Rule = Rule::Choice(&[seq(&[
    punct(K::Throw).cut(),
    node(K::Expression).with(IN).when(NO_LT),
    punct(K::StatementTerminator),
])]);

const TRY_STATEMENT: Rule = Rule::Choice(&[
    seq(&[
        punct(K::Try),
        node(K::Block),
        node(K::CatchClause),
        node(K::FinallyClause).opt(),
    ]),
    seq(&[punct(K::Try), node(K::Block), node(K::FinallyClause)]),
]);

const CATCH_CLAUSE: Rule = Rule::Choice(&[
    seq(&[
        punct(K::Catch),
        punct(K::LeftParen),
        node(K::CatchParameter),
        punct(K::RightParen),
        node(K::Block),
    ]),
    seq(&[punct(K::Catch), node(K::Block)]),
]);

const CATCH_PARAMETER: Rule = Rule::Choice(&[
    seq(&[node(K::BindingIdentifier)]),
    seq(&[node(K::BindingPattern)]),
]);

const FINALLY_CLAUSE: Rule = Rule::Choice(&[seq(&[punct(K::Finally), node(K::Block)])]);

const DEBUGGER_STATEMENT: Rule = Rule::Choice(&[seq(&[
    punct(K::Debugger).cut(),
    punct(K::StatementTerminator),
])]);

// ─────────────────────────────────────────────────────────────────────────────
// Declarations and functions
// ─────────────────────────────────────────────────────────────────────────────

const DECLARATION: Rule = Rule::Choice(&[
    seq(&[node(K::HoistableDeclaration)]),
    seq(&[node(K::ClassDeclaration)]),
    seq(&[node(K::LexicalDeclaration).with(IN)]),
]);

const HOISTABLE_DECLARATION: Rule = Rule::Choice(&[
    seq(&[node(K::GeneratorDeclaration)]),
    seq(&[node(K::FunctionDeclaration)]),
]);

const CLASS_DECLARATION: Rule = Rule::Unsupported {
    feature: "class",
    leads: &[K::Class],
};

const FUNCTION_DECLARATION: Rule = Rule::Choice(&[seq(&[
    punct(K::Function).cut(),
    node(K::BindingIdentifier),
    punct(K::LeftParen),
    node(K::FormalParameters).with(FUNCTION_PARAMS),
    punct(K::RightParen),
    punct(K::LeftBrace),
    node(K::FunctionBody).with(FUNCTION_BODY),
    punct(K::RightBrace),
])]);

const GENERATOR_DECLARATION: Rule = Rule::Choice(&[seq(&[
    punct(K::Function),
    punct(K::Star).cut(),
    node(K::BindingIdentifier),
    punct(K::LeftParen),
    node(K::FormalParameters).with(GENERATOR_PARAMS),
    punct(K::RightParen),
    punct(K::LeftBrace),
    node(K::FunctionBody).with(GENERATOR_BODY),
    punct(K::RightBrace),
])]);

const LEXICAL_DECLARATION: Rule = Rule::Choice(&[seq(&[
    node(K::LetOrConst),
    node(K::BindingList),
    punct(K::StatementTerminator),
])]);

const LET_OR_CONST: Rule = Rule::OneOf(&[K::Let, K::Const]);

const BINDING_LIST: Rule = Rule::List {
    elements: &[node(K::LexicalBinding)],
    separator: K::Comma,
    elisions: false,
};

const LEXICAL_BINDING: Rule = Rule::Choice(&[
    seq(&[node(K::BindingIdentifier), node(K::Initializer).opt()]),
    seq(&[node(K::BindingPattern)]),
]);

const FUNCTION_EXPRESSION: Rule = Rule::Choice(&[seq(&[
    punct(K::Function).cut(),
    node(K::BindingIdentifier).with(PLAIN_NAME).opt(),
    punct(K::LeftParen),
    node(K::FormalParameters).with(FUNCTION_PARAMS),
    punct(K::RightParen),
    punct(K::LeftBrace),
    node(K::FunctionBody).with(FUNCTION_BODY),
    punct(K::RightBrace),
])]);

const GENERATOR_EXPRESSION: Rule = Rule::Choice(&[seq(&[
    punct(K::Function),
    punct(K::Star).cut(),
    node(K::BindingIdentifier).with(GENERATOR_NAME).opt(),
    punct(K::LeftParen),
    node(K::FormalParameters).with(GENERATOR_PARAMS),
    punct(K::RightParen),
    punct(K::LeftBrace),
    node(K::FunctionBody).with(GENERATOR_BODY),
    punct(K::RightBrace),
])]);

const FORMAL_PARAMETERS: Rule = Rule::Choice(&[
    seq(&[node(K::FunctionRestParameter)]),
    seq(&[
        node(K::FormalParameterList),
        punct(K::Comma),
        node(K::FunctionRestParameter),
    ]),
    seq(&[node(K::FormalParameterList), punct(K::Comma).opt()]),
    seq(&[]),
]);

const FORMAL_PARAMETER_LIST: Rule = Rule::List {
    elements: &[node(K::FormalParameter)],
    separator: K::Comma,
    elisions: false,
};

const FORMAL_PARAMETER: Rule = Rule::Choice(&[
    seq(&[
        node(K::BindingIdentifier),
        node(K::Initializer).with(IN).opt(),
    ]),
    seq(&[node(K::BindingPattern)]),
]);

const FUNCTION_REST_PARAMETER: Rule = Rule::Choice(&[
    seq(&[punct(K::DotDotDot), node(K::BindingIdentifier)]),
    seq(&[punct(K::DotDotDot), node(K::BindingPattern)]),
]);

const FUNCTION_BODY_RULE: Rule = Rule::Choice(&[seq(&[node(K::StatementList)])]);

const ARROW_FUNCTION: Rule = Rule::Choice(&[seq(&[
    node(K::ArrowParameters),
    punct(K::Arrow).when(NO_LT).cut(),
    node(K::ConciseBody).with(ARROW_BODY),
])]);

const ARROW_PARAMETERS: Rule = Rule::Choice(&[
    seq(&[node(K::BindingIdentifier)]),
    seq(&[
        punct(K::LeftParen),
        node(K::FormalParameters).with(IN),
        punct(K::RightParen),
    ]),
]);

const CONCISE_BODY: Rule = Rule::Choice(&[
    seq(&[
        punct(K::LeftBrace),
        node(K::FunctionBody).with(ARROW_BLOCK),
        punct(K::RightBrace),
    ]),
    seq(&[node(K::AssignmentExpression)]).when(Guard::NotAhead(&[&[K::LeftBrace]])),
]);

const METHOD_DEFINITION: Rule = Rule::Choice(&[
    seq(&[
        node(K::PropertyName),
        punct(K::LeftParen),
        node(K::FormalParameters).with(FUNCTION_PARAMS),
        punct(K::RightParen),
        punct(K::LeftBrace),
        node(K::FunctionBody).with(FUNCTION_BODY),
        punct(K::RightBrace),
    ]),
    seq(&[
        node(K::Star),
        node(K::PropertyName),
        punct(K::LeftParen),
        node(K::FormalParameters).with(GENERATOR_PARAMS),
        punct(K::RightParen),
        punct(K::LeftBrace),
        node(K::FunctionBody).with(GENERATOR_BODY),
        punct(K::RightBrace),
    ]),
    seq(&[
        node(K::Get),
        node(K::PropertyName),
        punct(K::LeftParen),
        punct(K::RightParen),
        punct(K::LeftBrace),
        node(K::FunctionBody).with(FUNCTION_BODY),
        punct(K::RightBrace),
    ]),
    seq(&[
        node(K::Set),
        node(K::PropertyName),
        punct(K::LeftParen),
        node(K::FormalParameter).with(FUNCTION_PARAMS),
        punct(K::RightParen),
        punct(K::LeftBrace),
        node(K::FunctionBody).with(FUNCTION_BODY),
        punct(K::RightBrace),
    ]),
]);

// ─────────────────────────────────────────────────────────────────────────────
// Expressions
// ─────────────────────────────────────────────────────────────────────────────

const EXPRESSION: Rule = Rule::List {
    elements: &[node(K::AssignmentExpression)],
    separator: K::Comma,
    elisions: false,
};

const ASSIGNMENT_EXPRESSION: Rule = Rule::Choice(&[
    seq(&[
        node(K::LeftHandSideExpression),
        node(K::AssignmentOperator).cut(),
        node(K::AssignmentExpression),
    ]),
    seq(&[node(K::YieldExpression)]).when(Guard::If(Param::Yield, true)),
    seq(&[node(K::ArrowFunction)]),
    seq(&[node(K::ConditionalExpression)]),
]);

const ASSIGNMENT_OPERATOR: Rule = Rule::OneOf(&[
    K::Equal,
    K::StarEqual,
    K::SlashEqual,
    K::PercentEqual,
    K::PlusEqual,
    K::MinusEqual,
    K::LessLessEqual,
    K::GreaterGreaterEqual,
    K::GreaterGreaterGreaterEqual,
    K::AmpersandEqual,
    K::CaretEqual,
    K::PipeEqual,
    K::StarStarEqual,
    K::AmpersandAmpersandEqual,
    K::PipePipeEqual,
    K::QuestionQuestionEqual,
]);

const YIELD_EXPRESSION: Rule = Rule::Choice(&[
    seq(&[
        punct(K::Yield),
        node(K::Star).when(NO_LT),
        node(K::AssignmentExpression),
    ]),
    seq(&[punct(K::Yield), node(K::AssignmentExpression).when(NO_LT)]),
    seq(&[punct(K::Yield)]),
]);

const CONDITIONAL_EXPRESSION: Rule = Rule::Choice(&[
    seq(&[
        node(K::ShortCircuitExpression),
        punct(K::Question).cut(),
        node(K::AssignmentExpression).with(IN),
        punct(K::Colon),
        node(K::AssignmentExpression),
    ]),
    seq(&[node(K::ShortCircuitExpression)]),
]);

// `??` does not mix with `&&`/`||` without parentheses: a coalesce chain
// needs at least one `??` and is tried first.
const SHORT_CIRCUIT_EXPRESSION: Rule = Rule::Choice(&[
    seq(&[node(K::CoalesceExpression)]),
    seq(&[node(K::LogicalORExpression)]),
]);

const fn binary(operand: SyntaxKind, operators: &'static [Operator]) -> Rule {
    Rule::Binary {
        operand: node(operand),
        operators,
        min_operators: 0,
    }
}

const COALESCE_EXPRESSION: Rule = Rule::Binary {
    operand: node(K::BitwiseORExpression),
    operators: &[op(K::QuestionQuestion)],
    min_operators: 1,
};

const LOGICAL_OR_EXPRESSION: Rule = binary(K::LogicalANDExpression, &[op(K::PipePipe)]);
const LOGICAL_AND_EXPRESSION: Rule =
    binary(K::BitwiseORExpression, &[op(K::AmpersandAmpersand)]);
const BITWISE_OR_EXPRESSION: Rule = binary(K::BitwiseXORExpression, &[op(K::Pipe)]);
const BITWISE_XOR_EXPRESSION: Rule = binary(K::BitwiseANDExpression, &[op(K::Caret)]);
const BITWISE_AND_EXPRESSION: Rule = binary(K::EqualityExpression, &[op(K::Ampersand)]);

const EQUALITY_EXPRESSION: Rule = binary(
    K::RelationalExpression,
    &[
        op(K::EqualEqual),
        op(K::BangEqual),
        op(K::EqualEqualEqual),
        op(K::BangEqualEqual),
    ],
);

const RELATIONAL_EXPRESSION: Rule = binary(
    K::ShiftExpression,
    &[
        op(K::Less),
        op(K::Greater),
        op(K::LessEqual),
        op(K::GreaterEqual),
        op(K::Instanceof),
        Operator {
            kind: K::In,
            guard: Guard::If(Param::In, true),
        },
    ],
);

const SHIFT_EXPRESSION: Rule = binary(
    K::AdditiveExpression,
    &[
        op(K::LessLess),
        op(K::GreaterGreater),
        op(K::GreaterGreaterGreater),
    ],
);

const ADDITIVE_EXPRESSION: Rule = binary(K::MultiplicativeExpression, &[op(K::Plus), op(K::Minus)]);

const MULTIPLICATIVE_EXPRESSION: Rule = binary(
    K::ExponentiationExpression,
    &[op(K::Star), op(K::Slash), op(K::Percent)],
);

// `**` is right-associative and its left operand cannot be a bare unary
// expression.
const EXPONENTIATION_EXPRESSION: Rule = Rule::Choice(&[
    seq(&[
        node(K::UpdateExpression),
        node(K::StarStar).cut(),
        node(K::ExponentiationExpression),
    ]),
    seq(&[node(K::UnaryExpression)]),
]);

const UNARY_EXPRESSION: Rule = Rule::Choice(&[
    seq(&[node(K::UpdateExpression)]),
    seq(&[node(K::Delete), node(K::UnaryExpression)]),
    seq(&[node(K::Void), node(K::UnaryExpression)]),
    seq(&[node(K::Typeof), node(K::UnaryExpression)]),
    seq(&[node(K::Plus), node(K::UnaryExpression)]),
    seq(&[node(K::Minus), node(K::UnaryExpression)]),
    seq(&[node(K::Tilde), node(K::UnaryExpression)]),
    seq(&[node(K::Bang), node(K::UnaryExpression)]),
]);

const UPDATE_EXPRESSION: Rule = Rule::Choice(&[
    seq(&[
        node(K::LeftHandSideExpression),
        node(K::PlusPlus).when(NO_LT),
    ]),
    seq(&[
        node(K::LeftHandSideExpression),
        node(K::MinusMinus).when(NO_LT),
    ]),
    seq(&[node(K::PlusPlus), node(K::UnaryExpression)]),
    seq(&[node(K::MinusMinus), node(K::UnaryExpression)]),
    seq(&[node(K::LeftHandSideExpression)]),
]);

const LEFT_HAND_SIDE_EXPRESSION: Rule = Rule::Choice(&[
    seq(&[node(K::OptionalExpression)]),
    seq(&[node(K::CallExpression)]),
    seq(&[node(K::NewExpression)]),
]);

const NEW_EXPRESSION: Rule = Rule::Choice(&[
    seq(&[node(K::MemberExpression)]),
    seq(&[node(K::New), node(K::NewExpression)]),
]);

const CALL_EXPRESSION: Rule = Rule::Choice(&[
    seq(&[node(K::SuperCall), node(K::CallSuffix).many()]),
    seq(&[node(K::ImportCall)]),
    seq(&[
        node(K::MemberExpression),
        node(K::Arguments),
        node(K::CallSuffix).many(),
    ]),
]);

const CALL_SUFFIX: Rule = Rule::Choice(&[
    seq(&[node(K::Arguments)]),
    seq(&[node(K::MemberAccess)]),
]);

const SUPER_CALL: Rule = Rule::Choice(&[seq(&[punct(K::Super), node(K::Arguments)])]);

const IMPORT_CALL: Rule = Rule::Unsupported {
    feature: "import call",
    leads: &[K::Import],
};

const OPTIONAL_EXPRESSION: Rule = Rule::Choice(&[
    seq(&[node(K::CallExpression), node(K::OptionalChain).many1()]),
    seq(&[node(K::MemberExpression), node(K::OptionalChain).many1()]),
]);

const OPTIONAL_CHAIN: Rule = Rule::Choice(&[
    seq(&[
        punct(K::QuestionDot),
        node(K::Arguments),
        node(K::CallSuffix).many(),
    ]),
    seq(&[
        punct(K::QuestionDot),
        punct(K::LeftBracket),
        node(K::Expression).with(IN),
        punct(K::RightBracket),
        node(K::CallSuffix).many(),
    ]),
    seq(&[
        punct(K::QuestionDot),
        node(K::IdentifierName),
        node(K::CallSuffix).many(),
    ]),
]);

const MEMBER_EXPRESSION: Rule = Rule::Choice(&[
    seq(&[node(K::SuperProperty), node(K::MemberAccess).many()]),
    seq(&[node(K::NewTarget), node(K::MemberAccess).many()]),
    seq(&[
        node(K::New),
        node(K::MemberExpression),
        node(K::Arguments),
        node(K::MemberAccess).many(),
    ]),
    seq(&[node(K::PrimaryExpression), node(K::MemberAccess).many()]),
]);

const MEMBER_ACCESS: Rule = Rule::Choice(&[
    seq(&[
        punct(K::LeftBracket),
        node(K::Expression).with(IN),
        punct(K::RightBracket),
    ]),
    seq(&[punct(K::Dot), node(K::IdentifierName)]),
]);

const SUPER_PROPERTY: Rule = Rule::Choice(&[
    seq(&[
        punct(K::Super),
        punct(K::LeftBracket),
        node(K::Expression).with(IN),
        punct(K::RightBracket),
    ]),
    seq(&[punct(K::Super), punct(K::Dot), node(K::IdentifierName)]),
]);

const NEW_TARGET: Rule = Rule::Choice(&[seq(&[
    punct(K::New),
    punct(K::Dot),
    punct(K::Target),
])]);

const ARGUMENTS: Rule = Rule::Choice(&[
    seq(&[punct(K::LeftParen), punct(K::RightParen)]),
    seq(&[
        punct(K::LeftParen),
        node(K::ArgumentList),
        punct(K::Comma).opt(),
        punct(K::RightParen),
    ]),
]);

const ARGUMENT_LIST: Rule = Rule::List {
    elements: &[
        node(K::SpreadElement),
        node(K::AssignmentExpression).with(IN),
    ],
    separator: K::Comma,
    elisions: false,
};

const SPREAD_ELEMENT: Rule = Rule::Choice(&[seq(&[
    punct(K::DotDotDot),
    node(K::AssignmentExpression).with(IN),
])]);

const PRIMARY_EXPRESSION: Rule = Rule::Choice(&[
    seq(&[node(K::This)]),
    seq(&[node(K::IdentifierReference)]),
    seq(&[node(K::Literal)]),
    seq(&[node(K::ArrayLiteral)]),
    seq(&[node(K::ObjectLiteral)]),
    seq(&[node(K::GeneratorExpression)]),
    seq(&[node(K::FunctionExpression)]),
    seq(&[node(K::ClassExpression)]),
    seq(&[node(K::RegularExpressionLiteral)]),
    seq(&[node(K::ParenthesizedExpression)]),
]);

const LITERAL: Rule = Rule::Choice(&[
    seq(&[node(K::Null)]),
    seq(&[node(K::True)]),
    seq(&[node(K::False)]),
    seq(&[node(K::NumericLiteral)]),
    seq(&[node(K::StringLiteral)]),
]);

const CLASS_EXPRESSION: Rule = Rule::Unsupported {
    feature: "class",
    leads: &[K::Class],
};

const REGULAR_EXPRESSION_LITERAL: Rule = Rule::Unsupported {
    feature: "regular expression literal",
    leads: &[K::Slash, K::SlashEqual],
};

const ARRAY_LITERAL: Rule = Rule::Choice(&[seq(&[
    punct(K::LeftBracket),
    node(K::ElementList),
    punct(K::RightBracket),
])]);

const ELEMENT_LIST: Rule = Rule::List {
    elements: &[
        node(K::SpreadElement),
        node(K::AssignmentExpression).with(IN),
    ],
    separator: K::Comma,
    elisions: true,
};

const OBJECT_LITERAL: Rule = Rule::Choice(&[
    seq(&[punct(K::LeftBrace), punct(K::RightBrace)]),
    seq(&[
        punct(K::LeftBrace),
        node(K::PropertyDefinitionList),
        punct(K::Comma).opt(),
        punct(K::RightBrace),
    ]),
]);

const PROPERTY_DEFINITION_LIST: Rule = Rule::List {
    elements: &[node(K::PropertyDefinition)],
    separator: K::Comma,
    elisions: false,
};

const PROPERTY_DEFINITION: Rule = Rule::Choice(&[
    seq(&[
        node(K::PropertyName),
        punct(K::Colon),
        node(K::AssignmentExpression).with(IN),
    ]),
    seq(&[node(K::MethodDefinition)]),
    seq(&[node(K::IdentifierReference)]),
    seq(&[node(K::SpreadElement)]),
]);

const PROPERTY_NAME: Rule = Rule::Choice(&[
    seq(&[node(K::IdentifierName)]),
    seq(&[node(K::StringLiteral)]),
    seq(&[node(K::NumericLiteral)]),
    seq(&[node(K::ComputedPropertyName)]),
]);

const COMPUTED_PROPERTY_NAME: Rule = Rule::Choice(&[seq(&[
    punct(K::LeftBracket),
    node(K::AssignmentExpression).with(IN),
    punct(K::RightBracket),
])]);

const PARENTHESIZED_EXPRESSION: Rule = Rule::Choice(&[seq(&[
    punct(K::LeftParen),
    node(K::Expression).with(IN),
    punct(K::RightParen),
])]);

// ─────────────────────────────────────────────────────────────────────────────
// Lookup
// ─────────────────────────────────────────────────────────────────────────────

/// The rule that recognises `kind`.
pub fn rule(kind: SyntaxKind) -> Rule {
    match kind {
        K::StringLiteral | K::NumericLiteral => Rule::Literal,
        _ if kind.is_terminal() => Rule::Token,

        K::Script => SCRIPT,
        K::ScriptBody => SCRIPT_BODY_RULE,
        K::StatementList => STATEMENT_LIST,
        K::StatementListItem => STATEMENT_LIST_ITEM,
        K::ModuleItem => MODULE_ITEM,

        K::Statement => STATEMENT,
        K::BlockStatement => BLOCK_STATEMENT,
        K::Block => BLOCK,
        K::VariableStatement => VARIABLE_STATEMENT,
        K::VariableDeclarationList => VARIABLE_DECLARATION_LIST,
        K::VariableDeclaration => VARIABLE_DECLARATION,
        K::BindingPattern => BINDING_PATTERN,
        K::Initializer => INITIALIZER,
        K::EmptyStatement => EMPTY_STATEMENT,
        K::ExpressionStatement => EXPRESSION_STATEMENT,
        K::IfStatement => IF_STATEMENT,
        K::ElseClause => ELSE_CLAUSE,
        K::BreakableStatement => BREAKABLE_STATEMENT,
        K::IterationStatement => ITERATION_STATEMENT,
        K::DoWhileStatement => DO_WHILE_STATEMENT,
        K::WhileStatement => WHILE_STATEMENT,
        K::ForStatement => FOR_STATEMENT,
        K::ForInOfStatement => FOR_IN_OF_STATEMENT,
        K::ForDeclaration => FOR_DECLARATION,
        K::ForBinding => FOR_BINDING,
        K::SwitchStatement => SWITCH_STATEMENT,
        K::CaseBlock => CASE_BLOCK,
        K::CaseClause => CASE_CLAUSE,
        K::DefaultClause => DEFAULT_CLAUSE,
        K::ContinueStatement => CONTINUE_STATEMENT,
        K::BreakStatement => BREAK_STATEMENT,
        K::ReturnStatement => RETURN_STATEMENT,
        K::WithStatement => WITH_STATEMENT,
        K::LabelledStatement => LABELLED_STATEMENT,
        K::LabelledItem => LABELLED_ITEM,
        K::ThrowStatement => THROW_STATEMENT,
        K::TryStatement => TRY_STATEMENT,
        K::CatchClause => CATCH_CLAUSE,
        K::CatchParameter => CATCH_PARAMETER,
        K::FinallyClause => FINALLY_CLAUSE,
        K::DebuggerStatement => DEBUGGER_STATEMENT,
        K::StatementTerminator => Rule::Terminator,

        K::Declaration => DECLARATION,
        K::HoistableDeclaration => HOISTABLE_DECLARATION,
        K::ClassDeclaration => CLASS_DECLARATION,
        K::FunctionDeclaration => FUNCTION_DECLARATION,
        K::GeneratorDeclaration => GENERATOR_DECLARATION,
        K::LexicalDeclaration => LEXICAL_DECLARATION,
        K::LetOrConst => LET_OR_CONST,
        K::BindingList => BINDING_LIST,
        K::LexicalBinding => LEXICAL_BINDING,

        K::FunctionExpression => FUNCTION_EXPRESSION,
        K::GeneratorExpression => GENERATOR_EXPRESSION,
        K::FormalParameters => FORMAL_PARAMETERS,
        K::FormalParameterList => FORMAL_PARAMETER_LIST,
        K::FormalParameter => FORMAL_PARAMETER,
        K::FunctionRestParameter => FUNCTION_REST_PARAMETER,
        K::FunctionBody => FUNCTION_BODY_RULE,
        K::ArrowFunction => ARROW_FUNCTION,
        K::ArrowParameters => ARROW_PARAMETERS,
        K::ConciseBody => CONCISE_BODY,
        K::MethodDefinition => METHOD_DEFINITION,

        K::IdentifierName => Rule::Name(NameRule::IdentifierName),
        K::IdentifierReference | K::BindingIdentifier | K::LabelIdentifier => {
            Rule::Name(NameRule::Reference)
        }

        K::Expression => EXPRESSION,
        K::AssignmentExpression => ASSIGNMENT_EXPRESSION,
        K::AssignmentOperator => ASSIGNMENT_OPERATOR,
        K::YieldExpression => YIELD_EXPRESSION,
        K::ConditionalExpression => CONDITIONAL_EXPRESSION,
        K::ShortCircuitExpression => SHORT_CIRCUIT_EXPRESSION,
        K::LogicalORExpression => LOGICAL_OR_EXPRESSION,
        K::LogicalANDExpression => LOGICAL_AND_EXPRESSION,
        K::CoalesceExpression => COALESCE_EXPRESSION,
        K::BitwiseORExpression => BITWISE_OR_EXPRESSION,
        K::BitwiseXORExpression => BITWISE_XOR_EXPRESSION,
        K::BitwiseANDExpression => BITWISE_AND_EXPRESSION,
        K::EqualityExpression => EQUALITY_EXPRESSION,
        K::RelationalExpression => RELATIONAL_EXPRESSION,
        K::ShiftExpression => SHIFT_EXPRESSION,
        K::AdditiveExpression => ADDITIVE_EXPRESSION,
        K::MultiplicativeExpression => MULTIPLICATIVE_EXPRESSION,
        K::ExponentiationExpression => EXPONENTIATION_EXPRESSION,
        K::UnaryExpression => UNARY_EXPRESSION,
        K::UpdateExpression => UPDATE_EXPRESSION,
        K::LeftHandSideExpression => LEFT_HAND_SIDE_EXPRESSION,
        K::NewExpression => NEW_EXPRESSION,
        K::CallExpression => CALL_EXPRESSION,
        K::CallSuffix => CALL_SUFFIX,
        K::SuperCall => SUPER_CALL,
        K::ImportCall => IMPORT_CALL,
        K::OptionalExpression => OPTIONAL_EXPRESSION,
        K::OptionalChain => OPTIONAL_CHAIN,
        K::MemberExpression => MEMBER_EXPRESSION,
        K::MemberAccess => MEMBER_ACCESS,
        K::SuperProperty => SUPER_PROPERTY,
        K::NewTarget => NEW_TARGET,
        K::Arguments => ARGUMENTS,
        K::ArgumentList => ARGUMENT_LIST,
        K::SpreadElement => SPREAD_ELEMENT,
        K::PrimaryExpression => PRIMARY_EXPRESSION,
        K::Literal => LITERAL,
        K::ClassExpression => CLASS_EXPRESSION,
        K::RegularExpressionLiteral => REGULAR_EXPRESSION_LITERAL,
        K::ArrayLiteral => ARRAY_LITERAL,
        K::ElementList => ELEMENT_LIST,
        K::ObjectLiteral => OBJECT_LITERAL,
        K::PropertyDefinitionList => PROPERTY_DEFINITION_LIST,
        K::PropertyDefinition => PROPERTY_DEFINITION,
        K::PropertyName => PROPERTY_NAME,
        K::ComputedPropertyName => COMPUTED_PROPERTY_NAME,
        K::ParenthesizedExpression => PARENTHESIZED_EXPRESSION,

        // Produced by the driver, never requested.
        K::Elision => Rule::Choice(&[]),

        // Every terminal was handled by the guard arm above.
        _ => Rule::Token,
    }
}

/// Kinds whose results are cached per `(params, cursor)` while backtracking.
pub fn is_memoized(kind: SyntaxKind) -> bool {
    matches!(
        kind,
        K::MemberExpression
            | K::CallExpression
            | K::LeftHandSideExpression
            | K::UpdateExpression
            | K::ShortCircuitExpression
    )
}

/// Kinds whose children are spliced into the parent instead of forming a node.
pub fn is_inline(kind: SyntaxKind) -> bool {
    matches!(kind, K::ElseClause | K::CallSuffix)
}
