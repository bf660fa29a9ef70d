//! The closed set of token and node kinds.
//!
//! One enumeration covers both lexical terminals (punctuators, literals,
//! identifiers, keywords) and grammar nonterminals, so a token kind and the
//! kind of the leaf node built from it are the same value.
//!
//! Keyword kinds follow [`SyntaxKind::Identifier`] in exactly the order of
//! [`KEYWORDS`]; the scanner relies on that pairing and the tests below
//! enforce it.

use std::fmt;

/// Kind of a token or of a parse node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[repr(u16)]
pub enum SyntaxKind {
    // ── Literals ──────────────────────────────────────────────────────────
    /// String literal enclosed in `"` or `'`.
    StringLiteral,
    /// Decimal, hex, octal or binary numeric literal.
    NumericLiteral,

    // ── Punctuators ───────────────────────────────────────────────────────
    /// `{`
    LeftBrace,
    /// `}`
    RightBrace,
    /// `(`
    LeftParen,
    /// `)`
    RightParen,
    /// `[`
    LeftBracket,
    /// `]`
    RightBracket,
    /// `.`
    Dot,
    /// `...`
    DotDotDot,
    /// `;`
    Semicolon,
    /// `,`
    Comma,
    /// `<`
    Less,
    /// `>`
    Greater,
    /// `<=`
    LessEqual,
    /// `>=`
    GreaterEqual,
    /// `==`
    EqualEqual,
    /// `!=`
    BangEqual,
    /// `===`
    EqualEqualEqual,
    /// `!==`
    BangEqualEqual,
    /// `+`
    Plus,
    /// `-`
    Minus,
    /// `*`
    Star,
    /// `**`
    StarStar,
    /// `/`
    Slash,
    /// `%`
    Percent,
    /// `++`
    PlusPlus,
    /// `--`
    MinusMinus,
    /// `<<`
    LessLess,
    /// `>>`
    GreaterGreater,
    /// `>>>`
    GreaterGreaterGreater,
    /// `&`
    Ampersand,
    /// `|`
    Pipe,
    /// `^`
    Caret,
    /// `!`
    Bang,
    /// `~`
    Tilde,
    /// `&&`
    AmpersandAmpersand,
    /// `||`
    PipePipe,
    /// `??`
    QuestionQuestion,
    /// `?`
    Question,
    /// `?.`
    QuestionDot,
    /// `:`
    Colon,
    /// `=`
    Equal,
    /// `+=`
    PlusEqual,
    /// `-=`
    MinusEqual,
    /// `*=`
    StarEqual,
    /// `**=`
    StarStarEqual,
    /// `/=`
    SlashEqual,
    /// `%=`
    PercentEqual,
    /// `<<=`
    LessLessEqual,
    /// `>>=`
    GreaterGreaterEqual,
    /// `>>>=`
    GreaterGreaterGreaterEqual,
    /// `&=`
    AmpersandEqual,
    /// `|=`
    PipeEqual,
    /// `^=`
    CaretEqual,
    /// `&&=`
    AmpersandAmpersandEqual,
    /// `||=`
    PipePipeEqual,
    /// `??=`
    QuestionQuestionEqual,
    /// `=>`
    Arrow,

    // ── Identifiers and keywords (order shared with `KEYWORDS`) ───────────
    /// An identifier that is not a keyword.
    Identifier,
    /// `as`
    As,
    /// `async`
    Async,
    /// `await`
    Await,
    /// `break`
    Break,
    /// `case`
    Case,
    /// `catch`
    Catch,
    /// `class`
    Class,
    /// `const`
    Const,
    /// `continue`
    Continue,
    /// `debugger`
    Debugger,
    /// `default`
    Default,
    /// `delete`
    Delete,
    /// `do`
    Do,
    /// `else`
    Else,
    /// `enum`
    Enum,
    /// `export`
    Export,
    /// `extends`
    Extends,
    /// `false`
    False,
    /// `finally`
    Finally,
    /// `for`
    For,
    /// `from`
    From,
    /// `function`
    Function,
    /// `get`
    Get,
    /// `if`
    If,
    /// `implements`
    Implements,
    /// `import`
    Import,
    /// `in`
    In,
    /// `instanceof`
    Instanceof,
    /// `interface`
    Interface,
    /// `let`
    Let,
    /// `meta`
    Meta,
    /// `new`
    New,
    /// `null`
    Null,
    /// `of`
    Of,
    /// `package`
    Package,
    /// `private`
    Private,
    /// `protected`
    Protected,
    /// `public`
    Public,
    /// `return`
    Return,
    /// `set`
    Set,
    /// `static`
    Static,
    /// `super`
    Super,
    /// `switch`
    Switch,
    /// `target`
    Target,
    /// `this`
    This,
    /// `throw`
    Throw,
    /// `true`
    True,
    /// `try`
    Try,
    /// `typeof`
    Typeof,
    /// `var`
    Var,
    /// `void`
    Void,
    /// `while`
    While,
    /// `with`
    With,
    /// `yield`
    Yield,

    // ── Scripts ───────────────────────────────────────────────────────────
    Script,
    ScriptBody,
    StatementList,
    StatementListItem,

    // ── Statements ────────────────────────────────────────────────────────
    Statement,
    BlockStatement,
    Block,
    VariableStatement,
    VariableDeclarationList,
    VariableDeclaration,
    Initializer,
    EmptyStatement,
    ExpressionStatement,
    IfStatement,
    /// `else Statement`; spliced into the enclosing [`SyntaxKind::IfStatement`].
    ElseClause,
    BreakableStatement,
    IterationStatement,
    DoWhileStatement,
    WhileStatement,
    ForStatement,
    ForInOfStatement,
    ForDeclaration,
    ForBinding,
    SwitchStatement,
    CaseBlock,
    CaseClause,
    DefaultClause,
    ContinueStatement,
    BreakStatement,
    ReturnStatement,
    WithStatement,
    LabelledStatement,
    LabelledItem,
    ThrowStatement,
    TryStatement,
    CatchClause,
    CatchParameter,
    FinallyClause,
    DebuggerStatement,
    /// Automatic statement termination; never appears in a tree.
    StatementTerminator,

    // ── Declarations ──────────────────────────────────────────────────────
    Declaration,
    HoistableDeclaration,
    FunctionDeclaration,
    GeneratorDeclaration,
    LexicalDeclaration,
    LetOrConst,
    BindingList,
    LexicalBinding,
    /// Destructuring pattern; reported as unsupported.
    BindingPattern,
    /// `class` declaration; reported as unsupported.
    ClassDeclaration,
    /// `import` / `export` outside an expression; reported as unsupported.
    ModuleItem,

    // ── Functions ─────────────────────────────────────────────────────────
    FunctionExpression,
    GeneratorExpression,
    FormalParameters,
    FormalParameterList,
    FormalParameter,
    FunctionRestParameter,
    FunctionBody,
    ArrowFunction,
    ArrowParameters,
    ConciseBody,
    MethodDefinition,

    // ── Names ─────────────────────────────────────────────────────────────
    IdentifierName,
    IdentifierReference,
    BindingIdentifier,
    LabelIdentifier,

    // ── Expressions ───────────────────────────────────────────────────────
    Expression,
    AssignmentExpression,
    /// Any assignment operator; the node takes the operator's own kind.
    AssignmentOperator,
    YieldExpression,
    ConditionalExpression,
    ShortCircuitExpression,
    LogicalORExpression,
    LogicalANDExpression,
    CoalesceExpression,
    BitwiseORExpression,
    BitwiseXORExpression,
    BitwiseANDExpression,
    EqualityExpression,
    RelationalExpression,
    ShiftExpression,
    AdditiveExpression,
    MultiplicativeExpression,
    ExponentiationExpression,
    UnaryExpression,
    UpdateExpression,
    LeftHandSideExpression,
    NewExpression,
    CallExpression,
    /// Call arguments or member access after a call; spliced into its parent.
    CallSuffix,
    ImportCall,
    OptionalExpression,
    OptionalChain,
    MemberExpression,
    MemberAccess,
    SuperProperty,
    SuperCall,
    NewTarget,
    Arguments,
    ArgumentList,
    PrimaryExpression,
    Literal,
    /// `class` expression; reported as unsupported.
    ClassExpression,
    /// Regular-expression literal; reported as unsupported.
    RegularExpressionLiteral,
    ArrayLiteral,
    ElementList,
    /// A hole in an array literal.
    Elision,
    SpreadElement,
    ObjectLiteral,
    PropertyDefinitionList,
    PropertyDefinition,
    PropertyName,
    ComputedPropertyName,
    ParenthesizedExpression,
}

/// Keyword spellings, sorted, paired with their kinds.
///
/// Entry `i` has kind `Identifier as u16 + 1 + i`.
pub const KEYWORDS: [(&str, SyntaxKind); 54] = [
    ("as", SyntaxKind::As),
    ("async", SyntaxKind::Async),
    ("await", SyntaxKind::Await),
    ("break", SyntaxKind::Break),
    ("case", SyntaxKind::Case),
    ("catch", SyntaxKind::Catch),
    ("class", SyntaxKind::Class),
    ("const", SyntaxKind::Const),
    ("continue", SyntaxKind::Continue),
    ("debugger", SyntaxKind::Debugger),
    ("default", SyntaxKind::Default),
    ("delete", SyntaxKind::Delete),
    ("do", SyntaxKind::Do),
    ("else", SyntaxKind::Else),
    ("enum", SyntaxKind::Enum),
    ("export", SyntaxKind::Export),
    ("extends", SyntaxKind::Extends),
    ("false", SyntaxKind::False),
    ("finally", SyntaxKind::Finally),
    ("for", SyntaxKind::For),
    ("from", SyntaxKind::From),
    ("function", SyntaxKind::Function),
    ("get", SyntaxKind::Get),
    ("if", SyntaxKind::If),
    ("implements", SyntaxKind::Implements),
    ("import", SyntaxKind::Import),
    ("in", SyntaxKind::In),
    ("instanceof", SyntaxKind::Instanceof),
    ("interface", SyntaxKind::Interface),
    ("let", SyntaxKind::Let),
    ("meta", SyntaxKind::Meta),
    ("new", SyntaxKind::New),
    ("null", SyntaxKind::Null),
    ("of", SyntaxKind::Of),
    ("package", SyntaxKind::Package),
    ("private", SyntaxKind::Private),
    ("protected", SyntaxKind::Protected),
    ("public", SyntaxKind::Public),
    ("return", SyntaxKind::Return),
    ("set", SyntaxKind::Set),
    ("static", SyntaxKind::Static),
    ("super", SyntaxKind::Super),
    ("switch", SyntaxKind::Switch),
    ("target", SyntaxKind::Target),
    ("this", SyntaxKind::This),
    ("throw", SyntaxKind::Throw),
    ("true", SyntaxKind::True),
    ("try", SyntaxKind::Try),
    ("typeof", SyntaxKind::Typeof),
    ("var", SyntaxKind::Var),
    ("void", SyntaxKind::Void),
    ("while", SyntaxKind::While),
    ("with", SyntaxKind::With),
    ("yield", SyntaxKind::Yield),
];

/// Longest keyword spelling (`implements`, `instanceof`).
const MAX_KEYWORD_LEN: usize = 10;

impl SyntaxKind {
    /// Look up a keyword by its UTF-16 spelling.
    pub fn from_keyword(text: &[u16]) -> Option<SyntaxKind> {
        if text.len() > MAX_KEYWORD_LEN || text.iter().any(|&cu| cu >= 0x80) {
            return None;
        }
        KEYWORDS
            .binary_search_by(|(spelling, _)| {
                spelling.encode_utf16().cmp(text.iter().copied())
            })
            .ok()
            .map(|index| KEYWORDS[index].1)
    }

    /// Returns `true` for every keyword kind, reserved or contextual.
    pub fn is_keyword(self) -> bool {
        self > SyntaxKind::Identifier && self <= SyntaxKind::Yield
    }

    /// Returns `true` for lexical kinds a scanner can produce.
    pub fn is_terminal(self) -> bool {
        self <= SyntaxKind::Yield
    }

    /// Returns `true` for keywords that are valid identifier names in
    /// non-strict script code.
    ///
    /// `yield` and `await` are absent: whether they are usable as names
    /// depends on the grammar parameters in force.
    pub fn is_contextual_keyword(self) -> bool {
        matches!(
            self,
            SyntaxKind::As
                | SyntaxKind::Async
                | SyntaxKind::From
                | SyntaxKind::Get
                | SyntaxKind::Implements
                | SyntaxKind::Interface
                | SyntaxKind::Let
                | SyntaxKind::Meta
                | SyntaxKind::Of
                | SyntaxKind::Package
                | SyntaxKind::Private
                | SyntaxKind::Protected
                | SyntaxKind::Public
                | SyntaxKind::Set
                | SyntaxKind::Static
                | SyntaxKind::Target
        )
    }

    /// The source spelling of a keyword kind.
    pub fn keyword_text(self) -> Option<&'static str> {
        if !self.is_keyword() {
            return None;
        }
        let index = usize::from(self as u16 - SyntaxKind::Identifier as u16 - 1);
        KEYWORDS.get(index).map(|(spelling, _)| *spelling)
    }
}

impl fmt::Display for SyntaxKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}
