//! AST (abstract syntax tree) types produced by the PHP parser.

use serde::Serialize;

/// Type tag of a literal expression.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum LiteralType {
    String,
    Float,
    Boolean,
}

/// A literal value with its exact source text.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Literal {
    pub ty: LiteralType,
    pub text: String,
}

impl Literal {
    pub fn new(ty: LiteralType, text: impl Into<String>) -> Self {
        Self {
            ty,
            text: text.into(),
        }
    }
}

/// A variable name, without its `$` sigil.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Identifier {
    pub name: String,
}

impl Identifier {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

/// Expressions.
///
/// The expression grammar is shallow: an expression is classified by the
/// last literal it contains, or is a function call, or is [`Expr::Unknown`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum Expr {
    Literal(Literal),
    Call { name: String, args: Vec<Expr> },
    /// An expression whose shape could not be determined.
    Unknown,
}

/// An ordered sequence of statements between `{` and `}`.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct Block {
    pub statements: Vec<Stmt>,
}

/// Function definition.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Function {
    pub name: String,
    pub params: Vec<Identifier>,
    pub body: Block,
}

/// Statements.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum Stmt {
    Block(Block),
    /// Branches are single statements, not necessarily blocks. A missing
    /// `else` is an empty block.
    If {
        condition: Expr,
        then_branch: Box<Stmt>,
        else_branch: Box<Stmt>,
    },
    Assignment {
        assignee: Identifier,
        value: Expr,
    },
    Echo(Expr),
    Function(Function),
    /// A bare expression statement; always a function call.
    Expr(Expr),
}

/// Entire program: the top-level statements of one input.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct Program {
    pub nodes: Vec<Stmt>,
}
