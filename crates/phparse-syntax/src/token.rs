//! Token definitions shared by the PHP scanner and parser.
//!
//! The scanner classifies every byte of its input into an [`Item`]: a
//! [`TokenKind`], the exact source text it covers, and the [`Position`]s where
//! it begins and ends. Nothing is skipped, not even whitespace, so the items of
//! one input tile it completely.
//!
//! # Token Categories
//!
//! - **Framing**: [`HTML`](TokenKind::HTML) passthrough text and the
//!   `<?php` / `?>` tags that switch in and out of PHP mode
//! - **Trivia**: whitespace and comments, kept as their own kinds
//! - **Identifiers**: variables (`$name`) and bare names (`strlen`, `Foo\Bar`)
//! - **Literals**: strings, numbers, `true` and `false`
//! - **Keywords**: `function`, `echo`, `if`, `else`, `return`, `while`
//! - **Operators and punctuation**: `=`, `+`, `==`, `(`, `,`, `;`, `{`, ...
//! - **Special**: end-of-input and lexical error markers
//!
//! # Examples
//!
//! ```rust
//! use phparse_syntax::{Item, Position, TokenKind};
//!
//! let begin = Position { offset: 6, line: 1, file: "index.php" };
//! let end = Position { offset: 8, line: 1, file: "index.php" };
//! let var = Item { kind: TokenKind::Identifier, text: "$x".into(), begin, end };
//!
//! assert_eq!(var.text.len(), var.end.offset - var.begin.offset);
//! ```

use std::borrow::Cow;
use std::fmt;

use serde::Serialize;

/// Classification of a scanned token.
///
/// Kinds are deliberately coarse: every arithmetic, comparison and logical
/// operator shares [`Operator`](TokenKind::Operator), and the parser looks at
/// [`Item::text`] when it needs the concrete spelling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum TokenKind {
    // === Special ===
    /// A lexical error; the item's text is the diagnostic message.
    Error,

    /// End of input. Carries empty text.
    EOF,

    // === Framing ===
    /// Literal text outside of PHP tags, echoed verbatim.
    HTML,

    /// `<?php` or the short `<?` open tag.
    PHPBegin,

    /// The `?>` close tag.
    PHPEnd,

    // === Trivia ===
    /// A run of whitespace.
    Space,

    /// `// ...` or `# ...` up to (not including) the end of the line.
    CommentLine,

    /// `/* ... */`
    CommentBlock,

    // === Identifiers ===
    /// A variable, including its sigil: `$name`.
    Identifier,

    /// A bare name such as a function or constant name.
    NonVariableIdentifier,

    // === Literals ===
    /// A single- or double-quoted string, quotes included.
    StringLiteral,

    /// An integer or floating point number.
    NumberLiteral,

    /// `true`, in any letter case.
    TrueLiteral,

    /// `false`, in any letter case.
    FalseLiteral,

    // === Operators ===
    /// Any arithmetic, comparison, logical, string or member operator.
    Operator,

    /// The plain assignment operator `=`.
    AssignmentOperator,

    // === Punctuation ===
    /// `(`
    OpenParen,

    /// `)`
    CloseParen,

    /// `,`
    ArgumentSeparator,

    /// `;`
    StatementEnd,

    /// `{`
    BlockBegin,

    /// `}`
    BlockEnd,

    /// `[`
    ArrayLookupOpen,

    /// `]`
    ArrayLookupClose,

    // === Keywords ===
    /// `function`
    Function,

    /// `echo`
    Echo,

    /// `if`
    If,

    /// `else`
    Else,

    /// `return`
    Return,

    /// `while`
    While,
}

impl TokenKind {
    /// Whitespace and comments, which the parser never sees.
    pub fn is_trivia(self) -> bool {
        matches!(
            self,
            TokenKind::Space | TokenKind::CommentLine | TokenKind::CommentBlock
        )
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            TokenKind::Error => "error",
            TokenKind::EOF => "EOF",
            TokenKind::HTML => "HTML",
            TokenKind::PHPBegin => "'<?php'",
            TokenKind::PHPEnd => "'?>'",
            TokenKind::Space => "whitespace",
            TokenKind::CommentLine | TokenKind::CommentBlock => "comment",
            TokenKind::Identifier => "variable",
            TokenKind::NonVariableIdentifier => "identifier",
            TokenKind::StringLiteral => "string literal",
            TokenKind::NumberLiteral => "number literal",
            TokenKind::TrueLiteral => "'true'",
            TokenKind::FalseLiteral => "'false'",
            TokenKind::Operator => "operator",
            TokenKind::AssignmentOperator => "'='",
            TokenKind::OpenParen => "'('",
            TokenKind::CloseParen => "')'",
            TokenKind::ArgumentSeparator => "','",
            TokenKind::StatementEnd => "';'",
            TokenKind::BlockBegin => "'{'",
            TokenKind::BlockEnd => "'}'",
            TokenKind::ArrayLookupOpen => "'['",
            TokenKind::ArrayLookupClose => "']'",
            TokenKind::Function => "'function'",
            TokenKind::Echo => "'echo'",
            TokenKind::If => "'if'",
            TokenKind::Else => "'else'",
            TokenKind::Return => "'return'",
            TokenKind::While => "'while'",
        };
        f.write_str(s)
    }
}

/// Canonical token text mapped to its kind.
///
/// The scanner matches these case-insensitively, longest entry first. Note
/// that the word operators `and`, `or` and `xor` share
/// [`TokenKind::Operator`] with punctuation such as `+`, which is why keyword
/// classification also looks at the matched text.
pub const TOKEN_TABLE: &[(&str, TokenKind)] = &[
    // keywords
    ("function", TokenKind::Function),
    ("echo", TokenKind::Echo),
    ("if", TokenKind::If),
    ("else", TokenKind::Else),
    ("return", TokenKind::Return),
    ("while", TokenKind::While),
    ("true", TokenKind::TrueLiteral),
    ("false", TokenKind::FalseLiteral),
    ("and", TokenKind::Operator),
    ("or", TokenKind::Operator),
    ("xor", TokenKind::Operator),
    // punctuation
    ("(", TokenKind::OpenParen),
    (")", TokenKind::CloseParen),
    (",", TokenKind::ArgumentSeparator),
    (";", TokenKind::StatementEnd),
    ("{", TokenKind::BlockBegin),
    ("}", TokenKind::BlockEnd),
    ("[", TokenKind::ArrayLookupOpen),
    ("]", TokenKind::ArrayLookupClose),
    // assignment
    ("=", TokenKind::AssignmentOperator),
    // operators
    ("+=", TokenKind::Operator),
    ("-=", TokenKind::Operator),
    ("*=", TokenKind::Operator),
    ("/=", TokenKind::Operator),
    (".=", TokenKind::Operator),
    ("%=", TokenKind::Operator),
    ("===", TokenKind::Operator),
    ("!==", TokenKind::Operator),
    ("==", TokenKind::Operator),
    ("!=", TokenKind::Operator),
    ("<>", TokenKind::Operator),
    ("<=", TokenKind::Operator),
    (">=", TokenKind::Operator),
    ("&&", TokenKind::Operator),
    ("||", TokenKind::Operator),
    ("++", TokenKind::Operator),
    ("--", TokenKind::Operator),
    ("=>", TokenKind::Operator),
    ("->", TokenKind::Operator),
    ("::", TokenKind::Operator),
    ("+", TokenKind::Operator),
    ("-", TokenKind::Operator),
    ("*", TokenKind::Operator),
    ("/", TokenKind::Operator),
    ("%", TokenKind::Operator),
    (".", TokenKind::Operator),
    ("<", TokenKind::Operator),
    (">", TokenKind::Operator),
    ("!", TokenKind::Operator),
    ("&", TokenKind::Operator),
    ("|", TokenKind::Operator),
    ("^", TokenKind::Operator),
    ("~", TokenKind::Operator),
    ("?", TokenKind::Operator),
    (":", TokenKind::Operator),
    ("@", TokenKind::Operator),
];

/// A location in the scanned input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct Position<'src> {
    /// Byte offset from the start of the input
    pub offset: usize,

    /// Line number (1-based)
    pub line: usize,

    /// Name of the file the input came from, possibly empty
    pub file: &'src str,
}

/// One scanned token. Immutable once emitted.
///
/// For every kind except [`TokenKind::Error`], `text` is exactly the input
/// between `begin` and `end`, borrowed. Error items own their formatted
/// diagnostic instead.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Item<'src> {
    pub kind: TokenKind,
    pub text: Cow<'src, str>,
    pub begin: Position<'src>,
    pub end: Position<'src>,
}

impl<'src> Item<'src> {
    /// An end-of-input item at `pos`.
    pub fn eof(pos: Position<'src>) -> Self {
        Item {
            kind: TokenKind::EOF,
            text: Cow::Borrowed(""),
            begin: pos,
            end: pos,
        }
    }
}

impl fmt::Display for Item<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            TokenKind::EOF => write!(f, "EOF"),
            TokenKind::Error => write!(f, "{}", self.text),
            _ if self.text.chars().count() > 16 => {
                let head: String = self.text.chars().take(16).collect();
                write!(f, "{:?}...", head)
            }
            _ => write!(f, "{:?}", self.text),
        }
    }
}
