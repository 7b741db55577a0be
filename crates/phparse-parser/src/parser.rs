//! Recursive-descent parser over a replaying token stream.
//!
//! Every grammar method starts with `current` on the first token of its
//! construct and returns with `current` on the construct's last token; the
//! caller advances past it.

use phparse_lexer::{Lexer, Stream, TokenCursor};
use phparse_syntax::ast::*;
use phparse_syntax::error::{Error, Result};
use phparse_syntax::token::{Item, Position, TokenKind};

/// Parser over any [`Stream`] of PHP tokens.
///
/// Whitespace and comments are dropped as tokens are pulled. Tokens that have
/// been pulled are kept so the parser can [`backup`](Self::backup) without
/// touching the stream again.
pub struct Parser<'src, S> {
    stream: S,
    /// Significant tokens pulled so far.
    seen: Vec<Item<'src>>,
    /// How many entries of `seen` have been consumed; `current` is the last.
    idx: usize,
    current: Item<'src>,
    errors: Vec<Error>,
    paren_level: usize,
}

impl<'src> Parser<'src, TokenCursor<'src, Lexer<'src>>> {
    /// Create a parser that scans `input`. `file` labels positions.
    pub fn new(input: &'src str, file: &'src str) -> Self {
        Self::from_stream(phparse_lexer::open(input, file))
    }
}

impl<'src, S: Stream<'src>> Parser<'src, S> {
    pub fn from_stream(stream: S) -> Self {
        Self {
            stream,
            seen: Vec::new(),
            idx: 0,
            current: Item::eof(Position::default()),
            errors: Vec::new(),
            paren_level: 0,
        }
    }

    /// Errors recorded so far. Parsing stops at the first one.
    pub fn errors(&self) -> &[Error] {
        &self.errors
    }

    pub fn into_errors(self) -> Vec<Error> {
        self.errors
    }

    /// Parse top-level nodes until end of input or the first error. On error
    /// the nodes completed before it are returned and the error is available
    /// from [`errors`](Self::errors).
    pub fn parse_program(&mut self) -> Program {
        let mut program = Program::default();
        loop {
            self.advance();
            if self.current.kind == TokenKind::EOF {
                break;
            }
            match self.parse_node() {
                Ok(Some(node)) => program.nodes.push(node),
                Ok(None) => {}
                Err(_) => break,
            }
        }
        program
    }

    fn advance(&mut self) {
        if self.idx == self.seen.len() {
            let item = self.pull();
            self.seen.push(item);
        }
        self.current = self.seen[self.idx].clone();
        self.idx += 1;
    }

    /// Next significant token from the stream, or EOF once it runs dry.
    fn pull(&mut self) -> Item<'src> {
        while let Some(item) = self.stream.next() {
            if !item.kind.is_trivia() {
                return item;
            }
        }
        let end = self.seen.last().map(|i| i.end).unwrap_or_default();
        Item::eof(end)
    }

    /// Step back one token.
    fn backup(&mut self) {
        debug_assert!(self.idx > 1, "backup before the first token");
        if self.idx > 1 {
            self.idx -= 1;
            self.current = self.seen[self.idx - 1].clone();
        }
    }

    fn expect(&mut self, kind: TokenKind) -> Result<()> {
        self.advance();
        if self.current.kind != kind {
            return self.expected(&kind.to_string());
        }
        Ok(())
    }

    fn expected<T>(&mut self, what: &str) -> Result<T> {
        // A lexical error ends the stream; report its own diagnostic.
        if self.current.kind == TokenKind::Error {
            let msg = self.current.text.to_string();
            return self.errorf(msg);
        }
        let msg = format!("found {}, expected {}", self.current, what);
        self.errorf(msg)
    }

    fn errorf<T>(&mut self, msg: String) -> Result<T> {
        let err = Error::at(msg, &self.current.begin);
        self.errors.push(err.clone());
        Err(err)
    }

    fn parse_node(&mut self) -> Result<Option<Stmt>> {
        match self.current.kind {
            TokenKind::HTML => Ok(Some(Stmt::Echo(self.literal(LiteralType::String)))),
            TokenKind::PHPBegin | TokenKind::PHPEnd => Ok(None),
            _ => self.parse_stmt().map(Some),
        }
    }

    fn parse_stmt(&mut self) -> Result<Stmt> {
        match self.current.kind {
            TokenKind::BlockBegin => Ok(Stmt::Block(self.parse_block()?)),
            TokenKind::Identifier => self.parse_assignment(),
            TokenKind::Function => Ok(Stmt::Function(self.parse_function()?)),
            TokenKind::Echo => {
                self.advance();
                let expr = self.parse_expression()?;
                self.expect(TokenKind::StatementEnd)?;
                Ok(Stmt::Echo(expr))
            }
            TokenKind::If => self.parse_if(),
            TokenKind::NonVariableIdentifier => {
                let expr = self.parse_expression()?;
                self.expect(TokenKind::StatementEnd)?;
                Ok(Stmt::Expr(expr))
            }
            _ => self.expected("statement"),
        }
    }

    /// `{ stmt* }`, with `current` on the `{`.
    ///
    /// Template text between `?>` and `<?php` inside a block becomes echo
    /// statements, as it does at the top level.
    fn parse_block(&mut self) -> Result<Block> {
        let mut block = Block::default();
        self.advance();
        if self.current.kind == TokenKind::BlockEnd {
            return Ok(block);
        }
        self.backup();
        loop {
            self.advance();
            if let Some(stmt) = self.parse_node()? {
                block.statements.push(stmt);
            }
            self.advance();
            if self.current.kind == TokenKind::BlockEnd {
                break;
            }
            self.backup();
        }
        Ok(block)
    }

    fn parse_assignment(&mut self) -> Result<Stmt> {
        let assignee = Identifier::new(variable_name(&self.current.text));
        self.expect(TokenKind::AssignmentOperator)?;
        self.advance();
        let value = self.parse_expression()?;
        self.expect(TokenKind::StatementEnd)?;
        Ok(Stmt::Assignment { assignee, value })
    }

    fn parse_function(&mut self) -> Result<Function> {
        self.expect(TokenKind::NonVariableIdentifier)?;
        let name = self.current.text.to_string();
        self.expect(TokenKind::OpenParen)?;
        let mut params = Vec::new();
        loop {
            self.advance();
            if self.current.kind == TokenKind::CloseParen {
                break;
            }
            self.backup();
            if !params.is_empty() {
                self.expect(TokenKind::ArgumentSeparator)?;
            }
            self.expect(TokenKind::Identifier)?;
            params.push(Identifier::new(variable_name(&self.current.text)));
        }
        self.expect(TokenKind::BlockBegin)?;
        let body = self.parse_block()?;
        Ok(Function { name, params, body })
    }

    fn parse_if(&mut self) -> Result<Stmt> {
        self.expect(TokenKind::OpenParen)?;
        self.advance();
        let condition = self.parse_expression()?;
        self.expect(TokenKind::CloseParen)?;
        self.advance();
        let then_branch = self.parse_stmt()?;
        self.advance();
        let else_branch = if self.current.kind == TokenKind::Else {
            self.advance();
            self.parse_stmt()?
        } else {
            self.backup();
            Stmt::Block(Block::default())
        };
        Ok(Stmt::If {
            condition,
            then_branch: Box::new(then_branch),
            else_branch: Box::new(else_branch),
        })
    }

    /// Scan an expression left to right.
    ///
    /// There is no precedence: the result is the last literal seen, or the
    /// first function call, or [`Expr::Unknown`]. A call must be followed
    /// only by the parentheses still open around it. The token that ends the
    /// expression is left for the caller.
    fn parse_expression(&mut self) -> Result<Expr> {
        let outer = std::mem::replace(&mut self.paren_level, 0);
        let expr = self.scan_expression();
        self.paren_level = outer;
        expr
    }

    fn scan_expression(&mut self) -> Result<Expr> {
        let mut expr = Expr::Unknown;
        loop {
            match self.current.kind {
                TokenKind::StringLiteral => expr = self.literal(LiteralType::String),
                TokenKind::NumberLiteral => expr = self.literal(LiteralType::Float),
                TokenKind::TrueLiteral | TokenKind::FalseLiteral => {
                    expr = self.literal(LiteralType::Boolean)
                }
                TokenKind::Operator | TokenKind::AssignmentOperator | TokenKind::Identifier => {}
                TokenKind::OpenParen => self.paren_level += 1,
                TokenKind::CloseParen => {
                    if self.paren_level == 0 {
                        break;
                    }
                    self.paren_level -= 1;
                }
                TokenKind::NonVariableIdentifier => {
                    let call = self.parse_call()?;
                    while self.paren_level > 0 {
                        self.expect(TokenKind::CloseParen)?;
                        self.paren_level -= 1;
                    }
                    return Ok(call);
                }
                _ => break,
            }
            self.advance();
        }
        if self.paren_level > 0 {
            return self.expected("')'");
        }
        self.backup();
        Ok(expr)
    }

    /// `name(arg, ...)`, with `current` on the name.
    fn parse_call(&mut self) -> Result<Expr> {
        if self.current.kind != TokenKind::NonVariableIdentifier {
            return self.expected("identifier");
        }
        let name = self.current.text.to_string();
        self.expect(TokenKind::OpenParen)?;
        let mut args = Vec::new();
        loop {
            self.advance();
            if self.current.kind == TokenKind::CloseParen {
                break;
            }
            if !args.is_empty() {
                if self.current.kind != TokenKind::ArgumentSeparator {
                    return self.expected("','");
                }
                self.advance();
            }
            if matches!(
                self.current.kind,
                TokenKind::ArgumentSeparator | TokenKind::CloseParen
            ) {
                return self.expected("expression");
            }
            args.push(self.parse_expression()?);
        }
        Ok(Expr::Call { name, args })
    }

    fn literal(&self, ty: LiteralType) -> Expr {
        Expr::Literal(Literal::new(ty, &*self.current.text))
    }
}

fn variable_name(text: &str) -> &str {
    text.strip_prefix('$').unwrap_or(text)
}
