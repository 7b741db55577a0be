//! Scanner state and the primitives the state functions are built from.

use std::borrow::Cow;
use std::collections::VecDeque;

use phparse_syntax::token::{Item, Position, TokenKind};

use crate::states::lex_html;

/// One scanning step: consumes input, emits zero or more items, and returns
/// the step to run next, or `None` once scanning is over.
#[derive(Clone, Copy)]
pub(crate) struct StateFn(pub(crate) for<'a> fn(&mut Lexer<'a>) -> Option<StateFn>);

/// Pull-driven PHP scanner.
///
/// Each call to [`Iterator::next`] runs state functions only until an item is
/// ready, so the scanner never gets ahead of its consumer. Iteration ends after
/// the [`TokenKind::EOF`] item, or right after a [`TokenKind::Error`] item.
pub struct Lexer<'src> {
    input: &'src str,
    file: &'src str,
    /// Offset where the in-flight token begins.
    start: usize,
    /// Current scan offset.
    pos: usize,
    /// Byte width of the last advanced character; zero after an undo.
    width: usize,
    line: usize,
    /// Offset up to which newlines have been counted into `line`.
    last_start: usize,
    state: Option<StateFn>,
    ready: VecDeque<Item<'src>>,
}

impl<'src> Lexer<'src> {
    /// Create a scanner over `input`. `file` only labels positions.
    pub fn new(input: &'src str, file: &'src str) -> Self {
        Self {
            input,
            file,
            start: 0,
            pos: 0,
            width: 0,
            line: 1,
            last_start: 0,
            state: Some(StateFn(lex_html)),
            ready: VecDeque::new(),
        }
    }

    /// Unscanned input.
    pub(crate) fn rest(&self) -> &'src str {
        &self.input[self.pos..]
    }

    /// Text of the in-flight token.
    pub(crate) fn pending(&self) -> &'src str {
        &self.input[self.start..self.pos]
    }

    pub(crate) fn at_end(&self) -> bool {
        self.pos >= self.input.len()
    }

    /// Consume one character, remembering its width for [`undo`](Self::undo).
    pub(crate) fn advance(&mut self) -> Option<char> {
        match self.rest().chars().next() {
            Some(c) => {
                self.width = c.len_utf8();
                self.pos += self.width;
                Some(c)
            }
            None => {
                self.width = 0;
                None
            }
        }
    }

    /// Step back over the last advanced character. Only one level deep: a
    /// second undo without an advance in between does nothing.
    pub(crate) fn undo(&mut self) {
        self.pos -= self.width;
        self.width = 0;
    }

    pub(crate) fn peek(&mut self) -> Option<char> {
        let c = self.advance();
        self.undo();
        c
    }

    /// Consume the next character if it is one of `valid`.
    pub(crate) fn accept(&mut self, valid: &str) -> bool {
        match self.advance() {
            Some(c) if valid.contains(c) => true,
            _ => {
                self.undo();
                false
            }
        }
    }

    /// Consume a run of characters from `valid`.
    pub(crate) fn accept_run(&mut self, valid: &str) {
        self.accept_while(|c| valid.contains(c));
    }

    /// Consume characters while `pred` holds. Returns how many were consumed.
    pub(crate) fn accept_while(&mut self, pred: impl Fn(char) -> bool) -> usize {
        let mut n = 0;
        loop {
            match self.advance() {
                Some(c) if pred(c) => n += 1,
                _ => {
                    self.undo();
                    return n;
                }
            }
        }
    }

    /// Consume `s` if the input continues with it, ignoring ASCII case.
    pub(crate) fn accept_prefix(&mut self, s: &str) -> bool {
        match self.rest().get(..s.len()) {
            Some(head) if head.eq_ignore_ascii_case(s) => {
                self.pos += s.len();
                self.width = 0;
                true
            }
            _ => false,
        }
    }

    fn location(&self) -> Position<'src> {
        Position {
            offset: self.start,
            line: self.line,
            file: self.file,
        }
    }

    fn increment_lines(&mut self) {
        self.line += self.input[self.last_start..self.pos].matches('\n').count();
        self.last_start = self.pos;
    }

    /// Publish `input[start..pos]` as a `kind` item and start the next token.
    pub(crate) fn emit(&mut self, kind: TokenKind) {
        let begin = self.location();
        let text = self.pending();
        self.increment_lines();
        self.start = self.pos;
        let end = self.location();
        self.ready.push_back(Item {
            kind,
            text: Cow::Borrowed(text),
            begin,
            end,
        });
    }

    /// Publish an error item and stop scanning.
    pub(crate) fn errorf(&mut self, msg: String) -> Option<StateFn> {
        let at = self.location();
        self.increment_lines();
        self.ready.push_back(Item {
            kind: TokenKind::Error,
            text: Cow::Owned(msg),
            begin: at,
            end: at,
        });
        None
    }
}

impl<'src> Iterator for Lexer<'src> {
    type Item = Item<'src>;

    fn next(&mut self) -> Option<Item<'src>> {
        loop {
            if let Some(item) = self.ready.pop_front() {
                return Some(item);
            }
            let state = self.state.take()?;
            self.state = (state.0)(self);
        }
    }
}
