//! The scanner's state functions.
//!
//! Scanning starts in [`lex_html`] and moves into PHP mode at each open tag.
//! Every state either returns the next state or `None` once it has emitted
//! [`TokenKind::EOF`] or an error.

use phparse_syntax::token::TokenKind;

use crate::keyword::{by_length, is_keyword};
use crate::scanner::{Lexer, StateFn};

const OPEN_TAG: &str = "<?php";
const SHORT_OPEN_TAG: &str = "<?";
const CLOSE_TAG: &str = "?>";

const DIGITS: &str = "0123456789_";
const HEX_DIGITS: &str = "0123456789abcdefABCDEF_";

fn is_ident_start(c: char) -> bool {
    c.is_alphabetic() || c == '_' || !c.is_ascii()
}

fn is_ident_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_' || !c.is_ascii()
}

/// Passthrough text up to the next open tag.
pub(crate) fn lex_html(l: &mut Lexer<'_>) -> Option<StateFn> {
    loop {
        if l.rest().starts_with(SHORT_OPEN_TAG) {
            if !l.pending().is_empty() {
                l.emit(TokenKind::HTML);
            }
            return Some(StateFn(lex_php_begin));
        }
        if l.advance().is_none() {
            break;
        }
    }
    if !l.pending().is_empty() {
        l.emit(TokenKind::HTML);
    }
    l.emit(TokenKind::EOF);
    None
}

pub(crate) fn lex_php_begin(l: &mut Lexer<'_>) -> Option<StateFn> {
    if !l.accept_prefix(OPEN_TAG) {
        l.accept_prefix(SHORT_OPEN_TAG);
    }
    l.emit(TokenKind::PHPBegin);
    Some(StateFn(lex_php))
}

pub(crate) fn lex_php_end(l: &mut Lexer<'_>) -> Option<StateFn> {
    l.accept_prefix(CLOSE_TAG);
    l.emit(TokenKind::PHPEnd);
    Some(StateFn(lex_html))
}

/// Dispatch on the next characters of PHP code.
pub(crate) fn lex_php(l: &mut Lexer<'_>) -> Option<StateFn> {
    if l.accept_while(char::is_whitespace) > 0 {
        l.emit(TokenKind::Space);
        return Some(StateFn(lex_php));
    }

    let rest = l.rest();
    let mut chars = rest.chars();
    let (first, second) = match chars.next() {
        Some(c) => (c, chars.next()),
        None => {
            l.emit(TokenKind::EOF);
            return None;
        }
    };

    if rest.starts_with(CLOSE_TAG) {
        return Some(StateFn(lex_php_end));
    }
    match (first, second) {
        ('$', _) => return Some(StateFn(lex_variable)),
        (c, _) if c.is_ascii_digit() => return Some(StateFn(lex_number)),
        ('.', Some(c)) if c.is_ascii_digit() => return Some(StateFn(lex_number)),
        ('"', _) => return Some(StateFn(lex_double_quoted)),
        ('\'', _) => return Some(StateFn(lex_single_quoted)),
        ('#', _) | ('/', Some('/')) => return Some(StateFn(lex_line_comment)),
        ('/', Some('*')) => return Some(StateFn(lex_block_comment)),
        _ => {}
    }

    for &(text, kind) in by_length() {
        let Some(head) = rest.get(..text.len()) else {
            continue;
        };
        if !head.eq_ignore_ascii_case(text) {
            continue;
        }
        // `iffy` is an identifier, not `if` followed by `fy`.
        let continues_word = rest[text.len()..].starts_with(is_ident_char);
        if is_keyword(kind, head) && continues_word {
            break;
        }
        l.accept_prefix(text);
        l.emit(kind);
        return Some(StateFn(lex_php));
    }

    if is_ident_start(first) || first == '\\' {
        return Some(StateFn(lex_identifier));
    }
    l.errorf(format!("unexpected character {:?}", first))
}

/// `$name`, including variable variables such as `$$name`.
pub(crate) fn lex_variable(l: &mut Lexer<'_>) -> Option<StateFn> {
    l.accept_run("$");
    match l.peek() {
        Some(c) if is_ident_start(c) => {
            l.accept_while(is_ident_char);
            l.emit(TokenKind::Identifier);
            Some(StateFn(lex_php))
        }
        _ => l.errorf("expected variable name after '$'".to_string()),
    }
}

/// Bare names, optionally namespace-qualified with `\`.
pub(crate) fn lex_identifier(l: &mut Lexer<'_>) -> Option<StateFn> {
    l.accept_while(|c| is_ident_char(c) || c == '\\');
    l.emit(TokenKind::NonVariableIdentifier);
    Some(StateFn(lex_php))
}

pub(crate) fn lex_number(l: &mut Lexer<'_>) -> Option<StateFn> {
    if l.accept("0") {
        if l.accept("xX") {
            l.accept_run(HEX_DIGITS);
            l.emit(TokenKind::NumberLiteral);
            return Some(StateFn(lex_php));
        }
        if l.accept("bB") {
            l.accept_run("01_");
            l.emit(TokenKind::NumberLiteral);
            return Some(StateFn(lex_php));
        }
    }
    l.accept_run(DIGITS);
    if l.accept(".") {
        l.accept_run(DIGITS);
    }
    if l.accept("eE") {
        l.accept("+-");
        if l.accept_while(|c| c.is_ascii_digit()) == 0 {
            return l.errorf(format!("malformed number {:?}", l.pending()));
        }
    }
    l.emit(TokenKind::NumberLiteral);
    Some(StateFn(lex_php))
}

fn lex_quoted(l: &mut Lexer<'_>, quote: char) -> Option<StateFn> {
    l.advance();
    loop {
        match l.advance() {
            None => return l.errorf("unterminated string".to_string()),
            Some('\\') => {
                l.advance();
            }
            Some(c) if c == quote => break,
            Some(_) => {}
        }
    }
    l.emit(TokenKind::StringLiteral);
    Some(StateFn(lex_php))
}

pub(crate) fn lex_double_quoted(l: &mut Lexer<'_>) -> Option<StateFn> {
    lex_quoted(l, '"')
}

pub(crate) fn lex_single_quoted(l: &mut Lexer<'_>) -> Option<StateFn> {
    lex_quoted(l, '\'')
}

/// `// ...` and `# ...`, stopping before the newline or a close tag.
pub(crate) fn lex_line_comment(l: &mut Lexer<'_>) -> Option<StateFn> {
    while !l.at_end() && !l.rest().starts_with(CLOSE_TAG) {
        if l.advance() == Some('\n') {
            l.undo();
            break;
        }
    }
    l.emit(TokenKind::CommentLine);
    Some(StateFn(lex_php))
}

pub(crate) fn lex_block_comment(l: &mut Lexer<'_>) -> Option<StateFn> {
    l.accept_prefix("/*");
    loop {
        if l.accept_prefix("*/") {
            l.emit(TokenKind::CommentBlock);
            return Some(StateFn(lex_php));
        }
        if l.advance().is_none() {
            return l.errorf("unterminated comment".to_string());
        }
    }
}
