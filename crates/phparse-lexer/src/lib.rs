//! phparse lexer: turns PHP source text into a stream of classified tokens.
//!
//! [`Lexer`] walks its input through a chain of state functions and yields
//! [`Item`]s on demand. [`open`] wraps it in a [`TokenCursor`], which remembers
//! every item so consumers can step backwards through the [`Stream`].

mod cursor;
mod keyword;
mod scanner;
mod states;

pub use cursor::{Stream, TokenCursor};
pub use keyword::is_keyword;
pub use scanner::Lexer;

use phparse_syntax::token::Item;

/// Open a replayable token stream over `input`. `file` labels positions.
pub fn open<'src>(input: &'src str, file: &'src str) -> TokenCursor<'src, Lexer<'src>> {
    TokenCursor::new(Lexer::new(input, file))
}

/// Scan all of `input` eagerly. The result ends with an EOF or error item.
pub fn tokenize<'src>(input: &'src str, file: &'src str) -> Vec<Item<'src>> {
    Lexer::new(input, file).collect()
}
