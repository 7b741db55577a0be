//! Keyword classification over the token-kind table.

use std::collections::HashSet;
use std::sync::OnceLock;

use phparse_syntax::token::{TokenKind, TOKEN_TABLE};

/// Kinds that have at least one alphabetic spelling in the token table.
fn keyword_kinds() -> &'static HashSet<TokenKind> {
    static KEYWORDS: OnceLock<HashSet<TokenKind>> = OnceLock::new();
    KEYWORDS.get_or_init(|| {
        TOKEN_TABLE
            .iter()
            .filter(|(text, _)| text.starts_with(|c: char| c.is_ascii_alphabetic()))
            .map(|&(_, kind)| kind)
            .collect()
    })
}

/// Token table entries ordered longest first, for longest-match scanning.
pub(crate) fn by_length() -> &'static [(&'static str, TokenKind)] {
    static SORTED: OnceLock<Vec<(&'static str, TokenKind)>> = OnceLock::new();
    SORTED.get_or_init(|| {
        let mut entries = TOKEN_TABLE.to_vec();
        entries.sort_by(|a, b| b.0.len().cmp(&a.0.len()));
        entries
    })
}

/// Reports whether `text`, scanned as `kind`, is a keyword that must not be
/// split off the front of a longer identifier.
///
/// `kind` alone is not enough: `and` and `+` are both
/// [`TokenKind::Operator`], but only `and` is a word.
pub fn is_keyword(kind: TokenKind, text: &str) -> bool {
    keyword_kinds().contains(&kind) && !is_non_alpha_operator(text)
}

fn is_non_alpha_operator(text: &str) -> bool {
    !text.chars().any(|c| c.is_ascii_alphanumeric())
}
