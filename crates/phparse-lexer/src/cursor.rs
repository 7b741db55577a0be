//! Replaying token cursor over a scanner.

use phparse_syntax::token::{Item, TokenKind};

/// A bidirectionally navigable source of tokens.
///
/// `None` plays the role of the zero-value item: it is returned past the end
/// of input and before the first token, and callers are expected to check for
/// it rather than treat it as an error.
pub trait Stream<'src> {
    /// The next token, pulling a new one from the scanner if needed.
    fn next(&mut self) -> Option<Item<'src>>;

    /// Step back one token and return it.
    fn previous(&mut self) -> Option<Item<'src>>;
}

/// Caches every item its scanner has produced so a consumer can rewind any
/// distance without the scanner running again.
///
/// The cache only grows; an index that was valid once stays valid.
pub struct TokenCursor<'src, I> {
    source: I,
    items: Vec<Item<'src>>,
    pos: usize,
}

impl<'src, I> TokenCursor<'src, I>
where
    I: Iterator<Item = Item<'src>>,
{
    pub fn new(source: I) -> Self {
        Self {
            source,
            items: Vec::new(),
            pos: 0,
        }
    }

    /// Number of items returned by `next` and not stepped back over.
    pub fn position(&self) -> usize {
        self.pos
    }

    /// Every item pulled from the scanner so far, in order.
    pub fn cached(&self) -> &[Item<'src>] {
        &self.items
    }
}

impl<'src, I> Stream<'src> for TokenCursor<'src, I>
where
    I: Iterator<Item = Item<'src>>,
{
    fn next(&mut self) -> Option<Item<'src>> {
        if self.pos > 0 && self.items[self.pos - 1].kind == TokenKind::EOF {
            return None;
        }

        if self.pos < self.items.len() {
            let item = self.items[self.pos].clone();
            self.pos += 1;
            return Some(item);
        }

        let item = self.source.next()?;
        self.items.push(item.clone());
        self.pos += 1;
        Some(item)
    }

    fn previous(&mut self) -> Option<Item<'src>> {
        if self.pos == 0 {
            return None;
        }
        self.pos -= 1;
        Some(self.items[self.pos].clone())
    }
}
