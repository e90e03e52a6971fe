use std::vec::IntoIter;

/// A single-token lookahead iterator.
///
/// The grammar here is LL(1): every parser call site only ever needs to look at the next token
/// before deciding whether to consume it, so this doesn't carry the teacher's `peek_nth`/
/// `push_front` multi-token lookahead machinery — there's no call site that needs it.
pub struct PeekIter<T> {
    iter: IntoIter<T>,
    peeked: Option<Option<T>>,
}

impl<T> PeekIter<T> {
    pub fn new(iter: IntoIter<T>) -> Self {
        Self { iter, peeked: None }
    }

    /// Returns a reference to the next value in the iterator, without consuming it, or `None` if
    /// the iteration is complete.
    pub fn peek(&mut self) -> Option<&T> {
        if self.peeked.is_none() {
            self.peeked = Some(self.iter.next());
        }
        self.peeked.as_ref().unwrap().as_ref()
    }
}

impl<T> Iterator for PeekIter<T> {
    type Item = T;

    fn next(&mut self) -> Option<Self::Item> {
        match self.peeked.take() {
            Some(v) => v,
            None => self.iter.next(),
        }
    }
}
