//! Iteration over the list convention of nested pairs.

use crate::Term;

/// Borrowing iterator over the elements of a pair chain.
///
/// Iteration stops at the first non-pair tail. For a proper list that tail
/// is the empty atom; [`ListIter::remainder`] exposes it either way so
/// callers rebuilding a list can keep an improper tail intact.
#[derive(Clone, Debug)]
pub struct ListIter<'a> {
    cursor: &'a Term,
}

impl<'a> ListIter<'a> {
    pub(crate) fn new(list: &'a Term) -> Self {
        ListIter { cursor: list }
    }

    /// The part of the chain not yet yielded.
    ///
    /// Once the iterator is exhausted this is the list's terminator.
    #[inline]
    pub fn remainder(&self) -> &'a Term {
        self.cursor
    }
}

impl<'a> Iterator for ListIter<'a> {
    type Item = &'a Term;

    #[inline]
    fn next(&mut self) -> Option<&'a Term> {
        let (first, rest) = self.cursor.as_pair()?;
        self.cursor = rest;
        Some(first)
    }
}

impl std::iter::FusedIterator for ListIter<'_> {}
