//! The `Term` value type.

use std::fmt;
use std::sync::{Arc, OnceLock};

use crate::atom::{bytes_to_int, int_to_bytes, is_truthy_bytes};
use crate::list::ListIter;

/// An Opacity S-expression.
///
/// Cloning is cheap: atoms and pairs are reference counted.
#[derive(Clone)]
pub enum Term {
    /// Opaque bytes, read as an integer or boolean when needed.
    Atom(Arc<[u8]>),
    /// Reference to environment slot `index`.
    ///
    /// Deliberately not an atom: the dispatcher tests for atoms first and
    /// must not treat references as literals.
    Var(u32),
    /// A cons cell. Lists are chains of these ending in the empty atom.
    Pair(Arc<(Term, Term)>),
}

impl Term {
    // Construction

    /// The empty atom: the empty list, integer zero, and false.
    #[inline]
    pub fn nil() -> Self {
        static EMPTY: OnceLock<Arc<[u8]>> = OnceLock::new();
        Term::Atom(Arc::clone(EMPTY.get_or_init(|| Arc::from(&[][..]))))
    }

    /// The canonical true atom (integer one).
    #[inline]
    pub fn truth() -> Self {
        Term::int(1)
    }

    /// `truth()` or `nil()` depending on `value`.
    #[inline]
    pub fn from_bool(value: bool) -> Self {
        if value {
            Term::truth()
        } else {
            Term::nil()
        }
    }

    /// An atom holding `bytes` verbatim.
    #[inline]
    pub fn atom(bytes: &[u8]) -> Self {
        Term::Atom(Arc::from(bytes))
    }

    /// An atom holding the minimal encoding of `value`.
    #[inline]
    pub fn int(value: i64) -> Self {
        Term::Atom(Arc::from(int_to_bytes(value)))
    }

    /// A variable reference to environment slot `index`.
    #[inline]
    pub fn var(index: u32) -> Self {
        Term::Var(index)
    }

    #[inline]
    pub fn cons(first: Term, rest: Term) -> Self {
        Term::Pair(Arc::new((first, rest)))
    }

    /// Build a proper list from `items`.
    pub fn list<I>(items: I) -> Self
    where
        I: IntoIterator<Item = Term>,
        I::IntoIter: DoubleEndedIterator,
    {
        Term::list_with_tail(items, Term::nil())
    }

    /// Build a list whose final `rest` is `tail` instead of the empty atom.
    pub fn list_with_tail<I>(items: I, tail: Term) -> Self
    where
        I: IntoIterator<Item = Term>,
        I::IntoIter: DoubleEndedIterator,
    {
        items
            .into_iter()
            .rev()
            .fold(tail, |rest, item| Term::cons(item, rest))
    }

    // Shape predicates

    #[inline]
    pub fn is_atom(&self) -> bool {
        matches!(self, Term::Atom(_))
    }

    #[inline]
    pub fn is_var(&self) -> bool {
        matches!(self, Term::Var(_))
    }

    /// A pair, i.e. a non-empty list.
    #[inline]
    pub fn is_pair(&self) -> bool {
        matches!(self, Term::Pair(_))
    }

    /// The empty atom.
    #[inline]
    pub fn is_nil(&self) -> bool {
        matches!(self, Term::Atom(bytes) if bytes.is_empty())
    }

    /// Either the empty list or a pair.
    #[inline]
    pub fn is_list(&self) -> bool {
        self.is_pair() || self.is_nil()
    }

    // Accessors

    #[inline]
    pub fn as_atom(&self) -> Option<&[u8]> {
        match self {
            Term::Atom(bytes) => Some(&bytes[..]),
            _ => None,
        }
    }

    #[inline]
    pub fn as_pair(&self) -> Option<(&Term, &Term)> {
        match self {
            Term::Pair(pair) => Some((&pair.0, &pair.1)),
            _ => None,
        }
    }

    /// Integer coercion. `None` for non-atoms or atoms wider than `i64`.
    #[inline]
    pub fn as_int(&self) -> Option<i64> {
        self.as_atom().and_then(bytes_to_int)
    }

    /// The environment slot a variable reference names.
    #[inline]
    pub fn var_index(&self) -> Option<usize> {
        match self {
            Term::Var(index) => usize::try_from(*index).ok(),
            _ => None,
        }
    }

    /// Boolean coercion: atoms by integer value, everything else is true.
    #[inline]
    pub fn is_truthy(&self) -> bool {
        match self {
            Term::Atom(bytes) => is_truthy_bytes(bytes),
            Term::Var(_) | Term::Pair(_) => true,
        }
    }

    #[inline]
    pub fn first(&self) -> Option<&Term> {
        self.as_pair().map(|(first, _)| first)
    }

    #[inline]
    pub fn rest(&self) -> Option<&Term> {
        self.as_pair().map(|(_, rest)| rest)
    }

    // List operations

    /// Iterate the elements of this list.
    #[inline]
    pub fn iter(&self) -> ListIter<'_> {
        ListIter::new(self)
    }

    /// Number of elements before the terminator.
    pub fn list_len(&self) -> usize {
        self.iter().count()
    }

    /// Element `index` of this list.
    pub fn nth(&self, index: usize) -> Option<&Term> {
        self.iter().nth(index)
    }

    /// The list with its first `count` elements dropped (`form[count:]`).
    ///
    /// Shares structure with `self`. `None` if the list has fewer than
    /// `count` elements.
    pub fn tail(&self, count: usize) -> Option<&Term> {
        let mut cursor = self;
        for _ in 0..count {
            cursor = cursor.rest()?;
        }
        Some(cursor)
    }

    /// Clone the elements into a `Vec`.
    pub fn to_vec(&self) -> Vec<Term> {
        self.iter().cloned().collect()
    }

    /// A bounded [`Debug`](fmt::Debug) rendering for logs: at most `limit`
    /// sub-terms are printed.
    pub fn abbreviated(&self, limit: usize) -> Abbreviated<'_> {
        Abbreviated { term: self, limit }
    }

    /// Whether a variable reference appears anywhere in this term.
    pub fn contains_var(&self) -> bool {
        let mut pending = vec![self];
        while let Some(term) = pending.pop() {
            match term {
                Term::Var(_) => return true,
                Term::Pair(pair) => {
                    pending.push(&pair.1);
                    pending.push(&pair.0);
                }
                Term::Atom(_) => {}
            }
        }
        false
    }
}

impl Default for Term {
    fn default() -> Self {
        Term::nil()
    }
}

impl From<i64> for Term {
    fn from(value: i64) -> Self {
        Term::int(value)
    }
}

impl From<&[u8]> for Term {
    fn from(bytes: &[u8]) -> Self {
        Term::atom(bytes)
    }
}

impl PartialEq for Term {
    fn eq(&self, other: &Self) -> bool {
        let mut pending = vec![(self, other)];
        while let Some((left, right)) = pending.pop() {
            match (left, right) {
                (Term::Atom(a), Term::Atom(b)) => {
                    if a != b {
                        return false;
                    }
                }
                (Term::Var(a), Term::Var(b)) => {
                    if a != b {
                        return false;
                    }
                }
                (Term::Pair(a), Term::Pair(b)) => {
                    if Arc::ptr_eq(a, b) {
                        continue;
                    }
                    pending.push((&a.1, &b.1));
                    pending.push((&a.0, &b.0));
                }
                _ => return false,
            }
        }
        true
    }
}

impl Eq for Term {}

impl Drop for Term {
    // Uniquely owned pair children are detached onto a work list, so dropping a
    // long or deep term never recurses through nested `Arc` drops.
    fn drop(&mut self) {
        let mut pending = Vec::new();
        detach_children(self, &mut pending);
        while let Some(mut term) = pending.pop() {
            detach_children(&mut term, &mut pending);
        }
    }
}

/// Move the pair children of a uniquely owned pair into `pending`.
///
/// The vacated slots hold `Var(0)`, which owns nothing.
fn detach_children(term: &mut Term, pending: &mut Vec<Term>) {
    let Term::Pair(pair) = term else {
        return;
    };
    let Some((first, rest)) = Arc::get_mut(pair) else {
        return;
    };
    if first.is_pair() {
        pending.push(std::mem::replace(first, Term::Var(0)));
    }
    if rest.is_pair() {
        pending.push(std::mem::replace(rest, Term::Var(0)));
    }
}

impl fmt::Debug for Term {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_term(self, f, usize::MAX)
    }
}

/// A [`Debug`](fmt::Debug) rendering that stops after a fixed number of
/// sub-terms, printing `...` for the rest. See [`Term::abbreviated`].
#[derive(Clone, Copy)]
pub struct Abbreviated<'a> {
    term: &'a Term,
    limit: usize,
}

impl fmt::Debug for Abbreviated<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_term(self.term, f, self.limit)
    }
}

enum Piece<'a> {
    Term(&'a Term),
    Text(&'static str),
}

/// Render `term`, visiting at most `limit` sub-terms.
///
/// Walks an explicit stack of pending pieces, so nesting depth never turns
/// into native recursion.
fn write_term(term: &Term, f: &mut fmt::Formatter<'_>, limit: usize) -> fmt::Result {
    let mut budget = limit;
    let mut pending = vec![Piece::Term(term)];
    while let Some(piece) = pending.pop() {
        let term = match piece {
            Piece::Text(text) => {
                f.write_str(text)?;
                continue;
            }
            Piece::Term(term) => term,
        };
        if budget == 0 {
            f.write_str("...")?;
            // close what is already open, drop everything else
            for piece in pending.drain(..).rev() {
                if let Piece::Text(")") = piece {
                    f.write_str(")")?;
                }
            }
            break;
        }
        budget -= 1;
        match term {
            Term::Atom(bytes) => fmt_atom(bytes, f)?,
            Term::Var(index) => write!(f, "x{index}")?,
            Term::Pair(_) => {
                let mut items = term.iter();
                let shown: Vec<&Term> = items.by_ref().take(budget.max(1)).collect();
                let tail = items.remainder();
                pending.push(Piece::Text(")"));
                if tail.is_pair() {
                    pending.push(Piece::Text(" ..."));
                } else if !tail.is_nil() {
                    pending.push(Piece::Term(tail));
                    pending.push(Piece::Text(" . "));
                }
                for (position, item) in shown.into_iter().enumerate().rev() {
                    pending.push(Piece::Term(item));
                    if position > 0 {
                        pending.push(Piece::Text(" "));
                    }
                }
                f.write_str("(")?;
            }
        }
    }
    Ok(())
}

/// Canonical integers print in decimal; any other bytes print as hex.
fn fmt_atom(bytes: &[u8], f: &mut fmt::Formatter<'_>) -> fmt::Result {
    if bytes.is_empty() {
        return f.write_str("()");
    }
    match bytes_to_int(bytes) {
        Some(value) if int_to_bytes(value).as_slice() == bytes => write!(f, "{value}"),
        _ => {
            f.write_str("0x")?;
            for byte in bytes {
                write!(f, "{byte:02x}")?;
            }
            Ok(())
        }
    }
}
