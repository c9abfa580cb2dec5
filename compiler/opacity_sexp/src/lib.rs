//! Opacity S-expressions - the term type programs and environments are built from.
//!
//! A [`Term`] is either an atom (an opaque byte string that doubles as an
//! integer and a boolean), a variable reference into the current environment,
//! or a pair of two terms. Lists are the usual right-nested pair chains
//! terminated by the empty atom.
//!
//! # Design
//!
//! - Terms are immutable. Pairs are reference counted, so returning a sub-term
//!   of the input is a pointer bump, never a copy.
//! - Equality and variable scans walk an explicit work stack, so deep terms
//!   don't exhaust the native stack.
//! - Integer coercion uses minimal big-endian two's complement; the empty atom
//!   is both zero and false.

mod atom;
mod list;
mod term;

pub use atom::{bytes_to_int, int_to_bytes, is_truthy_bytes};
pub use list::ListIter;
pub use term::{Abbreviated, Term};
