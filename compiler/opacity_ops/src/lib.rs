//! Opacity Ops - keyword table, primitive operators and errors for the reducer.
//!
//! This crate holds the collaborators the reduction engine consumes through
//! narrow interfaces:
//! - [`KeywordTable`]: operator names to opcodes, with an [`AliasRemap`]
//! - [`OperatorRegistry`]: opcodes to [`PrimitiveOp`]s
//! - [`has_unbound_values`]: the partial-evaluation placeholder test
//! - [`ReduceError`], [`ReduceResult`]: the shared error type

pub mod errors;
mod keywords;
mod operators;
mod registry;

pub use errors::{ReduceError, ReduceErrorKind, ReduceResult};
pub use keywords::{
    AliasRemap, KeywordTable, Opcode, DEFAULT_OPERATOR, STANDARD_ALIASES, STANDARD_KEYWORDS,
};
pub use operators::{has_unbound_values, PrimitiveOp};
pub use registry::OperatorRegistry;
