//! Opacity Reduce - a substitution-based reducer for Opacity S-expressions.
//!
//! Programs are terms. A list whose head atom names a special form controls
//! how its operands are evaluated; a list headed by a primitive operator
//! reduces its operands and computes; any other list is rebuilt with its
//! operands reduced. Variable references are replaced by the corresponding
//! environment slot, or left in place when the environment has none, which
//! is what allows programs to be partially evaluated.
//!
//! # Example
//!
//! ```
//! use opacity_reduce::{Reducer, Term};
//!
//! let reducer = Reducer::standard();
//! let add = reducer.keyword("+").unwrap();
//! let program = Term::list([add, Term::var(0), Term::int(2)]);
//! let env = Term::list([Term::int(40)]);
//! assert_eq!(reducer.reduce(&program, &env).unwrap(), Term::int(42));
//! ```
//!
//! # Extension points
//!
//! Every step goes through [`ReduceContext::dispatch`]. Pass a custom
//! dispatcher to [`Reducer::reduce_with`] to count steps, enforce a budget or
//! trace evaluation; delegate to [`default_dispatch`] for the standard
//! behaviour. [`traced_dispatch`] is a ready-made tracing wrapper.

mod context;
mod dispatch;
mod quasiquote;
mod reducer;
mod special_forms;
mod stack;
mod table;
mod tracing_setup;

pub use context::{reduce_fn, ReduceContext, ReduceFn};
pub use dispatch::{
    apply_op, default_dispatch, recursive_reduce, reduce_atom, reduce_list, resolver_for_env,
};
pub use reducer::{reduce, Reducer, ReducerBuilder};
pub use special_forms::SpecialForm;
pub use stack::ensure_sufficient_stack;
pub use table::{DispatchTable, Handler};
pub use tracing_setup::{init_tracing, traced_dispatch};

pub use opacity_ops::{
    has_unbound_values, AliasRemap, KeywordTable, Opcode, PrimitiveOp, ReduceError,
    ReduceErrorKind, ReduceResult,
};
pub use opacity_sexp::Term;
