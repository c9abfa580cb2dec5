//! The evaluation context threaded through every reduction step.
//!
//! A [`ReduceContext`] is an immutable record of pluggable handlers plus the
//! current environment. Special forms that rebind the environment derive a
//! new context with one of the `with_*` methods and use it only for the
//! sub-reduction they control; the caller's context is never touched, so
//! sibling reductions (two `case` branches, say) cannot observe each other's
//! environment.

use std::fmt;
use std::rc::Rc;

use opacity_ops::{Opcode, ReduceResult};
use opacity_sexp::Term;

use crate::dispatch::{apply_op, reduce_atom, reduce_list, resolver_for_env};
use crate::table::DispatchTable;

/// A reduction handler: `(term, context) -> term`.
///
/// Every pluggable field of the context has this shape, so a caller can
/// substitute any of them (an instrumented dispatcher, a custom resolver)
/// without touching the rest of the engine.
pub type ReduceFn = Rc<dyn Fn(&Term, &ReduceContext) -> ReduceResult>;

/// Wrap a function or closure as a [`ReduceFn`].
pub fn reduce_fn(f: impl Fn(&Term, &ReduceContext) -> ReduceResult + 'static) -> ReduceFn {
    Rc::new(f)
}

/// Immutable evaluation state.
///
/// Cloning is cheap: every field is reference counted or `Copy`.
#[derive(Clone)]
pub struct ReduceContext {
    /// The active reduction function, normally
    /// [`default_dispatch`](crate::default_dispatch).
    dispatch: ReduceFn,
    /// Resolves variable references against `env`.
    resolve_var: ReduceFn,
    env: Term,
    /// Operator prepended to lists whose head is itself a list.
    default_opcode: Opcode,
    /// Looks up the head opcode and runs its handler.
    apply_op: ReduceFn,
    reduce_atom: ReduceFn,
    reduce_list: ReduceFn,
    table: Rc<DispatchTable>,
}

impl ReduceContext {
    /// A context with the default handlers and a resolver bound to `env`.
    pub fn new(
        table: Rc<DispatchTable>,
        default_opcode: Opcode,
        env: Term,
        dispatch: ReduceFn,
    ) -> Self {
        ReduceContext {
            dispatch,
            resolve_var: resolver_for_env(&env),
            env,
            default_opcode,
            apply_op: reduce_fn(apply_op),
            reduce_atom: reduce_fn(reduce_atom),
            reduce_list: reduce_fn(reduce_list),
            table,
        }
    }

    // Handler entry points

    /// Reduce `term` with the active dispatcher.
    #[inline]
    pub fn dispatch(&self, term: &Term) -> ReduceResult {
        (self.dispatch)(term, self)
    }

    #[inline]
    pub fn resolve_var(&self, term: &Term) -> ReduceResult {
        (self.resolve_var)(term, self)
    }

    #[inline]
    pub fn apply_op(&self, term: &Term) -> ReduceResult {
        (self.apply_op)(term, self)
    }

    #[inline]
    pub fn reduce_atom(&self, term: &Term) -> ReduceResult {
        (self.reduce_atom)(term, self)
    }

    #[inline]
    pub fn reduce_list(&self, term: &Term) -> ReduceResult {
        (self.reduce_list)(term, self)
    }

    // Accessors

    #[inline]
    pub fn env(&self) -> &Term {
        &self.env
    }

    #[inline]
    pub fn default_opcode(&self) -> Opcode {
        self.default_opcode
    }

    #[inline]
    pub fn table(&self) -> &DispatchTable {
        &self.table
    }

    // Persistent updates

    /// Rebind the environment, rebuilding the resolver for it.
    #[must_use]
    pub fn with_env(&self, env: Term) -> Self {
        ReduceContext {
            resolve_var: resolver_for_env(&env),
            env,
            ..self.clone()
        }
    }

    #[must_use]
    pub fn with_dispatch(&self, dispatch: ReduceFn) -> Self {
        ReduceContext {
            dispatch,
            ..self.clone()
        }
    }

    /// Replace the resolver while keeping the bound environment.
    #[must_use]
    pub fn with_resolver(&self, resolve_var: ReduceFn) -> Self {
        ReduceContext {
            resolve_var,
            ..self.clone()
        }
    }

    #[must_use]
    pub fn with_apply_op(&self, apply_op: ReduceFn) -> Self {
        ReduceContext {
            apply_op,
            ..self.clone()
        }
    }

    #[must_use]
    pub fn with_atom_handler(&self, reduce_atom: ReduceFn) -> Self {
        ReduceContext {
            reduce_atom,
            ..self.clone()
        }
    }

    #[must_use]
    pub fn with_list_handler(&self, reduce_list: ReduceFn) -> Self {
        ReduceContext {
            reduce_list,
            ..self.clone()
        }
    }
}

impl fmt::Debug for ReduceContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ReduceContext")
            .field("env", &self.env)
            .field("default_opcode", &self.default_opcode)
            .field("handlers", &self.table.len())
            .finish_non_exhaustive()
    }
}
