//! Default handlers: classification, variable resolution, list application.
//!
//! Control flow for one step:
//!
//! ```text
//! default_dispatch ─┬─ atom ──────────► ctx.reduce_atom   (self-evaluating)
//!                   ├─ variable ──────► ctx.resolve_var   (environment slot)
//!                   └─ pair ──────────► ctx.reduce_list
//!                                          └─► ctx.apply_op
//!                                                ├─ table hit ─► Handler::invoke
//!                                                └─ miss ──────► recursive_reduce
//! ```

use smallvec::SmallVec;

use opacity_ops::{Opcode, ReduceError, ReduceResult};
use opacity_sexp::Term;

use crate::context::{reduce_fn, ReduceContext, ReduceFn};
use crate::stack::ensure_sufficient_stack;

/// Reduced operands of a call; most calls have a handful.
pub(crate) type Operands = SmallVec<[Term; 4]>;

/// The standard dispatcher: route `term` to the context's atom, variable or
/// list handler.
///
/// Opens no span per step; install [`traced_dispatch`](crate::traced_dispatch)
/// for step events.
pub fn default_dispatch(term: &Term, ctx: &ReduceContext) -> ReduceResult {
    ensure_sufficient_stack(|| {
        if term.is_atom() {
            ctx.reduce_atom(term)
        } else if term.is_var() {
            ctx.resolve_var(term)
        } else {
            ctx.reduce_list(term)
        }
    })
}

/// Atoms evaluate to themselves.
pub fn reduce_atom(term: &Term, _ctx: &ReduceContext) -> ReduceResult {
    Ok(term.clone())
}

/// Build a resolver bound to `env`.
///
/// A reference to slot `i` yields `env[i]` when `i` is in range and is
/// otherwise returned unchanged as a free variable. A non-list `env` is
/// treated as empty.
pub fn resolver_for_env(env: &Term) -> ReduceFn {
    let env = if env.is_list() {
        env.clone()
    } else {
        Term::nil()
    };
    reduce_fn(move |term, _ctx| {
        let bound = term.var_index().and_then(|index| env.nth(index));
        Ok(bound.unwrap_or(term).clone())
    })
}

/// Reduce a call form.
///
/// The empty list is false. A list whose head is itself a list is applied as
/// if the default operator had been prepended.
pub fn reduce_list(term: &Term, ctx: &ReduceContext) -> ReduceResult {
    let Some(head) = term.first() else {
        return Ok(Term::nil());
    };
    if head.is_pair() {
        let form = Term::cons(ctx.default_opcode().to_term(), term.clone());
        return ctx.apply_op(&form);
    }
    ctx.apply_op(term)
}

/// Run the handler registered for the head opcode, or the generic fallback.
pub fn apply_op(term: &Term, ctx: &ReduceContext) -> ReduceResult {
    let Some(head) = term.first() else {
        return Ok(Term::nil());
    };
    match Opcode::from_term(head).and_then(|opcode| ctx.table().get(opcode)) {
        Some(handler) => handler.invoke(term, ctx),
        None => recursive_reduce(term, ctx),
    }
}

/// Generic fallback: keep the head, reduce every operand left to right.
///
/// An improper tail after the operands is kept as it is.
pub fn recursive_reduce(term: &Term, ctx: &ReduceContext) -> ReduceResult {
    let mut items = term.iter();
    let Some(head) = items.next() else {
        return Ok(Term::nil());
    };
    let operands = items
        .by_ref()
        .map(|operand| ctx.dispatch(operand))
        .collect::<Result<Operands, _>>()?;
    let tail = items.remainder().clone();
    Ok(Term::cons(head.clone(), Term::list_with_tail(operands, tail)))
}

/// Reduce `form[1:]` eagerly, left to right, stopping at the first error.
pub(crate) fn reduce_operands(form: &Term, ctx: &ReduceContext) -> Result<Operands, ReduceError> {
    form.iter().skip(1).map(|operand| ctx.dispatch(operand)).collect()
}
