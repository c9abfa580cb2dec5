//! Special forms: operators that control the evaluation of their operands.
//!
//! Every handler receives the whole call form: `form[0]` is the opcode atom,
//! `form[1..]` the unevaluated operands. Missing operands and out-of-range
//! selections are soft failures and yield the false atom; only a malformed
//! `case` clause (and a non-list quasiquote environment) is an error.

use opacity_ops::errors::{environment_not_list, malformed_case_clause};
use opacity_ops::{has_unbound_values, ReduceError, ReduceResult};
use opacity_sexp::Term;

use crate::context::ReduceContext;
use crate::quasiquote;
use crate::tracing_setup::TRACE_TERM_LIMIT;

/// The evaluator-defined forms.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SpecialForm {
    /// `(quote X)`: `X`, unevaluated.
    Quote,
    /// `(eval X [E])`: `reduce` under a fresh empty environment.
    Eval,
    /// `(apply OP ARGS...)`: run operator dispatch on `(OP ARGS...)`.
    Apply,
    /// `(case (C A)...)`: the action of the first truthy condition.
    Case,
    /// `(env I...)`: walk the current environment by index.
    Env,
    /// `(reduce X [E])`: reduce `X`, then reduce the result, optionally
    /// under environment `E`.
    Reduce,
    /// `(quasiquote T [E])`: rebuild `T`, substituting balanced unquotes.
    Quasiquote,
    /// `(choose1 S C...)`: the `S`-th choice, or the form itself if `S` is
    /// unbound.
    Choose,
}

impl SpecialForm {
    pub const ALL: [SpecialForm; 8] = [
        SpecialForm::Quote,
        SpecialForm::Eval,
        SpecialForm::Apply,
        SpecialForm::Case,
        SpecialForm::Env,
        SpecialForm::Reduce,
        SpecialForm::Quasiquote,
        SpecialForm::Choose,
    ];

    /// Look up a special form by keyword.
    pub fn from_name(name: &str) -> Option<Self> {
        SpecialForm::ALL.into_iter().find(|form| form.name() == name)
    }

    pub fn name(self) -> &'static str {
        match self {
            SpecialForm::Quote => "quote",
            SpecialForm::Eval => "eval",
            SpecialForm::Apply => "apply",
            SpecialForm::Case => "case",
            SpecialForm::Env => "env",
            SpecialForm::Reduce => "reduce",
            SpecialForm::Quasiquote => "quasiquote",
            SpecialForm::Choose => "choose1",
        }
    }

    pub fn reduce(self, form: &Term, ctx: &ReduceContext) -> ReduceResult {
        match self {
            SpecialForm::Quote => reduce_quote(form),
            SpecialForm::Eval => reduce_eval(form, ctx),
            SpecialForm::Apply => reduce_apply(form, ctx),
            SpecialForm::Case => reduce_case(form, ctx),
            SpecialForm::Env => reduce_env(form, ctx),
            SpecialForm::Reduce => reduce_reduce(form, ctx),
            SpecialForm::Quasiquote => reduce_quasiquote(form, ctx),
            SpecialForm::Choose => reduce_choose(form, ctx),
        }
    }
}

fn reduce_quote(form: &Term) -> ReduceResult {
    Ok(form.nth(1).cloned().unwrap_or_default())
}

fn reduce_eval(form: &Term, ctx: &ReduceContext) -> ReduceResult {
    reduce_reduce(form, &ctx.with_env(Term::nil()))
}

fn reduce_apply(form: &Term, ctx: &ReduceContext) -> ReduceResult {
    match form.tail(1) {
        Some(call) => ctx.apply_op(call),
        None => Ok(Term::nil()),
    }
}

fn reduce_case(form: &Term, ctx: &ReduceContext) -> ReduceResult {
    for clause in form.iter().skip(1) {
        let (condition, action) = case_clause(clause)?;
        if ctx.dispatch(condition)?.is_truthy() {
            tracing::trace!(
                condition = ?condition.abbreviated(TRACE_TERM_LIMIT),
                "case matched"
            );
            return ctx.dispatch(action);
        }
    }
    Ok(Term::nil())
}

/// Split a clause into `(condition action)`.
fn case_clause(clause: &Term) -> Result<(&Term, &Term), ReduceError> {
    let mut items = clause.iter();
    match (items.next(), items.next(), items.next()) {
        (Some(condition), Some(action), None) if items.remainder().is_nil() => {
            Ok((condition, action))
        }
        _ => Err(malformed_case_clause(clause)),
    }
}

fn reduce_env(form: &Term, ctx: &ReduceContext) -> ReduceResult {
    let mut current = ctx.env();
    for step in form.iter().skip(1) {
        let index = step.as_int().and_then(|value| usize::try_from(value).ok());
        match index.and_then(|index| current.nth(index)) {
            Some(next) => current = next,
            None => return Ok(Term::nil()),
        }
    }
    Ok(current.clone())
}

fn reduce_reduce(form: &Term, ctx: &ReduceContext) -> ReduceResult {
    let Some(program) = form.nth(1) else {
        return Ok(Term::nil());
    };
    let new_form = ctx.dispatch(program)?;
    match form.nth(2) {
        Some(env_form) => {
            let env = ctx.dispatch(env_form)?;
            ctx.with_env(env).dispatch(&new_form)
        }
        None => ctx.dispatch(&new_form),
    }
}

fn reduce_quasiquote(form: &Term, ctx: &ReduceContext) -> ReduceResult {
    let Some(template) = form.nth(1) else {
        return Ok(Term::nil());
    };
    match form.nth(2) {
        Some(env_form) => {
            let env = ctx.dispatch(env_form)?;
            if !env.is_list() {
                return Err(environment_not_list(env));
            }
            quasiquote::expand(template, &ctx.with_env(env))
        }
        None => quasiquote::expand(template, ctx),
    }
}

fn reduce_choose(form: &Term, ctx: &ReduceContext) -> ReduceResult {
    let Some(selector) = form.nth(1) else {
        return Ok(Term::nil());
    };
    let choice = ctx.dispatch(selector)?;
    if has_unbound_values(std::slice::from_ref(&choice)) {
        tracing::debug!(
            choice = ?choice.abbreviated(TRACE_TERM_LIMIT),
            "choose1 selector is unbound, leaving form in place"
        );
        return Ok(form.clone());
    }
    let chosen = choice
        .as_int()
        .and_then(|value| usize::try_from(value).ok())
        .and_then(|index| form.tail(2)?.nth(index));
    match chosen {
        Some(chosen) => ctx.dispatch(chosen),
        None => Ok(Term::nil()),
    }
}
