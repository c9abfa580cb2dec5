//! Program construction helpers.
//!
//! Small integers double as opcodes, so data lists in programs are quoted
//! and heads that must hit the generic fallback use `UNBOUND_OP`.

use opacity_reduce::{init_tracing, ReduceErrorKind, ReduceResult, Reducer, Term};

/// An opcode with no handler in the standard table.
pub const UNBOUND_OP: i64 = 200;

pub fn reducer() -> Reducer {
    init_tracing();
    Reducer::standard()
}

pub fn kw(name: &str) -> Term {
    Reducer::standard()
        .keyword(name)
        .unwrap_or_else(|| panic!("no keyword {name}"))
}

pub fn call(name: &str, operands: impl IntoIterator<Item = Term>) -> Term {
    let operands: Vec<Term> = operands.into_iter().collect();
    Term::cons(kw(name), Term::list(operands))
}

pub fn quote(term: Term) -> Term {
    call("quote", [term])
}

pub fn int(value: i64) -> Term {
    Term::int(value)
}

pub fn ints(values: &[i64]) -> Term {
    Term::list(values.iter().copied().map(Term::int).collect::<Vec<_>>())
}

pub fn run(form: &Term, env: &Term) -> ReduceResult {
    reducer().reduce(form, env)
}

pub fn run_ok(form: &Term, env: &Term) -> Term {
    run(form, env).unwrap_or_else(|err| panic!("{form:?} failed: {err}"))
}

pub fn run_err(form: &Term, env: &Term) -> ReduceErrorKind {
    match run(form, env) {
        Ok(value) => panic!("{form:?} reduced to {value:?}, expected an error"),
        Err(err) => err.into_kind(),
    }
}
