use std::cell::RefCell;
use std::rc::Rc;

use opacity_reduce::{default_dispatch, reduce_fn, Term};
use pretty_assertions::assert_eq;

use crate::common::{call, int, ints, kw, quote, reducer, run_ok, UNBOUND_OP};

#[test]
fn quote_ignores_environment() {
    let program = call("+", [Term::var(0), int(1)]);
    for env in [Term::nil(), ints(&[1]), Term::int(9)] {
        assert_eq!(run_ok(&quote(program.clone()), &env), program);
    }
}

#[test]
fn eval_resets_environment() {
    let env = ints(&[5]);
    assert_eq!(run_ok(&call("eval", [quote(Term::var(0))]), &env), Term::var(0));
    assert_eq!(run_ok(&call("reduce", [quote(Term::var(0))]), &env), int(5));
}

#[test]
fn quasiquote_balance() {
    let simple = call("quasiquote", [call("unquote", [quote(int(5))])]);
    assert_eq!(run_ok(&simple, &Term::nil()), int(5));

    let nested = call(
        "quasiquote",
        [call(
            "quasiquote",
            [call("unquote", [call("unquote", [quote(int(7))])])],
        )],
    );
    let expected = call("quasiquote", [call("unquote", [int(7)])]);
    assert_eq!(run_ok(&nested, &Term::nil()), expected);
}

#[test]
fn quasiquote_builds_code_for_reduce() {
    // (reduce (qq (+ (unquote x0) 1))) with env (41)
    let template = call("+", [call("unquote", [Term::var(0)]), int(1)]);
    let program = call("reduce", [call("quasiquote", [template])]);
    assert_eq!(run_ok(&program, &ints(&[41])), int(42));
}

#[test]
fn case_short_circuits() {
    let reducer = reducer();
    let seen = Rc::new(RefCell::new(Vec::new()));
    let log = Rc::clone(&seen);
    let dispatch = reduce_fn(move |term, ctx| {
        log.borrow_mut().push(term.clone());
        default_dispatch(term, ctx)
    });

    let first_condition = int(1);
    let first_action = quote(int(10));
    let second_condition = call("raise", [int(2)]);
    let second_action = quote(int(20));
    let form = call(
        "case",
        [
            Term::list([first_condition.clone(), first_action.clone()]),
            Term::list([second_condition.clone(), second_action.clone()]),
        ],
    );

    let value = reducer.reduce_with(&form, &Term::nil(), dispatch).unwrap();
    assert_eq!(value, int(10));
    assert_eq!(*seen.borrow(), vec![form, first_condition, first_action]);
}

#[test]
fn choose_range() {
    let a = quote(int(100));
    let b = quote(int(101));
    let choose = |selector: Term| call("choose1", [selector, a.clone(), b.clone()]);

    assert_eq!(run_ok(&choose(quote(int(1))), &Term::nil()), int(101));
    assert_eq!(run_ok(&choose(quote(int(0))), &Term::nil()), int(100));
    assert_eq!(run_ok(&choose(quote(int(-1))), &Term::nil()), Term::nil());
    assert_eq!(run_ok(&choose(quote(int(2))), &Term::nil()), Term::nil());
}

#[test]
fn env_navigation() {
    let env = Term::list([ints(&[10, 11]), ints(&[20, 21])]);
    assert_eq!(run_ok(&call("env", [int(0), int(1)]), &env), int(11));
    assert_eq!(run_ok(&call("env", [int(5)]), &env), Term::nil());
    assert_eq!(run_ok(&call("env", [int(0), int(0), int(0)]), &env), Term::nil());
}

#[test]
fn sibling_reductions_do_not_share_environment() {
    // (list (reduce (quote x0) (quote (1))) x0 (reduce (quote x0) (quote (2))) x0)
    let rebind = |value: i64| call("reduce", [quote(Term::var(0)), quote(ints(&[value]))]);
    let program = call("list", [rebind(1), Term::var(0), rebind(2), Term::var(0)]);
    assert_eq!(run_ok(&program, &ints(&[7])), ints(&[1, 7, 2, 7]));
}

#[test]
fn case_branches_do_not_share_environment() {
    // the first condition rebinds x0 for its own reduction only
    let condition = call("reduce", [quote(call("not", [Term::var(0)])), quote(ints(&[1]))]);
    let form = call(
        "case",
        [
            Term::list([condition, quote(int(1))]),
            Term::list([Term::var(0), Term::var(0)]),
        ],
    );
    assert_eq!(run_ok(&form, &ints(&[33])), int(33));
}

#[test]
fn alias_wiring() {
    let reducer = reducer();
    assert_eq!(reducer.keyword("+"), reducer.keyword("add"));
    assert_eq!(reducer.keyword("*"), reducer.keyword("multiply"));
    assert_eq!(reducer.keyword("-"), reducer.keyword("subtract"));
    assert_eq!(reducer.keyword("/"), reducer.keyword("divide"));

    let by_symbol = call("+", [int(3), int(4)]);
    let by_name = call("add", [int(3), int(4)]);
    assert_eq!(by_symbol, by_name);
    assert_eq!(run_ok(&by_symbol, &Term::nil()), run_ok(&by_name, &Term::nil()));
}

#[test]
fn list_head_applies_default_operator() {
    // ((200) 1 0) reduces as (and (200) 1 0)
    let form = Term::list([ints(&[UNBOUND_OP]), int(1), Term::nil()]);
    assert_eq!(run_ok(&form, &Term::nil()), Term::nil());
    let form = Term::list([ints(&[UNBOUND_OP]), int(1), int(2)]);
    assert_eq!(run_ok(&form, &Term::nil()), Term::truth());
}

#[test]
fn generic_fallback_reduces_operands() {
    let env = ints(&[5, 6]);
    let form = Term::list([
        int(UNBOUND_OP),
        Term::var(1),
        call("*", [Term::var(0), int(2)]),
        quote(ints(&[1, 2])),
    ]);
    let expected = Term::list([int(UNBOUND_OP), int(6), int(10), ints(&[1, 2])]);
    assert_eq!(run_ok(&form, &env), expected);
}

#[test]
fn apply_runs_assembled_call() {
    let form = call("apply", [kw("-"), int(10), int(4)]);
    assert_eq!(run_ok(&form, &Term::nil()), int(6));
}
