use opacity_reduce::{has_unbound_values, Term};
use pretty_assertions::assert_eq;

use crate::common::{call, int, ints, quote, run_ok};

#[test]
fn free_variables_stay_in_place() {
    assert_eq!(run_ok(&Term::var(3), &ints(&[1, 2])), Term::var(3));
    assert_eq!(run_ok(&Term::var(0), &Term::nil()), Term::var(0));
}

#[test]
fn primitive_over_unbound_operand_is_residual() {
    // (+ (* 2 3) x1) with env (1): the bound part folds, the call stays
    let form = call("+", [call("*", [int(2), int(3)]), Term::var(1)]);
    let residual = run_ok(&form, &ints(&[1]));
    assert_eq!(residual, call("+", [int(6), Term::var(1)]));
    assert!(has_unbound_values(std::slice::from_ref(&residual)));
}

#[test]
fn residual_completes_under_fuller_environment() {
    let form = call("+", [call("*", [int(2), int(3)]), Term::var(1)]);
    let residual = run_ok(&form, &ints(&[1]));
    assert_eq!(run_ok(&residual, &ints(&[1, 4])), int(10));
}

#[test]
fn residual_keeps_computed_lists_as_data() {
    // (cons (quote (7 8)) x1): the list operand must not be re-applied later
    let form = call("cons", [quote(ints(&[7, 8])), Term::var(1)]);
    let direct = run_ok(&form, &ints(&[0, 9]));
    assert_eq!(direct, Term::cons(ints(&[7, 8]), int(9)));

    let residual = run_ok(&form, &ints(&[1]));
    assert_eq!(residual, call("cons", [quote(ints(&[7, 8])), Term::var(1)]));
    assert_eq!(run_ok(&residual, &ints(&[0, 9])), direct);
}

#[test]
fn residual_of_list_primitive_completes() {
    // (list (list 1 2) x0) folds the inner call, then quotes it in the residual
    let form = call("list", [call("list", [int(1), int(2)]), Term::var(0)]);
    let residual = run_ok(&form, &Term::nil());
    assert_eq!(residual, call("list", [quote(ints(&[1, 2])), Term::var(0)]));
    assert_eq!(
        run_ok(&residual, &ints(&[3])),
        Term::list([ints(&[1, 2]), int(3)])
    );
}

#[test]
fn choose_passthrough_is_structurally_equal() {
    let form = call("choose1", [Term::var(2), quote(int(1)), quote(int(2))]);
    let value = run_ok(&form, &ints(&[0]));
    assert_eq!(value, form);
    assert_eq!(format!("{value:?}"), format!("{form:?}"));
}

#[test]
fn choose_passthrough_then_bound() {
    let form = call("choose1", [Term::var(0), quote(int(1)), quote(int(2))]);
    assert_eq!(run_ok(&form, &Term::nil()), form);
    assert_eq!(run_ok(&form, &ints(&[1])), int(2));
}

#[test]
fn generic_fallback_keeps_dotted_tail() {
    let form = Term::cons(int(200), Term::cons(Term::var(0), int(9)));
    assert_eq!(
        run_ok(&form, &ints(&[5])),
        Term::cons(int(200), Term::cons(int(5), int(9)))
    );
}

#[test]
fn generic_fallback_keeps_unbound_operands() {
    let form = Term::list([int(200), Term::var(0), Term::var(1)]);
    assert_eq!(
        run_ok(&form, &ints(&[8])),
        Term::list([int(200), int(8), Term::var(1)])
    );
}

#[test]
fn case_condition_unbound_is_truthy() {
    // a residual value is not the false atom
    let form = call("case", [Term::list([Term::var(4), quote(int(1))])]);
    assert_eq!(run_ok(&form, &Term::nil()), int(1));
}
