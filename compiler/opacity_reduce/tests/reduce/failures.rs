use opacity_reduce::{ReduceErrorKind, Term};
use pretty_assertions::assert_eq;

use crate::common::{call, int, ints, quote, run, run_err, run_ok};

#[test]
fn malformed_case_clause_is_terminal() {
    let clause = ints(&[1, 2, 3]);
    // nested inside a fallback call: no partial result survives
    let form = Term::list([int(200), int(1), call("case", [clause.clone()])]);
    assert_eq!(
        run_err(&form, &Term::nil()),
        ReduceErrorKind::MalformedCaseClause { clause }
    );
}

#[test]
fn malformed_case_message() {
    let err = run(&call("case", [ints(&[1])]), &Term::nil()).unwrap_err();
    assert_eq!(
        err.to_string(),
        "case clause must be a (condition action) pair, got (1)"
    );
}

#[test]
fn raise_carries_operands() {
    let form = call("raise", [int(1), quote(ints(&[2, 3]))]);
    assert_eq!(
        run_err(&form, &Term::nil()),
        ReduceErrorKind::Raised {
            value: Term::list([int(1), ints(&[2, 3])])
        }
    );
}

#[test]
fn arithmetic_failures() {
    assert_eq!(
        run_err(&call("/", [int(1), int(0)]), &Term::nil()),
        ReduceErrorKind::DivisionByZero
    );
    assert_eq!(
        run_err(&call("*", [int(i64::MAX), int(2)]), &Term::nil()),
        ReduceErrorKind::IntegerOverflow { op: "multiply" }
    );
    assert!(matches!(
        run_err(&call("+", [int(1), quote(ints(&[2]))]), &Term::nil()),
        ReduceErrorKind::TypeMismatch { op: "add", .. }
    ));
    assert!(matches!(
        run_err(&call("/", [int(1)]), &Term::nil()),
        ReduceErrorKind::ArityMismatch { op: "divide", got: 1, .. }
    ));
}

#[test]
fn quasiquote_environment_must_be_list() {
    let form = call("quasiquote", [call("unquote", [Term::var(0)]), int(3)]);
    assert_eq!(
        run_err(&form, &Term::nil()),
        ReduceErrorKind::EnvironmentNotList { env: int(3) }
    );
}

#[test]
fn soft_failures_are_false() {
    let nil = Term::nil();
    for form in [
        call("quote", []),
        call("reduce", []),
        call("eval", []),
        call("quasiquote", []),
        call("choose1", []),
        call("choose1", [int(3), int(1)]),
        call("env", [int(9)]),
        Term::nil(),
    ] {
        assert_eq!(run_ok(&form, &ints(&[1])), nil, "{form:?}");
    }
}
