//! Primitive operators.
//!
//! A primitive receives its operands already reduced, left to right. The
//! operator set is fixed, so dispatch is a direct match on [`PrimitiveOp`]
//! rather than a table of trait objects.

use opacity_sexp::Term;

use crate::errors::{
    arity_mismatch, division_by_zero, integer_overflow, raised, type_mismatch, ReduceError,
    ReduceResult,
};

/// A primitive operator.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PrimitiveOp {
    Add,
    Subtract,
    Multiply,
    Divide,
    Cons,
    First,
    Rest,
    List,
    Listp,
    Equal,
    Not,
    And,
    Or,
    Raise,
}

impl PrimitiveOp {
    pub const ALL: [PrimitiveOp; 14] = [
        PrimitiveOp::Add,
        PrimitiveOp::Subtract,
        PrimitiveOp::Multiply,
        PrimitiveOp::Divide,
        PrimitiveOp::Cons,
        PrimitiveOp::First,
        PrimitiveOp::Rest,
        PrimitiveOp::List,
        PrimitiveOp::Listp,
        PrimitiveOp::Equal,
        PrimitiveOp::Not,
        PrimitiveOp::And,
        PrimitiveOp::Or,
        PrimitiveOp::Raise,
    ];

    /// Look up a primitive by canonical name.
    pub fn from_name(name: &str) -> Option<Self> {
        PrimitiveOp::ALL.into_iter().find(|op| op.name() == name)
    }

    pub fn name(self) -> &'static str {
        match self {
            PrimitiveOp::Add => "add",
            PrimitiveOp::Subtract => "subtract",
            PrimitiveOp::Multiply => "multiply",
            PrimitiveOp::Divide => "divide",
            PrimitiveOp::Cons => "cons",
            PrimitiveOp::First => "first",
            PrimitiveOp::Rest => "rest",
            PrimitiveOp::List => "list",
            PrimitiveOp::Listp => "listp",
            PrimitiveOp::Equal => "equal",
            PrimitiveOp::Not => "not",
            PrimitiveOp::And => "and",
            PrimitiveOp::Or => "or",
            PrimitiveOp::Raise => "raise",
        }
    }

    /// Apply the operator to reduced operands.
    pub fn apply(self, args: &[Term]) -> ReduceResult {
        let op = self.name();
        match self {
            PrimitiveOp::Add => fold_ints(op, args, 0, i64::checked_add),
            PrimitiveOp::Multiply => fold_ints(op, args, 1, i64::checked_mul),
            PrimitiveOp::Subtract => subtract(args),
            PrimitiveOp::Divide => {
                let [dividend, divisor] = exact::<2>(op, args, "2")?;
                floor_div(expect_int(op, dividend)?, expect_int(op, divisor)?).map(Term::int)
            }
            PrimitiveOp::Cons => {
                let [first, rest] = exact::<2>(op, args, "2")?;
                Ok(Term::cons(first.clone(), rest.clone()))
            }
            PrimitiveOp::First => {
                let [pair] = exact::<1>(op, args, "1")?;
                pair.first()
                    .cloned()
                    .ok_or_else(|| type_mismatch(op, "a pair", pair))
            }
            PrimitiveOp::Rest => {
                let [pair] = exact::<1>(op, args, "1")?;
                pair.rest()
                    .cloned()
                    .ok_or_else(|| type_mismatch(op, "a pair", pair))
            }
            PrimitiveOp::List => Ok(Term::list(args.iter().cloned())),
            PrimitiveOp::Listp => {
                let [value] = exact::<1>(op, args, "1")?;
                Ok(Term::from_bool(value.is_pair()))
            }
            PrimitiveOp::Equal => {
                let [left, right] = exact::<2>(op, args, "2")?;
                Ok(Term::from_bool(left == right))
            }
            PrimitiveOp::Not => {
                let [value] = exact::<1>(op, args, "1")?;
                Ok(Term::from_bool(!value.is_truthy()))
            }
            PrimitiveOp::And => Ok(Term::from_bool(args.iter().all(Term::is_truthy))),
            PrimitiveOp::Or => Ok(Term::from_bool(args.iter().any(Term::is_truthy))),
            PrimitiveOp::Raise => Err(raised(Term::list(args.iter().cloned()))),
        }
    }
}

/// Whether any reduced value still depends on an unbound variable.
///
/// Such values are placeholders for partial evaluation: an operator that
/// sees one cannot compute a result and leaves its call in place instead.
pub fn has_unbound_values(items: &[Term]) -> bool {
    items.iter().any(Term::contains_var)
}

/// Destructure exactly `N` operands.
fn exact<'a, const N: usize>(
    op: &'static str,
    args: &'a [Term],
    expected: &'static str,
) -> Result<&'a [Term; N], ReduceError> {
    args.try_into()
        .map_err(|_| arity_mismatch(op, expected, args.len()))
}

fn expect_int(op: &'static str, term: &Term) -> Result<i64, ReduceError> {
    term.as_int()
        .ok_or_else(|| type_mismatch(op, "an integer atom", term))
}

fn fold_ints(
    op: &'static str,
    args: &[Term],
    identity: i64,
    combine: fn(i64, i64) -> Option<i64>,
) -> ReduceResult {
    args.iter()
        .try_fold(identity, |acc, arg| {
            combine(acc, expect_int(op, arg)?).ok_or_else(|| integer_overflow(op))
        })
        .map(Term::int)
}

/// `(-)` is 0, `(- a)` negates, `(- a b c)` is `a - b - c`.
fn subtract(args: &[Term]) -> ReduceResult {
    const OP: &str = "subtract";
    let Some((head, rest)) = args.split_first() else {
        return Ok(Term::nil());
    };
    let head = expect_int(OP, head)?;
    if rest.is_empty() {
        return head
            .checked_neg()
            .map(Term::int)
            .ok_or_else(|| integer_overflow(OP));
    }
    rest.iter()
        .try_fold(head, |acc, arg| {
            acc.checked_sub(expect_int(OP, arg)?)
                .ok_or_else(|| integer_overflow(OP))
        })
        .map(Term::int)
}

/// Division rounding toward negative infinity.
fn floor_div(dividend: i64, divisor: i64) -> Result<i64, ReduceError> {
    if divisor == 0 {
        return Err(division_by_zero());
    }
    let quotient = dividend
        .checked_div(divisor)
        .ok_or_else(|| integer_overflow("divide"))?;
    let remainder = dividend % divisor;
    if remainder != 0 && ((remainder < 0) != (divisor < 0)) {
        Ok(quotient - 1)
    } else {
        Ok(quotient)
    }
}
