//! Error types shared by the operator registry and the reducer.
//!
//! Soft failures are not errors: special forms return the false atom for
//! those. Everything here is terminal and propagates out of `reduce` with no
//! partial result.
//!
//! Factory functions (e.g. `division_by_zero()`) are the construction API;
//! match on [`ReduceError::kind`] to classify a failure.

use opacity_sexp::Term;
use thiserror::Error;

/// Result of a reduction step.
pub type ReduceResult = Result<Term, ReduceError>;

/// Typed failure category.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum ReduceErrorKind {
    // Structural
    /// A `case` clause that is not exactly `(condition action)`.
    #[error("case clause must be a (condition action) pair, got {clause:?}")]
    MalformedCaseClause { clause: Term },
    /// Quasiquote's explicit environment operand reduced to a non-list.
    #[error("quasiquote environment must be a list, got {env:?}")]
    EnvironmentNotList { env: Term },

    // Primitive operators
    #[error("`{op}` expects {expected}, got {got:?}")]
    TypeMismatch {
        op: &'static str,
        expected: &'static str,
        got: Term,
    },
    #[error("`{op}` expects {expected} operand(s), got {got}")]
    ArityMismatch {
        op: &'static str,
        expected: &'static str,
        got: usize,
    },
    #[error("division by zero")]
    DivisionByZero,
    #[error("integer overflow in `{op}`")]
    IntegerOverflow { op: &'static str },
    /// Raised explicitly by the program; carries the operands of `raise`.
    #[error("raised {value:?}")]
    Raised { value: Term },

    // Configuration
    #[error("unknown operator keyword `{name}`")]
    UnknownKeyword { name: String },
}

/// A terminal reduction failure.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
#[error("{kind}")]
pub struct ReduceError {
    kind: ReduceErrorKind,
}

impl ReduceError {
    pub fn from_kind(kind: ReduceErrorKind) -> Self {
        ReduceError { kind }
    }

    #[inline]
    pub fn kind(&self) -> &ReduceErrorKind {
        &self.kind
    }

    pub fn into_kind(self) -> ReduceErrorKind {
        self.kind
    }
}

impl From<ReduceErrorKind> for ReduceError {
    fn from(kind: ReduceErrorKind) -> Self {
        ReduceError::from_kind(kind)
    }
}

// Structural errors

#[cold]
pub fn malformed_case_clause(clause: &Term) -> ReduceError {
    ReduceError::from_kind(ReduceErrorKind::MalformedCaseClause {
        clause: clause.clone(),
    })
}

#[cold]
pub fn environment_not_list(env: Term) -> ReduceError {
    ReduceError::from_kind(ReduceErrorKind::EnvironmentNotList { env })
}

// Primitive operator errors

#[cold]
pub fn type_mismatch(op: &'static str, expected: &'static str, got: &Term) -> ReduceError {
    ReduceError::from_kind(ReduceErrorKind::TypeMismatch {
        op,
        expected,
        got: got.clone(),
    })
}

#[cold]
pub fn arity_mismatch(op: &'static str, expected: &'static str, got: usize) -> ReduceError {
    ReduceError::from_kind(ReduceErrorKind::ArityMismatch { op, expected, got })
}

#[cold]
pub fn division_by_zero() -> ReduceError {
    ReduceError::from_kind(ReduceErrorKind::DivisionByZero)
}

#[cold]
pub fn integer_overflow(op: &'static str) -> ReduceError {
    ReduceError::from_kind(ReduceErrorKind::IntegerOverflow { op })
}

#[cold]
pub fn raised(value: Term) -> ReduceError {
    ReduceError::from_kind(ReduceErrorKind::Raised { value })
}

// Configuration errors

#[cold]
pub fn unknown_keyword(name: &str) -> ReduceError {
    ReduceError::from_kind(ReduceErrorKind::UnknownKeyword {
        name: name.to_owned(),
    })
}
