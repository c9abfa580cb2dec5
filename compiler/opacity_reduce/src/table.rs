//! The merged dispatch table: opcode to handler.
//!
//! Built once per [`Reducer`](crate::Reducer) from a keyword table. Primitive
//! operators come from the operator registry; special forms are layered on
//! top and win on a shared opcode.

use rustc_hash::FxHashMap;

use opacity_ops::{
    has_unbound_values, KeywordTable, Opcode, OperatorRegistry, PrimitiveOp, ReduceResult,
};
use opacity_sexp::Term;

use crate::context::ReduceContext;
use crate::dispatch::reduce_operands;
use crate::special_forms::SpecialForm;

/// What an opcode does when it heads a call.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Handler {
    /// Controls the evaluation of its own operands.
    Special(SpecialForm),
    /// Reduces every operand, then computes.
    Primitive(PrimitiveOp),
}

impl Handler {
    /// Run this handler on `form`, whose head is the handler's opcode.
    pub fn invoke(self, form: &Term, ctx: &ReduceContext) -> ReduceResult {
        match self {
            Handler::Special(special) => special.reduce(form, ctx),
            Handler::Primitive(op) => reduce_primitive(op, form, ctx),
        }
    }
}

/// Reduce the operands and apply `op`.
///
/// When an operand is still unbound the call cannot be computed yet, so the
/// residual call over the reduced operands is returned for a later pass.
fn reduce_primitive(op: PrimitiveOp, form: &Term, ctx: &ReduceContext) -> ReduceResult {
    let operands = reduce_operands(form, ctx)?;
    if has_unbound_values(&operands) {
        tracing::trace!(op = op.name(), "unbound operand, leaving residual call");
        let head = form.first().cloned().unwrap_or_default();
        let quote = ctx.table().quote_opcode();
        let operands = operands.into_iter().map(|operand| requote(operand, quote));
        return Ok(Term::cons(head, Term::list(operands)));
    }
    op.apply(&operands)
}

/// Wrap a computed list value in `(quote ...)`; reducing the residual call
/// again then yields the value itself rather than applying it as a form.
///
/// Values that still mention a variable stay as they are: they are pending
/// code for the next pass.
fn requote(operand: Term, quote: Option<Opcode>) -> Term {
    match quote {
        Some(quote) if operand.is_pair() && !operand.contains_var() => {
            Term::list([quote.to_term(), operand])
        }
        _ => operand,
    }
}

/// Opcode → handler, plus the opcodes quasiquote walks for and residual
/// calls quote with.
#[derive(Clone, Debug, Default)]
pub struct DispatchTable {
    handlers: FxHashMap<Opcode, Handler>,
    quote: Option<Opcode>,
    quasiquote: Option<Opcode>,
    unquote: Option<Opcode>,
}

impl DispatchTable {
    /// A special form is recognized by its keyword spelling or by the
    /// canonical name it is remapped to.
    pub fn build(keywords: &KeywordTable) -> Self {
        let registry = OperatorRegistry::new(keywords);
        let mut handlers: FxHashMap<Opcode, Handler> = registry
            .iter()
            .map(|(opcode, op)| (opcode, Handler::Primitive(op)))
            .collect();
        for (opcode, canonical) in keywords.iter() {
            let special = keywords
                .name(opcode)
                .and_then(SpecialForm::from_name)
                .or_else(|| SpecialForm::from_name(canonical));
            if let Some(special) = special {
                handlers.insert(opcode, Handler::Special(special));
            }
        }
        DispatchTable {
            handlers,
            quote: keywords.opcode(SpecialForm::Quote.name()),
            quasiquote: keywords.opcode(SpecialForm::Quasiquote.name()),
            unquote: keywords.opcode("unquote"),
        }
    }

    #[inline]
    pub fn get(&self, opcode: Opcode) -> Option<Handler> {
        self.handlers.get(&opcode).copied()
    }

    #[inline]
    pub fn quote_opcode(&self) -> Option<Opcode> {
        self.quote
    }

    #[inline]
    pub fn quasiquote_opcode(&self) -> Option<Opcode> {
        self.quasiquote
    }

    #[inline]
    pub fn unquote_opcode(&self) -> Option<Opcode> {
        self.unquote
    }

    pub fn len(&self) -> usize {
        self.handlers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.handlers.is_empty()
    }
}
