//! `Reducer` and `ReducerBuilder`: the public entry point.
//!
//! A reducer owns the keyword table and the dispatch table derived from it,
//! and hands out a fresh [`ReduceContext`] per top-level call.

use std::rc::Rc;

use opacity_ops::errors::unknown_keyword;
use opacity_ops::{KeywordTable, Opcode, ReduceError, ReduceResult, DEFAULT_OPERATOR};
use opacity_sexp::Term;

use crate::context::{reduce_fn, ReduceContext, ReduceFn};
use crate::dispatch::default_dispatch;
use crate::table::DispatchTable;

/// A configured reduction engine.
///
/// Cheap to clone; the dispatch table is shared.
#[derive(Clone, Debug)]
pub struct Reducer {
    keywords: KeywordTable,
    table: Rc<DispatchTable>,
    default_opcode: Opcode,
}

impl Reducer {
    /// The standard keyword table, aliases and default operator.
    #[expect(
        clippy::expect_used,
        reason = "the standard keyword table always contains the default operator"
    )]
    pub fn standard() -> Self {
        ReducerBuilder::new()
            .build()
            .expect("standard reducer configuration is valid")
    }

    pub fn builder() -> ReducerBuilder {
        ReducerBuilder::new()
    }

    pub fn keywords(&self) -> &KeywordTable {
        &self.keywords
    }

    pub fn table(&self) -> &DispatchTable {
        &self.table
    }

    pub fn default_opcode(&self) -> Opcode {
        self.default_opcode
    }

    /// The opcode atom for `name`, for building programs.
    pub fn keyword(&self, name: &str) -> Option<Term> {
        self.keywords.opcode(name).map(Opcode::to_term)
    }

    /// A top-level context over `env` that reduces with `dispatch`.
    pub fn context(&self, env: Term, dispatch: ReduceFn) -> ReduceContext {
        ReduceContext::new(Rc::clone(&self.table), self.default_opcode, env, dispatch)
    }

    /// Reduce `form` against `env` with the default dispatcher.
    #[tracing::instrument(level = "debug", skip_all)]
    pub fn reduce(&self, form: &Term, env: &Term) -> ReduceResult {
        self.reduce_with(form, env, reduce_fn(default_dispatch))
    }

    /// Reduce `form` against `env`, routing every step through `dispatch`.
    ///
    /// `dispatch` is called for the top-level form and for every
    /// sub-reduction, which makes it the hook for step counting, budgets and
    /// tracing. Delegate to [`default_dispatch`] to keep the standard
    /// semantics.
    pub fn reduce_with(&self, form: &Term, env: &Term, dispatch: ReduceFn) -> ReduceResult {
        let ctx = self.context(env.clone(), dispatch);
        ctx.dispatch(form)
    }
}

impl Default for Reducer {
    fn default() -> Self {
        Reducer::standard()
    }
}

/// Builder for [`Reducer`].
#[derive(Clone, Debug)]
pub struct ReducerBuilder {
    keywords: KeywordTable,
    default_operator: String,
}

impl ReducerBuilder {
    pub fn new() -> Self {
        ReducerBuilder {
            keywords: KeywordTable::standard(),
            default_operator: DEFAULT_OPERATOR.to_owned(),
        }
    }

    /// Use a custom keyword table.
    #[must_use]
    pub fn keywords(mut self, keywords: KeywordTable) -> Self {
        self.keywords = keywords;
        self
    }

    /// Operator prepended to lists whose head is itself a list.
    ///
    /// Resolved through the keyword table, so aliases are accepted.
    #[must_use]
    pub fn default_operator(mut self, name: impl Into<String>) -> Self {
        self.default_operator = name.into();
        self
    }

    /// Build the dispatch table.
    ///
    /// Fails with `UnknownKeyword` if the default operator is not in the
    /// keyword table.
    pub fn build(self) -> Result<Reducer, ReduceError> {
        let default_opcode = self
            .keywords
            .opcode(&self.default_operator)
            .ok_or_else(|| unknown_keyword(&self.default_operator))?;
        let table = DispatchTable::build(&self.keywords);
        tracing::debug!(
            keywords = self.keywords.len(),
            handlers = table.len(),
            default_operator = %self.default_operator,
            "built reducer"
        );
        Ok(Reducer {
            keywords: self.keywords,
            table: Rc::new(table),
            default_opcode,
        })
    }
}

impl Default for ReducerBuilder {
    fn default() -> Self {
        ReducerBuilder::new()
    }
}

/// Reduce `form` against `env` with the standard reducer.
///
/// Builds the dispatch table on every call; hold a [`Reducer`] when reducing
/// more than once.
pub fn reduce(form: &Term, env: &Term) -> ReduceResult {
    Reducer::standard().reduce(form, env)
}
