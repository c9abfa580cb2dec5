//! Tracing setup and an instrumented dispatcher.

use std::sync::Once;

use opacity_ops::ReduceResult;
use opacity_sexp::Term;

use crate::context::ReduceContext;
use crate::dispatch::default_dispatch;

static TRACING_INIT: Once = Once::new();

/// Sub-terms printed per logged term.
pub(crate) const TRACE_TERM_LIMIT: usize = 48;

/// Initialize tracing from `RUST_LOG`.
///
/// Does nothing unless `RUST_LOG` is set. With `OPACITY_LOG_TREE` also set,
/// events are rendered as an indented span tree instead of flat lines.
/// Safe to call repeatedly and alongside an already-installed subscriber.
pub fn init_tracing() {
    TRACING_INIT.call_once(|| {
        use tracing_subscriber::{fmt, prelude::*, EnvFilter};

        // Only initialize if RUST_LOG is set
        if std::env::var("RUST_LOG").is_err() {
            return;
        }
        let filter = EnvFilter::from_default_env();
        let installed = if std::env::var("OPACITY_LOG_TREE").is_ok() {
            tracing_subscriber::registry()
                .with(tracing_tree::HierarchicalLayer::new(2).with_targets(true))
                .with(filter)
                .try_init()
        } else {
            tracing_subscriber::registry()
                .with(fmt::layer().with_target(true).with_level(true))
                .with(filter)
                .try_init()
        };
        if installed.is_err() {
            tracing::debug!("a global subscriber was already installed");
        }
    });
}

/// [`default_dispatch`] with an event per step and its outcome.
///
/// Install with [`Reducer::reduce_with`](crate::Reducer::reduce_with) or
/// [`ReduceContext::with_dispatch`]. Steps are logged at `trace`, failures at
/// `debug`.
pub fn traced_dispatch(term: &Term, ctx: &ReduceContext) -> ReduceResult {
    let shown = term.abbreviated(TRACE_TERM_LIMIT);
    tracing::trace!(
        term = ?shown,
        env = ?ctx.env().abbreviated(TRACE_TERM_LIMIT),
        "reduce"
    );
    let result = default_dispatch(term, ctx);
    match &result {
        Ok(value) => {
            let value = value.abbreviated(TRACE_TERM_LIMIT);
            tracing::trace!(term = ?shown, ?value, "reduced");
        }
        Err(error) => tracing::debug!(term = ?shown, %error, "reduction failed"),
    }
    result
}
