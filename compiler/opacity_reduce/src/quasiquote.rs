//! Quasiquote template expansion.
//!
//! The template is rebuilt element by element. A nested `quasiquote` head
//! raises the level, an `unquote` head lowers it, and an `unquote` that brings
//! the level to exactly zero is replaced by the reduction of its operand.
//! Every other node, including the keyword heads themselves, is copied.
//!
//! The walk keeps its own frame stack, one frame per list under
//! construction, so template depth never turns into native recursion.
//! Substituted expressions are reduced through the context dispatcher, which
//! guards its own stack.

use smallvec::SmallVec;

use opacity_ops::{Opcode, ReduceError, ReduceResult};
use opacity_sexp::{ListIter, Term};

use crate::context::ReduceContext;
use crate::tracing_setup::TRACE_TERM_LIMIT;

/// A list being rebuilt.
struct Frame<'a> {
    /// Elements not yet visited.
    items: ListIter<'a>,
    /// Nesting level the elements are walked at.
    level: i64,
    /// Rebuilt elements, in order.
    done: SmallVec<[Term; 8]>,
}

impl Frame<'_> {
    /// Reassemble the list, keeping an improper tail as it was.
    fn rebuild(self) -> Term {
        let tail = self.items.remainder().clone();
        Term::list_with_tail(self.done, tail)
    }
}

/// Expand `template` at level 1 under `ctx`.
pub fn expand(template: &Term, ctx: &ReduceContext) -> ReduceResult {
    let mut frames: Vec<Frame<'_>> = Vec::new();
    if let Some(value) = enter(template, 1, ctx, &mut frames)? {
        return Ok(value);
    }

    while let Some(frame) = frames.last_mut() {
        let value = match frame.items.next() {
            Some(child) => {
                let level = frame.level;
                match enter(child, level, ctx, &mut frames)? {
                    Some(value) => value,
                    None => continue,
                }
            }
            None => frames.pop().map(Frame::rebuild).unwrap_or_default(),
        };
        match frames.last_mut() {
            Some(parent) => parent.done.push(value),
            None => return Ok(value),
        }
    }

    Ok(Term::nil())
}

/// Visit one node of the template.
///
/// Returns the finished value for leaves and balanced unquotes. For any other
/// list a frame is pushed and `None` returned; the list's value arrives when
/// that frame is exhausted.
fn enter<'a>(
    term: &'a Term,
    mut level: i64,
    ctx: &ReduceContext,
    frames: &mut Vec<Frame<'a>>,
) -> Result<Option<Term>, ReduceError> {
    let Some(head) = term.first() else {
        return Ok(Some(term.clone()));
    };

    if let Some(opcode) = Opcode::from_term(head) {
        let table = ctx.table();
        if table.quasiquote_opcode() == Some(opcode) {
            level += 1;
        }
        if table.unquote_opcode() == Some(opcode) {
            level -= 1;
            if level == 0 {
                if let Some(expr) = term.nth(1) {
                    tracing::trace!(
                        expr = ?expr.abbreviated(TRACE_TERM_LIMIT),
                        "balanced unquote"
                    );
                    return ctx.dispatch(expr).map(Some);
                }
            }
        }
    }

    frames.push(Frame {
        items: term.iter(),
        level,
        done: SmallVec::new(),
    });
    Ok(None)
}
