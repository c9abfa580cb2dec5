use std::fmt;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use opacity_reduce::{reduce_fn, traced_dispatch, Term};
use pretty_assertions::assert_eq;
use tracing::field::{Field, Visit};
use tracing::span::{Attributes, Id};
use tracing::{Event, Subscriber};
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::layer::{Context, Layer};
use tracing_subscriber::prelude::*;

use crate::common::{call, int, reducer};

const DEPTH: usize = 20_000;

/// Renders every span and event field, keeping the longest rendering seen.
#[derive(Clone, Default)]
struct FieldRecorder {
    records: Arc<AtomicUsize>,
    longest: Arc<AtomicUsize>,
}

struct Render<'a>(&'a FieldRecorder);

impl Visit for Render<'_> {
    fn record_debug(&mut self, _field: &Field, value: &dyn fmt::Debug) {
        let rendered = format!("{value:?}");
        self.0.records.fetch_add(1, Ordering::Relaxed);
        self.0.longest.fetch_max(rendered.len(), Ordering::Relaxed);
    }
}

impl<S: Subscriber> Layer<S> for FieldRecorder {
    fn on_new_span(&self, attrs: &Attributes<'_>, _id: &Id, _ctx: Context<'_, S>) {
        attrs.record(&mut Render(self));
    }

    fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
        event.record(&mut Render(self));
    }
}

fn deep_sum() -> Term {
    let mut program = int(0);
    for _ in 0..DEPTH {
        program = call("+", [int(1), program]);
    }
    program
}

#[test]
fn deep_program_under_trace_subscriber() {
    let recorder = FieldRecorder::default();
    let subscriber = tracing_subscriber::registry()
        .with(recorder.clone())
        .with(LevelFilter::TRACE);
    let program = deep_sum();
    let expected = int(i64::try_from(DEPTH).unwrap());

    let (plain, traced) = tracing::subscriber::with_default(subscriber, || {
        let reducer = reducer();
        let plain = reducer.reduce(&program, &Term::nil());
        let traced = reducer.reduce_with(&program, &Term::nil(), reduce_fn(traced_dispatch));
        (plain, traced)
    });

    assert_eq!(plain.unwrap(), expected);
    assert_eq!(traced.unwrap(), expected);
    assert!(recorder.records.load(Ordering::Relaxed) > DEPTH);
    // logged terms stay short however deep the program is
    assert!(recorder.longest.load(Ordering::Relaxed) < 1_000);
}

#[test]
fn deep_program_under_fmt_subscriber() {
    let subscriber = tracing_subscriber::fmt()
        .with_max_level(LevelFilter::TRACE)
        .with_writer(std::io::sink)
        .finish();
    let program = deep_sum();
    let traced = tracing::subscriber::with_default(subscriber, || {
        reducer().reduce_with(&program, &Term::nil(), reduce_fn(traced_dispatch))
    });
    assert_eq!(traced.unwrap(), int(i64::try_from(DEPTH).unwrap()));
}

#[test]
fn deep_term_debug_rendering() {
    let program = deep_sum();
    let rendered = format!("{program:?}");
    assert!(rendered.ends_with(&")".repeat(DEPTH)));
    let short = format!("{:?}", program.abbreviated(5));
    assert!(short.len() < 64, "{short}");
}
