//! View benchmark: cost of producing one frame of the demo window.
//!
//! Target: a full-transcript 120x40 frame well under one blink interval.

use cast::{OutputBuffer, PlaybackEngine, Rect, TerminalView, TimerQueue, Transcript};
use criterion::{black_box, criterion_group, criterion_main, Criterion};
use std::time::Duration;

fn revealed_engine(millis: u64) -> PlaybackEngine {
    let mut queue = TimerQueue::new();
    let mut engine = PlaybackEngine::new(Transcript::gatekey());
    engine.start(&mut queue);
    queue.advance_to(Duration::from_millis(millis), |q, h| {
        engine.fire(h, q);
    });
    engine
}

fn compose_full(c: &mut Criterion) {
    let engine = revealed_engine(13_400);
    let view = TerminalView::new(Rect::from_size(120, 40));

    c.bench_function("compose_full_transcript", |b| {
        b.iter(|| view.compose(black_box(engine.revealed_lines())))
    });
}

fn render_full(c: &mut Criterion) {
    let engine = revealed_engine(13_400);
    let view = TerminalView::new(Rect::from_size(120, 40));
    let mut out = OutputBuffer::with_capacity(64 * 1024);

    c.bench_function("render_full_120x40", |b| {
        b.iter(|| {
            out.clear();
            view.render(black_box(&engine), &mut out);
            black_box(out.len())
        })
    });
}

fn render_scrolled(c: &mut Criterion) {
    let engine = revealed_engine(13_400);
    let view = TerminalView::new(Rect::from_size(80, 12));
    let mut out = OutputBuffer::with_capacity(64 * 1024);

    c.bench_function("render_scrolled_80x12", |b| {
        b.iter(|| {
            out.clear();
            view.render(black_box(&engine), &mut out);
            black_box(out.len())
        })
    });
}

criterion_group!(benches, compose_full, render_full, render_scrolled);
criterion_main!(benches);
