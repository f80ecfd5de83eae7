//! Playback benchmark: simulated time throughput of the engine.
//!
//! One hour of the built-in walkthrough is about 200 cycles of 34 reveals.

use cast::{PlaybackEngine, TimerQueue, Transcript, TranscriptLine};
use criterion::{black_box, criterion_group, criterion_main, Criterion};
use std::time::Duration;

fn simulate(transcript: &Transcript, until: Duration) -> u64 {
    let mut queue = TimerQueue::new();
    let mut engine = PlaybackEngine::new(transcript.clone());
    engine.start(&mut queue);
    queue.advance_to(until, |q, h| {
        engine.fire(h, q);
    });
    engine.cycles()
}

fn gatekey_one_hour(c: &mut Criterion) {
    let transcript = Transcript::gatekey();
    c.bench_function("gatekey_one_hour", |b| {
        b.iter(|| simulate(black_box(&transcript), Duration::from_secs(3600)))
    });
}

fn dense_ties(c: &mut Criterion) {
    // Everything at offset zero: every step after the first is a zero delay.
    let lines = (0..1000)
        .map(|i| TranscriptLine::output(format!("line {i}"), 0))
        .collect();
    let transcript = Transcript::new(lines);
    c.bench_function("dense_ties_1000", |b| {
        b.iter(|| simulate(black_box(&transcript), Duration::from_secs(60)))
    });
}

fn step_by_step(c: &mut Criterion) {
    let transcript = Transcript::gatekey();
    c.bench_function("gatekey_100ms_steps", |b| {
        b.iter(|| {
            let mut queue = TimerQueue::new();
            let mut engine = PlaybackEngine::new(transcript.clone());
            engine.start(&mut queue);
            for _ in 0..184 {
                queue.advance_by(Duration::from_millis(100), |q, h| {
                    engine.fire(h, q);
                });
            }
            black_box(engine.revealed_count())
        })
    });
}

criterion_group!(benches, gatekey_one_hour, dense_ties, step_by_step);
criterion_main!(benches);
