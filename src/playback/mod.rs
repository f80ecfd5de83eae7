//! Playback: timer-driven reveal of a transcript.
//!
//! Scheduling is single-threaded and cooperative. The engine owns at most
//! one timer on a [`TimerQueue`]; whoever drives the queue hands each fired
//! timer back to the engine, which takes one step and schedules the next.
//!
//! ```text
//!   start()                     fire(h1)                    fire(hN)
//!      │    first_line_delay       │     offset gap            │   reset_pause
//!      ▼  ─────────────────────▶   ▼  ─────────────────▶  ...  ▼  ─────────────▶  Reset, loop
//!   revealed = 0               revealed = 1                revealed = N
//! ```
//!
//! A handle that was cancelled by `stop()` (or belongs to another engine on
//! the same queue) is ignored, so a callback already in flight can never
//! touch a stopped engine.

mod engine;
mod timer;

pub use engine::{
    PlaybackConfig, PlaybackEngine, PlaybackEvent, SubscriptionId, MIN_RESET_PAUSE,
};
pub use timer::{TimerHandle, TimerQueue};
