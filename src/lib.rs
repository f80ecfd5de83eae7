//! # Cast
//!
//! Scripted terminal playback of the GateKey CLI walkthrough.
//!
//! A prerecorded transcript is revealed line by line on a timer, as if
//! someone were typing `gatekey login`, `gatekey list` and friends into a
//! real shell. When the last line is shown the screen holds for a moment,
//! clears, and the walkthrough plays again.
//!
//! ## Core Concepts
//!
//! - **Transcript**: immutable list of timed prompt/output lines
//! - **Playback engine**: one outstanding timer at a time, stale timers ignored
//! - **Timer queue**: single-threaded timeline, driven virtually or by the wall clock
//! - **Terminal view**: read-only renderer with window chrome and a blinking cursor
//!
//! ## Example
//!
//! ```rust
//! use cast::{PlaybackEngine, TimerQueue, Transcript};
//! use std::time::Duration;
//!
//! let mut queue = TimerQueue::new();
//! let mut engine = PlaybackEngine::new(Transcript::gatekey());
//! engine.start(&mut queue);
//!
//! // One second of "thinking", then the first command appears.
//! queue.advance_to(Duration::from_millis(1000), |q, timer| {
//!     engine.fire(timer, q);
//! });
//! assert_eq!(engine.revealed_count(), 1);
//! ```

#![warn(missing_docs)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]

pub mod error;
pub mod playback;
pub mod runtime;
pub mod transcript;
pub mod view;

// Re-exports for convenience
pub use error::{Error, Result, TranscriptError};
pub use playback::{
    PlaybackConfig, PlaybackEngine, PlaybackEvent, SubscriptionId, TimerHandle, TimerQueue,
};
pub use runtime::{ExitReason, Player, RunSummary, Runtime, RuntimeConfig};
pub use transcript::{Emphasis, Transcript, TranscriptLine};
pub use view::{OutputBuffer, Palette, Rect, Rgb, TerminalView, ViewConfig};
