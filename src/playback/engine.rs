//! Playback engine: reveals transcript lines one timer at a time.

use super::timer::{TimerHandle, TimerQueue};
use crate::transcript::{Transcript, TranscriptLine};
use std::fmt;
use std::time::Duration;

/// Shortest reset pause the engine will schedule.
///
/// Every cycle must move the clock forward, otherwise a transcript whose
/// lines all share one offset would replay forever within a single instant.
pub const MIN_RESET_PAUSE: Duration = Duration::from_millis(1);

/// Timing configuration for the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlaybackConfig {
    /// Pause before the first line of every cycle, regardless of its offset.
    pub first_line_delay: Duration,
    /// Pause after the last line before the transcript clears and replays.
    /// Raised to [`MIN_RESET_PAUSE`] when shorter.
    pub reset_pause: Duration,
}

impl Default for PlaybackConfig {
    fn default() -> Self {
        Self {
            first_line_delay: Duration::from_millis(1000),
            reset_pause: Duration::from_millis(5000),
        }
    }
}

/// A change in how many lines are visible.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlaybackEvent {
    /// One more line became visible; `count` lines are now shown.
    Revealed {
        /// Revealed line count after the step.
        count: usize,
    },
    /// The screen was cleared back to zero lines.
    Reset,
}

/// Identifies a callback registered with [`PlaybackEngine::on_change`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

type Callback = Box<dyn FnMut(&PlaybackEvent)>;

/// Time-driven revealer of a [`Transcript`].
///
/// The engine never sleeps or spawns anything. It schedules exactly one
/// timer at a time on a [`TimerQueue`] and expects the owner of that queue
/// to hand fired timers back through [`fire`](Self::fire).
pub struct PlaybackEngine {
    transcript: Transcript,
    config: PlaybackConfig,
    /// Number of leading lines currently visible.
    revealed: usize,
    running: bool,
    /// The only timer this engine may have outstanding.
    pending: Option<TimerHandle>,
    /// Cycles finished (reset pause included) since construction.
    cycles: u64,
    subscribers: Vec<(SubscriptionId, Callback)>,
    next_subscription: u64,
}

impl PlaybackEngine {
    /// Create a stopped engine with the default timing.
    pub fn new(transcript: Transcript) -> Self {
        Self::with_config(transcript, PlaybackConfig::default())
    }

    /// Create a stopped engine with custom timing.
    pub fn with_config(transcript: Transcript, config: PlaybackConfig) -> Self {
        Self {
            transcript,
            config,
            revealed: 0,
            running: false,
            pending: None,
            cycles: 0,
            subscribers: Vec::new(),
            next_subscription: 0,
        }
    }

    /// The transcript being played.
    pub const fn transcript(&self) -> &Transcript {
        &self.transcript
    }

    /// Timing configuration.
    pub const fn config(&self) -> &PlaybackConfig {
        &self.config
    }

    /// Number of leading lines currently visible.
    #[inline]
    pub const fn revealed_count(&self) -> usize {
        self.revealed
    }

    /// The visible prefix of the transcript.
    pub fn revealed_lines(&self) -> &[TranscriptLine] {
        &self.transcript.lines()[..self.revealed]
    }

    /// Whether every line is visible.
    pub fn is_complete(&self) -> bool {
        self.revealed == self.transcript.len()
    }

    /// Whether playback has been started and not stopped.
    pub const fn is_running(&self) -> bool {
        self.running
    }

    /// Completed cycles, counted when the reset pause elapses.
    pub const fn cycles(&self) -> u64 {
        self.cycles
    }

    /// The timer currently outstanding, if any.
    pub const fn pending_timer(&self) -> Option<TimerHandle> {
        self.pending
    }

    /// Register a callback run once per reveal step and once per reset.
    pub fn on_change<F>(&mut self, callback: F) -> SubscriptionId
    where
        F: FnMut(&PlaybackEvent) + 'static,
    {
        let id = SubscriptionId(self.next_subscription);
        self.next_subscription += 1;
        self.subscribers.push((id, Box::new(callback)));
        id
    }

    /// Remove a callback. Returns `false` if it was not registered.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.subscribers.len();
        self.subscribers.retain(|(sub, _)| *sub != id);
        self.subscribers.len() != before
    }

    /// Start playback from the first line.
    ///
    /// Does nothing if already running. After a [`stop`](Self::stop) the
    /// screen is cleared (with a [`PlaybackEvent::Reset`] if anything was
    /// visible) and the cycle begins again.
    pub fn start(&mut self, queue: &mut TimerQueue) {
        if self.running {
            tracing::trace!(revealed = self.revealed, "start ignored, already running");
            return;
        }

        self.running = true;
        tracing::debug!(lines = self.transcript.len(), "playback started");

        if self.revealed != 0 {
            self.revealed = 0;
            self.notify(PlaybackEvent::Reset);
        }
        self.arm(queue);
    }

    /// Cancel the outstanding timer and freeze the current state.
    pub fn stop(&mut self, queue: &mut TimerQueue) {
        if let Some(handle) = self.pending.take() {
            queue.cancel(handle);
        }
        if self.running {
            tracing::debug!(revealed = self.revealed, "playback stopped");
        }
        self.running = false;
    }

    /// Stop playback and drop the engine.
    pub fn dispose(mut self, queue: &mut TimerQueue) {
        self.stop(queue);
    }

    /// Deliver a fired timer.
    ///
    /// Returns `true` if `handle` was this engine's current timer and a step
    /// was taken. Any other handle (another engine's, or one cancelled by
    /// `stop`) is ignored.
    pub fn fire(&mut self, handle: TimerHandle, queue: &mut TimerQueue) -> bool {
        if self.pending != Some(handle) {
            return false;
        }
        self.pending = None;

        if self.revealed < self.transcript.len() {
            self.revealed += 1;
            tracing::trace!(revealed = self.revealed, at = ?queue.now(), "line revealed");
            self.notify(PlaybackEvent::Revealed {
                count: self.revealed,
            });
        } else {
            self.revealed = 0;
            self.cycles += 1;
            tracing::debug!(cycles = self.cycles, "cycle complete, replaying");
            self.notify(PlaybackEvent::Reset);
        }

        self.arm(queue);
        true
    }

    /// Delay before the next step, or `None` if there is nothing to play.
    fn next_delay(&self) -> Option<Duration> {
        let len = self.transcript.len();
        if len == 0 {
            return None;
        }
        if self.revealed >= len {
            return Some(self.config.reset_pause.max(MIN_RESET_PAUSE));
        }
        if self.revealed == 0 {
            return Some(self.config.first_line_delay);
        }

        let prev = self.transcript.get(self.revealed - 1)?.offset_millis;
        let next = self.transcript.get(self.revealed)?.offset_millis;
        if next < prev {
            tracing::debug!(
                index = self.revealed,
                offset_millis = next,
                previous_millis = prev,
                "offset goes backwards, revealing immediately"
            );
        }
        let gap = next.saturating_sub(prev);
        Some(Duration::from_millis(gap))
    }

    /// Schedule the next step.
    ///
    /// Only `start` (while stopped) and `fire` (after taking the current
    /// handle) call this, so `pending` is always empty here.
    fn arm(&mut self, queue: &mut TimerQueue) {
        debug_assert!(self.pending.is_none(), "second timer armed");
        if let Some(delay) = self.next_delay() {
            self.pending = Some(queue.schedule(delay));
        }
    }

    fn notify(&mut self, event: PlaybackEvent) {
        for (_, callback) in &mut self.subscribers {
            callback(&event);
        }
    }
}

impl fmt::Debug for PlaybackEngine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PlaybackEngine")
            .field("lines", &self.transcript.len())
            .field("config", &self.config)
            .field("revealed", &self.revealed)
            .field("running", &self.running)
            .field("pending", &self.pending)
            .field("cycles", &self.cycles)
            .field("subscribers", &self.subscribers.len())
            .finish()
    }
}
