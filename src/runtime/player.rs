//! Player: one engine, its timer queue and the view drawing it.
//!
//! The player knows nothing about real time. The runtime tells it where the
//! timeline is (`advance_to`) and asks when it next needs waking
//! (`next_wake`); tests do the same with made-up instants.

use crate::playback::{PlaybackConfig, PlaybackEngine, TimerQueue};
use crate::transcript::Transcript;
use crate::view::{OutputBuffer, Rect, TerminalView};
use std::cell::Cell;
use std::rc::Rc;
use std::time::Duration;

/// Owns the playback state of one demo window.
#[derive(Debug)]
pub struct Player {
    queue: TimerQueue,
    engine: PlaybackEngine,
    view: TerminalView,
    /// Set by the engine's change callback, consumed by `draw`.
    changed: Rc<Cell<bool>>,
    blink_interval: Duration,
    next_blink: Duration,
}

impl Player {
    /// Wire a new engine for `transcript` to `view`. Playback does not begin
    /// until [`start`](Self::start).
    pub fn new(
        transcript: Transcript,
        playback: PlaybackConfig,
        view: TerminalView,
        blink_interval: Duration,
    ) -> Self {
        let mut engine = PlaybackEngine::with_config(transcript, playback);
        let changed = Rc::new(Cell::new(false));
        let flag = Rc::clone(&changed);
        engine.on_change(move |_| flag.set(true));

        Self {
            queue: TimerQueue::new(),
            engine,
            view,
            changed,
            blink_interval,
            next_blink: blink_interval,
        }
    }

    /// The engine being driven.
    pub const fn engine(&self) -> &PlaybackEngine {
        &self.engine
    }

    /// The view.
    pub const fn view(&self) -> &TerminalView {
        &self.view
    }

    /// Resize the window to `bounds`.
    ///
    /// Always schedules a full frame: the terminal wipes the screen on a
    /// resize even when the size reported back has not changed.
    pub fn resize(&mut self, bounds: Rect) {
        self.view.set_bounds(bounds);
        self.view.mark_dirty();
    }

    /// Current position on the timeline.
    pub const fn now(&self) -> Duration {
        self.queue.now()
    }

    /// Start playback.
    pub fn start(&mut self) {
        self.engine.start(&mut self.queue);
    }

    /// Stop playback, keeping whatever is on screen.
    pub fn stop(&mut self) {
        self.engine.stop(&mut self.queue);
    }

    /// Clear the screen and play from the first line again.
    pub fn restart(&mut self) {
        self.engine.stop(&mut self.queue);
        self.engine.start(&mut self.queue);
        self.view.mark_dirty();
    }

    /// The next point on the timeline at which something changes: a reveal
    /// step or a cursor blink. `None` when nothing is scheduled.
    pub fn next_wake(&self) -> Option<Duration> {
        let blink = (!self.blink_interval.is_zero()).then_some(self.next_blink);
        match (self.queue.next_deadline(), blink) {
            (Some(deadline), Some(blink)) => Some(deadline.min(blink)),
            (deadline, blink) => deadline.or(blink),
        }
    }

    /// Move the timeline to `now`, firing due reveal steps and blinks.
    pub fn advance_to(&mut self, now: Duration) {
        let engine = &mut self.engine;
        self.queue.advance_to(now, |queue, handle| {
            engine.fire(handle, queue);
        });

        if self.blink_interval.is_zero() {
            return;
        }
        if now >= self.next_blink {
            self.view.toggle_cursor();
            self.next_blink += self.blink_interval;
            // Fell behind: skip missed blinks rather than flicker through them.
            if self.next_blink <= now {
                self.next_blink = now + self.blink_interval;
            }
        }
    }

    /// Render into `out` if anything changed since the last draw.
    ///
    /// Returns whether a frame was produced.
    pub fn draw(&mut self, out: &mut OutputBuffer) -> bool {
        if self.changed.replace(false) {
            self.view.mark_dirty();
        }
        if !self.view.needs_redraw() {
            return false;
        }
        self.view.render(&self.engine, out);
        self.view.clear_redraw();
        true
    }
}

impl Drop for Player {
    fn drop(&mut self) {
        self.engine.stop(&mut self.queue);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const fn ms(n: u64) -> Duration {
        Duration::from_millis(n)
    }

    fn player(blink: u64) -> Player {
        Player::new(
            Transcript::gatekey(),
            PlaybackConfig::default(),
            TerminalView::new(Rect::from_size(60, 20)),
            ms(blink),
        )
    }

    #[test]
    fn test_first_frame_then_idle() {
        let mut p = player(530);
        p.start();
        let mut out = OutputBuffer::new();
        assert!(p.draw(&mut out));
        out.clear();
        assert!(!p.draw(&mut out));
        assert!(out.is_empty());
    }

    #[test]
    fn test_reveal_triggers_redraw() {
        let mut p = player(0);
        p.start();
        let mut out = OutputBuffer::new();
        p.draw(&mut out);

        assert_eq!(p.next_wake(), Some(ms(1000)));
        p.advance_to(ms(1000));
        assert_eq!(p.engine().revealed_count(), 1);
        assert!(p.draw(&mut out));
    }

    #[test]
    fn test_next_wake_prefers_blink() {
        let mut p = player(530);
        p.start();
        assert_eq!(p.next_wake(), Some(ms(530)));
        p.advance_to(ms(530));
        assert!(!p.view().cursor_visible());
        assert_eq!(p.next_wake(), Some(ms(1000)));
    }

    #[test]
    fn test_blink_skips_when_behind() {
        let mut p = player(100);
        p.advance_to(ms(1000));
        assert!(!p.view().cursor_visible());
        assert_eq!(p.next_wake(), Some(ms(1100)));
    }

    #[test]
    fn test_restart() {
        let mut p = player(0);
        p.start();
        p.advance_to(ms(5000));
        assert!(p.engine().revealed_count() > 1);

        p.restart();
        assert_eq!(p.engine().revealed_count(), 0);
        assert!(p.engine().is_running());
        assert_eq!(p.next_wake(), Some(ms(6000)));
    }

    #[test]
    fn test_resize_to_same_size_redraws() {
        let mut p = player(0);
        p.start();
        let mut out = OutputBuffer::new();
        assert!(p.draw(&mut out));
        assert!(!p.draw(&mut out));

        p.resize(Rect::from_size(60, 20));
        out.clear();
        assert!(p.draw(&mut out));
        assert!(!out.is_empty());
    }

    #[test]
    fn test_nothing_to_wake_for() {
        let p = player(0);
        assert_eq!(p.next_wake(), None);
    }

    #[test]
    fn test_stop_holds_screen() {
        let mut p = player(0);
        p.start();
        p.advance_to(ms(1000));
        p.stop();
        p.advance_to(ms(60_000));
        assert_eq!(p.engine().revealed_count(), 1);
    }
}
