//! Input Actor: Dedicated thread for polling terminal events.
//!
//! The demo only cares about a handful of keys and resizes; everything else
//! is dropped on the input thread so the playback loop wakes only when it
//! has something to do.

use crossbeam_channel::Sender;
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use std::sync::atomic::{AtomicBool, Ordering};
use std::io;
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::Duration;

/// Events sent from the input thread to the playback loop.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputEvent {
    /// `q`, `Esc` or `Ctrl+C`.
    Quit,
    /// `r`: clear the screen and start the walkthrough over.
    Restart,
    /// Terminal was resized.
    Resize {
        /// New width in columns.
        width: u16,
        /// New height in rows.
        height: u16,
    },
    /// Input thread encountered an error.
    Error(String),
    /// Input thread is shutting down.
    Shutdown,
}

/// Input actor that polls terminal events.
pub struct InputActor {
    /// Handle to the input thread.
    handle: Option<JoinHandle<()>>,
    /// Flag to signal shutdown.
    shutdown: Arc<AtomicBool>,
}

impl InputActor {
    /// Spawn the input actor thread.
    ///
    /// `poll_timeout` bounds how long a shutdown request can go unnoticed.
    pub fn spawn(sender: Sender<InputEvent>, poll_timeout: Duration) -> io::Result<Self> {
        let shutdown = Arc::new(AtomicBool::new(false));
        let shutdown_clone = Arc::clone(&shutdown);

        let handle = thread::Builder::new()
            .name("gatekey-cast-input".to_string())
            .spawn(move || {
                Self::run_loop(&sender, &shutdown_clone, poll_timeout);
            })?;

        Ok(Self {
            handle: Some(handle),
            shutdown,
        })
    }

    /// Signal the input thread to shutdown.
    pub fn shutdown(&self) {
        self.shutdown.store(true, Ordering::Relaxed);
    }

    /// Wait for the input thread to finish.
    pub fn join(mut self) {
        self.shutdown();
        if let Some(handle) = self.handle.take() {
            let _ = handle.join();
        }
    }

    /// Main input polling loop.
    fn run_loop(sender: &Sender<InputEvent>, shutdown: &AtomicBool, poll_timeout: Duration) {
        pump(sender, shutdown, poll_timeout, |timeout| {
            if event::poll(timeout)? {
                event::read().map(Some)
            } else {
                Ok(None)
            }
        });
    }
}

/// Consecutive poll failures after which the input thread gives up.
const MAX_POLL_FAILURES: u32 = 3;

/// Forward events from `next` until shutdown, a dropped receiver, or
/// repeated failures.
///
/// `next` waits up to the given timeout and returns `Ok(None)` when nothing
/// arrived. A failure backs off for one timeout before polling again.
fn pump<F>(sender: &Sender<InputEvent>, shutdown: &AtomicBool, poll_timeout: Duration, mut next: F)
where
    F: FnMut(Duration) -> io::Result<Option<Event>>,
{
    let mut failures = 0;
    loop {
        if shutdown.load(Ordering::Relaxed) {
            // The loop may already be gone; never block on a full channel here.
            let _ = sender.try_send(InputEvent::Shutdown);
            break;
        }

        match next(poll_timeout) {
            Ok(Some(event)) => {
                failures = 0;
                if let Some(input_event) = convert_event(&event) {
                    if sender.send(input_event).is_err() {
                        // Receiver dropped, exit
                        break;
                    }
                }
            }
            Ok(None) => failures = 0,
            Err(e) => {
                failures += 1;
                tracing::warn!(error = %e, failures, "terminal event poll failed");
                let _ = sender.send(InputEvent::Error(e.to_string()));
                if failures >= MAX_POLL_FAILURES {
                    let _ = sender.try_send(InputEvent::Shutdown);
                    break;
                }
                thread::sleep(poll_timeout);
            }
        }
    }
}

impl Drop for InputActor {
    fn drop(&mut self) {
        self.shutdown();
    }
}

/// Map a crossterm event to an [`InputEvent`], dropping the ones we ignore.
pub fn convert_event(event: &Event) -> Option<InputEvent> {
    match event {
        Event::Key(key) => convert_key(key),
        Event::Resize(width, height) => Some(InputEvent::Resize {
            width: *width,
            height: *height,
        }),
        _ => None,
    }
}

fn convert_key(key: &KeyEvent) -> Option<InputEvent> {
    // Only process key press events (not release or repeat)
    if key.kind != KeyEventKind::Press {
        return None;
    }
    match key.code {
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            Some(InputEvent::Quit)
        }
        KeyCode::Char('q' | 'Q') | KeyCode::Esc => Some(InputEvent::Quit),
        KeyCode::Char('r' | 'R') => Some(InputEvent::Restart),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossbeam_channel::bounded;
    use crossterm::event::KeyEventState;

    fn press(code: KeyCode, modifiers: KeyModifiers) -> Event {
        Event::Key(KeyEvent::new(code, modifiers))
    }

    #[test]
    fn test_quit_keys() {
        for event in [
            press(KeyCode::Char('q'), KeyModifiers::NONE),
            press(KeyCode::Esc, KeyModifiers::NONE),
            press(KeyCode::Char('c'), KeyModifiers::CONTROL),
        ] {
            assert_eq!(convert_event(&event), Some(InputEvent::Quit));
        }
    }

    #[test]
    fn test_plain_c_is_ignored() {
        assert_eq!(convert_event(&press(KeyCode::Char('c'), KeyModifiers::NONE)), None);
    }

    #[test]
    fn test_restart_key() {
        assert_eq!(
            convert_event(&press(KeyCode::Char('r'), KeyModifiers::NONE)),
            Some(InputEvent::Restart)
        );
    }

    #[test]
    fn test_release_is_ignored() {
        let release = Event::Key(KeyEvent {
            code: KeyCode::Char('q'),
            modifiers: KeyModifiers::NONE,
            kind: KeyEventKind::Release,
            state: KeyEventState::NONE,
        });
        assert_eq!(convert_event(&release), None);
    }

    #[test]
    fn test_resize() {
        assert_eq!(
            convert_event(&Event::Resize(100, 30)),
            Some(InputEvent::Resize {
                width: 100,
                height: 30
            })
        );
    }

    #[test]
    fn test_poll_errors_give_up() {
        let (tx, rx) = bounded(16);
        let shutdown = AtomicBool::new(false);
        let mut polls = 0;
        pump(&tx, &shutdown, Duration::from_millis(1), |_| {
            polls += 1;
            Err(io::Error::other("tty gone"))
        });

        assert_eq!(polls, MAX_POLL_FAILURES);
        let events: Vec<_> = rx.try_iter().collect();
        assert_eq!(events.len(), MAX_POLL_FAILURES as usize + 1);
        assert_eq!(events.last(), Some(&InputEvent::Shutdown));
        assert!(events[..events.len() - 1]
            .iter()
            .all(|e| matches!(e, InputEvent::Error(_))));
    }

    #[test]
    fn test_pump_forwards_and_stops_on_shutdown() {
        let (tx, rx) = bounded(16);
        let shutdown = AtomicBool::new(false);
        pump(&tx, &shutdown, Duration::from_millis(1), |_| {
            shutdown.store(true, Ordering::Relaxed);
            Ok(Some(Event::Resize(80, 24)))
        });

        let events: Vec<_> = rx.try_iter().collect();
        assert_eq!(
            events,
            vec![
                InputEvent::Resize {
                    width: 80,
                    height: 24
                },
                InputEvent::Shutdown,
            ]
        );
    }
}
