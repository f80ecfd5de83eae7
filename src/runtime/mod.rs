//! Runtime: plays a transcript in the user's terminal.
//!
//! ```text
//! ┌──────────────┐   InputEvent    ┌────────────────────────────────┐
//! │ Input Thread │ ──────────────▶ │           Main Loop            │
//! └──────────────┘                 │  select!(input, next wake)     │
//!                                  │  Player::advance_to(elapsed)   │
//!                                  │  Player::draw -> OutputBuffer  │
//!                                  └───────────────┬────────────────┘
//!                                                  │ one write per frame
//!                                                  ▼
//!                                               stdout
//! ```
//!
//! All playback state lives on the main thread. The input thread only
//! forwards key presses and resizes.

mod input;
mod player;
mod session;

pub use input::{convert_event, InputActor, InputEvent};
pub use player::Player;
pub use session::Session;

use crate::playback::PlaybackConfig;
use crate::transcript::Transcript;
use crate::view::{OutputBuffer, Rect, TerminalView, ViewConfig};
use crossbeam_channel::{after, bounded, never, select, Receiver};
use std::io;
use std::time::{Duration, Instant};

/// Configuration for [`Runtime`].
#[derive(Debug, Clone)]
pub struct RuntimeConfig {
    /// Reveal timing.
    pub playback: PlaybackConfig,
    /// Window appearance.
    pub view: ViewConfig,
    /// Whether to use alternate screen buffer.
    pub alternate_screen: bool,
    /// Input poll timeout.
    pub input_poll_timeout: Duration,
    /// Half-period of the cursor blink. Zero disables blinking.
    pub blink_interval: Duration,
    /// Exit after this many full cycles. `None` loops until quit.
    pub max_cycles: Option<u64>,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            playback: PlaybackConfig::default(),
            view: ViewConfig::default(),
            alternate_screen: true,
            input_poll_timeout: Duration::from_millis(50),
            blink_interval: Duration::from_millis(530),
            max_cycles: None,
        }
    }
}

/// Why a run ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitReason {
    /// The user pressed a quit key.
    Quit,
    /// The configured number of cycles finished.
    CyclesComplete,
    /// The input thread went away.
    InputClosed,
}

/// Outcome of [`Runtime::run`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunSummary {
    /// Why the loop stopped.
    pub reason: ExitReason,
    /// Cycles completed.
    pub cycles: u64,
    /// Lines visible when the loop stopped.
    pub revealed: usize,
}

/// Terminal front-end for a [`Player`].
#[derive(Debug, Default)]
pub struct Runtime {
    config: RuntimeConfig,
}

impl Runtime {
    /// Create a runtime with the given configuration.
    pub const fn new(config: RuntimeConfig) -> Self {
        Self { config }
    }

    /// Configuration in use.
    pub const fn config(&self) -> &RuntimeConfig {
        &self.config
    }

    /// Take over the terminal and play `transcript` until the user quits
    /// or the cycle limit is reached.
    ///
    /// # Errors
    ///
    /// Returns an error if terminal setup or output fails.
    pub fn run(&self, transcript: Transcript) -> io::Result<RunSummary> {
        let session = Session::enter(self.config.alternate_screen)?;
        let (width, height) = session.size();

        let (input_tx, input_rx) = bounded::<InputEvent>(64);
        let input = InputActor::spawn(input_tx, self.config.input_poll_timeout)?;

        let bounds = Rect::from_size(width, height);
        let view = TerminalView::with_config(bounds, self.config.view.clone());
        let mut player = Player::new(
            transcript,
            self.config.playback,
            view,
            self.config.blink_interval,
        );

        tracing::info!(
            lines = player.engine().transcript().len(),
            width,
            height,
            "playback starting"
        );

        let result = self.event_loop(&mut player, &input_rx);

        input.join();
        drop(player);
        drop(session);

        if let Ok(summary) = &result {
            tracing::info!(reason = ?summary.reason, cycles = summary.cycles, "playback finished");
        }
        result
    }

    fn event_loop(
        &self,
        player: &mut Player,
        input_rx: &Receiver<InputEvent>,
    ) -> io::Result<RunSummary> {
        let origin = Instant::now();
        let mut out = OutputBuffer::with_capacity(16 * 1024);
        let mut stdout = io::stdout();

        player.start();

        let reason = loop {
            if self
                .config
                .max_cycles
                .is_some_and(|max| player.engine().cycles() >= max)
            {
                break ExitReason::CyclesComplete;
            }

            out.clear();
            if player.draw(&mut out) {
                out.flush_to(&mut stdout)?;
            }

            let wake = player
                .next_wake()
                .map(|at| (origin + at).saturating_duration_since(Instant::now()));
            let timeout = wake.map_or_else(never::<Instant>, after);

            let mut exit = None;
            select! {
                recv(input_rx) -> event => match event {
                    Ok(InputEvent::Quit) => exit = Some(ExitReason::Quit),
                    Ok(InputEvent::Restart) => {
                        tracing::debug!("restart requested");
                        player.restart();
                    }
                    Ok(InputEvent::Resize { width, height }) => {
                        out.clear();
                        out.clear_screen();
                        out.flush_to(&mut stdout)?;
                        player.resize(Rect::from_size(width, height));
                    }
                    Ok(InputEvent::Error(message)) => {
                        tracing::warn!(%message, "input error");
                    }
                    Ok(InputEvent::Shutdown) | Err(_) => exit = Some(ExitReason::InputClosed),
                },
                recv(timeout) -> _ => {}
            }
            if let Some(reason) = exit {
                break reason;
            }

            player.advance_to(origin.elapsed());
        };

        Ok(RunSummary {
            reason,
            cycles: player.engine().cycles(),
            revealed: player.engine().revealed_count(),
        })
    }
}
