//! Terminal session: raw mode and alternate screen for the lifetime of a run.

use crossterm::{
    cursor, execute,
    terminal::{self, Clear, ClearType, EnterAlternateScreen, LeaveAlternateScreen},
};
use std::io;

/// Puts the terminal into playback mode and restores it on drop.
#[derive(Debug)]
pub struct Session {
    alternate_screen: bool,
    width: u16,
    height: u16,
}

impl Session {
    /// Enter raw mode, optionally switch to the alternate screen, and hide
    /// the hardware cursor (the demo draws its own).
    ///
    /// # Errors
    ///
    /// Returns an error if terminal setup fails.
    pub fn enter(alternate_screen: bool) -> io::Result<Self> {
        let (width, height) = terminal::size()?;
        terminal::enable_raw_mode()?;

        let mut stdout = io::stdout();
        if alternate_screen {
            execute!(stdout, EnterAlternateScreen)?;
        }
        execute!(stdout, cursor::Hide, Clear(ClearType::All))?;

        tracing::debug!(width, height, alternate_screen, "terminal session entered");
        Ok(Self {
            alternate_screen,
            width,
            height,
        })
    }

    /// Terminal size at the time the session was entered.
    pub const fn size(&self) -> (u16, u16) {
        (self.width, self.height)
    }
}

impl Drop for Session {
    fn drop(&mut self) {
        // Restore terminal state
        let mut stdout = io::stdout();
        let _ = execute!(stdout, crossterm::style::ResetColor, cursor::Show);
        if self.alternate_screen {
            let _ = execute!(stdout, LeaveAlternateScreen);
        }
        let _ = terminal::disable_raw_mode();
        tracing::debug!("terminal session restored");
    }
}
