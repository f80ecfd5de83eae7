//! View: turns engine state into terminal output.
//!
//! - [`TerminalView`]: the demo window (title bar, revealed lines, cursor)
//! - [`OutputBuffer`]: single-write ANSI frame accumulator
//! - [`Palette`], [`Style`], [`Rgb`]: colors

mod output;
mod rect;
mod style;
mod terminal;

pub use output::OutputBuffer;
pub use rect::Rect;
pub use style::{Modifiers, Palette, Rgb, Style};
pub use terminal::{TerminalView, ViewConfig};
