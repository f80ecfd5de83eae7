//! Terminal view: draws the revealed part of a transcript as a small
//! terminal window with a blinking cursor.
//!
//! Lines are composed into an ANSI byte stream and fed through a `vt100`
//! parser sized to the window body. The parser interprets any color
//! sequences embedded in transcript text, wraps long lines and scrolls old
//! ones away, so the newest output and the cursor always stay in view.

use super::output::OutputBuffer;
use super::rect::Rect;
use super::style::{Modifiers, Palette, Rgb, Style};
use crate::playback::PlaybackEngine;
use crate::transcript::TranscriptLine;
use std::io::Write;
use unicode_segmentation::UnicodeSegmentation;
use unicode_width::UnicodeWidthStr;

/// Appearance of the demo terminal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViewConfig {
    /// User name shown in front of every command.
    pub user: String,
    /// Window title.
    pub title: String,
    /// Draw the title bar with window buttons.
    pub chrome: bool,
    /// Glyph used for the cursor.
    pub cursor_glyph: char,
    /// Colors.
    pub palette: Palette,
}

impl Default for ViewConfig {
    fn default() -> Self {
        Self {
            user: "jesse".to_string(),
            title: "Terminal".to_string(),
            chrome: true,
            cursor_glyph: '▋',
            palette: Palette::default(),
        }
    }
}

/// Renders a [`PlaybackEngine`]'s visible lines. Read-only with respect to
/// the engine.
#[derive(Debug)]
pub struct TerminalView {
    bounds: Rect,
    config: ViewConfig,
    cursor_visible: bool,
    needs_redraw: bool,
}

impl TerminalView {
    /// Create a view with the default appearance.
    pub fn new(bounds: Rect) -> Self {
        Self::with_config(bounds, ViewConfig::default())
    }

    /// Create a view with a custom appearance.
    pub const fn with_config(bounds: Rect, config: ViewConfig) -> Self {
        Self {
            bounds,
            config,
            cursor_visible: true,
            needs_redraw: true,
        }
    }

    /// Area covered by the whole window.
    pub const fn bounds(&self) -> Rect {
        self.bounds
    }

    /// Move or resize the window.
    pub fn set_bounds(&mut self, bounds: Rect) {
        if bounds != self.bounds {
            self.bounds = bounds;
            self.needs_redraw = true;
        }
    }

    /// Appearance settings.
    pub const fn config(&self) -> &ViewConfig {
        &self.config
    }

    /// Area below the title bar where lines are drawn.
    pub fn body(&self) -> Rect {
        if self.config.chrome {
            self.bounds.split_top(1).1
        } else {
            self.bounds
        }
    }

    /// Whether the cursor is in the "on" phase of its blink.
    pub const fn cursor_visible(&self) -> bool {
        self.cursor_visible
    }

    /// Flip the cursor blink phase.
    pub fn toggle_cursor(&mut self) {
        self.cursor_visible = !self.cursor_visible;
        self.needs_redraw = true;
    }

    /// Request a redraw, e.g. after the engine revealed a line.
    pub fn mark_dirty(&mut self) {
        self.needs_redraw = true;
    }

    /// Check if the view needs to be redrawn.
    pub const fn needs_redraw(&self) -> bool {
        self.needs_redraw
    }

    /// Clear the redraw flag after rendering.
    pub fn clear_redraw(&mut self) {
        self.needs_redraw = false;
    }

    /// ANSI byte stream for the given lines followed by the cursor row.
    pub fn compose(&self, lines: &[TranscriptLine]) -> Vec<u8> {
        let palette = &self.config.palette;
        let mut out = Vec::with_capacity(64 * (lines.len() + 1));

        for line in lines {
            if line.is_prompt {
                push_styled(&mut out, palette.prompt_user, &self.config.user);
                push_styled(&mut out, palette.prompt_path, " ~ ");
                push_styled(&mut out, palette.prompt_arrow, "➜ ");
                push_styled(&mut out, palette.command, &line.text);
            } else {
                push_styled(&mut out, palette.output_style(line.emphasis), &line.text);
            }
            out.extend_from_slice(b"\x1b[0m\r\n");
        }

        if self.cursor_visible {
            let mut glyph = [0u8; 4];
            push_styled(
                &mut out,
                palette.cursor,
                self.config.cursor_glyph.encode_utf8(&mut glyph),
            );
            out.extend_from_slice(b"\x1b[0m");
        }
        out
    }

    /// Interpret the composed lines on a screen the size of the body.
    pub fn snapshot(&self, engine: &PlaybackEngine) -> vt100::Screen {
        let body = self.body();
        let mut parser = vt100::Parser::new(body.height.max(1), body.width.max(1), 0);
        parser.process(&self.compose(engine.revealed_lines()));
        parser.screen().clone()
    }

    /// Draw the window into `out`.
    pub fn render(&self, engine: &PlaybackEngine, out: &mut OutputBuffer) {
        if self.bounds.is_empty() {
            return;
        }
        if self.config.chrome {
            self.render_title_bar(out);
        }

        let body = self.body();
        if !body.is_empty() {
            let screen = self.snapshot(engine);
            self.render_screen(&screen, body, out);
        }
        out.reset_attrs();
    }

    fn render_title_bar(&self, out: &mut OutputBuffer) {
        let palette = &self.config.palette;
        let bar = self.bounds.split_top(1).0;
        let width = usize::from(bar.width);

        out.cursor_move(bar.x, bar.y);
        out.set_style(palette.title, palette.title_bar);
        out.write_str(&" ".repeat(width));

        // Traffic-light buttons, one column apart.
        for (i, color) in palette.buttons.iter().enumerate() {
            let x = 1 + 2 * i;
            if x >= width {
                break;
            }
            out.cursor_move(bar.x + x as u16, bar.y);
            out.set_style(Style::fg(*color), palette.title_bar);
            out.write_str("●");
        }

        let room = width.saturating_sub(8);
        let title = truncate_to_width(&self.config.title, room);
        let title_width = UnicodeWidthStr::width(title.as_str());
        if title_width > 0 {
            let x = 8 + (room - title_width) / 2;
            out.cursor_move(bar.x + x as u16, bar.y);
            out.set_style(palette.title, palette.title_bar);
            out.write_str(&title);
        }
    }

    fn render_screen(&self, screen: &vt100::Screen, body: Rect, out: &mut OutputBuffer) {
        let palette = &self.config.palette;

        for row in 0..body.height {
            out.cursor_move(body.x, body.y + row);
            for col in 0..body.width {
                let Some(cell) = screen.cell(row, col) else {
                    continue;
                };
                if cell.is_wide_continuation() {
                    continue;
                }

                let style = Style {
                    fg: Rgb::from_vt100(cell.fgcolor(), palette.output.fg),
                    modifiers: Modifiers::of_cell(cell),
                };
                out.set_style(style, palette.background);

                let contents = cell.contents();
                if contents.is_empty() {
                    out.write_str(" ");
                } else {
                    out.write_str(&contents);
                }
            }
        }
    }
}

/// Append `text` in `style`. Bare newlines become CRLF so a multi-line
/// entry starts each row at column zero.
fn push_styled(out: &mut Vec<u8>, style: Style, text: &str) {
    let fg = style.fg;
    let _ = write!(out, "\x1b[0m\x1b[38;2;{};{};{}m", fg.r, fg.g, fg.b);
    if style.modifiers.contains(Modifiers::BOLD) {
        out.extend_from_slice(b"\x1b[1m");
    }
    if style.modifiers.contains(Modifiers::ITALIC) {
        out.extend_from_slice(b"\x1b[3m");
    }
    if style.modifiers.contains(Modifiers::UNDERLINE) {
        out.extend_from_slice(b"\x1b[4m");
    }

    let mut parts = text.split('\n');
    if let Some(first) = parts.next() {
        out.extend_from_slice(first.trim_end_matches('\r').as_bytes());
    }
    for part in parts {
        out.extend_from_slice(b"\r\n");
        out.extend_from_slice(part.trim_end_matches('\r').as_bytes());
    }
}

/// Longest prefix of `text` (whole graphemes) that fits in `max` columns.
fn truncate_to_width(text: &str, max: usize) -> String {
    let mut used = 0;
    let mut result = String::new();
    for grapheme in text.graphemes(true) {
        let width = UnicodeWidthStr::width(grapheme);
        if used + width > max {
            break;
        }
        used += width;
        result.push_str(grapheme);
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::playback::TimerQueue;
    use crate::transcript::Transcript;
    use std::time::Duration;

    fn rows(screen: &vt100::Screen) -> Vec<String> {
        let (_, cols) = screen.size();
        screen
            .rows(0, cols)
            .map(|r| r.trim_end().to_string())
            .collect()
    }

    fn engine_at(transcript: Transcript, millis: u64) -> PlaybackEngine {
        let mut q = TimerQueue::new();
        let mut engine = PlaybackEngine::new(transcript);
        engine.start(&mut q);
        q.advance_to(Duration::from_millis(millis), |q, h| {
            engine.fire(h, q);
        });
        engine
    }

    #[test]
    fn test_empty_shows_cursor_only() {
        let view = TerminalView::new(Rect::from_size(40, 6));
        let engine = PlaybackEngine::new(Transcript::gatekey());
        let screen = view.snapshot(&engine);
        assert_eq!(rows(&screen)[0], "▋");
    }

    #[test]
    fn test_prompt_line_layout() {
        let view = TerminalView::new(Rect::from_size(40, 6));
        let engine = engine_at(Transcript::gatekey(), 1000);
        let r = rows(&view.snapshot(&engine));
        assert_eq!(r[0], "jesse ~ ➜ gatekey login");
        assert_eq!(r[1], "▋");
    }

    #[test]
    fn test_hidden_cursor() {
        let mut view = TerminalView::new(Rect::from_size(40, 6));
        view.toggle_cursor();
        assert!(!view.cursor_visible());
        let engine = engine_at(Transcript::gatekey(), 1000);
        let r = rows(&view.snapshot(&engine));
        assert_eq!(r[1], "");
    }

    #[test]
    fn test_embedded_color_is_interpreted() {
        let view = TerminalView::new(Rect::from_size(60, 12));
        // Line 6 ("Authentication successful!") is due at 1000 + 3600.
        let engine = engine_at(Transcript::gatekey(), 4600);
        assert_eq!(engine.revealed_count(), 6);

        let screen = view.snapshot(&engine);
        let r = rows(&screen);
        assert_eq!(r[5], "Authentication successful!");

        let cell = screen.cell(5, 0).unwrap();
        assert_eq!(cell.fgcolor(), vt100::Color::Idx(2));
    }

    #[test]
    fn test_emphasis_colors() {
        let view = TerminalView::new(Rect::from_size(60, 30));
        let palette = Palette::default();
        let engine = engine_at(
            Transcript::new(vec![
                TranscriptLine::output("ok", 0).success(),
                TranscriptLine::output("[#] wg", 0).dim(),
                TranscriptLine::output("plain", 0),
            ]),
            1000,
        );

        let screen = view.snapshot(&engine);
        let fg = |row| Rgb::from_vt100(screen.cell(row, 0).unwrap().fgcolor(), Rgb::default());
        assert_eq!(fg(0), palette.success.fg);
        assert_eq!(fg(1), palette.dim.fg);
        assert_eq!(fg(2), palette.output.fg);
    }

    #[test]
    fn test_scrolls_to_newest() {
        // One title row plus three body rows.
        let view = TerminalView::new(Rect::from_size(40, 4));
        let engine = engine_at(
            Transcript::new(vec![
                TranscriptLine::output("one", 0),
                TranscriptLine::output("two", 0),
                TranscriptLine::output("three", 0),
                TranscriptLine::output("four", 0),
                TranscriptLine::output("five", 0),
            ]),
            1000,
        );
        assert_eq!(rows(&view.snapshot(&engine)), ["four", "five", "▋"]);
    }

    #[test]
    fn test_render_draws_title_and_lines() {
        let view = TerminalView::new(Rect::from_size(40, 6));
        let engine = engine_at(Transcript::gatekey(), 1000);
        let mut out = OutputBuffer::new();
        view.render(&engine, &mut out);

        let text = String::from_utf8_lossy(out.as_bytes());
        assert!(text.contains("Terminal"));
        assert!(text.contains("●"));
        assert!(text.contains("gatekey"));
        assert!(text.ends_with("\x1b[0m"));
    }

    #[test]
    fn test_render_without_chrome() {
        let config = ViewConfig {
            chrome: false,
            ..ViewConfig::default()
        };
        let view = TerminalView::with_config(Rect::from_size(40, 3), config);
        assert_eq!(view.body(), Rect::from_size(40, 3));

        let engine = PlaybackEngine::new(Transcript::gatekey());
        let mut out = OutputBuffer::new();
        view.render(&engine, &mut out);
        assert!(!String::from_utf8_lossy(out.as_bytes()).contains("Terminal"));
    }

    #[test]
    fn test_redraw_flag() {
        let mut view = TerminalView::new(Rect::from_size(10, 4));
        assert!(view.needs_redraw());
        view.clear_redraw();
        view.set_bounds(Rect::from_size(10, 4));
        assert!(!view.needs_redraw());
        view.set_bounds(Rect::from_size(20, 4));
        assert!(view.needs_redraw());
    }

    #[test]
    fn test_truncate_to_width() {
        assert_eq!(truncate_to_width("Terminal", 4), "Term");
        assert_eq!(truncate_to_width("日本語", 5), "日本");
        assert_eq!(truncate_to_width("abc", 10), "abc");
    }
}
