//! Colors, text modifiers and the palette used to draw the demo terminal.

use crate::transcript::Emphasis;
use bitflags::bitflags;

/// True-color RGB representation.
#[derive(Clone, Copy, PartialEq, Eq, Default, Hash)]
pub struct Rgb {
    /// Red channel (0-255)
    pub r: u8,
    /// Green channel (0-255)
    pub g: u8,
    /// Blue channel (0-255)
    pub b: u8,
}

impl Rgb {
    /// Create a new RGB color.
    #[inline]
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Create from a 24-bit hex color (e.g., 0xFF5500).
    #[inline]
    pub const fn from_u32(hex: u32) -> Self {
        Self::new(
            ((hex >> 16) & 0xFF) as u8,
            ((hex >> 8) & 0xFF) as u8,
            (hex & 0xFF) as u8,
        )
    }

    /// Map a vt100 cell color onto RGB, using `default` for the
    /// terminal's default color.
    pub fn from_vt100(color: vt100::Color, default: Self) -> Self {
        match color {
            vt100::Color::Default => default,
            vt100::Color::Idx(i) => ansi_to_rgb(i),
            vt100::Color::Rgb(r, g, b) => Self::new(r, g, b),
        }
    }
}

impl std::fmt::Debug for Rgb {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

bitflags! {
    /// Text style modifiers the view can round-trip through vt100.
    #[derive(Clone, Copy, PartialEq, Eq, Hash, Default, Debug)]
    pub struct Modifiers: u8 {
        /// Bold text
        const BOLD = 0b0000_0001;
        /// Italic text
        const ITALIC = 0b0000_0010;
        /// Underlined text
        const UNDERLINE = 0b0000_0100;
    }
}

impl Modifiers {
    /// Modifiers active on a vt100 cell.
    pub fn of_cell(cell: &vt100::Cell) -> Self {
        let mut mods = Self::empty();
        mods.set(Self::BOLD, cell.bold());
        mods.set(Self::ITALIC, cell.italic());
        mods.set(Self::UNDERLINE, cell.underline());
        mods
    }
}

/// Foreground color plus modifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Style {
    /// Foreground color.
    pub fg: Rgb,
    /// Text modifiers.
    pub modifiers: Modifiers,
}

impl Style {
    /// Plain style in the given color.
    pub const fn fg(fg: Rgb) -> Self {
        Self {
            fg,
            modifiers: Modifiers::empty(),
        }
    }

    /// Same style, bold.
    #[must_use]
    pub fn bold(mut self) -> Self {
        self.modifiers |= Modifiers::BOLD;
        self
    }
}

/// Colors of the demo terminal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Palette {
    /// Terminal background.
    pub background: Rgb,
    /// Prompt user name.
    pub prompt_user: Style,
    /// The ` ~ ` between user and arrow.
    pub prompt_path: Style,
    /// The `➜` arrow.
    pub prompt_arrow: Style,
    /// Typed command text.
    pub command: Style,
    /// Plain program output.
    pub output: Style,
    /// Output with [`Emphasis::Success`].
    pub success: Style,
    /// Output with [`Emphasis::Dim`].
    pub dim: Style,
    /// Blinking cursor block.
    pub cursor: Style,
    /// Title bar background.
    pub title_bar: Rgb,
    /// Title text.
    pub title: Style,
    /// Window buttons, left to right.
    pub buttons: [Rgb; 3],
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            background: Rgb::from_u32(0x0d_11_17),
            prompt_user: Style::fg(Rgb::from_u32(0x4a_de_80)).bold(),
            prompt_path: Style::fg(Rgb::from_u32(0x8b_94_9e)),
            prompt_arrow: Style::fg(Rgb::from_u32(0x22_d3_ee)),
            command: Style::fg(Rgb::from_u32(0xf0_f6_fc)).bold(),
            output: Style::fg(Rgb::from_u32(0xc9_d1_d9)),
            success: Style::fg(Rgb::from_u32(0x4a_de_80)),
            dim: Style::fg(Rgb::from_u32(0x6e_76_81)),
            cursor: Style::fg(Rgb::from_u32(0xc9_d1_d9)),
            title_bar: Rgb::from_u32(0x21_26_2d),
            title: Style::fg(Rgb::from_u32(0x8b_94_9e)),
            buttons: [
                Rgb::from_u32(0xff_5f_56),
                Rgb::from_u32(0xff_bd_2e),
                Rgb::from_u32(0x27_c9_3f),
            ],
        }
    }
}

impl Palette {
    /// Style for an output line with the given emphasis.
    pub const fn output_style(&self, emphasis: Emphasis) -> Style {
        match emphasis {
            Emphasis::None => self.output,
            Emphasis::Success => self.success,
            Emphasis::Dim => self.dim,
        }
    }
}

/// Convert ANSI color index to RGB.
fn ansi_to_rgb(idx: u8) -> Rgb {
    match idx {
        0 => Rgb::new(0, 0, 0),
        1 => Rgb::new(205, 49, 49),
        2 => Rgb::new(13, 188, 121),
        3 => Rgb::new(229, 229, 16),
        4 => Rgb::new(36, 114, 200),
        5 => Rgb::new(188, 63, 188),
        6 => Rgb::new(17, 168, 205),
        7 => Rgb::new(229, 229, 229),
        8 => Rgb::new(102, 102, 102),
        9 => Rgb::new(241, 76, 76),
        10 => Rgb::new(35, 209, 139),
        11 => Rgb::new(245, 245, 67),
        12 => Rgb::new(59, 142, 234),
        13 => Rgb::new(214, 112, 214),
        14 => Rgb::new(41, 184, 219),
        15 => Rgb::new(255, 255, 255),
        16..=231 => {
            let i = idx - 16;
            let level = |v: u8| if v == 0 { 0 } else { v * 40 + 55 };
            Rgb::new(level((i / 36) % 6), level((i / 6) % 6), level(i % 6))
        }
        232..=255 => {
            let v = (idx - 232) * 10 + 8;
            Rgb::new(v, v, v)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_u32() {
        assert_eq!(Rgb::from_u32(0xFF5500), Rgb::new(255, 85, 0));
        assert_eq!(format!("{:?}", Rgb::new(1, 2, 255)), "#0102ff");
    }

    #[test]
    fn test_ansi_cube_and_gray() {
        assert_eq!(ansi_to_rgb(16), Rgb::new(0, 0, 0));
        assert_eq!(ansi_to_rgb(231), Rgb::new(255, 255, 255));
        assert_eq!(ansi_to_rgb(232), Rgb::new(8, 8, 8));
        assert_eq!(
            Rgb::from_vt100(vt100::Color::Default, Rgb::new(9, 9, 9)),
            Rgb::new(9, 9, 9)
        );
    }

    #[test]
    fn test_emphasis_styles() {
        let p = Palette::default();
        assert_eq!(p.output_style(Emphasis::Success), p.success);
        assert_eq!(p.output_style(Emphasis::Dim), p.dim);
        assert_eq!(p.output_style(Emphasis::None), p.output);
        assert!(p.prompt_user.modifiers.contains(Modifiers::BOLD));
    }
}
