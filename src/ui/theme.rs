use ratatui::style::{Color, Modifier, Style};

use crate::store::ThemeMode;

/// Colors for one theme mode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    pub bg: Color,
    pub text: Color,
    pub muted: Color,
    pub accent: Color,
    pub border: Color,
    pub value: Color,
    pub link: Color,
    pub success: Color,
    pub warning: Color,
    pub error: Color,
    pub selected_fg: Color,
    pub selected_bg: Color,
}

pub const LIGHT: Palette = Palette {
    bg: Color::White,
    text: Color::Black,
    muted: Color::DarkGray,
    accent: Color::Blue,
    border: Color::Gray,
    value: Color::Magenta,
    link: Color::Blue,
    success: Color::Green,
    warning: Color::Red,
    error: Color::Red,
    selected_fg: Color::White,
    selected_bg: Color::Blue,
};

pub const DARK: Palette = Palette {
    bg: Color::Black,
    text: Color::White,
    muted: Color::DarkGray,
    accent: Color::Cyan,
    border: Color::DarkGray,
    value: Color::Yellow,
    link: Color::Cyan,
    success: Color::Green,
    warning: Color::Yellow,
    error: Color::Red,
    selected_fg: Color::Black,
    selected_bg: Color::Cyan,
};

impl Palette {
    pub fn for_mode(mode: ThemeMode) -> &'static Palette {
        match mode {
            ThemeMode::Light => &LIGHT,
            ThemeMode::Dark => &DARK,
        }
    }

    pub fn base(&self) -> Style {
        Style::default().fg(self.text).bg(self.bg)
    }

    pub fn muted(&self) -> Style {
        Style::default().fg(self.muted)
    }

    pub fn border(&self, focused: bool) -> Style {
        Style::default().fg(if focused { self.accent } else { self.border })
    }

    pub fn selected(&self) -> Style {
        Style::default()
            .fg(self.selected_fg)
            .bg(self.selected_bg)
            .add_modifier(Modifier::BOLD)
    }
}
