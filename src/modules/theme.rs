use ratatui::style::Color;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    pub background: Color,
    pub surface: Color,
    pub foreground: Color,
    pub muted: Color,
    pub primary: Color,
}

impl Theme {
    pub fn toggled(self) -> Self {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Theme::Light => "light",
            Theme::Dark => "dark",
        }
    }

    /// Glyph for the toggle, showing the theme it switches to.
    pub fn toggle_glyph(self) -> &'static str {
        match self {
            Theme::Light => "☾",
            Theme::Dark => "☀",
        }
    }

    pub fn palette(self) -> Palette {
        match self {
            Theme::Light => Palette {
                background: Color::Rgb(250, 250, 250),
                surface: Color::Rgb(255, 255, 255),
                foreground: Color::Rgb(23, 23, 23),
                muted: Color::Rgb(82, 82, 82),
                primary: Color::Rgb(79, 70, 229),
            },
            Theme::Dark => Palette {
                background: Color::Rgb(10, 10, 10),
                surface: Color::Rgb(23, 23, 23),
                foreground: Color::Rgb(250, 250, 250),
                muted: Color::Rgb(163, 163, 163),
                primary: Color::Rgb(129, 140, 248),
            },
        }
    }
}

/// Reads the terminal's colour scheme from `COLORFGBG`, if it is set.
pub fn detect_terminal_scheme() -> Option<Theme> {
    std::env::var("COLORFGBG")
        .ok()
        .and_then(|value| scheme_from_colorfgbg(&value))
}

/// `COLORFGBG` is `fg;bg` (sometimes `fg;extra;bg`); only the background matters.
pub fn scheme_from_colorfgbg(value: &str) -> Option<Theme> {
    let bg: u8 = value.rsplit(';').next()?.trim().parse().ok()?;
    match bg {
        0..=6 | 8 => Some(Theme::Dark),
        7 | 9..=15 => Some(Theme::Light),
        _ => None,
    }
}

/// Current theme plus whether the user picked it explicitly.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ThemeState {
    current: Theme,
    stored: Option<Theme>,
}

impl ThemeState {
    /// A stored preference wins, then the terminal's scheme, then light.
    pub fn resolve(stored: Option<Theme>, system: Option<Theme>) -> Self {
        Self {
            current: stored.or(system).unwrap_or_default(),
            stored,
        }
    }

    pub fn current(&self) -> Theme {
        self.current
    }

    pub fn is_explicit(&self) -> bool {
        self.stored.is_some()
    }

    /// Flips the theme and records it as an explicit choice.
    pub fn toggle(&mut self) -> Theme {
        self.current = self.current.toggled();
        self.stored = Some(self.current);
        self.current
    }

    /// Follows the terminal only while no explicit choice exists.
    pub fn system_changed(&mut self, system: Option<Theme>) {
        if self.stored.is_none() {
            self.current = system.unwrap_or_default();
        }
    }
}
