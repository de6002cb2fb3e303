use chrono::{DateTime, Local};
use ratatui::style::Color;

use super::request::Variant;
use super::stack::{ExitToken, ToastId, ToastState};
use crate::modules::theme::Theme;

/// How assistive output should treat a toast.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Announcement {
    /// Passive status update.
    Status,
    /// Interrupts; reserved for errors.
    Alert,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Presentation {
    pub glyph: &'static str,
    pub label: &'static str,
    pub announcement: Announcement,
}

impl Variant {
    pub fn presentation(self) -> Presentation {
        match self {
            Variant::Info => Presentation {
                glyph: "ℹ",
                label: "Info",
                announcement: Announcement::Status,
            },
            Variant::Success => Presentation {
                glyph: "✔",
                label: "Success",
                announcement: Announcement::Status,
            },
            Variant::Warning => Presentation {
                glyph: "⚠",
                label: "Warning",
                announcement: Announcement::Status,
            },
            Variant::Error => Presentation {
                glyph: "✖",
                label: "Error",
                announcement: Announcement::Alert,
            },
        }
    }

    /// Accent colour; brighter shades on dark backgrounds.
    pub fn accent(self, theme: Theme) -> Color {
        match (self, theme) {
            (Variant::Success, Theme::Light) => Color::Rgb(5, 150, 105),
            (Variant::Success, Theme::Dark) => Color::Rgb(52, 211, 153),
            (Variant::Error, Theme::Light) => Color::Rgb(220, 38, 38),
            (Variant::Error, Theme::Dark) => Color::Rgb(248, 113, 113),
            (Variant::Warning, Theme::Light) => Color::Rgb(217, 119, 6),
            (Variant::Warning, Theme::Dark) => Color::Rgb(251, 191, 36),
            (Variant::Info, Theme::Light) => Color::Rgb(2, 132, 199),
            (Variant::Info, Theme::Dark) => Color::Rgb(56, 189, 248),
        }
    }
}

/// Read-only projection of an entry handed to the adapter.
#[derive(Debug, Clone, PartialEq)]
pub struct ToastView {
    pub id: ToastId,
    pub title: String,
    pub message: Option<String>,
    pub variant: Variant,
    pub state: ToastState,
    pub created_at: DateTime<Local>,
}

impl ToastView {
    pub fn announcement(&self) -> Announcement {
        self.variant.presentation().announcement
    }
}

/// Stacking position of a live entry. `index` 0 is the newest.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Slot {
    pub id: ToastId,
    pub index: usize,
    pub z: i32,
}

/// Renders toasts and reports when exit animations finish.
///
/// The adapter never mutates the stack. It must call [`ExitToken::complete`]
/// once the exit animation for that entry has run; a dropped token leaves the
/// entry dismissing forever.
pub trait PresentationAdapter {
    /// Insert a new entry or update an existing one.
    fn render(&mut self, view: &ToastView);

    /// Start the exit animation for `exit.id()`.
    fn begin_exit(&mut self, exit: ExitToken);

    /// Apply stacking positions. Reapplying the same slots must be a no-op.
    fn reposition(&mut self, slots: &[Slot]);
}
