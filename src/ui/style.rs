//! Colors and text styles.
//!
//! Sticks to the basic ANSI palette so the terminal theme decides the
//! actual shades.

use ratatui::style::{Color, Modifier, Style};

use crate::app::ToastLevel;

/// Section headings in the form and the help overlay.
pub fn heading() -> Style {
    Style::default()
        .fg(Color::Yellow)
        .add_modifier(Modifier::BOLD)
}

/// Hints and secondary text.
pub fn dim() -> Style {
    Style::default().fg(Color::Indexed(245))
}

/// The selected form field.
pub fn selected() -> Style {
    Style::default().add_modifier(Modifier::REVERSED)
}

/// A field whose value differs from the original template.
pub fn modified() -> Style {
    Style::default().fg(Color::Green)
}

/// A field edited since the last save.
pub fn unsaved() -> Style {
    Style::default()
        .fg(Color::Yellow)
        .add_modifier(Modifier::ITALIC)
}

/// URLs and the download link.
pub fn link() -> Style {
    Style::default().fg(Color::Cyan)
}

/// The active tab title.
pub fn active_tab() -> Style {
    Style::default()
        .fg(Color::Cyan)
        .add_modifier(Modifier::BOLD | Modifier::UNDERLINED)
}

pub fn status_bar() -> Style {
    Style::default().bg(Color::DarkGray).fg(Color::White)
}

/// Prefix and colors of a toast.
pub fn toast(level: ToastLevel) -> (&'static str, Style) {
    match level {
        ToastLevel::Info => ("[info]", Style::default().bg(Color::DarkGray).fg(Color::White)),
        ToastLevel::Warning => ("[warn]", Style::default().bg(Color::Yellow).fg(Color::Black)),
        ToastLevel::Error => ("[error]", Style::default().bg(Color::Red).fg(Color::White)),
    }
}
