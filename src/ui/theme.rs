//! Colours of the full-screen chat view.

use ratatui::style::{Color, Modifier, Style};

use crate::app::EntryKind;

pub const SENDER: Color = Color::Rgb(0xDC, 0x9D, 0x0A);
pub const SECONDARY: Color = Color::Rgb(0x43, 0xF5, 0x5E);
pub const DANGER: Color = Color::Rgb(0xEF, 0x44, 0x44);

/// Style of the label part of a transcript line.
pub fn label_style(kind: EntryKind) -> Style {
    match kind {
        EntryKind::User | EntryKind::Original | EntryKind::Correction => {
            Style::default().fg(SENDER).add_modifier(Modifier::BOLD)
        }
        EntryKind::Bot => Style::default().fg(SECONDARY).add_modifier(Modifier::BOLD),
        EntryKind::GrammarIssue | EntryKind::GrammarOk | EntryKind::Explanation => {
            body_style(kind)
        }
    }
}

/// Style of the text after the label.
pub fn body_style(kind: EntryKind) -> Style {
    match kind {
        EntryKind::GrammarIssue => Style::default().fg(DANGER).add_modifier(Modifier::BOLD),
        EntryKind::GrammarOk | EntryKind::Explanation => Style::default().fg(SECONDARY),
        EntryKind::User | EntryKind::Bot | EntryKind::Original | EntryKind::Correction => {
            Style::default()
        }
    }
}

pub fn notice_style() -> Style {
    Style::default().fg(DANGER)
}

pub fn hint_style() -> Style {
    Style::default()
        .fg(Color::DarkGray)
        .add_modifier(Modifier::ITALIC)
}
