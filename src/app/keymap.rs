use ratatui::crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

/// Hint line shown under the input box: (keys, description)
pub const KEY_HINTS: &[(&str, &str)] = &[
    ("enter", "send"),
    ("ctrl+s", "translate"),
    ("ctrl+e", "translate back"),
    ("ctrl+g", "grammar"),
    ("i", "input"),
    ("esc", "quit"),
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TranslateTarget {
    Primary,
    Secondary,
}

/// What a key press means to the session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    Quit,
    Submit,
    Translate(TranslateTarget),
    GrammarCheck,
    ShowInput,
    ScrollUp,
    ScrollDown,
    Edit(KeyEvent),
    Ignore,
}

/// Maps a key to an action. `i` only reveals the input box while it is
/// collapsed; once visible it types like any other character.
pub fn action_for(key: KeyEvent, input_visible: bool) -> Action {
    if key.kind == KeyEventKind::Release {
        return Action::Ignore;
    }

    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
    match key.code {
        KeyCode::Esc => Action::Quit,
        KeyCode::Char('c') if ctrl => Action::Quit,
        KeyCode::Char('s') if ctrl => Action::Translate(TranslateTarget::Primary),
        KeyCode::Char('e') if ctrl => Action::Translate(TranslateTarget::Secondary),
        KeyCode::Char('g') if ctrl => Action::GrammarCheck,
        // Alt+Enter inserts a newline into the draft
        KeyCode::Enter if key.modifiers.contains(KeyModifiers::ALT) => Action::Edit(key),
        KeyCode::Enter => Action::Submit,
        KeyCode::PageUp => Action::ScrollUp,
        KeyCode::PageDown => Action::ScrollDown,
        KeyCode::Char('i') if !input_visible && key.modifiers.is_empty() => Action::ShowInput,
        _ => Action::Edit(key),
    }
}
