use std::fmt;

/// What a transcript line is, which decides how it is styled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryKind {
    User,
    Bot,
    GrammarIssue,
    GrammarOk,
    Original,
    Explanation,
    Correction,
}

/// One rendered message line. The label (e.g. `"you: "`) is kept apart from
/// the body so the renderer can colour it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entry {
    pub kind: EntryKind,
    pub label: String,
    pub body: String,
}

impl Entry {
    pub fn new(kind: EntryKind, label: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            kind,
            label: label.into(),
            body: body.into(),
        }
    }

    pub fn user(label: &str, body: &str) -> Self {
        Self::new(EntryKind::User, format!("{label}: "), body)
    }

    pub fn bot(label: &str, body: &str) -> Self {
        Self::new(EntryKind::Bot, format!("{label}: "), body)
    }
}

impl fmt::Display for Entry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.label, self.body)
    }
}

/// Append-only record of the conversation. Entries are never edited,
/// reordered or removed once pushed.
#[derive(Debug, Clone, Default)]
pub struct Transcript {
    entries: Vec<Entry>,
}

impl Transcript {
    pub fn push(&mut self, entry: Entry) {
        self.entries.push(entry);
    }

    pub fn entries(&self) -> &[Entry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// The transcript as plain text lines, labels included.
    pub fn lines(&self) -> Vec<String> {
        self.entries.iter().map(ToString::to_string).collect()
    }
}
