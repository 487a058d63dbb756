use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

use super::transcript::{Entry, EntryKind};

/// Rows below the transcript kept for the busy row, notice row, input box
/// and key hints.
pub const RESERVED_FOOTER: u16 = 6;

/// A single wrapped row of the transcript.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViewLine {
    pub kind: EntryKind,
    pub text: String,
    /// Byte length of the entry label at the start of `text` (0 if none).
    pub label_len: usize,
}

/// Scrollable window over the wrapped transcript.
///
/// `height` is fitted to the content and clipped to `max_height`; `offset`
/// is the index of the first visible wrapped row.
#[derive(Debug, Clone)]
pub struct Viewport {
    width: u16,
    max_height: u16,
    height: u16,
    offset: usize,
    content: Vec<Entry>,
    lines: Vec<ViewLine>,
}

impl Viewport {
    pub const fn new(width: u16, max_height: u16) -> Self {
        Self {
            width,
            max_height,
            height: 0,
            offset: 0,
            content: Vec::new(),
            lines: Vec::new(),
        }
    }

    /// Sizes the viewport to a terminal of `width` x `term_height`.
    pub fn for_terminal(width: u16, term_height: u16) -> Self {
        Self::new(width, term_height.saturating_sub(RESERVED_FOOTER))
    }

    /// Replaces the content with the full transcript and rewraps it.
    pub fn set_content(&mut self, entries: &[Entry]) {
        self.content = entries.to_vec();
        self.rewrap();
    }

    /// Applies new terminal geometry and refits the height, keeping the
    /// scroll position (clamped).
    pub fn resize(&mut self, width: u16, term_height: u16) {
        let max_height = term_height.saturating_sub(RESERVED_FOOTER);
        let width_changed = width != self.width;
        self.width = width;
        self.max_height = max_height;
        if width_changed {
            self.rewrap();
        }
        self.fit_to_content();
    }

    /// Grows or shrinks the height to the wrapped line count, up to the
    /// available space.
    pub fn fit_to_content(&mut self) {
        let total = u16::try_from(self.total_line_count()).unwrap_or(u16::MAX);
        self.height = total.min(self.max_height);
        self.offset = self.offset.min(self.max_offset());
    }

    pub fn goto_bottom(&mut self) {
        self.offset = self.max_offset();
    }

    pub fn scroll_up(&mut self, rows: usize) {
        self.offset = self.offset.saturating_sub(rows);
    }

    pub fn scroll_down(&mut self, rows: usize) {
        self.offset = (self.offset + rows).min(self.max_offset());
    }

    pub fn at_bottom(&self) -> bool {
        self.offset == self.max_offset()
    }

    pub fn total_line_count(&self) -> usize {
        self.lines.len()
    }

    pub const fn width(&self) -> u16 {
        self.width
    }

    pub const fn height(&self) -> u16 {
        self.height
    }

    pub const fn max_height(&self) -> u16 {
        self.max_height
    }

    pub const fn offset(&self) -> usize {
        self.offset
    }

    /// Rows currently inside the window.
    pub fn visible_lines(&self) -> &[ViewLine] {
        let start = self.offset.min(self.lines.len());
        let end = (start + usize::from(self.height)).min(self.lines.len());
        &self.lines[start..end]
    }

    fn max_offset(&self) -> usize {
        self.lines.len().saturating_sub(usize::from(self.height))
    }

    fn rewrap(&mut self) {
        let width = usize::from(self.width);
        self.lines = self
            .content
            .iter()
            .flat_map(|entry| wrap_entry(entry, width))
            .collect();
    }
}

fn wrap_entry(entry: &Entry, width: usize) -> Vec<ViewLine> {
    let text = expand_tabs(&entry.to_string());
    let mut rows = Vec::new();
    for line in text.lines() {
        rows.extend(wrap_line(line, width));
    }
    if rows.is_empty() {
        rows.push(String::new());
    }

    // measured after expansion so the split stays on a char boundary
    let mut label_left = expand_tabs(&entry.label).len();
    rows.into_iter()
        .map(|text| {
            let label_len = label_left.min(text.len());
            label_left -= label_len;
            ViewLine {
                kind: entry.kind,
                text,
                label_len,
            }
        })
        .collect()
}

fn expand_tabs(text: &str) -> String {
    text.replace('\t', "    ")
}

/// Breaks `line` into rows no wider than `width` display columns.
pub fn wrap_line(line: &str, width: usize) -> Vec<String> {
    if width == 0 || line.width() <= width {
        return vec![line.to_string()];
    }

    let mut rows = Vec::new();
    let mut current = String::new();
    let mut current_width = 0;
    for ch in line.chars() {
        let ch_width = ch.width().unwrap_or(0);
        if current_width + ch_width > width && !current.is_empty() {
            rows.push(std::mem::take(&mut current));
            current_width = 0;
        }
        current.push(ch);
        current_width += ch_width;
    }
    if !current.is_empty() {
        rows.push(current);
    }
    rows
}
