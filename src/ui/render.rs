use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::Style;
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use super::{spinner, theme};
use crate::app::{KEY_HINTS, Session, ViewLine};

/// Rows of the input box, borders included.
pub const INPUT_HEIGHT: u16 = 3;

/// Draws the whole screen from session state. Has no side effects, so the
/// same state always produces the same frame.
pub fn render(frame: &mut Frame, session: &Session) {
    let area = frame.area();
    if !session.is_ready() {
        frame.render_widget(Paragraph::new("Initializing…"), area);
        return;
    }

    let input_height = if session.input_visible() {
        INPUT_HEIGHT
    } else {
        0
    };
    let [transcript, busy, notice, input, hints] = Layout::vertical([
        Constraint::Length(session.viewport().height()),
        Constraint::Length(1),
        Constraint::Length(1),
        Constraint::Length(input_height),
        Constraint::Length(1),
    ])
    .areas(area);

    render_transcript(frame, session, transcript);

    if session.is_awaiting() {
        let line = Line::from(vec![
            Span::styled(
                spinner::frame(session.spinner_phase()),
                Style::default().fg(theme::SECONDARY),
            ),
            Span::raw(format!(" waiting for {}...", session.config().bot_label)),
        ]);
        frame.render_widget(Paragraph::new(line), busy);
    }

    if let Some(err) = session.last_error() {
        frame.render_widget(
            Paragraph::new(Span::styled(err.to_string(), theme::notice_style())),
            notice,
        );
    }

    if session.input_visible() {
        frame.render_widget(session.input(), input);
    }

    frame.render_widget(Paragraph::new(hint_line()), hints);
}

fn render_transcript(frame: &mut Frame, session: &Session, area: Rect) {
    let lines: Vec<Line> = session
        .viewport()
        .visible_lines()
        .iter()
        .map(styled_line)
        .collect();
    frame.render_widget(Paragraph::new(lines), area);
}

fn styled_line(line: &ViewLine) -> Line<'_> {
    let (label, body) = line.text.split_at(line.label_len);
    let mut spans = Vec::with_capacity(2);
    if !label.is_empty() {
        spans.push(Span::styled(label, theme::label_style(line.kind)));
    }
    spans.push(Span::styled(body, theme::body_style(line.kind)));
    Line::from(spans)
}

fn hint_line() -> Line<'static> {
    let text = KEY_HINTS
        .iter()
        .map(|(keys, action)| format!("{keys} {action}"))
        .collect::<Vec<_>>()
        .join(" • ");
    Line::styled(text, theme::hint_style())
}
