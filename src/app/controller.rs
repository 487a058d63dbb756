use ratatui::crossterm::event::KeyEvent;
use std::sync::Arc;
use tracing::{debug, info, warn};

use super::event::{AppEvent, Command, Deadline, Generation, PendingRequest, RequestKind};
use super::keymap::{Action, TranslateTarget, action_for};
use super::state::{INPUT_CHAR_LIMIT, Mode, Session, SessionConfig, new_input};
use super::transcript::{Entry, EntryKind};
use super::viewport::Viewport;
use crate::clipboard::Clipboard;
use crate::error::SessionError;
use crate::grammar::GrammarReport;
use crate::prompt::{grammar_check_prompt, translate_instruction};

/// The session state machine.
///
/// Every input (keys, resizes, ticks, provider results) goes through
/// [`Controller::handle`] one at a time; side effects are returned as
/// [`Command`]s for the runtime to perform.
pub struct Controller {
    session: Session,
    clipboard: Arc<dyn Clipboard>,
}

impl Controller {
    pub fn new(config: SessionConfig, clipboard: Arc<dyn Clipboard>) -> Self {
        Self {
            session: Session::new(config),
            clipboard,
        }
    }

    /// Commands to run before the first event.
    pub fn init(&self) -> Vec<Command> {
        info!(
            primary = %self.session.config.primary.code,
            secondary = %self.session.config.secondary.code,
            clipboard = self.clipboard.is_available(),
            "Session started"
        );
        vec![Command::StartTicker]
    }

    pub const fn session(&self) -> &Session {
        &self.session
    }

    pub fn handle(&mut self, event: AppEvent) -> Vec<Command> {
        if !self.session.running {
            self.session.dropped_events += 1;
            debug!(?event, "Event after quit dropped");
            return Vec::new();
        }

        match event {
            AppEvent::Key(key) => self.handle_key(key),
            AppEvent::Paste(text) => {
                let room = INPUT_CHAR_LIMIT.saturating_sub(self.session.draft().chars().count());
                let text: String = text.chars().take(room).collect();
                self.edit(|input| {
                    input.insert_str(&text);
                });
                Vec::new()
            }
            AppEvent::Resize { width, height } => {
                self.resize(width, height);
                Vec::new()
            }
            AppEvent::Tick => {
                if self.session.is_awaiting() {
                    self.session.spinner_phase = self.session.spinner_phase.wrapping_add(1);
                }
                Vec::new()
            }
            AppEvent::ResponseReady { generation, text } => {
                if self.accept(generation).is_some() {
                    let label = self.session.config.bot_label.clone();
                    self.session.transcript.push(Entry::bot(&label, &text));
                    self.finish_request();
                }
                Vec::new()
            }
            AppEvent::GrammarReady { generation, report } => {
                if self.accept(generation).is_some() {
                    self.append_grammar_report(report);
                    self.finish_request();
                }
                Vec::new()
            }
            AppEvent::RequestFailed { generation, error } => {
                if let Some(kind) = self.accept(generation) {
                    warn!(generation, kind = kind.label(), "Request failed: {error}");
                    self.session.last_error = Some(error);
                    self.finish_request();
                }
                Vec::new()
            }
        }
    }

    fn handle_key(&mut self, key: KeyEvent) -> Vec<Command> {
        match action_for(key, self.session.input_visible) {
            Action::Quit => self.quit(),
            Action::Submit => self.submit(),
            Action::Translate(target) => self.translate(target),
            Action::GrammarCheck => self.grammar_check(),
            Action::ShowInput => {
                if self.session.mode == Mode::Composing {
                    self.session.input_visible = true;
                }
                Vec::new()
            }
            Action::ScrollUp => {
                let page = usize::from(self.session.viewport.height().max(1));
                self.session.viewport.scroll_up(page);
                Vec::new()
            }
            Action::ScrollDown => {
                let page = usize::from(self.session.viewport.height().max(1));
                self.session.viewport.scroll_down(page);
                Vec::new()
            }
            Action::Edit(key) => {
                self.edit(|input| {
                    input.input(tui_textarea::Input::from(key));
                });
                Vec::new()
            }
            Action::Ignore => Vec::new(),
        }
    }

    /// Applies an edit to the draft; typing also reveals a collapsed input.
    /// An edit that would push the draft past the character limit is undone.
    fn edit(&mut self, apply: impl FnOnce(&mut tui_textarea::TextArea<'static>)) {
        if self.session.mode != Mode::Composing {
            return;
        }
        self.session.input_visible = true;
        let before = self.session.input.clone();
        apply(&mut self.session.input);
        if self.session.draft().chars().count() > INPUT_CHAR_LIMIT {
            debug!("Edit past the input limit discarded");
            self.session.input = before;
        }
    }

    fn submit(&mut self) -> Vec<Command> {
        if self.reject_if_busy("submit") {
            return Vec::new();
        }

        let draft = self.session.draft();
        let prompt = draft.trim();
        if prompt.is_empty() {
            return Vec::new();
        }

        let label = self.session.config.user_label.clone();
        self.session.transcript.push(Entry::user(&label, prompt));
        self.refresh_viewport();

        let prompt = prompt.to_string();
        self.begin_request(RequestKind::Chat, prompt.clone(), prompt, None)
    }

    fn translate(&mut self, target: TranslateTarget) -> Vec<Command> {
        if self.reject_if_busy("translate") {
            return Vec::new();
        }

        let language = match target {
            TranslateTarget::Primary => self.session.config.primary.clone(),
            TranslateTarget::Secondary => self.session.config.secondary.clone(),
        };
        let Some(text) = self.source_text("translate") else {
            return Vec::new();
        };

        let prompt = format!("{}{text}", translate_instruction(&language.name));
        self.begin_request(
            RequestKind::Translate {
                language: language.code,
            },
            prompt,
            text,
            None,
        )
    }

    fn grammar_check(&mut self) -> Vec<Command> {
        if self.reject_if_busy("grammar check") {
            return Vec::new();
        }

        let Some(text) = self.source_text("check") else {
            return Vec::new();
        };

        let prompt = grammar_check_prompt(&text, &self.session.config.explanation.name);
        let deadline = Deadline::from_now(self.session.config.grammar_timeout);
        self.begin_request(RequestKind::GrammarCheck, prompt, text, Some(deadline))
    }

    /// Text a mode trigger works on: the draft, else a clipboard snapshot.
    /// Records a notice and returns `None` when both are empty.
    fn source_text(&mut self, verb: &str) -> Option<String> {
        let draft = self.session.draft();
        let draft = draft.trim();
        if !draft.is_empty() {
            return Some(draft.to_string());
        }

        if !self.clipboard.is_available() {
            self.session.last_error = Some(SessionError::ClipboardUnavailable);
            return None;
        }

        match self.clipboard.read() {
            Some(text) if !text.trim().is_empty() => Some(text.trim().to_string()),
            _ => {
                debug!("Mode trigger with empty draft and clipboard rejected");
                self.session.last_error = Some(SessionError::validation(format!(
                    "Nothing to {verb}: type some text or copy it to the clipboard"
                )));
                None
            }
        }
    }

    fn reject_if_busy(&self, what: &str) -> bool {
        if self.session.is_awaiting() {
            debug!(
                generation = self.session.generation,
                "{what} rejected while a request is outstanding"
            );
            return true;
        }
        false
    }

    fn begin_request(
        &mut self,
        kind: RequestKind,
        prompt: String,
        origin: String,
        deadline: Option<Deadline>,
    ) -> Vec<Command> {
        self.session.generation += 1;
        let generation = self.session.generation;
        info!(generation, kind = kind.label(), "Dispatching request");

        self.session.in_flight = Some((generation, kind.clone()));
        self.session.mode = Mode::Awaiting;
        self.session.input_visible = false;
        self.session.input = new_input();
        self.session.spinner_phase = 0;
        self.session.last_error = None;

        vec![Command::Dispatch(PendingRequest {
            generation,
            kind,
            prompt,
            origin,
            deadline,
        })]
    }

    /// Claims the in-flight request if `generation` is the one outstanding.
    fn accept(&mut self, generation: Generation) -> Option<RequestKind> {
        match self.session.in_flight.take() {
            Some((current, kind)) if current == generation => Some(kind),
            other => {
                self.session.in_flight = other;
                self.session.dropped_events += 1;
                debug!(generation, "Stale result dropped");
                None
            }
        }
    }

    fn append_grammar_report(&mut self, report: GrammarReport) {
        let GrammarReport {
            origin,
            verdict,
            parse_error,
        } = report;

        let transcript = &mut self.session.transcript;
        if verdict.correct {
            transcript.push(Entry::new(EntryKind::GrammarOk, "", "No grammar issues!"));
            transcript.push(Entry::new(EntryKind::Original, "Original: ", origin));
        } else {
            transcript.push(Entry::new(
                EntryKind::GrammarIssue,
                "",
                "Grammar issues found!",
            ));
            transcript.push(Entry::new(EntryKind::Original, "Original: ", origin));
            transcript.push(Entry::new(EntryKind::Explanation, "", verdict.explanation));
            transcript.push(Entry::new(EntryKind::Correction, "Fixed => ", verdict.fixed));
        }

        if let Some(err) = parse_error {
            warn!("Grammar result could not be parsed: {err}");
            self.session.last_error = Some(err.into());
        }
    }

    fn finish_request(&mut self) {
        self.session.mode = Mode::Composing;
        self.session.input_visible = false;
        self.refresh_viewport();
    }

    fn refresh_viewport(&mut self) {
        let viewport = &mut self.session.viewport;
        viewport.set_content(self.session.transcript.entries());
        viewport.fit_to_content();
        viewport.goto_bottom();
    }

    fn resize(&mut self, width: u16, height: u16) {
        self.session.terminal_size = (width, height);
        if self.session.ready {
            self.session.viewport.resize(width, height);
            return;
        }

        self.session.viewport = Viewport::for_terminal(width, height);
        self.refresh_viewport();
        self.session.ready = true;
    }

    fn quit(&mut self) -> Vec<Command> {
        info!(
            abandoned = self.session.in_flight.is_some(),
            "Session quit"
        );
        self.session.running = false;
        self.session.in_flight = None;
        vec![Command::Quit]
    }
}
