use anyhow::Result;
use ratatui::Terminal;
use ratatui::backend::Backend;
use ratatui::crossterm::event::{self, Event};
use std::sync::Arc;
use std::thread;
use std::time::Duration;
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};
use tokio::time::{Interval, MissedTickBehavior};
use tracing::{debug, info, warn};

use super::ui;
use crate::app::{AppEvent, Command, Controller, SessionConfig};
use crate::clipboard::Clipboard;
use crate::dispatch::Dispatcher;
use crate::provider::Provider;
use crate::ui::spinner::TICK_INTERVAL;
use crate::ui::{render, terminal};

const POLL_INTERVAL: Duration = Duration::from_millis(100);

/// A full-screen chat session bound to one provider.
pub struct ChatSession {
    config: SessionConfig,
    provider: Arc<dyn Provider>,
    clipboard: Arc<dyn Clipboard>,
}

impl ChatSession {
    pub fn new(
        config: SessionConfig,
        provider: Arc<dyn Provider>,
        clipboard: Arc<dyn Clipboard>,
    ) -> Self {
        Self {
            config,
            provider,
            clipboard,
        }
    }

    /// Runs until the user quits. The terminal is restored on every exit
    /// path, including errors from the loop.
    pub async fn run(self) -> Result<()> {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let mut controller = Controller::new(self.config, Arc::clone(&self.clipboard));
        let dispatcher = Dispatcher::new(self.provider, self.clipboard, tx.clone());

        let mut terminal = terminal::setup_terminal()?;
        spawn_input_reader(tx);

        let result = event_loop(&mut terminal, &mut controller, &dispatcher, &mut rx).await;
        let restored = terminal::restore_terminal(&mut terminal);
        // Closing the channel stops the input reader; late results are discarded.
        rx.close();

        info!(
            dropped_events = controller.session().dropped_events(),
            "Session ended"
        );
        result?;
        restored?;

        ui::print_goodbye();
        Ok(())
    }
}

/// Feeds events to the controller one at a time and redraws after each.
async fn event_loop<B: Backend>(
    terminal: &mut Terminal<B>,
    controller: &mut Controller,
    dispatcher: &Dispatcher,
    events: &mut UnboundedReceiver<AppEvent>,
) -> Result<()> {
    let mut ticker = None;
    if !run_commands(controller.init(), dispatcher, &mut ticker) {
        return Ok(());
    }

    let size = terminal.size()?;
    controller.handle(AppEvent::Resize {
        width: size.width,
        height: size.height,
    });
    terminal.draw(|frame| render(frame, controller.session()))?;

    loop {
        let event = tokio::select! {
            event = events.recv() => match event {
                Some(event) => event,
                None => break,
            },
            () = next_tick(&mut ticker) => AppEvent::Tick,
        };

        let redraw = !matches!(event, AppEvent::Tick) || controller.session().is_awaiting();
        let commands = controller.handle(event);
        if !run_commands(commands, dispatcher, &mut ticker) {
            break;
        }
        if redraw {
            terminal.draw(|frame| render(frame, controller.session()))?;
        }
    }

    Ok(())
}

/// Performs controller commands. Returns `false` once the session should end.
fn run_commands(
    commands: Vec<Command>,
    dispatcher: &Dispatcher,
    ticker: &mut Option<Interval>,
) -> bool {
    for command in commands {
        match command {
            Command::Dispatch(request) => {
                // Detached: the result comes back through the event channel
                dispatcher.dispatch(request);
            }
            Command::StartTicker => {
                let mut interval = tokio::time::interval(TICK_INTERVAL);
                interval.set_missed_tick_behavior(MissedTickBehavior::Skip);
                *ticker = Some(interval);
            }
            Command::Quit => return false,
        }
    }
    true
}

async fn next_tick(ticker: &mut Option<Interval>) {
    match ticker {
        Some(interval) => {
            interval.tick().await;
        }
        None => std::future::pending().await,
    }
}

/// Reads terminal events on a dedicated thread; crossterm's reads block.
fn spawn_input_reader(events: UnboundedSender<AppEvent>) {
    thread::spawn(move || {
        while !events.is_closed() {
            match event::poll(POLL_INTERVAL) {
                Ok(false) => {}
                Ok(true) => match event::read() {
                    Ok(event) => {
                        if let Some(event) = to_app_event(event)
                            && events.send(event).is_err()
                        {
                            break;
                        }
                    }
                    Err(e) => {
                        warn!("Failed to read terminal event: {e}");
                        break;
                    }
                },
                Err(e) => {
                    warn!("Failed to poll terminal events: {e}");
                    break;
                }
            }
        }
        debug!("Input reader stopped");
    });
}

fn to_app_event(event: Event) -> Option<AppEvent> {
    match event {
        Event::Key(key) => Some(AppEvent::Key(key)),
        Event::Paste(text) => Some(AppEvent::Paste(text)),
        Event::Resize(width, height) => Some(AppEvent::Resize { width, height }),
        _ => None,
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::clipboard::MemoryClipboard;
    use crate::provider::ProviderError;
    use async_trait::async_trait;
    use ratatui::backend::TestBackend;
    use ratatui::crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

    struct Echo;

    #[async_trait]
    impl Provider for Echo {
        async fn send_message(&self, prompt: &str) -> Result<String, ProviderError> {
            Ok(format!("echo: {prompt}"))
        }
    }

    fn key(code: KeyCode) -> AppEvent {
        AppEvent::Key(KeyEvent::new(code, KeyModifiers::NONE))
    }

    #[tokio::test]
    async fn test_event_loop_runs_until_quit() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let clipboard: Arc<dyn Clipboard> = Arc::new(MemoryClipboard::default());
        let mut controller = Controller::new(SessionConfig::default(), Arc::clone(&clipboard));
        let dispatcher = Dispatcher::new(Arc::new(Echo), clipboard, tx.clone());
        let mut terminal = Terminal::new(TestBackend::new(60, 16)).unwrap();

        for c in "hey".chars() {
            tx.send(key(KeyCode::Char(c))).unwrap();
        }
        tx.send(key(KeyCode::Esc)).unwrap();

        event_loop(&mut terminal, &mut controller, &dispatcher, &mut rx)
            .await
            .unwrap();

        assert!(controller.session().is_ready());
        assert!(!controller.session().is_running());
        assert_eq!(controller.session().draft(), "hey");
    }

    #[test]
    fn test_to_app_event_skips_focus() {
        assert!(to_app_event(Event::FocusGained).is_none());
        assert!(matches!(
            to_app_event(Event::Resize(80, 24)),
            Some(AppEvent::Resize {
                width: 80,
                height: 24
            })
        ));
    }
}
