//! Runs provider requests off the controller's path and reports back
//! through the event channel.

use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc::UnboundedSender;
use tokio::task::JoinHandle;
use tokio::time::timeout_at;
use tracing::{debug, info};

use crate::app::{AppEvent, Deadline, PendingRequest, RequestKind};
use crate::clipboard::Clipboard;
use crate::error::SessionError;
use crate::grammar::{GrammarParseError, GrammarReport, parse_verdict};
use crate::provider::{Provider, ProviderError};

/// Upper bound on a grammar check, provider call and parse together.
pub const GRAMMAR_CHECK_TIMEOUT: Duration = Duration::from_secs(10);

/// Issues one task per request. Every task ends with exactly one event.
#[derive(Clone)]
pub struct Dispatcher {
    provider: Arc<dyn Provider>,
    clipboard: Arc<dyn Clipboard>,
    events: UnboundedSender<AppEvent>,
}

impl Dispatcher {
    pub fn new(
        provider: Arc<dyn Provider>,
        clipboard: Arc<dyn Clipboard>,
        events: UnboundedSender<AppEvent>,
    ) -> Self {
        Self {
            provider,
            clipboard,
            events,
        }
    }

    pub fn dispatch(&self, request: PendingRequest) -> JoinHandle<()> {
        let dispatcher = self.clone();
        tokio::spawn(async move {
            let generation = request.generation;
            let event = dispatcher.resolve(request).await;
            if dispatcher.events.send(event).is_err() {
                debug!(generation, "Session closed, result discarded");
            }
        })
    }

    /// Performs a request and turns its outcome into the event to deliver.
    pub async fn resolve(&self, request: PendingRequest) -> AppEvent {
        match request.kind {
            RequestKind::GrammarCheck => self.resolve_grammar_check(request).await,
            RequestKind::Translate { .. } => self.resolve_text(request, true).await,
            RequestKind::Chat => self.resolve_text(request, false).await,
        }
    }

    async fn resolve_text(&self, request: PendingRequest, copy_result: bool) -> AppEvent {
        let generation = request.generation;
        match self.provider.send_message(&request.prompt).await {
            Ok(text) => {
                if copy_result {
                    self.clipboard.write(&text);
                }
                AppEvent::ResponseReady { generation, text }
            }
            Err(e) => AppEvent::RequestFailed {
                generation,
                error: e.into(),
            },
        }
    }

    /// Races the provider call and the verdict parse against the deadline.
    async fn resolve_grammar_check(&self, request: PendingRequest) -> AppEvent {
        let PendingRequest {
            generation,
            prompt,
            origin,
            deadline,
            ..
        } = request;
        let deadline = deadline.unwrap_or_else(|| Deadline::from_now(GRAMMAR_CHECK_TIMEOUT));

        let provider = Arc::clone(&self.provider);
        let check = async move {
            let raw = provider.send_message(&prompt).await?;
            let parsed = tokio::spawn(async move { parse_verdict(&raw) })
                .await
                .unwrap_or_else(|e| Err(GrammarParseError::Json(e.to_string())));
            Ok::<_, ProviderError>(GrammarReport::from_parse(origin, parsed))
        };

        match timeout_at(deadline.at, check).await {
            Ok(Ok(report)) => {
                if let Some(fixed) = report.correction() {
                    self.clipboard.write(fixed);
                }
                AppEvent::GrammarReady { generation, report }
            }
            Ok(Err(e)) => AppEvent::RequestFailed {
                generation,
                error: e.into(),
            },
            Err(_) => {
                info!(generation, "Grammar check timed out");
                AppEvent::RequestFailed {
                    generation,
                    error: SessionError::Timeout(deadline.after),
                }
            }
        }
    }
}

impl std::fmt::Debug for Dispatcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Dispatcher")
            .field("clipboard", &self.clipboard.is_available())
            .field("closed", &self.events.is_closed())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::clipboard::MemoryClipboard;
    use async_trait::async_trait;
    use tokio::sync::mpsc;

    struct Echo;

    #[async_trait]
    impl Provider for Echo {
        async fn send_message(&self, prompt: &str) -> Result<String, ProviderError> {
            Ok(format!("echo: {prompt}"))
        }
    }

    struct Failing;

    #[async_trait]
    impl Provider for Failing {
        async fn send_message(&self, _prompt: &str) -> Result<String, ProviderError> {
            Err(ProviderError::Status {
                status: 500,
                body: "boom".to_string(),
            })
        }
    }

    fn request(kind: RequestKind) -> PendingRequest {
        PendingRequest {
            generation: 3,
            kind,
            prompt: "hello".to_string(),
            origin: "hello".to_string(),
            deadline: None,
        }
    }

    fn dispatcher(
        provider: Arc<dyn Provider>,
        clipboard: Arc<MemoryClipboard>,
    ) -> (Dispatcher, mpsc::UnboundedReceiver<AppEvent>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Dispatcher::new(provider, clipboard, tx), rx)
    }

    #[tokio::test]
    async fn test_chat_result_is_delivered_without_clipboard_write() {
        let clipboard = Arc::new(MemoryClipboard::default());
        let (dispatcher, mut rx) = dispatcher(Arc::new(Echo), Arc::clone(&clipboard));

        dispatcher.dispatch(request(RequestKind::Chat)).await.unwrap();
        match rx.recv().await.unwrap() {
            AppEvent::ResponseReady { generation, text } => {
                assert_eq!(generation, 3);
                assert_eq!(text, "echo: hello");
            }
            other => panic!("unexpected event: {other:?}"),
        }
        assert_eq!(clipboard.read(), None);
    }

    #[tokio::test]
    async fn test_translate_result_is_copied() {
        let clipboard = Arc::new(MemoryClipboard::default());
        let (dispatcher, _rx) = dispatcher(Arc::new(Echo), Arc::clone(&clipboard));

        let kind = RequestKind::Translate {
            language: "en".to_string(),
        };
        dispatcher.resolve(request(kind)).await;
        assert_eq!(clipboard.read().as_deref(), Some("echo: hello"));
    }

    #[tokio::test]
    async fn test_provider_failure_becomes_event() {
        let (dispatcher, _rx) = dispatcher(Arc::new(Failing), Arc::default());
        let event = dispatcher.resolve(request(RequestKind::Chat)).await;
        assert!(matches!(
            event,
            AppEvent::RequestFailed {
                generation: 3,
                error: SessionError::Provider(ProviderError::Status { status: 500, .. })
            }
        ));
    }

    #[tokio::test]
    async fn test_closed_channel_discards_result() {
        let (dispatcher, rx) = dispatcher(Arc::new(Echo), Arc::default());
        drop(rx);
        // must not panic
        dispatcher.dispatch(request(RequestKind::Chat)).await.unwrap();
    }

    #[tokio::test]
    async fn test_unparsable_grammar_reply_is_still_a_report() {
        let (dispatcher, _rx) = dispatcher(Arc::new(Echo), Arc::default());
        let event = dispatcher.resolve(request(RequestKind::GrammarCheck)).await;
        match event {
            AppEvent::GrammarReady { report, .. } => {
                assert_eq!(report.origin, "hello");
                assert_eq!(report.parse_error, Some(GrammarParseError::NoObject));
            }
            other => panic!("unexpected event: {other:?}"),
        }
    }
}
