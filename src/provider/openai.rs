use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use tokio::sync::Mutex;
use tracing::debug;

use super::{Provider, ProviderError};

#[derive(Debug, Serialize)]
struct ChatCompletionRequest<'a> {
    model: &'a str,
    messages: Vec<Message<'a>>,
    stream: bool,
}

#[derive(Debug, Serialize)]
struct Message<'a> {
    role: &'static str,
    content: Cow<'a, str>,
}

#[derive(Debug, Deserialize)]
struct CompletionResponse {
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ReplyMessage,
}

#[derive(Debug, Deserialize)]
struct ReplyMessage {
    content: Option<String>,
}

/// Most user/assistant exchanges replayed with a request; older ones are
/// forgotten first.
pub const MAX_HISTORY_EXCHANGES: usize = 20;

/// Client for OpenAI-compatible chat completion endpoints.
///
/// Keeps the recent conversation and replays it with every request, so the
/// model sees earlier turns the way a chat session would.
pub struct OpenAiProvider {
    client: Client,
    endpoint: String,
    model: String,
    api_key: Option<String>,
    system_prompt: Option<String>,
    history: Mutex<Vec<Message<'static>>>,
}

impl OpenAiProvider {
    pub fn new(endpoint: String, model: String, api_key: Option<String>) -> Self {
        Self {
            client: Client::new(),
            endpoint,
            model,
            api_key,
            system_prompt: None,
            history: Mutex::new(Vec::new()),
        }
    }

    #[must_use]
    pub fn with_system_prompt(mut self, system_prompt: Option<String>) -> Self {
        self.system_prompt = system_prompt;
        self
    }

    fn completions_url(&self) -> String {
        format!(
            "{}/v1/chat/completions",
            self.endpoint.trim_end_matches('/')
        )
    }

    fn build_messages<'a>(
        &'a self,
        history: &'a [Message<'static>],
        prompt: &'a str,
    ) -> Vec<Message<'a>> {
        let mut messages = Vec::with_capacity(history.len() + 2);
        if let Some(system) = &self.system_prompt {
            messages.push(Message {
                role: "system",
                content: Cow::Borrowed(system.as_str()),
            });
        }
        messages.extend(history.iter().map(|m| Message {
            role: m.role,
            content: Cow::Borrowed(m.content.as_ref()),
        }));
        messages.push(Message {
            role: "user",
            content: Cow::Borrowed(prompt),
        });
        messages
    }
}

#[async_trait]
impl Provider for OpenAiProvider {
    async fn send_message(&self, prompt: &str) -> Result<String, ProviderError> {
        let url = self.completions_url();

        // Held across the request so concurrent sends cannot interleave turns
        let mut history = self.history.lock().await;

        let chat_request = ChatCompletionRequest {
            model: &self.model,
            messages: self.build_messages(&history, prompt),
            stream: false,
        };

        let mut http_request = self.client.post(&url).json(&chat_request);

        if let Some(api_key) = &self.api_key {
            http_request = http_request.header("Authorization", format!("Bearer {api_key}"));
        }

        let response = http_request
            .send()
            .await
            .map_err(|e| ProviderError::Connect {
                url: url.clone(),
                message: e.to_string(),
            })?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response.text().await.unwrap_or_default();
            return Err(ProviderError::Status { status, body });
        }

        let body: CompletionResponse = response
            .json()
            .await
            .map_err(|e| ProviderError::Decode(e.to_string()))?;

        let reply = extract_reply(body)?;
        debug!(turns = history.len() / 2 + 1, "Provider exchange completed");

        record_exchange(&mut history, prompt, &reply);
        Ok(reply)
    }
}

/// Appends one exchange and drops the oldest ones past the cap.
fn record_exchange(history: &mut Vec<Message<'static>>, prompt: &str, reply: &str) {
    history.push(Message {
        role: "user",
        content: Cow::Owned(prompt.to_string()),
    });
    history.push(Message {
        role: "assistant",
        content: Cow::Owned(reply.to_string()),
    });

    let excess = history.len().saturating_sub(MAX_HISTORY_EXCHANGES * 2);
    history.drain(..excess);
}

fn extract_reply(body: CompletionResponse) -> Result<String, ProviderError> {
    let content: String = body
        .choices
        .into_iter()
        .filter_map(|c| c.message.content)
        .collect();

    if content.trim().is_empty() {
        Err(ProviderError::EmptyResponse)
    } else {
        Ok(content)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn parse(json: &str) -> Result<String, ProviderError> {
        extract_reply(serde_json::from_str(json).unwrap())
    }

    #[test]
    fn test_extract_reply_with_content() {
        let json = r#"{"choices":[{"message":{"role":"assistant","content":"hi there"}}]}"#;
        assert_eq!(parse(json).unwrap(), "hi there");
    }

    #[test]
    fn test_extract_reply_null_content() {
        let json = r#"{"choices":[{"message":{"role":"assistant","content":null}}]}"#;
        assert_eq!(parse(json), Err(ProviderError::EmptyResponse));
    }

    #[test]
    fn test_extract_reply_no_choices() {
        assert_eq!(parse(r#"{"choices":[]}"#), Err(ProviderError::EmptyResponse));
    }

    #[test]
    fn test_completions_url_trims_trailing_slash() {
        let provider = OpenAiProvider::new(
            "http://localhost:11434/".to_string(),
            "gemma3:12b".to_string(),
            None,
        );
        assert_eq!(
            provider.completions_url(),
            "http://localhost:11434/v1/chat/completions"
        );
    }

    #[test]
    fn test_build_messages_orders_system_history_prompt() {
        let provider = OpenAiProvider::new(String::new(), String::new(), None)
            .with_system_prompt(Some("be brief".to_string()));
        let history = vec![
            Message {
                role: "user",
                content: Cow::Owned("hello".to_string()),
            },
            Message {
                role: "assistant",
                content: Cow::Owned("hi".to_string()),
            },
        ];

        let messages = provider.build_messages(&history, "how are you?");
        let roles: Vec<_> = messages.iter().map(|m| m.role).collect();
        assert_eq!(roles, ["system", "user", "assistant", "user"]);
        assert_eq!(messages[3].content, "how are you?");
    }

    #[test]
    fn test_history_keeps_only_recent_exchanges() {
        let mut history = Vec::new();
        for i in 0..MAX_HISTORY_EXCHANGES + 3 {
            record_exchange(&mut history, &format!("q{i}"), &format!("a{i}"));
        }

        assert_eq!(history.len(), MAX_HISTORY_EXCHANGES * 2);
        assert_eq!(history[0].role, "user");
        assert_eq!(history[0].content, "q3");
        assert_eq!(
            history[history.len() - 1].content,
            format!("a{}", MAX_HISTORY_EXCHANGES + 2)
        );
    }
}
