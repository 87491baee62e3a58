//! Panel state and the single-flight request dispatcher.
//!
//! A send is split in two so a UI can hold the state across the network
//! await: [`ChatSession::begin_send`] runs synchronously on the UI thread and
//! hands back a [`PendingSend`], and [`ChatSession::finish`] applies whatever
//! the backend produced. [`ChatSession::send`] chains both for callers that
//! can keep `&mut self` across the await.

use crate::ai::{ChatBackend, ChatError, ChatResult};
use crate::config::{ChatConfig, ConfigError};
use crate::conversation::Conversation;
use crate::types::{Annotations, ChatMessage, ChatReply, ChatRequest};
use reqwest::Url;

pub const APOLOGY: &str = "죄송합니다. 일시적인 오류가 발생했습니다. 잠시 후 다시 시도해 주세요.";

/// The fixed bot reply used for every failed exchange.
pub fn apology_message() -> ChatMessage {
    ChatMessage::bot(
        APOLOGY,
        Annotations {
            selected_mode: Some("error".to_string()),
            ..Annotations::default()
        },
    )
}

#[derive(Clone, Debug, PartialEq)]
struct Endpoints {
    basic: Url,
    advanced: Url,
}

/// A request that has been committed to the conversation but not yet answered.
#[derive(Clone, Debug)]
pub struct PendingSend {
    endpoint: Url,
    history: Vec<ChatMessage>,
    generation: u64,
}

impl PendingSend {
    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    /// Transport body: the full history reduced to `{role, content}`.
    pub fn request(&self) -> ChatRequest<'_> {
        ChatRequest {
            messages: self.history.iter().map(ChatMessage::to_wire).collect(),
        }
    }

    /// Runs the one network call for this send.
    pub async fn dispatch<B: ChatBackend + ?Sized>(&self, backend: &B) -> ChatResult<ChatReply> {
        backend.complete(&self.endpoint, &self.request()).await
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SendOutcome {
    Replied,
    Failed,
    /// The conversation was reset while the request was in flight.
    Discarded,
}

#[derive(Clone, Debug, PartialEq)]
pub struct ChatSession {
    conversation: Conversation,
    input: String,
    busy: bool,
    show_details: bool,
    endpoints: Endpoints,
}

impl ChatSession {
    pub fn new(config: &ChatConfig) -> Result<Self, ConfigError> {
        Ok(Self {
            conversation: Conversation::new(),
            input: String::new(),
            busy: false,
            show_details: false,
            endpoints: Endpoints {
                basic: config.endpoint(false)?,
                advanced: config.endpoint(true)?,
            },
        })
    }

    pub fn conversation(&self) -> &Conversation {
        &self.conversation
    }

    pub fn messages(&self) -> &[ChatMessage] {
        self.conversation.messages()
    }

    pub fn input(&self) -> &str {
        &self.input
    }

    pub fn set_input(&mut self, text: impl Into<String>) {
        self.input = text.into();
    }

    pub fn is_busy(&self) -> bool {
        self.busy
    }

    pub fn show_details(&self) -> bool {
        self.show_details
    }

    pub fn set_show_details(&mut self, on: bool) {
        self.show_details = on;
    }

    pub fn toggle_details(&mut self) {
        self.show_details = !self.show_details;
    }

    /// True when a send would be accepted right now.
    pub fn can_send(&self) -> bool {
        !self.busy && !self.input.trim().is_empty()
    }

    /// "New conversation": back to the seed greeting.
    pub fn reset(&mut self) {
        self.conversation.reset();
    }

    /// Commits the typed input as a user message and marks the session busy.
    ///
    /// Returns `None` without touching any state when busy or when the input
    /// is blank.
    pub fn begin_send(&mut self) -> Option<PendingSend> {
        if !self.can_send() {
            return None;
        }
        let text = std::mem::take(&mut self.input);
        self.conversation.append(ChatMessage::user(text));
        self.busy = true;

        let endpoint = if self.show_details {
            self.endpoints.advanced.clone()
        } else {
            self.endpoints.basic.clone()
        };
        tracing::debug!(
            %endpoint,
            history = self.conversation.len(),
            "dispatching chat request"
        );
        Some(PendingSend {
            endpoint,
            history: self.conversation.messages().to_vec(),
            generation: self.conversation.generation(),
        })
    }

    /// Settles a pending send. Always clears the busy flag.
    pub fn finish(&mut self, pending: PendingSend, outcome: ChatResult<ChatReply>) -> SendOutcome {
        self.busy = false;

        if pending.generation != self.conversation.generation() {
            tracing::debug!("dropping reply for a conversation that was reset");
            return SendOutcome::Discarded;
        }

        match outcome {
            Ok(reply) => {
                self.conversation.append(reply.into_message());
                SendOutcome::Replied
            }
            Err(err) => {
                log_failure(&err);
                self.conversation.append(apology_message());
                SendOutcome::Failed
            }
        }
    }

    /// One full exchange against `backend`. `None` when the send was refused.
    pub async fn send<B: ChatBackend + ?Sized>(&mut self, backend: &B) -> Option<SendOutcome> {
        let pending = self.begin_send()?;
        let outcome = pending.dispatch(backend).await;
        Some(self.finish(pending, outcome))
    }
}

fn log_failure(err: &ChatError) {
    match err {
        ChatError::Status { status, .. } => {
            tracing::warn!(%status, error = %err, "chat reply unavailable")
        }
        _ => tracing::warn!(error = %err, "chat reply unavailable"),
    }
}
