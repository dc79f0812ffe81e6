use crate::bot::knowledge::WELCOME;
use crate::bot::{BotResult, Responder};
use crate::types::{Feedback, Message, Sender};
use time::OffsetDateTime;

pub const ERROR_REPLY: &str = "I'm sorry, I encountered an error. Please try again.";

/// The in-memory chat thread.
///
/// Messages are only ever appended; the one mutation allowed afterwards is
/// attaching feedback to a bot message. A turn runs `submit` → reply →
/// `complete`, and a second turn cannot start while one is pending, so every
/// reply lands directly after the message it answers.
#[derive(Clone, Debug, PartialEq)]
pub struct Conversation {
    messages: Vec<Message>,
    next_id: u64,
    // id of the user message still waiting for its reply
    pending: Option<u64>,
    // bumped on reset so turns from an earlier thread are rejected
    session: u64,
}

/// A started turn. Hand it back to [`Conversation::complete`] with the reply.
#[derive(Clone, Debug, PartialEq)]
pub struct Turn {
    pub message: Message,
    session: u64,
}

impl Turn {
    pub fn text(&self) -> &str {
        &self.message.text
    }
}

impl Default for Conversation {
    fn default() -> Self {
        Self::new()
    }
}

impl Conversation {
    pub fn new() -> Self {
        Self::with_session(0)
    }

    fn with_session(session: u64) -> Self {
        let mut conversation = Self {
            messages: Vec::new(),
            next_id: 1,
            pending: None,
            session,
        };
        conversation.push(Sender::Bot, WELCOME.to_string());
        conversation
    }

    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    pub fn is_typing(&self) -> bool {
        self.pending.is_some()
    }

    /// Starts a turn. Returns `None` without touching the thread when the
    /// text is blank or a reply is still pending.
    pub fn submit(&mut self, text: &str) -> Option<Turn> {
        if text.trim().is_empty() || self.is_typing() {
            return None;
        }
        let message = self.push(Sender::User, text.to_string()).clone();
        self.pending = Some(message.id);
        Some(Turn {
            message,
            session: self.session,
        })
    }

    /// Finishes `turn`. Errors become the generic apology and the typing flag
    /// is cleared either way. A turn that is not the pending one (already
    /// completed, or started before a reset) is dropped and returns `None`.
    pub fn complete(&mut self, turn: &Turn, reply: BotResult<String>) -> Option<&Message> {
        if turn.session != self.session || self.pending != Some(turn.message.id) {
            tracing::debug!(turn = turn.message.id, "dropping reply for a stale turn");
            return None;
        }
        self.pending = None;
        let text = reply.unwrap_or_else(|err| {
            tracing::error!("reply failed: {}", err);
            ERROR_REPLY.to_string()
        });
        Some(self.push(Sender::Bot, text))
    }

    /// Runs a whole turn against `responder`.
    pub async fn send(&mut self, responder: &Responder, text: &str) -> Option<&Message> {
        let turn = self.submit(text)?;
        let reply = responder.respond(turn.text()).await;
        self.complete(&turn, reply)
    }

    /// Sets or overwrites feedback on a bot message. Returns `false` when no
    /// bot message has that id.
    pub fn set_feedback(&mut self, id: u64, feedback: Feedback) -> bool {
        match self
            .messages
            .iter_mut()
            .find(|message| message.id == id && message.is_bot())
        {
            Some(message) => {
                message.feedback = Some(feedback);
                true
            }
            None => false,
        }
    }

    /// Drops the thread and starts over from the welcome message. Replies to
    /// turns started before the reset are ignored.
    pub fn reset(&mut self) {
        *self = Self::with_session(self.session + 1);
    }

    fn push(&mut self, sender: Sender, text: String) -> &Message {
        let id = self.next_id;
        self.next_id += 1;
        self.messages.push(Message {
            id,
            text,
            sender,
            timestamp: OffsetDateTime::now_utc(),
            feedback: None,
        });
        &self.messages[self.messages.len() - 1]
    }
}
