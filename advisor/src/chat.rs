//! Multi-turn chat over a stateless gateway.
//!
//! The gateway sees one prompt per turn: the system prompt followed by the
//! whole transcript so far.

use std::fmt;

use serde::Serialize;
use tracing::warn;

use crate::error::Result;
use crate::gateway::LlmGateway;

const TRANSCRIPT_HEADER: &str = "\n\n--- Conversation so far ---\n";
const CLOSING_INSTRUCTION: &str = "\nAssistant: Please respond to the user's latest message.";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Assistant,
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::User => f.write_str("User"),
            Self::Assistant => f.write_str("Assistant"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Turn {
    pub role: Role,
    pub content: String,
}

/// Ordered conversation history.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ChatTranscript {
    turns: Vec<Turn>,
}

impl ChatTranscript {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, role: Role, content: impl Into<String>) {
        self.turns.push(Turn {
            role,
            content: content.into(),
        });
    }

    pub fn turns(&self) -> &[Turn] {
        &self.turns
    }

    pub fn len(&self) -> usize {
        self.turns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.turns.is_empty()
    }

    /// Renders the full prompt for the next assistant turn.
    ///
    /// # Examples
    ///
    /// ```
    /// use monster_fighter_advisor::{ChatTranscript, Role};
    ///
    /// let mut transcript = ChatTranscript::new();
    /// transcript.push(Role::User, "Can it fly?");
    /// assert_eq!(
    ///     transcript.render_prompt("SYSTEM"),
    ///     "SYSTEM\n\n--- Conversation so far ---\nUser: Can it fly?\n\
    ///      \nAssistant: Please respond to the user's latest message."
    /// );
    /// ```
    pub fn render_prompt(&self, system_prompt: &str) -> String {
        let mut prompt = String::from(system_prompt);
        prompt.push_str(TRANSCRIPT_HEADER);
        for turn in &self.turns {
            prompt.push_str(&format!("{}: {}\n", turn.role, turn.content));
        }
        prompt.push_str(CLOSING_INSTRUCTION);
        prompt
    }
}

/// A chat bound to a system prompt and a gateway.
pub struct ChatSession<'g> {
    gateway: &'g dyn LlmGateway,
    system_prompt: String,
    transcript: ChatTranscript,
}

impl<'g> ChatSession<'g> {
    pub fn new(gateway: &'g dyn LlmGateway, system_prompt: String) -> Self {
        Self {
            gateway,
            system_prompt,
            transcript: ChatTranscript::new(),
        }
    }

    pub fn system_prompt(&self) -> &str {
        &self.system_prompt
    }

    pub fn transcript(&self) -> &ChatTranscript {
        &self.transcript
    }

    /// Sends a user message and returns the assistant's reply.
    ///
    /// The user turn is recorded even when the gateway fails; the assistant
    /// turn only on success.
    pub fn send(&mut self, message: &str) -> Result<String> {
        self.transcript.push(Role::User, message);
        let prompt = self.transcript.render_prompt(&self.system_prompt);
        match self.gateway.generate(&prompt) {
            Ok(reply) => {
                self.transcript.push(Role::Assistant, reply.clone());
                Ok(reply)
            }
            Err(err) => {
                warn!(error = %err, turns = self.transcript.len(), "Chat turn failed");
                Err(err)
            }
        }
    }
}
