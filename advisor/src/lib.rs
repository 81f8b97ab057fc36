//! LLM-backed helpers: rules questions, spell and monster explanations,
//! story hooks, and a monster-grounded chat.
//!
//! Everything talks to the model through [`LlmGateway`], so callers can swap
//! [`GeminiGateway`] for a scripted implementation.

mod chat;
mod error;
mod gateway;
mod monster;
pub mod prompts;

use serde_json::Value;

pub use chat::{ChatSession, ChatTranscript, Role, Turn};
pub use error::{AdvisorError, Result};
pub use gateway::{GeminiGateway, LlmGateway};
pub use monster::{MonsterStats, build_system_prompt};

pub fn explain_rules(gateway: &dyn LlmGateway, question: &str) -> Result<String> {
    gateway.generate(&prompts::rules_prompt(question))
}

pub fn explain_spell(gateway: &dyn LlmGateway, spell: &Value) -> Result<String> {
    gateway.generate(&prompts::spell_prompt(spell))
}

pub fn explain_monster(gateway: &dyn LlmGateway, monster: &Value) -> Result<String> {
    gateway.generate(&prompts::monster_prompt(monster))
}

pub fn story_hook(gateway: &dyn LlmGateway, name: &str, race: &str, class: &str) -> Result<String> {
    gateway.generate(&prompts::story_prompt(name, race, class))
}
