//! Single-shot prompt templates.

use serde_json::Value;

/// Beginner-friendly rules explanation.
pub fn rules_prompt(question: &str) -> String {
    format!(
        "You are a friendly Dungeon Master assistant for Dungeons & Dragons 5th Edition.
Explain rules clearly for a beginner, but don't change the official 5e meaning.

User question:
{question}

Requirements:
- Answer in 1-3 short paragraphs.
- Use plain English (no super rule-lawyer jargon).
- If something is ambiguous in the rules, briefly say so.
"
    )
}

/// Player-facing explanation of a spell document.
pub fn spell_prompt(spell: &Value) -> String {
    format!(
        "You are a D&D 5e assistant helping a new player understand a spell.

Here is the raw spell data in JSON format:
{}

Tasks:
1. Start by naming the spell and its level + school (e.g., \"Fireball is a 3rd-level evocation spell\").
2. Explain what the spell does in 1-2 short paragraphs, in simple language.
3. Mention:
   - casting time
   - range
   - duration
   - key components (verbal, somatic, material) if they matter
4. If there is important tactical advice (e.g., good times to use it), include a brief tip.
",
        pretty(spell)
    )
}

/// Flavorful description plus tactics for a monster document.
pub fn monster_prompt(monster: &Value) -> String {
    format!(
        "You are a Dungeon Master assistant describing a D&D 5e monster for players.

Here is the raw monster data in JSON format:
{}

Tasks:
1. Give a short, vivid description of what the monster looks like and feels like to encounter.
2. Summarize its combat style:
   - Is it tanky? sneaky? spellcaster? brute?
   - Any notable abilities or resistances players should watch out for.
3. Give 2-3 quick tips to players on how to survive or counter this monster.
Keep it to about 2-4 short paragraphs total.
",
        pretty(monster)
    )
}

/// Second-person quest hook for a character.
pub fn story_prompt(name: &str, race: &str, class: &str) -> String {
    format!(
        "You are a D&D storyteller.

Create a short, punchy story hook (about 1 paragraph) for the following character:

Name: {name}
Race: {race}
Class: {class}

The hook should:
- Feel like the start of a quest.
- Include a hint of danger or mystery.
- Be written in second person (\"You ...\").
"
    )
}

fn pretty(document: &Value) -> String {
    serde_json::to_string_pretty(document).unwrap_or_else(|_| document.to_string())
}
