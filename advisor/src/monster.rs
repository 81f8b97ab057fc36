//! Monster statistics extracted for prompting.

use serde::Serialize;
use serde_json::Value;

use monster_fighter_core::Ability;

const UNKNOWN: &str = "Unknown";

const CHAT_PREAMBLE: &[&str] = &[
    "You are a Dungeons & Dragons rules assistant and combat coach.",
    "You must answer questions ONLY using the monster data provided below.",
    "Do not invent new abilities, spells, or stats that are not present in this data.",
    "If the user asks something you cannot answer from this data,",
    "explain that the information is not available instead of guessing.",
    "",
    "Here is the monster data you can rely on:",
];

const CHAT_JOB: &str = "\nYour job is to have a helpful, conversational chat with the user \
                        about these monsters, combat tactics, and how to handle them.";

/// Key statistics of one monster, already rendered for display.
///
/// Scalar fields hold `"Unknown"` when the document lacks them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MonsterStats {
    pub name: String,
    pub size: String,
    pub kind: String,
    pub alignment: String,
    pub hit_points: String,
    pub armor_class: String,
    /// Scores in [`Ability::ALL`] order.
    pub abilities: Vec<(Ability, String)>,
    pub challenge_rating: String,
    pub special_abilities: Vec<String>,
    pub actions: Vec<String>,
}

impl MonsterStats {
    /// Extracts the prompt-relevant fields of a monster document.
    ///
    /// # Examples
    ///
    /// ```
    /// use monster_fighter_advisor::MonsterStats;
    /// use serde_json::json;
    ///
    /// let stats = MonsterStats::from_monster(&json!({
    ///     "name": "Goblin",
    ///     "armor_class": [{ "type": "armor", "value": 15 }],
    ///     "challenge_rating": 0.25
    /// }));
    /// assert_eq!(stats.armor_class, "15");
    /// assert_eq!(stats.challenge_rating, "0.25");
    /// assert_eq!(stats.size, "Unknown");
    /// ```
    pub fn from_monster(monster: &Value) -> Self {
        let armor_class = match monster.get("armor_class") {
            Some(Value::Array(entries)) => entries.first().and_then(|e| e.get("value")),
            other => other,
        };

        Self {
            name: scalar(monster.get("name")),
            size: scalar(monster.get("size")),
            kind: scalar(monster.get("type")),
            alignment: scalar(monster.get("alignment")),
            hit_points: scalar(monster.get("hit_points")),
            armor_class: scalar(armor_class),
            abilities: Ability::ALL
                .iter()
                .map(|&ability| (ability, scalar(monster.get(ability.field_name()))))
                .collect(),
            challenge_rating: scalar(monster.get("challenge_rating")),
            special_abilities: entry_names(monster, "special_abilities"),
            actions: entry_names(monster, "actions"),
        }
    }

    fn write_section(&self, lines: &mut Vec<String>, max_listed: usize) {
        lines.push(format!("\n=== {} ===", self.name));
        lines.push(format!(
            "Size: {}, Type: {}, Alignment: {}",
            self.size, self.kind, self.alignment
        ));

        let scores = self
            .abilities
            .iter()
            .map(|(ability, score)| format!("{}: {score}", ability.short_label()))
            .collect::<Vec<_>>()
            .join(", ");
        lines.push(format!(
            "HP: {}, AC: {}, {scores}",
            self.hit_points, self.armor_class
        ));
        lines.push(format!("Challenge Rating: {}", self.challenge_rating));

        if !self.special_abilities.is_empty() {
            lines.push(format!(
                "Special Abilities: {}",
                listed(&self.special_abilities, max_listed)
            ));
        }
        if !self.actions.is_empty() {
            lines.push(format!("Actions: {}", listed(&self.actions, max_listed)));
        }
    }
}

/// Builds the chat system prompt grounding the model in `monsters`.
///
/// At most `max_listed` special abilities and actions are listed per monster.
pub fn build_system_prompt(monsters: &[MonsterStats], max_listed: usize) -> String {
    let mut lines: Vec<String> = CHAT_PREAMBLE.iter().map(|l| l.to_string()).collect();
    for stats in monsters {
        stats.write_section(&mut lines, max_listed);
    }
    lines.push(CHAT_JOB.to_string());
    lines.join("\n")
}

fn scalar(value: Option<&Value>) -> String {
    match value {
        None | Some(Value::Null) => UNKNOWN.to_string(),
        Some(Value::String(s)) => s.clone(),
        Some(other) => other.to_string(),
    }
}

fn entry_names(monster: &Value, field: &str) -> Vec<String> {
    monster
        .get(field)
        .and_then(Value::as_array)
        .map(|entries| {
            entries
                .iter()
                .map(|e| e.get("name").and_then(Value::as_str).unwrap_or_default().to_string())
                .collect()
        })
        .unwrap_or_default()
}

fn listed(names: &[String], max_listed: usize) -> String {
    names
        .iter()
        .take(max_listed)
        .map(String::as_str)
        .collect::<Vec<_>>()
        .join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn owlbear() -> Value {
        json!({
            "name": "Owlbear",
            "size": "Large",
            "type": "monstrosity",
            "alignment": "unaligned",
            "hit_points": 59,
            "armor_class": 13,
            "strength": 20, "dexterity": 12, "constitution": 17,
            "intelligence": 3, "wisdom": 12, "charisma": 7,
            "challenge_rating": 3,
            "special_abilities": [{ "name": "Keen Sight and Smell" }],
            "actions": [
                { "name": "Multiattack" }, { "name": "Beak" }, { "name": "Claws" }
            ]
        })
    }

    #[test]
    fn test_from_monster_scalar_armor_class() {
        let stats = MonsterStats::from_monster(&owlbear());
        assert_eq!(stats.armor_class, "13");
        assert_eq!(stats.kind, "monstrosity");
        assert_eq!(stats.abilities[0], (Ability::Strength, "20".to_string()));
        assert_eq!(stats.actions, vec!["Multiattack", "Beak", "Claws"]);
    }

    #[test]
    fn test_from_monster_empty_document() {
        let stats = MonsterStats::from_monster(&json!({}));
        assert_eq!(stats.name, "Unknown");
        assert_eq!(stats.armor_class, "Unknown");
        assert!(stats.abilities.iter().all(|(_, s)| s == "Unknown"));
        assert!(stats.special_abilities.is_empty());
    }

    #[test]
    fn test_system_prompt_layout() {
        let prompt = build_system_prompt(&[MonsterStats::from_monster(&owlbear())], 2);
        assert!(prompt.starts_with("You are a Dungeons & Dragons rules assistant"));
        assert!(prompt.contains("\n\n=== Owlbear ===\nSize: Large, Type: monstrosity"));
        assert!(prompt.contains(
            "HP: 59, AC: 13, STR: 20, DEX: 12, CON: 17, INT: 3, WIS: 12, CHA: 7"
        ));
        assert!(prompt.contains("Challenge Rating: 3"));
        assert!(prompt.contains("Actions: Multiattack, Beak\n"));
        assert!(!prompt.contains("Claws"));
        assert!(prompt.ends_with("how to handle them."));
    }

    #[test]
    fn test_system_prompt_omits_empty_lists() {
        let prompt = build_system_prompt(&[MonsterStats::from_monster(&json!({ "name": "Blob" }))], 5);
        assert!(!prompt.contains("Special Abilities:"));
        assert!(!prompt.contains("Actions:"));
    }
}
