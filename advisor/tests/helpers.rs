use std::sync::Mutex;

use serde_json::json;

use monster_fighter_advisor::{
    ChatSession, LlmGateway, MonsterStats, Result, build_system_prompt, explain_monster,
    story_hook,
};

/// Echoes the last line of the prompt and records every prompt.
#[derive(Default)]
struct EchoGateway {
    prompts: Mutex<Vec<String>>,
}

impl LlmGateway for EchoGateway {
    fn generate(&self, prompt: &str) -> Result<String> {
        self.prompts.lock().unwrap().push(prompt.to_string());
        Ok(prompt.lines().last().unwrap_or_default().trim().to_string())
    }
}

#[test]
fn test_story_hook_sends_template() {
    let gateway = EchoGateway::default();
    let reply = story_hook(&gateway, "Bram", "Dwarf", "Cleric").unwrap();
    assert_eq!(reply, "- Be written in second person (\"You ...\").");

    let prompts = gateway.prompts.lock().unwrap();
    assert!(prompts[0].starts_with("You are a D&D storyteller."));
    assert!(prompts[0].contains("Race: Dwarf\nClass: Cleric"));
}

#[test]
fn test_explain_monster_embeds_document() {
    let gateway = EchoGateway::default();
    explain_monster(&gateway, &json!({ "index": "goblin", "name": "Goblin" })).unwrap();
    assert!(gateway.prompts.lock().unwrap()[0].contains("\"index\": \"goblin\""));
}

#[test]
fn test_chat_grounded_in_selected_monsters() {
    let monsters = [
        json!({ "name": "Goblin", "armor_class": [{ "value": 15 }], "hit_points": 7 }),
        json!({ "name": "Ogre", "armor_class": 11, "hit_points": 59 }),
    ];
    let stats: Vec<MonsterStats> = monsters.iter().map(MonsterStats::from_monster).collect();
    let system = build_system_prompt(&stats, 5);

    let gateway = EchoGateway::default();
    let mut session = ChatSession::new(&gateway, system);
    let reply = session.send("Which one hits harder?").unwrap();

    assert_eq!(reply, "Assistant: Please respond to the user's latest message.");
    let prompt = &gateway.prompts.lock().unwrap()[0];
    assert!(prompt.contains("=== Goblin ===") && prompt.contains("=== Ogre ==="));
    assert!(prompt.contains("HP: 7, AC: 15"));
    assert!(prompt.contains("--- Conversation so far ---\nUser: Which one hits harder?\n"));
}
