//! Sheet loading and monster sampling against an in-memory reference source.

use std::collections::HashMap;
use std::sync::Mutex;

use serde_json::{Value, json};

use monster_fighter_core::{Ability, AbilityGroup, ChoicePattern};
use monster_fighter_reference::{
    ReferenceError, ReferenceSource, Result, SamplingConfig, load_class_sheet, load_race_sheet,
    monster_ability_averages,
};

#[derive(Default)]
struct FakeSource {
    documents: HashMap<String, Value>,
    requests: Mutex<Vec<String>>,
}

impl FakeSource {
    fn with(mut self, path: &str, document: Value) -> Self {
        self.documents.insert(path.to_string(), document);
        self
    }

    fn requested(&self, path: &str) -> bool {
        self.requests.lock().unwrap().iter().any(|p| p == path)
    }
}

impl ReferenceSource for FakeSource {
    fn get_json(&self, path: &str) -> Result<Value> {
        self.requests.lock().unwrap().push(path.to_string());
        self.documents
            .get(path)
            .cloned()
            .ok_or_else(|| ReferenceError::StatusError {
                url: path.to_string(),
                status: 404,
            })
    }
}

fn fighter_source() -> FakeSource {
    FakeSource::default()
        .with(
            "classes/fighter",
            json!({
                "index": "fighter",
                "name": "Fighter",
                "proficiency_choices": [{
                    "desc": "Choose two skills from Acrobatics, Animal Handling, Athletics",
                    "choose": 2,
                    "from": { "options": [
                        { "item": { "index": "skill-acrobatics", "name": "Skill: Acrobatics" } },
                        { "item": { "index": "skill-animal-handling", "name": "Skill: Animal Handling" } },
                        { "item": { "index": "skill-athletics", "name": "Skill: Athletics" } }
                    ]}
                }],
                "proficiencies": [
                    { "index": "all-armor", "name": "All armor" },
                    { "index": "saving-throw-str", "name": "Saving Throw: STR" }
                ],
                "starting_equipment": [],
                "starting_equipment_options": [
                    { "desc": "(a) chain mail or (b) leather armor, longbow, and 20 arrows" },
                    { "desc": "(a) a martial weapon and a shield or (b) two martial weapons" },
                    { "desc": "(a) a light crossbow and 20 bolts or (b) two handaxes" },
                    { "desc": "(a) a dungeoneer's pack or (b) an explorer's pack" }
                ],
                "subclasses": [{ "index": "champion", "name": "Champion" }]
            }),
        )
        .with(
            "subclasses/champion",
            json!({
                "index": "champion",
                "name": "Champion",
                "desc": ["The archetypal Champion focuses on raw physical power."]
            }),
        )
}

#[test]
fn test_load_class_sheet_by_display_name() {
    let source = fighter_source();
    let sheet = load_class_sheet(&source, "Fighter").unwrap();

    assert!(source.requested("classes/fighter"));
    assert!(source.requested("subclasses/champion"));
    assert_eq!(sheet.equipment_choices.len(), 4);
    assert!(
        sheet
            .equipment_choices
            .iter()
            .all(|c| c.pattern == ChoicePattern::TwoWay)
    );
    assert_eq!(
        sheet.equipment_choices[0].options[1],
        "leather armor, longbow, and 20 arrows"
    );
    assert_eq!(
        sheet.proficiency_choice.as_ref().unwrap().options,
        vec!["Acrobatics", "Animal Handling", "Athletics"]
    );
    assert_eq!(sheet.proficiencies, vec!["All armor"]);
    assert_eq!(sheet.choice_slots().count(), 4);
}

#[test]
fn test_load_race_without_subraces_skips_subrace_fetch() {
    let source = FakeSource::default().with(
        "races/half-orc",
        json!({
            "index": "half-orc",
            "name": "Half-Orc",
            "ability_bonuses": [
                { "ability_score": { "index": "str" }, "bonus": 2 },
                { "ability_score": { "index": "con" }, "bonus": 1 },
                { "ability_score": { "index": "luck" }, "bonus": 9 }
            ],
            "subraces": []
        }),
    );
    let sheet = load_race_sheet(&source, "Half Orc").unwrap();
    assert_eq!(sheet.ability_bonuses.len(), 2);
    assert!(sheet.subrace.is_none());
    assert_eq!(source.requests.lock().unwrap().len(), 1);
}

#[test]
fn test_unknown_class_propagates_status() {
    let source = FakeSource::default();
    assert!(matches!(
        load_class_sheet(&source, "Gunslinger"),
        Err(ReferenceError::StatusError { status: 404, .. })
    ));
}

fn monster_source(count: usize) -> FakeSource {
    let results: Vec<Value> = (0..count)
        .map(|i| json!({ "index": format!("m{i}"), "name": format!("M{i}") }))
        .collect();
    (0..count).fold(
        FakeSource::default().with("monsters", json!({ "count": count, "results": results })),
        |source, i| {
            source.with(
                &format!("monsters/m{i}"),
                json!({
                    "index": format!("m{i}"),
                    "strength": 10 + i as i64,
                    "dexterity": 10, "constitution": 10,
                    "intelligence": 10, "wisdom": 10, "charisma": 10
                }),
            )
        },
    )
}

#[test]
fn test_monster_averages_use_stride_and_limit() {
    let source = monster_source(30);
    let sampling = SamplingConfig {
        stride: 10,
        limit: 201,
    };
    let averages = monster_ability_averages(&source, &sampling).unwrap();

    // m0, m10, m20 -> strength 10, 20, 30.
    assert_eq!(averages.sampled, 3);
    assert_eq!(averages.get(Ability::Strength), Some(20));
    assert!(!source.requested("monsters/m5"));

    let mental = averages.filtered(AbilityGroup::Mental);
    assert_eq!(mental.get(Ability::Strength), None);
    assert_eq!(mental.get(Ability::Charisma), Some(10));
}

#[test]
fn test_monster_averages_fail_on_missing_document() {
    let mut source = monster_source(11);
    source.documents.remove("monsters/m10");
    let result = monster_ability_averages(&source, &SamplingConfig::default());
    assert!(matches!(result, Err(ReferenceError::StatusError { .. })));
}

#[test]
fn test_monster_averages_on_empty_index() {
    let source = monster_source(0);
    let result = monster_ability_averages(&source, &SamplingConfig::default());
    assert!(matches!(result, Err(ReferenceError::EmptySample)));
}
