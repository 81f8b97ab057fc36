use std::fs;
use std::path::PathBuf;

use monster_fighter_core::ChoicePattern;
use monster_fighter_equipment::{parse_equipment_choice, parse_equipment_choices};
use serde::Deserialize;

#[derive(Debug, Deserialize)]
struct FixtureOption {
    class: String,
    desc: String,
}

fn fixture_options() -> Vec<FixtureOption> {
    let path = PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join("starting-equipment-options.json");
    let raw = fs::read_to_string(&path)
        .unwrap_or_else(|err| panic!("failed to read fixture '{}': {err}", path.display()));
    serde_json::from_str(&raw).expect("fixture should be valid JSON")
}

#[test]
fn test_every_fixture_description_parses() {
    for option in fixture_options() {
        let choice = parse_equipment_choice(&option.desc)
            .unwrap_or_else(|err| panic!("{} option failed to parse: {err}", option.class));

        if let Some(expected) = choice.pattern.expected_options() {
            assert_eq!(choice.len(), expected, "count mismatch for {:?}", option.desc);
        } else {
            assert!(choice.len() >= 2, "two-way choice too short: {:?}", option.desc);
        }

        for label in &choice.options {
            assert!(!label.is_empty());
            assert!(!label.starts_with("(a) "), "marker left in {label:?}");
            assert!(!label.contains("(b) "), "marker left in {label:?}");
            assert!(!label.contains("(c) "), "marker left in {label:?}");
            assert!(!label.ends_with("(if proficient)"), "suffix left in {label:?}");
        }
        assert!(!choice.ambiguous, "unexpected ambiguity for {:?}", option.desc);
    }
}

#[test]
fn test_fixture_three_way_choices() {
    let three_way: Vec<_> = fixture_options()
        .into_iter()
        .filter(|option| option.desc.contains("or (c)"))
        .collect();
    assert_eq!(three_way.len(), 3);

    let choices =
        parse_equipment_choices(three_way.iter().map(|option| option.desc.as_str())).unwrap();
    assert!(choices.iter().all(|c| c.pattern == ChoicePattern::ThreeWay));
    assert_eq!(
        choices[1].options,
        vec!["scale mail", "leather armor", "chain mail"]
    );
    assert_eq!(
        choices[2].options,
        vec!["a burglar's pack", "a dungeoneer's pack", "an explorer's pack"]
    );
}

#[test]
fn test_fixture_keeps_commas_inside_options() {
    let fighter_armor = fixture_options()
        .into_iter()
        .find(|option| option.class == "fighter" && option.desc.contains("chain mail"))
        .expect("fixture should contain fighter armor choice");
    let choice = parse_equipment_choice(&fighter_armor.desc).unwrap();
    assert_eq!(
        choice.options,
        vec!["chain mail", "leather armor, longbow, and 20 arrows"]
    );
}

#[test]
fn test_class_batch_stops_at_malformed_description() {
    let err = parse_equipment_choices([
        "(a) a mace or (b) a warhammer (if proficient)",
        "",
        "(a) a priest's pack or (b) an explorer's pack",
    ])
    .unwrap_err();
    assert!(err.to_string().contains("empty input"));
}
