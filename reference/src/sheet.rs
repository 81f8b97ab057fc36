//! Race and class sheet assembly from reference documents.
//!
//! The `*_from_documents` functions are pure and operate on already-fetched
//! JSON; [`load_race_sheet`] and [`load_class_sheet`] fetch the documents
//! (including the first subrace/subclass) through a [`ReferenceSource`].

use serde_json::Value;
use tracing::{debug, warn};

use monster_fighter_core::{
    Ability, AbilityBonus, ClassSheet, ProficiencyChoice, RaceSheet, Subtype,
};
use monster_fighter_equipment::parse_equipment_choice;

use crate::client::{ReferenceSource, index_for_name};
use crate::error::{ReferenceError, Result};

const SKILL_PREFIX: &str = "Skill: ";
const SAVING_THROW_MARKER: &str = "Saving Throw:";

/// Fetches a race (by name or index) and its first subrace.
pub fn load_race_sheet(source: &dyn ReferenceSource, name: &str) -> Result<RaceSheet> {
    let race = source.race(&index_for_name(name))?;
    let subrace = match first_reference_index(&race, "subraces") {
        Some(index) => Some(source.subrace(&index)?),
        None => None,
    };
    race_sheet_from_documents(&race, subrace.as_ref())
}

/// Fetches a class (by name or index) and its first subclass.
pub fn load_class_sheet(source: &dyn ReferenceSource, name: &str) -> Result<ClassSheet> {
    let class = source.class(&index_for_name(name))?;
    let subclass = match first_reference_index(&class, "subclasses") {
        Some(index) => Some(source.subclass(&index)?),
        None => None,
    };
    class_sheet_from_documents(&class, subclass.as_ref())
}

/// Builds a race sheet from a race document and optional subrace document.
pub fn race_sheet_from_documents(race: &Value, subrace: Option<&Value>) -> Result<RaceSheet> {
    let index = required_str(race, "index", "race")?;
    let name = required_str(race, "name", "race")?;

    let mut ability_bonuses = Vec::new();
    for entry in array(race, "ability_bonuses") {
        let abbr = entry
            .pointer("/ability_score/index")
            .and_then(Value::as_str)
            .unwrap_or_default();
        let Some(ability) = Ability::from_abbreviation(abbr) else {
            warn!(race = name, ability = abbr, "Skipping unknown ability bonus");
            continue;
        };
        let raw = entry.get("bonus").and_then(Value::as_i64).unwrap_or(0);
        let Ok(bonus) = i32::try_from(raw) else {
            warn!(race = name, ability = abbr, bonus = raw, "Skipping out-of-range ability bonus");
            continue;
        };
        ability_bonuses.push(AbilityBonus { ability, bonus });
    }

    let subrace = subrace
        .map(|doc| subtype_from_document(doc, "subrace", |d| d.get("desc").and_then(Value::as_str)))
        .transpose()?;

    Ok(RaceSheet {
        index: index.to_string(),
        name: name.to_string(),
        traits: names(race, "traits"),
        ability_bonuses,
        languages: names(race, "languages"),
        subrace,
    })
}

/// Builds a class sheet from a class document and optional subclass document.
///
/// # Errors
///
/// Fails with [`ReferenceError::EquipmentError`] when any starting-equipment
/// description is malformed; the sheet is never built from a partial list.
pub fn class_sheet_from_documents(class: &Value, subclass: Option<&Value>) -> Result<ClassSheet> {
    let index = required_str(class, "index", "class")?;
    let name = required_str(class, "name", "class")?;

    let proficiency_choice = array(class, "proficiency_choices")
        .first()
        .map(proficiency_choice_from);

    let proficiencies = names(class, "proficiencies")
        .into_iter()
        .filter(|p| !p.contains(SAVING_THROW_MARKER))
        .collect();

    let fixed_equipment = array(class, "starting_equipment")
        .iter()
        .filter_map(|entry| entry.pointer("/equipment/name").and_then(Value::as_str))
        .map(str::to_string)
        .collect();

    let mut equipment_choices = Vec::new();
    for option in array(class, "starting_equipment_options") {
        let desc = required_str(option, "desc", "starting_equipment_options entry")?;
        equipment_choices.push(parse_equipment_choice(desc)?);
    }
    debug!(class = name, choices = equipment_choices.len(), "Parsed starting equipment options");

    let subclass = subclass
        .map(|doc| {
            subtype_from_document(doc, "subclass", |d| {
                d.get("desc")
                    .and_then(Value::as_array)
                    .and_then(|paragraphs| paragraphs.first())
                    .and_then(Value::as_str)
            })
        })
        .transpose()?;

    Ok(ClassSheet {
        index: index.to_string(),
        name: name.to_string(),
        proficiency_choice,
        proficiencies,
        fixed_equipment,
        equipment_choices,
        subclass,
    })
}

fn proficiency_choice_from(group: &Value) -> ProficiencyChoice {
    let options = group
        .pointer("/from/options")
        .and_then(Value::as_array)
        .map(Vec::as_slice)
        .unwrap_or_default()
        .iter()
        .filter_map(|option| option.pointer("/item/name").and_then(Value::as_str))
        .map(|name| name.strip_prefix(SKILL_PREFIX).unwrap_or(name).to_string())
        .collect();

    ProficiencyChoice {
        choose: group.get("choose").and_then(Value::as_u64).unwrap_or(0) as usize,
        description: group
            .get("desc")
            .and_then(Value::as_str)
            .unwrap_or_default()
            .to_string(),
        options,
    }
}

fn subtype_from_document(
    doc: &Value,
    kind: &str,
    description: impl Fn(&Value) -> Option<&str>,
) -> Result<Subtype> {
    Ok(Subtype {
        index: required_str(doc, "index", kind)?.to_string(),
        name: required_str(doc, "name", kind)?.to_string(),
        description: description(doc).unwrap_or_default().to_string(),
    })
}

fn first_reference_index(doc: &Value, field: &str) -> Option<String> {
    array(doc, field)
        .first()
        .and_then(|entry| entry.get("index"))
        .and_then(Value::as_str)
        .map(str::to_string)
}

fn required_str<'a>(doc: &'a Value, field: &'static str, context: &str) -> Result<&'a str> {
    doc.get(field)
        .and_then(Value::as_str)
        .ok_or_else(|| ReferenceError::MissingField {
            context: context.to_string(),
            field,
        })
}

fn array<'a>(doc: &'a Value, field: &str) -> &'a [Value] {
    doc.get(field)
        .and_then(Value::as_array)
        .map(Vec::as_slice)
        .unwrap_or_default()
}

fn names(doc: &Value, field: &str) -> Vec<String> {
    array(doc, field)
        .iter()
        .filter_map(|entry| entry.get("name").and_then(Value::as_str))
        .map(str::to_string)
        .collect()
}
