//! Build-step validation.
//!
//! Each [`CharacterBuild`](crate::CharacterBuild) transition checks its input
//! against the sheets selected so far. The checks live here so that callers
//! presenting a selection can validate without committing the step.
//!
//! # Examples
//!
//! ```
//! use monster_fighter_core::*;
//!
//! let choice = ProficiencyChoice {
//!     choose: 2,
//!     description: "Choose two from Athletics, Intimidation, Survival".into(),
//!     options: vec!["Athletics".into(), "Intimidation".into(), "Survival".into()],
//! };
//! assert!(validate_proficiencies(&choice, &["Athletics".into()]).is_ok());
//!
//! let too_many = ["Athletics".into(), "Intimidation".into(), "Survival".into()];
//! assert!(matches!(
//!     validate_proficiencies(&choice, &too_many),
//!     Err(BuildError::TooManyProficiencies { allowed: 2, given: 3 })
//! ));
//! ```

use std::collections::HashSet;

use thiserror::Error;

use crate::{ClassSheet, ProficiencyChoice, Subtype};

/// Invalid character-build transitions.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BuildError {
    /// A step that depends on the race ran before a race was chosen.
    #[error("no race selected")]
    MissingRace,
    /// A step that depends on the class ran before a class was chosen.
    #[error("no class selected")]
    MissingClass,
    /// Subrace/subclass name is not the one the parent offers.
    #[error("{kind} '{name}' is not offered")]
    UnknownSubtype { kind: &'static str, name: String },
    /// Selected proficiency is not among the class options.
    #[error("proficiency '{0}' is not offered by this class")]
    UnknownProficiency(String),
    /// Same proficiency selected twice.
    #[error("proficiency '{0}' selected more than once")]
    DuplicateProficiency(String),
    /// More proficiencies selected than the class allows.
    #[error("too many proficiencies: {given} selected, at most {allowed} allowed")]
    TooManyProficiencies { allowed: usize, given: usize },
    /// Equipment slot index is out of range.
    #[error("equipment slot {0} does not exist")]
    UnknownEquipmentSlot(usize),
    /// Label is not one of the slot's options.
    #[error("'{label}' is not an option for equipment slot {slot}")]
    UnknownEquipmentOption { slot: usize, label: String },
    /// More equipment labels were given than there are choice slots.
    #[error("{given} equipment selections given but the class has {slots} choice slot(s)")]
    TooManyEquipmentSelections { slots: usize, given: usize },
    /// A multi-option slot has no selection at finalize time.
    #[error("equipment slot {slot} has no selection: {description}")]
    UnresolvedEquipmentChoice { slot: usize, description: String },
}

/// Convenience alias for results with [`BuildError`].
pub type Result<T> = std::result::Result<T, BuildError>;

/// Checks a proficiency selection against a class's choice group.
pub fn validate_proficiencies(choice: &ProficiencyChoice, selected: &[String]) -> Result<()> {
    if selected.len() > choice.choose {
        return Err(BuildError::TooManyProficiencies {
            allowed: choice.choose,
            given: selected.len(),
        });
    }

    let mut seen: HashSet<&str> = HashSet::new();
    for name in selected {
        if !choice.contains(name) {
            return Err(BuildError::UnknownProficiency(name.clone()));
        }
        if !seen.insert(name.as_str()) {
            return Err(BuildError::DuplicateProficiency(name.clone()));
        }
    }
    Ok(())
}

/// Checks that `label` is an option of equipment slot `slot`.
pub fn validate_equipment_choice(class: &ClassSheet, slot: usize, label: &str) -> Result<()> {
    let choice = class
        .equipment_choices
        .get(slot)
        .ok_or(BuildError::UnknownEquipmentSlot(slot))?;
    if choice.contains(label) {
        Ok(())
    } else {
        Err(BuildError::UnknownEquipmentOption {
            slot,
            label: label.to_string(),
        })
    }
}

/// Checks that `name` matches the offered subtype.
pub fn validate_subtype(
    kind: &'static str,
    offered: Option<&Subtype>,
    name: &str,
) -> Result<()> {
    match offered {
        Some(subtype) if subtype.name == name || subtype.index == name => Ok(()),
        _ => Err(BuildError::UnknownSubtype {
            kind,
            name: name.to_string(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{ChoicePattern, ParsedChoice};

    fn fighter_skills() -> ProficiencyChoice {
        ProficiencyChoice {
            choose: 2,
            description: "Choose two skills".into(),
            options: vec![
                "Acrobatics".into(),
                "Athletics".into(),
                "Perception".into(),
            ],
        }
    }

    #[test]
    fn test_proficiencies_within_limit() {
        let selected = vec!["Acrobatics".to_string(), "Perception".to_string()];
        assert_eq!(validate_proficiencies(&fighter_skills(), &selected), Ok(()));
        assert_eq!(validate_proficiencies(&fighter_skills(), &[]), Ok(()));
    }

    #[test]
    fn test_proficiencies_reject_unknown_and_duplicates() {
        let unknown = vec!["Arcana".to_string()];
        assert_eq!(
            validate_proficiencies(&fighter_skills(), &unknown),
            Err(BuildError::UnknownProficiency("Arcana".into()))
        );

        let duplicate = vec!["Athletics".to_string(), "Athletics".to_string()];
        assert_eq!(
            validate_proficiencies(&fighter_skills(), &duplicate),
            Err(BuildError::DuplicateProficiency("Athletics".into()))
        );
    }

    #[test]
    fn test_equipment_choice_checks_slot_and_label() {
        let class = ClassSheet {
            equipment_choices: vec![ParsedChoice {
                description: "(a) a shield or (b) a simple weapon".into(),
                pattern: ChoicePattern::TwoWay,
                options: vec!["a shield".into(), "a simple weapon".into()],
                display_title: None,
                ambiguous: false,
            }],
            ..Default::default()
        };
        assert!(validate_equipment_choice(&class, 0, "a shield").is_ok());
        assert_eq!(
            validate_equipment_choice(&class, 1, "a shield"),
            Err(BuildError::UnknownEquipmentSlot(1))
        );
        assert!(matches!(
            validate_equipment_choice(&class, 0, "a greataxe"),
            Err(BuildError::UnknownEquipmentOption { slot: 0, .. })
        ));
    }

    #[test]
    fn test_subtype_matches_name_or_index() {
        let hill = Subtype {
            index: "hill-dwarf".into(),
            name: "Hill Dwarf".into(),
            description: String::new(),
        };
        assert!(validate_subtype("subrace", Some(&hill), "Hill Dwarf").is_ok());
        assert!(validate_subtype("subrace", Some(&hill), "hill-dwarf").is_ok());
        assert!(validate_subtype("subrace", Some(&hill), "Mountain Dwarf").is_err());
        assert!(validate_subtype("subrace", None, "Hill Dwarf").is_err());
    }
}
