//! Race and class sheets: what the reference data offers a new character.

use serde::{Deserialize, Serialize};

use crate::{Ability, ParsedChoice};

/// A racial ability-score increase.
///
/// # Examples
///
/// ```
/// use monster_fighter_core::{Ability, AbilityBonus};
///
/// let bonus = AbilityBonus { ability: Ability::Strength, bonus: 2 };
/// assert_eq!(bonus.to_string(), "Strength: +2");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AbilityBonus {
    pub ability: Ability,
    pub bonus: i32,
}

impl std::fmt::Display for AbilityBonus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {:+}", self.ability, self.bonus)
    }
}

/// A subrace or subclass offered alongside its parent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Subtype {
    pub index: String,
    pub name: String,
    pub description: String,
}

/// Race details relevant to building a character.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct RaceSheet {
    pub index: String,
    pub name: String,
    pub traits: Vec<String>,
    pub ability_bonuses: Vec<AbilityBonus>,
    pub languages: Vec<String>,
    /// Only the first listed subrace is offered.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subrace: Option<Subtype>,
}

/// "Choose N from ..." skill proficiency group.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ProficiencyChoice {
    pub choose: usize,
    pub description: String,
    pub options: Vec<String>,
}

impl ProficiencyChoice {
    pub fn contains(&self, name: &str) -> bool {
        self.options.iter().any(|option| option == name)
    }
}

/// Class details relevant to building a character.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ClassSheet {
    pub index: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub proficiency_choice: Option<ProficiencyChoice>,
    /// Weapon, armor and tool proficiencies (saving throws excluded).
    pub proficiencies: Vec<String>,
    /// Equipment every member of the class starts with.
    pub fixed_equipment: Vec<String>,
    /// Parsed `starting_equipment_options`, in source order.
    pub equipment_choices: Vec<ParsedChoice>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subclass: Option<Subtype>,
}

impl ClassSheet {
    /// Indices into `equipment_choices` that need a selection.
    pub fn choice_slots(&self) -> impl Iterator<Item = usize> + '_ {
        self.equipment_choices
            .iter()
            .enumerate()
            .filter(|(_, choice)| !choice.is_single())
            .map(|(index, _)| index)
    }

    /// Options granted without a selection step.
    pub fn auto_granted(&self) -> impl Iterator<Item = &str> + '_ {
        self.equipment_choices
            .iter()
            .filter_map(ParsedChoice::auto_selected)
    }
}
