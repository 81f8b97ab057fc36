//! Immutable character-build state.
//!
//! A [`CharacterBuild`] is a value: every step consumes it and returns the
//! next state, so a caller can keep earlier states around (for "back"
//! navigation) without any shared mutable storage.

use serde::{Deserialize, Serialize};

use crate::validate::{
    BuildError, Result, validate_equipment_choice, validate_proficiencies, validate_subtype,
};
use crate::{Alignment, ClassSheet, RaceSheet};

/// Accumulated selections for one character.
///
/// # Examples
///
/// ```
/// use monster_fighter_core::*;
///
/// let race = RaceSheet { index: "dwarf".into(), name: "Dwarf".into(), ..Default::default() };
/// let class = ClassSheet { index: "fighter".into(), name: "Fighter".into(), ..Default::default() };
///
/// let summary = CharacterBuild::new()
///     .with_race(race)
///     .with_class(class)
///     .with_alignment(Alignment::new(Order::Neutral, Morality::Good))
///     .finalize()
///     .unwrap();
///
/// assert_eq!(summary.race, "Dwarf");
/// assert_eq!(summary.subclass, "None");
/// assert_eq!(summary.alignment, "Neutral Good");
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CharacterBuild {
    race: Option<RaceSheet>,
    subrace: Option<String>,
    class: Option<ClassSheet>,
    subclass: Option<String>,
    proficiencies: Vec<String>,
    /// One entry per class equipment slot; single-option slots are pre-filled.
    equipment: Vec<Option<String>>,
    alignment: Alignment,
}

impl CharacterBuild {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn race(&self) -> Option<&RaceSheet> {
        self.race.as_ref()
    }

    pub fn class(&self) -> Option<&ClassSheet> {
        self.class.as_ref()
    }

    pub fn alignment(&self) -> Alignment {
        self.alignment
    }

    pub fn proficiencies(&self) -> &[String] {
        &self.proficiencies
    }

    /// Selection for equipment slot `slot`, including auto-granted options.
    pub fn equipment_selection(&self, slot: usize) -> Option<&str> {
        self.equipment.get(slot).and_then(|s| s.as_deref())
    }

    /// Selects a race. Clears any subrace chosen for a previous race.
    pub fn with_race(mut self, race: RaceSheet) -> Self {
        self.race = Some(race);
        self.subrace = None;
        self
    }

    /// Equips the race's offered subrace.
    pub fn with_subrace(mut self, name: &str) -> Result<Self> {
        let race = self.race.as_ref().ok_or(BuildError::MissingRace)?;
        validate_subtype("subrace", race.subrace.as_ref(), name)?;
        self.subrace = race.subrace.as_ref().map(|s| s.name.clone());
        Ok(self)
    }

    /// Selects a class. Proficiency and equipment selections from a previous
    /// class are discarded; single-option equipment bundles are granted.
    pub fn with_class(mut self, class: ClassSheet) -> Self {
        self.equipment = class
            .equipment_choices
            .iter()
            .map(|choice| choice.auto_selected().map(str::to_string))
            .collect();
        self.proficiencies.clear();
        self.subclass = None;
        self.class = Some(class);
        self
    }

    /// Equips the class's offered subclass.
    pub fn with_subclass(mut self, name: &str) -> Result<Self> {
        let class = self.class.as_ref().ok_or(BuildError::MissingClass)?;
        validate_subtype("subclass", class.subclass.as_ref(), name)?;
        self.subclass = class.subclass.as_ref().map(|s| s.name.clone());
        Ok(self)
    }

    /// Replaces the skill proficiency selection.
    pub fn with_proficiencies(mut self, selected: Vec<String>) -> Result<Self> {
        let class = self.class.as_ref().ok_or(BuildError::MissingClass)?;
        match &class.proficiency_choice {
            Some(choice) => validate_proficiencies(choice, &selected)?,
            None => {
                if let Some(first) = selected.first() {
                    return Err(BuildError::UnknownProficiency(first.clone()));
                }
            }
        }
        self.proficiencies = selected;
        Ok(self)
    }

    /// Records `label` as the selection for equipment slot `slot`.
    pub fn with_equipment_choice(mut self, slot: usize, label: &str) -> Result<Self> {
        let class = self.class.as_ref().ok_or(BuildError::MissingClass)?;
        validate_equipment_choice(class, slot, label)?;
        let selection = self
            .equipment
            .get_mut(slot)
            .ok_or(BuildError::UnknownEquipmentSlot(slot))?;
        *selection = Some(label.to_string());
        Ok(self)
    }

    /// Assigns labels, in order, to the class's multi-option slots.
    pub fn with_equipment_choices<S: AsRef<str>>(self, labels: &[S]) -> Result<Self> {
        let slots: Vec<usize> = self
            .class
            .as_ref()
            .ok_or(BuildError::MissingClass)?
            .choice_slots()
            .collect();
        if labels.len() > slots.len() {
            return Err(BuildError::TooManyEquipmentSelections {
                slots: slots.len(),
                given: labels.len(),
            });
        }
        labels
            .iter()
            .zip(slots)
            .try_fold(self, |build, (label, slot)| {
                build.with_equipment_choice(slot, label.as_ref())
            })
    }

    pub fn with_alignment(mut self, alignment: Alignment) -> Self {
        self.alignment = alignment;
        self
    }

    /// Produces the final summary.
    ///
    /// # Errors
    ///
    /// [`BuildError::MissingRace`] / [`BuildError::MissingClass`] when either
    /// is unset, and [`BuildError::UnresolvedEquipmentChoice`] for the first
    /// multi-option equipment slot without a selection.
    pub fn finalize(&self) -> Result<CharacterSummary> {
        let race = self.race.as_ref().ok_or(BuildError::MissingRace)?;
        let class = self.class.as_ref().ok_or(BuildError::MissingClass)?;

        let mut equipment = class.fixed_equipment.clone();
        for (slot, (choice, selection)) in class
            .equipment_choices
            .iter()
            .zip(&self.equipment)
            .enumerate()
        {
            match selection {
                Some(label) => equipment.push(label.clone()),
                None => {
                    return Err(BuildError::UnresolvedEquipmentChoice {
                        slot,
                        description: choice.description.clone(),
                    });
                }
            }
        }

        Ok(CharacterSummary {
            race: race.name.clone(),
            subrace: self.subrace.clone().unwrap_or_else(|| "None".to_string()),
            class: class.name.clone(),
            subclass: self.subclass.clone().unwrap_or_else(|| "None".to_string()),
            alignment: self.alignment.to_string(),
            proficiencies: self.proficiencies.clone(),
            equipment,
        })
    }
}

/// Completed character, ready for display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CharacterSummary {
    pub race: String,
    pub subrace: String,
    pub class: String,
    pub subclass: String,
    pub alignment: String,
    pub proficiencies: Vec<String>,
    pub equipment: Vec<String>,
}

impl std::fmt::Display for CharacterSummary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Race: {}", self.race)?;
        writeln!(f, "Subrace: {}", self.subrace)?;
        writeln!(f, "Class: {}", self.class)?;
        writeln!(f, "Subclass: {}", self.subclass)?;
        writeln!(f, "Alignment: {}", self.alignment)?;
        if !self.proficiencies.is_empty() {
            writeln!(f, "Proficiencies: {}", self.proficiencies.join(", "))?;
        }
        if !self.equipment.is_empty() {
            writeln!(f, "Equipment:")?;
            for item in &self.equipment {
                writeln!(f, "- {item}")?;
            }
        }
        Ok(())
    }
}
