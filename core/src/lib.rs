//! Core types and build-state primitives for assembling a D&D 5e character.
//!
//! This crate defines the foundational types shared by the parser, the
//! reference-data client and the CLI:
//!
//! - [`ParsedChoice`] / [`ChoicePattern`]: a starting-equipment description
//!   decoded into selectable options.
//! - [`RaceSheet`] / [`ClassSheet`]: what the reference data offers for a race
//!   or class.
//! - [`CharacterBuild`]: immutable build state advanced one step at a time,
//!   ending in a [`CharacterSummary`].
//! - [`Ability`], [`AbilityGroup`], [`Alignment`]: small value types.
//!
//! Validation ([`validate_proficiencies`], [`validate_equipment_choice`])
//! checks selections against the sheets before a step is committed.
//!
//! # Example
//!
//! ```
//! use monster_fighter_core::*;
//!
//! let class = ClassSheet {
//!     name: "Cleric".into(),
//!     equipment_choices: vec![ParsedChoice {
//!         description: "(a) a mace or (b) a warhammer (if proficient)".into(),
//!         pattern: ChoicePattern::TwoWay,
//!         options: vec!["a mace".into(), "a warhammer".into()],
//!         display_title: None,
//!         ambiguous: false,
//!     }],
//!     ..Default::default()
//! };
//!
//! let build = CharacterBuild::new()
//!     .with_race(RaceSheet { name: "Human".into(), ..Default::default() })
//!     .with_class(class)
//!     .with_equipment_choice(0, "a warhammer")
//!     .unwrap();
//!
//! assert_eq!(build.finalize().unwrap().equipment, vec!["a warhammer"]);
//! ```

mod build;
mod sheet;
mod types;
mod validate;

pub use build::{CharacterBuild, CharacterSummary};
pub use sheet::{AbilityBonus, ClassSheet, ProficiencyChoice, RaceSheet, Subtype};
pub use types::*;
pub use validate::{
    BuildError, validate_equipment_choice, validate_proficiencies, validate_subtype,
};
