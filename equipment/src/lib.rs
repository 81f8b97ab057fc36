//! Starting-equipment choice parsing.
//!
//! This crate turns the free-text `desc` strings of a class's
//! `starting_equipment_options` into [`ParsedChoice`] values: ordered,
//! display-ready option labels plus the detected [`ChoicePattern`].
//!
//! # Main entry points
//!
//! - [`parse_equipment_choice`]: parse one description.
//! - [`parse_equipment_choices`]: parse a class's descriptions in order,
//!   stopping at the first malformed one.
//!
//! # Example
//!
//! ```
//! use monster_fighter_equipment::parse_equipment_choice;
//!
//! let choice = parse_equipment_choice(
//!     "(a) two daggers, (b) a martial weapon, or (c) a light crossbow and 20 bolts",
//! )
//! .unwrap();
//! assert_eq!(choice.len(), 3);
//! assert_eq!(choice.options[1], "a martial weapon");
//!
//! let granted = parse_equipment_choice("(a) leather armor").unwrap();
//! assert_eq!(granted.auto_selected(), Some("leather armor"));
//! ```
//!
//! The parser is pure and holds no state, so it can be called from any number
//! of threads at once.
//!
//! [`ParsedChoice`]: monster_fighter_core::ParsedChoice
//! [`ChoicePattern`]: monster_fighter_core::ChoicePattern

mod error;
pub mod parser;

use monster_fighter_core::ParsedChoice;

pub use error::{EquipmentChoiceError, Result};

/// Parses a single equipment-choice description.
///
/// See [`parser::parse_choice`] for the grammar and failure conditions.
pub fn parse_equipment_choice(description: &str) -> Result<ParsedChoice> {
    parser::parse_choice(description)
}

/// Parses descriptions in order.
///
/// # Errors
///
/// Returns the error for the first malformed description; no partial list is
/// produced.
///
/// # Examples
///
/// ```
/// use monster_fighter_equipment::parse_equipment_choices;
///
/// let choices = parse_equipment_choices([
///     "(a) a mace or (b) a warhammer (if proficient)",
///     "(a) a priest's pack or (b) an explorer's pack",
/// ])
/// .unwrap();
/// assert_eq!(choices[0].options, vec!["a mace", "a warhammer"]);
///
/// assert!(parse_equipment_choices(["(a) a mace", "a shield"]).is_err());
/// ```
pub fn parse_equipment_choices<'a, I>(descriptions: I) -> Result<Vec<ParsedChoice>>
where
    I: IntoIterator<Item = &'a str>,
{
    descriptions
        .into_iter()
        .map(parser::parse_choice)
        .collect()
}
