//! Starting-equipment description parser.
//!
//! Descriptions come from the `desc` field of a class's
//! `starting_equipment_options` entries and follow an informal grammar:
//!
//! - **Three-way**: `(a) x, (b) y, or (c) z`
//! - **Two-way**: `(a) x or (b) y`
//! - **Single**: `(a) x`, a bundle with no alternatives
//!
//! # Architecture
//!
//! Parsing runs in three steps that never feed back into each other:
//!
//! 1. The leading `(a) ` marker is validated and removed.
//! 2. [`classify_choice`] picks a [`ChoicePattern`] by substring search.
//! 3. The body is split for that pattern and each option is cleaned up by
//!    [`strip_conditional_suffix`] (multi-option patterns only).
//!
//! Single-option bundles additionally get a title-cased `display_title` so
//! callers can list them as granted equipment.

mod classify;
mod normalize;

use regex::Regex;
use std::sync::LazyLock;
use tracing::{debug, warn};

use monster_fighter_core::{ChoicePattern, ParsedChoice};

use crate::error::{EquipmentChoiceError, Result};

pub use classify::{classify_choice, is_ambiguous};
pub use normalize::{CONDITIONAL_SUFFIX, strip_conditional_suffix, title_case};

use classify::{THREE_WAY_SECOND, THREE_WAY_THIRD, TWO_WAY_SECOND};

/// Leading option marker: `(a) `, `(b) `, ...
static MARKER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\([a-z]\) ").expect("static regex must compile"));

/// Parses one equipment-choice description.
///
/// # Errors
///
/// Returns [`EquipmentChoiceError::InvalidDescriptionFormat`] when the input
/// is empty, does not start with an option marker, or yields an empty option.
///
/// # Examples
///
/// ```
/// use monster_fighter_core::ChoicePattern;
/// use monster_fighter_equipment::parser::parse_choice;
///
/// let choice = parse_choice("(a) a longsword (if proficient) or (b) a shortbow").unwrap();
/// assert_eq!(choice.pattern, ChoicePattern::TwoWay);
/// assert_eq!(choice.options, vec!["a longsword", "a shortbow"]);
///
/// assert!(parse_choice("").is_err());
/// ```
pub fn parse_choice(description: &str) -> Result<ParsedChoice> {
    let body = strip_marker(description)?;
    let pattern = classify_choice(body);
    let ambiguous = is_ambiguous(body, pattern);
    if ambiguous {
        warn!(
            description,
            ?pattern,
            "Comma-delimited (b) marker without a later (c) marker; using fallback classification"
        );
    }

    let options = match pattern {
        ChoicePattern::ThreeWay => split_three_way(description, body)?,
        ChoicePattern::TwoWay => body.split(TWO_WAY_SECOND).map(str::to_string).collect(),
        ChoicePattern::Single => vec![body.to_string()],
    };

    let options: Vec<String> = if options.len() > 1 {
        options
            .iter()
            .map(|option| strip_conditional_suffix(option).to_string())
            .collect()
    } else {
        options
    };

    if options.iter().any(String::is_empty) {
        return Err(EquipmentChoiceError::invalid(description, "empty option"));
    }

    let display_title = (pattern == ChoicePattern::Single).then(|| title_case(description));

    debug!(description, ?pattern, options = options.len(), "Parsed equipment choice");

    Ok(ParsedChoice {
        description: description.to_string(),
        pattern,
        options,
        display_title,
        ambiguous,
    })
}

/// Validates and removes the leading option marker.
fn strip_marker(description: &str) -> Result<&str> {
    if description.is_empty() {
        return Err(EquipmentChoiceError::invalid(description, "empty input"));
    }
    match MARKER.find(description) {
        Some(marker) => Ok(&description[marker.end()..]),
        None => Err(EquipmentChoiceError::invalid(
            description,
            "missing leading option marker",
        )),
    }
}

fn split_three_way(description: &str, body: &str) -> Result<Vec<String>> {
    let (first, rest) = body
        .split_once(THREE_WAY_SECOND)
        .ok_or_else(|| EquipmentChoiceError::invalid(description, "missing (b) marker"))?;
    let (second, third) = rest
        .split_once(THREE_WAY_THIRD)
        .ok_or_else(|| EquipmentChoiceError::invalid(description, "missing (c) marker"))?;
    // The serial comma before "or (c)" belongs to the separator.
    let second = second.strip_suffix(',').unwrap_or(second);
    Ok(vec![first.to_string(), second.to_string(), third.to_string()])
}
