//! Type definitions for equipment choices, abilities and alignment.
//!
//! These types carry no behaviour beyond small lookups. Parsing lives in
//! `monster-fighter-equipment` and fetching lives in
//! `monster-fighter-reference`; both produce values of the types defined here.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Shape of a starting-equipment description.
///
/// Computed once from the description text before any splitting happens, so
/// the classification can be inspected independently of the option cleanup.
///
/// # Examples
///
/// ```
/// use monster_fighter_core::ChoicePattern;
///
/// assert_eq!(ChoicePattern::ThreeWay.expected_options(), Some(3));
/// assert_eq!(ChoicePattern::Single.expected_options(), Some(1));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChoicePattern {
    /// `(a) x, (b) y, or (c) z`
    ThreeWay,
    /// `(a) x or (b) y`
    TwoWay,
    /// A single bundle with no alternatives.
    Single,
}

impl ChoicePattern {
    /// Number of options a well-formed description of this shape yields.
    ///
    /// Two-way descriptions split on every `or (b)` separator, so a malformed
    /// source can yield more than two; `None` signals "at least two".
    pub fn expected_options(self) -> Option<usize> {
        match self {
            Self::ThreeWay => Some(3),
            Self::TwoWay => None,
            Self::Single => Some(1),
        }
    }
}

impl fmt::Display for ChoicePattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ThreeWay => write!(f, "three_way"),
            Self::TwoWay => write!(f, "two_way"),
            Self::Single => write!(f, "single"),
        }
    }
}

/// Structured result of parsing one equipment-choice description.
///
/// Options keep their source order. A [`ChoicePattern::Single`] choice has
/// exactly one option and is granted without a selection step; its
/// `display_title` holds the title-cased description shown in its place.
///
/// # Examples
///
/// ```
/// use monster_fighter_core::{ChoicePattern, ParsedChoice};
///
/// let choice = ParsedChoice {
///     description: "(a) a shield or (b) a simple weapon".into(),
///     pattern: ChoicePattern::TwoWay,
///     options: vec!["a shield".into(), "a simple weapon".into()],
///     display_title: None,
///     ambiguous: false,
/// };
/// assert!(choice.contains("a shield"));
/// assert_eq!(choice.auto_selected(), None);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParsedChoice {
    /// The description exactly as received.
    pub description: String,
    /// Detected shape.
    pub pattern: ChoicePattern,
    /// Display-ready option labels in source order.
    pub options: Vec<String>,
    /// Title-cased description, only for single-option bundles.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display_title: Option<String>,
    /// Set when the description mixes a comma-delimited `(b)` marker without
    /// a later `or (c)` marker and was classified by fallback.
    #[serde(default)]
    pub ambiguous: bool,
}

impl ParsedChoice {
    /// Number of options.
    pub fn len(&self) -> usize {
        self.options.len()
    }

    /// Always `false` for parser output; present for API symmetry with `len`.
    pub fn is_empty(&self) -> bool {
        self.options.is_empty()
    }

    /// Returns `true` if no selection step is needed.
    pub fn is_single(&self) -> bool {
        self.options.len() == 1
    }

    /// The option granted automatically for single-option bundles.
    pub fn auto_selected(&self) -> Option<&str> {
        if self.is_single() {
            self.options.first().map(String::as_str)
        } else {
            None
        }
    }

    /// Returns `true` if `label` is one of the options.
    pub fn contains(&self, label: &str) -> bool {
        self.options.iter().any(|option| option == label)
    }
}

/// One of the six ability scores.
///
/// # Examples
///
/// ```
/// use monster_fighter_core::Ability;
///
/// assert_eq!(Ability::from_abbreviation("dex"), Some(Ability::Dexterity));
/// assert_eq!(Ability::Charisma.to_string(), "Charisma");
/// assert!(Ability::Constitution.is_physical());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Ability {
    Strength,
    Dexterity,
    Constitution,
    Intelligence,
    Wisdom,
    Charisma,
}

impl Ability {
    /// All abilities in sheet order.
    pub const ALL: [Ability; 6] = [
        Ability::Strength,
        Ability::Dexterity,
        Ability::Constitution,
        Ability::Intelligence,
        Ability::Wisdom,
        Ability::Charisma,
    ];

    /// Maps the reference API's three-letter index (`str`, `dex`, ...) to an ability.
    pub fn from_abbreviation(abbr: &str) -> Option<Self> {
        match abbr {
            "str" => Some(Self::Strength),
            "dex" => Some(Self::Dexterity),
            "con" => Some(Self::Constitution),
            "int" => Some(Self::Intelligence),
            "wis" => Some(Self::Wisdom),
            "cha" => Some(Self::Charisma),
            _ => None,
        }
    }

    /// Field name used for this score in monster documents.
    pub fn field_name(self) -> &'static str {
        match self {
            Self::Strength => "strength",
            Self::Dexterity => "dexterity",
            Self::Constitution => "constitution",
            Self::Intelligence => "intelligence",
            Self::Wisdom => "wisdom",
            Self::Charisma => "charisma",
        }
    }

    /// Short uppercase label (`STR`, `DEX`, ...).
    pub fn short_label(self) -> &'static str {
        match self {
            Self::Strength => "STR",
            Self::Dexterity => "DEX",
            Self::Constitution => "CON",
            Self::Intelligence => "INT",
            Self::Wisdom => "WIS",
            Self::Charisma => "CHA",
        }
    }

    /// Strength, Dexterity and Constitution.
    pub fn is_physical(self) -> bool {
        matches!(self, Self::Strength | Self::Dexterity | Self::Constitution)
    }
}

impl fmt::Display for Ability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Strength => "Strength",
            Self::Dexterity => "Dexterity",
            Self::Constitution => "Constitution",
            Self::Intelligence => "Intelligence",
            Self::Wisdom => "Wisdom",
            Self::Charisma => "Charisma",
        };
        f.write_str(name)
    }
}

/// Subset of abilities a comparison focuses on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AbilityGroup {
    #[default]
    All,
    Physical,
    Mental,
}

impl AbilityGroup {
    /// Returns `true` if `ability` belongs to this group.
    pub fn contains(self, ability: Ability) -> bool {
        match self {
            Self::All => true,
            Self::Physical => ability.is_physical(),
            Self::Mental => !ability.is_physical(),
        }
    }
}

impl FromStr for AbilityGroup {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "all" | "all abilities" => Ok(Self::All),
            "physical" | "physical abilities" => Ok(Self::Physical),
            "mental" | "mental abilities" => Ok(Self::Mental),
            other => Err(format!("unknown ability group: {other}")),
        }
    }
}

/// Lawful / Neutral / Chaotic axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Order {
    #[default]
    Lawful,
    Neutral,
    Chaotic,
}

/// Good / Neutral / Evil axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Morality {
    #[default]
    Good,
    Neutral,
    Evil,
}

impl fmt::Display for Order {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Lawful => write!(f, "Lawful"),
            Self::Neutral => write!(f, "Neutral"),
            Self::Chaotic => write!(f, "Chaotic"),
        }
    }
}

impl fmt::Display for Morality {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Good => write!(f, "Good"),
            Self::Neutral => write!(f, "Neutral"),
            Self::Evil => write!(f, "Evil"),
        }
    }
}

impl FromStr for Order {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "lawful" => Ok(Self::Lawful),
            "neutral" => Ok(Self::Neutral),
            "chaotic" => Ok(Self::Chaotic),
            other => Err(format!("unknown order alignment: {other}")),
        }
    }
}

impl FromStr for Morality {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "good" => Ok(Self::Good),
            "neutral" => Ok(Self::Neutral),
            "evil" => Ok(Self::Evil),
            other => Err(format!("unknown morality alignment: {other}")),
        }
    }
}

/// Two-axis alignment, rendered as `"<order> <morality>"`.
///
/// # Examples
///
/// ```
/// use monster_fighter_core::{Alignment, Morality, Order};
///
/// let alignment = Alignment::new(Order::Chaotic, Morality::Good);
/// assert_eq!(alignment.to_string(), "Chaotic Good");
/// assert_eq!(Alignment::default().to_string(), "Lawful Good");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Alignment {
    pub order: Order,
    pub morality: Morality,
}

impl Alignment {
    pub fn new(order: Order, morality: Morality) -> Self {
        Self { order, morality }
    }
}

impl fmt::Display for Alignment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.order, self.morality)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ability_abbreviations_cover_all() {
        for (abbr, ability) in ["str", "dex", "con", "int", "wis", "cha"]
            .iter()
            .zip(Ability::ALL)
        {
            assert_eq!(Ability::from_abbreviation(abbr), Some(ability));
        }
        assert_eq!(Ability::from_abbreviation("luck"), None);
    }

    #[test]
    fn test_ability_group_membership() {
        let physical: Vec<_> = Ability::ALL
            .into_iter()
            .filter(|a| AbilityGroup::Physical.contains(*a))
            .collect();
        assert_eq!(
            physical,
            vec![Ability::Strength, Ability::Dexterity, Ability::Constitution]
        );
        assert!(AbilityGroup::Mental.contains(Ability::Wisdom));
        assert!(!AbilityGroup::Mental.contains(Ability::Strength));
        assert!(Ability::ALL.iter().all(|a| AbilityGroup::All.contains(*a)));
    }

    #[test]
    fn test_ability_group_parses_long_labels() {
        assert_eq!(
            "physical abilities".parse::<AbilityGroup>(),
            Ok(AbilityGroup::Physical)
        );
        assert_eq!("Mental".parse::<AbilityGroup>(), Ok(AbilityGroup::Mental));
        assert!("strong".parse::<AbilityGroup>().is_err());
    }

    #[test]
    fn test_pattern_serializes_snake_case() {
        let json = serde_json::to_string(&ChoicePattern::ThreeWay).unwrap();
        assert_eq!(json, "\"three_way\"");
        assert_eq!(ChoicePattern::TwoWay.to_string(), "two_way");
    }

    #[test]
    fn test_alignment_parse_and_display() {
        let order: Order = "neutral".parse().unwrap();
        let morality: Morality = "EVIL".parse().unwrap();
        assert_eq!(Alignment::new(order, morality).to_string(), "Neutral Evil");
    }
}
