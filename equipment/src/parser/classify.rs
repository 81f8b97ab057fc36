//! Pattern classification for equipment descriptions.
//!
//! Decides which separator grammar a marker-stripped description uses before
//! any splitting happens.

use monster_fighter_core::ChoicePattern;

pub(crate) const THREE_WAY_SECOND: &str = ", (b) ";
pub(crate) const THREE_WAY_THIRD: &str = " or (c) ";
pub(crate) const TWO_WAY_SECOND: &str = " or (b) ";

/// Classifies a description body (leading marker already removed).
///
/// A three-way choice needs a comma-delimited `(b)` marker followed later by
/// an `or (c)` marker. Markers are never counted.
pub fn classify_choice(body: &str) -> ChoicePattern {
    if let Some(pos) = body.find(THREE_WAY_SECOND) {
        let rest = &body[pos + THREE_WAY_SECOND.len()..];
        if rest.contains(THREE_WAY_THIRD) {
            return ChoicePattern::ThreeWay;
        }
    }

    if body.contains(TWO_WAY_SECOND) {
        ChoicePattern::TwoWay
    } else {
        ChoicePattern::Single
    }
}

/// Returns `true` when the body has a comma-delimited `(b)` marker but was
/// not classified as three-way.
///
/// Such descriptions fall through to two-way or single handling, which may
/// misrepresent a genuine list of alternatives.
pub fn is_ambiguous(body: &str, pattern: ChoicePattern) -> bool {
    pattern != ChoicePattern::ThreeWay && body.contains(THREE_WAY_SECOND)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_three_way() {
        let body = "two daggers, (b) a martial weapon, or (c) a light crossbow and 20 bolts";
        assert_eq!(classify_choice(body), ChoicePattern::ThreeWay);
        assert!(!is_ambiguous(body, ChoicePattern::ThreeWay));
    }

    #[test]
    fn test_classify_two_way() {
        assert_eq!(
            classify_choice("a shield or (b) a simple weapon"),
            ChoicePattern::TwoWay
        );
    }

    #[test]
    fn test_classify_single() {
        assert_eq!(classify_choice("leather armor"), ChoicePattern::Single);
        assert_eq!(classify_choice(""), ChoicePattern::Single);
    }

    #[test]
    fn test_or_c_before_comma_b_is_not_three_way() {
        // The (c) marker must come after the comma-delimited (b) marker.
        let body = "x or (c) y, (b) z";
        assert_eq!(classify_choice(body), ChoicePattern::Single);
        assert!(is_ambiguous(body, ChoicePattern::Single));
    }

    #[test]
    fn test_or_c_without_comma_b_falls_to_two_way() {
        let body = "a lute or (b) a drum or (c) a flute";
        assert_eq!(classify_choice(body), ChoicePattern::TwoWay);
        assert!(!is_ambiguous(body, ChoicePattern::TwoWay));
    }

    #[test]
    fn test_comma_b_without_or_c_is_ambiguous() {
        let body = "a rapier, (b) a longsword";
        let pattern = classify_choice(body);
        assert_eq!(pattern, ChoicePattern::Single);
        assert!(is_ambiguous(body, pattern));
    }

    #[test]
    fn test_separators_are_case_and_spacing_sensitive() {
        assert_eq!(classify_choice("a shield OR (b) a mace"), ChoicePattern::Single);
        assert_eq!(classify_choice("a shield or(b) a mace"), ChoicePattern::Single);
    }
}
