//! Option-text cleanup: conditional suffixes and title casing.

/// Annotation marking an option that requires a proficiency.
pub const CONDITIONAL_SUFFIX: &str = "(if proficient)";

/// Removes a trailing `(if proficient)` annotation.
///
/// Only the exact literal is removed, together with the single space that
/// separates it from the option text. Anything else is left untouched,
/// including punctuation before the annotation.
///
/// # Examples
///
/// ```
/// use monster_fighter_equipment::parser::strip_conditional_suffix;
///
/// assert_eq!(strip_conditional_suffix("a warhammer (if proficient)"), "a warhammer");
/// assert_eq!(strip_conditional_suffix("a warhammer (If Proficient)"), "a warhammer (If Proficient)");
/// assert_eq!(strip_conditional_suffix("chain mail, (if proficient)"), "chain mail,");
/// ```
pub fn strip_conditional_suffix(option: &str) -> &str {
    match option.strip_suffix(CONDITIONAL_SUFFIX) {
        Some(rest) => rest.strip_suffix(' ').unwrap_or(rest),
        None => option,
    }
}

/// Title-cases `text` for display.
///
/// A letter is uppercased when it starts a word (preceded by nothing, or by a
/// character that is neither alphanumeric nor an apostrophe); every other
/// letter is lowercased. Apostrophes and digits therefore never start a word:
/// `explorer's pack` becomes `Explorer's Pack` and `20th` stays `20th`.
///
/// # Examples
///
/// ```
/// use monster_fighter_equipment::parser::title_case;
///
/// assert_eq!(title_case("(a) leather armor"), "(A) Leather Armor");
/// assert_eq!(title_case("an explorer's pack"), "An Explorer's Pack");
/// ```
pub fn title_case(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut prev: Option<char> = None;
    for ch in text.chars() {
        let starts_word = prev.is_none_or(|p| !p.is_alphanumeric() && p != '\'');
        if starts_word {
            out.extend(ch.to_uppercase());
        } else {
            out.extend(ch.to_lowercase());
        }
        prev = Some(ch);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strip_requires_exact_suffix() {
        assert_eq!(
            strip_conditional_suffix("a longsword (if proficient)"),
            "a longsword"
        );
        assert_eq!(
            strip_conditional_suffix("a longsword (if proficient) "),
            "a longsword (if proficient) "
        );
        assert_eq!(
            strip_conditional_suffix("a longsword (if  proficient)"),
            "a longsword (if  proficient)"
        );
        assert_eq!(
            strip_conditional_suffix("(if proficient) a longsword"),
            "(if proficient) a longsword"
        );
    }

    #[test]
    fn test_strip_without_separating_space() {
        assert_eq!(strip_conditional_suffix("mail(if proficient)"), "mail");
        assert_eq!(strip_conditional_suffix("(if proficient)"), "");
    }

    #[test]
    fn test_title_case_handles_digits_and_punctuation() {
        assert_eq!(title_case("20 bolts"), "20 Bolts");
        assert_eq!(title_case("a 20th-level item"), "A 20th-Level Item");
        assert_eq!(title_case("LEATHER ARMOR"), "Leather Armor");
        assert_eq!(title_case(""), "");
    }
}
