//! Error types for equipment-description parsing.

use thiserror::Error;

/// Errors raised while decoding an equipment-choice description.
///
/// The parser never substitutes a guessed option list: any description it
/// cannot decode faithfully is reported back to the caller.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EquipmentChoiceError {
    /// Empty input, a missing leading `(a) ` marker, or an option that
    /// decodes to empty text.
    #[error("invalid equipment description ({reason}): {description:?}")]
    InvalidDescriptionFormat {
        description: String,
        reason: &'static str,
    },
}

impl EquipmentChoiceError {
    pub(crate) fn invalid(description: &str, reason: &'static str) -> Self {
        Self::InvalidDescriptionFormat {
            description: description.to_string(),
            reason,
        }
    }
}

/// Convenience alias for results with [`EquipmentChoiceError`].
pub type Result<T> = std::result::Result<T, EquipmentChoiceError>;
