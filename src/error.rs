//! Error taxonomy for dataset registration and valuation.
//!
//! Every variant is fatal: the datasets are curated by hand, so a bad entry
//! must be fixed at the source rather than tolerated at runtime.

use thiserror::Error;

use crate::roles::Role;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum RankError {
    #[error("item \"{0}\" is already registered")]
    DuplicateItem(String),

    #[error("character \"{0}\" is already in the roster")]
    DuplicateCharacter(String),

    #[error("encounter \"{0}\" is already registered")]
    DuplicateEncounter(String),

    #[error("unknown item \"{0}\"")]
    UnknownItem(String),

    #[error("unknown encounter \"{0}\"")]
    UnknownEncounter(String),

    #[error("loot \"{item}\" lists {sources} sources but {chances} drop chances")]
    ArrayLengthMismatch {
        item: String,
        sources: usize,
        chances: usize,
    },

    #[error("loot \"{item}\": drop chance {chance}% is outside (0, 100]")]
    InvalidDropChance { item: String, chance: f64 },

    #[error("encounter \"{encounter}\": clear time of {minutes} minutes must be positive")]
    InvalidClearTime { encounter: String, minutes: f64 },

    #[error("no positive best-in-slot EP configured for role {}", .0.name())]
    MissingBisValue(Role),

    #[error(
        "\"{item}\" equipped by {character} has 0 EP for their role \
         (found while valuing encounter \"{encounter}\")"
    )]
    InconsistentEquippedValue {
        character: String,
        item: String,
        encounter: String,
    },
}

pub type Result<T> = std::result::Result<T, RankError>;
