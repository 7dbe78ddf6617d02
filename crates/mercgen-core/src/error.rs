//! Errors surfaced by the generator core.
//!
//! Most generation failures are local: they are logged and the affected
//! person simply ends up without a unit. The variants here are the ones a
//! caller can act on.

use mercgen_logic::options::OptionsError;

use crate::forces::ForceId;

#[derive(Debug, thiserror::Error)]
pub enum GenerationError {
    #[error("failed to parse options: {0}")]
    OptionsParse(#[from] serde_json::Error),

    #[error("invalid generation options: {}", join_errors(.0))]
    InvalidOptions(Vec<OptionsError>),

    #[error("unknown faction code '{0}'")]
    UnknownFaction(String),

    #[error("no unit design '{chassis} {model}' in the catalog")]
    UnknownDesign { chassis: String, model: String },

    #[error("unit design '{0}' could not be loaded: {1}")]
    InvalidDesign(String, &'static str),

    #[error("campaign has no entity {0:?}")]
    MissingEntity(hecs::Entity),

    #[error("cannot attach force '{name}' under missing parent {parent:?}")]
    MissingForce { name: String, parent: ForceId },

    #[error("campaign has no force {0:?}")]
    UnknownForce(ForceId),
}

fn join_errors(errors: &[OptionsError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}
