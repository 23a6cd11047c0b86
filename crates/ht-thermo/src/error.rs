//! Thermophysical model errors.

use ht_config::ConfigError;
use ht_core::{HtError, PatchId};
use ht_mesh::MeshError;
use thiserror::Error;

/// Result type for thermophysical model operations.
pub type ThermoResult<T> = Result<T, ThermoError>;

/// Errors raised while selecting, constructing or reconfiguring a model.
///
/// Physically out-of-range states met during derivation are never errors;
/// they are clamped and counted in a `ClampReport`.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ThermoError {
    /// No constructor registered for the configured type tag.
    #[error("Unknown {family} type '{tag}'; valid types are: {}", .available.join(", "))]
    UnknownModelTag {
        family: &'static str,
        tag: String,
        available: Vec<String>,
    },

    /// The configuration has nothing to resolve for this phase.
    #[error("Configuration missing for phase '{phase}': {what}")]
    ConfigurationMissing { phase: String, what: String },

    /// Unsupported saturation / partial-pressure evaluation scheme.
    #[error("Invalid method '{method}'; valid methods are: {}", .valid.join(", "))]
    InvalidMethod {
        method: String,
        valid: Vec<&'static str>,
    },

    /// A required field is not present in the field store.
    #[error("Required field '{name}' not found")]
    FieldMissing { name: String },

    /// Stored field data does not fit the mesh.
    #[error("Field '{name}' does not fit the mesh: {reason}")]
    FieldLayout { name: String, reason: String },

    /// Patch index outside the mesh's patch list.
    #[error("Patch {patch} out of range (mesh has {n_patches} patches)")]
    PatchOutOfRange { patch: PatchId, n_patches: usize },

    /// Non-physical configuration value.
    #[error("Non-physical value for {what}")]
    NonPhysical { what: &'static str },

    #[error("Mesh error: {0}")]
    Mesh(#[from] MeshError),

    #[error("Configuration error: {message}")]
    Config { message: String },
}

impl From<ConfigError> for ThermoError {
    fn from(err: ConfigError) -> Self {
        ThermoError::Config {
            message: err.to_string(),
        }
    }
}

impl From<ThermoError> for HtError {
    fn from(err: ThermoError) -> Self {
        match err {
            ThermoError::Mesh(e) => e.into(),
            ThermoError::NonPhysical { what } => HtError::InvalidArg { what },
            ThermoError::PatchOutOfRange { patch, n_patches } => HtError::IndexOob {
                what: "patch",
                index: patch.as_usize(),
                len: n_patches,
            },
            _ => HtError::Invariant {
                what: "thermophysical model configuration",
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display_lists_alternatives() {
        let err = ThermoError::UnknownModelTag {
            family: "humidityRhoThermo",
            tag: "foo".into(),
            available: vec!["a".into(), "b".into()],
        };
        let msg = err.to_string();
        assert!(msg.contains("foo"));
        assert!(msg.contains("a, b"));

        let err = ThermoError::InvalidMethod {
            method: "bogus".into(),
            valid: vec!["simpleSaturation", "buck"],
        };
        assert!(err.to_string().contains("simpleSaturation, buck"));
    }

    #[test]
    fn error_to_ht_error() {
        let err: HtError = ThermoError::NonPhysical {
            what: "temperature",
        }
        .into();
        assert!(matches!(err, HtError::InvalidArg { .. }));
    }
}
