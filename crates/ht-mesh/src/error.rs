//! Mesh-specific error types.

use ht_core::{HtError, PatchId};
use thiserror::Error;

pub type MeshResult<T> = Result<T, MeshError>;

/// Mesh construction, validation and field layout errors.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum MeshError {
    /// A mesh needs at least one cell.
    #[error("Mesh has no cells")]
    NoCells,

    /// Cell volumes must be positive and finite.
    #[error("Cell {cell} has non-physical volume {volume}")]
    NonPhysicalVolume { cell: usize, volume: f64 },

    /// A patch face refers to a cell that doesn't exist.
    #[error("Patch '{patch}' face refers to non-existent cell {cell} (mesh has {n_cells} cells)")]
    InvalidFaceCell {
        patch: String,
        cell: usize,
        n_cells: usize,
    },

    /// Two patches share a name.
    #[error("Duplicate patch name '{name}'")]
    DuplicatePatch { name: String },

    /// Patch ids must be contiguous and match their position.
    #[error("Patch {patch} is stored at position {position}")]
    PatchOrder { patch: PatchId, position: usize },

    /// Patch lookup by name failed.
    #[error("No patch named '{name}'")]
    UnknownPatch { name: String },

    /// Field data does not match the mesh (or another field's) layout.
    #[error("Layout mismatch for {what}: expected {expected}, got {actual}")]
    LayoutMismatch {
        what: String,
        expected: usize,
        actual: usize,
    },
}

impl From<MeshError> for HtError {
    fn from(err: MeshError) -> Self {
        match err {
            MeshError::LayoutMismatch { .. } => HtError::Invariant {
                what: "field layout does not match mesh",
            },
            _ => HtError::InvalidArg {
                what: "invalid mesh definition",
            },
        }
    }
}
