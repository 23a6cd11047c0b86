//! Core mesh data structures.

use ht_core::{CellId, PatchId};

/// A boundary sub-region of the mesh.
///
/// Each face of the patch is addressed by the cell it is attached to; the
/// face count of the patch is the length of `face_cells`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Patch {
    pub id: PatchId,
    pub name: String,
    pub face_cells: Vec<CellId>,
}

impl Patch {
    /// Number of faces on this patch.
    pub fn len(&self) -> usize {
        self.face_cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.face_cells.is_empty()
    }
}

/// The mesh: a validated, immutable cell/patch layout.
///
/// Only the sizing and boundary addressing needed to lay out fields is kept;
/// geometry beyond cell volumes belongs to the discretization.
#[derive(Debug, Clone, PartialEq)]
pub struct Mesh {
    pub(crate) cell_volumes: Vec<f64>,
    pub(crate) patches: Vec<Patch>,
}

impl Mesh {
    /// Number of cells.
    pub fn n_cells(&self) -> usize {
        self.cell_volumes.len()
    }

    /// Cell volumes [m³], indexed by cell.
    pub fn cell_volumes(&self) -> &[f64] {
        &self.cell_volumes
    }

    /// Volume of one cell [m³].
    pub fn cell_volume(&self, cell: CellId) -> Option<f64> {
        self.cell_volumes.get(cell.as_usize()).copied()
    }

    /// Return all boundary patches.
    pub fn patches(&self) -> &[Patch] {
        &self.patches
    }

    /// Get a patch by ID.
    pub fn patch(&self, id: PatchId) -> Option<&Patch> {
        self.patches.get(id.as_usize())
    }

    /// Look a patch up by name.
    pub fn patch_id(&self, name: &str) -> Option<PatchId> {
        self.patches.iter().find(|p| p.name == name).map(|p| p.id)
    }

    /// Face counts per patch, in patch order.
    pub fn patch_sizes(&self) -> Vec<usize> {
        self.patches.iter().map(Patch::len).collect()
    }

    /// Total volume of the domain [m³].
    pub fn total_volume(&self) -> f64 {
        self.cell_volumes.iter().sum()
    }
}
