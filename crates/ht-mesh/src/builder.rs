//! Incremental mesh builder.

use ht_core::{CellId, PatchId};

use crate::error::MeshResult;
use crate::mesh::{Mesh, Patch};
use crate::validate;

/// Builder for constructing a mesh incrementally.
///
/// Use `add_cell`/`add_cells` and `add_patch` to build up the layout,
/// then call `build()` to validate and freeze it into an immutable `Mesh`.
#[derive(Debug, Default)]
pub struct MeshBuilder {
    cell_volumes: Vec<f64>,
    patches: Vec<Patch>,
}

impl MeshBuilder {
    /// Create a new empty builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder pre-populated with `n_cells` cells of equal volume.
    pub fn uniform(n_cells: usize, cell_volume: f64) -> Self {
        let mut builder = Self::new();
        builder.add_cells(n_cells, cell_volume);
        builder
    }

    /// Add a cell with the given volume [m³] and return its ID.
    ///
    /// # Panics
    ///
    /// If the builder already holds more cells than [`CellId::MAX_INDEX`].
    pub fn add_cell(&mut self, volume: f64) -> CellId {
        let id = CellId::from_index(position(self.cell_volumes.len()));
        self.cell_volumes.push(volume);
        id
    }

    /// Add `n` cells of equal volume and return their IDs in order.
    pub fn add_cells(&mut self, n: usize, volume: f64) -> Vec<CellId> {
        (0..n).map(|_| self.add_cell(volume)).collect()
    }

    /// Add a boundary patch whose faces are attached to `face_cells`.
    ///
    /// Cell references are checked in `build()`, so patches may be declared
    /// before their cells.
    pub fn add_patch(
        &mut self,
        name: impl Into<String>,
        face_cells: impl IntoIterator<Item = CellId>,
    ) -> PatchId {
        let id = PatchId::from_index(position(self.patches.len()));
        self.patches.push(Patch {
            id,
            name: name.into(),
            face_cells: face_cells.into_iter().collect(),
        });
        id
    }

    /// Build and validate the mesh, returning an immutable `Mesh`.
    pub fn build(self) -> MeshResult<Mesh> {
        validate::validate_cells(&self.cell_volumes)?;
        validate::validate_patches(&self.patches, self.cell_volumes.len())?;

        Ok(Mesh {
            cell_volumes: self.cell_volumes,
            patches: self.patches,
        })
    }
}

fn position(len: usize) -> u32 {
    u32::try_from(len).unwrap_or(u32::MAX)
}
