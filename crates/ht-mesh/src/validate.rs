//! Mesh validation logic.

use std::collections::HashSet;

use crate::error::{MeshError, MeshResult};
use crate::mesh::Patch;

/// Validate cell data: at least one cell, every volume positive and finite.
pub(crate) fn validate_cells(cell_volumes: &[f64]) -> MeshResult<()> {
    if cell_volumes.is_empty() {
        return Err(MeshError::NoCells);
    }

    for (i, &volume) in cell_volumes.iter().enumerate() {
        if !volume.is_finite() || volume <= 0.0 {
            return Err(MeshError::NonPhysicalVolume {
                cell: i,
                volume,
            });
        }
    }

    Ok(())
}

/// Validate patches: ids match positions, names are unique, faces address real cells.
pub(crate) fn validate_patches(patches: &[Patch], n_cells: usize) -> MeshResult<()> {
    let mut names = HashSet::new();

    for (i, patch) in patches.iter().enumerate() {
        if patch.id.as_usize() != i {
            return Err(MeshError::PatchOrder {
                patch: patch.id,
                position: i,
            });
        }

        if !names.insert(patch.name.as_str()) {
            return Err(MeshError::DuplicatePatch {
                name: patch.name.clone(),
            });
        }

        if let Some(cell) = patch.face_cells.iter().find(|c| c.as_usize() >= n_cells) {
            return Err(MeshError::InvalidFaceCell {
                patch: patch.name.clone(),
                cell: cell.as_usize(),
                n_cells,
            });
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use ht_core::{CellId, PatchId};

    #[test]
    fn rejects_non_physical_volume() {
        assert!(validate_cells(&[1.0, 0.0]).is_err());
        assert!(validate_cells(&[1.0, f64::NAN]).is_err());
        assert!(validate_cells(&[1.0, -2.0]).is_err());
        assert!(validate_cells(&[1.0, 2.0]).is_ok());
    }

    #[test]
    fn rejects_duplicate_patch_names() {
        let patches = vec![
            Patch {
                id: PatchId::from_index(0),
                name: "wall".into(),
                face_cells: vec![],
            },
            Patch {
                id: PatchId::from_index(1),
                name: "wall".into(),
                face_cells: vec![],
            },
        ];
        let err = validate_patches(&patches, 1).unwrap_err();
        assert!(matches!(err, MeshError::DuplicatePatch { .. }));
    }

    #[test]
    fn rejects_out_of_range_face_cell() {
        let patches = vec![Patch {
            id: PatchId::from_index(0),
            name: "inlet".into(),
            face_cells: vec![CellId::from_index(3)],
        }];
        let err = validate_patches(&patches, 3).unwrap_err();
        assert!(matches!(err, MeshError::InvalidFaceCell { n_cells: 3, .. }));
    }
}
