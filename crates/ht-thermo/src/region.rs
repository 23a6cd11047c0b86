//! Mesh handle plus the case configuration it was loaded with.

use std::sync::Arc;

use ht_config::{CaseConfig, MeshDef, ThermoDict};
use ht_core::CellId;
use ht_mesh::{Mesh, MeshBuilder, MeshError};

use crate::error::{ThermoError, ThermoResult};

/// Name of the default (unnamed) phase.
pub const DEFAULT_PHASE: &str = "";

/// Resolve an optional phase argument: `None` means the default phase.
pub fn resolve_phase(phase: Option<&str>) -> &str {
    phase.unwrap_or(DEFAULT_PHASE)
}

/// Name of a field as stored for a phase: `name` for the default phase,
/// `name.phase` otherwise.
pub fn group_name(name: &str, phase: &str) -> String {
    if phase.is_empty() {
        name.to_string()
    } else {
        format!("{name}.{phase}")
    }
}

/// The region models are built on: a shared mesh and the case configuration.
///
/// Models keep a clone of the region for their whole lifetime; neither the
/// mesh nor the configuration is ever mutated through it.
#[derive(Debug, Clone)]
pub struct Region {
    mesh: Arc<Mesh>,
    case: Arc<CaseConfig>,
}

impl Region {
    pub fn new(mesh: Mesh, case: CaseConfig) -> Self {
        Self::from_shared(Arc::new(mesh), Arc::new(case))
    }

    pub fn from_shared(mesh: Arc<Mesh>, case: Arc<CaseConfig>) -> Self {
        Self { mesh, case }
    }

    /// Build the region from a case that carries its own `mesh` section.
    pub fn from_case(case: CaseConfig) -> ThermoResult<Self> {
        let def = case.mesh.as_ref().ok_or_else(|| ThermoError::ConfigurationMissing {
            phase: DEFAULT_PHASE.to_string(),
            what: "mesh section".to_string(),
        })?;
        let mesh = mesh_from_def(def)?;
        Ok(Self::new(mesh, case))
    }

    pub fn mesh(&self) -> &Mesh {
        &self.mesh
    }

    pub fn mesh_handle(&self) -> Arc<Mesh> {
        Arc::clone(&self.mesh)
    }

    pub fn case(&self) -> &CaseConfig {
        &self.case
    }

    /// Thermo dictionary of `phase`, or `ConfigurationMissing`.
    pub fn thermo_dict(&self, phase: &str) -> ThermoResult<&ThermoDict> {
        self.case
            .thermo_dict(phase)
            .ok_or_else(|| ThermoError::ConfigurationMissing {
                phase: phase.to_string(),
                what: if phase.is_empty() {
                    "thermo dictionary".to_string()
                } else {
                    format!("phases.{phase} dictionary")
                },
            })
    }

    /// Model type tag configured for `phase`, or `ConfigurationMissing`.
    pub fn model_type(&self, phase: &str) -> ThermoResult<&str> {
        self.thermo_dict(phase)?
            .model_type
            .as_deref()
            .ok_or_else(|| ThermoError::ConfigurationMissing {
                phase: phase.to_string(),
                what: "type".to_string(),
            })
    }
}

/// Build a mesh from its case-file description.
pub fn mesh_from_def(def: &MeshDef) -> ThermoResult<Mesh> {
    let mut builder = MeshBuilder::uniform(def.cells, def.cell_volume);
    for patch in &def.patches {
        // Positions past the id range can't address any cell.
        let face_cells = patch
            .face_cells
            .iter()
            .map(|&cell| {
                CellId::try_from(cell).map_err(|cell| MeshError::InvalidFaceCell {
                    patch: patch.name.clone(),
                    cell,
                    n_cells: def.cells,
                })
            })
            .collect::<Result<Vec<_>, _>>()?;
        builder.add_patch(patch.name.clone(), face_cells);
    }
    Ok(builder.build()?)
}
