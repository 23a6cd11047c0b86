//! Base thermodynamic state shared by every model layer.

use ht_config::{FieldStore, ThermoDict};
use ht_mesh::{Mesh, VolField};
use tracing::debug;

use crate::error::{ThermoError, ThermoResult};
use crate::io::{read_field, write_field};
use crate::region::{Region, group_name};

/// Temperature and pressure on a mesh, for one phase.
///
/// Built exactly once per model, before any other layer; the fluid and
/// humidity layers read from it but never re-create it.
#[derive(Debug, Clone)]
pub struct BasicThermoState {
    region: Region,
    phase: String,
    dict: ThermoDict,
    t: VolField,
    p: VolField,
}

impl BasicThermoState {
    /// Build from the dictionary the case configures for `phase`.
    pub fn new(region: &Region, phase: &str) -> ThermoResult<Self> {
        let dict = region.thermo_dict(phase)?.clone();
        Self::with_dict(region, dict, phase)
    }

    /// Build from an explicit dictionary.
    ///
    /// Fields in the dictionary's own store take precedence over the case's.
    pub fn with_dict(region: &Region, dict: ThermoDict, phase: &str) -> ThermoResult<Self> {
        let mut state = Self {
            region: region.clone(),
            phase: phase.to_string(),
            dict,
            t: VolField::calculated("T", region.mesh(), 0.0),
            p: VolField::calculated("p", region.mesh(), 0.0),
        };
        state.t = state.require("T")?;
        state.p = state.require("p")?;

        for (field, what) in [(&state.t, "temperature"), (&state.p, "pressure")] {
            if field.values().any(|v| !v.is_finite() || v <= 0.0) {
                return Err(ThermoError::NonPhysical { what });
            }
        }

        debug!(
            phase = %state.phase,
            cells = region.mesh().n_cells(),
            "base thermodynamic state read"
        );
        Ok(state)
    }

    /// Look up `name` (grouped by phase) in the dictionary's store, then the case's.
    pub fn lookup(&self, name: &str) -> ThermoResult<Option<VolField>> {
        let grouped = self.group_name(name);
        let mesh = self.region.mesh();
        if let Some(field) = read_field(mesh, &self.dict.fields, &grouped)? {
            return Ok(Some(field));
        }
        read_field(mesh, &self.region.case().fields, &grouped)
    }

    /// As [`Self::lookup`], failing with `FieldMissing`.
    pub fn require(&self, name: &str) -> ThermoResult<VolField> {
        self.lookup(name)?.ok_or_else(|| ThermoError::FieldMissing {
            name: self.group_name(name),
        })
    }

    pub fn group_name(&self, name: &str) -> String {
        group_name(name, &self.phase)
    }

    pub fn region(&self) -> &Region {
        &self.region
    }

    pub fn mesh(&self) -> &Mesh {
        self.region.mesh()
    }

    pub fn phase(&self) -> &str {
        &self.phase
    }

    pub fn dict(&self) -> &ThermoDict {
        &self.dict
    }

    pub(crate) fn set_dict(&mut self, dict: ThermoDict) {
        self.dict = dict;
    }

    pub fn t(&self) -> &VolField {
        &self.t
    }

    pub fn t_mut(&mut self) -> &mut VolField {
        &mut self.t
    }

    pub fn p(&self) -> &VolField {
        &self.p
    }

    pub fn p_mut(&mut self) -> &mut VolField {
        &mut self.p
    }

    /// Refresh zero-gradient patches of T and p from their cells.
    pub fn correct_boundaries(&mut self) {
        let mesh = self.region.mesh();
        self.t.correct_boundary_conditions(mesh);
        self.p.correct_boundary_conditions(mesh);
    }

    pub fn write(&self, store: &mut FieldStore) {
        write_field(store, self.mesh(), &self.t);
        write_field(store, self.mesh(), &self.p);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ht_config::{CaseConfig, FieldData, PatchData};
    use ht_core::CellId;
    use ht_mesh::{MeshBuilder, PatchKind};

    fn region(fields: &[(&str, FieldData)]) -> Region {
        let mut builder = MeshBuilder::uniform(4, 1.0);
        builder.add_patch("wall", [CellId::from_index(3)]);
        let mut case = CaseConfig::new("basic");
        case.thermo = Some(ThermoDict::default());
        case.phases.insert("air".into(), ThermoDict::default());
        for (name, data) in fields {
            case.fields.insert(name.to_string(), data.clone());
        }
        Region::new(builder.build().unwrap(), case)
    }

    #[test]
    fn reads_t_and_p() {
        let region = region(&[
            ("T", FieldData::uniform(300.0).with_patch("wall", PatchData::fixed(310.0))),
            ("p", FieldData::uniform(1e5)),
        ]);
        let state = BasicThermoState::new(&region, "").unwrap();
        assert_eq!(state.t().internal(), &[300.0; 4]);
        assert_eq!(state.t().boundary()[0].kind(), PatchKind::FixedValue);
        assert_eq!(state.t().boundary()[0].values(), &[310.0]);
        assert_eq!(state.p().stats().mean, 1e5);
    }

    #[test]
    fn named_phase_reads_suffixed_fields() {
        let region = region(&[
            ("T", FieldData::uniform(300.0)),
            ("p", FieldData::uniform(1e5)),
            ("T.air", FieldData::uniform(250.0)),
            ("p.air", FieldData::uniform(9e4)),
        ]);
        let state = BasicThermoState::new(&region, "air").unwrap();
        assert_eq!(state.t().name(), "T.air");
        assert_eq!(state.t().internal()[0], 250.0);
    }

    #[test]
    fn missing_pressure_is_reported() {
        let region = region(&[("T", FieldData::uniform(300.0))]);
        let err = BasicThermoState::new(&region, "").unwrap_err();
        assert_eq!(err, ThermoError::FieldMissing { name: "p".into() });
    }

    #[test]
    fn non_positive_temperature_is_rejected() {
        let region = region(&[("T", FieldData::uniform(-1.0)), ("p", FieldData::uniform(1e5))]);
        assert!(matches!(
            BasicThermoState::new(&region, ""),
            Err(ThermoError::NonPhysical { what: "temperature" })
        ));
    }

    #[test]
    fn dictionary_fields_take_precedence() {
        let region = region(&[("T", FieldData::uniform(300.0)), ("p", FieldData::uniform(1e5))]);
        let mut dict = ThermoDict::default();
        dict.fields.insert("T".into(), FieldData::uniform(280.0));
        let state = BasicThermoState::with_dict(&region, dict, "").unwrap();
        assert_eq!(state.t().internal()[0], 280.0);
        assert_eq!(state.p().internal()[0], 1e5);
    }
}
