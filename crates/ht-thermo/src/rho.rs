//! Density, compressibility and viscosity fields of a density-based model.

use ht_config::FieldStore;
use ht_core::PatchId;
use ht_mesh::{Mesh, VolField};
use tracing::debug;

use crate::basic::BasicThermoState;
use crate::error::{ThermoError, ThermoResult};
use crate::io::write_field;

/// Persisted name of the model's own density copy. Kept apart from any
/// solver-owned `rho` so the two never alias.
pub const RHO_NAME: &str = "thermo:rho";
pub const PSI_NAME: &str = "thermo:psi";
pub const MU_NAME: &str = "thermo:mu";

#[derive(Debug, Clone)]
pub struct RhoFields {
    pub(crate) rho: VolField,
    pub(crate) rho0: VolField,
    pub(crate) psi: VolField,
    pub(crate) mu: VolField,
    pub(crate) mu_t: VolField,
    pub(crate) mu_eff: VolField,
}

impl RhoFields {
    /// Allocate every field on the base state's mesh. Values are placeholders
    /// until the first derivation pass.
    pub fn allocate(basic: &BasicThermoState) -> Self {
        let mesh = basic.mesh();
        let name = |n: &str| basic.group_name(n);
        Self {
            rho: VolField::calculated(name(RHO_NAME), mesh, 0.0),
            rho0: VolField::calculated(name("thermo:rho_0"), mesh, 0.0),
            psi: VolField::calculated(name(PSI_NAME), mesh, 0.0),
            mu: VolField::calculated(name(MU_NAME), mesh, 0.0),
            mu_t: VolField::calculated(name("mut"), mesh, 0.0),
            mu_eff: VolField::calculated(name("muEff"), mesh, 0.0),
        }
    }

    pub fn rho(&self) -> &VolField {
        &self.rho
    }

    pub fn rho_mut(&mut self) -> &mut VolField {
        &mut self.rho
    }

    pub fn rho0(&self) -> &VolField {
        &self.rho0
    }

    pub fn psi(&self) -> &VolField {
        &self.psi
    }

    pub fn mu(&self) -> &VolField {
        &self.mu
    }

    pub fn mu_eff(&self) -> &VolField {
        &self.mu_eff
    }

    pub fn rho_patch(&self, mesh: &Mesh, patch: PatchId) -> ThermoResult<&[f64]> {
        patch_values(mesh, &self.rho, patch)
    }

    pub fn mu_patch(&self, mesh: &Mesh, patch: PatchId) -> ThermoResult<&[f64]> {
        patch_values(mesh, &self.mu, patch)
    }

    /// `rho += delta` over cells and patches.
    ///
    /// `psi` is left alone: it depends on temperature and composition only.
    pub fn correct_rho(&mut self, delta: &VolField) -> ThermoResult<()> {
        self.rho.add_field(delta)?;
        debug!(field = self.rho.name(), "density corrected");
        Ok(())
    }

    pub fn store_old_time(&mut self) {
        self.rho0.set_values(self.rho.values());
    }

    pub fn set_turbulent_viscosity(&mut self, mu_t: &VolField) -> ThermoResult<()> {
        self.mu_t.assign(mu_t)?;
        self.update_mu_eff();
        Ok(())
    }

    /// `muEff = mu + mut`.
    pub fn update_mu_eff(&mut self) {
        self.mu_eff.set_values(
            self.mu
                .values()
                .zip(self.mu_t.values())
                .map(|(mu, mu_t)| mu + mu_t),
        );
    }

    pub fn write(&self, store: &mut FieldStore, mesh: &Mesh) {
        for field in [&self.rho, &self.rho0, &self.psi, &self.mu, &self.mu_eff] {
            write_field(store, mesh, field);
        }
    }
}

fn patch_values<'a>(mesh: &Mesh, field: &'a VolField, patch: PatchId) -> ThermoResult<&'a [f64]> {
    field
        .patch(patch)
        .map(|p| p.values())
        .ok_or(ThermoError::PatchOutOfRange {
            patch,
            n_patches: mesh.patches().len(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::region::Region;
    use ht_config::{CaseConfig, FieldData, ThermoDict};
    use ht_core::CellId;
    use ht_mesh::MeshBuilder;

    fn basic() -> BasicThermoState {
        let mut builder = MeshBuilder::uniform(3, 1.0);
        builder.add_patch("wall", [CellId::from_index(0), CellId::from_index(2)]);
        let mut case = CaseConfig::new("rho");
        case.thermo = Some(ThermoDict::default());
        case.fields.insert("T".into(), FieldData::uniform(300.0));
        case.fields.insert("p".into(), FieldData::uniform(1e5));
        let region = Region::new(builder.build().unwrap(), case);
        BasicThermoState::new(&region, "").unwrap()
    }

    #[test]
    fn private_density_name_is_grouped() {
        let fields = RhoFields::allocate(&basic());
        assert_eq!(fields.rho().name(), "thermo:rho");
    }

    #[test]
    fn patch_out_of_range() {
        let basic = basic();
        let fields = RhoFields::allocate(&basic);
        assert_eq!(fields.rho_patch(basic.mesh(), PatchId::from_index(0)).unwrap().len(), 2);
        assert!(matches!(
            fields.mu_patch(basic.mesh(), PatchId::from_index(1)),
            Err(ThermoError::PatchOutOfRange { n_patches: 1, .. })
        ));
    }

    #[test]
    fn old_time_and_mu_eff() {
        let basic = basic();
        let mut fields = RhoFields::allocate(&basic);
        fields.rho.fill(1.2);
        fields.store_old_time();
        fields.rho.fill(1.3);
        assert_eq!(fields.rho0().internal(), &[1.2; 3]);

        fields.mu.fill(1e-5);
        let mu_t = VolField::calculated("mut", basic.mesh(), 2e-5);
        fields.set_turbulent_viscosity(&mu_t).unwrap();
        assert!(fields.mu_eff().values().all(|v| (v - 3e-5).abs() < 1e-18));
    }
}
