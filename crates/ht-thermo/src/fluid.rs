//! Fluid layer: mixture constants, transport model and heat capacities.

use ht_config::FieldStore;
use ht_mesh::VolField;

use crate::basic::BasicThermoState;
use crate::error::ThermoResult;
use crate::io::write_field;
use crate::mixture::MoistAir;
use crate::transport::Transport;

#[derive(Debug, Clone)]
pub struct FluidThermoState<Tr> {
    mixture: MoistAir,
    transport: Tr,
    cp: VolField,
    cv: VolField,
}

impl<Tr: Transport> FluidThermoState<Tr> {
    /// Layer the fluid state on an already built base state.
    ///
    /// Heat capacities start at their dry-air values.
    pub fn new(basic: &BasicThermoState) -> ThermoResult<Self> {
        let mixture = MoistAir::from_def(&basic.dict().mixture)?;
        let transport = Tr::from_def(&basic.dict().transport)?;
        let mesh = basic.mesh();
        Ok(Self {
            cp: VolField::calculated(basic.group_name("Cp"), mesh, mixture.cp(0.0)),
            cv: VolField::calculated(basic.group_name("Cv"), mesh, mixture.cv(0.0)),
            mixture,
            transport,
        })
    }

    pub fn mixture(&self) -> &MoistAir {
        &self.mixture
    }

    pub fn transport(&self) -> &Tr {
        &self.transport
    }

    pub fn cp(&self) -> &VolField {
        &self.cp
    }

    pub fn cv(&self) -> &VolField {
        &self.cv
    }

    /// Re-evaluate heat capacities for the specific humidity `q`.
    pub fn update(&mut self, q: &VolField) {
        let air = self.mixture;
        self.cp.set_values(q.values().map(|q| air.cp(q)));
        self.cv.set_values(q.values().map(|q| air.cv(q)));
    }

    /// `cp/cv`, value by value.
    pub fn gamma(&self, name: impl Into<String>) -> VolField {
        let mut gamma = self.cp.derived(name);
        gamma.set_values(self.cp.values().zip(self.cv.values()).map(|(cp, cv)| cp / cv));
        gamma
    }

    pub fn write(&self, store: &mut FieldStore, basic: &BasicThermoState) {
        write_field(store, basic.mesh(), &self.cp);
        write_field(store, basic.mesh(), &self.cv);
    }
}

/// `mu/rho`, value by value.
pub fn kinematic_viscosity(name: impl Into<String>, mu: &VolField, rho: &VolField) -> VolField {
    let mut nu = mu.derived(name);
    nu.set_values(mu.values().zip(rho.values()).map(|(mu, rho)| mu / rho));
    nu
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::region::Region;
    use crate::transport::ConstTransport;
    use ht_config::{CaseConfig, FieldData, ThermoDict};
    use ht_mesh::MeshBuilder;

    fn basic() -> BasicThermoState {
        let mut case = CaseConfig::new("fluid");
        case.thermo = Some(ThermoDict::default());
        case.fields.insert("T".into(), FieldData::uniform(300.0));
        case.fields.insert("p".into(), FieldData::uniform(1e5));
        let region = Region::new(MeshBuilder::uniform(2, 1.0).build().unwrap(), case);
        BasicThermoState::new(&region, "").unwrap()
    }

    #[test]
    fn dry_air_gamma_is_about_1_4() {
        let basic = basic();
        let fluid = FluidThermoState::<ConstTransport>::new(&basic).unwrap();
        let gamma = fluid.gamma("gamma");
        assert!((gamma.internal()[0] - 1.4).abs() < 5e-3, "{}", gamma.internal()[0]);
    }

    #[test]
    fn vapour_raises_cp() {
        let basic = basic();
        let mut fluid = FluidThermoState::<ConstTransport>::new(&basic).unwrap();
        let dry_cp = fluid.cp().internal()[0];
        let q = VolField::calculated("q", basic.mesh(), 0.01);
        fluid.update(&q);
        assert!(fluid.cp().internal()[0] > dry_cp);
        assert!(fluid.cv().internal()[0] < fluid.cp().internal()[0]);
    }
}
