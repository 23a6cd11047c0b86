//! Concrete models assembled from the layered states.
//!
//! Each model owns exactly one [`BasicThermoState`]. It is built first; the
//! fluid layer and then the humidity (or dry density) layer are built on top
//! of it by reference, so nothing is constructed twice. Trait methods
//! delegate to whichever layer owns the data.

use ht_config::{FieldStore, ThermoDict};
use ht_core::units::{k, pa};
use ht_core::{PatchId, clamp_finite};
use ht_mesh::{Mesh, VolField};
use tracing::info;
use uom::si::mass_density::kilogram_per_cubic_meter;

use crate::basic::BasicThermoState;
use crate::contract::{BasicThermo, ClampReport, FluidThermo, HumidityThermo, RhoThermo};
use crate::error::ThermoResult;
use crate::fluid::{FluidThermoState, kinematic_viscosity};
use crate::humidity::{HumidityThermoState, P_MIN, T_MIN};
use crate::region::Region;
use crate::rho::RhoFields;
use crate::saturation::SaturationMethod;
use crate::transport::{ConstTransport, SutherlandTransport, Transport};

/// Humidity-aware density-based model.
#[derive(Debug, Clone)]
pub struct HumidRhoThermo<Tr> {
    basic: BasicThermoState,
    fluid: FluidThermoState<Tr>,
    humidity: HumidityThermoState,
}

pub type SutherlandHumidRhoThermo = HumidRhoThermo<SutherlandTransport>;
pub type ConstHumidRhoThermo = HumidRhoThermo<ConstTransport>;

impl<Tr: Transport> HumidRhoThermo<Tr> {
    /// Build from the dictionary and fields the case holds for `phase`.
    pub fn new(region: &Region, phase: &str) -> ThermoResult<Self> {
        Self::assemble(BasicThermoState::new(region, phase)?)
    }

    /// Build from an explicit dictionary; its `fields` override the case's.
    pub fn with_dict(region: &Region, dict: ThermoDict, phase: &str) -> ThermoResult<Self> {
        Self::assemble(BasicThermoState::with_dict(region, dict, phase)?)
    }

    fn assemble(basic: BasicThermoState) -> ThermoResult<Self> {
        let fluid = FluidThermoState::new(&basic)?;
        let humidity = HumidityThermoState::new(&basic, &fluid)?;
        let mut model = Self {
            basic,
            fluid,
            humidity,
        };
        model.correct();
        model.store_old_time();
        info!(
            model = Tr::HUMID_MODEL,
            phase = model.basic.phase(),
            method = %model.humidity.method(),
            cells = model.basic.mesh().n_cells(),
            "constructed thermophysical model"
        );
        Ok(model)
    }

    pub fn basic(&self) -> &BasicThermoState {
        &self.basic
    }

    pub fn fluid(&self) -> &FluidThermoState<Tr> {
        &self.fluid
    }

    pub fn humidity(&self) -> &HumidityThermoState {
        &self.humidity
    }
}

impl<Tr: Transport> BasicThermo for HumidRhoThermo<Tr> {
    fn type_name(&self) -> &'static str {
        Tr::HUMID_MODEL
    }

    fn phase_name(&self) -> &str {
        self.basic.phase()
    }

    fn mesh(&self) -> &Mesh {
        self.basic.mesh()
    }

    fn t(&self) -> &VolField {
        self.basic.t()
    }

    fn t_mut(&mut self) -> &mut VolField {
        self.basic.t_mut()
    }

    fn p(&self) -> &VolField {
        self.basic.p()
    }

    fn p_mut(&mut self) -> &mut VolField {
        self.basic.p_mut()
    }

    fn correct(&mut self) -> ClampReport {
        self.humidity.correct(&mut self.basic, &mut self.fluid)
    }

    fn store_old_time(&mut self) {
        self.humidity.rho.store_old_time();
    }

    fn snapshot(&self) -> FieldStore {
        let mut store = FieldStore::new();
        self.basic.write(&mut store);
        self.fluid.write(&mut store, &self.basic);
        self.humidity.write(&mut store, &self.basic);
        store
    }
}

impl<Tr: Transport> FluidThermo for HumidRhoThermo<Tr> {
    fn cp(&self) -> &VolField {
        self.fluid.cp()
    }

    fn cv(&self) -> &VolField {
        self.fluid.cv()
    }

    fn gamma(&self) -> VolField {
        self.fluid.gamma(self.basic.group_name("gamma"))
    }

    fn nu(&self) -> VolField {
        let rho = &self.humidity.rho;
        kinematic_viscosity(self.basic.group_name("nu"), rho.mu(), rho.rho())
    }
}

impl<Tr: Transport> RhoThermo for HumidRhoThermo<Tr> {
    fn rho(&self) -> &VolField {
        self.humidity.rho.rho()
    }

    fn rho_patch(&self, patch: PatchId) -> ThermoResult<&[f64]> {
        self.humidity.rho.rho_patch(self.basic.mesh(), patch)
    }

    fn rho_mut(&mut self) -> &mut VolField {
        self.humidity.rho.rho_mut()
    }

    fn rho0(&self) -> &VolField {
        self.humidity.rho.rho0()
    }

    fn correct_rho(&mut self, delta: &VolField) -> ThermoResult<()> {
        self.humidity.rho.correct_rho(delta)
    }

    fn psi(&self) -> &VolField {
        self.humidity.rho.psi()
    }

    fn mu(&self) -> &VolField {
        self.humidity.rho.mu()
    }

    fn mu_patch(&self, patch: PatchId) -> ThermoResult<&[f64]> {
        self.humidity.rho.mu_patch(self.basic.mesh(), patch)
    }

    fn mu_eff(&self) -> &VolField {
        self.humidity.rho.mu_eff()
    }

    fn set_turbulent_viscosity(&mut self, mu_t: &VolField) -> ThermoResult<()> {
        self.humidity.rho.set_turbulent_viscosity(mu_t)
    }
}

impl<Tr: Transport> HumidityThermo for HumidRhoThermo<Tr> {
    fn method(&self) -> SaturationMethod {
        self.humidity.method()
    }

    fn init_with_rel_humidity(&self) -> bool {
        self.humidity.init_with_rel_humidity()
    }

    fn read_method(&mut self) -> ThermoResult<SaturationMethod> {
        self.humidity.read_method(self.basic.dict())
    }

    fn reload(&mut self, dict: ThermoDict) -> ThermoResult<()> {
        self.humidity.read_method(&dict)?;
        self.basic.set_dict(dict);
        Ok(())
    }

    fn read_or_init_specific_humidity(&mut self) -> ClampReport {
        self.humidity
            .read_or_init_specific_humidity(&self.basic, self.fluid.mixture())
    }

    fn relative_humidity(&self) -> &VolField {
        self.humidity.relative_humidity()
    }

    fn relative_humidity_mut(&mut self) -> &mut VolField {
        self.humidity.relative_humidity_mut()
    }

    fn specific_humidity(&self) -> &VolField {
        self.humidity.specific_humidity()
    }

    fn specific_humidity_mut(&mut self) -> &mut VolField {
        self.humidity.specific_humidity_mut()
    }

    fn max_specific_humidity(&self) -> &VolField {
        self.humidity.max_specific_humidity()
    }

    fn water_vapor(&self) -> &VolField {
        self.humidity.water_vapor()
    }

    fn max_water_vapor(&self) -> &VolField {
        self.humidity.max_water_vapor()
    }

    fn water_mass(&self) -> &VolField {
        self.humidity.water_mass()
    }

    fn p_sat_h2o(&self) -> &VolField {
        self.humidity.p_sat()
    }

    fn partial_pressure_h2o(&self) -> &VolField {
        self.humidity.partial_pressure()
    }
}

/// Dry-air density-based model sharing the property contract.
#[derive(Debug, Clone)]
pub struct DryRhoThermo<Tr> {
    basic: BasicThermoState,
    fluid: FluidThermoState<Tr>,
    rho: RhoFields,
}

impl<Tr: Transport> DryRhoThermo<Tr> {
    pub fn new(region: &Region, phase: &str) -> ThermoResult<Self> {
        let basic = BasicThermoState::new(region, phase)?;
        let fluid = FluidThermoState::new(&basic)?;
        let rho = RhoFields::allocate(&basic);
        let mut model = Self { basic, fluid, rho };
        model.correct();
        model.store_old_time();
        info!(
            model = Tr::DRY_MODEL,
            phase = model.basic.phase(),
            cells = model.basic.mesh().n_cells(),
            "constructed thermophysical model"
        );
        Ok(model)
    }

    pub fn fluid(&self) -> &FluidThermoState<Tr> {
        &self.fluid
    }
}

impl<Tr: Transport> BasicThermo for DryRhoThermo<Tr> {
    fn type_name(&self) -> &'static str {
        Tr::DRY_MODEL
    }

    fn phase_name(&self) -> &str {
        self.basic.phase()
    }

    fn mesh(&self) -> &Mesh {
        self.basic.mesh()
    }

    fn t(&self) -> &VolField {
        self.basic.t()
    }

    fn t_mut(&mut self) -> &mut VolField {
        self.basic.t_mut()
    }

    fn p(&self) -> &VolField {
        self.basic.p()
    }

    fn p_mut(&mut self) -> &mut VolField {
        self.basic.p_mut()
    }

    fn correct(&mut self) -> ClampReport {
        self.basic.correct_boundaries();
        let mut report = ClampReport::default();
        let air = *self.fluid.mixture();
        let states: Vec<(f64, f64)> = self
            .basic
            .t()
            .values()
            .zip(self.basic.p().values())
            .map(|(t, p)| {
                let t_c = clamp_finite(t, T_MIN, f64::MAX);
                let p_c = clamp_finite(p, P_MIN, f64::MAX);
                report.temperature += usize::from(t_c != t);
                report.pressure += usize::from(p_c != p);
                (t_c, p_c)
            })
            .collect();

        let transport = self.fluid.transport();
        self.rho.psi.set_values(states.iter().map(|&(t, _)| air.psi(t, 0.0)));
        self.rho.rho.set_values(
            states
                .iter()
                .map(|&(t, p)| air.density(k(t), pa(p), 0.0).get::<kilogram_per_cubic_meter>()),
        );
        self.rho
            .mu
            .set_values(states.iter().map(|&(t, _)| transport.mu(&air, t, 0.0)));
        self.rho.update_mu_eff();
        report
    }

    fn store_old_time(&mut self) {
        self.rho.store_old_time();
    }

    fn snapshot(&self) -> FieldStore {
        let mut store = FieldStore::new();
        self.basic.write(&mut store);
        self.fluid.write(&mut store, &self.basic);
        self.rho.write(&mut store, self.basic.mesh());
        store
    }
}

impl<Tr: Transport> FluidThermo for DryRhoThermo<Tr> {
    fn cp(&self) -> &VolField {
        self.fluid.cp()
    }

    fn cv(&self) -> &VolField {
        self.fluid.cv()
    }

    fn gamma(&self) -> VolField {
        self.fluid.gamma(self.basic.group_name("gamma"))
    }

    fn nu(&self) -> VolField {
        kinematic_viscosity(self.basic.group_name("nu"), self.rho.mu(), self.rho.rho())
    }
}

impl<Tr: Transport> RhoThermo for DryRhoThermo<Tr> {
    fn rho(&self) -> &VolField {
        self.rho.rho()
    }

    fn rho_patch(&self, patch: PatchId) -> ThermoResult<&[f64]> {
        self.rho.rho_patch(self.basic.mesh(), patch)
    }

    fn rho_mut(&mut self) -> &mut VolField {
        self.rho.rho_mut()
    }

    fn rho0(&self) -> &VolField {
        self.rho.rho0()
    }

    fn correct_rho(&mut self, delta: &VolField) -> ThermoResult<()> {
        self.rho.correct_rho(delta)
    }

    fn psi(&self) -> &VolField {
        self.rho.psi()
    }

    fn mu(&self) -> &VolField {
        self.rho.mu()
    }

    fn mu_patch(&self, patch: PatchId) -> ThermoResult<&[f64]> {
        self.rho.mu_patch(self.basic.mesh(), patch)
    }

    fn mu_eff(&self) -> &VolField {
        self.rho.mu_eff()
    }

    fn set_turbulent_viscosity(&mut self, mu_t: &VolField) -> ThermoResult<()> {
        self.rho.set_turbulent_viscosity(mu_t)
    }
}
