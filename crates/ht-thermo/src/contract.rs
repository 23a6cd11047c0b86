//! Capability traits every thermophysical model exposes.
//!
//! A model is assembled from layered states (see [`crate::composite`]) and
//! implements these traits by delegation. Solvers only ever see the traits.

use ht_config::{FieldStore, ThermoDict};
use ht_core::PatchId;
use ht_mesh::{Mesh, VolField};

use crate::error::ThermoResult;
use crate::saturation::SaturationMethod;

/// Number of values clamped during one derivation pass, per quantity.
///
/// Clamping is part of normal operation; the report only makes it visible.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ClampReport {
    pub temperature: usize,
    pub pressure: usize,
    pub specific_humidity: usize,
    pub partial_pressure: usize,
    pub water_vapor: usize,
    pub relative_humidity: usize,
}

impl ClampReport {
    pub fn total(&self) -> usize {
        self.temperature
            + self.pressure
            + self.specific_humidity
            + self.partial_pressure
            + self.water_vapor
            + self.relative_humidity
    }

    pub fn is_clean(&self) -> bool {
        self.total() == 0
    }
}

/// Base thermodynamic state: temperature and pressure on a mesh, per phase.
pub trait BasicThermo: Send + Sync {
    /// Registered tag of the concrete model.
    fn type_name(&self) -> &'static str;

    /// Phase this model was built for; empty for the default phase.
    fn phase_name(&self) -> &str;

    fn mesh(&self) -> &Mesh;

    /// Temperature [K]
    fn t(&self) -> &VolField;

    fn t_mut(&mut self) -> &mut VolField;

    /// Pressure [Pa]
    fn p(&self) -> &VolField;

    fn p_mut(&mut self) -> &mut VolField;

    /// Re-derive every dependent field from the current T, p and composition.
    fn correct(&mut self) -> ClampReport;

    /// Start a new time step: the current density becomes the previous one.
    fn store_old_time(&mut self);

    /// Every owned field under its persisted name.
    fn snapshot(&self) -> FieldStore;
}

/// Fluid-specific state: heat capacities and derived ratios.
pub trait FluidThermo {
    /// Heat capacity at constant pressure [J/(kg·K)]
    fn cp(&self) -> &VolField;

    /// Heat capacity at constant volume [J/(kg·K)]
    fn cv(&self) -> &VolField;

    /// Ratio of heat capacities cp/cv.
    fn gamma(&self) -> VolField;

    /// Kinematic viscosity mu/rho [m²/s]
    fn nu(&self) -> VolField;
}

/// Density-based property contract.
///
/// Mutation is only possible through [`RhoThermo::rho_mut`] and
/// [`RhoThermo::correct_rho`]; every other accessor is a read.
pub trait RhoThermo {
    /// Density [kg/m³]
    #[doc(alias = "density")]
    fn rho(&self) -> &VolField;

    /// Density on one boundary patch.
    fn rho_patch(&self, patch: PatchId) -> ThermoResult<&[f64]>;

    /// Live density field for controlled low-level edits (restart, initialization).
    ///
    /// Cell and patch values must be kept consistent by the caller.
    #[doc(alias = "density_mutable")]
    fn rho_mut(&mut self) -> &mut VolField;

    /// Density at the previous time step.
    #[doc(alias = "previous_density")]
    fn rho0(&self) -> &VolField;

    /// Add `delta` to the density, cell and patch values alike.
    #[doc(alias = "correct_density")]
    fn correct_rho(&mut self, delta: &VolField) -> ThermoResult<()>;

    /// Compressibility [s²/m²]
    #[doc(alias = "compressibility")]
    fn psi(&self) -> &VolField;

    /// Dynamic viscosity [kg/(m·s)]
    #[doc(alias = "viscosity")]
    fn mu(&self) -> &VolField;

    /// Dynamic viscosity on one boundary patch.
    fn mu_patch(&self, patch: PatchId) -> ThermoResult<&[f64]>;

    /// Laminar plus turbulent viscosity.
    fn mu_eff(&self) -> &VolField;

    /// Supply the turbulent viscosity added to `mu` in `mu_eff`.
    fn set_turbulent_viscosity(&mut self, mu_t: &VolField) -> ThermoResult<()>;
}

/// Humidity state of moist air.
pub trait HumidityThermo {
    /// Selected saturation / partial-pressure scheme.
    fn method(&self) -> SaturationMethod;

    /// Whether specific humidity is initialized from relative humidity.
    fn init_with_rel_humidity(&self) -> bool;

    /// Re-read the method tag from the model's dictionary.
    ///
    /// On error nothing is changed.
    fn read_method(&mut self) -> ThermoResult<SaturationMethod>;

    /// Replace the dictionary (method, init flag) and re-read it.
    ///
    /// On error nothing is changed.
    fn reload(&mut self, dict: ThermoDict) -> ThermoResult<()>;

    /// Reconcile relative and specific humidity according to
    /// [`HumidityThermo::init_with_rel_humidity`]. Idempotent.
    ///
    /// An out-of-range input is clamped in place and counted.
    fn read_or_init_specific_humidity(&mut self) -> ClampReport;

    /// Relative humidity [-]
    #[doc(alias = "relHum")]
    fn relative_humidity(&self) -> &VolField;

    fn relative_humidity_mut(&mut self) -> &mut VolField;

    /// Specific humidity [kg/kg]
    fn specific_humidity(&self) -> &VolField;

    fn specific_humidity_mut(&mut self) -> &mut VolField;

    fn max_specific_humidity(&self) -> &VolField;

    /// Vapour density [kg/m³]
    fn water_vapor(&self) -> &VolField;

    fn max_water_vapor(&self) -> &VolField;

    /// Vapour mass per cell [kg]
    fn water_mass(&self) -> &VolField;

    /// Saturation pressure [Pa]
    #[doc(alias = "pSatH2O")]
    fn p_sat_h2o(&self) -> &VolField;

    /// Vapour partial pressure [Pa]
    #[doc(alias = "partialPressureH2O")]
    fn partial_pressure_h2o(&self) -> &VolField;
}

/// A complete density-based model without humidity.
pub trait FluidRhoThermo: BasicThermo + FluidThermo + RhoThermo + Send + Sync {}

impl<T> FluidRhoThermo for T where T: BasicThermo + FluidThermo + RhoThermo + Send + Sync {}

/// A complete humidity-aware density-based model.
pub trait HumidityRhoThermo:
    BasicThermo + FluidThermo + RhoThermo + HumidityThermo + Send + Sync
{
}

impl<T> HumidityRhoThermo for T where
    T: BasicThermo + FluidThermo + RhoThermo + HumidityThermo + Send + Sync
{
}
