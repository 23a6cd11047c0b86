//! ht-thermo: humidity-aware thermophysical property models for humitherm.
//!
//! Provides:
//! - Capability traits (`BasicThermo`, `FluidThermo`, `RhoThermo`, `HumidityThermo`)
//! - Layered model states (base, fluid, density, humidity) and the models assembled from them
//! - Saturation-pressure methods, the moist-air mixture and transport models
//! - Run-time selection tables keyed by the configured model type
//!
//! # Architecture
//!
//! Solvers ask a model family for a model (`humidity_rho_thermo::new`) and then
//! only talk to it through the traits. A model owns one base state (T, p);
//! the fluid and humidity layers are built on top of it in that order.
//! Derivation never fails on out-of-range physics: values are clamped and the
//! clamps are counted in a `ClampReport`.
//!
//! # Example
//!
//! ```
//! use ht_config::{CaseConfig, FieldData, ThermoDict};
//! use ht_mesh::MeshBuilder;
//! use ht_thermo::{BasicThermo, HumidityThermo, Region, RhoThermo, humidity_rho_thermo};
//!
//! let mut case = CaseConfig::new("demo");
//! case.thermo = Some(ThermoDict {
//!     model_type: Some("humidityRhoThermo".into()),
//!     method: Some("simpleSaturation".into()),
//!     init_with_rel_humidity: true,
//!     ..ThermoDict::default()
//! });
//! case.fields.insert("T".into(), FieldData::uniform(293.15));
//! case.fields.insert("p".into(), FieldData::uniform(101_325.0));
//! case.fields.insert("relHum".into(), FieldData::uniform(0.5));
//!
//! let region = Region::new(MeshBuilder::uniform(4, 1e-3).build().unwrap(), case);
//! let mut thermo = humidity_rho_thermo::new(&region, None).unwrap();
//!
//! let report = thermo.correct();
//! assert!(report.is_clean());
//! assert!(thermo.rho().internal()[0] > 1.1);
//! assert!(thermo.partial_pressure_h2o().internal()[0] < thermo.p_sat_h2o().internal()[0]);
//! ```

pub mod basic;
pub mod composite;
pub mod contract;
pub mod error;
pub mod fluid;
pub mod humidity;
pub mod io;
pub mod mixture;
pub mod region;
pub mod registry;
pub mod rho;
pub mod saturation;
pub mod selection;
pub mod transport;

// Re-exports for ergonomics
pub use basic::BasicThermoState;
pub use composite::{
    ConstHumidRhoThermo, DryRhoThermo, HumidRhoThermo, SutherlandHumidRhoThermo,
};
pub use contract::{
    BasicThermo, ClampReport, FluidRhoThermo, FluidThermo, HumidityRhoThermo, HumidityThermo,
    RhoThermo,
};
pub use error::{ThermoError, ThermoResult};
pub use fluid::FluidThermoState;
pub use humidity::{HumidityThermoState, MoistState};
pub use mixture::MoistAir;
pub use region::{Region, group_name, mesh_from_def, resolve_phase};
pub use registry::{humidity_rho_thermo, rho_thermo};
pub use rho::RhoFields;
pub use saturation::SaturationMethod;
pub use selection::{Constructor, SelectionTable};
pub use transport::{ConstTransport, SutherlandTransport, Transport};
