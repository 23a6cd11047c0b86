//! Model families and their process-wide selection tables.
//!
//! Each family's table is created on first use and seeded with the built-in
//! models, so lookups never depend on registration order.

/// Humidity-aware density-based models.
pub mod humidity_rho_thermo {
    use std::sync::OnceLock;

    use tracing::info;

    use crate::composite::HumidRhoThermo;
    use crate::contract::HumidityRhoThermo;
    use crate::error::ThermoResult;
    use crate::region::{Region, resolve_phase};
    use crate::selection::{Constructor, SelectionTable};
    use crate::transport::{ConstTransport, SutherlandTransport, Transport};

    pub const FAMILY: &str = "humidityRhoThermo";

    fn build<Tr: Transport>(
        region: &Region,
        phase: &str,
    ) -> ThermoResult<Box<dyn HumidityRhoThermo>> {
        Ok(Box::new(HumidRhoThermo::<Tr>::new(region, phase)?))
    }

    /// The family's selection table.
    pub fn table() -> &'static SelectionTable<dyn HumidityRhoThermo> {
        static TABLE: OnceLock<SelectionTable<dyn HumidityRhoThermo>> = OnceLock::new();
        TABLE.get_or_init(|| {
            let builtin: [(&'static str, Constructor<dyn HumidityRhoThermo>); 2] = [
                (SutherlandTransport::HUMID_MODEL, build::<SutherlandTransport>),
                (ConstTransport::HUMID_MODEL, build::<ConstTransport>),
            ];
            SelectionTable::with_entries(FAMILY, builtin)
        })
    }

    /// Register an additional model. Returns `false` if `tag` is taken.
    pub fn register(tag: &str, ctor: Constructor<dyn HumidityRhoThermo>) -> bool {
        table().add(tag, ctor)
    }

    /// Build the model configured for `phase` (`None` is the default phase).
    ///
    /// Every call returns a new, independent model.
    pub fn new(region: &Region, phase: Option<&str>) -> ThermoResult<Box<dyn HumidityRhoThermo>> {
        let phase = resolve_phase(phase);
        let tag = region.model_type(phase)?;
        info!(family = FAMILY, tag, phase, "selecting thermophysical model");
        table().construct(tag, region, phase)
    }
}

/// Density-based models, humid or dry.
pub mod rho_thermo {
    use std::sync::OnceLock;

    use tracing::info;

    use crate::composite::{DryRhoThermo, HumidRhoThermo};
    use crate::contract::FluidRhoThermo;
    use crate::error::ThermoResult;
    use crate::region::{Region, resolve_phase};
    use crate::selection::{Constructor, SelectionTable};
    use crate::transport::{ConstTransport, SutherlandTransport, Transport};

    pub const FAMILY: &str = "rhoThermo";

    fn build_dry<Tr: Transport>(
        region: &Region,
        phase: &str,
    ) -> ThermoResult<Box<dyn FluidRhoThermo>> {
        Ok(Box::new(DryRhoThermo::<Tr>::new(region, phase)?))
    }

    fn build_humid<Tr: Transport>(
        region: &Region,
        phase: &str,
    ) -> ThermoResult<Box<dyn FluidRhoThermo>> {
        Ok(Box::new(HumidRhoThermo::<Tr>::new(region, phase)?))
    }

    /// The family's selection table.
    pub fn table() -> &'static SelectionTable<dyn FluidRhoThermo> {
        static TABLE: OnceLock<SelectionTable<dyn FluidRhoThermo>> = OnceLock::new();
        TABLE.get_or_init(|| {
            let builtin: [(&'static str, Constructor<dyn FluidRhoThermo>); 4] = [
                (SutherlandTransport::DRY_MODEL, build_dry::<SutherlandTransport>),
                (ConstTransport::DRY_MODEL, build_dry::<ConstTransport>),
                (SutherlandTransport::HUMID_MODEL, build_humid::<SutherlandTransport>),
                (ConstTransport::HUMID_MODEL, build_humid::<ConstTransport>),
            ];
            SelectionTable::with_entries(FAMILY, builtin)
        })
    }

    /// Register an additional model. Returns `false` if `tag` is taken.
    pub fn register(tag: &str, ctor: Constructor<dyn FluidRhoThermo>) -> bool {
        table().add(tag, ctor)
    }

    /// Build the model configured for `phase` (`None` is the default phase).
    pub fn new(region: &Region, phase: Option<&str>) -> ThermoResult<Box<dyn FluidRhoThermo>> {
        let phase = resolve_phase(phase);
        let tag = region.model_type(phase)?;
        info!(family = FAMILY, tag, phase, "selecting thermophysical model");
        table().construct(tag, region, phase)
    }
}
