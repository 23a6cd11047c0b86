//! Humidity layer: water vapour state of moist air and the density-based
//! fields derived from it.
//!
//! Derivation runs value by value (every cell, then every patch face) in a
//! fixed order:
//!
//! 1. temperature and pressure are bounded below by [`T_MIN`] and [`P_MIN`];
//! 2. the saturation pressure comes from the selected [`SaturationMethod`];
//! 3. the vapour partial pressure is capped at `min(pSat, p)`, which fixes
//!    `maxSpecificHumidity` and `maxWaterVapor`;
//! 4. specific humidity and vapour density follow from the capped partial
//!    pressure and are clamped into `[0, max]`;
//! 5. relative humidity, compressibility, density and viscosity are
//!    evaluated from the clamped state.
//!
//! Out-of-range inputs are never errors. They are clamped and counted in a
//! [`ClampReport`].

use ht_config::{FieldStore, ThermoDict};
use ht_core::{Tolerances, clamp_finite, nearly_equal};
use ht_mesh::VolField;
use tracing::{debug, warn};

use crate::basic::BasicThermoState;
use crate::contract::ClampReport;
use crate::error::{ThermoError, ThermoResult};
use crate::fluid::FluidThermoState;
use crate::io::write_field;
use crate::mixture::MoistAir;
use crate::rho::RhoFields;
use crate::saturation::SaturationMethod;
use crate::transport::Transport;

/// Lowest temperature [K] used in derivation.
pub const T_MIN: f64 = 1.0;
/// Lowest pressure [Pa] used in derivation.
pub const P_MIN: f64 = 1.0;

/// Moist-air state at a single cell or face, after clamping.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MoistState {
    pub t: f64,
    pub p: f64,
    pub p_sat: f64,
    pub partial_pressure: f64,
    pub specific_humidity: f64,
    pub max_specific_humidity: f64,
    pub water_vapor: f64,
    pub max_water_vapor: f64,
    pub relative_humidity: f64,
    pub psi: f64,
}

/// Saturation limits at one (T, p).
struct Limits {
    t: f64,
    p: f64,
    p_sat: f64,
    max_partial_pressure: f64,
    max_specific_humidity: f64,
    max_water_vapor: f64,
}

impl Limits {
    fn new(
        air: &MoistAir,
        method: SaturationMethod,
        t: f64,
        p: f64,
        report: &mut ClampReport,
    ) -> Self {
        let t_c = clamp_finite(t, T_MIN, f64::MAX);
        if t_c != t {
            report.temperature += 1;
        }
        let p_c = clamp_finite(p, P_MIN, f64::MAX);
        if p_c != p {
            report.pressure += 1;
        }
        let p_sat = method.p_sat(t_c);
        let max_partial_pressure = p_sat.min(p_c);
        Self {
            t: t_c,
            p: p_c,
            p_sat,
            max_partial_pressure,
            max_specific_humidity: air.specific_humidity(max_partial_pressure, p_c),
            max_water_vapor: air.vapour_density(max_partial_pressure, t_c),
        }
    }

    /// Cap a partial pressure, counting caps beyond round-off.
    fn cap(&self, pv: f64, report: &mut ClampReport) -> f64 {
        if pv > self.max_partial_pressure {
            if !nearly_equal(pv, self.max_partial_pressure, Tolerances::default()) {
                report.partial_pressure += 1;
            }
            self.max_partial_pressure
        } else {
            pv
        }
    }

    fn finish(&self, air: &MoistAir, pv: f64, q: f64, report: &mut ClampReport) -> MoistState {
        let raw_vapor = air.vapour_density(pv, self.t);
        let water_vapor = clamp_finite(raw_vapor, 0.0, self.max_water_vapor);
        if water_vapor != raw_vapor {
            report.water_vapor += 1;
        }
        let relative_humidity = if self.p_sat > 0.0 {
            clamp_finite(pv / self.p_sat, 0.0, 1.0)
        } else {
            0.0
        };
        MoistState {
            t: self.t,
            p: self.p,
            p_sat: self.p_sat,
            partial_pressure: pv,
            specific_humidity: q,
            max_specific_humidity: self.max_specific_humidity,
            water_vapor,
            max_water_vapor: self.max_water_vapor,
            relative_humidity,
            psi: air.psi(self.t, q),
        }
    }
}

impl MoistState {
    /// State from a (possibly out-of-range) specific humidity.
    pub fn from_specific_humidity(
        air: &MoistAir,
        method: SaturationMethod,
        t: f64,
        p: f64,
        q: f64,
        report: &mut ClampReport,
    ) -> Self {
        let limits = Limits::new(air, method, t, p, report);
        let q0 = clamp_finite(q, 0.0, 1.0);
        let raw_pv = air.partial_pressure(q0, limits.p);
        let pv = limits.cap(raw_pv, report);
        let q_c = if pv < raw_pv {
            limits.max_specific_humidity
        } else {
            clamp_finite(q0, 0.0, limits.max_specific_humidity)
        };
        if q_c != q && !nearly_equal(q_c, q, Tolerances::default()) {
            report.specific_humidity += 1;
        }
        limits.finish(air, pv, q_c, report)
    }

    /// State from a (possibly out-of-range) relative humidity.
    pub fn from_relative_humidity(
        air: &MoistAir,
        method: SaturationMethod,
        t: f64,
        p: f64,
        phi: f64,
        report: &mut ClampReport,
    ) -> Self {
        let limits = Limits::new(air, method, t, p, report);
        let phi_c = clamp_finite(phi, 0.0, 1.0);
        if phi_c != phi {
            report.relative_humidity += 1;
        }
        let pv = limits.cap(phi_c * limits.p_sat, report);
        let q = clamp_finite(
            air.specific_humidity(pv, limits.p),
            0.0,
            limits.max_specific_humidity,
        );
        limits.finish(air, pv, q, report)
    }
}

/// Method configured in `dict`. An unset method is invalid.
pub fn method_from_dict(dict: &ThermoDict) -> ThermoResult<SaturationMethod> {
    match dict.method.as_deref() {
        Some(method) => method.parse(),
        None => Err(ThermoError::InvalidMethod {
            method: String::new(),
            valid: SaturationMethod::keys(),
        }),
    }
}

/// Humidity fields plus the density-based fields they drive.
#[derive(Debug, Clone)]
pub struct HumidityThermoState {
    method: SaturationMethod,
    init_with_rel_humidity: bool,
    pub(crate) rho: RhoFields,
    rel_hum: VolField,
    specific_humidity: VolField,
    max_specific_humidity: VolField,
    water_vapor: VolField,
    max_water_vapor: VolField,
    water_mass: VolField,
    p_sat: VolField,
    partial_pressure: VolField,
    volume: VolField,
}

impl HumidityThermoState {
    /// Layer the humidity state on the base and fluid states.
    ///
    /// Reads `relHum` when initializing from relative humidity, otherwise
    /// `specificHumidity`; the other one is optional. Every field is
    /// allocated and humidity is reconciled before this returns.
    pub fn new<Tr: Transport>(
        basic: &BasicThermoState,
        fluid: &FluidThermoState<Tr>,
    ) -> ThermoResult<Self> {
        let method = method_from_dict(basic.dict())?;
        let init_with_rel_humidity = basic.dict().init_with_rel_humidity;
        let rel_name = basic.group_name("relHum");
        let q_name = basic.group_name("specificHumidity");

        let (rel_hum, specific_humidity) = if init_with_rel_humidity {
            let rel_hum = basic.require("relHum")?;
            let q = match basic.lookup("specificHumidity")? {
                Some(q) => q,
                None => rel_hum.renamed(&q_name),
            };
            (rel_hum, q)
        } else {
            let q = basic.require("specificHumidity")?;
            let rel_hum = match basic.lookup("relHum")? {
                Some(rel_hum) => rel_hum,
                None => q.derived(&rel_name),
            };
            (rel_hum, q)
        };

        let mesh = basic.mesh();
        let calculated = |name: &str| VolField::calculated(basic.group_name(name), mesh, 0.0);
        let mut state = Self {
            method,
            init_with_rel_humidity,
            rho: RhoFields::allocate(basic),
            rel_hum,
            specific_humidity,
            max_specific_humidity: calculated("maxSpecificHumidity"),
            water_vapor: calculated("waterVapor"),
            max_water_vapor: calculated("maxWaterVapor"),
            water_mass: calculated("waterMass"),
            p_sat: calculated("pSatH2O"),
            partial_pressure: calculated("partialPressureH2O"),
            volume: VolField::cell_volumes(mesh),
        };
        state.read_or_init_specific_humidity(basic, fluid.mixture());
        Ok(state)
    }

    pub fn method(&self) -> SaturationMethod {
        self.method
    }

    pub fn init_with_rel_humidity(&self) -> bool {
        self.init_with_rel_humidity
    }

    /// Re-read method and init flag from `dict`; unchanged on error.
    pub fn read_method(&mut self, dict: &ThermoDict) -> ThermoResult<SaturationMethod> {
        let method = method_from_dict(dict)?;
        if method != self.method {
            debug!(from = %self.method, to = %method, "saturation method changed");
        }
        self.method = method;
        self.init_with_rel_humidity = dict.init_with_rel_humidity;
        Ok(method)
    }

    /// Reconcile `specificHumidity` and `relHum`.
    ///
    /// From relative humidity: `relHum` is the input and is only clamped
    /// into `[0, 1]`, `specificHumidity` follows from it. Otherwise
    /// `specificHumidity` is clamped in place and `relHum` is derived from it.
    pub fn read_or_init_specific_humidity(
        &mut self,
        basic: &BasicThermoState,
        air: &MoistAir,
    ) -> ClampReport {
        let mesh = basic.mesh();
        let mut report = ClampReport::default();
        let states: Vec<MoistState> = if self.init_with_rel_humidity {
            self.rel_hum.correct_boundary_conditions(mesh);
            evaluate(basic, &self.rel_hum, |t, p, phi| {
                MoistState::from_relative_humidity(air, self.method, t, p, phi, &mut report)
            })
        } else {
            self.specific_humidity.correct_boundary_conditions(mesh);
            evaluate(basic, &self.specific_humidity, |t, p, q| {
                MoistState::from_specific_humidity(air, self.method, t, p, q, &mut report)
            })
        };
        self.store_humidity(&states, !self.init_with_rel_humidity);
        if self.init_with_rel_humidity {
            self.rel_hum.apply(|phi| clamp_finite(phi, 0.0, 1.0));
        }
        log_report("humidity initialization", basic.phase(), &report);
        report
    }

    /// Re-derive humidity, heat capacities, compressibility, density and
    /// viscosity from the current T, p and specific humidity.
    pub fn correct<Tr: Transport>(
        &mut self,
        basic: &mut BasicThermoState,
        fluid: &mut FluidThermoState<Tr>,
    ) -> ClampReport {
        basic.correct_boundaries();
        self.specific_humidity.correct_boundary_conditions(basic.mesh());

        let air = *fluid.mixture();
        let mut report = ClampReport::default();
        let states = evaluate(basic, &self.specific_humidity, |t, p, q| {
            MoistState::from_specific_humidity(&air, self.method, t, p, q, &mut report)
        });
        self.store_humidity(&states, true);
        fluid.update(&self.specific_humidity);

        let transport = fluid.transport();
        let rho = &mut self.rho;
        rho.psi.set_values(states.iter().map(|s| s.psi));
        rho.rho.set_values(states.iter().map(|s| s.psi * s.p));
        rho.mu
            .set_values(states.iter().map(|s| transport.mu(&air, s.t, s.specific_humidity)));
        rho.update_mu_eff();

        log_report("correct", basic.phase(), &report);
        report
    }

    fn store_humidity(&mut self, states: &[MoistState], write_rel_hum: bool) {
        let each = |f: fn(&MoistState) -> f64| states.iter().map(f);
        self.specific_humidity.set_values(each(|s| s.specific_humidity));
        self.max_specific_humidity.set_values(each(|s| s.max_specific_humidity));
        self.water_vapor.set_values(each(|s| s.water_vapor));
        self.max_water_vapor.set_values(each(|s| s.max_water_vapor));
        self.p_sat.set_values(each(|s| s.p_sat));
        self.partial_pressure.set_values(each(|s| s.partial_pressure));
        self.water_mass.set_values(
            states
                .iter()
                .zip(self.volume.values())
                .map(|(s, v)| s.water_vapor * v),
        );
        if write_rel_hum {
            self.rel_hum.set_values(each(|s| s.relative_humidity));
        }
    }

    pub fn relative_humidity(&self) -> &VolField {
        &self.rel_hum
    }

    pub fn relative_humidity_mut(&mut self) -> &mut VolField {
        &mut self.rel_hum
    }

    pub fn specific_humidity(&self) -> &VolField {
        &self.specific_humidity
    }

    pub fn specific_humidity_mut(&mut self) -> &mut VolField {
        &mut self.specific_humidity
    }

    pub fn max_specific_humidity(&self) -> &VolField {
        &self.max_specific_humidity
    }

    pub fn water_vapor(&self) -> &VolField {
        &self.water_vapor
    }

    pub fn max_water_vapor(&self) -> &VolField {
        &self.max_water_vapor
    }

    pub fn water_mass(&self) -> &VolField {
        &self.water_mass
    }

    pub fn p_sat(&self) -> &VolField {
        &self.p_sat
    }

    pub fn partial_pressure(&self) -> &VolField {
        &self.partial_pressure
    }

    pub fn write(&self, store: &mut FieldStore, basic: &BasicThermoState) {
        let mesh = basic.mesh();
        self.rho.write(store, mesh);
        for field in [
            &self.rel_hum,
            &self.specific_humidity,
            &self.max_specific_humidity,
            &self.water_vapor,
            &self.max_water_vapor,
            &self.water_mass,
            &self.p_sat,
            &self.partial_pressure,
        ] {
            write_field(store, mesh, field);
        }
    }
}

/// Evaluate `f(T, p, x)` over every value of `x`, in `VolField::values` order.
fn evaluate(
    basic: &BasicThermoState,
    x: &VolField,
    mut f: impl FnMut(f64, f64, f64) -> MoistState,
) -> Vec<MoistState> {
    basic
        .t()
        .values()
        .zip(basic.p().values())
        .zip(x.values())
        .map(|((t, p), x)| f(t, p, x))
        .collect()
}

fn log_report(stage: &'static str, phase: &str, report: &ClampReport) {
    if report.is_clean() {
        debug!(stage, phase, "humidity state within bounds");
    } else {
        warn!(
            stage,
            phase,
            temperature = report.temperature,
            pressure = report.pressure,
            specific_humidity = report.specific_humidity,
            partial_pressure = report.partial_pressure,
            water_vapor = report.water_vapor,
            relative_humidity = report.relative_humidity,
            "clamped out-of-range humidity state"
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const METHOD: SaturationMethod = SaturationMethod::SimpleSaturation;

    fn from_q(t: f64, p: f64, q: f64, report: &mut ClampReport) -> MoistState {
        MoistState::from_specific_humidity(&MoistAir::default(), METHOD, t, p, q, report)
    }

    fn from_phi(t: f64, p: f64, phi: f64, report: &mut ClampReport) -> MoistState {
        MoistState::from_relative_humidity(&MoistAir::default(), METHOD, t, p, phi, report)
    }

    #[test]
    fn half_saturated_air() {
        let mut report = ClampReport::default();
        let s = from_phi(293.15, 101_325.0, 0.5, &mut report);
        assert!(report.is_clean());
        assert!(s.partial_pressure < s.p_sat);
        assert!(s.specific_humidity > 0.0 && s.specific_humidity < s.max_specific_humidity);
        assert!((s.relative_humidity - 0.5).abs() < 1e-12);
        // About 7.2 g/kg at 20 °C and 50 %.
        assert!((s.specific_humidity - 7.2e-3).abs() < 1e-4, "{}", s.specific_humidity);
    }

    #[test]
    fn over_saturated_specific_humidity_is_clamped() {
        let mut report = ClampReport::default();
        let s = from_q(293.15, 101_325.0, 0.05, &mut report);
        assert_eq!(s.specific_humidity, s.max_specific_humidity);
        assert_eq!(s.partial_pressure, s.p_sat);
        assert_eq!(s.water_vapor, s.max_water_vapor);
        assert_eq!(s.relative_humidity, 1.0);
        assert_eq!(report.specific_humidity, 1);
        assert_eq!(report.partial_pressure, 1);
    }

    #[test]
    fn negative_and_nan_inputs_are_clamped() {
        let mut report = ClampReport::default();
        let s = from_q(f64::NAN, -5.0, -0.1, &mut report);
        assert_eq!(s.t, T_MIN);
        assert_eq!(s.p, P_MIN);
        assert_eq!(s.specific_humidity, 0.0);
        assert_eq!(report.temperature, 1);
        assert_eq!(report.pressure, 1);
        assert_eq!(report.specific_humidity, 1);
        assert!(s.psi.is_finite());
    }

    #[test]
    fn out_of_range_relative_humidity_is_counted() {
        let mut report = ClampReport::default();
        let s = from_phi(293.15, 101_325.0, 1.7, &mut report);
        assert_eq!(s.relative_humidity, 1.0);
        assert_eq!(s.specific_humidity, s.max_specific_humidity);
        assert_eq!(report.relative_humidity, 1);

        from_phi(293.15, 101_325.0, f64::NAN, &mut report);
        from_phi(293.15, 101_325.0, -0.2, &mut report);
        assert_eq!(report.relative_humidity, 3);

        let mut clean = ClampReport::default();
        from_phi(293.15, 101_325.0, 1.0, &mut clean);
        assert!(clean.is_clean());
    }

    #[test]
    fn boiling_caps_partial_pressure_at_total_pressure() {
        let mut report = ClampReport::default();
        let s = from_phi(370.0, 50_000.0, 1.0, &mut report);
        assert!(s.p_sat > 50_000.0);
        assert_eq!(s.partial_pressure, 50_000.0);
        assert!(s.specific_humidity <= s.max_specific_humidity);
        assert_eq!(report.partial_pressure, 1);
    }

    #[test]
    fn unset_method_is_invalid() {
        let err = method_from_dict(&ThermoDict::default()).unwrap_err();
        assert!(matches!(err, ThermoError::InvalidMethod { ref method, .. } if method.is_empty()));
    }
}

#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    fn check(s: &MoistState) -> Result<(), TestCaseError> {
        prop_assert!(s.specific_humidity >= 0.0);
        prop_assert!(s.specific_humidity <= s.max_specific_humidity);
        prop_assert!(s.water_vapor >= 0.0);
        prop_assert!(s.water_vapor <= s.max_water_vapor);
        prop_assert!(s.partial_pressure <= s.p_sat);
        prop_assert!((0.0..=1.0).contains(&s.relative_humidity));
        prop_assert!(s.psi.is_finite() && s.psi > 0.0);
        Ok(())
    }

    proptest! {
        #[test]
        fn bounds_hold_for_any_specific_humidity(
            t in -100.0..800.0f64,
            p in -1.0e3..1.0e7f64,
            q in -1.0..2.0f64,
            m in 0usize..4,
        ) {
            let mut report = ClampReport::default();
            let s = MoistState::from_specific_humidity(
                &MoistAir::default(), SaturationMethod::ALL[m], t, p, q, &mut report,
            );
            check(&s)?;
        }

        #[test]
        fn bounds_hold_for_any_relative_humidity(
            t in -100.0..800.0f64,
            p in -1.0e3..1.0e7f64,
            phi in -1.0..3.0f64,
            m in 0usize..4,
        ) {
            let mut report = ClampReport::default();
            let s = MoistState::from_relative_humidity(
                &MoistAir::default(), SaturationMethod::ALL[m], t, p, phi, &mut report,
            );
            check(&s)?;
        }
    }
}
