//! Transport (viscosity) models for the moist-air constituents.

use ht_config::TransportDef;

use crate::error::{ThermoError, ThermoResult};
use crate::mixture::MoistAir;

/// Viscosity model for dry air and water vapour.
///
/// The mixture value defaults to Wilke's mixing rule over the vapour mole
/// fraction implied by the specific humidity.
pub trait Transport: Clone + Send + Sync + 'static {
    /// Tag of the humid model built on this transport.
    const HUMID_MODEL: &'static str;
    /// Tag of the dry model built on this transport.
    const DRY_MODEL: &'static str;

    fn from_def(def: &TransportDef) -> ThermoResult<Self>;

    /// Dry air dynamic viscosity [kg/(m·s)] at `t` [K].
    fn mu_dry_air(&self, t: f64) -> f64;

    /// Water vapour dynamic viscosity [kg/(m·s)] at `t` [K].
    fn mu_vapour(&self, t: f64) -> f64;

    /// Mixture dynamic viscosity at `t` [K] and specific humidity `q`.
    fn mu(&self, air: &MoistAir, t: f64, q: f64) -> f64 {
        let x_v = air.vapour_mole_fraction(q);
        wilke(
            [self.mu_dry_air(t), self.mu_vapour(t)],
            [air.m_dry, air.m_vapour],
            [1.0 - x_v, x_v],
        )
    }
}

/// Wilke's rule for a binary gas mixture.
fn wilke(mu: [f64; 2], m: [f64; 2], x: [f64; 2]) -> f64 {
    let phi = |i: usize, j: usize| {
        let a = 1.0 + (mu[i] / mu[j]).sqrt() * (m[j] / m[i]).powf(0.25);
        a * a / (8.0 * (1.0 + m[i] / m[j])).sqrt()
    };
    (0..2)
        .filter(|&i| x[i] > 0.0)
        .map(|i| {
            let denom: f64 = (0..2).map(|j| x[j] * phi(i, j)).sum();
            x[i] * mu[i] / denom
        })
        .sum()
}

fn positive(value: f64, what: &'static str) -> ThermoResult<f64> {
    if value.is_finite() && value > 0.0 {
        Ok(value)
    } else {
        Err(ThermoError::NonPhysical { what })
    }
}

/// Sutherland's law `mu = As·sqrt(T)/(1 + Ts/T)` per constituent.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SutherlandTransport {
    pub dry_air: (f64, f64),
    pub vapour: (f64, f64),
}

impl SutherlandTransport {
    fn law((a_s, t_s): (f64, f64), t: f64) -> f64 {
        a_s * t.sqrt() / (1.0 + t_s / t)
    }
}

impl Transport for SutherlandTransport {
    const HUMID_MODEL: &'static str = "humidityRhoThermo";
    const DRY_MODEL: &'static str = "rhoThermo";

    fn from_def(def: &TransportDef) -> ThermoResult<Self> {
        Ok(Self {
            dry_air: (
                positive(def.dry_air_as, "dry air Sutherland As")?,
                positive(def.dry_air_ts, "dry air Sutherland Ts")?,
            ),
            vapour: (
                positive(def.vapour_as, "vapour Sutherland As")?,
                positive(def.vapour_ts, "vapour Sutherland Ts")?,
            ),
        })
    }

    fn mu_dry_air(&self, t: f64) -> f64 {
        Self::law(self.dry_air, t)
    }

    fn mu_vapour(&self, t: f64) -> f64 {
        Self::law(self.vapour, t)
    }
}

/// Temperature-independent viscosity per constituent.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ConstTransport {
    pub mu_dry_air: f64,
    pub mu_vapour: f64,
}

impl Transport for ConstTransport {
    const HUMID_MODEL: &'static str = "constHumidityRhoThermo";
    const DRY_MODEL: &'static str = "constRhoThermo";

    fn from_def(def: &TransportDef) -> ThermoResult<Self> {
        Ok(Self {
            mu_dry_air: positive(def.dry_air_mu, "dry air viscosity")?,
            mu_vapour: positive(def.vapour_mu, "vapour viscosity")?,
        })
    }

    fn mu_dry_air(&self, _t: f64) -> f64 {
        self.mu_dry_air
    }

    fn mu_vapour(&self, _t: f64) -> f64 {
        self.mu_vapour
    }
}
