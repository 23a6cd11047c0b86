//! Moist air as an ideal-gas mixture of dry air and water vapour.

use ht_config::MixtureDef;
use ht_core::units::constants::R_UNIVERSAL;
use ht_core::units::{Density, Pressure, Temperature, kgpm3};
use uom::si::pressure::pascal;
use uom::si::thermodynamic_temperature::kelvin;

use crate::error::{ThermoError, ThermoResult};

/// Mixture constants, resolved once from the dictionary.
///
/// Specific humidity `q` is the vapour mass fraction of the mixture [kg/kg].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MoistAir {
    /// Dry air molar mass [kg/kmol]
    pub m_dry: f64,
    /// Vapour molar mass [kg/kmol]
    pub m_vapour: f64,
    /// Dry air gas constant [J/(kg·K)]
    pub r_dry: f64,
    /// Vapour gas constant [J/(kg·K)]
    pub r_vapour: f64,
    pub cp_dry: f64,
    pub cp_vapour: f64,
}

impl MoistAir {
    pub fn from_def(def: &MixtureDef) -> ThermoResult<Self> {
        for (value, what) in [
            (def.dry_air_molar_mass, "dry air molar mass"),
            (def.vapour_molar_mass, "vapour molar mass"),
            (def.dry_air_cp, "dry air cp"),
            (def.vapour_cp, "vapour cp"),
        ] {
            if !value.is_finite() || value <= 0.0 {
                return Err(ThermoError::NonPhysical { what });
            }
        }
        Ok(Self {
            m_dry: def.dry_air_molar_mass,
            m_vapour: def.vapour_molar_mass,
            r_dry: R_UNIVERSAL / def.dry_air_molar_mass,
            r_vapour: R_UNIVERSAL / def.vapour_molar_mass,
            cp_dry: def.dry_air_cp,
            cp_vapour: def.vapour_cp,
        })
    }

    /// Molar mass ratio vapour/dry air (about 0.622).
    pub fn epsilon(&self) -> f64 {
        self.m_vapour / self.m_dry
    }

    /// Specific humidity from vapour partial pressure `pv` at total pressure `p`.
    pub fn specific_humidity(&self, pv: f64, p: f64) -> f64 {
        let eps = self.epsilon();
        eps * pv / (p - (1.0 - eps) * pv)
    }

    /// Vapour partial pressure from specific humidity `q` at total pressure `p`.
    pub fn partial_pressure(&self, q: f64, p: f64) -> f64 {
        let eps = self.epsilon();
        q * p / (eps + (1.0 - eps) * q)
    }

    /// Vapour density [kg/m³] at partial pressure `pv`.
    pub fn vapour_density(&self, pv: f64, t: f64) -> f64 {
        pv / (self.r_vapour * t)
    }

    /// Mixture gas constant [J/(kg·K)].
    pub fn gas_constant(&self, q: f64) -> f64 {
        (1.0 - q) * self.r_dry + q * self.r_vapour
    }

    /// Compressibility `psi = rho/p` [s²/m²].
    pub fn psi(&self, t: f64, q: f64) -> f64 {
        1.0 / (self.gas_constant(q) * t)
    }

    pub fn cp(&self, q: f64) -> f64 {
        (1.0 - q) * self.cp_dry + q * self.cp_vapour
    }

    pub fn cv(&self, q: f64) -> f64 {
        self.cp(q) - self.gas_constant(q)
    }

    /// Vapour mole fraction for specific humidity `q`.
    pub fn vapour_mole_fraction(&self, q: f64) -> f64 {
        let n_vapour = q / self.m_vapour;
        let n_dry = (1.0 - q) / self.m_dry;
        let n = n_vapour + n_dry;
        if n > 0.0 { n_vapour / n } else { 0.0 }
    }

    /// Mixture density at a single state.
    pub fn density(&self, t: Temperature, p: Pressure, q: f64) -> Density {
        kgpm3(self.psi(t.get::<kelvin>(), q) * p.get::<pascal>())
    }
}

impl Default for MoistAir {
    fn default() -> Self {
        let def = MixtureDef::default();
        Self {
            m_dry: def.dry_air_molar_mass,
            m_vapour: def.vapour_molar_mass,
            r_dry: R_UNIVERSAL / def.dry_air_molar_mass,
            r_vapour: R_UNIVERSAL / def.vapour_molar_mass,
            cp_dry: def.dry_air_cp,
            cp_vapour: def.vapour_cp,
        }
    }
}
