//! Saturation vapour pressure of water over a flat liquid surface.
//!
//! Every scheme maps temperature [K] to saturation pressure [Pa]. Inputs
//! outside a scheme's fitted range are clamped to it first, so the result is
//! always finite and positive.

use std::fmt;
use std::str::FromStr;

use ht_core::clamp_finite;
use ht_core::units::constants::T_ZERO_C;

use crate::error::ThermoError;

/// Evaluation scheme for the saturation and partial pressure of water vapour.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SaturationMethod {
    /// Magnus form with the Alduchov-Eskridge coefficients.
    SimpleSaturation,
    /// Tetens (1930).
    Tetens,
    /// Arden Buck (1981), over water.
    Buck,
    /// Wagner-Pruss saturation line (IAPWS-95 auxiliary equation).
    WagnerPruss,
}

impl SaturationMethod {
    pub const ALL: [SaturationMethod; 4] = [
        SaturationMethod::SimpleSaturation,
        SaturationMethod::Tetens,
        SaturationMethod::Buck,
        SaturationMethod::WagnerPruss,
    ];

    /// Configuration keyword of this method.
    pub fn key(self) -> &'static str {
        match self {
            SaturationMethod::SimpleSaturation => "simpleSaturation",
            SaturationMethod::Tetens => "tetens",
            SaturationMethod::Buck => "buck",
            SaturationMethod::WagnerPruss => "wagnerPruss",
        }
    }

    /// Every accepted configuration keyword.
    pub fn keys() -> Vec<&'static str> {
        Self::ALL.iter().map(|m| m.key()).collect()
    }

    /// Temperature range [K] the scheme is evaluated over.
    pub fn validity(self) -> (f64, f64) {
        match self {
            SaturationMethod::SimpleSaturation => (T_ZERO_C - 40.0, T_ZERO_C + 100.0),
            SaturationMethod::Tetens => (T_ZERO_C, T_ZERO_C + 100.0),
            SaturationMethod::Buck => (T_ZERO_C - 40.0, T_ZERO_C + 100.0),
            SaturationMethod::WagnerPruss => (TRIPLE_T, CRITICAL_T),
        }
    }

    /// Saturation pressure [Pa] at temperature `t` [K].
    pub fn p_sat(self, t: f64) -> f64 {
        let (lo, hi) = self.validity();
        let t = clamp_finite(t, lo, hi);
        let tc = t - T_ZERO_C;
        match self {
            SaturationMethod::SimpleSaturation => 610.94 * (17.625 * tc / (tc + 243.04)).exp(),
            SaturationMethod::Tetens => 610.78 * (17.27 * tc / (tc + 237.3)).exp(),
            SaturationMethod::Buck => {
                611.21 * ((18.678 - tc / 234.5) * (tc / (257.14 + tc))).exp()
            }
            SaturationMethod::WagnerPruss => wagner_pruss(t),
        }
    }
}

const CRITICAL_T: f64 = 647.096;
const CRITICAL_P: f64 = 22.064e6;
const TRIPLE_T: f64 = 273.16;
const WP_COEFFS: [f64; 6] = [
    -7.859_517_83,
    1.844_082_59,
    -11.786_649_7,
    22.680_741_1,
    -15.961_871_9,
    1.801_225_02,
];

fn wagner_pruss(t: f64) -> f64 {
    let theta = 1.0 - t / CRITICAL_T;
    let [a1, a2, a3, a4, a5, a6] = WP_COEFFS;
    let sum = a1 * theta
        + a2 * theta.powf(1.5)
        + a3 * theta.powi(3)
        + a4 * theta.powf(3.5)
        + a5 * theta.powi(4)
        + a6 * theta.powf(7.5);
    CRITICAL_P * (CRITICAL_T / t * sum).exp()
}

impl fmt::Display for SaturationMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for SaturationMethod {
    type Err = ThermoError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .iter()
            .copied()
            .find(|m| m.key() == s)
            .ok_or_else(|| ThermoError::InvalidMethod {
                method: s.to_string(),
                valid: Self::keys(),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rel_close(a: f64, b: f64, rel: f64) -> bool {
        (a - b).abs() <= rel * b.abs()
    }

    #[test]
    fn parse_known_keys() {
        for m in SaturationMethod::ALL {
            assert_eq!(m.key().parse::<SaturationMethod>().unwrap(), m);
        }
    }

    #[test]
    fn parse_unknown_key_lists_valid() {
        let err = "magic".parse::<SaturationMethod>().unwrap_err();
        match err {
            ThermoError::InvalidMethod { method, valid } => {
                assert_eq!(method, "magic");
                assert_eq!(valid.len(), 4);
                assert!(valid.contains(&"simpleSaturation"));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn reference_values_at_20c() {
        // Tabulated saturation pressure at 20 °C is about 2339 Pa.
        let t = T_ZERO_C + 20.0;
        for m in SaturationMethod::ALL {
            assert!(rel_close(m.p_sat(t), 2339.0, 0.01), "{m}: {}", m.p_sat(t));
        }
    }

    #[test]
    fn boiling_point_is_near_one_atmosphere() {
        let p = SaturationMethod::WagnerPruss.p_sat(373.124);
        assert!(rel_close(p, 101_325.0, 1e-3), "{p}");
    }

    #[test]
    fn out_of_range_temperature_is_clamped() {
        let m = SaturationMethod::Tetens;
        assert_eq!(m.p_sat(100.0), m.p_sat(T_ZERO_C));
        assert_eq!(m.p_sat(f64::NAN), m.p_sat(T_ZERO_C));
        assert_eq!(m.p_sat(900.0), m.p_sat(T_ZERO_C + 100.0));
    }
}
