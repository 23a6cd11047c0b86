//! SI quantities (uom, f64) for single-state evaluations, plus the physical
//! constants the property models share.
//!
//! Fields store plain `f64` values in SI base units; these types are used at
//! API edges where a unit mix-up would be silent.

use uom::si::f64::{MassDensity, Pressure as UomPressure, ThermodynamicTemperature};

pub type Density = MassDensity;
pub type Pressure = UomPressure;
pub type Temperature = ThermodynamicTemperature;

#[inline]
pub fn pa(v: f64) -> Pressure {
    use uom::si::pressure::pascal;
    Pressure::new::<pascal>(v)
}

#[inline]
pub fn k(v: f64) -> Temperature {
    use uom::si::thermodynamic_temperature::kelvin;
    Temperature::new::<kelvin>(v)
}

#[inline]
pub fn kgpm3(v: f64) -> Density {
    use uom::si::mass_density::kilogram_per_cubic_meter;
    Density::new::<kilogram_per_cubic_meter>(v)
}

pub mod constants {
    /// Universal gas constant [J/(kmol·K)]
    pub const R_UNIVERSAL: f64 = 8314.462618;

    /// 0 °C in kelvin
    pub const T_ZERO_C: f64 = 273.15;

    /// Standard atmosphere [Pa]
    pub const P_STD: f64 = 101_325.0;
}
