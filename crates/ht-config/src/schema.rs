//! Case file schema definitions.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Initial / persisted field state, keyed by grouped field name (`T`, `relHum.air`, ...).
pub type FieldStore = BTreeMap<String, FieldData>;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CaseConfig {
    pub version: u32,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mesh: Option<MeshDef>,
    /// Dictionary of the default (unnamed) phase.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub thermo: Option<ThermoDict>,
    /// Dictionaries of named phases.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub phases: BTreeMap<String, ThermoDict>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub fields: FieldStore,
}

impl CaseConfig {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            version: crate::LATEST_VERSION,
            name: name.into(),
            mesh: None,
            thermo: None,
            phases: BTreeMap::new(),
            fields: FieldStore::new(),
        }
    }

    /// Resolve the thermo dictionary of a phase.
    ///
    /// The empty name is the default phase and maps to the top-level `thermo`
    /// entry; any other name maps to `phases[name]`.
    pub fn thermo_dict(&self, phase: &str) -> Option<&ThermoDict> {
        if phase.is_empty() {
            self.thermo.as_ref()
        } else {
            self.phases.get(phase)
        }
    }

    /// Names of every configured phase, default phase first as `""`.
    pub fn phase_names(&self) -> Vec<&str> {
        self.thermo
            .iter()
            .map(|_| "")
            .chain(self.phases.keys().map(String::as_str))
            .collect()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MeshDef {
    pub cells: usize,
    #[serde(default = "default_cell_volume")]
    pub cell_volume: f64,
    #[serde(default)]
    pub patches: Vec<PatchDef>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PatchDef {
    pub name: String,
    #[serde(default)]
    pub face_cells: Vec<usize>,
}

fn default_cell_volume() -> f64 {
    1.0
}

/// Per-phase thermophysical dictionary.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct ThermoDict {
    /// Model variant tag used by the run-time selection tables.
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub model_type: Option<String>,
    /// Saturation / partial-pressure evaluation scheme.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub method: Option<String>,
    /// Initialize specific humidity from the relative humidity field.
    #[serde(
        rename = "initWithRelHumidity",
        alias = "initByRelativeHumidity",
        default
    )]
    pub init_with_rel_humidity: bool,
    #[serde(default)]
    pub mixture: MixtureDef,
    #[serde(default)]
    pub transport: TransportDef,
    /// Field values supplied with the dictionary itself.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub fields: FieldStore,
}

/// Moist-air mixture constants.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MixtureDef {
    /// Dry air molar mass [kg/kmol]
    #[serde(default = "default_dry_air_molar_mass")]
    pub dry_air_molar_mass: f64,
    /// Water vapour molar mass [kg/kmol]
    #[serde(default = "default_vapour_molar_mass")]
    pub vapour_molar_mass: f64,
    /// Dry air cp [J/(kg·K)]
    #[serde(default = "default_dry_air_cp")]
    pub dry_air_cp: f64,
    /// Water vapour cp [J/(kg·K)]
    #[serde(default = "default_vapour_cp")]
    pub vapour_cp: f64,
}

impl Default for MixtureDef {
    fn default() -> Self {
        Self {
            dry_air_molar_mass: default_dry_air_molar_mass(),
            vapour_molar_mass: default_vapour_molar_mass(),
            dry_air_cp: default_dry_air_cp(),
            vapour_cp: default_vapour_cp(),
        }
    }
}

fn default_dry_air_molar_mass() -> f64 {
    28.9647
}

fn default_vapour_molar_mass() -> f64 {
    18.01528
}

fn default_dry_air_cp() -> f64 {
    1006.0
}

fn default_vapour_cp() -> f64 {
    1860.0
}

/// Transport coefficients for both constituents.
///
/// Sutherland models read `*_as`/`*_ts`, constant models read `*_mu`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TransportDef {
    #[serde(default = "default_dry_air_as")]
    pub dry_air_as: f64,
    #[serde(default = "default_dry_air_ts")]
    pub dry_air_ts: f64,
    #[serde(default = "default_vapour_as")]
    pub vapour_as: f64,
    #[serde(default = "default_vapour_ts")]
    pub vapour_ts: f64,
    #[serde(default = "default_dry_air_mu")]
    pub dry_air_mu: f64,
    #[serde(default = "default_vapour_mu")]
    pub vapour_mu: f64,
}

impl Default for TransportDef {
    fn default() -> Self {
        Self {
            dry_air_as: default_dry_air_as(),
            dry_air_ts: default_dry_air_ts(),
            vapour_as: default_vapour_as(),
            vapour_ts: default_vapour_ts(),
            dry_air_mu: default_dry_air_mu(),
            vapour_mu: default_vapour_mu(),
        }
    }
}

fn default_dry_air_as() -> f64 {
    1.458e-6
}

fn default_dry_air_ts() -> f64 {
    110.4
}

fn default_vapour_as() -> f64 {
    2.4186e-6
}

fn default_vapour_ts() -> f64 {
    1064.0
}

fn default_dry_air_mu() -> f64 {
    1.81e-5
}

fn default_vapour_mu() -> f64 {
    9.7e-6
}

/// One stored field: cell values plus optional per-patch entries.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FieldData {
    pub internal: FieldValues,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub patches: BTreeMap<String, PatchData>,
}

impl FieldData {
    pub fn uniform(value: f64) -> Self {
        Self {
            internal: FieldValues::Uniform(value),
            patches: BTreeMap::new(),
        }
    }

    pub fn non_uniform(values: Vec<f64>) -> Self {
        Self {
            internal: FieldValues::NonUniform(values),
            patches: BTreeMap::new(),
        }
    }

    /// Attach a patch entry (builder style).
    pub fn with_patch(mut self, name: impl Into<String>, patch: PatchData) -> Self {
        self.patches.insert(name.into(), patch);
        self
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum FieldValues {
    Uniform(f64),
    NonUniform(Vec<f64>),
}

impl FieldValues {
    /// Expand to exactly `n` values; `None` if a list has the wrong length.
    pub fn expand(&self, n: usize) -> Option<Vec<f64>> {
        match self {
            FieldValues::Uniform(v) => Some(vec![*v; n]),
            FieldValues::NonUniform(values) if values.len() == n => Some(values.clone()),
            FieldValues::NonUniform(_) => None,
        }
    }

    pub fn is_finite(&self) -> bool {
        match self {
            FieldValues::Uniform(v) => v.is_finite(),
            FieldValues::NonUniform(values) => values.iter().all(|v| v.is_finite()),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PatchData {
    #[serde(rename = "type", default)]
    pub kind: PatchTypeDef,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<FieldValues>,
}

impl PatchData {
    pub fn fixed(value: f64) -> Self {
        Self {
            kind: PatchTypeDef::FixedValue,
            value: Some(FieldValues::Uniform(value)),
        }
    }

    pub fn zero_gradient() -> Self {
        Self {
            kind: PatchTypeDef::ZeroGradient,
            value: None,
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "camelCase")]
pub enum PatchTypeDef {
    #[default]
    ZeroGradient,
    FixedValue,
    Calculated,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_phase_resolves_to_top_level_thermo() {
        let mut case = CaseConfig::new("c");
        case.thermo = Some(ThermoDict {
            model_type: Some("humidityRhoThermo".into()),
            ..ThermoDict::default()
        });
        case.phases.insert(
            "air".into(),
            ThermoDict {
                model_type: Some("rhoThermo".into()),
                ..ThermoDict::default()
            },
        );

        assert_eq!(
            case.thermo_dict("").unwrap().model_type.as_deref(),
            Some("humidityRhoThermo")
        );
        assert_eq!(
            case.thermo_dict("air").unwrap().model_type.as_deref(),
            Some("rhoThermo")
        );
        assert!(case.thermo_dict("water").is_none());
        assert_eq!(case.phase_names(), vec!["", "air"]);
    }

    #[test]
    fn field_values_expand() {
        assert_eq!(FieldValues::Uniform(2.0).expand(3), Some(vec![2.0; 3]));
        assert_eq!(
            FieldValues::NonUniform(vec![1.0, 2.0]).expand(2),
            Some(vec![1.0, 2.0])
        );
        assert_eq!(FieldValues::NonUniform(vec![1.0]).expand(2), None);
    }

    #[test]
    fn init_flag_accepts_alias() {
        let dict: ThermoDict = serde_yaml::from_str(
            "type: humidityRhoThermo\nmethod: buck\ninitByRelativeHumidity: true\n",
        )
        .unwrap();
        assert!(dict.init_with_rel_humidity);
        assert_eq!(dict.method.as_deref(), Some("buck"));
        assert_eq!(dict.mixture, MixtureDef::default());
    }

    #[test]
    fn patch_type_is_camel_case() {
        let patch: PatchData = serde_yaml::from_str("type: fixedValue\nvalue: 300.0\n").unwrap();
        assert_eq!(patch, PatchData::fixed(300.0));
    }
}
