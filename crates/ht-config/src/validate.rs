//! Case validation logic.

use crate::schema::{
    CaseConfig, FieldData, FieldStore, MeshDef, MixtureDef, PatchTypeDef, ThermoDict, TransportDef,
};
use std::collections::HashSet;

#[derive(thiserror::Error, Debug)]
pub enum ValidationError {
    #[error("Duplicate ID: {id} in {context}")]
    DuplicateId { id: String, context: String },

    #[error("Missing reference: {id} in {context}")]
    MissingReference { id: String, context: String },

    #[error("Invalid value: {field} = {value} ({reason})")]
    InvalidValue {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Unsupported version: {version}")]
    UnsupportedVersion { version: u32 },
}

pub fn validate_case(case: &CaseConfig) -> Result<(), ValidationError> {
    if case.version == 0 || case.version > crate::LATEST_VERSION {
        return Err(ValidationError::UnsupportedVersion {
            version: case.version,
        });
    }

    let patch_names = match &case.mesh {
        Some(mesh) => Some(validate_mesh(mesh)?),
        None => None,
    };

    if let Some(dict) = &case.thermo {
        validate_dict("thermo", dict, patch_names.as_ref())?;
    }
    for (name, dict) in &case.phases {
        if name.is_empty() {
            return Err(ValidationError::InvalidValue {
                field: "phases".to_string(),
                value: "\"\"".to_string(),
                reason: "the default phase is configured by the top-level 'thermo' entry"
                    .to_string(),
            });
        }
        validate_dict(&format!("phases.{name}"), dict, patch_names.as_ref())?;
    }

    validate_fields("fields", &case.fields, patch_names.as_ref())
}

fn validate_mesh(mesh: &MeshDef) -> Result<HashSet<String>, ValidationError> {
    if mesh.cells == 0 {
        return Err(invalid("mesh.cells", mesh.cells, "must be positive"));
    }
    positive("mesh.cell_volume", mesh.cell_volume)?;

    let mut names = HashSet::new();
    for patch in &mesh.patches {
        if !names.insert(patch.name.clone()) {
            return Err(ValidationError::DuplicateId {
                id: patch.name.clone(),
                context: "mesh.patches".to_string(),
            });
        }
        if let Some(cell) = patch.face_cells.iter().find(|&&c| c >= mesh.cells) {
            return Err(invalid(
                &format!("mesh.patches.{}.face_cells", patch.name),
                cell,
                "refers to a cell outside the mesh",
            ));
        }
    }
    Ok(names)
}

fn validate_dict(
    context: &str,
    dict: &ThermoDict,
    patch_names: Option<&HashSet<String>>,
) -> Result<(), ValidationError> {
    if let Some(tag) = &dict.model_type {
        if tag.trim().is_empty() {
            return Err(invalid(&format!("{context}.type"), "\"\"", "must not be empty"));
        }
    }
    validate_mixture(context, &dict.mixture)?;
    validate_transport(context, &dict.transport)?;
    validate_fields(&format!("{context}.fields"), &dict.fields, patch_names)
}

fn validate_mixture(context: &str, mixture: &MixtureDef) -> Result<(), ValidationError> {
    positive(
        &format!("{context}.mixture.dry_air_molar_mass"),
        mixture.dry_air_molar_mass,
    )?;
    positive(
        &format!("{context}.mixture.vapour_molar_mass"),
        mixture.vapour_molar_mass,
    )?;
    positive(&format!("{context}.mixture.dry_air_cp"), mixture.dry_air_cp)?;
    positive(&format!("{context}.mixture.vapour_cp"), mixture.vapour_cp)
}

fn validate_transport(context: &str, transport: &TransportDef) -> Result<(), ValidationError> {
    let entries = [
        ("dry_air_as", transport.dry_air_as),
        ("dry_air_ts", transport.dry_air_ts),
        ("vapour_as", transport.vapour_as),
        ("vapour_ts", transport.vapour_ts),
        ("dry_air_mu", transport.dry_air_mu),
        ("vapour_mu", transport.vapour_mu),
    ];
    for (name, value) in entries {
        positive(&format!("{context}.transport.{name}"), value)?;
    }
    Ok(())
}

fn validate_fields(
    context: &str,
    fields: &FieldStore,
    patch_names: Option<&HashSet<String>>,
) -> Result<(), ValidationError> {
    for (name, data) in fields {
        validate_field(&format!("{context}.{name}"), data, patch_names)?;
    }
    Ok(())
}

fn validate_field(
    context: &str,
    data: &FieldData,
    patch_names: Option<&HashSet<String>>,
) -> Result<(), ValidationError> {
    if !data.internal.is_finite() {
        return Err(invalid(context, "internal", "values must be finite"));
    }
    if let crate::FieldValues::NonUniform(values) = &data.internal {
        if values.is_empty() {
            return Err(invalid(context, "[]", "non-uniform list must not be empty"));
        }
    }

    for (patch, entry) in &data.patches {
        if let Some(names) = patch_names {
            if !names.contains(patch) {
                return Err(ValidationError::MissingReference {
                    id: patch.clone(),
                    context: format!("{context}.patches"),
                });
            }
        }
        match (&entry.kind, &entry.value) {
            (PatchTypeDef::FixedValue, None) => {
                return Err(invalid(
                    &format!("{context}.patches.{patch}"),
                    "fixedValue",
                    "requires a value",
                ));
            }
            (_, Some(value)) if !value.is_finite() => {
                return Err(invalid(
                    &format!("{context}.patches.{patch}.value"),
                    "value",
                    "values must be finite",
                ));
            }
            _ => {}
        }
    }
    Ok(())
}

fn positive(field: &str, value: f64) -> Result<(), ValidationError> {
    if !value.is_finite() || value <= 0.0 {
        return Err(invalid(field, value, "must be positive and finite"));
    }
    Ok(())
}

fn invalid(field: &str, value: impl ToString, reason: &str) -> ValidationError {
    ValidationError::InvalidValue {
        field: field.to_string(),
        value: value.to_string(),
        reason: reason.to_string(),
    }
}
