//! Conversion between stored field data and mesh fields.

use std::collections::BTreeMap;

use ht_config::{FieldData, FieldStore, FieldValues, PatchData, PatchTypeDef};
use ht_mesh::{Mesh, PatchField, PatchKind, VolField};

use crate::error::{ThermoError, ThermoResult};

/// Read `name` from `store`, laid out on `mesh`. `Ok(None)` if absent.
///
/// Patches without an entry are zero-gradient.
pub fn read_field(mesh: &Mesh, store: &FieldStore, name: &str) -> ThermoResult<Option<VolField>> {
    let Some(data) = store.get(name) else {
        return Ok(None);
    };

    let internal = data
        .internal
        .expand(mesh.n_cells())
        .ok_or_else(|| ThermoError::FieldLayout {
            name: name.to_string(),
            reason: format!("expected {} cell values", mesh.n_cells()),
        })?;

    let mut boundary = Vec::with_capacity(mesh.patches().len());
    for patch in mesh.patches() {
        let entry = data.patches.get(&patch.name);
        let kind = entry.map_or(PatchKind::ZeroGradient, |e| patch_kind(e.kind));
        let prescribed = match entry.and_then(|e| e.value.as_ref()) {
            Some(value) => Some(value.expand(patch.len()).ok_or_else(|| {
                ThermoError::FieldLayout {
                    name: name.to_string(),
                    reason: format!("expected {} values on patch '{}'", patch.len(), patch.name),
                }
            })?),
            None => None,
        };
        let values = match (kind, prescribed) {
            (PatchKind::ZeroGradient, _) | (_, None) => patch
                .face_cells
                .iter()
                .map(|c| internal[c.as_usize()])
                .collect(),
            (_, Some(values)) => values,
        };
        boundary.push(PatchField::new(kind, values));
    }

    Ok(Some(VolField::from_parts(name, mesh, internal, boundary)?))
}

/// Read `name`, failing with `FieldMissing` if the store does not have it.
pub fn read_required(mesh: &Mesh, store: &FieldStore, name: &str) -> ThermoResult<VolField> {
    read_field(mesh, store, name)?.ok_or_else(|| ThermoError::FieldMissing {
        name: name.to_string(),
    })
}

/// Stored form of a field, keyed by the mesh's patch names.
pub fn field_data(mesh: &Mesh, field: &VolField) -> FieldData {
    let patches: BTreeMap<String, PatchData> = mesh
        .patches()
        .iter()
        .zip(field.boundary())
        .map(|(patch, values)| {
            let entry = PatchData {
                kind: patch_type_def(values.kind()),
                value: match values.kind() {
                    PatchKind::ZeroGradient => None,
                    _ => Some(FieldValues::NonUniform(values.values().to_vec())),
                },
            };
            (patch.name.clone(), entry)
        })
        .collect();

    FieldData {
        internal: FieldValues::NonUniform(field.internal().to_vec()),
        patches,
    }
}

/// Add `field` to `store` under its own name.
pub fn write_field(store: &mut FieldStore, mesh: &Mesh, field: &VolField) {
    store.insert(field.name().to_string(), field_data(mesh, field));
}

fn patch_kind(def: PatchTypeDef) -> PatchKind {
    match def {
        PatchTypeDef::ZeroGradient => PatchKind::ZeroGradient,
        PatchTypeDef::FixedValue => PatchKind::FixedValue,
        PatchTypeDef::Calculated => PatchKind::Calculated,
    }
}

fn patch_type_def(kind: PatchKind) -> PatchTypeDef {
    match kind {
        PatchKind::ZeroGradient => PatchTypeDef::ZeroGradient,
        PatchKind::FixedValue => PatchTypeDef::FixedValue,
        PatchKind::Calculated => PatchTypeDef::Calculated,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ht_core::CellId;
    use ht_mesh::MeshBuilder;

    fn mesh() -> Mesh {
        let mut builder = MeshBuilder::uniform(3, 1.0);
        builder.add_patch("inlet", [CellId::from_index(0)]);
        builder.add_patch("outlet", [CellId::from_index(2)]);
        builder.build().unwrap()
    }

    #[test]
    fn missing_field_is_none() {
        let store = FieldStore::new();
        assert!(read_field(&mesh(), &store, "T").unwrap().is_none());
        assert!(matches!(
            read_required(&mesh(), &store, "T"),
            Err(ThermoError::FieldMissing { .. })
        ));
    }

    #[test]
    fn patches_default_to_zero_gradient() {
        let mut store = FieldStore::new();
        store.insert(
            "T".into(),
            FieldData::non_uniform(vec![280.0, 290.0, 300.0])
                .with_patch("inlet", PatchData::fixed(270.0)),
        );
        let t = read_required(&mesh(), &store, "T").unwrap();
        assert_eq!(t.boundary()[0].kind(), PatchKind::FixedValue);
        assert_eq!(t.boundary()[0].values(), &[270.0]);
        assert_eq!(t.boundary()[1].kind(), PatchKind::ZeroGradient);
        assert_eq!(t.boundary()[1].values(), &[300.0]);
    }

    #[test]
    fn wrong_list_length_is_layout_error() {
        let mut store = FieldStore::new();
        store.insert("T".into(), FieldData::non_uniform(vec![280.0, 290.0]));
        assert!(matches!(
            read_field(&mesh(), &store, "T"),
            Err(ThermoError::FieldLayout { .. })
        ));
    }

    #[test]
    fn written_field_reads_back() {
        let m = mesh();
        let mut store = FieldStore::new();
        store.insert(
            "p".into(),
            FieldData::non_uniform(vec![1.0, 2.0, 3.0]).with_patch("outlet", PatchData::fixed(9.0)),
        );
        let p = read_required(&m, &store, "p").unwrap();

        let mut out = FieldStore::new();
        write_field(&mut out, &m, &p);
        let back = read_required(&m, &out, "p").unwrap();
        assert_eq!(p, back);
    }
}
