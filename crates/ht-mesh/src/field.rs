//! Spatially indexed scalar fields over cells and boundary patches.

use ht_core::PatchId;

use crate::error::{MeshError, MeshResult};
use crate::mesh::Mesh;

/// How the values of a patch are obtained.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PatchKind {
    /// Computed by the field's owner from other fields' patch values.
    Calculated,
    /// Copied from the attached cell (zero normal gradient).
    ZeroGradient,
    /// Held at prescribed values.
    FixedValue,
}

/// Values of a field on one boundary patch.
#[derive(Debug, Clone, PartialEq)]
pub struct PatchField {
    kind: PatchKind,
    values: Vec<f64>,
}

impl PatchField {
    pub fn new(kind: PatchKind, values: Vec<f64>) -> Self {
        Self { kind, values }
    }

    pub fn kind(&self) -> PatchKind {
        self.kind
    }

    pub fn values(&self) -> &[f64] {
        &self.values
    }

    pub fn values_mut(&mut self) -> &mut [f64] {
        &mut self.values
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

/// Min/mean/max over the cell values of a field.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FieldStats {
    pub min: f64,
    pub mean: f64,
    pub max: f64,
}

/// A named scalar field: one value per cell plus one `PatchField` per patch.
///
/// The boundary is laid out exactly like the mesh's patches, which every
/// constructor checks. Patch values are projections of the same physical
/// quantity; `correct_boundary_conditions` re-derives the zero-gradient ones
/// after the cell values change.
#[derive(Debug, Clone, PartialEq)]
pub struct VolField {
    name: String,
    internal: Vec<f64>,
    boundary: Vec<PatchField>,
}

impl VolField {
    /// Uniform field with every patch of the given kind.
    pub fn uniform(name: impl Into<String>, mesh: &Mesh, value: f64, kind: PatchKind) -> Self {
        Self {
            name: name.into(),
            internal: vec![value; mesh.n_cells()],
            boundary: mesh
                .patches()
                .iter()
                .map(|p| PatchField::new(kind, vec![value; p.len()]))
                .collect(),
        }
    }

    /// Uniform field whose patches are all `Calculated`.
    pub fn calculated(name: impl Into<String>, mesh: &Mesh, value: f64) -> Self {
        Self::uniform(name, mesh, value, PatchKind::Calculated)
    }

    /// Assemble a field from explicit parts, checking them against the mesh.
    pub fn from_parts(
        name: impl Into<String>,
        mesh: &Mesh,
        internal: Vec<f64>,
        boundary: Vec<PatchField>,
    ) -> MeshResult<Self> {
        let name = name.into();
        if internal.len() != mesh.n_cells() {
            return Err(MeshError::LayoutMismatch {
                what: format!("{name} cell values"),
                expected: mesh.n_cells(),
                actual: internal.len(),
            });
        }
        if boundary.len() != mesh.patches().len() {
            return Err(MeshError::LayoutMismatch {
                what: format!("{name} patch count"),
                expected: mesh.patches().len(),
                actual: boundary.len(),
            });
        }
        for (patch, field) in mesh.patches().iter().zip(&boundary) {
            if patch.len() != field.len() {
                return Err(MeshError::LayoutMismatch {
                    what: format!("{name} faces on patch '{}'", patch.name),
                    expected: patch.len(),
                    actual: field.len(),
                });
            }
        }
        Ok(Self {
            name,
            internal,
            boundary,
        })
    }

    /// Copy of this field under a new name, with every patch turned `Calculated`.
    pub fn derived(&self, name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            internal: self.internal.clone(),
            boundary: self
                .boundary
                .iter()
                .map(|p| PatchField::new(PatchKind::Calculated, p.values.clone()))
                .collect(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn internal(&self) -> &[f64] {
        &self.internal
    }

    pub fn internal_mut(&mut self) -> &mut [f64] {
        &mut self.internal
    }

    pub fn boundary(&self) -> &[PatchField] {
        &self.boundary
    }

    pub fn boundary_mut(&mut self) -> &mut [PatchField] {
        &mut self.boundary
    }

    pub fn patch(&self, id: PatchId) -> Option<&PatchField> {
        self.boundary.get(id.as_usize())
    }

    pub fn patch_mut(&mut self, id: PatchId) -> Option<&mut PatchField> {
        self.boundary.get_mut(id.as_usize())
    }

    /// Every value of the field: cells first, then patches in order.
    pub fn values(&self) -> impl Iterator<Item = f64> + '_ {
        self.internal
            .iter()
            .copied()
            .chain(self.boundary.iter().flat_map(|p| p.values.iter().copied()))
    }

    /// Apply `f` to every cell and patch value in place.
    pub fn apply(&mut self, mut f: impl FnMut(f64) -> f64) {
        for v in self.internal.iter_mut() {
            *v = f(*v);
        }
        for patch in self.boundary.iter_mut() {
            for v in patch.values.iter_mut() {
                *v = f(*v);
            }
        }
    }

    /// Overwrite values in `values()` order from `source`, keeping patch kinds.
    ///
    /// Stops early if `source` runs out.
    pub fn set_values(&mut self, source: impl IntoIterator<Item = f64>) {
        let slots = self
            .internal
            .iter_mut()
            .chain(self.boundary.iter_mut().flat_map(|p| p.values.iter_mut()));
        for (slot, v) in slots.zip(source) {
            *slot = v;
        }
    }

    /// Same values and patch kinds under another name.
    pub fn renamed(&self, name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..self.clone()
        }
    }

    /// Cell volumes as a field; each patch face carries its cell's volume.
    pub fn cell_volumes(mesh: &Mesh) -> Self {
        let mut field = Self::uniform("V", mesh, 0.0, PatchKind::ZeroGradient);
        field.internal.copy_from_slice(mesh.cell_volumes());
        field.correct_boundary_conditions(mesh);
        field
    }

    /// Overwrite every value with `value`, keeping patch kinds.
    pub fn fill(&mut self, value: f64) {
        self.apply(|_| value);
    }

    /// Check that `other` has the same cell count and patch layout.
    pub fn check_layout(&self, other: &VolField) -> MeshResult<()> {
        if self.internal.len() != other.internal.len() {
            return Err(MeshError::LayoutMismatch {
                what: format!("{} vs {} cell values", self.name, other.name),
                expected: self.internal.len(),
                actual: other.internal.len(),
            });
        }
        if self.boundary.len() != other.boundary.len() {
            return Err(MeshError::LayoutMismatch {
                what: format!("{} vs {} patch count", self.name, other.name),
                expected: self.boundary.len(),
                actual: other.boundary.len(),
            });
        }
        for (a, b) in self.boundary.iter().zip(&other.boundary) {
            if a.len() != b.len() {
                return Err(MeshError::LayoutMismatch {
                    what: format!("{} vs {} patch faces", self.name, other.name),
                    expected: a.len(),
                    actual: b.len(),
                });
            }
        }
        Ok(())
    }

    /// Overwrite all values with `other`'s, keeping this field's name and patch kinds.
    pub fn assign(&mut self, other: &VolField) -> MeshResult<()> {
        self.check_layout(other)?;
        self.internal.copy_from_slice(&other.internal);
        for (a, b) in self.boundary.iter_mut().zip(&other.boundary) {
            a.values.copy_from_slice(&b.values);
        }
        Ok(())
    }

    /// Element-wise `self += other` over cells and patches.
    pub fn add_field(&mut self, other: &VolField) -> MeshResult<()> {
        self.check_layout(other)?;
        for (a, b) in self.internal.iter_mut().zip(&other.internal) {
            *a += b;
        }
        for (pa, pb) in self.boundary.iter_mut().zip(&other.boundary) {
            for (a, b) in pa.values.iter_mut().zip(&pb.values) {
                *a += b;
            }
        }
        Ok(())
    }

    /// Re-evaluate zero-gradient patches from their attached cells.
    ///
    /// Fixed-value and calculated patches are left untouched.
    pub fn correct_boundary_conditions(&mut self, mesh: &Mesh) {
        for (patch, field) in mesh.patches().iter().zip(self.boundary.iter_mut()) {
            if field.kind != PatchKind::ZeroGradient {
                continue;
            }
            for (v, cell) in field.values.iter_mut().zip(&patch.face_cells) {
                *v = self.internal[cell.as_usize()];
            }
        }
    }

    /// Min/mean/max over cell values.
    pub fn stats(&self) -> FieldStats {
        let n = self.internal.len().max(1) as f64;
        let (min, max, sum) = self.internal.iter().fold(
            (f64::INFINITY, f64::NEG_INFINITY, 0.0),
            |(lo, hi, s), &v| (lo.min(v), hi.max(v), s + v),
        );
        FieldStats {
            min,
            mean: sum / n,
            max,
        }
    }
}
