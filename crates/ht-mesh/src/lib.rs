//! ht-mesh: mesh topology and spatially indexed fields for humitherm.
//!
//! Provides:
//! - Core mesh data structures (cells, boundary patches with face→cell addressing)
//! - Incremental mesh builder with validation
//! - `VolField`: a scalar over cells with one boundary-evaluated projection per patch
//!
//! # Example
//!
//! ```
//! use ht_mesh::{MeshBuilder, PatchKind, VolField};
//!
//! let mut builder = MeshBuilder::new();
//! let cells = builder.add_cells(4, 1e-3);
//! let inlet = builder.add_patch("inlet", [cells[0]]);
//! let mesh = builder.build().unwrap();
//!
//! let t = VolField::uniform("T", &mesh, 293.15, PatchKind::ZeroGradient);
//! assert_eq!(t.internal().len(), 4);
//! assert_eq!(t.patch(inlet).unwrap().values(), &[293.15]);
//! ```

pub mod builder;
pub mod error;
pub mod field;
pub mod mesh;
pub(crate) mod validate;

// Re-exports for ergonomics
pub use builder::MeshBuilder;
pub use error::{MeshError, MeshResult};
pub use field::{FieldStats, PatchField, PatchKind, VolField};
pub use mesh::{Mesh, Patch};
