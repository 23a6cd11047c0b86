//! ht-core: stable foundation for humitherm.
//!
//! Contains:
//! - units (uom SI types + constructors)
//! - numeric (Real + tolerances + float helpers)
//! - ids (compact IDs for mesh cells and patches)
//! - error (shared error types)

pub mod error;
pub mod ids;
pub mod numeric;
pub mod units;

// Re-exports: nice ergonomics for downstream crates
pub use error::{HtError, HtResult};
pub use ids::*;
pub use numeric::*;
pub use units::*;
