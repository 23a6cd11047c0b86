//! Workspace-wide error type; each crate converts its own errors into it.

use thiserror::Error;

pub type HtResult<T> = Result<T, HtError>;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum HtError {
    #[error("Invalid argument: {what}")]
    InvalidArg { what: &'static str },

    #[error("Index out of bounds: {what} (index={index}, len={len})")]
    IndexOob {
        what: &'static str,
        index: usize,
        len: usize,
    },

    #[error("Invariant violated: {what}")]
    Invariant { what: &'static str },
}
