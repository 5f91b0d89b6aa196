//! Error types for the Galaxy3D spatial core
//!
//! Per-frame paths (index rebuild, culling, picking) never fail: they degrade
//! to empty results. Errors are only produced by the scene mutation API
//! (stale handles, rejected reparenting) and by explicit geometry validation.

use std::fmt;

/// Result type for Galaxy3D spatial operations
pub type Result<T> = std::result::Result<T, Error>;

/// Galaxy3D spatial errors
#[derive(Debug, Clone)]
pub enum Error {
    /// Unknown or already destroyed scene node handle
    InvalidNode(String),

    /// Unknown or already removed camera handle
    InvalidCamera(String),

    /// Mutation rejected by the scene (cycle, root removal, exhausted slots...)
    InvalidOperation(String),

    /// Geometry failed validation (e.g. triangle index out of range)
    InvalidGeometry(String),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::InvalidNode(msg) => write!(f, "Invalid node: {}", msg),
            Error::InvalidCamera(msg) => write!(f, "Invalid camera: {}", msg),
            Error::InvalidOperation(msg) => write!(f, "Invalid operation: {}", msg),
            Error::InvalidGeometry(msg) => write!(f, "Invalid geometry: {}", msg),
        }
    }
}

impl std::error::Error for Error {}

/// Log an ERROR (with file:line) and build an `Error::InvalidOperation` from it
///
/// # Example
///
/// ```ignore
/// return Err(engine_err!("galaxy3d::Scene", "Cannot destroy the root node"));
/// ```
#[macro_export]
macro_rules! engine_err {
    ($source:expr, $($arg:tt)*) => {{
        let message = format!($($arg)*);
        $crate::engine_error!($source, "{}", message);
        $crate::galaxy3d::Error::InvalidOperation(message)
    }};
}

/// Log an ERROR and return early with an `Error::InvalidOperation`
///
/// # Example
///
/// ```ignore
/// engine_bail!("galaxy3d::Scene", "Node {:?} cannot be its own parent", key);
/// ```
#[macro_export]
macro_rules! engine_bail {
    ($source:expr, $($arg:tt)*) => {
        return Err($crate::engine_err!($source, $($arg)*))
    };
}

#[cfg(test)]
#[path = "error_tests.rs"]
mod tests;
