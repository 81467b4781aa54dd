//! Error types for rendering.
//!
//! Structural conditions (depth overflow, reference cycles) are never errors;
//! they come out as sentinels inside successful output. Only failing to *read*
//! a value ends up here.

use thiserror::Error;

/// A value in the graph could not be read.
#[derive(Error, Debug)]
pub enum RenderError {
    /// A composite field refused to be read.
    #[error("cannot read field `{field}`: {reason}")]
    FieldAccess { field: String, reason: String },

    /// A `RefCell` was mutably borrowed while the renderer tried to read it.
    #[error("value is mutably borrowed: {0}")]
    Borrow(#[from] std::cell::BorrowError),

    /// An `RwLock` was poisoned or held by a writer.
    #[error("lock unavailable: {0}")]
    Lock(String),

    /// A guarded value changed category between classification and traversal.
    #[error("value changed from {expected} to {found} while rendering")]
    Inconsistent {
        expected: &'static str,
        found: &'static str,
    },
}

impl RenderError {
    /// Shorthand for [`RenderError::FieldAccess`], for hand-written
    /// [`FieldEnumerable`](crate::FieldEnumerable) impls.
    pub fn field_access(field: impl Into<String>, reason: impl Into<String>) -> Self {
        RenderError::FieldAccess {
            field: field.into(),
            reason: reason.into(),
        }
    }
}

/// Convenience alias used throughout loupe-core.
pub type Result<T> = std::result::Result<T, RenderError>;
