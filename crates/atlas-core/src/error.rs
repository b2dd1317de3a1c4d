//! Error types for the landscape store
//!
//! Write paths are strict: an unknown foreign key or duplicate id is
//! rejected. Read paths never error; lookups return `Option` and joins
//! skip dangling references.

use atlas_model::ModelError;

/// Main store error type
#[derive(Debug, thiserror::Error)]
pub enum LandscapeError {
    /// A write referenced an entity that does not exist
    #[error("unknown {kind} reference: {id}")]
    UnknownReference {
        /// Entity kind of the missing record
        kind: &'static str,
        /// The dangling id
        id: String,
    },

    /// A write supplied an id that is already taken
    #[error("duplicate {kind} id: {id}")]
    DuplicateId { kind: &'static str, id: String },

    /// Field-level validation failed
    #[error("invalid field value: {0}")]
    Model(#[from] ModelError),

    /// The persisted document could not be parsed; the running store is
    /// left untouched and the caller should fall back to seed data
    #[error("malformed landscape document: {0}")]
    Document(#[from] serde_json::Error),
}

impl LandscapeError {
    pub(crate) fn unknown(kind: &'static str, id: impl std::fmt::Display) -> Self {
        Self::UnknownReference {
            kind,
            id: id.to_string(),
        }
    }

    pub(crate) fn duplicate(kind: &'static str, id: impl std::fmt::Display) -> Self {
        Self::DuplicateId {
            kind,
            id: id.to_string(),
        }
    }
}
