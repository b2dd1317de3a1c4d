//! Atlas landscape core
//!
//! The authoritative in-memory store for one EA landscape:
//! - [`Landscape`] repository with `add_* / update_* / delete_*` mutation
//! - Idempotent capability-mapping table with the toggle state machine
//! - Reference-integrity cascades on every delete
//! - Read-only derivation joins in [`derive`]
//! - Load/serialize of the persisted document shape

pub mod derive;
pub mod error;
mod integrity;
pub mod landscape;
pub mod mapping;

pub use error::LandscapeError;
pub use landscape::Landscape;
pub use mapping::MappingState;
