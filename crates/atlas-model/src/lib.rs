//! Atlas entity model
//!
//! Data layer of the EA landscape core:
//! - Typed identifiers per entity kind
//! - Closed vocabulary enums matching the persisted wire format
//! - Entity records and their shallow-merge patches
//! - The persisted document shape

pub mod document;
pub mod entity;
pub mod enums;
pub mod error;
pub mod ids;

pub use document::LandscapeDocument;
pub use entity::*;
pub use enums::*;
pub use error::ModelError;
pub use ids::*;
