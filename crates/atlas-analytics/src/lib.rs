//! Atlas landscape analytics
//!
//! Pure computations over a [`atlas_core::Landscape`], recomputed on
//! read after every mutation (nothing here is incrementally maintained):
//! - Maturity-gap ranking
//! - Timeline collisions and resource conflicts
//! - Compliance and conformity scorecards
//! - Global full-text search

pub mod compliance;
pub mod conflicts;
pub mod maturity;
pub mod search;
pub mod timeline;

pub use compliance::{
    assessment_score, domain_conformity_score, regulation_scorecard, scorecards,
    RegulationScorecard,
};
pub use conflicts::{
    app_conflicts, critical_action_conflicts, cross_domain_projects, AppConflict,
    CriticalActionConflict, CrossDomainProject,
};
pub use maturity::{maturity_gaps, MaturityGap};
pub use search::{search, EntityType, SearchHit};
pub use timeline::{
    overlap_quarters, parse_quarter, project_window, timeline_collisions, TimelineCollision,
};
