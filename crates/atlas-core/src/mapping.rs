//! Capability-mapping toggle state machine
//!
//! The matrix UI toggles one (capability, application) cell per click.
//! The authoritative cycle lives here, not in the UI:
//! Absent -> Primary -> Secondary -> Absent. The transition function is
//! total and deterministic.

use atlas_model::MappingRole;

/// State of one (capability, application) cell
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MappingState {
    Absent,
    Primary,
    Secondary,
}

impl MappingState {
    /// Next state in the toggle cycle
    #[must_use]
    pub fn toggled(self) -> Self {
        match self {
            Self::Absent => Self::Primary,
            Self::Primary => Self::Secondary,
            Self::Secondary => Self::Absent,
        }
    }

    /// Mapping role carried by this state, if any
    #[must_use]
    pub fn role(self) -> Option<MappingRole> {
        match self {
            Self::Absent => None,
            Self::Primary => Some(MappingRole::Primary),
            Self::Secondary => Some(MappingRole::Secondary),
        }
    }
}

impl From<Option<MappingRole>> for MappingState {
    fn from(role: Option<MappingRole>) -> Self {
        match role {
            None => Self::Absent,
            Some(MappingRole::Primary) => Self::Primary,
            Some(MappingRole::Secondary) => Self::Secondary,
        }
    }
}
