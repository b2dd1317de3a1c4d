//! Closed vocabularies of the landscape
//!
//! The persisted format carries these as plain strings; they are modelled
//! as closed enums so writes are validated by deserialization and reads
//! can match exhaustively. Serde renames pin the exact wire vocabulary,
//! including the German labels the source data uses for project actions
//! and conformity statuses.

use serde::{Deserialize, Serialize};

/// Role of an application within a capability mapping
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MappingRole {
    Primary,
    Secondary,
}

/// Business criticality of an application or vendor
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Criticality {
    #[serde(rename = "Mission-Critical")]
    MissionCritical,
    #[serde(rename = "Business-Critical")]
    BusinessCritical,
    Important,
    Standard,
}

impl Criticality {
    /// Mission- and Business-Critical applications escalate collision risk
    #[must_use]
    pub fn is_critical(self) -> bool {
        matches!(self, Self::MissionCritical | Self::BusinessCritical)
    }
}

/// TIME quadrant classification (Tolerate / Invest / Migrate / Eliminate)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TimeQuadrant {
    Tolerate,
    Invest,
    Migrate,
    Eliminate,
}

/// What a project does to an affected application
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AppAction {
    #[serde(rename = "einführen")]
    Einfuehren,
    #[serde(rename = "erweitern")]
    Erweitern,
    #[serde(rename = "migrieren")]
    Migrieren,
    #[serde(rename = "ablösen")]
    Abloesen,
}

impl AppAction {
    /// Retirement actions conflict hard with any concurrent modification
    #[must_use]
    pub fn is_retirement(self) -> bool {
        matches!(self, Self::Abloesen)
    }
}

/// Project lifecycle status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ProjectStatus {
    #[serde(rename = "geplant")]
    Geplant,
    #[serde(rename = "laufend")]
    Laufend,
    #[serde(rename = "pausiert")]
    Pausiert,
    #[serde(rename = "abgeschlossen")]
    Abgeschlossen,
}

/// Type of a directed dependency between projects
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DependencyType {
    #[serde(rename = "blockiert")]
    Blocks,
    #[serde(rename = "ermöglicht")]
    Enables,
    #[serde(rename = "informiert")]
    Informs,
}

/// Qualitative conformity verdict for a project
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ConformityStatus {
    Konform,
    Teilkonform,
    Widerspricht,
}

impl ConformityStatus {
    /// Weighted score: Konform 100, Teilkonform 50, Widerspricht 0
    #[must_use]
    pub fn score(self) -> u32 {
        match self {
            Self::Konform => 100,
            Self::Teilkonform => 50,
            Self::Widerspricht => 0,
        }
    }
}

/// Status of a compliance assessment answer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ComplianceStatus {
    #[serde(rename = "compliant")]
    Compliant,
    #[serde(rename = "partial")]
    Partial,
    #[serde(rename = "nonCompliant")]
    NonCompliant,
    #[serde(rename = "notAssessed")]
    NotAssessed,
}

impl ComplianceStatus {
    /// Weighted score: compliant 100, partial 50, nonCompliant 0,
    /// not assessed 50 (same as missing)
    #[must_use]
    pub fn score(self) -> u32 {
        match self {
            Self::Compliant => 100,
            Self::Partial => 50,
            Self::NonCompliant => 0,
            Self::NotAssessed => 50,
        }
    }
}

/// Score assumed when an assessment or answer is absent entirely
pub const UNRATED_SCORE: u32 = 50;

/// Cross-domain complexity classification of a project
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum ComplexityLevel {
    Niedrig,
    Mittel,
    Hoch,
}

impl std::fmt::Display for ComplexityLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            Self::Niedrig => "Niedrig",
            Self::Mittel => "Mittel",
            Self::Hoch => "Hoch",
        };
        f.write_str(label)
    }
}

/// Risk classification of a timeline collision
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RiskLevel {
    Low,
    Medium,
    High,
}
