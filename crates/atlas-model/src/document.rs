//! Persisted document shape
//!
//! One JSON object carries the entire landscape. Every collection key is
//! optional on load (`#[serde(default)]`) so partially-written or older
//! documents come up as empty collections instead of failing. `meta`,
//! `managementKPIs` and `enums` are opaque to the core; they ride along
//! untouched so serialize-after-load is lossless.

use crate::entity::{
    Application, CapabilityMapping, ComplianceAssessment, Demand, Domain, Integration, Process,
    Project, ProjectDependency, Vendor,
};
use serde::{Deserialize, Serialize};

/// Full landscape document as persisted by the external store
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LandscapeDocument {
    #[serde(default)]
    pub meta: serde_json::Value,
    #[serde(default)]
    pub domains: Vec<Domain>,
    #[serde(default)]
    pub applications: Vec<Application>,
    #[serde(default)]
    pub capability_mappings: Vec<CapabilityMapping>,
    #[serde(default)]
    pub projects: Vec<Project>,
    #[serde(default)]
    pub project_dependencies: Vec<ProjectDependency>,
    /// Management KPI definitions; rendered by the UI, opaque to the core
    #[serde(rename = "managementKPIs", default)]
    pub management_kpis: Vec<serde_json::Value>,
    #[serde(default)]
    pub vendors: Vec<Vendor>,
    #[serde(rename = "e2eProcesses", default)]
    pub e2e_processes: Vec<Process>,
    #[serde(default)]
    pub demands: Vec<Demand>,
    #[serde(default)]
    pub integrations: Vec<Integration>,
    #[serde(default)]
    pub compliance_assessments: Vec<ComplianceAssessment>,
    /// Externally supplied option lists (criticalities, TIME quadrants,
    /// regulation catalog); opaque configuration for the core
    #[serde(default)]
    pub enums: serde_json::Value,
}
