//! Entity records of the landscape
//!
//! One struct per entity kind, shaped exactly like the persisted JSON
//! (camelCase keys, optional fields omitted, list fields defaulting to
//! empty). Mutation goes through patch structs: every patch field is an
//! `Option`, `None` leaves the record untouched, which is the typed
//! rendition of the shallow-merge update the UI issues. A patch sets
//! fields and never clears them; erasing an optional field means
//! replacing the whole record.

use crate::enums::{
    AppAction, ComplianceStatus, ConformityStatus, Criticality, DependencyType, MappingRole,
    ProjectStatus, TimeQuadrant,
};
use crate::error::ModelError;
use crate::ids::{
    AppId, CapabilityId, DemandId, DomainId, IntegrationId, ProcessId, ProjectId, VendorId,
};
use chrono::NaiveDate;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Valid maturity range on the 1-5 scale
pub fn validate_maturity(value: u8) -> Result<u8, ModelError> {
    if (1..=5).contains(&value) {
        Ok(value)
    } else {
        Err(ModelError::MaturityOutOfRange { value })
    }
}

/// Business domain owning a capability tree
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Domain {
    pub id: DomainId,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default)]
    pub capabilities: Vec<Capability>,
}

impl Domain {
    /// All capabilities of the domain, sub-capabilities included
    pub fn all_capabilities(&self) -> impl Iterator<Item = &Capability> {
        self.capabilities.iter().flat_map(Capability::self_and_subs)
    }
}

/// Business capability, nested one level of sub-capabilities deep or more
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Capability {
    pub id: CapabilityId,
    pub name: String,
    pub maturity: u8,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target_maturity: Option<u8>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default)]
    pub sub_capabilities: Vec<Capability>,
}

impl Capability {
    /// This capability followed by its sub-capability tree, depth first
    pub fn self_and_subs(&self) -> Box<dyn Iterator<Item = &Capability> + '_> {
        Box::new(
            std::iter::once(self).chain(self.sub_capabilities.iter().flat_map(Self::self_and_subs)),
        )
    }

    /// Gap between target and current maturity; zero when no target is set
    #[must_use]
    pub fn maturity_gap(&self) -> i32 {
        i32::from(self.target_maturity.unwrap_or(self.maturity)) - i32::from(self.maturity)
    }
}

/// Link record: an application realizes a capability with a role
///
/// Unique per (capability, application) pair; uniqueness is enforced by
/// the store's idempotent `add_mapping`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CapabilityMapping {
    pub capability_id: CapabilityId,
    pub application_id: AppId,
    pub role: MappingRole,
}

/// Application in the landscape
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Application {
    pub id: AppId,
    pub name: String,
    /// Legacy soft vendor reference by name; `vendor_id` takes precedence
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vendor: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vendor_id: Option<VendorId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub criticality: Option<Criticality>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time_quadrant: Option<TimeQuadrant>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_of_life: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_of_support: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub owner: Option<String>,
}

/// Software vendor
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Vendor {
    pub id: VendorId,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub criticality: Option<Criticality>,
}

/// An application touched by a project, with the intended action
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AffectedApp {
    pub app_id: AppId,
    pub action: AppAction,
}

/// Transformation project
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    pub id: ProjectId,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub primary_domain: Option<DomainId>,
    #[serde(default)]
    pub secondary_domains: Vec<DomainId>,
    #[serde(default)]
    pub affected_apps: Vec<AffectedApp>,
    #[serde(default)]
    pub capabilities: Vec<CapabilityId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub budget: Option<f64>,
    /// Quarter label `Q<1-4>/<yyyy>`; kept verbatim, parsed at analytics time
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<ProjectStatus>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub conformity: Option<ConformityStatus>,
}

impl Project {
    /// Primary and secondary domains as one distinct set
    #[must_use]
    pub fn domain_set(&self) -> Vec<DomainId> {
        let mut domains: Vec<DomainId> = self
            .primary_domain
            .into_iter()
            .chain(self.secondary_domains.iter().copied())
            .collect();
        domains.sort_unstable();
        domains.dedup();
        domains
    }
}

/// Directed dependency edge between two projects
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectDependency {
    pub source_project_id: ProjectId,
    pub target_project_id: ProjectId,
    #[serde(rename = "type")]
    pub dependency_type: DependencyType,
}

/// End-to-end business process spanning domains
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Process {
    pub id: ProcessId,
    pub name: String,
    #[serde(default)]
    pub domains: Vec<DomainId>,
    /// Explicit application list; when set it overrides the
    /// domain -> capability -> mapping derivation
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub application_ids: Option<Vec<AppId>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub owner: Option<String>,
}

/// Incoming demand against the landscape
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Demand {
    pub id: DemandId,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub primary_domain: Option<DomainId>,
    #[serde(default)]
    pub related_domains: Vec<DomainId>,
    #[serde(default)]
    pub related_apps: Vec<AppId>,
    #[serde(default)]
    pub related_vendors: Vec<VendorId>,
    #[serde(default)]
    pub applicable_regulations: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub requester: Option<String>,
}

/// Directed integration edge between two applications
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Integration {
    pub id: IntegrationId,
    pub source_app_id: AppId,
    pub target_app_id: AppId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub interface_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// Compliance assessment of one application against one regulation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComplianceAssessment {
    pub app_id: AppId,
    pub regulation: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<ComplianceStatus>,
    #[serde(default)]
    pub answers: IndexMap<String, ComplianceStatus>,
}

// ---------------------------------------------------------------------------
// Constructors

impl Domain {
    /// New empty domain; id 0 asks the store to assign the next one
    #[inline]
    #[must_use]
    pub fn new(id: u32, name: impl Into<String>) -> Self {
        Self {
            id: DomainId(id),
            name: name.into(),
            color: None,
            description: None,
            capabilities: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_color(mut self, color: impl Into<String>) -> Self {
        self.color = Some(color.into());
        self
    }

    #[must_use]
    pub fn with_capability(mut self, capability: Capability) -> Self {
        self.capabilities.push(capability);
        self
    }
}

impl Capability {
    /// New capability; an empty id asks the store to assign one
    #[inline]
    #[must_use]
    pub fn new(id: impl Into<String>, name: impl Into<String>, maturity: u8) -> Self {
        Self {
            id: CapabilityId::new(id),
            name: name.into(),
            maturity,
            target_maturity: None,
            description: None,
            sub_capabilities: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_target(mut self, target: u8) -> Self {
        self.target_maturity = Some(target);
        self
    }

    #[must_use]
    pub fn with_sub(mut self, sub: Capability) -> Self {
        self.sub_capabilities.push(sub);
        self
    }
}

impl Application {
    /// New application; an empty id asks the store to assign one
    #[inline]
    #[must_use]
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: AppId::new(id),
            name: name.into(),
            vendor: None,
            vendor_id: None,
            criticality: None,
            time_quadrant: None,
            end_of_life: None,
            end_of_support: None,
            description: None,
            owner: None,
        }
    }

    #[must_use]
    pub fn with_vendor(mut self, vendor: impl Into<String>) -> Self {
        self.vendor = Some(vendor.into());
        self
    }

    #[must_use]
    pub fn with_vendor_id(mut self, vendor_id: VendorId) -> Self {
        self.vendor_id = Some(vendor_id);
        self
    }

    #[must_use]
    pub fn with_criticality(mut self, criticality: Criticality) -> Self {
        self.criticality = Some(criticality);
        self
    }

    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}

impl Vendor {
    /// New vendor; an empty id asks the store to assign one
    #[inline]
    #[must_use]
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: VendorId::new(id),
            name: name.into(),
            category: None,
            criticality: None,
        }
    }
}

impl Project {
    /// New project; an empty id asks the store to assign one
    #[inline]
    #[must_use]
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: ProjectId::new(id),
            name: name.into(),
            description: None,
            primary_domain: None,
            secondary_domains: Vec::new(),
            affected_apps: Vec::new(),
            capabilities: Vec::new(),
            budget: None,
            start: None,
            end: None,
            status: None,
            conformity: None,
        }
    }

    #[must_use]
    pub fn with_primary_domain(mut self, domain: DomainId) -> Self {
        self.primary_domain = Some(domain);
        self
    }

    #[must_use]
    pub fn with_secondary_domains(mut self, domains: Vec<DomainId>) -> Self {
        self.secondary_domains = domains;
        self
    }

    #[must_use]
    pub fn with_affected_app(mut self, app_id: impl Into<String>, action: AppAction) -> Self {
        self.affected_apps.push(AffectedApp {
            app_id: AppId::new(app_id),
            action,
        });
        self
    }

    #[must_use]
    pub fn with_window(mut self, start: impl Into<String>, end: impl Into<String>) -> Self {
        self.start = Some(start.into());
        self.end = Some(end.into());
        self
    }

    #[must_use]
    pub fn with_conformity(mut self, conformity: ConformityStatus) -> Self {
        self.conformity = Some(conformity);
        self
    }
}

impl Process {
    /// New process; an empty id asks the store to assign one
    #[inline]
    #[must_use]
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: ProcessId::new(id),
            name: name.into(),
            domains: Vec::new(),
            application_ids: None,
            description: None,
            owner: None,
        }
    }

    #[must_use]
    pub fn with_domains(mut self, domains: Vec<DomainId>) -> Self {
        self.domains = domains;
        self
    }

    #[must_use]
    pub fn with_application_ids(mut self, app_ids: Vec<AppId>) -> Self {
        self.application_ids = Some(app_ids);
        self
    }
}

impl Demand {
    /// New demand; an empty id asks the store to assign one
    #[inline]
    #[must_use]
    pub fn new(id: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            id: DemandId::new(id),
            title: title.into(),
            description: None,
            primary_domain: None,
            related_domains: Vec::new(),
            related_apps: Vec::new(),
            related_vendors: Vec::new(),
            applicable_regulations: Vec::new(),
            requester: None,
        }
    }
}

impl Integration {
    /// New integration edge; an empty id asks the store to assign one
    #[inline]
    #[must_use]
    pub fn new(id: impl Into<String>, source: impl Into<String>, target: impl Into<String>) -> Self {
        Self {
            id: IntegrationId::new(id),
            source_app_id: AppId::new(source),
            target_app_id: AppId::new(target),
            interface_type: None,
            description: None,
        }
    }
}

impl ComplianceAssessment {
    /// New assessment of one application against one regulation
    #[inline]
    #[must_use]
    pub fn new(app_id: impl Into<String>, regulation: impl Into<String>) -> Self {
        Self {
            app_id: AppId::new(app_id),
            regulation: regulation.into(),
            status: None,
            answers: IndexMap::new(),
        }
    }

    #[must_use]
    pub fn with_status(mut self, status: ComplianceStatus) -> Self {
        self.status = Some(status);
        self
    }

    #[must_use]
    pub fn with_answer(mut self, question: impl Into<String>, status: ComplianceStatus) -> Self {
        self.answers.insert(question.into(), status);
        self
    }
}

// ---------------------------------------------------------------------------
// Patches
//
// `None` always means "leave untouched", never "erase". An optional
// field once set cannot be cleared through a patch; that narrowing is
// deliberate, a cleared field is a record replacement.

/// Shallow-merge patch for [`Domain`]
#[derive(Debug, Clone, Default)]
pub struct DomainPatch {
    pub name: Option<String>,
    pub color: Option<String>,
    pub description: Option<String>,
}

impl Domain {
    pub fn apply(&mut self, patch: DomainPatch) {
        if let Some(name) = patch.name {
            self.name = name;
        }
        if let Some(color) = patch.color {
            self.color = Some(color);
        }
        if let Some(description) = patch.description {
            self.description = Some(description);
        }
    }
}

/// Shallow-merge patch for [`Capability`]
#[derive(Debug, Clone, Default)]
pub struct CapabilityPatch {
    pub name: Option<String>,
    pub maturity: Option<u8>,
    pub target_maturity: Option<u8>,
    pub description: Option<String>,
}

impl Capability {
    pub fn apply(&mut self, patch: CapabilityPatch) {
        if let Some(name) = patch.name {
            self.name = name;
        }
        if let Some(maturity) = patch.maturity {
            self.maturity = maturity;
        }
        if let Some(target) = patch.target_maturity {
            self.target_maturity = Some(target);
        }
        if let Some(description) = patch.description {
            self.description = Some(description);
        }
    }
}

/// Shallow-merge patch for [`Application`]
#[derive(Debug, Clone, Default)]
pub struct ApplicationPatch {
    pub name: Option<String>,
    pub vendor: Option<String>,
    pub vendor_id: Option<VendorId>,
    pub criticality: Option<Criticality>,
    pub time_quadrant: Option<TimeQuadrant>,
    pub end_of_life: Option<NaiveDate>,
    pub end_of_support: Option<NaiveDate>,
    pub description: Option<String>,
    pub owner: Option<String>,
}

impl Application {
    pub fn apply(&mut self, patch: ApplicationPatch) {
        if let Some(name) = patch.name {
            self.name = name;
        }
        if let Some(vendor) = patch.vendor {
            self.vendor = Some(vendor);
        }
        if let Some(vendor_id) = patch.vendor_id {
            self.vendor_id = Some(vendor_id);
        }
        if let Some(criticality) = patch.criticality {
            self.criticality = Some(criticality);
        }
        if let Some(quadrant) = patch.time_quadrant {
            self.time_quadrant = Some(quadrant);
        }
        if let Some(eol) = patch.end_of_life {
            self.end_of_life = Some(eol);
        }
        if let Some(eos) = patch.end_of_support {
            self.end_of_support = Some(eos);
        }
        if let Some(description) = patch.description {
            self.description = Some(description);
        }
        if let Some(owner) = patch.owner {
            self.owner = Some(owner);
        }
    }
}

/// Shallow-merge patch for [`Vendor`]
#[derive(Debug, Clone, Default)]
pub struct VendorPatch {
    pub name: Option<String>,
    pub category: Option<String>,
    pub criticality: Option<Criticality>,
}

impl Vendor {
    pub fn apply(&mut self, patch: VendorPatch) {
        if let Some(name) = patch.name {
            self.name = name;
        }
        if let Some(category) = patch.category {
            self.category = Some(category);
        }
        if let Some(criticality) = patch.criticality {
            self.criticality = Some(criticality);
        }
    }
}

/// Shallow-merge patch for [`Project`]
#[derive(Debug, Clone, Default)]
pub struct ProjectPatch {
    pub name: Option<String>,
    pub description: Option<String>,
    pub primary_domain: Option<DomainId>,
    pub secondary_domains: Option<Vec<DomainId>>,
    pub affected_apps: Option<Vec<AffectedApp>>,
    pub capabilities: Option<Vec<CapabilityId>>,
    pub budget: Option<f64>,
    pub start: Option<String>,
    pub end: Option<String>,
    pub status: Option<ProjectStatus>,
    pub conformity: Option<ConformityStatus>,
}

impl Project {
    pub fn apply(&mut self, patch: ProjectPatch) {
        if let Some(name) = patch.name {
            self.name = name;
        }
        if let Some(description) = patch.description {
            self.description = Some(description);
        }
        if let Some(primary) = patch.primary_domain {
            self.primary_domain = Some(primary);
        }
        if let Some(secondary) = patch.secondary_domains {
            self.secondary_domains = secondary;
        }
        if let Some(apps) = patch.affected_apps {
            self.affected_apps = apps;
        }
        if let Some(capabilities) = patch.capabilities {
            self.capabilities = capabilities;
        }
        if let Some(budget) = patch.budget {
            self.budget = Some(budget);
        }
        if let Some(start) = patch.start {
            self.start = Some(start);
        }
        if let Some(end) = patch.end {
            self.end = Some(end);
        }
        if let Some(status) = patch.status {
            self.status = Some(status);
        }
        if let Some(conformity) = patch.conformity {
            self.conformity = Some(conformity);
        }
    }
}

/// Shallow-merge patch for [`Process`]
#[derive(Debug, Clone, Default)]
pub struct ProcessPatch {
    pub name: Option<String>,
    pub domains: Option<Vec<DomainId>>,
    pub application_ids: Option<Vec<AppId>>,
    pub description: Option<String>,
    pub owner: Option<String>,
}

impl Process {
    pub fn apply(&mut self, patch: ProcessPatch) {
        if let Some(name) = patch.name {
            self.name = name;
        }
        if let Some(domains) = patch.domains {
            self.domains = domains;
        }
        if let Some(app_ids) = patch.application_ids {
            self.application_ids = Some(app_ids);
        }
        if let Some(description) = patch.description {
            self.description = Some(description);
        }
        if let Some(owner) = patch.owner {
            self.owner = Some(owner);
        }
    }
}

/// Shallow-merge patch for [`Demand`]
#[derive(Debug, Clone, Default)]
pub struct DemandPatch {
    pub title: Option<String>,
    pub description: Option<String>,
    pub primary_domain: Option<DomainId>,
    pub related_domains: Option<Vec<DomainId>>,
    pub related_apps: Option<Vec<AppId>>,
    pub related_vendors: Option<Vec<VendorId>>,
    pub applicable_regulations: Option<Vec<String>>,
    pub requester: Option<String>,
}

impl Demand {
    pub fn apply(&mut self, patch: DemandPatch) {
        if let Some(title) = patch.title {
            self.title = title;
        }
        if let Some(description) = patch.description {
            self.description = Some(description);
        }
        if let Some(primary) = patch.primary_domain {
            self.primary_domain = Some(primary);
        }
        if let Some(domains) = patch.related_domains {
            self.related_domains = domains;
        }
        if let Some(apps) = patch.related_apps {
            self.related_apps = apps;
        }
        if let Some(vendors) = patch.related_vendors {
            self.related_vendors = vendors;
        }
        if let Some(regulations) = patch.applicable_regulations {
            self.applicable_regulations = regulations;
        }
        if let Some(requester) = patch.requester {
            self.requester = Some(requester);
        }
    }
}

/// Shallow-merge patch for [`Integration`]
#[derive(Debug, Clone, Default)]
pub struct IntegrationPatch {
    pub source_app_id: Option<AppId>,
    pub target_app_id: Option<AppId>,
    pub interface_type: Option<String>,
    pub description: Option<String>,
}

impl Integration {
    pub fn apply(&mut self, patch: IntegrationPatch) {
        if let Some(source) = patch.source_app_id {
            self.source_app_id = source;
        }
        if let Some(target) = patch.target_app_id {
            self.target_app_id = target;
        }
        if let Some(interface_type) = patch.interface_type {
            self.interface_type = Some(interface_type);
        }
        if let Some(description) = patch.description {
            self.description = Some(description);
        }
    }
}
