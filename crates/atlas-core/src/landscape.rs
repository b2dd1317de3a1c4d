//! The landscape repository
//!
//! Canonical owner of every entity collection. Constructed once per
//! process and passed by reference; there is no ambient global store.
//! All mutation goes through `add_* / update_* / delete_*` methods:
//! - `add_*` assigns an id when the record carries none, validates
//!   foreign keys and value ranges, and returns the assigned id
//! - `update_*` is a no-op on an unknown id (callers cannot distinguish
//!   "updated" from "nothing to do" -- a documented limitation that
//!   tolerates UI races)
//! - `delete_*` removes the record and runs the reference-integrity
//!   cascade before returning

use crate::error::LandscapeError;
use crate::integrity::{self, Deleted};
use crate::mapping::MappingState;
use atlas_model::{
    entity, ids, AffectedApp, AppId, Application, ApplicationPatch, Capability, CapabilityId,
    CapabilityMapping, CapabilityPatch, ComplianceAssessment, Demand, DemandId, DemandPatch,
    Domain, DomainId, DomainPatch, Integration, IntegrationId, IntegrationPatch, LandscapeDocument,
    MappingRole, Process, ProcessId, ProcessPatch, Project, ProjectDependency, ProjectId,
    ProjectPatch, Vendor, VendorId, VendorPatch,
};
use tracing::{debug, info, warn};

/// In-memory entity store for one EA landscape
#[derive(Debug, Clone, Default)]
pub struct Landscape {
    pub(crate) meta: serde_json::Value,
    pub(crate) domains: Vec<Domain>,
    pub(crate) applications: Vec<Application>,
    pub(crate) capability_mappings: Vec<CapabilityMapping>,
    pub(crate) projects: Vec<Project>,
    pub(crate) project_dependencies: Vec<ProjectDependency>,
    pub(crate) management_kpis: Vec<serde_json::Value>,
    pub(crate) vendors: Vec<Vendor>,
    pub(crate) e2e_processes: Vec<Process>,
    pub(crate) demands: Vec<Demand>,
    pub(crate) integrations: Vec<Integration>,
    pub(crate) compliance_assessments: Vec<ComplianceAssessment>,
    pub(crate) enums: serde_json::Value,
}

impl Landscape {
    /// Empty landscape
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    // -- document boundary --------------------------------------------------

    /// Build a landscape from a loaded document
    #[must_use]
    pub fn from_document(doc: LandscapeDocument) -> Self {
        Self {
            meta: doc.meta,
            domains: doc.domains,
            applications: doc.applications,
            capability_mappings: doc.capability_mappings,
            projects: doc.projects,
            project_dependencies: doc.project_dependencies,
            management_kpis: doc.management_kpis,
            vendors: doc.vendors,
            e2e_processes: doc.e2e_processes,
            demands: doc.demands,
            integrations: doc.integrations,
            compliance_assessments: doc.compliance_assessments,
            enums: doc.enums,
        }
    }

    /// Parse and load a persisted JSON document
    ///
    /// # Errors
    /// A malformed document, or one carrying a maturity outside the 1-5
    /// scale, is rejected without constructing a store, so a caller
    /// holding an existing `Landscape` keeps it untouched and can fall
    /// back to seed data.
    pub fn from_json(json: &str) -> Result<Self, LandscapeError> {
        let doc: LandscapeDocument = serde_json::from_str(json).map_err(|err| {
            warn!(%err, "rejected malformed landscape document");
            LandscapeError::Document(err)
        })?;
        let landscape = Self::from_document(doc);
        for domain in &landscape.domains {
            if let Err(err) = validate_capability_tree(&domain.capabilities) {
                warn!(%err, domain = %domain.id, "rejected landscape document with invalid maturity");
                return Err(err);
            }
        }
        info!(
            domains = landscape.domains.len(),
            applications = landscape.applications.len(),
            projects = landscape.projects.len(),
            "loaded landscape document"
        );
        Ok(landscape)
    }

    /// Snapshot the current state into the persisted document shape
    #[must_use]
    pub fn to_document(&self) -> LandscapeDocument {
        LandscapeDocument {
            meta: self.meta.clone(),
            domains: self.domains.clone(),
            applications: self.applications.clone(),
            capability_mappings: self.capability_mappings.clone(),
            projects: self.projects.clone(),
            project_dependencies: self.project_dependencies.clone(),
            management_kpis: self.management_kpis.clone(),
            vendors: self.vendors.clone(),
            e2e_processes: self.e2e_processes.clone(),
            demands: self.demands.clone(),
            integrations: self.integrations.clone(),
            compliance_assessments: self.compliance_assessments.clone(),
            enums: self.enums.clone(),
        }
    }

    /// Serialize the current state for the external persistence store
    ///
    /// # Errors
    /// Only on serializer failure, which a well-formed store never hits.
    pub fn to_json(&self) -> Result<String, LandscapeError> {
        Ok(serde_json::to_string(&self.to_document())?)
    }

    // -- collection accessors ------------------------------------------------

    #[must_use]
    pub fn domains(&self) -> &[Domain] {
        &self.domains
    }

    #[must_use]
    pub fn applications(&self) -> &[Application] {
        &self.applications
    }

    #[must_use]
    pub fn capability_mappings(&self) -> &[CapabilityMapping] {
        &self.capability_mappings
    }

    #[must_use]
    pub fn projects(&self) -> &[Project] {
        &self.projects
    }

    #[must_use]
    pub fn project_dependencies(&self) -> &[ProjectDependency] {
        &self.project_dependencies
    }

    #[must_use]
    pub fn vendors(&self) -> &[Vendor] {
        &self.vendors
    }

    #[must_use]
    pub fn processes(&self) -> &[Process] {
        &self.e2e_processes
    }

    #[must_use]
    pub fn demands(&self) -> &[Demand] {
        &self.demands
    }

    #[must_use]
    pub fn integrations(&self) -> &[Integration] {
        &self.integrations
    }

    #[must_use]
    pub fn compliance_assessments(&self) -> &[ComplianceAssessment] {
        &self.compliance_assessments
    }

    // -- defensive lookups ---------------------------------------------------

    #[must_use]
    pub fn domain_by_id(&self, id: DomainId) -> Option<&Domain> {
        self.domains.iter().find(|d| d.id == id)
    }

    /// Find a capability anywhere in any domain's tree
    #[must_use]
    pub fn capability_by_id(&self, id: &CapabilityId) -> Option<&Capability> {
        self.domains
            .iter()
            .flat_map(Domain::all_capabilities)
            .find(|c| c.id == *id)
    }

    /// The domain owning a capability, resolved through the live tree
    #[must_use]
    pub fn domain_of_capability(&self, id: &CapabilityId) -> Option<&Domain> {
        self.domains
            .iter()
            .find(|d| d.all_capabilities().any(|c| c.id == *id))
    }

    #[must_use]
    pub fn application_by_id(&self, id: &AppId) -> Option<&Application> {
        self.applications.iter().find(|a| a.id == *id)
    }

    #[must_use]
    pub fn vendor_by_id(&self, id: &VendorId) -> Option<&Vendor> {
        self.vendors.iter().find(|v| v.id == *id)
    }

    #[must_use]
    pub fn project_by_id(&self, id: &ProjectId) -> Option<&Project> {
        self.projects.iter().find(|p| p.id == *id)
    }

    #[must_use]
    pub fn process_by_id(&self, id: &ProcessId) -> Option<&Process> {
        self.e2e_processes.iter().find(|p| p.id == *id)
    }

    #[must_use]
    pub fn demand_by_id(&self, id: &DemandId) -> Option<&Demand> {
        self.demands.iter().find(|d| d.id == *id)
    }

    #[must_use]
    pub fn integration_by_id(&self, id: &IntegrationId) -> Option<&Integration> {
        self.integrations.iter().find(|i| i.id == *id)
    }

    /// Assessment of one application against one regulation
    #[must_use]
    pub fn assessment_for(&self, app: &AppId, regulation: &str) -> Option<&ComplianceAssessment> {
        self.compliance_assessments
            .iter()
            .find(|a| a.app_id == *app && a.regulation == regulation)
    }

    /// Role of the (capability, application) mapping cell, if mapped
    #[must_use]
    pub fn mapping_role(&self, cap: &CapabilityId, app: &AppId) -> Option<MappingRole> {
        self.capability_mappings
            .iter()
            .find(|m| m.capability_id == *cap && m.application_id == *app)
            .map(|m| m.role)
    }

    // -- domains -------------------------------------------------------------

    /// Add a domain; `DomainId(0)` means "assign the next id"
    ///
    /// Embedded capabilities are validated and get dotted ids assigned
    /// where missing.
    ///
    /// # Errors
    /// Duplicate preset id (the domain's own, or any capability id in
    /// the embedded tree) or a maturity outside the 1-5 scale.
    pub fn add_domain(&mut self, mut domain: Domain) -> Result<DomainId, LandscapeError> {
        validate_capability_tree(&domain.capabilities)?;
        self.require_fresh_capability_ids(&domain.capabilities, &mut Vec::new())?;
        if domain.id.0 == 0 {
            domain.id = ids::next_domain_id(self.domains.iter().map(|d| d.id));
        } else if self.domain_by_id(domain.id).is_some() {
            return Err(LandscapeError::duplicate("domain", domain.id));
        }
        assign_capability_ids(&domain.id.to_string(), &mut domain.capabilities);
        let id = domain.id;
        debug!(domain = %id, "added domain");
        self.domains.push(domain);
        Ok(id)
    }

    /// Patch a domain; no-op when the id is unknown
    pub fn update_domain(&mut self, id: DomainId, patch: DomainPatch) {
        if let Some(domain) = self.domains.iter_mut().find(|d| d.id == id) {
            domain.apply(patch);
        }
    }

    /// Delete a domain and cascade over everything referencing it or its
    /// capabilities; no-op when the id is unknown
    pub fn delete_domain(&mut self, id: DomainId) {
        if let Some(pos) = self.domains.iter().position(|d| d.id == id) {
            let removed = self.domains.remove(pos);
            integrity::cascade(self, Deleted::Domain(removed));
        }
    }

    // -- capabilities --------------------------------------------------------

    /// Add a top-level capability to a domain; an empty id gets the next
    /// `{domainId}.{n}` assigned
    ///
    /// # Errors
    /// Unknown domain, duplicate preset id anywhere in the added tree,
    /// or maturity out of range.
    pub fn add_capability(
        &mut self,
        domain_id: DomainId,
        mut capability: Capability,
    ) -> Result<CapabilityId, LandscapeError> {
        validate_capability_tree(std::slice::from_ref(&capability))?;
        self.require_fresh_capability_ids(std::slice::from_ref(&capability), &mut Vec::new())?;
        let domain = self
            .domains
            .iter_mut()
            .find(|d| d.id == domain_id)
            .ok_or_else(|| LandscapeError::unknown("domain", domain_id))?;
        if capability.id.as_str().is_empty() {
            let existing: Vec<&str> = domain.capabilities.iter().map(|c| c.id.as_str()).collect();
            capability.id = CapabilityId::new(ids::next_dotted_id(
                &domain_id.to_string(),
                existing.into_iter(),
            ));
        }
        assign_capability_ids(capability.id.as_str(), &mut capability.sub_capabilities);
        let id = capability.id.clone();
        domain.capabilities.push(capability);
        Ok(id)
    }

    /// Add a sub-capability under an existing capability; an empty id
    /// gets the next `{parentId}.{n}` assigned
    ///
    /// # Errors
    /// Unknown parent, duplicate preset id anywhere in the added tree,
    /// or maturity out of range.
    pub fn add_sub_capability(
        &mut self,
        parent: &CapabilityId,
        mut capability: Capability,
    ) -> Result<CapabilityId, LandscapeError> {
        validate_capability_tree(std::slice::from_ref(&capability))?;
        self.require_fresh_capability_ids(std::slice::from_ref(&capability), &mut Vec::new())?;
        let Some(parent_cap) = find_capability_mut(&mut self.domains, parent) else {
            return Err(LandscapeError::unknown("capability", parent));
        };
        if capability.id.as_str().is_empty() {
            let existing: Vec<&str> = parent_cap
                .sub_capabilities
                .iter()
                .map(|c| c.id.as_str())
                .collect();
            capability.id =
                CapabilityId::new(ids::next_dotted_id(parent.as_str(), existing.into_iter()));
        }
        assign_capability_ids(capability.id.as_str(), &mut capability.sub_capabilities);
        let id = capability.id.clone();
        parent_cap.sub_capabilities.push(capability);
        Ok(id)
    }

    /// Patch a capability anywhere in the tree; no-op when unknown
    ///
    /// # Errors
    /// Maturity out of range in the patch.
    pub fn update_capability(
        &mut self,
        id: &CapabilityId,
        patch: CapabilityPatch,
    ) -> Result<(), LandscapeError> {
        if let Some(value) = patch.maturity {
            entity::validate_maturity(value)?;
        }
        if let Some(value) = patch.target_maturity {
            entity::validate_maturity(value)?;
        }
        if let Some(capability) = find_capability_mut(&mut self.domains, id) {
            capability.apply(patch);
        }
        Ok(())
    }

    /// Delete a capability (and its sub-tree) and cascade over mappings
    /// and project references; no-op when unknown
    pub fn delete_capability(&mut self, id: &CapabilityId) {
        let mut removed = None;
        for domain in &mut self.domains {
            if let Some(capability) = remove_capability(&mut domain.capabilities, id) {
                removed = Some(capability);
                break;
            }
        }
        if let Some(capability) = removed {
            integrity::cascade(self, Deleted::Capability(capability));
        }
    }

    // -- applications --------------------------------------------------------

    /// Add an application; an empty id gets the next `APP-nnn` assigned
    ///
    /// # Errors
    /// Duplicate preset id or unknown `vendor_id`.
    pub fn add_application(&mut self, mut app: Application) -> Result<AppId, LandscapeError> {
        if let Some(vendor_id) = &app.vendor_id {
            self.require_vendor(vendor_id)?;
        }
        if app.id.as_str().is_empty() {
            app.id = AppId::new(ids::next_prefixed_id(
                "APP",
                self.applications.iter().map(|a| a.id.as_str()),
            ));
        } else if self.application_by_id(&app.id).is_some() {
            return Err(LandscapeError::duplicate("application", &app.id));
        }
        let id = app.id.clone();
        debug!(app = %id, "added application");
        self.applications.push(app);
        Ok(id)
    }

    /// Patch an application; no-op when the id is unknown
    ///
    /// # Errors
    /// Unknown `vendor_id` in the patch.
    pub fn update_application(
        &mut self,
        id: &AppId,
        patch: ApplicationPatch,
    ) -> Result<(), LandscapeError> {
        if let Some(vendor_id) = &patch.vendor_id {
            self.require_vendor(vendor_id)?;
        }
        if let Some(app) = self.applications.iter_mut().find(|a| a.id == *id) {
            app.apply(patch);
        }
        Ok(())
    }

    /// Delete an application and cascade over mappings, projects,
    /// integrations, demands, processes and assessments; no-op when unknown
    pub fn delete_application(&mut self, id: &AppId) {
        if let Some(pos) = self.applications.iter().position(|a| a.id == *id) {
            let removed = self.applications.remove(pos);
            integrity::cascade(self, Deleted::Application(removed.id));
        }
    }

    // -- vendors -------------------------------------------------------------

    /// Add a vendor; an empty id gets the next `VND-nnn` assigned
    ///
    /// # Errors
    /// Duplicate preset id.
    pub fn add_vendor(&mut self, mut vendor: Vendor) -> Result<VendorId, LandscapeError> {
        if vendor.id.as_str().is_empty() {
            vendor.id = VendorId::new(ids::next_prefixed_id(
                "VND",
                self.vendors.iter().map(|v| v.id.as_str()),
            ));
        } else if self.vendor_by_id(&vendor.id).is_some() {
            return Err(LandscapeError::duplicate("vendor", &vendor.id));
        }
        let id = vendor.id.clone();
        self.vendors.push(vendor);
        Ok(id)
    }

    /// Patch a vendor; no-op when the id is unknown
    pub fn update_vendor(&mut self, id: &VendorId, patch: VendorPatch) {
        if let Some(vendor) = self.vendors.iter_mut().find(|v| v.id == *id) {
            vendor.apply(patch);
        }
    }

    /// Delete a vendor; explicit `vendor_id` references are nulled, the
    /// legacy name string on applications is left alone
    pub fn delete_vendor(&mut self, id: &VendorId) {
        if let Some(pos) = self.vendors.iter().position(|v| v.id == *id) {
            let removed = self.vendors.remove(pos);
            integrity::cascade(self, Deleted::Vendor(removed.id));
        }
    }

    // -- projects ------------------------------------------------------------

    /// Add a project; an empty id gets the next `PRJ-nnn` assigned
    ///
    /// # Errors
    /// Duplicate preset id or any unknown domain/application/capability
    /// reference.
    pub fn add_project(&mut self, mut project: Project) -> Result<ProjectId, LandscapeError> {
        self.validate_project_refs(
            project.primary_domain,
            &project.secondary_domains,
            &project.affected_apps,
            &project.capabilities,
        )?;
        if project.id.as_str().is_empty() {
            project.id = ProjectId::new(ids::next_prefixed_id(
                "PRJ",
                self.projects.iter().map(|p| p.id.as_str()),
            ));
        } else if self.project_by_id(&project.id).is_some() {
            return Err(LandscapeError::duplicate("project", &project.id));
        }
        let id = project.id.clone();
        debug!(project = %id, "added project");
        self.projects.push(project);
        Ok(id)
    }

    /// Patch a project; no-op when the id is unknown
    ///
    /// # Errors
    /// Any unknown reference carried by the patch.
    pub fn update_project(
        &mut self,
        id: &ProjectId,
        patch: ProjectPatch,
    ) -> Result<(), LandscapeError> {
        self.validate_project_refs(
            patch.primary_domain,
            patch.secondary_domains.as_deref().unwrap_or(&[]),
            patch.affected_apps.as_deref().unwrap_or(&[]),
            patch.capabilities.as_deref().unwrap_or(&[]),
        )?;
        if let Some(project) = self.projects.iter_mut().find(|p| p.id == *id) {
            project.apply(patch);
        }
        Ok(())
    }

    /// Delete a project and drop its dependency edges; no-op when unknown
    pub fn delete_project(&mut self, id: &ProjectId) {
        if let Some(pos) = self.projects.iter().position(|p| p.id == *id) {
            let removed = self.projects.remove(pos);
            integrity::cascade(self, Deleted::Project(removed.id));
        }
    }

    /// Add a directed dependency edge between two existing projects
    ///
    /// # Errors
    /// Unknown source or target project.
    pub fn add_dependency(&mut self, dep: ProjectDependency) -> Result<(), LandscapeError> {
        self.require_project(&dep.source_project_id)?;
        self.require_project(&dep.target_project_id)?;
        self.project_dependencies.push(dep);
        Ok(())
    }

    /// Remove every dependency edge between the two projects
    pub fn remove_dependency(&mut self, source: &ProjectId, target: &ProjectId) {
        self.project_dependencies
            .retain(|d| !(d.source_project_id == *source && d.target_project_id == *target));
    }

    // -- processes -----------------------------------------------------------

    /// Add an end-to-end process; an empty id gets the next `E2E-nnn`
    ///
    /// # Errors
    /// Duplicate preset id or unknown domain/application reference.
    pub fn add_process(&mut self, mut process: Process) -> Result<ProcessId, LandscapeError> {
        for domain in &process.domains {
            self.require_domain(*domain)?;
        }
        for app in process.application_ids.as_deref().unwrap_or(&[]) {
            self.require_app(app)?;
        }
        if process.id.as_str().is_empty() {
            process.id = ProcessId::new(ids::next_prefixed_id(
                "E2E",
                self.e2e_processes.iter().map(|p| p.id.as_str()),
            ));
        } else if self.process_by_id(&process.id).is_some() {
            return Err(LandscapeError::duplicate("process", &process.id));
        }
        let id = process.id.clone();
        self.e2e_processes.push(process);
        Ok(id)
    }

    /// Patch a process; no-op when the id is unknown
    ///
    /// # Errors
    /// Any unknown reference carried by the patch.
    pub fn update_process(
        &mut self,
        id: &ProcessId,
        patch: ProcessPatch,
    ) -> Result<(), LandscapeError> {
        for domain in patch.domains.as_deref().unwrap_or(&[]) {
            self.require_domain(*domain)?;
        }
        for app in patch.application_ids.as_deref().unwrap_or(&[]) {
            self.require_app(app)?;
        }
        if let Some(process) = self.e2e_processes.iter_mut().find(|p| p.id == *id) {
            process.apply(patch);
        }
        Ok(())
    }

    /// Delete a process; a leaf entity, nothing references it
    pub fn delete_process(&mut self, id: &ProcessId) {
        if let Some(pos) = self.e2e_processes.iter().position(|p| p.id == *id) {
            let removed = self.e2e_processes.remove(pos);
            integrity::cascade(self, Deleted::Process(removed.id));
        }
    }

    // -- demands -------------------------------------------------------------

    /// Add a demand; an empty id gets the next `DEM-nnn` assigned
    ///
    /// # Errors
    /// Duplicate preset id or any unknown reference.
    pub fn add_demand(&mut self, mut demand: Demand) -> Result<DemandId, LandscapeError> {
        if let Some(domain) = demand.primary_domain {
            self.require_domain(domain)?;
        }
        for domain in &demand.related_domains {
            self.require_domain(*domain)?;
        }
        for app in &demand.related_apps {
            self.require_app(app)?;
        }
        for vendor in &demand.related_vendors {
            self.require_vendor(vendor)?;
        }
        if demand.id.as_str().is_empty() {
            demand.id = DemandId::new(ids::next_prefixed_id(
                "DEM",
                self.demands.iter().map(|d| d.id.as_str()),
            ));
        } else if self.demand_by_id(&demand.id).is_some() {
            return Err(LandscapeError::duplicate("demand", &demand.id));
        }
        let id = demand.id.clone();
        self.demands.push(demand);
        Ok(id)
    }

    /// Patch a demand; no-op when the id is unknown
    ///
    /// # Errors
    /// Any unknown reference carried by the patch.
    pub fn update_demand(&mut self, id: &DemandId, patch: DemandPatch) -> Result<(), LandscapeError> {
        if let Some(domain) = patch.primary_domain {
            self.require_domain(domain)?;
        }
        for domain in patch.related_domains.as_deref().unwrap_or(&[]) {
            self.require_domain(*domain)?;
        }
        for app in patch.related_apps.as_deref().unwrap_or(&[]) {
            self.require_app(app)?;
        }
        for vendor in patch.related_vendors.as_deref().unwrap_or(&[]) {
            self.require_vendor(vendor)?;
        }
        if let Some(demand) = self.demands.iter_mut().find(|d| d.id == *id) {
            demand.apply(patch);
        }
        Ok(())
    }

    /// Delete a demand; a leaf entity, nothing references it
    pub fn delete_demand(&mut self, id: &DemandId) {
        if let Some(pos) = self.demands.iter().position(|d| d.id == *id) {
            let removed = self.demands.remove(pos);
            integrity::cascade(self, Deleted::Demand(removed.id));
        }
    }

    // -- integrations --------------------------------------------------------

    /// Add an integration edge; an empty id gets the next `INT-nnn`
    ///
    /// # Errors
    /// Duplicate preset id or unknown endpoint application.
    pub fn add_integration(
        &mut self,
        mut integration: Integration,
    ) -> Result<IntegrationId, LandscapeError> {
        self.require_app(&integration.source_app_id)?;
        self.require_app(&integration.target_app_id)?;
        if integration.id.as_str().is_empty() {
            integration.id = IntegrationId::new(ids::next_prefixed_id(
                "INT",
                self.integrations.iter().map(|i| i.id.as_str()),
            ));
        } else if self.integration_by_id(&integration.id).is_some() {
            return Err(LandscapeError::duplicate("integration", &integration.id));
        }
        let id = integration.id.clone();
        self.integrations.push(integration);
        Ok(id)
    }

    /// Patch an integration; no-op when the id is unknown
    ///
    /// # Errors
    /// Unknown endpoint application in the patch.
    pub fn update_integration(
        &mut self,
        id: &IntegrationId,
        patch: IntegrationPatch,
    ) -> Result<(), LandscapeError> {
        if let Some(source) = &patch.source_app_id {
            self.require_app(source)?;
        }
        if let Some(target) = &patch.target_app_id {
            self.require_app(target)?;
        }
        if let Some(integration) = self.integrations.iter_mut().find(|i| i.id == *id) {
            integration.apply(patch);
        }
        Ok(())
    }

    /// Delete an integration; a leaf entity, nothing references it
    pub fn delete_integration(&mut self, id: &IntegrationId) {
        if let Some(pos) = self.integrations.iter().position(|i| i.id == *id) {
            let removed = self.integrations.remove(pos);
            integrity::cascade(self, Deleted::Integration(removed.id));
        }
    }

    // -- compliance assessments ----------------------------------------------

    /// Insert or replace the assessment for (application, regulation)
    ///
    /// # Errors
    /// Unknown application.
    pub fn set_assessment(
        &mut self,
        assessment: ComplianceAssessment,
    ) -> Result<(), LandscapeError> {
        self.require_app(&assessment.app_id)?;
        if let Some(existing) = self
            .compliance_assessments
            .iter_mut()
            .find(|a| a.app_id == assessment.app_id && a.regulation == assessment.regulation)
        {
            *existing = assessment;
        } else {
            self.compliance_assessments.push(assessment);
        }
        Ok(())
    }

    /// Delete the assessment for (application, regulation); no-op when absent
    pub fn delete_assessment(&mut self, app: &AppId, regulation: &str) {
        self.compliance_assessments
            .retain(|a| !(a.app_id == *app && a.regulation == regulation));
    }

    // -- capability mappings -------------------------------------------------

    /// Link an application to a capability; idempotent on the pair
    ///
    /// A second call for an already-mapped pair leaves the existing
    /// mapping (role included) untouched.
    ///
    /// # Errors
    /// Unknown capability or application.
    pub fn add_mapping(
        &mut self,
        capability_id: CapabilityId,
        application_id: AppId,
        role: MappingRole,
    ) -> Result<(), LandscapeError> {
        self.require_capability(&capability_id)?;
        self.require_app(&application_id)?;
        if self.mapping_role(&capability_id, &application_id).is_some() {
            return Ok(());
        }
        self.capability_mappings.push(CapabilityMapping {
            capability_id,
            application_id,
            role,
        });
        Ok(())
    }

    /// Remove the mapping for the exact (capability, application) pair
    pub fn remove_mapping(&mut self, capability_id: &CapabilityId, application_id: &AppId) {
        self.capability_mappings
            .retain(|m| !(m.capability_id == *capability_id && m.application_id == *application_id));
    }

    /// Advance the (capability, application) cell one step through the
    /// toggle cycle: Absent -> Primary -> Secondary -> Absent
    ///
    /// # Errors
    /// Unknown capability or application when creating the mapping.
    pub fn toggle_mapping(
        &mut self,
        capability_id: &CapabilityId,
        application_id: &AppId,
    ) -> Result<MappingState, LandscapeError> {
        let current = MappingState::from(self.mapping_role(capability_id, application_id));
        let next = current.toggled();
        match next {
            MappingState::Primary => {
                self.add_mapping(
                    capability_id.clone(),
                    application_id.clone(),
                    MappingRole::Primary,
                )?;
            }
            MappingState::Secondary => {
                if let Some(mapping) = self.capability_mappings.iter_mut().find(|m| {
                    m.capability_id == *capability_id && m.application_id == *application_id
                }) {
                    mapping.role = MappingRole::Secondary;
                }
            }
            MappingState::Absent => {
                self.remove_mapping(capability_id, application_id);
            }
        }
        Ok(next)
    }

    // -- reference checks ----------------------------------------------------

    fn require_domain(&self, id: DomainId) -> Result<(), LandscapeError> {
        if self.domain_by_id(id).is_some() {
            Ok(())
        } else {
            Err(LandscapeError::unknown("domain", id))
        }
    }

    fn require_app(&self, id: &AppId) -> Result<(), LandscapeError> {
        if self.application_by_id(id).is_some() {
            Ok(())
        } else {
            Err(LandscapeError::unknown("application", id))
        }
    }

    fn require_vendor(&self, id: &VendorId) -> Result<(), LandscapeError> {
        if self.vendor_by_id(id).is_some() {
            Ok(())
        } else {
            Err(LandscapeError::unknown("vendor", id))
        }
    }

    fn require_project(&self, id: &ProjectId) -> Result<(), LandscapeError> {
        if self.project_by_id(id).is_some() {
            Ok(())
        } else {
            Err(LandscapeError::unknown("project", id))
        }
    }

    /// Reject preset capability ids that repeat within the added tree or
    /// already exist anywhere in the store; empty ids (assigned later)
    /// are exempt
    fn require_fresh_capability_ids<'a>(
        &self,
        caps: &'a [Capability],
        seen: &mut Vec<&'a CapabilityId>,
    ) -> Result<(), LandscapeError> {
        for cap in caps {
            if !cap.id.as_str().is_empty() {
                if seen.contains(&&cap.id) || self.capability_by_id(&cap.id).is_some() {
                    return Err(LandscapeError::duplicate("capability", &cap.id));
                }
                seen.push(&cap.id);
            }
            self.require_fresh_capability_ids(&cap.sub_capabilities, seen)?;
        }
        Ok(())
    }

    fn require_capability(&self, id: &CapabilityId) -> Result<(), LandscapeError> {
        if self.capability_by_id(id).is_some() {
            Ok(())
        } else {
            Err(LandscapeError::unknown("capability", id))
        }
    }

    fn validate_project_refs(
        &self,
        primary: Option<DomainId>,
        secondary: &[DomainId],
        affected: &[AffectedApp],
        capabilities: &[CapabilityId],
    ) -> Result<(), LandscapeError> {
        if let Some(domain) = primary {
            self.require_domain(domain)?;
        }
        for domain in secondary {
            self.require_domain(*domain)?;
        }
        for affected_app in affected {
            self.require_app(&affected_app.app_id)?;
        }
        for capability in capabilities {
            self.require_capability(capability)?;
        }
        Ok(())
    }
}

// -- capability tree helpers ------------------------------------------------

fn validate_capability_tree(caps: &[Capability]) -> Result<(), LandscapeError> {
    for cap in caps {
        entity::validate_maturity(cap.maturity)?;
        if let Some(target) = cap.target_maturity {
            entity::validate_maturity(target)?;
        }
        validate_capability_tree(&cap.sub_capabilities)?;
    }
    Ok(())
}

fn assign_capability_ids(parent: &str, caps: &mut Vec<Capability>) {
    for i in 0..caps.len() {
        if caps[i].id.as_str().is_empty() {
            let existing: Vec<String> =
                caps.iter().map(|c| c.id.as_str().to_string()).collect();
            caps[i].id = CapabilityId::new(ids::next_dotted_id(
                parent,
                existing.iter().map(String::as_str),
            ));
        }
        let own_id = caps[i].id.as_str().to_string();
        assign_capability_ids(&own_id, &mut caps[i].sub_capabilities);
    }
}

fn find_capability_mut<'a>(
    domains: &'a mut [Domain],
    id: &CapabilityId,
) -> Option<&'a mut Capability> {
    for domain in domains {
        if let Some(found) = find_in_tree_mut(&mut domain.capabilities, id) {
            return Some(found);
        }
    }
    None
}

fn find_in_tree_mut<'a>(
    caps: &'a mut [Capability],
    id: &CapabilityId,
) -> Option<&'a mut Capability> {
    for cap in caps {
        if cap.id == *id {
            return Some(cap);
        }
        if let Some(found) = find_in_tree_mut(&mut cap.sub_capabilities, id) {
            return Some(found);
        }
    }
    None
}

fn remove_capability(caps: &mut Vec<Capability>, id: &CapabilityId) -> Option<Capability> {
    if let Some(pos) = caps.iter().position(|c| c.id == *id) {
        return Some(caps.remove(pos));
    }
    for cap in caps {
        if let Some(removed) = remove_capability(&mut cap.sub_capabilities, id) {
            return Some(removed);
        }
    }
    None
}
