//! Reference integrity
//!
//! Every delete funnels through [`cascade`], the one place that knows
//! which collections reference which entity kind. The `Deleted` enum is
//! matched exhaustively, so adding an entity kind forces a decision here
//! instead of leaving a cleanup rule scattered and forgotten.
//!
//! Cascade table:
//!
//! | deleted     | effect                                                        |
//! |-------------|---------------------------------------------------------------|
//! | Domain      | drop owned capabilities' mappings; null/strip domain and owned capability ids from projects, processes, demands |
//! | Capability  | drop mappings of it and its sub-tree; strip from projects      |
//! | Application | drop its mappings, integrations, assessments; strip from projects, demands, explicit process app lists |
//! | Project     | drop dependency edges touching it                              |
//! | Vendor      | null explicit `vendor_id` references; strip from demands       |
//! | Process     | leaf, nothing references it                                    |
//! | Demand      | leaf, nothing references it                                    |
//! | Integration | leaf, nothing references it                                    |

use crate::landscape::Landscape;
use atlas_model::{
    AppId, Capability, CapabilityId, DemandId, Domain, IntegrationId, ProcessId, ProjectId,
    VendorId,
};
use tracing::debug;

/// A just-removed entity, carrying what the cascade needs to know
#[derive(Debug)]
pub(crate) enum Deleted {
    Domain(Domain),
    Capability(Capability),
    Application(AppId),
    Project(ProjectId),
    Vendor(VendorId),
    Process(ProcessId),
    Demand(DemandId),
    Integration(IntegrationId),
}

/// Apply the cascade for one removed entity
pub(crate) fn cascade(landscape: &mut Landscape, deleted: Deleted) {
    match deleted {
        Deleted::Domain(domain) => {
            let owned: Vec<CapabilityId> = domain
                .all_capabilities()
                .map(|c| c.id.clone())
                .collect();
            scrub_capability_refs(landscape, &owned);
            for project in &mut landscape.projects {
                if project.primary_domain == Some(domain.id) {
                    project.primary_domain = None;
                }
                project.secondary_domains.retain(|d| *d != domain.id);
            }
            for process in &mut landscape.e2e_processes {
                process.domains.retain(|d| *d != domain.id);
            }
            for demand in &mut landscape.demands {
                if demand.primary_domain == Some(domain.id) {
                    demand.primary_domain = None;
                }
                demand.related_domains.retain(|d| *d != domain.id);
            }
            debug!(domain = %domain.id, capabilities = owned.len(), "cascaded domain delete");
        }
        Deleted::Capability(capability) => {
            let owned: Vec<CapabilityId> = capability
                .self_and_subs()
                .map(|c| c.id.clone())
                .collect();
            scrub_capability_refs(landscape, &owned);
            debug!(capability = %capability.id, "cascaded capability delete");
        }
        Deleted::Application(app_id) => {
            landscape
                .capability_mappings
                .retain(|m| m.application_id != app_id);
            for project in &mut landscape.projects {
                project.affected_apps.retain(|a| a.app_id != app_id);
            }
            landscape
                .integrations
                .retain(|i| i.source_app_id != app_id && i.target_app_id != app_id);
            landscape
                .compliance_assessments
                .retain(|a| a.app_id != app_id);
            for demand in &mut landscape.demands {
                demand.related_apps.retain(|a| *a != app_id);
            }
            for process in &mut landscape.e2e_processes {
                if let Some(app_ids) = &mut process.application_ids {
                    app_ids.retain(|a| *a != app_id);
                }
            }
            debug!(app = %app_id, "cascaded application delete");
        }
        Deleted::Project(project_id) => {
            landscape.project_dependencies.retain(|d| {
                d.source_project_id != project_id && d.target_project_id != project_id
            });
            debug!(project = %project_id, "cascaded project delete");
        }
        Deleted::Vendor(vendor_id) => {
            for app in &mut landscape.applications {
                if app.vendor_id.as_ref() == Some(&vendor_id) {
                    app.vendor_id = None;
                }
            }
            for demand in &mut landscape.demands {
                demand.related_vendors.retain(|v| *v != vendor_id);
            }
            debug!(vendor = %vendor_id, "cascaded vendor delete");
        }
        // Leaf entities: nothing in the store references them.
        Deleted::Process(_) | Deleted::Demand(_) | Deleted::Integration(_) => {}
    }
}

/// Drop mappings of the given capabilities and strip them from projects
fn scrub_capability_refs(landscape: &mut Landscape, owned: &[CapabilityId]) {
    landscape
        .capability_mappings
        .retain(|m| !owned.contains(&m.capability_id));
    for project in &mut landscape.projects {
        project.capabilities.retain(|c| !owned.contains(c));
    }
}
