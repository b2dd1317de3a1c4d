//! Derivation engine
//!
//! Read-only joins reconstructing cross-entity views on demand. All
//! functions are pure over `&Landscape`, safe to call after every
//! mutation, and defensive: a dangling id in a link record is silently
//! skipped, never surfaced as an error.
//!
//! Everything here is a linear scan. At the expected scale (hundreds of
//! records) that is fine; a capabilityId -> mappings index would be the
//! first thing to add if it is not.

use crate::landscape::Landscape;
use atlas_model::{
    AppId, Application, Capability, CapabilityId, DomainId, MappingRole, Process, ProcessId,
    Project, Vendor, VendorId,
};
use indexmap::IndexMap;
use std::collections::HashSet;

/// An application linked to a capability, annotated with its role
#[derive(Debug, Clone)]
pub struct MappedApplication<'a> {
    pub application: &'a Application,
    pub role: MappingRole,
}

/// A capability linked to an application, annotated with its role
#[derive(Debug, Clone)]
pub struct MappedCapability<'a> {
    pub capability: &'a Capability,
    pub role: MappingRole,
}

/// An application reached by a process, with how it got pulled in
#[derive(Debug, Clone)]
pub struct ProcessApp<'a> {
    pub application: &'a Application,
    /// Distinct roles across the capabilities that reached this app
    pub roles: Vec<MappingRole>,
    /// How many capabilities pulled the app in
    pub capability_count: usize,
}

/// Applications realizing a capability
#[must_use]
pub fn apps_for_capability<'a>(
    landscape: &'a Landscape,
    capability: &CapabilityId,
) -> Vec<MappedApplication<'a>> {
    landscape
        .capability_mappings()
        .iter()
        .filter(|m| m.capability_id == *capability)
        .filter_map(|m| {
            landscape
                .application_by_id(&m.application_id)
                .map(|application| MappedApplication {
                    application,
                    role: m.role,
                })
        })
        .collect()
}

/// Capabilities realized by an application
#[must_use]
pub fn capabilities_for_app<'a>(landscape: &'a Landscape, app: &AppId) -> Vec<MappedCapability<'a>> {
    landscape
        .capability_mappings()
        .iter()
        .filter(|m| m.application_id == *app)
        .filter_map(|m| {
            landscape
                .capability_by_id(&m.capability_id)
                .map(|capability| MappedCapability {
                    capability,
                    role: m.role,
                })
        })
        .collect()
}

/// Processes whose domain list contains the domain
#[must_use]
pub fn processes_for_domain(landscape: &Landscape, domain: DomainId) -> Vec<&Process> {
    landscape
        .processes()
        .iter()
        .filter(|p| p.domains.contains(&domain))
        .collect()
}

/// Applications touched by a process
///
/// An explicit `application_ids` list on the process overrides the
/// derivation. Otherwise the chain is process domains -> their
/// capability trees -> capability mappings -> applications, accumulating
/// per application the distinct roles seen and the number of
/// capabilities that pulled it in, sorted descending by that count.
#[must_use]
pub fn apps_for_process<'a>(landscape: &'a Landscape, process: &ProcessId) -> Vec<ProcessApp<'a>> {
    let Some(process) = landscape.process_by_id(process) else {
        return Vec::new();
    };

    if let Some(explicit) = &process.application_ids {
        return explicit
            .iter()
            .filter_map(|id| landscape.application_by_id(id))
            .map(|application| ProcessApp {
                application,
                roles: Vec::new(),
                capability_count: 0,
            })
            .collect();
    }

    let mut domains: Vec<DomainId> = process.domains.clone();
    domains.sort_unstable();
    domains.dedup();

    let mut reached: IndexMap<&AppId, (&'a Application, Vec<MappingRole>, usize)> =
        IndexMap::new();
    for domain_id in domains {
        let Some(domain) = landscape.domain_by_id(domain_id) else {
            continue;
        };
        for capability in domain.all_capabilities() {
            for mapping in landscape
                .capability_mappings()
                .iter()
                .filter(|m| m.capability_id == capability.id)
            {
                let Some(application) = landscape.application_by_id(&mapping.application_id) else {
                    continue;
                };
                let entry = reached
                    .entry(&mapping.application_id)
                    .or_insert((application, Vec::new(), 0));
                if !entry.1.contains(&mapping.role) {
                    entry.1.push(mapping.role);
                }
                entry.2 += 1;
            }
        }
    }

    let mut result: Vec<ProcessApp<'a>> = reached
        .into_values()
        .map(|(application, roles, capability_count)| ProcessApp {
            application,
            roles,
            capability_count,
        })
        .collect();
    result.sort_by(|a, b| b.capability_count.cmp(&a.capability_count));
    result
}

/// Processes touching an application, via the inverse chain
/// application -> mapped capabilities -> owning domains -> processes
#[must_use]
pub fn processes_for_app<'a>(landscape: &'a Landscape, app: &AppId) -> Vec<&'a Process> {
    let domain_ids: HashSet<DomainId> = landscape
        .capability_mappings()
        .iter()
        .filter(|m| m.application_id == *app)
        .filter_map(|m| landscape.domain_of_capability(&m.capability_id))
        .map(|d| d.id)
        .collect();
    landscape
        .processes()
        .iter()
        .filter(|p| p.domains.iter().any(|d| domain_ids.contains(d)))
        .collect()
}

/// Vendor of an application
///
/// The explicit `vendor_id` foreign key wins; the legacy soft reference
/// by vendor name string is the fallback.
#[must_use]
pub fn vendor_for_app<'a>(landscape: &'a Landscape, app: &AppId) -> Option<&'a Vendor> {
    let app = landscape.application_by_id(app)?;
    if let Some(vendor_id) = &app.vendor_id {
        if let Some(vendor) = landscape.vendor_by_id(vendor_id) {
            return Some(vendor);
        }
    }
    let name = app.vendor.as_deref()?;
    landscape.vendors().iter().find(|v| v.name == name)
}

/// Applications supplied by a vendor, by explicit id or legacy name match
#[must_use]
pub fn apps_for_vendor<'a>(landscape: &'a Landscape, vendor: &VendorId) -> Vec<&'a Application> {
    let Some(vendor) = landscape.vendor_by_id(vendor) else {
        return Vec::new();
    };
    landscape
        .applications()
        .iter()
        .filter(|app| match &app.vendor_id {
            Some(vendor_id) => *vendor_id == vendor.id,
            None => app.vendor.as_deref() == Some(vendor.name.as_str()),
        })
        .collect()
}

/// Projects with the domain as primary or secondary
#[must_use]
pub fn projects_for_domain(landscape: &Landscape, domain: DomainId) -> Vec<&Project> {
    landscape
        .projects()
        .iter()
        .filter(|p| p.primary_domain == Some(domain) || p.secondary_domains.contains(&domain))
        .collect()
}
