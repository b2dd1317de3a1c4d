//! Global search
//!
//! Case-insensitive substring match over each entity's searchable text
//! fields (id, name/title, description, owner-like fields). One linear
//! pass over every collection; absent optional fields simply do not
//! match. Results come back grouped by entity type, in store order.

use atlas_core::Landscape;
use indexmap::IndexMap;
use serde::Serialize;

/// Entity kind of a search hit, used as the grouping key
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum EntityType {
    Domain,
    Capability,
    Application,
    Vendor,
    Project,
    Process,
    Demand,
    Integration,
}

/// One search result, ready for the UI result list
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchHit {
    #[serde(rename = "type")]
    pub entity_type: EntityType,
    pub id: String,
    pub name: String,
    pub detail: String,
    pub route: String,
}

fn matches(needle: &str, fields: &[Option<&str>]) -> bool {
    fields
        .iter()
        .flatten()
        .any(|field| field.to_lowercase().contains(needle))
}

/// Search the whole landscape, grouped by entity type
///
/// A blank query matches nothing. Groups with no hits are absent from
/// the result map.
#[must_use]
pub fn search(landscape: &Landscape, query: &str) -> IndexMap<EntityType, Vec<SearchHit>> {
    let needle = query.trim().to_lowercase();
    let mut results: IndexMap<EntityType, Vec<SearchHit>> = IndexMap::new();
    if needle.is_empty() {
        return results;
    }
    let mut push = |hit: SearchHit| results.entry(hit.entity_type).or_default().push(hit);

    for domain in landscape.domains() {
        let id = domain.id.to_string();
        if matches(&needle, &[Some(&id), Some(&domain.name), domain.description.as_deref()]) {
            push(SearchHit {
                entity_type: EntityType::Domain,
                id: id.clone(),
                name: domain.name.clone(),
                detail: domain.description.clone().unwrap_or_default(),
                route: format!("/domains/{id}"),
            });
        }
        for capability in domain.all_capabilities() {
            if matches(
                &needle,
                &[
                    Some(capability.id.as_str()),
                    Some(&capability.name),
                    capability.description.as_deref(),
                ],
            ) {
                push(SearchHit {
                    entity_type: EntityType::Capability,
                    id: capability.id.as_str().to_string(),
                    name: capability.name.clone(),
                    detail: domain.name.clone(),
                    route: format!("/domains/{}", domain.id),
                });
            }
        }
    }

    for app in landscape.applications() {
        if matches(
            &needle,
            &[
                Some(app.id.as_str()),
                Some(&app.name),
                app.vendor.as_deref(),
                app.description.as_deref(),
                app.owner.as_deref(),
            ],
        ) {
            push(SearchHit {
                entity_type: EntityType::Application,
                id: app.id.as_str().to_string(),
                name: app.name.clone(),
                detail: app.vendor.clone().unwrap_or_default(),
                route: format!("/applications/{}", app.id),
            });
        }
    }

    for vendor in landscape.vendors() {
        if matches(
            &needle,
            &[Some(vendor.id.as_str()), Some(&vendor.name), vendor.category.as_deref()],
        ) {
            push(SearchHit {
                entity_type: EntityType::Vendor,
                id: vendor.id.as_str().to_string(),
                name: vendor.name.clone(),
                detail: vendor.category.clone().unwrap_or_default(),
                route: format!("/vendors/{}", vendor.id),
            });
        }
    }

    for project in landscape.projects() {
        if matches(
            &needle,
            &[
                Some(project.id.as_str()),
                Some(&project.name),
                project.description.as_deref(),
            ],
        ) {
            push(SearchHit {
                entity_type: EntityType::Project,
                id: project.id.as_str().to_string(),
                name: project.name.clone(),
                detail: project.description.clone().unwrap_or_default(),
                route: format!("/projects/{}", project.id),
            });
        }
    }

    for process in landscape.processes() {
        if matches(
            &needle,
            &[
                Some(process.id.as_str()),
                Some(&process.name),
                process.description.as_deref(),
                process.owner.as_deref(),
            ],
        ) {
            push(SearchHit {
                entity_type: EntityType::Process,
                id: process.id.as_str().to_string(),
                name: process.name.clone(),
                detail: process.description.clone().unwrap_or_default(),
                route: format!("/processes/{}", process.id),
            });
        }
    }

    for demand in landscape.demands() {
        if matches(
            &needle,
            &[
                Some(demand.id.as_str()),
                Some(&demand.title),
                demand.description.as_deref(),
                demand.requester.as_deref(),
            ],
        ) {
            push(SearchHit {
                entity_type: EntityType::Demand,
                id: demand.id.as_str().to_string(),
                name: demand.title.clone(),
                detail: demand.description.clone().unwrap_or_default(),
                route: format!("/demands/{}", demand.id),
            });
        }
    }

    for integration in landscape.integrations() {
        if matches(
            &needle,
            &[
                Some(integration.id.as_str()),
                integration.interface_type.as_deref(),
                integration.description.as_deref(),
            ],
        ) {
            push(SearchHit {
                entity_type: EntityType::Integration,
                id: integration.id.as_str().to_string(),
                name: format!(
                    "{} -> {}",
                    integration.source_app_id, integration.target_app_id
                ),
                detail: integration.interface_type.clone().unwrap_or_default(),
                route: format!("/integrations/{}", integration.id),
            });
        }
    }

    results
}
