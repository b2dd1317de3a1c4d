//! Resource conflicts across the project portfolio
//!
//! Three views over `Project.affected_apps` and project domain sets:
//! applications contested by several projects, projects spanning many
//! domains, and the hard case of one project retiring an application
//! another project is still investing in.

use atlas_core::Landscape;
use atlas_model::{AppAction, AppId, ComplexityLevel, DomainId, ProjectId};
use indexmap::IndexMap;
use serde::Serialize;

/// An application touched by two or more projects
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AppConflict {
    pub app_id: AppId,
    pub project_ids: Vec<ProjectId>,
    /// One project retires the app while another does something else
    pub has_critical: bool,
}

/// Applications contested by at least two projects, in portfolio order
#[must_use]
pub fn app_conflicts(landscape: &Landscape) -> Vec<AppConflict> {
    let mut by_app: IndexMap<&AppId, Vec<(&ProjectId, AppAction)>> = IndexMap::new();
    for project in landscape.projects() {
        for affected in &project.affected_apps {
            by_app
                .entry(&affected.app_id)
                .or_default()
                .push((&project.id, affected.action));
        }
    }
    by_app
        .into_iter()
        .filter(|(_, touches)| touches.len() >= 2)
        .map(|(app_id, touches)| {
            let retiring = touches.iter().any(|(_, action)| action.is_retirement());
            let other = touches.iter().any(|(_, action)| !action.is_retirement());
            AppConflict {
                app_id: app_id.clone(),
                project_ids: touches.iter().map(|(id, _)| (*id).clone()).collect(),
                has_critical: retiring && other,
            }
        })
        .collect()
}

/// Complexity class for a project touching `domain_count` domains
#[must_use]
pub fn classify_complexity(domain_count: usize) -> ComplexityLevel {
    if domain_count >= 4 {
        ComplexityLevel::Hoch
    } else if domain_count >= 2 {
        ComplexityLevel::Mittel
    } else {
        ComplexityLevel::Niedrig
    }
}

/// A project spanning two or more domains
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CrossDomainProject {
    pub project_id: ProjectId,
    pub name: String,
    pub domains: Vec<DomainId>,
    pub complexity: ComplexityLevel,
}

/// Projects whose distinct domain set (primary plus secondaries) spans
/// at least two domains, with their complexity class
#[must_use]
pub fn cross_domain_projects(landscape: &Landscape) -> Vec<CrossDomainProject> {
    landscape
        .projects()
        .iter()
        .filter_map(|project| {
            let domains = project.domain_set();
            if domains.len() < 2 {
                return None;
            }
            Some(CrossDomainProject {
                project_id: project.id.clone(),
                name: project.name.clone(),
                complexity: classify_complexity(domains.len()),
                domains,
            })
        })
        .collect()
}

/// An application simultaneously being retired and modified
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CriticalActionConflict {
    pub app_id: AppId,
    pub retiring: Vec<ProjectId>,
    pub modifying: Vec<ProjectId>,
}

/// Applications where the retire and modify buckets are both non-empty
#[must_use]
pub fn critical_action_conflicts(landscape: &Landscape) -> Vec<CriticalActionConflict> {
    let mut by_app: IndexMap<&AppId, (Vec<ProjectId>, Vec<ProjectId>)> = IndexMap::new();
    for project in landscape.projects() {
        for affected in &project.affected_apps {
            let buckets = by_app.entry(&affected.app_id).or_default();
            if affected.action.is_retirement() {
                buckets.0.push(project.id.clone());
            } else {
                buckets.1.push(project.id.clone());
            }
        }
    }
    by_app
        .into_iter()
        .filter(|(_, (retiring, modifying))| !retiring.is_empty() && !modifying.is_empty())
        .map(|(app_id, (retiring, modifying))| CriticalActionConflict {
            app_id: app_id.clone(),
            retiring,
            modifying,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn complexity_thresholds() {
        assert_eq!(classify_complexity(1), ComplexityLevel::Niedrig);
        assert_eq!(classify_complexity(2), ComplexityLevel::Mittel);
        assert_eq!(classify_complexity(3), ComplexityLevel::Mittel);
        assert_eq!(classify_complexity(4), ComplexityLevel::Hoch);
        assert_eq!(classify_complexity(7), ComplexityLevel::Hoch);
    }

    #[test]
    fn complexity_labels_are_german() {
        assert_eq!(ComplexityLevel::Mittel.to_string(), "Mittel");
        assert_eq!(ComplexityLevel::Hoch.to_string(), "Hoch");
    }
}
