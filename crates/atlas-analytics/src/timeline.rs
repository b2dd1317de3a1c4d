//! Timeline collisions
//!
//! Projects carry quarter labels of the exact form `Q<1-4>/<yyyy>`. A
//! label is parsed into one comparable integer (`year * 4 + quarter`);
//! anything that does not parse means "unknown timeline" and the project
//! is excluded from collision detection. Unknown never defaults to zero:
//! that would turn a data problem into a false "no overlap".

use atlas_core::Landscape;
use atlas_model::{AppId, Criticality, Project, ProjectId, RiskLevel};
use serde::Serialize;

/// Inclusive quarter interval of a project
pub type QuarterWindow = (i32, i32);

/// Parse `Q<1-4>/<yyyy>` into a comparable quarter index
#[must_use]
pub fn parse_quarter(label: &str) -> Option<i32> {
    let rest = label.strip_prefix('Q')?;
    let (quarter, year) = rest.split_once('/')?;
    if quarter.len() != 1 || year.len() != 4 || !year.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    let quarter: i32 = quarter.parse().ok()?;
    if !(1..=4).contains(&quarter) {
        return None;
    }
    let year: i32 = year.parse().ok()?;
    Some(year * 4 + quarter)
}

/// Parsed `[start, end]` window of a project; `None` when either label
/// is missing or malformed
#[must_use]
pub fn project_window(project: &Project) -> Option<QuarterWindow> {
    let start = parse_quarter(project.start.as_deref()?)?;
    let end = parse_quarter(project.end.as_deref()?)?;
    Some((start, end))
}

/// Inclusive overlap length of two windows, in quarters
#[must_use]
pub fn overlap_quarters(a: QuarterWindow, b: QuarterWindow) -> i32 {
    (a.1.min(b.1) - a.0.max(b.0) + 1).max(0)
}

/// Risk of one collision: high when the overlap is long or the shared
/// application is Mission-/Business-Critical
#[must_use]
pub fn classify_risk(overlap: i32, shared_app_critical: bool) -> RiskLevel {
    if overlap >= 3 || shared_app_critical {
        RiskLevel::High
    } else if overlap >= 2 {
        RiskLevel::Medium
    } else {
        RiskLevel::Low
    }
}

/// Two projects touching the same application in overlapping quarters
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TimelineCollision {
    pub project_a: ProjectId,
    pub project_b: ProjectId,
    pub app_id: AppId,
    pub overlap_quarters: i32,
    pub risk: RiskLevel,
}

/// All pairwise collisions across the project portfolio
///
/// One record per (project pair, shared application). Projects with an
/// unknown timeline never collide.
#[must_use]
pub fn timeline_collisions(landscape: &Landscape) -> Vec<TimelineCollision> {
    let projects = landscape.projects();
    let mut collisions = Vec::new();
    for (i, a) in projects.iter().enumerate() {
        let Some(window_a) = project_window(a) else {
            continue;
        };
        for b in &projects[i + 1..] {
            let Some(window_b) = project_window(b) else {
                continue;
            };
            let overlap = overlap_quarters(window_a, window_b);
            if overlap == 0 {
                continue;
            }
            for affected in &a.affected_apps {
                if !b.affected_apps.iter().any(|x| x.app_id == affected.app_id) {
                    continue;
                }
                let critical = landscape
                    .application_by_id(&affected.app_id)
                    .and_then(|app| app.criticality)
                    .is_some_and(Criticality::is_critical);
                collisions.push(TimelineCollision {
                    project_a: a.id.clone(),
                    project_b: b.id.clone(),
                    app_id: affected.app_id.clone(),
                    overlap_quarters: overlap,
                    risk: classify_risk(overlap, critical),
                });
            }
        }
    }
    collisions
}
