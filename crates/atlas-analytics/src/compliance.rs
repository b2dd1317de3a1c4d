//! Compliance and conformity scorecards
//!
//! One weighting everywhere: full 100, partial 50, failing 0, and 50 for
//! anything unrated or missing. Aggregates are arithmetic means over the
//! in-scope records.

use atlas_core::{derive, Landscape};
use atlas_model::{AppId, ComplianceAssessment, DomainId, Project, UNRATED_SCORE};
use serde::Serialize;

/// Weighted score of one assessment
///
/// Answer-level statuses win when present (their mean); otherwise the
/// overall status; otherwise the unrated default of 50.
#[must_use]
pub fn assessment_score(assessment: &ComplianceAssessment) -> f64 {
    if !assessment.answers.is_empty() {
        let sum: u32 = assessment.answers.values().map(|status| status.score()).sum();
        return f64::from(sum) / assessment.answers.len() as f64;
    }
    match assessment.status {
        Some(status) => f64::from(status.score()),
        None => f64::from(UNRATED_SCORE),
    }
}

/// Conformity score of one project (Konform 100, Teilkonform 50,
/// Widerspricht 0, unrated 50)
#[must_use]
pub fn project_conformity_score(project: &Project) -> f64 {
    match project.conformity {
        Some(status) => f64::from(status.score()),
        None => f64::from(UNRATED_SCORE),
    }
}

/// Score of one application against one regulation
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AppScore {
    pub app_id: AppId,
    pub score: f64,
}

/// Scorecard of one regulation across the application portfolio
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RegulationScorecard {
    pub regulation: String,
    pub app_scores: Vec<AppScore>,
    /// Arithmetic mean over all in-scope applications; 0 when there are none
    pub average: f64,
}

/// Scorecard for one regulation; every application is in scope, and an
/// application without an assessment scores the unrated 50
#[must_use]
pub fn regulation_scorecard(landscape: &Landscape, regulation: &str) -> RegulationScorecard {
    let app_scores: Vec<AppScore> = landscape
        .applications()
        .iter()
        .map(|app| AppScore {
            app_id: app.id.clone(),
            score: landscape
                .assessment_for(&app.id, regulation)
                .map_or(f64::from(UNRATED_SCORE), assessment_score),
        })
        .collect();
    let average = if app_scores.is_empty() {
        0.0
    } else {
        app_scores.iter().map(|s| s.score).sum::<f64>() / app_scores.len() as f64
    };
    RegulationScorecard {
        regulation: regulation.to_string(),
        app_scores,
        average,
    }
}

/// Scorecards for every regulation present in the assessment records
#[must_use]
pub fn scorecards(landscape: &Landscape) -> Vec<RegulationScorecard> {
    let mut regulations: Vec<&str> = Vec::new();
    for assessment in landscape.compliance_assessments() {
        if !regulations.contains(&assessment.regulation.as_str()) {
            regulations.push(&assessment.regulation);
        }
    }
    regulations
        .into_iter()
        .map(|regulation| regulation_scorecard(landscape, regulation))
        .collect()
}

/// Mean conformity score over a domain's projects (primary or secondary);
/// `None` when the domain has no projects in scope
#[must_use]
pub fn domain_conformity_score(landscape: &Landscape, domain: DomainId) -> Option<f64> {
    let projects = derive::projects_for_domain(landscape, domain);
    if projects.is_empty() {
        return None;
    }
    let sum: f64 = projects.iter().map(|p| project_conformity_score(p)).sum();
    Some(sum / projects.len() as f64)
}
