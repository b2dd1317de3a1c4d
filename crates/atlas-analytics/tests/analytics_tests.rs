use atlas_analytics::{
    app_conflicts, critical_action_conflicts, cross_domain_projects, domain_conformity_score,
    maturity_gaps, regulation_scorecard, scorecards, timeline_collisions,
};
use atlas_core::Landscape;
use atlas_model::{
    AppAction, Application, Capability, ComplexityLevel, ComplianceAssessment, ComplianceStatus,
    ConformityStatus, Criticality, Domain, DomainId, Project, ProjectId, RiskLevel,
};
use pretty_assertions::assert_eq;

fn base() -> Landscape {
    let mut ls = Landscape::new();
    ls.add_domain(Domain::new(1, "Finance")).unwrap();
    ls.add_domain(Domain::new(2, "Sales")).unwrap();
    ls.add_domain(Domain::new(3, "Logistics")).unwrap();
    ls.add_domain(Domain::new(4, "HR")).unwrap();
    ls.add_application(Application::new("APP-001", "SAP ERP")).unwrap();
    ls.add_application(Application::new("APP-002", "Salesforce")).unwrap();
    ls
}

// -- maturity ---------------------------------------------------------------

#[test]
fn maturity_gap_scenario() {
    // Domain 1 owns capability 1.1 at maturity 2, target 4.
    let mut ls = Landscape::new();
    ls.add_domain(
        Domain::new(1, "Finance")
            .with_capability(Capability::new("1.1", "Billing", 2).with_target(4)),
    )
    .unwrap();

    let gaps = maturity_gaps(&ls);
    assert_eq!(gaps.len(), 1);
    assert_eq!(gaps[0].capability_id.as_str(), "1.1");
    assert_eq!(gaps[0].gap, 2);
    assert_eq!(gaps[0].current, 2);
    assert_eq!(gaps[0].target, 4);
    assert_eq!(gaps[0].domain_id, DomainId(1));
}

#[test]
fn maturity_gaps_exclude_on_target_and_sort_descending() {
    let mut ls = Landscape::new();
    ls.add_domain(
        Domain::new(1, "Finance")
            .with_capability(Capability::new("1.1", "Billing", 2).with_target(3))
            .with_capability(Capability::new("1.2", "Treasury", 1).with_target(5))
            .with_capability(Capability::new("1.3", "Tax", 4).with_target(4))
            .with_capability(Capability::new("1.4", "No target", 2)),
    )
    .unwrap();

    let gaps = maturity_gaps(&ls);
    let by_id: Vec<(&str, u8)> = gaps.iter().map(|g| (g.capability_id.as_str(), g.gap)).collect();
    assert_eq!(by_id, vec![("1.2", 4), ("1.1", 1)]);
}

#[test]
fn maturity_gaps_cover_sub_capabilities() {
    let mut ls = Landscape::new();
    ls.add_domain(Domain::new(1, "Finance").with_capability(
        Capability::new("1.1", "Billing", 4).with_sub(
            Capability::new("1.1.1", "Invoicing", 1).with_target(3),
        ),
    ))
    .unwrap();

    let gaps = maturity_gaps(&ls);
    assert_eq!(gaps.len(), 1);
    assert_eq!(gaps[0].capability_id.as_str(), "1.1.1");
    assert_eq!(gaps[0].gap, 2);
}

// -- timeline collisions ----------------------------------------------------

#[test]
fn collision_scenario_two_quarter_overlap() {
    let mut ls = base();
    ls.add_project(
        Project::new("PRJ-001", "A")
            .with_window("Q1/2026", "Q4/2026")
            .with_affected_app("APP-001", AppAction::Erweitern),
    )
    .unwrap();
    ls.add_project(
        Project::new("PRJ-002", "B")
            .with_window("Q3/2026", "Q2/2027")
            .with_affected_app("APP-001", AppAction::Migrieren),
    )
    .unwrap();

    let collisions = timeline_collisions(&ls);
    assert_eq!(collisions.len(), 1);
    let collision = &collisions[0];
    assert_eq!(collision.app_id.as_str(), "APP-001");
    assert_eq!(collision.overlap_quarters, 2);
    assert!(collision.risk >= RiskLevel::Medium);
}

#[test]
fn critical_shared_app_escalates_to_high() {
    let mut ls = base();
    ls.update_application(
        &"APP-001".into(),
        atlas_model::ApplicationPatch {
            criticality: Some(Criticality::MissionCritical),
            ..Default::default()
        },
    )
    .unwrap();
    ls.add_project(
        Project::new("PRJ-001", "A")
            .with_window("Q1/2026", "Q1/2026")
            .with_affected_app("APP-001", AppAction::Erweitern),
    )
    .unwrap();
    ls.add_project(
        Project::new("PRJ-002", "B")
            .with_window("Q1/2026", "Q1/2026")
            .with_affected_app("APP-001", AppAction::Erweitern),
    )
    .unwrap();

    let collisions = timeline_collisions(&ls);
    assert_eq!(collisions.len(), 1);
    assert_eq!(collisions[0].overlap_quarters, 1);
    assert_eq!(collisions[0].risk, RiskLevel::High);
}

#[test]
fn unknown_timelines_never_collide() {
    let mut ls = base();
    ls.add_project(
        Project::new("PRJ-001", "A")
            .with_window("TBD", "Q4/2026")
            .with_affected_app("APP-001", AppAction::Erweitern),
    )
    .unwrap();
    ls.add_project(
        Project::new("PRJ-002", "B")
            .with_window("Q1/2026", "Q4/2026")
            .with_affected_app("APP-001", AppAction::Erweitern),
    )
    .unwrap();

    assert!(timeline_collisions(&ls).is_empty());
}

#[test]
fn disjoint_projects_do_not_collide() {
    let mut ls = base();
    ls.add_project(
        Project::new("PRJ-001", "A")
            .with_window("Q1/2026", "Q2/2026")
            .with_affected_app("APP-001", AppAction::Erweitern),
    )
    .unwrap();
    ls.add_project(
        Project::new("PRJ-002", "B")
            .with_window("Q3/2026", "Q4/2026")
            .with_affected_app("APP-001", AppAction::Erweitern),
    )
    .unwrap();

    assert!(timeline_collisions(&ls).is_empty());
}

// -- resource conflicts -----------------------------------------------------

#[test]
fn apps_touched_by_two_projects_are_conflicts() {
    let mut ls = base();
    ls.add_project(
        Project::new("PRJ-001", "A").with_affected_app("APP-001", AppAction::Erweitern),
    )
    .unwrap();
    ls.add_project(
        Project::new("PRJ-002", "B")
            .with_affected_app("APP-001", AppAction::Migrieren)
            .with_affected_app("APP-002", AppAction::Einfuehren),
    )
    .unwrap();

    let conflicts = app_conflicts(&ls);
    assert_eq!(conflicts.len(), 1);
    assert_eq!(conflicts[0].app_id.as_str(), "APP-001");
    assert_eq!(conflicts[0].project_ids.len(), 2);
    // Nobody retires APP-001, so the conflict is not critical.
    assert!(!conflicts[0].has_critical);
}

#[test]
fn simultaneous_retirement_and_modification_is_critical() {
    let mut ls = base();
    ls.add_project(
        Project::new("PRJ-001", "Retire it").with_affected_app("APP-001", AppAction::Abloesen),
    )
    .unwrap();
    ls.add_project(
        Project::new("PRJ-002", "Extend it").with_affected_app("APP-001", AppAction::Erweitern),
    )
    .unwrap();

    let conflicts = app_conflicts(&ls);
    assert!(conflicts[0].has_critical);

    let critical = critical_action_conflicts(&ls);
    assert_eq!(critical.len(), 1);
    assert_eq!(critical[0].retiring, vec![ProjectId::new("PRJ-001")]);
    assert_eq!(critical[0].modifying, vec![ProjectId::new("PRJ-002")]);
}

#[test]
fn two_retirements_alone_are_not_a_critical_conflict() {
    let mut ls = base();
    ls.add_project(
        Project::new("PRJ-001", "A").with_affected_app("APP-001", AppAction::Abloesen),
    )
    .unwrap();
    ls.add_project(
        Project::new("PRJ-002", "B").with_affected_app("APP-001", AppAction::Abloesen),
    )
    .unwrap();

    assert!(!app_conflicts(&ls)[0].has_critical);
    assert!(critical_action_conflicts(&ls).is_empty());
}

#[test]
fn cross_domain_complexity_scenario() {
    let mut ls = base();
    ls.add_project(
        Project::new("PRJ-001", "Three domains")
            .with_primary_domain(DomainId(1))
            .with_secondary_domains(vec![DomainId(2), DomainId(3)]),
    )
    .unwrap();
    ls.add_project(
        Project::new("PRJ-002", "Four domains")
            .with_primary_domain(DomainId(1))
            .with_secondary_domains(vec![DomainId(2), DomainId(3), DomainId(4)]),
    )
    .unwrap();
    ls.add_project(Project::new("PRJ-003", "One domain").with_primary_domain(DomainId(1)))
        .unwrap();

    let reported = cross_domain_projects(&ls);
    assert_eq!(reported.len(), 2);
    assert_eq!(reported[0].project_id.as_str(), "PRJ-001");
    assert_eq!(reported[0].complexity, ComplexityLevel::Mittel);
    assert_eq!(reported[0].complexity.to_string(), "Mittel");
    assert_eq!(reported[1].project_id.as_str(), "PRJ-002");
    assert_eq!(reported[1].complexity, ComplexityLevel::Hoch);
    assert_eq!(reported[1].complexity.to_string(), "Hoch");
}

// -- compliance -------------------------------------------------------------

#[test]
fn scorecard_averages_with_unrated_default() {
    let mut ls = base();
    ls.set_assessment(
        ComplianceAssessment::new("APP-001", "DORA").with_status(ComplianceStatus::Compliant),
    )
    .unwrap();
    // APP-002 has no DORA assessment and scores the unrated 50.

    let card = regulation_scorecard(&ls, "DORA");
    assert_eq!(card.app_scores.len(), 2);
    assert_eq!(card.app_scores[0].score, 100.0);
    assert_eq!(card.app_scores[1].score, 50.0);
    assert_eq!(card.average, 75.0);
}

#[test]
fn answer_statuses_override_the_overall_status() {
    let mut ls = base();
    ls.set_assessment(
        ComplianceAssessment::new("APP-001", "GDPR")
            .with_status(ComplianceStatus::Compliant)
            .with_answer("data-residency", ComplianceStatus::Compliant)
            .with_answer("breach-notification", ComplianceStatus::NonCompliant),
    )
    .unwrap();

    let card = regulation_scorecard(&ls, "GDPR");
    // Mean of 100 and 0, not the overall "compliant" 100.
    assert_eq!(card.app_scores[0].score, 50.0);
}

#[test]
fn scorecards_cover_every_assessed_regulation() {
    let mut ls = base();
    ls.set_assessment(ComplianceAssessment::new("APP-001", "DORA")).unwrap();
    ls.set_assessment(ComplianceAssessment::new("APP-002", "GDPR")).unwrap();
    ls.set_assessment(ComplianceAssessment::new("APP-002", "DORA")).unwrap();

    let cards = scorecards(&ls);
    let regs: Vec<&str> = cards.iter().map(|c| c.regulation.as_str()).collect();
    assert_eq!(regs, vec!["DORA", "GDPR"]);
}

#[test]
fn domain_conformity_uses_the_shared_weighting() {
    let mut ls = base();
    ls.add_project(
        Project::new("PRJ-001", "A")
            .with_primary_domain(DomainId(1))
            .with_conformity(ConformityStatus::Konform),
    )
    .unwrap();
    // Unrated project counts 50.
    ls.add_project(Project::new("PRJ-002", "B").with_primary_domain(DomainId(1)))
        .unwrap();

    assert_eq!(domain_conformity_score(&ls, DomainId(1)), Some(75.0));
    assert_eq!(domain_conformity_score(&ls, DomainId(4)), None);
}

// -- properties -------------------------------------------------------------

mod props {
    use atlas_analytics::overlap_quarters;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn overlap_is_symmetric(s1 in 8000i32..8200, e1 in 8000i32..8200,
                                s2 in 8000i32..8200, e2 in 8000i32..8200) {
            prop_assert_eq!(overlap_quarters((s1, e1), (s2, e2)),
                            overlap_quarters((s2, e2), (s1, e1)));
        }

        #[test]
        fn overlap_is_never_negative(s1 in 8000i32..8200, e1 in 8000i32..8200,
                                     s2 in 8000i32..8200, e2 in 8000i32..8200) {
            prop_assert!(overlap_quarters((s1, e1), (s2, e2)) >= 0);
        }

        #[test]
        fn gap_is_target_minus_current_and_non_negative(current in 1u8..=5, target in 1u8..=5) {
            let mut ls = atlas_core::Landscape::new();
            ls.add_domain(
                atlas_model::Domain::new(1, "D").with_capability(
                    atlas_model::Capability::new("1.1", "C", current).with_target(target),
                ),
            )
            .unwrap();
            let gaps = atlas_analytics::maturity_gaps(&ls);
            if target > current {
                prop_assert_eq!(gaps.len(), 1);
                prop_assert_eq!(gaps[0].gap, target - current);
            } else {
                prop_assert!(gaps.is_empty());
            }
        }
    }
}
