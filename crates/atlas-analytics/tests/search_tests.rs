use atlas_analytics::{search, EntityType};
use atlas_core::Landscape;
use atlas_model::{Application, Capability, Demand, Domain, Process, Project, Vendor};

fn populated() -> Landscape {
    let mut ls = Landscape::new();
    ls.add_domain(
        Domain::new(1, "Finance").with_capability(Capability::new("1.1", "SAP Competence", 3)),
    )
    .unwrap();
    ls.add_application(
        Application::new("APP-001", "SAP ERP").with_vendor("SAP").with_description("Core ledger"),
    )
    .unwrap();
    ls.add_application(Application::new("APP-002", "Salesforce")).unwrap();
    ls.add_vendor(Vendor::new("VND-001", "SAP SE")).unwrap();
    ls.add_project(Project::new("PRJ-001", "CRM Replacement")).unwrap();
    ls.add_process(Process::new("E2E-001", "Order to Cash")).unwrap();
    ls.add_demand(Demand::new("DEM-001", "SAP license review")).unwrap();
    ls
}

#[test]
fn search_matches_substrings_case_insensitively() {
    let ls = populated();
    let results = search(&ls, "sap");

    let apps = &results[&EntityType::Application];
    assert_eq!(apps.len(), 1);
    assert_eq!(apps[0].id, "APP-001");
    assert_eq!(apps[0].route, "/applications/APP-001");

    assert_eq!(results[&EntityType::Vendor].len(), 1);
    assert_eq!(results[&EntityType::Capability].len(), 1);
    assert_eq!(results[&EntityType::Demand].len(), 1);
    // Nothing project- or process-side mentions SAP.
    assert!(!results.contains_key(&EntityType::Project));
    assert!(!results.contains_key(&EntityType::Process));
}

#[test]
fn search_groups_by_entity_type() {
    let ls = populated();
    let results = search(&ls, "SAP");
    for (entity_type, hits) in &results {
        assert!(!hits.is_empty());
        assert!(hits.iter().all(|h| h.entity_type == *entity_type));
    }
}

#[test]
fn search_matches_ids_too() {
    let ls = populated();
    let results = search(&ls, "prj-001");
    assert_eq!(results[&EntityType::Project].len(), 1);
    assert_eq!(results[&EntityType::Project][0].name, "CRM Replacement");
}

#[test]
fn blank_query_matches_nothing() {
    let ls = populated();
    assert!(search(&ls, "").is_empty());
    assert!(search(&ls, "   ").is_empty());
}

#[test]
fn absent_optional_fields_do_not_match_or_panic() {
    // APP-002 has no vendor, description or owner; a query against those
    // fields must simply not hit it.
    let ls = populated();
    let results = search(&ls, "ledger");
    let apps = &results[&EntityType::Application];
    assert_eq!(apps.len(), 1);
    assert_eq!(apps[0].id, "APP-001");
}
