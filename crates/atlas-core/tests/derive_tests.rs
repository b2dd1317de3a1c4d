use atlas_core::{derive, Landscape};
use atlas_model::{
    AppId, Application, Capability, CapabilityId, Domain, DomainId, MappingRole, Process,
    ProcessId, Project, Vendor, VendorId,
};

/// Two domains, three apps, mappings wired so APP-001 is reached by two
/// capabilities and APP-002 by one.
fn wired() -> Landscape {
    let mut ls = Landscape::new();
    ls.add_domain(
        Domain::new(1, "Finance")
            .with_capability(Capability::new("1.1", "Billing", 2))
            .with_capability(Capability::new("1.2", "Treasury", 3)),
    )
    .unwrap();
    ls.add_domain(Domain::new(2, "Sales").with_capability(Capability::new("2.1", "CRM", 3)))
        .unwrap();
    ls.add_application(Application::new("APP-001", "SAP ERP")).unwrap();
    ls.add_application(Application::new("APP-002", "Salesforce")).unwrap();
    ls.add_application(Application::new("APP-003", "Island App")).unwrap();
    ls.add_mapping(CapabilityId::new("1.1"), AppId::new("APP-001"), MappingRole::Primary)
        .unwrap();
    ls.add_mapping(CapabilityId::new("1.2"), AppId::new("APP-001"), MappingRole::Secondary)
        .unwrap();
    ls.add_mapping(CapabilityId::new("2.1"), AppId::new("APP-002"), MappingRole::Primary)
        .unwrap();
    ls
}

#[test]
fn apps_for_capability_carries_roles() {
    let ls = wired();
    let apps = derive::apps_for_capability(&ls, &CapabilityId::new("1.1"));
    assert_eq!(apps.len(), 1);
    assert_eq!(apps[0].application.id.as_str(), "APP-001");
    assert_eq!(apps[0].role, MappingRole::Primary);
}

#[test]
fn capabilities_for_app_is_the_inverse() {
    let ls = wired();
    let caps = derive::capabilities_for_app(&ls, &AppId::new("APP-001"));
    let ids: Vec<&str> = caps.iter().map(|c| c.capability.id.as_str()).collect();
    assert_eq!(ids, vec!["1.1", "1.2"]);
}

#[test]
fn dangling_mapping_references_are_silently_excluded() {
    // A persisted document may carry transient dangling ids; joins must
    // skip them instead of failing.
    let ls = Landscape::from_json(
        r#"{
            "domains": [{"id": 1, "name": "Finance", "capabilities": [
                {"id": "1.1", "name": "Billing", "maturity": 2}
            ]}],
            "applications": [],
            "capabilityMappings": [
                {"capabilityId": "1.1", "applicationId": "APP-GONE", "role": "Primary"},
                {"capabilityId": "9.9", "applicationId": "APP-GONE", "role": "Primary"}
            ]
        }"#,
    )
    .unwrap();
    assert!(derive::apps_for_capability(&ls, &CapabilityId::new("1.1")).is_empty());
    assert!(derive::capabilities_for_app(&ls, &AppId::new("APP-GONE")).is_empty());
    assert!(derive::processes_for_app(&ls, &AppId::new("APP-GONE")).is_empty());
}

#[test]
fn apps_for_process_sorts_by_pulling_capability_count() {
    let mut ls = wired();
    ls.add_process(
        Process::new("E2E-001", "Order to Cash").with_domains(vec![DomainId(2), DomainId(1)]),
    )
    .unwrap();

    let apps = derive::apps_for_process(&ls, &ProcessId::new("E2E-001"));
    assert_eq!(apps.len(), 2);
    // APP-001 is pulled in by two capabilities, APP-002 by one.
    assert_eq!(apps[0].application.id.as_str(), "APP-001");
    assert_eq!(apps[0].capability_count, 2);
    assert_eq!(apps[0].roles, vec![MappingRole::Primary, MappingRole::Secondary]);
    assert_eq!(apps[1].application.id.as_str(), "APP-002");
    assert_eq!(apps[1].capability_count, 1);
}

#[test]
fn explicit_application_list_overrides_the_derivation() {
    let mut ls = wired();
    ls.add_process(
        Process::new("E2E-002", "Reporting")
            .with_domains(vec![DomainId(1)])
            .with_application_ids(vec![AppId::new("APP-003")]),
    )
    .unwrap();

    let apps = derive::apps_for_process(&ls, &ProcessId::new("E2E-002"));
    assert_eq!(apps.len(), 1);
    assert_eq!(apps[0].application.id.as_str(), "APP-003");
    assert_eq!(apps[0].capability_count, 0);
}

#[test]
fn unknown_process_yields_no_apps() {
    let ls = wired();
    assert!(derive::apps_for_process(&ls, &ProcessId::new("E2E-404")).is_empty());
}

#[test]
fn processes_for_app_walks_the_inverse_chain() {
    let mut ls = wired();
    ls.add_process(Process::new("E2E-001", "Order to Cash").with_domains(vec![DomainId(1)]))
        .unwrap();
    ls.add_process(Process::new("E2E-002", "Lead to Quote").with_domains(vec![DomainId(2)]))
        .unwrap();

    let processes = derive::processes_for_app(&ls, &AppId::new("APP-001"));
    let ids: Vec<&str> = processes.iter().map(|p| p.id.as_str()).collect();
    // APP-001 maps into Finance capabilities only.
    assert_eq!(ids, vec!["E2E-001"]);
}

#[test]
fn processes_for_domain_filters_on_membership() {
    let mut ls = wired();
    ls.add_process(Process::new("E2E-001", "Order to Cash").with_domains(vec![DomainId(1)]))
        .unwrap();
    assert_eq!(derive::processes_for_domain(&ls, DomainId(1)).len(), 1);
    assert!(derive::processes_for_domain(&ls, DomainId(2)).is_empty());
}

#[test]
fn vendor_resolution_prefers_the_explicit_foreign_key() {
    let mut ls = wired();
    ls.add_vendor(Vendor::new("VND-001", "SAP")).unwrap();
    ls.add_vendor(Vendor::new("VND-002", "Salesforce Inc")).unwrap();

    // Explicit key pointing away from the matching name string.
    ls.update_application(
        &AppId::new("APP-001"),
        atlas_model::ApplicationPatch {
            vendor: Some("Salesforce Inc".into()),
            vendor_id: Some(VendorId::new("VND-001")),
            ..Default::default()
        },
    )
    .unwrap();
    // Legacy soft reference only.
    ls.update_application(
        &AppId::new("APP-002"),
        atlas_model::ApplicationPatch {
            vendor: Some("Salesforce Inc".into()),
            ..Default::default()
        },
    )
    .unwrap();

    let vendor = derive::vendor_for_app(&ls, &AppId::new("APP-001")).unwrap();
    assert_eq!(vendor.id.as_str(), "VND-001");
    let vendor = derive::vendor_for_app(&ls, &AppId::new("APP-002")).unwrap();
    assert_eq!(vendor.id.as_str(), "VND-002");

    let sap_apps = derive::apps_for_vendor(&ls, &VendorId::new("VND-001"));
    assert_eq!(sap_apps.len(), 1);
    assert_eq!(sap_apps[0].id.as_str(), "APP-001");
    // APP-001's explicit key excludes it from the name-matched vendor.
    let sf_apps = derive::apps_for_vendor(&ls, &VendorId::new("VND-002"));
    assert_eq!(sf_apps.len(), 1);
    assert_eq!(sf_apps[0].id.as_str(), "APP-002");
}

#[test]
fn projects_for_domain_covers_primary_and_secondary() {
    let mut ls = wired();
    ls.add_project(Project::new("PRJ-001", "A").with_primary_domain(DomainId(1)))
        .unwrap();
    ls.add_project(
        Project::new("PRJ-002", "B")
            .with_primary_domain(DomainId(2))
            .with_secondary_domains(vec![DomainId(1)]),
    )
    .unwrap();
    ls.add_project(Project::new("PRJ-003", "C").with_primary_domain(DomainId(2)))
        .unwrap();

    let projects = derive::projects_for_domain(&ls, DomainId(1));
    let ids: Vec<&str> = projects.iter().map(|p| p.id.as_str()).collect();
    assert_eq!(ids, vec!["PRJ-001", "PRJ-002"]);
}
