//! Tests for the JSON store
//!
//! Covers cursor pagination, persistence to disk and the default page
//! sizes the service applies on top of the store.

use cla_signatures::adapters::JsonStore;
use cla_signatures::core::models::{
    CompanySignaturesQuery, PageRequest, ProjectSignaturesQuery, SignatureType, SortOrder,
};
use cla_signatures::core::ports::SignatureRepository;
use tempfile::TempDir;

use crate::common::fixtures::{Harness, SignatureBuilder, UserBuilder, base_data, company};

fn iclas(count: usize) -> cla_signatures::adapters::StoreData {
    let mut data = base_data();
    for n in 0..count {
        let user = UserBuilder::new(&format!("u{n:02}")).username(&format!("dev{n:02}")).build();
        data.signatures
            .push(SignatureBuilder::icla(&format!("icla-{n:02}"), &user).build());
    }
    data
}

// =============================================================================
// PAGINATION
// =============================================================================

#[tokio::test]
async fn test_cursor_walks_every_signature_once() {
    let store = JsonStore::with_data(iclas(25));
    let mut query = ProjectSignaturesQuery {
        project_id: "g1".to_string(),
        page: PageRequest::first(10),
        ..ProjectSignaturesQuery::default()
    };

    let mut seen = Vec::new();
    loop {
        let page = store.get_project_signatures(&query).await.unwrap();
        assert_eq!(page.total_count, 25);
        seen.extend(page.items.into_iter().map(|s| s.signature_id));
        match page.last_key {
            Some(key) => query.page.next_key = Some(key),
            None => break,
        }
    }

    assert_eq!(seen.len(), 25);
    assert_eq!(seen.first().map(String::as_str), Some("icla-00"));
    assert_eq!(seen.last().map(String::as_str), Some("icla-24"));
}

#[tokio::test]
async fn test_type_filter_and_report_counts() {
    let mut data = iclas(2);
    data.signatures
        .push(SignatureBuilder::ccla("ccla-1", &company()).build());
    let store = JsonStore::with_data(data);

    let query = ProjectSignaturesQuery {
        project_id: "g1".to_string(),
        signature_type: Some(SignatureType::Corporate),
        ..ProjectSignaturesQuery::default()
    };
    let page = store.get_project_signatures(&query).await.unwrap();
    assert_eq!(page.items.len(), 1);

    let report = store
        .create_project_summary_report(&ProjectSignaturesQuery {
            project_id: "g1".to_string(),
            ..ProjectSignaturesQuery::default()
        })
        .await
        .unwrap();
    assert_eq!(report.total_count, 3);
    assert_eq!(report.individual_count, 2);
    assert_eq!(report.corporate_count, 1);
}

#[tokio::test]
async fn test_company_signatures_default_to_fifty_per_page() {
    let mut data = base_data();
    for n in 0..60 {
        let user = UserBuilder::new(&format!("e{n:02}")).build();
        data.signatures
            .push(SignatureBuilder::ecla(&format!("ecla-{n:02}"), &user, "c1").build());
    }
    let harness = Harness::new(data);

    let page = harness
        .service
        .get_company_signatures(&CompanySignaturesQuery {
            company_id: "c1".to_string(),
            ..CompanySignaturesQuery::default()
        })
        .await
        .unwrap();
    assert_eq!(page.items.len(), 50);
    assert_eq!(page.total_count, 60);
    assert_eq!(page.last_key.as_deref(), Some("ecla-49"));
}

#[tokio::test]
async fn test_project_company_signatures_descending() {
    let mut data = base_data();
    for id in ["ccla-a", "ccla-b", "ccla-c"] {
        data.signatures.push(SignatureBuilder::ccla(id, &company()).build());
    }
    data.signatures
        .push(SignatureBuilder::ccla("ccla-d", &company()).inactive().build());
    let harness = Harness::new(data);

    let page = harness
        .service
        .get_project_company_signatures("c1", "g1", SortOrder::Desc, None, None)
        .await
        .unwrap();
    let ids: Vec<&str> = page.items.iter().map(|s| s.signature_id.as_str()).collect();
    assert_eq!(ids, ["ccla-c", "ccla-b", "ccla-a"]);
}

// =============================================================================
// PERSISTENCE
// =============================================================================

#[tokio::test]
async fn test_mutations_are_written_to_disk() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("store.json");

    {
        let store = JsonStore::open(&path).unwrap();
        assert!(store.snapshot().unwrap().signatures.is_empty());
    }

    let seeded = JsonStore::with_data(iclas(1));
    std::fs::write(&path, serde_json::to_string(&seeded.snapshot().unwrap()).unwrap()).unwrap();

    let store = JsonStore::open(&path).unwrap();
    store.invalidate_project_record("icla-00", "revoked").await.unwrap();

    let reopened = JsonStore::open(&path).unwrap();
    let signature = reopened.get_signature("icla-00").await.unwrap().unwrap();
    assert!(!signature.approved);
    assert_eq!(signature.note.as_deref(), Some("revoked"));
}

#[test]
fn test_corrupt_store_is_an_error() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("store.json");
    std::fs::write(&path, "{ not json").unwrap();
    assert!(JsonStore::open(&path).is_err());
}
