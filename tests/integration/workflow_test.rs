//! Signature workflow tests
//!
//! Runs the service over the in-memory store with a scripted GitHub:
//! approval list updates, coverage checks and project invalidation.

use cla_signatures::adapters::StoreData;
use cla_signatures::core::models::{
    ActiveSignatureMetadata, ApprovalList, ApprovalListDelta, AuthUser, ClaRepository,
    GithubOrganization, SignatureType,
};
use cla_signatures::core::ports::CommitState;
use cla_signatures::core::services::SignatureError;

use crate::common::fixtures::{
    FakeGitHub, Harness, SignatureBuilder, UserBuilder, base_data, cla_group, company, manager,
};

fn ccla_data(list: ApprovalList) -> StoreData {
    let mut data = base_data();
    data.signatures.push(
        SignatureBuilder::ccla("ccla-1", &company())
            .manager(manager())
            .auto_create_ecla()
            .approval_list(list)
            .build(),
    );
    data
}

fn add_emails(emails: &[&str]) -> ApprovalListDelta {
    ApprovalListDelta {
        add_email: emails.iter().map(|e| (*e).to_string()).collect(),
        ..ApprovalListDelta::default()
    }
}

fn caller() -> AuthUser {
    AuthUser::new("manager", "manager@acme.com")
}

fn employee_signatures(data: &StoreData) -> usize {
    data.signatures
        .iter()
        .filter(|s| s.signature_type == SignatureType::Employee)
        .count()
}

// =============================================================================
// AUTHORIZATION
// =============================================================================

#[tokio::test]
async fn test_non_manager_is_forbidden_and_nothing_changes() {
    let harness = Harness::new(ccla_data(ApprovalList::default()));
    let before = harness.data();

    let intruder = AuthUser::new("intruder", "intruder@evil.com");
    let err = harness
        .service
        .update_approval_list(&intruder, &cla_group(), &company(), "g1", &add_emails(&["x@acme.com"]))
        .await
        .unwrap_err();

    assert!(matches!(err, SignatureError::Forbidden(_)));
    assert_eq!(harness.data(), before);
    assert!(harness.outbox.messages().is_empty());
}

#[tokio::test]
async fn test_manager_matched_by_username_alone() {
    let harness = Harness::new(ccla_data(ApprovalList::default()));
    let other_address = AuthUser::new("manager", "someone@elsewhere.org");

    let updated = harness
        .service
        .update_approval_list(&other_address, &cla_group(), &company(), "g1", &ApprovalListDelta::default())
        .await
        .unwrap();
    assert_eq!(updated.signature_id, "ccla-1");
}

#[tokio::test]
async fn test_manager_matched_by_email_still_needs_user_record() {
    let harness = Harness::new(ccla_data(ApprovalList::default()));
    let unknown = AuthUser::new("renamed", "manager@acme.com");

    let err = harness
        .service
        .update_approval_list(&unknown, &cla_group(), &company(), "g1", &add_emails(&["x@acme.com"]))
        .await
        .unwrap_err();
    assert!(matches!(err, SignatureError::NotFound(_)));
}

#[tokio::test]
async fn test_inactive_ccla_is_not_found() {
    let mut data = base_data();
    data.signatures.push(
        SignatureBuilder::ccla("ccla-1", &company())
            .manager(manager())
            .inactive()
            .build(),
    );
    let harness = Harness::new(data);

    let err = harness
        .service
        .update_approval_list(&caller(), &cla_group(), &company(), "g1", &add_emails(&["x@acme.com"]))
        .await
        .unwrap_err();
    assert!(matches!(err, SignatureError::NotFound(_)));
}

// =============================================================================
// AUTO-CREATED ACKNOWLEDGEMENTS
// =============================================================================

#[tokio::test]
async fn test_new_email_creates_one_user_and_one_acknowledgement() {
    let harness = Harness::new(ccla_data(ApprovalList::default()));

    let updated = harness
        .service
        .update_approval_list(&caller(), &cla_group(), &company(), "g1", &add_emails(&["new@co.com"]))
        .await
        .unwrap();
    assert_eq!(updated.approval_list.email, vec!["new@co.com".to_string()]);

    let data = harness.data();
    let created: Vec<_> = data.users.iter().filter(|u| u.user_id != "m1").collect();
    assert_eq!(created.len(), 1);
    assert_eq!(created[0].best_email(), Some("new@co.com"));
    assert_eq!(created[0].company(), Some("c1"));
    assert_eq!(employee_signatures(&data), 1);

    // The new employee is now covered through the corporate agreement.
    let signed = harness.service.has_user_signed(created[0], "g1").await.unwrap();
    assert!(signed);
}

#[tokio::test]
async fn test_repeated_email_is_acknowledged_once() {
    let harness = Harness::new(ccla_data(ApprovalList::default()));

    harness
        .service
        .update_approval_list(
            &caller(),
            &cla_group(),
            &company(),
            "g1",
            &add_emails(&["new@co.com", " new@co.com "]),
        )
        .await
        .unwrap();

    let data = harness.data();
    assert_eq!(data.users.len(), 2);
    assert_eq!(employee_signatures(&data), 1);
}

#[tokio::test]
async fn test_existing_user_is_reused() {
    let mut data = ccla_data(ApprovalList::default());
    data.users
        .push(UserBuilder::new("u1").username("dev").email("dev@acme.com").company("c1").build());
    let harness = Harness::new(data);

    harness
        .service
        .update_approval_list(&caller(), &cla_group(), &company(), "g1", &add_emails(&["dev@acme.com"]))
        .await
        .unwrap();

    let data = harness.data();
    assert_eq!(data.users.len(), 2);
    let ecla = data
        .signatures
        .iter()
        .find(|s| s.signature_type == SignatureType::Employee)
        .unwrap();
    assert_eq!(ecla.reference_id, "u1");
}

#[tokio::test]
async fn test_existing_acknowledgement_is_not_duplicated() {
    let dev = UserBuilder::new("u1").email("dev@acme.com").company("c1").build();
    let mut data = ccla_data(ApprovalList::default());
    data.signatures
        .push(SignatureBuilder::ecla("ecla-existing", &dev, "c1").build());
    data.users.push(dev);
    let harness = Harness::new(data);

    harness
        .service
        .update_approval_list(&caller(), &cla_group(), &company(), "g1", &add_emails(&["dev@acme.com"]))
        .await
        .unwrap();

    let data = harness.data();
    let active: Vec<_> = data
        .signatures
        .iter()
        .filter(|s| s.signature_type == SignatureType::Employee && s.reference_id == "u1" && s.approved)
        .collect();
    assert_eq!(active.len(), 1);
    assert_eq!(active[0].signature_id, "ecla-existing");
}

#[tokio::test]
async fn test_invalidated_acknowledgement_is_replaced() {
    let dev = UserBuilder::new("u1").email("dev@acme.com").company("c1").build();
    let mut data = ccla_data(ApprovalList::default());
    data.signatures
        .push(SignatureBuilder::ecla("ecla-old", &dev, "c1").inactive().build());
    data.users.push(dev);
    let harness = Harness::new(data);

    harness
        .service
        .update_approval_list(&caller(), &cla_group(), &company(), "g1", &add_emails(&["dev@acme.com"]))
        .await
        .unwrap();

    let data = harness.data();
    assert_eq!(employee_signatures(&data), 2);
    assert!(
        data.signatures
            .iter()
            .any(|s| s.signature_type == SignatureType::Employee && s.signature_id != "ecla-old" && s.approved)
    );
}

#[tokio::test]
async fn test_no_acknowledgement_without_auto_create() {
    let mut data = base_data();
    data.signatures
        .push(SignatureBuilder::ccla("ccla-1", &company()).manager(manager()).build());
    let harness = Harness::new(data);

    harness
        .service
        .update_approval_list(&caller(), &cla_group(), &company(), "g1", &add_emails(&["new@co.com"]))
        .await
        .unwrap();

    let data = harness.data();
    assert_eq!(data.users.len(), 1);
    assert_eq!(employee_signatures(&data), 0);
}

#[tokio::test]
async fn test_managers_and_contributors_are_emailed() {
    let harness = Harness::new(ccla_data(ApprovalList::default()));

    harness
        .service
        .update_approval_list(&caller(), &cla_group(), &company(), "g1", &add_emails(&["new@co.com"]))
        .await
        .unwrap();

    let messages = harness.outbox.messages();
    assert!(messages.iter().any(|m| m.recipients == ["manager@acme.com"]));
    assert!(messages.iter().any(|m| m.recipients == ["new@co.com"]));
}

#[tokio::test]
async fn test_github_login_provisioning_reconciles_pull_request() {
    let octo = UserBuilder::new("u-octo").github("octocat").company("c1").build();
    let mut data = ccla_data(ApprovalList {
        github_org: vec!["acme-eng".to_string()],
        ..ApprovalList::default()
    });
    data.users.push(octo);
    data.repositories.push(ClaRepository {
        repository_id: "101".to_string(),
        repository_name: "acme/widgets".to_string(),
        repository_url: "https://github.com/acme/widgets".to_string(),
        organization_name: "acme".to_string(),
        project_id: "g1".to_string(),
        enabled: true,
    });
    data.github_organizations.push(GithubOrganization {
        organization_name: "acme".to_string(),
        installation_id: 7,
        project_sfid: "sf-g1".to_string(),
    });
    data.signature_metadata.push(ActiveSignatureMetadata {
        user_id: "u-octo".to_string(),
        project_id: "g1".to_string(),
        repository_id: "101".to_string(),
        pull_request_id: "12".to_string(),
    });
    let github = FakeGitHub::default()
        .with_member("octocat", "acme-eng")
        .with_commit("abc123", "octocat", 583_231);
    let harness = Harness::with_github(data, github);

    let delta = ApprovalListDelta {
        add_github_username: vec!["octocat".to_string()],
        ..ApprovalListDelta::default()
    };
    harness
        .service
        .update_approval_list(&caller(), &cla_group(), &company(), "g1", &delta)
        .await
        .unwrap();

    assert_eq!(employee_signatures(&harness.data()), 1);
    let statuses = harness.github.statuses();
    assert_eq!(statuses.len(), 1);
    assert_eq!(statuses[0].state, CommitState::Success);
}

#[tokio::test]
async fn test_unknown_github_login_aborts() {
    let harness = Harness::new(ccla_data(ApprovalList::default()));

    let delta = ApprovalListDelta {
        add_github_username: vec!["ghost".to_string()],
        ..ApprovalListDelta::default()
    };
    let err = harness
        .service
        .update_approval_list(&caller(), &cla_group(), &company(), "g1", &delta)
        .await
        .unwrap_err();
    assert!(matches!(err, SignatureError::NotFound(_)));
}

// =============================================================================
// REMOVALS
// =============================================================================

#[tokio::test]
async fn test_removed_email_invalidates_acknowledgement() {
    let dev = UserBuilder::new("u1").email("dev@acme.com").company("c1").build();
    let mut data = ccla_data(ApprovalList {
        email: vec!["dev@acme.com".to_string()],
        ..ApprovalList::default()
    });
    data.signatures
        .push(SignatureBuilder::ecla("ecla-1", &dev, "c1").build());
    data.users.push(dev.clone());
    let harness = Harness::new(data);
    assert!(harness.service.has_user_signed(&dev, "g1").await.unwrap());

    let delta = ApprovalListDelta {
        remove_email: vec!["dev@acme.com".to_string()],
        ..ApprovalListDelta::default()
    };
    harness
        .service
        .update_approval_list(&caller(), &cla_group(), &company(), "g1", &delta)
        .await
        .unwrap();

    let data = harness.data();
    let ecla = data.signatures.iter().find(|s| s.signature_id == "ecla-1").unwrap();
    assert!(!ecla.approved);
    assert!(!harness.service.has_user_signed(&dev, "g1").await.unwrap());
}

#[tokio::test]
async fn test_removal_keeps_acknowledgement_still_covered_by_domain() {
    let dev = UserBuilder::new("u1").email("dev@acme.com").company("c1").build();
    let mut data = ccla_data(ApprovalList {
        email: vec!["dev@acme.com".to_string()],
        domain: vec!["acme.com".to_string()],
        ..ApprovalList::default()
    });
    data.signatures
        .push(SignatureBuilder::ecla("ecla-1", &dev, "c1").build());
    let harness = Harness::new(data);

    let delta = ApprovalListDelta {
        remove_email: vec!["dev@acme.com".to_string()],
        ..ApprovalListDelta::default()
    };
    harness
        .service
        .update_approval_list(&caller(), &cla_group(), &company(), "g1", &delta)
        .await
        .unwrap();

    let data = harness.data();
    assert!(data.signatures.iter().all(|s| s.approved));
}

// =============================================================================
// COVERAGE
// =============================================================================

#[tokio::test]
async fn test_icla_covers_regardless_of_company() {
    let dev = UserBuilder::new("u1").email("dev@other.org").company("someone-else").build();
    let mut data = base_data();
    data.signatures.push(SignatureBuilder::icla("icla-1", &dev).build());
    let harness = Harness::new(data);

    assert!(harness.service.has_user_signed(&dev, "g1").await.unwrap());
    assert!(!harness.service.has_user_signed(&dev, "g2").await.unwrap());
}

#[tokio::test]
async fn test_email_list_is_case_sensitive() {
    let dev = UserBuilder::new("u1").email("A@x.com").company("c1").build();
    let mut data = ccla_data(ApprovalList {
        email: vec!["a@x.com".to_string()],
        ..ApprovalList::default()
    });
    data.signatures
        .push(SignatureBuilder::ecla("ecla-1", &dev, "c1").build());
    let harness = Harness::new(data);

    let ccla = harness.service.get_signature("ccla-1").await.unwrap().unwrap();
    assert!(!harness.service.user_is_approved(&dev, &ccla).await.unwrap());
    assert!(!harness.service.has_user_signed(&dev, "g1").await.unwrap());
}

#[tokio::test]
async fn test_domain_and_org_coverage() {
    let dev = UserBuilder::new("u1").email("dev@eu.acme.com").github("devcat").build();
    let list = ApprovalList {
        domain: vec!["*.acme.com".to_string()],
        ..ApprovalList::default()
    };
    let harness = Harness::with_github(ccla_data(list), FakeGitHub::default().with_member("devcat", "acme-eng"));
    let ccla = harness.service.get_signature("ccla-1").await.unwrap().unwrap();
    assert!(harness.service.user_is_approved(&dev, &ccla).await.unwrap());

    let outsider = UserBuilder::new("u2").email("dev@acme.org").github("devcat").build();
    assert!(!harness.service.user_is_approved(&outsider, &ccla).await.unwrap());

    let mut by_org = ccla.clone();
    by_org.approval_list.github_org = vec!["acme-eng".to_string()];
    assert!(harness.service.user_is_approved(&outsider, &by_org).await.unwrap());
}

// =============================================================================
// INVALIDATION
// =============================================================================

#[tokio::test]
async fn test_invalidate_project_records() {
    let dev = UserBuilder::new("u1").build();
    let mut data = ccla_data(ApprovalList::default());
    data.signatures.push(SignatureBuilder::icla("icla-1", &dev).build());
    data.signatures
        .push(SignatureBuilder::ecla("ecla-1", &dev, "c1").build());
    data.signatures
        .push(SignatureBuilder::icla("icla-2", &dev).project("g2").build());
    let harness = Harness::new(data);

    let attempted = harness
        .service
        .invalidate_project_records("g1", "CLA group retired")
        .await
        .unwrap();
    assert_eq!(attempted, 3);

    let data = harness.data();
    for signature in &data.signatures {
        let expected = signature.project_id != "g1";
        assert_eq!(signature.approved, expected, "{}", signature.signature_id);
    }
    let retired = data.signatures.iter().find(|s| s.signature_id == "icla-1").unwrap();
    assert_eq!(retired.note.as_deref(), Some("CLA group retired"));
}

#[tokio::test]
async fn test_invalidate_empty_group() {
    let harness = Harness::new(base_data());
    let attempted = harness.service.invalidate_project_records("g1", "n/a").await.unwrap();
    assert_eq!(attempted, 0);
}
