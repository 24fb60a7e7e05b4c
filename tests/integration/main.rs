//! Integration tests for cla-signatures
//!
//! These tests run the signature workflows end to end over the in-memory
//! store, and drive the CLI binary against a store file.

#[path = "../common/mod.rs"]
#[allow(dead_code)]
mod common;

// Service workflows from the same directory
mod workflow_test;

use std::path::Path;

use assert_cmd::cargo;
use cla_signatures::adapters::StoreData;
use cla_signatures::core::models::{ApprovalList, SignatureType};
use predicates::prelude::*;
use tempfile::TempDir;

use common::fixtures::{SignatureBuilder, UserBuilder, base_data, company, manager};

/// Helper function to create a cla-signatures command isolated from the
/// caller's config and environment
fn cla(temp: &TempDir) -> assert_cmd::Command {
    let mut cmd = assert_cmd::Command::new(cargo::cargo_bin!("cla-signatures"));
    cmd.arg("--config")
        .arg(temp.path().join("config.toml"))
        .arg("--store")
        .arg(temp.path().join("store.json"))
        .env_remove("GITHUB_TOKEN")
        .env_remove("CLA_STORE")
        .env_remove("GH_ORG_VALIDATION")
        .env("RUST_LOG", "warn");
    cmd
}

/// Helper to seed the store file
fn seed(temp: &TempDir, data: &StoreData) {
    std::fs::write(temp.path().join("store.json"), serde_json::to_string_pretty(data).unwrap()).unwrap();
}

fn load(path: &Path) -> StoreData {
    serde_json::from_str(&std::fs::read_to_string(path).unwrap()).unwrap()
}

fn seeded() -> StoreData {
    let dev = UserBuilder::new("u1").username("dev").email("dev@example.org").build();
    let mut data = base_data();
    data.signatures.push(
        SignatureBuilder::ccla("ccla-1", &company())
            .manager(manager())
            .auto_create_ecla()
            .approval_list(ApprovalList {
                domain: vec!["acme.com".to_string()],
                ..ApprovalList::default()
            })
            .build(),
    );
    data.signatures.push(SignatureBuilder::icla("icla-1", &dev).build());
    data.users.push(dev);
    data
}

// =============================================================================
// BASICS
// =============================================================================

#[test]
fn test_version_json() {
    let temp = TempDir::new().unwrap();
    cla(&temp)
        .args(["--json", "version"])
        .assert()
        .success()
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
}

#[test]
fn test_signature_show() {
    let temp = TempDir::new().unwrap();
    seed(&temp, &seeded());

    cla(&temp)
        .args(["--json", "signature", "ccla-1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"signature_id\": \"ccla-1\""))
        .stdout(predicate::str::contains("acme.com"));
}

#[test]
fn test_missing_signature_fails() {
    let temp = TempDir::new().unwrap();
    seed(&temp, &seeded());

    cla(&temp)
        .args(["signature", "nope"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("NOT_FOUND"));
}

#[test]
fn test_empty_store_lists_nothing() {
    let temp = TempDir::new().unwrap();

    cla(&temp)
        .args(["signatures", "project", "g1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No results"));
}

// =============================================================================
// COVERAGE
// =============================================================================

#[test]
fn test_has_signed_with_icla() {
    let temp = TempDir::new().unwrap();
    seed(&temp, &seeded());

    cla(&temp)
        .args(["--json", "has-signed", "dev", "g1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"signed\": true"));
}

#[test]
fn test_has_signed_on_other_group() {
    let temp = TempDir::new().unwrap();
    seed(&temp, &seeded());

    cla(&temp)
        .args(["--json", "has-signed", "dev", "g2"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"signed\": false"));
}

// =============================================================================
// APPROVAL LISTS
// =============================================================================

#[test]
fn test_non_manager_update_is_forbidden() {
    let temp = TempDir::new().unwrap();
    let data = seeded();
    seed(&temp, &data);

    cla(&temp)
        .args([
            "approval-list",
            "update",
            "--cla-group",
            "g1",
            "--company",
            "c1",
            "--as",
            "dev",
            "--add-email",
            "friend@acme.com",
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("FORBIDDEN"));

    assert_eq!(load(&temp.path().join("store.json")), data);
}

#[test]
fn test_manager_update_creates_acknowledgement() {
    let temp = TempDir::new().unwrap();
    seed(&temp, &seeded());

    cla(&temp)
        .args([
            "--json",
            "approval-list",
            "update",
            "--cla-group",
            "g1",
            "--company",
            "c1",
            "--as",
            "manager",
            "--add-email",
            "new@co.com",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("new@co.com"));

    let data = load(&temp.path().join("store.json"));
    let eclas: Vec<_> = data
        .signatures
        .iter()
        .filter(|s| s.signature_type == SignatureType::Employee)
        .collect();
    assert_eq!(eclas.len(), 1);
    assert!(data.users.iter().any(|u| u.emails == ["new@co.com"]));
}

// =============================================================================
// MANAGERS AND INVALIDATION
// =============================================================================

#[test]
fn test_add_manager() {
    let temp = TempDir::new().unwrap();
    seed(&temp, &seeded());

    cla(&temp)
        .args(["managers", "add", "ccla-1", "dev"])
        .assert()
        .success()
        .stdout(predicate::str::contains("2 manager(s)"));
}

#[test]
fn test_invalidate_group() {
    let temp = TempDir::new().unwrap();
    seed(&temp, &seeded());

    cla(&temp)
        .args(["--json", "invalidate", "g1", "--note", "agreement retired"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"attempted\": 2"));

    let data = load(&temp.path().join("store.json"));
    assert!(data.signatures.iter().all(|s| !s.approved));
}
