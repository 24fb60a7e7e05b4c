//! Tests for the Output module
//!
//! Output provides structured result types that can be rendered as either
//! human-readable text or machine-parseable JSON.

use cla_signatures::core::models::{Page, PageRequest, SignatureCompanyId};
use cla_signatures::output::{
    CoverageResult, HumanRow, InvalidateResult, ListResult, OperationResult, OutputMode,
    SignatureResult,
};

use crate::common::fixtures::{SignatureBuilder, company, manager};

// =============================================================================
// OutputMode Tests
// =============================================================================

#[test]
fn output_mode_default() {
    assert_eq!(OutputMode::default(), OutputMode::Human);
}

// =============================================================================
// Serialization Tests
// =============================================================================

#[test]
fn list_result_keeps_cursor() {
    let ids: Vec<SignatureCompanyId> = (1..=3)
        .map(|n| SignatureCompanyId {
            signature_id: format!("s{n}"),
            company_id: format!("c{n}"),
        })
        .collect();
    let page = Page::from_sorted(ids, &PageRequest::first(2), |r| r.signature_id.as_str());

    let result = ListResult::from(page);
    let json = serde_json::to_string(&result).unwrap();
    assert!(json.contains("\"last_key\":\"s2\""));
    assert!(json.contains("\"total_count\":3"));
}

#[test]
fn list_result_from_vec_has_no_cursor() {
    let result = ListResult::from(vec![SignatureCompanyId {
        signature_id: "s1".to_string(),
        company_id: "c1".to_string(),
    }]);
    let json = serde_json::to_string(&result).unwrap();
    assert!(!json.contains("last_key"));
    assert!(json.contains("\"total_count\":1"));
}

#[test]
fn signature_result_flattens_signature() {
    let signature = SignatureBuilder::ccla("ccla-1", &company()).manager(manager()).build();
    let json = serde_json::to_string(&SignatureResult { signature }).unwrap();
    assert!(json.contains("\"signature_id\":\"ccla-1\""));
    assert!(json.contains("\"signature_type\":\"ccla\""));
    assert!(!json.contains("\"signature\":{"));
}

#[test]
fn coverage_result_serialization() {
    let result = CoverageResult {
        user_id: "dev".to_string(),
        project_id: "g1".to_string(),
        signed: false,
    };
    let json = serde_json::to_string(&result).unwrap();
    assert!(json.contains("\"signed\":false"));
}

#[test]
fn invalidate_and_operation_results_serialize() {
    let json = serde_json::to_string(&InvalidateResult {
        project_id: "g1".to_string(),
        attempted: 3,
    })
    .unwrap();
    assert!(json.contains("\"attempted\":3"));

    let json = serde_json::to_string(&OperationResult {
        success: true,
        message: "done".to_string(),
    })
    .unwrap();
    assert!(json.contains("\"success\":true"));
}

// =============================================================================
// Human Rows
// =============================================================================

#[test]
fn signature_row_names_reference() {
    let row = SignatureBuilder::ccla("ccla-1", &company()).build().human_row();
    assert!(row.contains("ccla-1"));
    assert!(row.contains("Acme"));
}
