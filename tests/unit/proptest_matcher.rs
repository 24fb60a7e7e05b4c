//! Property-based tests for domain pattern matching
//!
//! Uses proptest to verify properties that should hold for all inputs.

use cla_signatures::core::services::domain_pattern_regex;
use proptest::prelude::*;

proptest! {
    /// Every wildcard form matches any address under the domain
    #[test]
    fn wildcard_forms_match_suffix(
        local in "[a-z0-9]{1,10}",
        sub in "[a-z]{1,8}",
        domain in "[a-z]{2,10}",
    ) {
        let email = format!("{local}@{sub}.{domain}.com");
        for prefix in ["*.", "*", "."] {
            let re = domain_pattern_regex(&format!("{prefix}{domain}.com")).unwrap();
            prop_assert!(re.is_match(&email), "{prefix}{domain}.com should match {email}");
        }
    }

    /// Wildcard forms never match a different top-level domain
    #[test]
    fn wildcard_forms_reject_other_tld(
        local in "[a-z0-9]{1,10}",
        domain in "[a-z]{2,10}",
    ) {
        let email = format!("{local}@{domain}.org");
        for prefix in ["*.", "*", "."] {
            let re = domain_pattern_regex(&format!("{prefix}{domain}.com")).unwrap();
            prop_assert!(!re.is_match(&email));
        }
    }

    /// Arbitrary pattern text always compiles
    #[test]
    fn any_pattern_compiles(pattern in "\\PC{0,30}") {
        prop_assert!(domain_pattern_regex(&pattern).is_ok());
    }
}
