//! Adapter tests
//!
//! Tests for I/O adapter implementations:
//! - GitHub REST client (membership, users, pull requests, statuses)

mod github_test;
