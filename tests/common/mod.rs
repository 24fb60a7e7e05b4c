//! Common test utilities shared across test types
//!
//! - `fixtures.rs` - Test data builders, a scripted GitHub fake and service wiring

pub mod fixtures;
