//! Core domain logic for CLA signatures
//!
//! This module contains the signature workflows and the types they work on.
//! All external interactions are abstracted through port traits.
//!
//! ## Architecture
//!
//! - `models/` - Domain types (Signature, ApprovalList, User, Page)
//! - `services/` - Workflow orchestration and pure matching helpers
//! - `ports/` - Trait definitions for external dependencies

pub mod models;
pub mod ports;
pub mod services;
