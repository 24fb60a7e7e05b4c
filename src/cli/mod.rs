//! CLI layer for cla-signatures
//!
//! - [`app`] - CLI definitions and entry point
//! - [`context`] - Config loading and service wiring
//! - [`commands`] - Command implementations

pub mod app;
pub mod commands;
pub mod context;

// Re-export main entry point
pub use app::run;
