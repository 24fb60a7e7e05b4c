//! cla-signatures - Contributor License Agreement signature service
//!
//! Command-line front-end over the signature service and its JSON store.

// Deny all clippy warnings in this crate
#![deny(clippy::all, clippy::pedantic, clippy::nursery, unsafe_code)]
#![warn(missing_debug_implementations, unused_import_braces, unused_qualifications)]
// Allow some pedantic lints that are too noisy or not applicable
#![allow(
    clippy::module_name_repetitions,
    clippy::missing_errors_doc,
    clippy::cargo_common_metadata,
    clippy::future_not_send
)]

mod cli;

/// Main entry point for the cla-signatures CLI
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    cli::run().await
}
