//! Helpers shared by the proc-macro crates of the workspace.
#![allow(clippy::std_instead_of_core, reason = "proc-macro helper crate")]

// -----------------------------------------------------------------------------
// Modules

mod manifest;

// -----------------------------------------------------------------------------
// Exports

pub use manifest::Manifest;
