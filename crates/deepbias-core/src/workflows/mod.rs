//! # Workflows Module
//!
//! High-level entry points that tie the `engine` and `core` layers together for
//! callers that do not drive a simulation themselves.
//!
//! - **Validation Workflow** ([`validate`]) - Dry-run of adapter setup that resolves units,
//!   the atom selection, and the atom type list, and checks that the model file is readable.

pub mod validate;
