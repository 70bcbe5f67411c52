//! # Engine Module
//!
//! The stateful layer that turns an opaque inference engine into per-step host
//! observables.
//!
//! ## Architecture
//!
//! - **Capabilities** ([`inference`], [`host`]) - The interfaces the adapter requires from the
//!   inference engine and from the simulation host
//! - **Model Kinds** ([`kinds`]) - Potential, dipole, and polarizability specializations
//! - **Adapter** ([`adapter`]) - Setup and per-step evaluation
//! - **Configuration** ([`config`]) - Adapter parameters and their builder
//! - **Error Handling** ([`error`]) - Engine-level error taxonomy
//!
//! ## Evaluation Flow
//!
//! Host positions and cell are converted to model length units and packed into flat
//! buffers through [`crate::core::index::IndexConverter`]. The engine's flat output,
//! force, and virial buffers are then unpacked through the same converter, rescaled to
//! host units, and published as one [`crate::core::models::channel::OutputChannel`]
//! per model output.

pub mod adapter;
pub mod config;
pub mod error;
pub mod host;
pub mod inference;
pub mod kinds;
