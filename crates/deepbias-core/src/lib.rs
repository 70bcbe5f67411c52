//! # deepbias Core Library
//!
//! Bridges machine-learned tensor models (scalar potential, dipole vector, or
//! polarizability tensor) and molecular-dynamics engines, so that a model output can
//! be used as a per-timestep observable together with the per-atom derivatives and the
//! virial needed to apply it as a bias.
//!
//! ## Architectural Philosophy
//!
//! The library follows a three-layer architecture:
//!
//! - **[`core`]: The Foundation.** Stateless pieces: the flat-buffer [`core::index::IndexConverter`],
//!   unit conversion between host and model conventions, data records, and file I/O.
//!
//! - **[`engine`]: The Logic Core.** The generic [`engine::adapter::ModelAdapter`], parameterized
//!   by model kind and inference engine, together with the capability traits it needs from
//!   the host ([`engine::host::SimulationHost`]) and from the engine
//!   ([`engine::inference::TensorModel`]).
//!
//! - **[`workflows`]: The Public API.** Procedures built on the two layers below, such as
//!   validating a bias definition before a run.

pub mod core;
pub mod engine;
pub mod workflows;
