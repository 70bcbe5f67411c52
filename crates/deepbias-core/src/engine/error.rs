use super::config::ConfigError;
use super::inference::InferenceError;
use crate::core::index::IndexError;
use crate::core::io::atype::AtomTypeLoadError;
use crate::core::models::selection::SelectionError;
use crate::core::units::UnitError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum EngineError {
    #[error("Invalid configuration: {source}")]
    Config {
        #[from]
        source: ConfigError,
    },

    #[error("Invalid unit conversion: {source}")]
    Units {
        #[from]
        source: UnitError,
    },

    #[error("Invalid atom selection: {source}")]
    Selection {
        #[from]
        source: SelectionError,
    },

    #[error("Failed to load atom types: {source}")]
    AtomTypes {
        #[from]
        source: AtomTypeLoadError,
    },

    #[error("Invalid atom type file: {types} types given for {atoms} selected atoms")]
    AtomTypeCount { types: usize, atoms: usize },

    #[error("Invalid model for {kind}: output dimension should be {expected}, found {found}")]
    OutputDimension {
        kind: &'static str,
        expected: usize,
        found: usize,
    },

    #[error("Inference engine error: {source}")]
    Inference {
        #[from]
        source: InferenceError,
    },

    #[error("Inference engine returned {found} {buffer} values, expected {expected}")]
    OutputShape {
        buffer: &'static str,
        expected: usize,
        found: usize,
    },

    #[error("Host returned {found} positions for {expected} selected atoms")]
    HostPositions { expected: usize, found: usize },

    #[error("Internal indexing error: {source}")]
    Index {
        #[from]
        source: IndexError,
    },
}

impl EngineError {
    /// Whether the error stems from setup input rather than from evaluation.
    pub fn is_configuration(&self) -> bool {
        matches!(
            self,
            EngineError::Config { .. }
                | EngineError::Units { .. }
                | EngineError::Selection { .. }
                | EngineError::AtomTypes { .. }
                | EngineError::AtomTypeCount { .. }
                | EngineError::OutputDimension { .. }
                | EngineError::Inference {
                    source: InferenceError::Load { .. }
                }
        )
    }
}
