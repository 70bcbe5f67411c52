use crate::core::models::selection::AtomSelection;
use crate::core::units::OutputUnitOverride;
use serde::Deserialize;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq, Clone)]
pub enum ConfigError {
    #[error("Missing required parameter: {0}")]
    MissingParameter(&'static str),
}

/// How a channel's virial block is scaled on its way back to the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum VirialScaling {
    /// Multiply by the output unit.
    #[default]
    OutputUnit,
    /// Multiply by the output unit and divide by the length unit.
    OutputUnitOverLength,
}

impl VirialScaling {
    pub fn factor(&self, output_unit: f64, length_unit: f64) -> f64 {
        match self {
            VirialScaling::OutputUnit => output_unit,
            VirialScaling::OutputUnitOverLength => output_unit / length_unit,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct AdapterConfig {
    pub atoms: AtomSelection,
    pub model_path: PathBuf,
    pub atom_types_path: PathBuf,
    pub output_unit: OutputUnitOverride,
    /// `false` disables whole-molecule reconstruction and sends no cell to the model.
    pub periodic: bool,
    /// `None` uses the model kind's default.
    pub virial_scaling: Option<VirialScaling>,
}

#[derive(Default)]
pub struct AdapterConfigBuilder {
    atoms: Option<AtomSelection>,
    model_path: Option<PathBuf>,
    atom_types_path: Option<PathBuf>,
    output_unit: Option<OutputUnitOverride>,
    periodic: Option<bool>,
    virial_scaling: Option<VirialScaling>,
}

impl AdapterConfigBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn atoms(mut self, selection: AtomSelection) -> Self {
        self.atoms = Some(selection);
        self
    }
    pub fn model_path(mut self, path: PathBuf) -> Self {
        self.model_path = Some(path);
        self
    }
    pub fn atom_types_path(mut self, path: PathBuf) -> Self {
        self.atom_types_path = Some(path);
        self
    }
    pub fn output_unit(mut self, unit: OutputUnitOverride) -> Self {
        self.output_unit = Some(unit);
        self
    }
    pub fn periodic(mut self, periodic: bool) -> Self {
        self.periodic = Some(periodic);
        self
    }
    pub fn nopbc(self, nopbc: bool) -> Self {
        self.periodic(!nopbc)
    }
    pub fn virial_scaling(mut self, scaling: VirialScaling) -> Self {
        self.virial_scaling = Some(scaling);
        self
    }

    pub fn build(self) -> Result<AdapterConfig, ConfigError> {
        Ok(AdapterConfig {
            atoms: self.atoms.unwrap_or_default(),
            model_path: self
                .model_path
                .ok_or(ConfigError::MissingParameter("model_path"))?,
            atom_types_path: self
                .atom_types_path
                .ok_or(ConfigError::MissingParameter("atom_types_path"))?,
            output_unit: self.output_unit.unwrap_or_default(),
            periodic: self.periodic.unwrap_or(true),
            virial_scaling: self.virial_scaling,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn build_applies_defaults_for_optional_parameters() {
        let config = AdapterConfigBuilder::new()
            .model_path(PathBuf::from("graph.pb"))
            .atom_types_path(PathBuf::from("type.raw"))
            .build()
            .unwrap();
        assert_eq!(config.atoms, AtomSelection::All);
        assert_eq!(config.output_unit, OutputUnitOverride::Default);
        assert!(config.periodic);
        assert_eq!(config.virial_scaling, None);
    }

    #[test]
    fn build_fails_without_model_path() {
        let result = AdapterConfigBuilder::new()
            .atom_types_path(PathBuf::from("type.raw"))
            .build();
        assert_eq!(result, Err(ConfigError::MissingParameter("model_path")));
    }

    #[test]
    fn build_fails_without_atom_types_path() {
        let result = AdapterConfigBuilder::new()
            .model_path(PathBuf::from("graph.pb"))
            .build();
        assert_eq!(result, Err(ConfigError::MissingParameter("atom_types_path")));
    }

    #[test]
    fn nopbc_disables_periodicity() {
        let config = AdapterConfigBuilder::new()
            .model_path(PathBuf::from("graph.pb"))
            .atom_types_path(PathBuf::from("type.raw"))
            .nopbc(true)
            .build()
            .unwrap();
        assert!(!config.periodic);
    }

    #[test]
    fn virial_scaling_factor_optionally_folds_in_length_unit() {
        assert_eq!(VirialScaling::OutputUnit.factor(2.0, 0.1), 2.0);
        assert!((VirialScaling::OutputUnitOverLength.factor(2.0, 0.1) - 20.0).abs() < 1e-12);
    }
}
