use super::adapter::ModelAdapter;
use super::config::VirialScaling;
use super::inference::Lifted;
use crate::core::units::{self, HostUnits};
use serde::Deserialize;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Compile-time description of one family of model outputs.
pub trait ModelKind {
    const NAME: &'static str;
    /// Registration names of the output channels; the length is the output dimension.
    const CHANNELS: &'static [&'static str];

    fn output_dim() -> usize {
        Self::CHANNELS.len()
    }

    /// Output conversion used when the configuration does not override it.
    fn default_output_unit(host: &HostUnits) -> f64;

    fn default_virial_scaling() -> VirialScaling {
        VirialScaling::OutputUnit
    }
}

/// Scalar potential energy.
#[derive(Debug, Clone, Copy)]
pub struct Potential;

/// Dipole vector.
#[derive(Debug, Clone, Copy)]
pub struct Dipole;

/// Polarizability tensor.
#[derive(Debug, Clone, Copy)]
pub struct Polarizability;

impl ModelKind for Potential {
    const NAME: &'static str = "potential";
    const CHANNELS: &'static [&'static str] = &[""];

    fn default_output_unit(host: &HostUnits) -> f64 {
        units::model_energy_in(host)
    }
}

impl ModelKind for Dipole {
    const NAME: &'static str = "dipole";
    const CHANNELS: &'static [&'static str] = &["x", "y", "z"];

    fn default_output_unit(_host: &HostUnits) -> f64 {
        units::MODEL_DIPOLE_UNIT
    }
}

impl ModelKind for Polarizability {
    const NAME: &'static str = "polar";
    const CHANNELS: &'static [&'static str] =
        &["xx", "xy", "xz", "yx", "yy", "yz", "zx", "zy", "zz"];

    fn default_output_unit(_host: &HostUnits) -> f64 {
        units::MODEL_POLAR_UNIT
    }
}

pub type DeepPotential<M> = ModelAdapter<Potential, Lifted<M>>;
pub type DeepDipole<M> = ModelAdapter<Dipole, M>;
pub type DeepPolar<M> = ModelAdapter<Polarizability, M>;

/// Runtime tag for the model kinds, used where the kind comes from user input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ModelKindName {
    Potential,
    Dipole,
    #[serde(alias = "polarizability")]
    Polar,
}

impl ModelKindName {
    pub fn channels(&self) -> &'static [&'static str] {
        match self {
            ModelKindName::Potential => Potential::CHANNELS,
            ModelKindName::Dipole => Dipole::CHANNELS,
            ModelKindName::Polar => Polarizability::CHANNELS,
        }
    }

    pub fn output_dim(&self) -> usize {
        self.channels().len()
    }

    pub fn default_output_unit(&self, host: &HostUnits) -> f64 {
        match self {
            ModelKindName::Potential => Potential::default_output_unit(host),
            ModelKindName::Dipole => Dipole::default_output_unit(host),
            ModelKindName::Polar => Polarizability::default_output_unit(host),
        }
    }

    pub fn default_virial_scaling(&self) -> VirialScaling {
        match self {
            ModelKindName::Potential => Potential::default_virial_scaling(),
            ModelKindName::Dipole => Dipole::default_virial_scaling(),
            ModelKindName::Polar => Polarizability::default_virial_scaling(),
        }
    }
}

impl fmt::Display for ModelKindName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ModelKindName::Potential => Potential::NAME,
            ModelKindName::Dipole => Dipole::NAME,
            ModelKindName::Polar => Polarizability::NAME,
        };
        f.write_str(name)
    }
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("Unknown model kind '{0}': expected 'potential', 'dipole', or 'polar'")]
pub struct UnknownModelKind(pub String);

impl FromStr for ModelKindName {
    type Err = UnknownModelKind;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "potential" | "deeppotential" => Ok(ModelKindName::Potential),
            "dipole" | "deepdipole" => Ok(ModelKindName::Dipole),
            "polar" | "polarizability" | "deeppolar" => Ok(ModelKindName::Polar),
            _ => Err(UnknownModelKind(s.to_string())),
        }
    }
}
