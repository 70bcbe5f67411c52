use phf::{Map, phf_map};
use thiserror::Error;

/// Size of one model length unit (Angstrom) in nanometers.
pub const MODEL_LENGTH_UNIT: f64 = 0.1;
/// Size of one model energy unit (eV) in kJ/mol.
pub const MODEL_ENERGY_UNIT: f64 = 96.487;
pub const MODEL_DIPOLE_UNIT: f64 = 1.0;
pub const MODEL_POLAR_UNIT: f64 = 1.0;

// Sizes in nm.
static LENGTH_UNITS: Map<&'static str, f64> = phf_map! {
    "nm" => 1.0,
    "a" => 0.1,
    "angstrom" => 0.1,
    "um" => 1000.0,
    "bohr" => 0.052917721067,
};

// Sizes in kJ/mol.
static ENERGY_UNITS: Map<&'static str, f64> = phf_map! {
    "kj/mol" => 1.0,
    "j/mol" => 0.001,
    "kcal/mol" => 4.184,
    "ev" => 96.48530749925792,
    "ha" => 2625.499638,
};

#[derive(Debug, Error, Clone, PartialEq)]
pub enum UnitError {
    #[error("Unknown length unit '{0}'")]
    UnknownLength(String),
    #[error("Unknown energy unit '{0}'")]
    UnknownEnergy(String),
    #[error("Invalid {quantity} unit size {value}: must be positive and finite")]
    InvalidSize { quantity: &'static str, value: f64 },
    #[error("Output unit conversion must be a number, got {0}")]
    InvalidOverride(f64),
}

/// The host engine's unit system, expressed as the size of one host unit in
/// nanometers and kJ/mol.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HostUnits {
    pub length: f64,
    pub energy: f64,
}

impl Default for HostUnits {
    fn default() -> Self {
        Self {
            length: 1.0,
            energy: 1.0,
        }
    }
}

impl HostUnits {
    pub fn new(length: f64, energy: f64) -> Result<Self, UnitError> {
        check_size("length", length)?;
        check_size("energy", energy)?;
        Ok(Self { length, energy })
    }

    /// Looks units up by name, e.g. `("A", "kcal/mol")`. Names are case-insensitive.
    pub fn from_names(length: &str, energy: &str) -> Result<Self, UnitError> {
        let length_size = LENGTH_UNITS
            .get(length.trim().to_ascii_lowercase().as_str())
            .copied()
            .ok_or_else(|| UnitError::UnknownLength(length.to_string()))?;
        let energy_size = ENERGY_UNITS
            .get(energy.trim().to_ascii_lowercase().as_str())
            .copied()
            .ok_or_else(|| UnitError::UnknownEnergy(energy.to_string()))?;
        Self::new(length_size, energy_size)
    }
}

fn check_size(quantity: &'static str, value: f64) -> Result<(), UnitError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(UnitError::InvalidSize { quantity, value })
    }
}

/// User-supplied replacement for the default output unit.
///
/// A negative raw value means "not set".
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum OutputUnitOverride {
    #[default]
    Default,
    Value(f64),
}

impl OutputUnitOverride {
    pub fn from_raw(raw: f64) -> Result<Self, UnitError> {
        if raw.is_nan() || raw.is_infinite() {
            Err(UnitError::InvalidOverride(raw))
        } else if raw < 0.0 {
            Ok(Self::Default)
        } else {
            Ok(Self::Value(raw))
        }
    }
}

impl TryFrom<Option<f64>> for OutputUnitOverride {
    type Error = UnitError;

    fn try_from(value: Option<f64>) -> Result<Self, Self::Error> {
        match value {
            Some(raw) => Self::from_raw(raw),
            None => Ok(Self::Default),
        }
    }
}

/// Conversion factors between host and model units, resolved once at setup.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct UnitConversion {
    /// Host length per model length scaling; host coordinates are divided by it.
    pub length_unit: f64,
    /// Host output per model output.
    pub output_unit: f64,
}

impl UnitConversion {
    /// Resolves the factors for a model kind whose default output unit is
    /// `default_output_unit`, already expressed in host units.
    pub fn resolve(
        host: &HostUnits,
        default_output_unit: f64,
        output_override: OutputUnitOverride,
    ) -> Result<Self, UnitError> {
        check_size("length", host.length)?;
        let output_unit = match output_override {
            OutputUnitOverride::Value(v) => v,
            OutputUnitOverride::Default => default_output_unit,
        };
        if !output_unit.is_finite() || output_unit < 0.0 {
            return Err(UnitError::InvalidOverride(output_unit));
        }
        Ok(Self {
            length_unit: MODEL_LENGTH_UNIT / host.length,
            output_unit,
        })
    }

    #[inline]
    pub fn to_model_length(&self, host_length: f64) -> f64 {
        host_length / self.length_unit
    }

    #[inline]
    pub fn to_host_length(&self, model_length: f64) -> f64 {
        model_length * self.length_unit
    }
}

/// Converts one model energy unit into the host energy unit.
pub fn model_energy_in(host: &HostUnits) -> f64 {
    MODEL_ENERGY_UNIT / host.energy
}
