use crate::core::io::atype::AtomTypeFile;
use crate::core::models::selection::AtomSet;
use crate::core::models::types::AtomTypeTable;
use crate::core::units::{HostUnits, UnitConversion};
use crate::engine::config::{AdapterConfig, VirialScaling};
use crate::engine::error::EngineError;
use crate::engine::inference::InferenceError;
use crate::engine::kinds::ModelKindName;
use std::fs::File;
use std::path::PathBuf;
use tracing::{info, instrument, warn};

/// Everything setup resolves before the inference engine is involved.
#[derive(Debug, Clone, PartialEq)]
pub struct SetupReport {
    pub kind: ModelKindName,
    pub channels: &'static [&'static str],
    pub atoms: AtomSet,
    pub atom_types: AtomTypeTable,
    pub total_atoms: usize,
    pub units: UnitConversion,
    pub periodic: bool,
    pub virial_scaling: VirialScaling,
    pub model_path: PathBuf,
}

impl SetupReport {
    pub fn covers_whole_system(&self) -> bool {
        self.atoms.len() == self.total_atoms
    }
}

/// Dry-runs adapter setup for a system of `total_atoms` atoms.
///
/// Performs the same checks as [`crate::engine::adapter::ModelAdapter::setup`] up to,
/// but not including, loading the model; the model file only has to be readable.
#[instrument(skip_all, name = "validate_workflow", fields(kind = %kind))]
pub fn run(
    kind: ModelKindName,
    config: &AdapterConfig,
    total_atoms: usize,
    host_units: HostUnits,
) -> Result<SetupReport, EngineError> {
    let units = UnitConversion::resolve(
        &host_units,
        kind.default_output_unit(&host_units),
        config.output_unit,
    )?;

    let atoms = AtomSet::resolve(&config.atoms, total_atoms)?;
    if atoms.len() != total_atoms {
        warn!(
            "Number of atoms provided ({}) differs from the number of atoms in the system ({}).",
            atoms.len(),
            total_atoms
        );
    }

    let atom_types = AtomTypeFile::read_from_path(&config.atom_types_path)?;
    if atom_types.len() != atoms.len() {
        return Err(EngineError::AtomTypeCount {
            types: atom_types.len(),
            atoms: atoms.len(),
        });
    }

    File::open(&config.model_path).map_err(|e| InferenceError::Load {
        path: config.model_path.clone(),
        source: Box::new(e),
    })?;

    info!("Setup checks passed for {} atoms.", atoms.len());
    Ok(SetupReport {
        kind,
        channels: kind.channels(),
        atoms,
        atom_types,
        total_atoms,
        units,
        periodic: config.periodic,
        virial_scaling: config
            .virial_scaling
            .unwrap_or_else(|| kind.default_virial_scaling()),
        model_path: config.model_path.clone(),
    })
}
