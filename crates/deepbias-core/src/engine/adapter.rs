use super::config::{AdapterConfig, VirialScaling};
use super::error::EngineError;
use super::host::SimulationHost;
use super::inference::{ModelOutput, TensorModel};
use super::kinds::ModelKind;
use crate::core::index::IndexConverter;
use crate::core::io::atype::AtomTypeFile;
use crate::core::models::cell::CellInput;
use crate::core::models::channel::OutputChannel;
use crate::core::models::selection::AtomSet;
use crate::core::models::types::AtomTypeTable;
use crate::core::units::UnitConversion;
use nalgebra::{Matrix3, Vector3};
use std::marker::PhantomData;
use tracing::{debug, info, instrument, trace, warn};

const NDIM: usize = 3;

/// Evaluates a tensor model of kind `K` on a fixed selection of host atoms and
/// converts its outputs into biasable host observables.
pub struct ModelAdapter<K: ModelKind, M: TensorModel> {
    model: M,
    atoms: AtomSet,
    atom_types: AtomTypeTable,
    units: UnitConversion,
    periodic: bool,
    virial_scaling: VirialScaling,
    channels: Vec<OutputChannel>,
    _kind: PhantomData<K>,
}

impl<K: ModelKind, M: TensorModel> ModelAdapter<K, M> {
    #[instrument(skip_all, name = "adapter_setup", fields(kind = K::NAME))]
    pub fn setup<H: SimulationHost>(config: &AdapterConfig, host: &H) -> Result<Self, EngineError> {
        let host_units = host.units();
        let units = UnitConversion::resolve(
            &host_units,
            K::default_output_unit(&host_units),
            config.output_unit,
        )?;

        let total_atoms = host.atom_count();
        let atoms = AtomSet::resolve(&config.atoms, total_atoms)?;
        log_selection(&atoms, total_atoms);
        if config.periodic {
            info!("Using periodic boundary conditions.");
        } else {
            info!("Without periodic boundary conditions.");
        }

        let atom_types = AtomTypeFile::read_from_path(&config.atom_types_path)?;
        if atom_types.len() != atoms.len() {
            return Err(EngineError::AtomTypeCount {
                types: atom_types.len(),
                atoms: atoms.len(),
            });
        }

        info!("Using graph file: {}", config.model_path.display());
        let model = M::load(&config.model_path)?;
        info!("Model initialized successfully.");

        Self::from_parts(
            model,
            atoms,
            atom_types,
            units,
            config.periodic,
            config.virial_scaling.unwrap_or_else(K::default_virial_scaling),
        )
    }

    /// Assembles an adapter from already resolved pieces, applying the same
    /// consistency checks as [`ModelAdapter::setup`].
    pub fn from_parts(
        model: M,
        atoms: AtomSet,
        atom_types: AtomTypeTable,
        units: UnitConversion,
        periodic: bool,
        virial_scaling: VirialScaling,
    ) -> Result<Self, EngineError> {
        if atom_types.len() != atoms.len() {
            return Err(EngineError::AtomTypeCount {
                types: atom_types.len(),
                atoms: atoms.len(),
            });
        }
        if model.output_dim() != K::output_dim() {
            return Err(EngineError::OutputDimension {
                kind: K::NAME,
                expected: K::output_dim(),
                found: model.output_dim(),
            });
        }

        info!("Assigned types to atoms: {:?}", atom_types.as_slice());
        info!(
            "Output unit conversion set to {}, length unit {}.",
            units.output_unit, units.length_unit
        );

        let channels = K::CHANNELS
            .iter()
            .map(|&name| OutputChannel::new(name, atoms.len()))
            .collect();

        Ok(Self {
            model,
            atoms,
            atom_types,
            units,
            periodic,
            virial_scaling,
            channels,
            _kind: PhantomData,
        })
    }

    pub fn atoms(&self) -> &AtomSet {
        &self.atoms
    }

    pub fn atom_types(&self) -> &AtomTypeTable {
        &self.atom_types
    }

    pub fn units(&self) -> &UnitConversion {
        &self.units
    }

    pub fn is_periodic(&self) -> bool {
        self.periodic
    }

    pub fn virial_scaling(&self) -> VirialScaling {
        self.virial_scaling
    }

    pub fn model(&self) -> &M {
        &self.model
    }

    /// Observables published by the most recent [`ModelAdapter::calculate`].
    pub fn channels(&self) -> &[OutputChannel] {
        &self.channels
    }

    pub fn channel(&self, name: &str) -> Option<&OutputChannel> {
        self.channels.iter().find(|c| c.name == name)
    }

    /// Evaluates the model on the host's current configuration.
    ///
    /// All channels are rebuilt from scratch and replace the previous set only once
    /// every one of them has been computed.
    #[instrument(skip_all, name = "adapter_calculate", fields(kind = K::NAME))]
    pub fn calculate<H: SimulationHost>(
        &mut self,
        host: &H,
    ) -> Result<&[OutputChannel], EngineError> {
        let natom = self.atoms.len();
        let odim = K::output_dim();

        let mut positions = host.positions(&self.atoms);
        if positions.len() != natom {
            return Err(EngineError::HostPositions {
                expected: natom,
                found: positions.len(),
            });
        }
        if self.periodic {
            host.make_whole(&mut positions);
        }

        let coord_ic = IndexConverter::for_atoms(natom, NDIM)?;
        let mut coords = vec![0.0; coord_ic.len()];
        for (i, pos) in positions.iter().enumerate() {
            for j in 0..NDIM {
                coords[coord_ic.flatten(i as isize, j as isize)?] =
                    self.units.to_model_length(pos[j]);
            }
        }

        let cell = if self.periodic {
            CellInput::periodic(&host.cell(), self.units.length_unit)
        } else {
            CellInput::Aperiodic
        };

        trace!(natom, periodic = self.periodic, "Invoking inference engine.");
        let output = self
            .model
            .compute(&coords, self.atom_types.as_slice(), &cell)?;

        let force_ic = IndexConverter::new(odim, natom, NDIM)?;
        let virial_ic = IndexConverter::new(odim, NDIM, NDIM)?;
        check_shape(&output, odim, force_ic.len(), virial_ic.len())?;

        let output_unit = self.units.output_unit;
        let derivative_scale = output_unit / self.units.length_unit;
        let virial_scale = self
            .virial_scaling
            .factor(output_unit, self.units.length_unit);

        let mut channels = Vec::with_capacity(odim);
        for (ku, &name) in K::CHANNELS.iter().enumerate() {
            let k = ku as isize;
            let mut channel = OutputChannel::new(name, natom);
            channel.value = output.output[ku] * output_unit;

            for (i, derivative) in channel.derivatives.iter_mut().enumerate() {
                let i = i as isize;
                let force = Vector3::new(
                    output.force[force_ic.flatten_with_channel(k, i, 0)?],
                    output.force[force_ic.flatten_with_channel(k, i, 1)?],
                    output.force[force_ic.flatten_with_channel(k, i, 2)?],
                );
                *derivative = -force * derivative_scale;
            }

            // Engine virial blocks are the transpose of the host box derivative.
            let mut box_derivative = Matrix3::zeros();
            for r in 0..NDIM {
                for c in 0..NDIM {
                    box_derivative[(r, c)] = output.virial
                        [virial_ic.flatten_with_channel(k, c as isize, r as isize)?]
                        * virial_scale;
                }
            }
            channel.box_derivative = box_derivative;

            debug!(channel = name, value = channel.value, "Channel evaluated.");
            channels.push(channel);
        }

        self.channels = channels;
        Ok(self.channels.as_slice())
    }
}

fn log_selection(atoms: &AtomSet, total_atoms: usize) {
    if atoms.len() == total_atoms {
        info!("Evaluating all {} atoms in the system.", atoms.len());
    } else {
        info!("Evaluating {} atoms.", atoms.len());
    }
    info!(
        "Atom serials: {}",
        atoms
            .serials()
            .map(|s| s.to_string())
            .collect::<Vec<_>>()
            .join(" ")
    );
    if atoms.len() != total_atoms {
        warn!(
            "Number of atoms provided ({}) differs from the number of atoms in the system ({}).",
            atoms.len(),
            total_atoms
        );
    }
}

fn check_shape(
    output: &ModelOutput,
    odim: usize,
    force_len: usize,
    virial_len: usize,
) -> Result<(), EngineError> {
    for (buffer, expected, found) in [
        ("output", odim, output.output.len()),
        ("force", force_len, output.force.len()),
        ("virial", virial_len, output.virial.len()),
    ] {
        if expected != found {
            return Err(EngineError::OutputShape {
                buffer,
                expected,
                found,
            });
        }
    }
    Ok(())
}
