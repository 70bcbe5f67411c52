use crate::core::models::cell::CellInput;
use std::error::Error;
use std::path::{Path, PathBuf};
use thiserror::Error;

pub type BoxedError = Box<dyn Error + Send + Sync + 'static>;

#[derive(Debug, Error)]
pub enum InferenceError {
    #[error("Failed to load model '{path}': {source}", path = path.display())]
    Load {
        path: PathBuf,
        #[source]
        source: BoxedError,
    },
    #[error("Model evaluation failed: {0}")]
    Runtime(#[source] BoxedError),
}

/// Flat buffers returned by one tensor model evaluation.
///
/// For a model with `odim` outputs on `natom` atoms, `force` holds `odim * natom * 3`
/// values and `virial` holds `odim * 9`, both channel-major.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ModelOutput {
    pub output: Vec<f64>,
    pub force: Vec<f64>,
    pub virial: Vec<f64>,
}

/// Buffers returned by a scalar (potential energy) model.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ScalarOutput {
    pub value: f64,
    pub force: Vec<f64>,
    pub virial: Vec<f64>,
}

/// An inference engine producing a vector of outputs per evaluation.
///
/// Coordinates arrive in model length units as a flat `(natom, 3)` buffer, types in the
/// same atom order. Returned forces are force-like, i.e. the negative gradient of each
/// output with respect to the coordinates.
pub trait TensorModel: Sized {
    fn load(path: &Path) -> Result<Self, InferenceError>;

    fn output_dim(&self) -> usize;

    fn compute(
        &mut self,
        coords: &[f64],
        types: &[i32],
        cell: &CellInput,
    ) -> Result<ModelOutput, InferenceError>;
}

/// An inference engine producing a single scalar per evaluation.
pub trait ScalarModel: Sized {
    fn load(path: &Path) -> Result<Self, InferenceError>;

    fn compute(
        &mut self,
        coords: &[f64],
        types: &[i32],
        cell: &CellInput,
    ) -> Result<ScalarOutput, InferenceError>;
}

/// Presents a [`ScalarModel`] as a one-output [`TensorModel`].
#[derive(Debug)]
pub struct Lifted<M>(pub M);

impl<M> Lifted<M> {
    pub fn into_inner(self) -> M {
        self.0
    }
}

impl<M: ScalarModel> TensorModel for Lifted<M> {
    fn load(path: &Path) -> Result<Self, InferenceError> {
        M::load(path).map(Lifted)
    }

    fn output_dim(&self) -> usize {
        1
    }

    fn compute(
        &mut self,
        coords: &[f64],
        types: &[i32],
        cell: &CellInput,
    ) -> Result<ModelOutput, InferenceError> {
        let ScalarOutput {
            value,
            force,
            virial,
        } = self.0.compute(coords, types, cell)?;
        Ok(ModelOutput {
            output: vec![value],
            force,
            virial,
        })
    }
}
