use nalgebra::Matrix3;

/// Simulation cell as handed to an inference engine, in model length units.
///
/// Engines that take a flat box buffer treat a zero-length buffer as "no periodic
/// boundaries"; [`CellInput::as_slice`] produces exactly that for [`CellInput::Aperiodic`].
/// A periodic cell full of zeros is a different input and is never substituted for it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CellInput {
    /// Lattice vectors as rows, flattened row-major.
    Periodic([f64; 9]),
    Aperiodic,
}

impl CellInput {
    /// Builds a periodic cell from lattice vectors (rows of `cell`) divided by `length_unit`.
    pub fn periodic(cell: &Matrix3<f64>, length_unit: f64) -> Self {
        let mut flat = [0.0; 9];
        for i in 0..3 {
            for j in 0..3 {
                flat[i * 3 + j] = cell[(i, j)] / length_unit;
            }
        }
        CellInput::Periodic(flat)
    }

    pub fn is_periodic(&self) -> bool {
        matches!(self, CellInput::Periodic(_))
    }

    pub fn as_slice(&self) -> &[f64] {
        match self {
            CellInput::Periodic(flat) => flat.as_slice(),
            CellInput::Aperiodic => &[],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn periodic_cell_is_row_major_and_scaled() {
        let cell = Matrix3::new(1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0, 9.0);
        let input = CellInput::periodic(&cell, 0.5);
        assert_eq!(
            input.as_slice(),
            &[2.0, 4.0, 6.0, 8.0, 10.0, 12.0, 14.0, 16.0, 18.0]
        );
        assert!(input.is_periodic());
    }

    #[test]
    fn aperiodic_cell_is_an_empty_buffer_not_a_zero_box() {
        let aperiodic = CellInput::Aperiodic;
        let zero_box = CellInput::periodic(&Matrix3::zeros(), 1.0);
        assert!(aperiodic.as_slice().is_empty());
        assert_eq!(zero_box.as_slice().len(), 9);
        assert_ne!(aperiodic, zero_box);
    }
}
