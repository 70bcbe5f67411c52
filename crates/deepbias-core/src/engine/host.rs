use crate::core::models::selection::AtomSet;
use crate::core::units::HostUnits;
use nalgebra::{Matrix3, Point3};

/// What the adapter needs from the molecular-dynamics engine it runs inside.
///
/// Positions and the cell are in host length units. All periodic-boundary handling
/// stays on the host side.
pub trait SimulationHost {
    fn units(&self) -> HostUnits;

    /// Total number of atoms in the simulated system.
    fn atom_count(&self) -> usize;

    /// Current positions of `atoms`, in selection order.
    fn positions(&self, atoms: &AtomSet) -> Vec<Point3<f64>>;

    /// Lattice vectors as matrix rows.
    fn cell(&self) -> Matrix3<f64>;

    /// Rebuilds `positions` (ordered as an [`AtomSet`]) into one unbroken periodic image.
    fn make_whole(&self, positions: &mut [Point3<f64>]);
}
