use nalgebra::{Matrix3, Vector3};

/// One scalar observable produced by a model, together with everything the host
/// needs to apply it as a bias.
#[derive(Debug, Clone, PartialEq)]
pub struct OutputChannel {
    /// Component label used when registering the value with the host (e.g. `"xy"`).
    pub name: &'static str,
    /// Value in host output units.
    pub value: f64,
    /// Derivative of `value` with respect to each selected atom's position, in
    /// selection order.
    pub derivatives: Vec<Vector3<f64>>,
    /// Derivative of `value` with respect to the cell (virial), in host convention.
    pub box_derivative: Matrix3<f64>,
}

impl OutputChannel {
    pub fn new(name: &'static str, natoms: usize) -> Self {
        Self {
            name,
            value: 0.0,
            derivatives: vec![Vector3::zeros(); natoms],
            box_derivative: Matrix3::zeros(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_channel_is_zeroed_and_sized_to_selection() {
        let channel = OutputChannel::new("x", 3);
        assert_eq!(channel.name, "x");
        assert_eq!(channel.value, 0.0);
        assert_eq!(channel.derivatives.len(), 3);
        assert!(channel.derivatives.iter().all(|d| *d == Vector3::zeros()));
        assert_eq!(channel.box_derivative, Matrix3::zeros());
    }
}
