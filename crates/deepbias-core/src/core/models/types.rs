/// Model type id of every selected atom, in selection order.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AtomTypeTable {
    types: Vec<i32>,
}

impl AtomTypeTable {
    pub fn new(types: Vec<i32>) -> Self {
        Self { types }
    }

    pub fn len(&self) -> usize {
        self.types.len()
    }

    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }

    pub fn as_slice(&self) -> &[i32] {
        &self.types
    }
}

