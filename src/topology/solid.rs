use crate::geometry::Solid;

slotmap::new_key_type! {
    /// Unique identifier for a source solid in the model store.
    pub struct SolidId;
}

/// Data associated with a registered source solid.
#[derive(Debug, Clone)]
pub struct SolidData {
    /// The solid's boundary geometry.
    pub shape: Solid,
    /// Category/layer label carried into the result.
    pub label: String,
    /// Position of the solid in the input ordering.
    pub source_index: usize,
}
