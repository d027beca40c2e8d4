use crate::geometry::Solid;

use super::SolidId;

slotmap::new_key_type! {
    /// Unique identifier for a fragment in the model store.
    pub struct FragmentId;
}

/// A capped piece of a source solid produced by splitting.
#[derive(Debug, Clone)]
pub struct FragmentData {
    /// The fragment's boundary geometry.
    pub shape: Solid,
    /// The source solid this fragment was split from.
    pub source: SolidId,
    /// Whether every section hole could be capped. Open fragments are kept
    /// but contribute zero volume.
    pub capped: bool,
    /// Elevation bin assigned by binning, `None` until binned.
    pub bin: Option<usize>,
}

impl FragmentData {
    /// Creates fragment data with no bin assigned yet.
    #[must_use]
    pub fn new(shape: Solid, source: SolidId, capped: bool) -> Self {
        Self {
            shape,
            source,
            capped,
            bin: None,
        }
    }
}
