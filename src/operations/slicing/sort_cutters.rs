use super::LabeledCutter;

/// Orders cutting surfaces (and their floor labels) ascending by sampled
/// elevation.
///
/// Uses a stable sort, so cutters sharing an elevation keep their input
/// order. This replaces the value-match reordering a naive implementation
/// would use, which is ambiguous for duplicate elevations.
pub struct SortCutters {
    cutters: Vec<LabeledCutter>,
}

impl SortCutters {
    /// Creates a new `SortCutters` operation.
    #[must_use]
    pub fn new(cutters: Vec<LabeledCutter>) -> Self {
        Self { cutters }
    }

    /// Executes the sort, returning the cutters in ascending elevation order.
    #[must_use]
    pub fn execute(mut self) -> Vec<LabeledCutter> {
        self.cutters
            .sort_by(|a, b| a.surface.elevation().total_cmp(&b.surface.elevation()));
        self.cutters
    }
}
