mod aggregate_volumes;
mod assemble_result;
mod bin_fragments;
mod build_intervals;
mod normalize_cutters;
mod slice_pipeline;
mod sort_cutters;
mod split_solid;

pub use aggregate_volumes::{AggregateVolumes, VolumeRecord};
pub use assemble_result::{AssembleResult, ResultTree, SolidRecord, BOTTOM_LABEL, HEADER_TITLE};
pub use bin_fragments::{BinFragments, BinOutcome};
pub use build_intervals::{BuildIntervals, Interval};
pub use normalize_cutters::NormalizeCutters;
pub use slice_pipeline::{Diagnostic, Severity, SliceOutcome, SliceSolids};
pub use sort_cutters::SortCutters;
pub use split_solid::SplitSolid;

use crate::error::Result;
use crate::geometry::{CuttingSurface, Face};

/// A cutting surface paired with the floor label it introduces.
#[derive(Debug, Clone)]
pub struct LabeledCutter {
    /// The sampled cutting surface.
    pub surface: CuttingSurface,
    /// Floor label for the bin directly above this cutter.
    pub label: String,
}

/// Resolves opaque solid references into boundary geometry and category
/// labels.
///
/// The slicing core never performs host lookup itself; the calling
/// environment implements this trait over its document/session state.
pub trait SolidRepository {
    /// Number of solids to slice.
    fn count(&self) -> usize;

    /// Resolves the boundary faces of the solid at `index`.
    ///
    /// # Errors
    ///
    /// Returns an error if the reference cannot be resolved to geometry.
    fn resolve(&self, index: usize) -> Result<Vec<Face>>;

    /// Returns the category/layer label of the solid at `index`.
    ///
    /// # Errors
    ///
    /// Returns an error if the label cannot be resolved.
    fn category(&self, index: usize) -> Result<String>;
}

/// In-memory [`SolidRepository`] backed by pre-resolved geometry.
#[derive(Debug, Default)]
pub struct MemorySolids {
    entries: Vec<(Vec<Face>, String)>,
}

impl MemorySolids {
    /// Creates an empty repository.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a solid's boundary faces with its category label.
    pub fn push(&mut self, faces: Vec<Face>, label: impl Into<String>) {
        self.entries.push((faces, label.into()));
    }
}

impl SolidRepository for MemorySolids {
    fn count(&self) -> usize {
        self.entries.len()
    }

    fn resolve(&self, index: usize) -> Result<Vec<Face>> {
        self.entries.get(index).map(|(f, _)| f.clone()).ok_or_else(|| {
            crate::error::TopologyError::EntityNotFound(format!("solid #{index}")).into()
        })
    }

    fn category(&self, index: usize) -> Result<String> {
        self.entries.get(index).map(|(_, l)| l.clone()).ok_or_else(|| {
            crate::error::TopologyError::EntityNotFound(format!("solid #{index}")).into()
        })
    }
}
