use crate::error::Result;
use crate::operations::query::BoundingBox;
use crate::topology::{FragmentId, ModelStore};

use super::Interval;

/// Result of a binning pass.
#[derive(Debug, Default)]
pub struct BinOutcome {
    /// Fragments whose representative elevation matched no interval and
    /// were clamped to the nearest one, with the offending elevation.
    pub clamped: Vec<(FragmentId, f64)>,
}

/// Assigns each fragment to the elevation bin containing its representative
/// height.
///
/// The representative elevation is the midpoint of the fragment's bounding
/// box along the vertical axis. Intervals are scanned in ascending order and
/// the *last* containing interval wins, so an elevation on (or within
/// tolerance of) a shared boundary resolves to the higher-indexed bin. An
/// elevation outside every interval is clamped to the nearest bin and
/// reported, never dropped.
pub struct BinFragments<'a> {
    fragments: &'a [FragmentId],
    intervals: &'a [Interval],
    tolerance: f64,
}

impl<'a> BinFragments<'a> {
    /// Creates a new `BinFragments` operation.
    #[must_use]
    pub fn new(fragments: &'a [FragmentId], intervals: &'a [Interval], tolerance: f64) -> Self {
        Self {
            fragments,
            intervals,
            tolerance,
        }
    }

    /// Executes the binning, recording each fragment's bin in the store.
    ///
    /// # Errors
    ///
    /// Returns an error if a fragment is missing from the store or has no
    /// bounding box, or if the interval sequence is empty.
    pub fn execute(&self, store: &mut ModelStore) -> Result<BinOutcome> {
        let mut outcome = BinOutcome::default();
        if self.intervals.is_empty() {
            return Err(crate::error::OperationError::InvalidInput(
                "cannot bin fragments without intervals".into(),
            )
            .into());
        }

        for &id in self.fragments {
            let z = BoundingBox::fragment(id).execute(store)?.mid_z();

            let mut assigned = None;
            for (i, interval) in self.intervals.iter().enumerate() {
                if interval.contains(z, self.tolerance) {
                    assigned = Some(i);
                }
            }

            let bin = match assigned {
                Some(i) => i,
                None => {
                    // Outside the global range beyond tolerance: clamp
                    let clamped = if z < self.intervals[0].low {
                        0
                    } else {
                        self.intervals.len() - 1
                    };
                    log::warn!(
                        "fragment elevation {z} outside all intervals, clamped to bin {clamped}"
                    );
                    outcome.clamped.push((id, z));
                    clamped
                }
            };
            store.fragment_mut(id)?.bin = Some(bin);
        }

        Ok(outcome)
    }
}
