use crate::error::Result;
use crate::operations::query::Volume;
use crate::topology::{FragmentId, ModelStore};

/// A bin's resolved volume with its fixed-precision display form.
#[derive(Debug, Clone, PartialEq)]
pub struct VolumeRecord {
    /// Numeric volume; zero when the bin received no fragment.
    pub value: f64,
    /// Two-decimal display string of `value`.
    pub display: String,
}

impl VolumeRecord {
    /// Creates a record from a numeric volume.
    #[must_use]
    pub fn new(value: f64) -> Self {
        Self {
            value,
            display: format!("{value:.2}"),
        }
    }
}

/// Computes, per bin, the volume contributed by one solid's binned
/// fragments.
///
/// Every bin gets a slot, zero-initialized; a fragment's volume is *summed*
/// into its slot, so several disconnected pieces landing in the same slab
/// accumulate into one floor volume. Fragments whose section could not be
/// capped are treated as volume zero.
pub struct AggregateVolumes<'a> {
    fragments: &'a [FragmentId],
    bin_count: usize,
    tolerance: f64,
}

impl<'a> AggregateVolumes<'a> {
    /// Creates a new `AggregateVolumes` operation over binned fragments.
    #[must_use]
    pub fn new(fragments: &'a [FragmentId], bin_count: usize, tolerance: f64) -> Self {
        Self {
            fragments,
            bin_count,
            tolerance,
        }
    }

    /// Executes the aggregation, returning one record per bin.
    ///
    /// # Errors
    ///
    /// Returns an error if a fragment is missing from the store or its
    /// volume cannot be integrated.
    pub fn execute(&self, store: &ModelStore) -> Result<Vec<VolumeRecord>> {
        let mut slots = vec![0.0_f64; self.bin_count];

        for &id in self.fragments {
            let data = store.fragment(id)?;
            let Some(bin) = data.bin else {
                log::debug!("skipping unbinned fragment");
                continue;
            };
            if bin >= self.bin_count {
                continue;
            }
            if !data.capped {
                // Open boundary: volume is undefined, counted as zero
                continue;
            }
            slots[bin] += Volume::fragment(id, self.tolerance).execute(store)?;
        }

        Ok(slots.into_iter().map(VolumeRecord::new).collect())
    }
}
