/// A half-open elevation range `[low, high)` defining one floor bin.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Interval {
    /// Lower elevation boundary (inclusive).
    pub low: f64,
    /// Upper elevation boundary (exclusive, up to tolerance).
    pub high: f64,
}

impl Interval {
    /// Returns `true` if `z` lies in the interval, widened by `tolerance`
    /// on both boundaries.
    ///
    /// The widening makes adjacent intervals overlap near their shared
    /// boundary; the binner scans ascending and keeps the last match, so a
    /// value on (or within tolerance of) a boundary resolves to the
    /// higher-indexed bin.
    #[must_use]
    pub fn contains(&self, z: f64, tolerance: f64) -> bool {
        z >= self.low - tolerance && z <= self.high + tolerance
    }
}

/// Derives the ordered elevation bins spanning the combined vertical extent
/// of the input solids.
///
/// Boundaries are `min_z`, each sorted cutter elevation, then `max_z`,
/// giving `count(cutters) + 1` contiguous intervals. Boundary values are
/// taken directly from the sorted elevations; no interpolation.
pub struct BuildIntervals {
    elevations: Vec<f64>,
    min_z: f64,
    max_z: f64,
}

impl BuildIntervals {
    /// Creates a new `BuildIntervals` operation from sorted cutter
    /// elevations and the global z range of all solids.
    #[must_use]
    pub fn new(elevations: Vec<f64>, min_z: f64, max_z: f64) -> Self {
        Self {
            elevations,
            min_z,
            max_z,
        }
    }

    /// Executes the operation, returning the interval sequence.
    #[must_use]
    pub fn execute(self) -> Vec<Interval> {
        let mut boundaries = Vec::with_capacity(self.elevations.len() + 2);
        boundaries.push(self.min_z);
        boundaries.extend(self.elevations);
        boundaries.push(self.max_z);

        boundaries
            .windows(2)
            .map(|w| Interval {
                low: w[0],
                high: w[1],
            })
            .collect()
    }
}
