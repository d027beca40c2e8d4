use super::VolumeRecord;

/// Label of the bin below the lowest cutter.
pub const BOTTOM_LABEL: &str = "BOTTOM";

/// Fixed title prefixed to the header record.
pub const HEADER_TITLE: &str = "LEVEL / CATEGORY";

/// Per-solid result record: category label plus per-floor volumes in floor
/// order.
#[derive(Debug, Clone)]
pub struct SolidRecord {
    /// Category/layer label of the source solid.
    pub label: String,
    /// One volume per floor bin, bottom first.
    pub volumes: Vec<VolumeRecord>,
}

/// The assembled, labeled slicing result.
///
/// A plain nested record type: a header record (title followed by floor
/// labels) and one record per source solid in input order. Any tree or
/// table view is built by the caller from this structure.
#[derive(Debug, Clone, Default)]
pub struct ResultTree {
    /// Title followed by the floor labels, bottom first.
    pub header: Vec<String>,
    /// Per-solid records, ordered by source index.
    pub solids: Vec<SolidRecord>,
}

impl ResultTree {
    /// Returns the floor labels (header without the title).
    #[must_use]
    pub fn floor_labels(&self) -> &[String] {
        self.header.get(1..).unwrap_or(&[])
    }

    /// Returns the volume record for `(solid index, floor index)`, if both
    /// are in range.
    #[must_use]
    pub fn volume(&self, solid: usize, floor: usize) -> Option<&VolumeRecord> {
        self.solids.get(solid).and_then(|r| r.volumes.get(floor))
    }
}

/// Builds the final nested, labeled result.
pub struct AssembleResult {
    floor_labels: Vec<String>,
    records: Vec<SolidRecord>,
}

impl AssembleResult {
    /// Creates a new `AssembleResult` from the user floor labels in sorted
    /// elevation order and the per-solid records in source order.
    #[must_use]
    pub fn new(floor_labels: Vec<String>, records: Vec<SolidRecord>) -> Self {
        Self {
            floor_labels,
            records,
        }
    }

    /// Executes the assembly.
    #[must_use]
    pub fn execute(self) -> ResultTree {
        let mut header = Vec::with_capacity(self.floor_labels.len() + 2);
        header.push(HEADER_TITLE.to_owned());
        header.push(BOTTOM_LABEL.to_owned());
        header.extend(self.floor_labels);

        ResultTree {
            header,
            solids: self.records,
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn record(label: &str, volumes: &[f64]) -> SolidRecord {
        SolidRecord {
            label: label.into(),
            volumes: volumes.iter().map(|&v| VolumeRecord::new(v)).collect(),
        }
    }

    #[test]
    fn header_has_title_then_bottom_then_labels() {
        let tree = AssembleResult::new(
            vec!["L1".into(), "L2".into()],
            vec![record("granite", &[1.0, 2.0, 3.0])],
        )
        .execute();

        assert_eq!(
            tree.header,
            vec![
                HEADER_TITLE.to_owned(),
                BOTTOM_LABEL.to_owned(),
                "L1".to_owned(),
                "L2".to_owned()
            ]
        );
        assert_eq!(tree.floor_labels().len(), 3);
        assert_eq!(tree.floor_labels()[0], BOTTOM_LABEL);
    }

    #[test]
    fn records_are_indexable_by_solid_then_floor() {
        let tree = AssembleResult::new(
            vec!["L1".into()],
            vec![
                record("granite", &[1.0, 2.0]),
                record("basalt", &[3.0, 4.0]),
            ],
        )
        .execute();

        assert_eq!(tree.solids[0].label, "granite");
        assert_eq!(tree.volume(1, 0).unwrap().display, "3.00");
        assert!(tree.volume(2, 0).is_none());
        assert!(tree.volume(0, 5).is_none());
    }

    #[test]
    fn empty_input_still_yields_header() {
        let tree = AssembleResult::new(Vec::new(), Vec::new()).execute();
        assert_eq!(tree.header, vec![HEADER_TITLE.to_owned(), BOTTOM_LABEL.to_owned()]);
        assert!(tree.solids.is_empty());
    }
}
