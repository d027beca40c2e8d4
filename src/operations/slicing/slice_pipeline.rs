use crate::error::{OperationError, Result};
use crate::geometry::{CuttingSurface, Solid};
use crate::operations::query::{Aabb, BoundingBox};
use crate::topology::{FragmentId, ModelStore, SolidData, SolidId};

use super::{
    AggregateVolumes, AssembleResult, BinFragments, BuildIntervals, LabeledCutter,
    NormalizeCutters, ResultTree, SolidRecord, SolidRepository, SortCutters, SplitSolid,
    VolumeRecord,
};

/// Severity of a per-item diagnostic.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    /// The item was processed with a recovered anomaly.
    Warning,
    /// The item produced no usable output.
    Error,
}

/// A per-item diagnostic recovered during slicing.
///
/// Diagnostics travel on their own channel; the primary result is still
/// populated for every item that succeeded.
#[derive(Debug, Clone)]
pub struct Diagnostic {
    /// How bad it was.
    pub severity: Severity,
    /// Source index of the affected solid, if the problem is solid-scoped.
    pub solid_index: Option<usize>,
    /// Human-readable description.
    pub message: String,
}

/// Everything a slicing run produces.
#[derive(Debug)]
pub struct SliceOutcome {
    /// The labeled, indexable result structure.
    pub tree: ResultTree,
    /// Capped fragments per source solid, kept in the store for further
    /// queries.
    pub fragments: Vec<Vec<FragmentId>>,
    /// Recovered per-item anomalies.
    pub diagnostics: Vec<Diagnostic>,
}

/// End-to-end slicing pipeline.
///
/// Sorts and normalizes the cutters, derives the elevation bins from the
/// combined vertical extent of all solids, then splits, bins and aggregates
/// each solid in isolation: a failure on one solid is recorded as a
/// diagnostic and a zero-filled record while the remaining solids still
/// produce results.
///
/// Every call recomputes from its inputs; nothing is cached across
/// invocations.
pub struct SliceSolids<'a> {
    repository: &'a dyn SolidRepository,
    surfaces: Vec<CuttingSurface>,
    floor_labels: Vec<String>,
    tolerance: f64,
}

impl<'a> SliceSolids<'a> {
    /// Creates a new `SliceSolids` pipeline.
    ///
    /// `surfaces` and `floor_labels` are parallel collections matched by
    /// position; `tolerance` is the model precision used for splitting,
    /// capping and binning.
    #[must_use]
    pub fn new(
        repository: &'a dyn SolidRepository,
        surfaces: Vec<CuttingSurface>,
        floor_labels: Vec<String>,
        tolerance: f64,
    ) -> Self {
        Self {
            repository,
            surfaces,
            floor_labels,
            tolerance,
        }
    }

    /// Executes the pipeline.
    ///
    /// # Errors
    ///
    /// Returns an error for input-shape problems that invalidate the whole
    /// call: non-positive tolerance, cutter/label length mismatch, or a
    /// vertical cutting surface. Per-solid failures never propagate here.
    pub fn execute(&self, store: &mut ModelStore) -> Result<SliceOutcome> {
        if !self.tolerance.is_finite() || self.tolerance <= 0.0 {
            return Err(
                OperationError::InvalidInput("tolerance must be positive".into()).into(),
            );
        }
        if self.surfaces.len() != self.floor_labels.len() {
            return Err(OperationError::InvalidInput(format!(
                "{} cutting surfaces but {} floor labels",
                self.surfaces.len(),
                self.floor_labels.len()
            ))
            .into());
        }

        let labeled: Vec<LabeledCutter> = self
            .surfaces
            .iter()
            .zip(&self.floor_labels)
            .map(|(surface, label)| LabeledCutter {
                surface: surface.clone(),
                label: label.clone(),
            })
            .collect();

        let cutters = NormalizeCutters::new(SortCutters::new(labeled).execute()).execute()?;
        let sorted_labels: Vec<String> = cutters.iter().map(|c| c.label.clone()).collect();
        let bin_count = cutters.len() + 1;

        let mut diagnostics = Vec::new();
        let (solids, labels) = self.resolve_solids(store, &mut diagnostics);

        // Combined vertical extent across all successfully resolved solids
        let global = solids
            .iter()
            .flatten()
            .try_fold(None::<Aabb>, |acc, &id| -> Result<Option<Aabb>> {
                let aabb = BoundingBox::solid(id).execute(store)?;
                Ok(Some(acc.map_or(aabb, |a| a.union(&aabb))))
            })?;

        let intervals = global.map(|range| {
            let elevations = cutters.iter().map(|c| c.surface.elevation()).collect();
            BuildIntervals::new(elevations, range.min.z, range.max.z).execute()
        });

        let mut records = Vec::with_capacity(solids.len());
        let mut all_fragments = Vec::with_capacity(solids.len());
        for (index, id) in solids.iter().enumerate() {
            let (record, fragments) = match (id, &intervals) {
                (Some(id), Some(intervals)) => self.slice_one(
                    store,
                    *id,
                    index,
                    &cutters,
                    intervals,
                    &labels[index],
                    &mut diagnostics,
                ),
                _ => (zero_record(&labels[index], bin_count), Vec::new()),
            };
            records.push(record);
            all_fragments.push(fragments);
        }

        let tree = AssembleResult::new(sorted_labels, records).execute();
        Ok(SliceOutcome {
            tree,
            fragments: all_fragments,
            diagnostics,
        })
    }

    /// Resolves and validates every input solid, isolating per-item
    /// failures.
    fn resolve_solids(
        &self,
        store: &mut ModelStore,
        diagnostics: &mut Vec<Diagnostic>,
    ) -> (Vec<Option<SolidId>>, Vec<String>) {
        let mut ids = Vec::with_capacity(self.repository.count());
        let mut labels = Vec::with_capacity(self.repository.count());

        for index in 0..self.repository.count() {
            let label = match self.repository.category(index) {
                Ok(label) => label,
                Err(err) => {
                    diagnostics.push(Diagnostic {
                        severity: Severity::Warning,
                        solid_index: Some(index),
                        message: format!("category lookup failed: {err}"),
                    });
                    "(unresolved)".to_owned()
                }
            };

            let id = self
                .repository
                .resolve(index)
                .map(Solid::from_faces)
                .and_then(|shape| {
                    shape.validate_closed(self.tolerance)?;
                    Ok(shape)
                })
                .map(|shape| {
                    store.add_solid(SolidData {
                        shape,
                        label: label.clone(),
                        source_index: index,
                    })
                });

            match id {
                Ok(id) => ids.push(Some(id)),
                Err(err) => {
                    log::warn!("solid #{index} skipped: {err}");
                    diagnostics.push(Diagnostic {
                        severity: Severity::Error,
                        solid_index: Some(index),
                        message: format!("not a closed solid: {err}"),
                    });
                    ids.push(None);
                }
            }
            labels.push(label);
        }

        (ids, labels)
    }

    /// Splits, bins and aggregates a single solid.
    #[allow(clippy::too_many_arguments)]
    fn slice_one(
        &self,
        store: &mut ModelStore,
        id: SolidId,
        index: usize,
        cutters: &[LabeledCutter],
        intervals: &[super::Interval],
        label: &str,
        diagnostics: &mut Vec<Diagnostic>,
    ) -> (SolidRecord, Vec<FragmentId>) {
        let sliced = SplitSolid::new(id, cutters, self.tolerance)
            .execute(store)
            .and_then(|fragments| {
                let binned = BinFragments::new(&fragments, intervals, self.tolerance)
                    .execute(store)?;
                for (_, z) in &binned.clamped {
                    diagnostics.push(Diagnostic {
                        severity: Severity::Warning,
                        solid_index: Some(index),
                        message: format!(
                            "fragment elevation {z} drifted outside all bins; clamped to nearest"
                        ),
                    });
                }
                for &fragment in &fragments {
                    if !store.fragment(fragment)?.capped {
                        diagnostics.push(Diagnostic {
                            severity: Severity::Warning,
                            solid_index: Some(index),
                            message: "a section could not be capped; its volume counts as zero"
                                .into(),
                        });
                    }
                }
                let volumes =
                    AggregateVolumes::new(&fragments, intervals.len(), self.tolerance)
                        .execute(store)?;
                Ok((volumes, fragments))
            });

        match sliced {
            Ok((volumes, fragments)) => (
                SolidRecord {
                    label: label.to_owned(),
                    volumes,
                },
                fragments,
            ),
            Err(err) => {
                log::warn!("slicing solid #{index} failed: {err}");
                diagnostics.push(Diagnostic {
                    severity: Severity::Error,
                    solid_index: Some(index),
                    message: format!("slicing failed: {err}"),
                });
                (zero_record(label, intervals.len()), Vec::new())
            }
        }
    }
}

fn zero_record(label: &str, bin_count: usize) -> SolidRecord {
    SolidRecord {
        label: label.to_owned(),
        volumes: (0..bin_count).map(|_| VolumeRecord::new(0.0)).collect(),
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::math::{Point3, Vector3};
    use crate::operations::creation::MakeBox;
    use crate::operations::slicing::{MemorySolids, BOTTOM_LABEL, HEADER_TITLE};

    const TOL: f64 = 1e-6;

    fn p(x: f64, y: f64, z: f64) -> Point3 {
        Point3::new(x, y, z)
    }

    fn box_faces(lo: Point3, hi: Point3) -> Vec<Vec<Point3>> {
        MakeBox::new(lo, hi).execute().unwrap().faces().to_vec()
    }

    fn level(z: f64) -> CuttingSurface {
        CuttingSurface::new(p(0.0, 0.0, z), Vector3::z()).unwrap()
    }

    #[test]
    fn one_cutter_two_floors_conserves_volume() {
        let mut repo = MemorySolids::new();
        repo.push(box_faces(p(0.0, 0.0, 0.0), p(1.0, 1.0, 10.0)), "granite");
        let mut store = ModelStore::new();

        let outcome = SliceSolids::new(&repo, vec![level(5.0)], vec!["L1".into()], TOL)
            .execute(&mut store)
            .unwrap();

        assert_eq!(outcome.tree.floor_labels(), &["BOTTOM", "L1"]);
        let record = &outcome.tree.solids[0];
        assert_eq!(record.label, "granite");
        assert_eq!(record.volumes.len(), 2);
        let total: f64 = record.volumes.iter().map(|v| v.value).sum();
        assert!((total - 10.0).abs() < TOL, "expected 10.0, got {total}");
        assert!((record.volumes[0].value - 5.0).abs() < TOL);
        assert!((record.volumes[1].value - 5.0).abs() < TOL);
    }

    #[test]
    fn floor_labels_follow_sorted_elevations() {
        let mut repo = MemorySolids::new();
        repo.push(box_faces(p(0.0, 0.0, 0.0), p(1.0, 1.0, 12.0)), "fill");
        let mut store = ModelStore::new();

        let outcome = SliceSolids::new(
            &repo,
            vec![level(8.0), level(3.0)],
            vec!["upper".into(), "lower".into()],
            TOL,
        )
        .execute(&mut store)
        .unwrap();

        assert_eq!(
            outcome.tree.header,
            vec![
                HEADER_TITLE.to_owned(),
                BOTTOM_LABEL.to_owned(),
                "lower".to_owned(),
                "upper".to_owned()
            ]
        );
        assert_eq!(outcome.tree.solids[0].volumes.len(), 3);
    }

    #[test]
    fn zero_cutters_gives_full_volume_in_single_bin() {
        let mut repo = MemorySolids::new();
        repo.push(box_faces(p(0.0, 0.0, 0.0), p(2.0, 2.0, 3.0)), "clay");
        let mut store = ModelStore::new();

        let outcome = SliceSolids::new(&repo, Vec::new(), Vec::new(), TOL)
            .execute(&mut store)
            .unwrap();

        assert_eq!(outcome.tree.floor_labels(), &[BOTTOM_LABEL.to_owned()]);
        let record = &outcome.tree.solids[0];
        assert_eq!(record.volumes.len(), 1);
        assert!((record.volumes[0].value - 12.0).abs() < TOL);
    }

    #[test]
    fn multiple_solids_keep_source_order() {
        let mut repo = MemorySolids::new();
        repo.push(box_faces(p(0.0, 0.0, 0.0), p(1.0, 1.0, 4.0)), "first");
        repo.push(box_faces(p(5.0, 0.0, 2.0), p(6.0, 1.0, 8.0)), "second");
        let mut store = ModelStore::new();

        let outcome = SliceSolids::new(&repo, vec![level(4.0)], vec!["L1".into()], TOL)
            .execute(&mut store)
            .unwrap();

        assert_eq!(outcome.tree.solids[0].label, "first");
        assert_eq!(outcome.tree.solids[1].label, "second");
        // First solid sits entirely below the cutter
        assert!((outcome.tree.solids[0].volumes[0].value - 4.0).abs() < TOL);
        assert!((outcome.tree.solids[0].volumes[1].value - 0.0).abs() < TOL);
        // Second straddles it: [2, 4] below, [4, 8] above
        assert!((outcome.tree.solids[1].volumes[0].value - 2.0).abs() < TOL);
        assert!((outcome.tree.solids[1].volumes[1].value - 4.0).abs() < TOL);
    }

    #[test]
    fn bad_solid_is_isolated() {
        let mut repo = MemorySolids::new();
        let mut open = box_faces(p(0.0, 0.0, 0.0), p(1.0, 1.0, 1.0));
        open.pop();
        repo.push(open, "broken");
        repo.push(box_faces(p(0.0, 0.0, 0.0), p(1.0, 1.0, 10.0)), "good");
        let mut store = ModelStore::new();

        let outcome = SliceSolids::new(&repo, vec![level(5.0)], vec!["L1".into()], TOL)
            .execute(&mut store)
            .unwrap();

        // Broken solid: zero-filled record, error diagnostic, label kept
        assert_eq!(outcome.tree.solids.len(), 2);
        assert_eq!(outcome.tree.solids[0].label, "broken");
        assert!(outcome.tree.solids[0].volumes.iter().all(|v| v.value == 0.0));
        assert!(outcome
            .diagnostics
            .iter()
            .any(|d| d.severity == Severity::Error && d.solid_index == Some(0)));

        // Good solid still produced volumes
        let total: f64 = outcome.tree.solids[1].volumes.iter().map(|v| v.value).sum();
        assert!((total - 10.0).abs() < TOL);
    }

    #[test]
    fn empty_repository_yields_header_only() {
        let repo = MemorySolids::new();
        let mut store = ModelStore::new();

        let outcome = SliceSolids::new(&repo, vec![level(1.0)], vec!["L1".into()], TOL)
            .execute(&mut store)
            .unwrap();

        assert_eq!(
            outcome.tree.header,
            vec![
                HEADER_TITLE.to_owned(),
                BOTTOM_LABEL.to_owned(),
                "L1".to_owned()
            ]
        );
        assert!(outcome.tree.solids.is_empty());
        assert!(outcome.diagnostics.is_empty());
    }

    #[test]
    fn label_count_mismatch_is_an_input_error() {
        let repo = MemorySolids::new();
        let mut store = ModelStore::new();
        let result =
            SliceSolids::new(&repo, vec![level(1.0)], Vec::new(), TOL).execute(&mut store);
        assert!(result.is_err());
    }

    #[test]
    fn non_positive_tolerance_is_an_input_error() {
        let repo = MemorySolids::new();
        let mut store = ModelStore::new();
        let result =
            SliceSolids::new(&repo, Vec::new(), Vec::new(), 0.0).execute(&mut store);
        assert!(result.is_err());
    }

    #[test]
    fn duplicate_elevations_are_deterministic() {
        let run = || {
            let mut repo = MemorySolids::new();
            repo.push(box_faces(p(0.0, 0.0, 0.0), p(1.0, 1.0, 10.0)), "rock");
            let mut store = ModelStore::new();
            SliceSolids::new(
                &repo,
                vec![level(5.0), level(5.0)],
                vec!["a".into(), "b".into()],
                TOL,
            )
            .execute(&mut store)
            .unwrap()
        };

        let first = run();
        let second = run();
        assert_eq!(first.tree.header, second.tree.header);
        let firsts: Vec<String> = first.tree.solids[0]
            .volumes
            .iter()
            .map(|v| v.display.clone())
            .collect();
        let seconds: Vec<String> = second.tree.solids[0]
            .volumes
            .iter()
            .map(|v| v.display.clone())
            .collect();
        assert_eq!(firsts, seconds);
        let total: f64 = first.tree.solids[0].volumes.iter().map(|v| v.value).sum();
        assert!((total - 10.0).abs() < 1e-3);
    }

    #[test]
    fn fragments_remain_queryable_after_the_call() {
        let mut repo = MemorySolids::new();
        repo.push(box_faces(p(0.0, 0.0, 0.0), p(1.0, 1.0, 10.0)), "rock");
        let mut store = ModelStore::new();

        let outcome = SliceSolids::new(&repo, vec![level(5.0)], vec!["L1".into()], TOL)
            .execute(&mut store)
            .unwrap();

        assert_eq!(outcome.fragments.len(), 1);
        assert_eq!(outcome.fragments[0].len(), 2);
        for &f in &outcome.fragments[0] {
            assert!(store.fragment(f).is_ok());
        }
    }
}
