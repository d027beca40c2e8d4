use crate::error::{OperationError, Result};
use crate::geometry::{Face, Solid};
use crate::math::{polygon, Point3, Vector3, TOLERANCE};
use crate::topology::{FragmentData, FragmentId, ModelStore, SolidId};

use super::LabeledCutter;

/// Splits a solid against the full ordered set of normalized cutters and
/// caps the resulting pieces into closed fragments.
///
/// Works bottom-up: at each cutter the running remainder is clipped into
/// the piece below the cutter plane (emitted as a fragment) and the piece
/// above (carried to the next cutter). Section holes are capped with
/// polygons stitched from the clip chords. Capping can fail on degenerate
/// sections; the affected fragment is kept open and flagged, so the failure
/// stays local to that fragment.
///
/// The up-axis at each cutter is derived from the normalized orientation
/// (`-normal` for the lowest cutter, `normal` otherwise); running the split
/// on cutters that skipped [`super::NormalizeCutters`] is an error rather
/// than a silently inverted result.
pub struct SplitSolid<'a> {
    solid: SolidId,
    cutters: &'a [LabeledCutter],
    tolerance: f64,
}

/// One clipped piece and whether all its section holes were capped.
struct Piece {
    faces: Vec<Face>,
    capped: bool,
}

impl<'a> SplitSolid<'a> {
    /// Creates a new `SplitSolid` operation over sorted, normalized cutters.
    #[must_use]
    pub fn new(solid: SolidId, cutters: &'a [LabeledCutter], tolerance: f64) -> Self {
        Self {
            solid,
            cutters,
            tolerance,
        }
    }

    /// Executes the split, inserting the capped fragments into the store.
    ///
    /// Returns the fragment IDs in ascending elevation order of the slabs
    /// that produced them. A solid not spanning a cutter simply yields no
    /// fragment at that cutter, so the list may be shorter than
    /// `cutters + 1`.
    ///
    /// # Errors
    ///
    /// Returns an error if the solid is missing or the cutters are not
    /// orientation-normalized.
    pub fn execute(&self, store: &mut ModelStore) -> Result<Vec<FragmentId>> {
        let shape = store.solid(self.solid)?.shape.clone();

        let mut remainder: Vec<Face> = shape.faces().to_vec();
        let mut remainder_capped = true;
        let mut fragments = Vec::new();

        for (i, cutter) in self.cutters.iter().enumerate() {
            if remainder.is_empty() {
                break;
            }
            let normal = *cutter.surface.normal();
            let up = if i == 0 { -normal } else { normal };
            if up.z <= TOLERANCE {
                return Err(OperationError::InvalidInput(
                    "cutting surfaces must be orientation-normalized before splitting".into(),
                )
                .into());
            }
            let origin = *cutter.surface.origin();

            let below = clip_half(&remainder, &origin, &up, self.tolerance);
            let above = clip_half(&remainder, &origin, &(-up), self.tolerance);

            if let Some(piece) = below {
                let capped = piece.capped && remainder_capped;
                if !capped {
                    log::warn!(
                        "section below cutter '{}' could not be fully capped",
                        cutter.label
                    );
                }
                fragments.push(store.add_fragment(FragmentData::new(
                    Solid::from_faces(piece.faces),
                    self.solid,
                    capped,
                )));
            }

            match above {
                Some(piece) => {
                    remainder_capped = remainder_capped && piece.capped;
                    remainder = piece.faces;
                }
                None => remainder = Vec::new(),
            }
        }

        if !remainder.is_empty() {
            fragments.push(store.add_fragment(FragmentData::new(
                Solid::from_faces(remainder),
                self.solid,
                remainder_capped,
            )));
        }

        Ok(fragments)
    }
}

/// Clips a boundary to the half-space `(p - origin) . dir <= 0` and caps
/// the section.
///
/// Returns `None` when nothing of substance remains on the kept side
/// (empty or a sliver thinner than the tolerance band).
fn clip_half(faces: &[Face], origin: &Point3, dir: &Vector3, tolerance: f64) -> Option<Piece> {
    let mut kept: Vec<Face> = Vec::new();
    // Cap chords, directed so they chain into outward loops
    let mut segments: Vec<(Point3, Point3)> = Vec::new();
    let mut chords_ok = true;

    for face in faces {
        let d: Vec<f64> = face.iter().map(|p| (p - origin).dot(dir)).collect();
        let max_d = d.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        let min_d = d.iter().copied().fold(f64::INFINITY, f64::min);

        if max_d <= tolerance {
            kept.push(face.clone());
            continue;
        }
        if min_d >= -tolerance {
            continue;
        }

        let (clipped, mut events) = clip_face(face, &d, tolerance);
        let ring = polygon::dedup_ring(&clipped, tolerance);
        if !polygon::is_degenerate(&ring, tolerance) {
            kept.push(ring);
        }

        // Pair each exit with the next entry along the face boundary
        if !events.is_empty() {
            if events.len() % 2 != 0 {
                chords_ok = false;
                continue;
            }
            if !events[0].0 {
                events.rotate_left(1);
            }
            for pair in events.chunks(2) {
                let (exit_ok, exit) = pair[0];
                let (entry_ok, entry) = pair[1];
                if exit_ok && !entry_ok {
                    segments.push((entry, exit));
                } else {
                    chords_ok = false;
                }
            }
        }
    }

    if kept.is_empty() {
        return None;
    }

    // A kept set living entirely in the tolerance band is a coplanar sliver
    let span = kept
        .iter()
        .flatten()
        .map(|p| (p - origin).dot(dir))
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| {
            (lo.min(v), hi.max(v))
        });
    if span.1 - span.0 <= 2.0 * tolerance {
        return None;
    }

    if segments.is_empty() {
        return Some(Piece {
            faces: kept,
            capped: chords_ok,
        });
    }

    let (caps, stitched_ok) = stitch_caps(&segments, dir, tolerance);
    kept.extend(caps);
    Some(Piece {
        faces: kept,
        capped: chords_ok && stitched_ok,
    })
}

/// Sutherland-Hodgman clip of one face against the half-space.
///
/// Returns the clipped polygon plus the crossing events in traversal order,
/// each flagged `true` when the boundary leaves the kept side.
fn clip_face(face: &[Point3], d: &[f64], tolerance: f64) -> (Vec<Point3>, Vec<(bool, Point3)>) {
    let n = face.len();
    let mut out = Vec::with_capacity(n + 2);
    let mut events = Vec::new();

    for i in 0..n {
        let a = face[i];
        let b = face[(i + 1) % n];
        let da = d[i];
        let db = d[(i + 1) % n];
        let a_in = da <= tolerance;
        let b_in = db <= tolerance;

        if a_in {
            out.push(a);
        }
        if a_in != b_in {
            let t = da / (da - db);
            let ip = a + (b - a) * t;
            out.push(ip);
            events.push((a_in, ip));
        }
    }

    (out, events)
}

/// Stitches directed cap chords into closed loops, oriented outward
/// (toward the removed side, `+dir`).
fn stitch_caps(
    segments: &[(Point3, Point3)],
    dir: &Vector3,
    tolerance: f64,
) -> (Vec<Face>, bool) {
    let eps = tolerance.max(TOLERANCE) * 4.0;
    // Zero-length chords from tangent vertices carry no cap boundary
    let segments: Vec<(Point3, Point3)> = segments
        .iter()
        .copied()
        .filter(|(a, b)| (a - b).norm() > eps)
        .collect();
    let mut used = vec![false; segments.len()];
    let mut caps = Vec::new();
    let mut ok = true;

    for start in 0..segments.len() {
        if used[start] {
            continue;
        }
        used[start] = true;
        let mut ring = vec![segments[start].0, segments[start].1];

        let closed = loop {
            let end = ring[ring.len() - 1];
            if ring.len() > 2 && (end - ring[0]).norm() <= eps {
                ring.pop();
                break true;
            }
            let next = (0..segments.len())
                .find(|&j| !used[j] && (segments[j].0 - end).norm() <= eps);
            match next {
                Some(j) => {
                    used[j] = true;
                    ring.push(segments[j].1);
                }
                None => break false,
            }
        };

        if !closed {
            ok = false;
            continue;
        }
        let ring = polygon::dedup_ring(&ring, eps);
        if polygon::is_degenerate(&ring, tolerance) {
            continue;
        }
        let mut ring = ring;
        if polygon::newell_normal(&ring).dot(dir) < 0.0 {
            ring.reverse();
        }
        caps.push(ring);
    }

    (caps, ok)
}
