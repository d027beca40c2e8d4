use std::collections::{HashMap, HashSet, VecDeque};

use spade::handles::FixedFaceHandle;
use spade::{
    ConstrainedDelaunayTriangulation, InsertionError, Point2 as SpadePoint2, Triangulation,
};

use crate::error::{Result, TessellationError};
use crate::math::{polygon, Plane, Point3};

use super::Triangle;

/// Triangulates a planar polygon into 3D triangles using CDT.
///
/// The polygon may be non-convex. Output triangles keep the polygon's
/// winding: their geometric normals agree with the polygon's Newell normal.
/// Degenerate polygons (fewer than 3 distinct vertices, near-zero area)
/// produce an empty triangle list rather than an error, so callers can sum
/// volume contributions without special-casing slivers.
///
/// # Errors
///
/// Returns an error if a vertex cannot be inserted into the triangulation.
pub fn triangulate_polygon(face: &[Point3], tolerance: f64) -> Result<Vec<Triangle>> {
    let ring = polygon::dedup_ring(face, tolerance);
    if polygon::is_degenerate(&ring, tolerance) {
        return Ok(Vec::new());
    }
    if ring.len() == 3 {
        return Ok(vec![[ring[0], ring[1], ring[2]]]);
    }

    let normal = polygon::newell_normal(&ring);
    let plane = Plane::from_normal(ring[0], normal)?;

    let ring_2d: Vec<SpadePoint2<f64>> = ring
        .iter()
        .map(|p| {
            let uv = plane.project_uv(p);
            SpadePoint2::new(uv.x, uv.y)
        })
        .collect();

    let mut cdt = ConstrainedDelaunayTriangulation::<SpadePoint2<f64>>::new();
    insert_constraint_loop(&mut cdt, &ring_2d)?;

    let interior_faces = classify_interior_faces(&cdt);

    let mut triangles = Vec::new();
    for face_handle in cdt.inner_faces() {
        if !interior_faces.contains(&face_handle.fix().index()) {
            continue;
        }
        let verts = face_handle.vertices();
        let mut tri = [Point3::origin(); 3];
        for (i, vh) in verts.iter().enumerate() {
            let pos = vh.position();
            // Spade inner faces are CCW in UV, and the plane frame satisfies
            // u x v = newell normal, so winding is preserved.
            tri[i] = plane.point_at(pos.x, pos.y);
        }
        triangles.push(tri);
    }

    Ok(triangles)
}

/// Inserts a closed constraint loop into the CDT.
fn insert_constraint_loop(
    cdt: &mut ConstrainedDelaunayTriangulation<SpadePoint2<f64>>,
    points: &[SpadePoint2<f64>],
) -> Result<()> {
    if points.len() < 3 {
        return Err(
            TessellationError::Failed("constraint loop needs at least 3 points".into()).into(),
        );
    }

    let mut handles = Vec::with_capacity(points.len());
    for &pt in points {
        let h = cdt
            .insert(pt)
            .map_err(|e: InsertionError| TessellationError::Failed(format!("CDT insert: {e}")))?;
        handles.push(h);
    }

    for i in 0..handles.len() {
        let from = handles[i];
        let to = handles[(i + 1) % handles.len()];
        if from != to {
            cdt.add_constraint(from, to);
        }
    }

    Ok(())
}

/// Classifies which inner faces of the CDT are inside the polygon.
///
/// Flood-fills from the outer face, incrementing the depth each time a
/// constraint edge is crossed; odd depth means interior.
fn classify_interior_faces(
    cdt: &ConstrainedDelaunayTriangulation<SpadePoint2<f64>>,
) -> HashSet<usize> {
    let mut interior = HashSet::new();
    let mut depth_map: HashMap<usize, u32> = HashMap::new();
    let mut queue: VecDeque<(FixedFaceHandle<spade::handles::InnerTag>, u32)> = VecDeque::new();

    let outer_fix = cdt.outer_face().fix();

    // Seed: inner faces adjacent to the outer face
    for edge in cdt.directed_edges() {
        if edge.face().fix() == outer_fix {
            let rev_face = edge.rev().face();
            if let Some(inner) = rev_face.as_inner() {
                let idx = inner.fix().index();
                if depth_map.contains_key(&idx) {
                    continue;
                }
                let depth = u32::from(cdt.is_constraint_edge(edge.as_undirected().fix()));
                depth_map.insert(idx, depth);
                if depth % 2 == 1 {
                    interior.insert(idx);
                }
                queue.push_back((inner.fix(), depth));
            }
        }
    }

    // BFS flood-fill
    while let Some((face_fix, depth)) = queue.pop_front() {
        let face = cdt.face(face_fix);
        for edge in face.adjacent_edges() {
            let neighbor = edge.rev().face();
            if let Some(inner_neighbor) = neighbor.as_inner() {
                let n_idx = inner_neighbor.fix().index();
                if depth_map.contains_key(&n_idx) {
                    continue;
                }
                let new_depth = if cdt.is_constraint_edge(edge.as_undirected().fix()) {
                    depth + 1
                } else {
                    depth
                };
                depth_map.insert(n_idx, new_depth);
                if new_depth % 2 == 1 {
                    interior.insert(n_idx);
                }
                queue.push_back((inner_neighbor.fix(), new_depth));
            }
        }
    }

    interior
}
