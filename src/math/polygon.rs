use super::{Point3, Vector3};

/// Newell normal of a planar 3D polygon.
///
/// The returned vector's direction follows the polygon winding (right-hand
/// rule) and its length is twice the polygon area, so degenerate polygons
/// yield a near-zero vector.
#[must_use]
pub fn newell_normal(polygon: &[Point3]) -> Vector3 {
    let mut normal = Vector3::zeros();
    let n = polygon.len();
    for i in 0..n {
        let a = &polygon[i];
        let b = &polygon[(i + 1) % n];
        normal.x += (a.y - b.y) * (a.z + b.z);
        normal.y += (a.z - b.z) * (a.x + b.x);
        normal.z += (a.x - b.x) * (a.y + b.y);
    }
    normal
}

/// Removes consecutive vertices closer than `tolerance`, including the
/// closing wrap-around pair.
#[must_use]
pub fn dedup_ring(polygon: &[Point3], tolerance: f64) -> Vec<Point3> {
    let mut out: Vec<Point3> = Vec::with_capacity(polygon.len());
    for p in polygon {
        if out.last().is_none_or(|q| (p - q).norm() > tolerance) {
            out.push(*p);
        }
    }
    while out.len() > 1 {
        let first = out[0];
        let last = out[out.len() - 1];
        if (first - last).norm() > tolerance {
            break;
        }
        out.pop();
    }
    out
}

/// Returns `true` if the polygon has fewer than 3 distinct vertices or
/// near-zero area.
#[must_use]
pub fn is_degenerate(polygon: &[Point3], tolerance: f64) -> bool {
    if polygon.len() < 3 {
        return true;
    }
    newell_normal(polygon).norm() < tolerance * tolerance
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn p(x: f64, y: f64, z: f64) -> Point3 {
        Point3::new(x, y, z)
    }

    #[test]
    fn newell_normal_of_ccw_square() {
        let square = vec![
            p(0.0, 0.0, 2.0),
            p(1.0, 0.0, 2.0),
            p(1.0, 1.0, 2.0),
            p(0.0, 1.0, 2.0),
        ];
        let n = newell_normal(&square);
        assert_relative_eq!(n.x, 0.0, epsilon = 1e-12);
        assert_relative_eq!(n.y, 0.0, epsilon = 1e-12);
        // length = 2 * area
        assert_relative_eq!(n.z, 2.0, epsilon = 1e-12);
    }

    #[test]
    fn dedup_ring_drops_repeats_and_closing_vertex() {
        let ring = vec![
            p(0.0, 0.0, 0.0),
            p(0.0, 0.0, 0.0),
            p(1.0, 0.0, 0.0),
            p(1.0, 1.0, 0.0),
            p(0.0, 0.0, 0.0),
        ];
        let out = dedup_ring(&ring, 1e-9);
        assert_eq!(out.len(), 3);
    }

    #[test]
    fn collinear_polygon_is_degenerate() {
        let line = vec![p(0.0, 0.0, 0.0), p(1.0, 0.0, 0.0), p(2.0, 0.0, 0.0)];
        assert!(is_degenerate(&line, 1e-6));
    }

    #[test]
    fn square_is_not_degenerate() {
        let square = vec![
            p(0.0, 0.0, 0.0),
            p(1.0, 0.0, 0.0),
            p(1.0, 1.0, 0.0),
            p(0.0, 1.0, 0.0),
        ];
        assert!(!is_degenerate(&square, 1e-6));
    }
}
