//! Point, segment and circle distance helpers
//!
//! All overlap checks in the town go through `min_point_segment_distance`.
//! The segment form matters: the infinite-line distance under-detects
//! overlaps near the ends of a link.

use crate::core::types::Vec2;

/// Minimum distance between a point and the infinite line through `a` and `b`
///
/// Falls back to the point distance when `a == b`.
pub fn min_point_line_distance(point: Vec2, a: Vec2, b: Vec2) -> f64 {
    let ab = b - a;
    let ap = point - a;
    if ab.dot(&ab) == 0.0 {
        return ap.norm();
    }
    (ap - ap.project(&ab)).norm()
}

/// Minimum distance between a point and the segment `[a, b]`
///
/// The point is projected onto the segment; if the projection lands strictly
/// inside the segment span the perpendicular distance is returned, otherwise
/// the distance to the closer endpoint.
pub fn min_point_segment_distance(point: Vec2, a: Vec2, b: Vec2) -> f64 {
    let ab = b - a;
    let ap = point - a;
    let bp = point - b;

    let segment_length = ab.norm();
    if segment_length == 0.0 {
        return ap.norm();
    }

    let ax = ap.project(&ab);
    let bx = bp.project(&ab);

    if ax.norm() < segment_length && bx.norm() < segment_length {
        return (ap - ax).norm();
    }

    ap.norm().min(bp.norm())
}

/// Whether two circles come within `margin` of each other
///
/// Touching circles count as overlapping.
pub fn circles_overlap(c0: Vec2, r0: f64, c1: Vec2, r1: f64, margin: f64) -> bool {
    c0.distance(&c1) <= r0 + r1 + margin
}

/// Whether a circle comes within `margin` of the segment `[a, b]`
pub fn circle_segment_overlap(center: Vec2, radius: f64, a: Vec2, b: Vec2, margin: f64) -> bool {
    min_point_segment_distance(center, a, b) <= radius + margin
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f64 = 1e-9;

    #[test]
    fn test_segment_distance_perpendicular() {
        let d = min_point_segment_distance(
            Vec2::new(5.0, 3.0),
            Vec2::new(0.0, 0.0),
            Vec2::new(10.0, 0.0),
        );
        assert!((d - 3.0).abs() < EPS);
    }

    #[test]
    fn test_segment_distance_beyond_end() {
        // Past the b end: distance to b, not to the infinite line
        let d = min_point_segment_distance(
            Vec2::new(14.0, 3.0),
            Vec2::new(0.0, 0.0),
            Vec2::new(10.0, 0.0),
        );
        assert!((d - 5.0).abs() < EPS);

        let line = min_point_line_distance(
            Vec2::new(14.0, 3.0),
            Vec2::new(0.0, 0.0),
            Vec2::new(10.0, 0.0),
        );
        assert!((line - 3.0).abs() < EPS);
    }

    #[test]
    fn test_segment_distance_before_start() {
        let d = min_point_segment_distance(
            Vec2::new(-3.0, -4.0),
            Vec2::new(0.0, 0.0),
            Vec2::new(10.0, 0.0),
        );
        assert!((d - 5.0).abs() < EPS);
    }

    #[test]
    fn test_segment_distance_diagonal() {
        let d = min_point_segment_distance(
            Vec2::new(0.0, 10.0),
            Vec2::new(0.0, 0.0),
            Vec2::new(10.0, 10.0),
        );
        assert!((d - 50f64.sqrt()).abs() < EPS);
    }

    #[test]
    fn test_degenerate_segment() {
        let p = Vec2::new(3.0, 4.0);
        assert_eq!(min_point_segment_distance(p, Vec2::ZERO, Vec2::ZERO), 5.0);
        assert_eq!(min_point_line_distance(p, Vec2::ZERO, Vec2::ZERO), 5.0);
    }

    #[test]
    fn test_circles_overlap() {
        let r = 1000f64.sqrt();
        assert!(circles_overlap(Vec2::ZERO, r, Vec2::new(50.0, 0.0), r, 0.0));
        assert!(!circles_overlap(Vec2::ZERO, r, Vec2::new(100.0, 0.0), r, 0.0));
        // Margin pushes a clear pair into overlap
        assert!(circles_overlap(Vec2::ZERO, r, Vec2::new(70.0, 0.0), r, 10.0));
        // Touching circles overlap
        assert!(circles_overlap(Vec2::ZERO, 1.0, Vec2::new(2.0, 0.0), 1.0, 0.0));
    }

    #[test]
    fn test_circle_segment_overlap() {
        let a = Vec2::new(0.0, 0.0);
        let b = Vec2::new(100.0, 0.0);
        assert!(circle_segment_overlap(Vec2::new(50.0, 20.0), 31.0, a, b, 0.0));
        assert!(!circle_segment_overlap(Vec2::new(50.0, 40.0), 31.0, a, b, 0.0));
        assert!(circle_segment_overlap(Vec2::new(50.0, 40.0), 31.0, a, b, 10.0));
        // Near the end of the segment the line distance would be 0 but the
        // circle is far from the segment itself
        assert!(!circle_segment_overlap(Vec2::new(200.0, 0.0), 31.0, a, b, 0.0));
    }
}
