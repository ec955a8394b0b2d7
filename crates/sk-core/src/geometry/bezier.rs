//! Cubic Bézier curve pieces
//!
//! A path is a chain of these pieces. Measuring, projecting, cutting and
//! intersecting go through `kurbo`; straight pieces are handed over as
//! `kurbo::Line` so that their parameter stays uniform and trimmed lines stay
//! lines.

use glam::DVec2;
use kurbo::{
    CubicBez, Line, ParamCurve, ParamCurveArclen, ParamCurveExtrema, ParamCurveNearest, PathEl,
    PathSeg, Point as KurboPoint,
};
use serde::{Deserialize, Serialize};

use super::{Bounds, points_equal};

/// Accuracy passed to kurbo's arc-length and projection solvers
pub const CURVE_ACCURACY: f64 = 1e-9;

/// Flattening tolerance used when a curved piece is crossed with another curve
const INTERSECTION_TOLERANCE: f64 = 1e-6;

/// Hits closer than this are reported once
const INTERSECTION_MERGE_DISTANCE: f64 = 1e-5;

/// A single cubic Bézier piece with absolute control points
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CubicBezier {
    /// Start point
    pub start: DVec2,
    /// First control point
    pub handle_start: DVec2,
    /// Second control point
    pub handle_end: DVec2,
    /// End point
    pub end: DVec2,
}

/// Convert a drawing-space point for kurbo
pub fn to_kurbo(p: DVec2) -> KurboPoint {
    KurboPoint::new(p.x, p.y)
}

/// Convert a kurbo point back to drawing space
pub fn from_kurbo(p: KurboPoint) -> DVec2 {
    DVec2::new(p.x, p.y)
}

impl CubicBezier {
    /// Create a curve from its four control points
    pub fn new(start: DVec2, handle_start: DVec2, handle_end: DVec2, end: DVec2) -> Self {
        Self {
            start,
            handle_start,
            handle_end,
            end,
        }
    }

    /// Create a straight piece
    pub fn linear(start: DVec2, end: DVec2) -> Self {
        Self::new(start, start, end, end)
    }

    /// Whether both handles coincide with their endpoints
    pub fn is_linear(&self) -> bool {
        points_equal(self.handle_start, self.start) && points_equal(self.handle_end, self.end)
    }

    /// The piece as a kurbo segment
    pub fn to_seg(&self) -> PathSeg {
        if self.is_linear() {
            PathSeg::Line(Line::new(to_kurbo(self.start), to_kurbo(self.end)))
        } else {
            PathSeg::Cubic(CubicBez::new(
                to_kurbo(self.start),
                to_kurbo(self.handle_start),
                to_kurbo(self.handle_end),
                to_kurbo(self.end),
            ))
        }
    }

    /// Build a piece from a kurbo segment
    pub fn from_seg(seg: PathSeg) -> Self {
        match seg {
            PathSeg::Line(line) => Self::linear(from_kurbo(line.p0), from_kurbo(line.p1)),
            PathSeg::Quad(quad) => Self::from_seg(PathSeg::Cubic(quad.raise())),
            PathSeg::Cubic(c) => Self::new(
                from_kurbo(c.p0),
                from_kurbo(c.p1),
                from_kurbo(c.p2),
                from_kurbo(c.p3),
            ),
        }
    }

    /// Point at parameter `t` in `[0, 1]`
    pub fn evaluate(&self, t: f64) -> DVec2 {
        from_kurbo(self.to_seg().eval(t.clamp(0.0, 1.0)))
    }

    /// The part of the curve between `t0` and `t1`
    pub fn trim(&self, t0: f64, t1: f64) -> Self {
        let t0 = t0.clamp(0.0, 1.0);
        let t1 = t1.clamp(0.0, 1.0);
        if t1 <= t0 {
            let p = self.evaluate(t0);
            return Self::linear(p, p);
        }
        Self::from_seg(self.to_seg().subsegment(t0..t1))
    }

    /// Tight bounding box
    pub fn bounds(&self) -> Bounds {
        let rect = self.to_seg().bounding_box();
        Bounds::new(
            DVec2::new(rect.x0, rect.y0),
            DVec2::new(rect.x1, rect.y1),
        )
    }

    /// Arc length of the whole piece
    pub fn length(&self) -> f64 {
        self.to_seg().arclen(CURVE_ACCURACY)
    }

    /// Arc length from the start up to parameter `t`
    pub fn length_to(&self, t: f64) -> f64 {
        let t = t.clamp(0.0, 1.0);
        if t <= 0.0 {
            return 0.0;
        }
        self.to_seg().subsegment(0.0..t).arclen(CURVE_ACCURACY)
    }

    /// Parameter at which the arc length from the start reaches `length`
    pub fn t_at_length(&self, length: f64) -> f64 {
        let total = self.length();
        if length <= 0.0 || total <= 0.0 {
            return 0.0;
        }
        if length >= total {
            return 1.0;
        }
        self.to_seg()
            .inv_arclen(length, CURVE_ACCURACY)
            .clamp(0.0, 1.0)
    }

    /// Parameter of the point on the curve closest to `point`
    pub fn project(&self, point: DVec2) -> f64 {
        if points_equal(self.start, self.end) && self.is_linear() {
            return 0.0;
        }
        self.to_seg()
            .nearest(to_kurbo(point), CURVE_ACCURACY)
            .t
            .clamp(0.0, 1.0)
    }

    /// Crossings with another piece as `[t_self, t_other]` pairs
    pub fn intersections(&self, other: &CubicBezier) -> Vec<[f64; 2]> {
        let seg = self.to_seg();
        let other_seg = other.to_seg();

        let mut hits: Vec<[f64; 2]> = Vec::new();
        let mut push = |hit: [f64; 2]| {
            let p = self.evaluate(hit[0]);
            if !hits
                .iter()
                .any(|h| self.evaluate(h[0]).distance(p) < INTERSECTION_MERGE_DISTANCE)
            {
                hits.push(hit);
            }
        };

        match (seg, other_seg) {
            (_, PathSeg::Line(line)) => {
                for hit in seg.intersect_line(line) {
                    push([hit.segment_t, hit.line_t]);
                }
            }
            (PathSeg::Line(line), _) => {
                for hit in other_seg.intersect_line(line) {
                    push([hit.line_t, hit.segment_t]);
                }
            }
            _ => {
                // Curve against curve: cross the first with a fine polyline of the second
                let mut previous: Option<KurboPoint> = None;
                kurbo::flatten(
                    [
                        PathEl::MoveTo(to_kurbo(other.start)),
                        PathEl::CurveTo(
                            to_kurbo(other.handle_start),
                            to_kurbo(other.handle_end),
                            to_kurbo(other.end),
                        ),
                    ],
                    INTERSECTION_TOLERANCE,
                    |el| match el {
                        PathEl::MoveTo(p) => previous = Some(p),
                        PathEl::LineTo(p) => {
                            if let Some(from) = previous {
                                for hit in seg.intersect_line(Line::new(from, p)) {
                                    let at = seg.eval(hit.segment_t);
                                    let t_other = other_seg.nearest(at, CURVE_ACCURACY).t;
                                    push([hit.segment_t, t_other]);
                                }
                            }
                            previous = Some(p);
                        }
                        _ => {}
                    },
                );
            }
        }

        hits.sort_by(|a, b| a[0].total_cmp(&b[0]));
        hits
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn quarter_circle() -> CubicBezier {
        // Unit quarter circle from (1, 0) to (0, 1)
        let k = 0.552_284_749_8;
        CubicBezier::new(
            DVec2::new(1.0, 0.0),
            DVec2::new(1.0, k),
            DVec2::new(k, 1.0),
            DVec2::new(0.0, 1.0),
        )
    }

    #[test]
    fn test_linear_length_and_trim() {
        let line = CubicBezier::linear(DVec2::ZERO, DVec2::new(10.0, 0.0));
        assert!(line.is_linear());
        assert!((line.length() - 10.0).abs() < 1e-12);

        let a = line.trim(0.0, 0.3);
        let b = line.trim(0.3, 1.0);
        assert!(a.is_linear() && b.is_linear(), "Line pieces must stay straight");
        assert!((a.length() - 3.0).abs() < 1e-9);
        assert!((b.length() - 7.0).abs() < 1e-9);
    }

    #[test]
    fn test_linear_parameter_is_uniform() {
        let line = CubicBezier::linear(DVec2::ZERO, DVec2::new(10.0, 0.0));
        assert!((line.evaluate(0.25).x - 2.5).abs() < 1e-12);
        assert!((line.t_at_length(2.5) - 0.25).abs() < 1e-12);
    }

    #[test]
    fn test_degenerate_piece_measures_zero() {
        let dot = CubicBezier::linear(DVec2::ONE, DVec2::ONE);
        assert_eq!(dot.length(), 0.0);
        assert_eq!(dot.t_at_length(1.0), 0.0);
        assert_eq!(dot.project(DVec2::ZERO), 0.0);
    }

    #[test]
    fn test_curve_length_quarter_circle() {
        let len = quarter_circle().length();
        let expected = std::f64::consts::FRAC_PI_2;
        assert!(
            (len - expected).abs() < 1e-3,
            "Quarter circle length: {} vs {}",
            len,
            expected
        );
    }

    #[test]
    fn test_t_at_length_inverts_length_to() {
        let curve = quarter_circle();
        let t = curve.t_at_length(curve.length() * 0.25);
        let back = curve.length_to(t);
        assert!((back - curve.length() * 0.25).abs() < 1e-6);
    }

    #[test]
    fn test_trimmed_curve_keeps_its_ends_on_the_curve() {
        let curve = quarter_circle();
        let piece = curve.trim(0.25, 0.75);
        assert!(piece.start.distance(curve.evaluate(0.25)) < 1e-9);
        assert!(piece.end.distance(curve.evaluate(0.75)) < 1e-9);
        assert!(!piece.is_linear());
    }

    #[test]
    fn test_bounds_are_tight() {
        let bounds = quarter_circle().bounds();
        assert!((bounds.max.x - 1.0).abs() < 1e-9);
        assert!((bounds.max.y - 1.0).abs() < 1e-9);
        assert!(bounds.min.x.abs() < 1e-9);
    }

    #[test]
    fn test_project_on_line() {
        let line = CubicBezier::linear(DVec2::ZERO, DVec2::new(10.0, 0.0));
        assert!((line.project(DVec2::new(4.0, 3.0)) - 0.4).abs() < 1e-12);
        assert_eq!(line.project(DVec2::new(-5.0, 0.0)), 0.0);
        assert_eq!(line.project(DVec2::new(15.0, 0.0)), 1.0);
    }

    #[test]
    fn test_project_on_curve() {
        let curve = quarter_circle();
        let target = DVec2::new(2.0, 2.0);
        let p = curve.evaluate(curve.project(target));
        let expected = DVec2::splat(std::f64::consts::FRAC_1_SQRT_2);
        assert!(p.distance(expected) < 1e-3, "Projected to {:?}", p);
    }

    #[test]
    fn test_line_line_intersection() {
        let a = CubicBezier::linear(DVec2::new(0.0, 0.0), DVec2::new(10.0, 10.0));
        let b = CubicBezier::linear(DVec2::new(0.0, 10.0), DVec2::new(10.0, 0.0));
        let hits = a.intersections(&b);
        assert_eq!(hits.len(), 1);
        assert!((hits[0][0] - 0.5).abs() < 1e-12);
        assert!((hits[0][1] - 0.5).abs() < 1e-12);
    }

    #[test]
    fn test_parallel_lines_do_not_intersect() {
        let a = CubicBezier::linear(DVec2::new(0.0, 0.0), DVec2::new(10.0, 0.0));
        let b = CubicBezier::linear(DVec2::new(0.0, 1.0), DVec2::new(10.0, 1.0));
        assert!(a.intersections(&b).is_empty());
    }

    #[test]
    fn test_curve_line_intersection() {
        let curve = quarter_circle();
        let diagonal = CubicBezier::linear(DVec2::ZERO, DVec2::new(2.0, 2.0));
        let hits = curve.intersections(&diagonal);
        assert_eq!(hits.len(), 1, "Expected one hit, got {:?}", hits);
        let p = curve.evaluate(hits[0][0]);
        assert!((p.x - p.y).abs() < 1e-4);

        let swapped = diagonal.intersections(&curve);
        assert_eq!(swapped.len(), 1);
        assert!(diagonal.evaluate(swapped[0][0]).distance(p) < 1e-4);
    }

    #[test]
    fn test_curve_curve_intersection() {
        let curve = quarter_circle();
        // Mirror of the quarter circle through x = 0.5 crosses it once at x = 0.5
        let mirrored = CubicBezier::new(
            DVec2::new(1.0 - curve.start.x, curve.start.y),
            DVec2::new(1.0 - curve.handle_start.x, curve.handle_start.y),
            DVec2::new(1.0 - curve.handle_end.x, curve.handle_end.y),
            DVec2::new(1.0 - curve.end.x, curve.end.y),
        );
        let hits = curve.intersections(&mirrored);
        assert_eq!(hits.len(), 1, "Hits: {:?}", hits);
        let p = curve.evaluate(hits[0][0]);
        let q = mirrored.evaluate(hits[0][1]);
        assert!((p.x - 0.5).abs() < 1e-4, "Hit at {:?}", p);
        assert!(p.distance(q) < 1e-4);
    }
}
