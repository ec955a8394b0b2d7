//! Path model
//!
//! A [`Path`] is an ordered list of [`Segment`]s, each a point with two
//! tangent handles stored relative to the point. Consecutive segments are
//! joined by cubic Bézier pieces; a closed path also joins the last segment
//! back to the first. Every path carries exactly one [`PathKind`] describing
//! the analytic shape it was built as.

use glam::DVec2;
use kurbo::{BezPath, PathEl, Shape};
use serde::{Deserialize, Serialize};

use crate::geometry::{
    Bounds, CubicBezier, POINT_EPSILON, angle_degrees, from_kurbo, is_finite_point,
    normalize_degrees, point_on_circle, points_equal, to_kurbo,
};

/// Handle length factor for a quarter circle drawn with one cubic piece
const QUARTER_CIRCLE_KAPPA: f64 = 0.552_284_749_830_793_4;

/// Maximum distance between a flattened polyline and the curve it replaces
pub const FLATTEN_TOLERANCE: f64 = 1e-2;

/// A vertex of a path with its incoming and outgoing tangent handles
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Segment {
    /// Vertex position
    pub point: DVec2,
    /// Incoming handle, relative to `point`
    pub handle_in: DVec2,
    /// Outgoing handle, relative to `point`
    pub handle_out: DVec2,
}

impl Segment {
    /// Create a straight corner
    pub fn new(point: DVec2) -> Self {
        Self {
            point,
            handle_in: DVec2::ZERO,
            handle_out: DVec2::ZERO,
        }
    }

    /// Create a segment with explicit handles
    pub fn with_handles(point: DVec2, handle_in: DVec2, handle_out: DVec2) -> Self {
        Self {
            point,
            handle_in,
            handle_out,
        }
    }

    /// Whether either handle is non-zero
    pub fn has_handles(&self) -> bool {
        self.handle_in.length_squared() > POINT_EPSILON * POINT_EPSILON
            || self.handle_out.length_squared() > POINT_EPSILON * POINT_EPSILON
    }

    /// Reset both handles to zero
    pub fn straighten(&mut self) {
        self.handle_in = DVec2::ZERO;
        self.handle_out = DVec2::ZERO;
    }
}

/// Analytic description of a circular arc
///
/// Angles are degrees in `[0, 360)`; the arc runs counter-clockwise (towards
/// increasing angle) from `start_angle` by `sweep_angle`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ArcGeometry {
    /// Arc center
    pub center: DVec2,
    /// Arc radius
    pub radius: f64,
    /// Start angle in degrees
    pub start_angle: f64,
    /// End angle in degrees
    pub end_angle: f64,
    /// Angular extent in degrees
    pub sweep_angle: f64,
}

impl ArcGeometry {
    /// Build an arc from its start angle and sweep
    pub fn from_sweep(center: DVec2, radius: f64, start_angle: f64, sweep_angle: f64) -> Self {
        let start_angle = normalize_degrees(start_angle);
        Self {
            center,
            radius,
            start_angle,
            end_angle: normalize_degrees(start_angle + sweep_angle),
            sweep_angle,
        }
    }

    /// Point where the arc starts
    pub fn start_point(&self) -> DVec2 {
        point_on_circle(self.center, self.radius, self.start_angle)
    }

    /// Point where the arc ends
    pub fn end_point(&self) -> DVec2 {
        point_on_circle(self.center, self.radius, self.start_angle + self.sweep_angle)
    }

    /// Point at a fraction of the sweep
    pub fn point_at_fraction(&self, fraction: f64) -> DVec2 {
        point_on_circle(
            self.center,
            self.radius,
            self.start_angle + self.sweep_angle * fraction,
        )
    }

    /// The sub-arc between two fractions of the sweep
    pub fn sub_arc(&self, from: f64, to: f64) -> Self {
        Self::from_sweep(
            self.center,
            self.radius,
            self.start_angle + self.sweep_angle * from,
            self.sweep_angle * (to - from),
        )
    }

    /// Check the angle ranges and the start/end/sweep relation
    pub fn is_consistent(&self) -> bool {
        let in_range = |a: f64| (0.0..360.0).contains(&a);
        let expected_end = normalize_degrees(self.start_angle + self.sweep_angle);
        let end_diff = (expected_end - self.end_angle).abs();
        self.radius.is_finite()
            && self.radius > 0.0
            && is_finite_point(self.center)
            && in_range(self.start_angle)
            && in_range(self.end_angle)
            && self.sweep_angle > 0.0
            && self.sweep_angle < 360.0
            && (end_diff < 1e-6 || (360.0 - end_diff) < 1e-6)
    }
}

/// A rounded corner of a closed polygon
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Fillet {
    /// Index of the rounded corner in the polygon's corner list
    pub corner_index: usize,
    /// Arc center
    pub center: DVec2,
    /// Arc radius
    pub radius: f64,
    /// Start angle in degrees
    pub start_angle: f64,
    /// End angle in degrees
    pub end_angle: f64,
    /// Angular extent in degrees
    pub sweep_angle: f64,
    /// Tangent point on the edge towards the previous corner
    pub tangent_point1: DVec2,
    /// Tangent point on the edge towards the next corner
    pub tangent_point2: DVec2,
}

impl Fillet {
    /// The fillet's arc
    pub fn arc(&self) -> ArcGeometry {
        ArcGeometry {
            center: self.center,
            radius: self.radius,
            start_angle: self.start_angle,
            end_angle: self.end_angle,
            sweep_angle: self.sweep_angle,
        }
    }

    /// Distance from the corner to either tangent point
    pub fn tangent_distance(&self, corner: DVec2) -> f64 {
        corner.distance(self.tangent_point1)
    }

    /// Whether `(a, b)` is this fillet's tangent pair in either order
    pub fn matches_tangent_pair(&self, a: DVec2, b: DVec2) -> bool {
        (points_equal(a, self.tangent_point1) && points_equal(b, self.tangent_point2))
            || (points_equal(a, self.tangent_point2) && points_equal(b, self.tangent_point1))
    }
}

/// Shape metadata carried by every path
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub enum PathKind {
    /// Two straight segments
    Line,
    /// Axis-aligned rectangle drawn from two corners
    Rectangle {
        /// First clicked corner
        start: DVec2,
        /// Opposite corner
        end: DVec2,
        /// Width
        width: f64,
        /// Height
        height: f64,
    },
    /// Full circle
    Circle {
        /// Center
        center: DVec2,
        /// Radius
        radius: f64,
    },
    /// Circular arc
    Arc(ArcGeometry),
    /// Closed polygon with rounded corners
    FilletedPolygon {
        /// Corners before rounding
        corners: Vec<DVec2>,
        /// One record per rounded corner
        fillets: Vec<Fillet>,
    },
    /// Smoothed curve through fit points
    Spline {
        /// Clicked locations the curve passes through
        fit_points: Vec<DVec2>,
    },
    /// No analytic description
    #[default]
    Untyped,
}

impl PathKind {
    /// Human-readable kind name
    pub fn name(&self) -> &'static str {
        match self {
            PathKind::Line => "Line",
            PathKind::Rectangle { .. } => "Rectangle",
            PathKind::Circle { .. } => "Circle",
            PathKind::Arc(_) => "Arc",
            PathKind::FilletedPolygon { .. } => "Filleted Polygon",
            PathKind::Spline { .. } => "Spline",
            PathKind::Untyped => "Path",
        }
    }

    /// Whether the geometry is defined by parameters rather than by segments
    pub fn is_analytic(&self) -> bool {
        matches!(
            self,
            PathKind::Circle { .. } | PathKind::Arc(_) | PathKind::FilletedPolygon { .. }
        )
    }
}

/// Stroke appearance, carried through every edit
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PathStyle {
    /// Stroke color (RGBA)
    pub stroke_color: [f32; 4],
    /// Stroke width
    pub stroke_width: f32,
}

impl Default for PathStyle {
    fn default() -> Self {
        Self {
            stroke_color: [0.0, 0.0, 0.0, 1.0],
            stroke_width: 2.0,
        }
    }
}

/// Where a point lies along a path
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PathLocation {
    /// Index of the curve piece
    pub curve: usize,
    /// Parameter on that piece
    pub t: f64,
    /// Arc-length offset from the path start
    pub offset: f64,
    /// The point on the path
    pub point: DVec2,
    /// Distance from the queried point
    pub distance: f64,
}

/// A drawn path
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Path {
    /// Ordered vertices
    pub segments: Vec<Segment>,
    /// Whether the last segment joins back to the first
    pub closed: bool,
    /// Shape metadata
    pub kind: PathKind,
    /// Stroke appearance
    #[serde(default)]
    pub style: PathStyle,
    /// Hidden paths take no part in snapping or trimming
    #[serde(default = "default_visible")]
    pub visible: bool,
    /// Construction or indicator geometry that is never exported
    #[serde(default)]
    pub temporary: bool,
}

fn default_visible() -> bool {
    true
}

impl Path {
    /// Create an untyped path
    pub fn new(segments: Vec<Segment>, closed: bool) -> Self {
        Self {
            segments,
            closed,
            kind: PathKind::Untyped,
            style: PathStyle::default(),
            visible: true,
            temporary: false,
        }
    }

    /// Create an untyped path through straight corners
    pub fn polyline(points: &[DVec2], closed: bool) -> Self {
        Self::new(points.iter().copied().map(Segment::new).collect(), closed)
    }

    /// Create a straight line
    pub fn line(start: DVec2, end: DVec2) -> Self {
        Self::polyline(&[start, end], false).with_kind(PathKind::Line)
    }

    /// Create an axis-aligned rectangle spanned by two corners
    pub fn rectangle(start: DVec2, end: DVec2) -> Self {
        let min = start.min(end);
        let max = start.max(end);
        let corners = [
            min,
            DVec2::new(max.x, min.y),
            max,
            DVec2::new(min.x, max.y),
        ];
        Self::polyline(&corners, true).with_kind(PathKind::Rectangle {
            start,
            end,
            width: max.x - min.x,
            height: max.y - min.y,
        })
    }

    /// Create a full circle
    pub fn circle(center: DVec2, radius: f64) -> Self {
        let k = radius * QUARTER_CIRCLE_KAPPA;
        let segments = (0..4)
            .map(|i| {
                let angle = 90.0 * i as f64;
                let tangent = tangent_at(angle);
                Segment::with_handles(
                    point_on_circle(center, radius, angle),
                    -tangent * k,
                    tangent * k,
                )
            })
            .collect();
        Self::new(segments, true).with_kind(PathKind::Circle { center, radius })
    }

    /// Create an open arc
    pub fn arc(geometry: ArcGeometry) -> Self {
        let segments = arc_segments(
            geometry.center,
            geometry.radius,
            geometry.start_angle,
            geometry.sweep_angle,
        );
        Self::new(segments, false).with_kind(PathKind::Arc(geometry))
    }

    /// Create a closed polygon whose listed corners are rounded
    pub fn filleted_polygon(corners: Vec<DVec2>, fillets: Vec<Fillet>) -> Self {
        let mut path = Self::new(Vec::new(), true).with_kind(PathKind::FilletedPolygon {
            corners,
            fillets,
        });
        path.rebuild_outline();
        path
    }

    /// Set the shape metadata
    pub fn with_kind(mut self, kind: PathKind) -> Self {
        self.kind = kind;
        self
    }

    /// Set the stroke style
    pub fn with_style(mut self, style: PathStyle) -> Self {
        self.style = style;
        self
    }

    /// Mark as construction geometry
    pub fn with_temporary(mut self, temporary: bool) -> Self {
        self.temporary = temporary;
        self
    }

    /// Regenerate the segments of a filleted polygon from its corners and fillets
    pub fn rebuild_outline(&mut self) {
        let PathKind::FilletedPolygon { corners, fillets } = &self.kind else {
            return;
        };

        let mut segments = Vec::with_capacity(corners.len());
        for (index, corner) in corners.iter().enumerate() {
            match fillets.iter().find(|f| f.corner_index == index) {
                Some(fillet) => {
                    let arc = fillet.arc();
                    // Walk from the tangent point on the incoming edge
                    let forward = arc.start_point().distance(fillet.tangent_point1)
                        <= arc.end_point().distance(fillet.tangent_point1);
                    let (from, sweep) = if forward {
                        (arc.start_angle, arc.sweep_angle)
                    } else {
                        (arc.start_angle + arc.sweep_angle, -arc.sweep_angle)
                    };
                    let mut piece = arc_segments(arc.center, arc.radius, from, sweep);
                    if let Some(first) = piece.first_mut() {
                        first.point = fillet.tangent_point1;
                    }
                    if let Some(last) = piece.last_mut() {
                        last.point = fillet.tangent_point2;
                    }
                    segments.extend(piece);
                }
                None => segments.push(Segment::new(*corner)),
            }
        }
        self.segments = segments;
        self.closed = true;
    }

    /// First vertex
    pub fn first_point(&self) -> Option<DVec2> {
        self.segments.first().map(|s| s.point)
    }

    /// Last vertex
    pub fn last_point(&self) -> Option<DVec2> {
        self.segments.last().map(|s| s.point)
    }

    /// Whether any segment has a non-zero handle
    pub fn has_handles(&self) -> bool {
        self.segments.iter().any(Segment::has_handles)
    }

    /// Number of curve pieces
    pub fn curve_count(&self) -> usize {
        match self.segments.len() {
            0 | 1 => 0,
            n if self.closed => n,
            n => n - 1,
        }
    }

    /// Curve piece `index`, joining segment `index` to the next one
    pub fn curve(&self, index: usize) -> Option<CubicBezier> {
        if index >= self.curve_count() {
            return None;
        }
        let a = self.segments[index];
        let b = self.segments[(index + 1) % self.segments.len()];
        Some(CubicBezier::new(
            a.point,
            a.point + a.handle_out,
            b.point + b.handle_in,
            b.point,
        ))
    }

    /// All curve pieces in order
    pub fn curves(&self) -> Vec<CubicBezier> {
        (0..self.curve_count()).filter_map(|i| self.curve(i)).collect()
    }

    /// Length of every curve piece
    pub fn curve_lengths(&self) -> Vec<f64> {
        self.curves().iter().map(CubicBezier::length).collect()
    }

    /// Total arc length
    pub fn length(&self) -> f64 {
        self.curve_lengths().iter().sum()
    }

    /// Curve index and parameter at an arc-length offset (clamped)
    pub fn location_at(&self, offset: f64) -> Option<(usize, f64)> {
        let curves = self.curves();
        if curves.is_empty() {
            return None;
        }

        let mut remaining = offset.max(0.0);
        for (index, curve) in curves.iter().enumerate() {
            let len = curve.length();
            if remaining <= len || index + 1 == curves.len() {
                return Some((index, curve.t_at_length(remaining)));
            }
            remaining -= len;
        }
        None
    }

    /// Point at an arc-length offset
    pub fn point_at(&self, offset: f64) -> Option<DVec2> {
        match self.location_at(offset) {
            Some((index, t)) => self.curve(index).map(|c| c.evaluate(t)),
            None => self.first_point(),
        }
    }

    /// Closest point on the path to `point`
    pub fn nearest_location(&self, point: DVec2) -> Option<PathLocation> {
        let mut best: Option<PathLocation> = None;
        let mut walked = 0.0;
        for (index, curve) in self.curves().iter().enumerate() {
            let t = curve.project(point);
            let on_curve = curve.evaluate(t);
            let distance = on_curve.distance(point);
            if best.is_none_or(|b| distance < b.distance) {
                best = Some(PathLocation {
                    curve: index,
                    t,
                    offset: walked + curve.length_to(t),
                    point: on_curve,
                    distance,
                });
            }
            walked += curve.length();
        }

        if best.is_none() {
            return self.first_point().map(|p| PathLocation {
                curve: 0,
                t: 0.0,
                offset: 0.0,
                point: p,
                distance: p.distance(point),
            });
        }
        best
    }

    /// Arc-length offset of the point on the path closest to `point`
    pub fn offset_of(&self, point: DVec2) -> f64 {
        self.nearest_location(point).map_or(0.0, |loc| loc.offset)
    }

    /// Distance from `point` to the path
    pub fn distance_to(&self, point: DVec2) -> f64 {
        self.nearest_location(point)
            .map_or(f64::INFINITY, |loc| loc.distance)
    }

    /// Whether the stroke passes within `tolerance` of `point`
    pub fn hit_test(&self, point: DVec2, tolerance: f64) -> bool {
        self.distance_to(point) <= tolerance
    }

    /// The path as a kurbo Bézier path
    ///
    /// Straight pieces become `LineTo`, so flattening leaves them untouched.
    pub fn to_bez_path(&self) -> BezPath {
        let mut bez = BezPath::new();
        let Some(first) = self.first_point() else {
            return bez;
        };
        bez.move_to(to_kurbo(first));
        for curve in self.curves() {
            if curve.is_linear() {
                bez.line_to(to_kurbo(curve.end));
            } else {
                bez.curve_to(
                    to_kurbo(curve.handle_start),
                    to_kurbo(curve.handle_end),
                    to_kurbo(curve.end),
                );
            }
        }
        if self.closed {
            bez.close_path();
        }
        bez
    }

    /// Polyline approximation, closing vertex not repeated
    pub fn flatten(&self) -> Vec<DVec2> {
        let mut points = Vec::new();
        let bez = self.to_bez_path();
        kurbo::flatten(bez.elements().iter().copied(), FLATTEN_TOLERANCE, |el| match el {
            PathEl::MoveTo(p) | PathEl::LineTo(p) => points.push(from_kurbo(p)),
            _ => {}
        });
        if self.closed
            && points.len() > 1
            && let (Some(&first), Some(&last)) = (points.first(), points.last())
            && points_equal(first, last)
        {
            points.pop();
        }
        points
    }

    /// Nonzero-winding containment test; open paths contain nothing
    pub fn contains(&self, point: DVec2) -> bool {
        if !self.closed || self.curve_count() < 2 {
            return false;
        }
        self.to_bez_path().contains(to_kurbo(point))
    }

    /// Tight bounding box of the drawn geometry
    pub fn bounds(&self) -> Option<Bounds> {
        if self.curve_count() == 0 {
            return self.first_point().map(|p| Bounds::new(p, p));
        }
        let rect = self.to_bez_path().bounding_box();
        Some(Bounds::new(
            DVec2::new(rect.x0, rect.y0),
            DVec2::new(rect.x1, rect.y1),
        ))
    }

    /// Every point where this path crosses `other`
    pub fn intersections(&self, other: &Path) -> Vec<DVec2> {
        let mut points: Vec<DVec2> = Vec::new();
        let other_curves = other.curves();
        for curve in self.curves() {
            for other_curve in &other_curves {
                if !curve.bounds().expand(1e-9).overlaps(&other_curve.bounds()) {
                    continue;
                }
                for [t, _] in curve.intersections(other_curve) {
                    let p = curve.evaluate(t);
                    // Crossings at a shared vertex show up on both adjoining pieces
                    if !points.iter().any(|q| q.distance(p) < 1e-6) {
                        points.push(p);
                    }
                }
            }
        }
        points
    }

    /// Points at `count` equal arc-length steps, both ends included
    pub fn sample(&self, count: usize) -> Vec<DVec2> {
        if count < 2 {
            return self.point_at(0.0).into_iter().collect();
        }
        let length = self.length();
        (0..count)
            .filter_map(|i| self.point_at(length * i as f64 / (count - 1) as f64))
            .collect()
    }

    /// Open copy of the stretch between two offsets, `from < to`
    ///
    /// Pieces are cut with exact Bézier subsegments. The copy keeps style and
    /// visibility and is untyped.
    pub fn sub_path(&self, from: f64, to: f64) -> Option<Path> {
        let length = self.length();
        let from = from.clamp(0.0, length);
        let to = to.clamp(0.0, length);
        if to - from <= POINT_EPSILON {
            return None;
        }

        let (start_curve, start_t) = self.location_at(from)?;
        let (end_curve, end_t) = self.location_at(to)?;
        let curves = self.curves();

        let mut pieces = Vec::new();
        if start_curve == end_curve {
            pieces.push(curves[start_curve].trim(start_t, end_t));
        } else {
            pieces.push(curves[start_curve].trim(start_t, 1.0));
            pieces.extend(curves[start_curve + 1..end_curve].iter().copied());
            pieces.push(curves[end_curve].trim(0.0, end_t));
        }
        pieces.retain(|c| c.start.distance(c.end) > POINT_EPSILON || !c.is_linear());
        if pieces.is_empty() {
            return None;
        }

        Some(self.derived(segments_from_curves(&pieces), false))
    }

    /// Open copy running from `from` past the closing vertex to `to`
    pub fn wrapped_sub_path(&self, from: f64, to: f64) -> Option<Path> {
        if !self.closed || from <= to {
            return self.sub_path(from, to);
        }
        let length = self.length();
        let head = self.sub_path(from, length);
        let tail = self.sub_path(0.0, to);
        match (head, tail) {
            (Some(mut head), Some(tail)) => {
                head.append(&tail);
                Some(head)
            }
            (head, tail) => head.or(tail),
        }
    }

    /// Append another path's segments, merging the joint vertex
    pub fn append(&mut self, other: &Path) {
        let mut incoming = other.segments.iter();
        if let (Some(last), Some(first)) = (self.segments.last_mut(), other.segments.first())
            && points_equal(last.point, first.point)
        {
            last.handle_out = first.handle_out;
            incoming.next();
        }
        self.segments.extend(incoming);
    }

    /// Split an open path into the stretches before and after `offset`
    pub fn split_at(&self, offset: f64) -> Option<(Path, Path)> {
        if self.closed {
            return None;
        }
        let length = self.length();
        Some((self.sub_path(0.0, offset)?, self.sub_path(offset, length)?))
    }

    /// New untyped path sharing this path's appearance
    pub fn derived(&self, segments: Vec<Segment>, closed: bool) -> Path {
        Path {
            segments,
            closed,
            kind: PathKind::Untyped,
            style: self.style,
            visible: self.visible,
            temporary: self.temporary,
        }
    }
}

/// Direction of increasing angle on a circle at `degrees`
fn tangent_at(degrees: f64) -> DVec2 {
    let rad = degrees.to_radians();
    DVec2::new(-rad.sin(), rad.cos())
}

/// Cubic approximation of an arc, at most 90 degrees per piece
///
/// `sweep` may be negative to walk towards decreasing angles.
pub fn arc_segments(center: DVec2, radius: f64, from: f64, sweep: f64) -> Vec<Segment> {
    let pieces = ((sweep.abs() / 90.0).ceil() as usize).max(1);
    let step = sweep / pieces as f64;
    let k = 4.0 / 3.0 * (step.to_radians() / 4.0).tan() * radius;

    (0..=pieces)
        .map(|i| {
            let angle = from + step * i as f64;
            let tangent = tangent_at(angle) * k;
            let handle_in = if i == 0 { DVec2::ZERO } else { -tangent };
            let handle_out = if i == pieces { DVec2::ZERO } else { tangent };
            Segment::with_handles(point_on_circle(center, radius, angle), handle_in, handle_out)
        })
        .collect()
}

/// Rebuild a segment chain from consecutive curve pieces
pub fn segments_from_curves(curves: &[CubicBezier]) -> Vec<Segment> {
    let Some(first) = curves.first() else {
        return Vec::new();
    };

    let mut segments = vec![Segment::with_handles(
        first.start,
        DVec2::ZERO,
        first.handle_start - first.start,
    )];
    for (index, curve) in curves.iter().enumerate() {
        let handle_out = curves
            .get(index + 1)
            .map_or(DVec2::ZERO, |next| next.handle_start - next.start);
        segments.push(Segment::with_handles(
            curve.end,
            curve.handle_end - curve.end,
            handle_out,
        ));
    }
    segments
}

/// Arc on the circle around `center` that starts at `from` and runs `sweep` degrees
pub fn arc_between(center: DVec2, radius: f64, from: DVec2, sweep: f64) -> ArcGeometry {
    ArcGeometry::from_sweep(center, radius, angle_degrees(center, from), sweep)
}
