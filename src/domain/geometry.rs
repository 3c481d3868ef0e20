use super::models::Point;

/// Vertex merge tolerance, per axis, in scaled map units.
pub const NEAR_POINT_EPSILON: f64 = 1.0;

/// Tolerance used when splicing a query point into the hallway it lies on.
pub const SEGMENT_SPLIT_TOLERANCE: f64 = 3.0;

pub fn distance(a: Point, b: Point) -> f64 {
    ((a.x - b.x).powi(2) + (a.y - b.y).powi(2)).sqrt()
}

/// Two points closer than [`NEAR_POINT_EPSILON`] on both axes are the same vertex.
pub fn is_near(a: Point, b: Point) -> bool {
    (a.x - b.x).abs() < NEAR_POINT_EPSILON && (a.y - b.y).abs() < NEAR_POINT_EPSILON
}

/// Collinearity test within `tolerance`, gated by the segment's bounding box
/// grown by `tolerance`.
///
/// This is not a strict "projects between the endpoints" check: points that
/// are collinear but slightly past an endpoint still pass if they fall inside
/// the grown box. Route topology depends on this exact behavior.
pub fn is_on_segment(seg_start: Point, seg_end: Point, point: Point, tolerance: f64) -> bool {
    let min_x = seg_start.x.min(seg_end.x) - tolerance;
    let max_x = seg_start.x.max(seg_end.x) + tolerance;
    let min_y = seg_start.y.min(seg_end.y) - tolerance;
    let max_y = seg_start.y.max(seg_end.y) + tolerance;

    if point.x < min_x || point.x > max_x || point.y < min_y || point.y > max_y {
        return false;
    }

    let cross = (point.y - seg_start.y) * (seg_end.x - seg_start.x)
        - (point.x - seg_start.x) * (seg_end.y - seg_start.y);

    cross.abs() < tolerance * distance(seg_start, seg_end)
}

/// Projection of `point` onto the segment, clamped to its endpoints.
pub fn nearest_point_on_segment(point: Point, seg_start: Point, seg_end: Point) -> Point {
    let (dx, dy) = (seg_end.x - seg_start.x, seg_end.y - seg_start.y);
    let len = (dx * dx + dy * dy).sqrt();
    if len <= 0.0 {
        return seg_start;
    }
    let (ux, uy) = (dx / len, dy / len);
    let projected = ux * (point.x - seg_start.x) + uy * (point.y - seg_start.y);
    let t = projected.clamp(0.0, len);
    Point::new(seg_start.x + ux * t, seg_start.y + uy * t)
}
