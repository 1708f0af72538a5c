//! Pure planar geometry for joint-angle computation.
//!
//! The central primitive is [`angle_at_vertex`], which every joint
//! measurement in the pipeline reduces to. It is deterministic, allocation
//! free, and has no side effects.

use crate::types::Point2D;

/// Squared ray length below which the angle is treated as undefined.
const DEGENERATE_SQ: f32 = f32::EPSILON;

/// Interior angle at vertex `b`, in degrees, between ray `b -> a` and ray
/// `b -> c`.
///
/// Computed as `|atan2(cross, dot)|` of the two rays. `atan2` returns a
/// value in `(-180, 180]` degrees, so the absolute value already lies in
/// `[0, 180]` and no further wrap-around correction exists.
///
/// Returns `None` when either ray has (near-)zero length: the angle is
/// mathematically undefined there, and callers propagate the absence
/// instead of seeing `NaN` or a fabricated `0`.
#[must_use]
pub fn angle_at_vertex(a: Point2D, b: Point2D, c: Point2D) -> Option<f32> {
    let ab = (a.x - b.x, a.y - b.y);
    let cb = (c.x - b.x, c.y - b.y);

    let ab_sq = ab.0 * ab.0 + ab.1 * ab.1;
    let cb_sq = cb.0 * cb.0 + cb.1 * cb.1;
    if ab_sq < DEGENERATE_SQ || cb_sq < DEGENERATE_SQ {
        return None;
    }

    let dot = ab.0 * cb.0 + ab.1 * cb.1;
    let cross = ab.0 * cb.1 - ab.1 * cb.0;
    Some(cross.atan2(dot).abs().to_degrees())
}

/// Midpoint of two points.
#[must_use]
pub fn midpoint(a: Point2D, b: Point2D) -> Point2D {
    Point2D::new((a.x + b.x) / 2.0, (a.y + b.y) / 2.0)
}
