//! Corridor buffering built from boolean primitives.
//!
//! The geometry dependency provides no line buffer, so corridors are
//! assembled from one oriented quad per segment (square caps) and merged
//! with boolean unions. Ring corridors double as the morphological
//! grow/shrink used to close small gaps in merged footprints.

use geo::{BooleanOps, Coord, LineString, MultiPolygon, Polygon};

use crate::math::TOLERANCE;

/// Buffers a polyline into a corridor of the given radius.
///
/// Each segment contributes a quad extended by `radius` past both ends;
/// the quads are unioned into one (possibly multi-part) corridor.
/// Degenerate input (fewer than 2 distinct points) yields an empty
/// corridor.
#[must_use]
pub fn buffer_line(line: &LineString<f64>, radius: f64) -> MultiPolygon<f64> {
    let mut corridor: Option<MultiPolygon<f64>> = None;
    for segment in line.lines() {
        let Some(quad) = segment_quad(segment.start, segment.end, radius) else {
            continue;
        };
        let quad = MultiPolygon::new(vec![quad]);
        corridor = Some(match corridor {
            None => quad,
            Some(acc) => acc.union(&quad),
        });
    }
    corridor.unwrap_or_else(|| MultiPolygon::new(vec![]))
}

/// Grows a union outward by `distance` along every exterior ring.
#[must_use]
pub fn inflate(union: &MultiPolygon<f64>, distance: f64) -> MultiPolygon<f64> {
    let mut grown = union.clone();
    for polygon in &union.0 {
        let corridor = buffer_line(polygon.exterior(), distance);
        if !corridor.0.is_empty() {
            grown = grown.union(&corridor);
        }
    }
    grown
}

/// Shrinks a union inward by `distance` along every exterior ring.
#[must_use]
pub fn deflate(union: &MultiPolygon<f64>, distance: f64) -> MultiPolygon<f64> {
    let mut shrunk = union.clone();
    for polygon in &union.0 {
        let corridor = buffer_line(polygon.exterior(), distance);
        if !corridor.0.is_empty() {
            shrunk = shrunk.difference(&corridor);
        }
    }
    shrunk
}

/// Closes gaps narrower than `2 * distance` by growing then shrinking.
#[must_use]
pub fn close_gaps(union: &MultiPolygon<f64>, distance: f64) -> MultiPolygon<f64> {
    let grown = inflate(union, distance);
    deflate(&grown, distance)
}

fn segment_quad(a: Coord<f64>, b: Coord<f64>, radius: f64) -> Option<Polygon<f64>> {
    let dx = b.x - a.x;
    let dy = b.y - a.y;
    let length = dx.hypot(dy);
    if length < TOLERANCE || radius < TOLERANCE {
        return None;
    }
    let (ux, uy) = (dx / length, dy / length);
    let (nx, ny) = (-uy, ux);
    // Square caps: extend both ends by the radius.
    let (ax, ay) = (a.x - ux * radius, a.y - uy * radius);
    let (bx, by) = (b.x + ux * radius, b.y + uy * radius);
    Some(Polygon::new(
        LineString::from(vec![
            (ax + nx * radius, ay + ny * radius),
            (bx + nx * radius, by + ny * radius),
            (bx - nx * radius, by - ny * radius),
            (ax - nx * radius, ay - ny * radius),
        ]),
        vec![],
    ))
}
