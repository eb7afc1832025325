//! One-shot validity repair for input rings.
//!
//! Upstream data is allowed to carry duplicate vertices or crossing
//! edges. Repair is attempted exactly once per footprint: duplicates are
//! collapsed, a self-intersecting ring falls back to its convex hull, and
//! anything still degenerate afterwards is rejected.

use geo::{Area, ConvexHull, Coord, LineString, Polygon};

use crate::math::{AREA_TOLERANCE, TOLERANCE};

/// Returns the exterior ring as an open coordinate cycle with
/// consecutive duplicates collapsed.
#[must_use]
pub fn open_ring(ring: &LineString<f64>) -> Vec<Coord<f64>> {
    let mut coords: Vec<Coord<f64>> = Vec::with_capacity(ring.0.len());
    for &coord in &ring.0 {
        if let Some(last) = coords.last() {
            if (coord.x - last.x).abs() < TOLERANCE && (coord.y - last.y).abs() < TOLERANCE {
                continue;
            }
        }
        coords.push(coord);
    }
    // Drop the closing duplicate if present.
    if coords.len() > 1 {
        let (first, last) = (coords[0], coords[coords.len() - 1]);
        if (first.x - last.x).abs() < TOLERANCE && (first.y - last.y).abs() < TOLERANCE {
            coords.pop();
        }
    }
    coords
}

/// Checks an open ring for properly crossing edges, skipping adjacent
/// pairs (shared endpoints are not crossings).
#[must_use]
pub fn is_self_intersecting(coords: &[Coord<f64>]) -> bool {
    let n = coords.len();
    if n < 4 {
        return false;
    }
    for i in 0..n {
        let a1 = coords[i];
        let a2 = coords[(i + 1) % n];
        for j in (i + 2)..n {
            if j == (i + n - 1) % n {
                continue;
            }
            let b1 = coords[j];
            let b2 = coords[(j + 1) % n];
            if segments_cross(a1, a2, b1, b2) {
                return true;
            }
        }
    }
    false
}

/// Attempts to turn an arbitrary polygon into a single simple ring.
///
/// Interior rings are discarded; a self-intersecting exterior is replaced
/// by its convex hull. Returns `None` when the result has fewer than 3
/// vertices or no measurable area.
#[must_use]
pub fn repair_ring(polygon: &Polygon<f64>) -> Option<Polygon<f64>> {
    let coords = open_ring(polygon.exterior());
    if coords.len() < 3 {
        return None;
    }
    let candidate = Polygon::new(LineString::from(coords.clone()), vec![]);
    let repaired = if is_self_intersecting(&coords) {
        candidate.convex_hull()
    } else {
        candidate
    };
    (repaired.unsigned_area() > AREA_TOLERANCE).then_some(repaired)
}

fn segments_cross(a1: Coord<f64>, a2: Coord<f64>, b1: Coord<f64>, b2: Coord<f64>) -> bool {
    let d1 = cross_sign(b1, b2, a1);
    let d2 = cross_sign(b1, b2, a2);
    let d3 = cross_sign(a1, a2, b1);
    let d4 = cross_sign(a1, a2, b2);
    ((d1 > 0.0 && d2 < 0.0) || (d1 < 0.0 && d2 > 0.0))
        && ((d3 > 0.0 && d4 < 0.0) || (d3 < 0.0 && d4 > 0.0))
}

fn cross_sign(a: Coord<f64>, b: Coord<f64>, c: Coord<f64>) -> f64 {
    (b.x - a.x) * (c.y - a.y) - (b.y - a.y) * (c.x - a.x)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use geo::polygon;

    #[test]
    fn clean_square_passes_through() {
        let square = polygon![
            (x: 0.0, y: 0.0),
            (x: 2.0, y: 0.0),
            (x: 2.0, y: 2.0),
            (x: 0.0, y: 2.0),
        ];
        let repaired = repair_ring(&square).unwrap();
        assert_relative_eq!(repaired.unsigned_area(), 4.0, epsilon = 1e-9);
    }

    #[test]
    fn duplicate_vertices_are_collapsed() {
        let ring = LineString::from(vec![
            (0.0, 0.0),
            (0.0, 0.0),
            (2.0, 0.0),
            (2.0, 2.0),
            (2.0, 2.0),
            (0.0, 2.0),
            (0.0, 0.0),
        ]);
        let coords = open_ring(&ring);
        assert_eq!(coords.len(), 4);
    }

    #[test]
    fn bowtie_falls_back_to_convex_hull() {
        // Edges (0,0)-(2,2) and (2,0)-(0,2) cross at the center.
        let bowtie = polygon![
            (x: 0.0, y: 0.0),
            (x: 2.0, y: 2.0),
            (x: 2.0, y: 0.0),
            (x: 0.0, y: 2.0),
        ];
        assert!(is_self_intersecting(&open_ring(bowtie.exterior())));
        let repaired = repair_ring(&bowtie).unwrap();
        assert!(!is_self_intersecting(&open_ring(repaired.exterior())));
        assert_relative_eq!(repaired.unsigned_area(), 4.0, epsilon = 1e-9);
    }

    #[test]
    fn interior_rings_are_discarded() {
        let outer = LineString::from(vec![(0.0, 0.0), (10.0, 0.0), (10.0, 10.0), (0.0, 10.0)]);
        let hole = LineString::from(vec![(4.0, 4.0), (6.0, 4.0), (6.0, 6.0), (4.0, 6.0)]);
        let repaired = repair_ring(&Polygon::new(outer, vec![hole])).unwrap();
        assert!(repaired.interiors().is_empty());
        assert_relative_eq!(repaired.unsigned_area(), 100.0, epsilon = 1e-9);
    }

    #[test]
    fn degenerate_inputs_are_rejected() {
        let line = Polygon::new(LineString::from(vec![(0.0, 0.0), (5.0, 0.0)]), vec![]);
        assert!(repair_ring(&line).is_none());

        let sliver = Polygon::new(
            LineString::from(vec![(0.0, 0.0), (5.0, 0.0), (10.0, 0.0)]),
            vec![],
        );
        assert!(repair_ring(&sliver).is_none());
    }
}
