pub mod buffer;
pub mod repair;

use geo::{Area, Centroid, EuclideanDistance, MultiPolygon, Point, Polygon};

/// Returns the largest part of a multi-polygon by area, if any.
#[must_use]
pub fn largest_part(union: &MultiPolygon<f64>) -> Option<&Polygon<f64>> {
    union
        .0
        .iter()
        .max_by(|a, b| a.unsigned_area().total_cmp(&b.unsigned_area()))
}

/// Minimum half-width of a polygon, measured from its centroid to the
/// exterior ring. Used to bound inward offsets so a profile can never
/// collapse to zero area.
#[must_use]
pub fn min_half_width(polygon: &Polygon<f64>) -> f64 {
    match polygon.centroid() {
        Some(center) => center.euclidean_distance(polygon.exterior()),
        None => 0.0,
    }
}

/// Shortest distance between a polygon and any part of a union.
#[must_use]
pub fn distance_to_union(polygon: &Polygon<f64>, union: &MultiPolygon<f64>) -> f64 {
    union
        .0
        .iter()
        .map(|part| polygon.euclidean_distance(part))
        .fold(f64::INFINITY, f64::min)
}

/// Centroid of a union, falling back to the centroid of its largest part.
#[must_use]
pub fn union_centroid(union: &MultiPolygon<f64>) -> Option<Point<f64>> {
    union
        .centroid()
        .or_else(|| largest_part(union).and_then(Centroid::centroid))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use geo::{polygon, MultiPolygon};

    fn unit_square_at(x: f64, y: f64) -> Polygon<f64> {
        polygon![
            (x: x, y: y),
            (x: x + 1.0, y: y),
            (x: x + 1.0, y: y + 1.0),
            (x: x, y: y + 1.0),
        ]
    }

    #[test]
    fn largest_part_prefers_bigger_area() {
        let small = unit_square_at(0.0, 0.0);
        let big = polygon![
            (x: 10.0, y: 0.0),
            (x: 14.0, y: 0.0),
            (x: 14.0, y: 4.0),
            (x: 10.0, y: 4.0),
        ];
        let union = MultiPolygon::new(vec![small, big.clone()]);
        let largest = largest_part(&union).unwrap();
        assert_relative_eq!(largest.unsigned_area(), big.unsigned_area());
    }

    #[test]
    fn min_half_width_of_square() {
        let square = polygon![
            (x: 0.0, y: 0.0),
            (x: 4.0, y: 0.0),
            (x: 4.0, y: 4.0),
            (x: 0.0, y: 4.0),
        ];
        assert_relative_eq!(min_half_width(&square), 2.0, epsilon = 1e-9);
    }

    #[test]
    fn distance_to_union_takes_nearest_part() {
        let probe = unit_square_at(0.0, 0.0);
        let union = MultiPolygon::new(vec![unit_square_at(3.0, 0.0), unit_square_at(9.0, 0.0)]);
        assert_relative_eq!(distance_to_union(&probe, &union), 2.0, epsilon = 1e-9);
    }

    #[test]
    fn distance_to_empty_union_is_infinite() {
        let probe = unit_square_at(0.0, 0.0);
        assert!(distance_to_union(&probe, &MultiPolygon::new(vec![])).is_infinite());
    }
}
