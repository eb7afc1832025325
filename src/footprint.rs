use geo::{Area, Centroid, Point, Polygon};
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::geometry::repair;

/// Zoning classification of a footprint, carried through to roof
/// selection.
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ZoneKind {
    Residential,
    Industrial,
    Commercial,
    #[default]
    Unspecified,
}

/// An immutable input building footprint.
///
/// Construction runs the one-shot validity repair; inputs that cannot be
/// repaired are dropped with a warning rather than failing the batch.
#[derive(Clone, Debug)]
pub struct Footprint {
    polygon: Polygon<f64>,
    height: f64,
    kind: ZoneKind,
    area: f64,
    centroid: Point<f64>,
}

impl Footprint {
    /// Builds a footprint from raw feature data.
    ///
    /// Returns `None` (after recording a warning) when the height is not
    /// a positive finite number, or when the outline cannot be repaired
    /// into a simple ring with measurable area.
    #[must_use]
    pub fn new(polygon: &Polygon<f64>, height: f64, kind: ZoneKind) -> Option<Self> {
        if !height.is_finite() || height <= 0.0 {
            warn!(height, "footprint dropped: height must be positive");
            return None;
        }
        let Some(polygon) = repair::repair_ring(polygon) else {
            warn!("footprint dropped: outline could not be repaired");
            return None;
        };
        let area = polygon.unsigned_area();
        let Some(centroid) = polygon.centroid() else {
            warn!(area, "footprint dropped: no centroid");
            return None;
        };
        Some(Self {
            polygon,
            height,
            kind,
            area,
            centroid,
        })
    }

    /// The repaired outline, a single simple ring without holes.
    #[must_use]
    pub fn polygon(&self) -> &Polygon<f64> {
        &self.polygon
    }

    /// Height in model units.
    #[must_use]
    pub fn height(&self) -> f64 {
        self.height
    }

    /// Zoning classification.
    #[must_use]
    pub fn kind(&self) -> ZoneKind {
        self.kind
    }

    /// Cached outline area.
    #[must_use]
    pub fn area(&self) -> f64 {
        self.area
    }

    /// Cached outline centroid.
    #[must_use]
    pub fn centroid(&self) -> Point<f64> {
        self.centroid
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use geo::{polygon, LineString};

    #[test]
    fn valid_footprint_caches_area_and_centroid() {
        let square = polygon![
            (x: 0.0, y: 0.0),
            (x: 4.0, y: 0.0),
            (x: 4.0, y: 4.0),
            (x: 0.0, y: 4.0),
        ];
        let footprint = Footprint::new(&square, 9.0, ZoneKind::Residential).unwrap();
        assert_relative_eq!(footprint.area(), 16.0, epsilon = 1e-9);
        assert_relative_eq!(footprint.centroid().x(), 2.0, epsilon = 1e-9);
        assert_relative_eq!(footprint.centroid().y(), 2.0, epsilon = 1e-9);
    }

    #[test]
    fn non_positive_height_is_dropped() {
        let square = polygon![
            (x: 0.0, y: 0.0),
            (x: 1.0, y: 0.0),
            (x: 1.0, y: 1.0),
            (x: 0.0, y: 1.0),
        ];
        assert!(Footprint::new(&square, 0.0, ZoneKind::Commercial).is_none());
        assert!(Footprint::new(&square, -3.0, ZoneKind::Commercial).is_none());
        assert!(Footprint::new(&square, f64::NAN, ZoneKind::Commercial).is_none());
    }

    #[test]
    fn zero_area_outline_is_dropped() {
        let sliver = Polygon::new(
            LineString::from(vec![(0.0, 0.0), (3.0, 0.0), (6.0, 0.0)]),
            vec![],
        );
        assert!(Footprint::new(&sliver, 5.0, ZoneKind::Industrial).is_none());
    }

    #[test]
    fn self_intersecting_outline_is_repaired() {
        let bowtie = polygon![
            (x: 0.0, y: 0.0),
            (x: 2.0, y: 2.0),
            (x: 2.0, y: 0.0),
            (x: 0.0, y: 2.0),
        ];
        let footprint = Footprint::new(&bowtie, 6.0, ZoneKind::Unspecified).unwrap();
        assert_relative_eq!(footprint.area(), 4.0, epsilon = 1e-9);
    }
}
