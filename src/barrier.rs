//! Obstruction geometry that merges must never bridge.

use geo::{BooleanOps, Intersects, Line, LineString, MultiPolygon, Point, Polygon};

use crate::geometry::buffer;

/// Unioned obstruction geometry built from roads, railways and water.
///
/// Built once per run and read-only afterwards: consolidation queries it
/// as a veto oracle and never mutates it.
#[derive(Clone, Debug, Default)]
pub struct Barrier {
    geometry: Option<MultiPolygon<f64>>,
}

impl Barrier {
    /// The "no barrier" sentinel: nothing is ever blocked.
    #[must_use]
    pub fn none() -> Self {
        Self { geometry: None }
    }

    /// True when no obstruction geometry was built.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.geometry.is_none()
    }

    /// The obstruction geometry, if any.
    #[must_use]
    pub fn geometry(&self) -> Option<&MultiPolygon<f64>> {
        self.geometry.as_ref()
    }

    /// Tests whether the straight segment between two points crosses the
    /// obstruction.
    #[must_use]
    pub fn blocks(&self, a: Point<f64>, b: Point<f64>) -> bool {
        match &self.geometry {
            None => false,
            Some(geometry) => Line::new(a.0, b.0).intersects(geometry),
        }
    }
}

/// Builds a [`Barrier`] from raw obstruction features.
///
/// Road and rail center-lines are buffered to corridors by their
/// configured radii; water polygons enter unbuffered. Malformed lines
/// (fewer than 2 points) are skipped without error, and an all-empty
/// input produces the "no barrier" sentinel.
#[derive(Clone, Debug)]
pub struct BarrierBuilder {
    road_buffer: f64,
    rail_buffer: f64,
    roads: Vec<LineString<f64>>,
    rails: Vec<LineString<f64>>,
    water: Vec<Polygon<f64>>,
}

impl BarrierBuilder {
    /// Creates a builder with the configured corridor radii.
    #[must_use]
    pub fn new(road_buffer: f64, rail_buffer: f64) -> Self {
        Self {
            road_buffer,
            rail_buffer,
            roads: Vec::new(),
            rails: Vec::new(),
            water: Vec::new(),
        }
    }

    /// Adds road center-lines.
    #[must_use]
    pub fn roads<I: IntoIterator<Item = LineString<f64>>>(mut self, roads: I) -> Self {
        self.roads.extend(roads);
        self
    }

    /// Adds railway center-lines.
    #[must_use]
    pub fn rails<I: IntoIterator<Item = LineString<f64>>>(mut self, rails: I) -> Self {
        self.rails.extend(rails);
        self
    }

    /// Adds water polygons.
    #[must_use]
    pub fn water<I: IntoIterator<Item = Polygon<f64>>>(mut self, water: I) -> Self {
        self.water.extend(water);
        self
    }

    /// Unions all buffered features into one obstruction geometry.
    #[must_use]
    pub fn build(self) -> Barrier {
        let mut union: Option<MultiPolygon<f64>> = None;

        for (lines, radius) in [(&self.roads, self.road_buffer), (&self.rails, self.rail_buffer)] {
            for line in lines {
                let corridor = buffer::buffer_line(line, radius);
                if !corridor.0.is_empty() {
                    union = Some(merge(union, corridor));
                }
            }
        }
        for polygon in self.water {
            union = Some(merge(union, MultiPolygon::new(vec![polygon])));
        }

        Barrier { geometry: union }
    }
}

fn merge(acc: Option<MultiPolygon<f64>>, next: MultiPolygon<f64>) -> MultiPolygon<f64> {
    match acc {
        None => next,
        Some(acc) => acc.union(&next),
    }
}
