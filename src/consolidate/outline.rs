//! Normalization of union geometry into a single simple ring.
//!
//! Boolean unions alternate between single and multi-part results as a
//! cluster grows. The tagged variants keep that distinction explicit,
//! with exactly one normalization point where a simple polygon is
//! required.

use geo::{ConvexHull, MultiPolygon, Polygon};
use tracing::warn;

use crate::geometry::{buffer, repair};

/// Union geometry of a cluster, tagged by part count.
#[derive(Clone, Debug)]
pub enum BlockOutline {
    /// A single polygon (possibly still holed or self-touching).
    Simple(Polygon<f64>),
    /// A multi-part union from near-touching but non-overlapping shapes.
    Multi(MultiPolygon<f64>),
}

impl BlockOutline {
    /// Tags a boolean-union result by its part count.
    #[must_use]
    pub fn from_union(union: MultiPolygon<f64>) -> Self {
        let mut parts = union.0;
        if parts.len() == 1 {
            match parts.pop() {
                Some(polygon) => Self::Simple(polygon),
                None => Self::Multi(MultiPolygon::new(parts)),
            }
        } else {
            Self::Multi(MultiPolygon::new(parts))
        }
    }

    /// Normalizes into a single simple ring.
    ///
    /// Multi-part unions are first repaired by growing and shrinking by
    /// `gap` to close small gaps; anything still multi-part falls back
    /// to the convex hull. The fallback trades outline fidelity for the
    /// guarantee that roof synthesis always receives a simple polygon.
    ///
    /// Returns `None` only when the geometry has no measurable area at
    /// all (an empty union).
    #[must_use]
    pub fn into_simple(self, gap: f64) -> Option<Polygon<f64>> {
        match self {
            Self::Simple(polygon) => repair::repair_ring(&polygon),
            Self::Multi(union) => {
                if union.0.is_empty() {
                    return None;
                }
                let closed = buffer::close_gaps(&union, gap);
                if closed.0.len() == 1 {
                    if let Some(simple) = repair::repair_ring(&closed.0[0]) {
                        return Some(simple);
                    }
                }
                warn!(
                    parts = closed.0.len(),
                    "union still not simple after gap repair; using convex hull"
                );
                repair::repair_ring(&union.convex_hull())
            }
        }
    }
}
