//! Footprint consolidation: grouping nearby footprints into blocks.

pub mod distance;
pub mod growth;
pub mod hull;
pub mod outline;

use geo::Polygon;

use crate::barrier::Barrier;
use crate::config::{Config, VisualStyle};
use crate::footprint::{Footprint, ZoneKind};

pub use outline::BlockOutline;

/// A consolidated building block, finalized from one cluster.
///
/// `members` holds the indices of the absorbed footprints, so callers
/// can verify that consolidation partitions the input exactly.
#[derive(Clone, Debug)]
pub struct Block {
    /// Final outline: always a single simple ring without holes.
    pub outline: Polygon<f64>,
    /// Area-weighted mean height of the members.
    pub height: f64,
    /// Zoning of the area-dominant member.
    pub kind: ZoneKind,
    /// True iff the block absorbed two or more footprints.
    pub is_cluster: bool,
    /// Input indices of the member footprints.
    pub members: Vec<usize>,
}

impl Block {
    /// A single unmerged footprint passing through unchanged.
    #[must_use]
    pub fn passthrough(index: usize, footprint: &Footprint) -> Self {
        Self {
            outline: footprint.polygon().clone(),
            height: footprint.height(),
            kind: footprint.kind(),
            is_cluster: false,
            members: vec![index],
        }
    }
}

/// Groups footprints into blocks under the policy selected by the
/// visual style: `BlockCombine` grows clusters up to an area bound,
/// every other style clusters by centroid distance.
#[must_use]
pub fn consolidate(footprints: &[Footprint], barrier: &Barrier, config: &Config) -> Vec<Block> {
    if footprints.is_empty() {
        return Vec::new();
    }
    match config.style {
        VisualStyle::BlockCombine => growth::grow_blocks(footprints, barrier, config),
        _ => distance::cluster_blocks(footprints, barrier, config),
    }
}

/// Area-weighted mean height over a member set.
#[must_use]
pub(crate) fn weighted_height(members: &[usize], footprints: &[Footprint]) -> f64 {
    let mut weighted = 0.0;
    let mut total_area = 0.0;
    for &index in members {
        let footprint = &footprints[index];
        weighted += footprint.height() * footprint.area();
        total_area += footprint.area();
    }
    if total_area > 0.0 {
        weighted / total_area
    } else {
        0.0
    }
}

/// Zoning of the member with the largest footprint area.
#[must_use]
pub(crate) fn dominant_kind(members: &[usize], footprints: &[Footprint]) -> ZoneKind {
    members
        .iter()
        .max_by(|&&a, &&b| footprints[a].area().total_cmp(&footprints[b].area()))
        .map_or(ZoneKind::Unspecified, |&index| footprints[index].kind())
}
