//! Policy B: area-bounded greedy block growth.

use geo::{Area, MultiPolygon, BooleanOps};
use tracing::warn;

use crate::barrier::Barrier;
use crate::config::Config;
use crate::footprint::Footprint;
use crate::geometry::{distance_to_union, union_centroid};

use super::{dominant_kind, weighted_height, Block, BlockOutline};

/// A growing union of small footprints, finalized into one block.
struct Cluster {
    union: MultiPolygon<f64>,
    members: Vec<usize>,
}

impl Cluster {
    fn seed(index: usize, footprint: &Footprint) -> Self {
        Self {
            union: MultiPolygon::new(vec![footprint.polygon().clone()]),
            members: vec![index],
        }
    }

    fn absorb(&mut self, index: usize, footprint: &Footprint) {
        let addition = MultiPolygon::new(vec![footprint.polygon().clone()]);
        self.union = self.union.union(&addition);
        self.members.push(index);
    }

    fn union_area(&self) -> f64 {
        self.union.unsigned_area()
    }
}

/// Grows blocks by greedy absorption until the area threshold is hit.
///
/// Footprints at or above the threshold pass through untouched. Each
/// absorption rescans the full candidate list, which is quadratic in the
/// candidate count; a spatial index would change the merge order (and
/// with it the visual output), so the scan is kept as-is. Typical
/// city-block inputs are small enough for this not to matter.
#[must_use]
pub fn grow_blocks(footprints: &[Footprint], barrier: &Barrier, config: &Config) -> Vec<Block> {
    let mut blocks = Vec::new();
    let mut visited = vec![false; footprints.len()];

    for (index, footprint) in footprints.iter().enumerate() {
        if footprint.area() >= config.block_area_threshold {
            visited[index] = true;
            blocks.push(Block::passthrough(index, footprint));
        }
    }

    for start in 0..footprints.len() {
        if visited[start] {
            continue;
        }
        visited[start] = true;
        let mut cluster = Cluster::seed(start, &footprints[start]);

        // Every iteration either absorbs a footprint (finite supply) or
        // stops, so the loop is bounded by the input count.
        while cluster.union_area() < config.block_area_threshold {
            let Some(candidate) = next_candidate(&cluster, footprints, &visited, barrier, config)
            else {
                break;
            };
            visited[candidate] = true;
            cluster.absorb(candidate, &footprints[candidate]);
        }

        let members = cluster.members.clone();
        let Some(outline) =
            BlockOutline::from_union(cluster.union).into_simple(config.merge_distance)
        else {
            warn!(?members, "cluster union vanished during normalization");
            continue;
        };
        blocks.push(Block {
            outline,
            height: weighted_height(&members, footprints),
            kind: dominant_kind(&members, footprints),
            is_cluster: members.len() >= 2,
            members,
        });
    }
    blocks
}

/// First unvisited small footprint close enough to the cluster union and
/// not cut off by the barrier.
fn next_candidate(
    cluster: &Cluster,
    footprints: &[Footprint],
    visited: &[bool],
    barrier: &Barrier,
    config: &Config,
) -> Option<usize> {
    let center = union_centroid(&cluster.union)?;
    footprints.iter().enumerate().find_map(|(index, footprint)| {
        (!visited[index]
            && distance_to_union(footprint.polygon(), &cluster.union) < config.merge_distance
            && !barrier.blocks(center, footprint.centroid()))
        .then_some(index)
    })
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use geo::{polygon, LineString, Polygon};

    use crate::barrier::BarrierBuilder;
    use crate::config::VisualStyle;
    use crate::footprint::ZoneKind;
    use crate::geometry::repair::{is_self_intersecting, open_ring};

    fn rect(x0: f64, y0: f64, w: f64, h: f64) -> Polygon<f64> {
        polygon![
            (x: x0, y: y0),
            (x: x0 + w, y: y0),
            (x: x0 + w, y: y0 + h),
            (x: x0, y: y0 + h),
        ]
    }

    fn footprint(polygon: &Polygon<f64>, height: f64) -> Footprint {
        Footprint::new(polygon, height, ZoneKind::Residential).unwrap()
    }

    fn block_combine_config() -> Config {
        Config {
            style: VisualStyle::BlockCombine,
            merge_distance: 2.0,
            block_area_threshold: 200.0,
            ..Config::default()
        }
    }

    #[test]
    fn large_footprints_pass_through_untouched() {
        let footprints = vec![footprint(&rect(0.0, 0.0, 20.0, 20.0), 12.0)];
        let blocks = grow_blocks(&footprints, &Barrier::none(), &block_combine_config());
        assert_eq!(blocks.len(), 1);
        assert!(!blocks[0].is_cluster);
        assert_eq!(blocks[0].members, vec![0]);
    }

    #[test]
    fn small_neighbors_grow_into_one_block() {
        // Four 8x8 squares in a row, 1 unit apart: 256 m2 total > 200.
        let footprints: Vec<Footprint> = (0..4)
            .map(|i| footprint(&rect(f64::from(i) * 9.0, 0.0, 8.0, 8.0), 10.0))
            .collect();
        let blocks = grow_blocks(&footprints, &Barrier::none(), &block_combine_config());
        assert_eq!(blocks.len(), 1);
        assert!(blocks[0].is_cluster);
        assert_eq!(blocks[0].members.len(), 4);
        assert!(blocks[0].outline.interiors().is_empty());
        assert!(!is_self_intersecting(&open_ring(blocks[0].outline.exterior())));
    }

    #[test]
    fn growth_stops_at_the_area_threshold() {
        // A long row of small squares; growth should stop once the union
        // area crosses the threshold instead of absorbing the whole row.
        let footprints: Vec<Footprint> = (0..12)
            .map(|i| footprint(&rect(f64::from(i) * 7.0, 0.0, 6.0, 6.0), 10.0))
            .collect();
        let config = Config {
            block_area_threshold: 100.0,
            ..block_combine_config()
        };
        let blocks = grow_blocks(&footprints, &Barrier::none(), &config);
        assert!(blocks.len() > 1);
        let covered: usize = blocks.iter().map(|block| block.members.len()).sum();
        assert_eq!(covered, 12);
    }

    #[test]
    fn union_area_grows_monotonically() {
        let footprints: Vec<Footprint> = (0..5)
            .map(|i| footprint(&rect(f64::from(i) * 5.0, 0.0, 4.0, 4.0), 10.0))
            .collect();
        let mut cluster = Cluster::seed(0, &footprints[0]);
        let mut last_area = cluster.union_area();
        for (index, footprint) in footprints.iter().enumerate().skip(1) {
            cluster.absorb(index, footprint);
            let area = cluster.union_area();
            assert!(area >= last_area);
            last_area = area;
        }
    }

    #[test]
    fn barrier_blocks_absorption_across_a_road() {
        let left_a = footprint(&rect(0.0, 0.0, 6.0, 6.0), 10.0);
        let left_b = footprint(&rect(6.5, 0.0, 6.0, 6.0), 10.0);
        let right = footprint(&rect(16.0, 0.0, 6.0, 6.0), 10.0);
        let road = LineString::from(vec![(14.5, -50.0), (14.5, 50.0)]);
        let barrier = BarrierBuilder::new(1.0, 1.0).roads(vec![road]).build();

        let config = Config {
            merge_distance: 5.0,
            ..block_combine_config()
        };
        let blocks = grow_blocks(&[left_a, left_b, right], &barrier, &config);
        // The road keeps the right footprint out of the left cluster.
        assert_eq!(blocks.len(), 2);
        let cluster = blocks.iter().find(|block| block.is_cluster).unwrap();
        assert_eq!(cluster.members, vec![0, 1]);
    }

    #[test]
    fn empty_input_yields_no_blocks() {
        let blocks = grow_blocks(&[], &Barrier::none(), &block_combine_config());
        assert!(blocks.is_empty());
    }
}
