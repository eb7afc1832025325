//! Policy A: distance-bounded graph clustering.

use geo::{Coord, EuclideanDistance, LineString, MultiPoint, Point, Polygon};
use geo::ConvexHull;
use tracing::warn;

use crate::barrier::Barrier;
use crate::config::Config;
use crate::footprint::Footprint;
use crate::geometry::repair;

use super::{dominant_kind, hull, weighted_height, Block};

/// Clusters footprints whose centroids lie within the merge distance and
/// are not separated by the barrier, then finalizes each connected
/// component into a block.
///
/// Component discovery is a plain depth-first traversal; visit order
/// does not affect the resulting partition.
#[must_use]
pub fn cluster_blocks(footprints: &[Footprint], barrier: &Barrier, config: &Config) -> Vec<Block> {
    let adjacency = build_adjacency(footprints, barrier, config.merge_distance);

    let mut seen = vec![false; footprints.len()];
    let mut blocks = Vec::new();
    for start in 0..footprints.len() {
        if seen[start] {
            continue;
        }
        let mut component = Vec::new();
        let mut stack = vec![start];
        seen[start] = true;
        while let Some(index) = stack.pop() {
            component.push(index);
            for &next in &adjacency[index] {
                if !seen[next] {
                    seen[next] = true;
                    stack.push(next);
                }
            }
        }
        component.sort_unstable();

        if component.len() == 1 {
            blocks.push(Block::passthrough(component[0], &footprints[component[0]]));
        } else {
            blocks.push(merge_component(&component, footprints, config));
        }
    }
    blocks
}

fn build_adjacency(
    footprints: &[Footprint],
    barrier: &Barrier,
    merge_distance: f64,
) -> Vec<Vec<usize>> {
    let mut adjacency = vec![Vec::new(); footprints.len()];
    for i in 0..footprints.len() {
        for j in (i + 1)..footprints.len() {
            let a = footprints[i].centroid();
            let b = footprints[j].centroid();
            if a.euclidean_distance(&b) < merge_distance && !barrier.blocks(a, b) {
                adjacency[i].push(j);
                adjacency[j].push(i);
            }
        }
    }
    adjacency
}

/// Pools the member rings into one coordinate set and shapes it into the
/// artistic hull silhouette.
fn merge_component(members: &[usize], footprints: &[Footprint], config: &Config) -> Block {
    let mut pooled: Vec<Coord<f64>> = Vec::new();
    for &index in members {
        pooled.extend(repair::open_ring(footprints[index].polygon().exterior()));
    }

    let mut ring = hull::artistic_hull(&pooled, config);
    hull::apply_style(&mut ring, config);

    let candidate = Polygon::new(LineString::from(ring), vec![]);
    let outline = repair::repair_ring(&candidate).unwrap_or_else(|| {
        warn!(
            members = members.len(),
            "artistic hull degenerated; using convex hull of pooled points"
        );
        let points: Vec<Point<f64>> = pooled.iter().map(|&c| Point::from(c)).collect();
        MultiPoint::new(points).convex_hull()
    });

    Block {
        outline,
        height: weighted_height(members, footprints),
        kind: dominant_kind(members, footprints),
        is_cluster: true,
        members: members.to_vec(),
    }
}
