//! Artistic silhouette for merged clusters.
//!
//! A bare convex hull reads as a crude blob at city scale. The artistic
//! hull keeps the pooled points' angular order and decorates long edges
//! with perturbed detail points, then applies the style-dependent
//! perturbation pass over the whole ring.

use std::f64::consts::{PI, TAU};

use geo::Coord;

use crate::config::{Config, VisualStyle};
use crate::math::TOLERANCE;

/// Fraction of the height variance used as perturbation amplitude.
const WOBBLE_SCALE: f64 = 0.25;

/// Lobe count of the radial style perturbation.
const RADIAL_LOBES: f64 = 3.0;

/// Builds a silhouette ring from the pooled member points.
///
/// Points are sorted angularly around their centroid; edges longer than
/// `cluster_size` receive interior detail points displaced sinusoidally
/// (scaled by the height variance) when the detail level exceeds 0.5.
#[must_use]
pub fn artistic_hull(points: &[Coord<f64>], config: &Config) -> Vec<Coord<f64>> {
    if points.len() < 3 {
        return points.to_vec();
    }
    let center = mean(points);
    let mut sorted = points.to_vec();
    sorted.sort_by(|a, b| {
        let alpha = (a.y - center.y).atan2(a.x - center.x);
        let beta = (b.y - center.y).atan2(b.x - center.x);
        alpha.total_cmp(&beta)
    });

    let inject_detail = config.detail_level > 0.5;
    let mut ring = Vec::with_capacity(sorted.len());
    for i in 0..sorted.len() {
        let a = sorted[i];
        let b = sorted[(i + 1) % sorted.len()];
        ring.push(a);
        if !inject_detail {
            continue;
        }
        let dx = b.x - a.x;
        let dy = b.y - a.y;
        let length = dx.hypot(dy);
        if length <= config.cluster_size || length < TOLERANCE {
            continue;
        }
        // Unit normal of the edge, for the sinusoidal displacement.
        let (nx, ny) = (-dy / length, dx / length);
        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        let extra = (length / config.cluster_size) as usize;
        for k in 1..=extra {
            #[allow(clippy::cast_precision_loss)]
            let t = k as f64 / (extra + 1) as f64;
            let wobble = (t * PI * 2.0).sin() * WOBBLE_SCALE * config.height_variance;
            ring.push(Coord {
                x: a.x + dx * t + nx * wobble,
                y: a.y + dy * t + ny * wobble,
            });
        }
    }
    ring
}

/// Second pass: perturbs every hull point according to the active style.
///
/// `Wave` applies a sinusoidal offset, `Radial` pushes points along the
/// radial direction by a lobed cosine; the remaining styles leave the
/// ring untouched.
pub fn apply_style(ring: &mut [Coord<f64>], config: &Config) {
    if ring.is_empty() {
        return;
    }
    let amplitude = WOBBLE_SCALE * config.height_variance;
    match config.style {
        VisualStyle::Wave => {
            let frequency = TAU / config.cluster_size.max(TOLERANCE);
            for coord in ring.iter_mut() {
                coord.y += (coord.x * frequency).sin() * amplitude;
            }
        }
        VisualStyle::Radial => {
            let center = mean(ring);
            for coord in ring.iter_mut() {
                let dx = coord.x - center.x;
                let dy = coord.y - center.y;
                let radius = dx.hypot(dy);
                if radius < TOLERANCE {
                    continue;
                }
                let theta = dy.atan2(dx);
                let delta = (theta * RADIAL_LOBES).cos() * amplitude;
                let scaled = (radius + delta).max(radius * 0.5) / radius;
                coord.x = center.x + dx * scaled;
                coord.y = center.y + dy * scaled;
            }
        }
        VisualStyle::Standard | VisualStyle::BlockCombine => {}
    }
}

fn mean(points: &[Coord<f64>]) -> Coord<f64> {
    let mut sum = Coord { x: 0.0, y: 0.0 };
    for point in points {
        sum.x += point.x;
        sum.y += point.y;
    }
    #[allow(clippy::cast_precision_loss)]
    let count = points.len().max(1) as f64;
    Coord {
        x: sum.x / count,
        y: sum.y / count,
    }
}
