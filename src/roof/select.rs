//! Random roof selection.
//!
//! Randomness here is an aesthetic feature of the output, not incidental
//! nondeterminism: the random source is an injected, seedable handle so
//! identical seeds reproduce identical descriptors and heights.

use rand::Rng;
use rand_chacha::ChaCha8Rng;

use crate::footprint::ZoneKind;

use super::{catalogue, RoofStyle};

/// Jitter band applied multiplicatively to scalar roof parameters.
const PARAM_JITTER: std::ops::RangeInclusive<f64> = 0.8..=1.2;

/// Jitter band applied to the clamped building height.
const HEIGHT_JITTER: std::ops::RangeInclusive<f64> = 0.85..=1.15;

/// A selected roof archetype and the final building height.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RoofPick {
    pub style: RoofStyle,
    pub height: f64,
}

/// Picks a roof archetype for a cluster of the given zone kind.
///
/// One catalogue entry is chosen uniformly, its parameters are jittered
/// within the archetype's tolerance band, and the aggregate height is
/// clamped into the entry's band, jittered, and re-clamped.
pub fn select_roof(kind: ZoneKind, aggregate_height: f64, rng: &mut ChaCha8Rng) -> RoofPick {
    let entries = catalogue(kind);
    let entry = entries[rng.gen_range(0..entries.len())];
    let style = jitter_style(entry.base, rng);

    let clamped = aggregate_height.clamp(entry.min_height, entry.max_height);
    let height = (clamped * rng.gen_range(HEIGHT_JITTER)).clamp(entry.min_height, entry.max_height);

    RoofPick { style, height }
}

fn jitter_style(base: RoofStyle, rng: &mut ChaCha8Rng) -> RoofStyle {
    match base {
        RoofStyle::Pitched { height_factor } => RoofStyle::Pitched {
            height_factor: height_factor * rng.gen_range(PARAM_JITTER),
        },
        RoofStyle::Tiered { levels, step } => RoofStyle::Tiered {
            levels: jitter_count(levels, 1, rng),
            step,
        },
        RoofStyle::Flat { border } => RoofStyle::Flat {
            border: border * rng.gen_range(PARAM_JITTER),
        },
        RoofStyle::Sawtooth { angle_deg } => RoofStyle::Sawtooth {
            angle_deg: (angle_deg + rng.gen_range(-5.0..=5.0)).max(10.0),
        },
        RoofStyle::Modern { setback } => RoofStyle::Modern {
            setback: setback * rng.gen_range(PARAM_JITTER),
        },
        RoofStyle::Complex { variations, step } => RoofStyle::Complex {
            variations: jitter_count(variations, 2, rng),
            step,
        },
        RoofStyle::Stepped { levels, step } => RoofStyle::Stepped {
            levels: jitter_count(levels, 1, rng),
            step,
        },
    }
}

/// Shifts a band count by -1, 0 or +1, clamped to `floor`.
fn jitter_count(count: u32, floor: u32, rng: &mut ChaCha8Rng) -> u32 {
    let shifted = i64::from(count) + i64::from(rng.gen_range(-1_i32..=1));
    u32::try_from(shifted.max(i64::from(floor))).unwrap_or(floor)
}
