//! Roof synthesis: turning an outline, a height and a roof archetype
//! into a solid-operation tree.

use geo::{Area, BoundingRect, Centroid, Polygon};
use tracing::warn;

use crate::error::{Result, SolidError};
use crate::geometry::min_half_width;
use crate::math::{Point3, Vector3, AREA_TOLERANCE};
use crate::solid::{BooleanKind, OpStore, ProfileId, SolidId};

use super::RoofStyle;

/// Fraction of the total height taken by the base extrusion for the
/// sawtooth and modern archetypes.
const BASE_FRACTION: f64 = 0.8;

/// Thickness of the flat roof's parapet band.
const PARAPET_HEIGHT: f64 = 1.0;

/// Cross-section scale of the pitched roof's top band.
const PITCHED_TOP_SCALE: f64 = 0.6;

/// Largest inward offset, as a fraction of the outline's minimum
/// half-width, before a profile risks collapsing.
const SAFE_INSET_FRACTION: f64 = 0.9;

/// Smallest allowed cross-section scale factor.
const MIN_SCALE: f64 = 0.1;

/// Builds the solid-operation tree for one consolidated building.
///
/// Without a roof style the building is a bare extrusion; each archetype
/// otherwise expands into its fixed stack of extrusions, insets, boolean
/// combinations and cuts.
pub struct SynthesizeRoof {
    outline: Polygon<f64>,
    height: f64,
    style: Option<RoofStyle>,
}

impl SynthesizeRoof {
    /// Creates a new `SynthesizeRoof` operation.
    #[must_use]
    pub fn new(outline: Polygon<f64>, height: f64, style: Option<RoofStyle>) -> Self {
        Self {
            outline,
            height,
            style,
        }
    }

    /// Executes the synthesis, creating the op tree in the store and
    /// returning its root.
    ///
    /// # Errors
    ///
    /// Returns [`SolidError::InvalidInput`] if the height is not positive
    /// or the outline has no measurable area.
    pub fn execute(&self, store: &mut OpStore) -> Result<SolidId> {
        if !self.height.is_finite() || self.height <= 0.0 {
            return Err(
                SolidError::InvalidInput(format!("height must be positive: {}", self.height))
                    .into(),
            );
        }
        if self.outline.unsigned_area() <= AREA_TOLERANCE {
            return Err(SolidError::InvalidInput("outline has no area".into()).into());
        }

        let max_inset = SAFE_INSET_FRACTION * min_half_width(&self.outline);
        let ring = store.ring(self.outline.clone());

        let root = match self.style {
            None => store.extrude(ring, self.height),
            Some(RoofStyle::Pitched { height_factor }) => {
                self.pitched(store, ring, height_factor)
            }
            Some(RoofStyle::Tiered { levels, step } | RoofStyle::Stepped { levels, step }) => {
                self.banded(store, ring, levels.max(1), step, 0.0, max_inset)
            }
            Some(RoofStyle::Flat { border }) => {
                self.flat(store, ring, clamp_inset(border, max_inset))
            }
            Some(RoofStyle::Sawtooth { angle_deg }) => self.sawtooth(store, ring, angle_deg),
            Some(RoofStyle::Modern { setback }) => {
                self.modern(store, ring, clamp_inset(setback, max_inset))
            }
            Some(RoofStyle::Complex { variations, step }) => {
                self.banded(store, ring, variations.max(2), step, 0.3, max_inset)
            }
        };
        Ok(root)
    }

    /// Base extrusion topped by a scaled-down band.
    fn pitched(&self, store: &mut OpStore, ring: ProfileId, height_factor: f64) -> SolidId {
        let factor = height_factor.clamp(0.05, 0.95);
        let split = self.height * (1.0 - factor);
        let base = store.extrude(ring, split);
        let top_profile = store.scaled(ring, PITCHED_TOP_SCALE.max(MIN_SCALE));
        let top = store.extrude(top_profile, self.height - split);
        let top = store.raise(top, split);
        store.boolean(BooleanKind::Union, base, top)
    }

    /// Equal-height bands with per-band growing inset; `shrink` > 0 also
    /// scales each band's cross-section down linearly (the complex
    /// archetype).
    fn banded(
        &self,
        store: &mut OpStore,
        ring: ProfileId,
        bands: u32,
        step: f64,
        shrink: f64,
        max_inset: f64,
    ) -> SolidId {
        let band_height = self.height / f64::from(bands);
        let mut root: Option<SolidId> = None;
        for band in 0..bands {
            let inset = clamp_inset(step * f64::from(band), max_inset);
            let mut profile = ring;
            if inset > 0.0 {
                profile = store.inset(ring, inset);
            }
            if shrink > 0.0 && band > 0 {
                let progress = f64::from(band) / f64::from(bands.max(2) - 1);
                let factor = (1.0 - shrink * progress).max(MIN_SCALE);
                profile = store.scaled(profile, factor);
            }
            let mut solid = store.extrude(profile, band_height);
            if band > 0 {
                solid = store.raise(solid, band_height * f64::from(band));
            }
            root = Some(match root {
                None => solid,
                Some(acc) => store.boolean(BooleanKind::Union, acc, solid),
            });
        }
        // `bands` >= 1, so the loop always produced a root.
        root.unwrap_or_else(|| store.extrude(ring, self.height))
    }

    /// Full-height extrusion with a thin parapet band on top.
    fn flat(&self, store: &mut OpStore, ring: ProfileId, border: f64) -> SolidId {
        let base = store.extrude(ring, self.height);
        let band = store.ring_band(ring, border);
        let parapet = store.extrude(band, PARAPET_HEIGHT);
        let parapet = store.raise(parapet, self.height);
        store.boolean(BooleanKind::Union, base, parapet)
    }

    /// Base extrusion topped by an angled cut: the top band is the
    /// intersection of a straight extrusion with a long extrusion
    /// rotated about a horizontal axis through the band's middle.
    fn sawtooth(&self, store: &mut OpStore, ring: ProfileId, angle_deg: f64) -> SolidId {
        let base_height = self.height * BASE_FRACTION;
        let cap_height = self.height - base_height;

        let base = store.extrude(ring, base_height);
        let straight = store.extrude(ring, cap_height);

        let long_length = 2.0 * self.outline_diagonal() + cap_height;
        let long = store.extrude(ring, long_length);
        // Center the long extrusion on the cap band before tilting it.
        let long = store.raise(long, cap_height / 2.0 - long_length / 2.0);
        let pivot = self.outline_center(cap_height / 2.0);
        let tilted = store.rotate(long, pivot, Vector3::x(), angle_deg.to_radians());

        let wedge = store.boolean(BooleanKind::Intersection, straight, tilted);
        let cap = store.raise(wedge, base_height);
        store.boolean(BooleanKind::Union, base, cap)
    }

    /// Base extrusion with an inset top band.
    fn modern(&self, store: &mut OpStore, ring: ProfileId, setback: f64) -> SolidId {
        let base_height = self.height * BASE_FRACTION;
        let base = store.extrude(ring, base_height);
        let top_profile = store.inset(ring, setback);
        let top = store.extrude(top_profile, self.height - base_height);
        let top = store.raise(top, base_height);
        store.boolean(BooleanKind::Union, base, top)
    }

    fn outline_diagonal(&self) -> f64 {
        self.outline
            .bounding_rect()
            .map_or(0.0, |rect| rect.width().hypot(rect.height()))
    }

    fn outline_center(&self, z: f64) -> Point3 {
        self.outline
            .centroid()
            .map_or_else(|| Point3::new(0.0, 0.0, z), |c| Point3::new(c.x(), c.y(), z))
    }
}

/// Clamps an inward offset so the profile keeps a positive area.
fn clamp_inset(distance: f64, max_inset: f64) -> f64 {
    if distance > max_inset {
        warn!(distance, max_inset, "inward offset clamped to keep profile area positive");
        max_inset
    } else {
        distance.max(0.0)
    }
}
