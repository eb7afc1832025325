//! Roof archetypes and their per-zone catalogues.

pub mod select;
pub mod synth;

pub use select::{select_roof, RoofPick};
pub use synth::SynthesizeRoof;

use crate::footprint::ZoneKind;

/// A roof archetype with its parameters.
///
/// Each variant carries only the fields its synthesis rule reads, so an
/// invalid parameter/archetype combination cannot be represented.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum RoofStyle {
    /// Base extrude plus a scaled-down top band, approximating a hip roof.
    Pitched { height_factor: f64 },
    /// Equal bands with step-wise shrinking footprint.
    Tiered { levels: u32, step: f64 },
    /// Full-height extrude with a thin parapet band on top.
    Flat { border: f64 },
    /// Angled cut over the top band.
    Sawtooth { angle_deg: f64 },
    /// Inset top band.
    Modern { setback: f64 },
    /// Tiered silhouette with per-band growing inset and shrinking scale.
    Complex { variations: u32, step: f64 },
    /// Like tiered, with a coarser step.
    Stepped { levels: u32, step: f64 },
}

/// One selectable archetype with its building-height band.
#[derive(Clone, Copy, Debug)]
pub struct CatalogueEntry {
    pub base: RoofStyle,
    pub min_height: f64,
    pub max_height: f64,
}

const RESIDENTIAL: [CatalogueEntry; 3] = [
    CatalogueEntry {
        base: RoofStyle::Pitched { height_factor: 0.35 },
        min_height: 8.0,
        max_height: 15.0,
    },
    CatalogueEntry {
        base: RoofStyle::Tiered { levels: 3, step: 1.5 },
        min_height: 10.0,
        max_height: 22.0,
    },
    CatalogueEntry {
        base: RoofStyle::Flat { border: 1.5 },
        min_height: 6.0,
        max_height: 12.0,
    },
];

const INDUSTRIAL: [CatalogueEntry; 3] = [
    CatalogueEntry {
        base: RoofStyle::Sawtooth { angle_deg: 30.0 },
        min_height: 8.0,
        max_height: 18.0,
    },
    CatalogueEntry {
        base: RoofStyle::Flat { border: 2.0 },
        min_height: 10.0,
        max_height: 20.0,
    },
    CatalogueEntry {
        base: RoofStyle::Stepped { levels: 4, step: 2.0 },
        min_height: 12.0,
        max_height: 30.0,
    },
];

const COMMERCIAL: [CatalogueEntry; 3] = [
    CatalogueEntry {
        base: RoofStyle::Modern { setback: 2.5 },
        min_height: 20.0,
        max_height: 45.0,
    },
    CatalogueEntry {
        base: RoofStyle::Complex { variations: 3, step: 1.2 },
        min_height: 25.0,
        max_height: 60.0,
    },
    CatalogueEntry {
        base: RoofStyle::Tiered { levels: 4, step: 2.0 },
        min_height: 15.0,
        max_height: 35.0,
    },
];

/// Fixed 3-archetype catalogue for a zone kind. Unspecified zones use
/// the residential catalogue.
#[must_use]
pub fn catalogue(kind: ZoneKind) -> &'static [CatalogueEntry; 3] {
    match kind {
        ZoneKind::Residential | ZoneKind::Unspecified => &RESIDENTIAL,
        ZoneKind::Industrial => &INDUSTRIAL,
        ZoneKind::Commercial => &COMMERCIAL,
    }
}
