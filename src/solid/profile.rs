use geo::Polygon;

slotmap::new_key_type! {
    /// Unique identifier for a 2-D profile in the op store.
    pub struct ProfileId;
}

/// A 2-D cross-section in the operation DAG.
///
/// Derived profiles stay symbolic: the downstream CAD kernel realizes
/// insets and scales when it evaluates the tree. Parameters are clamped
/// at synthesis time so no derived profile can collapse to zero area.
#[derive(Clone, Debug)]
pub enum Profile {
    /// A literal simple ring.
    Ring(Polygon<f64>),
    /// The base profile offset inward by `distance`.
    Inset { base: ProfileId, distance: f64 },
    /// The base profile scaled about its centroid by `factor`.
    Scaled { base: ProfileId, factor: f64 },
    /// The base ring minus its inward offset by `width` (a parapet band).
    RingBand { base: ProfileId, width: f64 },
}
