pub mod op;
pub mod profile;

pub use op::{BooleanKind, SolidId, SolidOp};
pub use profile::{Profile, ProfileId};

use geo::Polygon;
use slotmap::SlotMap;

use crate::error::SolidError;
use crate::math::{Point3, Vector3};

/// Central arena that owns all nodes of a solid-operation DAG.
///
/// Nodes reference each other via typed IDs (generational indices),
/// avoiding self-referential structures. One store holds the tree of a
/// single generated block.
#[derive(Debug, Default)]
pub struct OpStore {
    profiles: SlotMap<ProfileId, Profile>,
    solids: SlotMap<SolidId, SolidOp>,
}

impl OpStore {
    /// Creates a new, empty op store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts a literal ring profile and returns its ID.
    pub fn ring(&mut self, polygon: Polygon<f64>) -> ProfileId {
        self.profiles.insert(Profile::Ring(polygon))
    }

    /// Inserts an inward-offset profile and returns its ID.
    pub fn inset(&mut self, base: ProfileId, distance: f64) -> ProfileId {
        self.profiles.insert(Profile::Inset { base, distance })
    }

    /// Inserts a centroid-scaled profile and returns its ID.
    pub fn scaled(&mut self, base: ProfileId, factor: f64) -> ProfileId {
        self.profiles.insert(Profile::Scaled { base, factor })
    }

    /// Inserts a ring-band (parapet) profile and returns its ID.
    pub fn ring_band(&mut self, base: ProfileId, width: f64) -> ProfileId {
        self.profiles.insert(Profile::RingBand { base, width })
    }

    /// Inserts an extrusion and returns its ID.
    pub fn extrude(&mut self, profile: ProfileId, height: f64) -> SolidId {
        self.solids.insert(SolidOp::Extrude { profile, height })
    }

    /// Inserts a translation and returns its ID.
    pub fn translate(&mut self, solid: SolidId, offset: Vector3) -> SolidId {
        self.solids.insert(SolidOp::Translate { solid, offset })
    }

    /// Inserts a vertical translation and returns its ID.
    pub fn raise(&mut self, solid: SolidId, dz: f64) -> SolidId {
        self.translate(solid, Vector3::new(0.0, 0.0, dz))
    }

    /// Inserts a rotation and returns its ID.
    pub fn rotate(
        &mut self,
        solid: SolidId,
        axis_origin: Point3,
        axis_direction: Vector3,
        angle: f64,
    ) -> SolidId {
        self.solids.insert(SolidOp::Rotate {
            solid,
            axis_origin,
            axis_direction,
            angle,
        })
    }

    /// Inserts a boolean combination and returns its ID.
    pub fn boolean(&mut self, kind: BooleanKind, lhs: SolidId, rhs: SolidId) -> SolidId {
        self.solids.insert(SolidOp::Boolean { kind, lhs, rhs })
    }

    /// Returns a reference to a profile node.
    ///
    /// # Errors
    ///
    /// Returns an error if the entity is not found in the store.
    pub fn profile(&self, id: ProfileId) -> Result<&Profile, SolidError> {
        self.profiles
            .get(id)
            .ok_or(SolidError::EntityNotFound("profile"))
    }

    /// Returns a reference to a solid node.
    ///
    /// # Errors
    ///
    /// Returns an error if the entity is not found in the store.
    pub fn solid(&self, id: SolidId) -> Result<&SolidOp, SolidError> {
        self.solids
            .get(id)
            .ok_or(SolidError::EntityNotFound("solid"))
    }

    /// Number of solid nodes in the store.
    #[must_use]
    pub fn solid_count(&self) -> usize {
        self.solids.len()
    }

    /// Renders a compact one-line summary of an op tree, for logs and
    /// debug assertions.
    ///
    /// # Errors
    ///
    /// Returns an error if the tree references a missing entity.
    pub fn describe(&self, id: SolidId) -> Result<String, SolidError> {
        match self.solid(id)? {
            SolidOp::Extrude { profile, height } => Ok(format!(
                "extrude({}, h={height:.1})",
                self.describe_profile(*profile)?
            )),
            SolidOp::Translate { solid, offset } => Ok(format!(
                "translate({}, [{:.1}, {:.1}, {:.1}])",
                self.describe(*solid)?,
                offset.x,
                offset.y,
                offset.z
            )),
            SolidOp::Rotate { solid, angle, .. } => Ok(format!(
                "rotate({}, {:.1}deg)",
                self.describe(*solid)?,
                angle.to_degrees()
            )),
            SolidOp::Boolean { kind, lhs, rhs } => {
                let name = match kind {
                    BooleanKind::Union => "union",
                    BooleanKind::Difference => "difference",
                    BooleanKind::Intersection => "intersection",
                };
                Ok(format!(
                    "{name}({}, {})",
                    self.describe(*lhs)?,
                    self.describe(*rhs)?
                ))
            }
        }
    }

    fn describe_profile(&self, id: ProfileId) -> Result<String, SolidError> {
        match self.profile(id)? {
            Profile::Ring(polygon) => Ok(format!(
                "ring[{}]",
                polygon.exterior().0.len().saturating_sub(1)
            )),
            Profile::Inset { base, distance } => Ok(format!(
                "inset({}, {distance:.1})",
                self.describe_profile(*base)?
            )),
            Profile::Scaled { base, factor } => Ok(format!(
                "scaled({}, {factor:.2})",
                self.describe_profile(*base)?
            )),
            Profile::RingBand { base, width } => Ok(format!(
                "band({}, {width:.1})",
                self.describe_profile(*base)?
            )),
        }
    }
}
