use crate::math::{Point3, Vector3};

use super::profile::ProfileId;

slotmap::new_key_type! {
    /// Unique identifier for a solid in the op store.
    pub struct SolidId;
}

/// Kind of a boolean combination of two solids.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum BooleanKind {
    Union,
    Difference,
    Intersection,
}

/// One node of the solid-operation DAG.
///
/// Children are created before their parents, so the graph is acyclic by
/// construction. The tree is consumed immediately by the CAD back end
/// and never persisted.
#[derive(Clone, Debug)]
pub enum SolidOp {
    /// Extrudes a profile upward from z = 0 by `height`.
    Extrude { profile: ProfileId, height: f64 },
    /// Translates a solid by `offset`.
    Translate { solid: SolidId, offset: Vector3 },
    /// Rotates a solid about an axis through `axis_origin`.
    Rotate {
        solid: SolidId,
        axis_origin: Point3,
        axis_direction: Vector3,
        /// Rotation angle in radians.
        angle: f64,
    },
    /// Combines two solids.
    Boolean {
        kind: BooleanKind,
        lhs: SolidId,
        rhs: SolidId,
    },
}
