//! Traceable trait and hit record.

use crate::{Material, Ray};
use lumen_math::{Point3, Vec3};

/// Result of a ray-object intersection.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Hit {
    /// Point of intersection in world space.
    pub point: Point3,
    /// Unit surface normal at the intersection.
    pub normal: Vec3,
}

/// Capability exposed by every geometric primitive: report a material
/// and test rays against the surface.
///
/// `Send + Sync` so a scene's object list can be shared across render
/// workers.
pub trait Traceable: Send + Sync {
    /// Material of this object.
    fn material(&self) -> &Material;

    /// Intersect a ray with this object.
    ///
    /// Returns the nearest intersection strictly in front of the ray
    /// origin, or `None` on a miss. The origin itself never counts as
    /// a hit.
    fn intersect(&self, ray: &Ray) -> Option<Hit>;
}
