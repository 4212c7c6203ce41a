//! Ray type for tracing.

use lumen_math::{Point3, Vec3};

/// What a ray is for.
///
/// Purely diagnostic: no intersection or shading logic branches on it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RayKind {
    Primary,
    Reflection,
    Transmission,
    Shadow,
}

/// A ray with an origin, a direction, and a diagnostic kind.
#[derive(Debug, Clone, Copy)]
pub struct Ray {
    kind: RayKind,
    origin: Point3,
    direction: Vec3,
}

impl Ray {
    /// Create a new ray.
    #[inline]
    pub fn new(kind: RayKind, origin: Point3, direction: Vec3) -> Self {
        Self {
            kind,
            origin,
            direction,
        }
    }

    /// Get the ray's kind tag.
    #[inline]
    pub fn kind(&self) -> RayKind {
        self.kind
    }

    /// Get the ray's origin point.
    #[inline]
    pub fn origin(&self) -> Point3 {
        self.origin
    }

    /// Get the ray's direction vector.
    #[inline]
    pub fn direction(&self) -> Vec3 {
        self.direction
    }

    /// Compute a point along the ray at parameter t.
    /// P(t) = origin + t * direction
    #[inline]
    pub fn at(&self, t: f64) -> Point3 {
        self.origin + t * self.direction
    }
}
