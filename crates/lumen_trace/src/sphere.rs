//! Sphere primitive.

use crate::{Hit, Material, Ray, Traceable};
use lumen_math::Point3;

/// A sphere described by a center and a radius.
#[derive(Debug, Clone)]
pub struct Sphere {
    center: Point3,
    radius: f64,
    material: Material,
}

impl Sphere {
    /// Create a new sphere.
    pub fn new(center: Point3, radius: f64, material: Material) -> Self {
        Self {
            center,
            radius,
            material,
        }
    }
}

impl Traceable for Sphere {
    fn material(&self) -> &Material {
        &self.material
    }

    fn intersect(&self, ray: &Ray) -> Option<Hit> {
        // Quadratic in t for |O + tD - C|^2 = r^2, with the leading
        // coefficient taken as 1 for a normalized direction.
        let oc = ray.origin() - self.center;
        let b = 2.0 * ray.direction().dot(oc);
        let c = oc.dot(oc) - self.radius * self.radius;

        let discriminant = b * b - 4.0 * c;
        if discriminant < 0.0 {
            return None;
        }

        // Prefer the near root; fall back to the far one when the near
        // root sits behind the origin.
        let t0 = (-b - discriminant.sqrt()) / 2.0;
        let t = if t0 > 0.0 {
            t0
        } else {
            let t1 = (-b + discriminant.sqrt()) / 2.0;
            if t1 <= 0.0 {
                return None;
            }
            t1
        };

        let point = ray.at(t);
        let normal = (point - self.center) / self.radius;
        Some(Hit { point, normal })
    }
}
