//! Planar polygon primitive.
//!
//! Intersection runs in two stages: a plane hit, then a
//! crossing-number point-in-polygon test on a 2D projection.

use crate::{Hit, Material, Ray, Traceable};
use lumen_math::{DVec2, Point3, Vec3};

/// A planar polygon given as an ordered vertex loop.
///
/// At least three points; results are only meaningful for simple
/// (non-self-intersecting) polygons.
#[derive(Debug, Clone)]
pub struct Polygon {
    points: Vec<Point3>,
    material: Material,
    single_sided: bool,
}

impl Polygon {
    /// Create a two-sided polygon.
    pub fn new(points: Vec<Point3>, material: Material) -> Self {
        Self {
            points,
            material,
            single_sided: false,
        }
    }

    /// Set whether rays approaching the back face are rejected.
    pub fn single_sided(mut self, single_sided: bool) -> Self {
        self.single_sided = single_sided;
        self
    }

    /// Intersect the ray with the polygon's supporting plane.
    ///
    /// The returned normal faces the incoming ray.
    fn plane_intersection(&self, ray: &Ray) -> Option<Hit> {
        let v1 = self.points[1] - self.points[0];
        let v2 = self.points[0] - self.points[2];
        let mut normal = v1.cross(v2).normalize_or_zero();

        let vd = normal.dot(ray.direction());
        if vd >= 0.0 && self.single_sided {
            // One-sided face with the normal pointing away from the ray.
            return None;
        }
        if vd == 0.0 {
            // Ray parallel to the plane.
            return None;
        }

        // Plane offset term, carried as a vector.
        let d = -(normal.cross(self.points[0]));
        let vo = -(normal.dot(ray.origin() + d));
        let t = vo / vd;
        if t < 0.0 {
            // Plane is behind the ray origin.
            return None;
        }

        if vd > 0.0 {
            normal = -normal;
        }

        Some(Hit {
            point: ray.at(t),
            normal,
        })
    }

    /// Whether a point on the supporting plane lies inside the loop.
    fn contains_point(&self, point: Point3, normal: Vec3) -> bool {
        // Drop the dominant normal axis to project onto 2D, translated
        // so the test point sits at the projected origin.
        let project: fn(Point3) -> DVec2 = if normal.x > normal.y && normal.x >= normal.z {
            |p| DVec2::new(p.y, p.z)
        } else if normal.y >= normal.x && normal.y >= normal.z {
            |p| DVec2::new(p.x, p.z)
        } else {
            |p| DVec2::new(p.x, p.y)
        };
        let center = project(point);
        let uv: Vec<DVec2> = self.points.iter().map(|&p| project(p) - center).collect();

        // Walk the edge loop counting crossings of the positive u axis;
        // an odd count means the point is inside.
        let mut crossings = 0;
        let mut sign = if uv[0].y < 0.0 { -1 } else { 1 };
        for (i, a) in uv.iter().enumerate() {
            let b = uv[(i + 1) % uv.len()];
            let next_sign = if b.y < 0.0 { -1 } else { 1 };
            if sign != next_sign {
                if a.x > 0.0 && b.x > 0.0 {
                    // Edge lies entirely in the positive-u half plane.
                    crossings += 1;
                } else if a.x > 0.0 || b.x > 0.0 {
                    // Edge straddles the v axis; interpolate the crossing.
                    let u_cross = a.x - a.y * (b.x - a.x) / (b.y - a.y);
                    if u_cross > 0.0 {
                        crossings += 1;
                    }
                }
            }
            sign = next_sign;
        }
        crossings % 2 != 0
    }
}

impl Traceable for Polygon {
    fn material(&self) -> &Material {
        &self.material
    }

    fn intersect(&self, ray: &Ray) -> Option<Hit> {
        let hit = self.plane_intersection(ray)?;
        if self.contains_point(hit.point, hit.normal) {
            Some(hit)
        } else {
            None
        }
    }
}
