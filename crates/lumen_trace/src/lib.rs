//! Lumen - recursive CPU ray tracer.
//!
//! A Whitted-style tracer: one primary ray per pixel, Phong shading
//! with shadows from directional lights, and bounded recursive
//! reflection and refraction.

mod material;
mod polygon;
mod ray;
mod renderer;
mod scene;
mod sphere;
mod traceable;

pub use material::Material;
pub use polygon::Polygon;
pub use ray::{Ray, RayKind};
pub use renderer::{
    color_to_rgb8, render, ImageBuffer, RenderError, RenderResult, EPSILON, MAX_RECURSION_DEPTH,
};
pub use scene::{DirectionalLight, Scene, Viewport};
pub use sphere::Sphere;
pub use traceable::{Hit, Traceable};

/// Re-export the math types from lumen_math.
pub use lumen_math::{clamp_channels, Color, Point3, Vec3};
