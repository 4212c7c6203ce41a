// Re-export the f64 glam types under the names the tracer uses.
pub use glam::{DVec2, DVec3};

/// 3-component f64 vector, used for directions and positions alike.
pub type Vec3 = DVec3;

/// A position in world space.
pub type Point3 = Vec3;

mod color;
pub use color::{clamp_channels, Color};
