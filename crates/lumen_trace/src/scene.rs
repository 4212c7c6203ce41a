//! Scene model: camera parameters, lights, and the object list.
//!
//! A scene is assembled by the host, handed to the renderer for one
//! pass, and never mutated during it.

use crate::Traceable;
use lumen_math::{Color, Point3, Vec3};

/// A light with a direction and no position, illuminating every point
/// equally from that direction.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DirectionalLight {
    direction: Vec3,
    color: Color,
}

impl DirectionalLight {
    /// Create a light. `direction` points toward the light and is
    /// normalized here, once.
    pub fn new(direction: Vec3, color: Color) -> Self {
        Self {
            direction: direction.normalize_or_zero(),
            color,
        }
    }

    /// Unit direction toward the light.
    #[inline]
    pub fn direction(&self) -> Vec3 {
        self.direction
    }

    /// Light color.
    #[inline]
    pub fn color(&self) -> Color {
        self.color
    }
}

/// The rectangular camera-space region the image plane maps onto.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub u_min: f64,
    pub u_max: f64,
    pub v_min: f64,
    pub v_max: f64,
}

/// Everything the renderer needs for one frame.
pub struct Scene {
    /// Camera position; also the pinhole every primary ray starts from.
    pub look_from: Point3,
    /// Field of view in degrees.
    pub field_of_view: f64,
    /// Derived once at construction; see [`Scene::new`].
    pub viewport: Viewport,
    /// Color returned by rays that hit nothing.
    pub background: Color,
    /// Ambient light term.
    pub ambient_light: Color,
    /// Objects, in insertion order. Nearest-hit ties keep the earliest.
    pub objects: Vec<Box<dyn Traceable>>,
    /// Directional lights, in insertion order.
    pub lights: Vec<DirectionalLight>,
}

impl Scene {
    /// Create a scene for a camera at `look_from` with the given field
    /// of view in degrees.
    ///
    /// The viewport is a symmetric square sized by the camera's
    /// distance from the origin: `half = |look_from| * tan(fov / 2)`.
    pub fn new(look_from: Point3, field_of_view: f64) -> Self {
        let half = look_from.length() * (field_of_view / 2.0).to_radians().tan();
        Self {
            look_from,
            field_of_view,
            viewport: Viewport {
                u_min: -half,
                u_max: half,
                v_min: -half,
                v_max: half,
            },
            background: Color::ZERO,
            ambient_light: Color::new(0.1, 0.1, 0.1),
            objects: Vec::new(),
            lights: Vec::new(),
        }
    }

    /// Set the background color.
    pub fn with_background(mut self, background: Color) -> Self {
        self.background = background;
        self
    }

    /// Set the ambient light term.
    pub fn with_ambient_light(mut self, ambient: Color) -> Self {
        self.ambient_light = ambient;
        self
    }

    /// Add an object to the scene.
    pub fn add_object(&mut self, object: Box<dyn Traceable>) {
        self.objects.push(object);
    }

    /// Add a directional light.
    pub fn add_light(&mut self, light: DirectionalLight) {
        self.lights.push(light);
    }

    /// Get the number of objects.
    pub fn object_count(&self) -> usize {
        self.objects.len()
    }

    /// Get the number of lights.
    pub fn light_count(&self) -> usize {
        self.lights.len()
    }
}
