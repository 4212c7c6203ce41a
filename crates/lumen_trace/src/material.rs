//! Surface materials.

use lumen_math::Color;

/// How a surface responds to light.
///
/// A closed taxonomy: the shader matches exhaustively, so a new
/// variant forces every dispatch site to handle it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Material {
    /// Lambertian surface with a Phong specular highlight.
    Diffuse {
        color: Color,
        specular_highlight: Color,
        phong_exponent: f64,
    },
    /// Perfect mirror.
    Reflective { color: Color },
    /// Refracting surface. The refraction indices are fixed by the
    /// renderer, not per material.
    Transparent { color: Color },
}

impl Material {
    /// Base color of the material, whatever the variant.
    pub fn color(&self) -> Color {
        match self {
            Material::Diffuse { color, .. } => *color,
            Material::Reflective { color } => *color,
            Material::Transparent { color } => *color,
        }
    }
}
