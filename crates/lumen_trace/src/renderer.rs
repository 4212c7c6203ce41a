//! Recursive Whitted-style renderer.
//!
//! Drives per-pixel primary rays, the nearest-hit search over the
//! scene, shadow testing, and the recursive illumination that spawns
//! reflection and transmission rays up to a bounded depth.

use crate::{DirectionalLight, Material, Ray, RayKind, Scene, Traceable};
use lumen_math::{clamp_channels, Color, Point3, Vec3};
use rayon::prelude::*;
use thiserror::Error;

/// Divisor for the offset that lifts a secondary ray's origin off the
/// surface it starts on: the origin moves by `direction / EPSILON`.
pub const EPSILON: f64 = 1.0e7;

/// Bounce budget for reflection and transmission rays.
pub const MAX_RECURSION_DEPTH: u32 = 3;

/// Refraction index of the incident medium (vacuum).
const INCIDENT_INDEX: f64 = 1.0;

/// Refraction index of transparent surfaces (crown glass).
const SURFACE_INDEX: f64 = 1.52;

/// Errors that can abort a render.
#[derive(Error, Debug)]
pub enum RenderError {
    /// `sin^2` of the transmission angle exceeded 1 while refracting.
    /// Unreachable for the fixed vacuum-to-glass index pair, so it is
    /// surfaced as a fault rather than substituted with a color.
    #[error("total internal reflection at {0:?}")]
    TotalInternalReflection(Point3),
}

/// Result type for render operations.
pub type RenderResult<T> = Result<T, RenderError>;

/// Winning entry of the nearest-intersection search.
struct Intersection<'a> {
    point: Point3,
    normal: Vec3,
    object: &'a dyn Traceable,
}

/// Linear scan over the scene's objects for the hit closest to the
/// ray origin. Ties keep the earliest object in list order.
fn nearest_intersection<'a>(ray: &Ray, scene: &'a Scene) -> Option<Intersection<'a>> {
    let mut nearest: Option<Intersection<'a>> = None;
    let mut shortest = f64::INFINITY;

    for object in &scene.objects {
        if let Some(hit) = object.intersect(ray) {
            let length = (hit.point - ray.origin()).length();
            if length < shortest {
                shortest = length;
                nearest = Some(Intersection {
                    point: hit.point,
                    normal: hit.normal,
                    object: object.as_ref(),
                });
            }
        }
    }

    nearest
}

/// Build the primary ray for pixel (x, y) of a width x height image.
///
/// Pixel coordinates map into viewport space through independent
/// linear transforms for u and v; y is inverted so image row 0 is the
/// top. The ray runs from the camera through `(u, v, 0)` on the
/// screen plane.
fn primary_ray(scene: &Scene, width: u32, height: u32, x: u32, y: u32) -> Ray {
    let x_min = -(width as f64) / 2.0;
    let x_max = width as f64 / 2.0;
    let y_min = -(height as f64) / 2.0;
    let y_max = height as f64 / 2.0;
    let vp = scene.viewport;

    let invert_y = y_max - y as f64;
    let u = (x as f64 - x_min) * ((vp.u_max - vp.u_min) / (x_max - x_min)) + vp.u_min + vp.u_min;
    let v = (invert_y - y_min) * ((vp.v_max - vp.v_min) / (y_max - y_min)) + vp.v_min;

    let screen_point = Point3::new(u, v, 0.0);
    Ray::new(
        RayKind::Primary,
        scene.look_from,
        (screen_point - scene.look_from).normalize_or_zero(),
    )
}

/// Whether any object blocks the light at `point`.
///
/// Directional lights have no position, so a hit at any distance
/// along the shadow ray occludes the light.
fn is_shadowed(scene: &Scene, point: Point3, light: &DirectionalLight) -> bool {
    let direction = light.direction();
    let shadow_ray = Ray::new(RayKind::Shadow, point + direction / EPSILON, direction);
    nearest_intersection(&shadow_ray, scene).is_some()
}

/// Color arriving at a surface point, evaluated recursively.
///
/// The ambient term is always added and the result is clamped; the
/// rest depends on the material variant.
fn illuminate(
    scene: &Scene,
    point: Point3,
    normal: Vec3,
    ray: &Ray,
    object: &dyn Traceable,
    recursion_limit: u32,
) -> RenderResult<Color> {
    let ambient = object.material().color() * scene.ambient_light;

    match *object.material() {
        Material::Diffuse {
            color,
            specular_highlight,
            phong_exponent,
        } => {
            let mut other = Color::ZERO;
            for light in &scene.lights {
                if is_shadowed(scene, point, light) {
                    continue;
                }
                let l = light.direction();
                let diffuse = color * normal.dot(l).max(0.0);
                let ri = 2.0 * normal * normal.dot(l) - l;
                let e = (scene.look_from - point).normalize_or_zero();
                let specular = specular_highlight * e.dot(ri).max(0.0).powf(phong_exponent);
                other += light.color() * (diffuse + specular);
            }
            Ok(clamp_channels(ambient + other))
        }

        Material::Reflective { color } => {
            let mut other = Color::ZERO;
            // One trace per light even though the ray is
            // light-independent; each pass overwrites the last.
            for _light in &scene.lights {
                other = if recursion_limit > 0 {
                    let reflection_dir =
                        ray.direction() - 2.0 * normal * ray.direction().dot(normal);
                    let reflection_ray = Ray::new(
                        RayKind::Reflection,
                        point + reflection_dir / EPSILON,
                        reflection_dir.normalize_or_zero(),
                    );
                    match nearest_intersection(&reflection_ray, scene) {
                        Some(hit) => illuminate(
                            scene,
                            hit.point,
                            hit.normal,
                            &reflection_ray,
                            hit.object,
                            recursion_limit - 1,
                        )?,
                        None => color,
                    }
                } else {
                    scene.background
                };
            }
            Ok(clamp_channels(ambient + other))
        }

        Material::Transparent { color } => {
            let mut other = Color::ZERO;
            // One trace per light here as well; hits and misses
            // accumulate, while an exhausted bounce budget resets the
            // sum to the material's own color.
            for _light in &scene.lights {
                other = if recursion_limit > 0 {
                    let n = INCIDENT_INDEX / SURFACE_INDEX;
                    let cos_i = -normal.dot(ray.direction());
                    let sin_t2 = n * n * (1.0 - cos_i * cos_i);
                    if sin_t2 > 1.0 {
                        return Err(RenderError::TotalInternalReflection(point));
                    }
                    let cos_t = (1.0 - sin_t2).sqrt();
                    let refraction_dir = ray.direction() * n + normal * (n * cos_i - cos_t);
                    let refraction_ray = Ray::new(
                        RayKind::Transmission,
                        point + refraction_dir / EPSILON,
                        refraction_dir,
                    );
                    match nearest_intersection(&refraction_ray, scene) {
                        Some(hit) => {
                            other
                                + illuminate(
                                    scene,
                                    hit.point,
                                    hit.normal,
                                    &refraction_ray,
                                    hit.object,
                                    recursion_limit - 1,
                                )?
                        }
                        None => other + scene.background,
                    }
                } else {
                    color
                };
            }
            Ok(clamp_channels(ambient + other))
        }
    }
}

/// Color for one pixel: the nearest primary-ray hit shaded
/// recursively, or the background on a miss (no ambient term).
fn trace_pixel(scene: &Scene, width: u32, height: u32, x: u32, y: u32) -> RenderResult<Color> {
    let ray = primary_ray(scene, width, height, x, y);
    match nearest_intersection(&ray, scene) {
        Some(hit) => illuminate(
            scene,
            hit.point,
            hit.normal,
            &ray,
            hit.object,
            MAX_RECURSION_DEPTH,
        ),
        None => Ok(scene.background),
    }
}

/// Raster of linear colors produced by a render pass.
pub struct ImageBuffer {
    pub width: u32,
    pub height: u32,
    pub pixels: Vec<Color>,
}

impl ImageBuffer {
    fn from_rows(width: u32, height: u32, rows: Vec<Vec<Color>>) -> Self {
        let mut pixels = Vec::with_capacity((width * height) as usize);
        for row in rows {
            pixels.extend(row);
        }
        Self {
            width,
            height,
            pixels,
        }
    }

    /// Get the pixel at (x, y).
    pub fn get(&self, x: u32, y: u32) -> Color {
        self.pixels[(y * self.width + x) as usize]
    }

    /// Flatten to 8-bit RGB bytes in row-major order.
    pub fn to_rgb8(&self) -> Vec<u8> {
        let mut bytes = Vec::with_capacity((self.width * self.height * 3) as usize);
        for color in &self.pixels {
            bytes.extend_from_slice(&color_to_rgb8(*color));
        }
        bytes
    }
}

/// Convert a linear color to 8-bit RGB.
///
/// The shading clamp caps channels at 1 but lets negative values
/// through; they are floored to 0 here, at the display boundary only.
pub fn color_to_rgb8(color: Color) -> [u8; 3] {
    let r = (255.0 * color.x.clamp(0.0, 1.0)) as u8;
    let g = (255.0 * color.y.clamp(0.0, 1.0)) as u8;
    let b = (255.0 * color.z.clamp(0.0, 1.0)) as u8;
    [r, g, b]
}

/// Render the scene into a width x height raster.
///
/// Rows are rendered in parallel; every pixel is independent, so the
/// output is identical to a sequential pass. The first refraction
/// fault aborts the whole render.
pub fn render(scene: &Scene, width: u32, height: u32) -> RenderResult<ImageBuffer> {
    log::info!(
        "rendering {}x{}: {} objects, {} lights",
        width,
        height,
        scene.object_count(),
        scene.light_count()
    );

    let rows: RenderResult<Vec<Vec<Color>>> = (0..height)
        .into_par_iter()
        .map(|y| {
            (0..width)
                .map(|x| trace_pixel(scene, width, height, x, y))
                .collect::<RenderResult<Vec<Color>>>()
        })
        .collect();

    let image = ImageBuffer::from_rows(width, height, rows?);
    log::debug!("render complete: {} pixels", image.pixels.len());
    Ok(image)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Sphere;

    fn red_diffuse() -> Material {
        Material::Diffuse {
            color: Color::new(1.0, 0.0, 0.0),
            specular_highlight: Color::new(1.0, 1.0, 1.0),
            phong_exponent: 16.0,
        }
    }

    #[test]
    fn nearest_intersection_prefers_the_closer_object() {
        let mut scene = Scene::new(Point3::new(0.0, 0.0, 4.0), 45.0);
        // Far sphere first in the list.
        scene.add_object(Box::new(Sphere::new(
            Point3::new(0.0, 0.0, -3.0),
            1.0,
            Material::Reflective {
                color: Color::new(0.0, 1.0, 0.0),
            },
        )));
        scene.add_object(Box::new(Sphere::new(Point3::ZERO, 1.0, red_diffuse())));

        let ray = Ray::new(
            RayKind::Primary,
            Point3::new(0.0, 0.0, 4.0),
            Vec3::new(0.0, 0.0, -1.0),
        );
        let hit = nearest_intersection(&ray, &scene).expect("should hit");

        assert_eq!(hit.point, Point3::new(0.0, 0.0, 1.0));
        assert_eq!(hit.object.material().color(), Color::new(1.0, 0.0, 0.0));
    }

    #[test]
    fn nearest_intersection_tie_keeps_the_first_object() {
        let mut scene = Scene::new(Point3::new(0.0, 0.0, 4.0), 45.0);
        scene.add_object(Box::new(Sphere::new(Point3::ZERO, 1.0, red_diffuse())));
        scene.add_object(Box::new(Sphere::new(
            Point3::ZERO,
            1.0,
            Material::Reflective {
                color: Color::new(0.0, 1.0, 0.0),
            },
        )));

        let ray = Ray::new(
            RayKind::Primary,
            Point3::new(0.0, 0.0, 4.0),
            Vec3::new(0.0, 0.0, -1.0),
        );
        let hit = nearest_intersection(&ray, &scene).expect("should hit");

        assert_eq!(hit.object.material().color(), Color::new(1.0, 0.0, 0.0));
    }

    #[test]
    fn opaque_sphere_between_point_and_light_casts_a_shadow() {
        let mut scene = Scene::new(Point3::new(0.0, 0.0, 4.0), 45.0);
        let light = DirectionalLight::new(Vec3::new(0.0, 0.0, 1.0), Color::ONE);

        assert!(!is_shadowed(&scene, Point3::ZERO, &light));

        scene.add_object(Box::new(Sphere::new(
            Point3::new(0.0, 0.0, 2.0),
            0.5,
            red_diffuse(),
        )));
        assert!(is_shadowed(&scene, Point3::ZERO, &light));
    }

    #[test]
    fn reflective_contribution_is_background_at_depth_zero() {
        let mut scene = Scene::new(Point3::new(0.0, 0.0, 4.0), 45.0)
            .with_background(Color::new(0.2, 0.3, 0.4))
            .with_ambient_light(Color::ZERO);
        scene.add_light(DirectionalLight::new(Vec3::new(0.0, 0.0, 1.0), Color::ONE));
        scene.add_object(Box::new(Sphere::new(
            Point3::ZERO,
            1.0,
            Material::Reflective {
                color: Color::new(0.0, 1.0, 0.0),
            },
        )));

        let ray = Ray::new(
            RayKind::Primary,
            Point3::new(0.0, 0.0, 4.0),
            Vec3::new(0.0, 0.0, -1.0),
        );
        let hit = nearest_intersection(&ray, &scene).expect("should hit");
        let color = illuminate(&scene, hit.point, hit.normal, &ray, hit.object, 0)
            .expect("no refraction involved");

        assert_eq!(color, Color::new(0.2, 0.3, 0.4));
    }

    #[test]
    fn reflective_miss_contributes_the_material_color() {
        // A single mirror sphere; its reflection ray escapes the scene.
        let mut scene = Scene::new(Point3::new(0.0, 0.0, 4.0), 45.0)
            .with_background(Color::new(0.2, 0.3, 0.4))
            .with_ambient_light(Color::ZERO);
        scene.add_light(DirectionalLight::new(Vec3::new(0.0, 0.0, 1.0), Color::ONE));
        scene.add_object(Box::new(Sphere::new(
            Point3::ZERO,
            1.0,
            Material::Reflective {
                color: Color::new(0.0, 1.0, 0.0),
            },
        )));

        let ray = Ray::new(
            RayKind::Primary,
            Point3::new(0.0, 0.0, 4.0),
            Vec3::new(0.0, 0.0, -1.0),
        );
        let hit = nearest_intersection(&ray, &scene).expect("should hit");
        let color = illuminate(
            &scene,
            hit.point,
            hit.normal,
            &ray,
            hit.object,
            MAX_RECURSION_DEPTH,
        )
        .expect("no refraction involved");

        assert_eq!(color, Color::new(0.0, 1.0, 0.0));
    }

    #[test]
    fn transparent_contribution_is_its_own_color_at_depth_zero() {
        let mut scene = Scene::new(Point3::new(0.0, 0.0, 4.0), 45.0)
            .with_background(Color::new(0.2, 0.3, 0.4))
            .with_ambient_light(Color::ZERO);
        scene.add_light(DirectionalLight::new(Vec3::new(0.0, 0.0, 1.0), Color::ONE));
        scene.add_object(Box::new(Sphere::new(
            Point3::ZERO,
            1.0,
            Material::Transparent {
                color: Color::new(0.1, 0.2, 0.3),
            },
        )));

        let ray = Ray::new(
            RayKind::Primary,
            Point3::new(0.0, 0.0, 4.0),
            Vec3::new(0.0, 0.0, -1.0),
        );
        let hit = nearest_intersection(&ray, &scene).expect("should hit");
        let color = illuminate(&scene, hit.point, hit.normal, &ray, hit.object, 0)
            .expect("depth zero never refracts");

        assert_eq!(color, Color::new(0.1, 0.2, 0.3));
    }

    #[test]
    fn top_level_miss_is_the_background_with_no_ambient() {
        let scene = Scene::new(Point3::new(0.0, 0.0, 4.0), 45.0)
            .with_background(Color::new(0.078, 0.361, 0.753));

        let image = render(&scene, 2, 2).expect("empty scene renders");
        for y in 0..2 {
            for x in 0..2 {
                assert_eq!(image.get(x, y), Color::new(0.078, 0.361, 0.753));
            }
        }
    }

    #[test]
    fn lit_red_sphere_renders_red_dominant() {
        let mut scene = Scene::new(Point3::new(0.0, 0.0, 2.0), 45.0)
            .with_background(Color::ZERO)
            .with_ambient_light(Color::new(0.1, 0.1, 0.1));
        scene.add_object(Box::new(Sphere::new(Point3::ZERO, 0.5, red_diffuse())));
        // Straight down the view axis, toward the camera.
        scene.add_light(DirectionalLight::new(Vec3::new(0.0, 0.0, 1.0), Color::ONE));

        let image = render(&scene, 9, 9).expect("no refraction involved");
        let color = image.get(4, 4);

        assert!(color.x > color.y, "red should dominate green: {color:?}");
        assert!(color.x > color.z, "red should dominate blue: {color:?}");
        assert!(color.x <= 1.0, "red channel must be clamped: {color:?}");
        assert!(color.x > 0.0);
    }

    #[test]
    fn color_to_rgb8_floors_negative_channels() {
        assert_eq!(color_to_rgb8(Color::new(1.5, -0.5, 0.5)), [255, 0, 127]);
    }

    #[test]
    fn image_buffer_indexing_is_row_major() {
        let rows = vec![
            vec![Color::new(1.0, 0.0, 0.0), Color::new(0.0, 1.0, 0.0)],
            vec![Color::new(0.0, 0.0, 1.0), Color::new(1.0, 1.0, 1.0)],
        ];
        let image = ImageBuffer::from_rows(2, 2, rows);

        assert_eq!(image.get(0, 0), Color::new(1.0, 0.0, 0.0));
        assert_eq!(image.get(1, 0), Color::new(0.0, 1.0, 0.0));
        assert_eq!(image.get(0, 1), Color::new(0.0, 0.0, 1.0));
        assert_eq!(image.get(1, 1), Color::new(1.0, 1.0, 1.0));
        assert_eq!(image.to_rgb8().len(), 12);
    }
}
