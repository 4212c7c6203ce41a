//! Renders the four-sphere demo scene and saves it as a PNG.

use anyhow::Context;
use lumen_trace::{render, Color, DirectionalLight, Material, Point3, Scene, Sphere, Vec3};

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let scene = build_scene();
    let (width, height) = (800, 800);

    println!("Rendering {}x{}...", width, height);
    let start = std::time::Instant::now();
    let raster = render(&scene, width, height)?;
    println!("Rendered in {:?}", start.elapsed());

    let filename = "spheres.png";
    image::save_buffer(
        filename,
        &raster.to_rgb8(),
        raster.width,
        raster.height,
        image::ColorType::Rgb8,
    )
    .context("failed to save image")?;
    println!("Saved to {}", filename);

    Ok(())
}

fn build_scene() -> Scene {
    let mut scene = Scene::new(Point3::new(2.1, 1.3, 1.7), 45.0)
        .with_background(Color::new(0.078, 0.361, 0.753));

    let red = Material::Diffuse {
        color: Color::new(1.0, 0.0, 0.0),
        specular_highlight: Color::new(1.0, 1.0, 1.0),
        phong_exponent: 16.0,
    };

    scene.add_object(Box::new(Sphere::new(Point3::new(0.0, 0.0, 0.0), 0.5, red)));
    scene.add_object(Box::new(Sphere::new(
        Point3::new(0.27, 0.27, 0.54),
        0.16,
        red,
    )));
    scene.add_object(Box::new(Sphere::new(
        Point3::new(0.64, 0.17, 0.0),
        0.16,
        red,
    )));
    scene.add_object(Box::new(Sphere::new(
        Point3::new(0.17, 0.64, 0.54),
        0.16,
        red,
    )));

    scene.add_light(DirectionalLight::new(Vec3::new(4.0, 3.0, 2.0), Color::ONE));
    scene.add_light(DirectionalLight::new(Vec3::new(1.0, -4.0, 4.0), Color::ONE));
    scene.add_light(DirectionalLight::new(Vec3::new(-3.0, 1.0, 5.0), Color::ONE));

    scene
}
