//! Soft shadow example.
//!
//! Renders a row of spheres under one area light at increasing sample
//! levels and saves each frame as a PNG.

use lumen_core::{AreaLight, Disk, Material, Scene, Sphere};
use lumen_renderer::{render_parallel, Color, DepthOfField, RenderConfig, Vec3, DEFAULT_BUCKET_SIZE};

fn main() {
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Info)
        .init();

    println!("Lumen - Soft Shadow Example");
    println!("===========================");

    let start = std::time::Instant::now();
    let scene = build_scene();
    println!(
        "Scene built in {:?} ({} primitives, {} lights)",
        start.elapsed(),
        scene.primitive_count(),
        scene.light_count()
    );

    for samples in [1, 2, 4] {
        let config = RenderConfig::default()
            .with_resolution(480, 270)
            .with_samples(samples)
            .with_jitter(samples > 1)
            .with_seed(42);

        let start = std::time::Instant::now();
        let image = render_parallel(&scene, &config, DEFAULT_BUCKET_SIZE);
        println!("{samples}x{samples} samples rendered in {:?}", start.elapsed());

        let filename = format!("soft_shadows_{samples}.png");
        image.save(&filename).expect("Failed to save image");
        println!("Saved to {filename}");
    }

    // Same scene through a thin lens focused on the middle sphere
    let config = RenderConfig::default()
        .with_resolution(480, 270)
        .with_samples(4)
        .with_jitter(true)
        .with_depth_of_field(Some(DepthOfField {
            lens_size: 0.15,
            focal_distance: 7.0,
        }));
    let image = render_parallel(&scene, &config, DEFAULT_BUCKET_SIZE);
    image.save("soft_shadows_dof.png").expect("Failed to save image");
    println!("Saved to soft_shadows_dof.png");
}

fn build_scene() -> Scene {
    let mut scene = Scene::new();
    scene.set_eye(Vec3::new(0.0, 2.0, 7.0), Vec3::new(0.0, 0.0, 0.0), Vec3::Y);
    scene.set_fov(60.0);
    scene.set_background(Color::new(0.5, 0.7, 1.0));
    scene.set_ambient(Color::splat(0.15));

    // Ground
    scene.add_disk(Disk::new(
        Vec3::new(0.0, -0.5, 0.0),
        20.0,
        Vec3::Y,
        Material::new(Color::splat(0.7), 0.5, 0.0, 1.0),
    ));

    let colors = [
        Color::new(0.9, 0.3, 0.2),
        Color::new(0.9, 0.8, 0.2),
        Color::new(0.3, 0.8, 0.3),
        Color::new(0.2, 0.4, 0.9),
        Color::new(0.6, 0.3, 0.8),
    ];
    for (i, color) in colors.into_iter().enumerate() {
        let x = i as f64 * 1.3 - 2.6;
        scene.add_sphere(Sphere::new(
            Vec3::new(x, 0.0, -(i as f64) * 0.5),
            0.5,
            Material::new(color, 0.4, 0.5, 25.0),
        ));
    }

    scene.add_area_light(AreaLight::new(
        Color::splat(0.9),
        Vec3::new(-1.0, 4.0, 2.0),
        Vec3::new(1.0, 0.0, 0.0),
        Vec3::new(0.0, 0.0, 1.0),
    ));

    scene
}
