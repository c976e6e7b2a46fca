// Render a scene description to a PNG.
// Run with: cargo run --release -- [scene.json] [-o out.png] [--serial]

use anyhow::{bail, Context, Result};
use lumen_core::{load_description, AreaLight, Disk, Material, PointLight, Scene, Sphere};
use lumen_math::{Color, Vec3};
use lumen_renderer::{render, render_parallel, RenderConfig, DEFAULT_BUCKET_SIZE};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::env;
use std::path::PathBuf;

const DEFAULT_OUTPUT: &str = "lumen.png";

/// Command line options
struct Args {
    scene: Option<PathBuf>,
    output: PathBuf,
    serial: bool,
}

impl Args {
    fn parse() -> Result<Self> {
        let mut scene = None;
        let mut output = PathBuf::from(DEFAULT_OUTPUT);
        let mut serial = false;

        let mut args = env::args().skip(1);
        while let Some(arg) = args.next() {
            match arg.as_str() {
                "-o" | "--output" => {
                    output = args.next().map(PathBuf::from).context("-o needs a path")?;
                }
                "--serial" => serial = true,
                "-h" | "--help" => {
                    println!("Usage: lumen [SCENE.json] [-o OUT.png] [--serial]");
                    std::process::exit(0);
                }
                flag if flag.starts_with('-') => bail!("unknown option '{flag}'"),
                path => {
                    if scene.replace(PathBuf::from(path)).is_some() {
                        bail!("only one scene file can be rendered at a time");
                    }
                }
            }
        }

        Ok(Self { scene, output, serial })
    }
}

/// Two spheres on a ground disk, lit by a key light and a soft area light.
fn demo_scene() -> Scene {
    let mut scene = Scene::new();
    scene.set_eye(Vec3::new(0.0, 1.5, 6.0), Vec3::new(0.0, 0.3, 0.0), Vec3::Y);
    scene.set_fov(45.0);
    scene.set_background(Color::new(0.05, 0.05, 0.1));
    scene.set_ambient(Color::splat(0.2));

    scene.add_sphere(Sphere::new(
        Vec3::new(-0.9, 0.0, 0.0),
        1.0,
        Material::new(Color::new(0.9, 0.2, 0.15), 0.3, 0.6, 40.0),
    ));
    scene.add_sphere(Sphere::new(
        Vec3::new(1.2, -0.4, 0.8),
        0.6,
        Material::new(Color::new(0.2, 0.45, 0.9), 0.3, 0.3, 12.0),
    ));
    scene.add_disk(Disk::new(
        Vec3::new(0.0, -1.0, 0.0),
        5.0,
        Vec3::Y,
        Material::new(Color::splat(0.8), 0.3, 0.0, 1.0),
    ));

    scene.add_point_light(PointLight::new(Color::splat(0.5), Vec3::new(-4.0, 5.0, 4.0)));
    scene.add_area_light(AreaLight::new(
        Color::splat(0.6),
        Vec3::new(2.0, 5.0, 1.0),
        Vec3::new(0.75, 0.0, 0.0),
        Vec3::new(0.0, 0.0, 0.75),
    ));

    scene
}

fn main() -> Result<()> {
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Info)
        .init();

    let args = Args::parse()?;

    let (scene, config) = match &args.scene {
        Some(path) => {
            let description = load_description(path)
                .with_context(|| format!("failed to load {}", path.display()))?;
            (description.build_scene(), RenderConfig::from(&description.render))
        }
        None => {
            log::info!("No scene given, rendering the demo scene");
            let config = RenderConfig::default()
                .with_resolution(640, 480)
                .with_samples(3)
                .with_jitter(true);
            (demo_scene(), config)
        }
    };

    let image = if args.serial {
        let mut rng = StdRng::seed_from_u64(config.seed);
        render(&scene, &config, &mut rng)
    } else {
        render_parallel(&scene, &config, DEFAULT_BUCKET_SIZE)
    };

    image
        .save(&args.output)
        .with_context(|| format!("failed to write {}", args.output.display()))?;
    log::info!("Wrote {}", args.output.display());

    Ok(())
}
