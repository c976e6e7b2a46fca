//! Example: Load and inspect a scene description.
//!
//! Run with: cargo run --example load_scene -- scenes/spheres.json

use std::env;

use lumen_core::load_description;

fn main() {
    env_logger::init();

    let args: Vec<String> = env::args().collect();

    if args.len() < 2 {
        println!("Usage: load_scene <path-to-json-file>");
        return;
    }

    let path = &args[1];
    println!("Loading scene description: {}", path);

    match load_description(path) {
        Ok(description) => {
            let scene = description.build_scene();
            let render = &description.render;
            let (screen_width, screen_height) = render.screen_size();

            println!("\n=== Render ===");
            println!("Image: {}x{}", render.width, render.height);
            println!("Screen: {}x{}", screen_width, screen_height);
            println!("Samples: {}x{} (jitter: {})", render.samples, render.samples, render.jitter);

            println!("\n=== Scene ===");
            println!("Commands: {}", description.commands.len());
            println!("Spheres: {}", scene.spheres.len());
            println!("Disks: {}", scene.disks.len());
            println!("Point lights: {}", scene.point_lights.len());
            println!("Area lights: {}", scene.area_lights.len());
            println!("Eye: {:?} (fov {})", scene.eye.pos, scene.fov);
        }
        Err(e) => {
            eprintln!("Error loading scene: {}", e);
            std::process::exit(1);
        }
    }
}
