//! JSON scene descriptions.
//!
//! A description is a list of authoring commands replayed in order against
//! an empty [`Scene`], plus the render options used to draw it:
//!
//! ```json
//! {
//!   "render": { "width": 320, "height": 240, "samples": 2, "jitter": true },
//!   "commands": [
//!     { "op": "eye", "from": [0, 0, 5], "at": [0, 0, 0], "up": [0, 1, 0] },
//!     { "op": "light", "color": [1, 1, 1], "pos": [0, 5, 5] },
//!     { "op": "sphere", "pos": [0, 0, 0], "radius": 1, "color": [1, 0, 0],
//!       "k_ambient": 0.2, "k_specular": 0.5, "specular_pow": 20 }
//!   ]
//! }
//! ```

use std::path::Path;

use lumen_math::{Color, Vec3};
use serde::Deserialize;
use thiserror::Error;

use crate::scene::{AreaLight, Disk, Material, PointLight, Scene, Sphere};

/// Errors that can occur while loading a scene description.
#[derive(Error, Debug)]
pub enum DescriptionError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Sample level must be at least 1, got {0}")]
    InvalidSampleLevel(u32),

    #[error("Invalid resolution {width}x{height}")]
    InvalidResolution { width: u32, height: u32 },
}

pub type DescriptionResult<T> = Result<T, DescriptionError>;

/// Lens settings for the depth of field extension.
#[derive(Clone, Copy, Debug, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LensOptions {
    /// Half-width of the square lens aperture in world units
    pub lens_size: f64,
    /// Distance from the eye to the plane in perfect focus
    pub focal_distance: f64,
}

/// Render settings carried by a description.
///
/// Every field is optional in JSON.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RenderOptions {
    /// Physical image width in pixels
    pub width: u32,
    /// Physical image height in pixels
    pub height: u32,
    /// Logical width rays are traced at; defaults to `width`
    pub screen_width: Option<u32>,
    /// Logical height rays are traced at; defaults to `height`
    pub screen_height: Option<u32>,
    /// Distribution grid side (`samples²` rays per pixel and per area light)
    pub samples: u32,
    pub jitter: bool,
    pub shadows: bool,
    pub max_depth: u32,
    /// Seed for the jitter random source
    pub seed: u64,
    pub depth_of_field: Option<LensOptions>,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            width: 400,
            height: 400,
            screen_width: None,
            screen_height: None,
            samples: 1,
            jitter: false,
            shadows: true,
            max_depth: 5,
            seed: 0,
            depth_of_field: None,
        }
    }
}

impl RenderOptions {
    /// Logical resolution, falling back to the physical one.
    pub fn screen_size(&self) -> (u32, u32) {
        (
            self.screen_width.unwrap_or(self.width),
            self.screen_height.unwrap_or(self.height),
        )
    }

    fn validate(&self) -> DescriptionResult<()> {
        if self.samples == 0 {
            return Err(DescriptionError::InvalidSampleLevel(self.samples));
        }

        let (screen_width, screen_height) = self.screen_size();
        for (width, height) in [(self.width, self.height), (screen_width, screen_height)] {
            if width == 0 || height == 0 {
                return Err(DescriptionError::InvalidResolution { width, height });
            }
        }

        Ok(())
    }
}

/// One authoring call.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum Command {
    Eye {
        from: [f64; 3],
        at: [f64; 3],
        up: [f64; 3],
    },
    Fov {
        degrees: f64,
    },
    Background {
        color: [f64; 3],
    },
    Ambient {
        color: [f64; 3],
    },
    Light {
        color: [f64; 3],
        pos: [f64; 3],
    },
    AreaLight {
        color: [f64; 3],
        pos: [f64; 3],
        u: [f64; 3],
        v: [f64; 3],
    },
    Sphere {
        pos: [f64; 3],
        radius: f64,
        color: [f64; 3],
        k_ambient: f64,
        k_specular: f64,
        specular_pow: f64,
    },
    Disk {
        pos: [f64; 3],
        radius: f64,
        normal: [f64; 3],
        color: [f64; 3],
        k_ambient: f64,
        k_specular: f64,
        specular_pow: f64,
    },
    Reset,
}

impl Command {
    /// Apply this command to `scene`.
    pub fn apply(&self, scene: &mut Scene) {
        let vec = Vec3::from_array;

        match *self {
            Command::Eye { from, at, up } => scene.set_eye(vec(from), vec(at), vec(up)),
            Command::Fov { degrees } => scene.set_fov(degrees),
            Command::Background { color } => scene.set_background(Color::from(color)),
            Command::Ambient { color } => scene.set_ambient(Color::from(color)),
            Command::Light { color, pos } => {
                scene.add_point_light(PointLight::new(Color::from(color), vec(pos)))
            }
            Command::AreaLight { color, pos, u, v } => scene.add_area_light(AreaLight::new(
                Color::from(color),
                vec(pos),
                vec(u),
                vec(v),
            )),
            Command::Sphere {
                pos,
                radius,
                color,
                k_ambient,
                k_specular,
                specular_pow,
            } => scene.add_sphere(Sphere::new(
                vec(pos),
                radius,
                Material::new(Color::from(color), k_ambient, k_specular, specular_pow),
            )),
            Command::Disk {
                pos,
                radius,
                normal,
                color,
                k_ambient,
                k_specular,
                specular_pow,
            } => scene.add_disk(Disk::new(
                vec(pos),
                radius,
                vec(normal),
                Material::new(Color::from(color), k_ambient, k_specular, specular_pow),
            )),
            Command::Reset => scene.reset(),
        }
    }
}

/// A parsed scene description.
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SceneDescription {
    pub render: RenderOptions,
    pub commands: Vec<Command>,
}

impl SceneDescription {
    /// Replay the commands against an empty scene.
    pub fn build_scene(&self) -> Scene {
        let mut scene = Scene::new();
        for command in &self.commands {
            command.apply(&mut scene);
        }

        log::info!(
            "Built scene: {} spheres, {} disks, {} point lights, {} area lights",
            scene.spheres.len(),
            scene.disks.len(),
            scene.point_lights.len(),
            scene.area_lights.len()
        );

        scene
    }
}

/// Parse a description from a JSON string.
pub fn parse_description(json: &str) -> DescriptionResult<SceneDescription> {
    let description: SceneDescription = serde_json::from_str(json)?;
    description.render.validate()?;

    log::debug!("Parsed description with {} commands", description.commands.len());

    Ok(description)
}

/// Load a description from a JSON file.
pub fn load_description<P: AsRef<Path>>(path: P) -> DescriptionResult<SceneDescription> {
    let path = path.as_ref();
    log::info!("Loading scene description: {}", path.display());

    let json = std::fs::read_to_string(path)?;
    parse_description(&json)
}
