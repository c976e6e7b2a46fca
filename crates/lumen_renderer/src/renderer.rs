//! Frame driver and output surface.
//!
//! Renders the logical screen pixel by pixel:
//! - Distribution sampling for antialiasing
//! - Averaging of the per-sample shaded colors
//! - Block fill from logical to physical resolution

use std::path::Path;
use std::time::Instant;

use crate::{shade, Camera, DepthOfField, Distribution};
use lumen_core::{RenderOptions, Scene};
use lumen_math::Color;
use rand::seq::SliceRandom;
use rand::RngCore;

/// Render configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderConfig {
    /// Physical image width in pixels
    pub image_width: u32,
    /// Physical image height in pixels
    pub image_height: u32,
    /// Logical width rays are traced at
    pub screen_width: u32,
    /// Logical height rays are traced at
    pub screen_height: u32,
    /// Distribution grid side; `samples²` rays per pixel and per area light
    pub samples: u32,
    /// Jitter samples within their grid cells
    pub jitter: bool,
    /// Cast shadow rays
    pub shadows: bool,
    /// Deepest ray level that still shades
    pub max_depth: u32,
    /// Seed for the random source of seeded renders
    pub seed: u64,
    pub depth_of_field: Option<DepthOfField>,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            image_width: 400,
            image_height: 400,
            screen_width: 400,
            screen_height: 400,
            samples: 1,
            jitter: false,
            shadows: true,
            max_depth: 5,
            seed: 0,
            depth_of_field: None,
        }
    }
}

impl RenderConfig {
    /// Set the physical resolution; the logical resolution follows it.
    pub fn with_resolution(mut self, width: u32, height: u32) -> Self {
        self.image_width = width;
        self.image_height = height;
        self.screen_width = width;
        self.screen_height = height;
        self
    }

    /// Set the logical resolution rays are traced at.
    pub fn with_screen(mut self, width: u32, height: u32) -> Self {
        self.screen_width = width;
        self.screen_height = height;
        self
    }

    /// Set the distribution grid side (clamped to at least 1).
    pub fn with_samples(mut self, samples: u32) -> Self {
        self.samples = samples.max(1);
        self
    }

    pub fn with_jitter(mut self, jitter: bool) -> Self {
        self.jitter = jitter;
        self
    }

    pub fn with_shadows(mut self, shadows: bool) -> Self {
        self.shadows = shadows;
        self
    }

    pub fn with_max_depth(mut self, max_depth: u32) -> Self {
        self.max_depth = max_depth;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    pub fn with_depth_of_field(mut self, depth_of_field: Option<DepthOfField>) -> Self {
        self.depth_of_field = depth_of_field;
        self
    }

    /// The sample pattern used for pixels and area lights.
    pub fn distribution(&self) -> Distribution {
        Distribution::new(self.samples, self.jitter)
    }

    /// Physical pixel range `[x0, x1) x [y0, y1)` covered by logical pixel `(x, y)`.
    pub fn pixel_block(&self, x: u32, y: u32) -> (u32, u32, u32, u32) {
        let scale = |p: u32, physical: u32, logical: u32| {
            (p as u64 * physical as u64 / logical as u64) as u32
        };

        (
            scale(x, self.image_width, self.screen_width),
            scale(y, self.image_height, self.screen_height),
            scale(x + 1, self.image_width, self.screen_width),
            scale(y + 1, self.image_height, self.screen_height),
        )
    }
}

impl From<&RenderOptions> for RenderConfig {
    fn from(options: &RenderOptions) -> Self {
        let (screen_width, screen_height) = options.screen_size();

        RenderConfig::default()
            .with_resolution(options.width, options.height)
            .with_screen(screen_width, screen_height)
            .with_samples(options.samples)
            .with_jitter(options.jitter)
            .with_shadows(options.shadows)
            .with_max_depth(options.max_depth)
            .with_seed(options.seed)
            .with_depth_of_field(options.depth_of_field.map(|lens| DepthOfField {
                lens_size: lens.lens_size,
                focal_distance: lens.focal_distance,
            }))
    }
}

/// Fill color of a freshly cleared image.
pub const CLEAR_COLOR: [u8; 3] = [255, 255, 224];

/// 8-bit RGB image the frame driver writes into.
#[derive(Debug, Clone, PartialEq)]
pub struct ImageBuffer {
    pub width: u32,
    pub height: u32,
    pub pixels: Vec<[u8; 3]>,
}

impl ImageBuffer {
    /// Create a new image buffer filled with [`CLEAR_COLOR`].
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            pixels: vec![CLEAR_COLOR; width as usize * height as usize],
        }
    }

    fn index(&self, x: u32, y: u32) -> usize {
        y as usize * self.width as usize + x as usize
    }

    /// Get the pixel at (x, y).
    pub fn get(&self, x: u32, y: u32) -> [u8; 3] {
        self.pixels[self.index(x, y)]
    }

    /// Set the pixel at (x, y).
    pub fn set(&mut self, x: u32, y: u32, rgb: [u8; 3]) {
        let index = self.index(x, y);
        self.pixels[index] = rgb;
    }

    /// Fill `[x0, x1) x [y0, y1)`, clipped to the image.
    pub fn fill_rect(&mut self, x0: u32, y0: u32, x1: u32, y1: u32, rgb: [u8; 3]) {
        for y in y0..y1.min(self.height) {
            for x in x0..x1.min(self.width) {
                self.set(x, y, rgb);
            }
        }
    }

    /// Reset every pixel to [`CLEAR_COLOR`].
    pub fn clear(&mut self) {
        self.pixels.fill(CLEAR_COLOR);
    }

    /// Packed RGB bytes, row-major.
    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.pixels)
    }

    /// Save the image; the format follows the file extension.
    pub fn save<P: AsRef<Path>>(&self, path: P) -> image::ImageResult<()> {
        image::save_buffer(
            path,
            self.as_bytes(),
            self.width,
            self.height,
            image::ColorType::Rgb8,
        )
    }
}

/// Write one logical pixel's color into its block of physical pixels.
pub fn write_pixel(image: &mut ImageBuffer, config: &RenderConfig, x: u32, y: u32, color: Color) {
    let (x0, y0, x1, y1) = config.pixel_block(x, y);
    image.fill_rect(x0, y0, x1, y1, color.to_rgb8());
}

/// Render a single logical pixel with distribution sampling.
///
/// Sample `(s, t)` traces the eye ray through `(x + s - 0.5, y + t - 0.5)`;
/// the result is the plain average over all `n²` samples.
pub fn render_pixel(
    camera: &Camera,
    scene: &Scene,
    x: u32,
    y: u32,
    config: &RenderConfig,
    rng: &mut dyn RngCore,
) -> Color {
    let distribution = config.distribution();
    let samples = distribution.generate(rng);

    // Lens positions are shuffled so they do not correlate with pixel offsets
    let lens = match camera.depth_of_field() {
        Some(_) => {
            let mut lens = distribution.generate(rng);
            lens.shuffle(&mut *rng);
            Some(lens)
        }
        None => None,
    };

    let mut pixel_color = Color::BLACK;
    for (k, sample) in samples.iter().enumerate() {
        let i = x as f64 + sample.s - 0.5;
        let j = y as f64 + sample.t - 0.5;
        let ray = match &lens {
            Some(lens) => camera.lens_ray(i, j, lens[k]),
            None => camera.ray(i, j),
        };
        pixel_color += shade(scene, &ray, 0, config, rng);
    }

    pixel_color / samples.len() as f64
}

/// Render the entire scene to an image buffer.
///
/// Single-threaded, row by row; see [`render_parallel`](crate::render_parallel)
/// for the bucketed version.
pub fn render(scene: &Scene, config: &RenderConfig, rng: &mut dyn RngCore) -> ImageBuffer {
    let start = Instant::now();
    log::info!(
        "Rendering {}x{} (screen {}x{}) @ {}x{} samples",
        config.image_width,
        config.image_height,
        config.screen_width,
        config.screen_height,
        config.samples,
        config.samples
    );

    let camera = Camera::new(scene, config);
    let mut image = ImageBuffer::new(config.image_width, config.image_height);

    for y in 0..config.screen_height {
        for x in 0..config.screen_width {
            let color = render_pixel(&camera, scene, x, y, config, rng);
            write_pixel(&mut image, config, x, y, color);
        }
    }

    log::info!("Finished rendering scene in {:?}", start.elapsed());
    image
}

#[cfg(test)]
mod tests {
    use super::*;
    use lumen_core::{LensOptions, Material, PointLight, Sphere};
    use lumen_math::Vec3;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn lit_sphere_scene() -> Scene {
        let mut scene = Scene::default();
        scene.set_eye(Vec3::new(0.0, 0.0, 5.0), Vec3::ZERO, Vec3::Y);
        scene.add_sphere(Sphere::new(
            Vec3::ZERO,
            1.0,
            Material::new(Color::new(1.0, 0.2, 0.2), 0.2, 0.5, 10.0),
        ));
        scene.add_point_light(PointLight::new(Color::WHITE, Vec3::new(0.0, 0.0, 10.0)));
        scene.set_ambient(Color::splat(0.2));
        scene
    }

    #[test]
    fn test_pixel_block_partition() {
        let config = RenderConfig::default().with_resolution(10, 7).with_screen(3, 2);

        // Blocks tile the image exactly
        let mut covered = vec![0u32; 70];
        for y in 0..2 {
            for x in 0..3 {
                let (x0, y0, x1, y1) = config.pixel_block(x, y);
                for py in y0..y1 {
                    for px in x0..x1 {
                        covered[(py * 10 + px) as usize] += 1;
                    }
                }
            }
        }
        assert!(covered.iter().all(|&c| c == 1));
        assert_eq!(config.pixel_block(2, 1), (6, 3, 10, 7));
    }

    #[test]
    fn test_image_buffer() {
        let mut image = ImageBuffer::new(4, 3);
        assert_eq!(image.get(3, 2), CLEAR_COLOR);

        image.set(1, 2, [1, 2, 3]);
        assert_eq!(image.get(1, 2), [1, 2, 3]);
        assert_eq!(&image.as_bytes()[27..30], &[1, 2, 3]);
        assert_eq!(image.as_bytes().len(), 36);

        image.fill_rect(2, 1, 10, 10, [9, 9, 9]);
        assert_eq!(image.get(3, 2), [9, 9, 9]);
        assert_eq!(image.get(1, 1), CLEAR_COLOR);

        image.clear();
        assert!(image.pixels.iter().all(|&p| p == CLEAR_COLOR));
    }

    #[test]
    fn test_pixel_index_does_not_wrap() {
        // 100k x 100k pixels overflows u32; indexing must not
        let image = ImageBuffer {
            width: 100_000,
            height: 100_000,
            pixels: Vec::new(),
        };
        assert_eq!(image.index(99_999, 99_999), 9_999_999_999);
    }

    #[test]
    fn test_config_from_options() {
        let options = RenderOptions {
            width: 64,
            height: 32,
            screen_width: Some(16),
            samples: 3,
            jitter: true,
            seed: 11,
            depth_of_field: Some(LensOptions {
                lens_size: 0.1,
                focal_distance: 5.0,
            }),
            ..RenderOptions::default()
        };
        let config = RenderConfig::from(&options);

        assert_eq!((config.image_width, config.image_height), (64, 32));
        assert_eq!((config.screen_width, config.screen_height), (16, 32));
        assert_eq!(config.distribution(), Distribution::new(3, true));
        assert_eq!(config.seed, 11);
        assert_eq!(
            config.depth_of_field,
            Some(DepthOfField {
                lens_size: 0.1,
                focal_distance: 5.0
            })
        );
    }

    #[test]
    fn test_render_pixel_hits_sphere() {
        let scene = lit_sphere_scene();
        let config = RenderConfig::default().with_resolution(9, 9).with_samples(2);
        let camera = Camera::new(&scene, &config);
        let mut rng = StdRng::seed_from_u64(42);

        // Center pixel sees the sphere, corner pixel sees the background
        let center = render_pixel(&camera, &scene, 4, 4, &config, &mut rng);
        let corner = render_pixel(&camera, &scene, 0, 0, &config, &mut rng);

        assert!(center.r > 0.5);
        assert_eq!(corner, scene.background);
    }

    #[test]
    fn test_render_fills_every_pixel() {
        let scene = lit_sphere_scene();
        let config = RenderConfig::default().with_resolution(12, 8).with_screen(6, 4);
        let mut rng = StdRng::seed_from_u64(1);

        let image = render(&scene, &config, &mut rng);

        assert_eq!((image.width, image.height), (12, 8));
        assert!(image.pixels.iter().all(|&p| p != CLEAR_COLOR));
        // Background is grey 0.5 -> 127
        assert_eq!(image.get(0, 0), [127, 127, 127]);
        // Each logical pixel covers a 2x2 block
        assert_eq!(image.get(0, 0), image.get(1, 1));
    }

    #[test]
    fn test_depth_of_field_keeps_focal_plane_sharp() {
        let scene = lit_sphere_scene();
        let focused = RenderConfig::default()
            .with_resolution(9, 9)
            .with_samples(3)
            .with_depth_of_field(Some(DepthOfField {
                lens_size: 0.05,
                focal_distance: 4.0,
            }));
        let camera = Camera::new(&scene, &focused);
        let mut rng = StdRng::seed_from_u64(5);

        // Center pixel stays on the sphere through the whole aperture
        let center = render_pixel(&camera, &scene, 4, 4, &focused, &mut rng);
        assert!(center.r > 0.5);
    }
}
