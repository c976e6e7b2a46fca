//! Bucket-based tile rendering.
//!
//! Divides the logical screen into tiles (buckets) that are rendered
//! independently and in parallel using rayon.

use std::time::Instant;

use crate::renderer::{render_pixel, write_pixel};
use crate::{Camera, ImageBuffer, RenderConfig};
use lumen_core::Scene;
use lumen_math::Color;
use rand::rngs::StdRng;
use rand::{RngCore, SeedableRng};
use rayon::prelude::*;

/// A rectangular region of the logical screen to render.
#[derive(Debug, Clone, Copy)]
pub struct Bucket {
    /// X coordinate of bucket's top-left corner
    pub x: u32,
    /// Y coordinate of bucket's top-left corner
    pub y: u32,
    /// Width of the bucket in pixels
    pub width: u32,
    /// Height of the bucket in pixels
    pub height: u32,
    /// Index of this bucket in the render order
    pub index: usize,
}

impl Bucket {
    pub fn new(x: u32, y: u32, width: u32, height: u32, index: usize) -> Self {
        Self { x, y, width, height, index }
    }

    /// Get the total number of pixels in this bucket.
    pub fn pixel_count(&self) -> u32 {
        self.width * self.height
    }
}

/// Default bucket size in logical pixels.
pub const DEFAULT_BUCKET_SIZE: u32 = 32;

/// Generate buckets for a screen, sorted center-out.
pub fn generate_buckets(width: u32, height: u32, bucket_size: u32) -> Vec<Bucket> {
    let bucket_size = bucket_size.max(1);
    let mut buckets = Vec::new();

    let mut y = 0;
    while y < height {
        let mut x = 0;
        while x < width {
            let bw = bucket_size.min(width - x);
            let bh = bucket_size.min(height - y);
            buckets.push(Bucket::new(x, y, bw, bh, buckets.len()));
            x += bucket_size;
        }
        y += bucket_size;
    }

    sort_spiral(&mut buckets, width, height);

    // Indices follow the render order
    for (i, bucket) in buckets.iter_mut().enumerate() {
        bucket.index = i;
    }

    buckets
}

/// Sort buckets by distance from the screen center.
fn sort_spiral(buckets: &mut [Bucket], width: u32, height: u32) {
    let center_x = width as f64 / 2.0;
    let center_y = height as f64 / 2.0;

    let distance = |b: &Bucket| {
        let bx = b.x as f64 + b.width as f64 / 2.0;
        let by = b.y as f64 + b.height as f64 / 2.0;
        (bx - center_x).powi(2) + (by - center_y).powi(2)
    };

    buckets.sort_by(|a, b| distance(a).total_cmp(&distance(b)));
}

/// Render a single bucket to a vector of colors.
///
/// Returns pixels in row-major order within the bucket.
pub fn render_bucket(
    bucket: &Bucket,
    camera: &Camera,
    scene: &Scene,
    config: &RenderConfig,
    rng: &mut dyn RngCore,
) -> Vec<Color> {
    let mut pixels = Vec::with_capacity(bucket.pixel_count() as usize);

    for local_y in 0..bucket.height {
        for local_x in 0..bucket.width {
            let color = render_pixel(
                camera,
                scene,
                bucket.x + local_x,
                bucket.y + local_y,
                config,
                rng,
            );
            pixels.push(color);
        }
    }

    pixels
}

/// Result of rendering a bucket.
#[derive(Debug, Clone)]
pub struct BucketResult {
    /// The bucket that was rendered
    pub bucket: Bucket,
    /// Pixel colors in row-major order
    pub pixels: Vec<Color>,
}

impl BucketResult {
    pub fn new(bucket: Bucket, pixels: Vec<Color>) -> Self {
        Self { bucket, pixels }
    }

    /// Write the bucket's pixels into `image`.
    pub fn write_to(&self, image: &mut ImageBuffer, config: &RenderConfig) {
        let coords = (0..self.bucket.height)
            .flat_map(|y| (0..self.bucket.width).map(move |x| (x, y)));

        for ((x, y), color) in coords.zip(&self.pixels) {
            write_pixel(image, config, self.bucket.x + x, self.bucket.y + y, *color);
        }
    }
}

/// Render the entire scene with rayon, one task per bucket.
///
/// Each bucket draws from its own `StdRng` seeded with `config.seed` plus
/// the bucket index, so a given config always produces the same image.
pub fn render_parallel(scene: &Scene, config: &RenderConfig, bucket_size: u32) -> ImageBuffer {
    let start = Instant::now();
    let camera = Camera::new(scene, config);
    let buckets = generate_buckets(config.screen_width, config.screen_height, bucket_size);

    log::info!(
        "Rendering {}x{} (screen {}x{}) @ {}x{} samples in {} buckets",
        config.image_width,
        config.image_height,
        config.screen_width,
        config.screen_height,
        config.samples,
        config.samples,
        buckets.len()
    );

    let results: Vec<BucketResult> = buckets
        .par_iter()
        .map(|bucket| {
            let mut rng = StdRng::seed_from_u64(config.seed.wrapping_add(bucket.index as u64));
            let pixels = render_bucket(bucket, &camera, scene, config, &mut rng);
            log::debug!("Bucket {} done ({} pixels)", bucket.index, pixels.len());
            BucketResult::new(*bucket, pixels)
        })
        .collect();

    let mut image = ImageBuffer::new(config.image_width, config.image_height);
    for result in &results {
        result.write_to(&mut image, config);
    }

    log::info!("Finished rendering scene in {:?}", start.elapsed());
    image
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generate_buckets_exact_fit() {
        let buckets = generate_buckets(128, 128, 64);
        assert_eq!(buckets.len(), 4); // 2x2 grid

        let total_pixels: u32 = buckets.iter().map(|b| b.pixel_count()).sum();
        assert_eq!(total_pixels, 128 * 128);
    }

    #[test]
    fn test_generate_buckets_partial_fit() {
        let buckets = generate_buckets(100, 70, 64);
        assert_eq!(buckets.len(), 4); // 2x2 grid with partial buckets

        let total_pixels: u32 = buckets.iter().map(|b| b.pixel_count()).sum();
        assert_eq!(total_pixels, 100 * 70);
    }

    #[test]
    fn test_spiral_order() {
        let buckets = generate_buckets(192, 192, 64);
        assert_eq!(buckets.len(), 9); // 3x3 grid

        let first = &buckets[0];
        assert_eq!((first.x, first.y), (64, 64));
        assert!(buckets.iter().enumerate().all(|(i, b)| b.index == i));
    }

    #[test]
    fn test_zero_bucket_size_treated_as_one() {
        let buckets = generate_buckets(3, 2, 0);
        assert_eq!(buckets.len(), 6);
    }

    #[test]
    fn test_bucket_result_write_to() {
        let config = RenderConfig::default().with_resolution(4, 4).with_screen(2, 2);
        let bucket = Bucket::new(1, 0, 1, 2, 0);
        let result = BucketResult::new(bucket, vec![Color::WHITE, Color::BLACK]);

        let mut image = ImageBuffer::new(4, 4);
        result.write_to(&mut image, &config);

        // Logical (1, 0) covers physical [2, 4) x [0, 2)
        assert_eq!(image.get(3, 1), [255, 255, 255]);
        assert_eq!(image.get(2, 3), [0, 0, 0]);
        assert_eq!(image.get(0, 0), crate::CLEAR_COLOR);
    }
}
